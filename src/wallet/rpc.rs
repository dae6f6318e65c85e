// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # JSON-RPC Injected Provider
//!
//! Outside a browser there is no `window.ethereum`. A wallet-capable
//! JSON-RPC endpoint (a local signer, a node with unlocked accounts) stands
//! in for it: `request` forwards to the endpoint through an alloy HTTP
//! provider.
//!
//! Plain JSON-RPC has no push channel, so [`AccountWatcher`] polls
//! `eth_accounts` and emits `accountsChanged` whenever the list changes.
//!
//! ## Shutdown
//!
//! The watcher stops when its `CancellationToken` fires. The provider owns
//! the token and cancels it on drop.

use std::{sync::Arc, time::Duration};

use alloy::{
    network::Ethereum,
    providers::{
        fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller},
        Identity, Provider, ProviderBuilder, RootProvider,
    },
    transports::TransportError,
};
use async_trait::async_trait;
use serde_json::Value;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use super::injected::{
    AccountsHandler, InjectedProvider, ListenerId, ListenerRegistry, ProviderError, ProviderEvent,
};

/// HTTP provider type (with all fillers).
type HttpProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider<Ethereum>,
>;

/// Source of the current account list, polled by [`AccountWatcher`].
#[async_trait]
pub trait AccountSource: Send + Sync {
    async fn accounts(&self) -> Result<Vec<String>, ProviderError>;
}

#[derive(Clone)]
struct RpcAccounts {
    provider: HttpProvider,
}

#[async_trait]
impl AccountSource for RpcAccounts {
    async fn accounts(&self) -> Result<Vec<String>, ProviderError> {
        let accounts = self
            .provider
            .get_accounts()
            .await
            .map_err(provider_error)?;
        Ok(accounts.iter().map(ToString::to_string).collect())
    }
}

/// Injected provider backed by a JSON-RPC endpoint.
pub struct RpcInjectedProvider {
    endpoint: Url,
    provider: HttpProvider,
    listeners: Arc<ListenerRegistry>,
    shutdown: CancellationToken,
}

impl RpcInjectedProvider {
    pub fn new(endpoint: Url) -> Self {
        let provider = ProviderBuilder::new().connect_http(endpoint.clone());
        Self {
            endpoint,
            provider,
            listeners: Arc::new(ListenerRegistry::default()),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Start polling `eth_accounts` in the background.
    pub fn spawn_watcher(&self, poll_interval: Duration) -> JoinHandle<()> {
        let watcher = AccountWatcher::new(
            Arc::new(RpcAccounts {
                provider: self.provider.clone(),
            }),
            Arc::clone(&self.listeners),
            poll_interval,
        );
        tokio::spawn(watcher.run(self.shutdown.child_token()))
    }
}

impl Drop for RpcInjectedProvider {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

#[async_trait]
impl InjectedProvider for RpcInjectedProvider {
    /// A configured wallet endpoint stands in for the MetaMask object.
    fn is_metamask(&self) -> bool {
        true
    }

    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value, ProviderError> {
        let params = params.unwrap_or_else(|| Value::Array(Vec::new()));
        debug!(endpoint = %self.endpoint, method, "Provider request");
        self.provider
            .raw_request::<Value, Value>(method.to_string().into(), params)
            .await
            .map_err(provider_error)
    }

    fn on(&self, _event: ProviderEvent, handler: AccountsHandler) -> ListenerId {
        self.listeners.add(handler)
    }

    fn remove_listener(&self, _event: ProviderEvent, id: ListenerId) {
        self.listeners.remove(id);
    }
}

fn provider_error(err: TransportError) -> ProviderError {
    match err.as_error_resp() {
        Some(payload) => ProviderError::new(Some(payload.code), payload.message.to_string()),
        None => ProviderError::new(None, err.to_string()),
    }
}

/// Background task turning `eth_accounts` polls into `accountsChanged`.
pub struct AccountWatcher {
    source: Arc<dyn AccountSource>,
    listeners: Arc<ListenerRegistry>,
    poll_interval: Duration,
    last: Option<Vec<String>>,
}

impl AccountWatcher {
    pub fn new(
        source: Arc<dyn AccountSource>,
        listeners: Arc<ListenerRegistry>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            source,
            listeners,
            poll_interval,
            last: None,
        }
    }

    /// Run the watcher loop until the cancellation token is triggered.
    ///
    /// Should be spawned as a background task:
    /// ```rust,ignore
    /// tokio::spawn(watcher.run(shutdown.clone()));
    /// ```
    pub async fn run(mut self, shutdown: CancellationToken) {
        info!(
            interval_secs = self.poll_interval.as_secs(),
            "Account watcher starting"
        );

        loop {
            if shutdown.is_cancelled() {
                info!("Account watcher shutting down");
                return;
            }

            self.poll_step().await;

            tokio::select! {
                _ = tokio::time::sleep(self.poll_interval) => {},
                _ = shutdown.cancelled() => {
                    info!("Account watcher shutting down");
                    return;
                }
            }
        }
    }

    /// One poll. The first successful answer only sets the baseline;
    /// afterwards every change is emitted.
    async fn poll_step(&mut self) {
        let accounts = match self.source.accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                warn!(error = %e, "Account watcher: eth_accounts failed");
                return;
            }
        };

        match &self.last {
            Some(previous) if *previous == accounts => {}
            Some(_) => {
                info!(count = accounts.len(), "Account watcher: accounts changed");
                self.listeners.emit(&accounts);
                self.last = Some(accounts);
            }
            None => self.last = Some(accounts),
        }
    }
}

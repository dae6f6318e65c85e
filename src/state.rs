// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Application context.
//!
//! Everything shared across forms (the backend client and both wallets) is
//! built once here and passed explicitly. There are no process-wide
//! singletons.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::{
    api::{ApiClient, CertificateApi},
    config::AppConfig,
    error::ClientError,
    wallet::{
        ConnectionProvider, EvmWallet, InjectedProvider, KeypairWallet, RpcInjectedProvider,
        Wallets,
    },
};

pub struct AppContext {
    pub api: Arc<dyn CertificateApi>,
    pub wallets: Wallets,
    watcher: Option<JoinHandle<()>>,
}

impl AppContext {
    pub fn new(api: Arc<dyn CertificateApi>, wallets: Wallets) -> Self {
        Self {
            api,
            wallets,
            watcher: None,
        }
    }

    /// Build the context from configuration: HTTP client, Solana keypair
    /// wallet (auto-connected when enabled) and, when an endpoint is set, the
    /// injected EVM provider with its account watcher.
    ///
    /// Must run inside a tokio runtime.
    pub async fn bootstrap(config: &AppConfig) -> Result<Self, ClientError> {
        let api: Arc<dyn CertificateApi> = Arc::new(ApiClient::new(&config.api_url)?);
        info!(api_url = %config.api_url, "Backend API configured");

        let solana = KeypairWallet::new(config.solana_keypair_path.clone());
        if config.solana_auto_connect && solana.is_available() {
            match solana.connect().await {
                Ok(account) => info!(account = ?account, "Solana wallet auto-connected"),
                Err(e) => warn!(error = %e, "Solana wallet auto-connect failed"),
            }
        }

        let (injected, watcher) = match &config.evm_rpc_url {
            Some(endpoint) => {
                let provider = RpcInjectedProvider::new(endpoint.clone());
                let watcher = provider.spawn_watcher(config.evm_account_poll);
                info!(endpoint = %endpoint, "Injected EVM provider configured");
                (
                    Some(Arc::new(provider) as Arc<dyn InjectedProvider>),
                    Some(watcher),
                )
            }
            None => (None, None),
        };
        let evm = EvmWallet::mount(injected).await;

        Ok(Self {
            api,
            wallets: Wallets::new(Box::new(solana), Box::new(evm)),
            watcher,
        })
    }
}

impl Drop for AppContext {
    fn drop(&mut self) {
        if let Some(watcher) = self.watcher.take() {
            watcher.abort();
        }
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Injected-provider wallet adapter.
//!
//! ## Lifecycle
//!
//! 1. [`EvmWallet::mount`] subscribes to `accountsChanged`, then silently
//!    asks for already-authorized accounts (`eth_accounts`). The query never
//!    prompts; if it fails the wallet simply stays disconnected.
//! 2. Account events replace the local account for as long as the wallet
//!    lives. An event that lands while the mount query is in flight wins over
//!    the query's older answer.
//! 3. Dropping the wallet unregisters the handler.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::debug;

use super::{
    injected::{
        parse_accounts, AccountsHandler, InjectedProvider, ListenerId, ProviderEvent,
        ETH_ACCOUNTS, ETH_REQUEST_ACCOUNTS,
    },
    ConnectionProvider, WalletError, WalletKind,
};

const INSTALL_HINT: &str =
    "Install MetaMask (https://metamask.io/download/) or set EVM_WALLET_RPC_URL";

#[derive(Debug, Default)]
struct AccountSlot {
    account: Option<String>,
    /// Bumped on every write; lets the mount query detect newer events.
    generation: u64,
}

impl AccountSlot {
    fn apply(&mut self, accounts: &[String]) {
        self.account = accounts.first().cloned();
        self.generation += 1;
    }
}

pub struct EvmWallet {
    provider: Option<Arc<dyn InjectedProvider>>,
    is_installed: bool,
    slot: Arc<RwLock<AccountSlot>>,
    listener: Option<ListenerId>,
}

impl EvmWallet {
    /// Attach to `provider` (or to nothing, when no wallet is injected).
    pub async fn mount(provider: Option<Arc<dyn InjectedProvider>>) -> Self {
        let is_installed = provider.as_ref().is_some_and(|p| p.is_metamask());
        let slot = Arc::new(RwLock::new(AccountSlot::default()));

        let Some(injected) = provider.clone() else {
            return Self {
                provider,
                is_installed,
                slot,
                listener: None,
            };
        };

        let handler_slot = Arc::clone(&slot);
        let handler: AccountsHandler = Arc::new(move |accounts: &[String]| {
            if let Ok(mut slot) = handler_slot.write() {
                slot.apply(accounts);
                debug!(account = ?slot.account, "accountsChanged");
            }
        });
        let listener = injected.on(ProviderEvent::AccountsChanged, handler);

        let generation = slot.read().map(|s| s.generation).unwrap_or(0);
        match injected
            .request(ETH_ACCOUNTS, None)
            .await
            .and_then(parse_accounts)
        {
            Ok(accounts) => {
                if let Ok(mut slot) = slot.write() {
                    if slot.generation == generation {
                        slot.apply(&accounts);
                    }
                }
            }
            Err(e) => debug!(error = %e, "eth_accounts failed, staying disconnected"),
        }

        Self {
            provider,
            is_installed,
            slot,
            listener: Some(listener),
        }
    }

    pub fn is_installed(&self) -> bool {
        self.is_installed
    }
}

#[async_trait]
impl ConnectionProvider for EvmWallet {
    fn kind(&self) -> WalletKind {
        WalletKind::Evm
    }

    fn is_available(&self) -> bool {
        self.is_installed
    }

    fn current_account(&self) -> Option<String> {
        self.slot.read().ok().and_then(|s| s.account.clone())
    }

    async fn connect(&self) -> Result<Option<String>, WalletError> {
        let provider = self.provider.as_ref().ok_or(WalletError::NotInstalled)?;
        let accounts = parse_accounts(provider.request(ETH_REQUEST_ACCOUNTS, None).await?)?;
        let mut slot = self
            .slot
            .write()
            .map_err(|_| WalletError::Provider("account state poisoned".to_string()))?;
        slot.apply(&accounts);
        Ok(slot.account.clone())
    }

    fn disconnect(&self) {
        if let Ok(mut slot) = self.slot.write() {
            slot.apply(&[]);
        }
    }

    fn install_hint(&self) -> &'static str {
        INSTALL_HINT
    }
}

impl Drop for EvmWallet {
    fn drop(&mut self) {
        if let (Some(provider), Some(listener)) = (&self.provider, self.listener.take()) {
            provider.remove_listener(ProviderEvent::AccountsChanged, listener);
            debug!("accountsChanged handler removed");
        }
    }
}

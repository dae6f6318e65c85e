// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! EIP-1193 provider shape.
//!
//! Mirrors the object a browser wallet injects: a capability flag, a
//! promise-style `request`, and `on` / `removeListener` for the
//! `accountsChanged` event. Account lists are ordered; the first entry is the
//! active account.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use serde_json::Value;

use super::WalletError;

/// Silent query for already-authorized accounts. Must never prompt.
pub const ETH_ACCOUNTS: &str = "eth_accounts";

/// User-facing authorization request.
pub const ETH_REQUEST_ACCOUNTS: &str = "eth_requestAccounts";

/// EIP-1193 "User Rejected Request".
pub const USER_REJECTED_CODE: i64 = 4001;

pub type AccountsHandler = Arc<dyn Fn(&[String]) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderEvent {
    AccountsChanged,
}

impl ProviderEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ProviderEvent::AccountsChanged => "accountsChanged",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ProviderError {
    pub code: Option<i64>,
    pub message: String,
}

impl ProviderError {
    pub fn new(code: Option<i64>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn user_rejected() -> Self {
        Self::new(Some(USER_REJECTED_CODE), "User rejected the request.")
    }
}

impl From<ProviderError> for WalletError {
    fn from(err: ProviderError) -> Self {
        match err.code {
            Some(USER_REJECTED_CODE) => WalletError::UserRejected,
            _ => WalletError::Provider(err.message),
        }
    }
}

#[async_trait]
pub trait InjectedProvider: Send + Sync {
    /// Capability flag identifying the expected wallet.
    fn is_metamask(&self) -> bool;

    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value, ProviderError>;

    fn on(&self, event: ProviderEvent, handler: AccountsHandler) -> ListenerId;

    fn remove_listener(&self, event: ProviderEvent, id: ListenerId);
}

/// Decode an `eth_accounts` / `eth_requestAccounts` result.
pub fn parse_accounts(value: Value) -> Result<Vec<String>, ProviderError> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(account) => Ok(account),
                other => Err(ProviderError::new(
                    None,
                    format!("expected account string, got {other}"),
                )),
            })
            .collect(),
        Value::Null => Ok(Vec::new()),
        other => Err(ProviderError::new(
            None,
            format!("expected account list, got {other}"),
        )),
    }
}

/// Listener bookkeeping for providers that emit `accountsChanged`.
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: AtomicU64,
    handlers: Mutex<Vec<(ListenerId, AccountsHandler)>>,
}

impl ListenerRegistry {
    pub fn add(&self, handler: AccountsHandler) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        if let Ok(mut handlers) = self.handlers.lock() {
            handlers.push((id, handler));
        }
        id
    }

    /// Returns false when `id` was not registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        let Ok(mut handlers) = self.handlers.lock() else {
            return false;
        };
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        handlers.len() != before
    }

    /// Deliver `accounts` to every registered handler.
    pub fn emit(&self, accounts: &[String]) {
        // Handlers run outside the lock so they may (un)register freely.
        let snapshot: Vec<AccountsHandler> = match self.handlers.lock() {
            Ok(handlers) => handlers.iter().map(|(_, h)| Arc::clone(h)).collect(),
            Err(_) => return,
        };
        for handler in snapshot {
            handler(accounts);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.lock().map(|h| h.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Dual-Wallet Connection Adapter
//!
//! Two unrelated wallet ecosystems sit behind one small capability interface,
//! [`ConnectionProvider`]:
//!
//! - [`solana::KeypairWallet`] - Solana-style wallet backed by a keypair file
//! - [`evm::EvmWallet`] - adapter over an injected EIP-1193 provider
//!
//! They are never merged. [`Wallets`] holds both and answers the one question
//! forms care about, "can the user sign?", as an explicit OR of the two
//! connection flags. Signing APIs are deliberately not unified: this client
//! never builds or submits a transaction itself.
//!
//! Provider absence is a capability state, not an error: callers check
//! [`ConnectionProvider::is_available`] and offer an install hint instead of
//! calling `connect`.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

pub mod evm;
pub mod injected;
pub mod rpc;
pub mod solana;

pub use evm::EvmWallet;
pub use injected::{InjectedProvider, ProviderError, ProviderEvent};
pub use rpc::RpcInjectedProvider;
pub use solana::KeypairWallet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    Solana,
    Evm,
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletKind::Solana => write!(f, "solana"),
            WalletKind::Evm => write!(f, "evm"),
        }
    }
}

/// Snapshot of one provider's connection state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletConnectionState {
    pub is_installed: bool,
    pub is_connected: bool,
    pub account: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("wallet provider is not installed")]
    NotInstalled,

    #[error("user rejected the request")]
    UserRejected,

    #[error("wallet provider error: {0}")]
    Provider(String),

    #[error("failed to read keypair {path}: {reason}")]
    KeypairRead { path: String, reason: String },

    #[error("invalid keypair: {0}")]
    InvalidKeypair(String),
}

/// Capability interface shared by both wallet ecosystems.
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    fn kind(&self) -> WalletKind;

    /// Whether the wallet exists at all. Pure capability check, no I/O.
    fn is_available(&self) -> bool;

    /// Active account or public key, if one is known locally.
    fn current_account(&self) -> Option<String>;

    fn is_connected(&self) -> bool {
        self.current_account().is_some()
    }

    /// User-facing authorization. Errors propagate to the caller untouched.
    async fn connect(&self) -> Result<Option<String>, WalletError>;

    /// Forget the account locally. Idempotent; the external wallet keeps any
    /// authorization it granted.
    fn disconnect(&self);

    /// What to tell the user when the wallet is unavailable.
    fn install_hint(&self) -> &'static str;

    fn state(&self) -> WalletConnectionState {
        let account = self.current_account();
        WalletConnectionState {
            is_installed: self.is_available(),
            is_connected: account.is_some(),
            account,
        }
    }
}

/// Control a UI should offer for one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Affordance {
    Install { hint: &'static str },
    Connect,
    Disconnect { account: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletsSnapshot {
    pub solana: WalletConnectionState,
    pub evm: WalletConnectionState,
}

/// Both providers, side by side.
pub struct Wallets {
    solana: Box<dyn ConnectionProvider>,
    evm: Box<dyn ConnectionProvider>,
}

impl Wallets {
    pub fn new(solana: Box<dyn ConnectionProvider>, evm: Box<dyn ConnectionProvider>) -> Self {
        Self { solana, evm }
    }

    pub fn get(&self, kind: WalletKind) -> &dyn ConnectionProvider {
        match kind {
            WalletKind::Solana => self.solana.as_ref(),
            WalletKind::Evm => self.evm.as_ref(),
        }
    }

    /// True if either wallet holds an account.
    pub fn any_connected(&self) -> bool {
        self.solana.is_connected() || self.evm.is_connected()
    }

    pub fn affordance(&self, kind: WalletKind) -> Affordance {
        let provider = self.get(kind);
        if !provider.is_available() {
            return Affordance::Install {
                hint: provider.install_hint(),
            };
        }
        match provider.current_account() {
            Some(account) => Affordance::Disconnect { account },
            None => Affordance::Connect,
        }
    }

    /// Connect one provider. An unavailable provider is never asked to
    /// connect.
    pub async fn connect(&self, kind: WalletKind) -> Result<Option<String>, WalletError> {
        let provider = self.get(kind);
        if !provider.is_available() {
            return Err(WalletError::NotInstalled);
        }
        let account = provider.connect().await?;
        tracing::info!(wallet = %kind, account = ?account, "Wallet connected");
        Ok(account)
    }

    pub fn disconnect(&self, kind: WalletKind) {
        self.get(kind).disconnect();
        tracing::info!(wallet = %kind, "Wallet disconnected");
    }

    pub fn snapshot(&self) -> WalletsSnapshot {
        WalletsSnapshot {
            solana: self.solana.state(),
            evm: self.evm.state(),
        }
    }
}

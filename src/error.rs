// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Client Error Taxonomy
//!
//! Every failure a form can report falls into one of three kinds:
//!
//! | Kind | Detected | Network call sent |
//! |------|----------|-------------------|
//! | [`ErrorKind::Validation`] | locally, before submit | no |
//! | [`ErrorKind::Connectivity`] | locally, wallet/provider state | no |
//! | [`ErrorKind::Remote`] | backend `ok: false` or transport failure | yes, once |
//!
//! None of them is fatal: the form stays usable and the user may resubmit.

use crate::wallet::WalletError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Connectivity,
    Remote,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A required field is empty.
    #[error("{0}")]
    MissingField(String),

    /// A field is present but cannot be interpreted (e.g. a negative index).
    #[error("{message}")]
    InvalidField { field: &'static str, message: String },

    #[error("{0}")]
    WalletNotConnected(String),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    /// The backend answered with `ok: false`; carries its `error` text verbatim.
    #[error("{0}")]
    Remote(String),

    /// The request never produced a usable envelope.
    #[error("{0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    pub fn missing(message: impl Into<String>) -> Self {
        Self::MissingField(message.into())
    }

    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField(_) | Self::InvalidField { .. } => ErrorKind::Validation,
            Self::WalletNotConnected(_) | Self::Wallet(_) => ErrorKind::Connectivity,
            Self::Remote(_) | Self::Transport(_) | Self::InvalidResponse(_) => ErrorKind::Remote,
        }
    }

    /// True when the error was raised before any request left the client.
    pub fn is_local(&self) -> bool {
        self.kind() != ErrorKind::Remote
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Forms
//!
//! One struct per backend operation. A form owns its inputs exactly as typed,
//! a `submitting` flag and whatever result it last received. It reads wallet
//! state from the [`AppContext`] and never looks at another form.
//!
//! ## Submit
//!
//! Every `submit` follows the same sequence:
//!
//! 1. wallet gate (write operations only)
//! 2. required fields, trimmed; nothing is sent when one is empty
//! 3. numeric fields parsed
//! 4. exactly one API call; `ok: false` becomes a [`ClientError::Remote`]
//!
//! and ends with exactly one toast: a success toast, or a destructive one
//! whose description is the error's display text.
//!
//! `submit` takes `&mut self`, so a second submit of the same form cannot
//! start until the first returns. `submitting` mirrors that window for a
//! front end that renders the form from another task's snapshot; it is
//! always `false` once `submit` returns.
//!
//! [`AppContext`]: crate::state::AppContext

use crate::{
    error::ClientError,
    notify::{Notifier, Toast},
    state::AppContext,
};

pub mod certificate;
pub mod institution;
pub mod platform;

pub use certificate::{IssueCertificateForm, RevokeCertificateForm, VerifyCertificateForm};
pub use institution::{RegisterInstitutionForm, VerifyInstitutionForm};
pub use platform::PlatformSetupForm;

pub const MISSING_FIELDS: &str = "Please fill in all required fields.";
pub const WALLET_NOT_CONNECTED: &str = "Wallet not connected";
pub const MISSING_INFORMATION: &str = "Missing Information";
pub const INVALID_INDEX: &str = "Index must be a non-negative number.";
pub const INVALID_DURATION: &str = "Course duration must be a whole number of months.";

/// Fail unless at least one wallet is connected.
fn require_wallet(ctx: &AppContext, action: &str) -> Result<(), ClientError> {
    if ctx.wallets.any_connected() {
        return Ok(());
    }
    Err(ClientError::WalletNotConnected(format!(
        "Please connect your wallet to {action}."
    )))
}

/// Fail with `message` if any (already trimmed) field is empty.
fn require(fields: &[&str], message: &str) -> Result<(), ClientError> {
    if fields.iter().any(|f| f.is_empty()) {
        return Err(ClientError::missing(message));
    }
    Ok(())
}

fn parse_index(raw: &str) -> Result<u64, ClientError> {
    raw.parse()
        .map_err(|_| ClientError::invalid("Index", INVALID_INDEX))
}

fn parse_duration(raw: &str) -> Result<u32, ClientError> {
    raw.parse()
        .map_err(|_| ClientError::invalid("Duration", INVALID_DURATION))
}

/// Toast title for a failed submit. Remote failures use the form's own title.
fn error_title(err: &ClientError, failure_title: &str) -> String {
    match err {
        ClientError::MissingField(_) => MISSING_INFORMATION.to_string(),
        ClientError::InvalidField { field, .. } => format!("Invalid {field}"),
        ClientError::WalletNotConnected(_) | ClientError::Wallet(_) => {
            WALLET_NOT_CONNECTED.to_string()
        }
        ClientError::Remote(_) | ClientError::Transport(_) | ClientError::InvalidResponse(_) => {
            failure_title.to_string()
        }
    }
}

/// Emit the single toast a submit ends with and hand the result back.
fn report<T>(
    notifier: &dyn Notifier,
    result: Result<T, ClientError>,
    failure_title: &str,
    success: impl FnOnce(&T) -> Toast,
) -> Result<T, ClientError> {
    match &result {
        Ok(value) => notifier.notify(success(value)),
        Err(err) => {
            tracing::warn!(kind = ?err.kind(), error = %err, "{failure_title}");
            notifier.notify(Toast::destructive(
                error_title(err, failure_title),
                err.to_string(),
            ));
        }
    }
    result
}

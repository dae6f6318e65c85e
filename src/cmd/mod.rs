// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use certchain_client::{
    config::AppConfig, error::ClientError, notify::Notifier, state::AppContext,
};

use crate::{cli::Command, output::Output};

mod certificate;
mod dashboard;
mod institution;
mod platform;
mod wallet;

/// Run one command. Failures have already been shown to the user when this
/// returns `Err`.
pub async fn dispatch(
    command: Command,
    ctx: &AppContext,
    config: &AppConfig,
    notifier: &dyn Notifier,
    out: &Output,
) -> Result<(), ClientError> {
    match command {
        Command::Platform { command } => platform::run(command, ctx, notifier, out).await,
        Command::Institution { command } => institution::run(command, ctx, notifier, out).await,
        Command::Certificate { command } => certificate::run(command, ctx, notifier, out).await,
        Command::Wallet { command } => wallet::run(command, ctx, notifier, out).await,
        Command::Dashboard { file } => dashboard::run(file.as_deref(), ctx, config, notifier, out),
    }
}

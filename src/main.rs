// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

mod cli;
mod cmd;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};

use certchain_client::{
    logging::{self, LogFormat},
    notify::{Notifier, TerminalNotifier, Toast},
    state::AppContext,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    logging::init(LogFormat::from_env());

    let notifier = TerminalNotifier::new(cli.json);
    let output = output::Output::new(cli.json);

    let config = match cli.config() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            notifier.notify(Toast::destructive("Configuration Error", e.to_string()));
            return ExitCode::FAILURE;
        }
    };

    let ctx = match AppContext::bootstrap(&config).await {
        Ok(ctx) => ctx,
        Err(e) => {
            error!(error = %e, "Failed to start client");
            notifier.notify(Toast::destructive("Startup Failed", e.to_string()));
            return ExitCode::FAILURE;
        }
    };

    match cmd::dispatch(cli.command, &ctx, &config, &notifier, &output).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Already reported to the user by the command.
            debug!(kind = ?e.kind(), error = %e, "Command failed");
            ExitCode::FAILURE
        }
    }
}

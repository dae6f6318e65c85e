// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use certchain_client::{
    error::ClientError,
    notify::{Notifier, Toast},
    state::AppContext,
    wallet::{Affordance, WalletKind, Wallets},
};

use crate::{cli::WalletCommand, output::Output};

pub async fn run(
    command: WalletCommand,
    ctx: &AppContext,
    notifier: &dyn Notifier,
    out: &Output,
) -> Result<(), ClientError> {
    match command {
        WalletCommand::Status => {
            out.result(&ctx.wallets.snapshot(), || status_text(&ctx.wallets));
        }
        WalletCommand::Connect { wallet } => {
            let kind = WalletKind::from(wallet);
            match ctx.wallets.connect(kind).await {
                Ok(account) => {
                    let account = account.unwrap_or_default();
                    notifier.notify(Toast::success("Wallet Connected", account.clone()));
                    out.result(&ctx.wallets.get(kind).state(), || account);
                }
                Err(e) => {
                    let hint = ctx.wallets.get(kind).install_hint();
                    notifier.notify(Toast::destructive(
                        "Connection Failed",
                        format!("{e}. {hint}"),
                    ));
                    return Err(e.into());
                }
            }
        }
        WalletCommand::Disconnect { wallet } => {
            let kind = WalletKind::from(wallet);
            ctx.wallets.disconnect(kind);
            notifier.notify(Toast::success("Wallet Disconnected", kind.to_string()));
        }
    }
    Ok(())
}

pub fn status_text(wallets: &Wallets) -> String {
    [WalletKind::Solana, WalletKind::Evm]
        .into_iter()
        .map(|kind| {
            let state = match wallets.affordance(kind) {
                Affordance::Install { hint } => format!("not installed ({hint})"),
                Affordance::Connect => "disconnected".to_string(),
                Affordance::Disconnect { account } => format!("connected {account}"),
            };
            format!("{:<8} {state}", kind.to_string())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

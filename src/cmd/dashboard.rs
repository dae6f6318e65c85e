// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::path::Path;

use serde::Serialize;

use certchain_client::{
    catalog::{CatalogSummary, CertificateCatalog},
    config::AppConfig,
    error::ClientError,
    notify::{Notifier, Toast},
    state::AppContext,
    wallet::WalletsSnapshot,
};

use super::wallet::status_text;
use crate::output::Output;

#[derive(Serialize)]
struct Dashboard<'a> {
    api_url: &'a str,
    any_wallet_connected: bool,
    wallets: WalletsSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    certificates: Option<CatalogSummary>,
}

pub fn run(
    file: Option<&Path>,
    ctx: &AppContext,
    config: &AppConfig,
    notifier: &dyn Notifier,
    out: &Output,
) -> Result<(), ClientError> {
    let certificates = file
        .map(CertificateCatalog::load)
        .transpose()
        .inspect_err(|e| notifier.notify(Toast::destructive("Listing Failed", e.to_string())))?
        .map(|catalog| catalog.summary());

    let dashboard = Dashboard {
        api_url: config.api_url.as_str(),
        any_wallet_connected: ctx.wallets.any_connected(),
        wallets: ctx.wallets.snapshot(),
        certificates,
    };

    out.result(&dashboard, || {
        let mut text = format!(
            "Backend  {}\n\n{}",
            dashboard.api_url,
            status_text(&ctx.wallets)
        );
        if let Some(summary) = dashboard.certificates {
            text.push_str(&format!(
                "\n\nTotal Certificates  {}\nValid               {}\nRevoked             {}",
                summary.total, summary.valid, summary.revoked
            ));
        }
        text
    });
    Ok(())
}

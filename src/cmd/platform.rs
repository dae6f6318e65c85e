// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use certchain_client::{
    error::ClientError, forms::PlatformSetupForm, notify::Notifier, state::AppContext,
};

use crate::{cli::PlatformCommand, output::Output};

pub async fn run(
    command: PlatformCommand,
    ctx: &AppContext,
    notifier: &dyn Notifier,
    out: &Output,
) -> Result<(), ClientError> {
    match command {
        PlatformCommand::Init => {
            let platform = PlatformSetupForm::new().submit(ctx, notifier).await?;
            out.result(&platform, || {
                format!(
                    "Platform PDA  {}\nTransaction   {}",
                    platform.platform_pda, platform.tx
                )
            });
            Ok(())
        }
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! One-time platform initialization.

use tracing::info;

use super::{report, require_wallet};
use crate::{
    error::ClientError,
    models::{Envelope, Platform},
    notify::{Notifier, Toast},
    state::AppContext,
};

#[derive(Debug, Default)]
pub struct PlatformSetupForm {
    pub submitting: bool,
    pub initialized: bool,
    pub platform: Option<Platform>,
}

impl PlatformSetupForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submit(
        &mut self,
        ctx: &AppContext,
        notifier: &dyn Notifier,
    ) -> Result<Platform, ClientError> {
        let result = self.run(ctx).await;
        report(notifier, result, "Initialization Failed", |platform| {
            Toast::success(
                "Platform Initialized",
                format!("Platform PDA: {}", platform.platform_pda),
            )
        })
    }

    async fn run(&mut self, ctx: &AppContext) -> Result<Platform, ClientError> {
        require_wallet(ctx, "initialize the platform")?;

        self.submitting = true;
        let result = ctx.api.initialize_platform().await;
        self.submitting = false;

        let platform = result?.into_result("Failed to initialize platform")?;
        info!(platform_pda = %platform.platform_pda, tx = %platform.tx, "Platform initialized");
        self.initialized = true;
        self.platform = Some(platform.clone());
        Ok(platform)
    }
}

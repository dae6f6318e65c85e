// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Institution registration and verification.

use tracing::info;

use super::{report, require, require_wallet, MISSING_FIELDS};
use crate::{
    error::ClientError,
    models::{
        Envelope, Institution, RegisterInstitutionRequest, TxReceipt, VerifyInstitutionRequest,
    },
    notify::{Notifier, Toast},
    state::AppContext,
};

#[derive(Debug, Default)]
pub struct RegisterInstitutionForm {
    pub name: String,
    pub verification_hash: String,
    pub submitting: bool,
    pub institution: Option<Institution>,
}

impl RegisterInstitutionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submit(
        &mut self,
        ctx: &AppContext,
        notifier: &dyn Notifier,
    ) -> Result<Institution, ClientError> {
        let result = self.run(ctx).await;
        report(notifier, result, "Registration Failed", |institution| {
            Toast::success(
                "Institution Registered",
                format!("Institution PDA: {}", institution.institution),
            )
        })
    }

    async fn run(&mut self, ctx: &AppContext) -> Result<Institution, ClientError> {
        require_wallet(ctx, "register an institution")?;

        let request = RegisterInstitutionRequest {
            name: self.name.trim().to_string(),
            verification_hash: self.verification_hash.trim().to_string(),
        };
        require(
            &[request.name.as_str(), request.verification_hash.as_str()],
            MISSING_FIELDS,
        )?;

        self.submitting = true;
        let result = ctx.api.register_institution(&request).await;
        self.submitting = false;

        let institution = result?.into_result("Failed to register institution")?;
        info!(
            institution = %institution.institution,
            tx = %institution.tx,
            "Institution registered"
        );
        self.name.clear();
        self.verification_hash.clear();
        self.institution = Some(institution.clone());
        Ok(institution)
    }
}

#[derive(Debug, Default)]
pub struct VerifyInstitutionForm {
    pub institution_pubkey: String,
    pub submitting: bool,
    pub verified: bool,
}

impl VerifyInstitutionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submit(
        &mut self,
        ctx: &AppContext,
        notifier: &dyn Notifier,
    ) -> Result<TxReceipt, ClientError> {
        let result = self.run(ctx).await;
        report(notifier, result, "Verification Failed", |_| {
            Toast::success(
                "Institution Verified",
                "The institution has been successfully verified and can now issue certificates.",
            )
        })
    }

    async fn run(&mut self, ctx: &AppContext) -> Result<TxReceipt, ClientError> {
        require_wallet(ctx, "verify an institution")?;

        let request = VerifyInstitutionRequest {
            institution_pubkey: self.institution_pubkey.trim().to_string(),
        };
        require(
            &[request.institution_pubkey.as_str()],
            "Please enter the institution public key.",
        )?;

        self.submitting = true;
        let result = ctx.api.verify_institution(&request).await;
        self.submitting = false;

        let receipt = result?.into_result("Failed to verify institution")?;
        info!(institution = %request.institution_pubkey, tx = %receipt.tx, "Institution verified");
        self.verified = true;
        Ok(receipt)
    }
}

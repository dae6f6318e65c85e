// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Certificate issuance, verification and revocation.
//!
//! Issuance is gated on a connected wallet. Verification is a public read
//! and revocation is authorized by the backend, so neither checks wallets.

use tracing::info;

use super::{parse_duration, parse_index, report, require, require_wallet, MISSING_FIELDS};
use crate::{
    error::ClientError,
    models::{
        Certificate, CertificateData, Envelope, IssueCertificateRequest,
        RevokeCertificateRequest, TxReceipt, VerifyCertificateRequest,
    },
    notify::{Notifier, Toast},
    state::AppContext,
};

// =============================================================================
// Issue
// =============================================================================

#[derive(Debug, Default)]
pub struct IssueCertificateForm {
    pub institution_pubkey: String,
    pub student_pubkey: String,
    pub student_name: String,
    pub course_name: String,
    /// Months, as typed.
    pub course_duration: String,
    pub grade: String,
    /// Optional; sent as an empty string when blank.
    pub metadata_uri: String,
    skills: Vec<String>,
    pub submitting: bool,
    pub certificate: Option<Certificate>,
}

impl IssueCertificateForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a skill. Blank and duplicate entries are ignored.
    /// Returns whether the list changed.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() || self.skills.iter().any(|s| s == skill) {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }

    pub fn remove_skill(&mut self, skill: &str) {
        self.skills.retain(|s| s != skill);
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub async fn submit(
        &mut self,
        ctx: &AppContext,
        notifier: &dyn Notifier,
    ) -> Result<Certificate, ClientError> {
        let result = self.run(ctx).await;
        report(notifier, result, "Certificate Issuance Failed", |certificate| {
            Toast::success(
                "Certificate Issued",
                format!("Certificate PDA: {}", certificate.certificate),
            )
        })
    }

    fn request(&self) -> Result<IssueCertificateRequest, ClientError> {
        let institution_pubkey = self.institution_pubkey.trim();
        let student_pubkey = self.student_pubkey.trim();
        let student_name = self.student_name.trim();
        let course_name = self.course_name.trim();
        let course_duration = self.course_duration.trim();
        let grade = self.grade.trim();
        require(
            &[
                institution_pubkey,
                student_pubkey,
                student_name,
                course_name,
                course_duration,
                grade,
            ],
            MISSING_FIELDS,
        )?;

        Ok(IssueCertificateRequest {
            institution_pubkey: institution_pubkey.to_string(),
            student_pubkey: student_pubkey.to_string(),
            student_name: student_name.to_string(),
            course_name: course_name.to_string(),
            course_duration: parse_duration(course_duration)?,
            skills_acquired: self.skills.clone(),
            grade: grade.to_string(),
            metadata_uri: self.metadata_uri.trim().to_string(),
        })
    }

    async fn run(&mut self, ctx: &AppContext) -> Result<Certificate, ClientError> {
        require_wallet(ctx, "issue a certificate")?;
        let request = self.request()?;

        self.submitting = true;
        let result = ctx.api.issue_certificate(&request).await;
        self.submitting = false;

        let certificate = result?.into_result("Failed to issue certificate")?;
        info!(
            certificate = %certificate.certificate,
            institution = %request.institution_pubkey,
            student = %request.student_pubkey,
            tx = %certificate.tx,
            "Certificate issued"
        );
        *self = Self {
            certificate: Some(certificate.clone()),
            ..Self::default()
        };
        Ok(certificate)
    }
}

// =============================================================================
// Verify
// =============================================================================

#[derive(Debug, Default)]
pub struct VerifyCertificateForm {
    pub institution_pubkey: String,
    pub student_pubkey: String,
    /// Optional index, as typed. Blank leaves the choice to the backend.
    pub index: String,
    pub submitting: bool,
    /// Set only by a successful verification; cleared on every submit.
    pub certificate: Option<CertificateData>,
}

impl VerifyCertificateForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submit(
        &mut self,
        ctx: &AppContext,
        notifier: &dyn Notifier,
    ) -> Result<CertificateData, ClientError> {
        let result = self.run(ctx).await;
        report(notifier, result, "Verification Failed", |_| {
            Toast::success(
                "Certificate Found",
                "Certificate verification completed successfully.",
            )
        })
    }

    async fn run(&mut self, ctx: &AppContext) -> Result<CertificateData, ClientError> {
        self.certificate = None;

        let institution_pubkey = self.institution_pubkey.trim();
        let student_pubkey = self.student_pubkey.trim();
        require(
            &[institution_pubkey, student_pubkey],
            "Please enter both institution and student public keys.",
        )?;
        let index = match self.index.trim() {
            "" => None,
            raw => Some(parse_index(raw)?),
        };
        let request = VerifyCertificateRequest {
            institution_pubkey: institution_pubkey.to_string(),
            student_pubkey: student_pubkey.to_string(),
            index,
        };

        self.submitting = true;
        let result = ctx.api.verify_certificate(&request).await;
        self.submitting = false;

        let certificate = result?
            .into_result("Certificate not found")?
            .certificate
            .ok_or_else(|| ClientError::remote("Certificate not found"))?;
        info!(
            pda = %certificate.pda,
            index = certificate.index,
            is_revoked = certificate.is_revoked,
            "Certificate verified"
        );
        self.certificate = Some(certificate.clone());
        Ok(certificate)
    }
}

// =============================================================================
// Revoke
// =============================================================================

#[derive(Debug, Default)]
pub struct RevokeCertificateForm {
    pub institution_pubkey: String,
    pub student_pubkey: String,
    pub index: String,
    pub submitting: bool,
    /// Signature of the last successful revocation.
    pub tx: Option<String>,
}

impl RevokeCertificateForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submit(
        &mut self,
        ctx: &AppContext,
        notifier: &dyn Notifier,
    ) -> Result<TxReceipt, ClientError> {
        let result = self.run(ctx).await;
        report(notifier, result, "Revoke Failed", |receipt| {
            Toast::success("Certificate Revoked", format!("Transaction: {}", receipt.tx))
        })
    }

    async fn run(&mut self, ctx: &AppContext) -> Result<TxReceipt, ClientError> {
        self.tx = None;

        let institution_pubkey = self.institution_pubkey.trim();
        let student_pubkey = self.student_pubkey.trim();
        let index = self.index.trim();
        require(&[institution_pubkey, student_pubkey, index], MISSING_FIELDS)?;
        let request = RevokeCertificateRequest {
            institution_pubkey: institution_pubkey.to_string(),
            student_pubkey: student_pubkey.to_string(),
            index: parse_index(index)?,
        };

        self.submitting = true;
        let result = ctx.api.revoke_certificate(&request).await;
        self.submitting = false;

        let receipt = result?.into_result("Failed to revoke certificate")?;
        info!(
            institution = %request.institution_pubkey,
            student = %request.student_pubkey,
            index = request.index,
            tx = %receipt.tx,
            "Certificate revoked"
        );
        *self = Self {
            tx: Some(receipt.tx.clone()),
            ..Self::default()
        };
        Ok(receipt)
    }
}

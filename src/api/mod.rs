// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Backend API Contract
//!
//! [`CertificateApi`] is the seam between forms and the CertChain backend.
//! Every method is a direct passthrough: one call, one HTTP request, no
//! retries, no caching, no batching. [`ApiClient`] is the reqwest-backed
//! implementation; tests substitute in-memory fakes.
//!
//! ## Endpoints
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | POST | `/platform/initialize` | none |
//! | POST | `/institution/register` | [`RegisterInstitutionRequest`] |
//! | POST | `/institution/verify` | [`VerifyInstitutionRequest`] |
//! | POST | `/certificate/issue` | [`IssueCertificateRequest`] |
//! | POST | `/certificate/verify` | [`VerifyCertificateRequest`] |
//! | POST | `/certificate/revoke` | [`RevokeCertificateRequest`] |

use async_trait::async_trait;

use crate::{
    error::ClientError,
    models::{
        Certificate, Institution, IssueCertificateRequest, Platform, RegisterInstitutionRequest,
        RevokeCertificateRequest, TxReceipt, VerifyCertificateRequest, VerifyCertificateResponse,
        VerifyInstitutionRequest,
    },
};

pub mod client;

pub use client::ApiClient;

pub const PLATFORM_INITIALIZE_PATH: &str = "/platform/initialize";
pub const INSTITUTION_REGISTER_PATH: &str = "/institution/register";
pub const INSTITUTION_VERIFY_PATH: &str = "/institution/verify";
pub const CERTIFICATE_ISSUE_PATH: &str = "/certificate/issue";
pub const CERTIFICATE_VERIFY_PATH: &str = "/certificate/verify";
pub const CERTIFICATE_REVOKE_PATH: &str = "/certificate/revoke";

/// Typed access to the backend.
///
/// Implementations return the decoded envelope as-is, including `ok: false`
/// bodies; interpreting `ok` is left to the caller (see
/// [`crate::models::Envelope::into_result`]).
#[async_trait]
pub trait CertificateApi: Send + Sync {
    async fn initialize_platform(&self) -> Result<Platform, ClientError>;

    async fn register_institution(
        &self,
        request: &RegisterInstitutionRequest,
    ) -> Result<Institution, ClientError>;

    async fn verify_institution(
        &self,
        request: &VerifyInstitutionRequest,
    ) -> Result<TxReceipt, ClientError>;

    async fn issue_certificate(
        &self,
        request: &IssueCertificateRequest,
    ) -> Result<Certificate, ClientError>;

    /// Without `request.index` the backend picks the certificate; the client
    /// applies no selection policy of its own.
    async fn verify_certificate(
        &self,
        request: &VerifyCertificateRequest,
    ) -> Result<VerifyCertificateResponse, ClientError>;

    async fn revoke_certificate(
        &self,
        request: &RevokeCertificateRequest,
    ) -> Result<TxReceipt, ClientError>;
}

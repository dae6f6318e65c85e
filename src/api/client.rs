// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! reqwest-backed [`CertificateApi`] implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use super::{
    CertificateApi, CERTIFICATE_ISSUE_PATH, CERTIFICATE_REVOKE_PATH, CERTIFICATE_VERIFY_PATH,
    INSTITUTION_REGISTER_PATH, INSTITUTION_VERIFY_PATH, PLATFORM_INITIALIZE_PATH,
};
use crate::{
    error::ClientError,
    models::{
        Certificate, ErrorEnvelope, Institution, IssueCertificateRequest, Platform,
        RegisterInstitutionRequest, RevokeCertificateRequest, TxReceipt, VerifyCertificateRequest,
        VerifyCertificateResponse, VerifyInstitutionRequest,
    },
};

/// Header carrying a per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// HTTP client for the CertChain backend.
///
/// Constructed once at startup and shared through [`crate::state::AppContext`].
/// No timeout is configured: a hung request stays pending until it settles.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: &Url) -> Result<Self, ClientError> {
        let http = Client::builder()
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(base_url, http))
    }

    /// Use a preconfigured reqwest client (proxies, custom TLS roots, ...).
    pub fn with_client(base_url: &Url, http: Client) -> Self {
        Self {
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B, R>(&self, path: &str, body: Option<&B>) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let request_id = Uuid::new_v4();
        let url = format!("{}{}", self.base_url, path);

        info!(method = "POST", path, request_id = %request_id, "Backend request");

        let mut request = self
            .http
            .post(&url)
            .header(REQUEST_ID_HEADER, request_id.to_string());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(path, request_id = %request_id, error = %e, "Backend request failed");
            ClientError::Transport(format!("POST {path} failed: {e}"))
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(format!("POST {path} body read failed: {e}")))?;

        debug!(path, request_id = %request_id, status = %status, "Backend response");

        if !status.is_success() {
            // Business failures arrive as `{ok:false,error}` on 4xx/5xx. They
            // go back as a normal envelope so the caller's fallback applies.
            if let Ok(ErrorEnvelope { ok: false, .. }) = serde_json::from_str(&text) {
                if let Ok(envelope) = serde_json::from_str::<R>(&text) {
                    return Ok(envelope);
                }
            }
            return Err(ClientError::Transport(format!(
                "POST {path} returned {status}: {text}"
            )));
        }

        serde_json::from_str(&text)
            .map_err(|e| ClientError::InvalidResponse(format!("POST {path} invalid JSON: {e}")))
    }
}

#[async_trait]
impl CertificateApi for ApiClient {
    async fn initialize_platform(&self) -> Result<Platform, ClientError> {
        self.post::<(), _>(PLATFORM_INITIALIZE_PATH, None).await
    }

    async fn register_institution(
        &self,
        request: &RegisterInstitutionRequest,
    ) -> Result<Institution, ClientError> {
        self.post(INSTITUTION_REGISTER_PATH, Some(request)).await
    }

    async fn verify_institution(
        &self,
        request: &VerifyInstitutionRequest,
    ) -> Result<TxReceipt, ClientError> {
        self.post(INSTITUTION_VERIFY_PATH, Some(request)).await
    }

    async fn issue_certificate(
        &self,
        request: &IssueCertificateRequest,
    ) -> Result<Certificate, ClientError> {
        self.post(CERTIFICATE_ISSUE_PATH, Some(request)).await
    }

    async fn verify_certificate(
        &self,
        request: &VerifyCertificateRequest,
    ) -> Result<VerifyCertificateResponse, ClientError> {
        self.post(CERTIFICATE_VERIFY_PATH, Some(request)).await
    }

    async fn revoke_certificate(
        &self,
        request: &RevokeCertificateRequest,
    ) -> Result<TxReceipt, ClientError> {
        self.post(CERTIFICATE_REVOKE_PATH, Some(request)).await
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response records exchanged with the CertChain backend. These
//! are plain data-transfer types: the client never mutates them, it only
//! replaces them wholesale after a round-trip.
//!
//! ## Response Envelope
//!
//! Every response carries at least `{ ok, error? }`. Success fields are
//! `#[serde(default)]` so an `ok: false` body still deserializes; the
//! [`Envelope`] trait turns such a body into a [`ClientError::Remote`].
//!
//! ## Addresses
//!
//! Platform, institution and certificate addresses (PDAs) and wallet keys are
//! opaque strings to this client.

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

// =============================================================================
// Envelope
// =============================================================================

/// Common `{ ok, error? }` shape shared by every backend response.
pub trait Envelope {
    fn ok(&self) -> bool;
    fn error(&self) -> Option<&str>;

    /// Accept an `ok: true` response, otherwise surface the backend's error
    /// text, falling back to `fallback` when the backend sent none.
    fn into_result(self, fallback: &str) -> Result<Self, ClientError>
    where
        Self: Sized,
    {
        if self.ok() {
            return Ok(self);
        }
        let message = self
            .error()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(fallback)
            .to_string();
        Err(ClientError::Remote(message))
    }
}

macro_rules! impl_envelope {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Envelope for $ty {
                fn ok(&self) -> bool {
                    self.ok
                }

                fn error(&self) -> Option<&str> {
                    self.error.as_deref()
                }
            }
        )+
    };
}

/// Bare envelope, used to read error bodies of non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// =============================================================================
// Platform
// =============================================================================

/// Result of `POST /platform/initialize`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Platform {
    pub ok: bool,
    #[serde(rename = "platformPda", default)]
    pub platform_pda: String,
    #[serde(default)]
    pub tx: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// =============================================================================
// Institution
// =============================================================================

/// Request body for `POST /institution/register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterInstitutionRequest {
    pub name: String,
    pub verification_hash: String,
}

/// Result of `POST /institution/register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Institution {
    pub ok: bool,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub tx: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Request body for `POST /institution/verify`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyInstitutionRequest {
    pub institution_pubkey: String,
}

/// Transaction-only result, returned by institution verification and
/// certificate revocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TxReceipt {
    pub ok: bool,
    #[serde(default)]
    pub tx: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// =============================================================================
// Certificate
// =============================================================================

/// Request body for `POST /certificate/issue`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueCertificateRequest {
    pub institution_pubkey: String,
    pub student_pubkey: String,
    pub student_name: String,
    pub course_name: String,
    /// Course length in months.
    pub course_duration: u32,
    /// Insertion order is acquisition order and is preserved end to end.
    pub skills_acquired: Vec<String>,
    pub grade: String,
    pub metadata_uri: String,
}

/// Result of `POST /certificate/issue`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Certificate {
    pub ok: bool,
    #[serde(default)]
    pub certificate: String,
    #[serde(default)]
    pub tx: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Request body for `POST /certificate/verify`.
///
/// Without an `index` the backend decides which certificate of the
/// (institution, student) pair to return; the field is then omitted from the
/// JSON body entirely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyCertificateRequest {
    pub institution_pubkey: String,
    pub student_pubkey: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u64>,
}

/// Request body for `POST /certificate/revoke`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevokeCertificateRequest {
    pub institution_pubkey: String,
    pub student_pubkey: String,
    pub index: u64,
}

/// Read-only projection of an on-chain certificate record.
///
/// Fetched fresh for every verification and never merged across requests.
/// `is_revoked` is terminal: no client operation clears it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CertificateData {
    pub pda: String,
    pub student_wallet: String,
    pub institution: String,
    pub student_name: String,
    pub course_name: String,
    /// Months.
    pub course_duration: u32,
    #[serde(default)]
    pub skills_acquired: Vec<String>,
    pub grade: String,
    /// Unix timestamp, seconds.
    pub issued_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_hash: Option<String>,
    pub is_revoked: bool,
    /// Disambiguates several certificates for the same student/institution.
    pub index: u64,
}

/// Result of `POST /certificate/verify`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyCertificateResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<CertificateData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl_envelope!(
    ErrorEnvelope,
    Platform,
    Institution,
    TxReceipt,
    Certificate,
    VerifyCertificateResponse,
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn platform_reads_camel_case_pda() {
        let platform: Platform =
            serde_json::from_value(json!({ "ok": true, "platformPda": "PDA1", "tx": "sig" }))
                .unwrap();
        assert_eq!(platform.platform_pda, "PDA1");
        assert_eq!(platform.tx, "sig");
        assert!(platform.error.is_none());
    }

    #[test]
    fn failed_envelope_deserializes_without_success_fields() {
        let cert: Certificate =
            serde_json::from_value(json!({ "ok": false, "error": "institution not verified" }))
                .unwrap();
        assert!(cert.certificate.is_empty());

        let err = cert.into_result("Failed to issue certificate").unwrap_err();
        assert_eq!(err.to_string(), "institution not verified");
    }

    #[test]
    fn into_result_uses_fallback_when_error_missing_or_blank() {
        let receipt = TxReceipt {
            ok: false,
            tx: String::new(),
            error: Some("  ".into()),
        };
        let err = receipt.into_result("Failed to revoke certificate").unwrap_err();
        assert_eq!(err.to_string(), "Failed to revoke certificate");

        let bare = ErrorEnvelope { ok: false, error: None };
        let err = bare.into_result("Unknown error occurred").unwrap_err();
        assert_eq!(err.to_string(), "Unknown error occurred");
    }

    #[test]
    fn verify_request_omits_absent_index() {
        let body = serde_json::to_value(VerifyCertificateRequest {
            institution_pubkey: "INST1".into(),
            student_pubkey: "STU1".into(),
            index: None,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({ "institution_pubkey": "INST1", "student_pubkey": "STU1" })
        );

        let body = serde_json::to_value(VerifyCertificateRequest {
            institution_pubkey: "INST1".into(),
            student_pubkey: "STU1".into(),
            index: Some(0),
        })
        .unwrap();
        assert_eq!(body["index"], json!(0));
    }

    #[test]
    fn certificate_data_keeps_skill_order() {
        let data: CertificateData = serde_json::from_value(json!({
            "pda": "CERT",
            "student_wallet": "STU1",
            "institution": "INST1",
            "student_name": "Ada",
            "course_name": "Systems",
            "course_duration": 12,
            "skills_acquired": ["Rust", "Go", "C"],
            "grade": "A",
            "issued_at": 1_700_000_000,
            "is_revoked": false,
            "index": 2
        }))
        .unwrap();
        assert_eq!(data.skills_acquired, vec!["Rust", "Go", "C"]);
        assert_eq!(data.certificate_hash, None);
        assert_eq!(data.index, 2);
    }
}

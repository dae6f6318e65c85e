// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Certificate listing.
//!
//! The backend has no listing endpoint, so the catalog is built from
//! certificates the user already has: a JSON array of certificate records,
//! of verification responses, or a mix of both (e.g. the collected output of
//! `certchain --json certificate verify`). Failed responses without a
//! certificate are skipped.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::ClientError, models::CertificateData, render::format_short_date};

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogEntry {
    Record(CertificateData),
    Response {
        // Required, so a broken record fails instead of matching here.
        #[allow(dead_code)]
        ok: bool,
        #[serde(default)]
        certificate: Option<CertificateData>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub total: usize,
    pub valid: usize,
    pub revoked: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateCatalog {
    certificates: Vec<CertificateData>,
}

impl CertificateCatalog {
    pub fn new(certificates: Vec<CertificateData>) -> Self {
        Self { certificates }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ClientError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(raw)
            .map_err(|e| ClientError::InvalidResponse(format!("certificate list: {e}")))?;
        let certificates = entries
            .into_iter()
            .filter_map(|entry| match entry {
                CatalogEntry::Record(certificate) => Some(certificate),
                CatalogEntry::Response { certificate, .. } => certificate,
            })
            .collect();
        Ok(Self::new(certificates))
    }

    pub fn load(path: &Path) -> Result<Self, ClientError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            ClientError::InvalidResponse(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn certificates(&self) -> &[CertificateData] {
        &self.certificates
    }

    /// Case-insensitive substring match on student name, course name and
    /// institution. An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&CertificateData> {
        let term = term.trim().to_lowercase();
        self.certificates
            .iter()
            .filter(|c| {
                term.is_empty()
                    || [&c.student_name, &c.course_name, &c.institution]
                        .iter()
                        .any(|field| field.to_lowercase().contains(&term))
            })
            .collect()
    }

    pub fn summary(&self) -> CatalogSummary {
        let revoked = self.certificates.iter().filter(|c| c.is_revoked).count();
        CatalogSummary {
            total: self.certificates.len(),
            valid: self.certificates.len() - revoked,
            revoked,
        }
    }
}

/// One line of the listing.
pub fn listing_line(certificate: &CertificateData) -> String {
    format!(
        "{:<8} {:<24} {:<32} {:<16} {}",
        if certificate.is_revoked { "REVOKED" } else { "VALID" },
        certificate.student_name,
        certificate.course_name,
        certificate.grade,
        format_short_date(certificate.issued_at),
    )
}

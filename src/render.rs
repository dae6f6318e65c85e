// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Plain-text presentation of verified certificates.

use std::fmt;

use chrono::DateTime;

use crate::models::CertificateData;

/// Format a Unix timestamp (seconds) as "November 14, 2023", in UTC.
pub fn format_long_date(timestamp: i64) -> String {
    format_timestamp(timestamp, "%B %-d, %Y")
}

/// Format a Unix timestamp (seconds) as "Nov 14, 2023", in UTC.
pub fn format_short_date(timestamp: i64) -> String {
    format_timestamp(timestamp, "%b %-d, %Y")
}

fn format_timestamp(timestamp: i64, pattern: &str) -> String {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(date) => date.format(pattern).to_string(),
        // Out of chrono's range; show the raw value rather than a wrong date.
        None => timestamp.to_string(),
    }
}

/// Card shown after a successful verification.
#[derive(Debug, Clone, Copy)]
pub struct CertificateCard<'a> {
    certificate: &'a CertificateData,
}

impl<'a> CertificateCard<'a> {
    pub fn new(certificate: &'a CertificateData) -> Self {
        Self { certificate }
    }

    pub fn status_title(&self) -> &'static str {
        if self.certificate.is_revoked {
            "Certificate Revoked"
        } else {
            "Certificate Verified"
        }
    }

    pub fn status_detail(&self) -> &'static str {
        if self.certificate.is_revoked {
            "This certificate has been revoked"
        } else {
            "Authentic and valid"
        }
    }

    pub fn badge(&self) -> &'static str {
        if self.certificate.is_revoked {
            "REVOKED"
        } else {
            "VALID"
        }
    }

    pub fn issued_on(&self) -> String {
        format_long_date(self.certificate.issued_at)
    }

    pub fn duration(&self) -> String {
        format!("{} months", self.certificate.course_duration)
    }

    pub fn index_label(&self) -> String {
        format!("#{}", self.certificate.index)
    }
}

impl fmt::Display for CertificateCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.certificate;
        writeln!(f, "{} [{}]", self.status_title(), self.badge())?;
        writeln!(f, "Certificate found on blockchain - {}", self.status_detail())?;
        writeln!(f)?;
        writeln!(f, "  Student Name       {}", c.student_name)?;
        writeln!(f, "  Course             {}", c.course_name)?;
        writeln!(f, "  Issued On          {}", self.issued_on())?;
        writeln!(f, "  Grade              {}", c.grade)?;
        writeln!(f, "  Duration           {}", self.duration())?;
        writeln!(f, "  Certificate Index  {}", self.index_label())?;
        if !c.skills_acquired.is_empty() {
            writeln!(f, "  Skills Acquired    {}", c.skills_acquired.join(", "))?;
        }
        writeln!(f)?;
        writeln!(f, "  Certificate PDA    {}", c.pda)?;
        writeln!(f, "  Institution        {}", c.institution)?;
        write!(f, "  Student Wallet     {}", c.student_wallet)
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use certchain_client::{
    catalog::{listing_line, CertificateCatalog},
    error::ClientError,
    forms::{IssueCertificateForm, RevokeCertificateForm, VerifyCertificateForm},
    notify::{Notifier, Toast},
    render::CertificateCard,
    state::AppContext,
};

use crate::{cli::CertificateCommand, output::Output};

pub async fn run(
    command: CertificateCommand,
    ctx: &AppContext,
    notifier: &dyn Notifier,
    out: &Output,
) -> Result<(), ClientError> {
    match command {
        CertificateCommand::Issue {
            institution,
            student,
            student_name,
            course_name,
            duration,
            grade,
            skills,
            metadata_uri,
        } => {
            let mut form = IssueCertificateForm::new();
            form.institution_pubkey = institution;
            form.student_pubkey = student;
            form.student_name = student_name;
            form.course_name = course_name;
            form.course_duration = duration;
            form.grade = grade;
            form.metadata_uri = metadata_uri;
            for skill in &skills {
                form.add_skill(skill);
            }
            let certificate = form.submit(ctx, notifier).await?;
            out.result(&certificate, || {
                format!(
                    "Certificate PDA  {}\nTransaction      {}",
                    certificate.certificate, certificate.tx
                )
            });
        }
        CertificateCommand::Verify {
            institution,
            student,
            index,
        } => {
            let mut form = VerifyCertificateForm {
                institution_pubkey: institution,
                student_pubkey: student,
                index,
                ..Default::default()
            };
            let certificate = form.submit(ctx, notifier).await?;
            out.result(&certificate, || {
                CertificateCard::new(&certificate).to_string()
            });
        }
        CertificateCommand::Revoke {
            institution,
            student,
            index,
        } => {
            let mut form = RevokeCertificateForm {
                institution_pubkey: institution,
                student_pubkey: student,
                index,
                ..Default::default()
            };
            let receipt = form.submit(ctx, notifier).await?;
            out.result(&receipt, || format!("Transaction  {}", receipt.tx));
        }
        CertificateCommand::List { file, search } => {
            let catalog = CertificateCatalog::load(&file).inspect_err(|e| {
                notifier.notify(Toast::destructive("Listing Failed", e.to_string()));
            })?;
            let matches = catalog.search(search.as_deref().unwrap_or_default());
            out.result(&matches, || {
                if matches.is_empty() {
                    return "No certificates found".to_string();
                }
                matches
                    .iter()
                    .map(|c| listing_line(c))
                    .collect::<Vec<_>>()
                    .join("\n")
            });
        }
    }
    Ok(())
}

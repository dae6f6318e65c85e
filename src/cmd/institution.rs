// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use certchain_client::{
    error::ClientError,
    forms::{RegisterInstitutionForm, VerifyInstitutionForm},
    notify::Notifier,
    state::AppContext,
};

use crate::{cli::InstitutionCommand, output::Output};

pub async fn run(
    command: InstitutionCommand,
    ctx: &AppContext,
    notifier: &dyn Notifier,
    out: &Output,
) -> Result<(), ClientError> {
    match command {
        InstitutionCommand::Register {
            name,
            verification_hash,
        } => {
            let mut form = RegisterInstitutionForm {
                name,
                verification_hash,
                ..Default::default()
            };
            let institution = form.submit(ctx, notifier).await?;
            out.result(&institution, || {
                format!(
                    "Institution PDA  {}\nTransaction      {}",
                    institution.institution, institution.tx
                )
            });
        }
        InstitutionCommand::Verify { institution } => {
            let mut form = VerifyInstitutionForm {
                institution_pubkey: institution,
                ..Default::default()
            };
            let receipt = form.submit(ctx, notifier).await?;
            out.result(&receipt, || format!("Transaction  {}", receipt.tx));
        }
    }
    Ok(())
}

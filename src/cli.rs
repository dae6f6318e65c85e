// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use certchain_client::{config::AppConfig, error::ConfigError, wallet::WalletKind};

#[derive(Parser, Debug)]
#[command(name = "certchain", version, about = "CertChain certificate console")]
pub struct Cli {
    /// Emit JSON on stdout and JSON notifications on stderr.
    #[arg(long, global = true)]
    pub json: bool,

    /// Backend API base URL (overrides API_URL).
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Solana keypair file (overrides SOLANA_KEYPAIR_PATH).
    #[arg(long, global = true)]
    pub solana_keypair: Option<PathBuf>,

    /// Wallet-capable EVM JSON-RPC endpoint (overrides EVM_WALLET_RPC_URL).
    #[arg(long, global = true)]
    pub evm_rpc_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Environment configuration with command-line overrides applied.
    pub fn config(&self) -> Result<AppConfig, ConfigError> {
        let mut config = AppConfig::from_env()?;
        if let Some(url) = &self.api_url {
            config = config.with_api_url(url)?;
        }
        if let Some(url) = &self.evm_rpc_url {
            config = config.with_evm_rpc_url(url)?;
        }
        if let Some(path) = &self.solana_keypair {
            config = config.with_solana_keypair(path);
        }
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Platform administration.
    Platform {
        #[command(subcommand)]
        command: PlatformCommand,
    },

    /// Register and verify institutions.
    Institution {
        #[command(subcommand)]
        command: InstitutionCommand,
    },

    /// Issue, verify, revoke and list certificates.
    Certificate {
        #[command(subcommand)]
        command: CertificateCommand,
    },

    /// Inspect and connect wallets.
    Wallet {
        #[command(subcommand)]
        command: WalletCommand,
    },

    /// Wallet states, backend URL and an optional certificate summary.
    Dashboard {
        /// Certificate list (JSON) to summarize.
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PlatformCommand {
    /// Initialize the platform (one-time).
    Init,
}

// Field arguments default to empty so the forms report missing values.

#[derive(Subcommand, Debug)]
pub enum InstitutionCommand {
    Register {
        #[arg(long, default_value_t)]
        name: String,
        #[arg(long, default_value_t)]
        verification_hash: String,
    },
    Verify {
        /// Institution public key.
        #[arg(long, default_value_t)]
        institution: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum CertificateCommand {
    Issue {
        #[arg(long, default_value_t)]
        institution: String,
        /// Student wallet address.
        #[arg(long, default_value_t)]
        student: String,
        #[arg(long, default_value_t)]
        student_name: String,
        #[arg(long, default_value_t)]
        course_name: String,
        /// Course length in months.
        #[arg(long, default_value_t)]
        duration: String,
        #[arg(long, default_value_t)]
        grade: String,
        /// Skill acquired; repeat for several, order is kept.
        #[arg(long = "skill")]
        skills: Vec<String>,
        #[arg(long, default_value_t)]
        metadata_uri: String,
    },
    Verify {
        #[arg(long, default_value_t)]
        institution: String,
        #[arg(long, default_value_t)]
        student: String,
        /// Certificate index; the backend chooses when omitted.
        #[arg(long, default_value_t)]
        index: String,
    },
    Revoke {
        #[arg(long, default_value_t)]
        institution: String,
        #[arg(long, default_value_t)]
        student: String,
        #[arg(long, default_value_t)]
        index: String,
    },
    /// List certificates from a JSON file.
    List {
        #[arg(long)]
        file: PathBuf,
        /// Case-insensitive filter on student, course and institution.
        #[arg(long)]
        search: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum WalletCommand {
    Status,
    Connect { wallet: WalletArg },
    Disconnect { wallet: WalletArg },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletArg {
    Solana,
    Evm,
}

impl From<WalletArg> for WalletKind {
    fn from(arg: WalletArg) -> Self {
        match arg {
            WalletArg::Solana => WalletKind::Solana,
            WalletArg::Evm => WalletKind::Evm,
        }
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the client. Configuration is loaded from the environment once
//! at startup; command-line flags override individual values.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `API_URL` | Base URL of the CertChain backend API | `http://localhost:5000/api` |
//! | `SOLANA_KEYPAIR_PATH` | Solana CLI keypair file for the Solana wallet | Unset (wallet unavailable) |
//! | `SOLANA_AUTO_CONNECT` | Connect the Solana wallet at startup | `true` |
//! | `EVM_WALLET_RPC_URL` | Wallet-capable JSON-RPC endpoint used as the injected provider | Unset (not installed) |
//! | `EVM_ACCOUNT_POLL_SECS` | Interval of the `eth_accounts` watcher | `4` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |
//!
//! Values that are empty or whitespace-only count as unset.

use std::{path::PathBuf, time::Duration};

use url::Url;

use crate::error::ConfigError;

/// Environment variable selecting the backend API base URL.
pub const API_URL_ENV: &str = "API_URL";

/// Backend API base URL used when [`API_URL_ENV`] is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Environment variable naming the Solana keypair file.
pub const SOLANA_KEYPAIR_PATH_ENV: &str = "SOLANA_KEYPAIR_PATH";

/// Environment variable toggling Solana auto-connect (`true`/`false`).
pub const SOLANA_AUTO_CONNECT_ENV: &str = "SOLANA_AUTO_CONNECT";

/// Environment variable naming the injected EVM provider endpoint.
///
/// When unset the EVM wallet reports itself as not installed.
pub const EVM_WALLET_RPC_URL_ENV: &str = "EVM_WALLET_RPC_URL";

/// Environment variable for the account watcher interval, in seconds.
pub const EVM_ACCOUNT_POLL_SECS_ENV: &str = "EVM_ACCOUNT_POLL_SECS";

pub const DEFAULT_EVM_ACCOUNT_POLL: Duration = Duration::from_secs(4);

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default tracing filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: Url,
    pub solana_keypair_path: Option<PathBuf>,
    pub solana_auto_connect: bool,
    pub evm_rpc_url: Option<Url>,
    pub evm_account_poll: Duration,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_url = parse_url(
            API_URL_ENV,
            &get(API_URL_ENV).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        )?;

        let evm_rpc_url = get(EVM_WALLET_RPC_URL_ENV)
            .map(|raw| parse_url(EVM_WALLET_RPC_URL_ENV, &raw))
            .transpose()?;

        let solana_auto_connect = match get(SOLANA_AUTO_CONNECT_ENV) {
            Some(raw) => parse_bool(SOLANA_AUTO_CONNECT_ENV, &raw)?,
            None => true,
        };

        let evm_account_poll = match get(EVM_ACCOUNT_POLL_SECS_ENV) {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    name: EVM_ACCOUNT_POLL_SECS_ENV,
                    reason: format!("expected whole seconds, got `{raw}`"),
                })?;
                Duration::from_secs(secs.max(1))
            }
            None => DEFAULT_EVM_ACCOUNT_POLL,
        };

        Ok(Self {
            api_url,
            solana_keypair_path: get(SOLANA_KEYPAIR_PATH_ENV).map(PathBuf::from),
            solana_auto_connect,
            evm_rpc_url,
            evm_account_poll,
        })
    }

    /// Replace the API base URL (command-line override).
    pub fn with_api_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.api_url = parse_url(API_URL_ENV, raw.trim())?;
        Ok(self)
    }

    pub fn with_evm_rpc_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.evm_rpc_url = Some(parse_url(EVM_WALLET_RPC_URL_ENV, raw.trim())?);
        Ok(self)
    }

    pub fn with_solana_keypair(mut self, path: impl Into<PathBuf>) -> Self {
        self.solana_keypair_path = Some(path.into());
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None).expect("built-in defaults are valid")
    }
}

fn parse_url(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
        name,
        reason: format!("`{raw}` is not an absolute URL: {e}"),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidValue {
            name,
            reason: format!("unsupported scheme `{other}`"),
        }),
    }
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            reason: format!("expected true/false, got `{raw}`"),
        }),
    }
}

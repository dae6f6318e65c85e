// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Solana wallet backed by a Solana CLI keypair file.
//!
//! The file holds a JSON array of 64 bytes: the 32-byte Ed25519 seed
//! followed by the 32-byte public key. Connecting reads the file, checks that
//! the two halves belong together and exposes the public key in base58.
//! Only the public key is kept in memory.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use async_trait::async_trait;
use ring::signature::Ed25519KeyPair;

use super::{ConnectionProvider, WalletError, WalletKind};

const KEYPAIR_LEN: usize = 64;
const SEED_LEN: usize = 32;

const INSTALL_HINT: &str =
    "Create a keypair with `solana-keygen new` and set SOLANA_KEYPAIR_PATH";

pub struct KeypairWallet {
    path: Option<PathBuf>,
    // Decided once at construction; the file is only read again on connect.
    available: bool,
    public_key: RwLock<Option<String>>,
}

impl KeypairWallet {
    pub fn new(path: Option<PathBuf>) -> Self {
        let available = path.as_deref().is_some_and(Path::is_file);
        Self {
            path,
            available,
            public_key: RwLock::new(None),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[async_trait]
impl ConnectionProvider for KeypairWallet {
    fn kind(&self) -> WalletKind {
        WalletKind::Solana
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn current_account(&self) -> Option<String> {
        self.public_key.read().ok().and_then(|k| k.clone())
    }

    async fn connect(&self) -> Result<Option<String>, WalletError> {
        let path = self.path.as_deref().ok_or(WalletError::NotInstalled)?;
        let public_key = read_public_key(path)?;
        if let Ok(mut slot) = self.public_key.write() {
            *slot = Some(public_key.clone());
        }
        Ok(Some(public_key))
    }

    fn disconnect(&self) {
        if let Ok(mut slot) = self.public_key.write() {
            *slot = None;
        }
    }

    fn install_hint(&self) -> &'static str {
        INSTALL_HINT
    }
}

/// Read a keypair file and return its base58 public key.
pub fn read_public_key(path: &Path) -> Result<String, WalletError> {
    let raw = fs::read_to_string(path).map_err(|e| WalletError::KeypairRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let bytes: Vec<u8> = serde_json::from_str(raw.trim()).map_err(|e| {
        WalletError::InvalidKeypair(format!("expected a JSON array of {KEYPAIR_LEN} bytes: {e}"))
    })?;

    if bytes.len() != KEYPAIR_LEN {
        return Err(WalletError::InvalidKeypair(format!(
            "expected {KEYPAIR_LEN} bytes, found {}",
            bytes.len()
        )));
    }

    let (seed, public) = bytes.split_at(SEED_LEN);
    Ed25519KeyPair::from_seed_and_public_key(seed, public)
        .map_err(|e| WalletError::InvalidKeypair(format!("seed does not match public key: {e}")))?;

    Ok(bs58::encode(public).into_string())
}

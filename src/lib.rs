// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! CertChain Client - Certificate Issuance Console
//!
//! Client-side contract layer for the CertChain certificate platform: a typed
//! client for the backend REST API, a dual-wallet connection adapter, and the
//! forms that tie the two together. All business rules live in the backend
//! and the on-chain program; this crate validates input, calls the API and
//! reports the outcome.
//!
//! ## Modules
//!
//! - `api` - Backend API client (reqwest)
//! - `wallet` - Solana keypair wallet and injected EIP-1193 provider adapter
//! - `forms` - Form state and submit flows
//! - `state` - Explicitly constructed application context
//! - `render` / `catalog` - Certificate card and listing
//! - `notify` - User notifications (toasts)
//! - `config` / `logging` - Environment configuration and tracing setup

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod forms;
pub mod logging;
pub mod models;
pub mod notify;
pub mod render;
pub mod state;
pub mod wallet;

#[cfg(test)]
mod testing;

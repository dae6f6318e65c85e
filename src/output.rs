// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::io::{self, Write};

use serde::Serialize;

/// Result printer for stdout. Notifications go to stderr separately.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Print `value` as pretty JSON in `--json` mode, otherwise `text()`.
    pub fn result<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) {
        let rendered = if self.json {
            match serde_json::to_string_pretty(value) {
                Ok(json) => json,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to serialize result");
                    return;
                }
            }
        } else {
            text()
        };

        if let Err(e) = writeln!(io::stdout().lock(), "{rendered}") {
            tracing::warn!(error = %e, "failed to write result");
        }
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transient user notifications ("toasts").
//!
//! Every error, whatever its kind, is presented the same way: one
//! destructive toast. Successes get a default toast.

use std::{io::Write, sync::Mutex};

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == ToastVariant::Destructive
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Keeps every toast in memory, in order.
#[derive(Debug, Default)]
pub struct ToastLog {
    toasts: Mutex<Vec<Toast>>,
}

impl ToastLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().map(|t| t.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Toast> {
        self.toasts.lock().ok().and_then(|t| t.last().cloned())
    }

    pub fn len(&self) -> usize {
        self.toasts.lock().map(|t| t.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for ToastLog {
    fn notify(&self, toast: Toast) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(toast);
        }
    }
}

/// Writes toasts to stderr, coloured by variant, or as JSON lines.
#[derive(Debug, Clone, Copy)]
pub struct TerminalNotifier {
    json: bool,
}

impl TerminalNotifier {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    fn write_toast(&self, toast: &Toast) -> std::io::Result<()> {
        if self.json {
            let line = serde_json::to_string(toast).map_err(std::io::Error::other)?;
            return writeln!(std::io::stderr(), "{line}");
        }

        let mut stderr = StandardStream::stderr(ColorChoice::Auto);
        let color = match toast.variant {
            ToastVariant::Default => Color::Green,
            ToastVariant::Destructive => Color::Red,
        };
        stderr.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(stderr, "{}", toast.title)?;
        stderr.reset()?;
        writeln!(stderr, ": {}", toast.description)
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, toast: Toast) {
        if let Err(e) = self.write_toast(&toast) {
            tracing::warn!(error = %e, title = %toast.title, "failed to print notification");
        }
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Domain-specific failure raised by a graph transformation pass.
///
/// Passes return `anyhow::Result`, so any error type can escape them. A
/// `PassError` marks the failure as coming from the graph compiler itself
/// rather than from some library the pass happened to call.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("pass '{pass}' failed: {message}")]
pub struct PassError {
    pub pass: String,
    pub message: String,
}

impl PassError {
    pub fn new(pass: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            pass: pass.into(),
            message: message.into(),
        }
    }
}

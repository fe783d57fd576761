// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Diagnostic output goes through message types in [`messages`]. Each
//! message is a struct implementing `Display` (the human-readable line) and
//! [`messages::StructuredLog`] (the same event with structured fields), so
//! log text is not scattered through the code as magic strings.
//!
//! # Usage
//!
//! ```rust
//! use template_plugin::observability::messages::compiled_model::TransformationsSkipped;
//! use template_plugin::observability::messages::StructuredLog;
//!
//! TransformationsSkipped { model_name: "net1" }.log();
//! ```

pub mod messages;

use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber filtered by `RUST_LOG`, or by
/// `default_filter` when `RUST_LOG` is unset.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_install_is_refused() {
        init_tracing("template_plugin=debug");
        assert!(!init_tracing("template_plugin=debug"));
    }
}

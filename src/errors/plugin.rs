// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Public error type for every fallible backend operation.
//!
//! Compilation, property negotiation, export/import and inference all report
//! through [`PluginError`]. The variants are terminal to the operation that
//! raised them; nothing in this crate retries internally.

use thiserror::Error;

/// Errors surfaced by the plugin, compiled models and inference requests.
#[derive(Error, Debug)]
pub enum PluginError {
    /// Construction of a compiled model failed. The model is never returned
    /// partially built.
    #[error("Model compilation failed: {reason}")]
    Compilation { reason: String },

    /// The operation is intentionally unsupported (e.g. mutating a compiled
    /// model's properties).
    #[error("Operation '{operation}' is not implemented")]
    NotImplemented { operation: &'static str },

    /// A property or configuration key was never set and has no default.
    #[error("Unsupported property '{name}'")]
    UnknownOption { name: String },

    /// A recognized property was given a value it cannot accept.
    #[error("Invalid value for property '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    /// The model graph is structurally invalid.
    #[error("Invalid model graph: {0}")]
    InvalidGraph(String),

    /// An exported model stream could not be parsed.
    #[error("Malformed model stream: {0}")]
    MalformedStream(String),

    /// An inference request failed while running.
    #[error("Inference failed: {0}")]
    Infer(String),

    /// Another inference is already running on the same request.
    #[error("Inference request is busy")]
    Busy,

    /// The inference request was cancelled before it completed.
    #[error("Inference request was cancelled")]
    Cancelled,

    /// The plugin that created a compiled model has already been released.
    #[error("The owning plugin has been released")]
    PluginReleased,

    /// Underlying stream read/write failure, propagated unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Graph-structure (de)serialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for plugin operations.
pub type PluginResult<T> = Result<T, PluginError>;

impl PluginError {
    pub fn unknown_option(name: impl Into<String>) -> Self {
        PluginError::UnknownOption { name: name.into() }
    }

    pub fn invalid_value(name: impl Into<String>, reason: impl Into<String>) -> Self {
        PluginError::InvalidValue {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_convert_unchanged() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "sink closed");
        let error: PluginError = io.into();

        match error {
            PluginError::Io(inner) => assert_eq!(inner.kind(), std::io::ErrorKind::BrokenPipe),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            PluginError::unknown_option("not_a_real_property").to_string(),
            "Unsupported property 'not_a_real_property'"
        );
        assert_eq!(
            PluginError::NotImplemented { operation: "set_property" }.to_string(),
            "Operation 'set_property' is not implemented"
        );
    }
}

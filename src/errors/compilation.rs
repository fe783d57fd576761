// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Internal classification of compilation failures.
//!
//! The transformation pipeline can fail in three ways: a [`PassError`] raised
//! by a pass, any other error bubbling up from a library a pass uses, or a
//! panic. The category is only used for logging; callers always receive a
//! single [`PluginError::Compilation`].

use std::any::Any;
use std::fmt;

use super::{PassError, PluginError};

#[derive(Debug, Clone, PartialEq)]
pub enum CompileFailure {
    /// Failure reported by the graph compiler itself.
    Compiler(String),
    /// Failure from some other library used during compilation.
    Runtime(String),
    /// A panic with no usable error value.
    Unknown,
}

impl CompileFailure {
    /// Classify an error returned by the transformation pipeline.
    pub fn from_error(error: anyhow::Error) -> Self {
        match error.downcast::<PassError>() {
            Ok(pass_error) => CompileFailure::Compiler(pass_error.to_string()),
            Err(other) => CompileFailure::Runtime(format!("{:#}", other)),
        }
    }

    /// Classify a payload caught from a panicking pass.
    ///
    /// Panic payloads are opaque, so even a string message lands in the
    /// `Unknown` category; the message is dropped.
    pub fn from_panic(_payload: Box<dyn Any + Send>) -> Self {
        CompileFailure::Unknown
    }

    pub fn category(&self) -> &'static str {
        match self {
            CompileFailure::Compiler(_) => "compiler",
            CompileFailure::Runtime(_) => "runtime",
            CompileFailure::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CompileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileFailure::Compiler(message) => write!(f, "{}", message),
            CompileFailure::Runtime(message) => {
                write!(f, "Error from compilation library: {}", message)
            }
            CompileFailure::Unknown => write!(f, "Unknown failure during compilation"),
        }
    }
}

impl From<CompileFailure> for PluginError {
    fn from(failure: CompileFailure) -> Self {
        PluginError::Compilation {
            reason: failure.to_string(),
        }
    }
}

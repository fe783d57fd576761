// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Messages are organized by subsystem:
//!
//! * `compiled_model` - compilation, property negotiation, export
//! * `plugin` - compile and import entry points
//! * `infer_request` - request creation and inference outcomes

use tracing::Span;

pub mod compiled_model;
pub mod infer_request;
pub mod plugin;

/// A message that knows its own log level and structured fields.
pub trait StructuredLog {
    /// Emit the event at the message's level.
    fn log(&self);

    /// Open a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}

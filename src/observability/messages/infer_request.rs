// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for inference requests.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// An inference request was created against a compiled model.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct RequestCreated<'a> {
    pub model_name: &'a str,
    pub asynchronous: bool,
}

impl Display for RequestCreated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Created {} inference request for model '{}'",
            if self.asynchronous { "async" } else { "sync" },
            self.model_name
        )
    }
}

impl StructuredLog for RequestCreated<'_> {
    fn log(&self) {
        tracing::debug!(
            model_name = self.model_name,
            asynchronous = self.asynchronous,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("infer_request", span_name = name, model_name = self.model_name)
    }
}

/// An async inference finished, successfully or not.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct InferenceCompleted {
    pub succeeded: bool,
}

impl Display for InferenceCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Inference {}",
            if self.succeeded { "completed" } else { "failed" }
        )
    }
}

impl StructuredLog for InferenceCompleted {
    fn log(&self) {
        tracing::debug!(succeeded = self.succeeded, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("inference", span_name = name, succeeded = self.succeeded)
    }
}

/// An async inference was cancelled while in flight.
///
/// # Log Level
/// `info!` - Important operational event
pub struct InferenceCancelled<'a> {
    pub executor: &'a str,
}

impl Display for InferenceCancelled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Inference cancelled (task executor '{}')", self.executor)
    }
}

impl StructuredLog for InferenceCancelled<'_> {
    fn log(&self) {
        tracing::info!(executor = self.executor, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("inference_cancelled", span_name = name, executor = self.executor)
    }
}

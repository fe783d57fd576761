// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the compiled model lifecycle.
//!
//! This module contains message types for logging events related to:
//! * Compilation start, completion and failure
//! * Property mutation attempts
//! * Model export

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Compilation of a model started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use template_plugin::observability::messages::compiled_model::CompilationStarted;
///
/// let msg = CompilationStarted {
///     model_name: "net1",
///     device: "TEMPLATE",
///     transformations_enabled: true,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct CompilationStarted<'a> {
    pub model_name: &'a str,
    pub device: &'a str,
    pub transformations_enabled: bool,
}

impl Display for CompilationStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Compiling model '{}' for {} (transformations {})",
            self.model_name,
            self.device,
            if self.transformations_enabled { "enabled" } else { "disabled" }
        )
    }
}

impl StructuredLog for CompilationStarted<'_> {
    fn log(&self) {
        tracing::info!(
            model_name = self.model_name,
            device = self.device,
            transformations_enabled = self.transformations_enabled,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "compilation",
            span_name = name,
            model_name = self.model_name,
            device = self.device,
        )
    }
}

/// Compilation finished and the model is ready for requests.
///
/// # Log Level
/// `info!` - Important operational event
pub struct CompilationCompleted<'a> {
    pub model_name: &'a str,
    pub loaded_from_cache: bool,
    pub duration: Duration,
}

impl Display for CompilationCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Compiled model '{}' in {:?}{}",
            self.model_name,
            self.duration,
            if self.loaded_from_cache { " (from cache)" } else { "" }
        )
    }
}

impl StructuredLog for CompilationCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            model_name = self.model_name,
            loaded_from_cache = self.loaded_from_cache,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "compilation_completed",
            span_name = name,
            model_name = self.model_name,
            duration = ?self.duration,
        )
    }
}

/// Compilation failed. The category is only reported here; callers see a
/// single compilation error.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use template_plugin::observability::messages::compiled_model::CompilationFailed;
///
/// let msg = CompilationFailed {
///     model_name: "net1",
///     category: "compiler",
///     reason: "pass 'fold' failed: bad constant",
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct CompilationFailed<'a> {
    pub model_name: &'a str,
    pub category: &'a str,
    pub reason: &'a str,
}

impl Display for CompilationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Compilation of model '{}' failed ({} error): {}",
            self.model_name, self.category, self.reason
        )
    }
}

impl StructuredLog for CompilationFailed<'_> {
    fn log(&self) {
        tracing::error!(
            model_name = self.model_name,
            category = self.category,
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "compilation_failed",
            span_name = name,
            model_name = self.model_name,
            category = self.category,
        )
    }
}

/// Transformations were skipped by configuration.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct TransformationsSkipped<'a> {
    pub model_name: &'a str,
}

impl Display for TransformationsSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Transformations disabled, compiling model '{}' as-is",
            self.model_name
        )
    }
}

impl StructuredLog for TransformationsSkipped<'_> {
    fn log(&self) {
        tracing::debug!(model_name = self.model_name, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "transformations_skipped",
            span_name = name,
            model_name = self.model_name
        )
    }
}

/// A caller tried to mutate a compiled model's properties.
///
/// # Log Level
/// `warn!` - Caller error worth surfacing
pub struct PropertyMutationRejected<'a> {
    pub model_name: &'a str,
    pub property_count: usize,
}

impl Display for PropertyMutationRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Rejected set_property with {} entries on compiled model '{}': recompile instead",
            self.property_count, self.model_name
        )
    }
}

impl StructuredLog for PropertyMutationRejected<'_> {
    fn log(&self) {
        tracing::warn!(
            model_name = self.model_name,
            property_count = self.property_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "property_mutation_rejected",
            span_name = name,
            model_name = self.model_name
        )
    }
}

/// The model was written to an export stream.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ModelExported<'a> {
    pub model_name: &'a str,
    pub structure_bytes: usize,
    pub constants_bytes: usize,
}

impl Display for ModelExported<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Exported model '{}': {} structure bytes, {} constant bytes",
            self.model_name, self.structure_bytes, self.constants_bytes
        )
    }
}

impl StructuredLog for ModelExported<'_> {
    fn log(&self) {
        tracing::info!(
            model_name = self.model_name,
            structure_bytes = self.structure_bytes,
            constants_bytes = self.constants_bytes,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("export", span_name = name, model_name = self.model_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compilation_failed_display_includes_category() {
        let msg = CompilationFailed {
            model_name: "net1",
            category: "unknown",
            reason: "Unknown failure during compilation",
        };

        assert_eq!(
            msg.to_string(),
            "Compilation of model 'net1' failed (unknown error): Unknown failure during compilation"
        );
    }

    #[test]
    fn test_compilation_completed_marks_cache() {
        let msg = CompilationCompleted {
            model_name: "net1",
            loaded_from_cache: true,
            duration: Duration::from_millis(5),
        };

        assert!(msg.to_string().ends_with("(from cache)"));
    }
}

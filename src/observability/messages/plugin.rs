// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for plugin entry points.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A model was reconstructed from an exported stream.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use template_plugin::observability::messages::plugin::ModelImported;
///
/// let msg = ModelImported {
///     device: "TEMPLATE",
///     structure_bytes: 512,
///     constants_bytes: 4096,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ModelImported<'a> {
    pub device: &'a str,
    pub structure_bytes: usize,
    pub constants_bytes: usize,
}

impl Display for ModelImported<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Importing model for {}: {} structure bytes, {} constant bytes",
            self.device, self.structure_bytes, self.constants_bytes
        )
    }
}

impl StructuredLog for ModelImported<'_> {
    fn log(&self) {
        tracing::info!(
            device = self.device,
            structure_bytes = self.structure_bytes,
            constants_bytes = self.constants_bytes,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("import", span_name = name, device = self.device)
    }
}

/// The plugin was assembled.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct PluginCreated<'a> {
    pub device: &'a str,
    pub backend: &'a str,
    pub wait_executor: &'a str,
}

impl Display for PluginCreated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Created {} plugin with backend '{}' and wait executor '{}'",
            self.device, self.backend, self.wait_executor
        )
    }
}

impl StructuredLog for PluginCreated<'_> {
    fn log(&self) {
        tracing::debug!(
            device = self.device,
            backend = self.backend,
            wait_executor = self.wait_executor,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("plugin", span_name = name, device = self.device)
    }
}

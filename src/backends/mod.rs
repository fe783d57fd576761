// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Device backend implementations.
//!
//! # Available Backends
//!
//! ## Template Backend
//! Reference backend for a device family named `TEMPLATE`:
//! - **Compilation**: runs the plugin's transformation pipeline once per model
//! - **Properties**: read-only negotiation plus legacy metric/config keys
//! - **Caching**: export/import through a length-prefixed two-block stream
//! - **Inference**: four-stage sync requests wrapped by [`AsyncInferRequest`]
//!
//! ## Stub Backend (Test-Only)
//! Test doubles for plugin and compiled-model tests (only available in test builds):
//! - **EchoBackend** / **BrokenBackend**: execution backends with fixed behavior
//! - **CountingPass** / **FailingPass**: transformations that count calls or fail
//! - **ParkedExecutor**: executor that never runs its tasks
//! - **RecordingPlugin**: host plugin with a switchable streams-executor report
//!
//! # Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use template_plugin::backends::template::TemplatePlugin;
//! use template_plugin::config::PropertyMap;
//! use template_plugin::graph::Model;
//! use template_plugin::errors::PluginResult;
//! use template_plugin::traits::{CompiledModel, ExecutionBackend};
//!
//! # fn run(backend: Arc<dyn ExecutionBackend>, model: Model) -> PluginResult<()> {
//! let plugin = TemplatePlugin::builder(backend).build();
//! let compiled = plugin.compile_model(Arc::new(model), &PropertyMap::new())?;
//!
//! let mut cache = Vec::new();
//! compiled.export_model(&mut cache)?;
//! let restored = plugin.import_model(&mut cache.as_slice(), &PropertyMap::new())?;
//! assert!(restored.loaded_from_cache());
//! # Ok(())
//! # }
//! ```
//!
//! [`AsyncInferRequest`]: crate::engine::AsyncInferRequest

pub mod template;

#[cfg(test)]
pub mod stub;

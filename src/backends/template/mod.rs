// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The template backend.
//!
//! A skeleton device backend showing the full compiled-model lifecycle:
//!
//! ```text
//! TemplatePlugin::compile_model ─► TemplateCompiledModel ─► TemplateInferRequest
//!                                         │                        │
//!                                         │                  AsyncInferRequest
//!                                         ▼
//!                                   export_model ─► framing ─► TemplatePlugin::import_model
//! ```
//!
//! Numeric work is delegated to the plugin's
//! [`ExecutionBackend`](crate::traits::ExecutionBackend); graph rewrites to
//! its [`ModelTransformation`](crate::traits::ModelTransformation).

mod compiled_model;
pub mod framing;
mod infer_request;
mod pipeline;
mod plugin;


pub use compiled_model::TemplateCompiledModel;
pub use infer_request::TemplateInferRequest;
pub use pipeline::TransformationPipeline;
pub use plugin::{TemplatePlugin, TemplatePluginBuilder};

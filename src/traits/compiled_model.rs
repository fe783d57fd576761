// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::io::Write;
use std::sync::Arc;

use crate::config::{PropertyMap, PropertyName, PropertyValue};
use crate::engine::AsyncInferRequest;
use crate::errors::PluginResult;
use crate::graph::Model;
use crate::traits::SyncInferRequest;

/// Read-only and read-write property names of a compiled model.
#[derive(Debug, Clone, PartialEq)]
pub struct SupportedProperties {
    pub read_only: Vec<PropertyName>,
    pub read_write: Vec<PropertyName>,
}

impl SupportedProperties {
    /// Both sets in one list, read-only first.
    pub fn all(&self) -> Vec<PropertyName> {
        self.read_only
            .iter()
            .chain(self.read_write.iter())
            .cloned()
            .collect()
    }
}

/// A model bound to a configuration and prepared for one backend.
///
/// The host runtime dispatches through this trait; each backend supplies one
/// implementation. Every method takes `&self` and must be safe to call from
/// many threads at once.
pub trait CompiledModel: Send + Sync {
    fn create_sync_infer_request(&self) -> PluginResult<Box<dyn SyncInferRequest>>;

    fn create_infer_request(&self) -> PluginResult<AsyncInferRequest>;

    fn set_property(&self, properties: &PropertyMap) -> PluginResult<()>;

    fn get_property(&self, name: &str) -> PluginResult<PropertyValue>;

    fn get_supported_properties(&self) -> SupportedProperties;

    /// The graph as compiled, for inspection.
    fn get_runtime_model(&self) -> Arc<Model>;

    fn export_model(&self, sink: &mut dyn Write) -> PluginResult<()>;
}

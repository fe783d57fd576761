// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::config::{PropertyMap, StreamsExecutorConfig};
use crate::traits::{ExecutionBackend, ModelTransformation, TaskExecutor};

/// The host-side plugin a compiled model looks things up on.
///
/// Compiled models keep only a weak reference to their plugin; the host
/// releases plugins after every model they created.
pub trait Plugin: Send + Sync {
    /// Device family name, e.g. `"TEMPLATE"`.
    fn device_name(&self) -> &str;

    /// Executor that waits on device completion. Created once per plugin and
    /// shared by all of its compiled models.
    fn wait_executor(&self) -> Arc<dyn TaskExecutor>;

    fn backend(&self) -> Arc<dyn ExecutionBackend>;

    /// Pipeline run over a model during compilation.
    fn transformations(&self) -> Arc<dyn ModelTransformation>;

    /// Names the streams executor currently reports as supported.
    ///
    /// Queried on every call; implementations may answer differently as
    /// device state changes.
    fn streams_executor_supported_properties(&self) -> Vec<String> {
        StreamsExecutorConfig::supported_properties()
    }
}

/// Device context a model is compiled for.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RemoteContext {
    pub device_name: String,
    pub params: PropertyMap,
}

impl RemoteContext {
    pub fn new(device_name: impl Into<String>) -> Self {
        Self {
            device_name: device_name.into(),
            params: PropertyMap::new(),
        }
    }
}

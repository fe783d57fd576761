// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::Duration;

use crate::errors::PluginResult;
use crate::graph::Tensor;

/// Timing of one pipeline stage of the last inference.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilingInfo {
    pub stage: &'static str,
    pub real_time: Duration,
}

/// A synchronous inference request bound to one compiled model.
///
/// Inference is split into four stages so an async wrapper can run them on
/// different executors. `infer` runs them back to back.
pub trait SyncInferRequest: Send {
    fn set_tensor(&mut self, name: &str, tensor: Tensor) -> PluginResult<()>;

    fn get_tensor(&self, name: &str) -> PluginResult<Tensor>;

    /// Check inputs and prepare them for the device.
    fn infer_preprocess(&mut self) -> PluginResult<()>;

    /// Submit work to the device.
    fn start_pipeline(&mut self) -> PluginResult<()>;

    /// Wait for submitted work to finish.
    fn wait_pipeline(&mut self) -> PluginResult<()>;

    /// Move results to the output tensors.
    fn infer_postprocess(&mut self) -> PluginResult<()>;

    fn infer(&mut self) -> PluginResult<()> {
        self.infer_preprocess()?;
        self.start_pipeline()?;
        self.wait_pipeline()?;
        self.infer_postprocess()
    }

    fn get_profiling_info(&self) -> Vec<ProfilingInfo>;
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::graph::{Model, Tensor};

/// The numeric engine behind a plugin.
///
/// Kernels live outside this crate; inference requests only bind tensors,
/// call `evaluate` on the compiled model's runtime graph and collect the
/// outputs.
pub trait ExecutionBackend: Send + Sync {
    fn name(&self) -> &str;

    /// Evaluate `model` on `inputs` (keyed by Parameter name) and return one
    /// tensor per Result node, keyed by Result name.
    fn evaluate(
        &self,
        model: &Model,
        inputs: &HashMap<String, Tensor>,
    ) -> anyhow::Result<HashMap<String, Tensor>>;
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::graph::Model;

/// An in-place rewrite of a model graph applied during compilation.
///
/// Returns whether the model changed. Domain failures should be reported as
/// [`crate::errors::PassError`]; anything else is treated as a library
/// failure. Passes also run on imported models, so they must be idempotent.
pub trait ModelTransformation: Send + Sync {
    fn name(&self) -> &str;

    fn run_on_model(&self, model: &mut Model) -> anyhow::Result<bool>;
}

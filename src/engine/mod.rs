// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Executor adapters and the async inference request wrapper.
//!
//! Scheduling policy belongs to the host. This module only adapts the two
//! executors the crate needs to run on its own (inline and tokio's blocking
//! pool) and assembles async requests out of a sync request plus executors.

mod async_infer_request;
mod immediate;
mod tokio_executor;

pub use async_infer_request::{AsyncInferRequest, InferCallback};
pub use immediate::ImmediateExecutor;
pub use tokio_executor::TokioExecutor;

use std::sync::Arc;

use crate::traits::TaskExecutor;

/// Run on tokio's blocking pool when inside a runtime, inline otherwise.
pub fn default_executor(name: &str) -> Arc<dyn TaskExecutor> {
    match TokioExecutor::from_current(name) {
        Some(executor) => Arc::new(executor),
        None => {
            tracing::debug!(executor = name, "No tokio runtime available, running tasks inline");
            Arc::new(ImmediateExecutor::new(name))
        }
    }
}

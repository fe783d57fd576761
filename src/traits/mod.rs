// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Contracts between the host runtime and a backend.

pub mod backend;
pub mod compiled_model;
pub mod executor;
pub mod infer_request;
pub mod plugin;
pub mod transformation;

pub use backend::ExecutionBackend;
pub use compiled_model::{CompiledModel, SupportedProperties};
pub use executor::{Task, TaskExecutor};
pub use infer_request::{ProfilingInfo, SyncInferRequest};
pub use plugin::{Plugin, RemoteContext};
pub use transformation::ModelTransformation;

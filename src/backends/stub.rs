// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Test doubles for the host side of the backend contract.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::config::StreamsExecutorConfig;
use crate::engine::ImmediateExecutor;
use crate::errors::PassError;
use crate::graph::{Model, Tensor};
use crate::traits::{ExecutionBackend, ModelTransformation, Plugin, Task, TaskExecutor};

/// Backend that copies the first input into every output with the same
/// descriptor and zero-fills the rest.
pub struct EchoBackend;

impl ExecutionBackend for EchoBackend {
    fn name(&self) -> &str {
        "echo"
    }

    fn evaluate(
        &self,
        model: &Model,
        inputs: &HashMap<String, Tensor>,
    ) -> anyhow::Result<HashMap<String, Tensor>> {
        let first_input = model
            .parameters()
            .next()
            .and_then(|p| inputs.get(&p.name));

        model
            .results()
            .map(|result| -> anyhow::Result<(String, Tensor)> {
                let tensor = match first_input {
                    Some(input) if input.desc() == &result.output => input.clone(),
                    _ => Tensor::zeros(result.output.clone())?,
                };
                Ok((result.name.clone(), tensor))
            })
            .collect()
    }
}

/// Backend that always fails.
pub struct BrokenBackend;

impl ExecutionBackend for BrokenBackend {
    fn name(&self) -> &str {
        "broken"
    }

    fn evaluate(
        &self,
        _model: &Model,
        _inputs: &HashMap<String, Tensor>,
    ) -> anyhow::Result<HashMap<String, Tensor>> {
        anyhow::bail!("device lost")
    }
}

/// Pass that counts its invocations and tags every node with
/// `visited=true`. Idempotent.
#[derive(Default)]
pub struct CountingPass {
    calls: AtomicUsize,
}

impl CountingPass {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ModelTransformation for CountingPass {
    fn name(&self) -> &str {
        "CountingPass"
    }

    fn run_on_model(&self, model: &mut Model) -> anyhow::Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut changed = false;
        for node in model.nodes_mut() {
            let previous = node.attributes.insert("visited".to_string(), "true".to_string());
            changed |= previous.is_none();
        }
        Ok(changed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FailureMode {
    /// Returns a `PassError`.
    Compiler,
    /// Returns some other error.
    Runtime,
    /// Panics.
    Panic,
}

/// Pass that mangles the model, then fails the configured way.
pub struct FailingPass {
    mode: FailureMode,
}

impl FailingPass {
    pub fn new(mode: FailureMode) -> Self {
        Self { mode }
    }
}

impl ModelTransformation for FailingPass {
    fn name(&self) -> &str {
        "FailingPass"
    }

    fn run_on_model(&self, model: &mut Model) -> anyhow::Result<bool> {
        model.set_friendly_name("half-transformed");
        match self.mode {
            FailureMode::Compiler => {
                Err(PassError::new("FailingPass", "unsupported operation").into())
            }
            FailureMode::Runtime => Err(anyhow::anyhow!("out of device memory")),
            FailureMode::Panic => panic!("pass exploded"),
        }
    }
}

/// Executor that parks tasks until the test drains them.
#[derive(Default)]
pub struct ParkedExecutor {
    tasks: Mutex<Vec<Task>>,
}

impl ParkedExecutor {
    pub fn parked(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }

    /// Run every parked task in FIFO order and return how many ran.
    pub fn drain(&self) -> usize {
        let tasks: Vec<Task> = std::mem::take(&mut *self.tasks.lock().unwrap());
        let count = tasks.len();
        for task in tasks {
            task();
        }
        count
    }
}

/// Inline executor that counts the tasks it ran.
#[derive(Default)]
pub struct CountingExecutor {
    runs: AtomicUsize,
}

impl CountingExecutor {
    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

impl TaskExecutor for CountingExecutor {
    fn name(&self) -> &str {
        "counting"
    }

    fn run(&self, task: Task) {
        self.runs.fetch_add(1, Ordering::SeqCst);
        task();
    }
}

impl TaskExecutor for ParkedExecutor {
    fn name(&self) -> &str {
        "parked"
    }

    fn run(&self, task: Task) {
        self.tasks.lock().unwrap().push(task);
    }
}

/// Minimal host plugin with a controllable streams-executor report.
pub struct RecordingPlugin {
    device_name: String,
    wait_executor: Arc<dyn TaskExecutor>,
    backend: Arc<dyn ExecutionBackend>,
    transformations: Arc<dyn ModelTransformation>,
    streams_properties: Mutex<Vec<String>>,
}

impl RecordingPlugin {
    pub fn new(transformations: Arc<dyn ModelTransformation>) -> Self {
        Self {
            device_name: "TEMPLATE".to_string(),
            wait_executor: Arc::new(ImmediateExecutor::new("RecordingWaitExecutor")),
            backend: Arc::new(EchoBackend),
            transformations,
            streams_properties: Mutex::new(StreamsExecutorConfig::supported_properties()),
        }
    }

    pub fn set_streams_properties(&self, names: Vec<String>) {
        *self.streams_properties.lock().unwrap() = names;
    }
}

impl Plugin for RecordingPlugin {
    fn device_name(&self) -> &str {
        &self.device_name
    }

    fn wait_executor(&self) -> Arc<dyn TaskExecutor> {
        Arc::clone(&self.wait_executor)
    }

    fn backend(&self) -> Arc<dyn ExecutionBackend> {
        Arc::clone(&self.backend)
    }

    fn transformations(&self) -> Arc<dyn ModelTransformation> {
        Arc::clone(&self.transformations)
    }

    fn streams_executor_supported_properties(&self) -> Vec<String> {
        self.streams_properties.lock().unwrap().clone()
    }
}

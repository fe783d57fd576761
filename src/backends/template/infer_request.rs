// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::backends::template::TemplateCompiledModel;
use crate::errors::{PluginError, PluginResult};
use crate::graph::Tensor;
use crate::traits::{CompiledModel, ProfilingInfo, SyncInferRequest};

const STAGE_PREPROCESS: &str = "input preprocessing";
const STAGE_START: &str = "execution start";
const STAGE_WAIT: &str = "execution wait";
const STAGE_POSTPROCESS: &str = "output postprocessing";

/// Synchronous request against a [`TemplateCompiledModel`].
///
/// Holds the compiled model by shared reference; any number of requests may
/// be alive at once. Inputs are bound by Parameter name, outputs are
/// available by Result name after a successful inference.
pub struct TemplateInferRequest {
    compiled_model: Arc<TemplateCompiledModel>,
    inputs: HashMap<String, Tensor>,
    outputs: HashMap<String, Tensor>,
    pending: Option<HashMap<String, Tensor>>,
    profiling: Vec<ProfilingInfo>,
}

impl TemplateInferRequest {
    pub fn new(compiled_model: Arc<TemplateCompiledModel>) -> Self {
        Self {
            compiled_model,
            inputs: HashMap::new(),
            outputs: HashMap::new(),
            pending: None,
            profiling: Vec::new(),
        }
    }

    pub fn compiled_model(&self) -> &Arc<TemplateCompiledModel> {
        &self.compiled_model
    }

    fn record(&mut self, stage: &'static str, started: Instant) {
        if self.compiled_model.config().enable_profiling {
            self.profiling.push(ProfilingInfo {
                stage,
                real_time: started.elapsed(),
            });
        }
    }
}

impl SyncInferRequest for TemplateInferRequest {
    fn set_tensor(&mut self, name: &str, tensor: Tensor) -> PluginResult<()> {
        let model = self.compiled_model.get_runtime_model();
        let parameter = model
            .parameters()
            .find(|p| p.name == name)
            .ok_or_else(|| PluginError::Infer(format!("model has no input named '{}'", name)))?;

        if tensor.desc() != &parameter.output {
            return Err(PluginError::Infer(format!(
                "input '{}' expects {:?}{:?}, got {:?}{:?}",
                name,
                parameter.output.element_type,
                parameter.output.shape,
                tensor.desc().element_type,
                tensor.desc().shape
            )));
        }

        self.inputs.insert(name.to_string(), tensor);
        Ok(())
    }

    fn get_tensor(&self, name: &str) -> PluginResult<Tensor> {
        self.inputs
            .get(name)
            .or_else(|| self.outputs.get(name))
            .cloned()
            .ok_or_else(|| PluginError::Infer(format!("no tensor named '{}'", name)))
    }

    fn infer_preprocess(&mut self) -> PluginResult<()> {
        let started = Instant::now();
        self.profiling.clear();
        self.pending = None;

        let model = self.compiled_model.get_runtime_model();
        if let Some(missing) = model.parameters().find(|p| !self.inputs.contains_key(&p.name)) {
            return Err(PluginError::Infer(format!("input '{}' is not set", missing.name)));
        }

        self.record(STAGE_PREPROCESS, started);
        Ok(())
    }

    fn start_pipeline(&mut self) -> PluginResult<()> {
        let started = Instant::now();
        let backend = self.compiled_model.plugin()?.backend();
        let model = self.compiled_model.get_runtime_model();

        let outputs = backend
            .evaluate(&model, &self.inputs)
            .map_err(|e| PluginError::Infer(format!("backend '{}': {:#}", backend.name(), e)))?;
        self.pending = Some(outputs);

        self.record(STAGE_START, started);
        Ok(())
    }

    fn wait_pipeline(&mut self) -> PluginResult<()> {
        let started = Instant::now();
        let pending = self
            .pending
            .as_ref()
            .ok_or_else(|| PluginError::Infer("pipeline was not started".to_string()))?;

        let model = self.compiled_model.get_runtime_model();
        for result in model.results() {
            match pending.get(&result.name) {
                Some(tensor) if tensor.desc() == &result.output => {}
                Some(tensor) => {
                    return Err(PluginError::Infer(format!(
                        "output '{}' has shape {:?}, expected {:?}",
                        result.name,
                        tensor.desc().shape,
                        result.output.shape
                    )));
                }
                None => {
                    return Err(PluginError::Infer(format!(
                        "backend produced no output '{}'",
                        result.name
                    )));
                }
            }
        }

        self.record(STAGE_WAIT, started);
        Ok(())
    }

    fn infer_postprocess(&mut self) -> PluginResult<()> {
        let started = Instant::now();
        let outputs = self
            .pending
            .take()
            .ok_or_else(|| PluginError::Infer("pipeline was not started".to_string()))?;
        self.outputs = outputs;

        self.record(STAGE_POSTPROCESS, started);
        Ok(())
    }

    fn get_profiling_info(&self) -> Vec<ProfilingInfo> {
        self.profiling.clone()
    }
}

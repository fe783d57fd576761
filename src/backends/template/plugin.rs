// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::io::Read;
use std::sync::Arc;

use crate::backends::template::{framing, TemplateCompiledModel, TransformationPipeline};
use crate::config::consts::DEFAULT_DEVICE_NAME;
use crate::config::{Configuration, PropertyMap};
use crate::engine;
use crate::errors::PluginResult;
use crate::graph::{self, Model};
use crate::observability::messages::plugin::{ModelImported, PluginCreated};
use crate::observability::messages::StructuredLog;
use crate::traits::{ExecutionBackend, ModelTransformation, Plugin, RemoteContext, TaskExecutor};

/// Host-side plugin for the template device.
///
/// Owns what its compiled models share: the execution backend, the
/// transformation pipeline, the wait executor and the default configuration.
/// Compiled models refer back to the plugin weakly, so the host must keep the
/// plugin alive for as long as any of its models are in use.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use template_plugin::backends::template::TemplatePlugin;
/// use template_plugin::config::PropertyMap;
/// use template_plugin::graph::{ElementType, Model, Tensor, TensorDesc};
/// use template_plugin::traits::{CompiledModel, ExecutionBackend};
///
/// struct NoopBackend;
///
/// impl ExecutionBackend for NoopBackend {
///     fn name(&self) -> &str { "noop" }
///
///     fn evaluate(
///         &self,
///         model: &Model,
///         _inputs: &std::collections::HashMap<String, Tensor>,
///     ) -> anyhow::Result<std::collections::HashMap<String, Tensor>> {
///         model
///             .results()
///             .map(|r| -> anyhow::Result<(String, Tensor)> {
///                 Ok((r.name.clone(), Tensor::zeros(r.output.clone())?))
///             })
///             .collect()
///     }
/// }
///
/// let plugin = TemplatePlugin::builder(Arc::new(NoopBackend)).build();
///
/// let mut model = Model::new("net1");
/// let x = model.add_parameter("x", TensorDesc::new(ElementType::F32, vec![4]));
/// model.add_result("y", x).unwrap();
///
/// let compiled = plugin.compile_model(Arc::new(model), &PropertyMap::new()).unwrap();
/// assert_eq!(compiled.get_property("execution_devices").unwrap().as_str(), Some("TEMPLATE.0"));
/// ```
pub struct TemplatePlugin {
    device_name: String,
    backend: Arc<dyn ExecutionBackend>,
    transformations: Arc<dyn ModelTransformation>,
    wait_executor: Arc<dyn TaskExecutor>,
    task_executor: Arc<dyn TaskExecutor>,
    config: Configuration,
}

impl TemplatePlugin {
    pub fn builder(backend: Arc<dyn ExecutionBackend>) -> TemplatePluginBuilder {
        TemplatePluginBuilder::new(backend)
    }

    pub fn default_config(&self) -> &Configuration {
        &self.config
    }

    pub fn default_context(&self) -> RemoteContext {
        RemoteContext::new(self.device_name.as_str())
    }

    /// Compile `model` with `properties` layered over the plugin defaults.
    pub fn compile_model(
        self: &Arc<Self>,
        model: Arc<Model>,
        properties: &PropertyMap,
    ) -> PluginResult<Arc<TemplateCompiledModel>> {
        let config = self.config.merged(properties)?;
        let plugin: Arc<dyn Plugin> = Arc::clone(self) as Arc<dyn Plugin>;

        TemplateCompiledModel::new(
            model,
            &plugin,
            self.default_context(),
            Arc::clone(&self.task_executor),
            config,
            false,
        )
    }

    /// Rebuild a compiled model from a stream written by
    /// [`export_model`](crate::traits::CompiledModel::export_model).
    pub fn import_model(
        self: &Arc<Self>,
        source: &mut dyn Read,
        properties: &PropertyMap,
    ) -> PluginResult<Arc<TemplateCompiledModel>> {
        let blob = framing::read_blob(source)?;
        let imported_msg = ModelImported {
            device: &self.device_name,
            structure_bytes: blob.structure.len(),
            constants_bytes: blob.constants.len(),
        };
        imported_msg.log();
        let _span = imported_msg.span("import_model").entered();

        let model = graph::deserialize(&blob.structure, &blob.constants)?;
        let config = self.config.merged(properties)?;
        let plugin: Arc<dyn Plugin> = Arc::clone(self) as Arc<dyn Plugin>;

        TemplateCompiledModel::new(
            Arc::new(model),
            &plugin,
            self.default_context(),
            Arc::clone(&self.task_executor),
            config,
            true,
        )
    }
}

impl Plugin for TemplatePlugin {
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
}

/// Assembles a [`TemplatePlugin`].
///
/// Executors default to tokio's blocking pool when built inside a runtime
/// and to inline execution otherwise.
pub struct TemplatePluginBuilder {
    backend: Arc<dyn ExecutionBackend>,
    device_name: String,
    transformations: Option<Arc<dyn ModelTransformation>>,
    wait_executor: Option<Arc<dyn TaskExecutor>>,
    task_executor: Option<Arc<dyn TaskExecutor>>,
    config: Configuration,
}

impl TemplatePluginBuilder {
    fn new(backend: Arc<dyn ExecutionBackend>) -> Self {
        Self {
            backend,
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            transformations: None,
            wait_executor: None,
            task_executor: None,
            config: Configuration::default(),
        }
    }

    pub fn device_name(mut self, name: impl Into<String>) -> Self {
        self.device_name = name.into();
        self
    }

    pub fn transformations(mut self, transformations: Arc<dyn ModelTransformation>) -> Self {
        self.transformations = Some(transformations);
        self
    }

    pub fn wait_executor(mut self, executor: Arc<dyn TaskExecutor>) -> Self {
        self.wait_executor = Some(executor);
        self
    }

    pub fn task_executor(mut self, executor: Arc<dyn TaskExecutor>) -> Self {
        self.task_executor = Some(executor);
        self
    }

    /// Defaults every compiled model starts from.
    pub fn config(mut self, config: Configuration) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Arc<TemplatePlugin> {
        let plugin = TemplatePlugin {
            transformations: self
                .transformations
                .unwrap_or_else(|| Arc::new(TransformationPipeline::new())),
            wait_executor: self
                .wait_executor
                .unwrap_or_else(|| engine::default_executor("TemplateWaitExecutor")),
            task_executor: self
                .task_executor
                .unwrap_or_else(|| engine::default_executor("TemplateTaskExecutor")),
            device_name: self.device_name,
            backend: self.backend,
            config: self.config,
        };

        PluginCreated {
            device: &plugin.device_name,
            backend: plugin.backend.name(),
            wait_executor: plugin.wait_executor.name(),
        }
        .log();

        Arc::new(plugin)
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Weak};
use std::time::Instant;

use crate::backends::template::framing;
use crate::backends::template::TemplateInferRequest;
use crate::config::consts::{
    DEVICE_ID, ENABLE_PROFILING, EXECUTION_DEVICES, LOADED_FROM_CACHE, MODEL_NAME,
    OPTIMAL_NUMBER_OF_INFER_REQUESTS, SUPPORTED_CONFIG_KEYS, SUPPORTED_METRICS,
    SUPPORTED_PROPERTIES,
};
use crate::config::{Configuration, PropertyMap, PropertyName, PropertyValue};
use crate::engine::{AsyncInferRequest, ImmediateExecutor};
use crate::errors::{CompileFailure, PluginError, PluginResult};
use crate::graph::{self, Model};
use crate::observability::messages::compiled_model::{
    CompilationCompleted, CompilationFailed, CompilationStarted, ModelExported,
    PropertyMutationRejected, TransformationsSkipped,
};
use crate::observability::messages::infer_request::RequestCreated;
use crate::observability::messages::StructuredLog;
use crate::traits::{
    CompiledModel, Plugin, RemoteContext, SupportedProperties, SyncInferRequest, TaskExecutor,
};

fn default_ro_properties() -> Vec<PropertyName> {
    vec![
        PropertyName::read_only(MODEL_NAME),
        PropertyName::read_only(SUPPORTED_PROPERTIES),
        PropertyName::read_only(EXECUTION_DEVICES),
        PropertyName::read_only(LOADED_FROM_CACHE),
        PropertyName::read_only(OPTIMAL_NUMBER_OF_INFER_REQUESTS),
    ]
}

fn default_rw_properties() -> Vec<PropertyName> {
    vec![
        PropertyName::read_write(DEVICE_ID),
        PropertyName::read_write(ENABLE_PROFILING),
    ]
}

fn to_string_vector(properties: Vec<PropertyName>) -> Vec<String> {
    properties.into_iter().map(|p| p.name).collect()
}

/// A model compiled for the template device.
///
/// Construction runs the plugin's transformation pipeline over the graph
/// (unless `disable_transformations` is set) and freezes the result together
/// with the configuration. Nothing about the model changes afterwards: the
/// graph is shared read-only with every request, and [`set_property`] is
/// rejected.
///
/// [`set_property`]: CompiledModel::set_property
pub struct TemplateCompiledModel {
    model: Arc<Model>,
    plugin: Weak<dyn Plugin>,
    context: RemoteContext,
    task_executor: Arc<dyn TaskExecutor>,
    callback_executor: Arc<dyn TaskExecutor>,
    config: Configuration,
    loaded_from_cache: bool,
    self_ref: Weak<TemplateCompiledModel>,
}

impl TemplateCompiledModel {
    /// Compile `model` for `plugin`.
    ///
    /// `config` must already be merged with the plugin defaults.
    /// `loaded_from_cache` only affects the `loaded_from_cache` property.
    ///
    /// Any failure during transformation, whatever its origin, is returned
    /// as [`PluginError::Compilation`] and no model is produced. If the
    /// caller still holds other references to `model`, the passes run on a
    /// private copy and the caller's graph is left untouched.
    pub fn new(
        model: Arc<Model>,
        plugin: &Arc<dyn Plugin>,
        context: RemoteContext,
        task_executor: Arc<dyn TaskExecutor>,
        config: Configuration,
        loaded_from_cache: bool,
    ) -> PluginResult<Arc<Self>> {
        let started = Instant::now();
        let model_name = model.friendly_name().to_string();

        let started_msg = CompilationStarted {
            model_name: &model_name,
            device: plugin.device_name(),
            transformations_enabled: !config.disable_transformations,
        };
        started_msg.log();
        let _span = started_msg.span("compile_model").entered();

        let model = compile_model(model, &**plugin, &config).map_err(|failure| {
            CompilationFailed {
                model_name: &model_name,
                category: failure.category(),
                reason: &failure.to_string(),
            }
            .log();
            PluginError::from(failure)
        })?;

        let compiled = Arc::new_cyclic(|self_ref| Self {
            model,
            plugin: Arc::downgrade(plugin),
            context,
            task_executor,
            callback_executor: Arc::new(ImmediateExecutor::new("TemplateCallbackExecutor")),
            config,
            loaded_from_cache,
            self_ref: self_ref.clone(),
        });

        CompilationCompleted {
            model_name: &model_name,
            loaded_from_cache,
            duration: started.elapsed(),
        }
        .log();

        Ok(compiled)
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn context(&self) -> &RemoteContext {
        &self.context
    }

    pub fn loaded_from_cache(&self) -> bool {
        self.loaded_from_cache
    }

    /// The plugin that created this model.
    pub fn plugin(&self) -> PluginResult<Arc<dyn Plugin>> {
        self.plugin.upgrade().ok_or(PluginError::PluginReleased)
    }

    fn model_name(&self) -> &str {
        self.model.friendly_name()
    }

    fn shared_from_this(&self) -> PluginResult<Arc<Self>> {
        self.self_ref
            .upgrade()
            .ok_or_else(|| PluginError::Infer("compiled model is being released".to_string()))
    }

    /// Create a request with its concrete type, for callers that know the
    /// backend.
    pub fn create_template_infer_request(&self) -> PluginResult<TemplateInferRequest> {
        let request = TemplateInferRequest::new(self.shared_from_this()?);
        RequestCreated {
            model_name: self.model_name(),
            asynchronous: false,
        }
        .log();
        Ok(request)
    }
}

/// Run the transformation pipeline to completion, or fail as a whole.
fn compile_model(
    mut model: Arc<Model>,
    plugin: &dyn Plugin,
    config: &Configuration,
) -> Result<Arc<Model>, CompileFailure> {
    if config.disable_transformations {
        TransformationsSkipped {
            model_name: model.friendly_name(),
        }
        .log();
    } else {
        let transformations = plugin.transformations();
        let graph = Arc::make_mut(&mut model);

        match panic::catch_unwind(AssertUnwindSafe(|| transformations.run_on_model(graph))) {
            Ok(Ok(changed)) => {
                tracing::debug!(
                    model_name = graph.friendly_name(),
                    changed,
                    "Transformation pipeline finished"
                );
            }
            Ok(Err(error)) => return Err(CompileFailure::from_error(error)),
            Err(payload) => return Err(CompileFailure::from_panic(payload)),
        }
    }

    model
        .validate()
        .map_err(|e| CompileFailure::Compiler(e.to_string()))?;
    Ok(model)
}

impl CompiledModel for TemplateCompiledModel {
    fn create_sync_infer_request(&self) -> PluginResult<Box<dyn SyncInferRequest>> {
        Ok(Box::new(self.create_template_infer_request()?))
    }

    fn create_infer_request(&self) -> PluginResult<AsyncInferRequest> {
        let internal_request = self.create_sync_infer_request()?;
        let async_request = AsyncInferRequest::new(
            internal_request,
            Arc::clone(&self.task_executor),
            self.plugin()?.wait_executor(),
            Arc::clone(&self.callback_executor),
        );
        RequestCreated {
            model_name: self.model_name(),
            asynchronous: true,
        }
        .log();
        Ok(async_request)
    }

    fn set_property(&self, properties: &PropertyMap) -> PluginResult<()> {
        PropertyMutationRejected {
            model_name: self.model_name(),
            property_count: properties.len(),
        }
        .log();
        Err(PluginError::NotImplemented {
            operation: "set_property",
        })
    }

    fn get_property(&self, name: &str) -> PluginResult<PropertyValue> {
        match name {
            SUPPORTED_METRICS => {
                let mut metrics = default_ro_properties();
                metrics.push(PropertyName::read_only(SUPPORTED_METRICS));
                metrics.push(PropertyName::read_only(SUPPORTED_CONFIG_KEYS));
                Ok(PropertyValue::StrList(to_string_vector(metrics)))
            }
            SUPPORTED_CONFIG_KEYS => {
                let mut configs = to_string_vector(default_rw_properties());
                configs.extend(self.plugin()?.streams_executor_supported_properties());
                Ok(PropertyValue::StrList(configs))
            }
            MODEL_NAME => Ok(PropertyValue::from(self.model_name())),
            LOADED_FROM_CACHE => Ok(PropertyValue::Bool(self.loaded_from_cache)),
            EXECUTION_DEVICES => {
                let plugin = self.plugin()?;
                Ok(PropertyValue::Str(format!(
                    "{}.{}",
                    plugin.device_name(),
                    self.config.device_id
                )))
            }
            OPTIMAL_NUMBER_OF_INFER_REQUESTS => Ok(PropertyValue::from(
                self.config.streams_executor_config.streams,
            )),
            SUPPORTED_PROPERTIES => Ok(PropertyValue::Names(self.get_supported_properties().all())),
            _ => self.config.get(name),
        }
    }

    fn get_supported_properties(&self) -> SupportedProperties {
        SupportedProperties {
            read_only: default_ro_properties(),
            read_write: default_rw_properties(),
        }
    }

    fn get_runtime_model(&self) -> Arc<Model> {
        Arc::clone(&self.model)
    }

    fn export_model(&self, sink: &mut dyn Write) -> PluginResult<()> {
        let _span = tracing::debug_span!("export_model", model_name = self.model_name()).entered();

        let blob = graph::serialize(&self.model)?;
        framing::write_blob(sink, &blob)?;

        ModelExported {
            model_name: self.model_name(),
            structure_bytes: blob.structure.len(),
            constants_bytes: blob.constants.len(),
        }
        .log();
        Ok(())
    }
}

impl std::fmt::Debug for TemplateCompiledModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateCompiledModel")
            .field("model_name", &self.model_name())
            .field("device_id", &self.config.device_id)
            .field("loaded_from_cache", &self.loaded_from_cache)
            .finish()
    }
}

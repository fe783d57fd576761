// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::errors::{PluginError, PluginResult};
use crate::graph::Tensor;
use crate::observability::messages::infer_request::{InferenceCancelled, InferenceCompleted};
use crate::observability::messages::StructuredLog;
use crate::traits::{ProfilingInfo, SyncInferRequest, TaskExecutor};

/// User callback invoked with the outcome of each inference.
pub type InferCallback = Arc<dyn Fn(&PluginResult<()>) + Send + Sync>;

type SharedRequest = Arc<Mutex<Box<dyn SyncInferRequest>>>;

/// Asynchronous wrapper around a sync request.
///
/// One inference runs as a three-step pipeline:
/// 1. `infer_preprocess` + `start_pipeline` on the task executor
/// 2. `wait_pipeline` + `infer_postprocess` on the wait executor
/// 3. the user callback, if any, on the callback executor
///
/// The executors are supplied by the compiled model and its plugin; this
/// type only chains the steps. One inference runs at a time; a second
/// `infer` while one is in flight fails with [`PluginError::Busy`].
pub struct AsyncInferRequest {
    request: SharedRequest,
    task_executor: Arc<dyn TaskExecutor>,
    wait_executor: Arc<dyn TaskExecutor>,
    callback_executor: Arc<dyn TaskExecutor>,
    callback: Mutex<Option<InferCallback>>,
    cancellation: Mutex<CancellationToken>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag however `infer` exits.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl AsyncInferRequest {
    pub fn new(
        request: Box<dyn SyncInferRequest>,
        task_executor: Arc<dyn TaskExecutor>,
        wait_executor: Arc<dyn TaskExecutor>,
        callback_executor: Arc<dyn TaskExecutor>,
    ) -> Self {
        Self {
            request: Arc::new(Mutex::new(request)),
            task_executor,
            wait_executor,
            callback_executor,
            callback: Mutex::new(None),
            cancellation: Mutex::new(CancellationToken::new()),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn set_callback(&self, callback: InferCallback) -> PluginResult<()> {
        *lock(&self.callback)? = Some(callback);
        Ok(())
    }

    pub fn set_tensor(&self, name: &str, tensor: Tensor) -> PluginResult<()> {
        lock(&self.request)?.set_tensor(name, tensor)
    }

    pub fn get_tensor(&self, name: &str) -> PluginResult<Tensor> {
        lock(&self.request)?.get_tensor(name)
    }

    pub fn get_profiling_info(&self) -> PluginResult<Vec<ProfilingInfo>> {
        Ok(lock(&self.request)?.get_profiling_info())
    }

    /// Cancel the inference currently in flight, if any.
    pub fn cancel(&self) -> PluginResult<()> {
        let mut token = lock(&self.cancellation)?;
        token.cancel();
        *token = CancellationToken::new();
        Ok(())
    }

    /// Run one inference through the executor pipeline.
    pub async fn infer(&self) -> PluginResult<()> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return Err(PluginError::Busy);
        }
        let _in_flight = InFlightGuard(&self.in_flight);

        let token = lock(&self.cancellation)?.clone();

        let result = self.run_pipeline(&token).await;
        if matches!(result, Err(PluginError::Cancelled)) {
            InferenceCancelled {
                executor: self.task_executor.name(),
            }
            .log();
            return result;
        }

        let callback = lock(&self.callback)?.clone();
        let result = match callback {
            Some(callback) => {
                run_on(&self.callback_executor, &token, move || {
                    callback(&result);
                    result
                })
                .await?
            }
            None => result,
        };

        InferenceCompleted {
            succeeded: result.is_ok(),
        }
        .log();
        result
    }

    async fn run_pipeline(&self, token: &CancellationToken) -> PluginResult<()> {
        let request = Arc::clone(&self.request);
        run_on(&self.task_executor, token, move || {
            let mut request = lock(&request)?;
            request.infer_preprocess()?;
            request.start_pipeline()
        })
        .await??;

        let request = Arc::clone(&self.request);
        run_on(&self.wait_executor, token, move || {
            let mut request = lock(&request)?;
            request.wait_pipeline()?;
            request.infer_postprocess()
        })
        .await?
    }
}

/// Hand `stage` to `executor` and wait for its output or cancellation.
async fn run_on<T, F>(
    executor: &Arc<dyn TaskExecutor>,
    token: &CancellationToken,
    stage: F,
) -> PluginResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    if token.is_cancelled() {
        return Err(PluginError::Cancelled);
    }

    let (tx, rx) = oneshot::channel();
    executor.run(Box::new(move || {
        let _ = tx.send(stage());
    }));

    tokio::select! {
        _ = token.cancelled() => Err(PluginError::Cancelled),
        output = rx => output.map_err(|_| {
            PluginError::Infer(format!("executor '{}' dropped the task", executor.name()))
        }),
    }
}

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> PluginResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| PluginError::Infer("inference request state is poisoned".to_string()))
}

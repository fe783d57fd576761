// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// A unit of work handed to an executor.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Runs tasks somewhere: inline, on a thread pool, on a device queue.
///
/// Executors are shared (`Arc<dyn TaskExecutor>`) between compiled models
/// and requests. `run` must not block waiting for the task to finish.
pub trait TaskExecutor: Send + Sync {
    fn name(&self) -> &str;

    fn run(&self, task: Task);
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use tokio::runtime::Handle;

use crate::traits::{Task, TaskExecutor};

/// Runs tasks on a tokio runtime's blocking thread pool.
///
/// Inference stages block on device work, so they go to `spawn_blocking`
/// rather than the async worker threads.
#[derive(Debug, Clone)]
pub struct TokioExecutor {
    name: String,
    handle: Handle,
}

impl TokioExecutor {
    pub fn new(name: impl Into<String>, handle: Handle) -> Self {
        Self {
            name: name.into(),
            handle,
        }
    }

    /// Bind to the runtime the caller is running in, if any.
    pub fn from_current(name: impl Into<String>) -> Option<Self> {
        Handle::try_current()
            .ok()
            .map(|handle| Self::new(name, handle))
    }
}

impl TaskExecutor for TokioExecutor {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, task: Task) {
        // Detached: completion is signalled by the task itself.
        drop(self.handle.spawn_blocking(task));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[test]
    fn test_no_runtime_outside_tokio() {
        assert!(TokioExecutor::from_current("wait").is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_runs_task_on_blocking_pool() {
        let executor = TokioExecutor::from_current("wait").expect("inside a runtime");
        let (tx, rx) = oneshot::channel();

        executor.run(Box::new(move || {
            let _ = tx.send(std::thread::current().id());
        }));

        let task_thread = rx.await.unwrap();
        assert_ne!(task_thread, std::thread::current().id());
        assert_eq!(executor.name(), "wait");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_explicit_handle() {
        let executor = TokioExecutor::new("task", Handle::current());
        let (tx, rx) = oneshot::channel();

        executor.run(Box::new(move || {
            let _ = tx.send(7);
        }));

        assert_eq!(rx.await.unwrap(), 7);
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::traits::{Task, TaskExecutor};

/// Runs every task on the calling thread before `run` returns.
#[derive(Debug, Clone)]
pub struct ImmediateExecutor {
    name: String,
}

impl ImmediateExecutor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for ImmediateExecutor {
    fn default() -> Self {
        Self::new("ImmediateExecutor")
    }
}

impl TaskExecutor for ImmediateExecutor {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, task: Task) {
        task();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_runs_task_before_returning() {
        let executor = ImmediateExecutor::default();
        let counter = Arc::new(AtomicUsize::new(0));

        let counter_clone = Arc::clone(&counter);
        executor.run(Box::new(move || {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        }));

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::Context;
use std::sync::Arc;

use crate::graph::Model;
use crate::traits::ModelTransformation;

/// Ordered list of passes run as one transformation.
///
/// The template plugin ships an empty pipeline; hosts add the passes their
/// device needs. A failing pass stops the pipeline.
#[derive(Clone, Default)]
pub struct TransformationPipeline {
    passes: Vec<Arc<dyn ModelTransformation>>,
}

impl TransformationPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pass(mut self, pass: Arc<dyn ModelTransformation>) -> Self {
        self.passes.push(pass);
        self
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl std::fmt::Debug for TransformationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformationPipeline")
            .field("passes", &self.passes.iter().map(|p| p.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl ModelTransformation for TransformationPipeline {
    fn name(&self) -> &str {
        "TransformationPipeline"
    }

    fn run_on_model(&self, model: &mut Model) -> anyhow::Result<bool> {
        let mut changed = false;
        for pass in &self.passes {
            let pass_changed = pass
                .run_on_model(model)
                .with_context(|| format!("while running pass '{}'", pass.name()))?;
            tracing::debug!(
                pass = pass.name(),
                changed = pass_changed,
                "Transformation pass finished"
            );
            changed |= pass_changed;
        }
        Ok(changed)
    }
}

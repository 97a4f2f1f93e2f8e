//! Linear chains built from class ids.
//!
//! A [`ChainRun`] is a text input followed by gadgets looked up in a
//! [`GadgetRegistry`], each feeding the next. This is what the command line
//! drives.

use crate::config::PipelineConfig;
use crate::error::{Result, ResultExt};
use crate::pipeline::{CascadeReport, GadgetId, GadgetKind, GadgetRegistry, Pipeline, PortId};

/// Horizontal gap between chained gadgets, in grid cells
const GADGET_SPACING: i32 = 2;

/// A text input feeding a chain of gadgets.
pub struct ChainRun {
    pipeline: Pipeline,
    source: GadgetId,
    chain: Vec<GadgetId>,
}

impl ChainRun {
    /// Place a text input and append one gadget per class id, left to right.
    pub fn build<S: AsRef<str>>(
        registry: &GadgetRegistry,
        config: PipelineConfig,
        class_ids: &[S],
    ) -> Result<Self> {
        let mut pipeline = Pipeline::with_config(config);
        let source = pipeline.place(GadgetKind::TextInput, 0, 0);

        let mut chain = Vec::with_capacity(class_ids.len());
        let mut previous = source;
        let mut x = 0;
        for class_id in class_ids {
            let class_id = class_id.as_ref();
            x += pipeline
                .gadget(previous)
                .map_or(0, |g| i32::from(g.kind().default_size().0))
                + GADGET_SPACING;

            let gadget = registry
                .build(class_id, x, 0)
                .with_context(|| format!("Cannot add {} to the chain", class_id))?;
            let id = pipeline.add_gadget(gadget);
            pipeline
                .connect(PortId::new(previous, 0), PortId::new(id, 0))
                .with_context(|| format!("Cannot feed {} from {}", class_id, previous))?;

            chain.push(id);
            previous = id;
        }

        tracing::debug!("Built chain of {} gadgets", chain.len());
        Ok(Self {
            pipeline,
            source,
            chain,
        })
    }

    /// Replace the text input's value and propagate it down the chain.
    pub fn feed(&mut self, text: impl Into<String>) -> Result<CascadeReport> {
        Ok(self.pipeline.edit(self.source, text.into())?)
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn source(&self) -> GadgetId {
        self.source
    }

    /// Chained gadgets in order, excluding the text input.
    pub fn chain(&self) -> &[GadgetId] {
        &self.chain
    }

    /// Gadget at the end of the chain, or the text input for an empty chain.
    pub fn last(&self) -> GadgetId {
        self.chain.last().copied().unwrap_or(self.source)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(self.pipeline.snapshot().to_json()?)
    }
}

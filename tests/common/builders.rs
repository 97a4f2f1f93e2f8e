//! Test data builders for pipelines and topologies

use gadgets_rs::pipeline::{GadgetId, GadgetKind, Pipeline, PipelineResult, PortId};
use gadgets_rs::TopologyGraph;

/// Builder for a pipeline with one text input feeding a chain of gadgets.
pub struct ChainBuilder {
    kinds: Vec<GadgetKind>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self { kinds: Vec::new() }
    }

    pub fn then(mut self, kind: GadgetKind) -> Self {
        self.kinds.push(kind);
        self
    }

    /// Build into an existing pipeline. Returns ids, source first.
    pub fn build_into(self, pipeline: &mut Pipeline) -> PipelineResult<Vec<GadgetId>> {
        let mut ids = vec![pipeline.place(GadgetKind::TextInput, 0, 0)];
        for (i, kind) in self.kinds.into_iter().enumerate() {
            let id = pipeline.place(kind, (i as i32 + 1) * 20, 0);
            let previous = ids[ids.len() - 1];
            pipeline.connect(PortId::new(previous, 0), PortId::new(id, 0))?;
            ids.push(id);
        }
        Ok(ids)
    }

    pub fn build(self) -> (Pipeline, Vec<GadgetId>) {
        let mut pipeline = Pipeline::new();
        let ids = self.build_into(&mut pipeline).unwrap();
        (pipeline, ids)
    }
}

/// Topology built from `(source, target)` pairs.
pub fn forest(edges: &[(&str, &str)]) -> TopologyGraph {
    let mut graph = TopologyGraph::new();
    for (source, target) in edges {
        graph.add_edge(source, target).unwrap();
    }
    graph
}

/// Connect output 0 of `from` to input 0 of `to`.
pub fn wire(pipeline: &mut Pipeline, from: GadgetId, to: GadgetId) {
    pipeline
        .connect(PortId::new(from, 0), PortId::new(to, 0))
        .unwrap();
}


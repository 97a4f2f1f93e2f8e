//! Pipeline executor: gadget ownership, wiring and cascade propagation.
//!
//! Every mutating call resolves its whole downstream cascade before it
//! returns:
//! 1. Validate gadgets and ports.
//! 2. Commit the edge change to the topology (cycles are rejected here,
//!    before any port is touched).
//! 3. Rewire the port subscriptions.
//! 4. Recompute from the changed gadget, depth first, following output
//!    subscribers in subscription order.
//!
//! # Design
//!
//! - **Explicit worklist**: the cascade is a LIFO stack of delivery steps
//!   instead of nested callbacks, so stack usage stays flat and the visit
//!   order is recorded in a [`CascadeReport`].
//! - **Depth bound**: `PipelineConfig::max_cascade_depth` caps the longest
//!   chain. Connections that would exceed it are rejected up front.
//! - **One upstream per gadget**: connecting into a gadget that already has
//!   a connected input detaches the old connection first, mirroring the
//!   topology's single-parent rule.

use crate::config::PipelineConfig;
use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::gadget::Gadget;
use crate::pipeline::id::{GadgetId, PortId};
use crate::pipeline::kind::GadgetKind;
use crate::pipeline::snapshot::{EdgeSnapshot, NodeSnapshot, TopologySnapshot};
use crate::topology::TopologyGraph;
use bytes::Bytes;
use std::collections::BTreeMap;

/// Gadgets recomputed by one call, in visit order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeReport {
    visited: Vec<GadgetId>,
}

impl CascadeReport {
    pub fn visited(&self) -> &[GadgetId] {
        &self.visited
    }

    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }

    pub fn contains(&self, id: GadgetId) -> bool {
        self.visited.contains(&id)
    }

    fn merge(&mut self, other: CascadeReport) {
        self.visited.extend(other.visited);
    }
}

/// One unit of cascade work: optionally deliver a value into an input
/// port, then recompute the port's gadget.
struct Step {
    gadget: GadgetId,
    delivery: Option<(u16, Bytes)>,
    depth: usize,
}

/// The gadget graph and its propagation engine.
#[derive(Debug)]
pub struct Pipeline {
    gadgets: BTreeMap<GadgetId, Gadget>,
    topology: TopologyGraph,
    config: PipelineConfig,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    pub fn with_config(config: PipelineConfig) -> Self {
        Self {
            gadgets: BTreeMap::new(),
            topology: TopologyGraph::new(),
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.gadgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gadgets.is_empty()
    }

    pub fn gadget(&self, id: GadgetId) -> Option<&Gadget> {
        self.gadgets.get(&id)
    }

    /// All gadgets, in id order.
    pub fn gadgets(&self) -> impl Iterator<Item = &Gadget> {
        self.gadgets.values()
    }

    pub fn topology(&self) -> &TopologyGraph {
        &self.topology
    }

    /// All `(output, input)` connections, sorted.
    pub fn connections(&self) -> Vec<(PortId, PortId)> {
        let mut connections: Vec<(PortId, PortId)> = self
            .gadgets
            .values()
            .flat_map(|g| {
                let id = g.id();
                g.inputs()
                    .iter()
                    .enumerate()
                    .filter_map(move |(i, port)| {
                        port.upstream().map(|up| (up, PortId::new(id, i as u16)))
                    })
            })
            .collect();
        connections.sort();
        connections
    }

    // ── Graph building ──

    /// Take ownership of a gadget and add it to the topology as a root.
    pub fn add_gadget(&mut self, gadget: Gadget) -> GadgetId {
        let id = gadget.id();
        self.topology.ensure_node(&id.node_key());
        tracing::info!("Added gadget {} ({})", id, gadget.class_id());
        self.gadgets.insert(id, gadget);
        id
    }

    /// Construct a gadget of `kind` at `(x, y)` and add it.
    pub fn place(&mut self, kind: GadgetKind, x: i32, y: i32) -> GadgetId {
        self.add_gadget(Gadget::new(kind, x, y))
    }

    /// Remove a gadget, releasing every connection into or out of it.
    ///
    /// Gadgets that were fed by it see empty input and are recomputed.
    pub fn remove_gadget(&mut self, id: GadgetId) -> PipelineResult<CascadeReport> {
        let gadget = self.get(id)?;
        let upstream = Self::upstream_links(gadget);
        let downstream: Vec<(PortId, PortId)> = gadget
            .outputs()
            .iter()
            .enumerate()
            .flat_map(|(o, port)| {
                port.subscribers()
                    .iter()
                    .map(move |&input| (PortId::new(id, o as u16), input))
            })
            .collect();

        self.topology.remove_node(&id.node_key())?;

        for (index, output) in upstream {
            self.unlink(output, PortId::new(id, index));
        }
        for &(output, input) in &downstream {
            self.unlink(output, input);
        }

        if let Some(mut gadget) = self.gadgets.remove(&id) {
            gadget.destroy();
        }
        tracing::info!("Removed gadget {}", id);

        let mut report = CascadeReport::default();
        for (_, input) in downstream {
            report.merge(self.cascade(input.gadget, None));
        }
        Ok(report)
    }

    pub fn move_gadget(&mut self, id: GadgetId, x: i32, y: i32) -> PipelineResult<()> {
        let gadget = self
            .gadgets
            .get_mut(&id)
            .ok_or(PipelineError::GadgetNotFound(id))?;
        gadget.move_to(x, y);
        Ok(())
    }

    // ── Wiring ──

    /// Connect an output port to an input port.
    ///
    /// The input adopts the output's current value and its gadget is
    /// recomputed. Rejected without changes if the connection would close a
    /// cycle or exceed the cascade depth bound.
    pub fn connect(&mut self, output: PortId, input: PortId) -> PipelineResult<CascadeReport> {
        self.get(output.gadget)?
            .output(output.index)
            .ok_or(PipelineError::PortOutOfRange(output))?;
        self.get(input.gadget)?
            .input(input.index)
            .ok_or(PipelineError::PortOutOfRange(input))?;
        self.topology
            .check_edge(&output.gadget.node_key(), &input.gadget.node_key())?;
        self.check_depth(output.gadget, input.gadget)?;

        self.topology
            .add_edge(&output.gadget.node_key(), &input.gadget.node_key())?;

        let previous = Self::upstream_links(self.get(input.gadget)?);
        for (index, upstream) in previous {
            self.unlink(upstream, PortId::new(input.gadget, index));
        }

        let mut value = Bytes::new();
        if let Some(port) = self
            .gadgets
            .get_mut(&output.gadget)
            .and_then(|g| g.output_mut(output.index))
        {
            port.add_subscriber(input);
            value = port.value();
        }
        if let Some(port) = self
            .gadgets
            .get_mut(&input.gadget)
            .and_then(|g| g.input_mut(input.index))
        {
            port.attach(output);
        }
        tracing::debug!("Connected {:?} -> {:?}", output, input);

        Ok(self.cascade(input.gadget, Some((input.index, value))))
    }

    /// Disconnect an input port from its upstream output.
    ///
    /// The input is reset to empty and its gadget recomputed.
    pub fn disconnect(&mut self, input: PortId) -> PipelineResult<CascadeReport> {
        let upstream = self
            .get(input.gadget)?
            .input(input.index)
            .ok_or(PipelineError::PortOutOfRange(input))?
            .upstream()
            .ok_or(PipelineError::NotConnected(input))?;

        self.topology
            .remove_edge(&upstream.gadget.node_key(), &input.gadget.node_key())?;
        self.unlink(upstream, input);

        Ok(self.cascade(input.gadget, None))
    }

    // ── Propagation ──

    /// Replace a source gadget's editable value and propagate it.
    pub fn edit(&mut self, id: GadgetId, value: impl Into<Bytes>) -> PipelineResult<CascadeReport> {
        if !self.get(id)?.set_editable(value.into()) {
            return Err(PipelineError::NotEditable(id));
        }
        Ok(self.cascade(id, None))
    }

    /// Recompute a gadget and everything downstream of it.
    pub fn refresh(&mut self, id: GadgetId) -> PipelineResult<CascadeReport> {
        self.get(id)?;
        Ok(self.cascade(id, None))
    }

    /// Serializable view of every gadget and connection.
    pub fn snapshot(&self) -> TopologySnapshot {
        let nodes = self
            .gadgets
            .values()
            .map(|g| NodeSnapshot {
                id: g.id(),
                class_id: g.class_id(),
                family: g.family(),
                title: g.title().to_string(),
                position: g.position(),
                display: g.display().get(),
                parent: g.inputs().iter().find_map(|p| p.upstream()).map(|p| p.gadget),
            })
            .collect();

        let edges = self
            .connections()
            .into_iter()
            .map(|(from, to)| EdgeSnapshot { from, to })
            .collect();

        TopologySnapshot {
            nodes,
            edges,
            forest: self.topology.render(),
        }
    }

    fn get(&self, id: GadgetId) -> PipelineResult<&Gadget> {
        self.gadgets.get(&id).ok_or(PipelineError::GadgetNotFound(id))
    }

    fn upstream_links(gadget: &Gadget) -> Vec<(u16, PortId)> {
        gadget
            .inputs()
            .iter()
            .enumerate()
            .filter_map(|(i, port)| port.upstream().map(|up| (i as u16, up)))
            .collect()
    }

    /// Drop the subscription between two ports and clear the input.
    fn unlink(&mut self, output: PortId, input: PortId) {
        if let Some(port) = self
            .gadgets
            .get_mut(&output.gadget)
            .and_then(|g| g.output_mut(output.index))
        {
            port.remove_subscriber(input);
        }
        if let Some(port) = self
            .gadgets
            .get_mut(&input.gadget)
            .and_then(|g| g.input_mut(input.index))
        {
            port.detach();
            port.receive(Bytes::new());
        }
        tracing::debug!("Disconnected {:?} -> {:?}", output, input);
    }

    /// Reject a connection whose longest resulting chain would exceed the bound.
    fn check_depth(&self, source: GadgetId, target: GadgetId) -> PipelineResult<()> {
        let above = self
            .topology
            .find_node(&source.node_key())
            .map_or(0, |n| n.depth());
        let below = self
            .topology
            .find_node(&target.node_key())
            .map_or(0, |n| n.height());
        let limit = self.config.max_cascade_depth;
        if above + 1 + below > limit {
            tracing::warn!(
                "Rejected {} -> {}: chain of {} exceeds limit {}",
                source,
                target,
                above + 1 + below,
                limit
            );
            return Err(PipelineError::CascadeDepthExceeded {
                origin: source,
                limit,
            });
        }
        Ok(())
    }

    /// Recompute `origin` and everything downstream of it, depth first.
    fn cascade(&self, origin: GadgetId, delivery: Option<(u16, Bytes)>) -> CascadeReport {
        let limit = self.config.max_cascade_depth;
        let mut report = CascadeReport::default();
        let mut stack = vec![Step {
            gadget: origin,
            delivery,
            depth: 0,
        }];

        while let Some(step) = stack.pop() {
            if step.depth > limit {
                tracing::warn!(
                    "Cascade from {} cut off at {} (depth {})",
                    origin,
                    step.gadget,
                    step.depth
                );
                continue;
            }
            let Some(gadget) = self.gadgets.get(&step.gadget) else {
                continue;
            };
            if let Some((index, value)) = step.delivery {
                if let Some(port) = gadget.input(index) {
                    port.receive(value);
                }
            }

            debug_assert!(
                !report.contains(step.gadget),
                "{} visited twice in one cascade",
                step.gadget
            );
            if report.contains(step.gadget) {
                tracing::warn!("{} visited twice in cascade from {}", step.gadget, origin);
                continue;
            }
            report.visited.push(step.gadget);

            gadget.apply(gadget.transform());
            tracing::debug!("Recomputed {} -> {}", step.gadget, gadget.display().get());

            let mut next = Vec::new();
            for port in gadget.outputs() {
                let value = port.value();
                for &target in port.subscribers() {
                    next.push(Step {
                        gadget: target.gadget,
                        delivery: Some((target.index, value.clone())),
                        depth: step.depth + 1,
                    });
                }
            }
            // Reversed so the first subscriber is popped first.
            stack.extend(next.into_iter().rev());
        }

        report
    }
}

/// Builder for a linear pipeline: one text input followed by a chain of
/// transforms, each feeding the next.
#[derive(Debug, Clone, Default)]
pub struct PipelineBuilder {
    config: PipelineConfig,
    chain: Vec<GadgetKind>,
}

impl PipelineBuilder {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            chain: Vec::new(),
        }
    }

    /// Append a gadget to the chain.
    pub fn then(mut self, kind: GadgetKind) -> Self {
        self.chain.push(kind);
        self
    }

    /// Place the gadgets left to right and wire them.
    ///
    /// Returns the pipeline and the gadget ids, source first.
    pub fn build(self) -> PipelineResult<(Pipeline, Vec<GadgetId>)> {
        let mut pipeline = Pipeline::with_config(self.config);
        let mut x = 0;
        let mut ids = vec![pipeline.place(GadgetKind::TextInput, x, 0)];

        for kind in self.chain {
            x += i32::from(kind.default_size().0) + 2;
            let id = pipeline.place(kind, x, 0);
            if let Some(&previous) = ids.last() {
                pipeline.connect(PortId::new(previous, 0), PortId::new(id, 0))?;
            }
            ids.push(id);
        }

        Ok((pipeline, ids))
    }
}

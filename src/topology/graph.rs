//! Forest of named nodes with cycle-checked edge insertion.

use crate::topology::error::{GraphError, GraphResult};
use std::fmt;

/// A slot in the node arena.
#[derive(Debug, Clone)]
struct NodeSlot {
    id: String,
    parent: Option<usize>,
    /// Outgoing edges, in insertion order.
    children: Vec<usize>,
}

/// Topology of gadget connections.
///
/// Nodes are identified by opaque string ids. Every node has at most one
/// parent; nodes without one are roots, owned by the graph's implicit root.
#[derive(Debug, Clone, Default)]
pub struct TopologyGraph {
    nodes: Vec<NodeSlot>,
    /// Children of the implicit root, in insertion order.
    roots: Vec<usize>,
    /// Slots of removed nodes, reused by the next created node.
    free: Vec<usize>,
}

/// Borrowed view of a single node.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    graph: &'a TopologyGraph,
    index: usize,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> &'a str {
        &self.graph.nodes[self.index].id
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        let graph = self.graph;
        graph.nodes[self.index]
            .parent
            .map(|index| NodeRef { graph, index })
    }

    /// Children in edge insertion order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let graph = self.graph;
        graph.nodes[self.index]
            .children
            .iter()
            .map(move |&index| NodeRef { graph, index })
    }

    pub fn is_root(&self) -> bool {
        self.graph.nodes[self.index].parent.is_none()
    }

    /// Number of nodes in the subtree rooted here, including this node.
    pub fn subtree_size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self.index];
        while let Some(idx) = stack.pop() {
            count += 1;
            stack.extend(self.graph.nodes[idx].children.iter().copied());
        }
        count
    }

    /// Number of ancestors; zero for roots.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.graph.nodes[self.index].parent;
        while let Some(idx) = current {
            depth += 1;
            current = self.graph.nodes[idx].parent;
        }
        depth
    }

    /// Edges on the longest downward path; zero for leaves.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self.index, 0)];
        while let Some((idx, level)) = stack.pop() {
            height = height.max(level);
            stack.extend(
                self.graph.nodes[idx]
                    .children
                    .iter()
                    .map(|&child| (child, level + 1)),
            );
        }
        height
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id())
            .field("parent", &self.parent().map(|p| p.id()))
            .finish()
    }
}

impl TopologyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Depth-first search from the implicit root for the node named `id`.
    pub fn find_node(&self, id: &str) -> Option<NodeRef<'_>> {
        self.find_index(id).map(|index| NodeRef { graph: self, index })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find_index(id).is_some()
    }

    /// Id of the node's parent, or `None` for roots and unknown ids.
    pub fn parent_of(&self, id: &str) -> Option<&str> {
        self.find_node(id)
            .and_then(|node| node.parent())
            .map(|parent| parent.id())
    }

    /// Children of the implicit root, in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        self.roots.iter().map(move |&index| NodeRef { graph: self, index })
    }

    /// All edges as `(source, target)` pairs, sorted by id.
    pub fn edges(&self) -> Vec<(String, String)> {
        let mut edges = Vec::new();
        let mut stack = self.roots.clone();
        while let Some(idx) = stack.pop() {
            let slot = &self.nodes[idx];
            for &child in &slot.children {
                edges.push((slot.id.clone(), self.nodes[child].id.clone()));
                stack.push(child);
            }
        }
        edges.sort();
        edges
    }

    /// Create `id` as a new root unless it already exists. Returns whether it was created.
    pub fn ensure_node(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.create_root(id);
        true
    }

    /// Add the edge `source -> target`.
    ///
    /// Missing endpoints are created as roots. If `target` already has a
    /// parent, it is detached from it first. The edge is rejected with
    /// [`GraphError::Cycle`] when `source` is reachable from `target`; the
    /// graph is left untouched in that case.
    pub fn add_edge(&mut self, source_id: &str, target_id: &str) -> GraphResult<()> {
        self.check_edge(source_id, target_id)?;
        let source = self.find_index(source_id);
        let target = self.find_index(target_id);

        let source = source.unwrap_or_else(|| self.create_root(source_id));
        let target = target.unwrap_or_else(|| self.create_root(target_id));

        self.detach(target);
        self.nodes[source].children.push(target);
        self.nodes[target].parent = Some(source);

        tracing::debug!("Added edge {} -> {}", source_id, target_id);
        Ok(())
    }

    /// Fail with [`GraphError::Cycle`] if `source -> target` would close a
    /// cycle. The graph is not modified.
    pub fn check_edge(&self, source_id: &str, target_id: &str) -> GraphResult<()> {
        let closes_cycle = source_id == target_id
            || matches!(
                (self.find_index(source_id), self.find_index(target_id)),
                (Some(s), Some(t)) if self.reaches(t, s)
            );
        if closes_cycle {
            tracing::warn!(
                "Rejected edge {} -> {}: would create a cycle in\n{}",
                source_id,
                target_id,
                self
            );
            return Err(GraphError::Cycle {
                source_id: source_id.to_string(),
                target_id: target_id.to_string(),
            });
        }
        Ok(())
    }

    /// Remove the edge `source -> target`; `target` becomes a root.
    pub fn remove_edge(&mut self, source_id: &str, target_id: &str) -> GraphResult<()> {
        let not_found = || GraphError::EdgeNotFound {
            source_id: source_id.to_string(),
            target_id: target_id.to_string(),
        };

        let source = self.find_index(source_id).ok_or_else(not_found)?;
        let target = self.find_index(target_id).ok_or_else(not_found)?;
        if self.nodes[target].parent != Some(source) {
            return Err(not_found());
        }

        self.detach(target);
        self.roots.push(target);

        tracing::debug!("Removed edge {} -> {}", source_id, target_id);
        Ok(())
    }

    /// Remove a node and its incident edges. Its children become roots.
    pub fn remove_node(&mut self, id: &str) -> GraphResult<()> {
        let idx = self
            .find_index(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;

        self.detach(idx);
        let children = std::mem::take(&mut self.nodes[idx].children);
        for child in children {
            self.nodes[child].parent = None;
            self.roots.push(child);
        }
        self.nodes[idx].id.clear();
        self.free.push(idx);

        tracing::debug!("Removed node {}", id);
        Ok(())
    }

    /// Render the forest as indented text, siblings ordered by id.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_level(&mut out, &self.roots, 0);
        out
    }

    fn render_level(&self, out: &mut String, level: &[usize], depth: usize) {
        let mut sorted = level.to_vec();
        sorted.sort_by(|a, b| self.nodes[*a].id.cmp(&self.nodes[*b].id));

        for idx in sorted {
            for _ in 0..depth {
                out.push_str("  ");
            }
            out.push_str(&self.nodes[idx].id);
            out.push('\n');
            self.render_level(out, &self.nodes[idx].children, depth + 1);
        }
    }

    fn find_index(&self, id: &str) -> Option<usize> {
        let mut stack = self.roots.clone();
        while let Some(idx) = stack.pop() {
            let slot = &self.nodes[idx];
            if slot.id == id {
                return Some(idx);
            }
            stack.extend(slot.children.iter().copied());
        }
        None
    }

    fn create_root(&mut self, id: &str) -> usize {
        let slot = NodeSlot {
            id: id.to_string(),
            parent: None,
            children: Vec::new(),
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = slot;
                idx
            }
            None => {
                self.nodes.push(slot);
                self.nodes.len() - 1
            }
        };
        self.roots.push(idx);
        idx
    }

    /// Whether `to` is reachable from `from` by following child edges.
    fn reaches(&self, from: usize, to: usize) -> bool {
        let mut stack = vec![from];
        while let Some(idx) = stack.pop() {
            if idx == to {
                return true;
            }
            stack.extend(self.nodes[idx].children.iter().copied());
        }
        false
    }

    /// Unlink a node from its parent (or from the root list).
    fn detach(&mut self, idx: usize) {
        match self.nodes[idx].parent.take() {
            Some(parent) => self.nodes[parent].children.retain(|&c| c != idx),
            None => self.roots.retain(|&r| r != idx),
        }
    }
}

impl fmt::Display for TopologyGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

//! Integration tests for the topology graph
//!
//! These tests validate the forest behaviour seen by callers:
//! - Building trees in and out of order
//! - Rejecting cycles without changing the graph
//! - Removing edges and nodes

mod common;

use common::builders::forest;
use gadgets_rs::{GraphError, TopologyGraph};

#[test]
fn test_scenario_branching_tree() {
    let graph = forest(&[("a", "b"), ("b", "c"), ("a", "d")]);
    assert_eq!(graph.render(), "a\n  b\n    c\n  d\n");
    assert_eq!(graph.roots().count(), 1);
}

#[test]
fn test_scenario_out_of_order_edges() {
    let in_order = forest(&[("a", "b"), ("b", "c")]);
    let out_of_order = forest(&[("b", "c"), ("a", "b")]);
    assert_eq!(in_order.render(), out_of_order.render());
    assert_eq!(out_of_order.parent_of("b"), Some("a"));
}

#[test]
fn test_scenario_cycle_leaves_graph_unchanged() {
    let mut graph = forest(&[("a", "b"), ("b", "c")]);
    let before = graph.render();

    let err = graph.add_edge("c", "a").unwrap_err();
    assert!(err.is_cycle());
    assert_eq!(
        err,
        GraphError::Cycle {
            source_id: "c".to_string(),
            target_id: "a".to_string()
        }
    );
    assert_eq!(graph.render(), before);
}

#[test]
fn test_scenario_remove_edge_splits_tree() {
    let mut graph = forest(&[("a", "b"), ("b", "c"), ("c", "d")]);
    graph.remove_edge("b", "c").unwrap();

    assert_eq!(graph.render(), "a\n  b\nc\n  d\n");
    assert!(graph.find_node("c").unwrap().is_root());
    assert!(graph.contains("b"));
    assert_eq!(graph.len(), 4);
}

#[test]
fn test_new_source_supersedes_parent() {
    let mut graph = forest(&[("a", "c"), ("b", "x")]);
    graph.add_edge("b", "c").unwrap();

    assert_eq!(graph.parent_of("c"), Some("b"));
    assert_eq!(graph.find_node("a").unwrap().children().count(), 0);
    assert_eq!(
        graph.remove_edge("a", "c"),
        Err(GraphError::EdgeNotFound {
            source_id: "a".to_string(),
            target_id: "c".to_string()
        })
    );
}

#[test]
fn test_removed_edge_can_be_restored() {
    let mut graph = forest(&[("a", "b"), ("b", "c")]);
    let before = graph.render();
    graph.remove_edge("a", "b").unwrap();
    graph.add_edge("a", "b").unwrap();
    assert_eq!(graph.render(), before);
}

#[test]
fn test_find_node_reaches_deep_descendants() {
    let ids: Vec<String> = (0..50).map(|i| format!("n{:02}", i)).collect();
    let mut graph = TopologyGraph::new();
    for pair in ids.windows(2) {
        graph.add_edge(&pair[0], &pair[1]).unwrap();
    }

    let leaf = graph.find_node("n49").unwrap();
    assert_eq!(leaf.parent().unwrap().id(), "n48");
    assert_eq!(graph.find_node("n00").unwrap().subtree_size(), 50);
    assert!(graph.add_edge("n49", "n00").unwrap_err().is_cycle());
}

//! Custom assertions for test verification
//!
//! This module provides domain-specific assertions for codegraph-ir testing.

use codegraph_ir::features::ir_generation::infrastructure::processor::ProcessResult;
use codegraph_ir::shared::models::edge::Edge;
use codegraph_ir::shared::models::node::Node;
use codegraph_ir::shared::models::{EdgeKind, NodeKind};

/// Assert that ProcessResult has no errors
pub fn assert_no_errors(result: &ProcessResult) {
    assert!(
        result.errors.is_empty(),
        "Expected no errors, got: {:?}",
        result.errors
    );
}

/// Assert that ProcessResult has specific number of nodes
pub fn assert_node_count(result: &ProcessResult, expected: usize) {
    assert_eq!(
        result.nodes.len(),
        expected,
        "Expected {expected} nodes, got {}. Nodes: {:?}",
        result.nodes.len(),
        result.nodes.iter().map(|n| &n.kind).collect::<Vec<_>>()
    );
}

/// Assert that ProcessResult has at least N nodes
pub fn assert_min_node_count(result: &ProcessResult, min: usize) {
    assert!(
        result.nodes.len() >= min,
        "Expected at least {min} nodes, got {}",
        result.nodes.len()
    );
}

/// Assert that ProcessResult has specific number of edges
pub fn assert_edge_count(result: &ProcessResult, expected: usize) {
    assert_eq!(
        result.edges.len(),
        expected,
        "Expected {expected} edges, got {}",
        result.edges.len()
    );
}

/// Assert that ProcessResult contains a node of specific kind
pub fn assert_has_node(result: &ProcessResult, kind: NodeKind) {
    assert!(
        result.nodes.iter().any(|n| n.kind == kind),
        "Expected node of kind '{:?}', available kinds: {:?}",
        kind,
        result.nodes.iter().map(|n| n.kind).collect::<Vec<_>>()
    );
}

/// Assert that ProcessResult contains a node with specific name
pub fn assert_has_node_with_name(result: &ProcessResult, kind: NodeKind, name: &str) {
    assert!(
        result
            .nodes
            .iter()
            .any(|n| n.kind == kind && n.name.as_deref() == Some(name)),
        "Expected node of kind '{:?}' with name '{name}', found: {:?}",
        kind,
        result
            .nodes
            .iter()
            .filter(|n| n.kind == kind)
            .map(|n| &n.name)
            .collect::<Vec<_>>()
    );
}

/// Assert that ProcessResult contains an edge of specific kind
pub fn assert_has_edge(result: &ProcessResult, kind: EdgeKind) {
    assert!(
        result.edges.iter().any(|e| e.kind == kind),
        "Expected edge of kind '{:?}', available kinds: {:?}",
        kind,
        result.edges.iter().map(|e| e.kind).collect::<Vec<_>>()
    );
}

/// Assert that ProcessResult contains an edge between specific nodes (matched by name)
pub fn assert_has_edge_between(
    result: &ProcessResult,
    kind: EdgeKind,
    source_name: &str,
    target_name: &str,
) {
    let source_node = result
        .nodes
        .iter()
        .find(|n| n.name.as_deref() == Some(source_name));
    let target_node = result
        .nodes
        .iter()
        .find(|n| n.name.as_deref() == Some(target_name));

    assert!(source_node.is_some(), "Source node '{source_name}' not found");
    assert!(target_node.is_some(), "Target node '{target_name}' not found");

    let source_id = &source_node.unwrap().id;
    let target_id = &target_node.unwrap().id;

    assert!(
        result
            .edges
            .iter()
            .any(|e| { e.kind == kind && e.source_id == *source_id && e.target_id == *target_id }),
        "Expected edge of kind '{:?}' from '{source_name}' to '{target_name}'",
        kind
    );
}

/// Assert that a node has specific properties
pub fn assert_node_properties(node: &Node, expected_kind: NodeKind, expected_name: &str) {
    assert_eq!(node.kind, expected_kind, "Node kind mismatch");
    assert_eq!(node.name.as_deref(), Some(expected_name), "Node name mismatch");
}

/// Assert that result contains nodes with all specified kinds
pub fn assert_has_all_node_kinds(result: &ProcessResult, kinds: &[NodeKind]) {
    for kind in kinds {
        assert_has_node(result, *kind);
    }
}

/// Assert that result contains no duplicate nodes
pub fn assert_no_duplicate_nodes(result: &ProcessResult) {
    let mut seen_ids = std::collections::HashSet::new();

    for node in &result.nodes {
        assert!(
            seen_ids.insert(&node.id),
            "Duplicate node ID found: {}",
            node.id
        );
    }
}

/// Assert that result contains no duplicate edges
pub fn assert_no_duplicate_edges(result: &ProcessResult) {
    let mut seen_edges = std::collections::HashSet::new();

    for edge in &result.edges {
        let edge_tuple = (edge.kind, &edge.source_id, &edge.target_id);
        assert!(
            seen_edges.insert(edge_tuple),
            "Duplicate edge found: {:?}",
            edge
        );
    }
}

/// Assert that all edges reference valid nodes
pub fn assert_valid_edge_references(result: &ProcessResult) {
    let node_ids: std::collections::HashSet<_> = result.nodes.iter().map(|n| &n.id).collect();

    for edge in &result.edges {
        assert!(
            node_ids.contains(&edge.source_id),
            "Edge source '{}' references non-existent node",
            edge.source_id
        );
        assert!(
            node_ids.contains(&edge.target_id),
            "Edge target '{}' references non-existent node",
            edge.target_id
        );
    }
}

/// Assert that ProcessResult is well-formed (no duplicates, valid references)
pub fn assert_well_formed(result: &ProcessResult) {
    assert_no_errors(result);
    assert_no_duplicate_nodes(result);
    assert_no_duplicate_edges(result);
    assert_valid_edge_references(result);
}

/// Assert that a node exists with a specific FQN
pub fn assert_has_fqn(result: &ProcessResult, fqn: &str) {
    assert!(
        result.nodes.iter().any(|n| n.fqn == fqn),
        "Expected node with FQN '{fqn}', found: {:?}",
        result.nodes.iter().map(|n| &n.fqn).collect::<Vec<_>>()
    );
}

/// Assert that ProcessResult contains specific error message
pub fn assert_has_error(result: &ProcessResult, error_substring: &str) {
    assert!(
        result.errors.iter().any(|e| e.contains(error_substring)),
        "Expected error containing '{error_substring}', got: {:?}",
        result.errors
    );
}

/// Assert that two ProcessResults are equivalent (ignoring order)
pub fn assert_results_equivalent(result1: &ProcessResult, result2: &ProcessResult) {
    assert_eq!(result1.nodes.len(), result2.nodes.len(), "Node count mismatch");
    assert_eq!(result1.edges.len(), result2.edges.len(), "Edge count mismatch");

    for node in &result1.nodes {
        assert!(
            result2
                .nodes
                .iter()
                .any(|n| n.id == node.id && n.kind == node.kind),
            "Node not found in result2: {:?}",
            node
        );
    }

    for edge in &result1.edges {
        assert!(
            result2.edges.iter().any(|e| {
                e.kind == edge.kind && e.source_id == edge.source_id && e.target_id == edge.target_id
            }),
            "Edge not found in result2: {:?}",
            edge
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codegraph_ir::shared::models::Span;

    fn create_test_result() -> ProcessResult {
        let mut node = Node::new(
            "node1".to_string(),
            NodeKind::Function,
            "module.test_func".to_string(),
            "test.py".to_string(),
            Span::default(),
        );
        node.name = Some("test_func".to_string());

        ProcessResult {
            nodes: vec![node],
            edges: vec![],
            errors: vec![],
            ..Default::default()
        }
    }

    #[test]
    fn test_assert_node_count() {
        let result = create_test_result();
        assert_node_count(&result, 1);
    }

    #[test]
    #[should_panic(expected = "Expected 2 nodes")]
    fn test_assert_node_count_fails() {
        let result = create_test_result();
        assert_node_count(&result, 2);
    }

    #[test]
    fn test_assert_has_node() {
        let result = create_test_result();
        assert_has_node(&result, NodeKind::Function);
    }

    #[test]
    fn test_assert_has_fqn() {
        let result = create_test_result();
        assert_has_fqn(&result, "module.test_func");
    }
}

//! Test data builders
//!
//! This module provides builder patterns for creating test data structures.

use codegraph_ir::features::ir_generation::infrastructure::processor::ProcessResult;
use codegraph_ir::shared::models::{Edge, Node, NodeKind, Span};

/// Builder for ProcessResult
#[derive(Debug, Default)]
pub struct ProcessResultBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    errors: Vec<String>,
}

impl ProcessResultBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the result
    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Add multiple nodes
    pub fn with_nodes(mut self, nodes: Vec<Node>) -> Self {
        self.nodes.extend(nodes);
        self
    }

    /// Add an edge to the result
    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edges.push(edge);
        self
    }

    /// Add multiple edges
    pub fn with_edges(mut self, edges: Vec<Edge>) -> Self {
        self.edges.extend(edges);
        self
    }

    /// Add an error message
    pub fn with_error(mut self, error: String) -> Self {
        self.errors.push(error);
        self
    }

    /// Add multiple errors
    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors.extend(errors);
        self
    }

    /// Build the final ProcessResult
    pub fn build(self) -> ProcessResult {
        ProcessResult {
            nodes: self.nodes,
            edges: self.edges,
            errors: self.errors,
            ..Default::default()
        }
    }
}

/// Builder for Node
#[derive(Debug)]
pub struct NodeBuilder {
    id: String,
    kind: NodeKind,
    name: String,
    fqn: String,
    file_path: String,
    span: Span,
}

impl NodeBuilder {
    /// Create a new node builder with required fields
    pub fn new(id: String, kind: NodeKind, name: String) -> Self {
        Self {
            id,
            kind,
            fqn: name.clone(),
            name,
            file_path: String::new(),
            span: Span::default(),
        }
    }

    /// Set the FQN
    pub fn fqn(mut self, fqn: String) -> Self {
        self.fqn = fqn;
        self
    }

    /// Set the file path
    pub fn file_path(mut self, file_path: String) -> Self {
        self.file_path = file_path;
        self
    }

    /// Set the line range (1-based, inclusive)
    pub fn lines(mut self, start: usize, end: usize) -> Self {
        self.span = Span {
            start_line: start as u32,
            start_col: 0,
            end_line: end as u32,
            end_col: 0,
        };
        self
    }

    /// Build the final Node
    pub fn build(self) -> Node {
        let mut node = Node::new(self.id, self.kind, self.fqn, self.file_path, self.span);
        node.name = Some(self.name);
        node
    }
}

/// Builder for Edge
#[derive(Debug)]
pub struct EdgeBuilder {
    kind: codegraph_ir::shared::models::EdgeKind,
    source: String,
    target: String,
}

impl EdgeBuilder {
    /// Create a new edge builder
    pub fn new(kind: codegraph_ir::shared::models::EdgeKind, source: String, target: String) -> Self {
        Self {
            kind,
            source,
            target,
        }
    }

    /// Build the final Edge
    pub fn build(self) -> Edge {
        Edge::new_auto(self.source, self.target, self.kind)
    }
}

/// Helper to create a simple function node
pub fn function_node(id: &str, name: &str) -> Node {
    NodeBuilder::new(id.to_string(), NodeKind::Function, name.to_string())
        .fqn(format!("module.{name}"))
        .build()
}

/// Helper to create a simple class node
pub fn class_node(id: &str, name: &str) -> Node {
    NodeBuilder::new(id.to_string(), NodeKind::Class, name.to_string())
        .fqn(format!("module.{name}"))
        .build()
}

/// Helper to create a method node
pub fn method_node(id: &str, class_name: &str, method_name: &str) -> Node {
    NodeBuilder::new(id.to_string(), NodeKind::Method, method_name.to_string())
        .fqn(format!("module.{class_name}.{method_name}"))
        .build()
}

/// Helper to create a call edge
pub fn call_edge(source_id: &str, target_id: &str) -> Edge {
    EdgeBuilder::new(
        codegraph_ir::shared::models::EdgeKind::Calls,
        source_id.to_string(),
        target_id.to_string(),
    )
    .build()
}

/// Helper to create an import edge
pub fn import_edge(source_id: &str, target_id: &str) -> Edge {
    EdgeBuilder::new(
        codegraph_ir::shared::models::EdgeKind::Imports,
        source_id.to_string(),
        target_id.to_string(),
    )
    .build()
}

/// Helper to create a contains edge (e.g., class contains method)
pub fn contains_edge(source_id: &str, target_id: &str) -> Edge {
    EdgeBuilder::new(
        codegraph_ir::shared::models::EdgeKind::Contains,
        source_id.to_string(),
        target_id.to_string(),
    )
    .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_result_builder() {
        let result = ProcessResultBuilder::new()
            .with_node(function_node("f1", "test_func"))
            .with_node(class_node("c1", "TestClass"))
            .with_edge(call_edge("f1", "c1"))
            .build();

        assert_eq!(result.nodes.len(), 2);
        assert_eq!(result.edges.len(), 1);
        assert_eq!(result.errors.len(), 0);
    }

    #[test]
    fn test_node_builder() {
        let node = NodeBuilder::new("n1".to_string(), NodeKind::Function, "test".to_string())
            .fqn("module.test".to_string())
            .file_path("test.py".to_string())
            .lines(10, 20)
            .build();

        assert_eq!(node.id, "n1");
        assert_eq!(node.kind, NodeKind::Function);
        assert_eq!(node.name, Some("test".to_string()));
        assert_eq!(node.fqn, "module.test");
        assert_eq!(node.file_path, "test.py");
        assert_eq!(node.span.start_line, 10);
        assert_eq!(node.span.end_line, 20);
    }

    #[test]
    fn test_edge_builder() {
        let edge = call_edge("n1", "n2");

        assert_eq!(edge.kind, codegraph_ir::shared::models::EdgeKind::Calls);
        assert_eq!(edge.source_id, "n1");
        assert_eq!(edge.target_id, "n2");
    }

    #[test]
    fn test_helper_functions() {
        let func = function_node("f1", "my_func");
        assert_eq!(func.kind, NodeKind::Function);
        assert_eq!(func.name, Some("my_func".to_string()));
        assert_eq!(func.fqn, "module.my_func");

        let cls = class_node("c1", "MyClass");
        assert_eq!(cls.kind, NodeKind::Class);
        assert_eq!(cls.name, Some("MyClass".to_string()));

        let method = method_node("m1", "MyClass", "my_method");
        assert_eq!(method.fqn, "module.MyClass.my_method");

        let edge = call_edge("f1", "c1");
        assert_eq!(edge.kind, codegraph_ir::shared::models::EdgeKind::Calls);
    }
}

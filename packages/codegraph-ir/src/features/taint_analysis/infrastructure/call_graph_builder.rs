/*
 * Call Graph Builder for IR Integration
 *
 * Builds call graph from IR nodes and edges for interprocedural taint analysis.
 *
 * Integration with Rust IR Pipeline:
 * - Extracts function calls from IR
 * - Implements CallGraphProvider trait
 * - Enables interprocedural analysis on IR
 */

use super::interprocedural_taint::CallGraphProvider;
use crate::shared::models::{Edge, EdgeKind, Node, NodeKind};
use std::collections::{HashMap, HashSet};

/// Call graph built from IR
///
/// Extracts call relationships from IR nodes and edges.
pub struct IRCallGraph {
    /// Function -> Callees mapping
    calls: HashMap<String, Vec<String>>,

    /// All functions in the graph
    functions: HashSet<String>,
}

impl IRCallGraph {
    /// Create new empty call graph
    pub fn new() -> Self {
        Self {
            calls: HashMap::new(),
            functions: HashSet::new(),
        }
    }

    /// Build call graph from IR nodes and edges
    ///
    /// # Arguments
    /// * `nodes` - IR nodes
    /// * `edges` - IR edges
    ///
    /// # Returns
    /// Call graph ready for analysis
    pub fn build_from_ir(nodes: &[Node], edges: &[Edge]) -> Self {
        let mut graph = Self::new();

        // Extract function nodes
        for node in nodes {
            if matches!(node.kind, NodeKind::Function | NodeKind::Method) {
                graph.functions.insert(node.id.clone());
            }
        }

        // Extract call edges
        for edge in edges {
            if edge.kind == EdgeKind::Calls {
                // Add function if not already present
                graph.functions.insert(edge.source_id.clone());
                graph.functions.insert(edge.target_id.clone());

                // Add call relationship
                graph
                    .calls
                    .entry(edge.source_id.clone())
                    .or_insert_with(Vec::new)
                    .push(edge.target_id.clone());
            }
        }

        #[cfg(feature = "trace")]
        eprintln!(
            "[Call Graph] Built from IR: {} functions, {} call edges",
            graph.functions.len(),
            graph.calls.values().map(|v| v.len()).sum::<usize>()
        );

        graph
    }

    /// Get number of functions
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// Get number of call edges
    pub fn edge_count(&self) -> usize {
        self.calls.values().map(|v| v.len()).sum()
    }

    /// Get functions with no callees (leaf functions)
    pub fn leaf_functions(&self) -> Vec<String> {
        self.functions
            .iter()
            .filter(|f| !self.calls.contains_key(*f))
            .cloned()
            .collect()
    }

    /// Get functions with no callers (entry points)
    pub fn entry_points(&self) -> Vec<String> {
        let all_callees: HashSet<String> = self
            .calls
            .values()
            .flat_map(|v| v.iter())
            .cloned()
            .collect();

        self.functions
            .iter()
            .filter(|f| !all_callees.contains(*f))
            .cloned()
            .collect()
    }
}

impl Default for IRCallGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl CallGraphProvider for IRCallGraph {
    fn get_callees(&self, func_name: &str) -> Vec<String> {
        self.calls.get(func_name).cloned().unwrap_or_default()
    }

    fn get_functions(&self) -> Vec<String> {
        self.functions.iter().cloned().collect()
    }
}

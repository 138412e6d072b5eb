// Infrastructure: ReachabilityCache - Transitive closure for fast queries
// Pre-compute and cache reachability to avoid repeated BFS

use super::graph_index::GraphIndex;
use crate::features::query_engine::domain::EdgeType;
use crate::shared::models::Edge;
use std::collections::{HashMap, HashSet, VecDeque};

/// Reachability Cache - Pre-computed transitive closure
///
/// Strategy:
/// - Build transitive closure for frequently queried edge types
/// - Cache reachability matrix: node_id -> reachable_node_ids
/// - O(1) reachability check after O(V^2) build
///
/// Use cases:
/// - Impact analysis (what is affected by change?)
/// - Dependency queries (what does X depend on?)
/// - Security analysis (can source reach sink?)
#[derive(Debug, Clone)]
pub struct ReachabilityCache {
    /// Forward reachability: node -> all reachable nodes
    forward_reach: HashMap<String, HashSet<String>>,

    /// Backward reachability: node -> all nodes that can reach it
    backward_reach: HashMap<String, HashSet<String>>,

    /// Edge type this cache is for
    edge_type: EdgeType,

    /// Build stats
    node_count: usize,
    edge_count: usize,
    build_time_ms: u64,
}

impl ReachabilityCache {
    /// Build reachability cache for given edge type
    ///
    /// Complexity: O(V * (V + E)) where V = nodes, E = edges
    /// Memory: O(V^2) worst case (dense graph)
    pub fn build(index: &GraphIndex, edge_type: EdgeType) -> Self {
        let start = std::time::Instant::now();

        let mut forward_reach = HashMap::new();
        let mut backward_reach = HashMap::new();

        let all_nodes = index.get_all_nodes();

        // Build forward reachability for each node (BFS)
        for node in &all_nodes {
            let reachable = Self::compute_reachable_forward(index, &node.id, edge_type);
            forward_reach.insert(node.id.clone(), reachable);
        }

        // Build backward reachability for each node (reverse BFS)
        for node in &all_nodes {
            let reachable = Self::compute_reachable_backward(index, &node.id, edge_type);
            backward_reach.insert(node.id.clone(), reachable);
        }

        let build_time_ms = start.elapsed().as_millis() as u64;

        Self {
            forward_reach,
            backward_reach,
            edge_type,
            node_count: all_nodes.len(),
            edge_count: index.edge_count(),
            build_time_ms,
        }
    }

    /// Compute all nodes reachable from source (forward)
    fn compute_reachable_forward(
        index: &GraphIndex,
        source_id: &str,
        edge_type: EdgeType,
    ) -> HashSet<String> {
        let mut reachable = HashSet::new();
        let mut queue = VecDeque::new();
        let mut visited = HashSet::new();

        queue.push_back(source_id.to_string());
        visited.insert(source_id.to_string());

        while let Some(node_id) = queue.pop_front() {
            let edges = index.get_edges_from(&node_id);

            for edge in edges {
                if !Self::matches_edge_type(edge, edge_type) {
                    continue;
                }

                let target_id = &edge.target_id;

                if !visited.contains(target_id) {
                    visited.insert(target_id.clone());
                    reachable.insert(target_id.clone());
                    queue.push_back(target_id.clone());
                }
            }
        }

        reachable
    }

    /// Compute all nodes that can reach target (backward)
    fn compute_reachable_backward(
        index: &GraphIndex,
        target_id: &str,
        edge_type: EdgeType,
    ) -> HashSet<String> {
        let mut reachable = HashSet::new();
        let mut queue = VecDeque::new();
        let mut visited = HashSet::new();

        queue.push_back(target_id.to_string());
        visited.insert(target_id.to_string());

        while let Some(node_id) = queue.pop_front() {
            let edges = index.get_edges_to(&node_id);

            for edge in edges {
                if !Self::matches_edge_type(edge, edge_type) {
                    continue;
                }

                let source_id = &edge.source_id;

                if !visited.contains(source_id) {
                    visited.insert(source_id.clone());
                    reachable.insert(source_id.clone());
                    queue.push_back(source_id.clone());
                }
            }
        }

        reachable
    }

    /// Check if target is reachable from source (O(1))
    pub fn is_reachable(&self, source_id: &str, target_id: &str) -> bool {
        self.forward_reach
            .get(source_id)
            .map(|set| set.contains(target_id))
            .unwrap_or(false)
    }

    /// Get all nodes reachable from source (O(1))
    pub fn get_reachable_from(&self, source_id: &str) -> Option<&HashSet<String>> {
        self.forward_reach.get(source_id)
    }

    /// Get all nodes that can reach target (O(1))
    pub fn get_reaching_to(&self, target_id: &str) -> Option<&HashSet<String>> {
        self.backward_reach.get(target_id)
    }

    /// Get build statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            node_count: self.node_count,
            edge_count: self.edge_count,
            build_time_ms: self.build_time_ms,
            forward_entries: self.forward_reach.len(),
            backward_entries: self.backward_reach.len(),
            avg_reachable: self.average_reachable_count(),
        }
    }

    fn average_reachable_count(&self) -> f64 {
        if self.forward_reach.is_empty() {
            return 0.0;
        }

        let total: usize = self.forward_reach.values().map(|set| set.len()).sum();
        total as f64 / self.forward_reach.len() as f64
    }

    fn matches_edge_type(edge: &Edge, edge_type: EdgeType) -> bool {
        match edge_type {
            EdgeType::All => true,
            EdgeType::DFG => edge.kind.is_data_flow(),
            EdgeType::CFG => edge.kind.is_control_flow(),
            EdgeType::Call => matches!(edge.kind, crate::shared::models::EdgeKind::Calls),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub build_time_ms: u64,
    pub forward_entries: usize,
    pub backward_entries: usize,
    pub avg_reachable: f64,
}

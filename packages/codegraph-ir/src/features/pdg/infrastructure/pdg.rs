/*
 * PDG (Program Dependence Graph) Module
 *
 * PDG = CFG (Control Flow) + DFG (Data Flow)
 *
 * PRODUCTION GRADE:
 * - petgraph for efficient graph operations
 * - Control + Data dependency edges
 * - Backward/Forward slicing support
 *
 * Performance Target:
 * - PDG construction: 5-10x faster than Python
 * - Slicing: 10-20x faster (petgraph traversal)
 */

use crate::features::data_flow::infrastructure::dfg::DataFlowGraph;
use crate::features::flow_graph::infrastructure::cfg::{CFGEdge, CFGEdgeType};
use crate::shared::models::Span;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, HashSet, VecDeque};

/// Dependency type in PDG
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DependencyType {
    Control, // Control flow dependency (from CFG)
    Data,    // Data flow dependency (from DFG)
}

impl DependencyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyType::Control => "CONTROL",
            DependencyType::Data => "DATA",
        }
    }
}

/// PDG Node
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PDGNode {
    pub node_id: String,
    pub statement: String,
    pub line_number: u32,
    pub span: Span,
    pub defined_vars: Vec<String>,
    pub used_vars: Vec<String>,
    pub is_entry: bool,
    pub is_exit: bool,
    pub file_path: Option<String>,
}

impl PDGNode {
    pub fn new(node_id: String, statement: String, line_number: u32, span: Span) -> Self {
        PDGNode {
            node_id,
            statement,
            line_number,
            span,
            defined_vars: Vec::new(),
            used_vars: Vec::new(),
            is_entry: false,
            is_exit: false,
            file_path: None,
        }
    }

    pub fn with_vars(mut self, defined: Vec<String>, used: Vec<String>) -> Self {
        self.defined_vars = defined;
        self.used_vars = used;
        self
    }

    pub fn with_entry_exit(mut self, is_entry: bool, is_exit: bool) -> Self {
        self.is_entry = is_entry;
        self.is_exit = is_exit;
        self
    }
}

/// PDG Edge
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PDGEdge {
    pub from_node: String,
    pub to_node: String,
    pub dependency_type: DependencyType,
    pub label: Option<String>, // Variable name for data, condition for control
}

/// Serializable DTO for ProgramDependenceGraph
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PDGDto {
    pub function_id: String,
    pub nodes: Vec<PDGNode>,
    pub edges: Vec<PDGEdge>,
}

/// Program Dependence Graph
///
/// Uses petgraph for efficient graph operations:
/// - O(1) node/edge lookup
/// - O(V+E) traversal for slicing
#[derive(Debug)]
pub struct ProgramDependenceGraph {
    /// petgraph directed graph
    graph: DiGraph<PDGNode, PDGEdge>,
    /// Node ID to petgraph NodeIndex mapping
    node_map: HashMap<String, NodeIndex>,
    /// Function ID this PDG belongs to
    pub function_id: String,
}

// Custom serde implementation via DTO
impl serde::Serialize for ProgramDependenceGraph {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let dto = PDGDto {
            function_id: self.function_id.clone(),
            nodes: self.graph.node_weights().cloned().collect(),
            edges: self.graph.edge_weights().cloned().collect(),
        };
        dto.serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for ProgramDependenceGraph {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let dto = PDGDto::deserialize(deserializer)?;
        let mut pdg = ProgramDependenceGraph::new(dto.function_id);

        for node in dto.nodes {
            pdg.add_node(node);
        }

        for edge in dto.edges {
            pdg.add_edge(edge);
        }

        Ok(pdg)
    }
}

impl ProgramDependenceGraph {
    /// Create new empty PDG
    pub fn new(function_id: String) -> Self {
        ProgramDependenceGraph {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
            function_id,
        }
    }

    /// Add node to PDG
    pub fn add_node(&mut self, node: PDGNode) -> NodeIndex {
        let node_id = node.node_id.clone();
        let idx = self.graph.add_node(node);
        self.node_map.insert(node_id, idx);
        idx
    }

    /// Add edge to PDG
    pub fn add_edge(&mut self, edge: PDGEdge) {
        let from_idx = self.node_map.get(&edge.from_node);
        let to_idx = self.node_map.get(&edge.to_node);

        if let (Some(&from), Some(&to)) = (from_idx, to_idx) {
            self.graph.add_edge(from, to, edge);
        }
    }

    /// Get node by ID
    pub fn get_node(&self, node_id: &str) -> Option<&PDGNode> {
        self.node_map
            .get(node_id)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// Get all incoming edges (dependencies) for a node
    pub fn get_dependencies(&self, node_id: &str) -> Vec<&PDGEdge> {
        let Some(&idx) = self.node_map.get(node_id) else {
            return Vec::new();
        };

        self.graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| e.weight())
            .collect()
    }

    /// Get all outgoing edges (dependents) for a node
    pub fn get_dependents(&self, node_id: &str) -> Vec<&PDGEdge> {
        let Some(&idx) = self.node_map.get(node_id) else {
            return Vec::new();
        };

        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| e.weight())
            .collect()
    }

    /// Backward slice: all nodes that affect target_node
    ///
    /// Implements Weiser's algorithm using BFS
    ///
    /// # Performance
    /// O(V + E) where V = nodes, E = edges
    pub fn backward_slice(&self, target_node: &str, max_depth: Option<usize>) -> HashSet<String> {
        self.backward_slice_filtered(target_node, max_depth, true, true)
    }

    /// Backward slice with dependency type filtering (Thin Slicing support)
    ///
    /// # Arguments
    /// * `target_node` - Starting node for backward traversal
    /// * `max_depth` - Maximum traversal depth (None = unlimited)
    /// * `include_control` - Include control dependencies (false = Thin Slice)
    /// * `include_data` - Include data dependencies
    ///
    /// # Thin Slicing
    /// Set `include_control=false` to get a thin slice (data dependencies only).
    /// Thin slices are typically 30-50% smaller than full slices.
    ///
    /// Reference: Sridharan et al., "Thin Slicing", PLDI 2007
    pub fn backward_slice_filtered(
        &self,
        target_node: &str,
        max_depth: Option<usize>,
        include_control: bool,
        include_data: bool,
    ) -> HashSet<String> {
        let max_depth = max_depth.unwrap_or(usize::MAX);
        let mut slice_nodes = HashSet::new();
        let mut visited = HashSet::new();
        let mut worklist: VecDeque<(String, usize)> = VecDeque::new();

        worklist.push_back((target_node.to_string(), 0));

        while let Some((current, depth)) = worklist.pop_front() {
            if depth > max_depth {
                continue;
            }

            if visited.contains(&current) {
                continue;
            }

            if !self.node_map.contains_key(&current) {
                continue;
            }

            visited.insert(current.clone());
            slice_nodes.insert(current.clone());

            // Get dependencies with type filtering
            for edge in self.get_dependencies(&current) {
                let should_follow = match edge.dependency_type {
                    DependencyType::Control => include_control,
                    DependencyType::Data => include_data,
                };

                if should_follow && !visited.contains(&edge.from_node) {
                    worklist.push_back((edge.from_node.clone(), depth + 1));
                }
            }
        }

        slice_nodes
    }

    /// Thin slice: backward slice with data dependencies only
    ///
    /// "Why does this variable have this value?" (ignoring control flow)
    ///
    /// Thin slices are smaller and more focused on direct data flow,
    /// useful for understanding value propagation without control context.
    ///
    /// Reference: Sridharan et al., "Thin Slicing", PLDI 2007
    pub fn thin_slice(&self, target_node: &str, max_depth: Option<usize>) -> HashSet<String> {
        self.backward_slice_filtered(target_node, max_depth, false, true)
    }

    /// Forward slice: all nodes affected by source_node
    ///
    /// # Performance
    /// O(V + E)
    pub fn forward_slice(&self, source_node: &str, max_depth: Option<usize>) -> HashSet<String> {
        self.forward_slice_filtered(source_node, max_depth, true, true)
    }

    /// Forward slice with dependency type filtering
    ///
    /// # Arguments
    /// * `source_node` - Starting node for forward traversal
    /// * `max_depth` - Maximum traversal depth (None = unlimited)
    /// * `include_control` - Include control dependencies
    /// * `include_data` - Include data dependencies
    pub fn forward_slice_filtered(
        &self,
        source_node: &str,
        max_depth: Option<usize>,
        include_control: bool,
        include_data: bool,
    ) -> HashSet<String> {
        let max_depth = max_depth.unwrap_or(usize::MAX);
        let mut slice_nodes = HashSet::new();
        let mut visited = HashSet::new();
        let mut worklist: VecDeque<(String, usize)> = VecDeque::new();

        worklist.push_back((source_node.to_string(), 0));

        while let Some((current, depth)) = worklist.pop_front() {
            if depth > max_depth {
                continue;
            }

            if visited.contains(&current) {
                continue;
            }

            if !self.node_map.contains_key(&current) {
                continue;
            }

            visited.insert(current.clone());
            slice_nodes.insert(current.clone());

            // Get dependents with type filtering
            for edge in self.get_dependents(&current) {
                let should_follow = match edge.dependency_type {
                    DependencyType::Control => include_control,
                    DependencyType::Data => include_data,
                };

                if should_follow && !visited.contains(&edge.to_node) {
                    worklist.push_back((edge.to_node.clone(), depth + 1));
                }
            }
        }

        slice_nodes
    }

    /// Hybrid slice: backward + forward union
    pub fn hybrid_slice(&self, focus_node: &str, max_depth: Option<usize>) -> HashSet<String> {
        let backward = self.backward_slice(focus_node, max_depth);
        let forward = self.forward_slice(focus_node, max_depth);

        backward.union(&forward).cloned().collect()
    }

    /// Chop: statements on paths from source to target
    ///
    /// `Chop(source, target) = backward_slice(target) ∩ forward_slice(source)`
    ///
    /// "What code connects source to target?"
    ///
    /// Useful for understanding:
    /// - How a value flows from definition to use
    /// - Impact analysis between two specific points
    ///
    /// Reference: Jackson & Rollins, "Chopping", FSE 1994
    pub fn chop(
        &self,
        source_node: &str,
        target_node: &str,
        max_depth: Option<usize>,
    ) -> HashSet<String> {
        let backward = self.backward_slice(target_node, max_depth);
        let forward = self.forward_slice(source_node, max_depth);

        backward.intersection(&forward).cloned().collect()
    }

    /// Chop with dependency type filtering
    pub fn chop_filtered(
        &self,
        source_node: &str,
        target_node: &str,
        max_depth: Option<usize>,
        include_control: bool,
        include_data: bool,
    ) -> HashSet<String> {
        let backward =
            self.backward_slice_filtered(target_node, max_depth, include_control, include_data);
        let forward =
            self.forward_slice_filtered(source_node, max_depth, include_control, include_data);

        backward.intersection(&forward).cloned().collect()
    }

    /// Get statistics
    pub fn get_stats(&self) -> PDGStats {
        let mut control_edges = 0;
        let mut data_edges = 0;

        for edge in self.graph.edge_weights() {
            match edge.dependency_type {
                DependencyType::Control => control_edges += 1,
                DependencyType::Data => data_edges += 1,
            }
        }

        PDGStats {
            node_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
            control_edges,
            data_edges,
        }
    }

    /// Check if node exists
    pub fn contains_node(&self, node_id: &str) -> bool {
        self.node_map.contains_key(node_id)
    }

    /// Get all node IDs
    pub fn node_ids(&self) -> Vec<String> {
        self.node_map.keys().cloned().collect()
    }
}

/// PDG Statistics
#[derive(Debug, Clone)]
pub struct PDGStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub control_edges: usize,
    pub data_edges: usize,
}

/// PDG Builder
///
/// Combines CFG and DFG into PDG
pub struct PDGBuilder {
    nodes: Vec<PDGNode>,
    cfg_edges: Vec<CFGEdge>,
    dfg_edges: Vec<(String, String, String)>, // (from, to, variable)
}

impl PDGBuilder {
    pub fn new() -> Self {
        PDGBuilder {
            nodes: Vec::new(),
            cfg_edges: Vec::new(),
            dfg_edges: Vec::new(),
        }
    }

    /// Add PDG node
    pub fn add_node(&mut self, node: PDGNode) {
        self.nodes.push(node);
    }

    /// Add CFG edges (control dependencies)
    pub fn add_cfg_edges(&mut self, edges: Vec<CFGEdge>) {
        self.cfg_edges.extend(edges);
    }

    /// Add DFG edges (data dependencies) from DataFlowGraph
    pub fn add_dfg(&mut self, dfg: &DataFlowGraph) {
        for &(def_idx, use_idx) in &dfg.def_use_edges {
            if let (Some(def_node), Some(_use_node)) =
                (dfg.nodes.get(def_idx), dfg.nodes.get(use_idx))
            {
                self.dfg_edges.push((
                    format!("{}_{}", dfg.function_id, def_idx),
                    format!("{}_{}", dfg.function_id, use_idx),
                    def_node.variable_name.clone(),
                ));
            }
        }
    }

    /// Build PDG from collected nodes and edges
    pub fn build(self, function_id: String) -> ProgramDependenceGraph {
        let mut pdg = ProgramDependenceGraph::new(function_id);

        // Add all nodes
        for node in self.nodes {
            pdg.add_node(node);
        }

        // Add control dependency edges (from CFG)
        for cfg_edge in self.cfg_edges {
            let label = match cfg_edge.edge_type {
                CFGEdgeType::True => Some("True".to_string()),
                CFGEdgeType::False => Some("False".to_string()),
                _ => None,
            };

            pdg.add_edge(PDGEdge {
                from_node: cfg_edge.source_block_id,
                to_node: cfg_edge.target_block_id,
                dependency_type: DependencyType::Control,
                label,
            });
        }

        // Add data dependency edges (from DFG)
        for (from, to, var) in self.dfg_edges {
            pdg.add_edge(PDGEdge {
                from_node: from,
                to_node: to,
                dependency_type: DependencyType::Data,
                label: Some(var),
            });
        }

        pdg
    }
}

impl Default for PDGBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! QueryPlan: canonical, hashable execution plan (C10).
//!
//! Every high-level query is normalized to a `QueryPlan` before execution so
//! that planning is deterministic: the same pattern/scope/budget always
//! produces the same `plan_hash`, across process restarts.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Kind of canonical query plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    Slice,
    Dataflow,
    TaintProof,
    CallChain,
    DataDependency,
    ImpactAnalysis,
    TypeInference,
    Primitive,
}

impl PlanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanKind::Slice => "slice",
            PlanKind::Dataflow => "dataflow",
            PlanKind::TaintProof => "taint_proof",
            PlanKind::CallChain => "call_chain",
            PlanKind::DataDependency => "data_dependency",
            PlanKind::ImpactAnalysis => "impact_analysis",
            PlanKind::TypeInference => "type_inference",
            PlanKind::Primitive => "primitive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliceDirection {
    Backward,
    Forward,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalStrategy {
    Bfs,
    Dfs,
    Bidirectional,
}

/// A query pattern: a source, sink, or anchor to match against the IR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPattern {
    pub pattern: String,
    pub pattern_type: String,
    pub scope: Option<String>,
}

impl QueryPattern {
    pub fn symbol(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            pattern_type: "symbol".to_string(),
            scope: None,
        }
    }
}

/// Execution budget constraints, preventing runaway queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub max_nodes: u32,
    pub max_edges: u32,
    pub max_paths: u32,
    pub max_depth: u32,
    pub timeout_ms: u32,
}

impl Default for Budget {
    fn default() -> Self {
        Self::default_profile()
    }
}

impl Budget {
    pub fn default_profile() -> Self {
        Self {
            max_nodes: 1000,
            max_edges: 5000,
            max_paths: 100,
            max_depth: 10,
            timeout_ms: 30_000,
        }
    }

    pub fn light() -> Self {
        Self {
            max_nodes: 100,
            max_edges: 500,
            max_paths: 10,
            max_depth: 5,
            timeout_ms: 5_000,
        }
    }

    pub fn heavy() -> Self {
        Self {
            max_nodes: 10_000,
            max_edges: 50_000,
            max_paths: 500,
            max_depth: 20,
            timeout_ms: 120_000,
        }
    }
}

/// Canonical query execution plan. Immutable once built; hashable for
/// caching and duplicate detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryPlan {
    pub kind: PlanKind,
    pub patterns: Vec<QueryPattern>,
    pub budget: Budget,
    pub file_scope: Option<String>,
    pub function_scope: Option<String>,
    pub edge_types: Option<Vec<String>>,
    pub slice_direction: Option<SliceDirection>,
    pub policy_id: Option<String>,
    pub traversal_strategy: TraversalStrategy,
}

impl QueryPlan {
    /// Builds a plan, validating at least one pattern and defaulting
    /// `slice_direction` to `Backward` for `PlanKind::Slice` when unset.
    pub fn new(kind: PlanKind, patterns: Vec<QueryPattern>) -> Result<Self, String> {
        if patterns.is_empty() {
            return Err("QueryPlan must have at least one pattern".to_string());
        }
        let slice_direction = if kind == PlanKind::Slice {
            Some(SliceDirection::Backward)
        } else {
            None
        };
        Ok(Self {
            kind,
            patterns,
            budget: Budget::default_profile(),
            file_scope: None,
            function_scope: None,
            edge_types: None,
            slice_direction,
            policy_id: None,
            traversal_strategy: TraversalStrategy::Bfs,
        })
    }

    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_file_scope(mut self, file_scope: impl Into<String>) -> Self {
        self.file_scope = Some(file_scope.into());
        self
    }

    /// Stable hash of the plan's canonical form, truncated to 16 hex chars.
    /// Deterministic across process restarts: same inputs, same hash.
    pub fn compute_hash(&self) -> String {
        let mut sorted_patterns = self.patterns.clone();
        sorted_patterns.sort_by(|a, b| a.pattern.cmp(&b.pattern));

        let mut edge_types = self.edge_types.clone();
        if let Some(ref mut v) = edge_types {
            v.sort();
        }

        #[derive(Serialize)]
        struct Canonical<'a> {
            kind: &'static str,
            patterns: Vec<(&'a str, &'a str, &'a Option<String>)>,
            budget: Budget,
            file_scope: &'a Option<String>,
            function_scope: &'a Option<String>,
            edge_types: Option<Vec<String>>,
            slice_direction: Option<&'static str>,
            policy_id: &'a Option<String>,
            traversal_strategy: &'static str,
        }

        let canonical = Canonical {
            kind: self.kind.as_str(),
            patterns: sorted_patterns
                .iter()
                .map(|p| (p.pattern.as_str(), p.pattern_type.as_str(), &p.scope))
                .collect(),
            budget: self.budget,
            file_scope: &self.file_scope,
            function_scope: &self.function_scope,
            edge_types,
            slice_direction: self.slice_direction.map(|d| match d {
                SliceDirection::Backward => "backward",
                SliceDirection::Forward => "forward",
                SliceDirection::Both => "both",
            }),
            policy_id: &self.policy_id,
            traversal_strategy: match self.traversal_strategy {
                TraversalStrategy::Bfs => "bfs",
                TraversalStrategy::Dfs => "dfs",
                TraversalStrategy::Bidirectional => "bidirectional",
            },
        };

        // serde_json's map serialization is insertion-ordered, not sorted;
        // round-trip through a BTreeMap-backed Value to get a canonical
        // (sorted-key) byte representation before hashing.
        let value = serde_json::to_value(&canonical).expect("canonical plan is serializable");
        let sorted: std::collections::BTreeMap<String, serde_json::Value> =
            serde_json::from_value(value).expect("canonical plan round-trips through a map");
        let json_str = serde_json::to_string(&sorted).expect("sorted map is serializable");

        let mut hasher = Sha256::new();
        hasher.update(json_str.as_bytes());
        let full_hex = format!("{:x}", hasher.finalize());
        full_hex[..16].to_string()
    }
}

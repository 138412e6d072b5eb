//! `TaintRuleExecutableIR`: the final, immutable compiled form of a rule's
//! match clause, produced by `infrastructure::compiler` and consumed by the
//! taint executor (C9).

use serde::{Deserialize, Serialize};

use super::exec_ir::{CandidatePlan, Predicate};
use super::spec::RuleKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorExecPlan {
    pub candidate_plan: CandidatePlan,
    pub estimated_candidates: u64,
    pub cache_hit_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredicateExecPlan {
    pub predicates: Vec<Predicate>,
    pub short_circuit: bool,
}

/// Stable id of the form `compiled:{rule_id}:{clause_id}`.
pub fn compiled_id(rule_id: &str, clause_id: usize) -> String {
    format!("compiled:{rule_id}:{clause_id}")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaintRuleExecutableIR {
    pub compiled_id: String,
    pub rule_id: String,
    pub atom_id: String,
    pub kind: RuleKind,
    pub generator_exec: GeneratorExecPlan,
    pub predicate_exec: PredicateExecPlan,
    pub specificity: u32,
    pub confidence: f64,
    pub effect: Option<String>,
    pub cwe: Option<String>,
    pub owasp: Option<String>,
    pub severity: Option<String>,
    pub tags: Vec<String>,
    pub description: Option<String>,
    pub trace: Vec<String>,
    pub compilation_timestamp_ms: u64,
    /// Names of optimizer passes that ran on this rule, in order.
    pub optimizer_passes: Vec<String>,
}

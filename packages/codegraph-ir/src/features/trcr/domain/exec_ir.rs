//! `TaintRuleExecIR`: the intermediate form between a validated spec's
//! match clause and its final executable IR, carrying a candidate
//! generation plan and a cost-annotated predicate chain.

use serde::{Deserialize, Serialize};

use super::spec::RuleKind;

/// Which IR element class a compiled rule's candidates are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateClass {
    Expressions,
    Calls,
    Reads,
    Writes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatePlan {
    pub enumerate: CandidateClass,
}

/// A single predicate in a rule's match chain, annotated with its
/// estimated evaluation cost (cheaper predicates sort first after the
/// `reorder` optimization pass).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Predicate {
    CallNameEquals { name: String, estimated_cost: u32 },
    CallNamePrefix { prefix: String, estimated_cost: u32 },
    AttributeEquals { name: String, estimated_cost: u32 },
    DecoratorEquals { name: String, estimated_cost: u32 },
    ParameterNameEquals { name: String, estimated_cost: u32 },
}

impl Predicate {
    pub fn estimated_cost(&self) -> u32 {
        match self {
            Predicate::CallNameEquals { estimated_cost, .. }
            | Predicate::CallNamePrefix { estimated_cost, .. }
            | Predicate::AttributeEquals { estimated_cost, .. }
            | Predicate::DecoratorEquals { estimated_cost, .. }
            | Predicate::ParameterNameEquals { estimated_cost, .. } => *estimated_cost,
        }
    }

    /// Whether this predicate can ever match anything — used by the
    /// `prune` optimization pass to eliminate provably dead rules.
    pub fn is_satisfiable(&self) -> bool {
        match self {
            Predicate::CallNameEquals { name, .. } => !name.is_empty(),
            Predicate::CallNamePrefix { prefix, .. } => !prefix.is_empty(),
            Predicate::AttributeEquals { name, .. } => !name.is_empty(),
            Predicate::DecoratorEquals { name, .. } => !name.is_empty(),
            Predicate::ParameterNameEquals { name, .. } => !name.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaintRuleExecIR {
    pub rule_id: String,
    pub clause_id: usize,
    pub atom_id: String,
    pub kind: RuleKind,
    pub candidate_plan: CandidatePlan,
    pub predicate_chain: Vec<Predicate>,
    pub specificity: u32,
    pub confidence: f64,
    pub effect: Option<String>,
    pub cwe: Option<String>,
    pub owasp: Option<String>,
    pub severity: Option<String>,
    pub tags: Vec<String>,
    pub description: Option<String>,
    pub trace: Vec<String>,
}

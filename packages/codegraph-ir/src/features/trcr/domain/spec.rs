//! `TaintRuleSpec`: the validated, in-memory form of a declarative rule
//! document (YAML), before compilation to executable IR.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Source,
    Sink,
    Sanitizer,
    Propagator,
    Passthrough,
}

/// One match clause within a rule: the matcher fields a candidate IR
/// element must satisfy. At least one matcher field must be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchClauseSpec {
    /// Matches a call expression by callee name (supports a trailing `*`
    /// wildcard, e.g. `"os.system*"`).
    pub call: Option<String>,
    /// Matches attribute access, e.g. `"request.GET"`.
    pub attribute: Option<String>,
    /// Matches a decorator name on the enclosing function.
    pub decorator: Option<String>,
    /// Matches a parameter name (source rules keyed on function parameters).
    pub parameter: Option<String>,
}

impl MatchClauseSpec {
    pub fn is_valid(&self) -> bool {
        self.call.is_some()
            || self.attribute.is_some()
            || self.decorator.is_some()
            || self.parameter.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaintRuleSpec {
    pub rule_id: String,
    pub atom_id: String,
    pub kind: RuleKind,
    #[serde(rename = "match")]
    pub match_clauses: Vec<MatchClauseSpec>,
    #[serde(default)]
    pub confidence: f64,
    pub effect: Option<String>,
    pub cwe: Option<String>,
    pub owasp: Option<String>,
    pub severity: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub description: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SpecValidationError {
    #[error("rule '{rule_id}' has no match clauses")]
    NoMatchClauses { rule_id: String },
    #[error("rule '{rule_id}' clause {clause_index} has no matcher fields set")]
    EmptyMatchClause { rule_id: String, clause_index: usize },
}

impl TaintRuleSpec {
    pub fn validate(&self) -> Result<(), SpecValidationError> {
        if self.match_clauses.is_empty() {
            return Err(SpecValidationError::NoMatchClauses {
                rule_id: self.rule_id.clone(),
            });
        }
        for (i, clause) in self.match_clauses.iter().enumerate() {
            if !clause.is_valid() {
                return Err(SpecValidationError::EmptyMatchClause {
                    rule_id: self.rule_id.clone(),
                    clause_index: i,
                });
            }
        }
        Ok(())
    }
}

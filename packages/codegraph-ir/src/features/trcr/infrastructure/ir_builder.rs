//! Builds a `TaintRuleExecIR` from a validated `TaintRuleSpec` and one of
//! its match clauses.

use crate::features::trcr::domain::{
    CandidateClass, CandidatePlan, MatchClauseSpec, Predicate, TaintRuleExecIR, TaintRuleSpec,
};

#[derive(Debug, thiserror::Error)]
pub enum IRBuildError {
    #[error("clause {clause_index} of rule '{rule_id}' has no matcher fields")]
    EmptyClause { rule_id: String, clause_index: usize },
}

/// Base estimated cost per matcher kind, before the `reorder` pass sorts by
/// it. Exact-name matches are cheap; prefix and attribute matches cost more
/// (string scan vs. pointer/interned-string compare).
const COST_CALL_NAME: u32 = 1;
const COST_CALL_PREFIX: u32 = 3;
const COST_ATTRIBUTE: u32 = 2;
const COST_DECORATOR: u32 = 2;
const COST_PARAMETER: u32 = 1;

fn candidate_class_for(clause: &MatchClauseSpec) -> CandidateClass {
    if clause.call.is_some() {
        CandidateClass::Calls
    } else if clause.attribute.is_some() {
        CandidateClass::Expressions
    } else if clause.parameter.is_some() {
        CandidateClass::Reads
    } else {
        CandidateClass::Expressions
    }
}

fn predicates_for(clause: &MatchClauseSpec) -> Vec<Predicate> {
    let mut predicates = Vec::new();
    if let Some(ref call) = clause.call {
        if let Some(prefix) = call.strip_suffix('*') {
            predicates.push(Predicate::CallNamePrefix {
                prefix: prefix.to_string(),
                estimated_cost: COST_CALL_PREFIX,
            });
        } else {
            predicates.push(Predicate::CallNameEquals {
                name: call.clone(),
                estimated_cost: COST_CALL_NAME,
            });
        }
    }
    if let Some(ref attribute) = clause.attribute {
        predicates.push(Predicate::AttributeEquals {
            name: attribute.clone(),
            estimated_cost: COST_ATTRIBUTE,
        });
    }
    if let Some(ref decorator) = clause.decorator {
        predicates.push(Predicate::DecoratorEquals {
            name: decorator.clone(),
            estimated_cost: COST_DECORATOR,
        });
    }
    if let Some(ref parameter) = clause.parameter {
        predicates.push(Predicate::ParameterNameEquals {
            name: parameter.clone(),
            estimated_cost: COST_PARAMETER,
        });
    }
    predicates
}

/// Builds the exec IR for `spec`'s match clause at `clause_index`.
/// Specificity is the number of matcher fields present on the clause — a
/// rule matching on `call` + `decorator` together is more specific than one
/// matching `call` alone, and ranks higher when rules compete for the same
/// candidate.
pub fn build_exec_ir(
    spec: &TaintRuleSpec,
    clause: &MatchClauseSpec,
    clause_index: usize,
) -> Result<TaintRuleExecIR, IRBuildError> {
    if !clause.is_valid() {
        return Err(IRBuildError::EmptyClause {
            rule_id: spec.rule_id.clone(),
            clause_index,
        });
    }

    let predicate_chain = predicates_for(clause);
    let specificity = predicate_chain.len() as u32;

    Ok(TaintRuleExecIR {
        rule_id: spec.rule_id.clone(),
        clause_id: clause_index,
        atom_id: spec.atom_id.clone(),
        kind: spec.kind,
        candidate_plan: CandidatePlan {
            enumerate: candidate_class_for(clause),
        },
        predicate_chain,
        specificity,
        confidence: spec.confidence,
        effect: spec.effect.clone(),
        cwe: spec.cwe.clone(),
        owasp: spec.owasp.clone(),
        severity: spec.severity.clone(),
        tags: spec.tags.clone(),
        description: spec.description.clone(),
        trace: vec![format!("built from {}:clause:{}", spec.rule_id, clause_index)],
    })
}

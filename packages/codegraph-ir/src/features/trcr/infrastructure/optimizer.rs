//! RFC-037-style IR optimization passes, applied to a `TaintRuleExecIR`
//! before it's compiled to its final executable form. Each pass is
//! individually toggleable; the compiler records which ran via
//! `optimizer_passes` on the resulting `TaintRuleExecutableIR`.

use crate::features::trcr::domain::TaintRuleExecIR;

#[derive(Debug, Clone, Copy)]
pub struct OptimizerConfig {
    pub normalize: bool,
    pub prune: bool,
    pub reorder: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            normalize: true,
            prune: true,
            reorder: true,
        }
    }
}

/// Canonicalizes predicate order by a stable key (predicate variant
/// discriminant, then the name inside it) so that semantically identical
/// rules compile to byte-identical predicate chains regardless of source
/// YAML authoring order.
fn normalize(ir: &mut TaintRuleExecIR) {
    ir.predicate_chain.sort_by_key(|p| predicate_sort_key(p));
}

fn predicate_sort_key(p: &crate::features::trcr::domain::Predicate) -> (u8, String) {
    use crate::features::trcr::domain::Predicate::*;
    match p {
        CallNameEquals { name, .. } => (0, name.clone()),
        CallNamePrefix { prefix, .. } => (1, prefix.clone()),
        AttributeEquals { name, .. } => (2, name.clone()),
        DecoratorEquals { name, .. } => (3, name.clone()),
        ParameterNameEquals { name, .. } => (4, name.clone()),
    }
}

/// Stable sort by ascending estimated cost: cheap predicates run first so
/// short-circuit evaluation rejects unmatching candidates sooner.
fn reorder(ir: &mut TaintRuleExecIR) {
    ir.predicate_chain.sort_by_key(|p| p.estimated_cost());
}

/// Returns `true` iff every predicate in the chain is satisfiable — a rule
/// with an unsatisfiable predicate (e.g. an empty matcher string) can never
/// match and is dead.
fn is_live(ir: &TaintRuleExecIR) -> bool {
    ir.predicate_chain.iter().all(|p| p.is_satisfiable())
}

/// Applies the enabled passes, returning `None` if the `prune` pass
/// determines the rule is dead (its candidate set is provably empty).
pub fn optimize_ir(
    mut ir: TaintRuleExecIR,
    config: OptimizerConfig,
) -> (Option<TaintRuleExecIR>, Vec<String>) {
    let mut passes_run = Vec::new();

    if config.normalize {
        normalize(&mut ir);
        passes_run.push("normalize".to_string());
    }
    if config.prune {
        passes_run.push("prune".to_string());
        if !is_live(&ir) {
            return (None, passes_run);
        }
    }
    if config.reorder {
        reorder(&mut ir);
        passes_run.push("reorder".to_string());
    }

    (Some(ir), passes_run)
}

/// Finds predicate-chain prefixes shared by sibling clauses of the same
/// rule, for reporting/merging in the executor's candidate generation
/// (actual prefix sharing happens at match time; this identifies which
/// clause groups qualify).
pub fn shared_prefix_groups(clauses: &[TaintRuleExecIR]) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    'outer: for (i, clause) in clauses.iter().enumerate() {
        let first = match clause.predicate_chain.first() {
            Some(p) => predicate_sort_key(p),
            None => continue,
        };
        for group in groups.iter_mut() {
            let rep = &clauses[group[0]];
            if rep.rule_id == clause.rule_id {
                if let Some(rep_first) = rep.predicate_chain.first() {
                    if predicate_sort_key(rep_first) == first {
                        group.push(i);
                        continue 'outer;
                    }
                }
            }
        }
        groups.push(vec![i]);
    }
    groups.into_iter().filter(|g| g.len() > 1).collect()
}

//! TRCR executor (C9): matches `trcr`-compiled rules against an `IRDocument`
//! and runs taint propagation to produce `TaintFinding`s.
//!
//! Candidate generation and predicate evaluation are grounded on
//! `trcr::domain`'s `CandidatePlan`/`Predicate` shapes (C8's output); the
//! data-flow BFS (cycle handling via visited path tuples, self-loop
//! ignoring, parent-function-writes fallback) is grounded on
//! `variable_data_flow_tracker.py`; candidate extraction from CALLS/READS/
//! WRITES edges is grounded on `taint_analyzer_adapter.py`.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::features::ir_generation::domain::ir_document::IRDocument;
use crate::features::taint_analysis::domain::FunctionTaintSummary;
use crate::features::taint_analysis::infrastructure::interprocedural::CallContext;
use crate::features::trcr::domain::{CandidateClass, Predicate, RuleKind, TaintRuleExecutableIR};
use crate::shared::models::{EdgeKind, Node, NodeKind};

/// Hard bound: a query that asks for more than this is truncated, never
/// exceeded (spec'd two-tier bound: 10k paths / 100 depth hard).
pub const HARD_MAX_PATHS: usize = 10_000;
pub const HARD_MAX_DEPTH: usize = 100;
/// Recommended default, used when a caller sets no `max_paths`/`max_depth`
/// constraint of its own.
pub const RECOMMENDED_MAX_PATHS: usize = 1_000;
pub const RECOMMENDED_MAX_DEPTH: usize = 50;

/// How deep a call chain is followed with full expansion before the
/// executor degrades to consulting a callee's `FunctionTaintSummary` only.
const DEFAULT_MAX_CALL_CONTEXT_DEPTH: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error("unknown constraint key: {0}")]
    UnknownConstraintKey(String),
    #[error("constraint '{key}' has the wrong type")]
    InvalidConstraintValue { key: String },
}

/// Parsed, validated form of the constraint map described in spec.md §4.9.
/// Unknown keys are rejected at parse time rather than silently ignored.
#[derive(Debug, Clone, Default)]
pub struct TaintQueryConstraints {
    pub max_length: Option<usize>,
    pub min_confidence: Option<f64>,
    pub require_sanitizer: Option<bool>,
    pub max_paths: Option<usize>,
    pub max_depth: Option<usize>,
}

impl TaintQueryConstraints {
    pub fn parse(raw: &HashMap<String, serde_json::Value>) -> Result<Self, ExecutorError> {
        let mut out = Self::default();
        for (key, value) in raw {
            match key.as_str() {
                "max_length" => out.max_length = Some(as_usize(key, value)?),
                "min_confidence" => out.min_confidence = Some(as_f64(key, value)?),
                "require_sanitizer" => out.require_sanitizer = Some(as_bool(key, value)?),
                "max_paths" => out.max_paths = Some(as_usize(key, value)?),
                "max_depth" => out.max_depth = Some(as_usize(key, value)?),
                other => return Err(ExecutorError::UnknownConstraintKey(other.to_string())),
            }
        }
        Ok(out)
    }

    /// Resolves the effective path/depth bounds, clamped to the hard tier
    /// regardless of what the caller asked for.
    fn effective_bounds(&self) -> (usize, usize) {
        let max_paths = self
            .max_paths
            .unwrap_or(RECOMMENDED_MAX_PATHS)
            .min(HARD_MAX_PATHS);
        let max_depth = self
            .max_depth
            .unwrap_or(RECOMMENDED_MAX_DEPTH)
            .min(HARD_MAX_DEPTH);
        (max_paths, max_depth)
    }
}

fn as_usize(key: &str, value: &serde_json::Value) -> Result<usize, ExecutorError> {
    value
        .as_u64()
        .map(|n| n as usize)
        .ok_or_else(|| ExecutorError::InvalidConstraintValue { key: key.to_string() })
}

fn as_f64(key: &str, value: &serde_json::Value) -> Result<f64, ExecutorError> {
    value
        .as_f64()
        .ok_or_else(|| ExecutorError::InvalidConstraintValue { key: key.to_string() })
}

fn as_bool(key: &str, value: &serde_json::Value) -> Result<bool, ExecutorError> {
    value
        .as_bool()
        .ok_or_else(|| ExecutorError::InvalidConstraintValue { key: key.to_string() })
}

/// One compiled rule's match against one IR node.
#[derive(Debug, Clone)]
pub struct MatchedNode {
    pub node_id: String,
    pub node_name: String,
    pub compiled_id: String,
    pub rule_kind: RuleKind,
    pub confidence: f64,
    pub specificity: u32,
}

/// A witnessed source-to-sink flow, the final evidence C9 emits.
#[derive(Debug, Clone)]
pub struct TaintFinding {
    pub source: String,
    pub sink: String,
    pub path: Vec<String>,
    pub is_sanitized: bool,
    pub confidence: f64,
    pub cwe: Option<String>,
    pub owasp: Option<String>,
    pub severity: Option<String>,
}

fn decorators_of(node: &Node) -> Vec<String> {
    node.attributes
        .as_ref()
        .and_then(|v| v.get("decorators"))
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|x| x.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn matches_predicate(predicate: &Predicate, node: &Node) -> bool {
    let name = node.name.as_deref().unwrap_or("");
    match predicate {
        Predicate::CallNameEquals { name: expected, .. } => {
            name == expected || node.fqn == *expected || node.fqn.ends_with(&format!(".{expected}"))
        }
        Predicate::CallNamePrefix { prefix, .. } => {
            node.fqn.starts_with(prefix.as_str()) || name.starts_with(prefix.as_str())
        }
        Predicate::AttributeEquals { name: expected, .. } => {
            node.fqn.ends_with(&format!(".{expected}")) || name == expected
        }
        Predicate::DecoratorEquals { name: expected, .. } => {
            decorators_of(node).iter().any(|d| d == expected)
        }
        Predicate::ParameterNameEquals { name: expected, .. } => name == expected,
    }
}

fn candidate_pool<'a>(ir: &'a IRDocument, class: CandidateClass) -> Vec<&'a Node> {
    match class {
        CandidateClass::Calls => ir
            .nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Expression | NodeKind::Function | NodeKind::Method))
            .collect(),
        CandidateClass::Expressions => ir
            .nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Expression | NodeKind::Variable | NodeKind::Field))
            .collect(),
        CandidateClass::Reads => {
            let targets: HashSet<&str> = ir
                .edges
                .iter()
                .filter(|e| e.kind == EdgeKind::Reads)
                .map(|e| e.target_id.as_str())
                .collect();
            ir.nodes.iter().filter(|n| targets.contains(n.id.as_str())).collect()
        }
        CandidateClass::Writes => {
            let targets: HashSet<&str> = ir
                .edges
                .iter()
                .filter(|e| e.kind == EdgeKind::Writes)
                .map(|e| e.target_id.as_str())
                .collect();
            ir.nodes.iter().filter(|n| targets.contains(n.id.as_str())).collect()
        }
    }
}

/// Matches every compiled rule's candidate plan + predicate chain against
/// `ir`, short-circuiting on the first failing predicate per candidate.
pub fn match_rules(rules: &[TaintRuleExecutableIR], ir: &IRDocument) -> Vec<MatchedNode> {
    let mut matched = Vec::new();
    for rule in rules {
        let pool = candidate_pool(ir, rule.generator_exec.candidate_plan.enumerate);
        for node in pool {
            let mut is_match = true;
            for predicate in &rule.predicate_exec.predicates {
                if !matches_predicate(predicate, node) {
                    is_match = false;
                    if rule.predicate_exec.short_circuit {
                        break;
                    }
                }
            }
            if is_match {
                matched.push(MatchedNode {
                    node_id: node.id.clone(),
                    node_name: node.name.clone().unwrap_or_else(|| node.fqn.clone()),
                    compiled_id: rule.compiled_id.clone(),
                    rule_kind: rule.kind,
                    confidence: rule.confidence,
                    specificity: rule.specificity,
                });
            }
        }
    }
    matched
}

struct EdgeIndex<'a> {
    writes_by_source: HashMap<&'a str, Vec<&'a str>>,
    reads_by_target: HashMap<&'a str, Vec<&'a str>>,
    callees_by_caller: HashMap<&'a str, Vec<&'a str>>,
    callers_by_callee: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> EdgeIndex<'a> {
    fn build(ir: &'a IRDocument) -> Self {
        let mut writes_by_source: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut reads_by_target: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut callees_by_caller: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut callers_by_callee: HashMap<&str, Vec<&str>> = HashMap::new();

        for edge in &ir.edges {
            match edge.kind {
                EdgeKind::Writes => writes_by_source
                    .entry(edge.source_id.as_str())
                    .or_default()
                    .push(edge.target_id.as_str()),
                EdgeKind::Reads => reads_by_target
                    .entry(edge.target_id.as_str())
                    .or_default()
                    .push(edge.source_id.as_str()),
                EdgeKind::Calls => {
                    callees_by_caller
                        .entry(edge.source_id.as_str())
                        .or_default()
                        .push(edge.target_id.as_str());
                    callers_by_callee
                        .entry(edge.target_id.as_str())
                        .or_default()
                        .push(edge.source_id.as_str());
                }
                _ => {}
            }
        }

        Self {
            writes_by_source,
            reads_by_target,
            callees_by_caller,
            callers_by_callee,
        }
    }
}

/// BFS over WRITES/READS/CALLS edges from `source_id` to `sink_id`, per
/// spec.md §4.9's cycle-handling rule: path tuples are interned into a
/// visited set, self-loops are ignored, and a read-site additionally tries
/// its writing parent function's writes as a fallback for parameter-to-call
/// flow. `call_context` bounds how many CALLS hops are followed with full
/// expansion before `summaries` is consulted instead.
#[allow(clippy::too_many_arguments)]
fn find_data_flow_paths(
    index: &EdgeIndex<'_>,
    source_id: &str,
    sink_id: &str,
    max_depth: usize,
    max_paths: usize,
    summaries: &HashMap<String, FunctionTaintSummary>,
    max_call_context_depth: usize,
) -> Vec<Vec<String>> {
    let mut paths = Vec::new();
    let mut visited: HashSet<Vec<String>> = HashSet::new();
    let mut queue: VecDeque<(String, Vec<String>, usize, CallContext)> = VecDeque::new();
    queue.push_back((
        source_id.to_string(),
        vec![source_id.to_string()],
        0,
        CallContext::new(),
    ));

    while let Some((current, path, depth, call_ctx)) = queue.pop_front() {
        if paths.len() >= max_paths {
            break;
        }
        if depth > max_depth {
            continue;
        }
        if !visited.insert(path.clone()) {
            continue;
        }

        if current == sink_id {
            paths.push(path);
            continue;
        }

        let mut push = |target: &str, extra_depth: usize, extra_hop: Option<&str>, ctx: CallContext| {
            if target == current {
                return; // self-loop
            }
            if path.contains(&target.to_string()) {
                return;
            }
            let mut new_path = path.clone();
            if let Some(hop) = extra_hop {
                new_path.push(hop.to_string());
            }
            new_path.push(target.to_string());
            queue.push_back((target.to_string(), new_path, depth + extra_depth, ctx));
        };

        if let Some(targets) = index.writes_by_source.get(current.as_str()) {
            for t in targets {
                push(t, 1, None, call_ctx.clone());
            }
        }

        // Parent-function-writes fallback: who calls `current`, and what
        // does that parent write directly.
        if let Some(parents) = index.callers_by_callee.get(current.as_str()) {
            for parent in parents {
                if let Some(targets) = index.writes_by_source.get(*parent) {
                    for t in targets {
                        push(t, 1, None, call_ctx.clone());
                    }
                }
            }
        }

        if let Some(readers) = index.reads_by_target.get(current.as_str()) {
            for reader in readers {
                push(reader, 1, None, call_ctx.clone());

                if call_ctx.depth >= max_call_context_depth {
                    // Beyond the context-sensitive depth: consult the
                    // reader's summary instead of expanding its callees.
                    if let Some(summary) = summaries.get(*reader) {
                        if summary.tainted_return && !summary.sanitizes {
                            if let Some(callees) = index.callees_by_caller.get(*reader) {
                                for callee in callees {
                                    push(callee, 2, Some(reader), call_ctx.with_call((*reader).to_string()));
                                }
                            }
                        }
                    }
                    continue;
                }

                if let Some(callees) = index.callees_by_caller.get(*reader) {
                    for callee in callees {
                        push(callee, 2, Some(reader), call_ctx.with_call((*reader).to_string()));
                    }
                }
                if let Some(targets) = index.writes_by_source.get(*reader) {
                    for t in targets {
                        push(t, 2, Some(reader), call_ctx.clone());
                    }
                }
            }
        }
    }

    paths
}

fn resolve_node_name(ir: &IRDocument, node_id: &str) -> String {
    ir.nodes
        .iter()
        .find(|n| n.id == node_id)
        .map(|n| n.name.clone().unwrap_or_else(|| n.fqn.clone()))
        .unwrap_or_else(|| node_id.to_string())
}

/// Matches rules against `ir`, then runs taint propagation between every
/// matched source and sink, applying `constraints`.
pub fn execute(
    rules: &[TaintRuleExecutableIR],
    ir: &IRDocument,
    constraints: &HashMap<String, serde_json::Value>,
    summaries: &HashMap<String, FunctionTaintSummary>,
) -> Result<Vec<TaintFinding>, ExecutorError> {
    let constraints = TaintQueryConstraints::parse(constraints)?;
    let (max_paths, max_depth) = constraints.effective_bounds();

    let matched = match_rules(rules, ir);
    let sources: Vec<&MatchedNode> = matched.iter().filter(|m| m.rule_kind == RuleKind::Source).collect();
    let sinks: Vec<&MatchedNode> = matched.iter().filter(|m| m.rule_kind == RuleKind::Sink).collect();
    let sanitizer_ids: HashSet<&str> = matched
        .iter()
        .filter(|m| m.rule_kind == RuleKind::Sanitizer)
        .map(|m| m.node_id.as_str())
        .collect();

    if sources.is_empty() || sinks.is_empty() {
        return Ok(Vec::new());
    }

    let index = EdgeIndex::build(ir);
    let mut findings = Vec::new();

    'pairs: for source in &sources {
        for sink in &sinks {
            if findings.len() >= max_paths {
                break 'pairs;
            }

            let raw_paths = find_data_flow_paths(
                &index,
                &source.node_id,
                &sink.node_id,
                max_depth,
                max_paths - findings.len(),
                summaries,
                DEFAULT_MAX_CALL_CONTEXT_DEPTH,
            );

            for path in raw_paths {
                if let Some(max_length) = constraints.max_length {
                    if path.len() > max_length {
                        continue;
                    }
                }

                let is_sanitized = path.iter().any(|id| sanitizer_ids.contains(id.as_str()));
                if constraints.require_sanitizer == Some(true) && !is_sanitized {
                    continue;
                }

                let length_discount = 1.0 / (1.0 + (path.len().saturating_sub(2) as f64) * 0.05);
                let specificity_avg = (source.specificity + sink.specificity) as f64 / 2.0;
                let specificity_boost = 1.0 + 0.05 * specificity_avg.min(4.0);
                let confidence = ((source.confidence + sink.confidence) / 2.0 * length_discount * specificity_boost)
                    .clamp(0.0, 1.0);

                if let Some(min_confidence) = constraints.min_confidence {
                    if confidence < min_confidence {
                        continue;
                    }
                }

                let path_names: Vec<String> = path.iter().map(|id| resolve_node_name(ir, id)).collect();

                findings.push(TaintFinding {
                    source: source.node_name.clone(),
                    sink: sink.node_name.clone(),
                    path: path_names,
                    is_sanitized,
                    confidence,
                    cwe: None,
                    owasp: None,
                    severity: None,
                });
            }
        }
    }

    findings.truncate(max_paths);
    Ok(findings)
}

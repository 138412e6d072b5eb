//! Sparse Conditional Constant Propagation over an SSA graph.
//!
//! Three-level lattice (TOP unknown, CONSTANT, BOTTOM over-defined), solved
//! with dual worklists: an SSA-value worklist (revisit every use when a
//! definition's value changes) and a CFG-edge worklist (mark an edge
//! executable, which unblocks the phi operands and statements in the block
//! it reaches). Boolean `and`/`or` short-circuit on constant operands.
//! Per-SSA-variable updates widen to BOTTOM after `MAX_UPDATES_PER_VAR`
//! updates so a value oscillating across loop iterations can't keep the
//! solver from reaching a fixpoint.
//!
//! Grounded in `tests/unit/dfg/constant/test_solver.py`'s `SparseSolver`:
//! same widening threshold (10), same short-circuit truth table, same
//! value/edge worklist split.

use ahash::{AHashMap as HashMap, AHashSet as HashSet};
use serde_json::Value as JsonValue;

use super::dominance::CFGView;
use crate::features::ssa::domain::{PhiNode, SSAGraph};

/// Key identifying one SSA value (a variable name at one version).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SSAValueId {
    pub name: String,
    pub version: usize,
}

impl SSAValueId {
    pub fn new(name: impl Into<String>, version: usize) -> Self {
        Self { name: name.into(), version }
    }
}

/// The three-level constant lattice.
#[derive(Debug, Clone, PartialEq)]
pub enum LatticeValue {
    /// Not yet known to be anything (lattice top).
    Top,
    /// Known to always hold this exact value.
    Constant(JsonValue),
    /// Known to take more than one value, or an undecidable expression
    /// (lattice bottom).
    Bottom,
}

impl LatticeValue {
    pub fn is_top(&self) -> bool {
        matches!(self, LatticeValue::Top)
    }

    pub fn is_bottom(&self) -> bool {
        matches!(self, LatticeValue::Bottom)
    }

    /// Meet (greatest lower bound): TOP meet x = x; equal constants meet to
    /// themselves; anything else meets to BOTTOM.
    pub fn meet(&self, other: &LatticeValue) -> LatticeValue {
        match (self, other) {
            (LatticeValue::Top, x) | (x, LatticeValue::Top) => x.clone(),
            (LatticeValue::Constant(a), LatticeValue::Constant(b)) if a == b => {
                LatticeValue::Constant(a.clone())
            }
            _ => LatticeValue::Bottom,
        }
    }
}

fn truthy(v: &JsonValue) -> bool {
    match v {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(a) => !a.is_empty(),
        JsonValue::Object(o) => !o.is_empty(),
    }
}

/// A value-producing expression feeding one SSA definition. This crate's
/// CFG carries statements as opaque source text, so the solver is built
/// against this small explicit IR rather than re-deriving one from strings;
/// callers that have a real expression tree for a statement lower it into
/// this shape before handing it to `solve`.
#[derive(Debug, Clone)]
pub enum Expr {
    Const(JsonValue),
    Var(SSAValueId),
    BinOp { op: String, lhs: Box<Expr>, rhs: Box<Expr> },
    /// `and`/`or`, left to right, short-circuiting per `eval_bool_op`.
    BoolOp { op: String, operands: Vec<Expr> },
    /// A definition the solver can't interpret (e.g. a call): always BOTTOM.
    Unknown,
}

pub struct SparseSolver {
    pub max_updates_per_var: usize,
    ssa_values: HashMap<SSAValueId, LatticeValue>,
    update_counts: HashMap<SSAValueId, usize>,
    executable_edges: HashSet<(String, String)>,
    ssa_worklist: Vec<SSAValueId>,
    cfg_worklist: Vec<(String, String)>,
}

impl Default for SparseSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SparseSolver {
    pub fn new() -> Self {
        Self {
            max_updates_per_var: 10,
            ssa_values: HashMap::new(),
            update_counts: HashMap::new(),
            executable_edges: HashSet::new(),
            ssa_worklist: Vec::new(),
            cfg_worklist: Vec::new(),
        }
    }

    pub fn value_of(&self, var: &SSAValueId) -> LatticeValue {
        self.ssa_values.get(var).cloned().unwrap_or(LatticeValue::Top)
    }

    /// `and`/`or` short-circuit evaluation. Mirrors Python truthiness:
    /// `and` returns the first falsy operand or the last operand if all are
    /// truthy; `or` returns the first truthy operand or the last operand if
    /// all are falsy. Any BOTTOM or TOP operand poisons the result to
    /// BOTTOM/TOP respectively unless short-circuited first. An empty
    /// operand list is TOP; an unrecognized operator is BOTTOM.
    fn eval_bool_op(&self, op: &str, values: &[LatticeValue]) -> LatticeValue {
        if values.is_empty() {
            return LatticeValue::Top;
        }
        match op {
            "and" => {
                let mut last = &values[0];
                for v in values {
                    match v {
                        LatticeValue::Bottom => return LatticeValue::Bottom,
                        LatticeValue::Top => return LatticeValue::Top,
                        LatticeValue::Constant(c) => {
                            if !truthy(c) {
                                return LatticeValue::Constant(c.clone());
                            }
                        }
                    }
                    last = v;
                }
                last.clone()
            }
            "or" => {
                let mut last = &values[0];
                for v in values {
                    match v {
                        LatticeValue::Bottom => return LatticeValue::Bottom,
                        LatticeValue::Top => return LatticeValue::Top,
                        LatticeValue::Constant(c) => {
                            if truthy(c) {
                                return LatticeValue::Constant(c.clone());
                            }
                        }
                    }
                    last = v;
                }
                last.clone()
            }
            _ => LatticeValue::Bottom,
        }
    }

    /// Join `new` into `var`'s current value (meet in the lattice's partial
    /// order, i.e. moves toward BOTTOM), widening to BOTTOM once `var` has
    /// been updated more than `max_updates_per_var` times. Returns whether
    /// the stored value changed.
    fn update_value(&mut self, var: &SSAValueId, new: LatticeValue) -> bool {
        let current = self.ssa_values.get(var).cloned().unwrap_or(LatticeValue::Top);
        if current.is_bottom() {
            *self.update_counts.entry(var.clone()).or_insert(0) += 1;
            return false;
        }

        let count = self.update_counts.entry(var.clone()).or_insert(0);
        *count += 1;
        let widened = *count > self.max_updates_per_var;

        let joined = if widened { LatticeValue::Bottom } else { current.meet(&new) };

        if joined == current {
            return false;
        }
        self.ssa_values.insert(var.clone(), joined);
        true
    }

    fn get_successors(block_id: &str, cfg: &CFGView) -> Vec<String> {
        cfg.succs.get(block_id).cloned().unwrap_or_default()
    }

    fn get_predecessors(block_id: &str, cfg: &CFGView) -> Vec<String> {
        cfg.preds.get(block_id).cloned().unwrap_or_default()
    }

    fn eval_expr(&self, expr: &Expr) -> LatticeValue {
        match expr {
            Expr::Const(v) => LatticeValue::Constant(v.clone()),
            Expr::Var(id) => self.value_of(id),
            Expr::BoolOp { op, operands } => {
                let values: Vec<LatticeValue> = operands.iter().map(|o| self.eval_expr(o)).collect();
                self.eval_bool_op(op, &values)
            }
            Expr::BinOp { op, lhs, rhs } => {
                let l = self.eval_expr(lhs);
                let r = self.eval_expr(rhs);
                eval_arith(op, &l, &r)
            }
            Expr::Unknown => LatticeValue::Bottom,
        }
    }

    /// Run the fixpoint to completion. `defs` maps each non-phi SSA
    /// definition to the expression that produces it (phi definitions are
    /// handled directly from `graph.phi_nodes`). Blocks with no recorded
    /// definition are treated as not producing a tracked value.
    pub fn solve(
        &mut self,
        cfg: &CFGView,
        graph: &SSAGraph,
        defs: &HashMap<SSAValueId, Expr>,
    ) -> HashMap<SSAValueId, LatticeValue> {
        self.cfg_worklist.push((cfg.entry.clone(), cfg.entry.clone()));
        self.executable_edges.insert((cfg.entry.clone(), cfg.entry.clone()));

        let phi_by_block: HashMap<&str, Vec<&PhiNode>> = {
            let mut m: HashMap<&str, Vec<&PhiNode>> = HashMap::new();
            for var in &graph.variables {
                m.entry(var.def_block_id.as_str()).or_default();
            }
            for phi in &graph.phi_nodes {
                // def_block_id of a phi's target version is wherever the
                // variable with that (name, version) was recorded.
                if let Some(v) = graph
                    .variables
                    .iter()
                    .find(|v| v.name == phi.variable && v.version == phi.version)
                {
                    m.entry(v.def_block_id.as_str()).or_default().push(phi);
                }
            }
            m
        };

        let mut guard = 0usize;
        let max_iterations = cfg.block_ids.len() * (defs.len() + graph.phi_nodes.len() + 1) + 64;

        while (!self.ssa_worklist.is_empty() || !self.cfg_worklist.is_empty()) && guard < max_iterations {
            guard += 1;

            if let Some((from, to)) = self.cfg_worklist.pop() {
                if self.executable_edges.insert((from.clone(), to.clone())) || from == to {
                    self.process_block(&to, cfg, graph, defs, &phi_by_block);
                }
                continue;
            }

            if let Some(var) = self.ssa_worklist.pop() {
                if let Some(block_id) = graph
                    .variables
                    .iter()
                    .find(|v| v.name == var.name && v.version == var.version)
                    .map(|v| v.def_block_id.clone())
                {
                    for succ in Self::get_successors(&block_id, cfg) {
                        self.cfg_worklist.push((block_id.clone(), succ));
                    }
                }
            }
        }

        self.ssa_values.clone()
    }

    fn process_block(
        &mut self,
        block_id: &str,
        cfg: &CFGView,
        graph: &SSAGraph,
        defs: &HashMap<SSAValueId, Expr>,
        phi_by_block: &HashMap<&str, Vec<&PhiNode>>,
    ) {
        if let Some(phis) = phi_by_block.get(block_id) {
            for phi in phis {
                let preds = Self::get_predecessors(block_id, cfg);
                let mut meet = LatticeValue::Top;
                for (pred_block, pred_version) in &phi.predecessors {
                    if !preds.contains(pred_block) {
                        continue;
                    }
                    if !self.executable_edges.contains(&(pred_block.clone(), block_id.to_string())) {
                        continue;
                    }
                    let pred_id = SSAValueId::new(phi.variable.clone(), *pred_version);
                    meet = meet.meet(&self.value_of(&pred_id));
                }
                let target = SSAValueId::new(phi.variable.clone(), phi.version);
                if self.update_value(&target, meet) {
                    self.ssa_worklist.push(target);
                }
            }
        }

        for var in &graph.variables {
            if var.def_block_id != block_id {
                continue;
            }
            let id = SSAValueId::new(var.name.clone(), var.version);
            let Some(expr) = defs.get(&id) else { continue };
            let new_value = self.eval_expr(expr);
            if self.update_value(&id, new_value) {
                self.ssa_worklist.push(id);
            }
        }

        // An unconditional fallthrough always makes its single successor
        // executable; a branch is conservatively treated the same way here
        // since this solver doesn't special-case condition evaluation to
        // prune edges (that refinement is left for a branch-aware follow-up).
        for succ in Self::get_successors(block_id, cfg) {
            self.cfg_worklist.push((block_id.to_string(), succ));
        }
    }
}

fn eval_arith(op: &str, lhs: &LatticeValue, rhs: &LatticeValue) -> LatticeValue {
    match (lhs, rhs) {
        (LatticeValue::Bottom, _) | (_, LatticeValue::Bottom) => LatticeValue::Bottom,
        (LatticeValue::Top, _) | (_, LatticeValue::Top) => LatticeValue::Top,
        (LatticeValue::Constant(a), LatticeValue::Constant(b)) => {
            match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => {
                    let result = match op {
                        "+" => Some(x + y),
                        "-" => Some(x - y),
                        "*" => Some(x * y),
                        "/" if y != 0.0 => Some(x / y),
                        _ => None,
                    };
                    match result {
                        Some(r) => serde_json::Number::from_f64(r)
                            .map(|n| LatticeValue::Constant(JsonValue::Number(n)))
                            .unwrap_or(LatticeValue::Bottom),
                        None => LatticeValue::Bottom,
                    }
                }
                _ => LatticeValue::Bottom,
            }
        }
    }
}

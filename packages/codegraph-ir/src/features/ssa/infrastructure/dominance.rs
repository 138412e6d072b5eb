//! Dominator tree and dominance frontier over a CFG.
//!
//! Immediate dominators are computed with the iterative Cooper-Harvey-Kennedy
//! algorithm (reverse postorder, fixpoint over `idom` using a "nearest common
//! ancestor in the partially-built dominator tree" intersect), then the
//! dominance frontier is derived from the finished `idom` map. Both are
//! consumed by `cytron_ssa_builder`'s phi-placement and by `sccp`'s
//! executable-edge tracking.
//!
//! Reference: Cooper, Harvey, Kennedy, "A Simple, Fast Dominance Algorithm"
//! (2001).

use ahash::{AHashMap as HashMap, AHashSet as HashSet};

use crate::shared::models::{CFGBlock, CFGEdge};

/// Predecessor/successor adjacency derived once from a block+edge list and
/// shared by dominance computation, phi-placement, and the SCCP solver.
pub struct CFGView {
    pub entry: String,
    pub block_ids: Vec<String>,
    pub preds: HashMap<String, Vec<String>>,
    pub succs: HashMap<String, Vec<String>>,
}

impl CFGView {
    pub fn new(blocks: &[CFGBlock], edges: &[CFGEdge], entry: &str) -> Self {
        let mut preds: HashMap<String, Vec<String>> = HashMap::new();
        let mut succs: HashMap<String, Vec<String>> = HashMap::new();
        let block_ids: Vec<String> = blocks.iter().map(|b| b.id.clone()).collect();

        for id in &block_ids {
            preds.entry(id.clone()).or_default();
            succs.entry(id.clone()).or_default();
        }
        for edge in edges {
            if !preds.contains_key(&edge.target_block_id) || !succs.contains_key(&edge.source_block_id) {
                continue;
            }
            preds
                .entry(edge.target_block_id.clone())
                .or_default()
                .push(edge.source_block_id.clone());
            succs
                .entry(edge.source_block_id.clone())
                .or_default()
                .push(edge.target_block_id.clone());
        }

        Self {
            entry: entry.to_string(),
            block_ids,
            preds,
            succs,
        }
    }

    fn reverse_postorder(&self) -> Vec<String> {
        let mut visited = HashSet::new();
        let mut postorder = Vec::new();
        let mut stack = vec![(self.entry.clone(), 0usize)];
        // Iterative postorder DFS to avoid recursion limits on deep CFGs.
        while let Some((node, child_idx)) = stack.pop() {
            if child_idx == 0 {
                if visited.contains(&node) {
                    continue;
                }
                visited.insert(node.clone());
            }
            let children = self.succs.get(&node).cloned().unwrap_or_default();
            if child_idx < children.len() {
                stack.push((node.clone(), child_idx + 1));
                let next = &children[child_idx];
                if !visited.contains(next) {
                    stack.push((next.clone(), 0));
                }
            } else {
                postorder.push(node);
            }
        }
        postorder.reverse();
        postorder
    }
}

/// Immediate dominator tree, keyed by block id. The entry block has no
/// `idom` entry (it dominates itself, and nothing dominates it).
#[derive(Debug, Default, Clone)]
pub struct DominatorTree {
    pub idom: HashMap<String, String>,
}

impl DominatorTree {
    /// Does `a` dominate `b` (reflexively)?
    pub fn dominates(&self, a: &str, b: &str) -> bool {
        if a == b {
            return true;
        }
        let mut cur = b.to_string();
        while let Some(parent) = self.idom.get(&cur) {
            if parent == a {
                return true;
            }
            cur = parent.clone();
        }
        false
    }
}

/// Compute immediate dominators with the iterative CHK fixpoint.
///
/// Unreachable blocks (not reachable from `entry` via `succs`) are dropped
/// silently from the result, matching how an unreachable CFG region can
/// never receive a phi or a dominating definition.
pub fn compute_dominators(cfg: &CFGView) -> DominatorTree {
    let rpo = cfg.reverse_postorder();
    if rpo.is_empty() {
        return DominatorTree::default();
    }
    let rpo_index: HashMap<String, usize> = rpo
        .iter()
        .enumerate()
        .map(|(i, id)| (id.clone(), i))
        .collect();

    let mut idom: HashMap<String, String> = HashMap::new();
    idom.insert(rpo[0].clone(), rpo[0].clone());

    let mut changed = true;
    while changed {
        changed = false;
        for node in rpo.iter().skip(1) {
            let preds: Vec<&String> = cfg
                .preds
                .get(node)
                .into_iter()
                .flatten()
                .filter(|p| idom.contains_key(*p))
                .collect();
            let Some(&first_processed) = preds.first() else {
                continue;
            };
            let mut new_idom = first_processed.clone();
            for pred in preds.iter().skip(1) {
                if idom.contains_key(pred.as_str()) {
                    new_idom = intersect(&new_idom, pred, &idom, &rpo_index);
                }
            }
            if idom.get(node) != Some(&new_idom) {
                idom.insert(node.clone(), new_idom);
                changed = true;
            }
        }
    }

    // The entry block's self-loop idom entry is a bookkeeping artifact, not
    // a real dominance relation; drop it so `dominates`/frontier code never
    // needs to special-case it.
    idom.remove(&rpo[0]);

    DominatorTree { idom }
}

fn intersect(
    a: &str,
    b: &str,
    idom: &HashMap<String, String>,
    rpo_index: &HashMap<String, usize>,
) -> String {
    let mut finger1 = a.to_string();
    let mut finger2 = b.to_string();
    while finger1 != finger2 {
        while rpo_index[&finger1] > rpo_index[&finger2] {
            finger1 = idom[&finger1].clone();
        }
        while rpo_index[&finger2] > rpo_index[&finger1] {
            finger2 = idom[&finger2].clone();
        }
    }
    finger1
}

/// Dominance frontier: for every block `b`, the set of blocks `y` such that
/// `b` dominates a predecessor of `y` but does not strictly dominate `y`.
pub fn dominance_frontier(
    cfg: &CFGView,
    dom: &DominatorTree,
) -> HashMap<String, HashSet<String>> {
    let mut df: HashMap<String, HashSet<String>> = HashMap::new();
    for id in &cfg.block_ids {
        df.entry(id.clone()).or_default();
    }

    for node in &cfg.block_ids {
        let preds = cfg.preds.get(node).cloned().unwrap_or_default();
        if preds.len() < 2 {
            continue;
        }
        let idom_node = dom.idom.get(node).cloned().unwrap_or_else(|| node.clone());
        for pred in preds {
            if !dom.idom.contains_key(&pred) && pred != cfg.entry {
                continue; // unreachable predecessor
            }
            let mut runner = pred;
            while runner != idom_node {
                df.entry(runner.clone()).or_default().insert(node.clone());
                match dom.idom.get(&runner) {
                    Some(next) if next != &runner => runner = next.clone(),
                    _ => break,
                }
            }
        }
    }

    df
}

/// Iterated dominance frontier of a set of definition blocks: the standard
/// fixpoint used to place phi nodes for a variable defined in `defs`.
pub fn iterated_dominance_frontier(
    defs: &HashSet<String>,
    df: &HashMap<String, HashSet<String>>,
) -> HashSet<String> {
    let mut result = HashSet::new();
    let mut worklist: Vec<String> = defs.iter().cloned().collect();
    let mut in_worklist: HashSet<String> = defs.clone();

    while let Some(node) = worklist.pop() {
        if let Some(frontier) = df.get(&node) {
            for y in frontier {
                if result.insert(y.clone()) && !in_worklist.contains(y) {
                    in_worklist.insert(y.clone());
                    worklist.push(y.clone());
                }
            }
        }
    }

    result
}

//! SSA infrastructure
//!
//! `cytron_ssa_builder` (dominator tree -> dominance frontier -> Cytron
//! phi-placement -> preorder renaming) is the primary builder, operating
//! directly on `shared::models::cfg::{CFGBlock, CFGEdge}`. `braun_ssa_builder`
//! (on-the-fly SSA with block sealing) and the naive CFG-structure-ignorant
//! `ssa` module are kept as reference implementations, not wired into any
//! production call path.

pub mod cytron_ssa_builder;
pub mod dominance;
pub mod sccp;
pub mod ssa;

// Reference implementations, not the primary construction path.
pub mod braun_ssa_builder;
pub mod cfg_adapter;
pub mod errors;
pub mod phi_optimizer;
pub mod sparse_ssa_builder;

pub use cytron_ssa_builder::build_ssa_from_cfg;
pub use dominance::{
    compute_dominators, dominance_frontier, iterated_dominance_frontier, CFGView, DominatorTree,
};
pub use errors::*;
pub use sccp::{Expr, LatticeValue, SSAValueId, SparseSolver};

// Reference-only re-exports (not shadowing the domain SSAGraph/SSAVariable/
// PhiNode types, which `cytron_ssa_builder` returns).
pub use braun_ssa_builder::{BraunSSABuilder, CFGProvider};
pub use cfg_adapter::BFGCFGAdapter;
pub use phi_optimizer::{PhiOptimizer, PhiOptimizerStats};
pub use sparse_ssa_builder::SparseSSABuilder;

//! SSA + DFG construction (C5).
//!
//! Immediate dominators are computed with the iterative Cooper-Harvey-Kennedy
//! algorithm, the dominance frontier is derived from them, phi nodes are
//! placed at the iterated dominance frontier of each variable's definitions
//! (Cytron et al.), and versions are assigned by a preorder walk of the
//! dominator tree. See `infrastructure::cytron_ssa_builder` for the
//! implementation and `infrastructure::sccp` for the sparse conditional
//! constant-propagation lattice built on top of it.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::BuildSSAUseCase;
pub use domain::{PhiNode, SSAGraph, SSAVariable};
pub use infrastructure::{
    build_ssa_from_cfg, Expr, LatticeValue, SSAError, SSAResult, SSAValueId, SparseSolver,
};
pub use ports::SSABuilder;

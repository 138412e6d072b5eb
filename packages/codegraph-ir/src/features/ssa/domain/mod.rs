pub mod ssa_graph;

pub use ssa_graph::{PhiNode, SSAGraph, SSAVariable};

//! Data Flow Graph (DFG) feature
//!
//! READS/WRITES edges over SSA variables, materialized from the SSA stage.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::BuildDFGUseCase;
pub use domain::{DFNode, DFNodeKind, DataFlowGraph};
pub use ports::DFGAnalyzer;

// infrastructure::dfg predates the hexagonal domain/ports split and defines
// its own DFNode/DataFlowGraph; the explicit re-exports above take
// precedence over this glob for those two names.
#[doc(hidden)]
pub use infrastructure::*;

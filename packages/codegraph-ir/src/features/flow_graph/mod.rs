//! Control-flow graph construction (C4): basic-block CFG, the simplified
//! basic flow graph (BFG) consumed by the SSA stage, and exceptional
//! control flow (try/catch/finally).

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{BuildFlowGraphsUseCase, FlowGraphResult};
pub use ports::FlowAnalyzer;

#[doc(hidden)]
pub use infrastructure::*;

//! Program Dependence Graph: control dependencies (from the CFG) fused with
//! data dependencies (from the DFG), the basis for program slicing.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{DependencyType, PDGEdge, PDGNode, ProgramDependenceGraph};
pub use domain::PDGResult;
pub use ports::{PDGBuilderPort, PDGQueryPort};

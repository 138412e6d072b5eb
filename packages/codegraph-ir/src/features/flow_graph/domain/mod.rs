mod bfg;
pub mod cfg;
pub mod exceptional_cfg;

pub use bfg::{BasicFlowBlock, BasicFlowGraph, BlockKind};
pub use cfg::{CFGBlock, CFGEdge, CFGEdgeKind};
pub use exceptional_cfg::{
    ExceptionEdgeKind, ExceptionHandler, ExceptionType, ExceptionalCFG, ExceptionalEdge,
    FinallyBlock, TryBlock,
};

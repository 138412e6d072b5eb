pub mod build_flow_graphs;

pub use build_flow_graphs::{BuildFlowGraphsUseCase, FlowGraphResult};

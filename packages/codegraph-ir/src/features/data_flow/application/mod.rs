pub mod build_dfg;

pub use build_dfg::BuildDFGUseCase;

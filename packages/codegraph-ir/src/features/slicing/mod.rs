//! Program slicing: backward/forward slices over the PDG.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{CodeFragment, ProgramSlicer, SliceConfig, SliceResult};
pub use ports::SlicerPort;

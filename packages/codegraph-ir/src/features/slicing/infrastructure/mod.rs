pub mod slicer;

pub use slicer::{CodeFragment, ProgramSlicer, SliceConfig, SliceResult, SliceType, SlicerCacheStats};

pub mod cache;
pub mod compiler;
pub mod ir_builder;
pub mod loader;
pub mod optimizer;

pub use cache::{CacheConfig, CompilationCache, CompilationCacheStats};
pub use compiler::{CompilationError, CompilerStats, TaintRuleCompiler};
pub use ir_builder::{build_exec_ir, IRBuildError};
pub use loader::{load_atoms_yaml, load_atoms_yaml_lenient, YamlLoadError};
pub use optimizer::{optimize_ir, shared_prefix_groups, OptimizerConfig};

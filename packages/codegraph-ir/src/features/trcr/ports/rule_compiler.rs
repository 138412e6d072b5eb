//! `RuleCompiler` Trait (Port)
//!
//! Defines the contract external callers depend on instead of reaching
//! into `TaintRuleCompiler` directly.

use crate::features::trcr::domain::{TaintRuleExecutableIR, TaintRuleSpec};
use crate::features::trcr::infrastructure::CompilationError;

pub trait RuleCompiler: Send + Sync {
    /// Compiles a YAML rule document into its executable IR.
    fn compile_file(&self, content: &str) -> Result<Vec<TaintRuleExecutableIR>, CompilationError>;

    /// Compiles already-parsed specs.
    fn compile_specs(
        &self,
        specs: &[TaintRuleSpec],
    ) -> Result<Vec<TaintRuleExecutableIR>, CompilationError>;
}

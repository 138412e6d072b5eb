//! Taint rule compiler: YAML rule documents -> validated `TaintRuleSpec` ->
//! `TaintRuleExecIR` (per match clause) -> optimized `TaintRuleExecutableIR`,
//! the form the taint analysis feature's executor consumes.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{
    CompileRulesInput, CompileRulesOutput, CompileRulesUseCase, CompileRulesUseCaseImpl,
};
pub use domain::{
    compiled_id, CandidateClass, CandidatePlan, GeneratorExecPlan, MatchClauseSpec,
    Predicate, PredicateExecPlan, RuleKind, SpecValidationError, TaintRuleExecIR,
    TaintRuleExecutableIR, TaintRuleSpec,
};
pub use infrastructure::{
    build_exec_ir, load_atoms_yaml, load_atoms_yaml_lenient, optimize_ir, shared_prefix_groups,
    CacheConfig, CompilationCache, CompilationCacheStats, CompilationError, CompilerStats,
    IRBuildError, OptimizerConfig, TaintRuleCompiler, YamlLoadError,
};
pub use ports::RuleCompiler;

pub mod exec_ir;
pub mod executable;
pub mod spec;

pub use exec_ir::{CandidateClass, CandidatePlan, Predicate, TaintRuleExecIR};
pub use executable::{compiled_id, GeneratorExecPlan, PredicateExecPlan, TaintRuleExecutableIR};
pub use spec::{MatchClauseSpec, RuleKind, SpecValidationError, TaintRuleSpec};

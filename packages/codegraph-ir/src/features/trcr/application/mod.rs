pub mod compile_rules_usecase;

pub use compile_rules_usecase::{
    CompileRulesInput, CompileRulesOutput, CompileRulesUseCase, CompileRulesUseCaseImpl,
};

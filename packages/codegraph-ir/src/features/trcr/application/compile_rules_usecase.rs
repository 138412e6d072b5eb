//! `CompileRulesUseCase`: the application-level entry point callers use
//! instead of reaching into `TaintRuleCompiler` directly.

use std::sync::Arc;

use crate::features::trcr::domain::TaintRuleExecutableIR;
use crate::features::trcr::infrastructure::{CompilationError, TaintRuleCompiler};
use crate::features::trcr::ports::RuleCompiler;

pub struct CompileRulesInput {
    pub file_path: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct CompileRulesOutput {
    pub file_path: String,
    pub executables: Vec<TaintRuleExecutableIR>,
}

pub trait CompileRulesUseCase: Send + Sync {
    fn compile(&self, input: CompileRulesInput) -> Result<CompileRulesOutput, CompilationError>;
}

pub struct CompileRulesUseCaseImpl {
    compiler: Arc<dyn RuleCompiler>,
}

impl CompileRulesUseCaseImpl {
    pub fn new(compiler: Arc<dyn RuleCompiler>) -> Self {
        Self { compiler }
    }

    pub fn with_default_compiler() -> Self {
        Self::new(Arc::new(TaintRuleCompiler::new(true)))
    }
}

impl CompileRulesUseCase for CompileRulesUseCaseImpl {
    fn compile(&self, input: CompileRulesInput) -> Result<CompileRulesOutput, CompilationError> {
        let executables = self.compiler.compile_file(&input.content)?;
        Ok(CompileRulesOutput {
            file_path: input.file_path,
            executables,
        })
    }
}

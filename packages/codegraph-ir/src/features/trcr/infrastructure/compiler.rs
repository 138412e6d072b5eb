//! `TaintRuleCompiler`: orchestrates YAML → `TaintRuleSpec` →
//! `TaintRuleExecIR` → `TaintRuleExecutableIR`, with optional optimization.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::features::trcr::domain::{
    compiled_id, GeneratorExecPlan, PredicateExecPlan, TaintRuleExecIR, TaintRuleExecutableIR,
    TaintRuleSpec,
};
use crate::features::trcr::infrastructure::ir_builder::{build_exec_ir, IRBuildError};
use crate::features::trcr::infrastructure::loader::{load_atoms_yaml, YamlLoadError};
use crate::features::trcr::infrastructure::optimizer::{optimize_ir, OptimizerConfig};
use crate::features::trcr::ports::RuleCompiler;

#[derive(Debug, thiserror::Error)]
pub enum CompilationError {
    #[error("failed to load YAML: {0}")]
    Load(#[from] YamlLoadError),
    #[error("failed to build IR for {rule_id}:clause:{clause_index}: {source}")]
    Build {
        rule_id: String,
        clause_index: usize,
        #[source]
        source: IRBuildError,
    },
    #[error("failed to compile {0} rules: {1:?}")]
    Partial(usize, Vec<(String, String)>),
}

#[derive(Debug, Clone, Default)]
pub struct CompilerStats {
    pub total_specs: usize,
    pub total_clauses: usize,
    pub total_executables: usize,
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

pub struct TaintRuleCompiler {
    optimizer: Option<OptimizerConfig>,
    stats: Mutex<CompilerStats>,
}

impl TaintRuleCompiler {
    pub fn new(enable_optimization: bool) -> Self {
        Self {
            optimizer: enable_optimization.then(OptimizerConfig::default),
            stats: Mutex::new(CompilerStats::default()),
        }
    }

    pub fn stats(&self) -> CompilerStats {
        self.stats.lock().unwrap().clone()
    }

    pub fn compile_file(&self, content: &str) -> Result<Vec<TaintRuleExecutableIR>, CompilationError> {
        let specs = load_atoms_yaml(content)?;
        self.compile_specs(&specs)
    }

    /// Compiles every spec; a `continue_on_error` caller should instead
    /// iterate `compile_spec` directly and collect failures itself.
    pub fn compile_specs(
        &self,
        specs: &[TaintRuleSpec],
    ) -> Result<Vec<TaintRuleExecutableIR>, CompilationError> {
        let mut executables = Vec::new();
        let mut errors = Vec::new();

        for spec in specs {
            match self.compile_spec(spec) {
                Ok(mut rules) => executables.append(&mut rules),
                Err(e) => errors.push((spec.rule_id.clone(), e.to_string())),
            }
        }

        if !errors.is_empty() {
            return Err(CompilationError::Partial(errors.len(), errors));
        }

        let mut stats = self.stats.lock().unwrap();
        stats.total_specs = specs.len();
        stats.total_executables = executables.len();
        Ok(executables)
    }

    pub fn compile_spec(
        &self,
        spec: &TaintRuleSpec,
    ) -> Result<Vec<TaintRuleExecutableIR>, CompilationError> {
        let mut executables = Vec::new();

        for (i, clause) in spec.match_clauses.iter().enumerate() {
            let exec_ir = build_exec_ir(spec, clause, i).map_err(|source| CompilationError::Build {
                rule_id: spec.rule_id.clone(),
                clause_index: i,
                source,
            })?;

            let (optimized, passes) = match self.optimizer {
                Some(config) => optimize_ir(exec_ir, config),
                None => (Some(exec_ir), Vec::new()),
            };

            let Some(exec_ir) = optimized else {
                continue; // dead rule, pruned
            };

            executables.push(self.compile_to_executable(exec_ir, passes));
        }

        self.stats.lock().unwrap().total_clauses += spec.match_clauses.len();
        Ok(executables)
    }

    fn compile_to_executable(
        &self,
        exec_ir: TaintRuleExecIR,
        optimizer_passes: Vec<String>,
    ) -> TaintRuleExecutableIR {
        TaintRuleExecutableIR {
            compiled_id: compiled_id(&exec_ir.rule_id, exec_ir.clause_id),
            rule_id: exec_ir.rule_id,
            atom_id: exec_ir.atom_id,
            kind: exec_ir.kind,
            generator_exec: GeneratorExecPlan {
                candidate_plan: exec_ir.candidate_plan,
                estimated_candidates: 0,
                cache_hit_rate: 0.0,
            },
            predicate_exec: PredicateExecPlan {
                predicates: exec_ir.predicate_chain,
                short_circuit: true,
            },
            specificity: exec_ir.specificity,
            confidence: exec_ir.confidence,
            effect: exec_ir.effect,
            cwe: exec_ir.cwe,
            owasp: exec_ir.owasp,
            severity: exec_ir.severity,
            tags: exec_ir.tags,
            description: exec_ir.description,
            trace: exec_ir.trace,
            compilation_timestamp_ms: now_ms(),
            optimizer_passes,
        }
    }
}

impl RuleCompiler for TaintRuleCompiler {
    fn compile_file(&self, content: &str) -> Result<Vec<TaintRuleExecutableIR>, CompilationError> {
        TaintRuleCompiler::compile_file(self, content)
    }

    fn compile_specs(
        &self,
        specs: &[TaintRuleSpec],
    ) -> Result<Vec<TaintRuleExecutableIR>, CompilationError> {
        TaintRuleCompiler::compile_specs(self, specs)
    }
}

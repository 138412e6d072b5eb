pub mod rule_compiler;

pub use rule_compiler::RuleCompiler;

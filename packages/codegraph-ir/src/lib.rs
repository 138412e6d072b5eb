/*
 * Codegraph IR - Incremental Code Analysis Engine
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (Node, Edge, Span)
 * - features/    : Vertical slices (parsing -> ir -> flow -> dfg -> ssa -> cross_file -> taint)
 * - usecases/    : Incremental indexing driver (tiered pipeline)
 * - config/      : RFC-001 configuration system
 */

// Crate-level lint configuration
#![allow(dead_code)] // Many functions reserved for future use
#![allow(unused_variables)] // Parameters kept for API compatibility
#![allow(unused_imports)] // Conditional imports for feature flags
#![allow(clippy::too_many_arguments)] // Complex analysis functions need many params
#![allow(clippy::type_complexity)] // Complex types are necessary for analysis
#![allow(clippy::or_fun_call)] // or_insert_with vs or_default style preference
#![allow(clippy::map_entry)] // Style preference for entry API
#![allow(clippy::collapsible_if)] // Readability over brevity
#![allow(clippy::clone_on_copy)] // Explicit clone for clarity
#![allow(clippy::should_implement_trait)] // from_str naming intentional
#![allow(clippy::useless_format)] // Format consistency
#![allow(clippy::derivable_impls)] // Manual impl for documentation
#![allow(clippy::if_same_then_else)] // Branch clarity preferred
#![allow(clippy::only_used_in_recursion)] // Recursive params for API clarity
#![allow(clippy::empty_line_after_doc_comments)] // Doc comment style
#![allow(clippy::unwrap_or_default)] // or_insert_with style preference
#![allow(clippy::option_if_let_else)] // map_or style preference
#![allow(clippy::manual_find)] // Explicit iteration for clarity
#![allow(clippy::redundant_closure)] // Closure for consistency
#![allow(clippy::useless_conversion)] // Explicit conversion for clarity
#![allow(clippy::manual_map)] // map_or style preference
#![allow(clippy::needless_lifetimes)] // Explicit lifetimes for clarity
#![allow(clippy::upper_case_acronyms)] // SSA, CFG, DFG naming
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::single_match)] // Single match for readability
#![allow(clippy::needless_range_loop)] // Range loop for indexing
#![allow(clippy::collapsible_else_if)] // else if clarity
#![allow(clippy::collapsible_match)] // Match clarity
#![allow(clippy::match_like_matches_macro)] // Match for readability
#![allow(clippy::ptr_arg)] // &PathBuf intentional for API compatibility

// Import tracing macros (conditional on feature)
#[cfg(feature = "trace")]
use tracing::{debug, error, info, trace, warn};

use crate::shared::models::Span;
use rayon::prelude::*;
use std::collections::HashMap;
use tree_sitter::{Node, Parser};

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules (parsing -> structural IR -> flow graphs -> cross-file -> taint -> query)
pub mod features;

/// Configuration system (RFC-001)
pub mod config;

/// Language-agnostic Core API (for FFI wrappers)
pub mod api;

/// Error types
pub mod errors;

/// Usecase layer (incremental IndexingService)
pub mod usecases;

/// Benchmark system (ground-truth validation)
pub mod benchmark;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use features::ir_generation::infrastructure::processor::{process_python_file, ProcessResult};

// ═══════════════════════════════════════════════════════════════════════════
// Internal Types
// ═══════════════════════════════════════════════════════════════════════════

/// Temporary AST node for tree-sitter traversal (legacy API)
#[derive(Debug, Clone)]
pub struct AstNode {
    pub kind: String,
    pub name: Option<String>,
    pub span: Span,
    pub children_count: usize,
}

// ═══════════════════════════════════════════════════════════════════════════
// Rayon Thread Pool
// ═══════════════════════════════════════════════════════════════════════════

/// Initialize Rayon thread pool (75% of cores)
fn init_rayon() {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let num_cpus = num_cpus::get();
        let threads = std::cmp::max(1, (num_cpus * 3) / 4);

        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .expect("Failed to init Rayon");

        tracing::debug!("Rayon pool: {} threads (75% of {})", threads, num_cpus);
    });
}

// ═══════════════════════════════════════════════════════════════════════════
// Legacy API (for backward compatibility)
// ═══════════════════════════════════════════════════════════════════════════

/// Traverse AST and extract nodes (single file) - Legacy API
pub fn traverse_ast_single(content: &str) -> Result<Vec<AstNode>, String> {
    let mut parser = Parser::new();
    let language = tree_sitter_python::language();
    parser
        .set_language(&language)
        .map_err(|e| format!("Failed to set language: {}", e))?;

    let tree = parser
        .parse(content, None)
        .ok_or_else(|| "Failed to parse content".to_string())?;

    let root = tree.root_node();
    let mut stack = vec![root];
    let mut result = Vec::new();

    const TARGET_TYPES: &[&str] = &[
        "class_definition",
        "function_definition",
        "decorated_definition",
        "import_statement",
        "import_from_statement",
    ];

    while let Some(current) = stack.pop() {
        let node_type = current.kind();

        if TARGET_TYPES.contains(&node_type) {
            let name = extract_node_name(&current, content);
            let span = node_to_span(&current);

            result.push(AstNode {
                kind: node_type.to_string(),
                name,
                span,
                children_count: current.child_count(),
            });
        } else {
            for i in (0..current.child_count()).rev() {
                if let Some(child) = current.child(i) {
                    stack.push(child);
                }
            }
        }
    }

    Ok(result)
}

/// Traverse multiple files, one AST walk per file - Legacy API
pub fn traverse_ast_many(files: &[(String, String)]) -> Vec<(String, Result<Vec<AstNode>, String>)> {
    files
        .par_iter()
        .map(|(path, content)| (path.clone(), traverse_ast_single(content)))
        .collect()
}

fn extract_node_name(node: &Node, source: &str) -> Option<String> {
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            if child.kind() == "identifier" {
                let start = child.start_byte();
                let end = child.end_byte();
                return Some(source[start..end].to_string());
            }
        }
    }
    None
}

fn node_to_span(node: &Node) -> Span {
    let start_pos = node.start_position();
    let end_pos = node.end_position();

    Span::new(
        start_pos.row as u32 + 1,
        start_pos.column as u32,
        end_pos.row as u32 + 1,
        end_pos.column as u32,
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

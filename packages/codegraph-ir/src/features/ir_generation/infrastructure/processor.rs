//! Single-file AST -> IR processing.
//!
//! Combines AST traversal, function/class extraction, and IR building into
//! one entry point used by the incremental driver (C7) for the StructuralIR
//! stage.

use crate::shared::models::{Edge, Node, Occurrence, OccurrenceGenerator};
use tree_sitter::{Node as TSNode, Parser};

use crate::features::data_flow::infrastructure::dfg::{build_dfg, DataFlowGraph};
use crate::features::flow_graph::infrastructure::{
    bfg::{BasicFlowGraph, BfgVisitor},
    cfg::{build_cfg_edges, CFGEdge},
};
use crate::features::ir_generation::infrastructure::ir_builder::IRBuilder;
use crate::features::ir_generation::infrastructure::visitor::traverse_with_visitor;
use crate::features::parsing::infrastructure::extractors::{
    call::extract_calls_in_block, class::extract_class_info, function::extract_function_info,
    identifier::extract_identifiers_in_expression, variable::extract_variables_in_block,
};
use crate::shared::utils::{extract_variable_uses, extract_variables_for_function, find_function_by_name};

/// Result of processing a single file's AST into structural IR.
#[derive(Debug, Clone, Default)]
pub struct ProcessResult {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub occurrences: Vec<Occurrence>,
    pub bfg_graphs: Vec<BasicFlowGraph>,
    pub cfg_edges: Vec<CFGEdge>,
    pub dfg_graphs: Vec<DataFlowGraph>,
    pub errors: Vec<String>,
}

impl ProcessResult {
    fn with_error(msg: impl Into<String>) -> Self {
        Self {
            errors: vec![msg.into()],
            ..Default::default()
        }
    }
}

/// Process a Python file and generate structural IR (L1: nodes/edges,
/// L2: per-function control-flow blocks, L1 occurrences).
pub fn process_python_file(
    content: &str,
    repo_id: &str,
    file_path: &str,
    module_path: &str,
) -> ProcessResult {
    let mut parser = Parser::new();
    if let Err(e) = parser.set_language(&tree_sitter_python::language()) {
        return ProcessResult::with_error(format!("failed to set language: {}", e));
    }

    let tree = match parser.parse(content, None) {
        Some(t) => t,
        None => return ProcessResult::with_error("failed to parse content"),
    };

    let mut builder = IRBuilder::new(
        repo_id.to_string(),
        file_path.to_string(),
        "python".to_string(),
        module_path.to_string(),
    );

    let root = tree.root_node();
    let mut bfg_graphs = Vec::new();
    let mut errors = Vec::new();

    process_with_bfg(&root, content, &mut builder, &mut bfg_graphs, &mut errors);

    let mut cfg_edges = Vec::new();
    for bfg in &bfg_graphs {
        cfg_edges.extend(build_cfg_edges(&bfg.blocks));
    }

    let (nodes, edges, _type_entities) = builder.build();

    let mut occ_gen = OccurrenceGenerator::new();
    let occurrences = occ_gen.generate(&nodes, &edges);

    let dfg_graphs = build_dfg_graphs(&nodes, &edges, &bfg_graphs);

    ProcessResult {
        nodes,
        edges,
        occurrences,
        bfg_graphs,
        cfg_edges,
        dfg_graphs,
        errors,
    }
}

/// Build a data-flow graph per function from its structural IR nodes/edges.
fn build_dfg_graphs(
    nodes: &[Node],
    edges: &[Edge],
    bfg_graphs: &[BasicFlowGraph],
) -> Vec<DataFlowGraph> {
    let mut dfg_graphs = Vec::new();

    for bfg in bfg_graphs {
        let Some(func) = find_function_by_name(nodes, &bfg.function_id) else {
            dfg_graphs.push(build_dfg(bfg.function_id.clone(), &[], &[]));
            continue;
        };

        let definitions = extract_variables_for_function(nodes, &func.id);
        let uses = extract_variable_uses(edges, &func.id);
        dfg_graphs.push(build_dfg(bfg.function_id.clone(), &definitions, &uses));
    }

    dfg_graphs
}

/// Generate occurrences for an already-built node/edge set. Exposed for
/// callers (e.g. cross-file resolution) that append nodes/edges after the
/// initial per-file pass and need occurrences recomputed.
pub fn generate_occurrences_pub(nodes: &[Node], edges: &[Edge]) -> Vec<Occurrence> {
    let mut gen = OccurrenceGenerator::new();
    gen.generate(nodes, edges)
}

/// Process function node: extract signature, body variables, calls, reads.
fn process_function(
    node: &TSNode,
    source: &str,
    builder: &mut IRBuilder,
    is_method: bool,
) -> Result<(), String> {
    let func_info = extract_function_info(node, source)
        .ok_or_else(|| "failed to extract function info".to_string())?;

    let start = node.start_byte();
    let end = node.end_byte();
    let source_text = &source[start..end];

    let node_id = builder.create_function_node(
        func_info.name.clone(),
        func_info.span,
        None,
        is_method,
        func_info.docstring,
        source_text,
        func_info.return_type,
    )?;

    if let Some(body_node) = find_body_node(node) {
        let variables = extract_variables_in_block(&body_node, source);
        for var in variables {
            match builder.create_variable_node(
                var.name.clone(),
                var.span,
                node_id.clone(),
                var.type_annotation.clone(),
            ) {
                Ok(var_node_id) => {
                    builder.add_writes_edge(node_id.clone(), var_node_id, var.span);
                }
                Err(e) => {
                    errors_log(&format!("error creating variable node: {}", e));
                }
            }
        }

        let calls = extract_calls_in_block(&body_node, source);
        for call in calls {
            builder.add_calls_edge(node_id.clone(), call.callee_name, call.span);
        }

        let identifiers = extract_identifiers_in_expression(&body_node, source);
        for identifier in identifiers {
            builder.add_reads_edge(node_id.clone(), identifier.name, identifier.span);
        }
    }

    builder.finish_scope();

    Ok(())
}

fn process_class(node: &TSNode, source: &str, builder: &mut IRBuilder) -> Result<(), String> {
    let class_info = extract_class_info(node, source)
        .ok_or_else(|| "failed to extract class info".to_string())?;

    let start = node.start_byte();
    let end = node.end_byte();
    let source_text = &source[start..end];

    let class_name = class_info.name.clone();
    let node_id = builder.create_class_node(
        class_info.name,
        class_info.span,
        None,
        class_info.base_classes,
        class_info.docstring,
        source_text,
    )?;

    builder.register_local_class(class_name, node_id.clone());

    for i in 0..node.child_count() {
        let Some(child) = node.child(i) else { continue };
        if child.kind() != "block" {
            continue;
        }
        for j in 0..child.child_count() {
            let Some(stmt) = child.child(j) else { continue };
            process_class_member(&stmt, source, builder);
        }
    }

    builder.finish_scope();

    Ok(())
}

fn process_class_member(stmt: &TSNode, source: &str, builder: &mut IRBuilder) {
    match stmt.kind() {
        "function_definition" => {
            if let Err(e) = process_function(stmt, source, builder, true) {
                errors_log(&format!("error processing method: {}", e));
            }
        }
        "class_definition" => {
            if let Err(e) = process_class(stmt, source, builder) {
                errors_log(&format!("error processing nested class: {}", e));
            }
        }
        "decorated_definition" => {
            for k in 0..stmt.child_count() {
                let Some(decorated) = stmt.child(k) else { continue };
                match decorated.kind() {
                    "function_definition" => {
                        if let Err(e) = process_function(&decorated, source, builder, true) {
                            errors_log(&format!("error processing decorated method: {}", e));
                        }
                    }
                    "class_definition" => {
                        if let Err(e) = process_class(&decorated, source, builder) {
                            errors_log(&format!(
                                "error processing decorated nested class: {}",
                                e
                            ));
                        }
                    }
                    _ => {}
                }
            }
        }
        _ => {}
    }
}

fn errors_log(msg: &str) {
    tracing::debug!("{}", msg);
}

/// Traverse the tree building structural IR and, per function, a basic flow
/// graph (BFG) used downstream for CFG construction.
fn process_with_bfg(
    node: &TSNode,
    source: &str,
    builder: &mut IRBuilder,
    all_bfg_graphs: &mut Vec<BasicFlowGraph>,
    errors: &mut Vec<String>,
) {
    match node.kind() {
        "import_statement" => {
            if let Some(import_info) =
                crate::features::parsing::infrastructure::extractors::import::extract_import_statement(
                    node, source,
                )
            {
                builder.create_import_node(
                    import_info.module,
                    import_info.names,
                    import_info.alias,
                    import_info.span,
                    false,
                );
            }
        }

        "import_from_statement" => {
            if let Some(import_info) =
                crate::features::parsing::infrastructure::extractors::import::extract_import_from_statement(
                    node, source,
                )
            {
                builder.create_import_node(
                    import_info.module,
                    import_info.names,
                    import_info.alias,
                    import_info.span,
                    true,
                );
            }
        }

        "function_definition" => {
            if let Some(func_info) =
                crate::features::parsing::infrastructure::extractors::function::extract_function_info(
                    node, source,
                )
            {
                if let Err(e) = process_function(node, source, builder, false) {
                    errors.push(e);
                    return;
                }

                let mut func_bfg_visitor = BfgVisitor::new();
                func_bfg_visitor.set_function_id(func_info.name.clone());

                if let Some(body) = find_body_node(node) {
                    let body_span = node_to_span(&body);

                    let entry_id = format!("bfg:{}:entry", func_info.name);
                    let entry = crate::shared::models::span_ref::BlockRef::new(
                        entry_id.clone(),
                        "ENTRY".to_string(),
                        body_span,
                        0,
                    );

                    traverse_with_visitor(&body, source, &mut func_bfg_visitor);
                    func_bfg_visitor.finalize();

                    let exit_id = format!("bfg:{}:exit", func_info.name);
                    let exit = crate::shared::models::span_ref::BlockRef::new(
                        exit_id.clone(),
                        "EXIT".to_string(),
                        body_span,
                        0,
                    );

                    let mut all_blocks = vec![entry];
                    all_blocks.extend(func_bfg_visitor.get_blocks().to_vec());
                    all_blocks.push(exit);

                    let total_statements =
                        all_blocks.iter().map(|b| b.statement_count).sum();

                    all_bfg_graphs.push(BasicFlowGraph {
                        id: format!("bfg:{}", func_info.name),
                        function_id: func_info.name,
                        entry_block_id: entry_id,
                        exit_block_id: exit_id,
                        blocks: all_blocks,
                        total_statements,
                    });
                }
            }
        }

        "class_definition" => {
            if let Err(e) = process_class(node, source, builder) {
                errors.push(e);
            }
        }

        _ => {
            for i in 0..node.child_count() {
                if let Some(child) = node.child(i) {
                    process_with_bfg(&child, source, builder, all_bfg_graphs, errors);
                }
            }
        }
    }
}

fn find_body_node<'a>(node: &'a TSNode) -> Option<TSNode<'a>> {
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            if child.kind() == "block" {
                return Some(child);
            }
        }
    }
    None
}

fn node_to_span(node: &TSNode) -> crate::shared::models::Span {
    let start_pos = node.start_position();
    let end_pos = node.end_position();

    crate::shared::models::Span::new(
        start_pos.row as u32 + 1,
        start_pos.column as u32,
        end_pos.row as u32 + 1,
        end_pos.column as u32,
    )
}

/*
 * Parameter Analysis Module
 *
 * Extracts function/method parameters from AST:
 * - Parameter names
 * - Type annotations
 * - Default values
 * - Special parameters (self, *args, **kwargs)
 *
 * MATCHES: FunctionAnalyzer.process_parameters()
 *
 * PRODUCTION REQUIREMENTS:
 * - Handle all Python parameter types
 * - Preserve order
 * - Extract type hints
 * - No fake data
 */

use crate::shared::models::Span;
use tree_sitter::Node;

/// Parameter information
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(dead_code)]
pub struct Parameter {
    pub name: String,
    pub type_annotation: Option<String>,
    pub default_value: Option<String>,
    pub kind: ParameterKind,
    pub span: Span,
}

/// Parameter kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum ParameterKind {
    Positional,     // x
    PositionalOnly, // x, / (Python 3.8+)
    KeywordOnly,    // *, x
    VarArgs,        // *args
    VarKeyword,     // **kwargs
}

/// Extract parameters from parameters node
///
/// # Arguments
/// * `node` - parameters AST node
/// * `source` - Source code
///
/// # Returns
/// * Vec of Parameter structs
#[allow(dead_code)]
pub fn extract_parameters(node: &Node, source: &str) -> Vec<Parameter> {
    let mut params = Vec::new();

    if node.kind() != "parameters" {
        return params;
    }

    let mut keyword_only = false;

    // Iterate through children
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            let child_text = get_node_text(&child, source);

            // Check for * (keyword-only marker)
            if child_text == "*" {
                keyword_only = true;
                continue;
            }

            match child.kind() {
                // Regular parameter
                "identifier" => {
                    let name = child_text;
                    let span = node_to_span(&child);

                    params.push(Parameter {
                        name,
                        type_annotation: None,
                        default_value: None,
                        kind: if keyword_only {
                            ParameterKind::KeywordOnly
                        } else {
                            ParameterKind::Positional
                        },
                        span,
                    });
                }

                // Typed parameter: x: int
                "typed_parameter" => {
                    if let Some(param) = extract_typed_parameter(&child, source, keyword_only) {
                        params.push(param);
                    }
                }

                // Default parameter: x=10
                "default_parameter" => {
                    if let Some(param) = extract_default_parameter(&child, source, keyword_only) {
                        params.push(param);
                    }
                }

                // Typed default parameter: x: int = 10
                "typed_default_parameter" => {
                    if let Some(param) =
                        extract_typed_default_parameter(&child, source, keyword_only)
                    {
                        params.push(param);
                    }
                }

                // *args
                "list_splat_pattern" => {
                    if let Some(param) = extract_varargs(&child, source) {
                        params.push(param);
                    }
                    keyword_only = true; // After *args, all params are keyword-only
                }

                // **kwargs
                "dictionary_splat_pattern" => {
                    if let Some(param) = extract_varkeyword(&child, source) {
                        params.push(param);
                    }
                }

                _ => {}
            }
        }
    }

    params
}

/// Extract typed parameter (x: int)
fn extract_typed_parameter(node: &Node, source: &str, keyword_only: bool) -> Option<Parameter> {
    let mut name = None;
    let mut type_annotation = None;

    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            match child.kind() {
                "identifier" => {
                    name = Some(get_node_text(&child, source));
                }
                "type" => {
                    type_annotation = Some(get_node_text(&child, source));
                }
                _ => {}
            }
        }
    }

    let name = name?;
    let span = node_to_span(node);

    Some(Parameter {
        name,
        type_annotation,
        default_value: None,
        kind: if keyword_only {
            ParameterKind::KeywordOnly
        } else {
            ParameterKind::Positional
        },
        span,
    })
}

/// Extract default parameter (x=10)
fn extract_default_parameter(node: &Node, source: &str, keyword_only: bool) -> Option<Parameter> {
    let mut name = None;
    let mut default_value = None;

    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            match child.kind() {
                "identifier" => {
                    name = Some(get_node_text(&child, source));
                }
                "integer" | "float" | "string" | "true" | "false" | "none" => {
                    default_value = Some(get_node_text(&child, source));
                }
                _ => {}
            }
        }
    }

    let name = name?;
    let span = node_to_span(node);

    Some(Parameter {
        name,
        type_annotation: None,
        default_value,
        kind: if keyword_only {
            ParameterKind::KeywordOnly
        } else {
            ParameterKind::Positional
        },
        span,
    })
}

/// Extract typed default parameter (x: int = 10)
fn extract_typed_default_parameter(
    node: &Node,
    source: &str,
    keyword_only: bool,
) -> Option<Parameter> {
    let mut name = None;
    let mut type_annotation = None;
    let mut default_value = None;

    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            match child.kind() {
                "identifier" => {
                    name = Some(get_node_text(&child, source));
                }
                "type" => {
                    type_annotation = Some(get_node_text(&child, source));
                }
                "integer" | "float" | "string" | "true" | "false" | "none" => {
                    default_value = Some(get_node_text(&child, source));
                }
                _ => {}
            }
        }
    }

    let name = name?;
    let span = node_to_span(node);

    Some(Parameter {
        name,
        type_annotation,
        default_value,
        kind: if keyword_only {
            ParameterKind::KeywordOnly
        } else {
            ParameterKind::Positional
        },
        span,
    })
}

/// Extract *args
fn extract_varargs(node: &Node, source: &str) -> Option<Parameter> {
    // Find identifier child
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            if child.kind() == "identifier" {
                let name = get_node_text(&child, source);
                let span = node_to_span(node);

                return Some(Parameter {
                    name,
                    type_annotation: None,
                    default_value: None,
                    kind: ParameterKind::VarArgs,
                    span,
                });
            }
        }
    }
    None
}

/// Extract **kwargs
fn extract_varkeyword(node: &Node, source: &str) -> Option<Parameter> {
    // Find identifier child
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            if child.kind() == "identifier" {
                let name = get_node_text(&child, source);
                let span = node_to_span(node);

                return Some(Parameter {
                    name,
                    type_annotation: None,
                    default_value: None,
                    kind: ParameterKind::VarKeyword,
                    span,
                });
            }
        }
    }
    None
}

/// Get node text
fn get_node_text(node: &Node, source: &str) -> String {
    let start = node.start_byte();
    let end = node.end_byte();
    source[start..end].to_string()
}

/// Convert node to Span
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

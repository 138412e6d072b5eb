//! Node types for the canonical IR
//!
//! Closed enumeration of node kinds; every match site must handle all
//! variants exhaustively (an unhandled variant is a hard error, never a
//! default branch).

#[cfg(feature = "python")]
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

use super::Span;

/// Closed set of node kinds produced by the IR builder and consumed by
/// every downstream stage (CFG, SSA, cross-file, TRCR, query planner).
#[cfg_attr(feature = "python", pyclass(eq, eq_int))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    File,
    Module,
    Class,
    Interface,
    Function,
    Method,
    Variable,
    Field,
    Import,
    Enum,
    TypeAlias,
    Lambda,
    Property,
    Constant,
    Export,
    Block,
    Condition,
    Loop,
    TryCatch,
    Expression,
    Type,
    Signature,
    CfgBlock,
    ExternalModule,
    ExternalFunction,
    ExternalType,
    Route,
    Service,
    Repository,
    Config,
    Job,
    Middleware,
    Summary,
    Document,
    TemplateDoc,
    TemplateElement,
    TemplateDirective,
    TemplateSlot,
}

impl NodeKind {
    /// Lower-snake rendering used in node ids (`node:{repo}:{kind_lower}:{h}`).
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::File => "file",
            NodeKind::Module => "module",
            NodeKind::Class => "class",
            NodeKind::Interface => "interface",
            NodeKind::Function => "function",
            NodeKind::Method => "method",
            NodeKind::Variable => "variable",
            NodeKind::Field => "field",
            NodeKind::Import => "import",
            NodeKind::Enum => "enum",
            NodeKind::TypeAlias => "type_alias",
            NodeKind::Lambda => "lambda",
            NodeKind::Property => "property",
            NodeKind::Constant => "constant",
            NodeKind::Export => "export",
            NodeKind::Block => "block",
            NodeKind::Condition => "condition",
            NodeKind::Loop => "loop",
            NodeKind::TryCatch => "try_catch",
            NodeKind::Expression => "expression",
            NodeKind::Type => "type",
            NodeKind::Signature => "signature",
            NodeKind::CfgBlock => "cfg_block",
            NodeKind::ExternalModule => "external_module",
            NodeKind::ExternalFunction => "external_function",
            NodeKind::ExternalType => "external_type",
            NodeKind::Route => "route",
            NodeKind::Service => "service",
            NodeKind::Repository => "repository",
            NodeKind::Config => "config",
            NodeKind::Job => "job",
            NodeKind::Middleware => "middleware",
            NodeKind::Summary => "summary",
            NodeKind::Document => "document",
            NodeKind::TemplateDoc => "template_doc",
            NodeKind::TemplateElement => "template_element",
            NodeKind::TemplateDirective => "template_directive",
            NodeKind::TemplateSlot => "template_slot",
        }
    }

    /// IR->Graph projection policy (§4.3): IR-only kinds collapse onto a
    /// graph-visible kind; control-only kinds are dropped entirely (None).
    pub fn graph_projection(&self) -> Option<NodeKind> {
        match self {
            NodeKind::Lambda => Some(NodeKind::Function),
            NodeKind::Enum => Some(NodeKind::Class),
            NodeKind::TypeAlias => Some(NodeKind::Type),
            NodeKind::Block | NodeKind::Condition | NodeKind::Loop | NodeKind::TryCatch => None,
            other => Some(*other),
        }
    }
}

/// A canonical IR node. Identity (`id`) is content-addressed (see
/// `shared::utils::identity`); all other fields are descriptive.
#[cfg_attr(feature = "python", pyclass(get_all))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub fqn: String,
    pub file_path: String,
    pub span: Span,
    pub name: Option<String>,
    pub language: Option<String>,
    pub content_hash: Option<String>,
    pub parent_id: Option<String>,
    pub module_path: Option<String>,
    pub body_span: Option<Span>,
    pub docstring: Option<String>,
    pub return_type: Option<String>,
    pub type_annotation: Option<String>,
    pub base_classes: Option<Vec<String>>,
    pub attributes: Option<serde_json::Value>,
}

impl Node {
    pub fn new(id: String, kind: NodeKind, fqn: String, file_path: String, span: Span) -> Self {
        Self {
            id,
            kind,
            fqn,
            file_path,
            span,
            name: None,
            language: None,
            content_hash: None,
            parent_id: None,
            module_path: None,
            body_span: None,
            docstring: None,
            return_type: None,
            type_annotation: None,
            base_classes: None,
            attributes: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_module_path(mut self, module_path: impl Into<String>) -> Self {
        self.module_path = Some(module_path.into());
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_content_hash(mut self, content_hash: impl Into<String>) -> Self {
        self.content_hash = Some(content_hash.into());
        self
    }

    pub fn with_docstring(mut self, docstring: impl Into<String>) -> Self {
        self.docstring = Some(docstring.into());
        self
    }
}

/// Ergonomic, validating builder over `Node` (distinct from the fluent
/// `with_*` chain on `Node` itself, which call sites use directly).
#[derive(Debug, Clone)]
pub struct NodeBuilder {
    node: Node,
}

impl NodeBuilder {
    pub fn new(id: String, kind: NodeKind, fqn: String, file_path: String, span: Span) -> Self {
        Self {
            node: Node::new(id, kind, fqn, file_path, span),
        }
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.node.language = Some(language.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.node.name = Some(name.into());
        self
    }

    pub fn parent(mut self, parent_id: impl Into<String>) -> Self {
        self.node.parent_id = Some(parent_id.into());
        self
    }

    pub fn attributes(mut self, attributes: serde_json::Value) -> Self {
        self.node.attributes = Some(attributes);
        self
    }

    /// Finalize. Fails if `fqn` or `file_path` is empty — every node must
    /// be locatable.
    pub fn build(self) -> Result<Node, String> {
        if self.node.fqn.is_empty() {
            return Err("Node fqn cannot be empty".to_string());
        }
        if self.node.file_path.is_empty() {
            return Err("Node file_path cannot be empty".to_string());
        }
        Ok(self.node)
    }
}

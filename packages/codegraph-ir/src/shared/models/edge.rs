//! Edge types for the canonical IR
//!
//! Closed enumeration of edge kinds; every match site must handle all
//! variants exhaustively (an unhandled variant is a hard error, never a
//! default branch).

#[cfg(feature = "python")]
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

use super::Span;

/// Closed set of edge kinds.
#[cfg_attr(feature = "python", pyclass(eq, eq_int))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    Contains,
    Defines,
    Calls,
    Reads,
    Writes,
    References,
    Imports,
    Inherits,
    Implements,
    Overrides,
    Throws,
    Decorates,
    Instantiates,
    CfgNext,
    CfgBranch,
    CfgLoop,
    CfgHandler,
    Captures,
    Documents,
    TemplateChild,
    Binds,
    Renders,
    Escapes,
}

impl EdgeKind {
    /// Upper-snake wire rendering, used in the edge-id hash input
    /// (`{kind}|{source_id}|{target_id}|{occurrence}`).
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Contains => "CONTAINS",
            EdgeKind::Defines => "DEFINES",
            EdgeKind::Calls => "CALLS",
            EdgeKind::Reads => "READS",
            EdgeKind::Writes => "WRITES",
            EdgeKind::References => "REFERENCES",
            EdgeKind::Imports => "IMPORTS",
            EdgeKind::Inherits => "INHERITS",
            EdgeKind::Implements => "IMPLEMENTS",
            EdgeKind::Overrides => "OVERRIDES",
            EdgeKind::Throws => "THROWS",
            EdgeKind::Decorates => "DECORATES",
            EdgeKind::Instantiates => "INSTANTIATES",
            EdgeKind::CfgNext => "CFG_NEXT",
            EdgeKind::CfgBranch => "CFG_BRANCH",
            EdgeKind::CfgLoop => "CFG_LOOP",
            EdgeKind::CfgHandler => "CFG_HANDLER",
            EdgeKind::Captures => "CAPTURES",
            EdgeKind::Documents => "DOCUMENTS",
            EdgeKind::TemplateChild => "TEMPLATE_CHILD",
            EdgeKind::Binds => "BINDS",
            EdgeKind::Renders => "RENDERS",
            EdgeKind::Escapes => "ESCAPES",
        }
    }

    /// True for edges that carry a def-use / value-flow relationship.
    pub fn is_data_flow(&self) -> bool {
        matches!(self, EdgeKind::Reads | EdgeKind::Writes | EdgeKind::Captures)
    }

    /// True for CFG edges (control flow between blocks).
    pub fn is_control_flow(&self) -> bool {
        matches!(
            self,
            EdgeKind::CfgNext | EdgeKind::CfgBranch | EdgeKind::CfgLoop | EdgeKind::CfgHandler
        )
    }
}

/// Free-form, optional context carried by an edge. Kept small; anything
/// language- or rule-specific belongs in `attrs`.
#[cfg_attr(feature = "python", pyclass(get_all, set_all))]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeMetadata {
    /// Alias bound at the import/use site (`import x as y` -> `Some("y")`).
    pub alias: Option<String>,
    /// True when the edge originates from a `from module import name` form.
    pub is_from_import: bool,
}

/// A canonical IR edge. `occurrence` disambiguates repeated edges of the
/// same kind between the same two nodes (e.g. a function called twice
/// from the same caller) and feeds the edge-id hash.
#[cfg_attr(feature = "python", pyclass(get_all))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub kind: EdgeKind,
    pub source_id: String,
    pub target_id: String,
    pub occurrence: u32,
    pub span: Option<Span>,
    pub metadata: Option<EdgeMetadata>,
    pub attrs: Option<serde_json::Value>,
}

impl Edge {
    /// Construct an edge whose `id` is already known (e.g. computed by
    /// `shared::utils::identity::edge_id`).
    pub fn new(
        id: String,
        kind: EdgeKind,
        source_id: String,
        target_id: String,
        occurrence: u32,
    ) -> Self {
        Self {
            id,
            kind,
            source_id,
            target_id,
            occurrence,
            span: None,
            metadata: None,
            attrs: None,
        }
    }

    /// Construct an edge from source/target/kind alone, deriving the id
    /// via `shared::utils::identity::edge_id` with `occurrence = 0`.
    /// Callers that need to disambiguate repeated edges between the same
    /// pair of nodes should use `new` directly with an explicit occurrence.
    pub fn new_auto(source_id: String, target_id: String, kind: EdgeKind) -> Self {
        let id = crate::shared::utils::identity::edge_id(kind, &source_id, &target_id, 0);
        Self::new(id, kind, source_id, target_id, 0)
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_metadata(mut self, metadata: EdgeMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

//! Evidence: proof that a high-level answer is backed by specific graph
//! elements (C10). One `Evidence` record is written per result produced by
//! query execution, referencing the nodes/edges used as proof.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceKind {
    TaintFlow,
    Slice,
    Dataflow,
    Impact,
    TypeInference,
    FixVerification,
    CallChain,
    DataDependency,
}

/// References to the graph elements an evidence record is built from, kept
/// for replay and validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphRefs {
    pub node_ids: Vec<String>,
    pub edge_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evidence {
    pub evidence_id: String,
    pub kind: EvidenceKind,
    pub snapshot_id: String,
    pub graph_refs: GraphRefs,
    pub constraint_summary: Option<String>,
    pub rule_id: Option<String>,
    pub rule_hash: Option<String>,
    pub solver_trace_ref: Option<String>,
    pub plan_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub extra_data: serde_json::Value,
}

impl Evidence {
    /// Builds evidence with a default 30-day TTL from `created_at`.
    pub fn create(
        evidence_id: impl Into<String>,
        kind: EvidenceKind,
        snapshot_id: impl Into<String>,
        graph_refs: GraphRefs,
        plan_hash: Option<String>,
    ) -> Self {
        Self::create_with_ttl(evidence_id, kind, snapshot_id, graph_refs, plan_hash, 30)
    }

    pub fn create_with_ttl(
        evidence_id: impl Into<String>,
        kind: EvidenceKind,
        snapshot_id: impl Into<String>,
        graph_refs: GraphRefs,
        plan_hash: Option<String>,
        ttl_days: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            evidence_id: evidence_id.into(),
            kind,
            snapshot_id: snapshot_id.into(),
            graph_refs,
            constraint_summary: None,
            rule_id: None,
            rule_hash: None,
            solver_trace_ref: None,
            plan_hash,
            created_at: now,
            expires_at: Some(now + Duration::days(ttl_days)),
            extra_data: serde_json::Value::Null,
        }
    }

    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(exp) => Utc::now() > exp,
            None => false,
        }
    }
}

/// Lightweight reference to evidence, for embedding in API responses
/// without paying for the full record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceRef {
    pub evidence_id: String,
    pub kind: EvidenceKind,
    pub created_at: DateTime<Utc>,
}

impl From<&Evidence> for EvidenceRef {
    fn from(e: &Evidence) -> Self {
        Self {
            evidence_id: e.evidence_id.clone(),
            kind: e.kind,
            created_at: e.created_at,
        }
    }
}

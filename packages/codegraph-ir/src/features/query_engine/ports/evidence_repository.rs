//! Port for evidence storage (C10). Implementation lives in
//! `infrastructure::evidence_store`.

use crate::features::query_engine::domain::{Evidence, EvidenceKind};
use crate::shared::models::Result;

pub trait EvidenceRepository: Send + Sync {
    /// Appends evidence. The store is append-only within a snapshot:
    /// a conflicting `evidence_id` is rejected.
    fn save(&self, evidence: Evidence) -> Result<()>;

    fn get_by_id(&self, evidence_id: &str) -> Option<Evidence>;

    /// Lists non-expired evidence for a snapshot, most recent first.
    fn list_by_snapshot(
        &self,
        snapshot_id: &str,
        kind: Option<EvidenceKind>,
        limit: usize,
    ) -> Vec<Evidence>;

    /// Deletes all evidence for a snapshot (cascades on snapshot deletion).
    fn delete_by_snapshot(&self, snapshot_id: &str) -> usize;

    /// Culls expired evidence across all snapshots.
    fn delete_expired(&self) -> usize;

    fn exists(&self, evidence_id: &str) -> bool;
}

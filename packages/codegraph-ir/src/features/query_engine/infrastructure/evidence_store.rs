//! In-memory, append-only evidence store (C10).
//!
//! Keyed by `evidence_id`; indexed by `snapshot_id` for listing and cascade
//! deletion. A production deployment would back this with the same
//! PostgreSQL/SQLite adapters `features::storage` uses; this substrate is
//! the in-process default.

use dashmap::DashMap;
use std::sync::Mutex;

use crate::features::query_engine::domain::{Evidence, EvidenceKind};
use crate::features::query_engine::ports::EvidenceRepository;
use crate::shared::models::{CodegraphError, Result};

#[derive(Default)]
pub struct InMemoryEvidenceStore {
    by_id: DashMap<String, Evidence>,
    by_snapshot: Mutex<std::collections::HashMap<String, Vec<String>>>,
}

impl InMemoryEvidenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EvidenceRepository for InMemoryEvidenceStore {
    fn save(&self, evidence: Evidence) -> Result<()> {
        if self.by_id.contains_key(&evidence.evidence_id) {
            return Err(CodegraphError::evidence_conflict(format!(
                "evidence id already exists: {}",
                evidence.evidence_id
            )));
        }
        let mut by_snapshot = self.by_snapshot.lock().unwrap();
        by_snapshot
            .entry(evidence.snapshot_id.clone())
            .or_default()
            .push(evidence.evidence_id.clone());
        drop(by_snapshot);

        self.by_id.insert(evidence.evidence_id.clone(), evidence);
        Ok(())
    }

    fn get_by_id(&self, evidence_id: &str) -> Option<Evidence> {
        self.by_id.get(evidence_id).and_then(|e| {
            if e.is_expired() {
                None
            } else {
                Some(e.clone())
            }
        })
    }

    fn list_by_snapshot(
        &self,
        snapshot_id: &str,
        kind: Option<EvidenceKind>,
        limit: usize,
    ) -> Vec<Evidence> {
        let by_snapshot = self.by_snapshot.lock().unwrap();
        let ids = match by_snapshot.get(snapshot_id) {
            Some(ids) => ids.clone(),
            None => return Vec::new(),
        };
        drop(by_snapshot);

        let mut results: Vec<Evidence> = ids
            .into_iter()
            .filter_map(|id| self.by_id.get(&id).map(|e| e.clone()))
            .filter(|e| !e.is_expired())
            .filter(|e| kind.map(|k| k == e.kind).unwrap_or(true))
            .collect();

        results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        results.truncate(limit);
        results
    }

    fn delete_by_snapshot(&self, snapshot_id: &str) -> usize {
        let mut by_snapshot = self.by_snapshot.lock().unwrap();
        let ids = by_snapshot.remove(snapshot_id).unwrap_or_default();
        drop(by_snapshot);

        let mut deleted = 0;
        for id in ids {
            if self.by_id.remove(&id).is_some() {
                deleted += 1;
            }
        }
        deleted
    }

    fn delete_expired(&self) -> usize {
        let expired_ids: Vec<String> = self
            .by_id
            .iter()
            .filter(|entry| entry.value().is_expired())
            .map(|entry| entry.key().clone())
            .collect();

        for id in &expired_ids {
            self.by_id.remove(id);
        }

        let mut by_snapshot = self.by_snapshot.lock().unwrap();
        for ids in by_snapshot.values_mut() {
            ids.retain(|id| !expired_ids.contains(id));
        }

        expired_ids.len()
    }

    fn exists(&self, evidence_id: &str) -> bool {
        self.get_by_id(evidence_id).is_some()
    }
}

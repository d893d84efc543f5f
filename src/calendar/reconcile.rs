//! Remote/local calendar reconciliation
//!
//! Pure diff between what the provider returned for a window and what is
//! stored locally for the same window. The sync service applies the plan.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::event::RemoteEvent;
use crate::models::StoredEventDigest;

/// Row changes needed to mirror one calendar fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    /// Events not stored yet
    pub inserts: Vec<RemoteEvent>,
    /// Stored events whose content changed, or that come back from a soft delete
    pub updates: Vec<RemoteEvent>,
    /// Unchanged events; only the sync timestamp moves
    pub touches: Vec<String>,
    /// Stored event ids absent from the fetch
    pub soft_deletes: Vec<String>,
}

/// Per-plan counters reported by the sync endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileCounts {
    pub added: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub deleted: usize,
}

impl ReconcilePlan {
    pub fn counts(&self) -> ReconcileCounts {
        ReconcileCounts {
            added: self.inserts.len(),
            updated: self.updates.len(),
            unchanged: self.touches.len(),
            deleted: self.soft_deletes.len(),
        }
    }

    /// Whether applying the plan changes any stored content
    pub fn is_noop(&self) -> bool {
        self.inserts.is_empty() && self.updates.is_empty() && self.soft_deletes.is_empty()
    }
}

impl std::ops::AddAssign for ReconcileCounts {
    fn add_assign(&mut self, other: Self) {
        self.added += other.added;
        self.updated += other.updated;
        self.unchanged += other.unchanged;
        self.deleted += other.deleted;
    }
}

/// Diff `fetched` against the stored digests of the same window.
///
/// Events fetched twice are reconciled once, keeping the last copy.
pub fn reconcile(existing: &[StoredEventDigest], fetched: &[RemoteEvent]) -> ReconcilePlan {
    let stored: HashMap<&str, &StoredEventDigest> = existing
        .iter()
        .map(|digest| (digest.google_event_id.as_str(), digest))
        .collect();

    let mut latest: HashMap<&str, &RemoteEvent> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for event in fetched {
        if latest.insert(event.google_event_id.as_str(), event).is_none() {
            order.push(event.google_event_id.as_str());
        }
    }

    let mut plan = ReconcilePlan::default();

    for id in &order {
        let event = latest[id];
        match stored.get(id) {
            None => plan.inserts.push(event.clone()),
            Some(digest) if digest.is_deleted || digest.content_hash != event.content_hash() => {
                plan.updates.push(event.clone())
            }
            Some(_) => plan.touches.push(event.google_event_id.clone()),
        }
    }

    let fetched_ids: HashSet<&str> = order.into_iter().collect();
    plan.soft_deletes = existing
        .iter()
        .filter(|digest| !digest.is_deleted)
        .filter(|digest| !fetched_ids.contains(digest.google_event_id.as_str()))
        .map(|digest| digest.google_event_id.clone())
        .collect();

    plan
}

/// [`reconcile`] for a fetch that stopped before the end of its window.
///
/// Inserts and updates still apply; absent events are left alone.
pub fn reconcile_partial(existing: &[StoredEventDigest], fetched: &[RemoteEvent]) -> ReconcilePlan {
    ReconcilePlan {
        soft_deletes: Vec::new(),
        ..reconcile(existing, fetched)
    }
}

use std::collections::{BTreeSet, HashMap};
use std::time::Instant;

use crate::types::PopupId;

/// Pending auto-dismiss deadlines, one per popup at most.
///
/// Deadlines are ordered so a tick only looks at the ones that are due.
/// Cancelling removes the entry outright; a cancelled deadline can never
/// fire later against a popup that reused its slot.
#[derive(Debug, Default)]
pub struct DismissTimers {
    by_deadline: BTreeSet<(Instant, PopupId)>,
    by_popup: HashMap<PopupId, Instant>,
}

impl DismissTimers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the deadline of `id`.
    pub fn schedule(&mut self, id: PopupId, at: Instant) {
        if let Some(previous) = self.by_popup.insert(id, at) {
            self.by_deadline.remove(&(previous, id));
        }
        self.by_deadline.insert((at, id));
    }

    /// Returns whether a deadline was pending.
    pub fn cancel(&mut self, id: PopupId) -> bool {
        match self.by_popup.remove(&id) {
            Some(at) => self.by_deadline.remove(&(at, id)),
            None => false,
        }
    }

    /// Remove and return every popup whose deadline is at or before `now`,
    /// earliest first.
    pub fn due(&mut self, now: Instant) -> Vec<PopupId> {
        let mut fired = Vec::new();
        while let Some(&(at, id)) = self.by_deadline.first() {
            if at > now {
                break;
            }
            self.by_deadline.pop_first();
            self.by_popup.remove(&id);
            fired.push(id);
        }
        fired
    }

    #[must_use]
    pub fn deadline(&self, id: PopupId) -> Option<Instant> {
        self.by_popup.get(&id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_popup.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_popup.is_empty()
    }
}

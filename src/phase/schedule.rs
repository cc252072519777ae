//! Phase schedules
//!
//! A schedule is a module's phase sequence ordered by weight. The
//! schedule never stores which phase is active; that is recomputed for
//! every decision against the caller's reference instant.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::window::{Capability, PhasePosition, PhaseWindow};

/// An ordered sequence of phase windows belonging to one module.
///
/// Construction sorts by weight (stable), so snapshots that arrive
/// out of order are tolerated rather than rejected; enforcing the
/// non-overlap invariant is the snapshot validator's job, not the
/// evaluator's. When windows do overlap, lookups deterministically
/// return the first match in weight order.
#[derive(Debug, Clone, Default)]
pub struct PhaseSchedule {
    windows: Vec<PhaseWindow>,
}

impl PhaseSchedule {
    /// Creates a schedule from the given windows, ordering them by
    /// weight.
    #[must_use]
    pub fn new(mut windows: Vec<PhaseWindow>) -> Self {
        if !windows.is_sorted_by_key(|w| w.weight) {
            debug!(count = windows.len(), "phase snapshot arrived out of weight order");
            windows.sort_by_key(|w| w.weight);
        }
        Self { windows }
    }

    /// Returns the windows in weight order.
    #[must_use]
    pub fn windows(&self) -> &[PhaseWindow] {
        &self.windows
    }

    /// Returns the number of windows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Returns `true` if the schedule has no windows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Returns the index of the first active window at `now`, if any.
    ///
    /// Returns `None` before the first window, after the last, inside a
    /// gap between windows, or for an empty schedule.
    #[must_use]
    pub fn active_index_at(&self, now: DateTime<Utc>) -> Option<usize> {
        self.windows.iter().position(|w| w.is_active_at(now))
    }

    /// Returns the first active window at `now`, if any.
    #[must_use]
    pub fn active_at(&self, now: DateTime<Utc>) -> Option<&PhaseWindow> {
        self.active_index_at(now).map(|i| &self.windows[i])
    }

    /// Returns the first active window granting `capability` at `now`.
    #[must_use]
    pub fn active_granting_at(
        &self,
        capability: Capability,
        now: DateTime<Utc>,
    ) -> Option<&PhaseWindow> {
        self.windows
            .iter()
            .find(|w| w.capability == capability && w.is_active_at(now))
    }

    /// Returns a schedule restricted to windows granting `capability`.
    #[must_use]
    pub fn granting(&self, capability: Capability) -> Self {
        Self {
            windows: self
                .windows
                .iter()
                .filter(|w| w.capability == capability)
                .cloned()
                .collect(),
        }
    }

    /// Classifies the whole module relative to `now`.
    ///
    /// Active while any window is open. Otherwise the instant is either
    /// past the final window (`Past`) or ahead of a window that has not
    /// opened (`Future`) — which covers the pre-schedule span, gaps
    /// between windows, and empty schedules alike.
    #[must_use]
    pub fn position_at(&self, now: DateTime<Utc>) -> PhasePosition {
        if self.active_index_at(now).is_some() {
            return PhasePosition::Active;
        }
        match self.windows.last() {
            Some(last) if last.position_at(now) == PhasePosition::Past => PhasePosition::Past,
            _ => PhasePosition::Future,
        }
    }
}

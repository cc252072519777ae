//! Phase window representation and classification
//!
//! A phase window is an interval `[start, end)` on the UTC timeline.
//! Either bound may be unset: an unbounded start is treated as already
//! begun, an unbounded end as never ending.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EvalError;

/// Position of a phase window relative to a reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhasePosition {
    /// The window has closed (`now >= end`)
    Past,
    /// The window is open
    Active,
    /// The window has not opened yet (`now < start`)
    Future,
}

impl PhasePosition {
    /// Returns `true` if this is the active position.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for PhasePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Past => "past",
            Self::Active => "active",
            Self::Future => "future",
        };
        write!(f, "{s}")
    }
}

/// The content action a phase grants while active.
///
/// Mirrors the participation module types: commenting on documents,
/// submitting ideas or budget proposals, prioritizing topics, voting
/// in polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Commenting on existing content
    Comment,
    /// Submitting ideas or proposals
    Propose,
    /// Rating and ranking topics
    Prioritize,
    /// Voting in polls
    Poll,
    /// Submitting budgeting proposals with an amount
    Budget,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Comment => "comment",
            Self::Propose => "propose",
            Self::Prioritize => "prioritize",
            Self::Poll => "poll",
            Self::Budget => "budget",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Capability {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "comment" => Ok(Self::Comment),
            "propose" => Ok(Self::Propose),
            "prioritize" => Ok(Self::Prioritize),
            "poll" => Ok(Self::Poll),
            "budget" => Ok(Self::Budget),
            other => Err(EvalError::UnknownCapability(other.to_string())),
        }
    }
}

/// A time-bounded stage within a module, granting one capability while
/// active.
///
/// `weight` determines the window's position within its module's
/// sequence. Windows are value snapshots: the evaluator never mutates
/// them and recomputes every classification, since `now` moves
/// continuously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseWindow {
    /// Display name of the phase
    pub name: String,
    /// Ordering index within the owning module
    pub weight: i32,
    /// Capability granted while this window is active
    pub capability: Capability,
    /// Opening instant (inclusive); `None` means already begun
    pub starts: Option<DateTime<Utc>>,
    /// Closing instant (exclusive); `None` means never ending
    pub ends: Option<DateTime<Utc>>,
}

impl PhaseWindow {
    /// Classifies this window relative to `now`.
    ///
    /// The start is inclusive and the end exclusive: a window becomes
    /// active exactly at `starts` and stops being active exactly at
    /// `ends`. A window with both bounds unset is always active.
    #[must_use]
    pub fn position_at(&self, now: DateTime<Utc>) -> PhasePosition {
        if let Some(starts) = self.starts {
            if now < starts {
                return PhasePosition::Future;
            }
        }
        if let Some(ends) = self.ends {
            if now >= ends {
                return PhasePosition::Past;
            }
        }
        PhasePosition::Active
    }

    /// Returns `true` if the window is open at `now`.
    #[must_use]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.position_at(now).is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn window(starts: Option<DateTime<Utc>>, ends: Option<DateTime<Utc>>) -> PhaseWindow {
        PhaseWindow {
            name: "collect".to_string(),
            weight: 0,
            capability: Capability::Propose,
            starts,
            ends,
        }
    }

    fn t(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, h, 0, 0).unwrap()
    }

    #[test]
    fn test_before_start_is_future() {
        let w = window(Some(t(10)), Some(t(12)));
        assert_eq!(w.position_at(t(9)), PhasePosition::Future);
    }

    #[test]
    fn test_start_boundary_is_inclusive() {
        let w = window(Some(t(10)), Some(t(12)));
        assert_eq!(w.position_at(t(10)), PhasePosition::Active);
        assert_eq!(
            w.position_at(t(10) - Duration::nanoseconds(1)),
            PhasePosition::Future
        );
    }

    #[test]
    fn test_end_boundary_is_exclusive() {
        let w = window(Some(t(10)), Some(t(12)));
        assert_eq!(w.position_at(t(12)), PhasePosition::Past);
        assert_eq!(
            w.position_at(t(12) - Duration::nanoseconds(1)),
            PhasePosition::Active
        );
    }

    #[test]
    fn test_after_end_is_past() {
        let w = window(Some(t(10)), Some(t(12)));
        assert_eq!(w.position_at(t(13)), PhasePosition::Past);
    }

    #[test]
    fn test_unbounded_start_never_future() {
        let w = window(None, Some(t(12)));
        assert_eq!(w.position_at(t(0)), PhasePosition::Active);
        assert_eq!(w.position_at(t(12)), PhasePosition::Past);
    }

    #[test]
    fn test_unbounded_end_never_past() {
        let w = window(Some(t(10)), None);
        assert_eq!(w.position_at(t(9)), PhasePosition::Future);
        assert_eq!(w.position_at(t(23)), PhasePosition::Active);
    }

    #[test]
    fn test_open_ended_window_always_active() {
        let w = window(None, None);
        assert_eq!(w.position_at(t(0)), PhasePosition::Active);
        assert_eq!(w.position_at(t(23)), PhasePosition::Active);
    }

    #[test]
    fn test_position_display() {
        assert_eq!(PhasePosition::Past.to_string(), "past");
        assert_eq!(PhasePosition::Active.to_string(), "active");
        assert_eq!(PhasePosition::Future.to_string(), "future");
    }

    #[test]
    fn test_capability_from_str() {
        assert_eq!("prioritize".parse::<Capability>().unwrap(), Capability::Prioritize);
        assert_eq!("budget".parse::<Capability>().unwrap(), Capability::Budget);
    }

    #[test]
    fn test_capability_unknown_fails_closed() {
        let err = "vote".parse::<Capability>().unwrap_err();
        assert!(matches!(err, EvalError::UnknownCapability(s) if s == "vote"));
    }

    #[test]
    fn test_capability_display_round_trip() {
        for cap in [
            Capability::Comment,
            Capability::Propose,
            Capability::Prioritize,
            Capability::Poll,
            Capability::Budget,
        ] {
            assert_eq!(cap.to_string().parse::<Capability>().unwrap(), cap);
        }
    }
}

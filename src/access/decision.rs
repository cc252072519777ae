//! Content-modification decisions
//!
//! The decision table combines role, phase position, and consent into
//! one of three outcomes. The terms-required outcome is deliberately
//! distinct from a plain deny: the caller renders a consent prompt and
//! re-shows the form instead of rejecting outright, and the same
//! request succeeds once a consent record exists.
//!
//! Consent is re-checked on every write attempt rather than cached,
//! because it can be revoked or newly granted between requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::phase::{PhasePosition, PhaseSchedule};

use super::role::Role;

/// Outcome of a content-modification check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// The write may proceed
    Allow,
    /// The write is rejected
    Deny,
    /// The write is rejected until the caller agrees to the
    /// organisation's terms of use
    TermsRequired,
}

impl Decision {
    /// Returns `true` if the write may proceed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Allow => "allow",
            Self::Deny => "deny",
            Self::TermsRequired => "terms_required",
        };
        write!(f, "{s}")
    }
}

/// Decides whether a caller may create or modify content gated by a
/// phase in the given position.
///
/// Ordinary users are confined to the active window; moderators,
/// initiators, and admins may also prepare content before a phase opens
/// and tidy up after it closes. Consent to the organisation's terms of
/// use gates every non-admin write inside the active window.
#[must_use]
pub const fn can_modify_content(
    role: Role,
    position: PhasePosition,
    has_consented: bool,
) -> Decision {
    match role {
        Role::Admin => Decision::Allow,
        Role::Anonymous => Decision::Deny,
        Role::Moderator | Role::Initiator => match position {
            PhasePosition::Active => consent_gate(has_consented),
            PhasePosition::Past | PhasePosition::Future => Decision::Allow,
        },
        Role::User => match position {
            PhasePosition::Active => consent_gate(has_consented),
            PhasePosition::Past | PhasePosition::Future => Decision::Deny,
        },
    }
}

const fn consent_gate(has_consented: bool) -> Decision {
    if has_consented {
        Decision::Allow
    } else {
        Decision::TermsRequired
    }
}

/// A module-level decision: the outcome plus the phase context it was
/// derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleDecision {
    /// The decision outcome
    pub decision: Decision,
    /// How the instant classified against the module's schedule
    pub position: PhasePosition,
    /// Index of the active window in weight order, if one was open
    pub active_phase: Option<usize>,
}

/// Evaluates a whole module at an instant.
///
/// Uses the active window if one is open; otherwise the instant
/// classifies as before or after the schedule, which keeps the
/// privileged-role allowance outside strict windows and denies
/// ordinary users there.
#[must_use]
pub fn decide_for_module(
    schedule: &PhaseSchedule,
    role: Role,
    has_consented: bool,
    now: DateTime<Utc>,
) -> ModuleDecision {
    let active_phase = schedule.active_index_at(now);
    let position = schedule.position_at(now);
    ModuleDecision {
        decision: can_modify_content(role, position, has_consented),
        position,
        active_phase,
    }
}

//! Property tests for classification totality and decision invariants.

use chrono::{DateTime, TimeZone, Utc};
use phasegate::access::{Decision, Role, can_modify_content, decide_for_module};
use phasegate::phase::{Capability, PhasePosition, PhaseSchedule, PhaseWindow};
use proptest::prelude::*;

// Seconds within a ±300-year span around the epoch; comfortably inside
// chrono's representable range.
const SPAN: i64 = 10_000_000_000;

fn instant(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

fn bounded_window(starts: i64, ends: i64) -> PhaseWindow {
    PhaseWindow {
        name: "w".to_string(),
        weight: 0,
        capability: Capability::Propose,
        starts: Some(instant(starts)),
        ends: Some(instant(ends)),
    }
}

fn any_role() -> impl Strategy<Value = Role> {
    prop::sample::select(vec![
        Role::Anonymous,
        Role::User,
        Role::Moderator,
        Role::Initiator,
        Role::Admin,
    ])
}

fn any_position() -> impl Strategy<Value = PhasePosition> {
    prop::sample::select(vec![
        PhasePosition::Past,
        PhasePosition::Active,
        PhasePosition::Future,
    ])
}

proptest! {
    #[test]
    fn classification_matches_interval_membership(
        a in -SPAN..SPAN,
        b in -SPAN..SPAN,
        now in -SPAN..SPAN,
    ) {
        let (starts, ends) = (a.min(b), a.max(b));
        let w = bounded_window(starts, ends);
        let now = instant(now);

        // Exactly one of the three positions holds, and it is the one
        // interval membership predicts: [starts, ends).
        match w.position_at(now) {
            PhasePosition::Future => prop_assert!(now < instant(starts)),
            PhasePosition::Active => {
                prop_assert!(now >= instant(starts) && now < instant(ends));
            }
            PhasePosition::Past => prop_assert!(now >= instant(ends)),
        }
    }

    #[test]
    fn unbounded_start_is_never_future(end in -SPAN..SPAN, now in -SPAN..SPAN) {
        let w = PhaseWindow {
            starts: None,
            ..bounded_window(0, end)
        };
        prop_assert_ne!(w.position_at(instant(now)), PhasePosition::Future);
    }

    #[test]
    fn unbounded_end_is_never_past(start in -SPAN..SPAN, now in -SPAN..SPAN) {
        let w = PhaseWindow {
            ends: None,
            ..bounded_window(start, 0)
        };
        prop_assert_ne!(w.position_at(instant(now)), PhasePosition::Past);
    }

    #[test]
    fn active_lookup_is_deterministic(
        bounds in prop::collection::vec((-SPAN..SPAN, -SPAN..SPAN), 0..6),
        now in -SPAN..SPAN,
    ) {
        // Arbitrary (possibly overlapping) schedules: lookups must be
        // stable and the reported window genuinely active, with no
        // earlier-weight window also active.
        let windows: Vec<PhaseWindow> = bounds
            .iter()
            .enumerate()
            .map(|(i, &(a, b))| PhaseWindow {
                weight: i32::try_from(i).unwrap(),
                ..bounded_window(a.min(b), a.max(b))
            })
            .collect();
        let schedule = PhaseSchedule::new(windows);
        let now = instant(now);

        let first = schedule.active_index_at(now);
        prop_assert_eq!(schedule.active_index_at(now), first);

        if let Some(index) = first {
            prop_assert!(schedule.windows()[index].is_active_at(now));
            for earlier in &schedule.windows()[..index] {
                prop_assert!(!earlier.is_active_at(now));
            }
        } else {
            for window in schedule.windows() {
                prop_assert!(!window.is_active_at(now));
            }
        }
    }

    #[test]
    fn anonymous_is_never_allowed(position in any_position(), consented in any::<bool>()) {
        prop_assert_eq!(
            can_modify_content(Role::Anonymous, position, consented),
            Decision::Deny
        );
    }

    #[test]
    fn admin_is_always_allowed(position in any_position(), consented in any::<bool>()) {
        prop_assert_eq!(
            can_modify_content(Role::Admin, position, consented),
            Decision::Allow
        );
    }

    #[test]
    fn users_are_allowed_only_in_consented_active_windows(
        position in any_position(),
        consented in any::<bool>(),
    ) {
        let decision = can_modify_content(Role::User, position, consented);
        prop_assert_eq!(
            decision == Decision::Allow,
            position == PhasePosition::Active && consented
        );
    }

    #[test]
    fn terms_prompt_only_appears_in_active_windows(
        role in any_role(),
        position in any_position(),
        consented in any::<bool>(),
    ) {
        let decision = can_modify_content(role, position, consented);
        if decision == Decision::TermsRequired {
            prop_assert_eq!(position, PhasePosition::Active);
            prop_assert!(!consented);
        }
    }

    #[test]
    fn module_decision_agrees_with_the_table(
        bounds in prop::collection::vec((-SPAN..SPAN, -SPAN..SPAN), 0..6),
        now in -SPAN..SPAN,
        role in any_role(),
        consented in any::<bool>(),
    ) {
        let windows: Vec<PhaseWindow> = bounds
            .iter()
            .enumerate()
            .map(|(i, &(a, b))| PhaseWindow {
                weight: i32::try_from(i).unwrap(),
                ..bounded_window(a.min(b), a.max(b))
            })
            .collect();
        let schedule = PhaseSchedule::new(windows);
        let now = instant(now);

        let outcome = decide_for_module(&schedule, role, consented, now);
        prop_assert_eq!(
            outcome.decision,
            can_modify_content(role, outcome.position, consented)
        );
        prop_assert_eq!(
            outcome.active_phase.is_some(),
            outcome.position == PhasePosition::Active
        );
    }
}

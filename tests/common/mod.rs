//! Shared helpers for integration tests.
//!
//! Each test binary compiles this module separately and uses a
//! different subset of the helpers.
#![allow(dead_code)]

use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use phasegate::phase::{Capability, PhaseWindow};

/// Returns the path to a YAML fixture under `tests/fixtures/`.
#[must_use]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// An instant on a fixed test day, offset by hours.
#[must_use]
pub fn hour(h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 1, h, 0, 0).unwrap()
}

/// A bounded prioritization window for schedule tests.
#[must_use]
pub fn window(name: &str, weight: i32, starts: DateTime<Utc>, ends: DateTime<Utc>) -> PhaseWindow {
    PhaseWindow {
        name: name.to_string(),
        weight,
        capability: Capability::Prioritize,
        starts: Some(starts),
        ends: Some(ends),
    }
}

//! Snapshot schema types
//!
//! These types are deserialized from YAML snapshot files. They are a
//! read-only export of the owning platform's state: one organisation,
//! one project, the project's modules with their phase schedules, and
//! the organisation's recorded terms-of-use consents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::phase::{Capability, PhaseSchedule, PhaseWindow};

// ============================================================================
// Top-Level Snapshot
// ============================================================================

/// Root of a participation snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SnapshotConfig {
    /// The organisation running the project (required)
    pub organisation: OrganisationConfig,

    /// The project the modules belong to (required)
    pub project: ProjectConfig,

    /// Participation modules with their phase schedules
    #[serde(default)]
    pub modules: Vec<ModuleConfig>,

    /// Recorded terms-of-use consents, keyed by user identifier
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consents: Vec<ConsentRecord>,
}

impl SnapshotConfig {
    /// Looks up a module by name.
    #[must_use]
    pub fn module(&self, name: &str) -> Option<&ModuleConfig> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Returns whether `user` has agreed to the organisation's terms of
    /// use.
    ///
    /// A user with no record has not consented. When duplicate records
    /// exist the last one wins, matching the append-only way consent is
    /// recorded and revoked upstream.
    #[must_use]
    pub fn has_consented(&self, user: &str) -> bool {
        self.consents
            .iter()
            .rev()
            .find(|c| c.user == user)
            .is_some_and(|c| c.agreed)
    }
}

// ============================================================================
// Organisation / Project
// ============================================================================

/// The organisation that owns the project and its terms of use.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OrganisationConfig {
    /// Organisation name (required)
    pub name: String,

    /// Where the terms of use are published, for consent prompts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_url: Option<String>,
}

/// The project hosting the modules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProjectConfig {
    /// Project name (required)
    pub name: String,
}

// ============================================================================
// Modules & Phases
// ============================================================================

/// A participation module: one ordered sequence of phases.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ModuleConfig {
    /// Module name, unique within the project (required)
    pub name: String,

    /// Phase definitions in any order; weight determines the sequence
    #[serde(default)]
    pub phases: Vec<PhaseConfig>,
}

impl ModuleConfig {
    /// Builds the module's phase schedule.
    #[must_use]
    pub fn schedule(&self) -> PhaseSchedule {
        PhaseSchedule::new(self.phases.iter().map(PhaseConfig::to_window).collect())
    }
}

/// One phase of a module.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PhaseConfig {
    /// Display name of the phase (required)
    pub name: String,

    /// Ordering index within the module (required)
    pub weight: i32,

    /// Capability granted while the phase is active (required)
    pub capability: Capability,

    /// Opening instant, RFC 3339; omit for a phase that has already begun
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts: Option<DateTime<Utc>>,

    /// Closing instant, RFC 3339, exclusive; omit for a phase that never ends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends: Option<DateTime<Utc>>,
}

impl PhaseConfig {
    /// Converts this definition into an evaluator window.
    #[must_use]
    pub fn to_window(&self) -> PhaseWindow {
        PhaseWindow {
            name: self.name.clone(),
            weight: self.weight,
            capability: self.capability,
            starts: self.starts,
            ends: self.ends,
        }
    }
}

// ============================================================================
// Consents
// ============================================================================

/// A recorded terms-of-use agreement for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ConsentRecord {
    /// User identifier (e-mail address upstream)
    pub user: String,

    /// Whether the user agreed; a `false` record revokes earlier consent
    pub agreed: bool,
}

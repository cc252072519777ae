//! Snapshot configuration
//!
//! Participation snapshots are YAML documents describing an
//! organisation, a project, its modules with their phase schedules, and
//! recorded terms-of-use consents. The loader runs a staged pipeline
//! and freezes the result; the validator enforces the schedule
//! invariants the evaluator itself deliberately tolerates.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{ConfigLimits, ConfigLoader, LoadResult, LoadWarning, LoaderOptions};
pub use schema::{
    ConsentRecord, ModuleConfig, OrganisationConfig, PhaseConfig, ProjectConfig, SnapshotConfig,
};
pub use validation::{ValidationResult, Validator};

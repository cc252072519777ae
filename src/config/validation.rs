//! Snapshot validation
//!
//! Schema-level checks happen during deserialization; this module does
//! the semantic pass: module and phase invariants, ordering, and
//! consent hygiene. Validation collects ALL issues instead of stopping
//! at the first, so one run reports everything a snapshot needs fixed.
//!
//! The schedule-ordering invariant lives here and not in the evaluator:
//! the evaluator tolerates malformed snapshots deterministically, the
//! validator is where they are rejected.

use std::collections::HashSet;

use crate::config::loader::ConfigLimits;
use crate::config::schema::{ModuleConfig, SnapshotConfig};
use crate::error::{Severity, ValidationIssue};

// ============================================================================
// Public API
// ============================================================================

/// Result of snapshot validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent loading).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Snapshot validator.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a snapshot and returns the collected issues.
    pub fn validate(
        &mut self,
        config: &SnapshotConfig,
        limits: &ConfigLimits,
    ) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        self.validate_organisation(config);
        self.validate_project(config);
        self.validate_modules(config, limits);
        self.validate_consents(config);

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    // ========================================================================
    // Organisation / Project
    // ========================================================================

    fn validate_organisation(&mut self, config: &SnapshotConfig) {
        if config.organisation.name.is_empty() {
            self.add_error(
                "organisation.name",
                "Organisation name is required and cannot be empty",
            );
        }

        if config.organisation.name.len() > 100 {
            self.add_warning(
                "organisation.name",
                "Organisation name is unusually long (> 100 characters)",
            );
        }
    }

    fn validate_project(&mut self, config: &SnapshotConfig) {
        if config.project.name.is_empty() {
            self.add_error("project.name", "Project name is required and cannot be empty");
        }
    }

    // ========================================================================
    // Modules
    // ========================================================================

    fn validate_modules(&mut self, config: &SnapshotConfig, limits: &ConfigLimits) {
        if config.modules.len() > limits.max_modules {
            self.add_error(
                "modules",
                &format!(
                    "Too many modules: {} (limit: {})",
                    config.modules.len(),
                    limits.max_modules
                ),
            );
        }

        let mut seen_names = HashSet::new();
        for (index, module) in config.modules.iter().enumerate() {
            let path = format!("modules[{index}]");

            if module.name.is_empty() {
                self.add_error(&path, "Module name is required and cannot be empty");
            } else if !seen_names.insert(module.name.as_str()) {
                self.add_error(&path, &format!("Duplicate module name '{}'", module.name));
            }

            self.validate_phases(&path, module, limits);
        }
    }

    fn validate_phases(&mut self, module_path: &str, module: &ModuleConfig, limits: &ConfigLimits) {
        if module.phases.is_empty() {
            self.add_warning(module_path, "Module has no phases; nothing will ever be active");
            return;
        }

        if module.phases.len() > limits.max_phases_per_module {
            self.add_error(
                &format!("{module_path}.phases"),
                &format!(
                    "Too many phases: {} (limit: {})",
                    module.phases.len(),
                    limits.max_phases_per_module
                ),
            );
        }

        let mut seen_weights = HashSet::new();
        for (index, phase) in module.phases.iter().enumerate() {
            let path = format!("{module_path}.phases[{index}]");

            if phase.name.is_empty() {
                self.add_error(&path, "Phase name is required and cannot be empty");
            }

            if !seen_weights.insert(phase.weight) {
                self.add_error(
                    &path,
                    &format!("Duplicate phase weight {} within module", phase.weight),
                );
            }

            if let (Some(starts), Some(ends)) = (phase.starts, phase.ends) {
                if starts >= ends {
                    self.add_error(
                        &path,
                        &format!("Phase window is empty or reversed: starts {starts}, ends {ends}"),
                    );
                }
            }
        }

        self.validate_phase_ordering(module_path, module);
    }

    /// Checks that bounded windows are chronologically increasing and
    /// non-overlapping along weight order, and that unbounded sides only
    /// appear at the edges of the sequence.
    fn validate_phase_ordering(&mut self, module_path: &str, module: &ModuleConfig) {
        let mut phases: Vec<_> = module.phases.iter().enumerate().collect();
        phases.sort_by_key(|(_, p)| p.weight);

        for pair in phases.windows(2) {
            let (prev_index, prev) = pair[0];
            let (next_index, next) = pair[1];
            let path = format!("{module_path}.phases[{next_index}]");

            if prev.ends.is_none() {
                self.add_error(
                    &format!("{module_path}.phases[{prev_index}]"),
                    "Phase with no end must be the last phase of the module",
                );
                continue;
            }

            match next.starts {
                None => {
                    self.add_error(&path, "Phase with no start must be the first phase of the module");
                }
                Some(starts) => {
                    if let Some(prev_ends) = prev.ends {
                        if starts < prev_ends {
                            self.add_error(
                                &path,
                                &format!(
                                    "Phase window overlaps previous phase '{}' (starts {} before it ends {})",
                                    prev.name, starts, prev_ends
                                ),
                            );
                        }
                    }
                }
            }
        }
    }

    // ========================================================================
    // Consents
    // ========================================================================

    fn validate_consents(&mut self, config: &SnapshotConfig) {
        let mut seen_users = HashSet::new();
        for (index, consent) in config.consents.iter().enumerate() {
            let path = format!("consents[{index}]");

            if consent.user.is_empty() {
                self.add_error(&path, "Consent record has an empty user identifier");
            } else if !seen_users.insert(consent.user.as_str()) {
                self.add_warning(
                    &path,
                    &format!(
                        "Duplicate consent record for '{}'; the last record wins",
                        consent.user
                    ),
                );
            }
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn add_error(&mut self, path: &str, message: &str) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    fn add_warning(&mut self, path: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}

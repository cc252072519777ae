//! `check` command handler
//!
//! Evaluates a content-modification decision for one caller against one
//! module of a snapshot, at a chosen or current instant.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::access::{Decision, Role, decide_for_module};
use crate::cli::args::{CheckArgs, OutputFormat};
use crate::clock::{Clock, SystemClock};
use crate::config::{ConfigLoader, SnapshotConfig};
use crate::error::{EvalError, PhasegateError};
use crate::phase::{Capability, PhasePosition};

/// Result of a `check` evaluation, serializable for `--format json`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CheckReport {
    /// Module that was evaluated
    pub module: String,
    /// Instant the decision was evaluated at
    pub at: DateTime<Utc>,
    /// Role the decision was evaluated for
    pub role: Role,
    /// Consent status fed into the decision
    pub has_consented: bool,
    /// Module classification at the instant
    pub position: PhasePosition,
    /// The decision outcome
    pub decision: Decision,
    /// The open window the decision was gated by, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_phase: Option<ActivePhaseReport>,
}

/// The active window a decision was derived from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ActivePhaseReport {
    /// Phase name
    pub name: String,
    /// Capability the phase grants
    pub capability: Capability,
    /// When the window closes, if bounded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends: Option<DateTime<Utc>>,
}

/// Evaluate and print a decision.
///
/// # Errors
///
/// Returns an error if the snapshot fails to load or the module does
/// not exist.
pub fn run(args: &CheckArgs) -> Result<(), PhasegateError> {
    let report = evaluate(args, &SystemClock)?;
    render(&report, args.format)
}

/// Evaluates the decision without printing, with an injectable clock.
///
/// # Errors
///
/// Returns an error if the snapshot fails to load or the module does
/// not exist.
pub fn evaluate(args: &CheckArgs, clock: &dyn Clock) -> Result<CheckReport, PhasegateError> {
    info!(config = %args.config.display(), "loading snapshot");
    let load = ConfigLoader::with_defaults().load(&args.config)?;
    for warning in &load.warnings {
        warn!(
            location = warning.location.as_deref().unwrap_or("<unknown>"),
            "{}",
            warning.message
        );
    }

    let config = load.config;
    let module = config
        .module(&args.module)
        .ok_or_else(|| EvalError::ModuleNotFound(args.module.clone()))?;

    let now = args.at.unwrap_or_else(|| clock.now());
    let has_consented = resolve_consent(args, &config);

    let schedule = args.capability.map_or_else(
        || module.schedule(),
        |capability| module.schedule().granting(capability),
    );

    let outcome = decide_for_module(&schedule, args.role, has_consented, now);
    let active_phase = outcome.active_phase.map(|index| {
        let window = &schedule.windows()[index];
        ActivePhaseReport {
            name: window.name.clone(),
            capability: window.capability,
            ends: window.ends,
        }
    });

    Ok(CheckReport {
        module: args.module.clone(),
        at: now,
        role: args.role,
        has_consented,
        position: outcome.position,
        decision: outcome.decision,
        active_phase,
    })
}

/// Consent comes from the `--consented` override or the snapshot's
/// records for `--user`; an unknown user has not consented.
fn resolve_consent(args: &CheckArgs, config: &SnapshotConfig) -> bool {
    args.consented
        || args
            .user
            .as_deref()
            .is_some_and(|user| config.has_consented(user))
}

fn render(report: &CheckReport, format: OutputFormat) -> Result<(), PhasegateError> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Human => {
            println!(
                "module '{}' at {}",
                report.module,
                report.at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
            );
            match &report.active_phase {
                Some(phase) => {
                    let closes = phase.ends.map_or_else(
                        || "open-ended".to_string(),
                        |ends| format!("ends {}", ends.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)),
                    );
                    println!("  active phase: {} ({}), {}", phase.name, phase.capability, closes);
                }
                None => println!("  no active phase ({})", report.position),
            }
            let consent = if report.has_consented {
                "consented"
            } else {
                "no consent"
            };
            println!("  {} ({}): {}", report.role, consent, report.decision);
        }
    }
    Ok(())
}

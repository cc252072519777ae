//! `timeline` command handler
//!
//! Classifies every phase of one module (or all modules) at an instant
//! and marks the active one.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::args::{OutputFormat, TimelineArgs};
use crate::clock::{Clock, SystemClock};
use crate::config::{ConfigLoader, ModuleConfig};
use crate::error::{EvalError, PhasegateError};
use crate::phase::{Capability, PhasePosition};

/// Timeline of one module at an instant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TimelineReport {
    /// Module name
    pub module: String,
    /// Instant the timeline was classified at
    pub at: DateTime<Utc>,
    /// Module-level classification
    pub position: PhasePosition,
    /// Per-phase classification in weight order
    pub phases: Vec<PhaseReport>,
}

/// One phase row of a timeline.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PhaseReport {
    /// Phase name
    pub name: String,
    /// Ordering index
    pub weight: i32,
    /// Capability the phase grants
    pub capability: Capability,
    /// Opening instant, if bounded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts: Option<DateTime<Utc>>,
    /// Closing instant, if bounded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends: Option<DateTime<Utc>>,
    /// Classification at the instant
    pub position: PhasePosition,
    /// Whether this is the schedule's active phase (first open window)
    pub active: bool,
}

/// Classify and print timelines.
///
/// # Errors
///
/// Returns an error if the snapshot fails to load or the named module
/// does not exist.
pub fn run(args: &TimelineArgs) -> Result<(), PhasegateError> {
    let reports = evaluate(args, &SystemClock)?;
    render(&reports, args.format)
}

/// Builds the timelines without printing, with an injectable clock.
///
/// # Errors
///
/// Returns an error if the snapshot fails to load or the named module
/// does not exist.
pub fn evaluate(
    args: &TimelineArgs,
    clock: &dyn Clock,
) -> Result<Vec<TimelineReport>, PhasegateError> {
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
    let now = args.at.unwrap_or_else(|| clock.now());

    let modules: Vec<&ModuleConfig> = match &args.module {
        Some(name) => vec![
            config
                .module(name)
                .ok_or_else(|| EvalError::ModuleNotFound(name.clone()))?,
        ],
        None => config.modules.iter().collect(),
    };

    Ok(modules
        .into_iter()
        .map(|module| build_report(module, now))
        .collect())
}

fn build_report(module: &ModuleConfig, now: DateTime<Utc>) -> TimelineReport {
    let schedule = module.schedule();
    let active_index = schedule.active_index_at(now);

    let phases = schedule
        .windows()
        .iter()
        .enumerate()
        .map(|(index, window)| PhaseReport {
            name: window.name.clone(),
            weight: window.weight,
            capability: window.capability,
            starts: window.starts,
            ends: window.ends,
            position: window.position_at(now),
            active: active_index == Some(index),
        })
        .collect();

    TimelineReport {
        module: module.name.clone(),
        at: now,
        position: schedule.position_at(now),
        phases,
    }
}

fn render(reports: &[TimelineReport], format: OutputFormat) -> Result<(), PhasegateError> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(reports)?),
        OutputFormat::Human => {
            for report in reports {
                println!(
                    "module '{}' at {} ({})",
                    report.module,
                    report.at.to_rfc3339_opts(SecondsFormat::Secs, true),
                    report.position
                );
                for phase in &report.phases {
                    let marker = if phase.active { "*" } else { " " };
                    println!(
                        "  {marker} {:<20} {:<10} {:<22} {:<22} {}",
                        phase.name,
                        phase.capability.to_string(),
                        bound(phase.starts),
                        bound(phase.ends),
                        phase.position
                    );
                }
            }
        }
    }
    Ok(())
}

fn bound(instant: Option<DateTime<Utc>>) -> String {
    instant.map_or_else(
        || "-".to_string(),
        |i| i.to_rfc3339_opts(SecondsFormat::Secs, true),
    )
}

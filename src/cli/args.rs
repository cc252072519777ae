//! CLI argument definitions
//!
//! All Clap derive structs for `phasegate` command-line parsing.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::access::Role;
use crate::phase::Capability;

// ============================================================================
// Root CLI
// ============================================================================

/// Phase-windowed access control for citizen participation platforms.
#[derive(Parser, Debug)]
#[command(name = "phasegate", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "PHASEGATE_COLOR")]
    pub color: ColorChoice,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate a content-modification decision against a snapshot.
    Check(CheckArgs),

    /// Show how a module's phases classify at an instant.
    Timeline(TimelineArgs),

    /// Validate snapshot files without evaluating anything.
    Validate(ValidateArgs),
}

// ============================================================================
// Check Command
// ============================================================================

/// Arguments for `check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the YAML snapshot file.
    #[arg(short, long, env = "PHASEGATE_SNAPSHOT")]
    pub config: PathBuf,

    /// Module to evaluate.
    #[arg(short, long)]
    pub module: String,

    /// Role of the caller.
    #[arg(short, long)]
    pub role: Role,

    /// User identifier for consent lookup in the snapshot.
    #[arg(short, long)]
    pub user: Option<String>,

    /// Treat the caller as having consented, regardless of records.
    #[arg(long, conflicts_with = "user")]
    pub consented: bool,

    /// Instant to evaluate at (RFC 3339, or a bare date for midnight
    /// UTC). Defaults to now.
    #[arg(long, value_parser = parse_instant)]
    pub at: Option<DateTime<Utc>>,

    /// Restrict the decision to phases granting this capability.
    #[arg(long)]
    pub capability: Option<Capability>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// Timeline Command
// ============================================================================

/// Arguments for `timeline`.
#[derive(Args, Debug)]
pub struct TimelineArgs {
    /// Path to the YAML snapshot file.
    #[arg(short, long, env = "PHASEGATE_SNAPSHOT")]
    pub config: PathBuf,

    /// Module to show. Omit to show every module in the snapshot.
    #[arg(short, long)]
    pub module: Option<String>,

    /// Instant to classify at (RFC 3339, or a bare date for midnight
    /// UTC). Defaults to now.
    #[arg(long, value_parser = parse_instant)]
    pub at: Option<DateTime<Utc>>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// Validate Command
// ============================================================================

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Snapshot files to validate.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Enable strict validation (warnings become errors).
    #[arg(long)]
    pub strict: bool,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

// ============================================================================
// Instant Parsing
// ============================================================================

/// Parses `--at` values: RFC 3339 timestamps, or a bare `YYYY-MM-DD`
/// date meaning midnight UTC of that day.
fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
        return Ok(instant.with_timezone(&Utc));
    }
    if let Ok(date) = s.parse::<NaiveDate>() {
        return Ok(DateTime::from_naive_utc_and_offset(
            date.and_hms_opt(0, 0, 0).expect("midnight is always valid"),
            Utc,
        ));
    }
    Err(format!(
        "invalid instant '{s}' (expected RFC 3339 like 2026-03-01T12:00:00Z, or YYYY-MM-DD)"
    ))
}

// ============================================================================
// Tests
// ============================================================================

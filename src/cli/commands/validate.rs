//! `validate` command handler
//!
//! Validates snapshot files without evaluating anything.

use serde::Serialize;
use tracing::{info, warn};

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::ConfigLoader;
use crate::error::{ConfigError, PhasegateError, Severity, ValidationIssue};

/// Per-file validation summary for `--format json`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
struct FileReport {
    file: String,
    valid: bool,
    modules: usize,
    warnings: Vec<String>,
}

/// Validate each snapshot file in turn.
///
/// Stops at the first file that fails to load or validate. With
/// `--strict`, warnings are promoted to errors.
///
/// # Errors
///
/// Returns an I/O error if any file does not exist, or a config error
/// if validation fails.
pub fn run(args: &ValidateArgs) -> Result<(), PhasegateError> {
    for path in &args.files {
        if !path.exists() {
            return Err(PhasegateError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("file not found: {}", path.display()),
            )));
        }
        info!(file = %path.display(), "validating snapshot");

        let load_result = ConfigLoader::with_defaults().load(path)?;

        if args.strict && !load_result.warnings.is_empty() {
            let errors = load_result
                .warnings
                .iter()
                .map(|warning| ValidationIssue {
                    path: warning.location.clone().unwrap_or_default(),
                    message: warning.message.clone(),
                    severity: Severity::Warning,
                })
                .collect();
            return Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                errors,
            }
            .into());
        }

        for warning in &load_result.warnings {
            warn!(
                location = warning.location.as_deref().unwrap_or("<unknown>"),
                "{}",
                warning.message
            );
        }

        match args.format {
            OutputFormat::Human => println!(
                "{}: ok ({} module(s), {} warning(s))",
                path.display(),
                load_result.config.modules.len(),
                load_result.warnings.len()
            ),
            OutputFormat::Json => {
                let report = FileReport {
                    file: path.display().to_string(),
                    valid: true,
                    modules: load_result.config.modules.len(),
                    warnings: load_result
                        .warnings
                        .iter()
                        .map(|w| w.message.clone())
                        .collect(),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
    }

    Ok(())
}

//! Snapshot loader
//!
//! Loading pipeline:
//! 1. File size check
//! 2. Read raw content (UTF-8 BOM tolerated)
//! 3. YAML parsing (line numbers preserved for errors)
//! 4. Deserialization to the typed snapshot
//! 5. Validation (collects all issues)
//! 6. Freeze with `Arc`

use std::path::Path;
use std::sync::Arc;

use serde_yaml::Value;

use crate::config::schema::SnapshotConfig;
use crate::config::validation::Validator;
use crate::error::ConfigError;

// ============================================================================
// Public API
// ============================================================================

/// Options for the snapshot loader.
#[derive(Debug, Clone, Default)]
pub struct LoaderOptions {
    /// Limits for snapshot size.
    pub limits: ConfigLimits,
}

/// Limits for snapshot size to prevent resource exhaustion.
#[derive(Debug, Clone)]
pub struct ConfigLimits {
    /// Maximum number of modules.
    pub max_modules: usize,

    /// Maximum number of phases per module.
    pub max_phases_per_module: usize,

    /// Maximum snapshot file size in bytes.
    pub max_config_size: usize,
}

impl Default for ConfigLimits {
    fn default() -> Self {
        Self {
            max_modules: env_or("PHASEGATE_MAX_MODULES", 100),
            max_phases_per_module: env_or("PHASEGATE_MAX_PHASES", 50),
            max_config_size: env_or("PHASEGATE_MAX_CONFIG_SIZE", 1024 * 1024),
        }
    }
}

/// Result of loading a snapshot file.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated snapshot.
    pub config: Arc<SnapshotConfig>,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning during snapshot loading.
#[derive(Debug, Clone)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Location where the warning occurred.
    pub location: Option<String>,
}

/// Snapshot loader.
///
/// Handles the full pipeline from YAML file to frozen [`SnapshotConfig`].
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: LoaderOptions,
}

impl ConfigLoader {
    /// Creates a new loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Creates a new loader with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Loads a snapshot file and returns the frozen configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, exceeds the size
    /// limit, fails to parse as YAML, or fails validation.
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let metadata = std::fs::metadata(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        let file_size =
            usize::try_from(metadata.len()).unwrap_or(self.options.limits.max_config_size);
        if file_size > self.options.limits.max_config_size {
            return Err(ConfigError::InvalidValue {
                field: "file_size".to_string(),
                value: format!("{file_size} bytes"),
                expected: format!("at most {} bytes", self.options.limits.max_config_size),
            });
        }

        let raw_content = std::fs::read_to_string(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        // Handle UTF-8 BOM
        let raw_content = raw_content.strip_prefix('\u{feff}').unwrap_or(&raw_content);

        let root: Value = serde_yaml::from_str(raw_content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        })?;

        if root.is_null() {
            return Err(ConfigError::ParseError {
                path: path.to_path_buf(),
                line: None,
                message: "Snapshot file is empty".to_string(),
            });
        }

        let config: SnapshotConfig =
            serde_yaml::from_value(root).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                line: None,
                message: format!("Failed to deserialize snapshot: {e}"),
            })?;

        let mut validator = Validator::new();
        let validation_result = validator.validate(&config, &self.options.limits);

        if validation_result.has_errors() {
            return Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                errors: validation_result.errors,
            });
        }

        for issue in validation_result.warnings {
            warnings.push(LoadWarning {
                message: issue.message,
                location: Some(issue.path),
            });
        }

        Ok(LoadResult {
            config: Arc::new(config),
            warnings,
        })
    }
}

/// Parses an environment variable with a default value.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_snapshot(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const VALID: &str = r"
organisation:
  name: Liquid Example
project:
  name: Transport Budget 2026
modules:
  - name: cycling-ideas
    phases:
      - name: collect
        weight: 0
        capability: propose
        starts: 2026-01-01T00:00:00Z
        ends: 2026-02-01T00:00:00Z
";

    #[test]
    fn test_load_valid_snapshot() {
        let file = write_snapshot(VALID);
        let result = ConfigLoader::with_defaults().load(file.path()).unwrap();
        assert_eq!(result.config.organisation.name, "Liquid Example");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let result = ConfigLoader::with_defaults().load(Path::new("/nonexistent/snapshot.yaml"));
        assert!(matches!(result, Err(ConfigError::MissingFile { .. })));
    }

    #[test]
    fn test_load_invalid_yaml_reports_line() {
        let file = write_snapshot("organisation:\n  name: [unclosed\n");
        let result = ConfigLoader::with_defaults().load(file.path());
        match result {
            Err(ConfigError::ParseError { line, .. }) => assert!(line.is_some()),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_empty_file() {
        let file = write_snapshot("");
        let result = ConfigLoader::with_defaults().load(file.path());
        match result {
            Err(ConfigError::ParseError { message, .. }) => {
                assert!(message.contains("empty"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_strips_bom() {
        let file = write_snapshot(&format!("\u{feff}{VALID}"));
        let result = ConfigLoader::with_defaults().load(file.path());
        assert!(result.is_ok());
    }

    #[test]
    fn test_load_validation_failure() {
        let overlapping = r"
organisation:
  name: org
project:
  name: project
modules:
  - name: m
    phases:
      - name: a
        weight: 0
        capability: propose
        starts: 2026-01-01T00:00:00Z
        ends: 2026-02-01T00:00:00Z
      - name: b
        weight: 1
        capability: propose
        starts: 2026-01-15T00:00:00Z
        ends: 2026-03-01T00:00:00Z
";
        let file = write_snapshot(overlapping);
        let result = ConfigLoader::with_defaults().load(file.path());
        match result {
            Err(ConfigError::ValidationError { errors, .. }) => {
                assert!(errors.iter().any(|e| e.message.contains("overlaps")));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_surfaces_warnings() {
        let no_phases = r"
organisation:
  name: org
project:
  name: project
modules:
  - name: m
";
        let file = write_snapshot(no_phases);
        let result = ConfigLoader::with_defaults().load(file.path()).unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].message.contains("no phases"));
    }

    #[test]
    fn test_size_limit_enforced() {
        let options = LoaderOptions {
            limits: ConfigLimits {
                max_config_size: 16,
                ..ConfigLimits::default()
            },
        };
        let file = write_snapshot(VALID);
        let result = ConfigLoader::new(options).load(file.path());
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_config_limits_default() {
        let limits = ConfigLimits::default();
        assert_eq!(limits.max_modules, 100);
        assert_eq!(limits.max_phases_per_module, 50);
    }
}

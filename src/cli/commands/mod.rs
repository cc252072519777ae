//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod check;
pub mod timeline;
pub mod validate;

use crate::cli::args::{Cli, Commands};
use crate::error::PhasegateError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), PhasegateError> {
    match cli.command {
        Commands::Check(args) => check::run(&args),
        Commands::Timeline(args) => timeline::run(&args),
        Commands::Validate(args) => validate::run(&args),
    }
}

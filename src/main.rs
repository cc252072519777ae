//! `phasegate` — phase-windowed access control for participation platforms

use clap::Parser;

use phasegate::cli::args::Cli;
use phasegate::cli::commands;
use phasegate::error::ExitCode;
use phasegate::observability::{LogFormat, init_logging};

fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        init_logging(LogFormat::Human, cli.verbose, cli.color);
    }

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

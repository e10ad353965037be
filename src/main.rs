//! sitelinks: check a static HTML site for missing link targets and missing
//! fragment ids.

mod classify;
mod commands;
mod diagnostics;
mod error;
mod report;
mod resolver;
mod scanner;
mod site;
mod types;
mod validator;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::Level;

use crate::report::Format;

/// Command-line arguments. There is one command and no required argument.
#[derive(Parser)]
#[command(
    name = "sitelinks",
    version,
    about = "Check a static HTML site for missing link targets and missing fragment ids"
)]
struct Cli {
    /// Output format for the report
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Site root to scan
    #[arg(short, long, default_value = ".")]
    root: PathBuf,
    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Install a stderr `fmt` subscriber. Default level is `warn` so unreadable
/// documents are reported without any flags.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Parse arguments, run the check, and map the outcome to an exit status.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    return match commands::check(&cli.root, cli.format) {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::from(e.exit_code())
        },
    };
}

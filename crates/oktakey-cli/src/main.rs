//! oktakey CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use console::style;
use oktakey_cli::{exit_code, log_directive, run, Cli};
use oktakey_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Config supplies the default log level, so load it first
    let config = Config::load_or_default(cli.config.as_deref());
    let level = config
        .as_ref()
        .map(|c| c.logging.level)
        .unwrap_or_default();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_directive(cli.verbose, level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Run the command
    let result = config
        .map_err(anyhow::Error::from)
        .and_then(|config| run(cli, config));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", style("error:").red().bold());
            ExitCode::from(exit_code(&e))
        }
    }
}

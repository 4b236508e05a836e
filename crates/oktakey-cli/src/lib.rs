//! oktakey command-line interface.

pub mod commands;
pub mod prompt;

use clap::{Parser, Subcommand};
use oktakey_core::config::LogLevel;
use oktakey_core::env::vars;
use oktakey_core::Config;
use oktakey_creds::UpdateError;

/// oktakey - keep stored Okta credentials current
#[derive(Parser)]
#[command(name = "oktakey")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file
    #[arg(short, long, env = vars::OKTAKEY_CONFIG, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Secret store backend to use (keychain, wincred, keyctl, file, ...)
    #[arg(short, long, env = vars::OKTAKEY_BACKEND, global = true)]
    pub backend: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Replace the stored Okta password, keeping username and MFA settings
    Update(commands::update::UpdateArgs),

    /// List secret store backends and whether this build supports them
    Backends,

    /// Show version information
    Version,
}

/// Run the CLI with the given arguments and loaded configuration.
pub fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    match cli.command {
        Commands::Update(args) => commands::update::run(args, &config, cli.backend.as_deref()),
        Commands::Backends => commands::backends::run(&config, cli.backend.as_deref()),
        Commands::Version => {
            println!("oktakey {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// `EnvFilter` directive for the given `-v` count and configured level.
pub fn log_directive(verbose: u8, level: LogLevel) -> String {
    let level = match verbose {
        0 => level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("oktakey={level}")
}

/// Process exit status for a failed run.
///
/// Each update failure kind has its own status; anything else exits with 1.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<UpdateError>() {
        Some(UpdateError::StoreUnavailable(_)) => 3,
        Some(UpdateError::NotFound(_)) => 4,
        Some(UpdateError::CorruptRecord { .. }) => 5,
        Some(UpdateError::PromptAborted(_)) => 6,
        Some(UpdateError::Validation(_)) => 7,
        Some(UpdateError::WritePermissionDenied(_)) => 8,
        None => 1,
    }
}

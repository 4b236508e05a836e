//! `oktakey update`: replace the stored Okta password.

use clap::Args;
use console::style;
use oktakey_core::env::{self, vars};
use oktakey_core::{paths, AccountKey, BackendType, Config, MfaConfig};
use oktakey_creds::{
    JsonlTelemetry, NoopTelemetry, Telemetry, UpdateError, UpdateRequest, UpdateWorkflow,
};
use oktakey_secrets::StoreOptions;
use tracing::debug;

use crate::prompt::TerminalPrompt;

/// Update command arguments.
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Account alias; the default account when omitted
    #[arg(short, long)]
    pub account: Option<String>,

    /// MFA provider override (okta, duo)
    #[arg(long, env = vars::OKTAKEY_MFA_PROVIDER)]
    pub mfa_provider: Option<String>,

    /// MFA factor type override (push, totp, sms, call, token:hardware, webauthn)
    #[arg(long, env = vars::OKTAKEY_MFA_FACTOR_TYPE)]
    pub mfa_factor_type: Option<String>,

    /// MFA device override
    #[arg(long, env = vars::OKTAKEY_MFA_DEVICE)]
    pub mfa_device: Option<String>,
}

impl UpdateArgs {
    /// MFA fields given on the command line or in the environment.
    pub fn mfa_overrides(&self) -> MfaConfig {
        MfaConfig {
            provider: self.mfa_provider.clone(),
            factor: self.mfa_factor_type.clone(),
            device: self.mfa_device.clone(),
        }
    }
}

/// Run the update command.
pub fn run(args: UpdateArgs, config: &Config, backend: Option<&str>) -> anyhow::Result<()> {
    let request = UpdateRequest {
        account: AccountKey::from_alias(args.account.as_deref())?,
        mfa_overrides: args.mfa_overrides(),
    };
    let options = store_options(config, backend)?;
    let telemetry = telemetry(config)?;
    debug!(
        allowed = ?options.allowed,
        file_dir = %options.file_dir.display(),
        "secret store selection"
    );

    let outcome = UpdateWorkflow::new(&options, &TerminalPrompt)
        .with_telemetry(telemetry.as_ref())
        .run(&request)?;

    eprintln!(
        "{} Updated credentials for {} ({}) in {}",
        style("*").green(),
        style(&outcome.username).bold(),
        style(&outcome.account).dim(),
        style(outcome.backend).dim(),
    );
    Ok(())
}

/// Backend filter and file store location from flags and config.
///
/// The `--backend` flag (or `OKTAKEY_BACKEND`) wins over the config file.
/// No backend anywhere means every supported backend in default order. A name
/// no backend answers to leaves nothing to open, so it is reported as
/// [`UpdateError::StoreUnavailable`].
pub fn store_options(config: &Config, backend: Option<&str>) -> anyhow::Result<StoreOptions> {
    let allowed = match backend.or(config.backend.as_deref()) {
        Some(name) => vec![name
            .parse::<BackendType>()
            .map_err(|e| UpdateError::StoreUnavailable(e.to_string()))?],
        None => Vec::new(),
    };

    let file_dir = match &config.file_dir {
        Some(dir) => paths::expand_tilde(&dir.to_string_lossy()),
        None => paths::file_keyring_dir()?,
    };

    Ok(StoreOptions::new(allowed, file_dir))
}

fn telemetry(config: &Config) -> anyhow::Result<Box<dyn Telemetry>> {
    if config.telemetry.enabled || env::get_bool(vars::OKTAKEY_TELEMETRY) {
        Ok(Box::new(JsonlTelemetry::new(paths::telemetry_file()?)))
    } else {
        Ok(Box::new(NoopTelemetry))
    }
}

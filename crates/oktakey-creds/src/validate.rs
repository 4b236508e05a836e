//! Local validation of credential records.
//!
//! Checks that a record is complete and that its MFA policy is one oktakey
//! can drive. No request is made to the identity provider.

use oktakey_core::{CredentialRecord, FactorType, MfaConfig, MfaProvider};

use crate::error::ValidationError;

/// Validate `record` against the resolved MFA policy `mfa`.
pub fn validate(record: &CredentialRecord, mfa: Option<&MfaConfig>) -> Result<(), ValidationError> {
    if record.username.trim().is_empty() {
        return Err(ValidationError::EmptyUsername);
    }
    if record.secret.is_empty() {
        return Err(ValidationError::EmptySecret);
    }

    match mfa {
        Some(mfa) => validate_mfa(mfa),
        None => Ok(()),
    }
}

fn validate_mfa(mfa: &MfaConfig) -> Result<(), ValidationError> {
    let factor_name = mfa.factor.as_deref().unwrap_or_default();
    let factor: FactorType = factor_name
        .parse()
        .map_err(|_| ValidationError::UnknownFactor(factor_name.to_string()))?;

    let provider = match mfa.provider.as_deref() {
        Some(name) => Some(
            name.parse::<MfaProvider>()
                .map_err(|_| ValidationError::UnknownProvider(name.to_string()))?,
        ),
        None => None,
    };

    if let Some(provider) = provider {
        if !provider.supports(factor) {
            return Err(ValidationError::UnsupportedCombination {
                provider: provider.to_string(),
                factor: factor.to_string(),
            });
        }
    }

    let needs_device =
        factor.requires_device() || provider.is_some_and(|p| p.requires_device());
    let has_device = mfa.device.as_deref().is_some_and(|d| !d.trim().is_empty());
    if needs_device && !has_device {
        return Err(ValidationError::MissingDevice {
            factor: factor.to_string(),
        });
    }

    Ok(())
}

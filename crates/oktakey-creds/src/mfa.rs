//! MFA policy resolution.

use oktakey_core::MfaConfig;

/// Merge override flags over the stored MFA configuration.
///
/// Each set override field replaces the stored one; unset fields keep the
/// stored value. Blank values count as unset on both sides. A merged config
/// without a factor means no MFA is required and resolves to `None`.
pub fn resolve(existing: Option<&MfaConfig>, overrides: &MfaConfig) -> Option<MfaConfig> {
    let base = existing.cloned().unwrap_or_default();

    let merged = MfaConfig {
        provider: normalized(&overrides.provider).or_else(|| normalized(&base.provider)),
        factor: normalized(&overrides.factor).or_else(|| normalized(&base.factor)),
        device: normalized(&overrides.device).or_else(|| normalized(&base.device)),
    };

    merged.factor.is_some().then_some(merged)
}

fn normalized(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

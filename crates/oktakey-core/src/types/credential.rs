//! Credential records and multi-factor policy types.

use crate::secret::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One identity-provider credential as stored under an [`AccountKey`].
///
/// Serialized as `{"username", "secret", "mfaConfig"}`; `mfaConfig` is
/// omitted when no second factor is configured and accepted as `null`.
///
/// [`AccountKey`]: crate::types::AccountKey
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    /// Provider account name. Never changed by an update.
    pub username: String,

    /// Provider password.
    pub secret: SecretString,

    /// Second-factor policy, if the provider requires one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mfa_config: Option<MfaConfig>,
}

impl CredentialRecord {
    /// Create a record without MFA configuration.
    pub fn new(username: impl Into<String>, secret: impl Into<SecretString>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
            mfa_config: None,
        }
    }

    /// Attach an MFA configuration.
    pub fn with_mfa(mut self, mfa: MfaConfig) -> Self {
        self.mfa_config = Some(mfa);
        self
    }
}

/// Multi-factor policy: which second factor is required and its parameters.
///
/// Every field is optional so the same type can carry partial override flags.
/// Factor and provider are kept as the names the operator typed; they are
/// checked against [`FactorType`] and [`MfaProvider`] during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MfaConfig {
    /// MFA provider, e.g. `okta` or `duo`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    /// Factor type, e.g. `push`, `totp`, `token:hardware`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factor: Option<String>,

    /// Provider-specific device identifier, e.g. a Duo device or token serial.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

impl MfaConfig {
    /// Config requiring `factor` with no other parameters.
    pub fn with_factor(factor: impl Into<String>) -> Self {
        Self {
            factor: Some(factor.into()),
            ..Default::default()
        }
    }

    /// True when no field holds a non-blank value.
    pub fn is_empty(&self) -> bool {
        [&self.provider, &self.factor, &self.device]
            .into_iter()
            .all(|field| field.as_deref().map_or(true, |v| v.trim().is_empty()))
    }
}

/// Second-factor mechanisms oktakey knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactorType {
    Push,
    Totp,
    Sms,
    Call,
    HardwareToken,
    WebAuthn,
}

impl FactorType {
    /// Canonical factor name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Totp => "totp",
            Self::Sms => "sms",
            Self::Call => "call",
            Self::HardwareToken => "token:hardware",
            Self::WebAuthn => "webauthn",
        }
    }

    /// Whether this factor cannot work without a device identifier.
    pub fn requires_device(&self) -> bool {
        matches!(self, Self::HardwareToken)
    }
}

impl fmt::Display for FactorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FactorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "push" => Ok(Self::Push),
            "totp" | "token:software:totp" => Ok(Self::Totp),
            "sms" => Ok(Self::Sms),
            "call" => Ok(Self::Call),
            "token:hardware" | "token" => Ok(Self::HardwareToken),
            "webauthn" | "u2f" => Ok(Self::WebAuthn),
            other => Err(other.to_string()),
        }
    }
}

/// MFA providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MfaProvider {
    Okta,
    Duo,
}

impl MfaProvider {
    /// Canonical provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Okta => "okta",
            Self::Duo => "duo",
        }
    }

    /// Whether the provider can deliver `factor`.
    pub fn supports(&self, factor: FactorType) -> bool {
        match self {
            Self::Okta => true,
            Self::Duo => matches!(
                factor,
                FactorType::Push | FactorType::Call | FactorType::Sms | FactorType::HardwareToken
            ),
        }
    }

    /// Whether the provider needs a device identifier for every factor.
    pub fn requires_device(&self) -> bool {
        matches!(self, Self::Duo)
    }
}

impl fmt::Display for MfaProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MfaProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "okta" => Ok(Self::Okta),
            "duo" => Ok(Self::Duo),
            other => Err(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_wire_format() {
        let record = CredentialRecord::new("alice", "old").with_mfa(MfaConfig {
            provider: Some("duo".to_string()),
            factor: Some("push".to_string()),
            device: Some("phone1".to_string()),
        });

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "username": "alice",
                "secret": "old",
                "mfaConfig": { "provider": "duo", "factor": "push", "device": "phone1" }
            })
        );
    }

    #[test]
    fn test_record_without_mfa_omits_field() {
        let record = CredentialRecord::new("alice", "old");
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("mfaConfig").is_none());
    }

    #[test]
    fn test_record_accepts_null_mfa() {
        let record: CredentialRecord =
            serde_json::from_str(r#"{"username":"alice","secret":"old","mfaConfig":null}"#)
                .unwrap();
        assert_eq!(record, CredentialRecord::new("alice", "old"));
    }

    #[test]
    fn test_record_debug_redacts_secret() {
        let record = CredentialRecord::new("alice", "hunter2");
        let debug = format!("{:?}", record);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_mfa_blank_fields_are_empty() {
        assert!(MfaConfig::default().is_empty());
        assert!(MfaConfig::with_factor("  ").is_empty());
        assert!(!MfaConfig::with_factor("push").is_empty());
        assert!(!MfaConfig {
            device: Some("phone1".to_string()),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn test_factor_aliases() {
        assert_eq!("TOTP".parse::<FactorType>().unwrap(), FactorType::Totp);
        assert_eq!(
            "token:software:totp".parse::<FactorType>().unwrap(),
            FactorType::Totp
        );
        assert_eq!("token".parse::<FactorType>().unwrap(), FactorType::HardwareToken);
        assert_eq!("u2f".parse::<FactorType>().unwrap(), FactorType::WebAuthn);
        assert!("carrier-pigeon".parse::<FactorType>().is_err());
    }

    #[test]
    fn test_provider_support() {
        assert!(MfaProvider::Okta.supports(FactorType::WebAuthn));
        assert!(MfaProvider::Duo.supports(FactorType::Push));
        assert!(!MfaProvider::Duo.supports(FactorType::Totp));
        assert!(MfaProvider::Duo.requires_device());
        assert!(!MfaProvider::Okta.requires_device());
    }
}

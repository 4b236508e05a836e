//! Secret store backend names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A secure-storage backend type, named as on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendType {
    /// macOS Keychain.
    Keychain,
    /// Windows Credential Manager.
    #[serde(rename = "wincred")]
    WinCred,
    /// Linux kernel keyutils.
    #[serde(rename = "keyctl")]
    KeyCtl,
    /// Freedesktop Secret Service (GNOME Keyring).
    SecretService,
    /// KDE Wallet.
    #[serde(rename = "kwallet")]
    KWallet,
    /// `pass`, the standard unix password manager.
    Pass,
    /// Encrypted files under the oktakey home directory.
    File,
}

impl BackendType {
    /// Every backend name oktakey recognizes.
    pub const ALL: [BackendType; 7] = [
        Self::Keychain,
        Self::WinCred,
        Self::KeyCtl,
        Self::SecretService,
        Self::KWallet,
        Self::Pass,
        Self::File,
    ];

    /// Command-line name of the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keychain => "keychain",
            Self::WinCred => "wincred",
            Self::KeyCtl => "keyctl",
            Self::SecretService => "secret-service",
            Self::KWallet => "kwallet",
            Self::Pass => "pass",
            Self::File => "file",
        }
    }
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown backend name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown backend '{0}' (expected one of: keychain, wincred, keyctl, secret-service, kwallet, pass, file)")]
pub struct UnknownBackend(pub String);

impl FromStr for BackendType {
    type Err = UnknownBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|b| b.as_str() == name)
            .ok_or_else(|| UnknownBackend(s.to_string()))
    }
}

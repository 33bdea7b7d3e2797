//! Configuration types shared by the padding engine, codecs and CLI.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::block::BLOCK_SIZE;

/// How trailing bytes are added to reach a block boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaddingPolicy {
    /// Every pad byte holds the pad length; aligned input gains a full block.
    #[default]
    Pkcs5,
    /// A `0x80` marker followed by zeros.
    OneAndZeros,
    /// ASCII spaces (`0x20`).
    Spaces,
    /// Zero bytes.
    Null,
    /// Zero bytes with the pad length in the final byte.
    LastByte,
}

impl PaddingPolicy {
    /// Every policy, in declaration order.
    pub const ALL: [PaddingPolicy; 5] = [
        PaddingPolicy::Pkcs5,
        PaddingPolicy::OneAndZeros,
        PaddingPolicy::Spaces,
        PaddingPolicy::Null,
        PaddingPolicy::LastByte,
    ];

    /// Canonical kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            PaddingPolicy::Pkcs5 => "pkcs5",
            PaddingPolicy::OneAndZeros => "one-and-zeros",
            PaddingPolicy::Spaces => "spaces",
            PaddingPolicy::Null => "null",
            PaddingPolicy::LastByte => "last-byte",
        }
    }
}

impl fmt::Display for PaddingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Error returned when a policy name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown padding policy `{0}` (expected one of: pkcs5, one-and-zeros, spaces, null, last-byte)")]
pub struct PolicyParseError(pub String);

impl FromStr for PaddingPolicy {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        PaddingPolicy::ALL
            .into_iter()
            .find(|policy| policy.name() == normalized)
            .ok_or_else(|| PolicyParseError(s.to_owned()))
    }
}

/// Defaults applied by callers that pad and decode on behalf of a cipher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CodecConfig {
    /// Padding policy for encrypt/decrypt calls.
    pub padding: PaddingPolicy,
    /// Block size used to align Base64-decoded ciphertext (0 disables alignment).
    pub block_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            padding: PaddingPolicy::default(),
            block_size: BLOCK_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for policy in PaddingPolicy::ALL {
            assert_eq!(policy.name().parse::<PaddingPolicy>(), Ok(policy));
        }
    }

    #[test]
    fn from_str_accepts_case_and_underscores() {
        assert_eq!("ONE_AND_ZEROS".parse(), Ok(PaddingPolicy::OneAndZeros));
        assert_eq!(" Last_Byte ".parse(), Ok(PaddingPolicy::LastByte));
    }

    #[test]
    fn from_str_rejects_unknown() {
        let err = "iso10126".parse::<PaddingPolicy>().unwrap_err();
        assert_eq!(err, PolicyParseError("iso10126".into()));
        assert!(err.to_string().contains("iso10126"));
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&PaddingPolicy::OneAndZeros).unwrap();
        assert_eq!(json, "\"one-and-zeros\"");
        let policy: PaddingPolicy = serde_json::from_str("\"last-byte\"").unwrap();
        assert_eq!(policy, PaddingPolicy::LastByte);
    }

    #[test]
    fn config_fills_missing_fields_with_defaults() {
        let config: CodecConfig = serde_json::from_str(r#"{"padding": "spaces"}"#).unwrap();
        assert_eq!(config.padding, PaddingPolicy::Spaces);
        assert_eq!(config.block_size, BLOCK_SIZE);
        assert_eq!(CodecConfig::default().padding, PaddingPolicy::Pkcs5);
    }
}

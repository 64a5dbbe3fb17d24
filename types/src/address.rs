//! Wallet address type (base58-encoded public key).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// Characters allowed in a base58 string (no `0`, `O`, `I`, `l`).
const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// A wallet address as reported by the wallet connector.
///
/// Only the textual shape is checked: a 32-byte key encodes to 32..=44 base58
/// characters. No on-curve or checksum validation is attempted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress(String);

impl WalletAddress {
    pub const MIN_LEN: usize = 32;
    pub const MAX_LEN: usize = 44;

    /// Number of leading and trailing characters kept by [`abbreviated`](Self::abbreviated).
    const ABBREVIATION_EDGE: usize = 6;

    /// Parse and validate a raw address string.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        let trimmed = s.trim();
        if trimmed.len() < Self::MIN_LEN || trimmed.len() > Self::MAX_LEN {
            return Err(TypesError::InvalidAddress(format!(
                "{trimmed:?} has length {}, expected {}..={}",
                trimmed.len(),
                Self::MIN_LEN,
                Self::MAX_LEN
            )));
        }
        if let Some(bad) = trimmed.chars().find(|c| !BASE58_ALPHABET.contains(*c)) {
            return Err(TypesError::InvalidAddress(format!(
                "{trimmed:?} contains non-base58 character {bad:?}"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form for display, e.g. `7xKXtg...osgAsU`.
    pub fn abbreviated(&self) -> String {
        let edge = Self::ABBREVIATION_EDGE;
        let head = &self.0[..edge];
        let tail = &self.0[self.0.len() - edge..];
        format!("{head}...{tail}")
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WalletAddress {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<WalletAddress> for String {
    fn from(addr: WalletAddress) -> Self {
        addr.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";

    #[test]
    fn parses_valid_address() {
        let addr = WalletAddress::parse(SAMPLE).unwrap();
        assert_eq!(addr.as_str(), SAMPLE);
        assert_eq!(addr.to_string(), SAMPLE);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let addr = WalletAddress::parse(format!("  {SAMPLE}\n")).unwrap();
        assert_eq!(addr.as_str(), SAMPLE);
    }

    #[test]
    fn rejects_short_address() {
        assert!(matches!(
            WalletAddress::parse("abc"),
            Err(TypesError::InvalidAddress(_))
        ));
    }

    #[test]
    fn rejects_non_base58_characters() {
        let bad = format!("0{}", &SAMPLE[1..]);
        assert!(WalletAddress::parse(bad).is_err());
    }

    #[test]
    fn abbreviation_keeps_six_each_side() {
        let addr: WalletAddress = SAMPLE.parse().unwrap();
        assert_eq!(addr.abbreviated(), "7xKXtg...osgAsU");
    }

    #[test]
    fn serde_validates_on_deserialize() {
        let ok: WalletAddress = serde_json::from_str(&format!("\"{SAMPLE}\"")).unwrap();
        assert_eq!(ok.as_str(), SAMPLE);
        assert!(serde_json::from_str::<WalletAddress>("\"nope\"").is_err());
    }
}

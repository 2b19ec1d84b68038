//! Opaque participant identity.

use crate::error::IdentityError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 20-byte participant identifier.
///
/// The all-zero value is the null identity and is never a valid edge endpoint.
///
/// Human-readable formats (JSON, TOML) carry it as a `0x`-prefixed hex string,
/// binary formats as the raw 20 bytes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identity([u8; 20]);

impl Identity {
    pub const LEN: usize = 20;

    /// The null identity.
    pub const ZERO: Self = Self([0u8; 20]);

    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Build an identity whose trailing 8 bytes are `n` (big-endian).
    ///
    /// `from_low_u64(0)` is [`Identity::ZERO`].
    pub fn from_low_u64(n: u64) -> Self {
        let mut bytes = [0u8; 20];
        bytes[12..].copy_from_slice(&n.to_be_bytes());
        Self(bytes)
    }

    /// Parse 40 hex digits, with or without a leading `0x`.
    pub fn from_hex(s: &str) -> Result<Self, IdentityError> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.len() != Self::LEN * 2 {
            return Err(IdentityError::InvalidLength {
                expected: Self::LEN * 2,
                got: digits.len(),
            });
        }
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| IdentityError::InvalidHex(e.to_string()))?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity(0x{})", hex::encode(&self.0[16..]))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Identity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_hex(&s).map_err(serde::de::Error::custom)
        } else {
            <[u8; 20]>::deserialize(deserializer).map(Self)
        }
    }
}

impl From<[u8; 20]> for Identity {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_identity_is_zero() {
        assert!(Identity::ZERO.is_zero());
        assert!(Identity::from_low_u64(0).is_zero());
        assert!(!Identity::from_low_u64(1).is_zero());
    }

    #[test]
    fn display_is_prefixed_lowercase_hex() {
        let id = Identity::from_low_u64(0xABCD);
        assert_eq!(
            id.to_string(),
            "0x000000000000000000000000000000000000abcd"
        );
    }

    #[test]
    fn parse_accepts_with_and_without_prefix() {
        let id = Identity::from_low_u64(42);
        let with = Identity::from_hex(&id.to_string()).unwrap();
        let without: Identity = id.to_string()[2..].parse().unwrap();
        assert_eq!(with, id);
        assert_eq!(without, id);
    }

    #[test]
    fn parse_rejects_wrong_length() {
        let err = Identity::from_hex("0xabcd").unwrap_err();
        assert_eq!(
            err,
            IdentityError::InvalidLength {
                expected: 40,
                got: 4
            }
        );
    }

    #[test]
    fn parse_rejects_non_hex() {
        let bad = "zz".repeat(20);
        assert!(matches!(
            Identity::from_hex(&bad),
            Err(IdentityError::InvalidHex(_))
        ));
    }

    #[test]
    fn json_carries_hex_string() {
        let id = Identity::from_low_u64(7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"0x0000000000000000000000000000000000000007\"");
        let back: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn json_rejects_malformed_hex() {
        assert!(serde_json::from_str::<Identity>("\"0x12\"").is_err());
    }
}

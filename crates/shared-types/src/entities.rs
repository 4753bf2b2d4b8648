//! # Core Value Types
//!
//! ## Type Decisions
//!
//! - `Amount = u128`: balances and fees in the smallest payment unit. Wide
//!   enough that only misconfiguration can overflow it, and every arithmetic
//!   path on it is checked anyway.
//! - `Address`: 20 bytes, rendered and parsed as `0x`-prefixed lowercase hex.
//! - `ListId`: positive, sequential, never reused. `0` is the "no such list"
//!   sentinel and is never issued.

use crate::errors::AddressParseError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Balance and fee unit.
pub type Amount = u128;

// =============================================================================
// ADDRESS
// =============================================================================

/// A 20-byte account address.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The zero address (0x0000...0000).
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an address from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates an address from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        <[u8; 20]>::try_from(slice).ok().map(Self)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes =
            hex::decode(digits).map_err(|e| AddressParseError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes).ok_or(AddressParseError::InvalidLength {
            actual: bytes.len(),
        })
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// LIST ID
// =============================================================================

/// Identifier of an address list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(u64);

impl ListId {
    /// Sentinel for "no such list". Never allocated.
    pub const NONE: Self = Self(0);

    /// The first identifier a fresh registry hands out.
    pub const FIRST: Self = Self(1);

    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns true for the reserved sentinel.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Zero-based arena slot for this id, or None for the sentinel.
    #[must_use]
    pub fn slot(self) -> Option<usize> {
        let index = self.0.checked_sub(1)?;
        usize::try_from(index).ok()
    }

    /// The id stored at a zero-based arena slot.
    #[must_use]
    pub fn from_slot(slot: usize) -> Option<Self> {
        u64::try_from(slot).ok()?.checked_add(1).map(Self)
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ListId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_display_roundtrips_through_parse() {
        let addr = Address::new([0xAB; 20]);
        let text = addr.to_string();
        assert_eq!(text, format!("0x{}", "ab".repeat(20)));
        assert_eq!(text.parse::<Address>().unwrap(), addr);
    }

    #[test]
    fn test_address_parse_accepts_checksummed_input() {
        let addr: Address = "0x9Ac977751e3E91110398fC3B95bc905F723a50eb".parse().unwrap();
        assert_eq!(addr.as_bytes()[0], 0x9a);
        assert_eq!(addr.as_bytes()[19], 0xeb);
    }

    #[test]
    fn test_address_parse_rejects_bad_input() {
        assert!(matches!(
            "0x1234".parse::<Address>(),
            Err(AddressParseError::InvalidLength { actual: 2 })
        ));
        assert!(matches!(
            "0xzz".parse::<Address>(),
            Err(AddressParseError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_address_serde_as_string() {
        let addr = Address::new([0x01; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "01".repeat(20)));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn test_zero_address() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address::new([1; 20]).is_zero());
    }

    #[test]
    fn test_list_id_slots() {
        assert_eq!(ListId::NONE.slot(), None);
        assert_eq!(ListId::FIRST.slot(), Some(0));
        assert_eq!(ListId::new(7).slot(), Some(6));
        assert_eq!(ListId::from_slot(0), Some(ListId::FIRST));
        assert!(ListId::NONE.is_none());
        assert!(!ListId::FIRST.is_none());
    }
}

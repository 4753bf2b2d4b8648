//! # Error Types
//!
//! Errors raised while constructing shared value types.

use thiserror::Error;

/// Errors from parsing an `Address` out of its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressParseError {
    /// Input was not valid hexadecimal.
    #[error("Invalid hex in address: {0}")]
    InvalidHex(String),

    /// Decoded input had the wrong number of bytes.
    #[error("Invalid address length: expected 20 bytes, got {actual}")]
    InvalidLength { actual: usize },
}

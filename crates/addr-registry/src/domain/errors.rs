//! # Error Types
//!
//! Every failure is synchronous, local to the call that caused it, and
//! leaves list contents and balances exactly as they were.

use shared_types::{Address, Amount, ListId};
use thiserror::Error;

/// Message carried by [`RegistryError::Unauthorized`].
///
/// Stable across releases so callers can match on the rendered error.
pub const UNAUTHORIZED_MESSAGE: &str = "caller is not the owner of this list";

// =============================================================================
// REGISTRY ERRORS
// =============================================================================

/// Errors surfaced by registry operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The referenced list was never created.
    #[error("List not found: {list_id}")]
    NotFound { list_id: ListId },

    /// A mutation was attempted by someone other than the owner.
    #[error("{}", UNAUTHORIZED_MESSAGE)]
    Unauthorized { list_id: ListId, caller: Address },

    /// Payment was not exactly the required fee.
    #[error("Insufficient fee: required exactly {required}, sent {sent}")]
    InsufficientFee { required: Amount, sent: Amount },

    /// An account cannot cover a debit.
    #[error("Insufficient balance for {address}: required {required}, available {available}")]
    InsufficientBalance {
        address: Address,
        required: Amount,
        available: Amount,
    },

    /// A credit would exceed the balance type.
    #[error("Balance overflow for {address}")]
    BalanceOverflow { address: Address },

    /// A batch of postings would create or destroy value.
    #[error("Conservation violated: debits {debited} != credits {credited}")]
    ConservationViolated { debited: Amount, credited: Amount },

    /// No further list identifiers can be allocated.
    #[error("List identifier space exhausted")]
    IdSpaceExhausted,
}

impl RegistryError {
    /// Short machine-readable name, used as a log field.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Unauthorized { .. } => "unauthorized",
            Self::InsufficientFee { .. } => "insufficient_fee",
            Self::InsufficientBalance { .. } => "insufficient_balance",
            Self::BalanceOverflow { .. } => "balance_overflow",
            Self::ConservationViolated { .. } => "conservation_violated",
            Self::IdSpaceExhausted => "id_space_exhausted",
        }
    }
}

// =============================================================================
// CONFIGURATION ERRORS
// =============================================================================

/// Configuration errors. All of them are fatal to startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `owner_fee + treasury_fee` does not fit the balance type.
    #[error("Fee overflow: owner fee {owner_fee} + treasury fee {treasury_fee} exceeds u128")]
    FeeOverflow {
        owner_fee: Amount,
        treasury_fee: Amount,
    },

    /// The treasury address was left at its zero default.
    #[error("Treasury address is the zero address. Set ADDRLIST_TREASURY or provide it in config.")]
    ZeroTreasury,

    /// The event channel cannot have zero capacity.
    #[error("Event channel capacity must be greater than zero")]
    ZeroChannelCapacity,

    /// An environment override could not be parsed.
    #[error("Invalid value for {var}: {reason}")]
    InvalidEnv { var: String, reason: String },

    /// A JSON config document could not be parsed.
    #[error("Invalid config document: {0}")]
    InvalidDocument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_message_is_stable() {
        let err = RegistryError::Unauthorized {
            list_id: ListId::FIRST,
            caller: Address::new([9; 20]),
        };
        assert_eq!(err.to_string(), UNAUTHORIZED_MESSAGE);
        assert_eq!(err.kind(), "unauthorized");
    }

    #[test]
    fn test_fee_error_display() {
        let err = RegistryError::InsufficientFee {
            required: 10,
            sent: 11,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient fee: required exactly 10, sent 11"
        );
    }
}

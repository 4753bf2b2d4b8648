//! # Domain Entities
//!
//! ## Lifecycle
//!
//! ```text
//! NonExistent ──create──→ Created(v0) ──update──→ Updated(v1) ──update──→ Updated(v2) ...
//! ```
//!
//! There is no deletion state. `id` and `owner` never change after creation;
//! `members` is replaced wholesale on every update.

use crate::domain::errors::RegistryError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, ListId};
use std::collections::HashSet;

// =============================================================================
// ADDRESS LIST
// =============================================================================

/// An owner-scoped set of addresses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressList {
    id: ListId,
    owner: Address,
    members: HashSet<Address>,
    version: u64,
}

impl AddressList {
    /// Create a list at version 0. Duplicate members collapse.
    pub fn new(id: ListId, owner: Address, members: impl IntoIterator<Item = Address>) -> Self {
        Self {
            id,
            owner,
            members: members.into_iter().collect(),
            version: 0,
        }
    }

    /// List identifier.
    #[must_use]
    pub fn id(&self) -> ListId {
        self.id
    }

    /// Address that created the list.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Number of successful replacements.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Set membership test.
    #[must_use]
    pub fn contains(&self, address: &Address) -> bool {
        self.members.contains(address)
    }

    /// Number of distinct members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if the list has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in no particular order.
    pub fn members(&self) -> impl Iterator<Item = &Address> {
        self.members.iter()
    }

    /// Overwrite the member set and bump the version. Returns the new version.
    pub fn replace_members(&mut self, members: HashSet<Address>) -> u64 {
        self.members = members;
        self.version += 1;
        self.version
    }

    /// Read-only view without the member set.
    #[must_use]
    pub fn summary(&self) -> ListSummary {
        ListSummary {
            id: self.id,
            owner: self.owner,
            version: self.version,
            member_count: self.members.len(),
        }
    }
}

/// Metadata of a list, cheap to copy out from under its lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSummary {
    /// List identifier.
    pub id: ListId,
    /// Owner address.
    pub owner: Address,
    /// 0 until the first update.
    pub version: u64,
    /// Distinct members.
    pub member_count: usize,
}

// =============================================================================
// POSTINGS
// =============================================================================

/// Which side of an account a posting touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Remove value from the account.
    Debit,
    /// Add value to the account.
    Credit,
}

/// One balance change inside an atomic ledger batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    /// Account touched.
    pub address: Address,
    /// Debit or credit.
    pub direction: Direction,
    /// Amount moved.
    pub amount: Amount,
}

impl Posting {
    /// A debit posting.
    #[must_use]
    pub const fn debit(address: Address, amount: Amount) -> Self {
        Self {
            address,
            direction: Direction::Debit,
            amount,
        }
    }

    /// A credit posting.
    #[must_use]
    pub const fn credit(address: Address, amount: Amount) -> Self {
        Self {
            address,
            direction: Direction::Credit,
            amount,
        }
    }

    /// The balance after applying this posting to `balance`.
    ///
    /// # Errors
    ///
    /// `InsufficientBalance` on underflow, `BalanceOverflow` on overflow.
    pub fn apply_to(&self, balance: Amount) -> Result<Amount, RegistryError> {
        match self.direction {
            Direction::Debit => {
                balance
                    .checked_sub(self.amount)
                    .ok_or(RegistryError::InsufficientBalance {
                        address: self.address,
                        required: self.amount,
                        available: balance,
                    })
            }
            Direction::Credit => {
                balance
                    .checked_add(self.amount)
                    .ok_or(RegistryError::BalanceOverflow {
                        address: self.address,
                    })
            }
        }
    }
}

// =============================================================================
// SETTLEMENT RECEIPT
// =============================================================================

/// Record of one completed fee split.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReceipt {
    /// Account charged.
    pub payer: Address,
    /// List owner credited.
    pub owner: Address,
    /// Treasury credited.
    pub treasury: Address,
    /// Credited to the owner.
    pub owner_share: Amount,
    /// Credited to the treasury.
    pub treasury_share: Amount,
    /// Debited from the payer.
    pub total: Amount,
}

//! # Driven Ports (SPI - Outbound)
//!
//! Storage the registry depends on: the list table and the balance table.
//! Both are synchronous; every call completes or fails without waiting on
//! anything but the adapter's own locks.

use crate::domain::entities::{ListSummary, Posting};
use crate::domain::errors::RegistryError;
use shared_types::{Address, Amount, ListId};

// =============================================================================
// LIST STORE
// =============================================================================

/// Mapping from list id to list record.
///
/// Implementations must allocate ids sequentially from 1 with no gaps, even
/// under concurrent `create` calls, and must make `replace` atomic with
/// respect to `contains` on the same list.
pub trait ListStore: Send + Sync {
    /// Store a new list at version 0 and return its id.
    ///
    /// # Errors
    ///
    /// `IdSpaceExhausted` once every `u64` id has been issued.
    fn create(&self, owner: Address, members: Vec<Address>) -> Result<ListId, RegistryError>;

    /// Overwrite a list's members and return the new version.
    ///
    /// Callers are expected to have authorized the mutation already.
    fn replace(&self, list_id: ListId, members: Vec<Address>) -> Result<u64, RegistryError>;

    /// Membership test.
    fn contains(&self, list_id: ListId, address: &Address) -> Result<bool, RegistryError>;

    /// Run `settle` with the list's owner, then test membership, without
    /// letting a `replace` on the same list land in between.
    ///
    /// `settle` must not call back into the store. Membership is read only
    /// if `settle` succeeds.
    ///
    /// # Errors
    ///
    /// `NotFound` if the list does not exist, otherwise whatever `settle`
    /// returns.
    fn query_with<R, F>(
        &self,
        list_id: ListId,
        address: &Address,
        settle: F,
    ) -> Result<(R, bool), RegistryError>
    where
        F: FnOnce(Address) -> Result<R, RegistryError>;

    /// Owner of a list.
    fn owner_of(&self, list_id: ListId) -> Result<Address, RegistryError>;

    /// Id, owner, version and member count.
    fn summary(&self, list_id: ListId) -> Result<ListSummary, RegistryError>;

    /// Snapshot of the current members, in no particular order.
    fn members(&self, list_id: ListId) -> Result<Vec<Address>, RegistryError>;

    /// Number of lists ever created.
    fn len(&self) -> usize;

    /// True if no list has been created.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// LEDGER
// =============================================================================

/// Account balances reachable by the registry.
///
/// Unknown accounts read as zero. A batch passed to `apply` is atomic:
/// either every posting takes effect or none does.
pub trait Ledger: Send + Sync {
    /// Current balance of an account.
    fn balance_of(&self, address: &Address) -> Amount;

    /// Apply a batch of postings atomically.
    ///
    /// Postings against the same account are applied in order.
    ///
    /// # Errors
    ///
    /// `InsufficientBalance` or `BalanceOverflow` from the first posting that
    /// cannot be applied. No balance changes in that case.
    fn apply(&self, postings: &[Posting]) -> Result<(), RegistryError>;

    /// Add externally supplied funds to an account.
    fn deposit(&self, address: Address, amount: Amount) -> Result<(), RegistryError> {
        self.apply(&[Posting::credit(address, amount)])
    }

    /// Remove funds from an account to outside the registry.
    fn withdraw(&self, address: Address, amount: Amount) -> Result<(), RegistryError> {
        self.apply(&[Posting::debit(address, amount)])
    }
}

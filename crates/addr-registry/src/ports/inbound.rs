//! # Driving Ports (API - Inbound)
//!
//! The three public registry operations. The caller address is assumed to
//! be authenticated upstream.

use crate::domain::errors::RegistryError;
use async_trait::async_trait;
use shared_types::{Address, Amount, ListId};

/// Public API of the address registry.
#[async_trait]
pub trait RegistryApi: Send + Sync {
    /// Create a list owned by `caller`. No fee is charged.
    ///
    /// Emits `ListCreated`.
    async fn create_list(
        &self,
        caller: Address,
        members: Vec<Address>,
    ) -> Result<ListId, RegistryError>;

    /// Replace a list's members. Only the owner may do this.
    ///
    /// Returns the new version and emits `ListUpdated`.
    ///
    /// # Errors
    ///
    /// - `NotFound` - the list was never created
    /// - `Unauthorized` - `caller` is not the owner
    async fn update_list(
        &self,
        caller: Address,
        list_id: ListId,
        members: Vec<Address>,
    ) -> Result<u64, RegistryError>;

    /// Pay the fee and test whether `address` is a member of the list.
    ///
    /// The fee is charged whatever the answer. No event is emitted.
    ///
    /// # Errors
    ///
    /// - `NotFound` - the list was never created
    /// - `InsufficientFee` - `amount_sent` is not exactly the required fee
    /// - `InsufficientBalance` - `caller` cannot cover the fee
    async fn query_list(
        &self,
        caller: Address,
        list_id: ListId,
        address: Address,
        amount_sent: Amount,
    ) -> Result<bool, RegistryError>;
}

//! # Access Control
//!
//! Owner-only mutation. A list's owner is fixed at creation, so a check that
//! passes stays valid for the rest of the call.

use crate::domain::errors::RegistryError;
use crate::ports::outbound::ListStore;
use shared_types::{Address, ListId};
use std::sync::Arc;
use tracing::debug;

/// Resolves whether a caller owns a list.
pub struct OwnerAccessControl<S: ListStore> {
    store: Arc<S>,
}

impl<S: ListStore> OwnerAccessControl<S> {
    /// Wrap a list store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Succeed with the owner's address if `caller` owns `list_id`.
    ///
    /// # Errors
    ///
    /// - `NotFound` - the list does not exist
    /// - `Unauthorized` - `caller` is someone else
    pub fn authorize(&self, list_id: ListId, caller: Address) -> Result<Address, RegistryError> {
        let owner = self.store.owner_of(list_id)?;
        ensure_owner(list_id, owner, caller)?;
        debug!(list_id = %list_id, caller = %caller, "Caller authorized");
        Ok(owner)
    }
}

/// Compare a caller against a known owner.
///
/// # Errors
///
/// `Unauthorized` when they differ.
pub fn ensure_owner(list_id: ListId, owner: Address, caller: Address) -> Result<(), RegistryError> {
    if owner == caller {
        Ok(())
    } else {
        Err(RegistryError::Unauthorized { list_id, caller })
    }
}

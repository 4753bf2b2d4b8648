//! In-memory list table.
//!
//! An arena of per-list locks behind one outer lock. The outer lock is held
//! for writing only while a new list is appended; every other operation
//! holds it for reading and then locks the single list it touches, so
//! operations on different lists never contend.

use crate::domain::entities::{AddressList, ListSummary};
use crate::domain::errors::RegistryError;
use crate::ports::outbound::ListStore;
use parking_lot::RwLock;
use shared_types::{Address, ListId};
use std::collections::HashSet;
use tracing::debug;

/// In-memory implementation of [`ListStore`].
pub struct InMemoryListStore {
    /// Slot `n` holds list id `n + 1`.
    lists: RwLock<Vec<RwLock<AddressList>>>,
}

impl InMemoryListStore {
    /// Empty store. The first list created gets id 1.
    pub fn new() -> Self {
        Self {
            lists: RwLock::new(Vec::new()),
        }
    }

    fn with_list<T>(
        &self,
        list_id: ListId,
        f: impl FnOnce(&AddressList) -> T,
    ) -> Result<T, RegistryError> {
        let lists = self.lists.read();
        let list = list_id
            .slot()
            .and_then(|slot| lists.get(slot))
            .ok_or(RegistryError::NotFound { list_id })?;
        let guard = list.read();
        Ok(f(&guard))
    }
}

impl Default for InMemoryListStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ListStore for InMemoryListStore {
    fn create(&self, owner: Address, members: Vec<Address>) -> Result<ListId, RegistryError> {
        // Hash outside the allocation lock.
        let members: HashSet<Address> = members.into_iter().collect();

        let mut lists = self.lists.write();
        let list_id = ListId::from_slot(lists.len()).ok_or(RegistryError::IdSpaceExhausted)?;
        lists.push(RwLock::new(AddressList::new(list_id, owner, members)));
        drop(lists);

        debug!(list_id = %list_id, owner = %owner, "List stored");
        Ok(list_id)
    }

    fn replace(&self, list_id: ListId, members: Vec<Address>) -> Result<u64, RegistryError> {
        let members: HashSet<Address> = members.into_iter().collect();

        let lists = self.lists.read();
        let list = list_id
            .slot()
            .and_then(|slot| lists.get(slot))
            .ok_or(RegistryError::NotFound { list_id })?;
        let version = list.write().replace_members(members);
        drop(lists);

        debug!(list_id = %list_id, version, "List members replaced");
        Ok(version)
    }

    fn contains(&self, list_id: ListId, address: &Address) -> Result<bool, RegistryError> {
        self.with_list(list_id, |list| list.contains(address))
    }

    fn query_with<R, F>(
        &self,
        list_id: ListId,
        address: &Address,
        settle: F,
    ) -> Result<(R, bool), RegistryError>
    where
        F: FnOnce(Address) -> Result<R, RegistryError>,
    {
        // List lock before account locks; nothing takes them the other way round.
        self.with_list(list_id, |list| {
            let settled = settle(list.owner())?;
            Ok((settled, list.contains(address)))
        })?
    }

    fn owner_of(&self, list_id: ListId) -> Result<Address, RegistryError> {
        self.with_list(list_id, AddressList::owner)
    }

    fn summary(&self, list_id: ListId) -> Result<ListSummary, RegistryError> {
        self.with_list(list_id, AddressList::summary)
    }

    fn members(&self, list_id: ListId) -> Result<Vec<Address>, RegistryError> {
        self.with_list(list_id, |list| list.members().copied().collect())
    }

    fn len(&self) -> usize {
        self.lists.read().len()
    }
}

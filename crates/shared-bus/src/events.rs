//! # Registry Events
//!
//! Event types that flow through the shared bus.

use serde::{Deserialize, Serialize};
use shared_types::{Address, ListId};

/// All events the registry publishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// A new list was stored.
    ListCreated {
        /// Identifier allocated to the list.
        list_id: ListId,
        /// Creator and permanent owner.
        owner: Address,
    },

    /// A list's members were replaced by its owner.
    ListUpdated {
        /// Identifier of the replaced list.
        list_id: ListId,
        /// Owner that performed the update.
        owner: Address,
    },
}

impl RegistryEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::ListCreated { .. } => EventTopic::ListCreated,
            Self::ListUpdated { .. } => EventTopic::ListUpdated,
        }
    }

    /// The list this event refers to.
    #[must_use]
    pub fn list_id(&self) -> ListId {
        match self {
            Self::ListCreated { list_id, .. } | Self::ListUpdated { list_id, .. } => *list_id,
        }
    }

    /// The owner of the list this event refers to.
    #[must_use]
    pub fn owner(&self) -> Address {
        match self {
            Self::ListCreated { owner, .. } | Self::ListUpdated { owner, .. } => *owner,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// `ListCreated` events.
    ListCreated,
    /// `ListUpdated` events.
    ListUpdated,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Lists to include. Empty means all lists.
    pub list_ids: Vec<ListId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            list_ids: Vec::new(),
        }
    }

    /// Create a filter for events about specific lists.
    #[must_use]
    pub fn for_lists(list_ids: Vec<ListId>) -> Self {
        Self {
            topics: Vec::new(),
            list_ids,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &RegistryEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let list_match = self.list_ids.is_empty() || self.list_ids.contains(&event.list_id());

        topic_match && list_match
    }
}

//! # Registry Service
//!
//! Composes the list store, access control and fee settlement into the
//! three public operations and publishes `ListCreated` / `ListUpdated` on
//! the event bus.
//!
//! ## Locking
//!
//! - Every store and ledger call takes and releases its own locks before
//!   returning; no lock is held across an `.await`.
//! - Events are published after the mutation has completed.
//! - A query holds its list's read lock while the fee is settled and
//!   membership is read, so an update to the same list lands entirely
//!   before or entirely after the whole query.
//! - Lock order is list, then accounts.

use crate::adapters::{InMemoryLedger, InMemoryListStore};
use crate::config::RegistryConfig;
use crate::domain::access::OwnerAccessControl;
use crate::domain::entities::ListSummary;
use crate::domain::errors::{ConfigError, RegistryError};
use crate::domain::settlement::FeeSettlement;
use crate::ports::inbound::RegistryApi;
use crate::ports::outbound::{Ledger, ListStore};

use async_trait::async_trait;
use shared_bus::{EventPublisher, InMemoryEventBus, RegistryEvent};
use shared_types::{Address, Amount, ListId};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Counters for the registry service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegistryStats {
    /// Lists created.
    pub lists_created: u64,
    /// Successful owner updates.
    pub lists_updated: u64,
    /// Queries whose fee was settled.
    pub queries_settled: u64,
    /// Total credited to list owners.
    pub owner_fees_collected: Amount,
    /// Total credited to the treasury.
    pub treasury_fees_collected: Amount,
    /// Requests that returned an error.
    pub rejected_requests: u64,
}

/// The address registry.
pub struct RegistryService<S: ListStore, L: Ledger, P: EventPublisher> {
    store: Arc<S>,
    ledger: Arc<L>,
    access: OwnerAccessControl<S>,
    settlement: FeeSettlement<L>,
    publisher: Arc<P>,
    stats: Arc<RwLock<RegistryStats>>,
}

impl<S: ListStore, L: Ledger, P: EventPublisher> RegistryService<S, L, P> {
    /// Build a service over the given adapters.
    ///
    /// # Errors
    ///
    /// Any `ConfigError` from [`RegistryConfig::validate`].
    pub fn new(
        store: Arc<S>,
        ledger: Arc<L>,
        publisher: Arc<P>,
        config: &RegistryConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let schedule = config.fee_schedule()?;

        info!(
            owner_fee = schedule.owner_fee(),
            treasury_fee = schedule.treasury_fee(),
            treasury = %config.treasury,
            "Registry service configured"
        );

        Ok(Self {
            access: OwnerAccessControl::new(Arc::clone(&store)),
            settlement: FeeSettlement::new(Arc::clone(&ledger), schedule, config.treasury),
            store,
            ledger,
            publisher,
            stats: Arc::new(RwLock::new(RegistryStats::default())),
        })
    }

    /// Snapshot of the service counters.
    pub async fn stats(&self) -> RegistryStats {
        self.stats.read().await.clone()
    }

    /// The event publisher, for subscribing observers.
    pub fn publisher(&self) -> &Arc<P> {
        &self.publisher
    }

    /// Exact payment a query must carry.
    pub fn required_fee(&self) -> Amount {
        self.settlement.schedule().required_fee()
    }

    /// Treasury address.
    pub fn treasury(&self) -> Address {
        self.settlement.treasury()
    }

    /// Balance of any account.
    pub fn balance_of(&self, address: &Address) -> Amount {
        self.ledger.balance_of(address)
    }

    /// Number of lists created so far.
    pub fn list_count(&self) -> usize {
        self.store.len()
    }

    /// Metadata of a list. Free, unlike a membership query.
    ///
    /// # Errors
    ///
    /// `NotFound` if the list does not exist.
    pub fn list_summary(&self, list_id: ListId) -> Result<ListSummary, RegistryError> {
        self.store.summary(list_id)
    }

    /// Current members of a list, for its owner only.
    ///
    /// # Errors
    ///
    /// `NotFound` or `Unauthorized`.
    pub fn list_members(
        &self,
        caller: Address,
        list_id: ListId,
    ) -> Result<Vec<Address>, RegistryError> {
        self.access.authorize(list_id, caller)?;
        self.store.members(list_id)
    }

    /// Fund an account from outside the registry.
    ///
    /// # Errors
    ///
    /// `BalanceOverflow` if the balance would exceed `u128`.
    pub fn deposit(&self, address: Address, amount: Amount) -> Result<(), RegistryError> {
        self.ledger.deposit(address, amount)?;
        info!(address = %address, amount, "Deposit");
        Ok(())
    }

    /// Move funds out of the registry.
    ///
    /// # Errors
    ///
    /// `InsufficientBalance` if the account cannot cover it.
    pub fn withdraw(&self, address: Address, amount: Amount) -> Result<(), RegistryError> {
        self.ledger.withdraw(address, amount)?;
        info!(address = %address, amount, "Withdrawal");
        Ok(())
    }

    /// Count and log a rejected request, then hand the result back.
    async fn observe<T>(
        &self,
        operation: &'static str,
        result: Result<T, RegistryError>,
    ) -> Result<T, RegistryError> {
        if let Err(e) = &result {
            warn!(operation, kind = e.kind(), error = %e, "Request rejected");
            self.stats.write().await.rejected_requests += 1;
        }
        result
    }
}

#[async_trait]
impl<S, L, P> RegistryApi for RegistryService<S, L, P>
where
    S: ListStore + 'static,
    L: Ledger + 'static,
    P: EventPublisher + 'static,
{
    #[instrument(skip(self, members), fields(request_id = %Uuid::new_v4()))]
    async fn create_list(
        &self,
        caller: Address,
        members: Vec<Address>,
    ) -> Result<ListId, RegistryError> {
        let member_count = members.len();
        let result = self.store.create(caller, members);
        let list_id = self.observe("create_list", result).await?;

        self.stats.write().await.lists_created += 1;
        self.publisher
            .publish(RegistryEvent::ListCreated {
                list_id,
                owner: caller,
            })
            .await;

        info!(list_id = %list_id, members = member_count, "List created");
        Ok(list_id)
    }

    #[instrument(skip(self, members), fields(request_id = %Uuid::new_v4()))]
    async fn update_list(
        &self,
        caller: Address,
        list_id: ListId,
        members: Vec<Address>,
    ) -> Result<u64, RegistryError> {
        let member_count = members.len();
        let result = self
            .access
            .authorize(list_id, caller)
            .and_then(|owner| Ok((owner, self.store.replace(list_id, members)?)));
        let (owner, version) = self.observe("update_list", result).await?;

        self.stats.write().await.lists_updated += 1;
        self.publisher
            .publish(RegistryEvent::ListUpdated { list_id, owner })
            .await;

        info!(list_id = %list_id, version, members = member_count, "List updated");
        Ok(version)
    }

    #[instrument(skip(self), fields(request_id = %Uuid::new_v4()))]
    async fn query_list(
        &self,
        caller: Address,
        list_id: ListId,
        address: Address,
        amount_sent: Amount,
    ) -> Result<bool, RegistryError> {
        // Settlement and the membership read share one hold on the list.
        let result = self.store.query_with(list_id, &address, |owner| {
            self.settlement.settle(caller, owner, amount_sent)
        });
        let (receipt, is_member) = self.observe("query_list", result).await?;

        {
            let mut stats = self.stats.write().await;
            stats.queries_settled += 1;
            stats.owner_fees_collected = stats
                .owner_fees_collected
                .saturating_add(receipt.owner_share);
            stats.treasury_fees_collected = stats
                .treasury_fees_collected
                .saturating_add(receipt.treasury_share);
        }

        info!(list_id = %list_id, fee = receipt.total, "Query settled");
        Ok(is_member)
    }
}

/// Service over the in-memory adapters.
pub type InMemoryRegistryService =
    RegistryService<InMemoryListStore, InMemoryLedger, InMemoryEventBus>;

/// Build a service over fresh in-memory adapters and event bus.
///
/// # Errors
///
/// Any `ConfigError` from [`RegistryConfig::validate`].
pub fn create_in_memory_service(
    config: &RegistryConfig,
) -> Result<InMemoryRegistryService, ConfigError> {
    // The bus cannot be built with zero capacity.
    config.validate()?;
    RegistryService::new(
        Arc::new(InMemoryListStore::new()),
        Arc::new(InMemoryLedger::new()),
        Arc::new(InMemoryEventBus::with_capacity(
            config.event_channel_capacity,
        )),
        config,
    )
}

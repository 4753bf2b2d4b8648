//! In-memory balance table.
//!
//! Each account has its own mutex. A batch locks exactly the accounts it
//! touches, in ascending address order, so batches over disjoint accounts
//! run in parallel and overlapping batches cannot deadlock.
//!
//! Accounts are created lazily. A batch over known accounts only holds the
//! table's read lock long enough to clone their cells. A batch that would
//! create an account runs under the table's write lock and inserts the new
//! cell only after every posting has staged. Nothing waits on the table lock
//! while holding an account lock.

use crate::domain::entities::Posting;
use crate::domain::errors::RegistryError;
use crate::ports::outbound::Ledger;
use parking_lot::{Mutex, MutexGuard, RwLock};
use shared_types::{Address, Amount};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::debug;

type Grouped<'a> = BTreeMap<Address, Vec<&'a Posting>>;

/// In-memory implementation of [`Ledger`].
pub struct InMemoryLedger {
    accounts: RwLock<HashMap<Address, Arc<Mutex<Amount>>>>,
}

impl InMemoryLedger {
    /// Empty ledger.
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }

    /// Sum of all balances, read under every account lock at once.
    ///
    /// Saturates at `Amount::MAX`.
    #[must_use]
    pub fn total_balance(&self) -> Amount {
        // Held so no account can be created mid-sum.
        let accounts = self.accounts.read();
        let mut cells: Vec<(&Address, &Arc<Mutex<Amount>>)> = accounts.iter().collect();
        cells.sort_unstable_by_key(|(address, _)| **address);

        let guards: Vec<MutexGuard<'_, Amount>> = cells.iter().map(|(_, c)| c.lock()).collect();
        let total = guards
            .iter()
            .fold(0, |total: Amount, balance| total.saturating_add(**balance));
        total
    }

    /// Number of accounts that have ever held funds.
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.accounts.read().len()
    }

    /// Batch over accounts that all exist already.
    fn apply_existing(
        cells: &[Arc<Mutex<Amount>>],
        grouped: &Grouped<'_>,
    ) -> Result<(), RegistryError> {
        let mut guards: Vec<MutexGuard<'_, Amount>> = cells.iter().map(|c| c.lock()).collect();
        let staged = stage(guards.iter().map(|guard| **guard), grouped)?;

        for (guard, balance) in guards.iter_mut().zip(staged) {
            **guard = balance;
        }
        Ok(())
    }

    /// Batch that touches at least one unknown account.
    fn apply_creating(&self, grouped: &Grouped<'_>) -> Result<(), RegistryError> {
        let mut accounts = self.accounts.write();
        let cells: Vec<Option<Arc<Mutex<Amount>>>> = grouped
            .keys()
            .map(|address| accounts.get(address).map(Arc::clone))
            .collect();
        let mut guards: Vec<Option<MutexGuard<'_, Amount>>> = cells
            .iter()
            .map(|cell| cell.as_ref().map(|c| c.lock()))
            .collect();

        let current = guards.iter().map(|guard| guard.as_deref().copied().unwrap_or(0));
        let staged = stage(current, grouped)?;

        for ((address, guard), balance) in grouped.keys().zip(guards.iter_mut()).zip(staged) {
            match guard {
                Some(guard) => **guard = balance,
                None if balance > 0 => {
                    accounts.insert(*address, Arc::new(Mutex::new(balance)));
                }
                None => {}
            }
        }
        Ok(())
    }
}

/// Run each account's postings in order against its current balance.
fn stage(
    current: impl Iterator<Item = Amount>,
    grouped: &Grouped<'_>,
) -> Result<Vec<Amount>, RegistryError> {
    current
        .zip(grouped.values())
        .map(|(mut balance, account_postings)| {
            for posting in account_postings {
                balance = posting.apply_to(balance)?;
            }
            Ok(balance)
        })
        .collect()
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger for InMemoryLedger {
    fn balance_of(&self, address: &Address) -> Amount {
        let Some(cell) = self.accounts.read().get(address).map(Arc::clone) else {
            return 0;
        };
        let balance = *cell.lock();
        balance
    }

    fn apply(&self, postings: &[Posting]) -> Result<(), RegistryError> {
        // Ascending address order is the lock order.
        let mut grouped: Grouped<'_> = BTreeMap::new();
        for posting in postings {
            grouped.entry(posting.address).or_default().push(posting);
        }

        let known: Option<Vec<Arc<Mutex<Amount>>>> = {
            let accounts = self.accounts.read();
            grouped
                .keys()
                .map(|address| accounts.get(address).map(Arc::clone))
                .collect()
        };
        match known {
            Some(cells) => Self::apply_existing(&cells, &grouped)?,
            None => self.apply_creating(&grouped)?,
        }

        debug!(
            postings = postings.len(),
            accounts = grouped.len(),
            "Ledger batch applied"
        );
        Ok(())
    }
}

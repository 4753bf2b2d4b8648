//! # Fee Settlement
//!
//! One paid query moves `required_fee` out of the payer and splits it
//! between the list owner and the treasury. The three balance changes go to
//! the ledger as a single batch.

use crate::domain::entities::SettlementReceipt;
use crate::domain::errors::RegistryError;
use crate::domain::fees::FeeSchedule;
use crate::domain::invariants::check_conservation;
use crate::ports::outbound::Ledger;
use shared_types::{Address, Amount};
use std::sync::Arc;
use tracing::debug;

/// Settles query fees against a ledger.
pub struct FeeSettlement<L: Ledger> {
    ledger: Arc<L>,
    schedule: FeeSchedule,
    treasury: Address,
}

impl<L: Ledger> FeeSettlement<L> {
    /// Create a settlement engine for a fixed schedule and treasury.
    pub fn new(ledger: Arc<L>, schedule: FeeSchedule, treasury: Address) -> Self {
        Self {
            ledger,
            schedule,
            treasury,
        }
    }

    /// The fee schedule in force.
    #[must_use]
    pub fn schedule(&self) -> &FeeSchedule {
        &self.schedule
    }

    /// Treasury address.
    #[must_use]
    pub fn treasury(&self) -> Address {
        self.treasury
    }

    /// Charge `payer` and credit `owner` and the treasury.
    ///
    /// # Errors
    ///
    /// - `InsufficientFee` - `amount_sent` is not exactly the required fee
    /// - `InsufficientBalance` - `payer` cannot cover it
    /// - `BalanceOverflow` - a recipient's balance would overflow
    ///
    /// On any error no balance has changed.
    pub fn settle(
        &self,
        payer: Address,
        owner: Address,
        amount_sent: Amount,
    ) -> Result<SettlementReceipt, RegistryError> {
        self.schedule.check_payment(amount_sent)?;

        let postings = self.schedule.postings(payer, owner, self.treasury);
        check_conservation(&postings)?;
        self.ledger.apply(&postings)?;

        debug!(
            payer = %payer,
            owner = %owner,
            total = self.schedule.required_fee(),
            "Fee settled"
        );

        Ok(SettlementReceipt {
            payer,
            owner,
            treasury: self.treasury,
            owner_share: self.schedule.owner_fee(),
            treasury_share: self.schedule.treasury_fee(),
            total: self.schedule.required_fee(),
        })
    }
}

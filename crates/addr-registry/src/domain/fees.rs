//! # Fee Schedule
//!
//! Two constants fixed at configuration time. Their sum is computed once
//! with checked arithmetic so no call path ever has to.

use crate::domain::entities::Posting;
use crate::domain::errors::{ConfigError, RegistryError};
use shared_types::{Address, Amount};

/// Owner and treasury shares of every paid query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeSchedule {
    owner_fee: Amount,
    treasury_fee: Amount,
    required_fee: Amount,
}

impl FeeSchedule {
    /// Build a schedule.
    ///
    /// # Errors
    ///
    /// `ConfigError::FeeOverflow` if the two fees do not sum within `u128`.
    pub fn new(owner_fee: Amount, treasury_fee: Amount) -> Result<Self, ConfigError> {
        let required_fee =
            owner_fee
                .checked_add(treasury_fee)
                .ok_or(ConfigError::FeeOverflow {
                    owner_fee,
                    treasury_fee,
                })?;
        Ok(Self {
            owner_fee,
            treasury_fee,
            required_fee,
        })
    }

    /// Credited to the list owner per query.
    #[must_use]
    pub fn owner_fee(&self) -> Amount {
        self.owner_fee
    }

    /// Credited to the treasury per query.
    #[must_use]
    pub fn treasury_fee(&self) -> Amount {
        self.treasury_fee
    }

    /// Exact payment a query must carry.
    #[must_use]
    pub fn required_fee(&self) -> Amount {
        self.required_fee
    }

    /// Accept only an exact payment. Over- and under-payment are both rejected.
    ///
    /// # Errors
    ///
    /// `RegistryError::InsufficientFee` when `sent != required_fee`.
    pub fn check_payment(&self, sent: Amount) -> Result<(), RegistryError> {
        if sent == self.required_fee {
            Ok(())
        } else {
            Err(RegistryError::InsufficientFee {
                required: self.required_fee,
                sent,
            })
        }
    }

    /// The three postings of one fee split. The payer's debit comes first.
    #[must_use]
    pub fn postings(&self, payer: Address, owner: Address, treasury: Address) -> [Posting; 3] {
        [
            Posting::debit(payer, self.required_fee),
            Posting::credit(owner, self.owner_fee),
            Posting::credit(treasury, self.treasury_fee),
        ]
    }
}

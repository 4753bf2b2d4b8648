//! # Registry Configuration
//!
//! Fees and the treasury are fixed for the registry's lifetime. They come
//! from a JSON document, the environment, or code, and are validated once
//! before the service is built.
//!
//! | Variable | Field |
//! |---|---|
//! | `ADDRLIST_OWNER_FEE` | `owner_fee` |
//! | `ADDRLIST_TREASURY_FEE` | `treasury_fee` |
//! | `ADDRLIST_TREASURY` | `treasury` (hex, optional `0x`) |
//! | `ADDRLIST_EVENT_CAPACITY` | `event_channel_capacity` |

use crate::domain::errors::ConfigError;
use crate::domain::fees::FeeSchedule;
use serde::{Deserialize, Serialize};
use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use shared_types::{Address, Amount};
use std::str::FromStr;

/// Overrides `owner_fee`.
pub const ENV_OWNER_FEE: &str = "ADDRLIST_OWNER_FEE";
/// Overrides `treasury_fee`.
pub const ENV_TREASURY_FEE: &str = "ADDRLIST_TREASURY_FEE";
/// Overrides `treasury`.
pub const ENV_TREASURY: &str = "ADDRLIST_TREASURY";
/// Overrides `event_channel_capacity`.
pub const ENV_EVENT_CAPACITY: &str = "ADDRLIST_EVENT_CAPACITY";

/// Registry configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Credited to the list owner per query.
    pub owner_fee: Amount,
    /// Credited to the treasury per query.
    pub treasury_fee: Amount,
    /// Treasury account. Must be set; the zero default fails validation.
    pub treasury: Address,
    /// Buffer size of the event broadcast channel.
    pub event_channel_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            owner_fee: 0,
            treasury_fee: 0,
            treasury: Address::ZERO,
            event_channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl RegistryConfig {
    /// Config with the given fees and treasury, other fields defaulted.
    #[must_use]
    pub fn new(owner_fee: Amount, treasury_fee: Amount, treasury: Address) -> Self {
        Self {
            owner_fee,
            treasury_fee,
            treasury,
            ..Self::default()
        }
    }

    /// Parse a JSON document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidDocument` on malformed JSON.
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(document).map_err(|e| ConfigError::InvalidDocument(e.to_string()))
    }

    /// Defaults overridden by `ADDRLIST_*` environment variables.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidEnv` if a variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from any key lookup. Unset keys leave fields as they are.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidEnv` if a value is present but malformed.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(fee) = parse_var(&lookup, ENV_OWNER_FEE)? {
            self.owner_fee = fee;
        }
        if let Some(fee) = parse_var(&lookup, ENV_TREASURY_FEE)? {
            self.treasury_fee = fee;
        }
        if let Some(treasury) = parse_var(&lookup, ENV_TREASURY)? {
            self.treasury = treasury;
        }
        if let Some(capacity) = parse_var(&lookup, ENV_EVENT_CAPACITY)? {
            self.event_channel_capacity = capacity;
        }
        Ok(self)
    }

    /// Reject configurations the registry cannot start with.
    ///
    /// # Errors
    ///
    /// `FeeOverflow`, `ZeroTreasury` or `ZeroChannelCapacity`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fee_schedule()?;
        if self.treasury.is_zero() {
            return Err(ConfigError::ZeroTreasury);
        }
        if self.event_channel_capacity == 0 {
            return Err(ConfigError::ZeroChannelCapacity);
        }
        Ok(())
    }

    /// The fee schedule these fees describe.
    ///
    /// # Errors
    ///
    /// `ConfigError::FeeOverflow` if the fees do not sum within `u128`.
    pub fn fee_schedule(&self) -> Result<FeeSchedule, ConfigError> {
        FeeSchedule::new(self.owner_fee, self.treasury_fee)
    }
}

fn parse_var<T, F>(lookup: &F, var: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|e: T::Err| ConfigError::InvalidEnv {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

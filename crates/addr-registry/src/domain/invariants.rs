//! # Domain Invariants
//!
//! Checks that must hold across every registry operation:
//!
//! - Conservation: a fee split moves value, it never creates or destroys it.
//! - Sequential ids: allocated list ids are `1, 2, 3, ...` with no gaps.

use crate::domain::entities::{Direction, Posting};
use crate::domain::errors::RegistryError;
use shared_types::{Amount, ListId};

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// Conservation: total debits equal total credits within one batch.
///
/// A batch whose sums overflow `u128` is reported as a violation, with the
/// overflowing side saturated.
///
/// # Errors
///
/// `RegistryError::ConservationViolated` when the sides differ.
pub fn check_conservation(postings: &[Posting]) -> Result<(), RegistryError> {
    let mut debited: Option<Amount> = Some(0);
    let mut credited: Option<Amount> = Some(0);

    for posting in postings {
        let side = match posting.direction {
            Direction::Debit => &mut debited,
            Direction::Credit => &mut credited,
        };
        *side = side.and_then(|total| total.checked_add(posting.amount));
    }

    match (debited, credited) {
        (Some(d), Some(c)) if d == c => Ok(()),
        (d, c) => Err(RegistryError::ConservationViolated {
            debited: d.unwrap_or(Amount::MAX),
            credited: c.unwrap_or(Amount::MAX),
        }),
    }
}

/// Sequential ids: `ids` (in allocation order) start at 1 and step by 1.
#[must_use]
pub fn check_sequential_ids(ids: &[ListId]) -> bool {
    ids.iter()
        .enumerate()
        .all(|(slot, id)| ListId::from_slot(slot) == Some(*id))
}

//! Revenue conservation invariant checker.
//!
//! Invariant held after every committed operation:
//! ```text
//! first_pot + second_pot == Σ(purchase values) - Σ(withdrawn amounts)
//! ```
//!
//! The right-hand side is tracked per pot as the outstanding (unwithdrawn)
//! share of each beneficiary, so each side stays bounded by what its pot
//! could hold and the sum identity follows from the two per-pot identities.
//! Tracking never rejects an operation: only the pot credit itself can
//! overflow. Lifetime totals are kept alongside for reporting and saturate.

use serde::{Deserialize, Serialize};
use splitpot_types::{Amount, Beneficiary, PotBalances, Result, SplitPotError};

use crate::purchase::RevenueSplit;

/// Outstanding revenue per pot plus lifetime received/withdrawn totals.
///
/// Updates return a new value instead of mutating, so an operation can
/// prepare every change up front and commit only once nothing can fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueConservation {
    outstanding: PotBalances,
    received: Amount,
    withdrawn: Amount,
}

impl RevenueConservation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Totals after receiving a purchase divided as `split`.
    #[must_use]
    pub fn with_receipt(self, split: RevenueSplit) -> Self {
        Self {
            outstanding: PotBalances {
                first: self.outstanding.first.saturating_add(split.first),
                second: self.outstanding.second.saturating_add(split.second),
            },
            received: self.received.saturating_add(split.value()),
            withdrawn: self.withdrawn,
        }
    }

    /// Totals after paying `amount` out of `beneficiary`'s pot.
    ///
    /// # Errors
    /// Returns `ConservationViolation` if more is paid out than that pot has
    /// outstanding.
    pub fn with_withdrawal(self, beneficiary: Beneficiary, amount: Amount) -> Result<Self> {
        let mut outstanding = self.outstanding;
        let share = outstanding.get_mut(beneficiary);
        *share = share.checked_sub(amount).ok_or_else(|| {
            SplitPotError::ConservationViolation {
                reason: format!(
                    "withdrawal of {amount} from {beneficiary} exceeds outstanding {}",
                    self.outstanding.get(beneficiary)
                ),
            }
        })?;
        Ok(Self {
            outstanding,
            received: self.received,
            withdrawn: self.withdrawn.saturating_add(amount),
        })
    }

    /// Check each pot against its outstanding share.
    ///
    /// # Errors
    /// Returns [`SplitPotError::ConservationViolation`] on any mismatch.
    pub fn verify(&self, pots: &PotBalances) -> Result<()> {
        if *pots != self.outstanding {
            return Err(SplitPotError::ConservationViolation {
                reason: format!(
                    "pots hold first={} second={}, expected first={} second={} \
                     (received={}, withdrawn={})",
                    pots.first,
                    pots.second,
                    self.outstanding.first,
                    self.outstanding.second,
                    self.received,
                    self.withdrawn
                ),
            });
        }
        Ok(())
    }

    /// Lifetime purchase value received (saturating).
    #[must_use]
    pub fn total_received(&self) -> Amount {
        self.received
    }

    /// Lifetime value paid out (saturating).
    #[must_use]
    pub fn total_withdrawn(&self) -> Amount {
        self.withdrawn
    }
}

//! Withdrawal receipt returned to the host after a settled payout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Amount, Beneficiary, PartyId};

/// Proof that a pot was paid out in full.
///
/// `amount` is the balance captured before the pot was reset, which is
/// exactly what the payout rail was asked to move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalReceipt {
    /// Time-ordered receipt identifier (UUIDv7).
    pub id: Uuid,
    /// Whose pot was emptied.
    pub beneficiary: Beneficiary,
    /// Identity the value was paid to.
    pub recipient: PartyId,
    pub amount: Amount,
    pub settled_at: DateTime<Utc>,
}

impl WithdrawalReceipt {
    /// Stamp a new receipt with a fresh id and the current time.
    #[must_use]
    pub fn issue(beneficiary: Beneficiary, recipient: PartyId, amount: Amount) -> Self {
        Self {
            id: Uuid::now_v7(),
            beneficiary,
            recipient,
            amount,
            settled_at: Utc::now(),
        }
    }
}

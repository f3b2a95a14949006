//! Pot balance types.
//!
//! Each beneficiary owns one pot: revenue credited by purchases and not yet
//! withdrawn. Pots only grow through purchases and only drop to zero through
//! a withdrawal by their owner.

use serde::{Deserialize, Serialize};

use crate::Beneficiary;

/// Monetary value in the smallest indivisible unit.
pub type Amount = u128;

/// The two pots of a ledger.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotBalances {
    /// Owed to the First beneficiary.
    pub first: Amount,
    /// Owed to the Second beneficiary.
    pub second: Amount,
}

impl PotBalances {
    /// Both pots empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of one beneficiary's pot.
    #[must_use]
    pub fn get(&self, beneficiary: Beneficiary) -> Amount {
        match beneficiary {
            Beneficiary::First => self.first,
            Beneficiary::Second => self.second,
        }
    }

    /// Mutable access to one beneficiary's pot.
    pub fn get_mut(&mut self, beneficiary: Beneficiary) -> &mut Amount {
        match beneficiary {
            Beneficiary::First => &mut self.first,
            Beneficiary::Second => &mut self.second,
        }
    }

    /// Sum of both pots, or `None` if it does not fit in [`Amount`].
    #[must_use]
    pub fn total(&self) -> Option<Amount> {
        self.first.checked_add(self.second)
    }

    /// Whether neither pot holds anything.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.first == 0 && self.second == 0
    }
}

//! Settlement (withdrawal) engine.
//!
//! A withdrawal pays a pot out in full through the host's [`Payout`] rail:
//! 1. Capture the whole pot balance and reset the pot to zero
//! 2. Hand the captured amount (never the reset value) to the rail
//! 3. If the rail fails, put the captured amount back
//!
//! Either the value moves and the pot is zero, or nothing changes.

use std::collections::HashMap;

use splitpot_types::{Amount, Beneficiary, PartyId, PotBalances, Result, SplitPotError};
use thiserror::Error;

/// Failure reported by a payout rail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayoutError {
    /// The rail refused the transfer.
    #[error("transfer rejected: {0}")]
    Rejected(String),

    /// Crediting the recipient would overflow their external balance.
    #[error("recipient balance overflow")]
    RecipientOverflow,
}

/// The host's "pay out `amount` to `recipient`" primitive.
pub trait Payout {
    fn pay_out(
        &mut self,
        recipient: PartyId,
        amount: Amount,
    ) -> std::result::Result<(), PayoutError>;
}

/// Empty one pot into `recipient`'s external account.
///
/// Returns the amount paid out.
///
/// # Errors
/// - `EmptyPot` if the pot holds nothing (no payout is attempted)
/// - `PayoutFailed` if the rail rejects the transfer; the pot is restored
pub fn settle_pot<P: Payout + ?Sized>(
    pots: &mut PotBalances,
    beneficiary: Beneficiary,
    recipient: PartyId,
    payout: &mut P,
) -> Result<Amount> {
    let captured = std::mem::take(pots.get_mut(beneficiary));
    if captured == 0 {
        return Err(SplitPotError::EmptyPot(beneficiary));
    }

    if let Err(err) = payout.pay_out(recipient, captured) {
        *pots.get_mut(beneficiary) = captured;
        tracing::warn!(
            beneficiary = %beneficiary,
            recipient = %recipient,
            amount = captured,
            error = %err,
            "Payout failed, pot restored"
        );
        return Err(SplitPotError::PayoutFailed {
            recipient,
            amount: captured,
            reason: err.to_string(),
        });
    }

    Ok(captured)
}

/// In-process payout rail holding per-identity external balances.
///
/// Useful for hosts that settle off-ledger later, and for tests. Can be
/// switched offline to make every transfer fail.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRail {
    balances: HashMap<PartyId, Amount>,
    transfers: Vec<(PartyId, Amount)>,
    offline: Option<String>,
}

impl InMemoryRail {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// External balance received by `who` so far.
    #[must_use]
    pub fn balance(&self, who: PartyId) -> Amount {
        self.balances.get(&who).copied().unwrap_or(0)
    }

    /// Every successful transfer, oldest first.
    #[must_use]
    pub fn transfers(&self) -> &[(PartyId, Amount)] {
        &self.transfers
    }

    /// Reject all transfers with `reason` until [`Self::set_online`].
    pub fn set_offline(&mut self, reason: impl Into<String>) {
        self.offline = Some(reason.into());
    }

    pub fn set_online(&mut self) {
        self.offline = None;
    }
}

impl Payout for InMemoryRail {
    fn pay_out(
        &mut self,
        recipient: PartyId,
        amount: Amount,
    ) -> std::result::Result<(), PayoutError> {
        if let Some(reason) = &self.offline {
            return Err(PayoutError::Rejected(reason.clone()));
        }
        let balance = self.balances.entry(recipient).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(PayoutError::RecipientOverflow)?;
        self.transfers.push((recipient, amount));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Rail that records the amount it was asked to move.
    struct Spy(Vec<Amount>);

    impl Payout for Spy {
        fn pay_out(
            &mut self,
            _recipient: PartyId,
            amount: Amount,
        ) -> std::result::Result<(), PayoutError> {
            self.0.push(amount);
            Ok(())
        }
    }

    #[test]
    fn pays_captured_balance_not_reset_value() {
        let mut pots = PotBalances {
            first: 40,
            second: 2,
        };
        let mut spy = Spy(Vec::new());
        let paid = settle_pot(&mut pots, Beneficiary::First, PartyId::random(), &mut spy).unwrap();
        assert_eq!(paid, 40);
        assert_eq!(spy.0, vec![40]);
        assert_eq!(pots, PotBalances { first: 0, second: 2 });
    }

    #[test]
    fn empty_pot_never_reaches_rail() {
        let mut pots = PotBalances {
            first: 0,
            second: 9,
        };
        let mut spy = Spy(Vec::new());
        let err =
            settle_pot(&mut pots, Beneficiary::First, PartyId::random(), &mut spy).unwrap_err();
        assert!(matches!(err, SplitPotError::EmptyPot(Beneficiary::First)));
        assert!(spy.0.is_empty());
        assert_eq!(pots.second, 9);
    }

    #[test]
    fn failed_payout_restores_pot() {
        let mut pots = PotBalances {
            first: 1,
            second: 5,
        };
        let mut rail = InMemoryRail::new();
        rail.set_offline("maintenance");
        let to = PartyId::random();
        let err = settle_pot(&mut pots, Beneficiary::Second, to, &mut rail).unwrap_err();
        assert!(matches!(
            err,
            SplitPotError::PayoutFailed { amount: 5, ref reason, .. } if reason.contains("maintenance")
        ));
        assert_eq!(pots, PotBalances { first: 1, second: 5 });
        assert_eq!(rail.balance(to), 0);
        assert!(rail.transfers().is_empty());
    }

    #[test]
    fn rail_accumulates_per_recipient() {
        let mut rail = InMemoryRail::new();
        let a = PartyId::random();
        let b = PartyId::random();
        rail.pay_out(a, 3).unwrap();
        rail.pay_out(a, 4).unwrap();
        rail.pay_out(b, 1).unwrap();
        assert_eq!(rail.balance(a), 7);
        assert_eq!(rail.balance(b), 1);
        assert_eq!(rail.transfers().len(), 3);
    }

    #[test]
    fn rail_overflow_is_rejected() {
        let mut rail = InMemoryRail::new();
        let a = PartyId::random();
        rail.pay_out(a, Amount::MAX).unwrap();
        assert_eq!(rail.pay_out(a, 1), Err(PayoutError::RecipientOverflow));
        assert_eq!(rail.balance(a), Amount::MAX);
    }

    #[test]
    fn rail_back_online() {
        let mut rail = InMemoryRail::new();
        rail.set_offline("x");
        assert!(rail.pay_out(PartyId::random(), 1).is_err());
        rail.set_online();
        assert!(rail.pay_out(PartyId::random(), 1).is_ok());
    }
}

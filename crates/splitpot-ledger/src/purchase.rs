//! Purchase & split engine.
//!
//! A purchase value is divided between the pots as
//! `first = floor(v / 2)`, `second = v - first`: an odd unit always lands in
//! the Second pot and nothing is created or lost.
//!
//! Purchase history is kept per caller in two shapes: the ordered list of
//! catalog services bought, and the legacy order note (order ids joined by
//! [`constants::ORDER_NOTE_SEPARATOR`]).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use splitpot_types::{Amount, PartyId, PotBalances, Result, ServiceId, SplitPotError, constants};

/// How one purchase value is divided between the pots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueSplit {
    pub first: Amount,
    pub second: Amount,
}

impl RevenueSplit {
    /// Split `value`, rounding the First portion down.
    #[must_use]
    pub fn of(value: Amount) -> Self {
        let first = value / 2;
        Self {
            first,
            second: value - first,
        }
    }

    /// The value this split came from.
    #[must_use]
    pub fn value(&self) -> Amount {
        self.first + self.second
    }

    /// Pots after crediting this split, without touching `pots`.
    ///
    /// # Errors
    /// Returns `ArithmeticOverflow` if either pot would overflow.
    pub fn credited_to(&self, pots: &PotBalances) -> Result<PotBalances> {
        Ok(PotBalances {
            first: pots
                .first
                .checked_add(self.first)
                .ok_or(SplitPotError::overflow("first pot credit"))?,
            second: pots
                .second
                .checked_add(self.second)
                .ok_or(SplitPotError::overflow("second pot credit"))?,
        })
    }
}

/// Per-caller purchase history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseBook {
    /// Services bought, in purchase order.
    purchases: HashMap<PartyId, Vec<ServiceId>>,
    /// Legacy order note per caller.
    orders: HashMap<PartyId, String>,
}

impl PurchaseBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bought service to the buyer's record.
    pub fn record_service(&mut self, buyer: PartyId, service_id: ServiceId) {
        self.purchases.entry(buyer).or_default().push(service_id);
    }

    /// Append an order id to the buyer's order note.
    pub fn record_order(&mut self, buyer: PartyId, order_id: &str) {
        let note = self.orders.entry(buyer).or_default();
        if !note.is_empty() {
            note.push(constants::ORDER_NOTE_SEPARATOR);
        }
        note.push_str(order_id);
    }

    /// Services bought by `buyer`; empty if they never bought one.
    #[must_use]
    pub fn purchases(&self, buyer: PartyId) -> &[ServiceId] {
        self.purchases.get(&buyer).map_or(&[], Vec::as_slice)
    }

    /// Order note of `buyer`; empty if they never placed a free-form order.
    #[must_use]
    pub fn orders(&self, buyer: PartyId) -> &str {
        self.orders.get(&buyer).map_or("", String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_floors_first_and_conserves() {
        for v in [0u128, 1, 2, 3, 10, 11, 1_000_001] {
            let s = RevenueSplit::of(v);
            assert_eq!(s.first, v / 2);
            assert_eq!(s.first + s.second, v);
        }
    }

    #[test]
    fn odd_unit_goes_to_second() {
        assert_eq!(RevenueSplit::of(1), RevenueSplit { first: 0, second: 1 });
        assert_eq!(RevenueSplit::of(7), RevenueSplit { first: 3, second: 4 });
    }

    #[test]
    fn split_of_max_does_not_overflow() {
        let s = RevenueSplit::of(Amount::MAX);
        assert_eq!(s.first, Amount::MAX / 2);
        assert_eq!(s.second, Amount::MAX / 2 + 1);
        assert_eq!(s.value(), Amount::MAX);
    }

    #[test]
    fn credit_adds_each_portion() {
        let pots = PotBalances {
            first: 5,
            second: 6,
        };
        let after = RevenueSplit::of(3).credited_to(&pots).unwrap();
        assert_eq!(after, PotBalances { first: 6, second: 8 });
    }

    #[test]
    fn credit_overflow_reports_pot() {
        let pots = PotBalances {
            first: 0,
            second: Amount::MAX,
        };
        let err = RevenueSplit::of(1).credited_to(&pots).unwrap_err();
        assert!(matches!(
            err,
            SplitPotError::ArithmeticOverflow { operation: "second pot credit" }
        ));
    }

    #[test]
    fn purchases_append_in_order() {
        let mut book = PurchaseBook::new();
        let buyer = PartyId::random();
        book.record_service(buyer, ServiceId(2));
        book.record_service(buyer, ServiceId(0));
        book.record_service(buyer, ServiceId(2));
        assert_eq!(book.purchases(buyer), &[ServiceId(2), ServiceId(0), ServiceId(2)]);
        assert!(book.purchases(PartyId::random()).is_empty());
    }

    #[test]
    fn order_note_joins_with_separator() {
        let mut book = PurchaseBook::new();
        let buyer = PartyId::random();
        assert_eq!(book.orders(buyer), "");
        book.record_order(buyer, "A-1");
        assert_eq!(book.orders(buyer), "A-1");
        book.record_order(buyer, "B-2");
        assert_eq!(book.orders(buyer), "A-1,B-2");
    }

    #[test]
    fn histories_are_per_buyer() {
        let mut book = PurchaseBook::new();
        let a = PartyId::random();
        let b = PartyId::random();
        book.record_service(a, ServiceId(0));
        book.record_order(b, "x");
        assert!(book.purchases(b).is_empty());
        assert_eq!(book.orders(a), "");
    }
}

//! Property tests: conservation and the split rule hold for arbitrary
//! interleavings of purchases, withdrawals, and rejected operations.

use proptest::prelude::*;
use splitpot_ledger::{InMemoryRail, Ledger, RevenueSplit};
use splitpot_types::*;

#[derive(Debug, Clone)]
enum Op {
    Catalog { service: u64, value: u64 },
    FreeForm { value: u64 },
    WithdrawFirst,
    WithdrawSecond,
    StrangerWithdraw,
    RailOutage,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u64..4, any::<u64>()).prop_map(|(service, value)| Op::Catalog { service, value }),
        any::<u64>().prop_map(|value| Op::FreeForm { value }),
        Just(Op::WithdrawFirst),
        Just(Op::WithdrawSecond),
        Just(Op::StrangerWithdraw),
        Just(Op::RailOutage),
    ]
}

proptest! {
    #[test]
    fn split_conserves_value(v in any::<u128>()) {
        let s = RevenueSplit::of(v);
        prop_assert_eq!(s.first, v / 2);
        prop_assert_eq!(s.first.checked_add(s.second), Some(v));
        prop_assert!(s.second - s.first <= 1);
    }

    #[test]
    fn pots_track_unwithdrawn_revenue(ops in proptest::collection::vec(op(), 1..60)) {
        let first = PartyId::derive("first");
        let second = PartyId::derive("second");
        let buyer = PartyId::derive("buyer");
        let mut ledger = Ledger::new("prop", first, second);
        // Prices 0, 10, 1000; service 3 is never listed.
        for price in [0u128, 10, 1000] {
            ledger.add_service(first, "svc", price).unwrap();
        }

        let mut rail = InMemoryRail::new();
        let mut received: u128 = 0;
        let mut withdrawn: u128 = 0;

        for op in ops {
            let before = ledger.clone();
            let outcome = match op {
                Op::Catalog { service, value } => ledger
                    .purchase(buyer, ServiceId(service), u128::from(value))
                    .map(|split| received += split.value()),
                Op::FreeForm { value } => ledger
                    .purchase_order(buyer, "o", u128::from(value))
                    .map(|split| received += split.value()),
                Op::WithdrawFirst => ledger
                    .withdraw_first(first, &mut rail)
                    .map(|r| withdrawn += r.amount),
                Op::WithdrawSecond => ledger
                    .withdraw_second(second, &mut rail)
                    .map(|r| withdrawn += r.amount),
                Op::StrangerWithdraw => ledger
                    .withdraw_first(buyer, &mut rail)
                    .map(|r| withdrawn += r.amount),
                Op::RailOutage => {
                    rail.set_offline("outage");
                    let res = ledger.withdraw_second(second, &mut rail).map(|_| ());
                    rail.set_online();
                    prop_assert!(res.is_err());
                    res
                }
            };

            if outcome.is_err() {
                prop_assert_eq!(&ledger, &before);
            }
            let pots = ledger.pots();
            prop_assert_eq!(pots.total(), Some(received - withdrawn));
            prop_assert_eq!(ledger.total_received(), received);
            prop_assert_eq!(ledger.total_withdrawn(), withdrawn);
            prop_assert!(ledger.verify_conservation().is_ok());
        }

        prop_assert_eq!(rail.balance(first) + rail.balance(second), withdrawn);
        prop_assert_eq!(rail.balance(buyer), 0);
    }
}

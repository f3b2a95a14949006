//! # splitpot-ledger
//!
//! The **SplitPot** ledger state machine: two beneficiaries share a service
//! catalog, every purchase is split between their two pots, and each
//! beneficiary withdraws their own pot in full.
//!
//! ## Architecture
//!
//! One [`Ledger`] owns all state. Its responsibilities are split across:
//! 1. **Authorization guard** ([`authorization`]): role checks against the
//!    current beneficiary identities
//! 2. **Service catalog** ([`ServiceCatalog`]): dense ids, in-place updates
//! 3. **Purchase & split engine** ([`purchase`]): floor-to-first split,
//!    per-caller purchase history
//! 4. **Settlement engine** ([`settlement`]): capture, reset, pay out via
//!    the host's [`Payout`] rail, restore on failure
//! 5. **Conservation checker** ([`RevenueConservation`]): pots always equal
//!    unwithdrawn revenue
//!
//! ## Operation Flow
//!
//! ```text
//! caller identity ─▶ guard ─▶ validate + compute ─▶ commit
//!                      │              │
//!                      └─ Err ◀───────┘   (state untouched)
//! ```
//!
//! Multi-threaded hosts wrap the ledger in a [`SharedLedger`].

pub mod authorization;
pub mod catalog;
pub mod conservation;
pub mod ledger;
pub mod purchase;
pub mod settlement;
pub mod shared;

pub use authorization::Parties;
pub use catalog::ServiceCatalog;
pub use conservation::RevenueConservation;
pub use ledger::{Ledger, LedgerSnapshot};
pub use purchase::{PurchaseBook, RevenueSplit};
pub use settlement::{InMemoryRail, Payout, PayoutError};
pub use shared::SharedLedger;

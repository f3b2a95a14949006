//! # splitpot-types
//!
//! Shared types, errors, and configuration for the **SplitPot** two-party
//! revenue ledger.
//!
//! This crate is the leaf dependency of the workspace: every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`PartyId`], [`ServiceId`]
//! - **Roles**: [`Role`], [`Beneficiary`]
//! - **Catalog model**: [`Service`]
//! - **Balance model**: [`PotBalances`], [`Amount`]
//! - **Settlement model**: [`WithdrawalReceipt`]
//! - **Configuration**: [`LedgerConfig`], [`PurchaseModes`], [`PurchaseMode`]
//! - **Errors**: [`SplitPotError`] with `SP_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod pots;
pub mod receipt;
pub mod role;
pub mod service;

// Re-export all primary types at crate root for ergonomic imports:
//   use splitpot_types::{PartyId, ServiceId, Service, PotBalances, ...};

pub use config::*;
pub use error::*;
pub use ids::*;
pub use pots::*;
pub use receipt::*;
pub use role::*;
pub use service::*;

// Constants are accessed via `splitpot_types::constants::FOO`
// (not re-exported to avoid name collisions).

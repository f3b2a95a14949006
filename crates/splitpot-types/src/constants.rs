//! System-wide constants for the SplitPot ledger.

/// Separator placed between order identifiers in a caller's order note.
pub const ORDER_NOTE_SEPARATOR: char = ',';

/// Length in bytes of a [`crate::PartyId`].
pub const PARTY_ID_LEN: usize = 20;

/// Domain tag mixed into [`crate::PartyId::derive`].
pub const PARTY_ID_DOMAIN: &[u8] = b"splitpot:party_id:v1:";

/// First identifier handed out by an empty catalog.
pub const FIRST_SERVICE_ID: u64 = 0;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "SplitPot";

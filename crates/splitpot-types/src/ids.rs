//! Identifiers used throughout SplitPot.
//!
//! Parties are 20-byte account identities rendered as `0x`-prefixed hex.
//! Services carry a dense sequential index assigned by the catalog.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{SplitPotError, constants};

// ---------------------------------------------------------------------------
// PartyId
// ---------------------------------------------------------------------------

/// Identity of a caller or beneficiary.
///
/// Supplied by the host environment for every operation; the ledger never
/// lets a caller choose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PartyId(pub [u8; constants::PARTY_ID_LEN]);

impl PartyId {
    /// The all-zero identity. Accepted by the ledger like any other.
    pub const ZERO: Self = Self([0u8; constants::PARTY_ID_LEN]);

    /// Deterministic identity from a human-readable label.
    ///
    /// The same label always yields the same identity, which keeps config
    /// files and test fixtures readable.
    #[must_use]
    pub fn derive(label: &str) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(constants::PARTY_ID_DOMAIN);
        hasher.update(label.as_bytes());
        let hash = hasher.finalize();
        let mut bytes = [0u8; constants::PARTY_ID_LEN];
        bytes.copy_from_slice(&hash[..constants::PARTY_ID_LEN]);
        Self(bytes)
    }

    /// Random identity for tests.
    #[cfg(any(test, feature = "test-helpers"))]
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for PartyId {
    type Err = SplitPotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let raw = hex::decode(digits).map_err(|e| SplitPotError::InvalidPartyId {
            reason: format!("{s:?}: {e}"),
        })?;
        let bytes: [u8; constants::PARTY_ID_LEN] =
            raw.try_into()
                .map_err(|raw: Vec<u8>| SplitPotError::InvalidPartyId {
                    reason: format!(
                        "{s:?}: expected {} bytes, got {}",
                        constants::PARTY_ID_LEN,
                        raw.len()
                    ),
                })?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for PartyId {
    type Error = SplitPotError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PartyId> for String {
    fn from(id: PartyId) -> Self {
        id.to_string()
    }
}

// ---------------------------------------------------------------------------
// ServiceId
// ---------------------------------------------------------------------------

/// Dense catalog index. Assigned sequentially from zero and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(pub u64);

impl ServiceId {
    /// The identifier after this one, or `None` at the end of the domain.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "svc:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn party_id_display_is_prefixed_hex() {
        let id = PartyId([0x11; 20]);
        let shown = id.to_string();
        assert!(shown.starts_with("0x1111"));
        assert_eq!(shown.len(), 2 + 40);
    }

    #[test]
    fn party_id_parses_with_and_without_prefix() {
        let id = PartyId::derive("alice");
        let with: PartyId = id.to_string().parse().unwrap();
        let without: PartyId = hex::encode(id.0).parse().unwrap();
        assert_eq!(with, id);
        assert_eq!(without, id);
    }

    #[test]
    fn party_id_rejects_wrong_length() {
        let err = "0xdeadbeef".parse::<PartyId>().unwrap_err();
        assert!(matches!(err, SplitPotError::InvalidPartyId { .. }));
    }

    #[test]
    fn party_id_rejects_non_hex() {
        let err = "0xzz".parse::<PartyId>().unwrap_err();
        assert!(matches!(err, SplitPotError::InvalidPartyId { .. }));
    }

    #[test]
    fn derive_is_deterministic_and_label_sensitive() {
        assert_eq!(PartyId::derive("first"), PartyId::derive("first"));
        assert_ne!(PartyId::derive("first"), PartyId::derive("second"));
        assert!(!PartyId::derive("first").is_zero());
    }

    #[test]
    fn party_id_serializes_as_string() {
        let id = PartyId::derive("bob");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        let back: PartyId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn random_ids_differ() {
        assert_ne!(PartyId::random(), PartyId::random());
    }

    #[test]
    fn service_id_next_is_checked() {
        assert_eq!(ServiceId(0).next(), Some(ServiceId(1)));
        assert_eq!(ServiceId(u64::MAX).next(), None);
        assert_eq!(format!("{}", ServiceId(3)), "svc:3");
    }
}

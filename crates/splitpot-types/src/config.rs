//! Ledger instantiation config.

use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};

use crate::{PartyId, Result, SplitPotError};

/// One of the two purchase entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PurchaseMode {
    /// Priced purchase of a catalog service.
    Catalog,
    /// Legacy purchase of any non-zero value against a free-text order id.
    FreeForm,
}

impl fmt::Display for PurchaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog => write!(f, "CATALOG"),
            Self::FreeForm => write!(f, "FREE_FORM"),
        }
    }
}

/// Which purchase entry points a ledger accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseModes {
    CatalogOnly,
    FreeFormOnly,
    #[default]
    Both,
}

impl PurchaseModes {
    #[must_use]
    pub fn allows(self, mode: PurchaseMode) -> bool {
        matches!(
            (self, mode),
            (Self::Both, _)
                | (Self::CatalogOnly, PurchaseMode::Catalog)
                | (Self::FreeFormOnly, PurchaseMode::FreeForm)
        )
    }
}

/// Everything needed to instantiate a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Immutable display name.
    pub name: String,
    pub first_party: PartyId,
    pub second_party: PartyId,
    #[serde(default)]
    pub purchase_modes: PurchaseModes,
}

impl LedgerConfig {
    /// Config accepting both purchase modes.
    #[must_use]
    pub fn new(name: impl Into<String>, first_party: PartyId, second_party: PartyId) -> Self {
        Self {
            name: name.into(),
            first_party,
            second_party,
            purchase_modes: PurchaseModes::default(),
        }
    }

    #[must_use]
    pub fn with_purchase_modes(mut self, modes: PurchaseModes) -> Self {
        self.purchase_modes = modes;
        self
    }

    /// Parse a config from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SplitPotError::Configuration(e.to_string()))
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SplitPotError::Configuration(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purchase_modes_default_allows_both() {
        let modes = PurchaseModes::default();
        assert!(modes.allows(PurchaseMode::Catalog));
        assert!(modes.allows(PurchaseMode::FreeForm));
    }

    #[test]
    fn restricted_modes() {
        assert!(PurchaseModes::CatalogOnly.allows(PurchaseMode::Catalog));
        assert!(!PurchaseModes::CatalogOnly.allows(PurchaseMode::FreeForm));
        assert!(PurchaseModes::FreeFormOnly.allows(PurchaseMode::FreeForm));
        assert!(!PurchaseModes::FreeFormOnly.allows(PurchaseMode::Catalog));
    }

    #[test]
    fn config_from_json_defaults_modes() {
        let first = PartyId::derive("first");
        let second = PartyId::derive("second");
        let json = format!(
            r#"{{"name":"studio","first_party":"{first}","second_party":"{second}"}}"#
        );
        let cfg = LedgerConfig::from_json_str(&json).unwrap();
        assert_eq!(cfg.name, "studio");
        assert_eq!(cfg.first_party, first);
        assert_eq!(cfg.second_party, second);
        assert_eq!(cfg.purchase_modes, PurchaseModes::Both);
    }

    #[test]
    fn config_from_json_reads_modes() {
        let json = format!(
            r#"{{"name":"n","first_party":"{}","second_party":"{}","purchase_modes":"catalog_only"}}"#,
            PartyId::ZERO,
            PartyId::ZERO
        );
        let cfg = LedgerConfig::from_json_str(&json).unwrap();
        assert_eq!(cfg.purchase_modes, PurchaseModes::CatalogOnly);
    }

    #[test]
    fn bad_party_id_is_configuration_error() {
        let json = r#"{"name":"n","first_party":"0x12","second_party":"0x34"}"#;
        let err = LedgerConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, SplitPotError::Configuration(_)));
    }

    #[test]
    fn missing_file_is_configuration_error() {
        let err = LedgerConfig::from_json_file("/nonexistent/splitpot.json").unwrap_err();
        assert!(matches!(err, SplitPotError::Configuration(_)));
    }

    #[test]
    fn config_serde_roundtrip() {
        let cfg = LedgerConfig::new("shop", PartyId::derive("a"), PartyId::derive("b"))
            .with_purchase_modes(PurchaseModes::FreeFormOnly);
        let json = serde_json::to_string(&cfg).unwrap();
        let back = LedgerConfig::from_json_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}

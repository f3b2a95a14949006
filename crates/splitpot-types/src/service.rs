//! Catalog entry type.

use serde::{Deserialize, Serialize};

use crate::Amount;

/// A named, priced, toggleable catalog entry.
///
/// Services are never removed; disabling is the only way to retire one.
/// [`Service::default`] is what a read of a never-assigned identifier sees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    /// Minimum value a catalog purchase must submit.
    pub price: Amount,
    pub enabled: bool,
}

impl Service {
    /// A freshly listed service. New services start enabled.
    #[must_use]
    pub fn listed(name: impl Into<String>, price: Amount) -> Self {
        Self {
            name: name.into(),
            price,
            enabled: true,
        }
    }

    /// Whether `value` covers the price.
    #[must_use]
    pub fn is_covered_by(&self, value: Amount) -> bool {
        value >= self.price
    }
}

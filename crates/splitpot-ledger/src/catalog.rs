//! Service catalog.
//!
//! A flat table from [`ServiceId`] to [`Service`]. Identifiers are handed
//! out densely from zero and never reused; entries are overwritten in place
//! but never removed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use splitpot_types::{Amount, Result, Service, ServiceId, SplitPotError, constants};

/// Owns every service record and the next-identifier counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCatalog {
    services: BTreeMap<ServiceId, Service>,
    next_id: ServiceId,
}

impl ServiceCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            services: BTreeMap::new(),
            next_id: ServiceId(constants::FIRST_SERVICE_ID),
        }
    }

    /// List a new, enabled service and return its identifier.
    ///
    /// # Errors
    /// Returns `ArithmeticOverflow` if the identifier space is exhausted.
    pub fn add(&mut self, name: impl Into<String>, price: Amount) -> Result<ServiceId> {
        let id = self.next_id;
        let next = id
            .next()
            .ok_or(SplitPotError::overflow("service id counter"))?;

        self.services.insert(id, Service::listed(name, price));
        self.next_id = next;
        Ok(id)
    }

    /// Overwrite all mutable fields of an existing service.
    ///
    /// # Errors
    /// Returns `ServiceNotFound` if `id` was never assigned.
    pub fn update(
        &mut self,
        id: ServiceId,
        name: impl Into<String>,
        price: Amount,
        enabled: bool,
    ) -> Result<()> {
        let service = self
            .services
            .get_mut(&id)
            .ok_or(SplitPotError::ServiceNotFound(id))?;

        *service = Service {
            name: name.into(),
            price,
            enabled,
        };
        Ok(())
    }

    /// Look up a service that has been assigned.
    #[must_use]
    pub fn lookup(&self, id: ServiceId) -> Option<&Service> {
        self.services.get(&id)
    }

    /// Read a service, falling back to [`Service::default`] for identifiers
    /// that were never assigned.
    #[must_use]
    pub fn service(&self, id: ServiceId) -> Service {
        self.lookup(id).cloned().unwrap_or_default()
    }

    /// The identifier the next `add` will assign.
    #[must_use]
    pub fn next_id(&self) -> ServiceId {
        self.next_id
    }

    /// All services in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (ServiceId, &Service)> {
        self.services.iter().map(|(id, svc)| (*id, svc))
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::new()
    }
}

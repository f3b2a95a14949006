//! The ledger state machine.
//!
//! [`Ledger`] owns the whole state: beneficiary identities, catalog, purchase
//! history, and both pots. Every public mutating method is one atomic
//! transition:
//! 1. Authorization guard (where a role is required)
//! 2. Validate and compute every new value without touching state
//! 3. Commit
//!
//! A method that returns `Err` has left the ledger exactly as it found it.

use serde::Serialize;
use splitpot_types::{
    Amount, Beneficiary, LedgerConfig, PartyId, PotBalances, PurchaseMode, PurchaseModes, Result,
    Role, Service, ServiceId, SplitPotError, WithdrawalReceipt,
};

use crate::authorization::{self, Parties};
use crate::catalog::ServiceCatalog;
use crate::conservation::RevenueConservation;
use crate::purchase::{PurchaseBook, RevenueSplit};
use crate::settlement::{self, Payout};

/// A two-party revenue-sharing ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    name: String,
    parties: Parties,
    purchase_modes: PurchaseModes,
    catalog: ServiceCatalog,
    book: PurchaseBook,
    pots: PotBalances,
    conservation: RevenueConservation,
}

impl Ledger {
    /// Instantiate a ledger accepting both purchase modes, with empty pots
    /// and an empty catalog.
    #[must_use]
    pub fn new(name: impl Into<String>, first_party: PartyId, second_party: PartyId) -> Self {
        Self::from_config(LedgerConfig::new(name, first_party, second_party))
    }

    /// Instantiate a ledger from config.
    #[must_use]
    pub fn from_config(config: LedgerConfig) -> Self {
        tracing::info!(
            name = %config.name,
            first = %config.first_party,
            second = %config.second_party,
            modes = ?config.purchase_modes,
            "Ledger instantiated"
        );
        Self {
            name: config.name,
            parties: Parties::new(config.first_party, config.second_party),
            purchase_modes: config.purchase_modes,
            catalog: ServiceCatalog::new(),
            book: PurchaseBook::new(),
            pots: PotBalances::new(),
            conservation: RevenueConservation::new(),
        }
    }

    // =================================================================
    // Catalog
    // =================================================================

    /// List a new service. Requires either beneficiary.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is neither beneficiary
    /// - `ArithmeticOverflow` if the identifier space is exhausted
    pub fn add_service(
        &mut self,
        caller: PartyId,
        name: impl Into<String>,
        price: Amount,
    ) -> Result<ServiceId> {
        authorization::require(&self.parties, caller, Role::EitherParty)?;
        let name = name.into();
        let id = self.catalog.add(name.clone(), price)?;
        tracing::info!(service = %id, name = %name, price, by = %caller, "Service added");
        Ok(id)
    }

    /// Overwrite a service's name, price and enabled flag. Requires either
    /// beneficiary; either may edit any service.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is neither beneficiary
    /// - `ServiceNotFound` if `service_id >= next_service_id()`
    pub fn update_service(
        &mut self,
        caller: PartyId,
        service_id: ServiceId,
        name: impl Into<String>,
        price: Amount,
        enabled: bool,
    ) -> Result<()> {
        authorization::require(&self.parties, caller, Role::EitherParty)?;
        self.catalog.update(service_id, name, price, enabled)?;
        tracing::debug!(service = %service_id, price, enabled, by = %caller, "Service updated");
        Ok(())
    }

    // =================================================================
    // Delegation
    // =================================================================

    /// Hand a beneficiary role to `new_identity`. Only the current holder of
    /// that role may do so; the old identity loses the role immediately.
    ///
    /// # Errors
    /// Returns `Unauthorized` if `caller` does not currently hold the role.
    pub fn delegate(
        &mut self,
        caller: PartyId,
        beneficiary: Beneficiary,
        new_identity: PartyId,
    ) -> Result<()> {
        authorization::require(&self.parties, caller, beneficiary.into())?;
        self.parties.set(beneficiary, new_identity);
        tracing::info!(
            role = %beneficiary,
            from = %caller,
            to = %new_identity,
            "Beneficiary delegated"
        );
        Ok(())
    }

    /// Replace the First beneficiary. Requires the First role.
    pub fn update_first_party(&mut self, caller: PartyId, new_identity: PartyId) -> Result<()> {
        self.delegate(caller, Beneficiary::First, new_identity)
    }

    /// Replace the Second beneficiary. Requires the Second role.
    pub fn update_second_party(&mut self, caller: PartyId, new_identity: PartyId) -> Result<()> {
        self.delegate(caller, Beneficiary::Second, new_identity)
    }

    // =================================================================
    // Purchases
    // =================================================================

    /// Buy a catalog service. Open to any caller.
    ///
    /// The whole submitted `value` is split between the pots, including any
    /// amount above the price.
    ///
    /// # Errors
    /// - `PurchaseModeDisabled` if catalog purchases are not enabled
    /// - `ServiceNotFound` if the service was never listed
    /// - `ServiceDisabled` if the service is disabled
    /// - `InsufficientPayment` if `value` is below the price
    /// - `ArithmeticOverflow` if a pot would overflow
    pub fn purchase(
        &mut self,
        caller: PartyId,
        service_id: ServiceId,
        value: Amount,
    ) -> Result<RevenueSplit> {
        self.require_mode(PurchaseMode::Catalog)?;

        let service = self
            .catalog
            .lookup(service_id)
            .ok_or(SplitPotError::ServiceNotFound(service_id))?;
        if !service.enabled {
            return Err(SplitPotError::ServiceDisabled(service_id));
        }
        if !service.is_covered_by(value) {
            return Err(SplitPotError::InsufficientPayment {
                price: service.price,
                submitted: value,
            });
        }

        let split = self.credit(value)?;
        self.book.record_service(caller, service_id);

        tracing::debug!(
            buyer = %caller,
            service = %service_id,
            value,
            first = split.first,
            second = split.second,
            "Catalog purchase"
        );
        Ok(split)
    }

    /// Legacy free-form purchase: any non-zero value against an order id,
    /// with no catalog lookup. Open to any caller.
    ///
    /// # Errors
    /// - `PurchaseModeDisabled` if free-form purchases are not enabled
    /// - `ZeroPayment` if `value` is zero
    /// - `ArithmeticOverflow` if a pot would overflow
    pub fn purchase_order(
        &mut self,
        caller: PartyId,
        order_id: &str,
        value: Amount,
    ) -> Result<RevenueSplit> {
        self.require_mode(PurchaseMode::FreeForm)?;
        if value == 0 {
            return Err(SplitPotError::ZeroPayment);
        }

        let split = self.credit(value)?;
        self.book.record_order(caller, order_id);

        tracing::debug!(
            buyer = %caller,
            order = order_id,
            value,
            first = split.first,
            second = split.second,
            "Free-form purchase"
        );
        Ok(split)
    }

    fn require_mode(&self, mode: PurchaseMode) -> Result<()> {
        if self.purchase_modes.allows(mode) {
            Ok(())
        } else {
            Err(SplitPotError::PurchaseModeDisabled(mode))
        }
    }

    /// Split `value` into the pots. The pot credit is the only check and
    /// happens before anything changes.
    fn credit(&mut self, value: Amount) -> Result<RevenueSplit> {
        let split = RevenueSplit::of(value);
        self.pots = split.credited_to(&self.pots)?;
        self.conservation = self.conservation.with_receipt(split);
        Ok(split)
    }

    // =================================================================
    // Settlement
    // =================================================================

    /// Pay one beneficiary's whole pot out through `payout`. Requires that
    /// beneficiary's role; the value goes to the caller, who is the current
    /// holder of the role.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` does not hold the role
    /// - `EmptyPot` if the pot is zero
    /// - `PayoutFailed` if the rail rejects the transfer (pot unchanged)
    pub fn withdraw<P: Payout + ?Sized>(
        &mut self,
        caller: PartyId,
        beneficiary: Beneficiary,
        payout: &mut P,
    ) -> Result<WithdrawalReceipt> {
        authorization::require(&self.parties, caller, beneficiary.into())?;

        let balance = self.pots.get(beneficiary);
        if balance == 0 {
            return Err(SplitPotError::EmptyPot(beneficiary));
        }
        let conservation = self.conservation.with_withdrawal(beneficiary, balance)?;

        let recipient = self.parties.get(beneficiary);
        let paid = settlement::settle_pot(&mut self.pots, beneficiary, recipient, payout)?;
        self.conservation = conservation;

        tracing::info!(
            beneficiary = %beneficiary,
            recipient = %recipient,
            amount = paid,
            "Pot withdrawn"
        );
        Ok(WithdrawalReceipt::issue(beneficiary, recipient, paid))
    }

    /// Withdraw the First pot. Requires the First role.
    pub fn withdraw_first<P: Payout + ?Sized>(
        &mut self,
        caller: PartyId,
        payout: &mut P,
    ) -> Result<WithdrawalReceipt> {
        self.withdraw(caller, Beneficiary::First, payout)
    }

    /// Withdraw the Second pot. Requires the Second role.
    pub fn withdraw_second<P: Payout + ?Sized>(
        &mut self,
        caller: PartyId,
        payout: &mut P,
    ) -> Result<WithdrawalReceipt> {
        self.withdraw(caller, Beneficiary::Second, payout)
    }

    // =================================================================
    // Read accessors
    // =================================================================

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn first_party(&self) -> PartyId {
        self.parties.first
    }

    #[must_use]
    pub fn second_party(&self) -> PartyId {
        self.parties.second
    }

    #[must_use]
    pub fn purchase_modes(&self) -> PurchaseModes {
        self.purchase_modes
    }

    #[must_use]
    pub fn next_service_id(&self) -> ServiceId {
        self.catalog.next_id()
    }

    /// A service record; [`Service::default`] for unassigned identifiers.
    #[must_use]
    pub fn service(&self, id: ServiceId) -> Service {
        self.catalog.service(id)
    }

    #[must_use]
    pub fn service_name(&self, id: ServiceId) -> String {
        self.catalog.lookup(id).map(|s| s.name.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn service_cost(&self, id: ServiceId) -> Amount {
        self.catalog.lookup(id).map_or(0, |s| s.price)
    }

    #[must_use]
    pub fn service_enabled(&self, id: ServiceId) -> bool {
        self.catalog.lookup(id).is_some_and(|s| s.enabled)
    }

    /// Services bought by `buyer`, oldest first.
    #[must_use]
    pub fn purchases(&self, buyer: PartyId) -> &[ServiceId] {
        self.book.purchases(buyer)
    }

    /// Order note of `buyer`.
    #[must_use]
    pub fn orders(&self, buyer: PartyId) -> &str {
        self.book.orders(buyer)
    }

    #[must_use]
    pub fn first_party_pot(&self) -> Amount {
        self.pots.first
    }

    #[must_use]
    pub fn second_party_pot(&self) -> Amount {
        self.pots.second
    }

    #[must_use]
    pub fn pots(&self) -> PotBalances {
        self.pots
    }

    /// Lifetime purchase value received.
    #[must_use]
    pub fn total_received(&self) -> Amount {
        self.conservation.total_received()
    }

    /// Lifetime value paid out.
    #[must_use]
    pub fn total_withdrawn(&self) -> Amount {
        self.conservation.total_withdrawn()
    }

    /// Check that the pots hold exactly the unwithdrawn revenue.
    pub fn verify_conservation(&self) -> Result<()> {
        self.conservation.verify(&self.pots)
    }

    /// Serializable view of the ledger for hosts and tooling.
    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            name: self.name.clone(),
            first_party: self.parties.first,
            second_party: self.parties.second,
            purchase_modes: self.purchase_modes,
            next_service_id: self.catalog.next_id(),
            services: self
                .catalog
                .iter()
                .map(|(id, svc)| (id, svc.clone()))
                .collect(),
            pots: self.pots,
            total_received: self.conservation.total_received(),
            total_withdrawn: self.conservation.total_withdrawn(),
        }
    }
}

/// Point-in-time view of a [`Ledger`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerSnapshot {
    pub name: String,
    pub first_party: PartyId,
    pub second_party: PartyId,
    pub purchase_modes: PurchaseModes,
    pub next_service_id: ServiceId,
    pub services: Vec<(ServiceId, Service)>,
    pub pots: PotBalances,
    pub total_received: Amount,
    pub total_withdrawn: Amount,
}

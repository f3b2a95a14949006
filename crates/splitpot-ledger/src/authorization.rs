//! Authorization guard.
//!
//! Every mutating operation except purchasing names the [`Role`] it needs.
//! The guard compares the caller against the beneficiary identities as they
//! stand at the moment of the call, so a delegation takes effect for the very
//! next operation.

use serde::{Deserialize, Serialize};
use splitpot_types::{Beneficiary, PartyId, Result, Role, SplitPotError};

/// The two current beneficiary identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parties {
    pub first: PartyId,
    pub second: PartyId,
}

impl Parties {
    #[must_use]
    pub fn new(first: PartyId, second: PartyId) -> Self {
        Self { first, second }
    }

    /// Current identity of one beneficiary.
    #[must_use]
    pub fn get(&self, beneficiary: Beneficiary) -> PartyId {
        match beneficiary {
            Beneficiary::First => self.first,
            Beneficiary::Second => self.second,
        }
    }

    /// Replace one beneficiary's identity. No checks: the caller has already
    /// been authorized and degenerate identities are a host policy matter.
    pub fn set(&mut self, beneficiary: Beneficiary, identity: PartyId) {
        match beneficiary {
            Beneficiary::First => self.first = identity,
            Beneficiary::Second => self.second = identity,
        }
    }
}

/// Whether `caller` holds `role` under the given identities.
#[must_use]
pub fn is_authorized(parties: &Parties, caller: PartyId, role: Role) -> bool {
    match role {
        Role::First => caller == parties.first,
        Role::Second => caller == parties.second,
        Role::EitherParty => caller == parties.first || caller == parties.second,
    }
}

/// Guard an operation. Returns [`SplitPotError::Unauthorized`] if `caller`
/// lacks `role`.
pub fn require(parties: &Parties, caller: PartyId, role: Role) -> Result<()> {
    if is_authorized(parties, caller, role) {
        Ok(())
    } else {
        tracing::warn!(caller = %caller, required = %role, "Unauthorized call rejected");
        Err(SplitPotError::Unauthorized {
            caller,
            required: role,
        })
    }
}

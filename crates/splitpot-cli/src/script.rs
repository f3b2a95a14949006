//! Operation scripts and their replay.
//!
//! A script is a JSON list of ledger operations, each naming the caller
//! identity the host would have supplied:
//!
//! ```json
//! {"operations": [
//!     {"add_service": {"caller": "@first", "name": "unit", "price": 1}},
//!     {"purchase": {"caller": "@buyer", "service_id": 0, "value": 1}}
//! ]}
//! ```
//!
//! Identities are `0x` hex, or `@label` for [`PartyId::derive`].

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use splitpot_ledger::{InMemoryRail, Ledger, LedgerSnapshot, RevenueSplit};
use splitpot_types::{Amount, PartyId, Result, ServiceId, WithdrawalReceipt};

fn party<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<PartyId, D::Error> {
    let raw = String::deserialize(deserializer)?;
    match raw.strip_prefix('@') {
        Some(label) => Ok(PartyId::derive(label)),
        None => raw.parse().map_err(serde::de::Error::custom),
    }
}

/// One scripted ledger call.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    AddService {
        #[serde(deserialize_with = "party")]
        caller: PartyId,
        name: String,
        price: Amount,
    },
    UpdateService {
        #[serde(deserialize_with = "party")]
        caller: PartyId,
        service_id: ServiceId,
        name: String,
        price: Amount,
        enabled: bool,
    },
    UpdateFirstParty {
        #[serde(deserialize_with = "party")]
        caller: PartyId,
        #[serde(deserialize_with = "party")]
        new_identity: PartyId,
    },
    UpdateSecondParty {
        #[serde(deserialize_with = "party")]
        caller: PartyId,
        #[serde(deserialize_with = "party")]
        new_identity: PartyId,
    },
    Purchase {
        #[serde(deserialize_with = "party")]
        caller: PartyId,
        service_id: ServiceId,
        value: Amount,
    },
    PurchaseOrder {
        #[serde(deserialize_with = "party")]
        caller: PartyId,
        order_id: String,
        value: Amount,
    },
    WithdrawFirst {
        #[serde(deserialize_with = "party")]
        caller: PartyId,
    },
    WithdrawSecond {
        #[serde(deserialize_with = "party")]
        caller: PartyId,
    },
}

/// What a committed operation returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpResult {
    ServiceId(ServiceId),
    Split(RevenueSplit),
    Receipt(WithdrawalReceipt),
    Done,
}

impl Operation {
    /// Apply this operation to `ledger`, paying withdrawals into `rail`.
    pub fn apply(&self, ledger: &mut Ledger, rail: &mut InMemoryRail) -> Result<OpResult> {
        let result = match self {
            Self::AddService {
                caller,
                name,
                price,
            } => OpResult::ServiceId(ledger.add_service(*caller, name.clone(), *price)?),
            Self::UpdateService {
                caller,
                service_id,
                name,
                price,
                enabled,
            } => {
                ledger.update_service(*caller, *service_id, name.clone(), *price, *enabled)?;
                OpResult::Done
            }
            Self::UpdateFirstParty {
                caller,
                new_identity,
            } => {
                ledger.update_first_party(*caller, *new_identity)?;
                OpResult::Done
            }
            Self::UpdateSecondParty {
                caller,
                new_identity,
            } => {
                ledger.update_second_party(*caller, *new_identity)?;
                OpResult::Done
            }
            Self::Purchase {
                caller,
                service_id,
                value,
            } => OpResult::Split(ledger.purchase(*caller, *service_id, *value)?),
            Self::PurchaseOrder {
                caller,
                order_id,
                value,
            } => OpResult::Split(ledger.purchase_order(*caller, order_id, *value)?),
            Self::WithdrawFirst { caller } => {
                OpResult::Receipt(ledger.withdraw_first(*caller, rail)?)
            }
            Self::WithdrawSecond { caller } => {
                OpResult::Receipt(ledger.withdraw_second(*caller, rail)?)
            }
        };
        Ok(result)
    }
}

/// A parsed operation script.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    pub operations: Vec<Operation>,
}

impl Script {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// Result of one replayed operation.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub index: usize,
    pub operation: Operation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<OpResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Everything a replay produced.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub outcomes: Vec<Outcome>,
    pub ledger: LedgerSnapshot,
    pub payouts: Vec<(PartyId, Amount)>,
}

/// Replay `script` against `ledger`, paying withdrawals into an in-memory
/// rail.
///
/// Rejected operations are recorded and skipped; with `fail_fast` the first
/// rejection is returned instead.
pub fn replay(ledger: &mut Ledger, script: &Script, fail_fast: bool) -> Result<ReplayReport> {
    let mut rail = InMemoryRail::new();
    let mut outcomes = Vec::with_capacity(script.operations.len());

    for (index, operation) in script.operations.iter().enumerate() {
        let outcome = match operation.apply(ledger, &mut rail) {
            Ok(result) => Outcome {
                index,
                operation: operation.clone(),
                result: Some(result),
                error: None,
            },
            Err(err) if fail_fast => return Err(err),
            Err(err) => {
                tracing::warn!(index, error = %err, "Operation rejected");
                Outcome {
                    index,
                    operation: operation.clone(),
                    result: None,
                    error: Some(err.to_string()),
                }
            }
        };
        outcomes.push(outcome);
    }

    ledger.verify_conservation()?;
    Ok(ReplayReport {
        outcomes,
        ledger: ledger.snapshot(),
        payouts: rail.transfers().to_vec(),
    })
}

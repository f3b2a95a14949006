//! Error types for the SplitPot ledger.
//!
//! All errors use the `SP_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Authorization / identity errors
//! - 2xx: Catalog errors
//! - 3xx: Purchase errors
//! - 4xx: Settlement errors
//! - 5xx: Arithmetic / invariant errors
//! - 9xx: General / internal errors
//!
//! Every error is a rejected transition: the ledger state is left exactly as
//! it was before the failing call.

use thiserror::Error;

use crate::{Amount, Beneficiary, PartyId, PurchaseMode, Role, ServiceId};

/// Central error enum for all SplitPot operations.
#[derive(Debug, Error)]
pub enum SplitPotError {
    // =================================================================
    // Authorization Errors (1xx)
    // =================================================================
    /// The caller does not hold the role the operation requires.
    #[error("SP_ERR_100: Unauthorized: {caller} does not hold role {required}")]
    Unauthorized { caller: PartyId, required: Role },

    /// A party identity could not be parsed.
    #[error("SP_ERR_101: Invalid party id: {reason}")]
    InvalidPartyId { reason: String },

    // =================================================================
    // Catalog Errors (2xx)
    // =================================================================
    /// The identifier has never been assigned by the catalog.
    #[error("SP_ERR_200: Service not found: {0}")]
    ServiceNotFound(ServiceId),

    /// The service exists but is disabled and cannot be purchased.
    #[error("SP_ERR_201: Service disabled: {0}")]
    ServiceDisabled(ServiceId),

    // =================================================================
    // Purchase Errors (3xx)
    // =================================================================
    /// The submitted value is below the catalog price.
    #[error("SP_ERR_300: Insufficient payment: price {price}, submitted {submitted}")]
    InsufficientPayment { price: Amount, submitted: Amount },

    /// A free-form purchase was submitted with no value.
    #[error("SP_ERR_301: Zero-value purchase rejected")]
    ZeroPayment,

    /// The ledger is not configured to accept this purchase mode.
    #[error("SP_ERR_302: Purchase mode {0} is disabled on this ledger")]
    PurchaseModeDisabled(PurchaseMode),

    // =================================================================
    // Settlement Errors (4xx)
    // =================================================================
    /// Withdrawal attempted on a zero balance.
    #[error("SP_ERR_400: Empty pot for {0} beneficiary")]
    EmptyPot(Beneficiary),

    /// The external payout rail rejected the transfer; the pot is unchanged.
    #[error("SP_ERR_401: Payout of {amount} to {recipient} failed: {reason}")]
    PayoutFailed {
        recipient: PartyId,
        amount: Amount,
        reason: String,
    },

    // =================================================================
    // Arithmetic / Invariant Errors (5xx)
    // =================================================================
    /// An addition or subtraction would leave the numeric domain.
    #[error("SP_ERR_500: Arithmetic overflow in {operation}")]
    ArithmeticOverflow { operation: &'static str },

    /// Pots no longer account for exactly the unwithdrawn revenue.
    #[error("SP_ERR_501: Conservation invariant violation: {reason}")]
    ConservationViolation { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("SP_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("SP_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, missing fields, etc.).
    #[error("SP_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// I/O error (disk).
    #[error("SP_ERR_903: I/O error: {0}")]
    Io(String),
}

impl SplitPotError {
    /// Shorthand for an overflow in the named operation.
    #[must_use]
    pub fn overflow(operation: &'static str) -> Self {
        Self::ArithmeticOverflow { operation }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, SplitPotError>;

impl From<std::io::Error> for SplitPotError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SplitPotError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

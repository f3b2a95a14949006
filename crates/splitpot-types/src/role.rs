//! Roles checked by the authorization guard.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two beneficiaries. Each owns exactly one pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Beneficiary {
    First,
    Second,
}

impl fmt::Display for Beneficiary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "FIRST"),
            Self::Second => write!(f, "SECOND"),
        }
    }
}

/// The role an operation requires of its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Only the current First beneficiary.
    First,
    /// Only the current Second beneficiary.
    Second,
    /// Either beneficiary.
    EitherParty,
}

impl From<Beneficiary> for Role {
    fn from(b: Beneficiary) -> Self {
        match b {
            Beneficiary::First => Self::First,
            Beneficiary::Second => Self::Second,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "FIRST"),
            Self::Second => write!(f, "SECOND"),
            Self::EitherParty => write!(f, "EITHER_PARTY"),
        }
    }
}

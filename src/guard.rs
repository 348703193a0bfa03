//! Price validation guards.
//!
//! Two circuit breakers sit between a broker-supplied execution price and the
//! ledger: a per-asset reference-oracle deviation bound for `strict` assets,
//! and global NAV-per-share emergency bounds that halt settlement at an
//! implausible pool valuation (a misbehaving feed or an in-progress exploit).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A reference price handed over by the external oracle service: a value plus
/// the oracle's own staleness/validity verdict. The guard consumes nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencePrice {
    pub value: Decimal,
    pub is_valid: bool,
}

impl ReferencePrice {
    pub fn valid(value: Decimal) -> Self {
        Self {
            value,
            is_valid: true,
        }
    }

    pub fn stale(value: Decimal) -> Self {
        Self {
            value,
            is_valid: false,
        }
    }
}

/// Validate a proposed execution price. Non-strict assets only require a
/// positive price; strict assets additionally require a fresh reference and
/// `|proposed - reference| / reference <= max_deviation`.
pub fn check_price(
    strict: bool,
    max_deviation: Decimal,
    proposed: Decimal,
    reference: ReferencePrice,
) -> Result<(), GuardError> {
    if proposed <= Decimal::ZERO {
        return Err(GuardError::InvalidPrice(proposed));
    }
    if !strict {
        return Ok(());
    }
    if !reference.is_valid || reference.value <= Decimal::ZERO {
        return Err(GuardError::StaleReferencePrice);
    }

    let deviation = ((proposed - reference.value) / reference.value).abs();
    if deviation > max_deviation {
        return Err(GuardError::ReferenceOracleDeviation {
            deviation,
            threshold: max_deviation,
        });
    }
    Ok(())
}

/// Halt settlement when NAV-per-share falls outside `[min, max]`.
pub fn check_emergency_bounds(
    nav_per_share: Decimal,
    min: Decimal,
    max: Decimal,
) -> Result<(), GuardError> {
    if nav_per_share < min || nav_per_share > max {
        return Err(GuardError::EmergencyHalt {
            nav_per_share,
            min,
            max,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuardError {
    #[error("invalid price {0}")]
    InvalidPrice(Decimal),

    #[error("reference price is stale or unusable")]
    StaleReferencePrice,

    #[error("price deviates {deviation} from reference, threshold {threshold}")]
    ReferenceOracleDeviation {
        deviation: Decimal,
        threshold: Decimal,
    },

    #[error("NAV per share {nav_per_share} outside emergency bounds [{min}, {max}]")]
    EmergencyHalt {
        nav_per_share: Decimal,
        min: Decimal,
        max: Decimal,
    },
}

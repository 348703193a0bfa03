// 2.0: funding accrual. borrowers pay a utilization-sensitive carrying cost,
// tracked as a cumulative index that only ever moves forward.
// 2.0 has the params/state structs. 2.1 has the accrual logic.
//
// there is no background job: accrue() runs lazily on-path before any
// borrow/repay/fill that depends on up-to-date funding, and is a no-op when
// no time has passed.

use crate::ledger::LedgerEntry;
use crate::types::{round_down, Timestamp};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Per-asset funding configuration. Both rates are per funding interval
/// (the interval itself is a pool-level scalar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingParams {
    pub base_rate: Decimal,
    /// Scaled by utilization before being added to the base rate.
    pub dynamic_rate: Decimal,
}

impl Default for FundingParams {
    fn default() -> Self {
        Self {
            base_rate: dec!(0.0001),
            dynamic_rate: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingState {
    /// Monotonically non-decreasing cumulative funding index.
    pub cumulative_index: Decimal,
    pub last_update: Timestamp,
}

impl FundingState {
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            cumulative_index: Decimal::ZERO,
            last_update: timestamp,
        }
    }
}

// 2.1: utilization = credit / (spot + credit). zero for an empty pool. floored.
pub fn utilization(ledger: &LedgerEntry) -> Decimal {
    let total = ledger.spot_liquidity + ledger.credit;
    if total.is_zero() {
        return Decimal::ZERO;
    }
    round_down(ledger.credit / total)
}

/// Advance the cumulative index by `(elapsed / interval) * (base + dynamic * utilization)`.
/// Returns the accrued delta, or `None` when no time has passed (idempotent at a
/// fixed timestamp). Read-only with respect to the ledger entry.
pub fn accrue(
    state: &mut FundingState,
    params: &FundingParams,
    ledger: &LedgerEntry,
    now: Timestamp,
    interval_ms: i64,
) -> Option<Decimal> {
    let elapsed = now.elapsed_ms(state.last_update);
    if elapsed <= 0 {
        return None;
    }

    let fraction = Decimal::from(elapsed) / Decimal::from(interval_ms);
    let rate = params.base_rate + params.dynamic_rate * utilization(ledger);
    let delta = round_down(fraction * rate);

    state.cumulative_index += delta;
    state.last_update = now;
    Some(delta)
}

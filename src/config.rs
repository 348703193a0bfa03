//! Pool configuration. Global scalars only; per-asset configuration lives in
//! the asset module.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Global pool settings.
///
/// The lock period forces a delay between order placement and fill eligibility
/// (mitigating stale-price exploitation); the timeout bounds how long a broker
/// can hold an order pending. Emergency NAV bounds halt settlement at an
/// implausible pool valuation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Minimum order age before a broker may fill it.
    pub lock_period_ms: i64,
    /// Order age past which fills are rejected and anyone may cancel.
    pub order_timeout_ms: i64,
    /// Funding interval the per-asset rates are quoted against.
    pub funding_interval_ms: i64,
    /// Emergency bounds on NAV per share, inclusive.
    pub emergency_nav_min: Decimal,
    pub emergency_nav_max: Decimal,
    /// Flat fee rate charged on liquidity adds and removals.
    pub liquidity_fee_rate: Decimal,
    /// Maximum number of events to retain in memory.
    pub max_events: usize,
    /// Print events as they are emitted.
    pub verbose: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            lock_period_ms: 5 * 60 * 1000,
            order_timeout_ms: 24 * 3600 * 1000,
            funding_interval_ms: 8 * 3600 * 1000,
            emergency_nav_min: dec!(1),
            emergency_nav_max: dec!(2000),
            liquidity_fee_rate: dec!(0.0001),
            max_events: 100_000,
            verbose: false,
        }
    }
}

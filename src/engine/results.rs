// 8.0.2: result types and errors for pool operations.

use crate::asset::RegistryError;
use crate::guard::GuardError;
use crate::ledger::LedgerError;
use crate::order::{OrderDirection, OrderError};
use crate::tokens::TransferError;
use crate::types::{AccountId, AssetId, OrderId};
use rust_decimal::Decimal;

/// Outcome of a successful liquidity-order fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillResult {
    pub order_id: OrderId,
    pub account: AccountId,
    pub asset_id: AssetId,
    pub direction: OrderDirection,
    pub amount: Decimal,
    pub fee: Decimal,
    /// Shares minted on `Add`, shares burned on `Remove`.
    pub shares_delta: Decimal,
    /// Tokens paid out to the account on `Remove`; zero on `Add`.
    pub payout: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("caller {0:?} is not authorized")]
    Unauthorized(AccountId),

    #[error("asset {0:?} is not enabled for trading")]
    AssetNotTradable(AssetId),

    #[error("asset {0:?} is not openable for borrowing")]
    AssetNotOpenable(AssetId),

    #[error("invalid amount {0}")]
    InvalidAmount(Decimal),

    #[error("lock period not elapsed: order age {age_ms}ms, lock period {lock_ms}ms")]
    LockPeriodNotElapsed { age_ms: i64, lock_ms: i64 },

    #[error("order expired: age {age_ms}ms exceeds timeout {timeout_ms}ms")]
    OrderExpired { age_ms: i64, timeout_ms: i64 },

    #[error("only the order owner may cancel before the timeout (age {age_ms}ms, timeout {timeout_ms}ms)")]
    CancelTooEarly { age_ms: i64, timeout_ms: i64 },

    #[error("minimum output not met: produced {produced}, required {min_out}")]
    MinOutputNotMet { produced: Decimal, min_out: Decimal },

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Guard(#[from] GuardError),

    #[error(transparent)]
    Transfer(#[from] TransferError),
}

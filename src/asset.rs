//! Asset registration and configuration.
//!
//! Each pool asset carries immutable identity (`AssetMeta`), governance-mutable
//! flags and risk/fee parameters, and the mutable financial state bundled into
//! `AssetState`. The id → asset mapping on the pool is append-only.

use crate::funding::{FundingParams, FundingState};
use crate::ledger::LedgerEntry;
use crate::types::{AssetId, Symbol, Timestamp, TokenId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Platform maximum for token decimal precision.
pub const MAX_ASSET_DECIMALS: u32 = 18;

/// Immutable asset identity, fixed at registration. Decimals and the stable
/// classification never change once the asset exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMeta {
    pub id: AssetId,
    pub symbol: Symbol,
    pub decimals: u32,
    pub is_stable: bool,
    /// Underlying token held by the pool.
    pub token: TokenId,
    /// Paired synthetic debt-tracking token.
    pub paired_token: TokenId,
}

/// Per-asset booleans, read on every ledger and settlement operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetFlags {
    pub tradable: bool,
    /// Positions may be opened / principal may be borrowed.
    pub openable: bool,
    pub shortable: bool,
    pub use_stable_collateral: bool,
    /// Master switch. Nothing touches a disabled asset.
    pub enabled: bool,
    /// Requires reference-oracle corroboration of every execution price.
    pub strict: bool,
    pub liquidatable: bool,
}

/// Per-asset risk and fee configuration. All rates are fractions (0.01 = 1%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetParams {
    pub initial_margin_rate: Decimal,
    pub maintenance_margin_rate: Decimal,
    pub position_fee_rate: Decimal,
    pub liquidation_fee_rate: Decimal,
    pub min_profit_rate: Decimal,
    pub min_profit_window_ms: i64,
    pub max_long_notional: Decimal,
    pub max_short_notional: Decimal,
    /// Weight of this asset in pool NAV computation.
    pub spot_weight: Decimal,
    /// Execution price skew applied by the external pricing module.
    pub half_spread: Decimal,
    /// Max tolerated |proposed − reference| / reference for strict assets.
    pub reference_deviation: Decimal,
}

impl Default for AssetParams {
    fn default() -> Self {
        Self {
            initial_margin_rate: dec!(0.1),
            maintenance_margin_rate: dec!(0.05),
            position_fee_rate: dec!(0.001),
            liquidation_fee_rate: dec!(0.002),
            min_profit_rate: dec!(0.01),
            min_profit_window_ms: 10_000,
            max_long_notional: dec!(10_000_000),
            max_short_notional: dec!(10_000_000),
            spot_weight: Decimal::ONE,
            half_spread: Decimal::ZERO,
            reference_deviation: dec!(0.01),
        }
    }
}

impl AssetParams {
    /// Rates must be non-negative and mmr may not exceed imr.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let rates = [
            self.initial_margin_rate,
            self.maintenance_margin_rate,
            self.position_fee_rate,
            self.liquidation_fee_rate,
            self.min_profit_rate,
            self.spot_weight,
            self.half_spread,
            self.reference_deviation,
        ];
        if rates.iter().any(|r| r.is_sign_negative()) {
            return Err(RegistryError::InvalidParams("negative rate"));
        }
        if self.maintenance_margin_rate > self.initial_margin_rate {
            return Err(RegistryError::InvalidParams("mmr exceeds imr"));
        }
        Ok(())
    }
}

/// The complete persisted per-asset record: `{meta, flags, params, funding, ledger}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetState {
    pub meta: AssetMeta,
    pub flags: AssetFlags,
    pub params: AssetParams,
    pub funding_params: FundingParams,
    pub funding: FundingState,
    pub ledger: LedgerEntry,
}

impl AssetState {
    pub fn new(meta: AssetMeta, timestamp: Timestamp) -> Self {
        Self {
            meta,
            flags: AssetFlags::default(),
            params: AssetParams::default(),
            funding_params: FundingParams::default(),
            funding: FundingState::new(timestamp),
            ledger: LedgerEntry::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("asset {0:?} is already registered")]
    DuplicateAsset(AssetId),

    #[error("asset {0:?} is not registered")]
    UnknownAsset(AssetId),

    #[error("decimals {decimals} exceed platform maximum {max}")]
    InvalidDecimals { decimals: u32, max: u32 },

    #[error("invalid symbol {0:?}")]
    InvalidSymbol(String),

    #[error("invalid asset params: {0}")]
    InvalidParams(&'static str),
}

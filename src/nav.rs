//! Pool NAV derivation and proportional share math.
//!
//! NAV sums each asset's weighted net holdings (spot + credit, minus the fee
//! earmark) at its spot price. Share minting and burning is proportional:
//! `shares = value / nav_per_share`, with a 1:1 seeding rule for the first
//! deposit into an empty pool.

use crate::asset::AssetState;
use crate::types::{round_down, AssetId};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Value contributed by one asset: `spot_weight * (spot + credit - collected_fee) * price`.
pub fn asset_value(state: &AssetState, price: Decimal) -> Decimal {
    let net_holdings =
        state.ledger.spot_liquidity + state.ledger.credit - state.ledger.collected_fee;
    state.params.spot_weight * net_holdings * price
}

/// Aggregate NAV over all assets with a known price. Assets missing from the
/// price map contribute nothing; the caller decides whether that is acceptable.
pub fn pool_nav<'a>(
    assets: impl Iterator<Item = &'a AssetState>,
    prices: &HashMap<AssetId, Decimal>,
) -> Decimal {
    assets
        .filter_map(|state| prices.get(&state.meta.id).map(|p| asset_value(state, *p)))
        .sum()
}

/// Shares minted for `value` of deposited liquidity. Truncates in the pool's
/// favor. An empty pool seeds 1:1 regardless of the quoted share price.
pub fn shares_for_value(value: Decimal, share_price: Decimal, total_supply: Decimal) -> Decimal {
    if total_supply.is_zero() {
        return value;
    }
    round_down(value / share_price)
}

/// Gross token amount redeemed by burning `shares`, before fees.
pub fn amount_for_shares(shares: Decimal, share_price: Decimal, asset_price: Decimal) -> Decimal {
    round_down(shares * share_price / asset_price)
}

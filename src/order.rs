// 5.0: the pending-order store. liquidity orders wait here between placement
// and broker settlement. ids are allocated strictly increasing and never
// reused; removal is the only mutation after creation, which is what enforces
// at-most-once settlement.

use crate::types::{AccountId, AssetId, OrderId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderDirection {
    /// Deposit the asset, receive pool shares.
    Add,
    /// Redeem pool shares, receive the asset.
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityOrder {
    pub id: OrderId,
    pub account: AccountId,
    pub asset_id: AssetId,
    /// Token amount for `Add`, share amount for `Remove`.
    pub amount: Decimal,
    pub direction: OrderDirection,
    pub placed_at: Timestamp,
    /// Account-chosen minimum acceptable output: shares for `Add`,
    /// token amount for `Remove`.
    pub min_out: Decimal,
}

impl LiquidityOrder {
    pub fn age_ms(&self, now: Timestamp) -> i64 {
        now.elapsed_ms(self.placed_at)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderQueue {
    orders: HashMap<OrderId, LiquidityOrder>,
    next_order_id: u64,
}

impl OrderQueue {
    pub fn new() -> Self {
        Self {
            orders: HashMap::new(),
            next_order_id: 1,
        }
    }

    pub fn place(
        &mut self,
        account: AccountId,
        asset_id: AssetId,
        amount: Decimal,
        direction: OrderDirection,
        min_out: Decimal,
        now: Timestamp,
    ) -> OrderId {
        let id = OrderId(self.next_order_id);
        self.next_order_id += 1;

        self.orders.insert(
            id,
            LiquidityOrder {
                id,
                account,
                asset_id,
                amount,
                direction,
                placed_at: now,
                min_out,
            },
        );
        id
    }

    pub fn peek(&self, id: OrderId) -> Option<&LiquidityOrder> {
        self.orders.get(&id)
    }

    /// O(1) removal. Fails when the order was already settled or cancelled.
    pub fn remove(&mut self, id: OrderId) -> Result<LiquidityOrder, OrderError> {
        self.orders.remove(&id).ok_or(OrderError::OrderNotFound(id))
    }

    /// Enumeration surface for the off-pool broker/keeper.
    pub fn iter_pending(&self) -> impl Iterator<Item = &LiquidityOrder> {
        self.orders.values()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("order {0:?} not found")]
    OrderNotFound(OrderId),
}

// 9.0: every state change produces an event. used for audit trails, state
// reconstruction, and notifying external systems (the reporting facade and the
// broker/keeper both consume this stream). the EventPayload enum lists all
// event types.

use crate::order::OrderDirection;
use crate::types::{AccountId, AssetId, OrderId, Symbol, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub timestamp: Timestamp,
    pub payload: EventPayload,
}

impl Event {
    pub fn new(id: EventId, timestamp: Timestamp, payload: EventPayload) -> Self {
        Self {
            id,
            timestamp,
            payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventPayload {
    // Governance events
    AssetAdded(AssetAddedEvent),
    AssetParamsUpdated(AssetConfigEvent),
    AssetFlagsUpdated(AssetConfigEvent),
    FundingParamsUpdated(AssetConfigEvent),
    BrokerAdded(BrokerEvent),
    BrokerRemoved(BrokerEvent),

    // Order pipeline events
    OrderPlaced(OrderPlacedEvent),
    OrderFilled(OrderFilledEvent),
    OrderCancelled(OrderCancelledEvent),

    // Ledger events
    AssetBorrowed(BorrowEvent),
    AssetRepaid(RepayEvent),
    FundingAccrued(FundingAccruedEvent),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetAddedEvent {
    pub asset_id: AssetId,
    pub symbol: Symbol,
    pub decimals: u32,
    pub is_stable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetConfigEvent {
    pub asset_id: AssetId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerEvent {
    pub account: AccountId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPlacedEvent {
    pub order_id: OrderId,
    pub account: AccountId,
    pub asset_id: AssetId,
    pub direction: OrderDirection,
    pub amount: Decimal,
    pub min_out: Decimal,
}

/// Emitted on successful settlement. External systems recover the resulting
/// share amount (or payout) from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFilledEvent {
    pub order_id: OrderId,
    pub account: AccountId,
    pub asset_id: AssetId,
    pub direction: OrderDirection,
    pub amount: Decimal,
    pub fee: Decimal,
    pub asset_price: Decimal,
    pub share_price: Decimal,
    /// Shares minted on `Add`, shares burned on `Remove`.
    pub shares_delta: Decimal,
    /// Tokens sent to the account on `Remove`; zero on `Add`.
    pub payout: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancelledEvent {
    pub order_id: OrderId,
    pub account: AccountId,
    pub reason: CancelReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CancelReason {
    UserRequested,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowEvent {
    pub asset_id: AssetId,
    pub receiver: AccountId,
    pub principal: Decimal,
    pub fee: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepayEvent {
    pub asset_id: AssetId,
    pub payer: AccountId,
    pub principal: Decimal,
    pub fee: Decimal,
    pub bad_debt: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingAccruedEvent {
    pub asset_id: AssetId,
    pub delta: Decimal,
    pub cumulative_index: Decimal,
    pub utilization: Decimal,
}

// 8.1 engine/core.rs: main pool struct. all state lives here.
//
// every public mutation takes &mut self and runs to completion; the embedding
// environment provides the per-pool critical section (a mutex around the Pool
// is enough). effects are computed and validated on copies before anything is
// committed, so a failing operation leaves state untouched.

use super::results::PoolError;
use crate::asset::{AssetState, RegistryError};
use crate::broker::BrokerRegistry;
use crate::config::PoolConfig;
use crate::events::{Event, EventId, EventPayload, FundingAccruedEvent};
use crate::funding;
use crate::nav;
use crate::order::{LiquidityOrder, OrderQueue};
use crate::tokens::TokenTransfer;
use crate::types::{AccountId, AssetId, OrderId, Timestamp, TokenId};
use rust_decimal::Decimal;
use std::collections::HashMap;

#[derive(Debug)]
pub struct Pool {
    pub(super) config: PoolConfig,
    pub(super) governor: AccountId,
    pub(super) assets: HashMap<AssetId, AssetState>,
    pub(super) orders: OrderQueue,
    pub(super) brokers: BrokerRegistry,
    pub(super) share_token: TokenId,
    pub(super) share_supply: Decimal,
    pub(super) tokens: Box<dyn TokenTransfer + Send + Sync>,
    pub(super) events: Vec<Event>,
    pub(super) next_event_id: u64,
    pub(super) current_time: Timestamp,
}

impl Pool {
    pub fn new(
        config: PoolConfig,
        governor: AccountId,
        share_token: TokenId,
        tokens: Box<dyn TokenTransfer + Send + Sync>,
    ) -> Self {
        Self {
            config,
            governor,
            assets: HashMap::new(),
            orders: OrderQueue::new(),
            brokers: BrokerRegistry::new(),
            share_token,
            share_supply: Decimal::ZERO,
            tokens,
            events: Vec::new(),
            next_event_id: 1,
            current_time: Timestamp::from_millis(0),
        }
    }

    pub fn set_time(&mut self, timestamp: Timestamp) {
        self.current_time = timestamp;
    }

    pub fn advance_time(&mut self, millis: i64) {
        self.current_time = Timestamp::from_millis(self.current_time.as_millis() + millis);
    }

    pub fn time(&self) -> Timestamp {
        self.current_time
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn governor(&self) -> AccountId {
        self.governor
    }

    pub fn asset_state(&self, asset_id: AssetId) -> Option<&AssetState> {
        self.assets.get(&asset_id)
    }

    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    pub fn share_supply(&self) -> Decimal {
        self.share_supply
    }

    pub fn is_broker(&self, account: AccountId) -> bool {
        self.brokers.is_broker(account)
    }

    /// Pending orders sorted by id, for the off-pool broker/keeper.
    pub fn pending_orders(&self) -> Vec<&LiquidityOrder> {
        let mut pending: Vec<&LiquidityOrder> = self.orders.iter_pending().collect();
        pending.sort_by_key(|order| order.id);
        pending
    }

    pub fn pending_order(&self, order_id: OrderId) -> Option<&LiquidityOrder> {
        self.orders.peek(order_id)
    }

    /// Pool NAV at the supplied spot prices.
    pub fn pool_nav(&self, prices: &HashMap<AssetId, Decimal>) -> Decimal {
        nav::pool_nav(self.assets.values(), prices)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn recent_events(&self, count: usize) -> &[Event] {
        let start = self.events.len().saturating_sub(count);
        &self.events[start..]
    }

    /// Lazily advance the asset's cumulative funding index to the current time.
    /// Safe to call repeatedly; a no-op when no time has passed.
    pub fn accrue_funding(&mut self, asset_id: AssetId) -> Result<Decimal, PoolError> {
        let interval = self.config.funding_interval_ms;
        let now = self.current_time;
        let state = self
            .assets
            .get_mut(&asset_id)
            .ok_or(RegistryError::UnknownAsset(asset_id))?;

        let ledger = state.ledger;
        let delta = funding::accrue(&mut state.funding, &state.funding_params, &ledger, now, interval);

        if let Some(delta) = delta {
            let cumulative_index = state.funding.cumulative_index;
            self.emit_event(EventPayload::FundingAccrued(FundingAccruedEvent {
                asset_id,
                delta,
                cumulative_index,
                utilization: funding::utilization(&ledger),
            }));
            Ok(delta)
        } else {
            Ok(Decimal::ZERO)
        }
    }

    pub(super) fn asset(&self, asset_id: AssetId) -> Result<&AssetState, PoolError> {
        self.assets
            .get(&asset_id)
            .ok_or_else(|| RegistryError::UnknownAsset(asset_id).into())
    }

    pub(super) fn asset_mut(&mut self, asset_id: AssetId) -> Result<&mut AssetState, PoolError> {
        self.assets
            .get_mut(&asset_id)
            .ok_or_else(|| RegistryError::UnknownAsset(asset_id).into())
    }

    pub(super) fn require_governor(&self, caller: AccountId) -> Result<(), PoolError> {
        if caller != self.governor {
            return Err(PoolError::Unauthorized(caller));
        }
        Ok(())
    }

    pub(super) fn require_broker(&self, caller: AccountId) -> Result<(), PoolError> {
        if !self.brokers.is_broker(caller) {
            return Err(PoolError::Unauthorized(caller));
        }
        Ok(())
    }

    pub(super) fn emit_event(&mut self, payload: EventPayload) {
        let event = Event::new(EventId(self.next_event_id), self.current_time, payload);
        self.next_event_id += 1;

        if self.config.verbose {
            println!("[Event {}] {:?}", event.id.0, event.payload);
        }

        self.events.push(event);

        if self.events.len() > self.config.max_events {
            let drain_count = self.events.len() - self.config.max_events;
            self.events.drain(0..drain_count);
        }
    }
}

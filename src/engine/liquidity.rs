//! The liquidity-order pipeline: place → lock → fill/cancel.
//!
//! Orders are a two-phase commitment scheme. Placement only records intent;
//! no ledger state moves until a broker fills the order with prices sourced
//! after the lock period has elapsed, which is what defeats same-block
//! stale-price games. The timeout guarantees liveness: a broker cannot hold
//! an order hostage forever, and once it expires anyone may clear it.
//!
//! State machine per order: Pending → {Filled, Cancelled}, both terminal.

use super::core::Pool;
use super::results::{FillResult, PoolError};
use crate::events::{
    CancelReason, EventPayload, OrderCancelledEvent, OrderFilledEvent, OrderPlacedEvent,
};
use crate::guard::{self, ReferencePrice};
use crate::nav;
use crate::order::{OrderDirection, OrderError};
use crate::types::{round_fee, AccountId, AssetId, OrderId};
use rust_decimal::Decimal;

impl Pool {
    /// Record the intent to add or remove liquidity. Returns the order id the
    /// account will need to watch for settlement or cancellation.
    pub fn place_liquidity_order(
        &mut self,
        account: AccountId,
        asset_id: AssetId,
        amount: Decimal,
        direction: OrderDirection,
        min_out: Decimal,
    ) -> Result<OrderId, PoolError> {
        let state = self.asset(asset_id)?;
        if !state.flags.enabled {
            return Err(PoolError::AssetNotTradable(asset_id));
        }
        if amount <= Decimal::ZERO || min_out.is_sign_negative() {
            return Err(PoolError::InvalidAmount(amount));
        }

        let order_id = self
            .orders
            .place(account, asset_id, amount, direction, min_out, self.current_time);

        self.emit_event(EventPayload::OrderPlaced(OrderPlacedEvent {
            order_id,
            account,
            asset_id,
            direction,
            amount,
            min_out,
        }));
        Ok(order_id)
    }

    /// Broker-only settlement of a pending order. `asset_price` and
    /// `share_price` (NAV per share) are sourced off-pool by the broker and
    /// validated here against the reference oracle and the emergency bounds.
    pub fn fill_liquidity_order(
        &mut self,
        caller: AccountId,
        order_id: OrderId,
        asset_price: Decimal,
        reference_price: ReferencePrice,
        share_price: Decimal,
    ) -> Result<FillResult, PoolError> {
        self.require_broker(caller)?;

        let order = *self
            .orders
            .peek(order_id)
            .ok_or(OrderError::OrderNotFound(order_id))?;

        let age_ms = order.age_ms(self.current_time);
        if age_ms < self.config.lock_period_ms {
            return Err(PoolError::LockPeriodNotElapsed {
                age_ms,
                lock_ms: self.config.lock_period_ms,
            });
        }
        if age_ms > self.config.order_timeout_ms {
            return Err(PoolError::OrderExpired {
                age_ms,
                timeout_ms: self.config.order_timeout_ms,
            });
        }

        let state = self.asset(order.asset_id)?;
        if !state.flags.enabled {
            return Err(PoolError::AssetNotTradable(order.asset_id));
        }
        let token = state.meta.token;
        let strict = state.flags.strict;
        let deviation_bound = state.params.reference_deviation;

        guard::check_price(strict, deviation_bound, asset_price, reference_price)?;
        guard::check_emergency_bounds(
            share_price,
            self.config.emergency_nav_min,
            self.config.emergency_nav_max,
        )?;

        self.accrue_funding(order.asset_id)?;

        let mut entry = self.asset(order.asset_id)?.ledger;
        let share_token = self.share_token;

        let result = match order.direction {
            OrderDirection::Add => {
                let fee = round_fee(order.amount * self.config.liquidity_fee_rate);
                let value_added = (order.amount - fee) * asset_price;
                let shares = nav::shares_for_value(value_added, share_price, self.share_supply);

                if shares < order.min_out {
                    return Err(PoolError::MinOutputNotMet {
                        produced: shares,
                        min_out: order.min_out,
                    });
                }

                entry.add_liquidity(order.amount, fee);
                self.tokens.mint(share_token, order.account, shares)?;

                self.asset_mut(order.asset_id)?.ledger = entry;
                self.share_supply += shares;

                FillResult {
                    order_id,
                    account: order.account,
                    asset_id: order.asset_id,
                    direction: order.direction,
                    amount: order.amount,
                    fee,
                    shares_delta: shares,
                    payout: Decimal::ZERO,
                }
            }
            OrderDirection::Remove => {
                // order.amount is a share count here
                let gross = nav::amount_for_shares(order.amount, share_price, asset_price);
                let fee = round_fee(gross * self.config.liquidity_fee_rate);
                let payout = gross - fee;

                if payout < order.min_out {
                    return Err(PoolError::MinOutputNotMet {
                        produced: payout,
                        min_out: order.min_out,
                    });
                }

                entry.remove_liquidity(gross, fee)?;
                self.tokens.burn(share_token, order.account, order.amount)?;
                self.tokens.transfer(token, order.account, payout)?;

                self.asset_mut(order.asset_id)?.ledger = entry;
                self.share_supply -= order.amount;

                FillResult {
                    order_id,
                    account: order.account,
                    asset_id: order.asset_id,
                    direction: order.direction,
                    amount: order.amount,
                    fee,
                    shares_delta: order.amount,
                    payout,
                }
            }
        };

        // at-most-once: the order leaves the pending set only on success
        self.orders.remove(order_id)?;

        self.emit_event(EventPayload::OrderFilled(OrderFilledEvent {
            order_id,
            account: result.account,
            asset_id: result.asset_id,
            direction: result.direction,
            amount: result.amount,
            fee: result.fee,
            asset_price,
            share_price,
            shares_delta: result.shares_delta,
            payout: result.payout,
        }));
        Ok(result)
    }

    /// Cancel a pending order: the owner may cancel at any time, anyone else
    /// only after the timeout. Nothing is reversed because nothing was applied.
    pub fn cancel_liquidity_order(
        &mut self,
        caller: AccountId,
        order_id: OrderId,
    ) -> Result<(), PoolError> {
        let order = *self
            .orders
            .peek(order_id)
            .ok_or(OrderError::OrderNotFound(order_id))?;

        let age_ms = order.age_ms(self.current_time);
        let is_owner = caller == order.account;
        if !is_owner && age_ms <= self.config.order_timeout_ms {
            return Err(PoolError::CancelTooEarly {
                age_ms,
                timeout_ms: self.config.order_timeout_ms,
            });
        }

        self.orders.remove(order_id)?;

        let reason = if is_owner {
            CancelReason::UserRequested
        } else {
            CancelReason::Expired
        };
        self.emit_event(EventPayload::OrderCancelled(OrderCancelledEvent {
            order_id,
            account: order.account,
            reason,
        }));
        Ok(())
    }
}

//! Governance surface: asset registration/configuration, the broker whitelist,
//! and the global settlement scalars. Every method checks the governance
//! capability (the caller must be the governor) before touching state.
//!
//! Asset identity is append-only: there is no setter for `AssetMeta`, so
//! decimals and the stable classification are immutable after `add_asset`.

use super::core::Pool;
use super::results::PoolError;
use crate::asset::{AssetFlags, AssetMeta, AssetParams, AssetState, RegistryError, MAX_ASSET_DECIMALS};
use crate::events::{AssetAddedEvent, AssetConfigEvent, BrokerEvent, EventPayload};
use crate::funding::FundingParams;
use crate::types::{AccountId, AssetId};
use rust_decimal::Decimal;

impl Pool {
    pub fn add_asset(&mut self, caller: AccountId, meta: AssetMeta) -> Result<(), PoolError> {
        self.require_governor(caller)?;

        if self.assets.contains_key(&meta.id) {
            return Err(RegistryError::DuplicateAsset(meta.id).into());
        }
        if meta.decimals > MAX_ASSET_DECIMALS {
            return Err(RegistryError::InvalidDecimals {
                decimals: meta.decimals,
                max: MAX_ASSET_DECIMALS,
            }
            .into());
        }

        let event = AssetAddedEvent {
            asset_id: meta.id,
            symbol: meta.symbol.clone(),
            decimals: meta.decimals,
            is_stable: meta.is_stable,
        };
        let state = AssetState::new(meta, self.current_time);
        self.assets.insert(state.meta.id, state);
        self.emit_event(EventPayload::AssetAdded(event));
        Ok(())
    }

    pub fn set_asset_params(
        &mut self,
        caller: AccountId,
        asset_id: AssetId,
        params: AssetParams,
    ) -> Result<(), PoolError> {
        self.require_governor(caller)?;
        params.validate()?;

        self.asset_mut(asset_id)?.params = params;
        self.emit_event(EventPayload::AssetParamsUpdated(AssetConfigEvent { asset_id }));
        Ok(())
    }

    pub fn set_asset_flags(
        &mut self,
        caller: AccountId,
        asset_id: AssetId,
        flags: AssetFlags,
    ) -> Result<(), PoolError> {
        self.require_governor(caller)?;

        self.asset_mut(asset_id)?.flags = flags;
        self.emit_event(EventPayload::AssetFlagsUpdated(AssetConfigEvent { asset_id }));
        Ok(())
    }

    pub fn set_funding_params(
        &mut self,
        caller: AccountId,
        asset_id: AssetId,
        params: FundingParams,
    ) -> Result<(), PoolError> {
        self.require_governor(caller)?;
        if params.base_rate.is_sign_negative() || params.dynamic_rate.is_sign_negative() {
            return Err(RegistryError::InvalidParams("negative funding rate").into());
        }

        // settle the old rate up to now before switching
        if self.assets.contains_key(&asset_id) {
            self.accrue_funding(asset_id)?;
        }
        self.asset_mut(asset_id)?.funding_params = params;
        self.emit_event(EventPayload::FundingParamsUpdated(AssetConfigEvent { asset_id }));
        Ok(())
    }

    pub fn add_broker(&mut self, caller: AccountId, account: AccountId) -> Result<(), PoolError> {
        self.require_governor(caller)?;
        if self.brokers.add(account) {
            self.emit_event(EventPayload::BrokerAdded(BrokerEvent { account }));
        }
        Ok(())
    }

    pub fn remove_broker(&mut self, caller: AccountId, account: AccountId) -> Result<(), PoolError> {
        self.require_governor(caller)?;
        if self.brokers.remove(account) {
            self.emit_event(EventPayload::BrokerRemoved(BrokerEvent { account }));
        }
        Ok(())
    }

    pub fn set_lock_period(&mut self, caller: AccountId, lock_period_ms: i64) -> Result<(), PoolError> {
        self.require_governor(caller)?;
        if lock_period_ms < 0 || lock_period_ms >= self.config.order_timeout_ms {
            return Err(PoolError::InvalidConfig("lock period must be within [0, timeout)"));
        }
        self.config.lock_period_ms = lock_period_ms;
        Ok(())
    }

    pub fn set_order_timeout(&mut self, caller: AccountId, timeout_ms: i64) -> Result<(), PoolError> {
        self.require_governor(caller)?;
        if timeout_ms <= self.config.lock_period_ms {
            return Err(PoolError::InvalidConfig("timeout must exceed lock period"));
        }
        self.config.order_timeout_ms = timeout_ms;
        Ok(())
    }

    pub fn set_emergency_bounds(
        &mut self,
        caller: AccountId,
        min: Decimal,
        max: Decimal,
    ) -> Result<(), PoolError> {
        self.require_governor(caller)?;
        if min <= Decimal::ZERO || min >= max {
            return Err(PoolError::InvalidConfig("bounds must satisfy 0 < min < max"));
        }
        self.config.emergency_nav_min = min;
        self.config.emergency_nav_max = max;
        Ok(())
    }

    pub fn set_liquidity_fee_rate(&mut self, caller: AccountId, rate: Decimal) -> Result<(), PoolError> {
        self.require_governor(caller)?;
        if rate.is_sign_negative() || rate >= Decimal::ONE {
            return Err(PoolError::InvalidConfig("fee rate must be within [0, 1)"));
        }
        self.config.liquidity_fee_rate = rate;
        Ok(())
    }
}

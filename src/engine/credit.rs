//! Borrow and repay orchestration.
//!
//! The external trading/liquidation modules drive this surface with the
//! governance capability; the pool itself never decides when principal moves.
//! Funding accrues first, ledger effects are validated on a copy, the external
//! transfer runs, and only then is the new entry committed.

use super::core::Pool;
use super::results::PoolError;
use crate::events::{BorrowEvent, EventPayload, RepayEvent};
use crate::types::{AccountId, AssetId};
use rust_decimal::Decimal;

impl Pool {
    /// Lend `principal` of the asset to `receiver`, who receives
    /// `principal - fee` of the underlying token; the fee stays in the pool
    /// as collected revenue.
    pub fn borrow_asset(
        &mut self,
        caller: AccountId,
        receiver: AccountId,
        asset_id: AssetId,
        principal: Decimal,
        fee: Decimal,
    ) -> Result<(), PoolError> {
        self.require_governor(caller)?;

        if principal <= Decimal::ZERO || fee.is_sign_negative() || fee > principal {
            return Err(PoolError::InvalidAmount(principal));
        }

        let state = self.asset(asset_id)?;
        if !state.flags.enabled || !state.flags.openable {
            return Err(PoolError::AssetNotOpenable(asset_id));
        }
        let token = state.meta.token;

        self.accrue_funding(asset_id)?;

        let mut entry = self.asset(asset_id)?.ledger;
        entry.borrow(principal, fee)?;

        self.tokens.transfer(token, receiver, principal - fee)?;

        self.asset_mut(asset_id)?.ledger = entry;
        self.emit_event(EventPayload::AssetBorrowed(BorrowEvent {
            asset_id,
            receiver,
            principal,
            fee,
        }));
        Ok(())
    }

    /// Accept repayment of `principal` plus `fee` (the payer has already moved
    /// the tokens into the pool's balance). `bad_debt` writes credit off with
    /// no inflow and is only ever non-zero under a liquidation shortfall.
    pub fn repay_asset(
        &mut self,
        caller: AccountId,
        payer: AccountId,
        asset_id: AssetId,
        principal: Decimal,
        fee: Decimal,
        bad_debt: Decimal,
    ) -> Result<(), PoolError> {
        self.require_governor(caller)?;

        if principal.is_sign_negative() || fee.is_sign_negative() || bad_debt.is_sign_negative() {
            return Err(PoolError::InvalidAmount(principal));
        }
        if principal + bad_debt <= Decimal::ZERO {
            return Err(PoolError::InvalidAmount(principal));
        }

        // asset must exist, but repayment is accepted even for assets that have
        // since been disabled: outstanding credit must always be returnable
        self.asset(asset_id)?;

        self.accrue_funding(asset_id)?;

        let mut entry = self.asset(asset_id)?.ledger;
        entry.repay(principal, fee, bad_debt)?;

        self.asset_mut(asset_id)?.ledger = entry;
        self.emit_event(EventPayload::AssetRepaid(RepayEvent {
            asset_id,
            payer,
            principal,
            fee,
            bad_debt,
        }));
        Ok(())
    }
}

// 3.0: the per-asset ledger entry. three numbers carry the whole accounting model:
// spot_liquidity (on-hand balance), credit (principal lent out), collected_fee
// (fee revenue earmarked inside spot_liquidity, excluded from NAV and withdrawal).
//
// conservation: spot_liquidity + credit moves only by net principal flows.
// fees are additive. no operation may drive any of the three negative.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub spot_liquidity: Decimal,
    pub collected_fee: Decimal,
    pub credit: Decimal,
}

impl LedgerEntry {
    pub fn new() -> Self {
        Self::default()
    }

    // balance not earmarked as fee revenue; the most an LP withdrawal can take
    pub fn withdrawable(&self) -> Decimal {
        self.spot_liquidity - self.collected_fee
    }

    /// Lend `principal` out of spot liquidity. The fee is paid by the borrower
    /// and stays in the pool: the receiver is transferred `principal - fee`.
    pub fn borrow(&mut self, principal: Decimal, fee: Decimal) -> Result<(), LedgerError> {
        if principal > self.spot_liquidity {
            return Err(LedgerError::InsufficientLiquidity {
                requested: principal,
                available: self.spot_liquidity,
            });
        }
        self.spot_liquidity = self.spot_liquidity - principal + fee;
        self.credit += principal;
        self.collected_fee += fee;
        Ok(())
    }

    /// Return `principal` (plus fee) to the pool. `bad_debt` is written off
    /// against credit with no liquidity inflow; only the external liquidation
    /// collaborator decides when that path is taken.
    pub fn repay(
        &mut self,
        principal: Decimal,
        fee: Decimal,
        bad_debt: Decimal,
    ) -> Result<(), LedgerError> {
        if principal + bad_debt > self.credit {
            return Err(LedgerError::RepayExceedsCredit {
                requested: principal + bad_debt,
                credit: self.credit,
            });
        }
        self.credit -= principal + bad_debt;
        self.spot_liquidity += principal + fee;
        self.collected_fee += fee;
        Ok(())
    }

    /// Record a liquidity deposit of `amount`, `fee` of which is earmarked.
    pub fn add_liquidity(&mut self, amount: Decimal, fee: Decimal) {
        self.spot_liquidity += amount;
        self.collected_fee += fee;
    }

    /// Record a liquidity withdrawal. `amount` is the gross value leaving the
    /// LP's share; the fee portion stays behind as earmarked revenue, so the
    /// actual outflow is `amount - fee`.
    pub fn remove_liquidity(&mut self, amount: Decimal, fee: Decimal) -> Result<(), LedgerError> {
        let outflow = amount - fee;
        if outflow > self.withdrawable() {
            return Err(LedgerError::InsufficientLiquidity {
                requested: outflow,
                available: self.withdrawable(),
            });
        }
        self.spot_liquidity -= outflow;
        self.collected_fee += fee;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("insufficient spot liquidity: requested {requested}, available {available}")]
    InsufficientLiquidity {
        requested: Decimal,
        available: Decimal,
    },

    #[error("repay {requested} exceeds outstanding credit {credit}")]
    RepayExceedsCredit { requested: Decimal, credit: Decimal },
}

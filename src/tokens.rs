// 7.0 tokens.rs: the external token-transfer collaborator. the pool owns no
// token accounting beyond its ledger entries; it pushes transfer/mint/burn
// calls through this seam and assumes they are atomic and loud on failure.
//
// InMemoryTokens is the mock used by the sim and the test suite: just balance
// changes, no real token contracts.

use crate::types::{AccountId, TokenId};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;

pub trait TokenTransfer {
    /// Move pool-held tokens to an external account.
    fn transfer(&mut self, token: TokenId, to: AccountId, amount: Decimal)
        -> Result<(), TransferError>;

    /// Mint new supply (pool share tokens, synthetic debt tokens).
    fn mint(&mut self, token: TokenId, to: AccountId, amount: Decimal)
        -> Result<(), TransferError>;

    /// Burn supply held by `from`. Fails loudly on insufficient balance.
    fn burn(&mut self, token: TokenId, from: AccountId, amount: Decimal)
        -> Result<(), TransferError>;
}

// trait objects don't auto derive Debug
impl fmt::Debug for Box<dyn TokenTransfer + Send + Sync> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenTransfer")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    #[error("insufficient balance of token {token:?} for {account:?}: available {available}, requested {requested}")]
    InsufficientBalance {
        token: TokenId,
        account: AccountId,
        available: Decimal,
        requested: Decimal,
    },

    #[error("invalid transfer amount {0}")]
    InvalidAmount(Decimal),
}

/// Per-token per-account balances. The pool's own holdings are implicit: the
/// ledger guarantees an outbound transfer is always covered.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTokens {
    balances: HashMap<(TokenId, AccountId), Decimal>,
}

impl InMemoryTokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, token: TokenId, account: AccountId) -> Decimal {
        self.balances
            .get(&(token, account))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    fn credit(&mut self, token: TokenId, account: AccountId, amount: Decimal) {
        *self.balances.entry((token, account)).or_insert(Decimal::ZERO) += amount;
    }

    fn debit(
        &mut self,
        token: TokenId,
        account: AccountId,
        amount: Decimal,
    ) -> Result<(), TransferError> {
        let balance = self.balances.entry((token, account)).or_insert(Decimal::ZERO);
        if *balance < amount {
            return Err(TransferError::InsufficientBalance {
                token,
                account,
                available: *balance,
                requested: amount,
            });
        }
        *balance -= amount;
        Ok(())
    }
}

impl TokenTransfer for InMemoryTokens {
    fn transfer(
        &mut self,
        token: TokenId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<(), TransferError> {
        if amount.is_sign_negative() {
            return Err(TransferError::InvalidAmount(amount));
        }
        self.credit(token, to, amount);
        Ok(())
    }

    fn mint(
        &mut self,
        token: TokenId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<(), TransferError> {
        if amount.is_sign_negative() {
            return Err(TransferError::InvalidAmount(amount));
        }
        self.credit(token, to, amount);
        Ok(())
    }

    fn burn(
        &mut self,
        token: TokenId,
        from: AccountId,
        amount: Decimal,
    ) -> Result<(), TransferError> {
        if amount.is_sign_negative() {
            return Err(TransferError::InvalidAmount(amount));
        }
        self.debit(token, from, amount)
    }
}

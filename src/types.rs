// 1.0: all the primitives live here. nothing in the pool works without these types.
// IDs, symbols, timestamps, rounding. each id is a newtype so the compiler catches mixups.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

// dense small-integer asset id, assigned at registration, never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u64);

// opaque handle onto an external token contract. the pool never inspects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenId(pub u32);

// 1.1: fixed-width uppercase asset symbol, max 16 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

pub const MAX_SYMBOL_LEN: usize = 16;

impl Symbol {
    #[must_use]
    pub fn new(s: &str) -> Option<Self> {
        let ok = !s.is_empty()
            && s.len() <= MAX_SYMBOL_LEN
            && s.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
        if ok {
            Some(Self(s.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// 1.2: millisecond timestamp. all operations receive time from the embedding
// environment; Timestamp::now() is a convenience for the sim binary only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp_millis())
    }

    pub fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }

    // signed: negative when `since` is in the future relative to `self`
    pub fn elapsed_ms(&self, since: Timestamp) -> i64 {
        self.0 - since.0
    }
}

// 1.3: rounding policy. divisions that produce amounts owed to an account
// round toward zero, fee products round away from zero. both favor the pool.
pub const FIXED_SCALE: u32 = 18;

pub fn round_down(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(FIXED_SCALE, RoundingStrategy::ToZero)
}

pub fn round_fee(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(FIXED_SCALE, RoundingStrategy::AwayFromZero)
}

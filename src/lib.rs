// pool-core: accounting and settlement core of a leveraged multi-asset
// liquidity pool. accounting-first architecture: conservation invariants and
// the two-phase order pipeline take priority.
// all computation is deterministic; external token movement goes through an
// injected collaborator and time is injected by the embedding environment.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: primitives: AssetId, AccountId, OrderId, Symbol, Timestamp
//   2.x  funding.rs: utilization-sensitive cumulative funding index
//   3.x  ledger.rs: per-asset spot liquidity / credit / collected fees
//   4.x  asset.rs: asset identity, flags, risk/fee params
//   4.5  guard.rs: reference-deviation and emergency NAV-bound checks
//   5.x  order.rs: pending liquidity-order queue, monotone ids
//   6.x  broker.rs: settlement-privilege whitelist
//   7.x  tokens.rs: external transfer collaborator (mocked in-memory)
//   7.5  nav.rs: pool NAV and proportional share math
//   8.x  engine/: the Pool: governance, credit, and order settlement
//   9.x  events.rs: state transition events for audit
//   10.x config.rs: global scalars: lock period, timeout, bounds, fees

// core accounting modules
pub mod asset;
pub mod funding;
pub mod ledger;
pub mod nav;
pub mod types;

// settlement and safety modules
pub mod broker;
pub mod engine;
pub mod guard;
pub mod order;

// integration modules
pub mod config;
pub mod events;
pub mod tokens;

// re exports for convenience
pub use asset::*;
pub use broker::*;
pub use config::*;
pub use engine::*;
pub use events::*;
pub use funding::*;
pub use guard::*;
pub use ledger::*;
pub use nav::*;
pub use order::*;
pub use tokens::*;
pub use types::*;

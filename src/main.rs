//! Liquidity Pool Core Simulation.
//!
//! Walks the full settlement lifecycle: asset registration, the delayed
//! liquidity-order pipeline, borrow/repay accounting, and the price guards.

use pool_core::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const GOVERNOR: AccountId = AccountId(1);
const BROKER: AccountId = AccountId(2);
const LP: AccountId = AccountId(10);
const TRADER: AccountId = AccountId(11);

const USDC: AssetId = AssetId(0);
const BNB: AssetId = AssetId(1);
const SHARE_TOKEN: TokenId = TokenId(0);

fn main() {
    println!("Liquidity Pool Core Simulation");
    println!("Multi-Asset Ledger, Broker-Mediated Settlement\n");

    scenario_1_liquidity_lifecycle();
    scenario_2_borrow_repay();
    scenario_3_lock_and_timeout();
    scenario_4_price_guards();

    println!("\nAll simulations completed successfully.");
}

fn new_pool() -> Pool {
    let mut pool = Pool::new(
        PoolConfig::default(),
        GOVERNOR,
        SHARE_TOKEN,
        Box::new(InMemoryTokens::new()),
    );
    pool.set_time(Timestamp::from_millis(86_400_000));

    pool.add_asset(
        GOVERNOR,
        AssetMeta {
            id: USDC,
            symbol: Symbol::new("USDC").unwrap(),
            decimals: 6,
            is_stable: true,
            token: TokenId(1),
            paired_token: TokenId(101),
        },
    )
    .unwrap();
    pool.set_asset_flags(
        GOVERNOR,
        USDC,
        AssetFlags {
            enabled: true,
            strict: true,
            liquidatable: true,
            use_stable_collateral: true,
            ..AssetFlags::default()
        },
    )
    .unwrap();

    pool.add_asset(
        GOVERNOR,
        AssetMeta {
            id: BNB,
            symbol: Symbol::new("BNB").unwrap(),
            decimals: 18,
            is_stable: false,
            token: TokenId(2),
            paired_token: TokenId(102),
        },
    )
    .unwrap();
    pool.set_asset_flags(
        GOVERNOR,
        BNB,
        AssetFlags {
            tradable: true,
            openable: true,
            shortable: true,
            enabled: true,
            liquidatable: true,
            ..AssetFlags::default()
        },
    )
    .unwrap();
    pool.set_funding_params(
        GOVERNOR,
        BNB,
        FundingParams {
            base_rate: dec!(0.0003),
            dynamic_rate: dec!(0.0009),
        },
    )
    .unwrap();

    pool.add_broker(GOVERNOR, BROKER).unwrap();
    pool
}

/// Seed BNB liquidity through the order pipeline and return the pool.
fn seed_liquidity(pool: &mut Pool) -> FillResult {
    let order_id = pool
        .place_liquidity_order(LP, BNB, dec!(1000), OrderDirection::Add, Decimal::ZERO)
        .unwrap();
    pool.advance_time(pool.config().lock_period_ms);
    pool.fill_liquidity_order(
        BROKER,
        order_id,
        dec!(300),
        ReferencePrice::valid(dec!(300)),
        dec!(1),
    )
    .unwrap()
}

fn scenario_1_liquidity_lifecycle() {
    println!("Scenario 1: Liquidity Order Lifecycle\n");

    let mut pool = new_pool();
    let fill = seed_liquidity(&mut pool);

    println!("  LP places an add-liquidity order for 1000 BNB");
    println!("  Broker fills after the lock period at $300, share price $1");
    println!("  Fee charged: {} BNB", fill.fee);
    println!("  Shares minted: {}", fill.shares_delta);

    let ledger = pool.asset_state(BNB).unwrap().ledger;
    println!(
        "  Ledger: spot={}, fee earmark={}, credit={}",
        ledger.spot_liquidity, ledger.collected_fee, ledger.credit
    );
    println!("  Share supply: {}\n", pool.share_supply());
}

fn scenario_2_borrow_repay() {
    println!("Scenario 2: Borrow / Repay Accounting\n");

    let mut pool = new_pool();
    seed_liquidity(&mut pool);

    pool.borrow_asset(GOVERNOR, TRADER, BNB, dec!(100), dec!(1)).unwrap();
    let ledger = pool.asset_state(BNB).unwrap().ledger;
    println!("  Borrow 100 BNB with a 1 BNB fee:");
    println!(
        "  spot={}, credit={}, collected fee={}",
        ledger.spot_liquidity, ledger.credit, ledger.collected_fee
    );

    pool.advance_time(8 * 3600 * 1000);
    pool.repay_asset(GOVERNOR, TRADER, BNB, dec!(100), dec!(1), Decimal::ZERO)
        .unwrap();
    let ledger = pool.asset_state(BNB).unwrap().ledger;
    println!("  Repay 100 BNB with a 1 BNB fee after 8 hours:");
    println!(
        "  spot={}, credit={}, collected fee={}",
        ledger.spot_liquidity, ledger.credit, ledger.collected_fee
    );

    let funding = pool.asset_state(BNB).unwrap().funding;
    println!("  Cumulative funding index: {}\n", funding.cumulative_index);
}

fn scenario_3_lock_and_timeout() {
    println!("Scenario 3: Lock Period and Timeout\n");

    let mut pool = new_pool();
    let order_id = pool
        .place_liquidity_order(LP, BNB, dec!(50), OrderDirection::Add, Decimal::ZERO)
        .unwrap();

    let early = pool.fill_liquidity_order(
        BROKER,
        order_id,
        dec!(300),
        ReferencePrice::valid(dec!(300)),
        dec!(1),
    );
    println!("  Immediate fill attempt: {}", early.unwrap_err());

    pool.advance_time(pool.config().order_timeout_ms + 1);
    let late = pool.fill_liquidity_order(
        BROKER,
        order_id,
        dec!(300),
        ReferencePrice::valid(dec!(300)),
        dec!(1),
    );
    println!("  Fill attempt after timeout: {}", late.unwrap_err());

    pool.cancel_liquidity_order(TRADER, order_id).unwrap();
    println!("  Expired order cancelled by a third party");
    println!("  Pending orders remaining: {}\n", pool.pending_orders().len());
}

fn scenario_4_price_guards() {
    println!("Scenario 4: Price Guards\n");

    let mut pool = new_pool();
    let order_id = pool
        .place_liquidity_order(LP, USDC, dec!(1000), OrderDirection::Add, Decimal::ZERO)
        .unwrap();
    pool.advance_time(pool.config().lock_period_ms);

    // USDC is strict: a 5% deviation from the reference is rejected
    let deviant = pool.fill_liquidity_order(
        BROKER,
        order_id,
        dec!(1.05),
        ReferencePrice::valid(dec!(1)),
        dec!(1),
    );
    println!("  Deviant price on a strict asset: {}", deviant.unwrap_err());

    // implausible share price trips the emergency halt
    let halted = pool.fill_liquidity_order(
        BROKER,
        order_id,
        dec!(1),
        ReferencePrice::valid(dec!(1)),
        dec!(5000),
    );
    println!("  Share price outside emergency bounds: {}", halted.unwrap_err());

    let fill = pool
        .fill_liquidity_order(BROKER, order_id, dec!(1), ReferencePrice::valid(dec!(1)), dec!(1))
        .unwrap();
    println!("  Conforming fill succeeds, shares minted: {}", fill.shares_delta);
}

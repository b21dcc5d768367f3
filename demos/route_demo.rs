use alloy_primitives::{Address, U256};
use eyre::Result;
use swap_router::utils::{RouterConfigRoot, load_from_str};
use swap_router::{
    CallContext, ConstantProductAdapter, FixedRateAdapter, FlashLoanDes, Ledger, LinearWeightedSwap, PoolEdition, ReserveLender,
    RouterBuilder, Swap, TradeParams, WeightedSwap,
};
use tracing::info;

const CONFIG: &str = r#"
[router]
owner = "0x0000000000000000000000000000000000000001"
wrapped_native = "0x00000000000000000000000000000000000000ee"
max_arbitrage_candidates = 4
"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let router_address = Address::repeat_byte(0x99);
    let trader = Address::repeat_byte(0xa1);
    let lender = Address::repeat_byte(0x1e);
    let (usdc, weth, dai) = (Address::repeat_byte(0x0a), Address::repeat_byte(0x0b), Address::repeat_byte(0x0c));
    let (cpmm, cpmm_pull, fixed) = (Address::repeat_byte(0xd1), Address::repeat_byte(0xd2), Address::repeat_byte(0xd3));
    let pool = |n: u8| Address::repeat_byte(0x50 + n);

    let config: RouterConfigRoot = load_from_str(CONFIG)?;
    let mut router = RouterBuilder::new(router_address, config.router)
        .with_adapter(ConstantProductAdapter::new(cpmm, PoolEdition::PreFunded, 30))
        .with_adapter(ConstantProductAdapter::new(cpmm_pull, PoolEdition::AdapterPull, 5))
        .with_adapter(FixedRateAdapter::new(fixed, PoolEdition::PreFunded, 11, 10))
        .with_lender(ReserveLender::new(lender, 9))
        .build();

    let mut ledger = Ledger::new(1_700_000_000);
    let reserve = U256::from(10u64.pow(12));
    for n in 1..=5 {
        for token in [usdc, weth, dai] {
            ledger.mint(token, pool(n), reserve)?;
        }
    }
    ledger.mint(dai, lender, reserve)?;
    ledger.mint(usdc, trader, U256::from(1_000_000))?;
    ledger.approve(usdc, trader, router_address, U256::MAX);

    let leg = |from, to, adapters: Vec<Address>, pools: Vec<Address>, editions: Vec<u8>| WeightedSwap {
        from_asset: from,
        amount_in: U256::ZERO,
        to_asset: to,
        weights: vec![U256::from(1); adapters.len()],
        adapters,
        pools,
        pool_editions: editions,
        recipient: router_address,
    };
    let plan = LinearWeightedSwap {
        from_asset: usdc,
        amount_in: U256::from(1_000_000),
        to_asset: dai,
        weights: vec![U256::from(60), U256::from(40)],
        weighted_swaps: vec![
            vec![
                leg(usdc, weth, vec![cpmm, cpmm_pull], vec![pool(1), pool(2)], vec![0, 1]),
                leg(weth, dai, vec![cpmm], vec![pool(3)], vec![0]),
            ],
            vec![leg(usdc, dai, vec![cpmm], vec![pool(4)], vec![0])],
        ],
        recipient: trader,
    };

    let quoted = router.quote_linear_plan(&ledger, &plan)?;
    info!(%quoted, "linear plan quote");

    let hop = |from, to, adapter, pool, amount_in| Swap {
        from_asset: from,
        amount_in,
        to_asset: to,
        adapter,
        pool,
        pool_edition: 0,
        recipient: router_address,
    };
    let cycle = FlashLoanDes {
        asset: dai,
        amount_in: U256::from(50_000),
        swaps: vec![hop(dai, weth, cpmm, pool(5), U256::from(50_000)), hop(weth, dai, fixed, pool(5), U256::ZERO)],
    };

    let params = TradeParams {
        from_asset: usdc,
        amount_in: plan.amount_in,
        to_asset: dai,
        min_return: quoted * U256::from(995) / U256::from(1000),
        deadline: ledger.block_timestamp() + 60,
        native_legs: Default::default(),
    };
    let report = router.execute_linear_plan_with_arbitrage(&mut ledger, &CallContext::new(trader), &params, &plan, &[cycle])?;

    info!(primary = %report.primary.amount_out, profit = %report.captured_profit, total = %report.amount_out, "trade settled");
    for outcome in &report.outcomes {
        info!(?outcome, "arbitrage outcome");
    }
    info!(balance = %ledger.balance_of(dai, trader), "trader output balance");
    Ok(())
}

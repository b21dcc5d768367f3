#![allow(dead_code)]

use alloy_primitives::{Address, U256};
use swap_router::{
    AdapterError, ConstantProductAdapter, FixedRateAdapter, Ledger, NATIVE, PoolAdapter, PoolEdition, ReserveLender, Router,
    RouterBuilder, RouterConfigSection, Swap, TradeParams, WeightedSwap,
};

pub const OWNER: Address = Address::repeat_byte(0x01);
pub const ROUTER: Address = Address::repeat_byte(0x99);
pub const ALICE: Address = Address::repeat_byte(0xa1);
pub const BOB: Address = Address::repeat_byte(0xb0);
pub const LENDER: Address = Address::repeat_byte(0x1e);
pub const WRAPPED: Address = Address::repeat_byte(0xee);

pub const A: Address = Address::repeat_byte(0x0a);
pub const B: Address = Address::repeat_byte(0x0b);
pub const C: Address = Address::repeat_byte(0x0c);

/// x*y=k, 0.3% fee, pool pre-funded by the router.
pub const CPMM: Address = Address::repeat_byte(0xd1);
/// x*y=k, no fee, adapter pulls from its own balance.
pub const CPMM_PULL: Address = Address::repeat_byte(0xd2);
pub const RATE_19_10: Address = Address::repeat_byte(0xd3);
pub const RATE_15_10: Address = Address::repeat_byte(0xd4);
pub const RATE_2_1: Address = Address::repeat_byte(0xd5);
pub const RATE_1_1: Address = Address::repeat_byte(0xd6);
pub const RATE_11_10: Address = Address::repeat_byte(0xd7);
pub const SKIMMING: Address = Address::repeat_byte(0xd8);

pub const LENDER_PREMIUM_BPS: u64 = 9;

pub fn pool(n: u8) -> Address {
    Address::repeat_byte(0x50 + n)
}

/// Quotes twice what it pays out.
pub struct SkimmingAdapter;

impl PoolAdapter for SkimmingAdapter {
    fn get_address(&self) -> Address {
        SKIMMING
    }

    fn quote(&self, _state: &Ledger, _from: Address, amount_in: U256, _to: Address, _pool: Address) -> Result<U256, AdapterError> {
        Ok(amount_in * U256::from(2))
    }

    fn swap(
        &self,
        state: &mut Ledger,
        _from: Address,
        amount_in: U256,
        to: Address,
        pool: Address,
        recipient: Address,
    ) -> Result<U256, AdapterError> {
        state.transfer(to, pool, recipient, amount_in)?;
        Ok(amount_in)
    }
}

pub fn config() -> RouterConfigSection {
    RouterConfigSection::new(OWNER).with_wrapped_native(WRAPPED)
}

pub fn router_with(config: RouterConfigSection) -> Router {
    RouterBuilder::new(ROUTER, config)
        .with_adapter(ConstantProductAdapter::new(CPMM, PoolEdition::PreFunded, 30))
        .with_adapter(ConstantProductAdapter::new(CPMM_PULL, PoolEdition::AdapterPull, 0))
        .with_adapter(FixedRateAdapter::new(RATE_19_10, PoolEdition::PreFunded, 19, 10))
        .with_adapter(FixedRateAdapter::new(RATE_15_10, PoolEdition::PreFunded, 15, 10))
        .with_adapter(FixedRateAdapter::new(RATE_2_1, PoolEdition::PreFunded, 2, 1))
        .with_adapter(FixedRateAdapter::new(RATE_1_1, PoolEdition::PreFunded, 1, 1))
        .with_adapter(FixedRateAdapter::new(RATE_11_10, PoolEdition::PreFunded, 11, 10))
        .with_adapter(SkimmingAdapter)
        .with_lender(ReserveLender::new(LENDER, LENDER_PREMIUM_BPS))
        .build()
}

pub fn router() -> Router {
    router_with(config())
}

/// Alice holds 1000 A (approved to the router) and 1000 native. Pools 1..=9 hold deep
/// reserves of every token, the lender holds deep reserves of every token and of the wrapped
/// native, whose native escrow is kept in step.
pub fn world() -> Ledger {
    let mut ledger = Ledger::new(1_000);
    let deep = U256::from(1_000_000);
    ledger.mint(A, ALICE, U256::from(1_000)).unwrap();
    ledger.approve(A, ALICE, ROUTER, U256::MAX);
    ledger.mint(NATIVE, ALICE, U256::from(1_000)).unwrap();

    let mut wrapped_supply = U256::ZERO;
    for n in 1..=9 {
        for token in [A, B, C, WRAPPED] {
            ledger.mint(token, pool(n), deep + U256::from(n) * U256::from(10_000)).unwrap();
        }
        wrapped_supply += deep + U256::from(n) * U256::from(10_000);
    }
    for token in [A, B, C, WRAPPED] {
        ledger.mint(token, LENDER, deep).unwrap();
    }
    wrapped_supply += deep;
    ledger.mint(NATIVE, WRAPPED, wrapped_supply).unwrap();
    ledger
}

pub fn hop(from: Address, to: Address, adapter: Address, pool: Address, recipient: Address) -> Swap {
    Swap { from_asset: from, amount_in: U256::ZERO, to_asset: to, adapter, pool, pool_edition: 0, recipient }
}

pub fn split(from: Address, to: Address, legs: &[(u64, Address, Address, u8)], recipient: Address) -> WeightedSwap {
    WeightedSwap {
        from_asset: from,
        amount_in: U256::ZERO,
        to_asset: to,
        weights: legs.iter().map(|leg| U256::from(leg.0)).collect(),
        adapters: legs.iter().map(|leg| leg.1).collect(),
        pools: legs.iter().map(|leg| leg.2).collect(),
        pool_editions: legs.iter().map(|leg| leg.3).collect(),
        recipient,
    }
}

pub fn params(from: Address, amount_in: u64, to: Address, min_return: U256) -> TradeParams {
    TradeParams { from_asset: from, amount_in: U256::from(amount_in), to_asset: to, min_return, deadline: 2_000, native_legs: Default::default() }
}

pub fn balances(ledger: &Ledger) -> Vec<U256> {
    let holders = [ALICE, BOB, ROUTER, LENDER, WRAPPED, CPMM_PULL].into_iter().chain((1..=9).map(pool));
    holders.flat_map(|holder| [NATIVE, A, B, C, WRAPPED].map(|asset| ledger.balance_of(asset, holder))).collect()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).with_test_writer().try_init();
}

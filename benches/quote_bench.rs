use alloy_primitives::{Address, U256};
use criterion::{Criterion, criterion_group, criterion_main};
use lazy_static::lazy_static;
use swap_router::{AdapterRegistry, ConstantProductAdapter, Ledger, LinearWeightedSwap, PoolEdition, Quoter, WMNT, WeightedSwap};

const BRANCHES: u8 = 8;
const PARTS: u8 = 4;

lazy_static! {
    static ref TOKEN_IN: Address = Address::repeat_byte(0x0a);
    static ref TOKEN_MID: Address = Address::repeat_byte(0x0b);
    static ref TOKEN_OUT: Address = Address::repeat_byte(0x0c);
    static ref CPMM: Address = Address::repeat_byte(0xd1);
}

fn pool(branch: u8, hop: u8, part: u8) -> Address {
    let mut bytes = [0u8; 20];
    bytes[0] = 0x50;
    bytes[17] = branch;
    bytes[18] = hop;
    bytes[19] = part;
    Address::from(bytes)
}

fn split(branch: u8, hop: u8, from: Address, to: Address) -> WeightedSwap {
    WeightedSwap {
        from_asset: from,
        amount_in: U256::ZERO,
        to_asset: to,
        weights: (1..=PARTS).map(U256::from).collect(),
        adapters: vec![*CPMM; PARTS as usize],
        pools: (0..PARTS).map(|part| pool(branch, hop, part)).collect(),
        pool_editions: vec![0; PARTS as usize],
        recipient: Address::ZERO,
    }
}

fn setup() -> eyre::Result<(Ledger, AdapterRegistry, LinearWeightedSwap)> {
    let mut ledger = Ledger::new(0);
    let mut registry = AdapterRegistry::new();
    registry.register(ConstantProductAdapter::new(*CPMM, PoolEdition::PreFunded, 30));

    let mut weighted_swaps = Vec::new();
    for branch in 0..BRANCHES {
        for hop in 0..2 {
            for part in 0..PARTS {
                for token in [*TOKEN_IN, *TOKEN_MID, *TOKEN_OUT] {
                    ledger.mint(token, pool(branch, hop, part), U256::from(10u64.pow(24)))?;
                }
            }
        }
        weighted_swaps.push(vec![split(branch, 0, *TOKEN_IN, *TOKEN_MID), split(branch, 1, *TOKEN_MID, *TOKEN_OUT)]);
    }

    let plan = LinearWeightedSwap {
        from_asset: *TOKEN_IN,
        amount_in: U256::from(10u64.pow(20)),
        to_asset: *TOKEN_OUT,
        weights: (1..=BRANCHES).map(U256::from).collect(),
        weighted_swaps,
        recipient: Address::ZERO,
    };
    Ok((ledger, registry, plan))
}

fn benchmark_quote_linear_plan(c: &mut Criterion) {
    let Ok((ledger, registry, plan)) = setup() else {
        return;
    };
    let quoter = Quoter::new(&ledger, &registry, WMNT);

    let mut group = c.benchmark_group("quoter");
    group.sample_size(50);
    group.bench_function("calc_linear_plan_8x2x4", |b| b.iter(|| quoter.calc_linear_plan(&plan)));
    group.finish();
}

criterion_group!(benches, benchmark_quote_linear_plan);
criterion_main!(benches);

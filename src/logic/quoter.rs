use super::amounts::{LinearAmounts, PathAmounts, SplitAmounts};
use super::traversal::{HopExecutor, walk_linear, walk_sequential, walk_split, walk_weighted_path};
use super::types::{HopCall, LinearWeightedSwap, Swap, WeightedSwap};
use super::validator::{check_linear_plan, check_sequential, check_split, check_weighted_path};
use crate::adapters::{AdapterRegistry, AdapterWrapper, PoolEdition};
use crate::constants::NATIVE;
use crate::errors::{RouterError, RouterResult};
use crate::state::Ledger;
use alloy_primitives::{Address, U256};
use tracing::trace;

/// Asset identities the adapter sees for a hop. Edition-0 pools only hold the wrapped form.
pub(crate) fn adapter_assets(call: &HopCall, edition: PoolEdition, wrapped_native: Address) -> (Address, Address) {
    let wrap = |asset: Address| if edition == PoolEdition::PreFunded && asset == NATIVE { wrapped_native } else { asset };
    (wrap(call.from_asset), wrap(call.to_asset))
}

pub(crate) fn resolve_adapter<'a>(adapters: &'a AdapterRegistry, call: &HopCall) -> RouterResult<&'a AdapterWrapper> {
    adapters.get(&call.adapter).ok_or(RouterError::UnknownAdapter(call.adapter))
}

/// Amount-calculation engine: read-only simulation of a plan through adapter quotes.
///
/// Produces exactly what [`crate::execution::Executor`] realizes for the same plan and state,
/// because both are driven by the same walkers.
#[derive(Clone, Copy)]
pub struct Quoter<'a> {
    state: &'a Ledger,
    adapters: &'a AdapterRegistry,
    wrapped_native: Address,
}

impl<'a> Quoter<'a> {
    pub fn new(state: &'a Ledger, adapters: &'a AdapterRegistry, wrapped_native: Address) -> Self {
        Self { state, adapters, wrapped_native }
    }

    /// `N + 1` cumulative amounts for `N` hops, starting from the first hop's `amount_in`.
    pub fn calc_sequential_hops(&self, path: &[Swap]) -> RouterResult<Vec<U256>> {
        check_sequential(path)?;
        let mut quoter = *self;
        walk_sequential(&mut quoter, path, path[0].amount_in, None)
    }

    pub fn calc_weighted_split(&self, split: &WeightedSwap) -> RouterResult<U256> {
        Ok(self.calc_weighted_split_detailed(split)?.amount_out)
    }

    pub fn calc_weighted_split_detailed(&self, split: &WeightedSwap) -> RouterResult<SplitAmounts> {
        check_split(split)?;
        let mut quoter = *self;
        walk_split(&mut quoter, split, split.amount_in, split.recipient)
    }

    pub fn calc_weighted_path(&self, path: &[WeightedSwap]) -> RouterResult<Vec<U256>> {
        Ok(self.calc_weighted_path_detailed(path)?.amounts)
    }

    pub fn calc_weighted_path_detailed(&self, path: &[WeightedSwap]) -> RouterResult<PathAmounts> {
        check_weighted_path(path)?;
        let mut quoter = *self;
        walk_weighted_path(&mut quoter, path, path[0].amount_in, None)
    }

    pub fn calc_linear_plan(&self, plan: &LinearWeightedSwap) -> RouterResult<U256> {
        Ok(self.calc_linear_plan_detailed(plan)?.amount_out)
    }

    pub fn calc_linear_plan_detailed(&self, plan: &LinearWeightedSwap) -> RouterResult<LinearAmounts> {
        check_linear_plan(plan)?;
        let mut quoter = *self;
        walk_linear(&mut quoter, plan, None)
    }
}

impl HopExecutor for Quoter<'_> {
    fn execute_hop(&mut self, call: &HopCall) -> RouterResult<U256> {
        let edition = call.edition()?;
        let adapter = resolve_adapter(self.adapters, call)?;
        let (from, to) = adapter_assets(call, edition, self.wrapped_native);

        let amount_out = adapter.quote(self.state, from, call.amount_in, to, call.pool)?;
        trace!(pool = %call.pool, %from, %to, amount_in = %call.amount_in, %amount_out, "quoted hop");
        Ok(amount_out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{ConstantProductAdapter, FixedRateAdapter};
    use crate::constants::WMNT;

    const A: Address = Address::repeat_byte(0x0a);
    const B: Address = Address::repeat_byte(0x0b);
    const C: Address = Address::repeat_byte(0x0c);
    const RATE_19_10: Address = Address::repeat_byte(0xa1);
    const RATE_15_10: Address = Address::repeat_byte(0xa2);
    const CPMM: Address = Address::repeat_byte(0xa3);

    fn registry() -> AdapterRegistry {
        let mut registry = AdapterRegistry::new();
        registry.register(FixedRateAdapter::new(RATE_19_10, PoolEdition::PreFunded, 19, 10));
        registry.register(FixedRateAdapter::new(RATE_15_10, PoolEdition::PreFunded, 15, 10));
        registry.register(ConstantProductAdapter::new(CPMM, PoolEdition::PreFunded, 0));
        registry
    }

    fn hop(from: Address, to: Address, adapter: Address, amount_in: u64) -> Swap {
        Swap {
            from_asset: from,
            amount_in: U256::from(amount_in),
            to_asset: to,
            adapter,
            pool: Address::repeat_byte(0x50),
            pool_edition: 0,
            recipient: Address::ZERO,
        }
    }

    #[test]
    fn test_calc_sequential_hops() -> eyre::Result<()> {
        let ledger = Ledger::new(0);
        let registry = registry();
        let quoter = Quoter::new(&ledger, &registry, WMNT);

        let amounts = quoter.calc_sequential_hops(&[hop(A, B, RATE_19_10, 1000), hop(B, C, RATE_15_10, 0)])?;
        assert_eq!(amounts, vec![U256::from(1000), U256::from(1900), U256::from(2850)]);
        Ok(())
    }

    #[test]
    fn test_calc_rejects_discontinuity_and_bad_edition() {
        let ledger = Ledger::new(0);
        let registry = registry();
        let quoter = Quoter::new(&ledger, &registry, WMNT);

        let err = quoter.calc_sequential_hops(&[hop(A, B, RATE_19_10, 1000), hop(C, A, RATE_15_10, 0)]).unwrap_err();
        assert!(matches!(err, RouterError::PathDiscontinuity { .. }));

        let mut bad = hop(A, B, RATE_19_10, 1000);
        bad.pool_edition = 2;
        assert!(matches!(quoter.calc_sequential_hops(&[bad]), Err(RouterError::UnsupportedPoolEdition(2))));

        let unknown = hop(A, B, Address::repeat_byte(0xff), 1000);
        assert!(matches!(quoter.calc_sequential_hops(&[unknown]), Err(RouterError::UnknownAdapter(_))));
    }

    #[test]
    fn test_calc_weighted_split_sums_parts() -> eyre::Result<()> {
        let ledger = Ledger::new(0);
        let registry = registry();
        let quoter = Quoter::new(&ledger, &registry, WMNT);

        let split = WeightedSwap {
            from_asset: A,
            amount_in: U256::from(1001),
            to_asset: B,
            weights: vec![U256::from(50), U256::from(30), U256::from(20)],
            adapters: vec![RATE_19_10, RATE_15_10, RATE_19_10],
            pools: vec![Address::repeat_byte(0x51), Address::repeat_byte(0x52), Address::repeat_byte(0x53)],
            pool_editions: vec![0, 0, 0],
            recipient: Address::ZERO,
        };
        let detailed = quoter.calc_weighted_split_detailed(&split)?;
        assert_eq!(detailed.parts, vec![U256::from(500), U256::from(300), U256::from(201)]);
        // 950 + 450 + 381
        assert_eq!(detailed.amount_out, U256::from(1781));
        assert_eq!(quoter.calc_weighted_split(&split)?, U256::from(1781));
        Ok(())
    }

    #[test]
    fn test_native_is_quoted_as_wrapped_on_prefunded_pools() -> eyre::Result<()> {
        let pool = Address::repeat_byte(0x50);
        let mut ledger = Ledger::new(0);
        ledger.mint(WMNT, pool, U256::from(1_000_000))?;
        ledger.mint(B, pool, U256::from(1_000_000))?;
        let registry = registry();
        let quoter = Quoter::new(&ledger, &registry, WMNT);

        let native_hop = hop(NATIVE, B, CPMM, 1000);
        let wrapped_hop = hop(WMNT, B, CPMM, 1000);
        assert_eq!(quoter.calc_sequential_hops(&[native_hop])?, quoter.calc_sequential_hops(&[wrapped_hop])?);
        Ok(())
    }
}

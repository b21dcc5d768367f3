//! Plan traversal shared by quoting and execution.
//!
//! The walkers below own all control flow and arithmetic: ordering, weighted splitting,
//! chaining outputs into inputs and summing branches. What happens at a leaf is delegated to a
//! [`HopExecutor`], so a quote and an execution of the same plan cannot take different routes.
//!
//! An executing engine passes its own address as `engine`: every hop then pays the engine,
//! which funds the next hop from exactly what it received. A hop's own `recipient` is only
//! honored when no engine collects, i.e. when quoting.

use super::amounts::{LinearAmounts, PathAmounts, SplitAmounts};
use super::split::split_by_weights;
use super::types::{HopCall, LinearWeightedSwap, Swap, WeightedSwap};
use crate::errors::{RouterError, RouterResult};
use alloy_primitives::{Address, U256};

pub trait HopExecutor {
    /// Perform (or simulate) one leaf hop and return its output amount.
    fn execute_hop(&mut self, call: &HopCall) -> RouterResult<U256>;
}

fn recipient_for(own: Address, engine: Option<Address>) -> Address {
    engine.unwrap_or(own)
}

/// Walk hops in order; returns `N + 1` cumulative amounts for `N` hops.
pub fn walk_sequential<E: HopExecutor + ?Sized>(
    executor: &mut E,
    path: &[Swap],
    amount_in: U256,
    engine: Option<Address>,
) -> RouterResult<Vec<U256>> {
    let mut amounts = Vec::with_capacity(path.len() + 1);
    amounts.push(amount_in);

    let mut amount = amount_in;
    for hop in path {
        amount = executor.execute_hop(&hop.hop_call(amount, recipient_for(hop.recipient, engine)))?;
        amounts.push(amount);
    }

    Ok(amounts)
}

/// Route weighted parts of `amount_in` through the split's pools in array order.
pub fn walk_split<E: HopExecutor + ?Sized>(
    executor: &mut E,
    split: &WeightedSwap,
    amount_in: U256,
    recipient: Address,
) -> RouterResult<SplitAmounts> {
    let parts = split_by_weights(amount_in, &split.weights)?;

    let mut outputs = Vec::with_capacity(parts.len());
    let mut amount_out = U256::ZERO;
    for (index, part) in parts.iter().enumerate() {
        let output = if part.is_zero() { U256::ZERO } else { executor.execute_hop(&split.hop_call(index, *part, recipient))? };
        amount_out = amount_out.checked_add(output).ok_or(RouterError::ArithmeticOverflow("summing split outputs"))?;
        outputs.push(output);
    }

    Ok(SplitAmounts { parts, outputs, amount_out })
}

pub fn walk_weighted_path<E: HopExecutor + ?Sized>(
    executor: &mut E,
    path: &[WeightedSwap],
    amount_in: U256,
    engine: Option<Address>,
) -> RouterResult<PathAmounts> {
    let mut amounts = Vec::with_capacity(path.len() + 1);
    let mut splits = Vec::with_capacity(path.len());
    amounts.push(amount_in);

    let mut amount = amount_in;
    for split in path {
        let split_amounts = walk_split(executor, split, amount, recipient_for(split.recipient, engine))?;
        amount = split_amounts.amount_out;
        amounts.push(amount);
        splits.push(split_amounts);
    }

    Ok(PathAmounts { amounts, splits })
}

/// Split the plan input over its branches, walk each branch to the end and sum the outputs.
pub fn walk_linear<E: HopExecutor + ?Sized>(
    executor: &mut E,
    plan: &LinearWeightedSwap,
    engine: Option<Address>,
) -> RouterResult<LinearAmounts> {
    let branch_inputs = split_by_weights(plan.amount_in, &plan.weights)?;

    let mut branches = Vec::with_capacity(branch_inputs.len());
    let mut amount_out = U256::ZERO;
    for (path, branch_in) in plan.weighted_swaps.iter().zip(branch_inputs.iter()) {
        let branch = walk_weighted_path(executor, path, *branch_in, engine)?;
        amount_out = amount_out.checked_add(branch.amount_out()).ok_or(RouterError::ArithmeticOverflow("summing branch outputs"))?;
        branches.push(branch);
    }

    Ok(LinearAmounts { branch_inputs, branches, amount_out })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every leaf call and doubles the amount.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<HopCall>,
    }

    impl HopExecutor for Recorder {
        fn execute_hop(&mut self, call: &HopCall) -> RouterResult<U256> {
            self.calls.push(*call);
            Ok(call.amount_in * U256::from(2))
        }
    }

    const A: Address = Address::repeat_byte(0x0a);
    const B: Address = Address::repeat_byte(0x0b);
    const C: Address = Address::repeat_byte(0x0c);
    const HOP_RECIPIENT: Address = Address::repeat_byte(0x77);
    const ROUTER: Address = Address::repeat_byte(0x99);

    fn split(from: Address, to: Address, weights: &[u64]) -> WeightedSwap {
        WeightedSwap {
            from_asset: from,
            amount_in: U256::ZERO,
            to_asset: to,
            weights: weights.iter().map(|w| U256::from(*w)).collect(),
            adapters: (0..weights.len()).map(|i| Address::repeat_byte(0xa0 + i as u8)).collect(),
            pools: (0..weights.len()).map(|i| Address::repeat_byte(0x50 + i as u8)).collect(),
            pool_editions: vec![0; weights.len()],
            recipient: HOP_RECIPIENT,
        }
    }

    #[test]
    fn test_sequential_chains_outputs_through_the_engine() -> eyre::Result<()> {
        let hop = |from, to| Swap {
            from_asset: from,
            amount_in: U256::from(999),
            to_asset: to,
            adapter: Address::ZERO,
            pool: Address::ZERO,
            pool_edition: 0,
            recipient: HOP_RECIPIENT,
        };
        let mut recorder = Recorder::default();
        let amounts = walk_sequential(&mut recorder, &[hop(A, B), hop(B, C)], U256::from(10), Some(ROUTER))?;

        assert_eq!(amounts, vec![U256::from(10), U256::from(20), U256::from(40)]);
        assert_eq!(recorder.calls[0].amount_in, U256::from(10));
        // a hop may not pay out mid-path while the engine funds the next one
        assert!(recorder.calls.iter().all(|c| c.recipient == ROUTER));

        let mut quoting = Recorder::default();
        walk_sequential(&mut quoting, &[hop(A, B), hop(B, C)], U256::from(10), None)?;
        assert!(quoting.calls.iter().all(|c| c.recipient == HOP_RECIPIENT));
        Ok(())
    }

    #[test]
    fn test_split_visits_branches_in_order_and_skips_empty_parts() -> eyre::Result<()> {
        let mut recorder = Recorder::default();
        let amounts = walk_split(&mut recorder, &split(A, B, &[50, 0, 30, 20]), U256::from(1001), ROUTER)?;

        assert_eq!(amounts.parts, vec![U256::from(500), U256::ZERO, U256::from(300), U256::from(201)]);
        assert_eq!(amounts.amount_out, U256::from(2002));
        let pools: Vec<Address> = recorder.calls.iter().map(|c| c.pool).collect();
        assert_eq!(pools, vec![Address::repeat_byte(0x50), Address::repeat_byte(0x52), Address::repeat_byte(0x53)]);
        Ok(())
    }

    #[test]
    fn test_linear_sums_branches() -> eyre::Result<()> {
        let plan = LinearWeightedSwap {
            from_asset: A,
            amount_in: U256::from(100),
            to_asset: C,
            weights: vec![U256::from(3), U256::from(1)],
            weighted_swaps: vec![vec![split(A, B, &[1]), split(B, C, &[1, 1])], vec![split(A, C, &[1])]],
            recipient: HOP_RECIPIENT,
        };
        let mut recorder = Recorder::default();
        let amounts = walk_linear(&mut recorder, &plan, Some(ROUTER))?;

        assert_eq!(amounts.branch_inputs, vec![U256::from(75), U256::from(25)]);
        // branch 0: 75 -> 150 -> (75 + 75) * 2 = 300, branch 1: 25 -> 50
        assert_eq!(amounts.branches[0].amount_out(), U256::from(300));
        assert_eq!(amounts.branches[1].amount_out(), U256::from(50));
        assert_eq!(amounts.amount_out, U256::from(350));

        assert!(recorder.calls.iter().all(|c| c.recipient == ROUTER));
        Ok(())
    }
}

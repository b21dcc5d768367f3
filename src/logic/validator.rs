use super::types::{FlashLoanDes, LinearWeightedSwap, Swap, TradeParams, WeightedSwap};
use crate::constants::NATIVE;
use crate::errors::{RouterError, RouterResult};
use alloy_primitives::{Address, U256};

/// Hop `i` must deliver exactly what hop `i + 1` consumes.
pub fn check_sequential(path: &[Swap]) -> RouterResult<()> {
    if path.is_empty() {
        return Err(RouterError::EmptyPlan);
    }
    for (index, pair) in path.windows(2).enumerate() {
        if pair[0].to_asset != pair[1].from_asset {
            return Err(RouterError::PathDiscontinuity { index, to: pair[0].to_asset, next_from: pair[1].from_asset });
        }
    }
    Ok(())
}

pub fn check_split(split: &WeightedSwap) -> RouterResult<()> {
    let n = split.weights.len();
    if split.adapters.len() != n || split.pools.len() != n || split.pool_editions.len() != n {
        return Err(RouterError::ArityMismatch(format!(
            "weights={} adapters={} pools={} editions={}",
            n,
            split.adapters.len(),
            split.pools.len(),
            split.pool_editions.len()
        )));
    }
    if n == 0 {
        return Err(RouterError::EmptyPlan);
    }
    Ok(())
}

pub fn check_weighted_path(path: &[WeightedSwap]) -> RouterResult<()> {
    if path.is_empty() {
        return Err(RouterError::EmptyPlan);
    }
    for split in path {
        check_split(split)?;
    }
    for (index, pair) in path.windows(2).enumerate() {
        if pair[0].to_asset != pair[1].from_asset {
            return Err(RouterError::PathDiscontinuity { index, to: pair[0].to_asset, next_from: pair[1].from_asset });
        }
    }
    Ok(())
}

pub fn check_linear_plan(plan: &LinearWeightedSwap) -> RouterResult<()> {
    if plan.weights.len() != plan.weighted_swaps.len() {
        return Err(RouterError::ArityMismatch(format!(
            "weights={} branches={}",
            plan.weights.len(),
            plan.weighted_swaps.len()
        )));
    }
    if plan.weighted_swaps.is_empty() {
        return Err(RouterError::EmptyPlan);
    }
    for (branch, path) in plan.weighted_swaps.iter().enumerate() {
        let endpoints = path.first().map(|s| s.from_asset).zip(path.last().map(|s| s.to_asset));
        if endpoints != Some((plan.from_asset, plan.to_asset)) {
            return Err(RouterError::BranchEndpointMismatch {
                branch,
                expected_from: plan.from_asset,
                expected_to: plan.to_asset,
            });
        }
        check_weighted_path(path)?;
    }
    Ok(())
}

/// A flash-loan candidate must be a closed loop on its asset, funded by exactly the borrowed amount.
pub fn check_cycle(des: &FlashLoanDes) -> RouterResult<()> {
    check_sequential(&des.swaps)?;
    let (first, last) = match (des.swaps.first(), des.swaps.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(RouterError::EmptyPlan),
    };
    if first.from_asset != des.asset {
        return Err(RouterError::endpoint("cycle start", des.asset, first.from_asset));
    }
    if last.to_asset != des.asset {
        return Err(RouterError::endpoint("cycle end", des.asset, last.to_asset));
    }
    if first.amount_in != des.amount_in {
        return Err(RouterError::endpoint("cycle amount_in", des.amount_in, first.amount_in));
    }
    Ok(())
}

/// Entry checks shared by every fund-moving operation: endpoints, minimum return, deadline.
pub fn check_entry(
    params: &TradeParams,
    wrapped_native: Address,
    plan_from: Address,
    plan_amount_in: U256,
    plan_to: Address,
    now: u64,
) -> RouterResult<()> {
    let expected_from = routed_asset(params.from_asset, params.native_legs.input, wrapped_native, "from_asset")?;
    let expected_to = routed_asset(params.to_asset, params.native_legs.output, wrapped_native, "to_asset")?;

    if expected_from != plan_from {
        return Err(RouterError::endpoint("from_asset", expected_from, plan_from));
    }
    if params.amount_in != plan_amount_in {
        return Err(RouterError::endpoint("amount_in", params.amount_in, plan_amount_in));
    }
    if expected_to != plan_to {
        return Err(RouterError::endpoint("to_asset", expected_to, plan_to));
    }
    if params.min_return.is_zero() {
        return Err(RouterError::ZeroMinimumOutput);
    }
    if now > params.deadline {
        return Err(RouterError::DeadlineExpired { deadline: params.deadline, now });
    }
    Ok(())
}

/// The asset identity a leg carries inside the plan. A flagged leg is declared native and routed wrapped.
pub fn routed_asset(declared: Address, native_leg: bool, wrapped_native: Address, field: &'static str) -> RouterResult<Address> {
    if !native_leg {
        return Ok(declared);
    }
    if declared != NATIVE {
        return Err(RouterError::endpoint(field, declared, NATIVE));
    }
    Ok(wrapped_native)
}

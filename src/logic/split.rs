use crate::errors::{RouterError, RouterResult};
use alloy_primitives::U256;

/// Divide `amount` by `weights`, normalized by their own sum.
///
/// Every part but the last is `floor(amount * w / total)`; the last takes whatever is left,
/// so the parts always add up to `amount` exactly.
pub fn split_by_weights(amount: U256, weights: &[U256]) -> RouterResult<Vec<U256>> {
    if weights.is_empty() {
        return Err(RouterError::EmptyPlan);
    }

    let mut total_weight = U256::ZERO;
    for weight in weights {
        total_weight = total_weight.checked_add(*weight).ok_or(RouterError::ArithmeticOverflow("summing weights"))?;
    }
    if total_weight.is_zero() {
        return Err(RouterError::ZeroTotalWeight);
    }

    let mut parts = Vec::with_capacity(weights.len());
    let mut remaining = amount;
    for weight in &weights[..weights.len() - 1] {
        let part = amount.checked_mul(*weight).ok_or(RouterError::ArithmeticOverflow("splitting amount"))? / total_weight;
        remaining -= part;
        parts.push(part);
    }
    parts.push(remaining);

    Ok(parts)
}

use super::types::{LinearWeightedSwap, Swap, WeightedSwap};
use alloy_primitives::hex;
use sha2::digest::Update;
use sha2::{Digest, Sha256};
use std::fmt::{Debug, Display};

/// Stable identifier of a plan's routing: assets, adapters, pools, editions and recipients.
/// Amounts are left out. Correlates log lines and binds a loan to the cycle it was taken for.
#[derive(Clone, Default, Eq, PartialEq, Hash)]
pub struct PlanHash(pub [u8; 32]);

impl Display for PlanHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode_prefixed(self.0))
    }
}

impl Debug for PlanHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PlanHash({})", hex::encode_prefixed(self.0))
    }
}

impl PlanHash {
    pub fn of_path(path: &[Swap]) -> Self {
        let mut hasher = Sha256::new();
        hash_path(&mut hasher, path);
        PlanHash(hasher.finalize().into())
    }

    pub fn of_weighted_path(path: &[WeightedSwap]) -> Self {
        let mut hasher = Sha256::new();
        hash_weighted_path(&mut hasher, path);
        PlanHash(hasher.finalize().into())
    }

    pub fn of_linear_plan(plan: &LinearWeightedSwap) -> Self {
        let mut hasher = Sha256::new();
        Update::update(&mut hasher, plan.from_asset.as_slice());
        Update::update(&mut hasher, plan.to_asset.as_slice());
        for branch in &plan.weighted_swaps {
            hash_weighted_path(&mut hasher, branch);
        }
        PlanHash(hasher.finalize().into())
    }
}

fn hash_path(hasher: &mut Sha256, path: &[Swap]) {
    for hop in path {
        Update::update(hasher, hop.from_asset.as_slice());
        Update::update(hasher, hop.to_asset.as_slice());
        Update::update(hasher, hop.adapter.as_slice());
        Update::update(hasher, hop.pool.as_slice());
        Update::update(hasher, &[hop.pool_edition]);
        Update::update(hasher, hop.recipient.as_slice());
    }
}

fn hash_weighted_path(hasher: &mut Sha256, path: &[WeightedSwap]) {
    for split in path {
        Update::update(hasher, split.from_asset.as_slice());
        Update::update(hasher, split.to_asset.as_slice());
        for ((adapter, pool), edition) in split.adapters.iter().zip(split.pools.iter()).zip(split.pool_editions.iter()) {
            Update::update(hasher, adapter.as_slice());
            Update::update(hasher, pool.as_slice());
            Update::update(hasher, &[*edition]);
        }
        Update::update(hasher, split.recipient.as_slice());
    }
}

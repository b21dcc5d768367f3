use crate::adapters::PoolEdition;
use crate::errors::{RouterError, RouterResult};
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// One exchange of `from_asset` for `to_asset` through one pool.
///
/// `amount_in` is only authoritative on the first hop of a path; later hops are fed the
/// previous hop's output by the traversal and the field is left untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swap {
    pub from_asset: Address,
    pub amount_in: U256,
    pub to_asset: Address,
    pub adapter: Address,
    pub pool: Address,
    pub pool_edition: u8,
    pub recipient: Address,
}

impl Swap {
    pub(crate) fn hop_call(&self, amount_in: U256, recipient: Address) -> HopCall {
        HopCall {
            from_asset: self.from_asset,
            amount_in,
            to_asset: self.to_asset,
            adapter: self.adapter,
            pool: self.pool,
            pool_edition: self.pool_edition,
            recipient,
        }
    }
}

/// One logical hop realized through several parallel pools, weighted by `weights`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedSwap {
    pub from_asset: Address,
    pub amount_in: U256,
    pub to_asset: Address,
    pub weights: Vec<U256>,
    pub adapters: Vec<Address>,
    pub pools: Vec<Address>,
    pub pool_editions: Vec<u8>,
    pub recipient: Address,
}

impl WeightedSwap {
    pub(crate) fn hop_call(&self, index: usize, amount_in: U256, recipient: Address) -> HopCall {
        HopCall {
            from_asset: self.from_asset,
            amount_in,
            to_asset: self.to_asset,
            adapter: self.adapters[index],
            pool: self.pools[index],
            pool_edition: self.pool_editions[index],
            recipient,
        }
    }
}

/// Top-level plan: `amount_in` split by `weights` over independent weighted paths
/// that all run `from_asset -> to_asset`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearWeightedSwap {
    pub from_asset: Address,
    pub amount_in: U256,
    pub to_asset: Address,
    pub weights: Vec<U256>,
    pub weighted_swaps: Vec<Vec<WeightedSwap>>,
    pub recipient: Address,
}

/// A candidate arbitrage cycle: borrow `amount_in` of `asset` and run it around `swaps`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashLoanDes {
    pub asset: Address,
    pub amount_in: U256,
    pub swaps: Vec<Swap>,
}

/// A single leaf call handed to a [`crate::logic::HopExecutor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HopCall {
    pub from_asset: Address,
    pub amount_in: U256,
    pub to_asset: Address,
    pub adapter: Address,
    pub pool: Address,
    pub pool_edition: u8,
    pub recipient: Address,
}

impl HopCall {
    pub fn edition(&self) -> RouterResult<PoolEdition> {
        PoolEdition::try_from(self.pool_edition).map_err(RouterError::UnsupportedPoolEdition)
    }
}

/// Which legs of a trade are the native asset on the outside while routed as the wrapped token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeLegs {
    pub input: bool,
    pub output: bool,
}

impl From<[bool; 2]> for NativeLegs {
    fn from(flags: [bool; 2]) -> Self {
        Self { input: flags[0], output: flags[1] }
    }
}

/// What the caller declares about a trade, checked against the plan before funds move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeParams {
    pub from_asset: Address,
    pub amount_in: U256,
    pub to_asset: Address,
    pub min_return: U256,
    pub deadline: u64,
    #[serde(default)]
    pub native_legs: NativeLegs,
}

/// The caller of an entry operation and the native value attached to the call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallContext {
    pub caller: Address,
    pub value: U256,
}

impl CallContext {
    pub fn new(caller: Address) -> Self {
        Self { caller, value: U256::ZERO }
    }

    pub fn with_value(self, value: U256) -> Self {
        Self { value, ..self }
    }
}

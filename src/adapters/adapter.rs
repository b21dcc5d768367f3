use crate::state::{Ledger, LedgerError};
use ahash::AHashMap;
use alloy_primitives::{Address, U256};
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;
use strum_macros::Display;

#[derive(Copy, Clone, Debug, Display, PartialEq, Hash, Eq, Default)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AdapterProtocol {
    #[default]
    Unknown,
    ConstantProduct,
    FixedRate,
}

/// How a hop's input reaches the pool before the adapter is invoked.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PoolEdition {
    /// Edition 0: the router transfers the input straight to the pool, which expects to be pre-funded.
    PreFunded,
    /// Edition 1: the router transfers the input to the adapter, which settles with the pool itself.
    AdapterPull,
}

impl TryFrom<u8> for PoolEdition {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PoolEdition::PreFunded),
            1 => Ok(PoolEdition::AdapterPull),
            other => Err(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AdapterError {
    #[error("pool {pool} does not trade {from} -> {to}")]
    UnsupportedPair { pool: Address, from: Address, to: Address },
    #[error("pool {pool} was not funded with {asset}")]
    NotFunded { pool: Address, asset: Address },
    #[error("pool {0} has no liquidity")]
    NoLiquidity(Address),
    #[error("arithmetic overflow in pool {0}")]
    Overflow(Address),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("adapter error report: {0}")]
    Error(#[from] eyre::Report),
}

/// Uniform quoting and swapping capability over one family of pools.
///
/// `quote` must not touch state. `swap` is called after the router has funded the pool
/// (edition 0) or the adapter (edition 1) with exactly `amount_in` of `from`, and must pay
/// the realized output to `recipient`.
pub trait PoolAdapter: Send + Sync {
    fn get_protocol(&self) -> AdapterProtocol {
        AdapterProtocol::Unknown
    }

    fn get_address(&self) -> Address;

    fn quote(&self, state: &Ledger, from: Address, amount_in: U256, to: Address, pool: Address) -> Result<U256, AdapterError>;

    fn swap(
        &self,
        state: &mut Ledger,
        from: Address,
        amount_in: U256,
        to: Address,
        pool: Address,
        recipient: Address,
    ) -> Result<U256, AdapterError>;
}

pub struct AdapterWrapper {
    pub adapter: Arc<dyn PoolAdapter>,
}

impl AdapterWrapper {
    pub fn new(adapter: Arc<dyn PoolAdapter>) -> Self {
        AdapterWrapper { adapter }
    }
}

impl PartialOrd for AdapterWrapper {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for AdapterWrapper {}

impl Ord for AdapterWrapper {
    fn cmp(&self, other: &Self) -> Ordering {
        self.get_address().cmp(&other.get_address())
    }
}

impl Display for AdapterWrapper {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{:#}", self.get_protocol(), self.get_address())
    }
}

impl Debug for AdapterWrapper {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{:?}", self.get_protocol(), self.get_address())
    }
}

impl Hash for AdapterWrapper {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.get_address().hash(state)
    }
}

impl PartialEq for AdapterWrapper {
    fn eq(&self, other: &Self) -> bool {
        self.adapter.get_address() == other.adapter.get_address()
    }
}

impl Clone for AdapterWrapper {
    fn clone(&self) -> Self {
        Self { adapter: self.adapter.clone() }
    }
}

impl Deref for AdapterWrapper {
    type Target = dyn PoolAdapter;

    fn deref(&self) -> &Self::Target {
        self.adapter.deref()
    }
}

impl<T: 'static + PoolAdapter> From<T> for AdapterWrapper {
    fn from(adapter: T) -> Self {
        Self { adapter: Arc::new(adapter) }
    }
}

/// Resolves the `adapter` address carried by each hop.
#[derive(Clone, Debug, Default)]
pub struct AdapterRegistry {
    adapters: AHashMap<Address, AdapterWrapper>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter under its own address, replacing any previous one.
    pub fn register<A: Into<AdapterWrapper>>(&mut self, adapter: A) -> Option<AdapterWrapper> {
        let adapter = adapter.into();
        self.adapters.insert(adapter.get_address(), adapter)
    }

    pub fn get(&self, address: &Address) -> Option<&AdapterWrapper> {
        self.adapters.get(address)
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

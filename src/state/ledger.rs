use ahash::AHashMap;
use alloy_primitives::{Address, U256};
use std::fmt::{Debug, Formatter};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient balance of {asset} at {holder}: have {available}, need {required}")]
    InsufficientBalance { asset: Address, holder: Address, available: U256, required: U256 },
    #[error("insufficient allowance of {asset} from {owner} to {spender}: have {available}, need {required}")]
    InsufficientAllowance { asset: Address, owner: Address, spender: Address, available: U256, required: U256 },
    #[error("balance overflow of {asset} at {holder}")]
    Overflow { asset: Address, holder: Address },
}

/// Balances, allowances and chain time seen by the router, its adapters and its lender.
///
/// The native asset lives under [`crate::NATIVE`]. Every asset movement of a routing call goes
/// through one `Ledger`, so a [`LedgerSnapshot`] taken on entry is enough to undo a failed call.
#[derive(Clone, Default)]
pub struct Ledger {
    balances: AHashMap<(Address, Address), U256>,
    allowances: AHashMap<(Address, Address, Address), U256>,
    block_timestamp: u64,
}

/// Opaque copy of a [`Ledger`] taken before a fallible, fund-moving step.
#[derive(Clone)]
pub struct LedgerSnapshot(Ledger);

impl Debug for Ledger {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("balances", &self.balances.len())
            .field("allowances", &self.allowances.len())
            .field("block_timestamp", &self.block_timestamp)
            .finish()
    }
}

impl Ledger {
    pub fn new(block_timestamp: u64) -> Self {
        Self { block_timestamp, ..Self::default() }
    }

    pub fn block_timestamp(&self) -> u64 {
        self.block_timestamp
    }

    pub fn set_block_timestamp(&mut self, block_timestamp: u64) {
        self.block_timestamp = block_timestamp;
    }

    pub fn balance_of(&self, asset: Address, holder: Address) -> U256 {
        self.balances.get(&(asset, holder)).copied().unwrap_or_default()
    }

    /// Credit `amount` out of thin air. Used to seed pools, lenders and traders.
    pub fn mint(&mut self, asset: Address, holder: Address, amount: U256) -> Result<(), LedgerError> {
        let balance = self.balances.entry((asset, holder)).or_default();
        *balance = balance.checked_add(amount).ok_or(LedgerError::Overflow { asset, holder })?;
        Ok(())
    }

    /// Debit `amount` and destroy it. Counterpart of [`Ledger::mint`] for wrapped-token withdrawals.
    pub fn burn(&mut self, asset: Address, holder: Address, amount: U256) -> Result<(), LedgerError> {
        self.debit(asset, holder, amount)
    }

    pub fn transfer(&mut self, asset: Address, from: Address, to: Address, amount: U256) -> Result<(), LedgerError> {
        if amount.is_zero() || from == to {
            // a self transfer still has to be covered
            let available = self.balance_of(asset, from);
            if available < amount {
                return Err(LedgerError::InsufficientBalance { asset, holder: from, available, required: amount });
            }
            return Ok(());
        }
        self.debit(asset, from, amount)?;
        self.mint(asset, to, amount)
    }

    pub fn approve(&mut self, asset: Address, owner: Address, spender: Address, amount: U256) {
        self.allowances.insert((asset, owner, spender), amount);
    }

    pub fn allowance(&self, asset: Address, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(asset, owner, spender)).copied().unwrap_or_default()
    }

    /// Move `amount` from `owner` to `to` on behalf of `spender`, consuming allowance.
    pub fn transfer_from(
        &mut self,
        asset: Address,
        spender: Address,
        owner: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        let available = self.allowance(asset, owner, spender);
        if available < amount {
            return Err(LedgerError::InsufficientAllowance { asset, owner, spender, available, required: amount });
        }
        self.transfer(asset, owner, to, amount)?;
        if available != U256::MAX {
            self.allowances.insert((asset, owner, spender), available - amount);
        }
        Ok(())
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot(self.clone())
    }

    pub fn restore(&mut self, snapshot: LedgerSnapshot) {
        *self = snapshot.0;
    }

    fn debit(&mut self, asset: Address, holder: Address, amount: U256) -> Result<(), LedgerError> {
        let available = self.balance_of(asset, holder);
        if available < amount {
            return Err(LedgerError::InsufficientBalance { asset, holder, available, required: amount });
        }
        self.balances.insert((asset, holder), available - amount);
        Ok(())
    }
}

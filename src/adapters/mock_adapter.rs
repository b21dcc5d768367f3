use super::adapter::{AdapterError, AdapterProtocol, PoolAdapter, PoolEdition};
use crate::constants::BPS_BASE;
use crate::state::Ledger;
use alloy_primitives::{Address, U256};

/// x*y=k adapter whose reserves are the pool's own ledger balances.
#[derive(Clone, Debug)]
pub struct ConstantProductAdapter {
    pub address: Address,
    pub edition: PoolEdition,
    /// Fee in basis points, e.g. 30 for 0.3%.
    pub fee_bps: u64,
}

impl ConstantProductAdapter {
    pub fn new(address: Address, edition: PoolEdition, fee_bps: u64) -> Self {
        Self { address, edition, fee_bps }
    }

    fn amount_out(&self, pool: Address, amount_in: U256, reserve_in: U256, reserve_out: U256) -> Result<U256, AdapterError> {
        if amount_in.is_zero() {
            return Ok(U256::ZERO);
        }
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(AdapterError::NoLiquidity(pool));
        }

        let fee_multiplier = U256::from(BPS_BASE.saturating_sub(self.fee_bps));
        let amount_in_with_fee = amount_in.checked_mul(fee_multiplier).ok_or(AdapterError::Overflow(pool))? / U256::from(BPS_BASE);

        let numerator = amount_in_with_fee.checked_mul(reserve_out).ok_or(AdapterError::Overflow(pool))?;
        let denominator = reserve_in.checked_add(amount_in_with_fee).ok_or(AdapterError::Overflow(pool))?;

        Ok(numerator / denominator)
    }
}

impl PoolAdapter for ConstantProductAdapter {
    fn get_protocol(&self) -> AdapterProtocol {
        AdapterProtocol::ConstantProduct
    }

    fn get_address(&self) -> Address {
        self.address
    }

    fn quote(&self, state: &Ledger, from: Address, amount_in: U256, to: Address, pool: Address) -> Result<U256, AdapterError> {
        self.amount_out(pool, amount_in, state.balance_of(from, pool), state.balance_of(to, pool))
    }

    fn swap(
        &self,
        state: &mut Ledger,
        from: Address,
        amount_in: U256,
        to: Address,
        pool: Address,
        recipient: Address,
    ) -> Result<U256, AdapterError> {
        let amount_out = match self.edition {
            PoolEdition::PreFunded => {
                // the input already sits in the pool
                let reserve_in = state.balance_of(from, pool).checked_sub(amount_in).ok_or(AdapterError::NoLiquidity(pool))?;
                self.amount_out(pool, amount_in, reserve_in, state.balance_of(to, pool))?
            }
            PoolEdition::AdapterPull => {
                let amount_out = self.quote(state, from, amount_in, to, pool)?;
                state.transfer(from, self.address, pool, amount_in)?;
                amount_out
            }
        };
        state.transfer(to, pool, recipient, amount_out)?;
        Ok(amount_out)
    }
}

/// Pays `amount_in * numerator / denominator` out of the pool's balance, whatever the depth.
#[derive(Clone, Debug)]
pub struct FixedRateAdapter {
    pub address: Address,
    pub edition: PoolEdition,
    pub numerator: u64,
    pub denominator: u64,
}

impl FixedRateAdapter {
    pub fn new(address: Address, edition: PoolEdition, numerator: u64, denominator: u64) -> Self {
        Self { address, edition, numerator, denominator }
    }
}

impl PoolAdapter for FixedRateAdapter {
    fn get_protocol(&self) -> AdapterProtocol {
        AdapterProtocol::FixedRate
    }

    fn get_address(&self) -> Address {
        self.address
    }

    fn quote(&self, _state: &Ledger, from: Address, amount_in: U256, to: Address, pool: Address) -> Result<U256, AdapterError> {
        if from == to {
            return Err(AdapterError::UnsupportedPair { pool, from, to });
        }
        if self.denominator == 0 {
            return Err(AdapterError::NoLiquidity(pool));
        }
        let scaled = amount_in.checked_mul(U256::from(self.numerator)).ok_or(AdapterError::Overflow(pool))?;
        Ok(scaled / U256::from(self.denominator))
    }

    fn swap(
        &self,
        state: &mut Ledger,
        from: Address,
        amount_in: U256,
        to: Address,
        pool: Address,
        recipient: Address,
    ) -> Result<U256, AdapterError> {
        let amount_out = self.quote(state, from, amount_in, to, pool)?;
        if self.edition == PoolEdition::AdapterPull {
            state.transfer(from, self.address, pool, amount_in)?;
        } else if state.balance_of(from, pool) < amount_in {
            return Err(AdapterError::NotFunded { pool, asset: from });
        }
        state.transfer(to, pool, recipient, amount_out)?;
        Ok(amount_out)
    }
}

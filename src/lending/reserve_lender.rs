use super::lender::{FlashLender, FlashLoanReceiver};
use crate::constants::BPS_BASE;
use crate::errors::{RouterError, RouterResult};
use crate::state::Ledger;
use alloy_primitives::{Address, Bytes, U256};
use tracing::debug;

/// Lends out of its own ledger balance and pulls principal + premium back through the
/// receiver's allowance once the callback returns.
#[derive(Clone, Debug)]
pub struct ReserveLender {
    pub address: Address,
    pub premium_bps: u64,
}

impl ReserveLender {
    pub fn new(address: Address, premium_bps: u64) -> Self {
        Self { address, premium_bps }
    }

    pub fn premium_for(&self, amount: U256) -> RouterResult<U256> {
        let scaled = amount.checked_mul(U256::from(self.premium_bps)).ok_or(RouterError::ArithmeticOverflow("computing premium"))?;
        Ok(scaled / U256::from(BPS_BASE))
    }
}

impl FlashLender for ReserveLender {
    fn get_address(&self) -> Address {
        self.address
    }

    fn premium_bps(&self) -> u64 {
        self.premium_bps
    }

    fn flash_loan(
        &self,
        state: &mut Ledger,
        receiver: &mut dyn FlashLoanReceiver,
        assets: &[Address],
        amounts: &[U256],
        initiator: Address,
        params: Bytes,
    ) -> RouterResult<()> {
        if assets.len() != amounts.len() {
            return Err(RouterError::ArityMismatch(format!("assets={} amounts={}", assets.len(), amounts.len())));
        }
        let receiver_address = receiver.receiver_address();

        let premiums = amounts.iter().map(|amount| self.premium_for(*amount)).collect::<RouterResult<Vec<_>>>()?;
        for (asset, amount) in assets.iter().zip(amounts.iter()) {
            state.transfer(*asset, self.address, receiver_address, *amount)?;
        }

        if !receiver.execute_operation(state, self.address, assets, amounts, &premiums, initiator, &params)? {
            return Err(RouterError::CallbackFailed);
        }

        for ((asset, amount), premium) in assets.iter().zip(amounts.iter()).zip(premiums.iter()) {
            let owed = amount.checked_add(*premium).ok_or(RouterError::ArithmeticOverflow("computing repayment"))?;
            state.transfer_from(*asset, self.address, receiver_address, self.address, owed).map_err(|_| {
                RouterError::LoanRepaymentShortfall { asset: *asset, owed, available: state.balance_of(*asset, receiver_address) }
            })?;
            debug!(%asset, %amount, %premium, receiver = %receiver_address, "flash loan repaid");
        }

        Ok(())
    }
}

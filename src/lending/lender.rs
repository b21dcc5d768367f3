use crate::errors::RouterResult;
use crate::state::Ledger;
use alloy_primitives::{Address, Bytes, U256};

/// Party that borrows through a [`FlashLender`] and is called back while holding the funds.
pub trait FlashLoanReceiver {
    fn receiver_address(&self) -> Address;

    /// Called by the lender after the funds were transferred. Must leave an allowance of
    /// `amounts[i] + premiums[i]` for the lender on every asset and return `true`.
    #[allow(clippy::too_many_arguments)]
    fn execute_operation(
        &mut self,
        state: &mut Ledger,
        lender: Address,
        assets: &[Address],
        amounts: &[U256],
        premiums: &[U256],
        initiator: Address,
        params: &Bytes,
    ) -> RouterResult<bool>;
}

/// Lending facility that hands out uncollateralized capital for the duration of one call.
pub trait FlashLender: Send + Sync {
    fn get_address(&self) -> Address;

    /// Premium charged on every borrowed amount, in basis points.
    fn premium_bps(&self) -> u64;

    fn flash_loan(
        &self,
        state: &mut Ledger,
        receiver: &mut dyn FlashLoanReceiver,
        assets: &[Address],
        amounts: &[U256],
        initiator: Address,
        params: Bytes,
    ) -> RouterResult<()>;
}

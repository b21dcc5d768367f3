use crate::constants::NATIVE;
use crate::state::{Ledger, LedgerError};
use alloy_primitives::{Address, U256};

/// Wrapped-native facility: converts between the native asset and its token form.
pub trait NativeWrapper: Send + Sync {
    fn wrapped_token(&self) -> Address;

    fn deposit(&self, state: &mut Ledger, holder: Address, amount: U256) -> Result<(), LedgerError>;

    fn withdraw(&self, state: &mut Ledger, holder: Address, amount: U256) -> Result<(), LedgerError>;
}

/// WETH-style token: native is escrowed at the token address and minted 1:1.
#[derive(Clone, Debug)]
pub struct WrappedNativeToken {
    pub address: Address,
}

impl WrappedNativeToken {
    pub fn new(address: Address) -> Self {
        Self { address }
    }
}

impl NativeWrapper for WrappedNativeToken {
    fn wrapped_token(&self) -> Address {
        self.address
    }

    fn deposit(&self, state: &mut Ledger, holder: Address, amount: U256) -> Result<(), LedgerError> {
        state.transfer(NATIVE, holder, self.address, amount)?;
        state.mint(self.address, holder, amount)
    }

    fn withdraw(&self, state: &mut Ledger, holder: Address, amount: U256) -> Result<(), LedgerError> {
        state.burn(self.address, holder, amount)?;
        state.transfer(NATIVE, self.address, holder, amount)
    }
}

/// Token-claiming proxy that moves a trader's tokens into the router.
pub trait TokenClaimer: Send + Sync {
    fn get_address(&self) -> Address;

    fn claim(&self, state: &mut Ledger, asset: Address, owner: Address, recipient: Address, amount: U256) -> Result<(), LedgerError>;
}

/// Claims through an allowance the trader granted to the claimer's address.
#[derive(Clone, Debug)]
pub struct ApprovalClaimer {
    pub address: Address,
}

impl ApprovalClaimer {
    pub fn new(address: Address) -> Self {
        Self { address }
    }
}

impl TokenClaimer for ApprovalClaimer {
    fn get_address(&self) -> Address {
        self.address
    }

    fn claim(&self, state: &mut Ledger, asset: Address, owner: Address, recipient: Address, amount: U256) -> Result<(), LedgerError> {
        state.transfer_from(asset, self.address, owner, recipient, amount)
    }
}

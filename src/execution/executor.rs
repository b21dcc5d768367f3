use super::custody::NativeWrapper;
use crate::adapters::{AdapterRegistry, PoolEdition};
use crate::constants::{NATIVE, is_native};
use crate::errors::RouterResult;
use crate::logic::quoter::{adapter_assets, resolve_adapter};
use crate::logic::{HopCall, HopExecutor};
use crate::state::Ledger;
use alloy_primitives::{Address, U256};
use tracing::debug;

/// Hop executor that moves funds: funds the pool or adapter per edition, swaps, and handles
/// native wrapping at edition-0 hops. Spends from and collects into the router's balance.
pub struct Executor<'a> {
    state: &'a mut Ledger,
    adapters: &'a AdapterRegistry,
    wrapper: &'a dyn NativeWrapper,
    router: Address,
}

impl<'a> Executor<'a> {
    pub fn new(state: &'a mut Ledger, adapters: &'a AdapterRegistry, wrapper: &'a dyn NativeWrapper, router: Address) -> Self {
        Self { state, adapters, wrapper, router }
    }
}

impl HopExecutor for Executor<'_> {
    fn execute_hop(&mut self, call: &HopCall) -> RouterResult<U256> {
        let edition = call.edition()?;
        let adapter = resolve_adapter(self.adapters, call)?;
        let (from, to) = adapter_assets(call, edition, self.wrapper.wrapped_token());

        match edition {
            PoolEdition::PreFunded => {
                if is_native(call.from_asset) {
                    self.wrapper.deposit(self.state, self.router, call.amount_in)?;
                }
                self.state.transfer(from, self.router, call.pool, call.amount_in)?;
            }
            PoolEdition::AdapterPull => {
                self.state.transfer(from, self.router, adapter.get_address(), call.amount_in)?;
            }
        }

        let unwrap_output = edition == PoolEdition::PreFunded && is_native(call.to_asset);
        let swap_recipient = if unwrap_output { self.router } else { call.recipient };
        let amount_out = adapter.swap(self.state, from, call.amount_in, to, call.pool, swap_recipient)?;

        if unwrap_output {
            self.wrapper.withdraw(self.state, self.router, amount_out)?;
            self.state.transfer(NATIVE, self.router, call.recipient, amount_out)?;
        }

        debug!(
            adapter = %adapter,
            pool = %call.pool,
            edition = %edition,
            %from,
            %to,
            amount_in = %call.amount_in,
            %amount_out,
            "executed hop"
        );
        Ok(amount_out)
    }
}

use super::custody::{ApprovalClaimer, NativeWrapper, TokenClaimer, WrappedNativeToken};
use super::executor::Executor;
use super::flash_loan::LoanTicket;
use crate::adapters::{AdapterRegistry, AdapterWrapper};
use crate::constants::NATIVE;
use crate::errors::{RouterError, RouterResult};
use crate::lending::FlashLender;
use crate::logic::validator::{check_entry, check_linear_plan, check_sequential, check_split, check_weighted_path};
use crate::logic::{
    CallContext, LinearAmounts, LinearWeightedSwap, PathAmounts, PlanHash, Quoter, SplitAmounts, Swap, TradeParams, WeightedSwap,
    walk_linear, walk_sequential, walk_split, walk_weighted_path,
};
use crate::state::Ledger;
use crate::utils::RouterConfigSection;
use alloy_primitives::{Address, U256};
use std::sync::Arc;
use tracing::info;

/// Swap routing engine.
///
/// Every fund-moving entry is guarded against reentrancy and runs against a ledger snapshot:
/// a failure anywhere after entry restores the ledger to what it was when the call started.
pub struct Router {
    pub(super) address: Address,
    pub(super) config: RouterConfigSection,
    pub(super) adapters: AdapterRegistry,
    pub(super) wrapper: Arc<dyn NativeWrapper>,
    pub(super) claimer: Arc<dyn TokenClaimer>,
    pub(super) lender: Option<Arc<dyn FlashLender>>,
    pub(super) entered: bool,
    pub(super) pending_loan: Option<LoanTicket>,
}

impl Router {
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn config(&self) -> &RouterConfigSection {
        &self.config
    }

    pub fn adapters(&self) -> &AdapterRegistry {
        &self.adapters
    }

    pub fn lender(&self) -> Option<&Arc<dyn FlashLender>> {
        self.lender.as_ref()
    }

    pub fn wrapped_native(&self) -> Address {
        self.wrapper.wrapped_token()
    }

    pub fn quoter<'a>(&'a self, state: &'a Ledger) -> Quoter<'a> {
        Quoter::new(state, &self.adapters, self.wrapped_native())
    }

    pub(super) fn executor<'a>(&'a self, state: &'a mut Ledger) -> Executor<'a> {
        Executor::new(state, &self.adapters, self.wrapper.as_ref(), self.address)
    }

    pub fn quote_single_path(&self, state: &Ledger, path: &[Swap]) -> RouterResult<Vec<U256>> {
        self.quoter(state).calc_sequential_hops(path)
    }

    pub fn quote_weighted_split(&self, state: &Ledger, split: &WeightedSwap) -> RouterResult<U256> {
        self.quoter(state).calc_weighted_split(split)
    }

    pub fn quote_weighted_path(&self, state: &Ledger, path: &[WeightedSwap]) -> RouterResult<Vec<U256>> {
        self.quoter(state).calc_weighted_path(path)
    }

    pub fn quote_linear_plan(&self, state: &Ledger, plan: &LinearWeightedSwap) -> RouterResult<U256> {
        self.quoter(state).calc_linear_plan(plan)
    }

    /// Execute hops in order and deliver the last hop's output to its recipient.
    /// Returns the `N + 1` cumulative amounts.
    pub fn execute_single_path(
        &mut self,
        state: &mut Ledger,
        ctx: &CallContext,
        params: &TradeParams,
        path: &[Swap],
    ) -> RouterResult<Vec<U256>> {
        self.guarded(|router| {
            check_sequential(path)?;
            let (first, last) = (&path[0], &path[path.len() - 1]);
            router.check_call(state, ctx, params, first.from_asset, first.amount_in, last.to_asset)?;

            let amounts = Self::atomically(state, |state| {
                router.pull_funds(state, ctx, params)?;
                let amounts = walk_sequential(&mut router.executor(state), path, params.amount_in, Some(router.address))?;
                let amount_out = amounts.last().copied().unwrap_or_default();
                router.settle(state, params, amount_out, last.recipient)?;
                Ok(amounts)
            })?;

            info!(plan = %PlanHash::of_path(path), caller = %ctx.caller, amounts = ?amounts, "single path executed");
            Ok(amounts)
        })
    }

    pub fn execute_weighted_split(
        &mut self,
        state: &mut Ledger,
        ctx: &CallContext,
        params: &TradeParams,
        split: &WeightedSwap,
    ) -> RouterResult<SplitAmounts> {
        self.guarded(|router| {
            check_split(split)?;
            router.check_call(state, ctx, params, split.from_asset, split.amount_in, split.to_asset)?;

            let amounts = Self::atomically(state, |state| {
                router.pull_funds(state, ctx, params)?;
                let amounts = walk_split(&mut router.executor(state), split, params.amount_in, router.address)?;
                router.settle(state, params, amounts.amount_out, split.recipient)?;
                Ok(amounts)
            })?;

            info!(
                plan = %PlanHash::of_weighted_path(std::slice::from_ref(split)),
                caller = %ctx.caller,
                amount_out = %amounts.amount_out,
                "weighted split executed"
            );
            Ok(amounts)
        })
    }

    pub fn execute_weighted_path(
        &mut self,
        state: &mut Ledger,
        ctx: &CallContext,
        params: &TradeParams,
        path: &[WeightedSwap],
    ) -> RouterResult<PathAmounts> {
        self.guarded(|router| {
            check_weighted_path(path)?;
            let (first, last) = (&path[0], &path[path.len() - 1]);
            router.check_call(state, ctx, params, first.from_asset, first.amount_in, last.to_asset)?;

            let amounts = Self::atomically(state, |state| {
                router.pull_funds(state, ctx, params)?;
                let amounts = walk_weighted_path(&mut router.executor(state), path, params.amount_in, Some(router.address))?;
                router.settle(state, params, amounts.amount_out(), last.recipient)?;
                Ok(amounts)
            })?;

            info!(plan = %PlanHash::of_weighted_path(path), caller = %ctx.caller, amounts = ?amounts.amounts, "weighted path executed");
            Ok(amounts)
        })
    }

    pub fn execute_linear_plan(
        &mut self,
        state: &mut Ledger,
        ctx: &CallContext,
        params: &TradeParams,
        plan: &LinearWeightedSwap,
    ) -> RouterResult<LinearAmounts> {
        self.guarded(|router| router.run_linear_plan(state, ctx, params, plan))
    }

    /// Move the router's whole balance of `asset` to `to`. Owner only.
    pub fn sweep(&mut self, state: &mut Ledger, caller: Address, asset: Address, to: Address) -> RouterResult<U256> {
        self.guarded(|router| {
            if caller != router.config.owner {
                return Err(RouterError::Unauthorized(caller));
            }
            let amount = state.balance_of(asset, router.address);
            state.transfer(asset, router.address, to, amount)?;
            info!(%asset, %to, %amount, "swept router balance");
            Ok(amount)
        })
    }

    /// Unguarded linear execution, shared with the arbitrage entry.
    pub(super) fn run_linear_plan(
        &self,
        state: &mut Ledger,
        ctx: &CallContext,
        params: &TradeParams,
        plan: &LinearWeightedSwap,
    ) -> RouterResult<LinearAmounts> {
        check_linear_plan(plan)?;
        self.check_call(state, ctx, params, plan.from_asset, plan.amount_in, plan.to_asset)?;

        let amounts = Self::atomically(state, |state| {
            self.pull_funds(state, ctx, params)?;
            let amounts = walk_linear(&mut self.executor(state), plan, Some(self.address))?;
            self.settle(state, params, amounts.amount_out, plan.recipient)?;
            Ok(amounts)
        })?;

        info!(plan = %PlanHash::of_linear_plan(plan), caller = %ctx.caller, amount_out = %amounts.amount_out, "linear plan executed");
        Ok(amounts)
    }

    pub(super) fn guarded<T>(&mut self, f: impl FnOnce(&mut Self) -> RouterResult<T>) -> RouterResult<T> {
        if self.entered {
            return Err(RouterError::ReentrancyRejected);
        }
        self.entered = true;
        let result = f(self);
        self.entered = false;
        result
    }

    pub(super) fn atomically<T>(state: &mut Ledger, f: impl FnOnce(&mut Ledger) -> RouterResult<T>) -> RouterResult<T> {
        let snapshot = state.snapshot();
        let result = f(state);
        if result.is_err() {
            state.restore(snapshot);
        }
        result
    }

    fn check_call(
        &self,
        state: &Ledger,
        ctx: &CallContext,
        params: &TradeParams,
        plan_from: Address,
        plan_amount_in: U256,
        plan_to: Address,
    ) -> RouterResult<()> {
        check_entry(params, self.wrapped_native(), plan_from, plan_amount_in, plan_to, state.block_timestamp())?;

        if params.from_asset == NATIVE {
            if ctx.value != params.amount_in {
                return Err(RouterError::InsufficientNativeValue { declared: params.amount_in, attached: ctx.value });
            }
        } else if !ctx.value.is_zero() {
            return Err(RouterError::UnexpectedNativeValue(ctx.value));
        }
        Ok(())
    }

    /// Native input arrives as attached value; tokens are claimed through the claimer.
    fn pull_funds(&self, state: &mut Ledger, ctx: &CallContext, params: &TradeParams) -> RouterResult<()> {
        if params.from_asset == NATIVE {
            state.transfer(NATIVE, ctx.caller, self.address, ctx.value)?;
            if params.native_legs.input {
                self.wrapper.deposit(state, self.address, ctx.value)?;
            }
        } else {
            self.claimer.claim(state, params.from_asset, ctx.caller, self.address, params.amount_in)?;
        }
        Ok(())
    }

    fn settle(&self, state: &mut Ledger, params: &TradeParams, amount_out: U256, recipient: Address) -> RouterResult<()> {
        if amount_out < params.min_return {
            return Err(RouterError::SlippageExceeded { realized: amount_out, minimum: params.min_return });
        }
        if params.native_legs.output {
            self.wrapper.withdraw(state, self.address, amount_out)?;
            state.transfer(NATIVE, self.address, recipient, amount_out)?;
        } else {
            state.transfer(params.to_asset, self.address, recipient, amount_out)?;
        }
        Ok(())
    }
}

/// Assembles a [`Router`] from its config and collaborators.
pub struct RouterBuilder {
    address: Address,
    config: RouterConfigSection,
    adapters: AdapterRegistry,
    wrapper: Option<Arc<dyn NativeWrapper>>,
    claimer: Option<Arc<dyn TokenClaimer>>,
    lender: Option<Arc<dyn FlashLender>>,
}

impl RouterBuilder {
    pub fn new(address: Address, config: RouterConfigSection) -> Self {
        Self { address, config, adapters: AdapterRegistry::new(), wrapper: None, claimer: None, lender: None }
    }

    pub fn with_adapter<A: Into<AdapterWrapper>>(mut self, adapter: A) -> Self {
        self.adapters.register(adapter);
        self
    }

    pub fn with_wrapper<W: NativeWrapper + 'static>(mut self, wrapper: W) -> Self {
        self.wrapper = Some(Arc::new(wrapper));
        self
    }

    pub fn with_claimer<C: TokenClaimer + 'static>(mut self, claimer: C) -> Self {
        self.claimer = Some(Arc::new(claimer));
        self
    }

    pub fn with_lender<L: FlashLender + 'static>(mut self, lender: L) -> Self {
        self.lender = Some(Arc::new(lender));
        self
    }

    /// Without an explicit wrapper or claimer, the configured wrapped-native token is used and
    /// traders approve the router itself.
    pub fn build(self) -> Router {
        let wrapper = self.wrapper.unwrap_or_else(|| Arc::new(WrappedNativeToken::new(self.config.wrapped_native)));
        let claimer = self.claimer.unwrap_or_else(|| Arc::new(ApprovalClaimer::new(self.address)));
        Router {
            address: self.address,
            config: self.config,
            adapters: self.adapters,
            wrapper,
            claimer,
            lender: self.lender,
            entered: false,
            pending_loan: None,
        }
    }
}

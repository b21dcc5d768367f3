use super::calldata::{decode_path, encode_path};
use super::router::Router;
use crate::constants::{BPS_BASE, NATIVE, is_native};
use crate::errors::{RouterError, RouterResult};
use crate::lending::FlashLoanReceiver;
use crate::logic::validator::check_cycle;
use crate::logic::{CallContext, FlashLoanDes, LinearAmounts, LinearWeightedSwap, PlanHash, TradeParams, walk_sequential};
use crate::state::Ledger;
use crate::utils::ForeignProfitPolicy;
use alloy_primitives::{Address, Bytes, U256};
use tracing::{debug, info, warn};

/// The single outstanding borrow. Issued right before the lender is called and consumed by
/// the first callback; a callback that finds none is rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoanTicket {
    /// Cycle asset as declared by the candidate, possibly [`NATIVE`].
    pub asset: Address,
    /// Token actually borrowed from the lender.
    pub borrowed: Address,
    pub amount: U256,
    pub path_hash: PlanHash,
}

#[derive(Debug)]
pub enum ArbitrageOutcome {
    /// Quoted cycle output did not cover principal plus premium. Nothing was borrowed.
    Skipped { index: usize, quoted: U256, required: U256 },
    /// Loan repaid and `profit` of `asset` left over. `counted` when it was paid out in the
    /// trade's output token and added to the reported total.
    Captured { index: usize, asset: Address, profit: U256, counted: bool },
    /// Attempt rolled back.
    Failed { index: usize, error: RouterError },
}

#[derive(Debug)]
pub struct ArbitrageReport {
    pub primary: LinearAmounts,
    pub captured_profit: U256,
    /// Primary output plus the counted profit.
    pub amount_out: U256,
    pub outcomes: Vec<ArbitrageOutcome>,
}

impl Router {
    /// Execute `plan`, then try each candidate cycle in order (at most `max_arbitrage_candidates`).
    ///
    /// The primary trade is settled and delivered before any candidate runs, and `min_return`
    /// applies to it alone. Each candidate is all-or-nothing and never fails the call.
    /// Leftover profit goes to `plan.recipient`, which stands in for the trader who placed the plan.
    pub fn execute_linear_plan_with_arbitrage(
        &mut self,
        state: &mut Ledger,
        ctx: &CallContext,
        params: &TradeParams,
        plan: &LinearWeightedSwap,
        candidates: &[FlashLoanDes],
    ) -> RouterResult<ArbitrageReport> {
        self.guarded(|router| {
            let primary = router.run_linear_plan(state, ctx, params, plan)?;

            let mut outcomes = Vec::new();
            let mut captured_profit = U256::ZERO;
            for (index, des) in candidates.iter().take(router.config.max_arbitrage_candidates).enumerate() {
                let snapshot = state.snapshot();
                let outcome = match router.attempt_arbitrage(state, index, des, params, plan.recipient) {
                    Ok(outcome) => outcome,
                    Err(error) => {
                        state.restore(snapshot);
                        router.pending_loan = None;
                        warn!(index, asset = %des.asset, amount = %des.amount_in, %error, "arbitrage attempt rolled back");
                        ArbitrageOutcome::Failed { index, error }
                    }
                };
                if let ArbitrageOutcome::Captured { profit, counted: true, .. } = &outcome {
                    captured_profit =
                        captured_profit.checked_add(*profit).ok_or(RouterError::ArithmeticOverflow("summing arbitrage profit"))?;
                }
                outcomes.push(outcome);
            }
            if candidates.len() > router.config.max_arbitrage_candidates {
                warn!(supplied = candidates.len(), max = router.config.max_arbitrage_candidates, "ignoring extra arbitrage candidates");
            }

            let amount_out =
                primary.amount_out.checked_add(captured_profit).ok_or(RouterError::ArithmeticOverflow("adding arbitrage profit"))?;
            info!(plan = %PlanHash::of_linear_plan(plan), primary = %primary.amount_out, %captured_profit, "arbitrage round finished");
            Ok(ArbitrageReport { primary, captured_profit, amount_out, outcomes })
        })
    }

    /// Required cycle output: principal plus the lender's premium.
    pub fn repayment_threshold(&self, amount: U256) -> RouterResult<U256> {
        let bps = self.lender.as_ref().ok_or(RouterError::LenderNotConfigured)?.premium_bps();
        let factor = BPS_BASE.checked_add(bps).ok_or(RouterError::ArithmeticOverflow("computing repayment threshold"))?;
        let scaled = amount.checked_mul(U256::from(factor)).ok_or(RouterError::ArithmeticOverflow("computing repayment threshold"))?;
        Ok(scaled / U256::from(BPS_BASE))
    }

    fn attempt_arbitrage(
        &mut self,
        state: &mut Ledger,
        index: usize,
        des: &FlashLoanDes,
        params: &TradeParams,
        recipient: Address,
    ) -> RouterResult<ArbitrageOutcome> {
        check_cycle(des)?;
        let required = self.repayment_threshold(des.amount_in)?;
        let quoted = self.quoter(state).calc_sequential_hops(&des.swaps)?.last().copied().unwrap_or_default();
        if quoted <= required {
            debug!(index, %quoted, %required, "arbitrage candidate not profitable");
            return Ok(ArbitrageOutcome::Skipped { index, quoted, required });
        }

        let borrowed = if is_native(des.asset) { self.wrapped_native() } else { des.asset };
        let before = state.balance_of(borrowed, self.address);
        self.borrow_and_run(state, des, borrowed)?;
        let profit = state
            .balance_of(borrowed, self.address)
            .checked_sub(before)
            .ok_or(RouterError::ArithmeticOverflow("computing arbitrage profit"))?;

        let counted = self.forward_profit(state, params, borrowed, profit, recipient)?;
        info!(index, asset = %borrowed, %profit, counted, "arbitrage captured");
        Ok(ArbitrageOutcome::Captured { index, asset: borrowed, profit, counted })
    }

    fn borrow_and_run(&mut self, state: &mut Ledger, des: &FlashLoanDes, borrowed: Address) -> RouterResult<()> {
        let lender = self.lender.clone().ok_or(RouterError::LenderNotConfigured)?;
        self.pending_loan =
            Some(LoanTicket { asset: des.asset, borrowed, amount: des.amount_in, path_hash: PlanHash::of_path(&des.swaps) });

        let initiator = self.address;
        lender.flash_loan(state, self, &[borrowed], &[des.amount_in], initiator, encode_path(&des.swaps))?;

        if self.pending_loan.take().is_some() {
            return Err(RouterError::LoanNotExecuted);
        }
        Ok(())
    }

    /// Pays profit out according to its asset. Returns whether it counts toward the trade output.
    /// `recipient` is the plan's recipient, paid in place of the trader.
    fn forward_profit(
        &self,
        state: &mut Ledger,
        params: &TradeParams,
        asset: Address,
        profit: U256,
        recipient: Address,
    ) -> RouterResult<bool> {
        if profit.is_zero() {
            return Ok(false);
        }

        let wrapped = self.wrapped_native();
        let routed_out = if params.to_asset == NATIVE { wrapped } else { params.to_asset };
        if asset == routed_out {
            if params.to_asset == NATIVE {
                self.wrapper.withdraw(state, self.address, profit)?;
                state.transfer(NATIVE, self.address, recipient, profit)?;
            } else {
                state.transfer(asset, self.address, recipient, profit)?;
            }
            return Ok(true);
        }

        match self.config.foreign_profit_policy {
            ForeignProfitPolicy::ForwardToRecipient => state.transfer(asset, self.address, recipient, profit)?,
            ForeignProfitPolicy::RetainInEngine => debug!(%asset, %profit, "retaining foreign arbitrage profit"),
        }
        Ok(false)
    }
}

impl FlashLoanReceiver for Router {
    fn receiver_address(&self) -> Address {
        self.address
    }

    fn execute_operation(
        &mut self,
        state: &mut Ledger,
        lender: Address,
        assets: &[Address],
        amounts: &[U256],
        premiums: &[U256],
        initiator: Address,
        params: &Bytes,
    ) -> RouterResult<bool> {
        let ticket = self.pending_loan.take().ok_or(RouterError::UnsolicitedCallback)?;
        match &self.lender {
            Some(configured) if configured.get_address() == lender => {}
            _ => return Err(RouterError::UnauthorizedLender(lender)),
        }
        if initiator != self.address {
            return Err(RouterError::Unauthorized(initiator));
        }
        if assets.len() != 1 || amounts.len() != 1 || premiums.len() != 1 {
            return Err(RouterError::ArityMismatch(format!(
                "callback carries {} assets, {} amounts, {} premiums for a single borrow",
                assets.len(),
                amounts.len(),
                premiums.len()
            )));
        }
        if assets[0] != ticket.borrowed || amounts[0] != ticket.amount {
            return Err(RouterError::InvalidCalldata(format!(
                "callback for {} of {} does not match the borrow of {} {}",
                amounts[0], assets[0], ticket.amount, ticket.borrowed
            )));
        }

        let path = decode_path(params)?;
        if PlanHash::of_path(&path) != ticket.path_hash {
            return Err(RouterError::InvalidCalldata(format!("path hash {} was not borrowed against", PlanHash::of_path(&path))));
        }

        if is_native(ticket.asset) {
            self.wrapper.withdraw(state, self.address, ticket.amount)?;
        }
        let amounts = walk_sequential(&mut self.executor(state), &path, ticket.amount, Some(self.address))?;
        let amount_out = amounts.last().copied().unwrap_or_default();
        if is_native(ticket.asset) {
            self.wrapper.deposit(state, self.address, amount_out)?;
        }

        let owed = ticket.amount.checked_add(premiums[0]).ok_or(RouterError::ArithmeticOverflow("computing repayment"))?;
        if amount_out < owed {
            return Err(RouterError::LoanRepaymentShortfall { asset: ticket.borrowed, owed, available: amount_out });
        }
        state.approve(ticket.borrowed, self.address, lender, owed);
        debug!(asset = %ticket.borrowed, amount = %ticket.amount, %owed, %amount_out, "cycle executed inside loan");
        Ok(true)
    }
}

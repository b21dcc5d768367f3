use crate::adapters::AdapterError;
use crate::state::LedgerError;
use alloy_primitives::{Address, U256};

/// Every way a routing, quoting or arbitrage call can fail. All of them abort the enclosing call.
#[derive(thiserror::Error, Debug)]
pub enum RouterError {
    #[error("declared {field} does not match the plan: declared {declared}, plan {planned}")]
    EndpointMismatch { field: &'static str, declared: String, planned: String },
    #[error("path discontinuity after hop {index}: {to} -> {next_from}")]
    PathDiscontinuity { index: usize, to: Address, next_from: Address },
    #[error("arity mismatch: {0}")]
    ArityMismatch(String),
    #[error("branch {branch} does not run {expected_from} -> {expected_to}")]
    BranchEndpointMismatch { branch: usize, expected_from: Address, expected_to: Address },
    #[error("unsupported pool edition {0}")]
    UnsupportedPoolEdition(u8),
    #[error("minimum return must be positive")]
    ZeroMinimumOutput,
    #[error("deadline {deadline} expired at block time {now}")]
    DeadlineExpired { deadline: u64, now: u64 },
    #[error("slippage exceeded: realized {realized}, minimum {minimum}")]
    SlippageExceeded { realized: U256, minimum: U256 },
    #[error("reentrant call rejected")]
    ReentrancyRejected,
    #[error("native value {attached} does not match declared amount {declared}")]
    InsufficientNativeValue { declared: U256, attached: U256 },
    #[error("native value {0} attached to a token input")]
    UnexpectedNativeValue(U256),
    #[error("loan repayment shortfall on {asset}: owed {owed}, available {available}")]
    LoanRepaymentShortfall { asset: Address, owed: U256, available: U256 },
    #[error("plan is empty")]
    EmptyPlan,
    #[error("weights sum to zero")]
    ZeroTotalWeight,
    #[error("arithmetic overflow while {0}")]
    ArithmeticOverflow(&'static str),
    #[error("no adapter registered at {0}")]
    UnknownAdapter(Address),
    #[error("lender callback without an outstanding borrow")]
    UnsolicitedCallback,
    #[error("flash-loan receiver reported failure")]
    CallbackFailed,
    #[error("lender returned without invoking the callback")]
    LoanNotExecuted,
    #[error("lender callback from {0} rejected")]
    UnauthorizedLender(Address),
    #[error("no flash lender configured")]
    LenderNotConfigured,
    #[error("invalid callback payload: {0}")]
    InvalidCalldata(String),
    #[error("caller {0} is not allowed to perform this operation")]
    Unauthorized(Address),
    #[error(transparent)]
    Adapter(#[from] AdapterError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl RouterError {
    pub(crate) fn endpoint<T: std::fmt::Display>(field: &'static str, declared: T, planned: T) -> Self {
        RouterError::EndpointMismatch { field, declared: declared.to_string(), planned: planned.to_string() }
    }
}

pub type RouterResult<T> = Result<T, RouterError>;

// Layered like the chain-side router it models
pub mod adapters; // Pool adapters and their registry
pub mod lending; // Flash lenders and the receiver callback
pub mod logic; // Plans, validation, traversal and quoting
pub mod execution; // Fund-moving router, custody, arbitrage
pub mod state; // In-process ledger

// Common utilities and types
pub mod constants;
pub mod errors;
pub mod utils;

pub use adapters::{
    AdapterError, AdapterProtocol, AdapterRegistry, AdapterWrapper, ConstantProductAdapter, FixedRateAdapter, PoolAdapter, PoolEdition,
};
pub use constants::{BPS_BASE, NATIVE, WMNT, is_native};
pub use errors::{RouterError, RouterResult};
pub use execution::{
    ApprovalClaimer, ArbitrageOutcome, ArbitrageReport, NativeWrapper, Router, RouterBuilder, TokenClaimer, WrappedNativeToken,
};
pub use lending::{FlashLender, FlashLoanReceiver, ReserveLender};
pub use logic::{
    CallContext, FlashLoanDes, LinearAmounts, LinearWeightedSwap, NativeLegs, PathAmounts, PlanHash, Quoter, SplitAmounts, Swap,
    TradeParams, WeightedSwap, split_by_weights,
};
pub use state::{Ledger, LedgerError};
pub use utils::{ConfigLoader, ConfigLoaderSync, ForeignProfitPolicy, LoadConfigError, RouterConfigSection};

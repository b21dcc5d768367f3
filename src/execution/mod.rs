/// Execution Layer
///
/// This layer is responsible for:
/// - The router entry points that move funds (single path, split, weighted path, linear plan)
/// - The fund-moving hop executor and native wrap/unwrap handling
/// - Token custody claims and the wrapped-native facility
/// - Flash-loan arbitrage and the lender callback payload

pub mod calldata;
pub mod custody;
pub mod executor;
pub mod flash_loan;
pub mod router;

pub use calldata::{SwapCall, decode_path, encode_path};
pub use custody::{ApprovalClaimer, NativeWrapper, TokenClaimer, WrappedNativeToken};
pub use executor::Executor;
pub use flash_loan::{ArbitrageOutcome, ArbitrageReport, LoanTicket};
pub use router::{Router, RouterBuilder};

/// Logic Layer - Plans and amount calculation
///
/// This layer is responsible for:
/// - The immutable plan shapes (single path, weighted split, weighted path, linear plan)
/// - Weighted splitting with remainder handling
/// - Structural validation before any funds move
/// - The shared traversal and the read-only quoting engine

pub mod amounts;
pub mod plan_hash;
pub mod quoter;
pub mod split;
pub mod traversal;
pub mod types;
pub mod validator;

pub use amounts::{LinearAmounts, PathAmounts, SplitAmounts};
pub use plan_hash::PlanHash;
pub use quoter::Quoter;
pub use split::split_by_weights;
pub use traversal::{HopExecutor, walk_linear, walk_sequential, walk_split, walk_weighted_path};
pub use types::{CallContext, FlashLoanDes, HopCall, LinearWeightedSwap, NativeLegs, Swap, TradeParams, WeightedSwap};

pub mod lender;
pub mod reserve_lender;

pub use lender::{FlashLender, FlashLoanReceiver};
pub use reserve_lender::ReserveLender;

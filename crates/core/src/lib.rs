pub mod amount;
pub mod receipt;

pub use amount::{Amount, AmountError};
pub use receipt::{FeeLineItem, ReceiptAnalysis, StudentDetails};

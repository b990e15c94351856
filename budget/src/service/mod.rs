pub mod account;
mod error;
pub mod insights;
pub mod ledger;

pub use error::AppError;

pub mod account;
pub mod budgets;
pub mod insights;
pub mod transactions;

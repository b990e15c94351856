pub mod budget;
pub mod transaction;
pub mod user;

use crate::domain::repository::{BudgetRepository, TransactionRepository, UserRepository};
use sqlx::{Pool, Postgres};
use std::sync::Arc;

/// Handles to every ledger repository, built once and shared by the HTTP app.
#[derive(Clone)]
pub struct Store {
    pub users: Arc<dyn UserRepository>,
    pub budgets: Arc<dyn BudgetRepository>,
    pub transactions: Arc<dyn TransactionRepository>,
}

impl Store {
    pub fn postgres(pool: Pool<Postgres>) -> Store {
        Store {
            users: Arc::new(user::PgUserRepository::new(pool.clone())),
            budgets: Arc::new(budget::PgBudgetRepository::new(pool.clone())),
            transactions: Arc::new(transaction::PgTransactionRepository::new(pool)),
        }
    }
}

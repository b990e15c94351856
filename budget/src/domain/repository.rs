use crate::domain::models::*;
use async_trait::async_trait;
use rust_decimal::Decimal;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(
        &self,
        email: String,
        name: Option<String>,
        password: String,
    ) -> anyhow::Result<User>;
    async fn find(&self, id: i64) -> anyhow::Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn update_profile(&self, id: i64, name: String, email: String) -> anyhow::Result<User>;
    async fn update_password(&self, id: i64, password: String) -> anyhow::Result<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BudgetRepository: Send + Sync {
    async fn list(&self, user_id: i64) -> anyhow::Result<Vec<Budget>>;
    async fn find(&self, id: i64) -> anyhow::Result<Option<Budget>>;
    async fn create(&self, user_id: i64, category: String, amount: Decimal)
        -> anyhow::Result<Budget>;
    async fn update(&self, id: i64, category: String, amount: Decimal) -> anyhow::Result<Budget>;
    async fn delete(&self, id: i64) -> anyhow::Result<()>;
}

/// Writes also maintain the running `spent` total of the owner's budgets in
/// the same category, within one unit of work.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Newest first.
    async fn list(&self, user_id: i64) -> anyhow::Result<Vec<Transaction>>;
    async fn find(&self, id: i64) -> anyhow::Result<Option<Transaction>>;
    async fn create(&self, user_id: i64, tx: NewTransaction) -> anyhow::Result<Transaction>;
    async fn update(&self, id: i64, tx: NewTransaction) -> anyhow::Result<Transaction>;
    async fn delete(&self, id: i64) -> anyhow::Result<Transaction>;
}

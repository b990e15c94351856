use crate::domain::models::Budget;
use crate::domain::repository;
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

const COLUMNS: &str = "id, user_id, category, amount, spent";

#[derive(Clone)]
pub struct PgBudgetRepository {
    pub pool: Pool<Postgres>,
}

impl PgBudgetRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PgBudgetRepository { pool }
    }
}

#[async_trait]
impl repository::BudgetRepository for PgBudgetRepository {
    async fn list(&self, user_id: i64) -> anyhow::Result<Vec<Budget>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM budgets WHERE user_id = $1 ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Budget::from).collect())
    }

    async fn find(&self, id: i64) -> anyhow::Result<Option<Budget>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM budgets WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Budget::from))
    }

    async fn create(
        &self,
        user_id: i64,
        category: String,
        amount: Decimal,
    ) -> anyhow::Result<Budget> {
        let row = sqlx::query(&format!(
            "INSERT INTO budgets(user_id, category, amount, spent)
             VALUES ($1, $2, $3, (
                 SELECT COALESCE(SUM(-t.amount), 0) FROM transactions t
                 WHERE t.user_id = $1 AND t.category = $2 AND t.amount < 0
             ))
             RETURNING {COLUMNS}"
        ))
        .bind(user_id)
        .bind(&category)
        .bind(amount)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update(&self, id: i64, category: String, amount: Decimal) -> anyhow::Result<Budget> {
        let row = sqlx::query(&format!(
            "UPDATE budgets SET category = $1, amount = $2, spent = (
                 SELECT COALESCE(SUM(-t.amount), 0) FROM transactions t
                 WHERE t.user_id = budgets.user_id AND t.category = $1 AND t.amount < 0
             )
             WHERE id = $3 RETURNING {COLUMNS}"
        ))
        .bind(&category)
        .bind(amount)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM budgets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

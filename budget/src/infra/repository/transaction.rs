use crate::domain::models::{NewTransaction, Transaction};
use crate::domain::repository;
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres};

const COLUMNS: &str = "id, user_id, description, amount, kind, date, category";

pub struct PgTransactionRepository {
    pub pool: PgPool,
}

impl PgTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Adds `delta` to the running `spent` of the user's budgets in `category`.
    async fn adjust_spent(
        user_id: i64,
        category: &str,
        delta: Decimal,
        tx: &mut sqlx::Transaction<'_, Postgres>,
    ) -> anyhow::Result<()> {
        if delta.is_zero() {
            return Ok(());
        }

        sqlx::query("UPDATE budgets SET spent = spent + $1 WHERE user_id = $2 AND category = $3")
            .bind(delta)
            .bind(user_id)
            .bind(category)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    async fn locked(
        id: i64,
        tx: &mut sqlx::Transaction<'_, Postgres>,
    ) -> anyhow::Result<Transaction> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM transactions WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_one(&mut **tx)
        .await?;

        Transaction::try_from(row)
    }
}

fn expense_of(amount: Decimal) -> Decimal {
    if amount < Decimal::ZERO {
        amount.abs()
    } else {
        Decimal::ZERO
    }
}

#[async_trait]
impl repository::TransactionRepository for PgTransactionRepository {
    async fn list(&self, user_id: i64) -> anyhow::Result<Vec<Transaction>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM transactions WHERE user_id = $1 ORDER BY date DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Transaction::try_from).collect()
    }

    async fn find(&self, id: i64) -> anyhow::Result<Option<Transaction>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM transactions WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Transaction::try_from).transpose()
    }

    async fn create(&self, user_id: i64, new: NewTransaction) -> anyhow::Result<Transaction> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!(
            "INSERT INTO transactions(user_id, description, amount, kind, date, category)
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {COLUMNS}"
        ))
        .bind(user_id)
        .bind(&new.description)
        .bind(new.amount)
        .bind(new.kind.as_str())
        .bind(new.date)
        .bind(&new.category)
        .fetch_one(&mut *tx)
        .await?;
        let created = Transaction::try_from(row)?;

        Self::adjust_spent(user_id, &created.category, expense_of(created.amount), &mut tx).await?;

        tx.commit().await?;
        Ok(created)
    }

    async fn update(&self, id: i64, new: NewTransaction) -> anyhow::Result<Transaction> {
        let mut tx = self.pool.begin().await?;

        let old = Self::locked(id, &mut tx).await?;
        Self::adjust_spent(old.user_id, &old.category, -expense_of(old.amount), &mut tx).await?;

        let row = sqlx::query(&format!(
            "UPDATE transactions
             SET description = $1, amount = $2, kind = $3, date = $4, category = $5
             WHERE id = $6 RETURNING {COLUMNS}"
        ))
        .bind(&new.description)
        .bind(new.amount)
        .bind(new.kind.as_str())
        .bind(new.date)
        .bind(&new.category)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        let updated = Transaction::try_from(row)?;

        Self::adjust_spent(
            updated.user_id,
            &updated.category,
            expense_of(updated.amount),
            &mut tx,
        )
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> anyhow::Result<Transaction> {
        let mut tx = self.pool.begin().await?;

        let old = Self::locked(id, &mut tx).await?;
        sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        Self::adjust_spent(old.user_id, &old.category, -expense_of(old.amount), &mut tx).await?;

        tx.commit().await?;
        Ok(old)
    }
}

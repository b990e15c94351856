use crate::domain::models::User;
use crate::domain::repository;
use async_trait::async_trait;
use sqlx::{Pool, Postgres};

#[derive(Clone)]
pub struct PgUserRepository {
    pub pool: Pool<Postgres>,
}

impl PgUserRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PgUserRepository { pool }
    }
}

#[async_trait]
impl repository::UserRepository for PgUserRepository {
    async fn create_user(
        &self,
        email: String,
        name: Option<String>,
        password: String,
    ) -> anyhow::Result<User> {
        let row = sqlx::query(
            "INSERT INTO users(email, name, password) VALUES ($1, $2, $3)
             RETURNING id, email, name, password",
        )
        .bind(&email)
        .bind(&name)
        .bind(&password)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find(&self, id: i64) -> anyhow::Result<Option<User>> {
        let row = sqlx::query("SELECT id, email, name, password FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query("SELECT id, email, name, password FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn update_profile(&self, id: i64, name: String, email: String) -> anyhow::Result<User> {
        let row = sqlx::query(
            "UPDATE users SET name = $1, email = $2 WHERE id = $3
             RETURNING id, email, name, password",
        )
        .bind(&name)
        .bind(&email)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update_password(&self, id: i64, password: String) -> anyhow::Result<()> {
        sqlx::query("UPDATE users SET password = $1 WHERE id = $2")
            .bind(&password)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

use crate::domain::models::User;
use crate::domain::repository::UserRepository;
use crate::infra::auth::password::{hash_password, verify_password};
use crate::service::AppError;
use anyhow::Result;
use std::sync::Arc;

pub struct AccountService {
    user_repo: Arc<dyn UserRepository>,
}

fn required(value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(message.to_string()).into());
    }
    Ok(())
}

impl AccountService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> AccountService {
        AccountService { user_repo }
    }

    pub async fn signup(
        &self,
        email: String,
        password: String,
        name: Option<String>,
    ) -> Result<User> {
        required(&email, "email and password are required")?;
        required(&password, "email and password are required")?;

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::UserAlreadyExists.into());
        }

        let name = name.filter(|n| !n.trim().is_empty());
        let user = self
            .user_repo
            .create_user(email, name, hash_password(&password)?)
            .await?;
        log::info!(user_id = user.id; "User signed up");
        Ok(user)
    }

    pub async fn login(&self, email: String, password: String) -> Result<User> {
        let user = self.user_repo.find_by_email(email.as_str()).await?;
        match user {
            Some(user) => {
                if verify_password(&password, &user.password)? {
                    Ok(user)
                } else {
                    Err(AppError::WrongPassword.into())
                }
            }
            None => Err(AppError::UserNotFound.into()),
        }
    }

    pub async fn me(&self, id: i64) -> Result<User> {
        self.user_repo
            .find(id)
            .await?
            .ok_or_else(|| AppError::UserNotFound.into())
    }

    pub async fn update_profile(&self, id: i64, name: String, email: String) -> Result<User> {
        required(&name, "name and email are required")?;
        required(&email, "name and email are required")?;

        if let Some(owner) = self.user_repo.find_by_email(&email).await? {
            if owner.id != id {
                return Err(AppError::UserAlreadyExists.into());
            }
        }

        self.me(id).await?;
        self.user_repo.update_profile(id, name, email).await
    }

    pub async fn change_password(
        &self,
        id: i64,
        current_password: String,
        new_password: String,
    ) -> Result<()> {
        required(&current_password, "all password fields are required")?;
        required(&new_password, "all password fields are required")?;

        let user = self.me(id).await?;
        if !verify_password(&current_password, &user.password)? {
            log::info!(user_id = id; "Rejected password change");
            return Err(AppError::WrongPassword.into());
        }

        self.user_repo
            .update_password(id, hash_password(&new_password)?)
            .await
    }
}

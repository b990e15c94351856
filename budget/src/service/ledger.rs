use crate::domain::category;
use crate::domain::models::{Budget, NewTransaction, Transaction, TxKind};
use crate::domain::repository::{BudgetRepository, TransactionRepository};
use crate::service::AppError;
use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::Arc;

// Amounts are stored as `NUMERIC(14, 2)`: two decimals, magnitude below 10^12.
const MONEY_SCALE: u32 = 2;
const MONEY_LIMIT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

#[derive(Debug, Clone)]
pub struct BudgetInput {
    pub category: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone)]
pub struct TransactionInput {
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: String,
    pub kind: Option<TxKind>,
}

impl BudgetInput {
    fn validate(self) -> Result<BudgetInput> {
        let category = self.category.trim().to_string();
        if category.is_empty() {
            return Err(AppError::Validation("category is required".to_string()).into());
        }
        if self.amount < Decimal::ZERO {
            return Err(AppError::Validation("amount must not be negative".to_string()).into());
        }
        let amount = money(self.amount)?;
        warn_unknown_category(&category);

        Ok(BudgetInput { category, amount })
    }
}

impl TransactionInput {
    fn into_new(self) -> Result<NewTransaction> {
        let description = self.description.trim().to_string();
        let category = self.category.trim().to_string();
        if description.is_empty() || category.is_empty() {
            return Err(
                AppError::Validation("description and category are required".to_string()).into(),
            );
        }
        let amount = money(self.amount)?;
        warn_unknown_category(&category);

        Ok(NewTransaction::normalized(
            description,
            amount,
            self.kind,
            self.date,
            category,
        ))
    }
}

/// Rounds to cents and rejects magnitudes the store cannot hold.
fn money(amount: Decimal) -> Result<Decimal> {
    let amount =
        amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if amount.abs() >= MONEY_LIMIT {
        return Err(AppError::Validation("amount is too large".to_string()).into());
    }
    Ok(amount)
}

fn warn_unknown_category(category: &str) {
    if !category::is_known(category) {
        log::warn!(category:% = category; "Unrecognised category");
    }
}

/// Budget and transaction CRUD scoped to the calling user.
pub struct LedgerService {
    budget_repo: Arc<dyn BudgetRepository>,
    transaction_repo: Arc<dyn TransactionRepository>,
}

impl LedgerService {
    pub fn new(
        budget_repo: Arc<dyn BudgetRepository>,
        transaction_repo: Arc<dyn TransactionRepository>,
    ) -> LedgerService {
        LedgerService {
            budget_repo,
            transaction_repo,
        }
    }

    pub async fn budgets(&self, user_id: i64) -> Result<Vec<Budget>> {
        self.budget_repo.list(user_id).await
    }

    pub async fn create_budget(&self, user_id: i64, input: BudgetInput) -> Result<Budget> {
        let input = input.validate()?;
        self.budget_repo
            .create(user_id, input.category, input.amount)
            .await
    }

    pub async fn update_budget(&self, user_id: i64, id: i64, input: BudgetInput) -> Result<Budget> {
        let input = input.validate()?;
        self.owned_budget(user_id, id).await?;
        self.budget_repo
            .update(id, input.category, input.amount)
            .await
    }

    pub async fn delete_budget(&self, user_id: i64, id: i64) -> Result<()> {
        self.owned_budget(user_id, id).await?;
        self.budget_repo.delete(id).await
    }

    pub async fn transactions(&self, user_id: i64) -> Result<Vec<Transaction>> {
        self.transaction_repo.list(user_id).await
    }

    pub async fn create_transaction(
        &self,
        user_id: i64,
        input: TransactionInput,
    ) -> Result<Transaction> {
        let new = input.into_new()?;
        self.transaction_repo.create(user_id, new).await
    }

    pub async fn update_transaction(
        &self,
        user_id: i64,
        id: i64,
        input: TransactionInput,
    ) -> Result<Transaction> {
        let new = input.into_new()?;
        self.owned_transaction(user_id, id).await?;
        self.transaction_repo.update(id, new).await
    }

    pub async fn delete_transaction(&self, user_id: i64, id: i64) -> Result<Transaction> {
        self.owned_transaction(user_id, id).await?;
        self.transaction_repo.delete(id).await
    }

    async fn owned_budget(&self, user_id: i64, id: i64) -> Result<Budget> {
        let budget = self
            .budget_repo
            .find(id)
            .await?
            .ok_or(AppError::NotFound("budget"))?;
        if budget.user_id != user_id {
            log::warn!(user_id = user_id, budget_id = id; "Budget owned by another user");
            return Err(AppError::Forbidden.into());
        }
        Ok(budget)
    }

    async fn owned_transaction(&self, user_id: i64, id: i64) -> Result<Transaction> {
        let tx = self
            .transaction_repo
            .find(id)
            .await?
            .ok_or(AppError::NotFound("transaction"))?;
        if tx.user_id != user_id {
            log::warn!(user_id = user_id, transaction_id = id; "Transaction owned by another user");
            return Err(AppError::Forbidden.into());
        }
        Ok(tx)
    }
}

use crate::domain::insights::{
    self, BudgetUsage, DashboardSummary, MonthPeriod, MonthlyStat, OverspentCategory,
};
use crate::domain::models::{Budget, Transaction};
use crate::domain::repository::{BudgetRepository, TransactionRepository};
use crate::service::AppError;
use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct BudgetWithUsage {
    #[serde(flatten)]
    pub budget: Budget,
    pub usage: BudgetUsage,
}

/// Loads a user's snapshot and hands it to the aggregation functions.
pub struct InsightsService {
    budget_repo: Arc<dyn BudgetRepository>,
    transaction_repo: Arc<dyn TransactionRepository>,
}

impl InsightsService {
    pub fn new(
        budget_repo: Arc<dyn BudgetRepository>,
        transaction_repo: Arc<dyn TransactionRepository>,
    ) -> InsightsService {
        InsightsService {
            budget_repo,
            transaction_repo,
        }
    }

    async fn snapshot(&self, user_id: i64) -> Result<(Vec<Budget>, Vec<Transaction>)> {
        let (budgets, transactions) = tokio::try_join!(
            self.budget_repo.list(user_id),
            self.transaction_repo.list(user_id)
        )?;
        Ok((budgets, transactions))
    }

    pub async fn dashboard(&self, user_id: i64) -> Result<DashboardSummary> {
        let (budgets, transactions) = self.snapshot(user_id).await?;
        Ok(insights::dashboard(&budgets, &transactions))
    }

    pub async fn budget_usage(&self, user_id: i64) -> Result<Vec<BudgetWithUsage>> {
        let (budgets, transactions) = self.snapshot(user_id).await?;
        Ok(budgets
            .into_iter()
            .map(|budget| {
                let usage = insights::budget_usage(&budget, &transactions);
                BudgetWithUsage { budget, usage }
            })
            .collect())
    }

    pub async fn overspent(&self, user_id: i64, limit: usize) -> Result<Vec<OverspentCategory>> {
        let (budgets, transactions) = self.snapshot(user_id).await?;
        Ok(insights::top_overspent_categories(
            &budgets,
            &transactions,
            limit,
        ))
    }

    pub async fn monthly(&self, user_id: i64, period: MonthPeriod) -> Result<Vec<MonthlyStat>> {
        if period.month > 11 {
            return Err(AppError::Validation("month must be between 0 and 11".to_string()).into());
        }
        let (budgets, transactions) = self.snapshot(user_id).await?;
        Ok(insights::monthly_rollup(&budgets, &transactions, period))
    }
}

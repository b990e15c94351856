//! Derived views over one user's budgets and transactions.
//!
//! Everything here is a pure function of its inputs. Inputs are unordered
//! snapshots; where order matters the functions sort themselves.
//! Expenses are recognised by a negative amount only.

use crate::domain::models::{Budget, Transaction};
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OVERSPENT_LIMIT: usize = 3;
pub const RECENT_TRANSACTIONS: usize = 5;

const DANGER_PERCENTAGE: Decimal = Decimal::from_parts(90, 0, 0, false, 0);
const WARNING_PERCENTAGE: Decimal = Decimal::from_parts(75, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Safe,
    Warning,
    Danger,
}

impl BudgetStatus {
    pub fn from_percentage(percentage: Decimal) -> BudgetStatus {
        if percentage >= DANGER_PERCENTAGE {
            BudgetStatus::Danger
        } else if percentage >= WARNING_PERCENTAGE {
            BudgetStatus::Warning
        } else {
            BudgetStatus::Safe
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetUsage {
    pub spent: Decimal,
    pub percentage: Decimal,
    pub status: BudgetStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverspentCategory {
    pub category: String,
    pub overspent: Decimal,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyStat {
    pub budget_id: i64,
    pub category: String,
    pub amount: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Totals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    pub totals: Totals,
    pub recent: Vec<Transaction>,
    pub overspent: Vec<OverspentCategory>,
}

/// A calendar month. `month` is 0-based (January = 0); `year: None` matches
/// that month in every year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthPeriod {
    pub month: u32,
    pub year: Option<i32>,
}

impl MonthPeriod {
    pub fn new(month: u32, year: i32) -> MonthPeriod {
        MonthPeriod {
            month,
            year: Some(year),
        }
    }

    pub fn any_year(month: u32) -> MonthPeriod {
        MonthPeriod { month, year: None }
    }

    pub fn contains(&self, date: &impl Datelike) -> bool {
        date.month0() == self.month && self.year.map_or(true, |year| date.year() == year)
    }
}

/// Spent as a percentage of `amount`. A zero allotment yields `0`; a ratio
/// too large for `Decimal` saturates at `Decimal::MAX`.
pub fn percentage_of(spent: Decimal, amount: Decimal) -> Decimal {
    if amount.is_zero() {
        return Decimal::ZERO;
    }
    spent
        .checked_div(amount)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX)
}

pub fn spent_for_category(transactions: &[Transaction], category: &str) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.category == category && t.is_expense())
        .map(|t| t.amount.abs())
        .sum()
}

pub fn budget_usage(budget: &Budget, transactions: &[Transaction]) -> BudgetUsage {
    let spent = spent_for_category(transactions, &budget.category);
    let percentage = percentage_of(spent, budget.amount);

    BudgetUsage {
        spent,
        percentage,
        status: BudgetStatus::from_percentage(percentage),
    }
}

pub fn top_overspent_categories(
    budgets: &[Budget],
    transactions: &[Transaction],
    limit: usize,
) -> Vec<OverspentCategory> {
    let mut overspent: Vec<OverspentCategory> = budgets
        .iter()
        .map(|budget| {
            let spent = spent_for_category(transactions, &budget.category);
            OverspentCategory {
                category: budget.category.clone(),
                overspent: spent - budget.amount,
                percentage: percentage_of(spent, budget.amount),
            }
        })
        .filter(|c| c.overspent > Decimal::ZERO)
        .collect();

    // stable: equal overspend keeps budget order
    overspent.sort_by(|a, b| b.overspent.cmp(&a.overspent));
    overspent.truncate(limit);
    overspent
}

pub fn monthly_rollup(
    budgets: &[Budget],
    transactions: &[Transaction],
    period: MonthPeriod,
) -> Vec<MonthlyStat> {
    budgets
        .iter()
        .map(|budget| {
            let spent: Decimal = transactions
                .iter()
                .filter(|t| {
                    t.category == budget.category && t.is_expense() && period.contains(&t.date)
                })
                .map(|t| t.amount.abs())
                .sum();

            MonthlyStat {
                budget_id: budget.id,
                category: budget.category.clone(),
                amount: budget.amount,
                spent,
                remaining: budget.amount - spent,
            }
        })
        .collect()
}

pub fn totals(transactions: &[Transaction]) -> Totals {
    let income: Decimal = transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum();
    let expenses: Decimal = transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount.abs())
        .sum();

    Totals {
        income,
        expenses,
        balance: income - expenses,
    }
}

/// Newest first by date, then by id.
pub fn recent_transactions(transactions: &[Transaction], n: usize) -> Vec<Transaction> {
    let mut recent = transactions.to_vec();
    recent.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    recent.truncate(n);
    recent
}

pub fn dashboard(budgets: &[Budget], transactions: &[Transaction]) -> DashboardSummary {
    DashboardSummary {
        totals: totals(transactions),
        recent: recent_transactions(transactions, RECENT_TRANSACTIONS),
        overspent: top_overspent_categories(budgets, transactions, DEFAULT_OVERSPENT_LIMIT),
    }
}

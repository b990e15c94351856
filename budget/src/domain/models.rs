use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::Row;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    #[serde(skip_serializing)]
    pub password: String,
}

impl From<PgRow> for User {
    fn from(row: PgRow) -> Self {
        User {
            id: row.get("id"),
            email: row.get("email"),
            name: row.get("name"),
            password: row.get("password"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: i64,
    pub user_id: i64,
    pub category: String,
    pub amount: Decimal,
    /// Running total kept by the store on transaction writes.
    #[serde(rename = "spent")]
    pub spent_total: Decimal,
}

impl From<PgRow> for Budget {
    fn from(row: PgRow) -> Self {
        Budget {
            id: row.get("id"),
            user_id: row.get("user_id"),
            category: row.get("category"),
            amount: row.get("amount"),
            spent_total: row.get("spent"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    /// Direction implied by a signed amount. Zero counts as income.
    pub fn of(amount: Decimal) -> TxKind {
        if amount < Decimal::ZERO {
            TxKind::Expense
        } else {
            TxKind::Income
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            other => Err(anyhow::anyhow!("unknown transaction kind: {other}")),
        }
    }
}

impl TryFrom<String> for TxKind {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub description: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub date: NaiveDate,
    pub category: String,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

impl TryFrom<PgRow> for Transaction {
    type Error = anyhow::Error;

    fn try_from(row: PgRow) -> Result<Self, Self::Error> {
        let kind: String = row.try_get("kind")?;
        Ok(Transaction {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            description: row.try_get("description")?,
            amount: row.try_get("amount")?,
            kind: kind.parse()?,
            date: row.try_get("date")?,
            category: row.try_get("category")?,
        })
    }
}

/// Transaction fields as written to the store. Only built through
/// [`NewTransaction::normalized`], so `kind` always agrees with the sign of `amount`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub description: String,
    pub amount: Decimal,
    pub kind: TxKind,
    pub date: NaiveDate,
    pub category: String,
}

impl NewTransaction {
    /// With a kind hint the magnitude is kept and the sign follows the hint,
    /// otherwise the sign of `amount` decides.
    pub fn normalized(
        description: String,
        amount: Decimal,
        hint: Option<TxKind>,
        date: NaiveDate,
        category: String,
    ) -> NewTransaction {
        let amount = match hint {
            Some(TxKind::Income) => amount.abs(),
            Some(TxKind::Expense) => -amount.abs(),
            None => amount,
        };

        NewTransaction {
            description,
            amount,
            kind: TxKind::of(amount),
            date,
            category,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}

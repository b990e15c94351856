use serde::Serialize;

pub const INCOME_CATEGORIES: &[&str] = &["Salary", "Freelance", "Investments", "Other Income"];

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Transportation",
    "Entertainment",
    "Bills",
    "Utilities",
    "Shopping",
    "Others",
];

#[derive(Debug, Serialize)]
pub struct Categories {
    pub income: &'static [&'static str],
    pub expense: &'static [&'static str],
}

pub fn all() -> Categories {
    Categories {
        income: INCOME_CATEGORIES,
        expense: EXPENSE_CATEGORIES,
    }
}

/// Categories are free text in the store; this only tells whether a label is one the UI offers.
pub fn is_known(category: &str) -> bool {
    INCOME_CATEGORIES.contains(&category) || EXPENSE_CATEGORIES.contains(&category)
}

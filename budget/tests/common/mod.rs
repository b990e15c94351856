use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::test;
use async_trait::async_trait;
use budget::domain::models::{Budget, NewTransaction, Transaction, User};
use budget::domain::repository::{BudgetRepository, TransactionRepository, UserRepository};
use budget::infra::auth::jwt::JwtManager;
use budget::infra::repository::Store;
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex};

pub const SECRET_KEY: &str = "53b65289550252052c61406f0f3dad24";

pub fn jwt() -> JwtManager {
    JwtManager::new(SECRET_KEY, 60 * 60)
}

/// Ledger kept in process memory, standing in for Postgres.
#[derive(Default)]
pub struct MemoryLedger {
    state: Mutex<State>,
}

fn expense_of(amount: Decimal) -> Decimal {
    if amount < Decimal::ZERO {
        amount.abs()
    } else {
        Decimal::ZERO
    }
}

#[derive(Default)]
struct State {
    next_id: i64,
    users: Vec<User>,
    budgets: Vec<Budget>,
    transactions: Vec<Transaction>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn spent_so_far(&self, user_id: i64, category: &str) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| t.user_id == user_id && t.category == category)
            .map(|t| expense_of(t.amount))
            .sum()
    }

    fn adjust_spent(&mut self, user_id: i64, category: &str, delta: Decimal) {
        for budget in self
            .budgets
            .iter_mut()
            .filter(|b| b.user_id == user_id && b.category == category)
        {
            budget.spent_total += delta;
        }
    }
}

pub fn memory_store() -> Store {
    let ledger = Arc::new(MemoryLedger::default());
    Store {
        users: ledger.clone(),
        budgets: ledger.clone(),
        transactions: ledger,
    }
}

impl MemoryLedger {
    fn budget(&self, id: i64) -> Option<Budget> {
        let state = self.state.lock().unwrap();
        state.budgets.iter().find(|b| b.id == id).cloned()
    }
}

#[async_trait]
impl UserRepository for MemoryLedger {
    async fn create_user(
        &self,
        email: String,
        name: Option<String>,
        password: String,
    ) -> anyhow::Result<User> {
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|u| u.email == email) {
            anyhow::bail!("duplicate key value violates unique constraint \"users_email_key\"");
        }
        let user = User {
            id: state.next_id(),
            email,
            name,
            password,
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find(&self, id: i64) -> anyhow::Result<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn update_profile(&self, id: i64, name: String, email: String) -> anyhow::Result<User> {
        let mut state = self.state.lock().unwrap();
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| anyhow::anyhow!("no rows returned"))?;
        user.name = Some(name);
        user.email = email;
        Ok(user.clone())
    }

    async fn update_password(&self, id: i64, password: String) -> anyhow::Result<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(user) = state.users.iter_mut().find(|u| u.id == id) {
            user.password = password;
        }
        Ok(())
    }
}

#[async_trait]
impl BudgetRepository for MemoryLedger {
    async fn list(&self, user_id: i64) -> anyhow::Result<Vec<Budget>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .budgets
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find(&self, id: i64) -> anyhow::Result<Option<Budget>> {
        Ok(self.budget(id))
    }

    async fn create(
        &self,
        user_id: i64,
        category: String,
        amount: Decimal,
    ) -> anyhow::Result<Budget> {
        let mut state = self.state.lock().unwrap();
        let budget = Budget {
            id: state.next_id(),
            user_id,
            spent_total: state.spent_so_far(user_id, &category),
            category,
            amount,
        };
        state.budgets.push(budget.clone());
        Ok(budget)
    }

    async fn update(&self, id: i64, category: String, amount: Decimal) -> anyhow::Result<Budget> {
        let mut state = self.state.lock().unwrap();
        let user_id = state
            .budgets
            .iter()
            .find(|b| b.id == id)
            .map(|b| b.user_id)
            .ok_or_else(|| anyhow::anyhow!("no rows returned"))?;
        let spent = state.spent_so_far(user_id, &category);
        let budget = state
            .budgets
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| anyhow::anyhow!("no rows returned"))?;
        budget.category = category;
        budget.amount = amount;
        budget.spent_total = spent;
        Ok(budget.clone())
    }

    async fn delete(&self, id: i64) -> anyhow::Result<()> {
        let mut state = self.state.lock().unwrap();
        state.budgets.retain(|b| b.id != id);
        Ok(())
    }
}

#[async_trait]
impl TransactionRepository for MemoryLedger {
    async fn list(&self, user_id: i64) -> anyhow::Result<Vec<Transaction>> {
        let state = self.state.lock().unwrap();
        let mut list: Vec<Transaction> = state
            .transactions
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(list)
    }

    async fn find(&self, id: i64) -> anyhow::Result<Option<Transaction>> {
        let state = self.state.lock().unwrap();
        Ok(state.transactions.iter().find(|t| t.id == id).cloned())
    }

    async fn create(&self, user_id: i64, new: NewTransaction) -> anyhow::Result<Transaction> {
        let mut state = self.state.lock().unwrap();
        let tx = Transaction {
            id: state.next_id(),
            user_id,
            description: new.description,
            amount: new.amount,
            kind: new.kind,
            date: new.date,
            category: new.category,
        };
        state.adjust_spent(user_id, &tx.category, expense_of(tx.amount));
        state.transactions.push(tx.clone());
        Ok(tx)
    }

    async fn update(&self, id: i64, new: NewTransaction) -> anyhow::Result<Transaction> {
        let mut state = self.state.lock().unwrap();
        let old = state
            .transactions
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no rows returned"))?;
        state.adjust_spent(old.user_id, &old.category, -expense_of(old.amount));
        state.adjust_spent(old.user_id, &new.category, expense_of(new.amount));

        let tx = Transaction {
            id,
            user_id: old.user_id,
            description: new.description,
            amount: new.amount,
            kind: new.kind,
            date: new.date,
            category: new.category,
        };
        for slot in state.transactions.iter_mut().filter(|t| t.id == id) {
            *slot = tx.clone();
        }
        Ok(tx)
    }

    async fn delete(&self, id: i64) -> anyhow::Result<Transaction> {
        let mut state = self.state.lock().unwrap();
        let old = state
            .transactions
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no rows returned"))?;
        state.adjust_spent(old.user_id, &old.category, -expense_of(old.amount));
        state.transactions.retain(|t| t.id != id);
        Ok(old)
    }
}

pub async fn body_string<B: MessageBody>(resp: ServiceResponse<B>) -> String {
    let bytes = test::read_body(resp).await;
    std::str::from_utf8(&bytes).unwrap().to_string()
}

use crate::api::error::ApiError;
use crate::api::extract::AuthUser;
use crate::api::routes::account::MessageResponse;
use crate::service::ledger::{BudgetInput, LedgerService};
use actix_web::{delete, get, post, put, web, HttpResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug)]
pub struct BudgetBody {
    pub category: String,
    pub amount: Decimal,
}

impl From<BudgetBody> for BudgetInput {
    fn from(body: BudgetBody) -> Self {
        BudgetInput {
            category: body.category,
            amount: body.amount,
        }
    }
}

#[get("/budgets")]
pub async fn list_budgets(
    user: AuthUser,
    ledger: web::Data<LedgerService>,
) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(ledger.budgets(user.0).await?))
}

#[post("/budgets")]
pub async fn create_budget(
    user: AuthUser,
    body: web::Json<BudgetBody>,
    ledger: web::Data<LedgerService>,
) -> Result<HttpResponse, ApiError> {
    let budget = ledger.create_budget(user.0, body.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(budget))
}

#[put("/budgets/{id}")]
pub async fn update_budget(
    user: AuthUser,
    id: web::Path<i64>,
    body: web::Json<BudgetBody>,
    ledger: web::Data<LedgerService>,
) -> Result<HttpResponse, ApiError> {
    let budget = ledger
        .update_budget(user.0, id.into_inner(), body.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(budget))
}

#[delete("/budgets/{id}")]
pub async fn delete_budget(
    user: AuthUser,
    id: web::Path<i64>,
    ledger: web::Data<LedgerService>,
) -> Result<HttpResponse, ApiError> {
    ledger.delete_budget(user.0, id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(&MessageResponse {
        message: "Budget deleted successfully".to_string(),
    }))
}

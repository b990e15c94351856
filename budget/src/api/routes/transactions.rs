use crate::api::error::ApiError;
use crate::api::extract::AuthUser;
use crate::domain::models::TxKind;
use crate::service::ledger::{LedgerService, TransactionInput};
use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug)]
pub struct TransactionBody {
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: String,
    #[serde(rename = "type", default)]
    pub kind: Option<TxKind>,
}

impl From<TransactionBody> for TransactionInput {
    fn from(body: TransactionBody) -> Self {
        TransactionInput {
            description: body.description,
            amount: body.amount,
            date: body.date,
            category: body.category,
            kind: body.kind,
        }
    }
}

#[get("/transactions")]
pub async fn list_transactions(
    user: AuthUser,
    ledger: web::Data<LedgerService>,
) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(ledger.transactions(user.0).await?))
}

#[post("/transactions")]
pub async fn create_transaction(
    user: AuthUser,
    body: web::Json<TransactionBody>,
    ledger: web::Data<LedgerService>,
) -> Result<HttpResponse, ApiError> {
    let tx = ledger
        .create_transaction(user.0, body.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(tx))
}

#[put("/transactions/{id}")]
pub async fn update_transaction(
    user: AuthUser,
    id: web::Path<i64>,
    body: web::Json<TransactionBody>,
    ledger: web::Data<LedgerService>,
) -> Result<HttpResponse, ApiError> {
    let tx = ledger
        .update_transaction(user.0, id.into_inner(), body.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(tx))
}

#[delete("/transactions/{id}")]
pub async fn delete_transaction(
    user: AuthUser,
    id: web::Path<i64>,
    ledger: web::Data<LedgerService>,
) -> Result<HttpResponse, ApiError> {
    let tx = ledger.delete_transaction(user.0, id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(tx))
}

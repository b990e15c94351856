use crate::api::error::ApiError;
use crate::api::extract::AuthUser;
use crate::domain::insights::{MonthPeriod, DEFAULT_OVERSPENT_LIMIT};
use crate::service::insights::InsightsService;
use actix_web::{get, web, HttpResponse};
use chrono::Datelike;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct OverspentQuery {
    pub limit: Option<usize>,
}

#[derive(Deserialize, Debug)]
pub struct MonthlyQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
    #[serde(default)]
    pub all_years: bool,
}

impl MonthlyQuery {
    /// Missing month and year fall back to `today`.
    fn period(&self, today: impl Datelike) -> MonthPeriod {
        let month = self.month.unwrap_or_else(|| today.month0());
        if self.all_years {
            MonthPeriod::any_year(month)
        } else {
            MonthPeriod::new(month, self.year.unwrap_or_else(|| today.year()))
        }
    }
}

#[get("/insights/dashboard")]
pub async fn dashboard(
    user: AuthUser,
    insights: web::Data<InsightsService>,
) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(insights.dashboard(user.0).await?))
}

#[get("/insights/budgets")]
pub async fn budget_usage(
    user: AuthUser,
    insights: web::Data<InsightsService>,
) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(insights.budget_usage(user.0).await?))
}

#[get("/insights/overspent")]
pub async fn overspent(
    user: AuthUser,
    query: web::Query<OverspentQuery>,
    insights: web::Data<InsightsService>,
) -> Result<HttpResponse, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_OVERSPENT_LIMIT);
    Ok(HttpResponse::Ok().json(insights.overspent(user.0, limit).await?))
}

#[get("/insights/monthly")]
pub async fn monthly(
    user: AuthUser,
    query: web::Query<MonthlyQuery>,
    insights: web::Data<InsightsService>,
) -> Result<HttpResponse, ApiError> {
    let period = query.period(chrono::Local::now().date_naive());
    Ok(HttpResponse::Ok().json(insights.monthly(user.0, period).await?))
}

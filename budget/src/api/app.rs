use crate::api::routes::{account, budgets, insights, transactions};
use crate::infra::auth::jwt::JwtManager;
use crate::infra::repository::Store;
use crate::service::account::AccountService;
use crate::service::insights::InsightsService;
use crate::service::ledger::LedgerService;
use actix_web::web::ServiceConfig;
use actix_web::{error, web, HttpResponse};
use std::sync::Arc;

pub fn create_app(store: Store, jwt: JwtManager) -> Box<dyn Fn(&mut ServiceConfig)> {
    let jwt_manager = web::Data::new(jwt);
    let account_service = web::Data::new(AccountService::new(Arc::clone(&store.users)));
    let ledger_service = web::Data::new(LedgerService::new(
        Arc::clone(&store.budgets),
        Arc::clone(&store.transactions),
    ));
    let insights_service = web::Data::new(InsightsService::new(
        Arc::clone(&store.budgets),
        Arc::clone(&store.transactions),
    ));

    Box::new(move |cfg: &mut ServiceConfig| {
        let json_config = web::JsonConfig::default().error_handler(|err, _| {
            let response = HttpResponse::BadRequest().body(format!("invalid body: {err}"));
            error::InternalError::from_response(err, response).into()
        });

        cfg.app_data(json_config)
            .app_data(jwt_manager.clone())
            .app_data(account_service.clone())
            .app_data(ledger_service.clone())
            .app_data(insights_service.clone())
            .service(account::register)
            .service(account::login)
            .service(account::me)
            .service(account::update_profile)
            .service(account::change_password)
            .service(account::categories)
            .service(budgets::list_budgets)
            .service(budgets::create_budget)
            .service(budgets::update_budget)
            .service(budgets::delete_budget)
            .service(transactions::list_transactions)
            .service(transactions::create_transaction)
            .service(transactions::update_transaction)
            .service(transactions::delete_transaction)
            .service(insights::dashboard)
            .service(insights::budget_usage)
            .service(insights::overspent)
            .service(insights::monthly);
    })
}

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use budget::api::app::create_app;
use budget::infra::auth::jwt::JwtManager;
use budget::infra::config::Config;
use budget::infra::db;
use budget::infra::repository::Store;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let pool = db::pg(&config).await?;
    db::migrate(&pool).await?;
    let store = Store::postgres(pool);
    let jwt = JwtManager::new(&config.jwt_secret, config.jwt_ttl_secs);

    log::info!(host:% = config.http_host, port = config.http_port; "Start server");

    let cors_origin = config.cors_origin.clone();
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .configure(create_app(store.clone(), jwt.clone()))
            .wrap(cors)
            .wrap(Logger::default())
    })
    .bind((config.http_host.as_str(), config.http_port))?
    .run()
    .await?;

    Ok(())
}

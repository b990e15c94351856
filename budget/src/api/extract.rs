use crate::api::error::ApiError;
use crate::infra::auth::jwt::JwtManager;
use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use std::future::{ready, Ready};

/// Id of the user named by the request's bearer token.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub i64);

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(extract_user(req))
    }
}

fn extract_user(req: &HttpRequest) -> Result<AuthUser, ApiError> {
    let jwt = req
        .app_data::<web::Data<JwtManager>>()
        .ok_or_else(|| anyhow::anyhow!("JwtManager is not registered"))?;

    let claims = jwt.extract_claims_from_req(req)?;
    Ok(AuthUser(claims.sub))
}

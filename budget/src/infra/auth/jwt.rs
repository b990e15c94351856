use crate::service::AppError;
use actix_web::http::header::AUTHORIZATION;
use actix_web::HttpRequest;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub(crate) sub: i64,
    pub(crate) exp: i64,
}

#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl JwtManager {
    pub fn new(secret_key: &str, ttl_secs: i64) -> JwtManager {
        JwtManager {
            encoding_key: EncodingKey::from_secret(secret_key.as_ref()),
            decoding_key: DecodingKey::from_secret(secret_key.as_ref()),
            ttl_secs,
        }
    }

    pub fn gen_user_token(&self, user_id: i64) -> anyhow::Result<String> {
        self.gen_token(Claims {
            sub: user_id,
            exp: chrono::Utc::now().timestamp() + self.ttl_secs,
        })
    }

    pub fn gen_token(&self, claims: Claims) -> anyhow::Result<String> {
        let token = jsonwebtoken::encode(
            &Header::new(jsonwebtoken::Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?;
        Ok(token)
    }

    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::new(jsonwebtoken::Algorithm::HS256);

        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|t| t.claims)
            .map_err(|_| AppError::Unauthorized)
    }

    pub fn extract_claims_from_req(&self, req: &HttpRequest) -> Result<Claims, AppError> {
        let auth_header = req
            .headers()
            .get(AUTHORIZATION)
            .ok_or(AppError::Unauthorized)?
            .to_str()
            .map_err(|_| AppError::Unauthorized)?;

        let token = auth_header
            .strip_prefix("Bearer")
            .ok_or(AppError::Unauthorized)?
            .trim();

        self.decode(token)
    }
}

use crate::api::error::ApiError;
use crate::api::extract::AuthUser;
use crate::domain::category;
use crate::infra::auth::jwt::JwtManager;
use crate::service::account::AccountService;
use actix_web::{get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug)]
pub struct RegisterBody {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct RegisterResponse {
    pub token: String,
    pub user_id: i64,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ProfileBody {
    pub name: String,
    pub email: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct PasswordBody {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

#[post("/register")]
pub async fn register(
    body: web::Json<RegisterBody>,
    app: web::Data<AccountService>,
    jwt: web::Data<JwtManager>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let user = app.signup(body.email, body.password, body.name).await?;
    let token = jwt.gen_user_token(user.id)?;

    Ok(HttpResponse::Created().json(&RegisterResponse {
        token,
        user_id: user.id,
    }))
}

#[post("/login")]
pub async fn login(
    body: web::Json<LoginBody>,
    jwt: web::Data<JwtManager>,
    app: web::Data<AccountService>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let user = match app.login(body.email.clone(), body.password).await {
        Ok(user) => user,
        Err(err) => {
            log::info!(email:? = body.email; "Failed login attempt");
            return Err(err.into());
        }
    };

    let token = jwt.gen_user_token(user.id)?;
    log::info!(user_id = user.id; "User authenticated");

    Ok(HttpResponse::Ok().json(&RegisterResponse {
        token,
        user_id: user.id,
    }))
}

#[get("/me")]
pub async fn me(user: AuthUser, app: web::Data<AccountService>) -> Result<HttpResponse, ApiError> {
    let user = app.me(user.0).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[put("/profile")]
pub async fn update_profile(
    user: AuthUser,
    body: web::Json<ProfileBody>,
    app: web::Data<AccountService>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let user = app.update_profile(user.0, body.name, body.email).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[put("/profile/password")]
pub async fn change_password(
    user: AuthUser,
    body: web::Json<PasswordBody>,
    app: web::Data<AccountService>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    app.change_password(user.0, body.current_password, body.new_password)
        .await?;

    Ok(HttpResponse::Ok().json(&MessageResponse {
        message: "Password updated successfully".to_string(),
    }))
}

#[get("/categories")]
pub async fn categories() -> HttpResponse {
    HttpResponse::Ok().json(category::all())
}

use crate::service::AppError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use std::fmt;

/// Wraps any handler failure; the status comes from the [`AppError`] inside, if there is one.
#[derive(Debug)]
pub struct ApiError(anyhow::Error);

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        ApiError(err.into())
    }
}

impl ApiError {
    fn app_error(&self) -> Option<&AppError> {
        self.0.downcast_ref::<AppError>()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.app_error() {
            Some(err) => write!(f, "{err}"),
            None => f.write_str("internal server error"),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.app_error() {
            Some(AppError::UserNotFound)
            | Some(AppError::WrongPassword)
            | Some(AppError::UserAlreadyExists)
            | Some(AppError::Validation(_)) => StatusCode::BAD_REQUEST,
            Some(AppError::Unauthorized) => StatusCode::UNAUTHORIZED,
            Some(AppError::Forbidden) => StatusCode::FORBIDDEN,
            Some(AppError::NotFound(_)) => StatusCode::NOT_FOUND,
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.app_error().is_none() {
            log::error!(err:? = self.0; "Request failed");
        }
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}

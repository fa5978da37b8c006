use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pricedrop_core::errors::Error as CoreError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Core(e) => match e {
                CoreError::InvalidConfigValue(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
                }
                CoreError::Format(_) | CoreError::Row { .. } => {
                    (StatusCode::BAD_REQUEST, e.to_string())
                }
            },
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
        };
        if status.is_server_error() {
            tracing::error!("{}", msg);
        } else {
            tracing::warn!("Rejected request: {}", msg);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

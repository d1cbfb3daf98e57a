use std::fmt::Display;

use axum::{http::StatusCode, response::IntoResponse};
use serde::Serialize;
use stagecraft_api::TypeError;
use stagecraft_core::error::{ErrorInfo, ErrorType, InitSceneStoreError, SceneStoreError};
use stagecraft_model::error::ErrorStack;
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug)]
pub struct ApiError {
    pub error_code: &'static str,
    pub message: String,
    pub stack: Vec<String>,
    pub http_status_code: StatusCode,
}

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error_code: &'static str,
    pub message: String,
    /// Message of the error followed by messages of its sources.
    pub stack: Vec<String>,
}

impl ApiError {
    pub fn new(error_code: &'static str, message: String, http_status_code: StatusCode) -> Self {
        ApiError {
            error_code,
            message: message.clone(),
            stack: vec![message],
            http_status_code,
        }
    }

    pub fn malformed_request(err: &dyn Display) -> Self {
        ApiError::new(
            "MALFORMED_REQUEST",
            format!("Received malformed request:\n{err}"),
            StatusCode::BAD_REQUEST,
        )
    }

    pub fn internal(err: &dyn Display) -> Self {
        ApiError::new(
            "INTERNAL_ERROR",
            err.to_string(),
            StatusCode::INTERNAL_SERVER_ERROR,
        )
    }
}

fn store_error_to_api<T>(err: T) -> ApiError
where
    T: std::error::Error + 'static,
    ErrorInfo: for<'a> From<&'a T>,
{
    let stack: Vec<String> = ErrorStack::new(&err).map(ToString::to_string).collect();
    let err_info = ErrorInfo::from(&err);
    let http_status_code = match err_info.error_type {
        ErrorType::UserError => StatusCode::BAD_REQUEST,
        ErrorType::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorType::EntityNotFound => StatusCode::NOT_FOUND,
    };
    if err_info.error_type == ErrorType::ServerError {
        error!(
            error_code = err_info.error_code,
            "{}",
            ErrorStack::new(&err).into_string()
        );
    }
    ApiError {
        error_code: err_info.error_code,
        message: err.to_string(),
        stack,
        http_status_code,
    }
}

macro_rules! impl_api_err {
    ($type:ty) => {
        impl From<$type> for ApiError {
            fn from(err: $type) -> Self {
                store_error_to_api(err)
            }
        }
    };
}

impl_api_err!(SceneStoreError);
impl_api_err!(InitSceneStoreError);

impl From<TypeError> for ApiError {
    fn from(err: TypeError) -> Self {
        ApiError::malformed_request(&err)
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::internal(&err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = axum::Json(ErrorResponse {
            error_code: self.error_code,
            message: self.message,
            stack: self.stack,
        });
        (self.http_status_code, body).into_response()
    }
}

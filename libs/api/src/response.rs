use std::{collections::HashMap, sync::OnceLock};

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use search::QueryError;
use serde_json::json;
use tracing::error;

use crate::ApiError;

const FALLBACK_MESSAGE: &str = "Error interno del servidor.";

static ERROR_CODES: OnceLock<HashMap<String, String>> = OnceLock::new();

fn error_codes() -> &'static HashMap<String, String> {
    ERROR_CODES.get_or_init(|| {
        serde_json::from_str(include_str!("error-code.json"))
            .unwrap_or_default()
    })
}

impl ApiError {
    /// Public message for `error_code`; the leading digits pick the status.
    pub(crate) fn from_code(error_code: &str) -> Self {
        let message = error_codes()
            .get(error_code)
            .cloned()
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());

        if error_code.starts_with("404") {
            ApiError::NotFound(message)
        } else if error_code.starts_with('4') {
            ApiError::ClientError(message)
        } else {
            ApiError::ServerError(message)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status_code, message) = match self {
            ApiError::ClientError(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::ServerError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}

impl From<QueryError> for ApiError {
    fn from(e: QueryError) -> Self {
        ApiError::ClientError(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::ClientError(rejection.body_text())
    }
}

pub type ApiResponse<T> = Result<T, ApiError>;

pub trait IntoApiResponse<T> {
    fn into_response(self, error_code: &str) -> ApiResponse<T>;
}

impl<T, E> IntoApiResponse<T> for Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn into_response(self, error_code: &str) -> ApiResponse<T> {
        self.map_err(|e| {
            let e: anyhow::Error = e.into();
            error!(code = error_code, error = format!("{e:?}"));
            ApiError::from_code(error_code)
        })
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::backend::BackendError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("model {name} version {version} is not served")]
    UnknownModel { name: String, version: String },
    #[error("model {name} is not ready")]
    NotReady { name: &'static str },
    #[error("model {name} is not loaded")]
    NotLoaded { name: &'static str },
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("backend returned no response for the request")]
    EmptyBatch,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::UnknownModel { .. } | AppError::NotReady { .. } => StatusCode::NOT_FOUND,
            AppError::NotLoaded { .. } | AppError::InvalidRequest(_) | AppError::Backend(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::EmptyBatch => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (self.status(), body).into_response()
    }
}

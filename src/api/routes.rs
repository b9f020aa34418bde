use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics::{counter, histogram};
use std::sync::Arc;

use crate::api::{
    dto::{InferRequestBody, InferResponseBody},
    error::AppError,
    ServingState,
};

fn check_model(state: &ServingState, model: &str, version: &str) -> Result<(), AppError> {
    if model != state.model_name || version != state.model_version {
        return Err(AppError::UnknownModel {
            name: model.to_string(),
            version: version.to_string(),
        });
    }
    Ok(())
}

pub async fn model_ready(
    Path((model, version)): Path<(String, String)>,
    State(state): State<Arc<ServingState>>,
) -> Result<Response, AppError> {
    counter!("requests_total", 1, "endpoint" => "ready");
    check_model(&state, &model, &version)?;
    if state.backend.is_some() {
        Ok(StatusCode::OK.into_response())
    } else {
        Err(AppError::NotReady {
            name: state.model_name,
        })
    }
}

pub async fn infer(
    Path((model, version)): Path<(String, String)>,
    State(state): State<Arc<ServingState>>,
    Json(body): Json<InferRequestBody>,
) -> Result<Response, AppError> {
    counter!("requests_total", 1, "endpoint" => "infer");
    check_model(&state, &model, &version)?;
    let backend = state.backend.as_ref().ok_or(AppError::NotLoaded {
        name: state.model_name,
    })?;

    let request = body.into_infer_request().map_err(AppError::InvalidRequest)?;

    // Each HTTP call forms a single-request batch at this boundary.
    let start = std::time::Instant::now();
    let mut responses = backend.execute(vec![request]).await?;
    histogram!(
        "request_latency_ms",
        start.elapsed().as_millis() as f64,
        "endpoint" => "infer"
    );

    let response = responses.pop().ok_or(AppError::EmptyBatch)?;
    Ok(Json(InferResponseBody::from_response(
        state.model_name,
        state.model_version,
        response,
    ))
    .into_response())
}

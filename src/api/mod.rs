use std::sync::Arc;

use crate::backend::ModelBackend;

pub mod dto;
pub mod error;
pub mod routes;

pub const MODEL_NAME: &str = "dumb_stub";
pub const MODEL_VERSION: &str = "1";

/// Shared state behind the HTTP surface. `backend` stays `None` when
/// model load failed at startup; the model then never reports ready.
pub struct ServingState {
    pub model_name: &'static str,
    pub model_version: &'static str,
    pub backend: Option<Arc<dyn ModelBackend>>,
}

impl ServingState {
    pub fn new(backend: Option<Arc<dyn ModelBackend>>) -> Self {
        Self {
            model_name: MODEL_NAME,
            model_version: MODEL_VERSION,
            backend,
        }
    }
}

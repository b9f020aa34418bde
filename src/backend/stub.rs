use std::sync::Arc;

use async_trait::async_trait;

use crate::backend::{
    BackendConfig, BackendError, DataType, InferRequest, InferResponse, ModelBackend, Tensor,
    TensorData, IMAGE_OUTPUT, PROMPT_INPUT,
};
use crate::model::StubModel;

/// Host-side adapter around [`StubModel`]: translates request/response
/// tensors to the model's plain-value interface.
pub struct StubBackend {
    model: Arc<StubModel>,
}

impl StubBackend {
    /// Wraps an already-constructed model. Used by tests that need
    /// non-default sleep bounds; the serving path goes through
    /// [`ModelBackend::initialize`].
    pub fn new(model: StubModel) -> Self {
        Self {
            model: Arc::new(model),
        }
    }

    fn extract_prompt(request: &InferRequest) -> Result<String, BackendError> {
        let tensor = request
            .input(PROMPT_INPUT)
            .ok_or(BackendError::MissingInput(PROMPT_INPUT))?;
        let elements = match (tensor.datatype, &tensor.data) {
            (DataType::Bytes, TensorData::Bytes(elements)) => elements,
            _ => {
                return Err(BackendError::WrongDatatype {
                    name: PROMPT_INPUT,
                    got: tensor.datatype,
                    expected: DataType::Bytes,
                });
            }
        };
        let first = elements
            .first()
            .ok_or(BackendError::EmptyInput(PROMPT_INPUT))?;
        String::from_utf8(first.clone()).map_err(|source| BackendError::InvalidUtf8 {
            name: PROMPT_INPUT,
            source,
        })
    }
}

#[async_trait]
impl ModelBackend for StubBackend {
    async fn initialize(config: BackendConfig) -> Result<Self, BackendError> {
        tracing::info!(path = %config.asset_path.display(), "try to load model weights");
        let model = StubModel::load(&config.asset_path)?;
        tracing::info!("model weights successfully loaded");
        Ok(Self::new(model))
    }

    async fn execute(&self, batch: Vec<InferRequest>) -> Result<Vec<InferResponse>, BackendError> {
        let mut responses = Vec::with_capacity(batch.len());

        for request in &batch {
            let prompt = Self::extract_prompt(request)?;
            tracing::info!(%prompt, "got next prompt for generation");

            // The model blocks for the whole simulated delay; keep that
            // off the async worker threads.
            let model = self.model.clone();
            let frame =
                tokio::task::spawn_blocking(move || model.generate(&prompt)).await?;
            tracing::info!(
                height = frame.height(),
                width = frame.width(),
                "successfully generated image"
            );

            responses.push(InferResponse {
                outputs: vec![Tensor::image(IMAGE_OUTPUT, &frame)],
            });
        }

        Ok(responses)
    }
}

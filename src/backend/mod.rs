use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::ModelError;

pub mod stub;
pub mod tensor;

pub use stub::StubBackend;
pub use tensor::{DataType, InferRequest, InferResponse, Tensor, TensorData};

pub const PROMPT_INPUT: &str = "prompt";
pub const IMAGE_OUTPUT: &str = "image";

/// Where the host expects the image asset. Fixed; there is no runtime
/// configuration surface for this backend.
pub const DEFAULT_ASSET_PATH: &str = "/assets/image.jpg";

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub asset_path: PathBuf,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            asset_path: PathBuf::from(DEFAULT_ASSET_PATH),
        }
    }
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("request is missing input tensor \"{0}\"")]
    MissingInput(&'static str),
    #[error("input tensor \"{name}\" has datatype {got}, expected {expected}")]
    WrongDatatype {
        name: &'static str,
        got: DataType,
        expected: DataType,
    },
    #[error("input tensor \"{0}\" has no elements")]
    EmptyInput(&'static str),
    #[error("input tensor \"{name}\" is not valid UTF-8: {source}")]
    InvalidUtf8 {
        name: &'static str,
        source: std::string::FromUtf8Error,
    },
    #[error("generation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Lifecycle contract the host runtime drives: construct once from a
/// config, then run request batches. Implementations own their model
/// state; there is no ambient singleton.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn initialize(config: BackendConfig) -> Result<Self, BackendError>
    where
        Self: Sized;

    /// Processes a batch of requests, returning one response per request
    /// in submission order. A failure on any request aborts the whole
    /// call; no partial response list is produced.
    async fn execute(&self, batch: Vec<InferRequest>) -> Result<Vec<InferResponse>, BackendError>;
}

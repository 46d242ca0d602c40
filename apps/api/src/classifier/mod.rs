//! House style classification: capability interface only.
//!
//! Inference runs on the client device against a pre-trained model; this
//! service never loads or runs a model itself. `AppState` holds an
//! `Arc<dyn ImageClassifier>` so a host that does have a model can plug one in.

pub mod handlers;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("Classifier model is not available")]
    ModelLoading,

    #[error("Image could not be decoded")]
    ImageConversion,

    #[error("Classification failed: {0}")]
    #[allow(dead_code)]
    Classification(String),
}

/// Top label and its confidence in percent (0–100).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub label: String,
    pub confidence: f64,
}

#[async_trait]
pub trait ImageClassifier: Send + Sync {
    async fn classify(&self, image: Bytes) -> Result<Classification, ClassificationError>;
}

/// Default collaborator when no model is wired in.
pub struct UnavailableClassifier;

#[async_trait]
impl ImageClassifier for UnavailableClassifier {
    async fn classify(&self, _image: Bytes) -> Result<Classification, ClassificationError> {
        Err(ClassificationError::ModelLoading)
    }
}

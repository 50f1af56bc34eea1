//! ContentClassifier port - External content scoring service.
//!
//! The classifier is a black box returning per-category confidence scores
//! under its own category names. Mapping into the internal vocabulary is
//! the classification adapter's job, not the port's.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::DomainError;

/// Raw classifier output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifierResponse {
    /// External category name to score.
    #[serde(default)]
    pub categories: HashMap<String, f64>,
}

impl ClassifierResponse {
    pub fn new(categories: HashMap<String, f64>) -> Self {
        Self { categories }
    }
}

/// Port for classifying message text.
///
/// Implementations may fail for any reason; callers treat every failure as
/// "no classifier signal" and never retry.
#[async_trait]
pub trait ContentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<ClassifierResponse, DomainError>;
}

//! HTTP content classifier - `ContentClassifier` over a JSON endpoint.
//!
//! Sends `{"input": text}` and accepts either `{"categories": {...}}` or a
//! moderation-style `{"results": [{"category_scores": {...}}]}` body.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpClassifierConfig::new("https://classifier.internal/v1/classify")
//!     .with_api_key(api_key)
//!     .with_timeout(Duration::from_secs(3));
//!
//! let classifier = HttpContentClassifier::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{ClassifierResponse, ContentClassifier};

/// Configuration for the HTTP classifier.
#[derive(Debug, Clone)]
pub struct HttpClassifierConfig {
    pub endpoint: String,
    api_key: Option<Secret<String>>,
    /// Client-level request timeout.
    pub timeout: Duration,
}

impl HttpClassifierConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            timeout: Duration::from_secs(5),
        }
    }

    /// Sets the bearer token sent with each request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|key| key.expose_secret().as_str())
    }
}

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    input: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct ClassifyResponse {
    #[serde(default, alias = "category_scores")]
    categories: HashMap<String, f64>,
    #[serde(default)]
    results: Vec<ClassifyResult>,
}

#[derive(Debug, Deserialize)]
struct ClassifyResult {
    #[serde(default)]
    category_scores: HashMap<String, f64>,
}

impl From<ClassifyResponse> for ClassifierResponse {
    fn from(body: ClassifyResponse) -> Self {
        if !body.categories.is_empty() {
            return ClassifierResponse::new(body.categories);
        }
        let categories = body
            .results
            .into_iter()
            .next()
            .map(|result| result.category_scores)
            .unwrap_or_default();
        ClassifierResponse::new(categories)
    }
}

pub struct HttpContentClassifier {
    config: HttpClassifierConfig,
    client: Client,
}

impl HttpContentClassifier {
    pub fn new(config: HttpClassifierConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &HttpClassifierConfig {
        &self.config
    }
}

#[async_trait]
impl ContentClassifier for HttpContentClassifier {
    async fn classify(&self, text: &str) -> Result<ClassifierResponse, DomainError> {
        let mut request = self
            .client
            .post(&self.config.endpoint)
            .json(&ClassifyRequest { input: text });
        if let Some(key) = self.config.api_key() {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                DomainError::timeout("classifier")
            } else {
                DomainError::new(
                    ErrorCode::ClassifierUnavailable,
                    format!("Classifier request failed: {}", e),
                )
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::new(
                ErrorCode::ClassifierUnavailable,
                format!("Classifier returned status {}", status),
            )
            .with_detail("status", status.as_u16().to_string()));
        }

        let body: ClassifyResponse = response.json().await.map_err(|e| {
            DomainError::new(
                ErrorCode::ClassifierUnavailable,
                format!("Invalid classifier response: {}", e),
            )
        })?;

        Ok(body.into())
    }
}

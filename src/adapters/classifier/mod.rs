//! Content classifier adapters.
//!
//! - `HttpContentClassifier` - JSON-over-HTTP classification service
//! - `StaticClassifier` - Fixed responses for tests and offline hosts

mod http;
mod static_classifier;

pub use http::{HttpClassifierConfig, HttpContentClassifier};
pub use static_classifier::StaticClassifier;

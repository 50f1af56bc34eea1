//! Static classifier - Fixed scores for tests and offline hosts.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{ClassifierResponse, ContentClassifier};

#[derive(Debug, Clone)]
enum Behavior {
    Scores(HashMap<String, f64>),
    Fail,
    Delay(Duration, HashMap<String, f64>),
}

/// Returns the same response for every text and counts calls.
#[derive(Debug)]
pub struct StaticClassifier {
    behavior: Behavior,
    calls: AtomicUsize,
}

impl StaticClassifier {
    /// All categories at zero.
    pub fn zero() -> Self {
        Self::with_behavior(Behavior::Scores(HashMap::new()))
    }

    pub fn with_scores<I, S>(scores: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self::with_behavior(Behavior::Scores(
            scores.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Fails every call.
    pub fn failing() -> Self {
        Self::with_behavior(Behavior::Fail)
    }

    /// Answers with zero scores after `delay`.
    pub fn slow(delay: Duration) -> Self {
        Self::with_behavior(Behavior::Delay(delay, HashMap::new()))
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentClassifier for StaticClassifier {
    async fn classify(&self, _text: &str) -> Result<ClassifierResponse, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Scores(scores) => Ok(ClassifierResponse::new(scores.clone())),
            Behavior::Fail => Err(DomainError::new(
                ErrorCode::ClassifierUnavailable,
                "Static classifier configured to fail",
            )),
            Behavior::Delay(delay, scores) => {
                tokio::time::sleep(*delay).await;
                Ok(ClassifierResponse::new(scores.clone()))
            }
        }
    }
}

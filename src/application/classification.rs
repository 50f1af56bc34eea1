//! Classification adapter - wraps the classifier port.
//!
//! Never fails outward: an error, a timeout or a missing classifier all
//! produce the zero-risk signal, which resolves exactly like all-zero
//! scores. No retries.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::bounded::bounded;
use crate::domain::detection::ClassifierSignal;
use crate::ports::ContentClassifier;

/// Whether the classifier contributed to a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationStatus {
    Classified,
    /// The call failed or timed out.
    Unavailable,
    /// The classifier was not consulted.
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationOutcome {
    pub signal: ClassifierSignal,
    pub status: ClassificationStatus,
}

impl ClassificationOutcome {
    pub fn skipped() -> Self {
        Self {
            signal: ClassifierSignal::zero(),
            status: ClassificationStatus::Skipped,
        }
    }

    fn unavailable() -> Self {
        Self {
            signal: ClassifierSignal::zero(),
            status: ClassificationStatus::Unavailable,
        }
    }

    pub fn was_consulted(&self) -> bool {
        self.status != ClassificationStatus::Skipped
    }
}

pub struct ClassificationAdapter {
    classifier: Option<Arc<dyn ContentClassifier>>,
    timeout: Duration,
}

impl ClassificationAdapter {
    pub fn new(classifier: Option<Arc<dyn ContentClassifier>>, timeout: Duration) -> Self {
        Self { classifier, timeout }
    }

    pub fn is_configured(&self) -> bool {
        self.classifier.is_some()
    }

    pub async fn classify(&self, text: &str) -> ClassificationOutcome {
        let Some(classifier) = &self.classifier else {
            debug!("No classifier configured");
            return ClassificationOutcome::skipped();
        };

        match bounded(self.timeout, "classifier", classifier.classify(text)).await {
            Ok(response) => ClassificationOutcome {
                signal: ClassifierSignal::from_external(&response.categories),
                status: ClassificationStatus::Classified,
            },
            Err(err) => {
                warn!(error = %err, "Classifier unavailable, using zero scores");
                ClassificationOutcome::unavailable()
            }
        }
    }
}

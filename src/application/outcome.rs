//! Per-message outcome shared by both flows.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::detection::ScanSkip;
use crate::domain::policy::PolicyReason;

/// Why a flow stopped before deciding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    PolicyDisabled(PolicyReason),
    EmptyText,
    GenericHelpRequest,
    /// Nothing matched and the classifier was not consulted.
    NoRiskSignal,
}

impl From<ScanSkip> for SkipReason {
    fn from(skip: ScanSkip) -> Self {
        match skip {
            ScanSkip::EmptyText => SkipReason::EmptyText,
            ScanSkip::GenericHelpRequest => SkipReason::GenericHelpRequest,
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::PolicyDisabled(reason) => write!(f, "policy_disabled:{}", reason),
            SkipReason::EmptyText => write!(f, "{}", ScanSkip::EmptyText.as_str()),
            SkipReason::GenericHelpRequest => write!(f, "{}", ScanSkip::GenericHelpRequest.as_str()),
            SkipReason::NoRiskSignal => write!(f, "no_risk_signal"),
        }
    }
}

/// Result of running one flow over one message.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome<T> {
    Skipped { reason: SkipReason },
    Evaluated(T),
}

impl<T> PipelineOutcome<T> {
    pub fn skipped(reason: impl Into<SkipReason>) -> Self {
        PipelineOutcome::Skipped {
            reason: reason.into(),
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, PipelineOutcome::Skipped { .. })
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            PipelineOutcome::Skipped { reason } => Some(*reason),
            PipelineOutcome::Evaluated(_) => None,
        }
    }

    pub fn evaluated(&self) -> Option<&T> {
        match self {
            PipelineOutcome::Evaluated(value) => Some(value),
            PipelineOutcome::Skipped { .. } => None,
        }
    }

    pub fn into_evaluated(self) -> Option<T> {
        match self {
            PipelineOutcome::Evaluated(value) => Some(value),
            PipelineOutcome::Skipped { .. } => None,
        }
    }
}

//! Signal types produced by the detection stages.
//!
//! Each stage has its own fixed type so the shape a producer emits is the
//! shape its consumer reads: the pattern scan produces a `PatternSignal`,
//! the classification adapter a `ClassifierSignal`.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use super::{CrisisSeverity, RiskCategory};

/// Where a signal came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalSource {
    Heuristic,
    Classifier,
}

/// Strength of heuristic pattern evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl ConfidenceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::None => "none",
            ConfidenceTier::Low => "low",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::High => "high",
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why the pattern scan stopped without matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanSkip {
    /// Text was empty or whitespace only.
    EmptyText,
    /// Text matched a generic help phrasing with no crisis verb.
    GenericHelpRequest,
}

impl ScanSkip {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanSkip::EmptyText => "empty_text",
            ScanSkip::GenericHelpRequest => "generic_help_request",
        }
    }
}

/// Keyword table partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordCategory {
    DirectSelfHarm,
    DirectViolence,
    AmbiguousDanger,
}

impl KeywordCategory {
    /// Confidence a keyword of this category contributes on its own.
    pub fn confidence(&self) -> ConfidenceTier {
        match self {
            KeywordCategory::DirectSelfHarm | KeywordCategory::DirectViolence => {
                ConfidenceTier::Medium
            }
            KeywordCategory::AmbiguousDanger => ConfidenceTier::Low,
        }
    }

    /// Severity a keyword of this category implies on its own.
    pub fn severity(&self) -> CrisisSeverity {
        match self {
            KeywordCategory::DirectSelfHarm | KeywordCategory::DirectViolence => {
                CrisisSeverity::Medium
            }
            KeywordCategory::AmbiguousDanger => CrisisSeverity::Low,
        }
    }
}

/// Contextual pattern families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Intent or plan phrase near a crisis term.
    Intent,
    /// Crisis term paired with an immediate time reference.
    ImmediateTemporal,
    /// Crisis term paired with a concrete method or means.
    MethodSpecific,
}

/// Who a contextual pattern puts at risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternTarget {
    SelfHarm,
    Violence,
}

/// One contextual pattern hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternMatch {
    pub id: String,
    pub kind: PatternKind,
    pub target: PatternTarget,
}

impl PatternMatch {
    pub fn confidence(&self) -> ConfidenceTier {
        match self.kind {
            PatternKind::ImmediateTemporal | PatternKind::MethodSpecific => ConfidenceTier::High,
            PatternKind::Intent => ConfidenceTier::Medium,
        }
    }

    /// Immediate or method-specific hits override the classifier.
    pub fn forces_critical(&self) -> bool {
        matches!(self.kind, PatternKind::ImmediateTemporal | PatternKind::MethodSpecific)
    }

    pub fn severity(&self) -> CrisisSeverity {
        match (self.kind, self.target) {
            (PatternKind::ImmediateTemporal | PatternKind::MethodSpecific, PatternTarget::SelfHarm) => {
                CrisisSeverity::Critical
            }
            _ => CrisisSeverity::High,
        }
    }
}

/// Output of the pattern scan.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PatternSignal {
    pub skipped: Option<ScanSkip>,
    pub keyword_categories: BTreeSet<KeywordCategory>,
    pub matched_keywords: BTreeSet<String>,
    pub matched_patterns: Vec<PatternMatch>,
    pub confidence: ConfidenceTier,
    /// The matcher's own severity estimate; `None` when nothing matched.
    pub severity: Option<CrisisSeverity>,
}

impl PatternSignal {
    /// A scan that found nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A scan that stopped before matching.
    pub fn skipped(reason: ScanSkip) -> Self {
        Self {
            skipped: Some(reason),
            ..Self::default()
        }
    }

    pub fn source(&self) -> SignalSource {
        SignalSource::Heuristic
    }

    pub fn is_skipped(&self) -> bool {
        self.skipped.is_some()
    }

    pub fn has_keywords(&self) -> bool {
        !self.matched_keywords.is_empty()
    }

    pub fn has_patterns(&self) -> bool {
        !self.matched_patterns.is_empty()
    }

    /// True when anything at all matched.
    pub fn has_signal(&self) -> bool {
        self.has_keywords() || self.has_patterns()
    }

    /// Ids of the contextual patterns that matched.
    pub fn pattern_ids(&self) -> BTreeSet<String> {
        self.matched_patterns.iter().map(|m| m.id.clone()).collect()
    }

    /// High-confidence immediate or method-specific evidence, against self
    /// or others, overrides the classifier.
    pub fn forces_critical(&self) -> bool {
        self.confidence == ConfidenceTier::High
            && self.matched_patterns.iter().any(PatternMatch::forces_critical)
    }

    /// Whether a forcing match puts the author at risk.
    pub fn forces_self_harm_critical(&self) -> bool {
        self.forces_critical()
            && self
                .matched_patterns
                .iter()
                .any(|m| m.forces_critical() && m.target == PatternTarget::SelfHarm)
    }
}

/// Normalized classifier output.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassifierSignal {
    scores: BTreeMap<RiskCategory, f64>,
}

impl ClassifierSignal {
    /// All categories at zero.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Builds a signal from internal categories, clamping to [0, 1].
    pub fn from_scores(scores: impl IntoIterator<Item = (RiskCategory, f64)>) -> Self {
        let mut signal = Self::zero();
        for (category, score) in scores {
            signal.insert(category, score);
        }
        signal
    }

    /// Maps external category names into the internal vocabulary.
    ///
    /// Unknown names and non-finite scores are dropped. When several
    /// spellings map to the same category the highest score wins.
    pub fn from_external(categories: &HashMap<String, f64>) -> Self {
        let mut signal = Self::zero();
        for (name, score) in categories {
            if let Some(category) = RiskCategory::from_external(name) {
                signal.insert(category, *score);
            }
        }
        signal
    }

    fn insert(&mut self, category: RiskCategory, score: f64) {
        if !score.is_finite() {
            return;
        }
        let score = score.clamp(0.0, 1.0);
        if score == 0.0 {
            return;
        }
        let entry = self.scores.entry(category).or_insert(0.0);
        if score > *entry {
            *entry = score;
        }
    }

    pub fn source(&self) -> SignalSource {
        SignalSource::Classifier
    }

    /// Score for one category; absent categories score zero.
    pub fn score(&self, category: RiskCategory) -> f64 {
        self.scores.get(&category).copied().unwrap_or(0.0)
    }

    /// Non-zero scores, in category order.
    pub fn scores(&self) -> impl Iterator<Item = (RiskCategory, f64)> + '_ {
        self.scores.iter().map(|(c, s)| (*c, *s))
    }

    pub fn is_zero(&self) -> bool {
        self.scores.is_empty()
    }

    /// Highest score among moderation-relevant categories, with its category.
    pub fn top_moderation_score(&self) -> Option<(RiskCategory, f64)> {
        self.scores()
            .filter(|(category, _)| category.is_moderation_relevant())
            .fold(None, |best, (category, score)| match best {
                Some((_, best_score)) if best_score >= score => best,
                _ => Some((category, score)),
            })
    }
}

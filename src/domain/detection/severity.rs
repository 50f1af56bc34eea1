//! Severity resolution.
//!
//! Crisis severity and support level come from two independent ladders over
//! the classifier scores; support thresholds sit above severity thresholds
//! so tone changes trigger less readily than logging. Heuristic evidence may
//! only raise the classifier's severity, never lower it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ClassifierSignal, ConfidenceTier, PatternSignal, Predicate, RiskCategory, ThresholdLadder};
use crate::domain::escalation::ModerationAction;

/// Ordered crisis danger classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrisisSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CrisisSeverity {
    /// The next tier up; `Critical` stays `Critical`.
    pub fn raised(self) -> Self {
        match self {
            CrisisSeverity::Low => CrisisSeverity::Medium,
            CrisisSeverity::Medium => CrisisSeverity::High,
            CrisisSeverity::High | CrisisSeverity::Critical => CrisisSeverity::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CrisisSeverity::Low => "low",
            CrisisSeverity::Medium => "medium",
            CrisisSeverity::High => "high",
            CrisisSeverity::Critical => "critical",
        }
    }
}

impl fmt::Display for CrisisSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered support need, governing conversational tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportLevel {
    Stable,
    Mild,
    Moderate,
    Elevated,
    Urgent,
}

impl SupportLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupportLevel::Stable => "stable",
            SupportLevel::Mild => "mild",
            SupportLevel::Moderate => "moderate",
            SupportLevel::Elevated => "elevated",
            SupportLevel::Urgent => "urgent",
        }
    }

    /// The support level paired with a severity tier.
    pub fn counterpart(severity: CrisisSeverity) -> Self {
        match severity {
            CrisisSeverity::Low => SupportLevel::Mild,
            CrisisSeverity::Medium => SupportLevel::Moderate,
            CrisisSeverity::High => SupportLevel::Elevated,
            CrisisSeverity::Critical => SupportLevel::Urgent,
        }
    }
}

impl fmt::Display for SupportLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Intensity bucket of a disclosed concern area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcernBucket {
    Mild,
    Moderate,
    High,
}

impl ConcernBucket {
    fn for_intensity(intensity: f64) -> Self {
        if intensity >= 0.9 {
            ConcernBucket::High
        } else if intensity >= 0.8 {
            ConcernBucket::Moderate
        } else {
            ConcernBucket::Mild
        }
    }
}

/// A classifier category above the disclosure threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcernArea {
    pub category: RiskCategory,
    pub intensity: f64,
    pub bucket: ConcernBucket,
}

/// Resolved crisis assessment for one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityAssessment {
    pub level: CrisisSeverity,
    pub support_level: SupportLevel,
    /// Heuristic confidence the level was resolved with.
    pub confidence: ConfidenceTier,
    /// Sorted by intensity, highest first.
    pub concern_areas: Vec<ConcernArea>,
    /// True when a contextual pattern overrode the classifier.
    pub forced_by_pattern: bool,
}

/// Resolved moderation assessment for one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationAssessment {
    pub level: ModerationAction,
    /// Highest moderation-relevant category score.
    pub content_score: f64,
    pub top_category: Option<RiskCategory>,
    /// An extreme category bypassed the ladder.
    pub forced_ban: bool,
}

impl ModerationAssessment {
    pub fn clean() -> Self {
        Self {
            level: ModerationAction::None,
            content_score: 0.0,
            top_category: None,
            forced_ban: false,
        }
    }
}

/// Combines pattern and classifier signals into ordered levels.
#[derive(Debug, Clone)]
pub struct SeverityResolver {
    severity_ladder: ThresholdLadder<CrisisSeverity>,
    support_ladder: ThresholdLadder<SupportLevel>,
    moderation_ladder: ThresholdLadder<ModerationAction>,
    extreme_content: Vec<Predicate>,
    disclosure_threshold: f64,
}

impl Default for SeverityResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SeverityResolver {
    /// Minimum score for a category to be listed as a concern area.
    pub const DISCLOSURE_THRESHOLD: f64 = 0.6;

    pub fn new() -> Self {
        use RiskCategory::*;

        let severity_ladder = ThresholdLadder::new(CrisisSeverity::Low)
            .rung(
                Predicate::any_above(&[
                    (SelfHarmIntent, 0.85),
                    (SelfHarmInstructions, 0.8),
                    (SelfHarm, 0.95),
                ]),
                CrisisSeverity::Critical,
            )
            .rung(
                Predicate::any_above(&[
                    (SelfHarmIntent, 0.7),
                    (SelfHarm, 0.8),
                    (Violence, 0.85),
                    (HarassmentThreatening, 0.9),
                ]),
                CrisisSeverity::High,
            )
            .rung(
                Predicate::any_above(&[
                    (SelfHarm, 0.5),
                    (SelfHarmIntent, 0.4),
                    (Violence, 0.6),
                    (HarassmentThreatening, 0.7),
                ]),
                CrisisSeverity::Medium,
            );

        let support_ladder = ThresholdLadder::new(SupportLevel::Stable)
            .rung(
                Predicate::any_above(&[
                    (SelfHarmIntent, 0.92),
                    (SelfHarmInstructions, 0.9),
                    (SelfHarm, 0.98),
                ]),
                SupportLevel::Urgent,
            )
            .rung(
                Predicate::any_above(&[
                    (SelfHarmIntent, 0.8),
                    (SelfHarmInstructions, 0.85),
                    (SelfHarm, 0.9),
                ]),
                SupportLevel::Elevated,
            )
            .rung(
                Predicate::any_above(&[(SelfHarm, 0.7), (SelfHarmIntent, 0.6)]),
                SupportLevel::Moderate,
            )
            .rung(
                Predicate::any_above(&[(SelfHarm, 0.55), (SelfHarmIntent, 0.45)]),
                SupportLevel::Mild,
            );

        let moderation_ladder = ThresholdLadder::new(ModerationAction::None)
            .rung(Predicate::ModerationScoreAtLeast(0.95), ModerationAction::Kick)
            .rung(Predicate::ModerationScoreAtLeast(0.85), ModerationAction::Mute)
            .rung(Predicate::ModerationScoreAtLeast(0.5), ModerationAction::Warn);

        let extreme_content = vec![
            Predicate::AtLeast(SexualMinors, 0.5),
            Predicate::AtLeast(ViolenceGraphic, 0.9),
        ];

        Self {
            severity_ladder,
            support_ladder,
            moderation_ladder,
            extreme_content,
            disclosure_threshold: Self::DISCLOSURE_THRESHOLD,
        }
    }

    /// Resolves the crisis assessment for one message.
    pub fn resolve(&self, pattern: &PatternSignal, classifier: &ClassifierSignal) -> SeverityAssessment {
        let classifier_level = self.severity_ladder.evaluate(classifier);
        let mut support_level = self.support_ladder.evaluate(classifier);

        let forced_by_pattern = pattern.forces_critical();
        let level = if forced_by_pattern {
            if pattern.forces_self_harm_critical() {
                support_level = support_level.max(SupportLevel::Elevated);
            }
            CrisisSeverity::Critical
        } else if pattern.confidence == ConfidenceTier::High
            && pattern.severity >= Some(CrisisSeverity::High)
        {
            classifier_level.raised()
        } else {
            classifier_level
        };

        SeverityAssessment {
            level,
            support_level,
            confidence: pattern.confidence,
            concern_areas: self.concern_areas(classifier),
            forced_by_pattern,
        }
    }

    /// Resolves the moderation assessment for one message.
    pub fn resolve_moderation(&self, classifier: &ClassifierSignal) -> ModerationAssessment {
        let (top_category, content_score) = match classifier.top_moderation_score() {
            Some((category, score)) => (Some(category), score),
            None => (None, 0.0),
        };

        if self.extreme_content.iter().any(|p| p.holds(classifier)) {
            return ModerationAssessment {
                level: ModerationAction::Ban,
                content_score,
                top_category,
                forced_ban: true,
            };
        }

        ModerationAssessment {
            level: self.moderation_ladder.evaluate(classifier),
            content_score,
            top_category,
            forced_ban: false,
        }
    }

    fn concern_areas(&self, classifier: &ClassifierSignal) -> Vec<ConcernArea> {
        let mut areas: Vec<ConcernArea> = classifier
            .scores()
            .filter(|(_, score)| *score > self.disclosure_threshold)
            .map(|(category, intensity)| ConcernArea {
                category,
                intensity,
                bucket: ConcernBucket::for_intensity(intensity),
            })
            .collect();
        areas.sort_by(|a, b| b.intensity.total_cmp(&a.intensity));
        areas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::detection::{PatternKind, PatternMatch, PatternTarget};
    use proptest::prelude::*;

    fn classifier(scores: &[(RiskCategory, f64)]) -> ClassifierSignal {
        ClassifierSignal::from_scores(scores.iter().copied())
    }

    fn pattern(confidence: ConfidenceTier, severity: Option<CrisisSeverity>) -> PatternSignal {
        PatternSignal {
            confidence,
            severity,
            ..PatternSignal::empty()
        }
    }

    fn immediate_pattern() -> PatternSignal {
        PatternSignal {
            matched_patterns: vec![PatternMatch {
                id: "self_harm_immediate_act".to_string(),
                kind: PatternKind::ImmediateTemporal,
                target: PatternTarget::SelfHarm,
            }],
            confidence: ConfidenceTier::High,
            severity: Some(CrisisSeverity::Critical),
            ..PatternSignal::empty()
        }
    }

    #[test]
    fn zero_signals_resolve_to_low_and_stable() {
        let assessment = SeverityResolver::new().resolve(&PatternSignal::empty(), &ClassifierSignal::zero());
        assert_eq!(assessment.level, CrisisSeverity::Low);
        assert_eq!(assessment.support_level, SupportLevel::Stable);
        assert_eq!(assessment.confidence, ConfidenceTier::None);
        assert!(assessment.concern_areas.is_empty());
    }

    #[test]
    fn classifier_alone_can_reach_critical() {
        let assessment = SeverityResolver::new().resolve(
            &PatternSignal::empty(),
            &classifier(&[(RiskCategory::SelfHarm, 0.97)]),
        );
        assert_eq!(assessment.level, CrisisSeverity::Critical);
        assert_eq!(assessment.confidence, ConfidenceTier::None);
        assert!(!assessment.forced_by_pattern);
    }

    #[test]
    fn immediate_pattern_forces_critical() {
        let assessment =
            SeverityResolver::new().resolve(&immediate_pattern(), &ClassifierSignal::zero());
        assert_eq!(assessment.level, CrisisSeverity::Critical);
        assert_eq!(assessment.support_level, SupportLevel::Elevated);
        assert!(assessment.forced_by_pattern);
    }

    #[test]
    fn immediate_violence_pattern_forces_critical_without_support_raise() {
        let pattern = PatternSignal {
            matched_patterns: vec![PatternMatch {
                id: "violence_method".to_string(),
                kind: PatternKind::MethodSpecific,
                target: PatternTarget::Violence,
            }],
            confidence: ConfidenceTier::High,
            severity: Some(CrisisSeverity::High),
            ..PatternSignal::empty()
        };
        let assessment = SeverityResolver::new().resolve(&pattern, &ClassifierSignal::zero());
        assert_eq!(assessment.level, CrisisSeverity::Critical);
        assert_eq!(assessment.support_level, SupportLevel::Stable);
        assert!(assessment.forced_by_pattern);
    }

    #[test]
    fn high_confidence_high_severity_raises_one_tier() {
        let assessment = SeverityResolver::new().resolve(
            &pattern(ConfidenceTier::High, Some(CrisisSeverity::High)),
            &classifier(&[(RiskCategory::Violence, 0.7)]),
        );
        assert_eq!(assessment.level, CrisisSeverity::High);
    }

    #[test]
    fn medium_confidence_follows_classifier() {
        let assessment = SeverityResolver::new().resolve(
            &pattern(ConfidenceTier::Medium, Some(CrisisSeverity::High)),
            &classifier(&[(RiskCategory::SelfHarm, 0.6)]),
        );
        assert_eq!(assessment.level, CrisisSeverity::Medium);
    }

    #[test]
    fn support_thresholds_are_stricter_than_severity() {
        let assessment = SeverityResolver::new().resolve(
            &PatternSignal::empty(),
            &classifier(&[(RiskCategory::SelfHarm, 0.85)]),
        );
        assert_eq!(assessment.level, CrisisSeverity::High);
        assert_eq!(assessment.support_level, SupportLevel::Moderate);
    }

    #[test]
    fn concern_areas_are_filtered_sorted_and_bucketed() {
        let assessment = SeverityResolver::new().resolve(
            &PatternSignal::empty(),
            &classifier(&[
                (RiskCategory::Harassment, 0.65),
                (RiskCategory::SelfHarm, 0.92),
                (RiskCategory::Violence, 0.85),
                (RiskCategory::Hate, 0.6),
            ]),
        );
        let areas: Vec<(RiskCategory, ConcernBucket)> = assessment
            .concern_areas
            .iter()
            .map(|a| (a.category, a.bucket))
            .collect();
        assert_eq!(
            areas,
            vec![
                (RiskCategory::SelfHarm, ConcernBucket::High),
                (RiskCategory::Violence, ConcernBucket::Moderate),
                (RiskCategory::Harassment, ConcernBucket::Mild),
            ]
        );
    }

    #[test]
    fn moderation_ladder_maps_content_score() {
        let resolver = SeverityResolver::new();
        let cases = [
            (0.3, ModerationAction::None),
            (0.6, ModerationAction::Warn),
            (0.9, ModerationAction::Mute),
            (0.97, ModerationAction::Kick),
        ];
        for (score, expected) in cases {
            let assessment = resolver.resolve_moderation(&classifier(&[(RiskCategory::Harassment, score)]));
            assert_eq!(assessment.level, expected, "score {}", score);
            assert_eq!(assessment.content_score, score);
            assert!(!assessment.forced_ban);
        }
    }

    #[test]
    fn extreme_categories_force_ban() {
        let resolver = SeverityResolver::new();
        let minors = resolver.resolve_moderation(&classifier(&[(RiskCategory::SexualMinors, 0.55)]));
        assert_eq!(minors.level, ModerationAction::Ban);
        assert!(minors.forced_ban);

        let gore = resolver.resolve_moderation(&classifier(&[(RiskCategory::ViolenceGraphic, 0.93)]));
        assert_eq!(gore.level, ModerationAction::Ban);
    }

    #[test]
    fn self_harm_never_drives_moderation() {
        let assessment = SeverityResolver::new()
            .resolve_moderation(&classifier(&[(RiskCategory::SelfHarm, 0.99)]));
        assert_eq!(assessment.level, ModerationAction::None);
        assert_eq!(assessment.content_score, 0.0);
        assert_eq!(assessment.top_category, None);
    }

    fn arb_classifier() -> impl Strategy<Value = ClassifierSignal> {
        prop::collection::vec((0usize..RiskCategory::ALL.len(), 0.0f64..=1.0), 0..6).prop_map(
            |entries| {
                ClassifierSignal::from_scores(
                    entries
                        .into_iter()
                        .map(|(index, score)| (RiskCategory::ALL[index], score)),
                )
            },
        )
    }

    fn arb_severity() -> impl Strategy<Value = Option<CrisisSeverity>> {
        prop_oneof![
            Just(None),
            Just(Some(CrisisSeverity::Low)),
            Just(Some(CrisisSeverity::Medium)),
            Just(Some(CrisisSeverity::High)),
            Just(Some(CrisisSeverity::Critical)),
        ]
    }

    proptest! {
        #[test]
        fn raising_confidence_never_lowers_severity(
            signal in arb_classifier(),
            severity in arb_severity(),
        ) {
            let resolver = SeverityResolver::new();
            let classifier_only = resolver.resolve(&PatternSignal::empty(), &signal).level;
            let low = resolver.resolve(&pattern(ConfidenceTier::Low, severity), &signal).level;
            let medium = resolver.resolve(&pattern(ConfidenceTier::Medium, severity), &signal).level;
            let high = resolver.resolve(&pattern(ConfidenceTier::High, severity), &signal).level;

            prop_assert!(low >= classifier_only);
            prop_assert!(medium >= low);
            prop_assert!(high >= medium);
        }

        #[test]
        fn support_never_exceeds_severity_counterpart(
            signal in arb_classifier(),
            severity in arb_severity(),
        ) {
            let assessment = SeverityResolver::new()
                .resolve(&pattern(ConfidenceTier::High, severity), &signal);
            prop_assert!(assessment.support_level <= SupportLevel::counterpart(assessment.level));
        }
    }
}

//! Decision engine.
//!
//! Crisis: escalate only when severity is at least high and the pattern
//! scan corroborated it with medium or high confidence. A classifier score
//! alone never escalates.
//!
//! Moderation: act when the content score clears the level's threshold or
//! the behavior window shows spam, then apply progressive discipline.

use crate::domain::behavior::{BehaviorAssessment, BehaviorLimits, BehaviorSnapshot};
use crate::domain::detection::{ConfidenceTier, CrisisSeverity, ModerationAssessment, SeverityAssessment};
use crate::domain::escalation::ModerationAction;
use crate::domain::policy::{AutoModLevel, ModerationPolicy, PolicyDecision};

use super::{CrisisDecision, ModerationDecision, ModerationRules, ModerationTrigger, SupportTier};

/// Content score a message must exceed at this level (0.9 at 1, 0.2 at 5).
pub fn content_threshold(level: AutoModLevel) -> f64 {
    0.9 - 0.175 * f64::from(level.value() - 1)
}

/// Messages per minute a user may send at this level.
///
/// The tracker never reports more than `max_entries` messages over
/// `min_span_secs`, so the bound is scaled around the configured spam rate
/// inside that ceiling: level 3 sits on the spam rate, level 1 halfway to
/// the ceiling, level 5 the same distance below. With the default limits
/// that is 17.5, 15 and 12.5 against a ceiling of 20.
pub fn frequency_bound(level: AutoModLevel, limits: &BehaviorLimits) -> f64 {
    let ceiling = limits.max_entries as f64 * 60.0 / limits.min_span_secs.max(1) as f64;
    let base = limits.max_messages_per_minute.clamp(0.0, ceiling);
    let step = (ceiling - base).min(base) / 4.0;
    base + step * (3.0 - f64::from(level.value()))
}

#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    rules: ModerationRules,
    limits: BehaviorLimits,
}

impl DecisionEngine {
    pub fn new(rules: ModerationRules) -> Self {
        Self {
            rules,
            limits: BehaviorLimits::default(),
        }
    }

    /// Scales the frequency bound to the limits the tracker runs with.
    pub fn with_limits(mut self, limits: BehaviorLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn rules(&self) -> &ModerationRules {
        &self.rules
    }

    pub fn decide_crisis(&self, assessment: &SeverityAssessment, policy: &PolicyDecision) -> CrisisDecision {
        let corroborated = matches!(
            assessment.confidence,
            ConfidenceTier::Medium | ConfidenceTier::High
        );
        let severe = assessment.level >= CrisisSeverity::High;

        CrisisDecision {
            escalate: policy.enabled && severe && corroborated,
            requires_immediate: policy.enabled && severe,
            severity: assessment.level,
            support_level: assessment.support_level,
            support_tier: SupportTier::for_level(assessment.support_level),
        }
    }

    pub fn decide_moderation(
        &self,
        assessment: &ModerationAssessment,
        behavior: &BehaviorAssessment,
        snapshot: &BehaviorSnapshot,
        policy: &ModerationPolicy,
    ) -> ModerationDecision {
        if !policy.enabled {
            return ModerationDecision::none();
        }

        let threshold = content_threshold(policy.level);
        let bound = frequency_bound(policy.level, &self.limits);

        let mut action = ModerationAction::None;
        let mut trigger = None;
        let mut reasons = Vec::new();

        if assessment.forced_ban || assessment.content_score > threshold {
            action = assessment.level.max(ModerationAction::Warn);
            trigger = Some(ModerationTrigger::Content);
            let category = assessment
                .top_category
                .map(|c| c.as_str())
                .unwrap_or("unknown");
            reasons.push(format!(
                "content score {:.2} ({}) above {:.2}",
                assessment.content_score, category, threshold
            ));
        }

        if behavior.evaluated {
            let spam_trigger = if behavior.is_repetitive {
                reasons.push(format!(
                    "repetitive messages (distinct ratio {:.2})",
                    behavior.repetition_ratio
                ));
                Some(ModerationTrigger::Repetition)
            } else if behavior.messages_per_minute > bound {
                reasons.push(format!(
                    "{:.1} messages per minute above {:.1}",
                    behavior.messages_per_minute, bound
                ));
                Some(ModerationTrigger::Frequency)
            } else {
                None
            };

            if spam_trigger.is_some() {
                action = action.max(ModerationAction::Warn);
                trigger = trigger.or(spam_trigger);
            }
        }

        if action == ModerationAction::Warn && snapshot.warnings >= self.rules.max_warnings {
            action = ModerationAction::Mute;
            reasons.push(format!("escalated after {} warnings", snapshot.warnings));
        }
        if action == ModerationAction::Mute && snapshot.mutes >= self.rules.max_mutes {
            action = ModerationAction::Kick;
            reasons.push(format!("escalated after {} mutes", snapshot.mutes));
        }

        if action.is_none() {
            return ModerationDecision::none();
        }

        ModerationDecision {
            action,
            trigger,
            reason: reasons.join("; "),
            requires_immediate: action >= ModerationAction::Kick,
        }
    }
}

//! Risk category vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Internal category vocabulary the classifier's scores are mapped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    SelfHarm,
    SelfHarmIntent,
    SelfHarmInstructions,
    Violence,
    ViolenceGraphic,
    Harassment,
    HarassmentThreatening,
    Hate,
    HateThreatening,
    Sexual,
    SexualMinors,
    Illicit,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 12] = [
        RiskCategory::SelfHarm,
        RiskCategory::SelfHarmIntent,
        RiskCategory::SelfHarmInstructions,
        RiskCategory::Violence,
        RiskCategory::ViolenceGraphic,
        RiskCategory::Harassment,
        RiskCategory::HarassmentThreatening,
        RiskCategory::Hate,
        RiskCategory::HateThreatening,
        RiskCategory::Sexual,
        RiskCategory::SexualMinors,
        RiskCategory::Illicit,
    ];

    /// Maps an external classifier category name into the internal vocabulary.
    ///
    /// Accepts the common spellings (`self-harm`, `self_harm`, `selfHarm`,
    /// `self-harm/intent`, `harassment_threatening`, ...). Returns `None` for
    /// names outside the vocabulary.
    pub fn from_external(name: &str) -> Option<Self> {
        let key: String = name
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' ' | '/'))
            .flat_map(char::to_lowercase)
            .collect();

        let category = match key.as_str() {
            "selfharm" => RiskCategory::SelfHarm,
            "selfharmintent" => RiskCategory::SelfHarmIntent,
            "selfharminstructions" => RiskCategory::SelfHarmInstructions,
            "violence" => RiskCategory::Violence,
            "violencegraphic" => RiskCategory::ViolenceGraphic,
            "harassment" => RiskCategory::Harassment,
            "harassmentthreatening" => RiskCategory::HarassmentThreatening,
            "hate" => RiskCategory::Hate,
            "hatethreatening" => RiskCategory::HateThreatening,
            "sexual" => RiskCategory::Sexual,
            "sexualminors" => RiskCategory::SexualMinors,
            "illicit" | "illicitviolent" => RiskCategory::Illicit,
            _ => return None,
        };
        Some(category)
    }

    /// Returns the canonical external name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::SelfHarm => "self-harm",
            RiskCategory::SelfHarmIntent => "self-harm/intent",
            RiskCategory::SelfHarmInstructions => "self-harm/instructions",
            RiskCategory::Violence => "violence",
            RiskCategory::ViolenceGraphic => "violence/graphic",
            RiskCategory::Harassment => "harassment",
            RiskCategory::HarassmentThreatening => "harassment/threatening",
            RiskCategory::Hate => "hate",
            RiskCategory::HateThreatening => "hate/threatening",
            RiskCategory::Sexual => "sexual",
            RiskCategory::SexualMinors => "sexual/minors",
            RiskCategory::Illicit => "illicit",
        }
    }

    /// Self-harm categories describe risk to the author, never a rule violation.
    pub fn is_self_harm(&self) -> bool {
        matches!(
            self,
            RiskCategory::SelfHarm
                | RiskCategory::SelfHarmIntent
                | RiskCategory::SelfHarmInstructions
        )
    }

    /// Whether the category counts toward a moderation content score.
    pub fn is_moderation_relevant(&self) -> bool {
        !self.is_self_harm()
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_common_spellings() {
        assert_eq!(RiskCategory::from_external("self-harm"), Some(RiskCategory::SelfHarm));
        assert_eq!(RiskCategory::from_external("self_harm"), Some(RiskCategory::SelfHarm));
        assert_eq!(RiskCategory::from_external("selfHarm"), Some(RiskCategory::SelfHarm));
        assert_eq!(
            RiskCategory::from_external("self-harm/intent"),
            Some(RiskCategory::SelfHarmIntent)
        );
        assert_eq!(
            RiskCategory::from_external("harassment_threatening"),
            Some(RiskCategory::HarassmentThreatening)
        );
        assert_eq!(
            RiskCategory::from_external("Sexual/Minors"),
            Some(RiskCategory::SexualMinors)
        );
    }

    #[test]
    fn unknown_names_are_dropped() {
        assert_eq!(RiskCategory::from_external("spam"), None);
        assert_eq!(RiskCategory::from_external(""), None);
    }

    #[test]
    fn canonical_names_round_trip() {
        for category in RiskCategory::ALL {
            assert_eq!(RiskCategory::from_external(category.as_str()), Some(category));
        }
    }

    #[test]
    fn self_harm_is_not_moderation_relevant() {
        assert!(!RiskCategory::SelfHarm.is_moderation_relevant());
        assert!(!RiskCategory::SelfHarmIntent.is_moderation_relevant());
        assert!(RiskCategory::Harassment.is_moderation_relevant());
        assert!(RiskCategory::SexualMinors.is_moderation_relevant());
    }
}

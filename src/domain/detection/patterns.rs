//! Keyword and contextual pattern scan.
//!
//! The scan is the cheap pre-filter in front of the classifier: pure,
//! deterministic and free of I/O. Generic help requests are excluded before
//! any crisis matching runs.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{
    KeywordCategory, PatternKind, PatternMatch, PatternSignal, PatternTarget,
    ScanSkip,
};

/// Generic help phrasings. Excluded unless the text also carries crisis
/// language: a crisis verb, a direct keyword or a contextual pattern.
const GENERIC_HELP_PATTERNS: &[&str] = &[
    r"\b(can|could|would|will)\s+(you|someone|somebody|anyone|anybody|u)\s+(please\s+)?help\s+me\b",
    r"\b(please\s+)?help\s+me\s+(with|study|understand|learn|find|fix|write|figure|choose|pick|decide|make|build|plan|get|do)\b",
    r"\bi\s+need\s+(some\s+)?help\s+(with|on|for)\b",
];

const CRISIS_VERB_PATTERN: &str = r"\b(die|dying|dead|kill\w*|suicid\w*|overdos\w*|self[\s-]?harm\w*|(hurt|hurting|cut|cutting|hang|hanging)\s+myself|(end|ending)\s+(my\s+life|it\s+all))\b";

const KEYWORDS: &[(KeywordCategory, &str)] = &[
    (KeywordCategory::DirectSelfHarm, "kill myself"),
    (KeywordCategory::DirectSelfHarm, "killing myself"),
    (KeywordCategory::DirectSelfHarm, "end my life"),
    (KeywordCategory::DirectSelfHarm, "ending my life"),
    (KeywordCategory::DirectSelfHarm, "take my own life"),
    (KeywordCategory::DirectSelfHarm, "suicide"),
    (KeywordCategory::DirectSelfHarm, "suicidal"),
    (KeywordCategory::DirectSelfHarm, "want to die"),
    (KeywordCategory::DirectSelfHarm, "wanna die"),
    (KeywordCategory::DirectSelfHarm, "hurt myself"),
    (KeywordCategory::DirectSelfHarm, "cut myself"),
    (KeywordCategory::DirectSelfHarm, "self harm"),
    (KeywordCategory::DirectSelfHarm, "self-harm"),
    (KeywordCategory::DirectSelfHarm, "better off dead"),
    (KeywordCategory::DirectSelfHarm, "no reason to live"),
    (KeywordCategory::DirectSelfHarm, "don't want to live"),
    (KeywordCategory::DirectSelfHarm, "dont want to live"),
    (KeywordCategory::DirectViolence, "kill you"),
    (KeywordCategory::DirectViolence, "kill them"),
    (KeywordCategory::DirectViolence, "kill him"),
    (KeywordCategory::DirectViolence, "kill her"),
    (KeywordCategory::DirectViolence, "kill everyone"),
    (KeywordCategory::DirectViolence, "shoot up"),
    (KeywordCategory::DirectViolence, "hurt someone"),
    (KeywordCategory::DirectViolence, "murder"),
    (KeywordCategory::DirectViolence, "stab you"),
    (KeywordCategory::AmbiguousDanger, "can't go on"),
    (KeywordCategory::AmbiguousDanger, "cant go on"),
    (KeywordCategory::AmbiguousDanger, "no way out"),
    (KeywordCategory::AmbiguousDanger, "disappear forever"),
    (KeywordCategory::AmbiguousDanger, "tired of everything"),
    (KeywordCategory::AmbiguousDanger, "done with everything"),
    (KeywordCategory::AmbiguousDanger, "nothing matters"),
    (KeywordCategory::AmbiguousDanger, "hopeless"),
    (KeywordCategory::AmbiguousDanger, "worthless"),
    (KeywordCategory::AmbiguousDanger, "end it"),
];

const CONTEXTUAL: &[(&str, PatternKind, PatternTarget, &str)] = &[
    (
        "self_harm_immediate_act",
        PatternKind::ImmediateTemporal,
        PatternTarget::SelfHarm,
        r"\b(kill|killing|end|ending|hurt|hurting)\s+(myself|my\s+life|it\s+all)\b.{0,30}\b(tonight|today|right\s+now|now|tomorrow|this\s+(weekend|week|morning|evening))\b",
    ),
    (
        "self_harm_immediate_time",
        PatternKind::ImmediateTemporal,
        PatternTarget::SelfHarm,
        r"\b(tonight|today|right\s+now|tomorrow)\b.{0,30}\b(kill(ing)?\s+myself|end(ing)?\s+(my\s+life|it\s+all)|die|suicide)\b",
    ),
    (
        "self_harm_final_goodbye",
        PatternKind::ImmediateTemporal,
        PatternTarget::SelfHarm,
        r"\b(this\s+is\s+(my\s+)?(final\s+)?goodbye|my\s+last\s+message|won't\s+be\s+here\s+tomorrow)\b",
    ),
    (
        "self_harm_method_pills",
        PatternKind::MethodSpecific,
        PatternTarget::SelfHarm,
        r"\b(take|taking|took|swallow|swallowing)\b.{0,20}\b(all|whole|bottle|handful|bunch)\b.{0,20}\b(pills|tablets|meds|medication)\b",
    ),
    (
        "self_harm_method_overdose",
        PatternKind::MethodSpecific,
        PatternTarget::SelfHarm,
        r"\boverdos(e|ing)\s+on\b",
    ),
    (
        "self_harm_method_self_directed",
        PatternKind::MethodSpecific,
        PatternTarget::SelfHarm,
        r"\b(hang|hanging|shoot|shooting|poison|poisoning|drown|drowning)\s+myself\b",
    ),
    (
        "self_harm_method_jump",
        PatternKind::MethodSpecific,
        PatternTarget::SelfHarm,
        r"\b(jump|jumping)\s+(off|from)\s+(a\s+|the\s+|this\s+|my\s+)?(bridge|roof|building|cliff|balcony)\b",
    ),
    (
        "self_harm_method_means",
        PatternKind::MethodSpecific,
        PatternTarget::SelfHarm,
        r"\b(bought|got|have|found|loaded)\b.{0,20}\b(rope|noose|gun|razor|blade)\b.{0,30}\b(myself|end\s+it|die|it\s+all)\b",
    ),
    (
        "self_harm_intent",
        PatternKind::Intent,
        PatternTarget::SelfHarm,
        r"\b(i\s*'?\s*m|i\s+am|im|i)\s+(going|gonna|planning|plan|want|wanna|about|ready|decided)\b.{0,30}\b(kill\s+myself|end\s+(my\s+life|it\s+all)|die|suicide|hurt\s+myself)\b",
    ),
    (
        "self_harm_plan",
        PatternKind::Intent,
        PatternTarget::SelfHarm,
        r"\b(have|made|got)\s+a\s+plan\b.{0,30}\b(die|kill|end|suicide)\b",
    ),
    (
        "violence_immediate",
        PatternKind::ImmediateTemporal,
        PatternTarget::Violence,
        r"\b(kill|shoot|stab|hurt|attack)\s+(you|him|her|them|everyone|everybody|people)\b.{0,30}\b(tonight|today|tomorrow|right\s+now)\b",
    ),
    (
        "violence_method_target",
        PatternKind::MethodSpecific,
        PatternTarget::Violence,
        r"\bshoot(ing)?\s+up\s+(the|my|a|this)\s+(school|office|mall|church|party|class)\b",
    ),
    (
        "violence_intent",
        PatternKind::Intent,
        PatternTarget::Violence,
        r"\b(i\s*'?\s*m|i\s+am|im|i)\s+(going|gonna|planning|want|wanna|about)\b.{0,20}\b(kill|shoot|stab|hurt|attack)\s+(you|him|her|them|everyone|somebody|someone|people)\b",
    ),
];

struct KeywordRule {
    category: KeywordCategory,
    phrase: &'static str,
    regex: Regex,
}

struct ContextRule {
    id: &'static str,
    kind: PatternKind,
    target: PatternTarget,
    regex: Regex,
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern table must compile")
}

static GENERIC_HELP: Lazy<Vec<Regex>> =
    Lazy::new(|| GENERIC_HELP_PATTERNS.iter().map(|p| compile(p)).collect());

static CRISIS_VERB: Lazy<Regex> = Lazy::new(|| compile(CRISIS_VERB_PATTERN));

static KEYWORD_RULES: Lazy<Vec<KeywordRule>> = Lazy::new(|| {
    KEYWORDS
        .iter()
        .map(|(category, phrase)| {
            let body = regex::escape(phrase).replace(' ', r"\s+");
            KeywordRule {
                category: *category,
                phrase: *phrase,
                regex: compile(&format!(r"\b{}\b", body)),
            }
        })
        .collect()
});

static CONTEXT_RULES: Lazy<Vec<ContextRule>> = Lazy::new(|| {
    CONTEXTUAL
        .iter()
        .map(|(id, kind, target, pattern)| ContextRule {
            id: *id,
            kind: *kind,
            target: *target,
            regex: compile(pattern),
        })
        .collect()
});

/// Keyword/regex crisis scanner.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternMatcher;

impl PatternMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Scans a message for crisis language.
    pub fn scan(&self, text: &str) -> PatternSignal {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return PatternSignal::skipped(ScanSkip::EmptyText);
        }

        if is_generic_help_request(&normalized) {
            debug!("Pattern scan skipped: generic help request");
            return PatternSignal::skipped(ScanSkip::GenericHelpRequest);
        }

        let mut signal = PatternSignal::empty();

        for rule in KEYWORD_RULES.iter() {
            if rule.regex.is_match(&normalized) {
                signal.matched_keywords.insert(rule.phrase.to_string());
                signal.keyword_categories.insert(rule.category);
                signal.confidence = signal.confidence.max(rule.category.confidence());
                signal.severity = signal.severity.max(Some(rule.category.severity()));
            }
        }

        for rule in CONTEXT_RULES.iter() {
            if rule.regex.is_match(&normalized) {
                let hit = PatternMatch {
                    id: rule.id.to_string(),
                    kind: rule.kind,
                    target: rule.target,
                };
                signal.confidence = signal.confidence.max(hit.confidence());
                signal.severity = signal.severity.max(Some(hit.severity()));
                signal.matched_patterns.push(hit);
            }
        }

        if signal.has_signal() {
            debug!(
                confidence = %signal.confidence,
                keywords = signal.matched_keywords.len(),
                patterns = signal.matched_patterns.len(),
                "Pattern scan matched"
            );
        }

        signal
    }
}

/// Lowercases, unifies apostrophes and collapses whitespace.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .replace(['\u{2019}', '\u{2018}', '`'], "'")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_generic_help_request(normalized: &str) -> bool {
    GENERIC_HELP.iter().any(|re| re.is_match(normalized)) && !mentions_crisis(normalized)
}

/// Crisis language the help exclusion must never swallow.
fn mentions_crisis(normalized: &str) -> bool {
    CRISIS_VERB.is_match(normalized)
        || KEYWORD_RULES
            .iter()
            .filter(|rule| rule.category != KeywordCategory::AmbiguousDanger)
            .any(|rule| rule.regex.is_match(normalized))
        || CONTEXT_RULES.iter().any(|rule| rule.regex.is_match(normalized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::detection::{ConfidenceTier, CrisisSeverity};

    fn scan(text: &str) -> PatternSignal {
        PatternMatcher::new().scan(text)
    }

    #[test]
    fn built_in_tables_compile() {
        assert_eq!(GENERIC_HELP.len(), GENERIC_HELP_PATTERNS.len());
        assert_eq!(KEYWORD_RULES.len(), KEYWORDS.len());
        assert_eq!(CONTEXT_RULES.len(), CONTEXTUAL.len());
        assert!(CRISIS_VERB.is_match("i want to die"));
    }

    #[test]
    fn empty_text_is_zero_signal() {
        for text in ["", "   ", "\n\t"] {
            let signal = scan(text);
            assert_eq!(signal.skipped, Some(ScanSkip::EmptyText));
            assert_eq!(signal.confidence, ConfidenceTier::None);
            assert!(!signal.has_signal());
        }
    }

    #[test]
    fn generic_help_requests_are_excluded() {
        for text in [
            "can you help me with my homework",
            "Can someone help me study for my exam",
            "please help me understand this error",
            "I need help with my essay",
        ] {
            let signal = scan(text);
            assert_eq!(signal.skipped, Some(ScanSkip::GenericHelpRequest), "{}", text);
            assert!(!signal.has_keywords(), "{}", text);
            assert!(!signal.has_patterns(), "{}", text);
        }
    }

    #[test]
    fn help_request_with_crisis_verb_is_scanned() {
        let signal = scan("can someone help me, i want to kill myself");
        assert!(!signal.is_skipped());
        assert!(signal.has_keywords());
    }

    #[test]
    fn help_prefix_never_hides_direct_keywords() {
        let direct = KEYWORDS
            .iter()
            .filter(|(category, _)| *category != KeywordCategory::AmbiguousDanger);
        for (category, phrase) in direct {
            for prefix in ["can someone help me,", "can you help me,", "could someone help me, there is"] {
                let text = format!("{} {}", prefix, phrase);
                let signal = scan(&text);
                assert!(!signal.is_skipped(), "{}", text);
                assert!(signal.matched_keywords.contains(*phrase), "{}", text);
                assert!(signal.keyword_categories.contains(category), "{}", text);
            }
        }
    }

    #[test]
    fn help_prefix_never_hides_contextual_patterns() {
        let signal = scan("can you help me, i'm going to take all my pills");
        assert!(!signal.is_skipped());
        assert!(signal.has_patterns());
    }

    #[test]
    fn immediate_self_harm_is_high_and_critical() {
        let signal = scan("I want to kill myself tonight");
        assert_eq!(signal.confidence, ConfidenceTier::High);
        assert_eq!(signal.severity, Some(CrisisSeverity::Critical));
        assert!(signal.forces_critical());
        assert!(signal
            .pattern_ids()
            .contains("self_harm_immediate_act"));
    }

    #[test]
    fn method_specific_self_harm_is_high() {
        let signal = scan("I'm going to take all my pills");
        assert_eq!(signal.confidence, ConfidenceTier::High);
        assert!(signal
            .matched_patterns
            .iter()
            .any(|m| m.kind == PatternKind::MethodSpecific));
        assert!(signal.forces_critical());
    }

    #[test]
    fn direct_keyword_only_is_medium() {
        let signal = scan("I've been thinking about suicide a lot");
        assert_eq!(signal.confidence, ConfidenceTier::Medium);
        assert_eq!(signal.severity, Some(CrisisSeverity::Medium));
        assert!(signal.keyword_categories.contains(&KeywordCategory::DirectSelfHarm));
        assert!(!signal.has_patterns());
    }

    #[test]
    fn intent_phrase_is_medium_with_high_severity() {
        let signal = scan("i'm going to kill myself");
        assert_eq!(signal.confidence, ConfidenceTier::Medium);
        assert_eq!(signal.severity, Some(CrisisSeverity::High));
        assert!(!signal.forces_critical());
    }

    #[test]
    fn ambiguous_phrase_is_low() {
        let signal = scan("everything feels hopeless lately");
        assert_eq!(signal.confidence, ConfidenceTier::Low);
        assert_eq!(signal.severity, Some(CrisisSeverity::Low));
        assert!(signal.keyword_categories.contains(&KeywordCategory::AmbiguousDanger));
    }

    #[test]
    fn violence_threat_forces_critical() {
        let signal = scan("i'm going to shoot up the school tomorrow");
        assert_eq!(signal.confidence, ConfidenceTier::High);
        assert_eq!(signal.severity, Some(CrisisSeverity::High));
        assert!(signal.forces_critical());
        assert!(!signal.forces_self_harm_critical());
    }

    #[test]
    fn benign_text_has_no_signal() {
        let signal = scan("that movie was a killer, loved the ending");
        assert!(!signal.is_skipped());
        assert!(!signal.has_signal());
        assert_eq!(signal.confidence, ConfidenceTier::None);
        assert_eq!(signal.severity, None);
    }

    #[test]
    fn curly_apostrophes_are_normalized() {
        let signal = scan("I don\u{2019}t want to live anymore");
        assert!(signal.matched_keywords.contains("don't want to live"));
    }

    #[test]
    fn scan_is_deterministic() {
        let text = "I have a plan to end it all tonight";
        assert_eq!(scan(text), scan(text));
    }
}

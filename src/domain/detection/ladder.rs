//! Data-driven threshold ladders.
//!
//! A ladder is an ordered list of `(predicate, level)` rungs evaluated top
//! down; the first rung whose predicate holds decides the level, otherwise
//! the floor applies. New thresholds are added as rungs, not as branches.

use super::{ClassifierSignal, RiskCategory};

/// Condition over a classifier signal.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Category score strictly above the threshold.
    Above(RiskCategory, f64),
    /// Category score at or above the threshold.
    AtLeast(RiskCategory, f64),
    /// Highest moderation-relevant score at or above the threshold.
    ModerationScoreAtLeast(f64),
    /// Any of the nested predicates holds.
    AnyOf(Vec<Predicate>),
}

impl Predicate {
    pub fn holds(&self, signal: &ClassifierSignal) -> bool {
        match self {
            Predicate::Above(category, threshold) => signal.score(*category) > *threshold,
            Predicate::AtLeast(category, threshold) => signal.score(*category) >= *threshold,
            Predicate::ModerationScoreAtLeast(threshold) => signal
                .top_moderation_score()
                .is_some_and(|(_, score)| score >= *threshold),
            Predicate::AnyOf(predicates) => predicates.iter().any(|p| p.holds(signal)),
        }
    }

    /// Shorthand for an `AnyOf` of `Above` predicates.
    pub fn any_above(thresholds: &[(RiskCategory, f64)]) -> Self {
        Predicate::AnyOf(
            thresholds
                .iter()
                .map(|(category, threshold)| Predicate::Above(*category, *threshold))
                .collect(),
        )
    }
}

/// Ordered `(predicate, level)` rungs with a floor level.
#[derive(Debug, Clone)]
pub struct ThresholdLadder<L> {
    rungs: Vec<(Predicate, L)>,
    floor: L,
}

impl<L: Copy> ThresholdLadder<L> {
    /// Creates an empty ladder that always yields `floor`.
    pub fn new(floor: L) -> Self {
        Self {
            rungs: Vec::new(),
            floor,
        }
    }

    /// Appends a rung below the existing ones.
    pub fn rung(mut self, predicate: Predicate, level: L) -> Self {
        self.rungs.push((predicate, level));
        self
    }

    /// Level of the first rung that holds, if any.
    pub fn first_match(&self, signal: &ClassifierSignal) -> Option<L> {
        self.rungs
            .iter()
            .find(|(predicate, _)| predicate.holds(signal))
            .map(|(_, level)| *level)
    }

    /// Level of the first rung that holds, or the floor.
    pub fn evaluate(&self, signal: &ClassifierSignal) -> L {
        self.first_match(signal).unwrap_or(self.floor)
    }

    pub fn floor(&self) -> L {
        self.floor
    }

    pub fn len(&self) -> usize {
        self.rungs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rungs.is_empty()
    }
}

use std::sync::Arc;

use crate::core::store::RuleStore;
use crate::domain::model::{
    Country, TravelPurpose, TripQuery, VisaDecision, MULTIPLE_RULES_WARNING,
};

/// Stateless evaluator over a shared, read-only rule store.
///
/// Zero candidates produce the conservative embassy-visa fallback; several
/// candidates resolve to the earliest loaded one with a warning attached.
#[derive(Debug, Clone)]
pub struct VisaRuleEvaluator {
    store: Arc<RuleStore>,
}

impl VisaRuleEvaluator {
    pub fn new(store: Arc<RuleStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RuleStore {
        &self.store
    }

    pub fn evaluate(
        &self,
        destination: Country,
        passport: Country,
        purpose: TravelPurpose,
        stay_days: u32,
    ) -> VisaDecision {
        let candidates = self
            .store
            .find_matching_rules(destination, passport, purpose, stay_days);

        match candidates.as_slice() {
            [] => {
                tracing::debug!(
                    "No rule for {} -> {} ({}, {} days); using fallback",
                    passport,
                    destination,
                    purpose,
                    stay_days
                );
                VisaDecision::fallback()
            }
            [rule] => VisaDecision::from_rule(rule, Vec::new()),
            [first, ..] => {
                tracing::warn!(
                    "{} rules match {} -> {} ({}, {} days); using the first loaded",
                    candidates.len(),
                    passport,
                    destination,
                    purpose,
                    stay_days
                );
                VisaDecision::from_rule(first, vec![MULTIPLE_RULES_WARNING.to_string()])
            }
        }
    }

    pub fn evaluate_trip(&self, trip: &TripQuery) -> VisaDecision {
        self.evaluate(trip.destination, trip.passport, trip.purpose, trip.stay_days)
    }
}

impl From<RuleStore> for VisaRuleEvaluator {
    fn from(store: RuleStore) -> Self {
        Self::new(Arc::new(store))
    }
}

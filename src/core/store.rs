use crate::domain::model::{Country, TravelPurpose, VisaRule};

/// Immutable, load-ordered collection of rules.
#[derive(Debug, Clone, Default)]
pub struct RuleStore {
    rules: Vec<VisaRule>,
}

impl RuleStore {
    pub fn new(rules: Vec<VisaRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[VisaRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules for the route and purpose whose `max_stay_days` covers
    /// `stay_days`, in load order.
    pub fn find_matching_rules(
        &self,
        destination: Country,
        passport: Country,
        purpose: TravelPurpose,
        stay_days: u32,
    ) -> Vec<&VisaRule> {
        self.rules
            .iter()
            .filter(|rule| rule.matches(destination, passport, purpose, stay_days))
            .collect()
    }
}

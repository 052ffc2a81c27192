use std::sync::Arc;
use std::thread;
use visa_rules::domain::model::{MULTIPLE_RULES_WARNING, NO_RULE_WARNING};
use visa_rules::{
    render_rules, Country, DocumentType, InlineRuleSource, RuleLoader, RuleParser, RuleStore,
    TravelPurpose, TripQuery, VisaCategory, VisaRule, VisaRuleEvaluator, VisaType,
};

#[allow(clippy::too_many_arguments)]
fn rule(
    destination: Country,
    passport: Country,
    purpose: TravelPurpose,
    max_stay_days: u32,
    visa_category: VisaCategory,
    visa_type: VisaType,
    documents: Vec<DocumentType>,
    processing_days: u32,
) -> VisaRule {
    VisaRule {
        destination,
        passport_country: passport,
        purpose,
        max_stay_days,
        visa_required: visa_category != VisaCategory::VisaFree,
        visa_category,
        visa_type,
        documents,
        processing_days,
    }
}

fn sample_rules() -> Vec<VisaRule> {
    vec![
        rule(
            Country::Australia,
            Country::India,
            TravelPurpose::Tourism,
            90,
            VisaCategory::EVisa,
            VisaType::Tourist,
            vec![DocumentType::Passport, DocumentType::BankStatement],
            20,
        ),
        // overlaps the rule above; loaded later and processed faster
        rule(
            Country::Australia,
            Country::India,
            TravelPurpose::Tourism,
            30,
            VisaCategory::ElectronicTravelAuthorization,
            VisaType::Tourist,
            vec![DocumentType::Passport],
            1,
        ),
        rule(
            Country::Uae,
            Country::NewZealand,
            TravelPurpose::Business,
            30,
            VisaCategory::VisaOnArrival,
            VisaType::Business,
            vec![DocumentType::Passport, DocumentType::InvitationLetter],
            0,
        ),
        rule(
            Country::Italy,
            Country::Brazil,
            TravelPurpose::Work,
            365,
            VisaCategory::EmbassyVisa,
            VisaType::Work,
            vec![
                DocumentType::Passport,
                DocumentType::EmploymentContract,
                DocumentType::Photo,
                DocumentType::Photo,
            ],
            45,
        ),
    ]
}

fn evaluator() -> VisaRuleEvaluator {
    VisaRuleEvaluator::from(RuleStore::new(sample_rules()))
}

#[test]
fn test_unmatched_route_falls_back_to_embassy_visa() {
    let decision = evaluator().evaluate(Country::Ireland, Country::China, TravelPurpose::Study, 10);

    assert!(decision.visa_required);
    assert_eq!(decision.visa_category, VisaCategory::EmbassyVisa);
    assert_eq!(decision.visa_type, VisaType::None);
    assert!(decision.documents.is_empty());
    assert_eq!(decision.processing_days, 0);
    assert_eq!(decision.warnings, vec![NO_RULE_WARNING.to_string()]);
    assert!(decision.is_fallback());
}

#[test]
fn test_purpose_mismatch_falls_back() {
    let decision = evaluator().evaluate(Country::Uae, Country::NewZealand, TravelPurpose::Tourism, 5);
    assert!(decision.is_fallback());
}

#[test]
fn test_single_match_returns_rule_fields() {
    let decision = evaluator().evaluate(Country::Italy, Country::Brazil, TravelPurpose::Work, 200);

    assert!(decision.visa_required);
    assert_eq!(decision.visa_category, VisaCategory::EmbassyVisa);
    assert_eq!(decision.visa_type, VisaType::Work);
    assert_eq!(
        decision.documents,
        vec![
            DocumentType::Passport,
            DocumentType::EmploymentContract,
            DocumentType::Photo,
            DocumentType::Photo
        ]
    );
    assert_eq!(decision.processing_days, 45);
    assert!(decision.warnings.is_empty());
}

#[test]
fn test_multiple_matches_use_earliest_loaded_rule() {
    let decision = evaluator().evaluate(Country::Australia, Country::India, TravelPurpose::Tourism, 14);

    // the later rule is faster to process but must not win
    assert_eq!(decision.visa_category, VisaCategory::EVisa);
    assert_eq!(decision.processing_days, 20);
    assert_eq!(decision.warnings, vec![MULTIPLE_RULES_WARNING.to_string()]);
}

#[test]
fn test_overlap_disappears_beyond_shorter_bound() {
    let decision = evaluator().evaluate(Country::Australia, Country::India, TravelPurpose::Tourism, 31);
    assert_eq!(decision.visa_category, VisaCategory::EVisa);
    assert!(decision.warnings.is_empty());
}

#[test]
fn test_max_stay_is_an_inclusive_bound() {
    let evaluator = evaluator();
    let at_limit = evaluator.evaluate(Country::Uae, Country::NewZealand, TravelPurpose::Business, 30);
    let past_limit = evaluator.evaluate(Country::Uae, Country::NewZealand, TravelPurpose::Business, 31);

    assert_eq!(at_limit.visa_category, VisaCategory::VisaOnArrival);
    assert!(at_limit.warnings.is_empty());
    assert!(past_limit.is_fallback());
}

#[test]
fn test_rendered_rules_reproduce_in_memory_matches() {
    let in_memory = RuleStore::new(sample_rules());
    let text = render_rules(in_memory.rules()).unwrap();
    let parsed = RuleStore::new(RuleParser::new("rendered").parse(&text));

    assert_eq!(parsed.rules(), in_memory.rules());

    let queries = [
        (Country::Australia, Country::India, TravelPurpose::Tourism, 14),
        (Country::Australia, Country::India, TravelPurpose::Tourism, 90),
        (Country::Australia, Country::India, TravelPurpose::Tourism, 91),
        (Country::Uae, Country::NewZealand, TravelPurpose::Business, 30),
        (Country::Italy, Country::Brazil, TravelPurpose::Work, 365),
        (Country::Ireland, Country::China, TravelPurpose::Study, 1),
    ];
    for (destination, passport, purpose, days) in queries {
        assert_eq!(
            parsed.find_matching_rules(destination, passport, purpose, days),
            in_memory.find_matching_rules(destination, passport, purpose, days),
        );
    }
}

#[test]
fn test_evaluation_from_loaded_text() {
    let source = InlineRuleSource::new(
        "inline",
        r#"[{"destination": "SPAIN", "passportCountry": "MEXICO", "purpose": "TOURISM",
             "maxStayDays": 90, "visaRequired": false, "visaCategory": "VISA_FREE",
             "visaType": "NONE", "documents": ["PASSPORT", "RETURN_TICKET"],
             "processingDays": 0}]"#,
    );
    let evaluator = VisaRuleEvaluator::from(RuleStore::new(RuleLoader::new(source).load()));

    let decision = evaluator.evaluate_trip(&TripQuery {
        destination: Country::Spain,
        passport: Country::Mexico,
        purpose: TravelPurpose::Tourism,
        stay_days: 90,
    });
    assert!(!decision.visa_required);
    assert_eq!(decision.visa_category, VisaCategory::VisaFree);
    assert_eq!(
        decision.documents,
        vec![DocumentType::Passport, DocumentType::ReturnTicket]
    );
}

#[test]
fn test_shared_store_across_threads() {
    let store = Arc::new(RuleStore::new(sample_rules()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let evaluator = VisaRuleEvaluator::new(Arc::clone(&store));
            thread::spawn(move || {
                evaluator
                    .evaluate(Country::Australia, Country::India, TravelPurpose::Tourism, 14)
                    .processing_days
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 20);
    }
}

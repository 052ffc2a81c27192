pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::AppConfig;

pub use crate::core::{
    evaluator::VisaRuleEvaluator,
    loader::{FileRuleSource, InlineRuleSource, RuleLoader},
    parser::{render_rules, ParseReport, RuleParser},
    store::RuleStore,
};
pub use domain::model::{
    Country, DocumentType, TravelPurpose, TripQuery, VisaCategory, VisaDecision, VisaRule,
    VisaType,
};
pub use utils::error::{Result, VisaError};

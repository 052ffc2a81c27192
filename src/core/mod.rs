pub mod evaluator;
pub mod loader;
pub mod parser;
pub mod store;

pub use crate::domain::model::{TripQuery, VisaDecision, VisaRule};
pub use crate::domain::ports::RuleSource;
pub use crate::utils::error::Result;

use crate::utils::error::Result;

/// Where raw rule configuration text comes from.
pub trait RuleSource: Send + Sync {
    /// Human-readable location used in diagnostics.
    fn describe(&self) -> String;

    fn read_rules_text(&self) -> Result<String>;
}

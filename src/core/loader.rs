use std::fs;
use std::path::{Path, PathBuf};

use crate::core::parser::{ParseReport, RuleParser};
use crate::domain::model::VisaRule;
use crate::domain::ports::RuleSource;
use crate::utils::error::Result;

pub const DEFAULT_RULES_PATH: &str = "rules.json";

/// Reads rule text from a file on disk.
#[derive(Debug, Clone)]
pub struct FileRuleSource {
    path: PathBuf,
}

impl FileRuleSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileRuleSource {
    fn default() -> Self {
        Self::new(DEFAULT_RULES_PATH)
    }
}

impl RuleSource for FileRuleSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read_rules_text(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.path)?)
    }
}

/// Rule text held in memory, mostly useful for embedding and tests.
#[derive(Debug, Clone)]
pub struct InlineRuleSource {
    label: String,
    text: String,
}

impl InlineRuleSource {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

impl RuleSource for InlineRuleSource {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn read_rules_text(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}

pub struct RuleLoader<S: RuleSource> {
    source: S,
}

impl<S: RuleSource> RuleLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Loads every well-formed rule. An unreadable source yields no rules.
    pub fn load(&self) -> Vec<VisaRule> {
        self.load_with_report().rules
    }

    pub fn load_with_report(&self) -> ParseReport {
        let location = self.source.describe();
        let text = match self.source.read_rules_text() {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Failed to read rules config {}: {}", location, e);
                return ParseReport::default();
            }
        };

        let report = RuleParser::new(location.as_str()).parse_with_report(&text);
        tracing::info!(
            "Loaded {} visa rule(s) from {} ({} skipped)",
            report.rules.len(),
            location,
            report.skipped.len()
        );
        report
    }
}

impl RuleLoader<FileRuleSource> {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(FileRuleSource::new(path))
    }
}

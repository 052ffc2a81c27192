use crate::core::loader::DEFAULT_RULES_PATH;
use crate::utils::error::{Result, VisaError};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional settings file for the checker.
///
/// ```toml
/// [rules]
/// path = "${VISA_RULES_DIR}/rules.json"
///
/// [logging]
/// level = "info"
/// format = "compact"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the environment value; unset variables are kept as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| VisaError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn rules_path(&self) -> &str {
        self.rules.path.as_deref().unwrap_or(DEFAULT_RULES_PATH)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.level.as_deref()
    }

    pub fn log_format(&self) -> Result<LogFormat> {
        match self.logging.format.as_deref() {
            Some(format) => format.parse(),
            None => Ok(LogFormat::default()),
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.rules.path {
            validate_path("rules.path", path)?;
        }
        if let Some(level) = &self.logging.level {
            validate_non_empty_string("logging.level", level)?;
        }
        self.log_format()?;
        Ok(())
    }
}

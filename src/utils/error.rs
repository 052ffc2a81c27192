use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisaError {
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Unknown {domain} token: {token:?}")]
    UnknownToken { domain: &'static str, token: String },

    #[error("Invalid number for {field}: {token:?}")]
    InvalidNumber { field: &'static str, token: String },

    #[error("Unterminated rule record")]
    UnterminatedRecord,

    #[error("No value entered for {field}")]
    MissingInput { field: &'static str },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value:?}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Rule,
    Io,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl VisaError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            VisaError::MissingField { .. }
            | VisaError::InvalidNumber { .. }
            | VisaError::UnterminatedRecord => ErrorCategory::Rule,
            VisaError::UnknownToken { .. } | VisaError::MissingInput { .. } => ErrorCategory::Input,
            VisaError::IoError(_) => ErrorCategory::Io,
            VisaError::SerializationError(_)
            | VisaError::TomlError(_)
            | VisaError::ConfigError { .. }
            | VisaError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // a single bad record never stops a load
            VisaError::MissingField { .. }
            | VisaError::InvalidNumber { .. }
            | VisaError::UnterminatedRecord => ErrorSeverity::Low,
            VisaError::UnknownToken { .. } | VisaError::MissingInput { .. } => ErrorSeverity::Medium,
            VisaError::ConfigError { .. }
            | VisaError::InvalidConfigValueError { .. }
            | VisaError::TomlError(_) => ErrorSeverity::High,
            VisaError::IoError(_) | VisaError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            VisaError::MissingField { field } => {
                format!("A visa rule is missing the \"{}\" field", field)
            }
            VisaError::UnknownToken { domain, token } => {
                format!("\"{}\" is not a recognised {}", token, domain)
            }
            VisaError::InvalidNumber { field, token } => {
                format!("\"{}\" is not a valid day count for {}", token, field)
            }
            VisaError::UnterminatedRecord => {
                "A visa rule record is missing its closing brace".to_string()
            }
            VisaError::MissingInput { field } => {
                format!("Input ended before a value for {} was entered", field)
            }
            VisaError::IoError(e) => format!("Could not read or write a file: {}", e),
            VisaError::SerializationError(e) => format!("Could not serialize output: {}", e),
            VisaError::TomlError(e) => format!("The configuration file is not valid TOML: {}", e),
            VisaError::ConfigError { message } => format!("Configuration problem: {}", message),
            VisaError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value \"{}\" is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Rule => {
                "Fix the offending record in the rules file; run `visa-check lint` to list them"
                    .to_string()
            }
            ErrorCategory::Input => match self {
                VisaError::UnknownToken { domain, .. } => {
                    format!("Use one of the supported {} values (upper case)", domain)
                }
                VisaError::MissingInput { field } => {
                    format!("Enter a value for {} or pass it as a --{} flag", field, flag_name(field))
                }
                _ => "Check the values you entered".to_string(),
            },
            ErrorCategory::Io => "Make sure the file exists and is readable".to_string(),
            ErrorCategory::Configuration => {
                "Check the TOML configuration file and command line flags".to_string()
            }
        }
    }
}

fn flag_name(field: &str) -> String {
    let mut flag = String::new();
    for c in field.chars() {
        if c.is_ascii_uppercase() {
            flag.push('-');
            flag.push(c.to_ascii_lowercase());
        } else {
            flag.push(c);
        }
    }
    flag
}

pub type Result<T> = std::result::Result<T, VisaError>;

#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

pub use toml_config::AppConfig;

#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "visa-check")]
#[command(about = "Checks visa requirements against a configured rule table")]
pub struct CliConfig {
    /// Rules file; overrides the TOML config and the default
    #[arg(short, long, global = true)]
    pub rules: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log format (compact or json); overrides the TOML config
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Evaluate one trip; missing attributes are prompted for
    Check(TripArgs),
    /// Report records in the rules file that fail to parse
    Lint,
    /// Print the loaded rules in normalized form
    List,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Args)]
pub struct TripArgs {
    #[arg(long)]
    pub destination: Option<String>,

    #[arg(long)]
    pub passport: Option<String>,

    #[arg(long)]
    pub purpose: Option<String>,

    #[arg(long)]
    pub stay_days: Option<String>,

    /// Print the decision as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// `--rules` wins over the config file, which wins over the default.
    pub fn rules_path<'a>(&'a self, app: &'a AppConfig) -> &'a str {
        self.rules.as_deref().unwrap_or_else(|| app.rules_path())
    }

    pub fn log_format(&self, app: &AppConfig) -> crate::Result<crate::utils::logger::LogFormat> {
        match self.log_format.as_deref() {
            Some(format) => format.parse(),
            None => app.log_format(),
        }
    }

    /// Validates the loaded config file and resolves the log format. Errors
    /// here happen before any subscriber is installed.
    pub fn startup_log_format(
        &self,
        app: &AppConfig,
    ) -> crate::Result<crate::utils::logger::LogFormat> {
        use crate::utils::validation::Validate;

        app.validate()?;
        self.log_format(app)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::utils::logger::LogFormat;

    #[test]
    fn test_check_subcommand_flags() {
        let cli = CliConfig::parse_from([
            "visa-check",
            "check",
            "--destination",
            "JAPAN",
            "--stay-days",
            "14",
            "--json",
        ]);
        match cli.command {
            Command::Check(args) => {
                assert_eq!(args.destination.as_deref(), Some("JAPAN"));
                assert_eq!(args.stay_days.as_deref(), Some("14"));
                assert!(args.passport.is_none());
                assert!(args.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rules_path_resolution_order() {
        let app = AppConfig::from_toml_str("[rules]\npath = \"from-config.json\"\n").unwrap();

        let cli = CliConfig::parse_from(["visa-check", "lint"]);
        assert_eq!(cli.rules_path(&app), "from-config.json");
        assert_eq!(cli.rules_path(&AppConfig::default()), "rules.json");

        let cli = CliConfig::parse_from(["visa-check", "--rules", "flag.json", "lint"]);
        assert_eq!(cli.rules_path(&app), "flag.json");
    }

    #[test]
    fn test_startup_log_format_reports_config_errors() {
        let cli = CliConfig::parse_from(["visa-check", "list"]);

        let bad_path = AppConfig::from_toml_str("[rules]\npath = \"\"\n").unwrap();
        assert!(cli.startup_log_format(&bad_path).is_err());

        let bad_flag = CliConfig::parse_from(["visa-check", "list", "--log-format", "xml"]);
        assert!(bad_flag.startup_log_format(&AppConfig::default()).is_err());

        assert_eq!(
            cli.startup_log_format(&AppConfig::default()).unwrap(),
            LogFormat::Compact
        );
    }

    #[test]
    fn test_log_format_override() {
        let app = AppConfig::from_toml_str("[logging]\nformat = \"json\"\n").unwrap();
        let cli = CliConfig::parse_from(["visa-check", "list"]);
        assert_eq!(cli.log_format(&app).unwrap(), LogFormat::Json);

        let cli = CliConfig::parse_from(["visa-check", "list", "--log-format", "compact"]);
        assert_eq!(cli.log_format(&app).unwrap(), LogFormat::Compact);
    }
}

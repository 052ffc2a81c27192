use anyhow::Context;
use clap::Parser;
use visa_rules::config::cli::{render_decision, resolve_trip};
use visa_rules::config::Command;
use visa_rules::utils::error::ErrorSeverity;
use visa_rules::utils::logger::{self, LogFormat};
use visa_rules::{
    render_rules, AppConfig, CliConfig, RuleLoader, RuleStore, VisaError, VisaRuleEvaluator,
};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let app = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("failed to load config file '{}'", path))?,
        None => AppConfig::default(),
    };

    let log_format = cli.startup_log_format(&app).unwrap_or_else(|e| {
        // the config could not be trusted, so report through the default subscriber
        logger::init_cli_logger(cli.verbose, None, LogFormat::default());
        fail(&e)
    });
    logger::init_cli_logger(cli.verbose, app.log_level(), log_format);

    let rules_path = cli.rules_path(&app);
    tracing::debug!("Using rules file {}", rules_path);
    let loader = RuleLoader::from_path(rules_path);

    match &cli.command {
        Command::Check(args) => {
            let stdin = std::io::stdin();
            let trip = resolve_trip(args, &mut stdin.lock(), &mut std::io::stdout())
                .unwrap_or_else(|e| fail(&e));

            let evaluator = VisaRuleEvaluator::from(RuleStore::new(loader.load()));
            let decision = evaluator.evaluate_trip(&trip);

            if args.json {
                println!("{}", serde_json::to_string_pretty(&decision)?);
            } else {
                println!();
                println!("{}", render_decision(&decision));
            }
        }
        Command::Lint => {
            let report = loader.load_with_report();
            println!("{} rule(s) parsed from {}", report.rules.len(), rules_path);
            for skipped in &report.skipped {
                println!("  record #{}: {}", skipped.index, skipped.reason);
                println!("    {}", skipped.snippet);
            }
            if !report.is_clean() {
                std::process::exit(2);
            }
        }
        Command::List => {
            println!("{}", render_rules(&loader.load())?);
        }
    }

    Ok(())
}

fn fail(e: &VisaError) -> ! {
    tracing::error!(
        "{} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("Error: {}", e.user_friendly_message());
    eprintln!("Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

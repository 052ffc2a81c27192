use crate::config::TripArgs;
use crate::domain::model::{TripQuery, VisaDecision};
use crate::utils::error::{Result, VisaError};
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Builds a typed trip from the flags, asking on `input` for anything missing.
/// Answers are upper-cased before the token lookup.
pub fn resolve_trip<R: BufRead, W: Write>(
    args: &TripArgs,
    input: &mut R,
    output: &mut W,
) -> Result<TripQuery> {
    let destination = answer(&args.destination, "Destination country: ", "destination", input, output)?;
    let passport = answer(&args.passport, "Passport country: ", "passport", input, output)?;
    let purpose = answer(
        &args.purpose,
        "Travel purpose (TOURISM, BUSINESS, STUDY, WORK, TRANSIT): ",
        "purpose",
        input,
        output,
    )?;
    let stay_days = answer(&args.stay_days, "Stay duration (days): ", "stayDays", input, output)?;

    Ok(TripQuery {
        destination: parse_token(&destination)?,
        passport: parse_token(&passport)?,
        purpose: parse_token(&purpose)?,
        stay_days: stay_days
            .trim()
            .parse()
            .map_err(|_| VisaError::InvalidNumber {
                field: "stayDays",
                token: stay_days.trim().to_string(),
            })?,
    })
}

fn answer<R: BufRead, W: Write>(
    provided: &Option<String>,
    prompt: &str,
    field: &'static str,
    input: &mut R,
    output: &mut W,
) -> Result<String> {
    if let Some(value) = provided {
        return Ok(value.clone());
    }

    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    if read == 0 {
        return Err(VisaError::MissingInput { field });
    }
    Ok(line)
}

fn parse_token<T: FromStr<Err = VisaError>>(raw: &str) -> Result<T> {
    raw.trim().to_ascii_uppercase().parse()
}

pub fn render_decision(decision: &VisaDecision) -> String {
    if decision.is_fallback() {
        return "No visa rule found for this route".to_string();
    }

    let documents = decision
        .documents
        .iter()
        .map(|d| d.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![
        "--- VISA DECISION ---".to_string(),
        format!("Visa Required: {}", decision.visa_required),
        format!("Visa Category: {}", decision.visa_category),
        format!("Visa Type: {}", decision.visa_type),
        format!("Documents: [{}]", documents),
        format!("Processing Days: {}", decision.processing_days),
    ];
    if !decision.warnings.is_empty() {
        lines.push(format!("Warnings: {}", decision.warnings.join("; ")));
    }
    lines.join("\n")
}

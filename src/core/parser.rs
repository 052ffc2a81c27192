//! Permissive reader for the rule configuration format.
//!
//! Input is either a bracketed list of objects or objects written back to back.
//! Records are cut out by brace depth and every field is located by scanning
//! for its quoted key, so one broken record never prevents the others from
//! loading. Keys are looked up from the start of each record: a key name that
//! also occurs inside an earlier string value will be matched there first.

use crate::domain::model::{DocumentType, VisaRule};
use crate::utils::error::{Result, VisaError};

const DESTINATION: &str = "destination";
const PASSPORT_COUNTRY: &str = "passportCountry";
const PURPOSE: &str = "purpose";
const MAX_STAY_DAYS: &str = "maxStayDays";
const VISA_REQUIRED: &str = "visaRequired";
const VISA_CATEGORY: &str = "visaCategory";
const VISA_TYPE: &str = "visaType";
const DOCUMENTS: &str = "documents";
const PROCESSING_DAYS: &str = "processingDays";

const SNIPPET_CHARS: usize = 80;

/// A record that was dropped during parsing, with the reason it was dropped.
#[derive(Debug)]
pub struct SkippedRecord {
    /// Zero-based position of the record in the source.
    pub index: usize,
    pub reason: VisaError,
    pub snippet: String,
}

#[derive(Debug, Default)]
pub struct ParseReport {
    pub rules: Vec<VisaRule>,
    pub skipped: Vec<SkippedRecord>,
}

impl ParseReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

pub struct RuleParser {
    source: String,
}

impl RuleParser {
    /// `source` names the input in diagnostics (usually the file path).
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn parse(&self, text: &str) -> Vec<VisaRule> {
        self.parse_with_report(text).rules
    }

    pub fn parse_with_report(&self, text: &str) -> ParseReport {
        let mut report = ParseReport::default();
        let text = text.trim();
        if text.is_empty() {
            tracing::debug!("Rule source {} is empty", self.source);
            return report;
        }

        let split = split_records(text);
        for (index, record) in split.records.iter().enumerate() {
            match parse_record(record) {
                Ok(rule) => report.rules.push(rule),
                Err(reason) => self.skip(&mut report, index, record, reason),
            }
        }
        if let Some(tail) = split.unterminated {
            self.skip(&mut report, split.records.len(), tail, VisaError::UnterminatedRecord);
        }

        tracing::debug!(
            "Parsed {} rule(s) from {}, skipped {}",
            report.rules.len(),
            self.source,
            report.skipped.len()
        );
        report
    }

    fn skip(&self, report: &mut ParseReport, index: usize, record: &str, reason: VisaError) {
        let snippet = snippet(record);
        tracing::warn!(
            "Skipping rule #{} in {}: {} ({})",
            index,
            self.source,
            reason,
            snippet
        );
        report.skipped.push(SkippedRecord {
            index,
            reason,
            snippet,
        });
    }
}

/// Serializes rules in the configuration format read by [`RuleParser`].
pub fn render_rules(rules: &[VisaRule]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rules)?)
}

pub(crate) struct SplitRecords<'a> {
    pub records: Vec<&'a str>,
    /// Text from the last `{` that was never closed.
    pub unterminated: Option<&'a str>,
}

/// Cuts the input into top-level `{...}` substrings by tracking brace depth.
/// Separators between records are ignored, and a closing brace with no open
/// record is discarded.
pub(crate) fn split_records(text: &str) -> SplitRecords<'_> {
    let body = text.trim();
    let body = body.strip_prefix('[').unwrap_or(body);
    let body = body.strip_suffix(']').unwrap_or(body);

    let mut records = Vec::new();
    let mut depth = 0usize;
    let mut start = None;

    for (i, c) in body.char_indices() {
        match c {
            '{' => {
                if depth == 0 {
                    start = Some(i);
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    if let Some(s) = start.take() {
                        records.push(&body[s..=i]);
                    }
                }
            }
            _ => {}
        }
    }

    SplitRecords {
        records,
        unterminated: start.map(|s| &body[s..]),
    }
}

fn parse_record(record: &str) -> Result<VisaRule> {
    let destination = extract_string(record, DESTINATION);
    let passport_country = extract_string(record, PASSPORT_COUNTRY);
    let purpose = extract_string(record, PURPOSE);
    let max_stay_days = extract_integer(record, MAX_STAY_DAYS);
    let visa_required = extract_boolean(record, VISA_REQUIRED);
    let visa_category = extract_string(record, VISA_CATEGORY);
    let visa_type = extract_string(record, VISA_TYPE);
    let processing_days = extract_integer(record, PROCESSING_DAYS);
    let documents = extract_string_array(record, DOCUMENTS);

    // every required field must be present before any conversion is attempted
    let destination = required(destination, DESTINATION)?;
    let passport_country = required(passport_country, PASSPORT_COUNTRY)?;
    let purpose = required(purpose, PURPOSE)?;
    let max_stay_days = required(max_stay_days, MAX_STAY_DAYS)?;
    let visa_required = required(visa_required, VISA_REQUIRED)?;
    let visa_category = required(visa_category, VISA_CATEGORY)?;
    let visa_type = required(visa_type, VISA_TYPE)?;
    let processing_days = required(processing_days, PROCESSING_DAYS)?;

    Ok(VisaRule {
        destination: destination.parse()?,
        passport_country: passport_country.parse()?,
        purpose: purpose.parse()?,
        max_stay_days: parse_day_count(MAX_STAY_DAYS, max_stay_days)?,
        visa_required: visa_required.eq_ignore_ascii_case("true"),
        visa_category: visa_category.parse()?,
        visa_type: visa_type.parse()?,
        documents: documents
            .into_iter()
            .map(str::parse::<DocumentType>)
            .collect::<Result<_>>()?,
        processing_days: parse_day_count(PROCESSING_DAYS, processing_days)?,
    })
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str> {
    value.ok_or(VisaError::MissingField { field })
}

/// Day counts are 32-bit signed integers in the format and must not be negative.
fn parse_day_count(field: &'static str, token: &str) -> Result<u32> {
    token
        .parse::<i32>()
        .ok()
        .and_then(|days| u32::try_from(days).ok())
        .ok_or_else(|| VisaError::InvalidNumber {
            field,
            token: token.to_string(),
        })
}

/// Byte offset just past the colon that follows the first `"field"` key.
fn value_start(record: &str, field: &str) -> Option<usize> {
    let key = format!("\"{}\"", field);
    let key_end = record.find(&key)? + key.len();
    let colon = key_end + record[key_end..].find(':')?;
    Some(colon + 1)
}

fn extract_string<'a>(record: &'a str, field: &str) -> Option<&'a str> {
    let rest = &record[value_start(record, field)?..];
    let open = rest.find('"')? + 1;
    let close = open + rest[open..].find('"')?;
    Some(rest[open..close].trim())
}

fn extract_integer<'a>(record: &'a str, field: &str) -> Option<&'a str> {
    scan_token(record, field, |c| c.is_ascii_digit() || c == '-')
}

fn extract_boolean<'a>(record: &'a str, field: &str) -> Option<&'a str> {
    scan_token(record, field, char::is_alphabetic)
}

/// Longest run of `accept` characters right after the colon, ignoring leading
/// whitespace. An empty run means the field is absent.
fn scan_token<'a>(record: &'a str, field: &str, accept: impl Fn(char) -> bool) -> Option<&'a str> {
    let rest = record[value_start(record, field)?..].trim_start();
    let end = rest.find(|c: char| !accept(c)).unwrap_or(rest.len());
    if end == 0 {
        None
    } else {
        Some(&rest[..end])
    }
}

/// Items between the first `[` and the next `]` after the key. A missing or
/// malformed array reads as empty.
fn extract_string_array<'a>(record: &'a str, field: &str) -> Vec<&'a str> {
    let Some(start) = value_start(record, field) else {
        return Vec::new();
    };
    let rest = &record[start..];
    let Some(open) = rest.find('[') else {
        return Vec::new();
    };
    let inner = &rest[open + 1..];
    let Some(close) = inner.find(']') else {
        return Vec::new();
    };

    inner[..close]
        .split(',')
        .map(|item| strip_quotes(item.trim()))
        .filter(|item| !item.is_empty())
        .collect()
}

fn strip_quotes(item: &str) -> &str {
    if item.len() >= 2 && item.starts_with('"') && item.ends_with('"') {
        &item[1..item.len() - 1]
    } else {
        item
    }
}

fn snippet(record: &str) -> String {
    let flat = record.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > SNIPPET_CHARS {
        let mut cut: String = flat.chars().take(SNIPPET_CHARS).collect();
        cut.push_str("...");
        cut
    } else {
        flat
    }
}

//! Prediction reply parsing: turns the model's pipe-delimited text into records.
//!
//! Two formats exist:
//! - the multi-line 6-field schema the prompt asks for (authoritative), parsed
//!   tolerantly by `parse_prediction_reply`;
//! - a legacy single-string 5-field tuple without the year, parsed by
//!   `parse_field_tuple`. The prompt never asks for this shape, so prediction
//!   responses derive their display tuples from 6-field records instead.

use serde::Serialize;
use tracing::{debug, warn};

use crate::prediction::prompts::PREDICTION_SCHEMA;

const RECORD_FIELDS: usize = 6;
const TUPLE_FIELDS: usize = 5;
pub const NOT_AVAILABLE: &str = "N/A";

/// One year of the model's estimate, fields kept as the model wrote them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRecord {
    pub year: String,
    pub purchase_income: String,
    pub rental_income: String,
    pub price_range_low: String,
    pub price_range_high: String,
    pub percentage_change: String,
}

/// Display-ready values: currency strings plus a percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldTuple {
    pub purchase_income: String,
    pub rental_income: String,
    pub price_range_low: String,
    pub price_range_high: String,
    pub percentage_change: String,
}

/// Records plus the lines that did not match the schema.
#[derive(Debug, Clone, Default)]
pub struct PredictionParse {
    pub records: Vec<PredictionRecord>,
    pub skipped: Vec<String>,
}

/// Parses every well-formed line; malformed lines are logged and dropped.
#[allow(dead_code)]
pub fn parse_prediction_reply(text: &str) -> Vec<PredictionRecord> {
    parse_prediction_lines(text).records
}

/// Like [`parse_prediction_reply`] but also returns the skipped lines.
pub fn parse_prediction_lines(text: &str) -> PredictionParse {
    let mut parse = PredictionParse::default();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let tokens = split_tokens(line);

        if tokens.join("|") == PREDICTION_SCHEMA {
            debug!("Skipping echoed schema header");
            parse.skipped.push(line.to_string());
            continue;
        }

        match <[&str; RECORD_FIELDS]>::try_from(tokens.as_slice()) {
            Ok([year, purchase, rental, low, high, change]) => {
                parse.records.push(PredictionRecord {
                    year: year.to_string(),
                    purchase_income: purchase.to_string(),
                    rental_income: rental.to_string(),
                    price_range_low: low.to_string(),
                    price_range_high: high.to_string(),
                    percentage_change: change.to_string(),
                });
            }
            Err(_) => {
                warn!(
                    "Unexpected prediction line format ({} fields): {line}",
                    tokens.len()
                );
                parse.skipped.push(line.to_string());
            }
        }
    }

    parse
}

/// Pipe-split with surrounding whitespace trimmed. Empty segments are dropped,
/// so markdown-style `|a|b|` rows tokenize the same as `a|b`.
fn split_tokens(line: &str) -> Vec<&str> {
    line.split('|')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Parses the legacy 5-field tuple `purchase|rental|low|high|change`.
/// Any other field count yields "N/A" in every position.
#[allow(dead_code)]
pub fn parse_field_tuple(text: &str) -> FieldTuple {
    let tokens: Vec<&str> = text.split('|').map(str::trim).collect();

    match <[&str; TUPLE_FIELDS]>::try_from(tokens.as_slice()) {
        Ok([purchase, rental, low, high, change]) => FieldTuple {
            purchase_income: format_currency(purchase),
            rental_income: format_currency(rental),
            price_range_low: format_currency(low),
            price_range_high: format_currency(high),
            percentage_change: format_percentage(change),
        },
        Err(_) => FieldTuple::not_available(),
    }
}

impl FieldTuple {
    pub fn not_available() -> Self {
        Self {
            purchase_income: NOT_AVAILABLE.to_string(),
            rental_income: NOT_AVAILABLE.to_string(),
            price_range_low: NOT_AVAILABLE.to_string(),
            price_range_high: NOT_AVAILABLE.to_string(),
            percentage_change: NOT_AVAILABLE.to_string(),
        }
    }

    /// Formats a 6-field record for display. The model writes `$120,000` and
    /// `58%`, so currency symbols, separators and percent signs are stripped
    /// before numeric parsing.
    pub fn from_record(record: &PredictionRecord) -> Self {
        Self {
            purchase_income: format_currency(&strip_numeric(&record.purchase_income)),
            rental_income: format_currency(&strip_numeric(&record.rental_income)),
            price_range_low: format_currency(&strip_numeric(&record.price_range_low)),
            price_range_high: format_currency(&strip_numeric(&record.price_range_high)),
            percentage_change: format_percentage(&strip_numeric(&record.percentage_change)),
        }
    }

    /// "low - high"
    #[allow(dead_code)]
    pub fn price_range(&self) -> String {
        format!("{} - {}", self.price_range_low, self.price_range_high)
    }
}

fn strip_numeric(token: &str) -> String {
    token
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '%') && !c.is_whitespace())
        .collect()
}

/// Renders a number as Australian dollars with no fraction digits
/// (`120000` → `$120,000`, `-1500.5` → `-$1,500`). Non-numeric input → "N/A".
pub fn format_currency(token: &str) -> String {
    let value = match token.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => return NOT_AVAILABLE.to_string(),
    };

    let rounded = value.round_ties_even();
    let digits = format!("{:.0}", rounded.abs());
    let grouped = group_thousands(&digits);

    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// `58` → `58%`, `-3.5` → `-3.5%`. Non-numeric input → "N/A".
pub fn format_percentage(token: &str) -> String {
    let token = token.trim();
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => format!("{token}%"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Markdown summary shown by the client, one block per record.
pub fn render_summary(records: &[PredictionRecord]) -> String {
    records
        .iter()
        .map(|r| {
            format!(
                "\n**Year**: {}\n- Buy Income: {}/year\n- Rental Income: {}/year\n- Price Range: {}~{}\n- Percentage Change: {}",
                r.year,
                r.purchase_income,
                r.rental_income,
                r.price_range_low,
                r.price_range_high,
                r.percentage_change
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

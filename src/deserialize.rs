//! Text → DocMap deserialization.
//!
//! Two reconstruction rules apply on top of plain JSON decoding:
//!
//! 1. `steps` becomes a keyed map (`BTreeMap<String, Step>`), so steps can be
//!    looked up and iterated by arbitrary identifier.
//! 2. Any field named `happened` or `published`, at any nesting depth, is
//!    coerced from its textual form into a UTC timestamp. Date-only values
//!    (`2023-01-31`) become midnight UTC; zone-less date-times are read as UTC.
//!
//! No other schema validation happens here. Unknown statuses and kinds
//! decode to their `Other` variants.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use regex_lite::Regex;
use serde_json::Value;

use crate::types::DocMap;

/// Field names coerced to dates wherever they appear.
pub const DATE_FIELDS: [&str; 2] = ["happened", "published"];

/// Error type for DocMap deserialization.
#[derive(Debug, thiserror::Error)]
pub enum DocMapError {
    /// Text is not well-formed JSON, or does not have the envelope shape.
    #[error("Malformed DocMap: {0}")]
    Json(#[from] serde_json::Error),
    /// A date field could not be read as a date.
    #[error("Invalid date in '{field}': {value}")]
    InvalidDate {
        /// Field name.
        field: String,
        /// Offending text.
        value: String,
    },
}

/// Parse a DocMap from its JSON text.
pub fn docmap_from_str(text: &str) -> Result<DocMap, DocMapError> {
    let mut value: Value = serde_json::from_str(text)?;
    coerce_dates(&mut value)?;
    Ok(serde_json::from_value(value)?)
}

/// Serialize a DocMap to JSON text.
pub fn docmap_to_string(docmap: &DocMap) -> Result<String, DocMapError> {
    Ok(serde_json::to_string(docmap)?)
}

/// Rewrite every date field in `value` to RFC 3339 UTC.
pub fn coerce_dates(value: &mut Value) -> Result<(), DocMapError> {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                match child {
                    Value::String(text) if DATE_FIELDS.contains(&key.as_str()) => {
                        let date = parse_date(text).ok_or_else(|| DocMapError::InvalidDate {
                            field: key.clone(),
                            value: text.clone(),
                        })?;
                        *text = date.to_rfc3339_opts(SecondsFormat::AutoSi, true);
                    }
                    _ => coerce_dates(child)?,
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                coerce_dates(item)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn date_only() -> &'static Regex {
    static DATE_ONLY: OnceLock<Regex> = OnceLock::new();
    DATE_ONLY.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static pattern"))
}

/// Read a date in any of the forms DocMap producers emit.
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    // Offsets written without a colon, e.g. `+0000`.
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }
    if date_only().is_match(text) {
        let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

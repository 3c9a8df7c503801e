#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Response code record types and catalog constants.
//!
//! A response code catalog is a single ordered list of named status codes
//! (`NoError`, `ErrorAccessDenied`, ...) scraped from vendor documentation.
//! This crate defines the [`ResponseCode`] record shared by the extraction
//! and code generation crates, plus the fixed markers the extraction
//! heuristics key off.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Prefix every regular record key starts with.
pub const KEY_PREFIX: &str = "Error";

/// The catalog's "no error" entry. Always the first record of a
/// well-formed catalog.
pub const SENTINEL_KEY: &str = "NoError";

/// Trailing phrase that closes a description which has no final period.
pub const CATCH_ALL_SUFFIX: &str = "various messages";

/// Marker used in place of a description that does not apply.
pub const NOT_APPLICABLE: &str = "N/A";

/// Lines shorter than this (in characters) are treated as a continuation
/// of a wrapped applicability field.
pub const APPLICABILITY_WRAP_THRESHOLD: usize = 31;

/// Marker that introduces a bullet item in the source document.
pub const BULLET_MARKER: char = '-';

/// Normalized bullet prefix written into the comments field.
pub const NORMALIZED_BULLET: &str = "* ";

/// Where the raw catalog text came from, which decides the extraction
/// strategy.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SourceVariant {
    /// Linearized text, typically flattened from a PDF appendix.
    Text,
    /// An HTML page carrying the catalog as a table.
    Html,
}

/// One entry of the response code catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseCode {
    /// The code as written in the source document (e.g.
    /// `"ErrorAccessDenied"`).
    pub key: String,
    /// Human readable explanation of the code.
    pub description: String,
    /// Operations the code applies to. Only the text variant carries it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicability: Option<String>,
    /// Free-form remarks, one bullet per line. Only the text variant
    /// carries it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl ResponseCode {
    /// Creates a record with the given key and an empty description.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Creates a record carrying every field the text variant collects.
    #[must_use]
    pub fn with_text_fields(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: String::new(),
            applicability: Some(String::new()),
            comments: Some(String::new()),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether this is the catalog's "no error" entry.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.key == SENTINEL_KEY
    }
}

impl std::fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Response Code: '{}' Message: '{}' Applicable Methods: '{}' Comments: '{}'",
            self.key,
            self.description,
            self.applicability.as_deref().unwrap_or_default(),
            self.comments.as_deref().unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn source_variant_round_trips_through_strings() {
        assert_eq!(SourceVariant::from_str("html").unwrap(), SourceVariant::Html);
        assert_eq!(SourceVariant::Text.to_string(), "text");
        assert!(SourceVariant::from_str("pdf").is_err());
    }

    #[test]
    fn sentinel_is_recognized() {
        assert!(ResponseCode::new("NoError").is_sentinel());
        assert!(!ResponseCode::new("ErrorAccessDenied").is_sentinel());
    }

    #[test]
    fn html_records_serialize_without_text_only_fields() {
        let record = ResponseCode::new("NoError").with_description("No error occurred.");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["key"], "NoError");
        assert!(json.get("applicability").is_none());
        assert!(json.get("comments").is_none());
    }

    #[test]
    fn text_records_start_with_empty_optional_fields() {
        let record = ResponseCode::with_text_fields("ErrorAccessDenied");
        assert_eq!(record.applicability.as_deref(), Some(""));
        assert_eq!(record.comments.as_deref(), Some(""));
    }
}

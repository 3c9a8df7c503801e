//! Renderers that turn a [`CatalogModel`] into source text.
//!
//! Each target language implements [`Emitter`]. All of them render the same
//! three pieces: the enumeration, a string-to-enum lookup that fails with
//! an "unrecognized response code" error, and the inverse enum-to-string
//! mapping.

pub mod cxx;
pub mod json;
pub mod rust;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::CodegenError;
use crate::model::CatalogModel;

pub use cxx::{CxxEmitter, CxxOptions};
pub use json::JsonEmitter;
pub use rust::{RustEmitter, RustOptions};

/// Width generated comment blocks are wrapped to, including indentation.
pub const COMMENT_WIDTH: usize = 80;

/// Message carried by the lookup failure in generated code.
pub const UNRECOGNIZED_MESSAGE: &str = "Unrecognized response code";

/// Renders a catalog model in one target syntax.
pub trait Emitter {
    /// Renders the whole listing.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError`] if the model cannot be rendered in this
    /// syntax.
    fn emit(&self, model: &CatalogModel) -> Result<String, CodegenError>;

    /// Short name of the target (e.g. `"cxx"`).
    fn name(&self) -> &'static str;
}

/// Output formats selectable from the command line.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
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
pub enum OutputFormat {
    /// C++ `enum class` plus `unordered_map` lookup.
    #[default]
    Cxx,
    /// Rust enum with `FromStr` and `as_str`.
    Rust,
    /// The model itself, as JSON.
    Json,
}

impl OutputFormat {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Cxx, Self::Rust, Self::Json]
    }
}

/// Escapes `value` for use inside a double-quoted string literal.
///
/// C++ and Rust share the escapes needed for catalog keys.
#[must_use]
pub fn escape_string_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn parses_output_formats() {
        assert_eq!(OutputFormat::from_str("rust").unwrap(), OutputFormat::Rust);
        assert_eq!(OutputFormat::default(), OutputFormat::Cxx);
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert!(OutputFormat::from_str("java").is_err());
    }

    #[test]
    fn escapes_quotes_and_backslashes() {
        assert_eq!(escape_string_literal(r#"a"b\c"#), r#"a\"b\\c"#);
        assert_eq!(escape_string_literal("NoError"), "NoError");
    }
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Response code extraction from vendor documentation.
//!
//! Two document shapes are supported:
//!
//! * flattened PDF text, parsed line by line by the state machine in
//!   [`machine`] using the guards in [`classify`];
//! * an HTML page carrying the catalog as a table ([`html_table`]).
//!
//! [`source`] loads the raw document (local path or URL) and flattens PDFs
//! with [`pdf_extract`]; [`sanitize`] cleans the extracted fields.

pub mod classify;
pub mod html_table;
pub mod machine;
pub mod sanitize;
pub mod source;

use response_codes_catalog_models::{ResponseCode, SENTINEL_KEY, SourceVariant};

pub use html_table::HtmlTableLayout;
pub use machine::TextLayout;

/// Errors specific to response code extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// An HTTP request to download the document failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// PDF text extraction failed.
    #[error("PDF extraction error: {0}")]
    Pdf(String),

    /// The HTML document could not be queried.
    #[error("HTML error: {0}")]
    Html(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog's mandatory first entry is missing.
    #[error("Couldn't find the catalog entry '{key}'")]
    MissingSentinel {
        /// The sentinel key that was looked for.
        key: &'static str,
    },
}

/// Strategy for extracting records from a document's text.
#[derive(Debug, Clone)]
pub enum ExtractionStrategy {
    /// Run the line-oriented state machine over flattened text.
    TextCatalog {
        /// Which fields each record carries.
        layout: TextLayout,
    },

    /// Read rows of the HTML table that holds the catalog.
    HtmlTable {
        /// How to find the key and description cells.
        layout: HtmlTableLayout,
    },
}

impl ExtractionStrategy {
    /// The default strategy for `variant`.
    #[must_use]
    pub fn for_variant(variant: SourceVariant) -> Self {
        match variant {
            SourceVariant::Text => Self::TextCatalog {
                layout: TextLayout::default(),
            },
            SourceVariant::Html => Self::HtmlTable {
                layout: HtmlTableLayout::default(),
            },
        }
    }

    /// The variant this strategy reads.
    #[must_use]
    pub const fn variant(&self) -> SourceVariant {
        match self {
            Self::TextCatalog { .. } => SourceVariant::Text,
            Self::HtmlTable { .. } => SourceVariant::Html,
        }
    }

    /// Extracts raw (unsanitized) records from `text`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError`] if the HTML variant cannot locate the
    /// catalog table.
    pub fn extract(&self, text: &str) -> Result<Vec<ResponseCode>, ExtractError> {
        match self {
            Self::TextCatalog { layout } => Ok(machine::extract(text, *layout)),
            Self::HtmlTable { layout } => html_table::extract(text, layout),
        }
    }
}

/// Extracts and sanitizes every record from `text`.
///
/// # Errors
///
/// Returns [`ExtractError`] if extraction fails.
pub fn extract_records(
    text: &str,
    strategy: &ExtractionStrategy,
) -> Result<Vec<ResponseCode>, ExtractError> {
    let records: Vec<ResponseCode> = strategy
        .extract(text)?
        .into_iter()
        .map(sanitize::sanitize)
        .collect();

    log::info!(
        "Extracted {} response codes using the {} strategy",
        records.len(),
        strategy.variant()
    );

    Ok(records)
}

/// Checks that the catalog's "no error" entry was found.
///
/// A catalog without it means extraction latched onto the wrong part of the
/// document, so nothing should be generated from it.
///
/// # Errors
///
/// Returns [`ExtractError::MissingSentinel`] if no record has the sentinel
/// key.
pub fn require_sentinel(records: &[ResponseCode]) -> Result<(), ExtractError> {
    if records.iter().any(ResponseCode::is_sentinel) {
        Ok(())
    } else {
        Err(ExtractError::MissingSentinel { key: SENTINEL_KEY })
    }
}

//! Raw document acquisition.
//!
//! Loads the catalog document from a local path or URL, works out which
//! extraction variant applies, and flattens PDFs to text with
//! [`pdf_extract`].

use std::path::Path;

use response_codes_catalog_models::SourceVariant;

use crate::ExtractError;

/// A downloaded or read document, before text extraction.
#[derive(Debug, Clone)]
pub struct RawSource {
    /// Path or URL the document came from.
    pub location: String,
    /// `Content-Type` reported by the server, for URLs.
    pub content_type: Option<String>,
    /// Document bytes.
    pub bytes: Vec<u8>,
}

/// Whether `location` should be fetched over HTTP.
#[must_use]
pub fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Reads `location` from disk, or downloads it when it is a URL.
///
/// # Errors
///
/// * [`ExtractError::Http`] if the download fails or returns a non-success
///   status.
/// * [`ExtractError::Io`] if the file cannot be read.
pub async fn load_source(location: &str) -> Result<RawSource, ExtractError> {
    if is_url(location) {
        let response = reqwest::get(location).await?.error_for_status()?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = response.bytes().await?.to_vec();

        log::debug!("Downloaded {} bytes from {location}", bytes.len());

        Ok(RawSource {
            location: location.to_owned(),
            content_type,
            bytes,
        })
    } else {
        let bytes = tokio::fs::read(location).await?;

        log::debug!("Read {} bytes from {location}", bytes.len());

        Ok(RawSource {
            location: location.to_owned(),
            content_type: None,
            bytes,
        })
    }
}

impl RawSource {
    /// Creates a source from in-memory bytes.
    #[must_use]
    pub fn from_bytes(location: &str, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            location: location.to_owned(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    /// Whether the bytes are a PDF document.
    #[must_use]
    pub fn is_pdf(&self) -> bool {
        self.bytes.starts_with(b"%PDF")
    }

    /// Picks the extraction variant from the content type, the file
    /// extension, then the leading bytes.
    #[must_use]
    pub fn detect_variant(&self) -> SourceVariant {
        if let Some(content_type) = self.content_type.as_deref() {
            if content_type.contains("html") {
                return SourceVariant::Html;
            }
            if content_type.contains("pdf") {
                return SourceVariant::Text;
            }
        }

        let extension = Path::new(self.location.split(['?', '#']).next().unwrap_or_default())
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("html" | "htm" | "aspx") => return SourceVariant::Html,
            Some("pdf" | "txt") => return SourceVariant::Text,
            _ => {}
        }

        if self.is_pdf() {
            return SourceVariant::Text;
        }

        let head: String = String::from_utf8_lossy(&self.bytes[..self.bytes.len().min(512)])
            .trim_start()
            .to_ascii_lowercase();
        if head.starts_with("<!doctype html") || head.starts_with("<html") {
            SourceVariant::Html
        } else {
            SourceVariant::Text
        }
    }

    /// Converts the document to the text the chosen variant consumes.
    ///
    /// PDFs are flattened page by page; anything else is decoded as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Pdf`] if the PDF cannot be flattened.
    pub fn into_text(self) -> Result<String, ExtractError> {
        if self.is_pdf() {
            let text = pdf_extract::extract_text_from_mem(&self.bytes).map_err(|e| {
                ExtractError::Pdf(format!("failed to extract text from {}: {e}", self.location))
            })?;

            log::debug!(
                "Extracted {} characters of text from {}",
                text.len(),
                self.location
            );

            return Ok(text);
        }

        Ok(match String::from_utf8(self.bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_urls() {
        assert!(is_url("https://learn.microsoft.com/responsecode"));
        assert!(is_url("http://localhost:8080/codes.html"));
        assert!(!is_url("appendix_a.pdf"));
    }

    #[test]
    fn content_type_wins_over_extension() {
        let source = RawSource {
            location: "https://example.com/codes.pdf".to_owned(),
            content_type: Some("text/html; charset=utf-8".to_owned()),
            bytes: Vec::new(),
        };
        assert_eq!(source.detect_variant(), SourceVariant::Html);
    }

    #[test]
    fn detects_variant_from_extension() {
        assert_eq!(
            RawSource::from_bytes("appendix_a.PDF", "").detect_variant(),
            SourceVariant::Text
        );
        assert_eq!(
            RawSource::from_bytes("https://example.com/codes.html?view=1", "").detect_variant(),
            SourceVariant::Html
        );
    }

    #[test]
    fn sniffs_markup_and_pdf_headers() {
        assert_eq!(
            RawSource::from_bytes("page", "  <!DOCTYPE html><html></html>").detect_variant(),
            SourceVariant::Html
        );
        assert_eq!(
            RawSource::from_bytes("blob", "%PDF-1.7\n").detect_variant(),
            SourceVariant::Text
        );
        assert_eq!(
            RawSource::from_bytes("dump", "NoError\nNo error.\n").detect_variant(),
            SourceVariant::Text
        );
    }

    #[test]
    fn plain_text_passes_through() {
        let text = RawSource::from_bytes("dump.txt", "NoError\n").into_text().unwrap();
        assert_eq!(text, "NoError\n");
    }

    #[tokio::test]
    async fn missing_file_reports_io_error() {
        let err = load_source("/nonexistent/response_codes/appendix.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }
}

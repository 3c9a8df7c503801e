#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! End-to-end pipeline behind the `response_codes` binary.
//!
//! Loads a catalog document, extracts and sanitizes its records, checks
//! that the catalog is anchored on its "no error" entry, and renders the
//! resulting model as source code.

use response_codes_catalog_models::{ResponseCode, SourceVariant};
use response_codes_codegen::{CatalogModel, CodegenError, ModelOptions, RenderOptions};
use response_codes_extract::source::{RawSource, load_source};
use response_codes_extract::{ExtractError, ExtractionStrategy};

/// Errors from any stage of the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Loading or parsing the document failed.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Building or rendering the catalog failed.
    #[error(transparent)]
    Codegen(#[from] CodegenError),

    /// Serializing the record dump failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What to produce and how.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Forces an extraction variant instead of detecting it from the
    /// document.
    pub variant: Option<SourceVariant>,
    /// Catalog model settings.
    pub model: ModelOptions,
    /// Output settings.
    pub render: RenderOptions,
    /// Print the sanitized records as JSON instead of generated code.
    pub dump_records: bool,
}

/// Extracts, sanitizes and validates the records in `text`.
///
/// # Errors
///
/// * [`ExtractError`] if extraction fails or the catalog has no sentinel
///   entry
pub fn collect_records(
    text: &str,
    strategy: &ExtractionStrategy,
) -> Result<Vec<ResponseCode>, PipelineError> {
    let records = response_codes_extract::extract_records(text, strategy)?;
    response_codes_extract::require_sentinel(&records)?;
    Ok(records)
}

/// Turns document text into a [`CatalogModel`].
///
/// # Errors
///
/// * [`ExtractError`] if extraction fails or the catalog has no sentinel
///   entry
/// * [`CodegenError`] if two keys map to the same identifier
pub fn build_catalog(
    text: &str,
    variant: SourceVariant,
    options: ModelOptions,
) -> Result<CatalogModel, PipelineError> {
    let records = collect_records(text, &ExtractionStrategy::for_variant(variant))?;
    Ok(CatalogModel::build(&records, options)?)
}

/// Runs the pipeline over an already loaded document and returns the text
/// to print.
///
/// # Errors
///
/// Returns [`PipelineError`] if any stage fails.
pub fn process(source: RawSource, options: &PipelineOptions) -> Result<String, PipelineError> {
    let variant = options
        .variant
        .unwrap_or_else(|| source.detect_variant());
    log::info!("Reading {} as {variant}", source.location);

    let text = source.into_text()?;
    let strategy = ExtractionStrategy::for_variant(variant);
    let records = collect_records(&text, &strategy)?;

    if options.dump_records {
        let mut out = serde_json::to_string_pretty(&records)?;
        out.push('\n');
        return Ok(out);
    }

    let model = CatalogModel::build(&records, options.model)?;
    Ok(response_codes_codegen::render(&model, &options.render)?)
}

/// Loads the document at `location` (path or URL) and runs the pipeline.
///
/// # Errors
///
/// Returns [`PipelineError`] if loading or any later stage fails.
pub async fn run(location: &str, options: &PipelineOptions) -> Result<String, PipelineError> {
    let source = load_source(location).await?;
    process(source, options)
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Enum and lookup table generation for response code catalogs.
//!
//! Sanitized [`ResponseCode`] records are first normalized into a
//! [`CatalogModel`] (an ordered list of identifier, comment and key
//! triples), which the emitters in [`emit`] render as source text.
//!
//! [`ResponseCode`]: response_codes_catalog_models::ResponseCode

pub mod emit;
pub mod identifier;
pub mod model;
pub mod wrap;

pub use emit::{CxxEmitter, CxxOptions, Emitter, JsonEmitter, OutputFormat, RustEmitter};
pub use model::{CatalogModel, Entry, ModelOptions};

/// Errors that can occur while building or rendering a catalog model.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    /// The catalog has no records to render.
    #[error("catalog is empty")]
    EmptyCatalog,

    /// Two distinct keys map to the same generated symbol.
    #[error("'{first}' and '{second}' both map to identifier '{identifier}'")]
    IdentifierCollision {
        /// The clashing symbol.
        identifier: String,
        /// Key that claimed the symbol first.
        first: String,
        /// Key that clashed with it.
        second: String,
    },

    /// Writing the listing failed.
    #[error("Format error: {0}")]
    Format(#[from] std::fmt::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings for [`render`].
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Target syntax.
    pub format: OutputFormat,
    /// C++ names, used when `format` is [`OutputFormat::Cxx`].
    pub cxx: CxxOptions,
    /// Rust names, used when `format` is [`OutputFormat::Rust`].
    pub rust: emit::RustOptions,
}

/// Returns the emitter for `options.format`.
#[must_use]
pub fn emitter_for(options: &RenderOptions) -> Box<dyn Emitter> {
    match options.format {
        OutputFormat::Cxx => Box::new(CxxEmitter::new(options.cxx.clone())),
        OutputFormat::Rust => Box::new(RustEmitter::new(options.rust.clone())),
        OutputFormat::Json => Box::new(JsonEmitter),
    }
}

/// Renders `model` in the configured format.
///
/// # Errors
///
/// Returns [`CodegenError`] if the emitter cannot render the model.
pub fn render(model: &CatalogModel, options: &RenderOptions) -> Result<String, CodegenError> {
    let emitter = emitter_for(options);
    let listing = emitter.emit(model)?;

    log::info!(
        "Rendered {} response codes as {}",
        model.len(),
        emitter.name()
    );

    Ok(listing)
}

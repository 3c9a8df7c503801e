//! Rust emitter.
//!
//! Produces a fieldless enum, a `FromStr` impl that returns an
//! `UnrecognizedResponseCode` error for unknown keys, and an `as_str`
//! method for the inverse mapping. The inverse `match` is exhaustive, so
//! it has no failure arm.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::CodegenError;
use crate::emit::{COMMENT_WIDTH, Emitter, UNRECOGNIZED_MESSAGE, escape_string_literal};
use crate::identifier::snake_to_upper_camel;
use crate::model::{CatalogModel, Entry};
use crate::wrap::wrap_with_prefix;

/// Names used in the generated Rust listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RustOptions {
    /// Name of the generated enum.
    pub enum_name: String,
    /// Name of the lookup error type.
    pub error_name: String,
}

impl Default for RustOptions {
    fn default() -> Self {
        Self {
            enum_name: "ResponseCode".to_owned(),
            error_name: "UnrecognizedResponseCode".to_owned(),
        }
    }
}

/// Renders a catalog as Rust.
#[derive(Debug, Clone, Default)]
pub struct RustEmitter {
    options: RustOptions,
}

impl RustEmitter {
    /// Creates an emitter with the given names.
    #[must_use]
    pub const fn new(options: RustOptions) -> Self {
        Self { options }
    }

    /// Variant names paired with their entries, checked for clashes that
    /// only appear after re-casing.
    fn variants<'a>(
        model: &'a CatalogModel,
    ) -> Result<Vec<(String, &'a Entry)>, CodegenError> {
        let mut seen: BTreeMap<String, &str> = BTreeMap::new();
        let mut variants = Vec::with_capacity(model.len());

        for entry in model.entries() {
            let variant = snake_to_upper_camel(&entry.identifier);
            if let Some(first) = seen.insert(variant.clone(), entry.key.as_str()) {
                return Err(CodegenError::IdentifierCollision {
                    identifier: variant,
                    first: first.to_owned(),
                    second: entry.key.clone(),
                });
            }
            variants.push((variant, entry));
        }

        Ok(variants)
    }
}

impl Emitter for RustEmitter {
    fn emit(&self, model: &CatalogModel) -> Result<String, CodegenError> {
        let variants = Self::variants(model)?;
        let enum_name = &self.options.enum_name;
        let error_name = &self.options.error_name;
        let mut out = String::new();

        writeln!(out, "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]")?;
        writeln!(out, "pub enum {enum_name} {{")?;
        for (index, (variant, entry)) in variants.iter().enumerate() {
            if index > 0 {
                writeln!(out)?;
            }
            for line in wrap_with_prefix(&entry.comment, COMMENT_WIDTH, "    /// ") {
                writeln!(out, "{line}")?;
            }
            writeln!(out, "    {variant},")?;
        }
        writeln!(out, "}}")?;
        writeln!(out)?;

        writeln!(out, "#[derive(Debug, Clone, PartialEq, Eq)]")?;
        writeln!(out, "pub struct {error_name}(pub String);")?;
        writeln!(out)?;
        writeln!(out, "impl std::fmt::Display for {error_name} {{")?;
        writeln!(
            out,
            "    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {{"
        )?;
        writeln!(out, "        write!(f, \"{UNRECOGNIZED_MESSAGE}: {{}}\", self.0)")?;
        writeln!(out, "    }}")?;
        writeln!(out, "}}")?;
        writeln!(out)?;
        writeln!(out, "impl std::error::Error for {error_name} {{}}")?;
        writeln!(out)?;

        writeln!(out, "impl std::str::FromStr for {enum_name} {{")?;
        writeln!(out, "    type Err = {error_name};")?;
        writeln!(out)?;
        writeln!(
            out,
            "    fn from_str(s: &str) -> Result<Self, Self::Err> {{"
        )?;
        writeln!(out, "        match s {{")?;
        for (variant, entry) in &variants {
            writeln!(
                out,
                "            \"{}\" => Ok(Self::{variant}),",
                escape_string_literal(&entry.key)
            )?;
        }
        writeln!(out, "            _ => Err({error_name}(s.to_owned())),")?;
        writeln!(out, "        }}")?;
        writeln!(out, "    }}")?;
        writeln!(out, "}}")?;
        writeln!(out)?;

        writeln!(out, "impl {enum_name} {{")?;
        writeln!(out, "    #[must_use]")?;
        writeln!(out, "    pub const fn as_str(self) -> &'static str {{")?;
        writeln!(out, "        match self {{")?;
        for (variant, entry) in &variants {
            writeln!(
                out,
                "            Self::{variant} => \"{}\",",
                escape_string_literal(&entry.key)
            )?;
        }
        writeln!(out, "        }}")?;
        writeln!(out, "    }}")?;
        writeln!(out, "}}")?;

        Ok(out)
    }

    fn name(&self) -> &'static str {
        "rust"
    }
}

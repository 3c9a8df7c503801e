//! C++ emitter.
//!
//! Produces an `enum class`, a `string → enum` function backed by a static
//! `std::unordered_map`, and an `enum → string` function built on a
//! `switch`. Both lookups throw the configured exception type for unknown
//! input.

use std::fmt::Write as _;

use crate::CodegenError;
use crate::emit::{COMMENT_WIDTH, Emitter, UNRECOGNIZED_MESSAGE, escape_string_literal};
use crate::model::CatalogModel;
use crate::wrap::wrap_with_prefix;

const INDENT: &str = "    ";

/// Names used in the generated C++ listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CxxOptions {
    /// Enclosing namespace.
    pub namespace: String,
    /// Name of the `enum class`.
    pub enum_name: String,
    /// Name of the `string → enum` function.
    pub from_string_fn: String,
    /// Name of the `enum → string` function.
    pub to_string_fn: String,
    /// Exception type thrown for unrecognized input.
    pub error_type: String,
}

impl Default for CxxOptions {
    fn default() -> Self {
        Self {
            namespace: "ews".to_owned(),
            enum_name: "response_code".to_owned(),
            from_string_fn: "string_to_response_code_enum".to_owned(),
            to_string_fn: "enum_to_str".to_owned(),
            error_type: "exchange_error".to_owned(),
        }
    }
}

impl CxxOptions {
    /// Overrides the enclosing namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: &str) -> Self {
        namespace.clone_into(&mut self.namespace);
        self
    }
}

/// Renders a catalog as C++.
#[derive(Debug, Clone, Default)]
pub struct CxxEmitter {
    options: CxxOptions,
}

impl CxxEmitter {
    /// Creates an emitter with the given names.
    #[must_use]
    pub const fn new(options: CxxOptions) -> Self {
        Self { options }
    }

    fn write_enum(&self, out: &mut String, model: &CatalogModel) -> std::fmt::Result {
        let i = INDENT;
        let comment_prefix = format!("{i}{i}// ");

        writeln!(out, "{i}enum class {}", self.options.enum_name)?;
        writeln!(out, "{i}{{")?;

        let last = model.len().saturating_sub(1);
        for (index, entry) in model.entries().iter().enumerate() {
            for line in wrap_with_prefix(&entry.comment, COMMENT_WIDTH, &comment_prefix) {
                writeln!(out, "{line}")?;
            }
            if index == last {
                writeln!(out, "{i}{i}{}", entry.identifier)?;
            } else {
                writeln!(out, "{i}{i}{},", entry.identifier)?;
                writeln!(out)?;
            }
        }

        writeln!(out, "{i}}};")
    }

    fn write_from_string(&self, out: &mut String, model: &CatalogModel) -> std::fmt::Result {
        let i = INDENT;
        let enum_name = &self.options.enum_name;

        writeln!(out, "{i}inline {enum_name}")?;
        writeln!(out, "{i}{}(const std::string& str)", self.options.from_string_fn)?;
        writeln!(out, "{i}{{")?;
        writeln!(
            out,
            "{i}{i}static const std::unordered_map<std::string, {enum_name}> m{{"
        )?;

        let last = model.len().saturating_sub(1);
        for (index, entry) in model.entries().iter().enumerate() {
            let separator = if index == last { "" } else { "," };
            writeln!(
                out,
                "{i}{i}{i}{{ \"{}\", {enum_name}::{} }}{separator}",
                escape_string_literal(&entry.key),
                entry.identifier
            )?;
        }

        writeln!(out, "{i}{i}}};")?;
        writeln!(out, "{i}{i}auto it = m.find(str);")?;
        writeln!(out, "{i}{i}if (it == m.end())")?;
        writeln!(out, "{i}{i}{{")?;
        writeln!(
            out,
            "{i}{i}{i}throw {}(\"{UNRECOGNIZED_MESSAGE}\");",
            self.options.error_type
        )?;
        writeln!(out, "{i}{i}}}")?;
        writeln!(out, "{i}{i}return it->second;")?;
        writeln!(out, "{i}}}")
    }

    fn write_to_string(&self, out: &mut String, model: &CatalogModel) -> std::fmt::Result {
        let i = INDENT;
        let enum_name = &self.options.enum_name;

        writeln!(
            out,
            "{i}inline std::string {}({enum_name} code)",
            self.options.to_string_fn
        )?;
        writeln!(out, "{i}{{")?;
        writeln!(out, "{i}{i}switch (code)")?;
        writeln!(out, "{i}{i}{{")?;

        for entry in model.entries() {
            writeln!(out, "{i}{i}case {enum_name}::{}:", entry.identifier)?;
            writeln!(
                out,
                "{i}{i}{i}return \"{}\";",
                escape_string_literal(&entry.key)
            )?;
        }

        writeln!(out, "{i}{i}default:")?;
        writeln!(
            out,
            "{i}{i}{i}throw {}(\"{UNRECOGNIZED_MESSAGE}\");",
            self.options.error_type
        )?;
        writeln!(out, "{i}{i}}}")?;
        writeln!(out, "{i}}}")
    }
}

impl Emitter for CxxEmitter {
    fn emit(&self, model: &CatalogModel) -> Result<String, CodegenError> {
        let mut out = String::new();

        writeln!(out, "namespace {}", self.options.namespace)?;
        writeln!(out, "{{")?;
        self.write_enum(&mut out, model)?;
        writeln!(out)?;
        self.write_from_string(&mut out, model)?;
        writeln!(out)?;
        self.write_to_string(&mut out, model)?;
        writeln!(out, "}}")?;

        Ok(out)
    }

    fn name(&self) -> &'static str {
        "cxx"
    }
}

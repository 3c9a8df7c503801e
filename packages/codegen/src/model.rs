//! Syntax-neutral representation of a catalog ready for rendering.
//!
//! Emitters never see [`ResponseCode`] records directly; they render an
//! ordered list of [`Entry`] values, one per generated enum member.

use std::collections::{BTreeMap, BTreeSet};

use response_codes_catalog_models::ResponseCode;
use serde::Serialize;

use crate::CodegenError;
use crate::identifier::to_snake_case;

/// One generated enum member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Normalized symbol name (`error_access_denied`).
    pub identifier: String,
    /// Comment text; one output comment paragraph per line.
    pub comment: String,
    /// The key exactly as written in the source document.
    pub key: String,
}

/// Options for building a [`CatalogModel`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelOptions {
    /// Append each record's comments after its description.
    pub include_comments: bool,
}

/// Ordered entries of a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogModel {
    entries: Vec<Entry>,
}

impl CatalogModel {
    /// Builds the model from sanitized records, preserving their order.
    ///
    /// When a key appears more than once the first record wins and the
    /// later ones are dropped.
    ///
    /// # Errors
    ///
    /// * [`CodegenError::EmptyCatalog`] if `records` is empty.
    /// * [`CodegenError::IdentifierCollision`] if two distinct keys
    ///   normalize to the same identifier.
    pub fn build(records: &[ResponseCode], options: ModelOptions) -> Result<Self, CodegenError> {
        if records.is_empty() {
            return Err(CodegenError::EmptyCatalog);
        }

        let mut seen_keys = BTreeSet::new();
        let mut identifiers: BTreeMap<String, String> = BTreeMap::new();
        let mut entries = Vec::with_capacity(records.len());

        for record in records {
            if !seen_keys.insert(record.key.as_str()) {
                log::warn!("Duplicate response code {}; keeping the first", record.key);
                continue;
            }

            let identifier = to_snake_case(&record.key);
            if let Some(existing) = identifiers.get(&identifier) {
                return Err(CodegenError::IdentifierCollision {
                    identifier,
                    first: existing.clone(),
                    second: record.key.clone(),
                });
            }
            identifiers.insert(identifier.clone(), record.key.clone());

            entries.push(Entry {
                identifier,
                comment: comment_text(record, options),
                key: record.key.clone(),
            });
        }

        log::debug!("Built catalog model with {} entries", entries.len());

        Ok(Self { entries })
    }

    /// Entries in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the model has no entries. Never true for a built model.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn comment_text(record: &ResponseCode, options: ModelOptions) -> String {
    let mut comment = record.description.clone();
    if options.include_comments
        && let Some(comments) = record.comments.as_deref().filter(|c| !c.is_empty())
    {
        if !comment.is_empty() {
            comment.push('\n');
        }
        comment.push_str(comments);
    }
    comment
}

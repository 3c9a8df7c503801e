//! Whitespace and line-wrap cleanup for extracted record fields.

use std::sync::LazyLock;

use regex::Regex;
use response_codes_catalog_models::ResponseCode;

/// Runs of two or more spaces.
static SPACE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").expect("valid regex"));

/// Hyphenation left behind when a word was split across two lines.
const WRAP_HYPHEN: &str = "- ";

/// Cleans a single field: trims it, collapses interior space runs and
/// removes wrap hyphenation.
///
/// Applying it twice gives the same result as applying it once.
#[must_use]
pub fn sanitize_field(value: &str) -> String {
    let collapsed = SPACE_RUN_RE.replace_all(value.trim(), " ");
    collapsed.replace(WRAP_HYPHEN, "").trim().to_owned()
}

/// Cleans every text field of `record`.
#[must_use]
pub fn sanitize(mut record: ResponseCode) -> ResponseCode {
    record.key = record.key.trim().to_owned();
    record.description = sanitize_field(&record.description);
    record.applicability = record.applicability.as_deref().map(sanitize_field);
    record.comments = record.comments.as_deref().map(sanitize_field);
    record
}

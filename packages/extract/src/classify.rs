//! Line classification for the text catalog state machine.
//!
//! Flattened PDF text has no field delimiters. Every field boundary is
//! inferred from the shape of a single line (or, for wrapped
//! applicability lists, the line after it). The guards in this module are
//! the only place those heuristics live, so each one can be tested on its
//! own.

use std::sync::LazyLock;

use regex::Regex;
use response_codes_catalog_models::{
    APPLICABILITY_WRAP_THRESHOLD, BULLET_MARKER, CATCH_ALL_SUFFIX, KEY_PREFIX, NOT_APPLICABLE,
    SENTINEL_KEY,
};

/// Matches a regular record key: the key prefix followed by one or more
/// ASCII word characters, spanning the whole line.
static RECORD_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{KEY_PREFIX}[A-Za-z0-9_]+$")).expect("valid regex")
});

/// Shape of a single input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// A line that opens a new record.
    RecordKey,
    /// An empty (or whitespace-only) line.
    Blank,
    /// A bullet item; carries the text after the marker.
    Bullet(&'a str),
    /// Any other line.
    Text,
}

/// Classifies `line`. Record keys take precedence over every other shape.
#[must_use]
pub fn classify(line: &str) -> LineKind<'_> {
    if is_record_key(line) {
        LineKind::RecordKey
    } else if line.trim().is_empty() {
        LineKind::Blank
    } else if let Some(rest) = line.strip_prefix(BULLET_MARKER) {
        LineKind::Bullet(rest)
    } else {
        LineKind::Text
    }
}

/// Whether `line` is a record key: either the sentinel or a prefixed
/// compound word.
#[must_use]
pub fn is_record_key(line: &str) -> bool {
    line == SENTINEL_KEY || RECORD_KEY_RE.is_match(line)
}

/// Whether `line` is the last line of a description.
#[must_use]
pub fn ends_description(line: &str) -> bool {
    line.ends_with('.') || line.ends_with(CATCH_ALL_SUFFIX) || line == NOT_APPLICABLE
}

/// Look-ahead guard for wrapped applicability lists.
///
/// The applicability field continues onto `next` when that line is short
/// or closes a parenthesis, and does not end a sentence. A missing or
/// blank next line always ends the field.
#[must_use]
pub fn applicability_continues(next: Option<&str>) -> bool {
    match next {
        Some(next) if !next.is_empty() => {
            (next.chars().count() < APPLICABILITY_WRAP_THRESHOLD || next.ends_with(')'))
                && !next.ends_with('.')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_prefixed_keys_and_sentinel() {
        assert!(is_record_key("ErrorAccessDenied"));
        assert!(is_record_key("Error_Legacy2"));
        assert!(is_record_key("NoError"));
    }

    #[test]
    fn rejects_lines_that_only_resemble_keys() {
        assert!(!is_record_key("Error"));
        assert!(!is_record_key("ErrorAccess Denied"));
        assert!(!is_record_key("An ErrorAccessDenied"));
        assert!(!is_record_key("NoErrors"));
        assert!(!is_record_key("errorAccessDenied"));
    }

    #[test]
    fn classifies_line_shapes() {
        assert_eq!(classify("ErrorItemNotFound"), LineKind::RecordKey);
        assert_eq!(classify(""), LineKind::Blank);
        assert_eq!(classify("   "), LineKind::Blank);
        assert_eq!(classify("-first point."), LineKind::Bullet("first point."));
        assert_eq!(classify("CreateItem"), LineKind::Text);
    }

    #[test]
    fn description_ends_on_period_catch_all_or_not_applicable() {
        assert!(ends_description("Access is denied."));
        assert!(ends_description("This error is returned with various messages"));
        assert!(ends_description("N/A"));
        assert!(!ends_description("Access is"));
        assert!(!ends_description("N/A for now"));
    }

    #[test]
    fn short_next_line_continues_applicability() {
        assert!(applicability_continues(Some("UpdateItem")));
    }

    #[test]
    fn parenthesized_next_line_continues_applicability() {
        assert!(applicability_continues(Some(
            "GetItem (when the requested item is in a public folder)"
        )));
    }

    #[test]
    fn sentence_next_line_ends_applicability() {
        assert!(!applicability_continues(Some("None.")));
        assert!(!applicability_continues(Some("(see remarks).")));
        assert!(!applicability_continues(Some(
            "This is returned when the caller lacks rights"
        )));
    }

    #[test]
    fn threshold_is_exclusive() {
        let at_threshold = "a".repeat(APPLICABILITY_WRAP_THRESHOLD);
        let below = "a".repeat(APPLICABILITY_WRAP_THRESHOLD - 1);
        assert!(!applicability_continues(Some(&at_threshold)));
        assert!(applicability_continues(Some(&below)));
    }

    #[test]
    fn missing_or_blank_next_line_ends_applicability() {
        assert!(!applicability_continues(None));
        assert!(!applicability_continues(Some("")));
    }
}

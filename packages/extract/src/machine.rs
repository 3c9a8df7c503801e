//! Line-oriented extraction state machine for flattened catalog text.
//!
//! Each record in the source looks roughly like:
//!
//! ```text
//! ErrorAccessDenied            <- record key
//! The caller does not have     <- description, may wrap
//! access rights.
//! CreateItem, UpdateItem,      <- applicability, may wrap
//! DeleteItem
//! -Returned for public folders. <- comments, bullets or prose
//!                              <- blank line closes the record
//! ```
//!
//! [`ExtractionContext`] holds the in-progress record and the current
//! [`State`]; [`TextCatalogRecords`] drives it over the input lines and
//! yields finalized records lazily.
//!
//! Lines are right-trimmed before classification, so the look-ahead length
//! threshold and the sentence-ending checks never count trailing
//! whitespace.

use std::iter::Peekable;
use std::str::Lines;

use response_codes_catalog_models::{NORMALIZED_BULLET, ResponseCode};

use crate::classify::{LineKind, applicability_continues, classify, ends_description};

/// Extraction states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Waiting for a record key line.
    SeekingKey,
    /// Collecting the description.
    InDescription,
    /// Collecting the applicability list.
    InApplicability,
    /// Collecting comments until a blank line.
    InComments,
}

/// Field layout of the text catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLayout {
    /// Whether each record has an applicability field between the
    /// description and the comments.
    pub applicability: bool,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            applicability: true,
        }
    }
}

/// Mutable state threaded through every line-processing step.
#[derive(Debug)]
pub struct ExtractionContext {
    layout: TextLayout,
    state: State,
    current: Option<ResponseCode>,
}

impl ExtractionContext {
    /// Creates a context in [`State::SeekingKey`].
    #[must_use]
    pub const fn new(layout: TextLayout) -> Self {
        Self {
            layout,
            state: State::SeekingKey,
            current: None,
        }
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> State {
        self.state
    }

    /// The record being collected, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&ResponseCode> {
        self.current.as_ref()
    }

    /// Consumes one line. `next` is the following line, used only by the
    /// applicability look-ahead.
    ///
    /// Returns a record when this line finalized one.
    pub fn step(&mut self, line: &str, next: Option<&str>) -> Option<ResponseCode> {
        let kind = classify(line);

        if kind == LineKind::RecordKey {
            return self.start_record(line);
        }

        match self.state {
            State::SeekingKey => None,
            State::InDescription => {
                self.on_description(line);
                None
            }
            State::InApplicability => {
                self.on_applicability(line, next);
                None
            }
            State::InComments => self.on_comments(kind, line),
        }
    }

    /// Ends the pass. A record that reached the comments state is
    /// finalized; one still collecting its description or applicability is
    /// dropped.
    #[must_use]
    pub fn finish(self) -> Option<ResponseCode> {
        let record = self.current?;
        match self.state {
            State::InComments => Some(record),
            State::InDescription | State::InApplicability => {
                log::warn!(
                    "Input ended while {} was still in {:?}; dropping it",
                    record.key,
                    self.state
                );
                None
            }
            State::SeekingKey => None,
        }
    }

    fn start_record(&mut self, key: &str) -> Option<ResponseCode> {
        let finished = match (self.current.take(), self.state) {
            (Some(record), State::InComments) => Some(record),
            (Some(record), state) => {
                log::warn!(
                    "Record key {key} arrived while {} was still in {state:?}; dropping it",
                    record.key
                );
                None
            }
            (None, _) => None,
        };

        let record = if self.layout.applicability {
            ResponseCode::with_text_fields(key)
        } else {
            ResponseCode {
                comments: Some(String::new()),
                ..ResponseCode::new(key)
            }
        };
        log::trace!("Started record {key}");
        self.current = Some(record);
        self.state = State::InDescription;

        finished
    }

    fn on_description(&mut self, line: &str) {
        if let Some(record) = self.current.as_mut() {
            push_joined(&mut record.description, line);
        }
        if ends_description(line) {
            self.state = if self.layout.applicability {
                State::InApplicability
            } else {
                State::InComments
            };
            log::trace!("Description complete, moving to {:?}", self.state);
        }
    }

    fn on_applicability(&mut self, line: &str, next: Option<&str>) {
        if let Some(record) = self.current.as_mut() {
            push_joined(record.applicability.get_or_insert_with(String::new), line);
        }
        if !applicability_continues(next) {
            self.state = State::InComments;
            log::trace!("Applicability complete, moving to comments");
        }
    }

    fn on_comments(&mut self, kind: LineKind<'_>, line: &str) -> Option<ResponseCode> {
        match kind {
            LineKind::Blank => {
                self.state = State::SeekingKey;
                self.current.take()
            }
            LineKind::Bullet(text) => {
                if let Some(record) = self.current.as_mut() {
                    let comments = record.comments.get_or_insert_with(String::new);
                    comments.push('\n');
                    comments.push_str(NORMALIZED_BULLET);
                    comments.push_str(text.strip_suffix('.').unwrap_or(text));
                }
                None
            }
            LineKind::Text | LineKind::RecordKey => {
                if let Some(record) = self.current.as_mut() {
                    push_joined(record.comments.get_or_insert_with(String::new), line);
                }
                None
            }
        }
    }
}

/// Appends `line` to `field`, separated by a single space.
fn push_joined(field: &mut String, line: &str) {
    if line.is_empty() {
        return;
    }
    if !field.is_empty() && !field.ends_with(char::is_whitespace) {
        field.push(' ');
    }
    field.push_str(line);
}

/// Lazy iterator of records extracted from catalog text.
///
/// Consumes its input; run a fresh pass to regenerate the records.
pub struct TextCatalogRecords<'a> {
    lines: Peekable<Lines<'a>>,
    context: Option<ExtractionContext>,
}

impl<'a> TextCatalogRecords<'a> {
    /// Starts a pass over `text`.
    #[must_use]
    pub fn new(text: &'a str, layout: TextLayout) -> Self {
        Self {
            lines: text.lines().peekable(),
            context: Some(ExtractionContext::new(layout)),
        }
    }
}

impl Iterator for TextCatalogRecords<'_> {
    type Item = ResponseCode;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let context = self.context.as_mut()?;
            let Some(line) = self.lines.next() else {
                return self.context.take().and_then(ExtractionContext::finish);
            };
            let next = self.lines.peek().copied().map(str::trim_end);
            if let Some(record) = context.step(line.trim_end(), next) {
                return Some(record);
            }
        }
    }
}

/// Extracts every record from `text`, in source order.
#[must_use]
pub fn extract(text: &str, layout: TextLayout) -> Vec<ResponseCode> {
    let records: Vec<ResponseCode> = TextCatalogRecords::new(text, layout).collect();
    log::debug!("Text catalog yielded {} records", records.len());
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Vec<ResponseCode> {
        extract(text, TextLayout::default())
    }

    #[test]
    fn extracts_single_record_terminated_by_trailing_newline() {
        let records = run("ErrorAccessDenied\nAccess is denied.\nCreateItem\nNone.\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, "ErrorAccessDenied");
        assert_eq!(records[0].description, "Access is denied.");
        assert_eq!(records[0].applicability.as_deref(), Some("CreateItem"));
        assert_eq!(records[0].comments.as_deref(), Some("None."));
    }

    #[test]
    fn end_of_input_in_comments_finalizes_record() {
        let records = run("ErrorAccessDenied\nAccess is denied.\nCreateItem\nNone.");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].comments.as_deref(), Some("None."));
    }

    #[test]
    fn end_of_input_in_description_drops_record() {
        let records = run("NoError\nNo error.\nGetItem\n\nErrorAccessDenied\nAccess is");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, "NoError");
    }

    #[test]
    fn end_of_input_in_applicability_drops_record() {
        let mut context = ExtractionContext::new(TextLayout::default());
        assert!(context.step("ErrorAccessDenied", Some("Access is denied.")).is_none());
        assert!(context.step("Access is denied.", Some("CreateItem")).is_none());
        assert_eq!(context.state(), State::InApplicability);
        let pending = context.current().unwrap();
        assert_eq!(pending.key, "ErrorAccessDenied");
        assert_eq!(pending.description, "Access is denied.");
        assert!(context.finish().is_none());
    }

    #[test]
    fn wrapped_description_is_joined_with_spaces() {
        let records = run(
            "ErrorItemNotFound\nThe specified item\nwas not found in the\nstore.\nGetItem\n\n",
        );
        assert_eq!(
            records[0].description,
            "The specified item was not found in the store."
        );
    }

    #[test]
    fn description_closes_on_catch_all_phrase() {
        let records = run("ErrorInternalServerError\nReturned with various messages\nAll\n\n");
        assert_eq!(records[0].description, "Returned with various messages");
        assert_eq!(records[0].applicability.as_deref(), Some("All"));
    }

    #[test]
    fn description_closes_on_not_applicable_marker() {
        let records = run("NoError\nN/A\nAll\n\n");
        assert_eq!(records[0].description, "N/A");
        assert_eq!(records[0].applicability.as_deref(), Some("All"));
    }

    #[test]
    fn applicability_wraps_while_next_line_is_short() {
        let text = "ErrorAccessDenied\nAccess is denied.\nCreateItem, UpdateItem,\nDeleteItem\nThe caller lacks permissions on the folder.\n\n";
        let records = run(text);
        assert_eq!(
            records[0].applicability.as_deref(),
            Some("CreateItem, UpdateItem, DeleteItem")
        );
        assert_eq!(
            records[0].comments.as_deref(),
            Some("The caller lacks permissions on the folder.")
        );
    }

    #[test]
    fn applicability_wraps_onto_parenthesized_line() {
        let text = "ErrorAccessDenied\nAccess is denied.\nGetItem\n(only when the item lives in a public folder)\nSee above.\n\n";
        let records = run(text);
        assert_eq!(
            records[0].applicability.as_deref(),
            Some("GetItem (only when the item lives in a public folder)")
        );
        assert_eq!(records[0].comments.as_deref(), Some("See above."));
    }

    #[test]
    fn bullet_becomes_normalized_item_without_trailing_period() {
        let text = "ErrorAccessDenied\nAccess is denied.\nCreateItem\nThe following causes are possible for this error:\n-first point.\n-second point\n\n";
        let records = run(text);
        assert_eq!(
            records[0].comments.as_deref(),
            Some("The following causes are possible for this error:\n* first point\n* second point")
        );
    }

    #[test]
    fn blank_line_before_comments_closes_record_with_empty_comments() {
        let records = run("NoError\nNo error occurred.\nAll\n\nErrorAccessDenied\nDenied.\nAll\n\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].comments.as_deref(), Some(""));
    }

    #[test]
    fn next_key_finalizes_record_already_in_comments() {
        let text = "NoError\nNo error.\nAll\nNothing to add.\nErrorAccessDenied\nDenied.\nAll\n\n";
        let records = run(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key, "NoError");
        assert_eq!(records[0].comments.as_deref(), Some("Nothing to add."));
        assert_eq!(records[1].key, "ErrorAccessDenied");
    }

    #[test]
    fn next_key_drops_record_still_in_description() {
        let records = run("ErrorBroken\nno terminator\nErrorAccessDenied\nDenied.\nAll\n\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, "ErrorAccessDenied");
    }

    #[test]
    fn lines_before_first_key_are_ignored() {
        let records = run("Appendix A\nError Codes\n\nNoError\nNo error.\nAll\n\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, "NoError");
    }

    #[test]
    fn crlf_and_trailing_spaces_are_tolerated() {
        let records = run("NoError \r\nNo error. \r\nAll\r\n\r\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, "NoError");
        assert_eq!(records[0].description, "No error.");
    }

    #[test]
    fn layout_without_applicability_goes_straight_to_comments() {
        let layout = TextLayout {
            applicability: false,
        };
        let records = extract("NoError\nNo error.\nNothing else.\n\n", layout);
        assert_eq!(records[0].applicability, None);
        assert_eq!(records[0].comments.as_deref(), Some("Nothing else."));
    }

    #[test]
    fn iterator_is_lazy_and_exhausts() {
        let mut records = TextCatalogRecords::new(
            "NoError\nNo error.\nAll\n\nErrorAccessDenied\nDenied.\nAll\n\n",
            TextLayout::default(),
        );
        assert_eq!(records.next().map(|r| r.key), Some("NoError".to_owned()));
        assert_eq!(
            records.next().map(|r| r.key),
            Some("ErrorAccessDenied".to_owned())
        );
        assert!(records.next().is_none());
        assert!(records.next().is_none());
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        fn complete_record(index: usize) -> (String, String) {
            let key = format!("ErrorCode{index}");
            let text = format!("{key}\nDescription number {index}.\nGetItem\nRemark.\n\n");
            (key, text)
        }

        proptest! {
            #[test]
            fn yields_every_complete_record_in_order(count in 0_usize..20) {
                let (keys, chunks): (Vec<_>, Vec<_>) = (0..count).map(complete_record).unzip();
                let records = run(&chunks.concat());
                let yielded: Vec<_> = records.into_iter().map(|r| r.key).collect();
                prop_assert_eq!(yielded, keys);
            }

            #[test]
            fn truncated_tail_is_the_only_loss(count in 1_usize..10) {
                let chunks: Vec<_> = (0..count).map(|i| complete_record(i).1).collect();
                let text = format!("{}ErrorTruncated\nUnfinished description", chunks.concat());
                prop_assert_eq!(run(&text).len(), count);
            }
        }
    }
}

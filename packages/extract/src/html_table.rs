//! HTML table extraction.
//!
//! Reference pages publish the catalog as a two-column table (value and
//! description). The catalog table is the first one containing a cell
//! whose text is the sentinel key; that row and every following sibling
//! row whose key cell holds a record key become records.

use response_codes_catalog_models::{ResponseCode, SENTINEL_KEY};
use scraper::{ElementRef, Html, Selector};

use crate::ExtractError;
use crate::classify::is_record_key;

/// Column labels used to find the key and description cells of a row.
///
/// Cells are matched by their `data-th` attribute. Rows without labelled
/// cells fall back to position: first cell is the key, second the
/// description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlTableLayout {
    /// `data-th` label of the key column.
    pub key_column: String,
    /// `data-th` label of the description column.
    pub description_column: String,
}

impl Default for HtmlTableLayout {
    fn default() -> Self {
        Self {
            key_column: "Value".to_owned(),
            description_column: "Description".to_owned(),
        }
    }
}

impl HtmlTableLayout {
    /// Overrides the key column label.
    #[must_use]
    pub fn with_key_column(mut self, label: &str) -> Self {
        label.clone_into(&mut self.key_column);
        self
    }

    /// Overrides the description column label.
    #[must_use]
    pub fn with_description_column(mut self, label: &str) -> Self {
        label.clone_into(&mut self.description_column);
        self
    }
}

/// Compiled selectors for one extraction pass.
struct Selectors {
    table: Selector,
    row: Selector,
    cell: Selector,
    paragraph: Selector,
    key_cell: Selector,
    description_cell: Selector,
}

impl Selectors {
    fn new(layout: &HtmlTableLayout) -> Result<Self, ExtractError> {
        Ok(Self {
            table: parse_selector("table")?,
            row: parse_selector("tr")?,
            cell: parse_selector("td, th")?,
            paragraph: parse_selector("p")?,
            key_cell: parse_selector(&labelled_cell(&layout.key_column))?,
            description_cell: parse_selector(&labelled_cell(&layout.description_column))?,
        })
    }
}

fn labelled_cell(label: &str) -> String {
    format!(r#"td[data-th="{}"]"#, label.replace('"', "\\\""))
}

/// Parses a CSS selector string, returning an [`ExtractError`] on failure.
fn parse_selector(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector)
        .map_err(|e| ExtractError::Html(format!("invalid CSS selector '{selector}': {e}")))
}

/// Collapses the text content of an element into one trimmed string.
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

/// Text of a cell: its first paragraph when it has one, else all of it.
fn cell_text(cell: ElementRef<'_>, selectors: &Selectors) -> String {
    cell.select(&selectors.paragraph)
        .next()
        .map_or_else(|| element_text(cell), element_text)
}

/// Finds the row holding the sentinel key cell.
fn find_first_row<'a>(document: &'a Html, selectors: &Selectors) -> Option<ElementRef<'a>> {
    document.select(&selectors.table).find_map(|table| {
        table.select(&selectors.row).find(|row| {
            row.select(&selectors.cell)
                .any(|cell| element_text(cell) == SENTINEL_KEY)
        })
    })
}

/// Builds a record from a row, or `None` when the key cell does not hold
/// a record key (blank cells, notes, footnotes).
fn row_to_record(row: ElementRef<'_>, selectors: &Selectors) -> Option<ResponseCode> {
    let labelled = row
        .select(&selectors.key_cell)
        .next()
        .map(|key| (key, row.select(&selectors.description_cell).next()));

    let (key_cell, description_cell) = labelled.or_else(|| {
        let mut cells = row.select(&selectors.cell);
        cells.next().map(|key| (key, cells.next()))
    })?;

    let key = cell_text(key_cell, selectors);
    if !is_record_key(&key) {
        return None;
    }
    let description = description_cell
        .map(|cell| cell_text(cell, selectors))
        .unwrap_or_default();

    Some(ResponseCode::new(key).with_description(description))
}

/// Extracts the catalog from an HTML document.
///
/// # Errors
///
/// * [`ExtractError::Html`] if a selector built from `layout` is invalid.
/// * [`ExtractError::MissingSentinel`] if no table contains the sentinel
///   key.
pub fn extract(html: &str, layout: &HtmlTableLayout) -> Result<Vec<ResponseCode>, ExtractError> {
    let selectors = Selectors::new(layout)?;
    let document = Html::parse_document(html);

    let first_row = find_first_row(&document, &selectors).ok_or(ExtractError::MissingSentinel {
        key: SENTINEL_KEY,
    })?;

    let rows = std::iter::once(first_row).chain(
        first_row
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .filter(|sibling| sibling.value().name() == "tr"),
    );

    let mut records = Vec::new();
    for row in rows {
        match row_to_record(row, &selectors) {
            Some(record) => records.push(record),
            None => log::warn!("Skipping table row without a response code: {}", element_text(row)),
        }
    }

    log::debug!("HTML table yielded {} records", records.len());

    Ok(records)
}

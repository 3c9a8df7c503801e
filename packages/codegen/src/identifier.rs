//! `CamelCase` key to `snake_case` identifier conversion.

use std::sync::LazyLock;

use regex::Regex;

/// Boundary before a capitalized word run (`xAbc` → `x_Abc`).
static WORD_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("valid regex"));

/// Boundary between a lowercase letter or digit and an uppercase letter.
static CASE_CHANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid regex"));

/// Converts a record key to its generated symbol name.
///
/// ```
/// use response_codes_codegen::identifier::to_snake_case;
///
/// assert_eq!(to_snake_case("ErrorAccessDenied"), "error_access_denied");
/// assert_eq!(to_snake_case("ErrorIPv4Blocked"), "error_i_pv4_blocked");
/// ```
#[must_use]
pub fn to_snake_case(key: &str) -> String {
    let first = WORD_START_RE.replace_all(key, "${1}_${2}");
    CASE_CHANGE_RE
        .replace_all(&first, "${1}_${2}")
        .to_lowercase()
}

/// Re-cases an identifier produced by [`to_snake_case`] as `UpperCamelCase`.
#[must_use]
pub fn snake_to_upper_camel(identifier: &str) -> String {
    identifier
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect()
}

// src/util.rs

//! Flag value helpers shared by the input builders.
//!
//! Flags left at their zero value must never reach the API: an empty string
//! or an unset switch means "leave the server-side value alone", not "set it
//! to empty/false".

/// Map a string flag to an optional request field.
///
/// `None` and `Some("")` both mean the flag was not given.
pub fn string_field(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

/// Map a switch to an optional request field.
///
/// An unset switch is absent, never `Some(false)`.
pub fn bool_field(value: bool) -> Option<bool> {
    value.then_some(true)
}

/// Resolve a pair of opposing switches (`--secret` / `--publish`).
///
/// clap rejects supplying both, so at most one of them is set here.
pub fn opposing_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

/// Map a comma-separated list flag to an optional request field.
///
/// An empty list is absent so a partial update does not clear the list.
pub fn list_field(values: &[String]) -> Option<Vec<String>> {
    let values: Vec<String> = values.iter().filter(|v| !v.is_empty()).cloned().collect();
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

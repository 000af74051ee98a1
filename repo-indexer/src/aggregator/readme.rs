//! README preview truncation.

/// Default number of characters kept from a README.
pub const DEFAULT_README_MAX_CHARS: usize = 500;

/// Marker appended to truncated previews.
pub const ELLIPSIS: &str = "...";

/// Keeps the first `max_chars` characters of `content`.
///
/// Appends [`ELLIPSIS`] when anything was cut, so a truncated preview is
/// `max_chars + 3` characters long.
#[must_use]
pub fn truncate_preview(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &content[..cut]),
        None => content.to_string(),
    }
}

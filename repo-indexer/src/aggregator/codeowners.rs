//! CODEOWNERS discovery and parsing.

use std::collections::BTreeSet;

/// Locations checked for a CODEOWNERS file, in order.
pub const CODEOWNERS_PATHS: [&str; 3] = [".github/CODEOWNERS", "CODEOWNERS", "docs/CODEOWNERS"];

/// Extracts the distinct `@`-prefixed owners from CODEOWNERS text.
///
/// Blank lines and lines starting with `#` are skipped.
#[must_use]
pub fn parse_owners(content: &str) -> BTreeSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(str::split_whitespace)
        .filter(|token| token.starts_with('@'))
        .map(str::to_string)
        .collect()
}

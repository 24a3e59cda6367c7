//! Fiber-Count Detection
//!
//! Finds every `<digits>F` token in a document and reduces the matches to
//! the distinct set of counts, sorted ascending by numeric value. The
//! digit strings are kept as written so the emitted `fiberCount` field is
//! a literal substring of the source text.

use std::collections::HashSet;

use anyhow::{Context, Result};
use regex::Regex;

const FIBER_COUNT_PATTERN: &str = r"(\d+)F";

/// Detect the distinct fiber counts mentioned in a document.
///
/// Runs on the raw (non-normalized) text. Zero matches is an empty
/// result, not an error; a token too large to order numerically is an
/// error for the whole document.
pub fn detect_fiber_counts(text: &str) -> Result<Vec<String>> {
    let re = Regex::new(FIBER_COUNT_PATTERN).expect("hard-coded pattern");

    let mut seen = HashSet::new();
    let mut counts: Vec<(u128, String)> = Vec::new();

    for cap in re.captures_iter(text) {
        let digits = cap[1].to_string();
        if !seen.insert(digits.clone()) {
            continue;
        }
        let value: u128 = digits
            .parse()
            .with_context(|| format!("fiber count '{digits}F' out of range"))?;
        counts.push((value, digits));
    }

    counts.sort_by_key(|(value, _)| *value);
    Ok(counts.into_iter().map(|(_, digits)| digits).collect())
}

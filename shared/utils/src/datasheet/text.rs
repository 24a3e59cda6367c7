//! Text normalization applied before regex-based attribute extraction.

/// Collapse every maximal run of whitespace to a single space.
///
/// PDF text extraction breaks table cells across lines and pads columns
/// with runs of spaces; the attribute patterns assume single-space
/// separation. Case and punctuation are untouched.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_runs() {
        assert_eq!(
            normalize_whitespace("Installation :   1500   N"),
            "Installation : 1500 N"
        );
    }

    #[test]
    fn test_collapses_newlines_and_tabs() {
        assert_eq!(
            normalize_whitespace("2.5\n±\t0.1\r\nmm"),
            "2.5 ± 0.1 mm"
        );
    }

    #[test]
    fn test_preserves_case_and_punctuation() {
        assert_eq!(normalize_whitespace("UTA: 48F."), "UTA: 48F.");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace("   \n\t "), "");
    }
}

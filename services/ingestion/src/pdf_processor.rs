//! PDF Processor
//!
//! Extracts plain text from PDF datasheets for the parsing core.

use anyhow::{Context, Result};

/// Separator line the parsing pipeline expects between pages.
pub const PAGE_BREAK: &str = "--- PAGE BREAK ---";

/// PDF text extractor.
pub struct PdfProcessor;

impl PdfProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Extract the full text of a PDF.
    ///
    /// Page boundaries are rewritten to the `--- PAGE BREAK ---`
    /// separator line the downstream consumers expect.
    pub fn extract_text(&self, data: &[u8]) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(data)
            .context("Failed to extract text from PDF")?;

        Ok(insert_page_breaks(&text))
    }
}

impl Default for PdfProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrite form-feed page boundaries to the page-break separator line.
fn insert_page_breaks(text: &str) -> String {
    if !text.contains('\u{0c}') {
        return text.to_string();
    }
    text.replace('\u{0c}', &format!("\n{PAGE_BREAK}\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_break_insertion() {
        let text = "page one\u{0c}page two\u{0c}page three";
        let result = insert_page_breaks(text);
        assert_eq!(
            result,
            "page one\n--- PAGE BREAK ---\npage two\n--- PAGE BREAK ---\npage three"
        );
    }

    #[test]
    fn test_text_without_form_feeds_is_unchanged() {
        let text = "single page datasheet 48F";
        assert_eq!(insert_page_breaks(text), text);
    }

    #[test]
    fn test_invalid_pdf_is_an_error() {
        let processor = PdfProcessor::new();
        assert!(processor.extract_text(b"not a pdf").is_err());
    }
}

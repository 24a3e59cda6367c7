//! Datasheet Parser
//!
//! Expands one datasheet into one `CableRecord` per detected fiber count
//! and batches that expansion over many documents with per-document
//! failure isolation.

use anyhow::Result;
use indexmap::IndexMap;
use tracing::{debug, warn};

use fibersheet_models::CableRecord;

use super::extract;
use super::fiber_count::detect_fiber_counts;
use super::text::normalize_whitespace;

/// Rule-based parser for vendor cable datasheets.
#[derive(Debug, Default, Clone)]
pub struct DatasheetParser;

impl DatasheetParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse one datasheet into its fiber-count variants.
    ///
    /// Attributes other than `fiberCount`, `cableDescription` and
    /// `fiberType` are extracted once per document and shared by every
    /// variant. Datasheets do list per-variant mechanical values, but the
    /// downstream contract was built around the first match per document;
    /// the copy is deliberate.
    ///
    /// A document with no fiber-count tokens produces an empty list.
    pub fn parse_document(&self, filename: &str, text: &str) -> Result<Vec<CableRecord>> {
        let fiber_counts = detect_fiber_counts(text)?;
        if fiber_counts.is_empty() {
            debug!(filename, "no fiber-count tokens found");
            return Ok(Vec::new());
        }

        let description = extract::cable_description(text);
        let type_of_cable = extract::cable_type(text);
        let tube = extract::tube_type(text);
        let nesc_condition = extract::nesc_condition(text);

        let normalized = normalize_whitespace(text);
        let diameter = extract::diameter(&normalized);
        let tensile = extract::tensile_strength(&normalized);
        let crush = extract::crush_resistance(&normalized);

        let records = fiber_counts
            .iter()
            .map(|fc| CableRecord {
                cable_id: 0,
                cable_description: format!("{fc}F {description}"),
                fiber_count: format!("{fc}F"),
                type_of_cable: type_of_cable.clone(),
                tube: tube.clone(),
                // The 144/288 override makes fiber type the one
                // per-variant attribute.
                fiber_type: extract::fiber_type(text, Some(fc)),
                diameter: diameter.clone(),
                tensile: tensile.clone(),
                nesc_condition: nesc_condition.clone(),
                datasheet_url: filename.to_string(),
                ..Default::default()
            })
            .collect();

        Ok(records)
    }

    /// Parse a batch of documents, keyed by document identifier.
    ///
    /// Records are grouped by document in mapping order, ascending by
    /// fiber count within a document. A document that fails to parse is
    /// logged and skipped; it never aborts the rest of the batch.
    pub fn parse_batch(&self, documents: &IndexMap<String, String>) -> Vec<CableRecord> {
        let mut all_records = Vec::new();

        for (filename, text) in documents {
            match self.parse_document(filename, text) {
                Ok(records) => {
                    debug!(filename = %filename, variants = records.len(), "parsed datasheet");
                    all_records.extend(records);
                }
                Err(error) => {
                    warn!(filename = %filename, %error, "could not process datasheet, skipping");
                }
            }
        }

        all_records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FULL_TEXT: &str = "HX UTA cable 48F datasheet\n\
        Installation: 1500 N\n\
        Diameter 2.5 ± 0.1 mm\n\
        Crush 2000 N/10 cm\n\
        Operating -40°C to +70°C";

    #[test]
    fn test_single_variant_full_extraction() {
        let parser = DatasheetParser::new();
        let records = parser.parse_document("uta.pdf", FULL_TEXT).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.fiber_count, "48F");
        assert_eq!(record.cable_description, "48F Armoured loose-tube cable");
        assert_eq!(record.type_of_cable, "UT");
        assert_eq!(record.tube, "Unitube");
        assert_eq!(record.tensile, "1500 N");
        assert_eq!(record.diameter, "2.5 ± 0.1 mm");
        assert_eq!(record.crush, "2000 N/10 cm");
        assert_eq!(record.nesc_condition, "-40°C to +70°C");
        assert_eq!(record.datasheet_url, "uta.pdf");
        assert_eq!(record.cable_id, 0);
        assert_eq!(record.is_active, "Y");
    }

    #[test]
    fn test_constant_placeholder_fields() {
        let parser = DatasheetParser::new();
        let records = parser.parse_document("x.pdf", "12F").unwrap();

        let record = &records[0];
        assert_eq!(record.span, "N/A");
        assert_eq!(record.tube_color_coding, "N/A");
        assert_eq!(record.blowing_length, "N/A");
    }

    #[test]
    fn test_variant_expansion_with_count_override() {
        // No brand keywords: defaults everywhere, but the 144F variant
        // still gets the G.657A1 fiber override.
        let parser = DatasheetParser::new();
        let records = parser
            .parse_document("multi.pdf", "available in 24F and 144F")
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].fiber_count, "24F");
        assert_eq!(records[0].fiber_type, "G.652D");
        assert_eq!(records[1].fiber_count, "144F");
        assert_eq!(records[1].fiber_type, "G.657A1");
    }

    #[test]
    fn test_unrecognized_text_degrades_to_defaults() {
        let parser = DatasheetParser::new();
        let records = parser
            .parse_document("opaque.pdf", "qz 12F qz")
            .unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.cable_description, "12F Optical Fiber Cable");
        assert_eq!(record.type_of_cable, "N/A");
        assert_eq!(record.tube, "Standard");
        assert_eq!(record.diameter, "N/A");
        assert_eq!(record.tensile, "N/A");
        assert_eq!(record.crush, "N/A");
        assert_eq!(record.nesc_condition, "N/A");
    }

    #[test]
    fn test_nesc_keeps_raw_text_whitespace() {
        // Temperature ranges are matched on the raw text, so interior
        // line breaks survive into the captured value.
        let parser = DatasheetParser::new();
        let records = parser
            .parse_document("raw.pdf", "48F Operating -40°C\nto +70°C")
            .unwrap();

        assert_eq!(records[0].nesc_condition, "-40°C\nto +70°C");
    }

    #[test]
    fn test_no_fiber_counts_is_empty_not_error() {
        let parser = DatasheetParser::new();
        let records = parser
            .parse_document("empty.pdf", "UTA cable with no counts")
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_document_level_attributes_shared_across_variants() {
        let parser = DatasheetParser::new();
        let records = parser
            .parse_document("shared.pdf", "24F 48F 96F Installation: 1500 N 2.5 ± 0.1 mm")
            .unwrap();

        assert_eq!(records.len(), 3);
        for record in &records[1..] {
            assert_eq!(record.tensile, records[0].tensile);
            assert_eq!(record.diameter, records[0].diameter);
            assert_eq!(record.type_of_cable, records[0].type_of_cable);
        }
    }

    #[test]
    fn test_batch_order_and_grouping() {
        let parser = DatasheetParser::new();
        let mut documents = IndexMap::new();
        documents.insert("b.pdf".to_string(), "96F and 24F".to_string());
        documents.insert("a.pdf".to_string(), "12F".to_string());

        let records = parser.parse_batch(&documents);

        // Grouped by insertion order, ascending counts within a document.
        let summary: Vec<(&str, &str)> = records
            .iter()
            .map(|r| (r.datasheet_url.as_str(), r.fiber_count.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![("b.pdf", "24F"), ("b.pdf", "96F"), ("a.pdf", "12F")]
        );
    }

    #[test]
    fn test_batch_isolates_document_failure() {
        let parser = DatasheetParser::new();
        let mut documents = IndexMap::new();
        documents.insert("good.pdf".to_string(), "48F UTA".to_string());
        documents.insert(
            "bad.pdf".to_string(),
            format!("{}F", "9".repeat(40)), // count overflows, parse fails
        );
        documents.insert("also_good.pdf".to_string(), "24F".to_string());

        let records = parser.parse_batch(&documents);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].datasheet_url, "good.pdf");
        assert_eq!(records[1].datasheet_url, "also_good.pdf");
    }

    proptest! {
        /// A document without a fiber-count token never yields records.
        #[test]
        fn prop_no_token_no_records(text in "[a-z ]{0,100}") {
            let parser = DatasheetParser::new();
            let records = parser.parse_document("t.pdf", &text).unwrap();
            prop_assert!(records.is_empty());
        }

        /// Every record's description is its fiber count plus the base
        /// description extracted from the same text.
        #[test]
        fn prop_description_round_trip(count in 1u32..10_000, filler in "[A-Za-z .:°±]{0,80}") {
            let text = format!("{filler} {count}F");
            let parser = DatasheetParser::new();
            let base = crate::datasheet::extract::cable_description(&text);

            for record in parser.parse_document("t.pdf", &text).unwrap() {
                prop_assert_eq!(
                    record.cable_description.clone(),
                    format!("{} {}", record.fiber_count, base)
                );
            }
        }

        /// Detected counts are strictly increasing with no duplicates.
        #[test]
        fn prop_counts_sorted_distinct(counts in proptest::collection::vec(1u32..100_000, 0..8)) {
            let text = counts
                .iter()
                .map(|c| format!("{c}F"))
                .collect::<Vec<_>>()
                .join(" and ");
            let detected = detect_fiber_counts(&text).unwrap();

            let values: Vec<u32> = detected.iter().map(|d| d.parse().unwrap()).collect();
            let mut sorted = values.clone();
            sorted.sort_unstable();
            sorted.dedup();
            prop_assert_eq!(values, sorted);
        }
    }
}

//! # Fibersheet Core Domain Models
//!
//! Core domain models for the Fibersheet datasheet ingestion system.
//! All models implement serialization/deserialization with serde.
//!
//! ## Key Models
//!
//! - **CableRecord**: One cable variant extracted from a vendor datasheet,
//!   in the exact JSON shape the downstream inventory API accepts
//! - **StoredDatasheet**: An uploaded datasheet with its processing state
//!
//! The `CableRecord` field names are a wire contract. `typeofCable`,
//! `nescCondition`, `cableID` and `datasheetURL` keep the receiving API's
//! capitalization and must not be renamed.

pub mod document;
pub mod record;

pub use document::*;
pub use record::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_defaults() {
        let record = CableRecord::default();
        assert_eq!(record.cable_id, 0);
        assert_eq!(record.is_active, "Y");
        assert_eq!(record.span, NOT_AVAILABLE);
    }

    #[test]
    fn test_datasheet_creation() {
        let doc = StoredDatasheet::new("cable.pdf", "application/pdf", vec![1, 2, 3]);
        assert_eq!(doc.filename, "cable.pdf");
        assert_eq!(doc.status, ProcessingStatus::Uploaded);
        assert_eq!(doc.size_bytes, 3);
    }
}

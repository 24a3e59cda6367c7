//! Record Validator
//!
//! Advisory plausibility checks on extracted cable records. Validation
//! never blocks a record: invalid records are still staged and posted,
//! the result only drives warnings and the valid/total tally reported to
//! callers.

use tracing::warn;

use fibersheet_models::CableRecord;

/// Validation severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

/// Single validation issue
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub severity: ValidationSeverity,
    pub field: String,
    pub message: String,
}

/// Validation result for one record
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub issues: Vec<ValidationIssue>,
}

const REQUIRED_FIELDS: &[&str] = &[
    "fiberCount",
    "typeofCable",
    "fiberType",
    "diameter",
    "tensile",
    "crush",
];

const CABLE_TYPES: &[&str] = &["UT", "MT", "N/A"];

/// The downstream API's fiber-type vocabulary. The parser emits ITU/OM
/// standard codes instead, so this check warns on most real records; the
/// receiving system accepts both spellings.
const FIBER_TYPES: &[&str] = &["SM", "MM", "N/A"];

/// Advisory validator for extracted cable records.
#[derive(Debug, Default, Clone)]
pub struct RecordValidator;

impl RecordValidator {
    pub fn new() -> Self {
        Self
    }

    /// Check one record. Never fails; emits a `warn` event per issue.
    pub fn validate(&self, record: &CableRecord) -> ValidationResult {
        let mut issues = Vec::new();

        // Empty required fields invalidate the record outright.
        for (name, value) in self.required_fields(record) {
            if value.is_empty() {
                let issue = ValidationIssue {
                    severity: ValidationSeverity::Error,
                    field: name.to_string(),
                    message: format!("Missing field '{name}'"),
                };
                warn!(field = name, record = %record.cable_description, "{}", issue.message);
                issues.push(issue);
                return ValidationResult {
                    is_valid: false,
                    issues,
                };
            }
        }

        // Fiber count must be digits with at most one F suffix.
        let digits = record
            .fiber_count
            .strip_suffix('F')
            .unwrap_or(&record.fiber_count);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            let issue = ValidationIssue {
                severity: ValidationSeverity::Error,
                field: "fiberCount".to_string(),
                message: format!("Invalid fiber count: {}", record.fiber_count),
            };
            warn!(record = %record.cable_description, "{}", issue.message);
            issues.push(issue);
            return ValidationResult {
                is_valid: false,
                issues,
            };
        }

        // Vocabulary checks warn without invalidating.
        if !CABLE_TYPES.contains(&record.type_of_cable.as_str()) {
            let issue = ValidationIssue {
                severity: ValidationSeverity::Warning,
                field: "typeofCable".to_string(),
                message: format!("Invalid cable type: {}", record.type_of_cable),
            };
            warn!(record = %record.cable_description, "{}", issue.message);
            issues.push(issue);
        }

        if !FIBER_TYPES.contains(&record.fiber_type.as_str()) {
            let issue = ValidationIssue {
                severity: ValidationSeverity::Warning,
                field: "fiberType".to_string(),
                message: format!("Invalid fiber type: {}", record.fiber_type),
            };
            warn!(record = %record.cable_description, "{}", issue.message);
            issues.push(issue);
        }

        ValidationResult {
            is_valid: true,
            issues,
        }
    }

    fn required_fields<'a>(&self, record: &'a CableRecord) -> [(&'static str, &'a str); 6] {
        debug_assert_eq!(REQUIRED_FIELDS.len(), 6);
        [
            ("fiberCount", &record.fiber_count),
            ("typeofCable", &record.type_of_cable),
            ("fiberType", &record.fiber_type),
            ("diameter", &record.diameter),
            ("tensile", &record.tensile),
            ("crush", &record.crush),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> CableRecord {
        CableRecord {
            cable_description: "12F Optical Fiber Cable".to_string(),
            fiber_count: "12F".to_string(),
            type_of_cable: "UT".to_string(),
            tube: "Unitube".to_string(),
            fiber_type: "N/A".to_string(),
            datasheet_url: "cable.pdf".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_record() {
        let result = RecordValidator::new().validate(&sample_record());
        assert!(result.is_valid);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_missing_required_field_fails() {
        let mut record = sample_record();
        record.tensile = String::new();

        let result = RecordValidator::new().validate(&record);
        assert!(!result.is_valid);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].field, "tensile");
        assert_eq!(result.issues[0].severity, ValidationSeverity::Error);
    }

    #[test]
    fn test_fiber_count_digit_check() {
        let mut record = sample_record();
        record.fiber_count = "12X".to_string();
        assert!(!RecordValidator::new().validate(&record).is_valid);

        record.fiber_count = "F".to_string();
        assert!(!RecordValidator::new().validate(&record).is_valid);

        // Only a single trailing F is stripped.
        record.fiber_count = "12FF".to_string();
        assert!(!RecordValidator::new().validate(&record).is_valid);

        record.fiber_count = "12F".to_string();
        assert!(RecordValidator::new().validate(&record).is_valid);
    }

    #[test]
    fn test_vocabulary_checks_warn_only() {
        let mut record = sample_record();
        record.type_of_cable = "XT".to_string();
        record.fiber_type = "G.652D".to_string();

        let result = RecordValidator::new().validate(&record);
        // Still valid: vocabulary mismatches are advisory.
        assert!(result.is_valid);
        assert_eq!(result.issues.len(), 2);
        assert!(result
            .issues
            .iter()
            .all(|i| i.severity == ValidationSeverity::Warning));
    }

    #[test]
    fn test_parser_output_triggers_fiber_type_warning() {
        // Real parser output carries ITU codes, which are outside the
        // SM/MM vocabulary. Documented quirk of the wire contract.
        let mut record = sample_record();
        record.fiber_type = "G.657A1".to_string();

        let result = RecordValidator::new().validate(&record);
        assert!(result.is_valid);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].field, "fiberType");
    }

    #[test]
    fn test_validator_never_panics_on_default_record() {
        let record = CableRecord::default();
        let result = RecordValidator::new().validate(&record);
        assert!(!result.is_valid); // fiberCount empty
    }
}

//! Cable Attribute Extractors
//!
//! One stateless function per cable attribute. Each extractor evaluates an
//! ordered list of rules against the document text and returns the first
//! match, falling back to a structural default so extraction never fails.
//!
//! Regex rules are case-insensitive. The vendor-code substring rules
//! (`UTA`, `MTUA`, `MT UA`, `MICRO`) are case-sensitive: they are part
//! numbers, not prose, and matching them loosely would misfire on ordinary
//! words. Rule order is load-bearing throughout; `MTUA` contains `UTA` as
//! a substring, so the cascades test the longer token first where the
//! outcome differs.

use fibersheet_models::NOT_AVAILABLE;
use regex::Regex;

/// Descriptive phrases looked for verbatim (case-insensitive), in priority
/// order.
const DESCRIPTION_PHRASES: &[&str] = &[
    "Indoor LSZH loose-tube cable",
    "Outdoor loose-tube cable",
    "Armoured loose-tube cable",
    "Micro loose-tube cable",
    "Unarmoured loose-tube cable",
];

/// Vendor-code fallbacks when no descriptive phrase is present.
const DESCRIPTION_CODES: &[(&str, &str)] = &[
    ("MTUA", "Indoor LSZH loose-tube cable"),
    ("UTA", "Armoured loose-tube cable"),
    ("MICRO", "Micro loose-tube cable"),
    ("MT UA", "Unarmoured loose-tube cable"),
];

pub const DEFAULT_DESCRIPTION: &str = "Optical Fiber Cable";

const UNITUBE_TOKENS: &[&str] = &["Unitube", "UTA"];
const MULTITUBE_TOKENS: &[&str] = &["Multitube", "MTUA", "MT UA"];

/// Fiber counts that always ship G.657A1 fiber regardless of what the
/// datasheet body says.
const G657A1_FIBER_COUNTS: &[&str] = &["144", "288"];

const DIAMETER_PATTERNS: &[&str] = &[r"(?i)(\d+\.\d+\s*±\s*\d+\.\d+\s*mm)"];

const TENSILE_PATTERNS: &[&str] = &[
    r"(?i)(\d+\s*N)",
    r"(?i)Installation\s*:\s*(\d+\s*N)",
    r"(?i)Short Term\s*:\s*(\d+\s*N)",
];

const CRUSH_PATTERNS: &[&str] = &[
    r"(?i)(\d+\s*N/\d+\s*x?\s*\d*\s*cm)",
    r"(?i)(\d+\s*N/\d+\s*x?\s*\d*\s*mm)",
];

const NESC_RANGE_PATTERN: &str = r"(?i)(-?\d+\s*°C\s*to\s*\+\d+\s*°C)";
const NESC_TEMP_PATTERN: &str = r"(?i)(-?\d+\s*°C)";

/// Return the first capture group of the first pattern that matches.
fn first_capture(patterns: &[&str], text: &str) -> Option<String> {
    for pattern in patterns {
        let re = Regex::new(pattern).expect("hard-coded pattern");
        if let Some(cap) = re.captures(text) {
            if let Some(m) = cap.get(1) {
                return Some(m.as_str().trim().to_string());
            }
        }
    }
    None
}

fn contains_any(text: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|t| text.contains(t))
}

/// The base cable description, before the fiber-count prefix is applied.
pub fn cable_description(text: &str) -> String {
    let lower = text.to_lowercase();
    for phrase in DESCRIPTION_PHRASES {
        if lower.contains(&phrase.to_lowercase()) {
            return (*phrase).to_string();
        }
    }

    for (code, description) in DESCRIPTION_CODES {
        if text.contains(code) {
            return (*description).to_string();
        }
    }

    DEFAULT_DESCRIPTION.to_string()
}

/// `UT` for unitube constructions, `MT` for multitube, else `N/A`.
pub fn cable_type(text: &str) -> String {
    if contains_any(text, UNITUBE_TOKENS) {
        return "UT".to_string();
    }
    if contains_any(text, MULTITUBE_TOKENS) {
        return "MT".to_string();
    }
    NOT_AVAILABLE.to_string()
}

/// Tube construction: `Unitube`, `Multitube`, `Micro` or `Standard`.
pub fn tube_type(text: &str) -> String {
    if contains_any(text, UNITUBE_TOKENS) {
        return "Unitube".to_string();
    }
    if contains_any(text, MULTITUBE_TOKENS) {
        return "Multitube".to_string();
    }
    if text.contains("Micro") {
        return "Micro".to_string();
    }
    "Standard".to_string()
}

/// Fiber standard code for one variant.
///
/// The count override comes first: 144F and 288F cables ship G.657A1
/// fiber whatever the body text mentions.
pub fn fiber_type(text: &str, fiber_count: Option<&str>) -> String {
    if let Some(fc) = fiber_count {
        if G657A1_FIBER_COUNTS.contains(&fc) {
            return "G.657A1".to_string();
        }
    }

    if text.contains("G.65") {
        return "G.652D".to_string();
    }
    if text.contains("OM") {
        return "OM1".to_string();
    }
    "G.652D".to_string()
}

/// Cable diameter with tolerance, e.g. `"2.5 ± 0.1 mm"`. Expects
/// whitespace-normalized text.
pub fn diameter(text: &str) -> String {
    first_capture(DIAMETER_PATTERNS, text).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Tensile strength in newtons, e.g. `"1500 N"`. Expects
/// whitespace-normalized text.
pub fn tensile_strength(text: &str) -> String {
    first_capture(TENSILE_PATTERNS, text).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Crush resistance, e.g. `"2000 N/10 cm"`. Expects whitespace-normalized
/// text.
pub fn crush_resistance(text: &str) -> String {
    first_capture(CRUSH_PATTERNS, text).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// NESC operating temperature condition.
///
/// Prefers a full range like `"-40°C to +70°C"`; otherwise every
/// individual temperature mention is collected into a
/// `"Temperature range: ..."` summary.
pub fn nesc_condition(text: &str) -> String {
    if let Some(range) = first_capture(&[NESC_RANGE_PATTERN], text) {
        return range;
    }

    let re = Regex::new(NESC_TEMP_PATTERN).expect("hard-coded pattern");
    let temps: Vec<&str> = re
        .captures_iter(text)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
        .collect();

    if temps.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        format!("Temperature range: {}", temps.join(", "))
    }
}

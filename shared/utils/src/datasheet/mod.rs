//! Datasheet Parsing Module
//!
//! Rule-based extraction of cable attribute records from vendor PDF
//! datasheet text. A single datasheet usually covers several fiber-count
//! variants; the parser emits one `CableRecord` per detected count.
//!
//! Components:
//! - `text`: whitespace normalization applied before regex extraction
//! - `extract`: one stateless extractor per cable attribute, each an
//!   ordered rule cascade where the first matching rule wins
//! - `fiber_count`: detection of the distinct fiber-count tokens present
//!   in a document
//! - `parser`: variant expansion and batch parsing with per-document
//!   failure isolation
//! - `validator`: advisory plausibility checks on produced records

pub mod extract;
pub mod fiber_count;
pub mod parser;
pub mod text;
pub mod validator;

pub use fiber_count::detect_fiber_counts;
pub use parser::DatasheetParser;
pub use text::normalize_whitespace;
pub use validator::{RecordValidator, ValidationIssue, ValidationResult};

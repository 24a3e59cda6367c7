//! Record Staging
//!
//! Writes each extracted record to the staging directory as one
//! pretty-printed JSON file, named `{pdf_stem}_{fiberCount}.json`. Staged
//! files are the audit trail for what was posted and can be replayed or
//! cleaned up independently of the in-memory document store.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use fibersheet_models::CableRecord;

/// Write one record to the staging directory, creating it if needed.
/// Returns the path of the staged file.
pub fn stage_record(staging_dir: &Path, record: &CableRecord) -> Result<PathBuf> {
    fs::create_dir_all(staging_dir)
        .with_context(|| format!("Failed to create staging directory {}", staging_dir.display()))?;

    let stem = Path::new(&record.datasheet_url)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("datasheet");
    let path = staging_dir.join(format!("{}_{}.json", stem, record.fiber_count));

    let json = serde_json::to_string_pretty(record)?;
    fs::write(&path, json)
        .with_context(|| format!("Failed to write staged record {}", path.display()))?;

    debug!(path = %path.display(), "staged record");
    Ok(path)
}

/// Stage every record, logging and skipping individual write failures.
/// Returns the number of files written.
pub fn stage_records(staging_dir: &Path, records: &[CableRecord]) -> usize {
    let mut written = 0;
    for record in records {
        match stage_record(staging_dir, record) {
            Ok(_) => written += 1,
            Err(error) => {
                warn!(cable = %record.cable_description, %error, "failed to stage record");
            }
        }
    }
    written
}

/// Remove all staged `*.json` files. Returns the number removed.
pub fn clear_staged_records(staging_dir: &Path) -> Result<usize> {
    if !staging_dir.exists() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in fs::read_dir(staging_dir)
        .with_context(|| format!("Failed to read staging directory {}", staging_dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(error) => {
                    warn!(path = %path.display(), %error, "could not remove staged file");
                }
            }
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_record() -> CableRecord {
        CableRecord {
            cable_description: "48F Armoured loose-tube cable".to_string(),
            fiber_count: "48F".to_string(),
            datasheet_url: "uta_cable.pdf".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_stage_record_naming() {
        let dir = tempdir().unwrap();
        let path = stage_record(dir.path(), &sample_record()).unwrap();
        assert_eq!(path.file_name().unwrap(), "uta_cable_48F.json");

        // Staged file parses back to the same record.
        let json = fs::read_to_string(&path).unwrap();
        let back: CableRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample_record());
    }

    #[test]
    fn test_stage_records_counts_writes() {
        let dir = tempdir().unwrap();
        let mut second = sample_record();
        second.fiber_count = "96F".to_string();

        let written = stage_records(dir.path(), &[sample_record(), second]);
        assert_eq!(written, 2);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_clear_staged_records_only_touches_json() {
        let dir = tempdir().unwrap();
        stage_record(dir.path(), &sample_record()).unwrap();
        fs::write(dir.path().join("keep.pdf"), b"pdf").unwrap();

        let removed = clear_staged_records(dir.path()).unwrap();
        assert_eq!(removed, 1);
        assert!(dir.path().join("keep.pdf").exists());
    }

    #[test]
    fn test_clear_missing_directory_is_zero() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert_eq!(clear_staged_records(&missing).unwrap(), 0);
    }
}

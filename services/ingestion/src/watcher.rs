//! Data Directory Watcher
//!
//! Polls the data directory for PDFs that have not been seen yet and
//! feeds them through the ingestion pipeline. Files are remembered by
//! name for the lifetime of the process; a datasheet that fails to
//! process is not retried.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, warn};

use crate::service::DatasheetService;

pub struct DirectoryWatcher {
    data_dir: PathBuf,
    interval: Duration,
    seen: HashSet<PathBuf>,
}

impl DirectoryWatcher {
    pub fn new(data_dir: impl Into<PathBuf>, interval: Duration) -> Self {
        Self {
            data_dir: data_dir.into(),
            interval,
            seen: HashSet::new(),
        }
    }

    /// Return PDFs that appeared since the last scan, oldest name first,
    /// and mark them as seen.
    pub fn scan_new(&mut self) -> Vec<PathBuf> {
        let entries = match std::fs::read_dir(&self.data_dir) {
            Ok(entries) => entries,
            Err(error) => {
                warn!(
                    data_dir = %self.data_dir.display(),
                    %error,
                    "could not read data directory"
                );
                return Vec::new();
            }
        };

        let mut fresh: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("pdf"))
            .filter(|p| !self.seen.contains(p))
            .collect();
        fresh.sort();

        for path in &fresh {
            self.seen.insert(path.clone());
        }
        fresh
    }

    /// Poll forever, processing each new datasheet as it appears.
    pub async fn run(mut self, service: DatasheetService) {
        info!(
            data_dir = %self.data_dir.display(),
            interval_seconds = self.interval.as_secs(),
            "watching data directory for datasheets"
        );

        let mut ticker = tokio::time::interval(self.interval);
        loop {
            ticker.tick().await;
            for path in self.scan_new() {
                info!(path = %path.display(), "new datasheet detected");
                match service.process_path(&path).await {
                    Ok(outcome) => {
                        info!(
                            path = %path.display(),
                            records = outcome.records.len(),
                            staged = outcome.staged_files,
                            "datasheet processed"
                        );
                    }
                    Err(err) => {
                        error!(path = %path.display(), error = %err, "datasheet processing failed");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"pdf bytes").unwrap();
    }

    #[test]
    fn test_scan_picks_up_new_pdfs_once() {
        let dir = tempdir().unwrap();
        let mut watcher = DirectoryWatcher::new(dir.path(), Duration::from_secs(1));

        touch(dir.path(), "b.pdf");
        touch(dir.path(), "a.pdf");
        touch(dir.path(), "notes.txt");

        let first = watcher.scan_new();
        assert_eq!(
            first,
            vec![dir.path().join("a.pdf"), dir.path().join("b.pdf")]
        );

        // Already-seen files do not come back.
        assert!(watcher.scan_new().is_empty());

        touch(dir.path(), "c.pdf");
        assert_eq!(watcher.scan_new(), vec![dir.path().join("c.pdf")]);
    }

    #[test]
    fn test_missing_directory_yields_nothing() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent");
        let mut watcher = DirectoryWatcher::new(missing, Duration::from_secs(1));
        assert!(watcher.scan_new().is_empty());
    }
}

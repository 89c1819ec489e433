//! One JSON file per date inside a local data directory.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use shared::DayRecord;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tracing::{debug, info, warn};

use super::traits::{DayStorage, StoredDay};

/// Extension of every record file; the file stem is the date key
const RECORD_EXTENSION: &str = "json";

static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// File-backed day storage: `<base_directory>/<date>.json`, pretty-printed
#[derive(Clone, Debug)]
pub struct FileDayStorage {
    base_directory: PathBuf,
}

impl FileDayStorage {
    /// Open storage rooted at `base_directory`, creating it (and its parents)
    /// if it doesn't exist yet
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            std::fs::create_dir_all(&base_path).with_context(|| {
                format!("Failed to create data directory {}", base_path.display())
            })?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the file holding `date`'s record
    ///
    /// The date is used verbatim, but it must stay a single file name inside
    /// the data directory.
    fn record_path(&self, date: &str) -> Result<PathBuf> {
        if date.is_empty() || date.contains(['/', '\\']) || date.starts_with("..") {
            bail!("Invalid date key for file storage: {:?}", date);
        }
        Ok(self
            .base_directory
            .join(format!("{}.{}", date, RECORD_EXTENSION)))
    }

    /// Fallback for a record file that exists but doesn't parse.
    ///
    /// The corrupted file is reported as absent so the caller serves the
    /// default record; the next save for that date overwrites it.
    fn recover_unreadable_record(path: &Path, err: serde_json::Error) -> Option<DayRecord> {
        warn!(
            "Unreadable record file {}, treating as missing: {}",
            path.display(),
            err
        );
        None
    }
}

#[async_trait]
impl DayStorage for FileDayStorage {
    async fn load(&self, date: &str) -> Result<Option<DayRecord>> {
        let path = self.record_path(date)?;

        let contents = match fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No record file for {}", date);
                return Ok(None);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };

        match serde_json::from_str::<DayRecord>(&contents) {
            Ok(record) => Ok(Some(record)),
            Err(e) => Ok(Self::recover_unreadable_record(&path, e)),
        }
    }

    async fn save(&self, date: &str, record: &DayRecord) -> Result<()> {
        let path = self.record_path(date)?;
        let contents = serde_json::to_string_pretty(record)?;

        // Each writer gets its own temp file; the last rename wins
        let temp_path = path.with_extension(format!(
            "{}.{}.{}.tmp",
            RECORD_EXTENSION,
            std::process::id(),
            TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        if let Err(e) = fs::write(&temp_path, contents).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e).with_context(|| format!("Failed to write {}", temp_path.display()));
        }
        if let Err(e) = fs::rename(&temp_path, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e).with_context(|| format!("Failed to replace {}", path.display()));
        }

        debug!("Saved record file {}", path.display());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<StoredDay>> {
        let mut entries = fs::read_dir(&self.base_directory).await.with_context(|| {
            format!(
                "Failed to read data directory {}",
                self.base_directory.display()
            )
        })?;

        let mut dates = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            match path.file_stem().and_then(|stem| stem.to_str()) {
                Some(date) => dates.push(date.to_string()),
                None => warn!("Skipping record file with invalid name: {:?}", path),
            }
        }

        // Fixed-width dates, so lexicographic order is chronological order
        dates.sort_by(|a, b| b.cmp(a));

        let mut days = Vec::with_capacity(dates.len());
        for date in dates {
            let path = self
                .base_directory
                .join(format!("{}.{}", date, RECORD_EXTENSION));
            let contents = match fs::read_to_string(&path).await {
                Ok(contents) => contents,
                Err(e) => {
                    warn!("Failed to read record file {}: {}", path.display(), e);
                    String::new()
                }
            };
            days.push(StoredDay { date, contents });
        }

        Ok(days)
    }

    async fn delete(&self, date: &str) -> Result<()> {
        let path = self.record_path(date)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                info!("Deleted record file {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to delete {}", path.display())),
        }
    }
}

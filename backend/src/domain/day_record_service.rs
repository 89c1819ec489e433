use anyhow::{Context, Result};
use chrono::SecondsFormat;
use shared::{DayRecord, DaySummary};
use std::sync::Arc;
use tracing::{error, info};

use super::clock::{Clock, SystemClock};
use super::summary::summarize_stored_day;
use crate::storage::DayStorage;

/// Service owning the read/write path for day records
///
/// Reads favour availability: a missing or unreadable record comes back as
/// the default record and a failed listing as an empty one. Writes and
/// deletes report their failures to the caller.
#[derive(Clone)]
pub struct DayRecordService {
    storage: Arc<dyn DayStorage>,
    clock: Arc<dyn Clock>,
}

impl DayRecordService {
    /// Create a new DayRecordService stamping saves with the host clock
    pub fn new(storage: Arc<dyn DayStorage>) -> Self {
        Self::with_clock(storage, Arc::new(SystemClock))
    }

    pub fn with_clock(storage: Arc<dyn DayStorage>, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    /// Get the record for `date`, or the default record if there is none
    pub async fn get_day(&self, date: &str) -> DayRecord {
        match self.storage.load(date).await {
            Ok(Some(record)) => record,
            Ok(None) => DayRecord::default(),
            Err(e) => {
                error!("Error getting day data for {}: {:?}", date, e);
                DayRecord::default()
            }
        }
    }

    /// Replace the record for `date`, stamping `lastModified` with the
    /// current time. Returns the record as stored.
    pub async fn save_day(&self, date: &str, mut record: DayRecord) -> Result<DayRecord> {
        let timestamp = self
            .clock
            .now()
            .to_rfc3339_opts(SecondsFormat::Millis, true);
        record.set_last_modified(timestamp);

        self.storage
            .save(date, &record)
            .await
            .with_context(|| format!("Failed to save day data for {}", date))?;

        info!("Saved day data for {}", date);
        Ok(record)
    }

    /// Summaries of every stored day, most recent first
    pub async fn list_days(&self) -> Vec<DaySummary> {
        match self.storage.list().await {
            Ok(days) => days
                .iter()
                .map(|day| summarize_stored_day(&day.date, &day.contents))
                .collect(),
            Err(e) => {
                error!("Error listing days: {:?}", e);
                Vec::new()
            }
        }
    }

    pub async fn delete_day(&self, date: &str) -> Result<()> {
        self.storage
            .delete(date)
            .await
            .with_context(|| format!("Failed to delete day data for {}", date))?;

        info!("Deleted day data for {}", date);
        Ok(())
    }
}

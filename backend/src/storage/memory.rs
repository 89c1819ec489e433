//! In-memory storage used by service and router tests.

use anyhow::Result;
use async_trait::async_trait;
use shared::DayRecord;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use super::traits::{DayStorage, StoredDay};

/// Keeps raw documents so tests can plant corrupted entries
#[derive(Clone, Default)]
pub struct MemoryDayStorage {
    documents: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryDayStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `contents` for `date` exactly as given
    pub fn insert_raw(&self, date: &str, contents: &str) {
        self.documents
            .lock()
            .unwrap()
            .insert(date.to_string(), contents.to_string());
    }
}

#[async_trait]
impl DayStorage for MemoryDayStorage {
    async fn load(&self, date: &str) -> Result<Option<DayRecord>> {
        let documents = self.documents.lock().unwrap();
        match documents.get(date) {
            Some(contents) => Ok(Some(serde_json::from_str(contents)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, date: &str, record: &DayRecord) -> Result<()> {
        let contents = serde_json::to_string(record)?;
        self.documents
            .lock()
            .unwrap()
            .insert(date.to_string(), contents);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<StoredDay>> {
        let documents = self.documents.lock().unwrap();
        Ok(documents
            .iter()
            .rev()
            .map(|(date, contents)| StoredDay {
                date: date.clone(),
                contents: contents.clone(),
            })
            .collect())
    }

    async fn delete(&self, date: &str) -> Result<()> {
        self.documents.lock().unwrap().remove(date);
        Ok(())
    }
}

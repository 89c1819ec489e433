//! # Storage Traits
//!
//! The storage abstraction that lets the file and database backends be used
//! interchangeably by the domain layer.

use anyhow::Result;
use async_trait::async_trait;
use shared::DayRecord;

/// A stored document as the backend holds it, before any parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDay {
    pub date: String,
    pub contents: String,
}

/// Trait defining the interface for day record storage operations
///
/// The date string is used verbatim as the key. Absence is never an error:
/// `load` signals it with `None` and `delete` of a missing date is a no-op.
#[async_trait]
pub trait DayStorage: Send + Sync {
    /// Load the record stored for `date`
    async fn load(&self, date: &str) -> Result<Option<DayRecord>>;

    /// Store `record` for `date`, replacing whatever was there
    async fn save(&self, date: &str, record: &DayRecord) -> Result<()>;

    /// Every stored document, ordered by date descending (most recent first)
    async fn list(&self) -> Result<Vec<StoredDay>>;

    /// Remove the record stored for `date`
    async fn delete(&self, date: &str) -> Result<()>;
}

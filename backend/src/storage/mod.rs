//! # Storage Module
//!
//! Handles persistence of day records.
//!
//! Two interchangeable backends implement [`DayStorage`]:
//!
//! - **File**: one pretty-printed JSON file per date in a local directory
//! - **Database**: a single libSQL table keyed by date (Turso in the cloud)
//!
//! The backend is chosen once at startup and handed to the domain layer as a
//! trait object, so nothing above this module branches on the storage kind.

pub mod database;
pub mod file;
#[cfg(test)]
pub mod memory;
pub mod traits;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::config::StorageConfig;

pub use database::DatabaseDayStorage;
pub use file::FileDayStorage;
pub use traits::{DayStorage, StoredDay};

/// Build and initialise the backend described by `config`
///
/// Creates the data directory or the `days` table before returning.
pub async fn open_storage(config: &StorageConfig) -> Result<Arc<dyn DayStorage>> {
    match config {
        StorageConfig::Database { url, auth_token } => {
            info!("Using libSQL database storage");
            let storage = DatabaseDayStorage::connect_remote(url, auth_token).await?;
            info!("Database connected");
            Ok(Arc::new(storage))
        }
        StorageConfig::File { data_directory } => {
            info!(
                "Using local JSON file storage in {}",
                data_directory.display()
            );
            let storage = FileDayStorage::new(data_directory)?;
            Ok(Arc::new(storage))
        }
    }
}

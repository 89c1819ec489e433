//! libSQL (Turso) storage: one row per date holding the serialised record.

use anyhow::{Context, Result};
use async_trait::async_trait;
use libsql::{params, Builder, Connection, Database, Value};
use shared::DayRecord;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use super::traits::{DayStorage, StoredDay};

/// DatabaseDayStorage keeps every record in the `days` table
#[derive(Clone)]
pub struct DatabaseDayStorage {
    // Held so the database outlives the connection
    _database: Arc<Database>,
    conn: Connection,
}

impl DatabaseDayStorage {
    /// Connect to a remote libSQL database such as Turso
    pub async fn connect_remote(url: &str, auth_token: &str) -> Result<Self> {
        info!("Connecting to libSQL database at {}", url);
        let database = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await
            .with_context(|| format!("Failed to open remote database {}", url))?;

        Self::from_database(database).await
    }

    /// Open (or create) a local libSQL database file
    pub async fn open_local<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let database = Builder::new_local(path)
            .build()
            .await
            .with_context(|| format!("Failed to open local database {}", path.display()))?;

        Self::from_database(database).await
    }

    async fn from_database(database: Database) -> Result<Self> {
        let conn = database.connect()?;
        Self::setup_schema(&conn).await?;

        Ok(Self {
            _database: Arc::new(database),
            conn,
        })
    }

    /// Set up the required database schema
    async fn setup_schema(conn: &Connection) -> Result<()> {
        // `last_modified` mirrors the blob's own field for outside queries,
        // it is never read back
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS days (
                date TEXT PRIMARY KEY,
                data TEXT NOT NULL,
                last_modified TEXT
            );
            "#,
            (),
        )
        .await
        .context("Failed to create days table")?;

        Ok(())
    }
}

#[async_trait]
impl DayStorage for DatabaseDayStorage {
    async fn load(&self, date: &str) -> Result<Option<DayRecord>> {
        let row = self
            .conn
            .query("SELECT data FROM days WHERE date = ?1", params![date])
            .await?
            .next()
            .await?;

        match row {
            Some(row) => {
                let data: String = row.get(0)?;
                let record = serde_json::from_str(&data)
                    .with_context(|| format!("Stored record for {} is not valid JSON", date))?;
                Ok(Some(record))
            }
            None => {
                debug!("No row for {}", date);
                Ok(None)
            }
        }
    }

    async fn save(&self, date: &str, record: &DayRecord) -> Result<()> {
        let data = serde_json::to_string(record)?;
        let last_modified = match record.last_modified() {
            Some(stamp) => Value::Text(stamp.to_string()),
            None => Value::Null,
        };

        self.conn
            .execute(
                "INSERT OR REPLACE INTO days (date, data, last_modified) VALUES (?1, ?2, ?3)",
                params![date, data, last_modified],
            )
            .await
            .with_context(|| format!("Failed to upsert record for {}", date))?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<StoredDay>> {
        let mut rows = self
            .conn
            .query("SELECT date, data FROM days ORDER BY date DESC", ())
            .await?;

        let mut days = Vec::new();
        while let Some(row) = rows.next().await? {
            days.push(StoredDay {
                date: row.get(0)?,
                contents: row.get(1)?,
            });
        }
        Ok(days)
    }

    async fn delete(&self, date: &str) -> Result<()> {
        let removed = self
            .conn
            .execute("DELETE FROM days WHERE date = ?1", params![date])
            .await
            .with_context(|| format!("Failed to delete record for {}", date))?;

        debug!("Deleted {} row(s) for {}", removed, date);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    async fn setup_test_storage() -> (DatabaseDayStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = DatabaseDayStorage::open_local(temp_dir.path().join("days.db"))
            .await
            .expect("Failed to create test database");
        (storage, temp_dir)
    }

    fn record(value: serde_json::Value) -> DayRecord {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_load_missing_date() {
        let (storage, _temp_dir) = setup_test_storage().await;

        let loaded = storage.load("2024-01-01").await.expect("Query failed");
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let (storage, _temp_dir) = setup_test_storage().await;
        let day = record(json!({
            "timeBlocks": [{ "startBlock": 3, "endBlock": 4 }],
            "dayPlan": [{ "text": "gym" }],
            "customCategories": [],
            "lastModified": "2024-01-01T10:00:00.000Z"
        }));

        storage.save("2024-01-01", &day).await.expect("Failed to save");

        let loaded = storage.load("2024-01-01").await.expect("Failed to load");
        assert_eq!(loaded, Some(day));
    }

    #[tokio::test]
    async fn test_save_replaces_existing_row() {
        let (storage, _temp_dir) = setup_test_storage().await;

        storage
            .save("2024-01-01", &record(json!({ "dayPlan": ["initial"] })))
            .await
            .unwrap();
        storage
            .save("2024-01-01", &record(json!({ "dayPlan": ["updated"] })))
            .await
            .unwrap();

        let days = storage.list().await.unwrap();
        assert_eq!(days.len(), 1);

        let loaded = storage.load("2024-01-01").await.unwrap().unwrap();
        assert_eq!(loaded.fields().get("dayPlan"), Some(&json!(["updated"])));
    }

    #[tokio::test]
    async fn test_save_mirrors_last_modified_column() {
        let (storage, _temp_dir) = setup_test_storage().await;
        let mut day = DayRecord::default();
        day.set_last_modified("2024-02-02T02:02:02.000Z");

        storage.save("2024-02-02", &day).await.unwrap();

        let row = storage
            .conn
            .query(
                "SELECT last_modified FROM days WHERE date = ?1",
                params!["2024-02-02"],
            )
            .await
            .unwrap()
            .next()
            .await
            .unwrap()
            .expect("Row should exist");
        let column: String = row.get(0).unwrap();
        assert_eq!(column, "2024-02-02T02:02:02.000Z");
    }

    #[tokio::test]
    async fn test_list_descending() {
        let (storage, _temp_dir) = setup_test_storage().await;
        for date in ["2024-01-02", "2024-01-03", "2024-01-01"] {
            storage.save(date, &DayRecord::default()).await.unwrap();
        }

        let days = storage.list().await.expect("Failed to list");
        let dates: Vec<&str> = days.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-03", "2024-01-02", "2024-01-01"]);
    }

    #[tokio::test]
    async fn test_delete() {
        let (storage, _temp_dir) = setup_test_storage().await;
        storage.save("2024-01-01", &DayRecord::default()).await.unwrap();

        storage.delete("2024-01-01").await.expect("Failed to delete");
        assert!(storage.load("2024-01-01").await.unwrap().is_none());

        storage.delete("2024-01-01").await.expect("Deleting a missing date should succeed");
    }

    #[tokio::test]
    async fn test_schema_setup_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("days.db");

        let first = DatabaseDayStorage::open_local(&path).await.unwrap();
        first.save("2024-01-01", &DayRecord::default()).await.unwrap();
        drop(first);

        let second = DatabaseDayStorage::open_local(&path).await.unwrap();
        assert!(second.load("2024-01-01").await.unwrap().is_some());
    }
}

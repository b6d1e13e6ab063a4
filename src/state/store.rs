use rusqlite::Connection;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::data::ImageRecord;

/// Name of the store file inside the application data directory
const DB_FILE_NAME: &str = "images.db";

/// Errors raised by the image store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("could not create data directory {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not determine user data directory")]
    NoDataDir,

    #[error("the image database is not available")]
    Unavailable,
}

/// The Store keeps the history of browsed image paths in SQLite.
///
/// It is an append-only list: rows are never updated, deleted or
/// deduplicated, and the row with the largest id is the most recent one.
pub struct Store {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl Store {
    /// Open (or create) the store at `db_path` and make sure the schema exists.
    pub fn open(db_path: &Path) -> Result<Self, StoreError> {
        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(db_path)?;
        log::info!("📁 Database opened at: {}", db_path.display());

        let store = Store {
            conn,
            db_path: Some(db_path.to_path_buf()),
        };
        store.initialize()?;

        Ok(store)
    }

    /// Open a throwaway store that lives only in memory.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let store = Store {
            conn: Connection::open_in_memory()?,
            db_path: None,
        };
        store.initialize()?;
        Ok(store)
    }

    /// Default store location:
    /// - Linux: ~/.local/share/image-restore/images.db
    /// - macOS: ~/Library/Application Support/image-restore/images.db
    /// - Windows: %APPDATA%\image-restore\images.db
    pub fn default_path() -> Result<PathBuf, StoreError> {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or(StoreError::NoDataDir)?;

        path.push(crate::APP_DIR_NAME);
        path.push(DB_FILE_NAME);
        Ok(path)
    }

    /// Create the images table if it doesn't exist. Safe to call repeatedly.
    pub fn initialize(&self) -> Result<(), StoreError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS images (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                file_path       TEXT NOT NULL
            )",
            [],
        )?;

        log::debug!("Database schema initialized");
        Ok(())
    }

    /// Location of the database file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Record a browsed path. Returns the id of the new row.
    pub fn append(&self, file_path: &str) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO images (file_path) VALUES (?1)",
            [file_path],
        )?;

        let id = self.conn.last_insert_rowid();
        log::debug!("Stored image #{}: {}", id, file_path);
        Ok(id)
    }

    /// All stored paths, oldest first
    pub fn list_all(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT file_path FROM images ORDER BY id ASC")?;

        let paths = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(paths)
    }

    /// All stored records with their ids, oldest first
    pub fn records(&self) -> Result<Vec<ImageRecord>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, file_path FROM images ORDER BY id ASC")?;

        let record_iter = stmt.query_map([], |row| {
            Ok(ImageRecord {
                id: row.get(0)?,
                file_path: row.get(1)?,
            })
        })?;

        let mut records = Vec::new();
        for record in record_iter {
            records.push(record?);
        }

        Ok(records)
    }

    /// Number of rows in the store
    pub fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM images", [], |row| row.get(0))?;
        Ok(count)
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("db_path", &self.db_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_store_is_empty() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.list_all().unwrap().is_empty());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_append_lands_last() {
        let store = Store::open_in_memory().unwrap();
        store.append("first.png").unwrap();
        store.append("/photos/second.jpg").unwrap();

        let paths = store.list_all().unwrap();
        assert_eq!(paths.last().map(String::as_str), Some("/photos/second.jpg"));
        assert_eq!(paths, vec!["first.png", "/photos/second.jpg"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let store = Store::open_in_memory().unwrap();
        let first = store.append("same.bmp").unwrap();
        let second = store.append("same.bmp").unwrap();

        assert!(second > first);
        assert_eq!(store.count().unwrap(), 2);

        let records = store.records().unwrap();
        assert_eq!(records[0], ImageRecord { id: first, file_path: "same.bmp".into() });
        assert_eq!(records[1], ImageRecord { id: second, file_path: "same.bmp".into() });
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let store = Store::open_in_memory().unwrap();
        store.append("kept.png").unwrap();

        store.initialize().unwrap();
        store.initialize().unwrap();

        assert_eq!(store.list_all().unwrap(), vec!["kept.png"]);
    }

    #[test]
    fn test_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("images.db");

        {
            let store = Store::open(&db_path).unwrap();
            assert_eq!(store.path(), Some(db_path.as_path()));
            store.append("a.png").unwrap();
            store.append("b.png").unwrap();
        }

        let reopened = Store::open(&db_path).unwrap();
        assert_eq!(reopened.list_all().unwrap(), vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_storage_failure_aborts_actions_and_keeps_display() {
        use crate::error::ActionError;
        use crate::ui::workbench::{Filter, Workbench};

        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.png");
        let other = dir.path().join("other.png");
        image::RgbImage::new(6, 4).save(&good).unwrap();
        image::RgbImage::new(8, 8).save(&other).unwrap();

        let store = Store::open_in_memory().unwrap();
        let bench = Workbench::new(Filter::RemoveNoise, crate::config::DEFAULT_PREVIEW_SIZE)
            .browse(&good, &store)
            .unwrap();

        store.conn.execute("DROP TABLE images", []).unwrap();

        let browsed = bench.browse(&other, &store);
        assert!(matches!(browsed, Err(ActionError::Storage(StoreError::Sqlite(_)))));

        let loaded = bench.load_from_store(&store);
        assert!(matches!(loaded, Err(ActionError::Storage(StoreError::Sqlite(_)))));

        // The caller's state is untouched
        assert_eq!(bench.source(), Some(good.as_path()));
        assert!(bench.original_slot().is_some());
    }

    #[test]
    fn test_open_fails_on_garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("images.db");
        std::fs::write(&db_path, vec![0xAB_u8; 4096]).unwrap();

        assert!(matches!(Store::open(&db_path), Err(StoreError::Sqlite(_))));
    }
}

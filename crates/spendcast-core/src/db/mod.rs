//! Database access layer
//!
//! Every operation opens its own short-lived connection, does its work
//! (inside a transaction when it writes) and drops the connection again.
//! There is no shared handle and no pool: SQLite's single-writer locking is
//! the only coordination.
//!
//! - `expenses` - expense record CRUD

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::Connection;
use tracing::info;

use crate::error::Result;

mod expenses;

/// How long a connection waits on a locked database before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the expense store
#[derive(Debug, Clone)]
pub struct Database {
    /// Path to the database file
    db_path: PathBuf,
}

impl Database {
    /// Open (creating if absent) the database file and ensure the schema exists
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Self {
            db_path: path.as_ref().to_path_buf(),
        };
        db.run_migrations()?;

        info!(path = %db.db_path.display(), "Expense store ready");
        Ok(db)
    }

    /// Create a throwaway database (for testing)
    ///
    /// Note: Uses a temporary file rather than `:memory:` because each
    /// operation opens a fresh connection, and an in-memory database would
    /// vanish between them.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "spendcast_test_{}_{}.db",
            std::process::id(),
            id
        ));

        // Remove any existing file
        let _ = std::fs::remove_file(&path);

        Self::open(path)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Open a connection scoped to a single operation
    pub fn conn(&self) -> Result<Connection> {
        let conn = Connection::open(&self.db_path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    /// Create the expenses table if it does not exist yet
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                category TEXT NOT NULL,
                amount REAL NOT NULL
            );
            "#,
        )?;

        Ok(())
    }
}

use crate::config::Config;
use crate::error::Result;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared handle to the preferences database; clones share one connection
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    path: PathBuf,
}

impl Database {
    /// Open `skycast.db` in the data directory, creating and migrating it as needed
    pub fn open(data_dir_override: Option<&PathBuf>) -> Result<Self> {
        let path = Config::db_path(data_dir_override)?;
        let db = Self::migrated(Connection::open(&path)?, path)?;
        tracing::debug!(path = %db.path.display(), "Opened preferences database");
        Ok(db)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        Self::migrated(Connection::open_in_memory()?, PathBuf::from(":memory:"))
    }

    fn migrated(conn: Connection, path: PathBuf) -> Result<Self> {
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path,
        };
        super::migrations::run(&db)?;
        Ok(db)
    }

    #[cfg(test)]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        f(&self.lock())
    }

    pub fn with_conn_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        f(&mut self.lock())
    }

    // A panic while holding the lock cannot leave SQLite half-written, so keep going
    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

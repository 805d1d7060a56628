use crate::db::Database;
use crate::error::Result;
use rusqlite::{params, OptionalExtension};

const LAST_CITY_KEY: &str = "last_city";

// Settings Queries

impl Database {
    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM settings WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
        })
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO settings (key, value, updated_at)
                VALUES (?1, ?2, datetime('now'))
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at
                "#,
                params![key, value],
            )?;
            Ok(())
        })
    }

    /// Whether the database answers a trivial query
    pub fn is_healthy(&self) -> bool {
        self.with_conn(|conn| Ok(conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?))
            .is_ok()
    }

    /// The most recently searched city, if any
    pub fn get_last_city(&self) -> Result<Option<String>> {
        Ok(self
            .get_setting(LAST_CITY_KEY)?
            .filter(|city| !city.trim().is_empty()))
    }

    pub fn set_last_city(&self, city: &str) -> Result<()> {
        tracing::debug!(city, "Remembering last searched city");
        self.set_setting(LAST_CITY_KEY, city)
    }
}

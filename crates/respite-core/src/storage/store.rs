//! SQLite-backed key-value store.
//!
//! Everything that survives a restart apart from the TOML configuration
//! lives here: the user's display name, the streaming client id and the
//! task list. The access token does not -- secrets go through the OS
//! keyring (see `integrations`).

use rusqlite::{params, Connection};

use super::data_dir;
use crate::error::StoreError;
use crate::tasks::Task;

/// Client id used until the user supplies their own during onboarding.
pub const DEFAULT_CLIENT_ID: &str = "b7131dd5ad5b4d899438670facc5927f";

const USER_NAME_KEY: &str = "user_name";
const CLIENT_ID_KEY: &str = "spotify_client_id";
const TASKS_KEY: &str = "tasks";

/// String-keyed, string-valued persistent store.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open the store at `~/.config/respite/respite.db`, creating the file
    /// and schema if they don't exist.
    pub fn open() -> Result<Self, StoreError> {
        let path = data_dir()
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?
            .join("respite.db");
        let conn = Connection::open(&path)
            .map_err(|source| StoreError::OpenFailed { path, source })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(StoreError::from)?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a key; absent keys are fine.
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    // ── Profile ──────────────────────────────────────────────────────

    /// Display name; everything else is gated until one is stored.
    pub fn user_name(&self) -> Result<Option<String>, StoreError> {
        self.get(USER_NAME_KEY)
    }

    pub fn set_user_name(&self, name: &str) -> Result<(), StoreError> {
        self.set(USER_NAME_KEY, name)
    }

    /// Streaming client id, falling back to the built-in default.
    pub fn client_id(&self) -> Result<String, StoreError> {
        Ok(self
            .get(CLIENT_ID_KEY)?
            .unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string()))
    }

    pub fn set_client_id(&self, client_id: &str) -> Result<(), StoreError> {
        self.set(CLIENT_ID_KEY, client_id)
    }

    // ── Task list ────────────────────────────────────────────────────

    pub fn load_tasks(&self) -> Result<Vec<Task>, StoreError> {
        match self.get(TASKS_KEY)? {
            Some(json) => serde_json::from_str(&json).map_err(|e| StoreError::Corrupt {
                key: TASKS_KEY.to_string(),
                message: e.to_string(),
            }),
            None => Ok(Vec::new()),
        }
    }

    pub fn save_tasks(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let json = serde_json::to_string(tasks).map_err(|e| StoreError::Corrupt {
            key: TASKS_KEY.to_string(),
            message: e.to_string(),
        })?;
        self.set(TASKS_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_roundtrip() {
        let store = Store::open_memory().unwrap();
        assert!(store.get("test").unwrap().is_none());
        store.set("test", "hello").unwrap();
        assert_eq!(store.get("test").unwrap().unwrap(), "hello");
        store.set("test", "replaced").unwrap();
        assert_eq!(store.get("test").unwrap().unwrap(), "replaced");
        store.delete("test").unwrap();
        assert!(store.get("test").unwrap().is_none());
    }

    #[test]
    fn client_id_falls_back_to_default() {
        let store = Store::open_memory().unwrap();
        assert_eq!(store.client_id().unwrap(), DEFAULT_CLIENT_ID);
        store.set_client_id("custom-id").unwrap();
        assert_eq!(store.client_id().unwrap(), "custom-id");
    }

    #[test]
    fn profile_name_roundtrip() {
        let store = Store::open_memory().unwrap();
        assert!(store.user_name().unwrap().is_none());
        store.set_user_name("Dana").unwrap();
        assert_eq!(store.user_name().unwrap().unwrap(), "Dana");
    }

    #[test]
    fn tasks_default_to_empty() {
        let store = Store::open_memory().unwrap();
        assert!(store.load_tasks().unwrap().is_empty());
    }

    #[test]
    fn tasks_roundtrip_preserves_order() {
        let store = Store::open_memory().unwrap();
        let tasks = vec![
            Task {
                text: "Write report".into(),
                completed: false,
            },
            Task {
                text: "Review PR".into(),
                completed: true,
            },
        ];
        store.save_tasks(&tasks).unwrap();
        assert_eq!(store.load_tasks().unwrap(), tasks);
    }
}

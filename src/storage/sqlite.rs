//! SQLite-backed key-value store.

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension};

use super::{KeyValueStore, Result};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS kv (
        key   TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
";

/// Key-value store in a single `SQLite` file.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the store at `path`, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        tracing::debug!(path = %path.display(), "opened store");
        Ok(Self { conn })
    }

    /// Returns the default store path: `~/.biosync/state.sqlite`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".biosync").join("state.sqlite"))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(())
    }

    /// Single transaction: a failure leaves every key as it was.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        for (key, value) in entries {
            tx.execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                [key, value],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn test_store() -> (TempDir, SqliteStore) {
        let dir = TempDir::new().unwrap();
        let store = SqliteStore::open(dir.path().join("nested").join("state.sqlite")).unwrap();
        (dir, store)
    }

    #[test]
    fn missing_key_reads_as_none() {
        let (_dir, store) = test_store();
        assert_eq!(store.get("tripCreated").unwrap(), None);
    }

    #[test]
    fn set_then_get() {
        let (_dir, store) = test_store();
        store.set("currentUser", "user2").unwrap();
        assert_eq!(store.get("currentUser").unwrap().as_deref(), Some("user2"));
    }

    #[test]
    fn set_overwrites() {
        let (_dir, store) = test_store();
        store.set("currentUser", "user1").unwrap();
        store.set("currentUser", "user2").unwrap();
        assert_eq!(store.get("currentUser").unwrap().as_deref(), Some("user2"));
    }

    #[test]
    fn remove_is_idempotent() {
        let (_dir, store) = test_store();
        store.set("tripCreated", "true").unwrap();
        store.remove("tripCreated").unwrap();
        store.remove("tripCreated").unwrap();
        assert_eq!(store.get("tripCreated").unwrap(), None);
    }

    #[test]
    fn set_many_writes_every_entry() {
        let (_dir, store) = test_store();
        store.set_many(&[("a", "1"), ("b", "2")]).unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.sqlite");

        SqliteStore::open(&path)
            .unwrap()
            .set("tripCreated", "true")
            .unwrap();

        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.get("tripCreated").unwrap().as_deref(), Some("true"));
    }
}

//! SQLite-backed document storage.
//!
//! Records are kept as JSON documents in a single `documents` table, one
//! logical collection per record type, keyed by `(collection, id)`. The
//! `owner` column mirrors the trainer/teacher reference so lists can be
//! filtered without decoding every body.

mod progress_source;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub mod collections {
    pub const TRAINERS: &str = "trainers";
    pub const TEACHERS: &str = "teachers";
    pub const TRAINER_PROGRESS: &str = "trainerProgress";
    pub const USERS: &str = "users";
    pub const VACANCIES: &str = "vacancies";
    pub const LECTURES: &str = "lectures";
    pub const TRAINER_ACTIONS: &str = "trainerActions";
    pub const TRAINER_REWARD_PUNISHMENT: &str = "trainerRewardPunishment";
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("stored document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("database lock poisoned")]
    Poisoned,
}

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS documents (
        collection TEXT NOT NULL,
        id         TEXT NOT NULL,
        owner      TEXT,
        body       TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        PRIMARY KEY (collection, id)
    );
    CREATE INDEX IF NOT EXISTS documents_owner ON documents (collection, owner);
";

/// Shared handle to the database. Cloning is cheap; all clones use the same
/// connection.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn with_conn<T, E>(&self, f: impl FnOnce(&Connection) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        f(&conn)
    }

    /// Adds a new document; fails if the id is already taken.
    pub fn insert<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        owner: Option<&str>,
        doc: &T,
    ) -> Result<(), StoreError> {
        let body = serde_json::to_string(doc)?;
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO documents (collection, id, owner, body, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![collection, id, owner, body, Utc::now().to_rfc3339()],
            )?;
            Ok(())
        })
    }

    /// Inserts or overwrites.
    pub fn upsert<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        owner: Option<&str>,
        doc: &T,
    ) -> Result<(), StoreError> {
        let body = serde_json::to_string(doc)?;
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO documents (collection, id, owner, body, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![collection, id, owner, body, Utc::now().to_rfc3339()],
            )?;
            Ok(())
        })
    }

    /// Overwrites an existing document. Returns false when there was none.
    /// Last write wins; there is no version check.
    pub fn replace<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        owner: Option<&str>,
        doc: &T,
    ) -> Result<bool, StoreError> {
        let body = serde_json::to_string(doc)?;
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE documents SET owner = ?3, body = ?4, updated_at = ?5
                 WHERE collection = ?1 AND id = ?2",
                params![collection, id, owner, body, Utc::now().to_rfc3339()],
            )?;
            Ok(changed > 0)
        })
    }

    pub fn get<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, StoreError> {
        let body: Option<String> = self.with_conn(|conn| {
            Ok::<_, StoreError>(
                conn.query_row(
                    "SELECT body FROM documents WHERE collection = ?1 AND id = ?2",
                    params![collection, id],
                    |row| row.get(0),
                )
                .optional()?,
            )
        })?;
        Ok(body.map(|b| serde_json::from_str(&b)).transpose()?)
    }

    /// All documents of a collection in insertion order, optionally only
    /// those of one owner.
    pub fn list<T: DeserializeOwned>(
        &self,
        collection: &str,
        owner: Option<&str>,
    ) -> Result<Vec<T>, StoreError> {
        let bodies: Vec<String> = self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT body FROM documents
                 WHERE collection = ?1 AND (?2 IS NULL OR owner = ?2)
                 ORDER BY rowid",
            )?;
            let rows = stmt.query_map(params![collection, owner], |row| row.get(0))?;
            Ok::<_, StoreError>(rows.collect::<Result<Vec<String>, _>>()?)
        })?;
        bodies
            .iter()
            .map(|b| serde_json::from_str(b).map_err(StoreError::from))
            .collect()
    }

    /// Returns false when there was nothing to delete.
    pub fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection, id],
            )?;
            Ok(changed > 0)
        })
    }

    /// Read-modify-write of one document under the connection lock, so two
    /// concurrent edits of the same document cannot interleave.
    ///
    /// `Ok(None)` when the document does not exist; `f` is not called then.
    pub fn modify<T, E>(
        &self,
        collection: &str,
        id: &str,
        f: impl FnOnce(&mut T) -> Result<(), E>,
    ) -> Result<Option<T>, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<StoreError>,
    {
        self.with_conn(|conn| {
            let body: Option<String> = conn
                .query_row(
                    "SELECT body FROM documents WHERE collection = ?1 AND id = ?2",
                    params![collection, id],
                    |row| row.get(0),
                )
                .optional()
                .map_err(StoreError::from)?;
            let Some(body) = body else {
                return Ok(None);
            };
            let mut doc: T = serde_json::from_str(&body).map_err(StoreError::from)?;
            f(&mut doc)?;
            let body = serde_json::to_string(&doc).map_err(StoreError::from)?;
            conn.execute(
                "UPDATE documents SET body = ?3, updated_at = ?4
                 WHERE collection = ?1 AND id = ?2",
                params![collection, id, body, Utc::now().to_rfc3339()],
            )
            .map_err(StoreError::from)?;
            Ok(Some(doc))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn documents_round_trip_verbatim() {
        let store = Store::open_in_memory().unwrap();
        let doc = json!({ "score": "85", "nested": { "list": [1, "2", null] } });
        store.insert("things", "a", Some("t1"), &doc).unwrap();
        let back: Value = store.get("things", "a").unwrap().unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn insert_rejects_duplicate_ids() {
        let store = Store::open_in_memory().unwrap();
        store.insert("things", "a", None, &json!({})).unwrap();
        assert!(store.insert("things", "a", None, &json!({})).is_err());
        store.upsert("things", "a", None, &json!({ "v": 2 })).unwrap();
        let back: Value = store.get("things", "a").unwrap().unwrap();
        assert_eq!(back["v"], 2);
    }

    #[test]
    fn list_filters_by_owner_and_keeps_order() {
        let store = Store::open_in_memory().unwrap();
        store.insert("things", "1", Some("t1"), &json!({ "n": 1 })).unwrap();
        store.insert("things", "2", Some("t2"), &json!({ "n": 2 })).unwrap();
        store.insert("things", "3", Some("t1"), &json!({ "n": 3 })).unwrap();
        store.insert("other", "4", Some("t1"), &json!({ "n": 4 })).unwrap();

        let all: Vec<Value> = store.list("things", None).unwrap();
        assert_eq!(all.len(), 3);
        let mine: Vec<Value> = store.list("things", Some("t1")).unwrap();
        let numbers: Vec<_> = mine.iter().map(|v| v["n"].as_i64().unwrap()).collect();
        assert_eq!(numbers, vec![1, 3]);
    }

    #[test]
    fn replace_and_delete_report_missing_documents() {
        let store = Store::open_in_memory().unwrap();
        assert!(!store.replace("things", "x", None, &json!({})).unwrap());
        assert!(!store.delete("things", "x").unwrap());
        store.insert("things", "x", None, &json!({})).unwrap();
        assert!(store.replace("things", "x", None, &json!({ "v": 1 })).unwrap());
        assert!(store.delete("things", "x").unwrap());
        assert!(store.get::<Value>("things", "x").unwrap().is_none());
    }

    #[test]
    fn modify_updates_in_place_or_skips_missing() {
        let store = Store::open_in_memory().unwrap();
        store.insert("things", "x", None, &json!({ "n": 1 })).unwrap();
        let updated = store
            .modify::<Value, StoreError>("things", "x", |doc| {
                doc["n"] = json!(2);
                Ok(())
            })
            .unwrap();
        assert_eq!(updated.unwrap()["n"], 2);

        let missing = store
            .modify::<Value, StoreError>("things", "nope", |_| panic!("not called"))
            .unwrap();
        assert!(missing.is_none());
    }
}

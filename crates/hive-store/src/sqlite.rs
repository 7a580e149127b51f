//! SQLite-backed corpus

use crate::StoreError;
use hive_domain::traits::{CorpusReader, HexWriter};
use hive_domain::Hex;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::debug;

const UPSERT_HEX: &str = "INSERT INTO hexes (id, name, body, created_at, updated_at)
     VALUES (?1, ?2, ?3, ?4, ?5)
     ON CONFLICT(id) DO UPDATE SET
     name = excluded.name, body = excluded.body,
     created_at = excluded.created_at, updated_at = excluded.updated_at";

/// SQLite-based implementation of `CorpusReader` and `HexWriter`
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path`
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hive_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("hive.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    /// Number of stored hexes
    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM hexes", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn insert(conn: &Connection, hex: &Hex) -> Result<(), StoreError> {
        let body = serde_json::to_string(hex)?;
        conn.execute(
            UPSERT_HEX,
            params![
                &hex.id,
                &hex.name,
                &body,
                hex.created as i64,
                hex.updated as i64,
            ],
        )?;
        Ok(())
    }

    /// Decode a stored body, checking it belongs to the row it came from
    fn decode(id: &str, body: &str) -> Result<Hex, StoreError> {
        let hex: Hex = serde_json::from_str(body)?;
        if hex.id != id {
            return Err(StoreError::InvalidData(format!(
                "Row {} holds hex {}",
                id, hex.id
            )));
        }
        Ok(hex)
    }
}

impl CorpusReader for SqliteStore {
    type Error = StoreError;

    fn all_hexes(&self) -> Result<Vec<Hex>, Self::Error> {
        let mut stmt = self.conn.prepare("SELECT id, body FROM hexes ORDER BY id")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        rows.iter().map(|(id, body)| Self::decode(id, body)).collect()
    }

    fn get_hex(&self, id: &str) -> Result<Option<Hex>, Self::Error> {
        let body: Option<String> = self
            .conn
            .query_row("SELECT body FROM hexes WHERE id = ?1", params![id], |row| {
                row.get(0)
            })
            .optional()?;

        body.map(|body| Self::decode(id, &body)).transpose()
    }

    fn hex_exists(&self, id: &str) -> Result<bool, Self::Error> {
        let exists = self
            .conn
            .query_row("SELECT 1 FROM hexes WHERE id = ?1", params![id], |_| Ok(true))
            .optional()?
            .unwrap_or(false);
        Ok(exists)
    }
}

impl HexWriter for SqliteStore {
    type Error = StoreError;

    fn save_hex(&mut self, hex: Hex) -> Result<(), Self::Error> {
        hex.validate()?;
        Self::insert(&self.conn, &hex)?;
        debug!("Saved hex {}", hex.id);
        Ok(())
    }

    fn bulk_save_hexes(&mut self, hexes: Vec<Hex>) -> Result<(), Self::Error> {
        for hex in &hexes {
            hex.validate()?;
        }

        let tx = self.conn.transaction()?;
        for hex in &hexes {
            Self::insert(&tx, hex)?;
        }
        tx.commit()?;

        debug!("Saved {} hexes", hexes.len());
        Ok(())
    }

    fn delete_hex(&mut self, id: &str) -> Result<bool, Self::Error> {
        let removed = self
            .conn
            .execute("DELETE FROM hexes WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.conn.execute("DELETE FROM hexes", [])?;
        Ok(())
    }
}

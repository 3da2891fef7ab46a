//! Local persistence for catalog entities
//!
//! Uses parameterized queries exclusively (no SQL string concatenation).
//! Bulk replacement is transactional: delete-all then insert-all.

use crate::error::Result;
use crate::models::CatalogEntity;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Storage seam injected into the pipeline and the session
pub trait CatalogStore: Send + Sync {
    /// All entities, ascending by id
    fn load_all(&self) -> Result<Vec<CatalogEntity>>;

    /// Replace the whole table with `entities`
    fn replace_all(&self, entities: &[CatalogEntity]) -> Result<()>;

    /// Set the favorite flag; returns false (and changes nothing) if the id is absent
    fn set_favorite(&self, id: i64, value: bool) -> Result<bool>;

    /// A single entity by id
    fn get(&self, id: i64) -> Result<Option<CatalogEntity>>;
}

/// Creates the `pokemon` table if it does not already exist.
///
/// Column names are the durable on-disk contract.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS pokemon (
            id          INTEGER PRIMARY KEY,
            name        TEXT NOT NULL,
            image       TEXT NOT NULL,
            types       TEXT NOT NULL,
            hp          INTEGER NOT NULL,
            attack      INTEGER NOT NULL,
            defense     INTEGER NOT NULL,
            speed       INTEGER NOT NULL,
            isFavorite  INTEGER NOT NULL DEFAULT 0
        );",
    )?;
    Ok(())
}

const SELECT_COLUMNS: &str =
    "SELECT id, name, image, types, hp, attack, defense, speed, isFavorite FROM pokemon";

fn entity_from_row(row: &Row<'_>) -> rusqlite::Result<CatalogEntity> {
    Ok(CatalogEntity {
        id: row.get(0)?,
        name: row.get(1)?,
        image_url: row.get(2)?,
        types: row.get(3)?,
        hp: row.get(4)?,
        attack: row.get(5)?,
        defense: row.get(6)?,
        speed: row.get(7)?,
        is_favorite: row.get(8)?,
    })
}

/// SQLite-backed store; the connection is guarded by a mutex
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) the database file and initialises the schema.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
                log::info!("Created directory: {}", parent.display());
            }
        }
        log::info!("Catalog DB: {}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    /// In-memory database, mostly for tests
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        // Unfinished transactions roll back on drop, so a poisoned lock is still usable
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Number of stored rows
    pub fn count(&self) -> Result<i64> {
        let conn = self.lock();
        Ok(conn.query_row("SELECT COUNT(*) FROM pokemon", [], |row| row.get(0))?)
    }
}

fn replace_all_tx(tx: &Transaction<'_>, entities: &[CatalogEntity]) -> Result<usize> {
    let deleted = tx.execute("DELETE FROM pokemon", [])?;
    log::debug!("Deleted {} cached rows", deleted);

    let mut stmt = tx.prepare_cached(
        "INSERT OR REPLACE INTO pokemon
         (id, name, image, types, hp, attack, defense, speed, isFavorite)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )?;

    let mut count = 0;
    for entity in entities {
        stmt.execute(params![
            entity.id,
            &entity.name,
            &entity.image_url,
            &entity.types,
            entity.hp,
            entity.attack,
            entity.defense,
            entity.speed,
            entity.is_favorite,
        ])?;
        count += 1;
    }
    Ok(count)
}

impl CatalogStore for SqliteStore {
    fn load_all(&self) -> Result<Vec<CatalogEntity>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(&format!("{} ORDER BY id ASC", SELECT_COLUMNS))?;
        let entities = stmt
            .query_map([], entity_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entities)
    }

    fn replace_all(&self, entities: &[CatalogEntity]) -> Result<()> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        let count = replace_all_tx(&tx, entities)?;
        tx.commit()?;
        log::info!("Stored {} catalog entries", count);
        Ok(())
    }

    fn set_favorite(&self, id: i64, value: bool) -> Result<bool> {
        let conn = self.lock();
        let changed = conn.execute(
            "UPDATE pokemon SET isFavorite = ?1 WHERE id = ?2",
            params![value, id],
        )?;
        if changed == 0 {
            log::debug!("No stored entry with id {}, favorite not persisted", id);
        }
        Ok(changed > 0)
    }

    fn get(&self, id: i64) -> Result<Option<CatalogEntity>> {
        let conn = self.lock();
        let entity = conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id],
                entity_from_row,
            )
            .optional()?;
        Ok(entity)
    }
}

/// Map-backed store for tests and embedding without a database file
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<BTreeMap<i64, CatalogEntity>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<i64, CatalogEntity>> {
        self.rows.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CatalogStore for MemoryStore {
    fn load_all(&self) -> Result<Vec<CatalogEntity>> {
        Ok(self.lock().values().cloned().collect())
    }

    fn replace_all(&self, entities: &[CatalogEntity]) -> Result<()> {
        let mut rows = self.lock();
        rows.clear();
        rows.extend(entities.iter().map(|e| (e.id, e.clone())));
        Ok(())
    }

    fn set_favorite(&self, id: i64, value: bool) -> Result<bool> {
        match self.lock().get_mut(&id) {
            Some(entity) => {
                entity.is_favorite = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn get(&self, id: i64) -> Result<Option<CatalogEntity>> {
        Ok(self.lock().get(&id).cloned())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

/// Document store adapter for River documents.
///
/// The engines treat the store as an opaque collection of River documents
/// with find / insert / replace operations — no transactions, no partial
/// updates, no versioning token. Every mutation round-trips the entire
/// River document, so two concurrent mutations to the same river race and
/// the second replace silently wins. That lost-update hazard is inherited
/// behavior, kept on purpose; callers get no isolation from this layer.
///
/// `PgRiverStore` persists each River as one JSONB row in PostgreSQL.
/// `MemoryRiverStore` backs dev mode and tests.

use postgres::Client;

use crate::model::River;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors from the store adapter.
#[derive(Debug)]
pub enum StoreError {
    /// The database rejected or failed the operation.
    Database(postgres::Error),
    /// A stored document could not be (de)serialized.
    Serialization(serde_json::Error),
    /// A replace was attempted on a river that has no id yet.
    MissingId,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Database(err) => write!(f, "database error: {}", err),
            StoreError::Serialization(err) => write!(f, "document serialization error: {}", err),
            StoreError::MissingId => write!(f, "river has no id; insert it before replacing"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(err) => Some(err),
            StoreError::Serialization(err) => Some(err),
            StoreError::MissingId => None,
        }
    }
}

impl From<postgres::Error> for StoreError {
    fn from(err: postgres::Error) -> Self {
        StoreError::Database(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err)
    }
}

// ---------------------------------------------------------------------------
// Store contract
// ---------------------------------------------------------------------------

/// The collection of River documents, as seen by the engines.
///
/// `find_all` returns rivers sorted ascending by name — the sort is this
/// adapter's responsibility and callers consume it as-is. `find_by_name`
/// returns the first match; river names are assumed unique but never
/// enforced. `insert_one`/`insert_many` assign ids into the passed rivers.
pub trait RiverStore: Send {
    fn find_all(&mut self) -> Result<Vec<River>, StoreError>;
    fn find_by_name(&mut self, name: &str) -> Result<Option<River>, StoreError>;
    fn insert_one(&mut self, river: &mut River) -> Result<(), StoreError>;
    fn insert_many(&mut self, rivers: &mut [River]) -> Result<(), StoreError>;
    /// Replaces the whole document keyed on its id.
    fn replace_by_id(&mut self, river: &River) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// PostgreSQL-backed store
// ---------------------------------------------------------------------------

/// River documents as JSONB rows in a single `rivers` table.
///
/// The `name` column duplicates the document's name so `find_all` can sort
/// and `find_by_name` can filter in SQL; the document itself stays opaque
/// to the database. The id column is authoritative — it overwrites any id
/// embedded in the stored document on read.
pub struct PgRiverStore {
    client: Client,
}

impl PgRiverStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates the rivers table if it does not exist yet.
    pub fn init_schema(&mut self) -> Result<(), StoreError> {
        self.client.batch_execute(
            "CREATE TABLE IF NOT EXISTS rivers (
                id   BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                doc  JSONB NOT NULL
             );
             CREATE INDEX IF NOT EXISTS rivers_name_idx ON rivers (name);",
        )?;
        Ok(())
    }

    fn row_to_river(row: &postgres::Row) -> Result<River, StoreError> {
        let id: i64 = row.get(0);
        let doc: serde_json::Value = row.get(1);
        let mut river: River = serde_json::from_value(doc)?;
        river.id = Some(id.to_string());
        Ok(river)
    }
}

impl RiverStore for PgRiverStore {
    fn find_all(&mut self) -> Result<Vec<River>, StoreError> {
        let rows = self
            .client
            .query("SELECT id, doc FROM rivers ORDER BY name ASC, id ASC", &[])?;
        rows.iter().map(Self::row_to_river).collect()
    }

    fn find_by_name(&mut self, name: &str) -> Result<Option<River>, StoreError> {
        // First match on duplicates, in insertion order.
        let row = self.client.query_opt(
            "SELECT id, doc FROM rivers WHERE name = $1 ORDER BY id ASC LIMIT 1",
            &[&name],
        )?;
        row.as_ref().map(Self::row_to_river).transpose()
    }

    fn insert_one(&mut self, river: &mut River) -> Result<(), StoreError> {
        let doc = serde_json::to_value(&*river)?;
        let row = self.client.query_one(
            "INSERT INTO rivers (name, doc) VALUES ($1, $2) RETURNING id",
            &[&river.name, &doc],
        )?;
        let id: i64 = row.get(0);
        river.id = Some(id.to_string());
        Ok(())
    }

    fn insert_many(&mut self, rivers: &mut [River]) -> Result<(), StoreError> {
        for river in rivers {
            self.insert_one(river)?;
        }
        Ok(())
    }

    fn replace_by_id(&mut self, river: &River) -> Result<(), StoreError> {
        let id: i64 = river
            .id
            .as_deref()
            .and_then(|s| s.parse().ok())
            .ok_or(StoreError::MissingId)?;
        let doc = serde_json::to_value(river)?;
        self.client.execute(
            "UPDATE rivers SET name = $2, doc = $3 WHERE id = $1",
            &[&id, &river.name, &doc],
        )?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Vec-backed store with sequential ids, for dev mode and tests.
///
/// Mirrors the adapter contract exactly, including the sorted `find_all`
/// and first-match `find_by_name` semantics.
#[derive(Debug)]
pub struct MemoryRiverStore {
    rivers: Vec<River>,
    next_id: u64,
}

impl MemoryRiverStore {
    pub fn new() -> Self {
        Self {
            rivers: Vec::new(),
            next_id: 1,
        }
    }
}

impl Default for MemoryRiverStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RiverStore for MemoryRiverStore {
    fn find_all(&mut self) -> Result<Vec<River>, StoreError> {
        let mut all = self.rivers.clone();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    fn find_by_name(&mut self, name: &str) -> Result<Option<River>, StoreError> {
        Ok(self.rivers.iter().find(|r| r.name == name).cloned())
    }

    fn insert_one(&mut self, river: &mut River) -> Result<(), StoreError> {
        river.id = Some(self.next_id.to_string());
        self.next_id += 1;
        self.rivers.push(river.clone());
        Ok(())
    }

    fn insert_many(&mut self, rivers: &mut [River]) -> Result<(), StoreError> {
        for river in rivers {
            self.insert_one(river)?;
        }
        Ok(())
    }

    fn replace_by_id(&mut self, river: &River) -> Result<(), StoreError> {
        let id = river.id.as_ref().ok_or(StoreError::MissingId)?;
        if let Some(slot) = self
            .rivers
            .iter_mut()
            .find(|r| r.id.as_ref() == Some(id))
        {
            *slot = river.clone();
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn river(name: &str) -> River {
        River {
            id: None,
            name: name.to_string(),
            stations: Vec::new(),
        }
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let mut store = MemoryRiverStore::new();
        let mut a = river("San");
        let mut b = river("Wisła");
        store.insert_one(&mut a).unwrap();
        store.insert_one(&mut b).unwrap();
        assert_eq!(a.id.as_deref(), Some("1"));
        assert_eq!(b.id.as_deref(), Some("2"));
    }

    #[test]
    fn test_find_all_is_sorted_by_name_ascending() {
        let mut store = MemoryRiverStore::new();
        let mut rivers = vec![river("Wisła"), river("Odra"), river("San")];
        store.insert_many(&mut rivers).unwrap();

        let names: Vec<_> = store
            .find_all()
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Odra", "San", "Wisła"]);
    }

    #[test]
    fn test_find_by_name_returns_first_match_on_duplicates() {
        // River names are assumed unique but never enforced. When two
        // rivers share a name, the earlier insert wins the lookup.
        let mut store = MemoryRiverStore::new();
        let mut first = river("San");
        let mut second = river("San");
        store.insert_one(&mut first).unwrap();
        store.insert_one(&mut second).unwrap();

        let found = store.find_by_name("San").unwrap().unwrap();
        assert_eq!(found.id, first.id);
    }

    #[test]
    fn test_find_by_name_returns_none_when_absent() {
        let mut store = MemoryRiverStore::new();
        assert!(store.find_by_name("Dunajec").unwrap().is_none());
    }

    #[test]
    fn test_replace_by_id_overwrites_the_whole_document() {
        let mut store = MemoryRiverStore::new();
        let mut r = river("San");
        store.insert_one(&mut r).unwrap();

        r.name = "San (renamed)".to_string();
        store.replace_by_id(&r).unwrap();

        assert!(store.find_by_name("San").unwrap().is_none());
        assert!(store.find_by_name("San (renamed)").unwrap().is_some());
    }

    #[test]
    fn test_replace_without_id_fails() {
        let mut store = MemoryRiverStore::new();
        let r = river("San");
        let result = store.replace_by_id(&r);
        assert!(matches!(result, Err(StoreError::MissingId)));
    }
}

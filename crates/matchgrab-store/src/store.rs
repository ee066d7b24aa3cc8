//! Persistent match store backed by redb.
//!
//! One `Database` is opened per process (redb holds an exclusive file lock);
//! every read operation runs inside its own read transaction which lives only
//! for the duration of the call. Dropping the transaction releases it, so
//! early returns from decode failures or visitor errors never leak a reader.

use crate::key::MatchKey;
use crate::record::{Match, encode_match};
use crate::tables;
use matchgrab_common::{Error, Result};
use redb::{
    Database, ReadOnlyTable, ReadTransaction, ReadableTable, ReadableTableMetadata, TableError,
};
use std::path::Path;
use tracing::debug;

/// Error type for redb operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::DatabaseError),
    #[error("redb storage error: {0}")]
    Storage(#[from] redb::StorageError),
    #[error("redb table error: {0}")]
    Table(#[from] redb::TableError),
    #[error("redb transaction error: {0}")]
    Transaction(Box<redb::TransactionError>),
    #[error("redb commit error: {0}")]
    Commit(#[from] redb::CommitError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<redb::TransactionError> for StoreError {
    fn from(e: redb::TransactionError) -> Self {
        Self::Transaction(Box::new(e))
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        Self::Store(e.to_string())
    }
}

/// Ordered key-value access to raw match records.
///
/// Implementations must visit keys in ascending byte order and must not hold
/// any resource past the end of a call.
pub trait RecordStore {
    /// Fetch the raw record stored under `key`
    fn get(&self, key: MatchKey) -> Result<Option<Vec<u8>>>;

    /// Visit every `(key, record)` pair in ascending key order.
    ///
    /// Each call starts a fresh scan. An error from `visit` stops the scan and
    /// is returned as-is.
    fn scan(&self, visit: &mut dyn FnMut(MatchKey, &[u8]) -> Result<()>) -> Result<()>;
}

/// Match store backed by a single redb file
pub struct MatchStore {
    db: Database,
}

impl MatchStore {
    /// Open an existing redb database for querying.
    ///
    /// Never creates the file or runs a write transaction; a missing file is
    /// a store error. A database the ingestion side has not written a match
    /// table into yet reads as empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let db = Database::open(path).map_err(StoreError::from)?;
        debug!("Opened match store at {}", path.display());

        Ok(Self { db })
    }

    /// Create (or open) the redb database at the given path for writing.
    ///
    /// Used by ingestion tooling and tests. Parent directories and the match
    /// table are created when missing.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(StoreError::from)?;
        }
        let db = Database::create(path).map_err(StoreError::from)?;
        Self::ensure_tables(&db)?;
        debug!("Created match store at {}", path.display());

        Ok(Self { db })
    }

    fn ensure_tables(db: &Database) -> std::result::Result<(), StoreError> {
        let write_txn = db.begin_write()?;
        {
            let _t = write_txn.open_table(tables::MATCHES)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Write one match under its encoded ID, replacing any previous record.
    ///
    /// Only ingestion tooling and tests write; the query path never does.
    pub fn insert(&self, record: &Match) -> Result<()> {
        let key = MatchKey::encode(record.game_id);
        self.put_raw(key, &encode_match(record))
    }

    /// Write raw bytes under `key` without validating them
    pub fn put_raw(&self, key: MatchKey, value: &[u8]) -> Result<()> {
        (|| -> std::result::Result<(), StoreError> {
            let write_txn = self.db.begin_write()?;
            {
                let mut table = write_txn.open_table(tables::MATCHES)?;
                table.insert(key.as_bytes().as_slice(), value)?;
            }
            write_txn.commit()?;
            Ok(())
        })()
        .map_err(Error::from)
    }

    /// Number of stored matches
    pub fn count(&self) -> Result<u64> {
        (|| -> std::result::Result<u64, StoreError> {
            let read_txn = self.db.begin_read()?;
            match open_matches(&read_txn)? {
                Some(table) => Ok(table.len()?),
                None => Ok(0),
            }
        })()
        .map_err(Error::from)
    }
}

/// Open the match table, treating a table that was never created as absent
fn open_matches(
    read_txn: &ReadTransaction,
) -> std::result::Result<Option<ReadOnlyTable<&'static [u8], &'static [u8]>>, StoreError> {
    match read_txn.open_table(tables::MATCHES) {
        Ok(table) => Ok(Some(table)),
        Err(TableError::TableDoesNotExist(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl RecordStore for MatchStore {
    fn get(&self, key: MatchKey) -> Result<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read().map_err(StoreError::from)?;
        let Some(table) = open_matches(&read_txn)? else {
            return Ok(None);
        };
        let value = table
            .get(key.as_bytes().as_slice())
            .map_err(StoreError::from)?;
        Ok(value.map(|v| v.value().to_vec()))
    }

    fn scan(&self, visit: &mut dyn FnMut(MatchKey, &[u8]) -> Result<()>) -> Result<()> {
        let read_txn = self.db.begin_read().map_err(StoreError::from)?;
        let Some(table) = open_matches(&read_txn)? else {
            return Ok(());
        };
        for entry in table.iter().map_err(StoreError::from)? {
            let (key, value) = entry.map_err(StoreError::from)?;
            let key = MatchKey::try_from(key.value())?;
            visit(key, value.value())?;
        }
        Ok(())
    }
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn get(&self, key: MatchKey) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn scan(&self, visit: &mut dyn FnMut(MatchKey, &[u8]) -> Result<()>) -> Result<()> {
        (**self).scan(visit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Participant;
    use tempfile::tempdir;

    fn game(game_id: i64) -> Match {
        Match {
            game_id,
            participants: vec![Participant {
                summoner_name: format!("player-{game_id}"),
                account_id: game_id * 10,
                ..Participant::default()
            }],
            ..Match::default()
        }
    }

    #[test]
    fn test_store_insert_and_get() {
        let dir = tempdir().unwrap();
        let store = MatchStore::create(dir.path().join("matches.redb")).unwrap();

        let record = game(42);
        store.insert(&record).unwrap();

        let raw = store.get(MatchKey::encode(42)).unwrap().unwrap();
        assert_eq!(raw, encode_match(&record));
        assert!(store.get(MatchKey::encode(43)).unwrap().is_none());
    }

    #[test]
    fn test_store_scan_ascending() {
        let dir = tempdir().unwrap();
        let store = MatchStore::create(dir.path().join("matches.redb")).unwrap();

        for id in [50, -3, 7, 0, i64::MIN, 1_000_000, -1] {
            store.insert(&game(id)).unwrap();
        }

        let mut seen = Vec::new();
        store
            .scan(&mut |key, _| {
                seen.push(key.match_id());
                Ok(())
            })
            .unwrap();
        assert_eq!(seen, vec![i64::MIN, -3, -1, 0, 7, 50, 1_000_000]);
        assert_eq!(store.count().unwrap(), 7);
    }

    #[test]
    fn test_store_scan_stops_on_visitor_error() {
        let dir = tempdir().unwrap();
        let store = MatchStore::create(dir.path().join("matches.redb")).unwrap();
        for id in 1..=5 {
            store.insert(&game(id)).unwrap();
        }

        let mut visited = 0;
        let err = store
            .scan(&mut |key, _| {
                visited += 1;
                if key.match_id() == 3 {
                    return Err(Error::store("stop"));
                }
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(err, Error::Store(_)));
        assert_eq!(visited, 3);

        // A fresh scan after the failed one sees everything again
        let mut again = 0;
        store
            .scan(&mut |_, _| {
                again += 1;
                Ok(())
            })
            .unwrap();
        assert_eq!(again, 5);
    }

    #[test]
    fn test_store_reopen_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/matches.redb");
        {
            let store = MatchStore::create(&path).unwrap();
            store.insert(&game(9)).unwrap();
        }
        let store = MatchStore::open(&path).unwrap();
        assert!(store.get(MatchKey::encode(9)).unwrap().is_some());
    }

    #[test]
    fn test_open_missing_file_fails_without_creating() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/matches.redb");

        let err = MatchStore::open(&path).err().unwrap();
        assert!(matches!(err, Error::Store(_)), "got {err:?}");
        assert!(!path.exists());
        assert!(!path.parent().unwrap().exists());
    }

    #[test]
    fn test_open_without_match_table_reads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("matches.redb");
        drop(Database::create(&path).unwrap());

        let store = MatchStore::open(&path).unwrap();
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.get(MatchKey::encode(1)).unwrap().is_none());
        store
            .scan(&mut |key, _| panic!("unexpected record {key:?}"))
            .unwrap();
    }

    #[test]
    fn test_store_empty() {
        let dir = tempdir().unwrap();
        let store = MatchStore::create(dir.path().join("matches.redb")).unwrap();
        assert_eq!(store.count().unwrap(), 0);

        let mut visited = false;
        store
            .scan(&mut |_, _| {
                visited = true;
                Ok(())
            })
            .unwrap();
        assert!(!visited);
    }
}

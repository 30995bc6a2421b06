//! Trigger record persistence.
//!
//! The store is the injected seam between the correlation engine and
//! whatever persistence technology backs it. The contract that matters is
//! `update_trigger`: an atomic read-modify-write per (user, food), so two
//! attribution runs racing on the same user can never lose an increment.

use crate::{Error, Result, TriggerRecord};
use fs2::FileExt;
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Per-user trigger table keyed by food name
pub type TriggerTable = BTreeMap<String, TriggerRecord>;

/// Storage interface for trigger records.
///
/// Implementations must make `update_trigger` atomic with respect to other
/// writers for the same user; callers never do a separate read-then-write.
pub trait TriggerStore {
    /// Atomically read, transform, and persist one food's record.
    ///
    /// The closure receives the current record (None when absent) and
    /// returns the record to store, or None to leave nothing stored
    /// (declining creation, or deleting an existing record).
    fn update_trigger<F>(&self, user: &str, food: &str, f: F) -> Result<Option<TriggerRecord>>
    where
        F: FnOnce(Option<TriggerRecord>) -> Option<TriggerRecord>;

    /// All records for a user, in stable (food name) order
    fn load_triggers(&self, user: &str) -> Result<Vec<TriggerRecord>>;

    /// Delete a record outright. Returns true when a record existed.
    fn remove_trigger(&self, user: &str, food: &str) -> Result<bool>;
}

/// File-backed trigger store: one `triggers.json` table per user.
///
/// Writers hold an exclusive lock on a sidecar `.lock` file across the
/// whole load-mutate-persist cycle. The lock lives on a stable path
/// because the data file's inode is replaced on every atomic rename.
#[derive(Clone, Debug)]
pub struct FileTriggerStore {
    root: PathBuf,
}

impl FileTriggerStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn table_path(&self, user: &str) -> PathBuf {
        self.root.join("users").join(user).join("triggers.json")
    }

    fn lock_path(&self, user: &str) -> PathBuf {
        self.root.join("users").join(user).join("triggers.lock")
    }

    fn open_lock(&self, user: &str) -> Result<File> {
        let path = self.lock_path(user);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).write(true).open(&path)?;
        Ok(file)
    }

    /// Load the table. Missing file is an empty table; a corrupt file is
    /// logged and treated as empty rather than failing the caller.
    fn load_table(path: &Path) -> TriggerTable {
        if !path.exists() {
            return TriggerTable::new();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<TriggerTable>(&contents) {
                Ok(table) => table,
                Err(e) => {
                    tracing::warn!("Failed to parse trigger table {:?}: {}. Starting empty.", path, e);
                    TriggerTable::new()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read trigger table {:?}: {}. Starting empty.", path, e);
                TriggerTable::new()
            }
        }
    }

    /// Persist the table atomically: temp file in the same directory,
    /// fsync, rename over the original.
    fn save_table(path: &Path, table: &TriggerTable) -> Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| Error::Store("trigger table path missing parent".into()))?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(table)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }

    /// Lock, load, mutate, persist. The single write path for this store.
    fn with_table<F, R>(&self, user: &str, f: F) -> Result<R>
    where
        F: FnOnce(&mut TriggerTable) -> R,
    {
        let lock = self.open_lock(user)?;
        lock.lock_exclusive()?;

        let path = self.table_path(user);
        let mut table = Self::load_table(&path);
        let out = f(&mut table);
        let saved = Self::save_table(&path, &table);

        lock.unlock()?;
        saved?;
        Ok(out)
    }
}

impl TriggerStore for FileTriggerStore {
    fn update_trigger<F>(&self, user: &str, food: &str, f: F) -> Result<Option<TriggerRecord>>
    where
        F: FnOnce(Option<TriggerRecord>) -> Option<TriggerRecord>,
    {
        self.with_table(user, |table| {
            let current = table.get(food).cloned();
            match f(current) {
                Some(record) => {
                    table.insert(food.to_string(), record.clone());
                    Some(record)
                }
                None => {
                    table.remove(food);
                    None
                }
            }
        })
    }

    fn load_triggers(&self, user: &str) -> Result<Vec<TriggerRecord>> {
        let lock = self.open_lock(user)?;
        lock.lock_shared()?;
        let table = Self::load_table(&self.table_path(user));
        lock.unlock()?;
        Ok(table.into_values().collect())
    }

    fn remove_trigger(&self, user: &str, food: &str) -> Result<bool> {
        self.with_table(user, |table| table.remove(food).is_some())
    }
}

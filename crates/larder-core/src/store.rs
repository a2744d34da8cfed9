//! Persistence adapter for the planner's two stored sets.
//!
//! The planner keeps exactly two values in a string-keyed store, each a
//! JSON-encoded array:
//!
//! - [`SELECTED_RECIPES_KEY`]: recipe ids chosen for the week;
//! - [`PURCHASED_GROCERIES_KEY`]: canonical ingredient keys marked as bought.
//!
//! [`KeyValueStore`] is the raw get/set seam. [`MemoryStore`] backs tests;
//! [`FileStore`] keeps a small JSON object on disk. [`Persistence`] layers
//! the typed set operations on top of either.
//!
//! A stored value that fails to parse is treated as an empty collection and
//! logged; it never surfaces as an error.

use crate::error::{Error, Result};
use crate::lock::StoreLock;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Storage key for the selected recipe ids.
pub const SELECTED_RECIPES_KEY: &str = "rp:selectedRecipes";

/// Storage key for the purchased ingredient keys.
pub const PURCHASED_GROCERIES_KEY: &str = "rp:purchasedGroceries";

const LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// A string-keyed, string-valued store.
pub trait KeyValueStore {
    /// Read the raw value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the raw value stored under `key`.
    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        (**self).set(key, value)
    }
}

/// In-memory store, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw access for tests that plant foreign or corrupt values.
    pub fn insert_raw(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// JSON-object file store: `{ "<key>": "<json value>", ... }`.
///
/// Writes take an exclusive advisory lock on `<file>.lock`, then replace the
/// file by rename. There is no change notification between processes.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".lock");
        PathBuf::from(name)
    }

    fn storage_err(&self, source: std::io::Error) -> Error {
        Error::Storage {
            path: self.path.clone(),
            source,
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            }
            Err(err) => return Err(self.storage_err(err)),
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        match serde_json::from_str(&content) {
            Ok(values) => Ok(values),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    "planner store is not a JSON object, treating as empty: {err}"
                );
                Ok(BTreeMap::new())
            }
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        let lock = StoreLock::acquire(&self.lock_path(), LOCK_TIMEOUT)?;

        let mut values = self.read_all()?;
        values.insert(key.to_string(), value);
        let body = serde_json::to_string_pretty(&values)?;

        let mut tmp = self.path.as_os_str().to_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        std::fs::write(&tmp, body).map_err(|e| self.storage_err(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.storage_err(e))?;

        debug!(path = %self.path.display(), key, "planner store updated");
        lock.release();
        Ok(())
    }
}

/// Typed access to the selection and purchased sets.
#[derive(Debug, Clone, Default)]
pub struct Persistence<S> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Selected recipe ids, deduplicated.
    pub fn selected_recipe_ids(&self) -> Result<BTreeSet<String>> {
        self.read_set(SELECTED_RECIPES_KEY)
    }

    /// Store the selected recipe ids, deduplicating first.
    pub fn set_selected_recipe_ids<I, T>(&mut self, ids: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let ids: BTreeSet<String> = ids.into_iter().map(Into::into).collect();
        self.write_set(SELECTED_RECIPES_KEY, &ids)
    }

    /// Canonical keys marked as purchased.
    pub fn purchased_keys(&self) -> Result<BTreeSet<String>> {
        self.read_set(PURCHASED_GROCERIES_KEY)
    }

    /// Store the purchased keys.
    pub fn set_purchased_keys(&mut self, keys: &BTreeSet<String>) -> Result<()> {
        self.write_set(PURCHASED_GROCERIES_KEY, keys)
    }

    fn read_set(&self, key: &str) -> Result<BTreeSet<String>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(BTreeSet::new());
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(values) => Ok(values.into_iter().collect()),
            Err(err) => {
                warn!(key, "stored value is not a JSON string array, treating as empty: {err}");
                Ok(BTreeSet::new())
            }
        }
    }

    fn write_set(&mut self, key: &str, values: &BTreeSet<String>) -> Result<()> {
        let encoded = serde_json::to_string(values)?;
        self.store.set(key, encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_reads_empty_sets() {
        let p = Persistence::new(MemoryStore::new());
        assert!(p.selected_recipe_ids().expect("read").is_empty());
        assert!(p.purchased_keys().expect("read").is_empty());
    }

    #[test]
    fn selection_is_deduplicated_on_write() {
        let mut p = Persistence::new(MemoryStore::new());
        p.set_selected_recipe_ids(["soup", "salad", "soup"])
            .expect("write");

        let raw = p.store().get(SELECTED_RECIPES_KEY).expect("get");
        assert_eq!(raw.as_deref(), Some(r#"["salad","soup"]"#));
        assert_eq!(p.selected_recipe_ids().expect("read").len(), 2);
    }

    #[test]
    fn duplicate_entries_in_storage_collapse_on_read() {
        let mut store = MemoryStore::new();
        store.insert_raw(SELECTED_RECIPES_KEY, r#"["a","b","a"]"#);
        let p = Persistence::new(store);
        let ids = p.selected_recipe_ids().expect("read");
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn malformed_values_read_as_empty() {
        let mut store = MemoryStore::new();
        store.insert_raw(SELECTED_RECIPES_KEY, "{not json");
        store.insert_raw(PURCHASED_GROCERIES_KEY, r#"{"foreign":true}"#);
        let p = Persistence::new(store);
        assert!(p.selected_recipe_ids().expect("read").is_empty());
        assert!(p.purchased_keys().expect("read").is_empty());
    }

    #[test]
    fn sets_are_independent() {
        let mut p = Persistence::new(MemoryStore::new());
        p.set_selected_recipe_ids(["soup"]).expect("write");
        let purchased: BTreeSet<String> = ["2 eggs".to_string()].into();
        p.set_purchased_keys(&purchased).expect("write");

        assert_eq!(p.purchased_keys().expect("read"), purchased);
        assert!(p.selected_recipe_ids().expect("read").contains("soup"));
    }

    #[test]
    fn file_store_round_trips_across_instances() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");

        let mut first = Persistence::new(FileStore::new(&path));
        first.set_selected_recipe_ids(["soup"]).expect("write");
        first
            .set_purchased_keys(&["salt".to_string()].into())
            .expect("write");

        let second = Persistence::new(FileStore::new(&path));
        assert!(second.selected_recipe_ids().expect("read").contains("soup"));
        assert!(second.purchased_keys().expect("read").contains("salt"));
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path().join("absent.json"));
        assert_eq!(store.get(SELECTED_RECIPES_KEY).expect("get"), None);
    }

    #[test]
    fn file_store_corrupt_document_is_replaced_on_write() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        std::fs::write(&path, "garbage").expect("seed");

        let mut p = Persistence::new(FileStore::new(&path));
        assert!(p.selected_recipe_ids().expect("read").is_empty());
        p.set_selected_recipe_ids(["soup"]).expect("write");

        let doc: BTreeMap<String, String> =
            serde_json::from_str(&std::fs::read_to_string(&path).expect("read back"))
                .expect("valid JSON object");
        assert_eq!(doc[SELECTED_RECIPES_KEY], r#"["soup"]"#);
    }
}

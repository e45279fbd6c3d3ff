use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// Store keys, carried over from the original localStorage layout.
pub const KEY_MEAL_DATA: &str = "carnivoreMealData";
pub const KEY_FILTER_IN_STOCK: &str = "filterInStock";
pub const KEY_PROTEIN_SETTINGS: &str = "proteinSettings";
pub const KEY_CUISINE_SETTINGS: &str = "cuisineSettings";
pub const KEY_CUISINE_LIST: &str = "cuisineList";

/// Key-value persistence boundary. Values are JSON documents.
///
/// Malformed stored JSON surfaces as an error at the read site; callers
/// substitute defaults only where one is explicitly specified.
pub trait KvStore {
    fn get_value(&self, key: &str) -> Option<&Value>;

    fn set_value(&mut self, key: &str, value: Value);

    fn contains(&self, key: &str) -> bool {
        self.get_value(key).is_some()
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_value(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    fn set_json<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        self.set_value(key, serde_json::to_value(value)?);
        Ok(())
    }
}

/// File-backed store: a single JSON object mapping keys to values.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
}

impl JsonFileStore {
    /// Open a store file; a missing or empty file starts an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            // An empty file holds no values at all, unlike malformed JSON.
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    /// Write the store back to its file.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KvStore for JsonFileStore {
    fn get_value(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    fn set_value(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }
}

/// In-memory store, used by tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get_value(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    fn set_value(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_starts_empty() {
        let store = JsonFileStore::open("does_not_exist.json").unwrap();
        assert!(!store.contains(KEY_MEAL_DATA));
    }

    #[test]
    fn test_empty_file_starts_empty() {
        // A zero-byte file (interrupted write, touched file) is an
        // empty store, not malformed data.
        let file = NamedTempFile::new().unwrap();

        let store = JsonFileStore::open(file.path()).unwrap();
        assert!(!store.contains(KEY_MEAL_DATA));

        let mut whitespace = NamedTempFile::new().unwrap();
        whitespace.write_all(b"  \n").unwrap();
        let store = JsonFileStore::open(whitespace.path()).unwrap();
        assert!(!store.contains(KEY_MEAL_DATA));
    }

    #[test]
    fn test_file_roundtrip() {
        let file = NamedTempFile::new().unwrap();

        let mut store = JsonFileStore::open(file.path()).unwrap();
        store.set_json(KEY_FILTER_IN_STOCK, &true).unwrap();
        store
            .set_json(KEY_CUISINE_LIST, &vec!["American".to_string()])
            .unwrap();
        store.save().unwrap();

        let reloaded = JsonFileStore::open(file.path()).unwrap();
        assert_eq!(reloaded.get_json::<bool>(KEY_FILTER_IN_STOCK).unwrap(), Some(true));
        let list: Vec<String> = reloaded.get_json(KEY_CUISINE_LIST).unwrap().unwrap();
        assert_eq!(list, vec!["American".to_string()]);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not json at all").unwrap();

        assert!(JsonFileStore::open(file.path()).is_err());
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let mut store = MemoryStore::new();
        store.set_json(KEY_FILTER_IN_STOCK, &"yes").unwrap();

        assert!(store.get_json::<bool>(KEY_FILTER_IN_STOCK).is_err());
    }
}

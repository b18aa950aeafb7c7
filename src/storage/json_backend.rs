use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tracing::debug;

use super::EntityStore;
use crate::errors::{FinanceError, Result};
use crate::utils::fs::{ensure_dir, write_atomic};

const EXTENSION: &str = "json";

/// One pretty-printed JSON file per collection under a root directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collection_path(&self, collection: &str) -> Result<PathBuf> {
        let name = canonical_name(collection)?;
        Ok(self.root.join(format!("{name}.{EXTENSION}")))
    }
}

impl EntityStore for JsonStore {
    fn load(&self, collection: &str) -> Result<Option<Value>> {
        let path = self.collection_path(collection)?;
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&data)?))
    }

    fn save(&self, collection: &str, records: Value) -> Result<()> {
        let path = self.collection_path(collection)?;
        let json = serde_json::to_string_pretty(&records)?;
        write_atomic(&path, &json)?;
        debug!(collection, path = %path.display(), "collection saved");
        Ok(())
    }
}

/// Collection keys become file names, so only plain identifiers are accepted.
fn canonical_name(collection: &str) -> Result<&str> {
    let valid = !collection.is_empty()
        && collection
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-'));
    if valid {
        Ok(collection)
    } else {
        Err(FinanceError::StorageError(format!(
            "invalid collection name `{collection}`"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (JsonStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonStore::new(temp.path().join("data")).expect("json store");
        (store, temp)
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (store, _guard) = store_with_temp_dir();
        store.save("pagos", json!([{"monto": 10}])).expect("save");
        let loaded = store.load("pagos").expect("load");
        assert_eq!(loaded, Some(json!([{"monto": 10}])));
        assert!(store.root().join("pagos.json").exists());
    }

    #[test]
    fn missing_file_is_absent() {
        let (store, _guard) = store_with_temp_dir();
        assert_eq!(store.load("notasCredito").expect("load"), None);
    }

    #[test]
    fn path_traversal_is_rejected() {
        let (store, _guard) = store_with_temp_dir();
        let err = store.save("../escape", json!([])).unwrap_err();
        assert!(matches!(err, FinanceError::StorageError(_)));
    }
}

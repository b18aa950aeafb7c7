use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use super::EntityStore;
use crate::errors::{FinanceError, Result};

/// Process-local store, mainly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.collections
            .read()
            .map(|collections| collections.is_empty())
            .unwrap_or(true)
    }
}

impl EntityStore for MemoryStore {
    fn load(&self, collection: &str) -> Result<Option<Value>> {
        let collections = self
            .collections
            .read()
            .map_err(|_| FinanceError::StorageError("memory store lock poisoned".into()))?;
        Ok(collections.get(collection).cloned())
    }

    fn save(&self, collection: &str, records: Value) -> Result<()> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| FinanceError::StorageError("memory store lock poisoned".into()))?;
        collections.insert(collection.to_string(), records);
        Ok(())
    }
}

//! Entity Store: whole-collection persistence keyed by name.
//!
//! Every mutation is a read-modify-write of an entire collection. Nothing
//! coordinates two writers: if two hosts (or browser tabs) save the same
//! collection concurrently, the last save silently wins.

pub mod json_backend;
pub mod memory;

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::errors::{FinanceError, Result};

pub use json_backend::JsonStore;
pub use memory::MemoryStore;

/// Named collections shared with the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Payments,
    CreditNotes,
    Movements,
    Clients,
    Suppliers,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Payments,
        Collection::CreditNotes,
        Collection::Movements,
        Collection::Clients,
        Collection::Suppliers,
    ];

    /// Storage key used by the host application.
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Payments => "pagos",
            Collection::CreditNotes => "notasCredito",
            Collection::Movements => "movimientos",
            Collection::Clients => "clientes",
            Collection::Suppliers => "proveedores",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Abstraction over persistence backends holding named JSON collections.
pub trait EntityStore: Send + Sync {
    /// Returns the stored collection, or `None` when it was never saved.
    fn load(&self, collection: &str) -> Result<Option<Value>>;

    /// Replaces the whole collection.
    fn save(&self, collection: &str, records: Value) -> Result<()>;
}

/// Typed access on top of any [`EntityStore`].
pub trait EntityStoreExt: EntityStore {
    fn load_records<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
        match self.load(collection.key())? {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| serde_json::from_value(item).map_err(FinanceError::from))
                .collect(),
            Some(_) => Err(FinanceError::StorageError(format!(
                "collection `{collection}` is not a list"
            ))),
        }
    }

    fn save_records<T: Serialize>(&self, collection: Collection, records: &[T]) -> Result<()> {
        self.save(collection.key(), serde_json::to_value(records)?)
    }
}

impl<S: EntityStore + ?Sized> EntityStoreExt for S {}

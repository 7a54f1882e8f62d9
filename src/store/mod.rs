//! Persistent store - whole-collection reads and writes under fixed keys.
//!
//! The repository never talks to a backend directly. It loads a collection, mutates a
//! copy and writes the whole collection back through [`CollectionStore`], so any
//! key-value medium (memory, `SQLite`, a file) can sit underneath.

mod memory;
mod sea_orm_store;

pub use memory::MemoryStore;
pub use sea_orm_store::SeaOrmStore;

use crate::errors::Result;
use serde::{Serialize, de::DeserializeOwned};
use std::fmt;
use std::future::Future;
use tracing::{debug, warn};

/// Names of the six persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKey {
    /// Material price list
    Materials,
    /// Active transactions
    Transactions,
    /// Soft-deleted transactions
    Trash,
    /// Category names
    Categories,
    /// Employee roster
    Employees,
    /// Daily-wage payment records
    Payments,
}

impl SlotKey {
    /// Every slot, in load order.
    pub const ALL: [Self; 6] = [
        Self::Materials,
        Self::Transactions,
        Self::Trash,
        Self::Categories,
        Self::Employees,
        Self::Payments,
    ];

    /// Storage key for this slot
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Materials => "fv_materials",
            Self::Transactions => "fv_transactions",
            Self::Trash => "fv_trash_transactions",
            Self::Categories => "fv_categories",
            Self::Employees => "fv_employees",
            Self::Payments => "fv_payments",
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw key-value access to serialized collections.
///
/// Implementations must make a completed write visible to every later read.
pub trait CollectionStore: Send + Sync {
    /// Returns the serialized value of a slot, or `None` if it was never written.
    fn read_slot(&self, key: SlotKey) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Replaces the value of a slot.
    fn write_slot(&self, key: SlotKey, value: String) -> impl Future<Output = Result<()>> + Send;

    /// Replaces several slots at once; either all values are written or none.
    fn write_slots(
        &self,
        entries: Vec<(SlotKey, String)>,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Loads a slot and decodes it as `T`.
///
/// A slot that is absent or cannot be decoded yields `None`; a corrupt slot is
/// logged and treated as absent.
pub async fn load_slot<S, T>(store: &S, key: SlotKey) -> Result<Option<T>>
where
    S: CollectionStore,
    T: DeserializeOwned,
{
    let Some(raw) = store.read_slot(key).await? else {
        debug!("Slot {key} is empty");
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!("Slot {key} could not be decoded, treating it as absent: {e}");
            Ok(None)
        }
    }
}

/// Loads a collection, defaulting to an empty list when absent or corrupt.
pub async fn load_collection<S, T>(store: &S, key: SlotKey) -> Result<Vec<T>>
where
    S: CollectionStore,
    T: DeserializeOwned,
{
    Ok(load_slot(store, key).await?.unwrap_or_default())
}

/// Serializes and writes a whole collection.
pub async fn save_collection<S, T>(store: &S, key: SlotKey, items: &[T]) -> Result<()>
where
    S: CollectionStore,
    T: Serialize + Sync,
{
    let raw = serde_json::to_string(items)?;
    store.write_slot(key, raw).await?;
    debug!("Wrote {} entries to slot {key}", items.len());
    Ok(())
}

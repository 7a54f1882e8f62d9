use super::{CollectionStore, SlotKey};
use crate::errors::Result;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Volatile store, used by tests and by callers that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<SlotKey, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CollectionStore for MemoryStore {
    async fn read_slot(&self, key: SlotKey) -> Result<Option<String>> {
        Ok(self.slots.read().await.get(&key).cloned())
    }

    async fn write_slot(&self, key: SlotKey, value: String) -> Result<()> {
        self.slots.write().await.insert(key, value);
        Ok(())
    }

    async fn write_slots(&self, entries: Vec<(SlotKey, String)>) -> Result<()> {
        let mut slots = self.slots.write().await;
        slots.extend(entries);
        Ok(())
    }
}

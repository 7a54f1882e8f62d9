//! `SQLite` store backed by `SeaORM`.
//!
//! Each collection is one row of the `slots` table. Multi-slot writes (moving a
//! transaction between the active set and the trash) run in a database transaction
//! so both slots change together.

use super::{CollectionStore, SlotKey};
use crate::{
    entities::{Slot, slot},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, Set, TransactionTrait, prelude::*};

/// Store over a `SeaORM` connection; tables must exist (see
/// [`crate::config::database::create_tables`]).
#[derive(Debug, Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    /// Wraps an open connection.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The underlying connection
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Inserts or replaces a slot row.
async fn upsert_slot<C>(db: &C, key: SlotKey, value: String) -> Result<()>
where
    C: ConnectionTrait,
{
    let now = Utc::now().naive_utc();

    let existing = Slot::find_by_id(key.as_str().to_string()).one(db).await?;

    if let Some(row) = existing {
        let mut active_model: slot::ActiveModel = row.into();
        active_model.value = Set(value);
        active_model.updated_at = Set(now);
        active_model.update(db).await?;
    } else {
        let new_row = slot::ActiveModel {
            key: Set(key.as_str().to_string()),
            value: Set(value),
            updated_at: Set(now),
        };
        new_row.insert(db).await?;
    }

    Ok(())
}

impl CollectionStore for SeaOrmStore {
    async fn read_slot(&self, key: SlotKey) -> Result<Option<String>> {
        let row = Slot::find_by_id(key.as_str().to_string())
            .one(&self.db)
            .await?;
        Ok(row.map(|r| r.value))
    }

    async fn write_slot(&self, key: SlotKey, value: String) -> Result<()> {
        upsert_slot(&self.db, key, value).await
    }

    async fn write_slots(&self, entries: Vec<(SlotKey, String)>) -> Result<()> {
        let txn = self.db.begin().await?;

        for (key, value) in entries {
            upsert_slot(&txn, key, value).await?;
        }

        txn.commit().await?;
        Ok(())
    }
}

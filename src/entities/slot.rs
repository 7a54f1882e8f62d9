//! Slot entity - one row per persisted collection.
//!
//! Each row holds a whole collection serialized as a JSON array under a fixed key
//! (`fv_materials`, `fv_transactions`, ...). Writes replace the value in full.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Slot database model - a named JSON document
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "slots")]
pub struct Model {
    /// Slot key (e.g., `"fv_materials"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Serialized collection
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When this slot was last written
    pub updated_at: DateTime,
}

/// Slots have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

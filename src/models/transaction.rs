//! Transaction model - a buy or sell operation with one or more weighed items.
//!
//! Items carry snapshots of the material name and unit price taken when the
//! transaction was recorded. They are never re-linked to the live material list,
//! so renaming or repricing a material leaves history untouched.

use super::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a transaction from the yard's point of view.
///
/// Serialized with the labels used by the original data ("Compra"/"Venda").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// The yard buys material from a supplier
    #[serde(rename = "Compra")]
    Buy,
    /// The yard sells material to a customer
    #[serde(rename = "Venda")]
    Sell,
}

impl TransactionKind {
    /// Display label as persisted
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Buy => "Compra",
            Self::Sell => "Venda",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One weighed line of a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionItem {
    /// Material name at the time of the transaction
    pub material_name: String,
    /// Weight in kg
    pub weight: f64,
    /// Price per kg at the time of the transaction
    pub unit_price: f64,
    /// `weight * unit_price`
    pub total: f64,
}

impl TransactionItem {
    /// Creates an item and computes its total.
    #[must_use]
    pub fn new(material_name: impl Into<String>, weight: f64, unit_price: f64) -> Self {
        Self {
            material_name: material_name.into(),
            weight,
            unit_price,
            total: weight * unit_price,
        }
    }
}

/// Transaction as persisted in the active or trash slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Opaque unique id, kept when moving to and from the trash
    pub id: String,
    /// Buy or sell
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Supplier or customer name
    pub person_name: String,
    /// Weighed items, in the order they were added
    pub items: Vec<TransactionItem>,
    /// Sum of item totals at creation time; never recomputed
    pub total: f64,
    /// Creation timestamp
    pub date: DateTime<Utc>,
}

/// Transaction fields without an id, ready to be appended
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// Buy or sell
    pub kind: TransactionKind,
    /// Supplier or customer name
    pub person_name: String,
    /// Weighed items
    pub items: Vec<TransactionItem>,
    /// Sum of item totals
    pub total: f64,
    /// Creation timestamp
    pub date: DateTime<Utc>,
}

impl NewTransaction {
    /// Builds a transaction whose total is the sum of the item totals.
    #[must_use]
    pub fn from_items(
        kind: TransactionKind,
        person_name: impl Into<String>,
        items: Vec<TransactionItem>,
        date: DateTime<Utc>,
    ) -> Self {
        let total = items.iter().map(|item| item.total).sum();
        Self {
            kind,
            person_name: person_name.into(),
            items,
            total,
            date,
        }
    }
}

impl Transaction {
    /// Assigns an id to a new transaction.
    #[must_use]
    pub fn with_id(id: String, new: NewTransaction) -> Self {
        Self {
            id,
            kind: new.kind,
            person_name: new.person_name,
            items: new.items,
            total: new.total,
            date: new.date,
        }
    }

    /// Comma-separated material names of the items.
    #[must_use]
    pub fn material_names(&self) -> String {
        self.items
            .iter()
            .map(|item| item.material_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Record for Transaction {
    fn id(&self) -> &str {
        &self.id
    }
}

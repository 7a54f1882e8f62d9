//! Material model - a priced item on the yard's list.
//!
//! A material carries both a buy and a sell price, but its availability decides which
//! of them actually apply. A `sell_only` material has no meaningful buy price and a
//! `buy_only` material has no meaningful sell price, whatever value is stored.

use super::{Record, TransactionKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kinds of transaction a material may appear in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// Bought and sold
    #[default]
    Both,
    /// Only sold by the yard
    SellOnly,
    /// Only bought by the yard
    BuyOnly,
}

impl Availability {
    /// Returns true if a material with this availability can be used for `kind`.
    #[must_use]
    pub const fn allows(self, kind: TransactionKind) -> bool {
        match (self, kind) {
            (Self::Both, _) | (Self::BuyOnly, TransactionKind::Buy) | (Self::SellOnly, TransactionKind::Sell) => true,
            (Self::BuyOnly, TransactionKind::Sell) | (Self::SellOnly, TransactionKind::Buy) => false,
        }
    }

    /// Stable lowercase name, as stored.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Both => "both",
            Self::SellOnly => "sell_only",
            Self::BuyOnly => "buy_only",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Material as persisted in the materials slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    /// Opaque unique id, immutable after creation
    pub id: String,
    /// Display name (e.g. "Cobre Mel")
    pub name: String,
    /// Category name; may dangle if the category was removed
    pub category: String,
    /// Price paid per kg when buying
    pub buy_price: f64,
    /// Price charged per kg when selling
    pub sell_price: f64,
    /// Older records may lack this field; they are treated as `both`
    #[serde(default)]
    pub availability: Availability,
}

/// Material fields without an id, as submitted by a form or a seed file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDraft {
    /// Display name
    pub name: String,
    /// Category name
    pub category: String,
    /// Buy price per kg
    pub buy_price: f64,
    /// Sell price per kg
    pub sell_price: f64,
    /// Which transactions the material may appear in
    #[serde(default)]
    pub availability: Availability,
}

impl Material {
    /// Builds a stored material from a draft and an id.
    #[must_use]
    pub fn from_draft(id: String, draft: MaterialDraft) -> Self {
        Self {
            id,
            name: draft.name,
            category: draft.category,
            buy_price: draft.buy_price,
            sell_price: draft.sell_price,
            availability: draft.availability,
        }
    }

    /// Unit price used for a transaction of `kind`, or `None` when the
    /// availability makes that price inapplicable.
    #[must_use]
    pub const fn price_for(&self, kind: TransactionKind) -> Option<f64> {
        if !self.availability.allows(kind) {
            return None;
        }
        match kind {
            TransactionKind::Buy => Some(self.buy_price),
            TransactionKind::Sell => Some(self.sell_price),
        }
    }

    /// Buy price, or `None` for `sell_only` materials.
    #[must_use]
    pub const fn effective_buy_price(&self) -> Option<f64> {
        self.price_for(TransactionKind::Buy)
    }

    /// Sell price, or `None` for `buy_only` materials.
    #[must_use]
    pub const fn effective_sell_price(&self) -> Option<f64> {
        self.price_for(TransactionKind::Sell)
    }

    /// Difference between sell and buy price per kg.
    #[must_use]
    pub fn margin(&self) -> f64 {
        self.sell_price - self.buy_price
    }
}

impl Record for Material {
    fn id(&self) -> &str {
        &self.id
    }
}

//! Input guards for the three forms that feed the repository.
//!
//! Invalid input is rejected here and never reaches the store. Numeric fields accept
//! either `.` or `,` as the decimal separator.

use crate::{
    errors::{Error, Result},
    models::{
        Availability, EmployeeDraft, Material, MaterialDraft, NewTransaction, TransactionItem,
        TransactionKind,
    },
};
use chrono::{DateTime, Utc};

/// Parses a decimal number typed by a user, accepting a comma separator.
///
/// Returns `None` for blank, non-numeric or non-finite input.
#[must_use]
pub fn parse_decimal(text: &str) -> Option<f64> {
    let normalized = text.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parses a non-negative amount.
///
/// # Errors
/// Returns [`Error::InvalidAmount`] for non-numeric or negative input.
pub fn parse_amount(text: &str) -> Result<f64> {
    parse_decimal(text)
        .filter(|value| *value >= 0.0)
        .ok_or_else(|| Error::InvalidAmount {
            input: text.to_string(),
        })
}

/// Parses a strictly positive weight in kg.
///
/// # Errors
/// Returns [`Error::InvalidWeight`] for non-numeric, zero or negative input.
pub fn parse_weight(text: &str) -> Result<f64> {
    parse_decimal(text)
        .filter(|value| *value > 0.0)
        .ok_or_else(|| Error::InvalidWeight {
            input: text.to_string(),
        })
}

fn required(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::MissingField { field });
    }
    Ok(trimmed.to_string())
}

/// Raw material form fields
#[derive(Debug, Clone, Default)]
pub struct MaterialForm {
    /// Display name
    pub name: String,
    /// Category name
    pub category: String,
    /// Buy price text; ignored for `sell_only`
    pub buy_price: String,
    /// Sell price text; ignored for `buy_only`
    pub sell_price: String,
    /// Selected availability
    pub availability: Availability,
}

impl MaterialForm {
    /// Pre-fills the form from a stored material, for editing.
    #[must_use]
    pub fn from_material(material: &Material) -> Self {
        Self {
            name: material.name.clone(),
            category: material.category.clone(),
            buy_price: material.buy_price.to_string(),
            sell_price: material.sell_price.to_string(),
            availability: material.availability,
        }
    }

    /// Validates the form into a draft.
    ///
    /// The price made inapplicable by the availability is stored as zero; the
    /// other price(s) must parse.
    ///
    /// # Errors
    /// Returns an error for an empty name or a missing/invalid required price.
    pub fn into_draft(self) -> Result<MaterialDraft> {
        let name = required("name", &self.name)?;
        let buy_price = match self.availability {
            Availability::SellOnly => 0.0,
            Availability::Both | Availability::BuyOnly => parse_amount(&self.buy_price)?,
        };
        let sell_price = match self.availability {
            Availability::BuyOnly => 0.0,
            Availability::Both | Availability::SellOnly => parse_amount(&self.sell_price)?,
        };

        Ok(MaterialDraft {
            name,
            category: self.category.trim().to_string(),
            buy_price,
            sell_price,
            availability: self.availability,
        })
    }
}

/// Raw employee form fields
#[derive(Debug, Clone, Default)]
pub struct EmployeeForm {
    /// Full name
    pub name: String,
    /// Daily rate text
    pub daily_rate: String,
}

impl EmployeeForm {
    /// Validates the form into an active employee draft.
    ///
    /// # Errors
    /// Returns an error for an empty name or an invalid rate.
    pub fn into_draft(self) -> Result<EmployeeDraft> {
        Ok(EmployeeDraft {
            name: required("name", &self.name)?,
            daily_rate: parse_amount(&self.daily_rate)?,
            active: true,
        })
    }
}

/// Basket of weighed items being assembled for one transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    kind: TransactionKind,
    items: Vec<TransactionItem>,
}

impl TransactionDraft {
    /// Starts an empty basket.
    #[must_use]
    pub const fn new(kind: TransactionKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
        }
    }

    /// Buy or sell
    #[must_use]
    pub const fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// Items added so far
    #[must_use]
    pub fn items(&self) -> &[TransactionItem] {
        &self.items
    }

    /// Running total of the basket.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.items.iter().map(|item| item.total).sum()
    }

    /// Adds a line from weight text as typed by the user.
    ///
    /// # Errors
    /// See [`Self::add_item_weight`]; also fails on unparsable weight.
    pub fn add_item(&mut self, material: &Material, weight_text: &str) -> Result<&TransactionItem> {
        let weight = parse_weight(weight_text)?;
        self.add_item_weight(material, weight)
    }

    /// Adds a line, snapshotting the material name and its current unit price.
    ///
    /// # Errors
    /// Fails for a non-positive weight or a material not offered for this kind.
    pub fn add_item_weight(&mut self, material: &Material, weight: f64) -> Result<&TransactionItem> {
        if !(weight.is_finite() && weight > 0.0) {
            return Err(Error::InvalidWeight {
                input: weight.to_string(),
            });
        }
        let unit_price = material
            .price_for(self.kind)
            .ok_or_else(|| Error::MaterialUnavailable {
                name: material.name.clone(),
                kind: self.kind.to_string(),
            })?;

        self.items
            .push(TransactionItem::new(material.name.clone(), weight, unit_price));
        Ok(&self.items[self.items.len() - 1])
    }

    /// Removes the line at `index`; out-of-range indexes are ignored.
    pub fn remove_item(&mut self, index: usize) -> Option<TransactionItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Closes the basket into a transaction ready for the repository.
    ///
    /// # Errors
    /// Fails when the basket is empty or the person name is blank.
    pub fn finish(self, person_name: &str, date: DateTime<Utc>) -> Result<NewTransaction> {
        if self.items.is_empty() {
            return Err(Error::EmptyTransaction);
        }
        let person_name = required("person_name", person_name)?;
        Ok(NewTransaction::from_items(self.kind, person_name, self.items, date))
    }
}

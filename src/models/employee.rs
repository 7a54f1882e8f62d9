//! Employee roster and daily-wage payment records.
//!
//! Payment records snapshot the employee name and keep the employee id even after
//! the employee is removed from the roster.

use super::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Roster entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Opaque unique id
    pub id: String,
    /// Full name
    pub name: String,
    /// Wage owed per worked day
    pub daily_rate: f64,
    /// Always true for now; removal deletes the entry instead
    pub active: bool,
}

/// Employee fields without an id
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeDraft {
    /// Full name
    pub name: String,
    /// Wage owed per worked day
    pub daily_rate: f64,
    /// Whether the employee is active
    pub active: bool,
}

impl Employee {
    /// Builds a roster entry from a draft and an id.
    #[must_use]
    pub fn from_draft(id: String, draft: EmployeeDraft) -> Self {
        Self {
            id,
            name: draft.name,
            daily_rate: draft.daily_rate,
            active: draft.active,
        }
    }
}

impl Record for Employee {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Payment lifecycle; only `Pending -> Paid` is a valid transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Issued, not yet handed over
    Pending,
    /// Handed over
    Paid,
}

/// Daily-wage payment as persisted in the payments slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    /// Opaque unique id
    pub id: String,
    /// Id of the employee; may no longer exist on the roster
    pub employee_id: String,
    /// Employee name when the payment was issued
    pub employee_name: String,
    /// Amount owed
    pub amount: f64,
    /// Issue timestamp
    pub date: DateTime<Utc>,
    /// Pending or paid
    pub status: PaymentStatus,
}

/// Payment fields without an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    /// Id of the employee
    pub employee_id: String,
    /// Employee name snapshot
    pub employee_name: String,
    /// Amount owed
    pub amount: f64,
    /// Issue timestamp
    pub date: DateTime<Utc>,
    /// Initial status, conventionally pending
    pub status: PaymentStatus,
}

impl PaymentRecord {
    /// Assigns an id to a new payment.
    #[must_use]
    pub fn with_id(id: String, new: NewPayment) -> Self {
        Self {
            id,
            employee_id: new.employee_id,
            employee_name: new.employee_name,
            amount: new.amount,
            date: new.date,
            status: new.status,
        }
    }
}

impl Record for PaymentRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

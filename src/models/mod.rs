//! Data model shared by the repository, the aggregation engine and the coordinator.
//!
//! All types serialize with camelCase field names so persisted slots keep the same
//! JSON layout as the browser tool that first wrote them.

/// Employees and daily-wage payment records
pub mod employee;
/// Materials, availability and the price list
pub mod material;
/// Buy/sell transactions and their line items
pub mod transaction;

pub use employee::{Employee, EmployeeDraft, NewPayment, PaymentRecord, PaymentStatus};
pub use material::{Availability, Material, MaterialDraft};
pub use transaction::{NewTransaction, Transaction, TransactionItem, TransactionKind};

/// Anything stored in a collection under an opaque string id.
pub trait Record {
    /// The immutable id assigned at creation
    fn id(&self) -> &str;
}

/// Generates a fresh opaque id for a new record.
#[must_use]
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

//! Shared test utilities for the scrapyard ledger.
//!
//! This module provides store setup helpers and sample records with sensible
//! defaults.

#![allow(clippy::unwrap_used)]

use crate::{
    core::transaction,
    errors::Result,
    models::{
        Availability, EmployeeDraft, Material, MaterialDraft, NewTransaction, PaymentRecord,
        PaymentStatus, Transaction, TransactionItem, TransactionKind,
    },
    store::{MemoryStore, SeaOrmStore},
};
use chrono::{DateTime, TimeZone, Utc};

/// Creates an empty in-memory store.
#[must_use]
pub fn setup_test_store() -> MemoryStore {
    MemoryStore::new()
}

/// Creates an in-memory `SQLite` database with the slots table initialized.
pub async fn setup_sqlite_store() -> Result<SeaOrmStore> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(SeaOrmStore::new(db))
}

/// A fixed timestamp: Wednesday 2024-01-10 12:00 UTC.
#[must_use]
pub fn sample_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()
}

/// Draft for "Cobre" in "Metais", buy 42.5, sell 48.0.
#[must_use]
pub fn cobre_draft() -> MaterialDraft {
    sample_material("Cobre", 42.5, 48.0)
}

/// Material draft in "Metais" available for both kinds.
#[must_use]
pub fn sample_material(name: &str, buy_price: f64, sell_price: f64) -> MaterialDraft {
    MaterialDraft {
        name: name.to_string(),
        category: "Metais".to_string(),
        buy_price,
        sell_price,
        availability: Availability::Both,
    }
}

/// Stored material whose id is its name, available for both kinds.
#[must_use]
pub fn sample_stored_material(name: &str, buy_price: f64, sell_price: f64) -> Material {
    Material::from_draft(name.to_string(), sample_material(name, buy_price, sell_price))
}

/// Stored "Metais" material with buy 42.5, sell 48.0 and the given availability.
#[must_use]
pub fn material_with(name: &str, availability: Availability) -> Material {
    let mut material = sample_stored_material(name, 42.5, 48.0);
    material.availability = availability;
    material
}

/// Transaction ready to be recorded, one item per `(material, weight, unit_price)`.
#[must_use]
pub fn sample_transaction(
    kind: TransactionKind,
    person_name: &str,
    items: &[(&str, f64, f64)],
    date: DateTime<Utc>,
) -> NewTransaction {
    let items = items
        .iter()
        .map(|(name, weight, unit_price)| TransactionItem::new(*name, *weight, *unit_price))
        .collect();
    NewTransaction::from_items(kind, person_name, items, date)
}

/// Stored transaction of 1 kg of `material` at 10.0, dated [`sample_date`].
#[must_use]
pub fn sample_stored_transaction(
    id: &str,
    kind: TransactionKind,
    person_name: &str,
    material: &str,
) -> Transaction {
    Transaction::with_id(
        id.to_string(),
        sample_transaction(kind, person_name, &[(material, 1.0, 10.0)], sample_date()),
    )
}

/// Stored single-item transaction with the given total and date.
#[must_use]
pub fn dated_transaction(kind: TransactionKind, total: f64, date: DateTime<Utc>) -> Transaction {
    Transaction::with_id(
        date.to_rfc3339(),
        sample_transaction(kind, "Pessoa", &[("Cobre", 1.0, total)], date),
    )
}

/// Records `count` buy transactions and returns the active set.
pub async fn seed_transactions<S: crate::store::CollectionStore>(
    store: &S,
    count: usize,
) -> Result<Vec<Transaction>> {
    let mut active = transaction::list_transactions(store).await?;
    for i in 0..count {
        let tx = sample_transaction(
            TransactionKind::Buy,
            &format!("Fornecedor {i}"),
            &[("Cobre", 1.0 + i as f64, 42.5)],
            sample_date(),
        );
        active = transaction::save_transaction(store, tx).await?;
    }
    Ok(active)
}

/// Active employee draft.
#[must_use]
pub fn sample_employee(name: &str, daily_rate: f64) -> EmployeeDraft {
    EmployeeDraft {
        name: name.to_string(),
        daily_rate,
        active: true,
    }
}

/// Payment record dated [`sample_date`].
#[must_use]
pub fn sample_payment(
    id: &str,
    employee_id: &str,
    amount: f64,
    status: PaymentStatus,
) -> PaymentRecord {
    PaymentRecord {
        id: id.to_string(),
        employee_id: employee_id.to_string(),
        employee_name: format!("Funcionário {employee_id}"),
        amount,
        date: sample_date(),
        status,
    }
}

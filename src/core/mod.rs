//! Core business logic - framework-agnostic repository, aggregation and form guards.
//!
//! Repository functions take any [`CollectionStore`](crate::store::CollectionStore),
//! read the whole affected collection, mutate a copy and write it back before
//! returning the updated collection. Unknown ids are silent no-ops.

/// Employee roster and daily-wage payments
pub mod employee;
/// Input parsing and validation for materials, employees and transaction baskets
pub mod forms;
/// Business insights from the external text-generation service
pub mod insights;
/// Materials, price list and categories
pub mod material;
/// Weekly dashboard statistics and chart series
pub mod report;
/// Transactions and the recycle bin
pub mod transaction;

use crate::models::{Record, generate_id};
use tracing::debug;

/// Updates the entry with `id` in place, or appends a new entry when `id` is `None`.
///
/// `build` receives the id to use. An `id` that matches nothing leaves `items`
/// untouched.
pub(crate) fn upsert<T, F>(items: &mut Vec<T>, id: Option<&str>, build: F)
where
    T: Record,
    F: FnOnce(String) -> T,
{
    match id {
        Some(id) => {
            if let Some(slot) = items.iter_mut().find(|item| item.id() == id) {
                *slot = build(id.to_string());
            } else {
                debug!("No entry with id {id}, update skipped");
            }
        }
        None => items.push(build(generate_id())),
    }
}

/// Removes every entry whose id is in `ids`.
pub(crate) fn remove_ids<T, I>(items: &mut Vec<T>, ids: &[I])
where
    T: Record,
    I: AsRef<str>,
{
    items.retain(|item| !ids.iter().any(|id| id.as_ref() == item.id()));
}

//! Entity module - Contains the SeaORM entity definitions for the database.
//! The ledger keeps each collection as a single JSON document, so there is one table.

pub mod slot;

pub use slot::{Entity as Slot, Model as SlotModel};

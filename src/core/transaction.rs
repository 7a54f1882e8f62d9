//! Transaction business logic - recording operations and the recycle bin.
//!
//! Transactions are append-only: they are never edited after creation. Deleting one
//! moves it, unchanged and with its id, into the trash; restoring moves it back.
//! Only entries in the trash can be removed for good. A transaction id is always
//! in exactly one of the two sets.

use super::remove_ids;
use crate::{
    errors::Result,
    models::{NewTransaction, Transaction, TransactionKind, generate_id},
    store::{CollectionStore, SlotKey, load_collection, save_collection},
};
use tracing::{debug, info};

/// Both transaction collections after a move between them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionSets {
    /// Active transactions
    pub active: Vec<Transaction>,
    /// Soft-deleted transactions
    pub trash: Vec<Transaction>,
}

/// Retrieves all active transactions in insertion order.
pub async fn list_transactions<S: CollectionStore>(store: &S) -> Result<Vec<Transaction>> {
    load_collection(store, SlotKey::Transactions).await
}

/// Retrieves all soft-deleted transactions in the order they were trashed.
pub async fn list_trash<S: CollectionStore>(store: &S) -> Result<Vec<Transaction>> {
    load_collection(store, SlotKey::Trash).await
}

/// Appends a transaction with a fresh id and returns the active set.
pub async fn save_transaction<S: CollectionStore>(
    store: &S,
    transaction: NewTransaction,
) -> Result<Vec<Transaction>> {
    let mut transactions = list_transactions(store).await?;
    let recorded = Transaction::with_id(generate_id(), transaction);
    info!(
        "Recording {} of {:.2} for {}",
        recorded.kind, recorded.total, recorded.person_name
    );
    transactions.push(recorded);
    save_collection(store, SlotKey::Transactions, &transactions).await?;
    Ok(transactions)
}

/// Moves `id` from the active set to the end of the trash. Unknown ids change nothing.
pub async fn move_to_trash<S: CollectionStore>(store: &S, id: &str) -> Result<TransactionSets> {
    transfer(store, id, SlotKey::Transactions, SlotKey::Trash).await
}

/// Moves `id` from the trash back to the end of the active set. Unknown ids change nothing.
pub async fn restore_from_trash<S: CollectionStore>(store: &S, id: &str) -> Result<TransactionSets> {
    transfer(store, id, SlotKey::Trash, SlotKey::Transactions).await
}

/// Permanently removes the trash entries whose id is in `ids`; other ids are ignored.
pub async fn permanent_delete_trash<S, I>(store: &S, ids: &[I]) -> Result<Vec<Transaction>>
where
    S: CollectionStore,
    I: AsRef<str> + Sync,
{
    let mut trash = list_trash(store).await?;
    let before = trash.len();
    remove_ids(&mut trash, ids);
    save_collection(store, SlotKey::Trash, &trash).await?;
    info!("Permanently deleted {} trashed transactions", before - trash.len());
    Ok(trash)
}

async fn transfer<S: CollectionStore>(
    store: &S,
    id: &str,
    from: SlotKey,
    to: SlotKey,
) -> Result<TransactionSets> {
    let mut source: Vec<Transaction> = load_collection(store, from).await?;
    let mut target: Vec<Transaction> = load_collection(store, to).await?;

    if let Some(index) = source.iter().position(|t| t.id == id) {
        let moved = source.remove(index);
        target.push(moved);
        store
            .write_slots(vec![
                (from, serde_json::to_string(&source)?),
                (to, serde_json::to_string(&target)?),
            ])
            .await?;
        info!("Moved transaction {id} from {from} to {to}");
    } else {
        debug!("Transaction {id} not found in {from}, nothing moved");
    }

    Ok(match from {
        SlotKey::Trash => TransactionSets {
            active: target,
            trash: source,
        },
        _ => TransactionSets {
            active: source,
            trash: target,
        },
    })
}

/// Filters history by a free-text query and an optional kind, newest first.
///
/// The query matches the person name or any item's material name, case-insensitively.
#[must_use]
pub fn search_history<'a>(
    transactions: &'a [Transaction],
    query: &str,
    kind: Option<TransactionKind>,
) -> Vec<&'a Transaction> {
    let needle = query.to_lowercase();
    transactions
        .iter()
        .rev()
        .filter(|t| {
            t.person_name.to_lowercase().contains(&needle)
                || t
                    .items
                    .iter()
                    .any(|item| item.material_name.to_lowercase().contains(&needle))
        })
        .filter(|t| kind.is_none_or(|k| t.kind == k))
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_record_buy_scenario() -> Result<()> {
        let store = setup_test_store();

        let tx = sample_transaction(
            TransactionKind::Buy,
            "Fornecedor X",
            &[("Cobre", 10.0, 42.5)],
            sample_date(),
        );
        let active = save_transaction(&store, tx).await?;

        assert_eq!(active.len(), 1);
        assert_eq!(active[0].total, 425.0);
        assert_eq!(active[0].items[0].total, 425.0);
        assert!(list_trash(&store).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_move_and_restore_preserves_transaction() -> Result<()> {
        let store = setup_test_store();
        let active = seed_transactions(&store, 3).await?;
        let original = active[1].clone();

        let sets = move_to_trash(&store, &original.id).await?;
        assert_eq!(sets.active.len(), 2);
        assert_eq!(sets.trash, vec![original.clone()]);
        assert!(!sets.active.iter().any(|t| t.id == original.id));

        let sets = restore_from_trash(&store, &original.id).await?;
        assert!(sets.trash.is_empty());
        assert_eq!(sets.active.len(), 3);
        assert_eq!(sets.active.last().unwrap(), &original);

        // Re-reading from the store gives the same state
        assert_eq!(list_transactions(&store).await?, sets.active);
        assert!(list_trash(&store).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_move_unknown_id_is_noop() -> Result<()> {
        let store = setup_test_store();
        let active = seed_transactions(&store, 2).await?;

        let sets = move_to_trash(&store, "missing").await?;
        assert_eq!(sets.active, active);
        assert!(sets.trash.is_empty());

        let sets = restore_from_trash(&store, &active[0].id).await?;
        assert_eq!(sets.active, active);
        assert!(sets.trash.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_permanent_delete_only_touches_trash() -> Result<()> {
        let store = setup_test_store();
        let active = seed_transactions(&store, 3).await?;
        move_to_trash(&store, &active[0].id).await?;
        move_to_trash(&store, &active[2].id).await?;

        let before = list_trash(&store).await?;
        let unchanged = permanent_delete_trash(&store, &["not-there"]).await?;
        assert_eq!(unchanged, before);

        let trash = permanent_delete_trash(&store, &[active[0].id.as_str(), active[1].id.as_str()]).await?;
        assert_eq!(trash.len(), 1);
        assert_eq!(trash[0].id, active[2].id);

        // The active entry with a requested id is untouched
        let remaining = list_transactions(&store).await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, active[1].id);

        Ok(())
    }

    #[tokio::test]
    async fn test_trash_round_trip_on_sqlite() -> Result<()> {
        let store = setup_sqlite_store().await?;
        let active = seed_transactions(&store, 2).await?;

        let sets = move_to_trash(&store, &active[0].id).await?;
        assert_eq!(sets.trash.len(), 1);
        assert_eq!(list_trash(&store).await?, sets.trash);
        assert_eq!(list_transactions(&store).await?, sets.active);

        Ok(())
    }

    #[test]
    fn test_search_history_newest_first() {
        let txs = vec![
            sample_stored_transaction("1", TransactionKind::Buy, "Fornecedor A", "Cobre"),
            sample_stored_transaction("2", TransactionKind::Sell, "Cliente B", "Ferro"),
            sample_stored_transaction("3", TransactionKind::Buy, "Fornecedor C", "Ferro"),
        ];

        let all: Vec<&str> = search_history(&txs, "", None)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(all, vec!["3", "2", "1"]);

        let ferro_buys: Vec<&str> = search_history(&txs, "FERRO", Some(TransactionKind::Buy))
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ferro_buys, vec!["3"]);

        assert_eq!(search_history(&txs, "cliente", None).len(), 1);
    }
}

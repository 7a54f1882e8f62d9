//! Material business logic - the price list and its categories.
//!
//! Materials are saved with merge-or-append semantics: a known id updates the entry
//! in place (keeping its position), no id appends a new entry. Categories are a
//! plain ordered list; removing one never touches the materials that reference it.

use super::{remove_ids, upsert};
use crate::{
    errors::Result,
    models::{Material, MaterialDraft, TransactionKind},
    store::{CollectionStore, SlotKey, load_collection, load_slot, save_collection},
};
use tracing::info;

/// Categories used until the list is saved for the first time.
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Metais",
    "Plásticos",
    "Papéis/Papelão",
    "Eletrônicos",
    "Automotivo",
    "Outros",
];

/// Retrieves all materials in stored order.
pub async fn list_materials<S: CollectionStore>(store: &S) -> Result<Vec<Material>> {
    load_collection(store, SlotKey::Materials).await
}

/// Saves a material and returns the updated list.
///
/// With `id` set, the matching entry is replaced field by field and keeps its
/// position; an unknown id changes nothing. Without `id`, a new entry with a fresh
/// id is appended.
pub async fn save_material<S: CollectionStore>(
    store: &S,
    draft: MaterialDraft,
    id: Option<&str>,
) -> Result<Vec<Material>> {
    let mut materials = list_materials(store).await?;
    upsert(&mut materials, id, |id| Material::from_draft(id, draft));
    save_collection(store, SlotKey::Materials, &materials).await?;
    info!("Saved material (update: {}), {} on the list", id.is_some(), materials.len());
    Ok(materials)
}

/// Removes a material; an unknown id is a no-op.
pub async fn delete_material<S: CollectionStore>(store: &S, id: &str) -> Result<Vec<Material>> {
    let mut materials = list_materials(store).await?;
    remove_ids(&mut materials, &[id]);
    save_collection(store, SlotKey::Materials, &materials).await?;
    info!("Deleted material {id}, {} remain", materials.len());
    Ok(materials)
}

/// Retrieves the category list, or [`DEFAULT_CATEGORIES`] if none was ever saved.
pub async fn list_categories<S: CollectionStore>(store: &S) -> Result<Vec<String>> {
    let saved: Option<Vec<String>> = load_slot(store, SlotKey::Categories).await?;
    Ok(saved.unwrap_or_else(|| DEFAULT_CATEGORIES.iter().map(ToString::to_string).collect()))
}

/// Replaces the whole category list.
pub async fn save_categories<S: CollectionStore>(
    store: &S,
    categories: Vec<String>,
) -> Result<Vec<String>> {
    save_collection(store, SlotKey::Categories, &categories).await?;
    Ok(categories)
}

/// Appends a category. Blank names and names already on the list are ignored.
pub async fn add_category<S: CollectionStore>(store: &S, name: &str) -> Result<Vec<String>> {
    let mut categories = list_categories(store).await?;
    let trimmed = name.trim();
    if trimmed.is_empty() || categories.iter().any(|c| c == trimmed) {
        return Ok(categories);
    }
    categories.push(trimmed.to_string());
    save_categories(store, categories).await
}

/// Removes a category from the list. Materials keep their category name.
pub async fn remove_category<S: CollectionStore>(store: &S, name: &str) -> Result<Vec<String>> {
    let mut categories = list_categories(store).await?;
    categories.retain(|c| c != name);
    save_categories(store, categories).await
}

/// Materials that may be offered in a transaction of `kind`.
#[must_use]
pub fn materials_for(kind: TransactionKind, materials: &[Material]) -> Vec<&Material> {
    materials
        .iter()
        .filter(|m| m.availability.allows(kind))
        .collect()
}

/// Filters the price list by a free-text query and an optional category.
///
/// The query matches name or category, case-insensitively. `None` means all categories.
#[must_use]
pub fn search_materials<'a>(
    materials: &'a [Material],
    query: &str,
    category: Option<&str>,
) -> Vec<&'a Material> {
    let needle = query.to_lowercase();
    materials
        .iter()
        .filter(|m| {
            m.name.to_lowercase().contains(&needle) || m.category.to_lowercase().contains(&needle)
        })
        .filter(|m| category.is_none_or(|c| m.category == c))
        .collect()
}

/// Distinct categories of the given materials, in order of first appearance.
#[must_use]
pub fn price_list_categories(materials: &[Material]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for m in materials {
        if !categories.contains(&m.category) {
            categories.push(m.category.clone());
        }
    }
    categories
}

/// Groups materials by category, keeping first-appearance order of categories and
/// stored order within each group.
#[must_use]
pub fn group_by_category<'a>(materials: &[&'a Material]) -> Vec<(String, Vec<&'a Material>)> {
    let mut groups: Vec<(String, Vec<&'a Material>)> = Vec::new();
    for &m in materials {
        match groups.iter_mut().find(|(category, _)| *category == m.category) {
            Some((_, members)) => members.push(m),
            None => groups.push((m.category.clone(), vec![m])),
        }
    }
    groups
}

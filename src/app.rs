//! Application state coordinator.
//!
//! [`App`] loads every collection once at startup, seeding demonstration data into an
//! empty store, then keeps an in-memory [`ViewState`] in sync: each handler delegates
//! to the repository in [`crate::core`] and refreshes only the collections the
//! operation could have changed.

use crate::{
    config::seed::SeedConfig,
    core::{
        employee,
        forms::{EmployeeForm, MaterialForm, TransactionDraft},
        insights::InsightsClient,
        material,
        report::{WeekCursor, WeeklyReport, weekly_report},
        transaction,
    },
    errors::{Error, Result},
    models::{
        Employee, Material, NewTransaction, PaymentRecord, PaymentStatus, Transaction,
        TransactionKind, generate_id,
    },
    store::{CollectionStore, SlotKey, save_collection},
};
use chrono::{DateTime, Local, Utc};
use std::{fmt, str::FromStr};
use tracing::{debug, info, warn};

/// Screens the user can navigate between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    /// Weekly financial summary
    #[default]
    Dashboard,
    /// Read-only price list
    Prices,
    /// Material and category management
    Management,
    /// Roster and payroll
    Employees,
    /// Buy basket
    Buy,
    /// Sell basket
    Sell,
    /// Transaction history
    History,
    /// Recycle bin
    Trash,
}

impl View {
    /// Every view, in sidebar order.
    pub const ALL: [Self; 8] = [
        Self::Dashboard,
        Self::Prices,
        Self::Management,
        Self::Employees,
        Self::Buy,
        Self::Sell,
        Self::History,
        Self::Trash,
    ];

    /// Lowercase view name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Prices => "prices",
            Self::Management => "management",
            Self::Employees => "employees",
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::History => "history",
            Self::Trash => "trash",
        }
    }

    /// Transaction kind of a basket view.
    #[must_use]
    pub const fn transaction_kind(self) -> Option<TransactionKind> {
        match self {
            Self::Buy => Some(TransactionKind::Buy),
            Self::Sell => Some(TransactionKind::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|view| view.as_str() == s)
            .ok_or_else(|| Error::UnknownView {
                name: s.to_string(),
            })
    }
}

/// In-memory copy of the six persisted collections
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Price list
    pub materials: Vec<Material>,
    /// Active transactions
    pub transactions: Vec<Transaction>,
    /// Soft-deleted transactions
    pub trash: Vec<Transaction>,
    /// Category names
    pub categories: Vec<String>,
    /// Roster
    pub employees: Vec<Employee>,
    /// Payment records
    pub payments: Vec<PaymentRecord>,
}

impl ViewState {
    async fn load<S: CollectionStore>(store: &S) -> Result<Self> {
        Ok(Self {
            materials: material::list_materials(store).await?,
            transactions: transaction::list_transactions(store).await?,
            trash: transaction::list_trash(store).await?,
            categories: material::list_categories(store).await?,
            employees: employee::list_employees(store).await?,
            payments: employee::list_payments(store).await?,
        })
    }
}

/// Owns the store and the state the presentation layer renders.
pub struct App<S: CollectionStore> {
    store: S,
    state: ViewState,
    view: View,
    cursor: WeekCursor<Local>,
}

impl<S: CollectionStore> App<S> {
    /// Loads all collections, seeding `seed` first when the store holds neither
    /// materials nor transactions.
    pub async fn bootstrap(store: S, seed: &SeedConfig) -> Result<Self> {
        let materials = material::list_materials(&store).await?;
        let transactions = transaction::list_transactions(&store).await?;
        if materials.is_empty() && transactions.is_empty() {
            seed_store(&store, seed).await?;
        } else {
            debug!(
                "Store already holds {} materials and {} transactions, skipping seed",
                materials.len(),
                transactions.len()
            );
        }

        let state = ViewState::load(&store).await?;
        info!(
            "Loaded {} materials, {} transactions, {} in trash, {} employees",
            state.materials.len(),
            state.transactions.len(),
            state.trash.len(),
            state.employees.len()
        );

        Ok(Self {
            store,
            state,
            view: View::default(),
            cursor: WeekCursor::new(Local::now()),
        })
    }

    /// Current collections
    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    /// Underlying store
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Active view
    #[must_use]
    pub const fn view(&self) -> View {
        self.view
    }

    /// Switches the active view. Every transition is allowed.
    pub fn navigate(&mut self, view: View) {
        debug!("Navigating from {} to {view}", self.view);
        self.view = view;
    }

    /// Starts an empty basket for the active view, if it is a buy or sell view.
    #[must_use]
    pub fn start_transaction(&self) -> Option<TransactionDraft> {
        self.view.transaction_kind().map(TransactionDraft::new)
    }

    /// Materials that can be picked in a basket of `kind`.
    #[must_use]
    pub fn materials_for(&self, kind: TransactionKind) -> Vec<&Material> {
        material::materials_for(kind, &self.state.materials)
    }

    /// Records the basket as a new transaction dated now.
    pub async fn submit_transaction(&mut self, draft: TransactionDraft, person_name: &str) -> Result<()> {
        let transaction = draft.finish(person_name, Utc::now())?;
        self.state.transactions = transaction::save_transaction(&self.store, transaction).await?;
        Ok(())
    }

    /// Soft-deletes a transaction.
    pub async fn move_to_trash(&mut self, id: &str) -> Result<()> {
        let sets = transaction::move_to_trash(&self.store, id).await?;
        self.state.transactions = sets.active;
        self.state.trash = sets.trash;
        Ok(())
    }

    /// Brings a transaction back from the trash.
    pub async fn restore_from_trash(&mut self, id: &str) -> Result<()> {
        let sets = transaction::restore_from_trash(&self.store, id).await?;
        self.state.transactions = sets.active;
        self.state.trash = sets.trash;
        Ok(())
    }

    /// Removes trash entries for good.
    pub async fn permanent_delete(&mut self, ids: &[String]) -> Result<()> {
        self.state.trash = transaction::permanent_delete_trash(&self.store, ids).await?;
        Ok(())
    }

    /// Validates and saves a material; `id` selects the entry to update.
    pub async fn save_material(&mut self, form: MaterialForm, id: Option<&str>) -> Result<()> {
        let draft = form.into_draft()?;
        self.state.materials = material::save_material(&self.store, draft, id).await?;
        Ok(())
    }

    /// Removes a material.
    pub async fn delete_material(&mut self, id: &str) -> Result<()> {
        self.state.materials = material::delete_material(&self.store, id).await?;
        Ok(())
    }

    /// Appends a category.
    pub async fn add_category(&mut self, name: &str) -> Result<()> {
        self.state.categories = material::add_category(&self.store, name).await?;
        Ok(())
    }

    /// Removes a category name; materials keep theirs.
    pub async fn remove_category(&mut self, name: &str) -> Result<()> {
        self.state.categories = material::remove_category(&self.store, name).await?;
        Ok(())
    }

    /// Replaces the category list.
    pub async fn save_categories(&mut self, categories: Vec<String>) -> Result<()> {
        self.state.categories = material::save_categories(&self.store, categories).await?;
        Ok(())
    }

    /// Validates and saves an employee; `id` selects the entry to update.
    pub async fn save_employee(&mut self, form: EmployeeForm, id: Option<&str>) -> Result<()> {
        let draft = form.into_draft()?;
        self.state.employees = employee::save_employee(&self.store, draft, id).await?;
        Ok(())
    }

    /// Removes an employee, keeping their payment history.
    pub async fn delete_employee(&mut self, id: &str) -> Result<()> {
        self.state.employees = employee::delete_employee(&self.store, id).await?;
        Ok(())
    }

    /// Issues a pending payment of one daily rate to an employee on the roster.
    pub async fn pay_daily(&mut self, employee_id: &str) -> Result<()> {
        let Some(target) = self.state.employees.iter().find(|e| e.id == employee_id) else {
            warn!("Employee {employee_id} not on the roster, no payment issued");
            return Ok(());
        };
        let payment = employee::issue_daily_payment(target, Utc::now());
        self.state.payments = employee::save_payment(&self.store, payment).await?;
        Ok(())
    }

    /// Marks a payment as paid.
    pub async fn mark_paid(&mut self, payment_id: &str) -> Result<()> {
        self.state.payments =
            employee::update_payment_status(&self.store, payment_id, PaymentStatus::Paid).await?;
        Ok(())
    }

    /// Dashboard week navigation
    pub const fn week_cursor_mut(&mut self) -> &mut WeekCursor<Local> {
        &mut self.cursor
    }

    /// Report for the week the cursor points at.
    #[must_use]
    pub fn dashboard(&self) -> WeeklyReport<'_, Local> {
        weekly_report(&self.state.transactions, self.cursor.reference())
    }

    /// Requests insights on the selected week, or `None` when the week has no
    /// transactions.
    pub async fn insights_for_week(&self, client: &InsightsClient) -> Option<String> {
        let report = self.dashboard();
        if report.transactions_in_period.is_empty() {
            debug!("No transactions in the selected week, insights skipped");
            return None;
        }
        let period: Vec<Transaction> = report.transactions_in_period.into_iter().cloned().collect();
        Some(client.fetch_insights(&self.state.materials, &period).await)
    }
}

/// Builds the whole seed in memory. A demo transaction that refers to an unknown
/// material or fails validation is skipped; the materials are still seeded.
fn build_seed(seed: &SeedConfig, now: DateTime<Utc>) -> (Vec<Material>, Option<NewTransaction>) {
    let materials: Vec<Material> = seed
        .materials
        .iter()
        .cloned()
        .map(|draft| Material::from_draft(generate_id(), draft))
        .collect();

    let demo = seed.demo_transaction.as_ref().and_then(|demo| {
        let Some(demo_material) = materials.iter().find(|m| m.name == demo.material) else {
            warn!(
                "Demo transaction refers to unknown material '{}', skipped",
                demo.material
            );
            return None;
        };

        let mut draft = TransactionDraft::new(demo.kind);
        if let Some(e) = draft.add_item_weight(demo_material, demo.weight).err() {
            warn!("Demo transaction is invalid, skipped: {e}");
            return None;
        }
        draft
            .finish(&demo.person_name, now)
            .inspect_err(|e| warn!("Demo transaction is invalid, skipped: {e}"))
            .ok()
    });

    (materials, demo)
}

async fn seed_store<S: CollectionStore>(store: &S, seed: &SeedConfig) -> Result<()> {
    let (materials, demo) = build_seed(seed, Utc::now());

    save_collection(store, SlotKey::Materials, &materials).await?;
    if let Some(tx) = demo {
        transaction::save_transaction(store, tx).await?;
    }

    info!("Seeded {} demonstration materials", materials.len());
    Ok(())
}

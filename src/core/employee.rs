//! Employee business logic - the roster and daily-wage payments.
//!
//! Removing an employee only touches the roster; payment records keep the employee
//! id and name snapshot. Payments move one way, from pending to paid.

use super::{remove_ids, upsert};
use crate::{
    errors::Result,
    models::{
        Employee, EmployeeDraft, NewPayment, PaymentRecord, PaymentStatus, generate_id,
    },
    store::{CollectionStore, SlotKey, load_collection, save_collection},
};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Retrieves the roster in stored order.
pub async fn list_employees<S: CollectionStore>(store: &S) -> Result<Vec<Employee>> {
    load_collection(store, SlotKey::Employees).await
}

/// Saves an employee with the same merge-or-append rules as materials.
pub async fn save_employee<S: CollectionStore>(
    store: &S,
    draft: EmployeeDraft,
    id: Option<&str>,
) -> Result<Vec<Employee>> {
    let mut employees = list_employees(store).await?;
    upsert(&mut employees, id, |id| Employee::from_draft(id, draft));
    save_collection(store, SlotKey::Employees, &employees).await?;
    info!("Saved employee (update: {}), roster size {}", id.is_some(), employees.len());
    Ok(employees)
}

/// Removes an employee from the roster. Payment records are left as they are.
pub async fn delete_employee<S: CollectionStore>(store: &S, id: &str) -> Result<Vec<Employee>> {
    let mut employees = list_employees(store).await?;
    remove_ids(&mut employees, &[id]);
    save_collection(store, SlotKey::Employees, &employees).await?;
    info!("Removed employee {id}, payment history kept");
    Ok(employees)
}

/// Retrieves all payment records in issue order.
pub async fn list_payments<S: CollectionStore>(store: &S) -> Result<Vec<PaymentRecord>> {
    load_collection(store, SlotKey::Payments).await
}

/// Appends a payment with a fresh id.
pub async fn save_payment<S: CollectionStore>(
    store: &S,
    payment: NewPayment,
) -> Result<Vec<PaymentRecord>> {
    let mut payments = list_payments(store).await?;
    let record = PaymentRecord::with_id(generate_id(), payment);
    info!(
        "Issued payment of {:.2} to {} ({:?})",
        record.amount, record.employee_name, record.status
    );
    payments.push(record);
    save_collection(store, SlotKey::Payments, &payments).await?;
    Ok(payments)
}

/// Sets the status of a payment in place.
///
/// Unknown ids change nothing. A paid record never goes back to pending; such a
/// request is ignored.
pub async fn update_payment_status<S: CollectionStore>(
    store: &S,
    id: &str,
    status: PaymentStatus,
) -> Result<Vec<PaymentRecord>> {
    let mut payments = list_payments(store).await?;

    let Some(index) = payments.iter().position(|p| p.id == id) else {
        debug!("Payment {id} not found, status unchanged");
        return Ok(payments);
    };

    if payments[index].status == PaymentStatus::Paid && status == PaymentStatus::Pending {
        warn!("Payment {id} is already paid, ignoring revert to pending");
        return Ok(payments);
    }

    payments[index].status = status;
    save_collection(store, SlotKey::Payments, &payments).await?;
    Ok(payments)
}

/// Builds a pending payment of one daily rate for `employee`.
#[must_use]
pub fn issue_daily_payment(employee: &Employee, date: DateTime<Utc>) -> NewPayment {
    NewPayment {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        amount: employee.daily_rate,
        date,
        status: PaymentStatus::Pending,
    }
}

/// Pending payments of one employee, in issue order.
#[must_use]
pub fn pending_payments_for<'a>(
    payments: &'a [PaymentRecord],
    employee_id: &str,
) -> Vec<&'a PaymentRecord> {
    payments
        .iter()
        .filter(|p| p.employee_id == employee_id && p.status == PaymentStatus::Pending)
        .collect()
}

/// Paid records, newest first.
#[must_use]
pub fn paid_history(payments: &[PaymentRecord]) -> Vec<&PaymentRecord> {
    payments
        .iter()
        .rev()
        .filter(|p| p.status == PaymentStatus::Paid)
        .collect()
}

/// Sum of the amounts with the given status.
#[must_use]
pub fn total_by_status(payments: &[PaymentRecord], status: PaymentStatus) -> f64 {
    payments
        .iter()
        .filter(|p| p.status == status)
        .map(|p| p.amount)
        .sum()
}

/// Amount still owed.
#[must_use]
pub fn total_pending(payments: &[PaymentRecord]) -> f64 {
    total_by_status(payments, PaymentStatus::Pending)
}

/// Amount already handed over.
#[must_use]
pub fn total_paid(payments: &[PaymentRecord]) -> f64 {
    total_by_status(payments, PaymentStatus::Paid)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_save_and_update_employee() -> Result<()> {
        let store = setup_test_store();

        let roster = save_employee(&store, sample_employee("Ana", 120.0), None).await?;
        assert_eq!(roster.len(), 1);
        assert!(roster[0].active);

        let id = roster[0].id.clone();
        let roster = save_employee(&store, sample_employee("Ana Souza", 130.0), Some(&id)).await?;
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].id, id);
        assert_eq!(roster[0].name, "Ana Souza");
        assert_eq!(roster[0].daily_rate, 130.0);

        let unchanged = save_employee(&store, sample_employee("Nobody", 1.0), Some("missing")).await?;
        assert_eq!(unchanged, roster);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_employee_keeps_payments() -> Result<()> {
        let store = setup_test_store();
        let roster = save_employee(&store, sample_employee("Carlos", 100.0), None).await?;
        let carlos = roster[0].clone();

        let payments = save_payment(&store, issue_daily_payment(&carlos, sample_date())).await?;
        let payments = update_payment_status(&store, &payments[0].id, PaymentStatus::Paid).await?;
        save_payment(&store, issue_daily_payment(&carlos, sample_date())).await?;
        let before = list_payments(&store).await?;

        let roster = delete_employee(&store, &carlos.id).await?;
        assert!(roster.is_empty());

        let after = list_payments(&store).await?;
        assert_eq!(after, before);
        assert_eq!(after[0], payments[0]);
        assert!(after.iter().all(|p| p.employee_id == carlos.id));

        Ok(())
    }

    #[tokio::test]
    async fn test_payment_status_is_one_way() -> Result<()> {
        let store = setup_test_store();
        let roster = save_employee(&store, sample_employee("Bia", 90.0), None).await?;
        let payments = save_payment(&store, issue_daily_payment(&roster[0], sample_date())).await?;
        let id = payments[0].id.clone();
        assert_eq!(payments[0].status, PaymentStatus::Pending);
        assert_eq!(payments[0].amount, 90.0);

        let payments = update_payment_status(&store, &id, PaymentStatus::Paid).await?;
        assert_eq!(payments[0].status, PaymentStatus::Paid);

        let payments = update_payment_status(&store, &id, PaymentStatus::Pending).await?;
        assert_eq!(payments[0].status, PaymentStatus::Paid);
        assert_eq!(list_payments(&store).await?[0].status, PaymentStatus::Paid);

        let unchanged = update_payment_status(&store, "missing", PaymentStatus::Paid).await?;
        assert_eq!(unchanged, payments);

        Ok(())
    }

    #[test]
    fn test_payment_views() {
        let payments = vec![
            sample_payment("p1", "e1", 100.0, PaymentStatus::Paid),
            sample_payment("p2", "e1", 100.0, PaymentStatus::Pending),
            sample_payment("p3", "e2", 80.0, PaymentStatus::Pending),
            sample_payment("p4", "e2", 80.0, PaymentStatus::Paid),
        ];

        let pending: Vec<&str> = pending_payments_for(&payments, "e1")
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(pending, vec!["p2"]);

        let paid: Vec<&str> = paid_history(&payments).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(paid, vec!["p4", "p1"]);

        assert_eq!(total_pending(&payments), 180.0);
        assert_eq!(total_paid(&payments), 180.0);
        assert_eq!(total_by_status(&payments[..1], PaymentStatus::Paid), 100.0);
    }
}

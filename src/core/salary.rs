//! Salary business logic - CRUD and paid/pending summary.
//!
//! The pending total is always derived by subtraction from the paid total,
//! never by an independent filter, so a record whose status is neither
//! `"paid"` nor `"pending"` still counts as pending.

use crate::{
    core::{ensure_amount, ensure_status},
    entities::{Salary, salary},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Serialize;

/// Allowed payment statuses for a salary record.
pub const SALARY_STATUSES: [&str; 2] = ["paid", "pending"];

/// Optional fields for a partial salary update.
#[derive(Debug, Default, Clone)]
pub struct SalaryUpdate {
    /// New employee name
    pub employee_name: Option<String>,
    /// New role
    pub role: Option<String>,
    /// New pay month (`YYYY-MM`)
    pub month: Option<String>,
    /// New net salary
    pub net_salary: Option<f64>,
    /// New payment status (`"paid"` or `"pending"`)
    pub payment_status: Option<String>,
    /// New payment date (`Some(None)` clears it)
    pub payment_date: Option<Option<String>>,
}

/// Aggregate figures over all salary records.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalarySummary {
    /// Number of salary records
    pub count: usize,
    /// Sum of net salaries
    pub total: f64,
    /// Sum of net salaries with status `"paid"`
    pub paid_total: f64,
    /// `total - paid_total`
    pub pending_total: f64,
}

/// Retrieves all salaries ordered by month.
pub async fn get_all_salaries(db: &DatabaseConnection) -> Result<Vec<salary::Model>> {
    Salary::find()
        .order_by_asc(salary::Column::Month)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a new salary record.
pub async fn create_salary(
    db: &DatabaseConnection,
    employee_name: String,
    role: String,
    month: String,
    net_salary: f64,
    payment_status: String,
    payment_date: Option<String>,
) -> Result<salary::Model> {
    if employee_name.trim().is_empty() {
        return Err(Error::validation("Employee name cannot be empty"));
    }
    ensure_amount(net_salary, "net salary")?;
    ensure_status(&payment_status, &SALARY_STATUSES, "salary payment status")?;

    let salary = salary::ActiveModel {
        employee_name: Set(employee_name.trim().to_string()),
        role: Set(role),
        month: Set(month),
        net_salary: Set(net_salary),
        payment_status: Set(payment_status),
        payment_date: Set(payment_date),
        ..Default::default()
    };

    salary.insert(db).await.map_err(Into::into)
}

/// Applies a partial update to a salary record.
pub async fn update_salary(
    db: &DatabaseConnection,
    salary_id: i64,
    update: SalaryUpdate,
) -> Result<salary::Model> {
    let existing = Salary::find_by_id(salary_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "salary",
            id: salary_id,
        })?;

    if let Some(net_salary) = update.net_salary {
        ensure_amount(net_salary, "net salary")?;
    }
    if let Some(status) = &update.payment_status {
        ensure_status(status, &SALARY_STATUSES, "salary payment status")?;
    }

    let mut salary: salary::ActiveModel = existing.into();
    if let Some(employee_name) = update.employee_name {
        salary.employee_name = Set(employee_name);
    }
    if let Some(role) = update.role {
        salary.role = Set(role);
    }
    if let Some(month) = update.month {
        salary.month = Set(month);
    }
    if let Some(net_salary) = update.net_salary {
        salary.net_salary = Set(net_salary);
    }
    if let Some(payment_status) = update.payment_status {
        salary.payment_status = Set(payment_status);
    }
    if let Some(payment_date) = update.payment_date {
        salary.payment_date = Set(payment_date);
    }

    salary.update(db).await.map_err(Into::into)
}

/// Deletes a salary record by id.
pub async fn delete_salary(db: &DatabaseConnection, salary_id: i64) -> Result<()> {
    let result = Salary::delete_by_id(salary_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "salary",
            id: salary_id,
        });
    }
    Ok(())
}

/// Computes the salary summary with a single linear scan.
pub async fn summarize_salaries(db: &DatabaseConnection) -> Result<SalarySummary> {
    let salaries = get_all_salaries(db).await?;

    let total: f64 = salaries.iter().map(|s| s.net_salary).sum();
    let paid_total: f64 = salaries
        .iter()
        .filter(|s| s.payment_status == "paid")
        .map(|s| s.net_salary)
        .sum();

    Ok(SalarySummary {
        count: salaries.len(),
        total,
        paid_total,
        pending_total: total - paid_total,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{create_test_salary, setup_test_db};

    #[tokio::test]
    async fn test_create_salary_rejects_unknown_status() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_salary(
            &db,
            "John Smith".to_string(),
            "Senior Developer".to_string(),
            "2025-01".to_string(),
            885_000.0,
            "deferred".to_string(),
            None,
        )
        .await;

        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_summarize_salaries_pending_by_subtraction() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_salary(&db, "John Smith", "2025-01", 885_000.0, "paid").await?;
        create_test_salary(&db, "Sarah Johnson", "2025-01", 665_000.0, "paid").await?;
        create_test_salary(&db, "Ahmed Al-Rashid", "2025-02", 802_000.0, "pending").await?;

        let summary = summarize_salaries(&db).await?;

        assert_eq!(summary.total, 2_352_000.0);
        assert_eq!(summary.paid_total, 1_550_000.0);
        assert_eq!(summary.pending_total, 802_000.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_salary_marks_paid() -> Result<()> {
        let db = setup_test_db().await?;
        let salary = create_test_salary(&db, "Ahmed Al-Rashid", "2025-02", 802_000.0, "pending").await?;

        let updated = update_salary(
            &db,
            salary.id,
            SalaryUpdate {
                payment_status: Some("paid".to_string()),
                payment_date: Some(Some("2025-02-28".to_string())),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.payment_status, "paid");
        assert_eq!(updated.payment_date.as_deref(), Some("2025-02-28"));
        Ok(())
    }
}

//! Expense business logic - CRUD and paid/unpaid summary.

use crate::{
    core::{ensure_amount, ensure_status},
    entities::{Expense, expense},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Serialize;

/// Allowed payment statuses for an expense.
pub const EXPENSE_STATUSES: [&str; 2] = ["paid", "unpaid"];

/// Optional fields for a partial expense update.
#[derive(Debug, Default, Clone)]
pub struct ExpenseUpdate {
    /// New expense date (`YYYY-MM-DD`)
    pub date: Option<String>,
    /// New category
    pub category: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New vendor
    pub vendor: Option<String>,
    /// New amount
    pub amount: Option<f64>,
    /// New status (`"paid"` or `"unpaid"`)
    pub status: Option<String>,
}

/// Aggregate figures over all expense records, split by payment status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    /// Number of expenses
    pub count: usize,
    /// Sum of all amounts
    pub total: f64,
    /// Sum of paid amounts
    pub paid_total: f64,
    /// Number of paid expenses
    pub paid_count: usize,
    /// Sum of unpaid amounts
    pub unpaid_total: f64,
    /// Number of unpaid expenses
    pub unpaid_count: usize,
}

/// Retrieves all expenses ordered by date.
pub async fn get_all_expenses(db: &DatabaseConnection) -> Result<Vec<expense::Model>> {
    Expense::find()
        .order_by_asc(expense::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a new expense after validating amount and status.
pub async fn create_expense(
    db: &DatabaseConnection,
    date: String,
    category: String,
    description: String,
    vendor: String,
    amount: f64,
    status: String,
) -> Result<expense::Model> {
    if description.trim().is_empty() {
        return Err(Error::validation("Expense description cannot be empty"));
    }
    ensure_amount(amount, "expense amount")?;
    ensure_status(&status, &EXPENSE_STATUSES, "expense status")?;

    let expense = expense::ActiveModel {
        date: Set(date),
        category: Set(category),
        description: Set(description.trim().to_string()),
        vendor: Set(vendor),
        amount: Set(amount),
        status: Set(status),
        ..Default::default()
    };

    expense.insert(db).await.map_err(Into::into)
}

/// Applies a partial update to an expense.
pub async fn update_expense(
    db: &DatabaseConnection,
    expense_id: i64,
    update: ExpenseUpdate,
) -> Result<expense::Model> {
    let existing = Expense::find_by_id(expense_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "expense",
            id: expense_id,
        })?;

    if let Some(amount) = update.amount {
        ensure_amount(amount, "expense amount")?;
    }
    if let Some(status) = &update.status {
        ensure_status(status, &EXPENSE_STATUSES, "expense status")?;
    }

    let mut expense: expense::ActiveModel = existing.into();
    if let Some(date) = update.date {
        expense.date = Set(date);
    }
    if let Some(category) = update.category {
        expense.category = Set(category);
    }
    if let Some(description) = update.description {
        if description.trim().is_empty() {
            return Err(Error::validation("Expense description cannot be empty"));
        }
        expense.description = Set(description.trim().to_string());
    }
    if let Some(vendor) = update.vendor {
        expense.vendor = Set(vendor);
    }
    if let Some(amount) = update.amount {
        expense.amount = Set(amount);
    }
    if let Some(status) = update.status {
        expense.status = Set(status);
    }

    expense.update(db).await.map_err(Into::into)
}

/// Deletes an expense by id.
pub async fn delete_expense(db: &DatabaseConnection, expense_id: i64) -> Result<()> {
    let result = Expense::delete_by_id(expense_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "expense",
            id: expense_id,
        });
    }
    Ok(())
}

/// Computes the expense summary with a single linear scan.
pub async fn summarize_expenses(db: &DatabaseConnection) -> Result<ExpenseSummary> {
    let expenses = get_all_expenses(db).await?;

    let mut summary = ExpenseSummary {
        count: expenses.len(),
        total: 0.0,
        paid_total: 0.0,
        paid_count: 0,
        unpaid_total: 0.0,
        unpaid_count: 0,
    };

    for expense in &expenses {
        summary.total += expense.amount;
        if expense.status == "paid" {
            summary.paid_total += expense.amount;
            summary.paid_count += 1;
        } else {
            summary.unpaid_total += expense.amount;
            summary.unpaid_count += 1;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{create_test_expense, setup_test_db};

    #[tokio::test]
    async fn test_create_expense_rejects_bad_status() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_expense(
            &db,
            "2025-01-08".to_string(),
            "Office Equipment".to_string(),
            "MacBook Pro".to_string(),
            "Apple Store".to_string(),
            280_000.0,
            "overdue".to_string(),
        )
        .await;

        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_expense_partial() -> Result<()> {
        let db = setup_test_db().await?;
        let expense = create_test_expense(&db, "2025-01-08", "MacBook Pro", 280_000.0, "unpaid").await?;

        let updated = update_expense(
            &db,
            expense.id,
            ExpenseUpdate {
                status: Some("paid".to_string()),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.status, "paid");
        assert_eq!(updated.amount, 280_000.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_summarize_expenses_split() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_expense(&db, "2025-01-08", "MacBook Pro", 280_000.0, "paid").await?;
        create_test_expense(&db, "2025-01-12", "Adobe Creative Suite", 120_000.0, "paid").await?;
        create_test_expense(&db, "2025-01-18", "Google Ads Campaign", 350_000.0, "unpaid").await?;

        let summary = summarize_expenses(&db).await?;

        assert_eq!(summary.count, 3);
        assert_eq!(summary.total, 750_000.0);
        assert_eq!(summary.paid_total, 400_000.0);
        assert_eq!(summary.paid_count, 2);
        assert_eq!(summary.unpaid_total, 350_000.0);
        assert_eq!(summary.unpaid_count, 1);
        Ok(())
    }
}

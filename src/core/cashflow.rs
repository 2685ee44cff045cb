//! Cashflow business logic - CRUD and inflow/outflow summary.

use crate::{
    core::{ensure_amount, ensure_status},
    entities::{Cashflow, cashflow},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Serialize;

/// Allowed directions for a cashflow entry.
pub const CASHFLOW_TYPES: [&str; 2] = ["inflow", "outflow"];

/// Optional fields for a partial cashflow update.
#[derive(Debug, Default, Clone)]
pub struct CashflowUpdate {
    /// New movement date (`YYYY-MM-DD`)
    pub date: Option<String>,
    /// New direction (`"inflow"` or `"outflow"`)
    pub entry_type: Option<String>,
    /// New category
    pub category: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New amount
    pub amount: Option<f64>,
}

/// Aggregate figures over all cashflow entries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowSummary {
    /// Number of entries
    pub count: usize,
    /// Sum of inflow amounts
    pub total_inflows: f64,
    /// Sum of outflow amounts
    pub total_outflows: f64,
    /// `total_inflows - total_outflows`
    pub net_cashflow: f64,
}

/// Retrieves all cashflow entries ordered by date.
pub async fn get_all_cashflow(db: &DatabaseConnection) -> Result<Vec<cashflow::Model>> {
    Cashflow::find()
        .order_by_asc(cashflow::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a new cashflow entry, stamping the creation time in epoch
/// milliseconds (used by seeded-data removal to scope the session window).
pub async fn create_cashflow_entry(
    db: &DatabaseConnection,
    date: String,
    entry_type: String,
    category: String,
    description: String,
    amount: f64,
) -> Result<cashflow::Model> {
    ensure_amount(amount, "cashflow amount")?;
    ensure_status(&entry_type, &CASHFLOW_TYPES, "cashflow type")?;

    let entry = cashflow::ActiveModel {
        date: Set(date),
        entry_type: Set(entry_type),
        category: Set(category),
        description: Set(description),
        amount: Set(amount),
        created_at: Set(chrono::Utc::now().timestamp_millis()),
        ..Default::default()
    };

    entry.insert(db).await.map_err(Into::into)
}

/// Applies a partial update to a cashflow entry. `created_at` is immutable.
pub async fn update_cashflow_entry(
    db: &DatabaseConnection,
    entry_id: i64,
    update: CashflowUpdate,
) -> Result<cashflow::Model> {
    let existing = Cashflow::find_by_id(entry_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "cashflow entry",
            id: entry_id,
        })?;

    if let Some(amount) = update.amount {
        ensure_amount(amount, "cashflow amount")?;
    }
    if let Some(entry_type) = &update.entry_type {
        ensure_status(entry_type, &CASHFLOW_TYPES, "cashflow type")?;
    }

    let mut entry: cashflow::ActiveModel = existing.into();
    if let Some(date) = update.date {
        entry.date = Set(date);
    }
    if let Some(entry_type) = update.entry_type {
        entry.entry_type = Set(entry_type);
    }
    if let Some(category) = update.category {
        entry.category = Set(category);
    }
    if let Some(description) = update.description {
        entry.description = Set(description);
    }
    if let Some(amount) = update.amount {
        entry.amount = Set(amount);
    }

    entry.update(db).await.map_err(Into::into)
}

/// Deletes a cashflow entry by id.
pub async fn delete_cashflow_entry(db: &DatabaseConnection, entry_id: i64) -> Result<()> {
    let result = Cashflow::delete_by_id(entry_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "cashflow entry",
            id: entry_id,
        });
    }
    Ok(())
}

/// Computes the cashflow summary with a single linear scan.
pub async fn summarize_cashflow(db: &DatabaseConnection) -> Result<CashflowSummary> {
    let entries = get_all_cashflow(db).await?;

    let total_inflows: f64 = entries
        .iter()
        .filter(|e| e.entry_type == "inflow")
        .map(|e| e.amount)
        .sum();
    let total_outflows: f64 = entries
        .iter()
        .filter(|e| e.entry_type == "outflow")
        .map(|e| e.amount)
        .sum();

    Ok(CashflowSummary {
        count: entries.len(),
        total_inflows,
        total_outflows,
        net_cashflow: total_inflows - total_outflows,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{create_test_cashflow, setup_test_db};

    #[tokio::test]
    async fn test_create_cashflow_rejects_bad_type() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_cashflow_entry(
            &db,
            "2025-01-15".to_string(),
            "transfer".to_string(),
            "manual".to_string(),
            "Misc".to_string(),
            1_000.0,
        )
        .await;

        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_cashflow_stamps_creation_time() -> Result<()> {
        let db = setup_test_db().await?;
        let before = chrono::Utc::now().timestamp_millis();

        let entry = create_test_cashflow(&db, "2025-01-15", "inflow", "manual", 1_000.0).await?;

        let after = chrono::Utc::now().timestamp_millis();
        assert!(entry.created_at >= before && entry.created_at <= after);
        Ok(())
    }

    #[tokio::test]
    async fn test_summarize_cashflow_net() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_cashflow(&db, "2025-01-01", "inflow", "sales", 500_000.0).await?;
        create_test_cashflow(&db, "2025-01-02", "inflow", "manual", 100_000.0).await?;
        create_test_cashflow(&db, "2025-01-03", "outflow", "expenses", 250_000.0).await?;

        let summary = summarize_cashflow(&db).await?;

        assert_eq!(summary.total_inflows, 600_000.0);
        assert_eq!(summary.total_outflows, 250_000.0);
        assert_eq!(summary.net_cashflow, 350_000.0);
        Ok(())
    }
}

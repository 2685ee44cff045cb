//! Future needs business logic - CRUD and projected-spend summary.
//!
//! `amount` is the unit price; projections multiply by `quantity`.

use crate::{
    core::{ensure_amount, ensure_status},
    entities::{FutureNeed, future_need},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Serialize;

/// Allowed recurrence kinds for a future need.
pub const FUTURE_NEED_STATUSES: [&str; 2] = ["recurring", "one-time"];

/// Optional fields for a partial future-need update.
#[derive(Debug, Default, Clone)]
pub struct FutureNeedUpdate {
    /// New target month (`YYYY-MM`)
    pub month: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New quantity
    pub quantity: Option<i32>,
    /// New unit price
    pub amount: Option<f64>,
    /// New recurrence (`"recurring"` or `"one-time"`)
    pub status: Option<String>,
}

/// Aggregate figures over all future needs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FutureNeedSummary {
    /// Number of records
    pub count: usize,
    /// Sum of `amount * quantity` over all records
    pub total_projected: f64,
    /// Projected spend on recurring needs
    pub recurring_total: f64,
    /// Projected spend on one-time needs
    pub one_time_total: f64,
}

/// Retrieves all future needs ordered by month.
pub async fn get_all_future_needs(db: &DatabaseConnection) -> Result<Vec<future_need::Model>> {
    FutureNeed::find()
        .order_by_asc(future_need::Column::Month)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a new future need.
pub async fn create_future_need(
    db: &DatabaseConnection,
    month: String,
    description: String,
    quantity: i32,
    amount: f64,
    status: String,
) -> Result<future_need::Model> {
    if description.trim().is_empty() {
        return Err(Error::validation("Future need description cannot be empty"));
    }
    if quantity <= 0 {
        return Err(Error::validation(format!(
            "Future need quantity must be positive, got {quantity}"
        )));
    }
    ensure_amount(amount, "future need amount")?;
    ensure_status(&status, &FUTURE_NEED_STATUSES, "future need status")?;

    let need = future_need::ActiveModel {
        month: Set(month),
        description: Set(description.trim().to_string()),
        quantity: Set(quantity),
        amount: Set(amount),
        status: Set(status),
        ..Default::default()
    };

    need.insert(db).await.map_err(Into::into)
}

/// Applies a partial update to a future need.
pub async fn update_future_need(
    db: &DatabaseConnection,
    need_id: i64,
    update: FutureNeedUpdate,
) -> Result<future_need::Model> {
    let existing = FutureNeed::find_by_id(need_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "future need",
            id: need_id,
        })?;

    if let Some(amount) = update.amount {
        ensure_amount(amount, "future need amount")?;
    }
    if let Some(quantity) = update.quantity {
        if quantity <= 0 {
            return Err(Error::validation(format!(
                "Future need quantity must be positive, got {quantity}"
            )));
        }
    }
    if let Some(status) = &update.status {
        ensure_status(status, &FUTURE_NEED_STATUSES, "future need status")?;
    }

    let mut need: future_need::ActiveModel = existing.into();
    if let Some(month) = update.month {
        need.month = Set(month);
    }
    if let Some(description) = update.description {
        need.description = Set(description);
    }
    if let Some(quantity) = update.quantity {
        need.quantity = Set(quantity);
    }
    if let Some(amount) = update.amount {
        need.amount = Set(amount);
    }
    if let Some(status) = update.status {
        need.status = Set(status);
    }

    need.update(db).await.map_err(Into::into)
}

/// Deletes a future need by id.
pub async fn delete_future_need(db: &DatabaseConnection, need_id: i64) -> Result<()> {
    let result = FutureNeed::delete_by_id(need_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "future need",
            id: need_id,
        });
    }
    Ok(())
}

/// Computes the future-need summary with a single linear scan.
pub async fn summarize_future_needs(db: &DatabaseConnection) -> Result<FutureNeedSummary> {
    let needs = get_all_future_needs(db).await?;

    let mut summary = FutureNeedSummary {
        count: needs.len(),
        total_projected: 0.0,
        recurring_total: 0.0,
        one_time_total: 0.0,
    };

    for need in &needs {
        let projected = need.amount * f64::from(need.quantity);
        summary.total_projected += projected;
        if need.status == "recurring" {
            summary.recurring_total += projected;
        } else {
            summary.one_time_total += projected;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{create_test_future_need, setup_test_db};

    #[tokio::test]
    async fn test_create_future_need_rejects_zero_quantity() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_future_need(
            &db,
            "2025-03".to_string(),
            "New Server Hardware".to_string(),
            0,
            550_000.0,
            "one-time".to_string(),
        )
        .await;

        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_summarize_future_needs_multiplies_quantity() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_future_need(&db, "2025-03", "New Server Hardware", 2, 550_000.0, "one-time").await?;
        create_test_future_need(&db, "2025-03", "Monthly Cloud Hosting", 1, 85_000.0, "recurring").await?;

        let summary = summarize_future_needs(&db).await?;

        assert_eq!(summary.total_projected, 1_185_000.0);
        assert_eq!(summary.one_time_total, 1_100_000.0);
        assert_eq!(summary.recurring_total, 85_000.0);
        Ok(())
    }
}

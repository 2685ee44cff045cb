//! Business-in-hand business logic - CRUD and pipeline summary.

use crate::{
    core::{ensure_amount, ensure_status},
    entities::{BusinessInHand, business_in_hand},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Serialize;

/// Allowed record kinds.
pub const BUSINESS_TYPES: [&str; 3] = ["po_in_hand", "pending_invoice", "expected_revenue"];

/// Allowed progress statuses.
pub const BUSINESS_STATUSES: [&str; 3] = ["pending", "confirmed", "received"];

/// Optional fields for a partial business-in-hand update.
#[derive(Debug, Default, Clone)]
pub struct BusinessInHandUpdate {
    /// New record kind
    pub record_type: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New amount
    pub amount: Option<f64>,
    /// New expected date (`YYYY-MM-DD`)
    pub expected_date: Option<String>,
    /// New status
    pub status: Option<String>,
}

/// Aggregate figures over all business-in-hand records, split by status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessInHandSummary {
    /// Number of records
    pub count: usize,
    /// Sum of amounts with status `"pending"`
    pub pending_total: f64,
    /// Sum of amounts with status `"confirmed"`
    pub confirmed_total: f64,
    /// Sum of amounts with status `"received"`
    pub received_total: f64,
    /// Sum of amounts not yet received (status != `"received"`)
    pub pipeline_value: f64,
}

/// Retrieves all business-in-hand records ordered by expected date.
pub async fn get_all_business_in_hand(
    db: &DatabaseConnection,
) -> Result<Vec<business_in_hand::Model>> {
    BusinessInHand::find()
        .order_by_asc(business_in_hand::Column::ExpectedDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a new business-in-hand record.
pub async fn create_business_in_hand(
    db: &DatabaseConnection,
    record_type: String,
    description: String,
    amount: f64,
    expected_date: String,
    status: String,
) -> Result<business_in_hand::Model> {
    if description.trim().is_empty() {
        return Err(Error::validation(
            "Business in hand description cannot be empty",
        ));
    }
    ensure_amount(amount, "business in hand amount")?;
    ensure_status(&record_type, &BUSINESS_TYPES, "business in hand type")?;
    ensure_status(&status, &BUSINESS_STATUSES, "business in hand status")?;

    let record = business_in_hand::ActiveModel {
        record_type: Set(record_type),
        description: Set(description.trim().to_string()),
        amount: Set(amount),
        expected_date: Set(expected_date),
        status: Set(status),
        ..Default::default()
    };

    record.insert(db).await.map_err(Into::into)
}

/// Applies a partial update to a business-in-hand record.
pub async fn update_business_in_hand(
    db: &DatabaseConnection,
    record_id: i64,
    update: BusinessInHandUpdate,
) -> Result<business_in_hand::Model> {
    let existing = BusinessInHand::find_by_id(record_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "business in hand record",
            id: record_id,
        })?;

    if let Some(amount) = update.amount {
        ensure_amount(amount, "business in hand amount")?;
    }
    if let Some(record_type) = &update.record_type {
        ensure_status(record_type, &BUSINESS_TYPES, "business in hand type")?;
    }
    if let Some(status) = &update.status {
        ensure_status(status, &BUSINESS_STATUSES, "business in hand status")?;
    }

    let mut record: business_in_hand::ActiveModel = existing.into();
    if let Some(record_type) = update.record_type {
        record.record_type = Set(record_type);
    }
    if let Some(description) = update.description {
        record.description = Set(description);
    }
    if let Some(amount) = update.amount {
        record.amount = Set(amount);
    }
    if let Some(expected_date) = update.expected_date {
        record.expected_date = Set(expected_date);
    }
    if let Some(status) = update.status {
        record.status = Set(status);
    }

    record.update(db).await.map_err(Into::into)
}

/// Deletes a business-in-hand record by id.
pub async fn delete_business_in_hand(db: &DatabaseConnection, record_id: i64) -> Result<()> {
    let result = BusinessInHand::delete_by_id(record_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "business in hand record",
            id: record_id,
        });
    }
    Ok(())
}

/// Computes the business-in-hand summary with a single linear scan.
///
/// The pipeline value counts everything not yet received, so a record with
/// an unexpected status still contributes to it.
pub async fn summarize_business_in_hand(db: &DatabaseConnection) -> Result<BusinessInHandSummary> {
    let records = get_all_business_in_hand(db).await?;

    let mut summary = BusinessInHandSummary {
        count: records.len(),
        pending_total: 0.0,
        confirmed_total: 0.0,
        received_total: 0.0,
        pipeline_value: 0.0,
    };

    for record in &records {
        match record.status.as_str() {
            "pending" => summary.pending_total += record.amount,
            "confirmed" => summary.confirmed_total += record.amount,
            "received" => summary.received_total += record.amount,
            _ => {}
        }
        if record.status != "received" {
            summary.pipeline_value += record.amount;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{create_test_business_in_hand, setup_test_db};

    #[tokio::test]
    async fn test_create_business_in_hand_rejects_bad_type() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_business_in_hand(
            &db,
            "wishful_thinking".to_string(),
            "Enterprise CRM System".to_string(),
            8_500_000.0,
            "2025-04-15".to_string(),
            "confirmed".to_string(),
        )
        .await;

        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_summarize_pipeline_excludes_received() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_business_in_hand(&db, "po_in_hand", "Enterprise CRM System", 8_500_000.0, "confirmed")
            .await?;
        create_test_business_in_hand(&db, "pending_invoice", "Website Redesign", 1_200_000.0, "pending")
            .await?;
        create_test_business_in_hand(&db, "expected_revenue", "Mobile App Contract", 2_500_000.0, "received")
            .await?;

        let summary = summarize_business_in_hand(&db).await?;

        assert_eq!(summary.count, 3);
        assert_eq!(summary.confirmed_total, 8_500_000.0);
        assert_eq!(summary.pending_total, 1_200_000.0);
        assert_eq!(summary.received_total, 2_500_000.0);
        assert_eq!(summary.pipeline_value, 9_700_000.0);
        Ok(())
    }
}

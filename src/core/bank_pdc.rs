//! Bank PDC business logic - CRUD and pending/cleared summary.

use crate::{
    core::{ensure_amount, ensure_status},
    entities::{BankPdc, bank_pdc},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Serialize;

/// Allowed statuses for a post-dated cheque.
pub const PDC_STATUSES: [&str; 2] = ["pending", "cleared"];

/// Optional fields for a partial PDC update.
#[derive(Debug, Default, Clone)]
pub struct BankPdcUpdate {
    /// New bank name
    pub bank: Option<String>,
    /// New cheque number
    pub cheque_number: Option<String>,
    /// New tracking code
    pub code: Option<String>,
    /// New supplier
    pub supplier: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New amount
    pub amount: Option<f64>,
    /// New status (`"pending"` or `"cleared"`)
    pub status: Option<String>,
    /// New cheque date (`YYYY-MM-DD`)
    pub date: Option<String>,
}

/// Aggregate figures over all post-dated cheques.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankPdcSummary {
    /// Number of cheques
    pub count: usize,
    /// Sum of all cheque amounts
    pub total: f64,
    /// Sum of pending cheque amounts
    pub pending_total: f64,
    /// Number of pending cheques
    pub pending_count: usize,
    /// Sum of cleared cheque amounts
    pub cleared_total: f64,
    /// Number of cleared cheques
    pub cleared_count: usize,
}

/// Retrieves all post-dated cheques ordered by date.
pub async fn get_all_bank_pdc(db: &DatabaseConnection) -> Result<Vec<bank_pdc::Model>> {
    BankPdc::find()
        .order_by_asc(bank_pdc::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a new post-dated cheque record.
#[allow(clippy::too_many_arguments)]
pub async fn create_bank_pdc(
    db: &DatabaseConnection,
    date: String,
    bank: String,
    cheque_number: String,
    code: String,
    supplier: String,
    description: String,
    amount: f64,
    status: String,
) -> Result<bank_pdc::Model> {
    if bank.trim().is_empty() {
        return Err(Error::validation("Bank name cannot be empty"));
    }
    ensure_amount(amount, "cheque amount")?;
    ensure_status(&status, &PDC_STATUSES, "cheque status")?;

    let pdc = bank_pdc::ActiveModel {
        date: Set(date),
        bank: Set(bank.trim().to_string()),
        cheque_number: Set(cheque_number),
        code: Set(code),
        supplier: Set(supplier),
        description: Set(description),
        amount: Set(amount),
        status: Set(status),
        ..Default::default()
    };

    pdc.insert(db).await.map_err(Into::into)
}

/// Applies a partial update to a post-dated cheque.
pub async fn update_bank_pdc(
    db: &DatabaseConnection,
    pdc_id: i64,
    update: BankPdcUpdate,
) -> Result<bank_pdc::Model> {
    let existing = BankPdc::find_by_id(pdc_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "bank PDC",
            id: pdc_id,
        })?;

    if let Some(amount) = update.amount {
        ensure_amount(amount, "cheque amount")?;
    }
    if let Some(status) = &update.status {
        ensure_status(status, &PDC_STATUSES, "cheque status")?;
    }

    let mut pdc: bank_pdc::ActiveModel = existing.into();
    if let Some(bank) = update.bank {
        pdc.bank = Set(bank);
    }
    if let Some(cheque_number) = update.cheque_number {
        pdc.cheque_number = Set(cheque_number);
    }
    if let Some(code) = update.code {
        pdc.code = Set(code);
    }
    if let Some(supplier) = update.supplier {
        pdc.supplier = Set(supplier);
    }
    if let Some(description) = update.description {
        pdc.description = Set(description);
    }
    if let Some(amount) = update.amount {
        pdc.amount = Set(amount);
    }
    if let Some(status) = update.status {
        pdc.status = Set(status);
    }
    if let Some(date) = update.date {
        pdc.date = Set(date);
    }

    pdc.update(db).await.map_err(Into::into)
}

/// Deletes a post-dated cheque by id.
pub async fn delete_bank_pdc(db: &DatabaseConnection, pdc_id: i64) -> Result<()> {
    let result = BankPdc::delete_by_id(pdc_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "bank PDC",
            id: pdc_id,
        });
    }
    Ok(())
}

/// Computes the PDC summary with a single linear scan.
pub async fn summarize_bank_pdc(db: &DatabaseConnection) -> Result<BankPdcSummary> {
    let cheques = get_all_bank_pdc(db).await?;

    let mut summary = BankPdcSummary {
        count: cheques.len(),
        total: 0.0,
        pending_total: 0.0,
        pending_count: 0,
        cleared_total: 0.0,
        cleared_count: 0,
    };

    for cheque in &cheques {
        summary.total += cheque.amount;
        if cheque.status == "cleared" {
            summary.cleared_total += cheque.amount;
            summary.cleared_count += 1;
        } else {
            summary.pending_total += cheque.amount;
            summary.pending_count += 1;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{create_test_bank_pdc, setup_test_db};

    #[tokio::test]
    async fn test_create_bank_pdc_rejects_bad_status() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_bank_pdc(
            &db,
            "2025-03-15".to_string(),
            "Emirates NBD".to_string(),
            "CHQ001234".to_string(),
            "PDC-001".to_string(),
            "Tech Solutions LLC".to_string(),
            "Software development".to_string(),
            1_500_000.0,
            "bounced".to_string(),
        )
        .await;

        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_bank_pdc_clears_cheque() -> Result<()> {
        let db = setup_test_db().await?;
        let pdc = create_test_bank_pdc(&db, "Emirates NBD", "Tech Solutions LLC", 1_500_000.0).await?;

        let updated = update_bank_pdc(
            &db,
            pdc.id,
            BankPdcUpdate {
                status: Some("cleared".to_string()),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.status, "cleared");
        Ok(())
    }

    #[tokio::test]
    async fn test_summarize_bank_pdc_split() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_bank_pdc(&db, "Emirates NBD", "Tech Solutions LLC", 1_500_000.0).await?;
        let cleared = create_test_bank_pdc(&db, "FAB", "Office Furniture Co", 850_000.0).await?;
        update_bank_pdc(
            &db,
            cleared.id,
            BankPdcUpdate {
                status: Some("cleared".to_string()),
                ..Default::default()
            },
        )
        .await?;

        let summary = summarize_bank_pdc(&db).await?;

        assert_eq!(summary.count, 2);
        assert_eq!(summary.total, 2_350_000.0);
        assert_eq!(summary.pending_total, 1_500_000.0);
        assert_eq!(summary.cleared_total, 850_000.0);
        Ok(())
    }
}

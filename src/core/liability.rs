//! Liability business logic - CRUD and outstanding-balance summary.

use crate::{
    core::ensure_amount,
    entities::{Liability, liability},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Serialize;

/// Optional fields for a partial liability update.
#[derive(Debug, Default, Clone)]
pub struct LiabilityUpdate {
    /// New lender/creditor name
    pub lender_party: Option<String>,
    /// New liability type
    pub liability_type: Option<String>,
    /// New start date (`YYYY-MM-DD`)
    pub start_date: Option<String>,
    /// New due date (`YYYY-MM-DD`)
    pub due_date: Option<String>,
    /// New original amount
    pub original_amount: Option<f64>,
    /// New outstanding balance
    pub outstanding_balance: Option<f64>,
    /// New description (`Some(None)` clears it)
    pub description: Option<Option<String>>,
}

/// Aggregate figures over all liability records.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiabilitySummary {
    /// Number of liabilities
    pub count: usize,
    /// Sum of original amounts
    pub total_original: f64,
    /// Sum of outstanding balances
    pub total_outstanding: f64,
}

/// Retrieves all liabilities ordered by due date.
pub async fn get_all_liabilities(db: &DatabaseConnection) -> Result<Vec<liability::Model>> {
    Liability::find()
        .order_by_asc(liability::Column::DueDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a new liability. The outstanding balance starts at the original
/// amount; repayments reduce it through [`update_liability`].
pub async fn create_liability(
    db: &DatabaseConnection,
    lender_party: String,
    liability_type: String,
    start_date: String,
    due_date: String,
    original_amount: f64,
    description: Option<String>,
) -> Result<liability::Model> {
    if lender_party.trim().is_empty() {
        return Err(Error::validation("Lender party cannot be empty"));
    }
    ensure_amount(original_amount, "liability original amount")?;

    let liability = liability::ActiveModel {
        lender_party: Set(lender_party.trim().to_string()),
        liability_type: Set(liability_type),
        start_date: Set(start_date),
        due_date: Set(due_date),
        original_amount: Set(original_amount),
        outstanding_balance: Set(original_amount),
        description: Set(description),
        ..Default::default()
    };

    liability.insert(db).await.map_err(Into::into)
}

/// Applies a partial update to a liability.
pub async fn update_liability(
    db: &DatabaseConnection,
    liability_id: i64,
    update: LiabilityUpdate,
) -> Result<liability::Model> {
    let existing = Liability::find_by_id(liability_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "liability",
            id: liability_id,
        })?;

    if let Some(amount) = update.original_amount {
        ensure_amount(amount, "liability original amount")?;
    }
    if let Some(balance) = update.outstanding_balance {
        ensure_amount(balance, "liability outstanding balance")?;
    }

    let mut liability: liability::ActiveModel = existing.into();
    if let Some(lender_party) = update.lender_party {
        liability.lender_party = Set(lender_party);
    }
    if let Some(liability_type) = update.liability_type {
        liability.liability_type = Set(liability_type);
    }
    if let Some(start_date) = update.start_date {
        liability.start_date = Set(start_date);
    }
    if let Some(due_date) = update.due_date {
        liability.due_date = Set(due_date);
    }
    if let Some(original_amount) = update.original_amount {
        liability.original_amount = Set(original_amount);
    }
    if let Some(outstanding_balance) = update.outstanding_balance {
        liability.outstanding_balance = Set(outstanding_balance);
    }
    if let Some(description) = update.description {
        liability.description = Set(description);
    }

    liability.update(db).await.map_err(Into::into)
}

/// Deletes a liability by id.
pub async fn delete_liability(db: &DatabaseConnection, liability_id: i64) -> Result<()> {
    let result = Liability::delete_by_id(liability_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "liability",
            id: liability_id,
        });
    }
    Ok(())
}

/// Computes the liability summary with a single linear scan.
pub async fn summarize_liabilities(db: &DatabaseConnection) -> Result<LiabilitySummary> {
    let liabilities = get_all_liabilities(db).await?;

    Ok(LiabilitySummary {
        count: liabilities.len(),
        total_original: liabilities.iter().map(|l| l.original_amount).sum(),
        total_outstanding: liabilities.iter().map(|l| l.outstanding_balance).sum(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{create_test_liability, setup_test_db};

    #[tokio::test]
    async fn test_create_liability_starts_fully_outstanding() -> Result<()> {
        let db = setup_test_db().await?;

        let liability = create_test_liability(&db, "First National Bank", 5_000_000.0).await?;

        assert_eq!(liability.outstanding_balance, 5_000_000.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_liability_repayment() -> Result<()> {
        let db = setup_test_db().await?;
        let liability = create_test_liability(&db, "Equipment Finance Corp", 2_500_000.0).await?;

        let updated = update_liability(
            &db,
            liability.id,
            LiabilityUpdate {
                outstanding_balance: Some(1_500_000.0),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.original_amount, 2_500_000.0);
        assert_eq!(updated.outstanding_balance, 1_500_000.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_summarize_liabilities() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_liability(&db, "First National Bank", 5_000_000.0).await?;
        create_test_liability(&db, "Equipment Finance Corp", 2_500_000.0).await?;

        let summary = summarize_liabilities(&db).await?;

        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_original, 7_500_000.0);
        assert_eq!(summary.total_outstanding, 7_500_000.0);
        Ok(())
    }
}

//! Sales business logic - CRUD and revenue summary for the sales module.
//!
//! Profit figures are computed here at write time from cost, selling price,
//! and attributable expenses, then stored on the record. Reads never derive
//! them again, so every path that changes one of the inputs must go through
//! [`create_sale`] or [`update_sale`].

use crate::{
    entities::{Sale, sale},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Serialize;

/// Optional fields for a partial sale update.
#[derive(Debug, Default, Clone)]
pub struct SaleUpdate {
    /// New sale date (`YYYY-MM-DD`)
    pub date: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New cost
    pub cost: Option<f64>,
    /// New selling price
    pub selling_price: Option<f64>,
    /// New attributable expenses
    pub expenses: Option<f64>,
}

/// Aggregate figures over all sales records.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    /// Number of sales
    pub count: usize,
    /// Sum of selling prices
    pub total_revenue: f64,
    /// Sum of costs
    pub total_cost: f64,
    /// Sum of net profits
    pub total_net_profit: f64,
}

/// Retrieves all sales ordered by date.
pub async fn get_all_sales(db: &DatabaseConnection) -> Result<Vec<sale::Model>> {
    Sale::find()
        .order_by_asc(sale::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a new sale, computing the stored profit breakdown.
///
/// Validates that the description is non-empty and that all monetary inputs
/// are finite and non-negative. Margins are reported as percentages of the
/// selling price, and are 0 when the selling price is 0.
pub async fn create_sale(
    db: &DatabaseConnection,
    date: String,
    description: String,
    cost: f64,
    selling_price: f64,
    expenses: f64,
) -> Result<sale::Model> {
    validate_sale_input(&date, &description, cost, selling_price, expenses)?;

    let (gross_profit, gross_profit_margin, net_profit, net_profit_margin) =
        compute_profit(cost, selling_price, expenses);

    let sale = sale::ActiveModel {
        date: Set(date),
        description: Set(description.trim().to_string()),
        cost: Set(cost),
        selling_price: Set(selling_price),
        gross_profit: Set(gross_profit),
        gross_profit_margin: Set(gross_profit_margin),
        expenses: Set(expenses),
        net_profit: Set(net_profit),
        net_profit_margin: Set(net_profit_margin),
        ..Default::default()
    };

    sale.insert(db).await.map_err(Into::into)
}

/// Applies a partial update to a sale, recomputing the profit breakdown
/// whenever any of its inputs changed.
pub async fn update_sale(
    db: &DatabaseConnection,
    sale_id: i64,
    update: SaleUpdate,
) -> Result<sale::Model> {
    let existing = Sale::find_by_id(sale_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "sale",
            id: sale_id,
        })?;

    let date = update.date.unwrap_or_else(|| existing.date.clone());
    let description = update
        .description
        .unwrap_or_else(|| existing.description.clone());
    let cost = update.cost.unwrap_or(existing.cost);
    let selling_price = update.selling_price.unwrap_or(existing.selling_price);
    let expenses = update.expenses.unwrap_or(existing.expenses);

    validate_sale_input(&date, &description, cost, selling_price, expenses)?;

    let (gross_profit, gross_profit_margin, net_profit, net_profit_margin) =
        compute_profit(cost, selling_price, expenses);

    let mut sale: sale::ActiveModel = existing.into();
    sale.date = Set(date);
    sale.description = Set(description.trim().to_string());
    sale.cost = Set(cost);
    sale.selling_price = Set(selling_price);
    sale.gross_profit = Set(gross_profit);
    sale.gross_profit_margin = Set(gross_profit_margin);
    sale.expenses = Set(expenses);
    sale.net_profit = Set(net_profit);
    sale.net_profit_margin = Set(net_profit_margin);

    sale.update(db).await.map_err(Into::into)
}

/// Deletes a sale by id.
pub async fn delete_sale(db: &DatabaseConnection, sale_id: i64) -> Result<()> {
    let result = Sale::delete_by_id(sale_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "sale",
            id: sale_id,
        });
    }
    Ok(())
}

/// Computes the sales summary with a single linear scan.
pub async fn summarize_sales(db: &DatabaseConnection) -> Result<SalesSummary> {
    let sales = get_all_sales(db).await?;

    Ok(SalesSummary {
        count: sales.len(),
        total_revenue: sales.iter().map(|s| s.selling_price).sum(),
        total_cost: sales.iter().map(|s| s.cost).sum(),
        total_net_profit: sales.iter().map(|s| s.net_profit).sum(),
    })
}

fn validate_sale_input(
    date: &str,
    description: &str,
    cost: f64,
    selling_price: f64,
    expenses: f64,
) -> Result<()> {
    if date.trim().is_empty() {
        return Err(Error::validation("Sale date cannot be empty"));
    }
    if description.trim().is_empty() {
        return Err(Error::validation("Sale description cannot be empty"));
    }
    for (field, value) in [
        ("cost", cost),
        ("selling price", selling_price),
        ("expenses", expenses),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::validation(format!(
                "Sale {field} must be a non-negative amount, got {value}"
            )));
        }
    }
    Ok(())
}

/// Derives `(gross_profit, gross_margin, net_profit, net_margin)` from the
/// three stored inputs.
fn compute_profit(cost: f64, selling_price: f64, expenses: f64) -> (f64, f64, f64, f64) {
    let gross_profit = selling_price - cost;
    let net_profit = gross_profit - expenses;
    (
        gross_profit,
        margin_percent(gross_profit, selling_price),
        net_profit,
        margin_percent(net_profit, selling_price),
    )
}

fn margin_percent(profit: f64, selling_price: f64) -> f64 {
    if selling_price == 0.0 {
        return 0.0;
    }
    (profit / selling_price) * 100.0
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_create_sale_computes_profit_fields() -> Result<()> {
        let db = setup_test_db().await?;

        let sale = create_sale(
            &db,
            "2025-01-15".to_string(),
            "Enterprise Software License".to_string(),
            2_500_000.0,
            4_500_000.0,
            350_000.0,
        )
        .await?;

        assert_eq!(sale.gross_profit, 2_000_000.0);
        assert_eq!(sale.net_profit, 1_650_000.0);
        assert!((sale.gross_profit_margin - 44.444_444).abs() < 0.001);
        assert!((sale.net_profit_margin - 36.666_666).abs() < 0.001);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_sale_zero_selling_price_has_zero_margin() -> Result<()> {
        let db = setup_test_db().await?;

        let sale = create_sale(&db, "2025-01-01".to_string(), "Writeoff".to_string(), 0.0, 0.0, 0.0).await?;

        assert_eq!(sale.gross_profit_margin, 0.0);
        assert_eq!(sale.net_profit_margin, 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_sale_rejects_empty_description() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_sale(&db, "2025-01-01".to_string(), "  ".to_string(), 1.0, 2.0, 0.0).await;

        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_sale_rejects_nan_amount() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_sale(
            &db,
            "2025-01-01".to_string(),
            "Broken".to_string(),
            f64::NAN,
            2.0,
            0.0,
        )
        .await;

        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_sale_recomputes_profit() -> Result<()> {
        let db = setup_test_db().await?;
        let sale = create_sale(
            &db,
            "2025-01-15".to_string(),
            "Mobile App Development".to_string(),
            1_800_000.0,
            3_500_000.0,
            280_000.0,
        )
        .await?;

        let updated = update_sale(
            &db,
            sale.id,
            SaleUpdate {
                selling_price: Some(4_000_000.0),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.gross_profit, 2_200_000.0);
        assert_eq!(updated.net_profit, 1_920_000.0);
        // Untouched fields survive a partial update
        assert_eq!(updated.description, "Mobile App Development");
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_sale_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = delete_sale(&db, 9999).await;

        assert!(matches!(result, Err(Error::NotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_summarize_sales() -> Result<()> {
        let db = setup_test_db().await?;
        create_sale(&db, "2025-01-01".to_string(), "A".to_string(), 100.0, 300.0, 50.0).await?;
        create_sale(&db, "2025-01-02".to_string(), "B".to_string(), 200.0, 500.0, 0.0).await?;

        let summary = summarize_sales(&db).await?;

        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_revenue, 800.0);
        assert_eq!(summary.total_cost, 300.0);
        assert_eq!(summary.total_net_profit, 150.0 + 300.0);
        Ok(())
    }
}

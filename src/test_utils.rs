//! Shared test utilities for `FinTrack`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test records with sensible defaults. Fixture strings are
//! chosen so they never collide with the seeded sample-data removal patterns
//! unless a test passes a seeded value on purpose.

use crate::{
    core::{
        bank_pdc, business_in_hand, cashflow, expense, future_need, liability, salary, sale,
    },
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test sale with sensible defaults.
///
/// # Defaults
/// * `description`: `"Consulting retainer"`
/// * `cost`: 0.0
/// * `expenses`: 0.0
///
/// With zero cost and expenses, `selling_price` equals both gross and net
/// profit, which keeps total assertions easy to read.
pub async fn create_test_sale(
    db: &DatabaseConnection,
    date: &str,
    selling_price: f64,
) -> Result<entities::sale::Model> {
    sale::create_sale(
        db,
        date.to_string(),
        "Consulting retainer".to_string(),
        0.0,
        selling_price,
        0.0,
    )
    .await
}

/// Creates a test expense with sensible defaults.
///
/// # Defaults
/// * `category`: `"General"`
/// * `vendor`: `"Acme Supplies"`
pub async fn create_test_expense(
    db: &DatabaseConnection,
    date: &str,
    description: &str,
    amount: f64,
    status: &str,
) -> Result<entities::expense::Model> {
    expense::create_expense(
        db,
        date.to_string(),
        "General".to_string(),
        description.to_string(),
        "Acme Supplies".to_string(),
        amount,
        status.to_string(),
    )
    .await
}

/// Creates a test liability with sensible defaults.
///
/// # Defaults
/// * `liability_type`: `"Business Loan"`
/// * `start_date`: `"2025-01-15"`, `due_date`: `"2026-01-15"`
/// * `description`: None
pub async fn create_test_liability(
    db: &DatabaseConnection,
    lender_party: &str,
    original_amount: f64,
) -> Result<entities::liability::Model> {
    liability::create_liability(
        db,
        lender_party.to_string(),
        "Business Loan".to_string(),
        "2025-01-15".to_string(),
        "2026-01-15".to_string(),
        original_amount,
        None,
    )
    .await
}

/// Creates a test salary with sensible defaults.
///
/// # Defaults
/// * `role`: `"Engineer"`
/// * `payment_date`: None
pub async fn create_test_salary(
    db: &DatabaseConnection,
    employee_name: &str,
    month: &str,
    net_salary: f64,
    payment_status: &str,
) -> Result<entities::salary::Model> {
    salary::create_salary(
        db,
        employee_name.to_string(),
        "Engineer".to_string(),
        month.to_string(),
        net_salary,
        payment_status.to_string(),
        None,
    )
    .await
}

/// Creates a test cashflow entry with sensible defaults.
///
/// # Defaults
/// * `description`: `"Ledger entry"` (does not match any removal pattern)
pub async fn create_test_cashflow(
    db: &DatabaseConnection,
    date: &str,
    entry_type: &str,
    category: &str,
    amount: f64,
) -> Result<entities::cashflow::Model> {
    cashflow::create_cashflow_entry(
        db,
        date.to_string(),
        entry_type.to_string(),
        category.to_string(),
        "Ledger entry".to_string(),
        amount,
    )
    .await
}

/// Creates a test post-dated cheque with sensible defaults.
///
/// # Defaults
/// * `date`: `"2025-03-15"`
/// * `cheque_number`: `"CHQ000001"`, `code`: `"PDC-T01"`
/// * `description`: `"Cheque payment"`
/// * `status`: `"pending"`
pub async fn create_test_bank_pdc(
    db: &DatabaseConnection,
    bank: &str,
    supplier: &str,
    amount: f64,
) -> Result<entities::bank_pdc::Model> {
    bank_pdc::create_bank_pdc(
        db,
        "2025-03-15".to_string(),
        bank.to_string(),
        "CHQ000001".to_string(),
        "PDC-T01".to_string(),
        supplier.to_string(),
        "Cheque payment".to_string(),
        amount,
        "pending".to_string(),
    )
    .await
}

/// Creates a test business-in-hand record with sensible defaults.
///
/// # Defaults
/// * `expected_date`: `"2025-04-15"`
pub async fn create_test_business_in_hand(
    db: &DatabaseConnection,
    record_type: &str,
    description: &str,
    amount: f64,
    status: &str,
) -> Result<entities::business_in_hand::Model> {
    business_in_hand::create_business_in_hand(
        db,
        record_type.to_string(),
        description.to_string(),
        amount,
        "2025-04-15".to_string(),
        status.to_string(),
    )
    .await
}

/// Creates a test future need.
pub async fn create_test_future_need(
    db: &DatabaseConnection,
    month: &str,
    description: &str,
    quantity: i32,
    amount: f64,
    status: &str,
) -> Result<entities::future_need::Model> {
    future_need::create_future_need(
        db,
        month.to_string(),
        description.to_string(),
        quantity,
        amount,
        status.to_string(),
    )
    .await
}

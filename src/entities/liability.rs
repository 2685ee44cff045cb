//! Liability entity - Money owed to a lender or creditor.
//!
//! There is no persisted status lifecycle; the export layer reports every
//! liability as `"active"`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Liability database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "liabilities")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Lender or creditor name
    pub lender_party: String,
    /// Kind of liability (e.g. "Business Loan", "Equipment Loan")
    pub liability_type: String,
    /// Start date as ISO `YYYY-MM-DD`
    pub start_date: String,
    /// Due date as ISO `YYYY-MM-DD`
    pub due_date: String,
    /// Amount originally borrowed
    pub original_amount: f64,
    /// Amount still owed
    pub outstanding_balance: f64,
    /// Optional free-text description; export falls back to `lender_party`
    pub description: Option<String>,
}

/// Liabilities have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

//! Expense entity - A single business expense with payment status.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Expense date as ISO `YYYY-MM-DD`
    pub date: String,
    /// Expense category (e.g. "Office Equipment", "Marketing")
    pub category: String,
    /// What the expense was for
    pub description: String,
    /// Who was paid
    pub vendor: String,
    /// Amount in PKR
    pub amount: f64,
    /// Payment status: `"paid"` or `"unpaid"`
    pub status: String,
}

/// Expenses have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

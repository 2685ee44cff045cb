//! Future need entity - A planned upcoming expense.
//!
//! `amount` is the unit price; the export layer reports
//! `amount * quantity` as the total.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Future need database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "future_needs")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Target month as ISO `YYYY-MM`
    pub month: String,
    /// What is needed
    pub description: String,
    /// Number of units needed
    pub quantity: i32,
    /// Unit price in PKR
    pub amount: f64,
    /// Recurrence: `"recurring"` or `"one-time"`
    pub status: String,
}

/// Future needs have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

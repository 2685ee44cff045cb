//! Cashflow entity - A single cash movement, inflow or outflow.
//!
//! Entries are either entered manually (category `"manual"`) or generated
//! from other modules. `created_at` records the insertion time in epoch
//! milliseconds so that seeded entries can be removed by session window.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cashflow database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cashflow")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Movement date as ISO `YYYY-MM-DD`
    pub date: String,
    /// Direction: `"inflow"` or `"outflow"`
    pub entry_type: String,
    /// Source category (e.g. "manual", "sales")
    pub category: String,
    /// What the movement was
    pub description: String,
    /// Amount in PKR (always positive; direction comes from `entry_type`)
    pub amount: f64,
    /// Insertion time in epoch milliseconds
    pub created_at: i64,
}

/// Cashflow entries have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

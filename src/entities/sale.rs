//! Sale entity - One completed sale with its profit breakdown.
//!
//! Profit fields are computed at write time from cost, selling price, and
//! attributable expenses, then stored alongside the inputs. Consistency
//! therefore depends on the create/update logic in [`crate::core::sale`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sale database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Sale date as ISO `YYYY-MM-DD`
    pub date: String,
    /// What was sold (e.g. "Enterprise Software License")
    pub description: String,
    /// Cost of goods/services sold
    pub cost: f64,
    /// Price the sale closed at
    pub selling_price: f64,
    /// `selling_price - cost`
    pub gross_profit: f64,
    /// Gross profit as a percentage of selling price
    pub gross_profit_margin: f64,
    /// Expenses attributable to this sale
    pub expenses: f64,
    /// `gross_profit - expenses`
    pub net_profit: f64,
    /// Net profit as a percentage of selling price
    pub net_profit_margin: f64,
}

/// Sales have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

//! Salary entity - One employee's pay for one month.
//!
//! Only the net figure is stored; basic salary, allowances, and deductions
//! are not tracked separately (the export layer synthesizes placeholders).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Salary database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "salaries")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Employee full name
    pub employee_name: String,
    /// Job role
    pub role: String,
    /// Pay period as ISO `YYYY-MM`
    pub month: String,
    /// Net salary in PKR
    pub net_salary: f64,
    /// Payment status: `"paid"` or `"pending"`
    pub payment_status: String,
    /// Date the salary was (or will be) paid
    pub payment_date: Option<String>,
}

/// Salaries have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

//! Bank PDC entity - A post-dated cheque issued to a supplier.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bank PDC database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bank_pdc")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Issuing bank name
    pub bank: String,
    /// Cheque number
    pub cheque_number: String,
    /// Internal tracking code (e.g. "PDC-001")
    pub code: String,
    /// Supplier the cheque is payable to
    pub supplier: String,
    /// What the cheque pays for
    pub description: String,
    /// Cheque amount in PKR
    pub amount: f64,
    /// Cheque status: `"pending"` or `"cleared"`
    pub status: String,
    /// Cheque date (doubles as due date) as ISO `YYYY-MM-DD`
    pub date: String,
}

/// Bank PDCs have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

//! Business-in-hand entity - Confirmed or probable future revenue.
//!
//! Covers purchase orders in hand, pending invoices, and expected revenue
//! that has not yet been realized as cash.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Business-in-hand database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "business_in_hand")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Record kind: `"po_in_hand"`, `"pending_invoice"`, or `"expected_revenue"`
    pub record_type: String,
    /// Description of the expected business
    pub description: String,
    /// Expected amount in PKR
    pub amount: f64,
    /// When the revenue is expected, as ISO `YYYY-MM-DD`
    pub expected_date: String,
    /// Progress status: `"pending"`, `"confirmed"`, or `"received"`
    pub status: String,
}

/// Business-in-hand records have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

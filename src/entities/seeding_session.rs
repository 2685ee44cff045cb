//! Seeding session entity - Marks the time window of the latest seed run.
//! At most one row is active at a time; the start timestamp is used to
//! scope bulk removal of seeded cashflow entries by creation time.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Seeding session database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "seeding_sessions")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Seed start time in epoch milliseconds
    pub start_time: i64,
    /// Whether this is the current (not yet removed) session
    pub active: bool,
}

/// `SeedingSession` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

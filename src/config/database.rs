//! Database configuration module.
//!
//! Handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated straight from the entity definitions with
//! `Schema::create_table_from_entity`, so the database schema always matches
//! the Rust struct definitions without manual SQL.

use crate::entities::{
    BankPdc, BusinessInHand, Cashflow, Expense, FutureNeed, Liability, Salary, Sale,
    SeedingSession,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Default local database location when no `DATABASE_URL` is set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/fintrack.sqlite?mode=rwc";

/// Establishes a connection to the database at the given URL.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation
/// from entity definitions.
///
/// Creates the eight financial module tables plus the seeding session table.
/// Safe to call on every startup; existing tables are left untouched.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statements = vec![
        schema.create_table_from_entity(Sale),
        schema.create_table_from_entity(Expense),
        schema.create_table_from_entity(Liability),
        schema.create_table_from_entity(Salary),
        schema.create_table_from_entity(Cashflow),
        schema.create_table_from_entity(BankPdc),
        schema.create_table_from_entity(BusinessInHand),
        schema.create_table_from_entity(FutureNeed),
        schema.create_table_from_entity(SeedingSession),
    ];

    for statement in &mut statements {
        statement.if_not_exists();
        db.execute(builder.build(statement)).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CashflowModel, ExpenseModel, SaleModel, SeedingSessionModel};
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<SaleModel> = Sale::find().limit(1).all(&db).await?;
        let _: Vec<ExpenseModel> = Expense::find().limit(1).all(&db).await?;
        let _: Vec<CashflowModel> = Cashflow::find().limit(1).all(&db).await?;
        let _: Vec<SeedingSessionModel> = SeedingSession::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}

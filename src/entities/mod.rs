//! Entity module - Contains all SeaORM entity definitions for the database.
//! Each financial module has one flat table with no foreign keys; the only
//! non-module table is `seeding_sessions`, which scopes sample-data removal.

pub mod bank_pdc;
pub mod business_in_hand;
pub mod cashflow;
pub mod expense;
pub mod future_need;
pub mod liability;
pub mod salary;
pub mod sale;
pub mod seeding_session;

// Re-export specific types to avoid conflicts
pub use bank_pdc::{Column as BankPdcColumn, Entity as BankPdc, Model as BankPdcModel};
pub use business_in_hand::{
    Column as BusinessInHandColumn, Entity as BusinessInHand, Model as BusinessInHandModel,
};
pub use cashflow::{Column as CashflowColumn, Entity as Cashflow, Model as CashflowModel};
pub use expense::{Column as ExpenseColumn, Entity as Expense, Model as ExpenseModel};
pub use future_need::{Column as FutureNeedColumn, Entity as FutureNeed, Model as FutureNeedModel};
pub use liability::{Column as LiabilityColumn, Entity as Liability, Model as LiabilityModel};
pub use salary::{Column as SalaryColumn, Entity as Salary, Model as SalaryModel};
pub use sale::{Column as SaleColumn, Entity as Sale, Model as SaleModel};
pub use seeding_session::{
    Column as SeedingSessionColumn, Entity as SeedingSession, Model as SeedingSessionModel,
};

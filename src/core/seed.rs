//! Sample-data lifecycle: seeding, targeted removal, and full wipe.
//!
//! Seeding inserts a fixed PKR catalog through the normal create paths so
//! computed fields and validation apply. Each seed run upserts the single
//! active seeding session row first; targeted removal later uses that
//! session's start time to scope cashflow deletion by creation timestamp,
//! and matches every other module against the catalog's known substrings.
//! User-entered records that don't match any pattern are preserved.

use crate::{
    core::{
        bank_pdc::create_bank_pdc, business_in_hand::create_business_in_hand,
        expense::create_expense, future_need::create_future_need, liability::create_liability,
        salary::create_salary, sale::create_sale,
    },
    entities::{
        BankPdc, BankPdcColumn, BusinessInHand, BusinessInHandColumn, Cashflow, CashflowColumn,
        Expense, ExpenseColumn, FutureNeed, FutureNeedColumn, Liability, LiabilityColumn, Salary,
        SalaryColumn, Sale, SaleColumn, SeedingSession, SeedingSessionColumn,
        seeding_session,
    },
    errors::Result,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use serde::Serialize;
use tracing::{error, info};

/// Per-module insert counts from one seed run.
///
/// Cashflow is absent: seeding never writes cashflow rows directly.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecordsAdded {
    pub sales: u32,
    pub expenses: u32,
    pub liabilities: u32,
    pub salaries: u32,
    pub bank_pdc: u32,
    pub future_needs: u32,
    pub business_in_hand: u32,
}

impl RecordsAdded {
    fn total(&self) -> u32 {
        self.sales
            + self.expenses
            + self.liabilities
            + self.salaries
            + self.bank_pdc
            + self.future_needs
            + self.business_in_hand
    }
}

/// Outcome of a seed run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
    pub message: String,
    pub records_added: RecordsAdded,
}

/// (date, description, cost, selling price, expenses)
const SAMPLE_SALES: [(&str, &str, f64, f64, f64); 5] = [
    (
        "2025-01-15",
        "Enterprise Software License",
        2_500_000.0,
        4_500_000.0,
        350_000.0,
    ),
    (
        "2025-01-20",
        "Mobile App Development",
        1_800_000.0,
        3_500_000.0,
        280_000.0,
    ),
    (
        "2025-02-05",
        "E-commerce Platform",
        3_200_000.0,
        6_500_000.0,
        520_000.0,
    ),
    (
        "2025-02-12",
        "Digital Marketing Campaign",
        850_000.0,
        1_500_000.0,
        120_000.0,
    ),
    (
        "2025-02-18",
        "Cloud Infrastructure Setup",
        1_200_000.0,
        2_200_000.0,
        180_000.0,
    ),
];

/// (date, category, description, vendor, amount, status)
const SAMPLE_EXPENSES: [(&str, &str, &str, &str, f64, &str); 4] = [
    (
        "2025-01-08",
        "Office Equipment",
        "MacBook Pro",
        "Apple Store",
        280_000.0,
        "paid",
    ),
    (
        "2025-01-12",
        "Software Licenses",
        "Adobe Creative Suite",
        "Adobe Inc",
        120_000.0,
        "paid",
    ),
    (
        "2025-01-18",
        "Marketing",
        "Google Ads Campaign",
        "Google LLC",
        350_000.0,
        "unpaid",
    ),
    (
        "2025-02-02",
        "Office Rent",
        "Monthly office rent",
        "Property Management Co",
        450_000.0,
        "paid",
    ),
];

/// (lender, type, start date, due date, original amount, description)
const SAMPLE_LIABILITIES: [(&str, &str, &str, &str, f64, &str); 2] = [
    (
        "First National Bank",
        "Business Loan",
        "2025-01-15",
        "2026-01-15",
        5_000_000.0,
        "Business expansion loan",
    ),
    (
        "Equipment Finance Corp",
        "Equipment Loan",
        "2025-02-20",
        "2026-02-20",
        2_500_000.0,
        "Equipment financing",
    ),
];

/// (employee, role, month, net salary, status, payment date)
const SAMPLE_SALARIES: [(&str, &str, &str, f64, &str, &str); 3] = [
    (
        "John Smith",
        "Senior Developer",
        "2025-01",
        885_000.0,
        "paid",
        "2025-01-31",
    ),
    (
        "Sarah Johnson",
        "UI/UX Designer",
        "2025-01",
        665_000.0,
        "paid",
        "2025-01-31",
    ),
    (
        "Ahmed Al-Rashid",
        "Project Manager",
        "2025-02",
        802_000.0,
        "pending",
        "2025-02-28",
    ),
];

/// (date, bank, cheque number, code, supplier, description, amount, status)
const SAMPLE_BANK_PDC: [(&str, &str, &str, &str, &str, &str, f64, &str); 2] = [
    (
        "2025-03-15",
        "Emirates NBD",
        "CHQ001234",
        "PDC-001",
        "Tech Solutions LLC",
        "Software development",
        1_500_000.0,
        "pending",
    ),
    (
        "2025-04-20",
        "First Abu Dhabi Bank",
        "CHQ001235",
        "PDC-002",
        "Office Furniture Co",
        "Office furniture",
        850_000.0,
        "pending",
    ),
];

/// (month, description, quantity, amount, status)
const SAMPLE_FUTURE_NEEDS: [(&str, &str, i32, f64, &str); 3] = [
    ("2025-03", "New Server Hardware", 2, 550_000.0, "one-time"),
    ("2025-04", "Office Expansion", 5, 120_000.0, "one-time"),
    ("2025-03", "Monthly Cloud Hosting", 1, 85_000.0, "recurring"),
];

/// (type, description, amount, expected date, status)
const SAMPLE_BUSINESS_IN_HAND: [(&str, &str, f64, &str, &str); 3] = [
    (
        "po_in_hand",
        "Enterprise CRM System",
        8_500_000.0,
        "2025-04-15",
        "confirmed",
    ),
    (
        "pending_invoice",
        "Website Redesign",
        1_200_000.0,
        "2025-03-10",
        "pending",
    ),
    (
        "expected_revenue",
        "Mobile App Contract",
        2_500_000.0,
        "2025-05-20",
        "confirmed",
    ),
];

/// Substrings identifying seeded records during targeted removal. Kept in
/// sync with the sample catalogs above; user records containing one of
/// these substrings would also be removed.
const SALE_PATTERNS: [&str; 5] = [
    "Enterprise Software License",
    "Mobile App Development",
    "E-commerce Platform",
    "Digital Marketing Campaign",
    "Cloud Infrastructure Setup",
];

const EXPENSE_PATTERNS: [&str; 4] = [
    "MacBook Pro",
    "Adobe Creative Suite",
    "Google Ads Campaign",
    "office rent",
];

const LIABILITY_PATTERNS: [&str; 2] = ["Business expansion loan", "Equipment financing"];

const SALARY_PATTERNS: [&str; 3] = ["John Smith", "Sarah Johnson", "Ahmed Al-Rashid"];

const BANK_PDC_DESCRIPTION_PATTERNS: [&str; 2] = ["Software development", "Office furniture"];
const BANK_PDC_SUPPLIER_PATTERNS: [&str; 2] = ["Tech Solutions LLC", "Office Furniture Co"];

const FUTURE_NEED_PATTERNS: [&str; 3] =
    ["New Server Hardware", "Office Expansion", "Monthly Cloud Hosting"];

const BUSINESS_IN_HAND_PATTERNS: [&str; 3] =
    ["Enterprise CRM System", "Website Redesign", "Mobile App Contract"];

/// Cashflow fallback patterns, used only when no active seeding session is
/// on record. Seed-derived cashflow descriptions carry the source module
/// name, and only user entries use the `"manual"` category.
const CASHFLOW_DESCRIPTION_PATTERNS: [&str; 6] =
    ["Sale", "Expense", "Salary", "PDC", "Future Need", "Business in Hand"];

/// Upserts the single active seeding session, stamping `start_time`.
pub async fn mark_seeding_session(db: &DatabaseConnection, start_time: i64) -> Result<()> {
    let existing = SeedingSession::find()
        .filter(SeedingSessionColumn::Active.eq(true))
        .one(db)
        .await?;

    match existing {
        Some(session) => {
            let mut session: seeding_session::ActiveModel = session.into();
            session.start_time = Set(start_time);
            session.active = Set(true);
            session.update(db).await?;
        }
        None => {
            let session = seeding_session::ActiveModel {
                start_time: Set(start_time),
                active: Set(true),
                ..Default::default()
            };
            session.insert(db).await?;
        }
    }
    Ok(())
}

/// Returns the active seeding session, if any.
pub async fn get_active_seeding_session(
    db: &DatabaseConnection,
) -> Result<Option<seeding_session::Model>> {
    SeedingSession::find()
        .filter(SeedingSessionColumn::Active.eq(true))
        .one(db)
        .await
        .map_err(Into::into)
}

async fn deactivate_seeding_session(db: &DatabaseConnection) -> Result<()> {
    if let Some(session) = get_active_seeding_session(db).await? {
        let mut session: seeding_session::ActiveModel = session.into();
        session.active = Set(false);
        session.update(db).await?;
    }
    Ok(())
}

/// Seeds every module with the sample catalog.
///
/// Inserts go through the normal create paths and are best-effort: a failed
/// record is logged and skipped, and the report counts only successful
/// inserts. Cashflow is never seeded directly.
pub async fn seed_database(db: &DatabaseConnection) -> Result<SeedReport> {
    info!("starting PKR sample data seeding");

    mark_seeding_session(db, Utc::now().timestamp_millis()).await?;

    let mut added = RecordsAdded::default();

    for (date, description, cost, selling_price, expenses) in SAMPLE_SALES {
        match create_sale(
            db,
            date.to_string(),
            description.to_string(),
            cost,
            selling_price,
            expenses,
        )
        .await
        {
            Ok(_) => added.sales += 1,
            Err(e) => error!(error = %e, description, "failed to seed sale"),
        }
    }

    for (date, category, description, vendor, amount, status) in SAMPLE_EXPENSES {
        match create_expense(
            db,
            date.to_string(),
            category.to_string(),
            description.to_string(),
            vendor.to_string(),
            amount,
            status.to_string(),
        )
        .await
        {
            Ok(_) => added.expenses += 1,
            Err(e) => error!(error = %e, description, "failed to seed expense"),
        }
    }

    for (lender, liability_type, start_date, due_date, original_amount, description) in
        SAMPLE_LIABILITIES
    {
        match create_liability(
            db,
            lender.to_string(),
            liability_type.to_string(),
            start_date.to_string(),
            due_date.to_string(),
            original_amount,
            Some(description.to_string()),
        )
        .await
        {
            Ok(_) => added.liabilities += 1,
            Err(e) => error!(error = %e, lender, "failed to seed liability"),
        }
    }

    for (employee, role, month, net_salary, status, payment_date) in SAMPLE_SALARIES {
        match create_salary(
            db,
            employee.to_string(),
            role.to_string(),
            month.to_string(),
            net_salary,
            status.to_string(),
            Some(payment_date.to_string()),
        )
        .await
        {
            Ok(_) => added.salaries += 1,
            Err(e) => error!(error = %e, employee, "failed to seed salary"),
        }
    }

    for (date, bank, cheque_number, code, supplier, description, amount, status) in SAMPLE_BANK_PDC
    {
        match create_bank_pdc(
            db,
            date.to_string(),
            bank.to_string(),
            cheque_number.to_string(),
            code.to_string(),
            supplier.to_string(),
            description.to_string(),
            amount,
            status.to_string(),
        )
        .await
        {
            Ok(_) => added.bank_pdc += 1,
            Err(e) => error!(error = %e, cheque_number, "failed to seed bank PDC"),
        }
    }

    for (month, description, quantity, amount, status) in SAMPLE_FUTURE_NEEDS {
        match create_future_need(
            db,
            month.to_string(),
            description.to_string(),
            quantity,
            amount,
            status.to_string(),
        )
        .await
        {
            Ok(_) => added.future_needs += 1,
            Err(e) => error!(error = %e, description, "failed to seed future need"),
        }
    }

    for (record_type, description, amount, expected_date, status) in SAMPLE_BUSINESS_IN_HAND {
        match create_business_in_hand(
            db,
            record_type.to_string(),
            description.to_string(),
            amount,
            expected_date.to_string(),
            status.to_string(),
        )
        .await
        {
            Ok(_) => added.business_in_hand += 1,
            Err(e) => error!(error = %e, description, "failed to seed business in hand"),
        }
    }

    let total = added.total();
    info!(total, "sample data seeding completed");

    Ok(SeedReport {
        message: format!("Successfully added {total} records across all modules!"),
        records_added: added,
    })
}

/// Deletes seed-derived cashflow rows: by the active session's time window
/// when one exists, otherwise by the pattern-and-category fallback.
async fn remove_seeded_cashflow(db: &DatabaseConnection) -> Result<u64> {
    let filter = match get_active_seeding_session(db).await? {
        Some(session) => Condition::all()
            .add(CashflowColumn::CreatedAt.gte(session.start_time))
            .add(CashflowColumn::CreatedAt.lte(Utc::now().timestamp_millis())),
        None => contains_any(CashflowColumn::Description, &CASHFLOW_DESCRIPTION_PATTERNS)
            .add(CashflowColumn::Category.ne("manual")),
    };
    let result = Cashflow::delete_many().filter(filter).exec(db).await?;
    Ok(result.rows_affected)
}

fn contains_any<C: ColumnTrait>(column: C, patterns: &[&str]) -> Condition {
    patterns
        .iter()
        .fold(Condition::any(), |cond, pattern| {
            cond.add(column.contains(*pattern))
        })
}

/// Removes all records matching the sample-data patterns, returning the
/// number of rows deleted.
///
/// Cashflow rows are scoped by the active seeding session's time window
/// when one exists; otherwise a pattern-and-category fallback is used.
/// Each module is removed best-effort so one failure does not strand the
/// remaining modules. Finishes by deactivating the session.
pub async fn remove_seeded_data(db: &DatabaseConnection) -> Result<u64> {
    info!("removing sample data from all modules");

    let mut removed = 0u64;

    let deletions = [
        (
            "sales",
            Sale::delete_many()
                .filter(contains_any(SaleColumn::Description, &SALE_PATTERNS))
                .exec(db)
                .await,
        ),
        (
            "expenses",
            Expense::delete_many()
                .filter(contains_any(ExpenseColumn::Description, &EXPENSE_PATTERNS))
                .exec(db)
                .await,
        ),
        (
            "liabilities",
            Liability::delete_many()
                .filter(contains_any(
                    LiabilityColumn::Description,
                    &LIABILITY_PATTERNS,
                ))
                .exec(db)
                .await,
        ),
        (
            "salaries",
            Salary::delete_many()
                .filter(contains_any(SalaryColumn::EmployeeName, &SALARY_PATTERNS))
                .exec(db)
                .await,
        ),
        (
            "bank PDC",
            BankPdc::delete_many()
                .filter(
                    contains_any(BankPdcColumn::Description, &BANK_PDC_DESCRIPTION_PATTERNS)
                        .add(contains_any(
                            BankPdcColumn::Supplier,
                            &BANK_PDC_SUPPLIER_PATTERNS,
                        )),
                )
                .exec(db)
                .await,
        ),
        (
            "future needs",
            FutureNeed::delete_many()
                .filter(contains_any(
                    FutureNeedColumn::Description,
                    &FUTURE_NEED_PATTERNS,
                ))
                .exec(db)
                .await,
        ),
        (
            "business in hand",
            BusinessInHand::delete_many()
                .filter(contains_any(
                    BusinessInHandColumn::Description,
                    &BUSINESS_IN_HAND_PATTERNS,
                ))
                .exec(db)
                .await,
        ),
    ];

    for (module, result) in deletions {
        match result {
            Ok(res) => {
                info!(module, rows = res.rows_affected, "removed sample records");
                removed += res.rows_affected;
            }
            Err(e) => error!(module, error = %e, "failed to remove sample records"),
        }
    }

    match remove_seeded_cashflow(db).await {
        Ok(rows) => {
            info!(module = "cashflow", rows, "removed sample records");
            removed += rows;
        }
        Err(e) => error!(module = "cashflow", error = %e, "failed to remove sample records"),
    }

    // The deletions already happened; a session bookkeeping failure must
    // not discard the removed count.
    if let Err(e) = deactivate_seeding_session(db).await {
        error!(error = %e, "failed to deactivate seeding session");
    }

    info!(removed, "sample data removal completed, user data preserved");
    Ok(removed)
}

/// Deletes every record in every module, returning the total rows deleted.
///
/// Best-effort per table; a failing table is logged and the wipe continues.
pub async fn clear_all_data(db: &DatabaseConnection) -> Result<u64> {
    info!("clearing all data from all modules");

    let mut cleared = 0u64;
    let deletions = [
        ("sales", Sale::delete_many().exec(db).await),
        ("expenses", Expense::delete_many().exec(db).await),
        ("liabilities", Liability::delete_many().exec(db).await),
        ("salaries", Salary::delete_many().exec(db).await),
        ("bank PDC", BankPdc::delete_many().exec(db).await),
        ("future needs", FutureNeed::delete_many().exec(db).await),
        (
            "business in hand",
            BusinessInHand::delete_many().exec(db).await,
        ),
        ("cashflow", Cashflow::delete_many().exec(db).await),
    ];

    for (module, result) in deletions {
        match result {
            Ok(res) => {
                info!(module, rows = res.rows_affected, "cleared records");
                cleared += res.rows_affected;
            }
            Err(e) => error!(module, error = %e, "failed to clear records"),
        }
    }

    info!(cleared, "complete data cleanup finished");
    Ok(cleared)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::cashflow::create_cashflow_entry;
    use crate::core::export::export_data;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_seed_database_counts() -> Result<()> {
        let db = setup_test_db().await?;

        let report = seed_database(&db).await?;

        assert_eq!(report.records_added.sales, 5);
        assert_eq!(report.records_added.expenses, 4);
        assert_eq!(report.records_added.liabilities, 2);
        assert_eq!(report.records_added.salaries, 3);
        assert_eq!(report.records_added.bank_pdc, 2);
        assert_eq!(report.records_added.future_needs, 3);
        assert_eq!(report.records_added.business_in_hand, 3);
        assert_eq!(report.message, "Successfully added 22 records across all modules!");
        Ok(())
    }

    #[tokio::test]
    async fn test_seeded_sales_total() -> Result<()> {
        let db = setup_test_db().await?;
        seed_database(&db).await?;

        let doc = export_data(&db, None, None).await?;
        assert!((doc.totals.total_sales - 18_200_000.0).abs() < f64::EPSILON);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_marks_single_active_session() -> Result<()> {
        let db = setup_test_db().await?;

        seed_database(&db).await?;
        seed_database(&db).await?;

        let sessions = SeedingSession::find()
            .filter(SeedingSessionColumn::Active.eq(true))
            .all(&db)
            .await?;
        assert_eq!(sessions.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_seeded_data_preserves_user_records() -> Result<()> {
        let db = setup_test_db().await?;
        seed_database(&db).await?;

        create_test_sale(&db, "2025-03-01", 750_000.0).await?;

        let removed = remove_seeded_data(&db).await?;
        assert_eq!(removed, 22);

        let sales = Sale::find().all(&db).await?;
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].description, "Consulting retainer");

        assert!(get_active_seeding_session(&db).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_without_session_uses_pattern_fallback() -> Result<()> {
        let db = setup_test_db().await?;

        create_cashflow_entry(
            &db,
            "2025-01-15".to_string(),
            "inflow".to_string(),
            "sales".to_string(),
            "Sale: Enterprise Software License".to_string(),
            4_500_000.0,
        )
        .await?;
        create_test_cashflow(&db, "2025-01-16", "outflow", "manual", 30_000.0).await?;

        let removed = remove_seeded_data(&db).await?;
        assert_eq!(removed, 1);

        let remaining = Cashflow::find().all(&db).await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].category, "manual");
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_survives_session_bookkeeping_failure() -> Result<()> {
        use sea_orm::ConnectionTrait;

        let db = setup_test_db().await?;
        seed_database(&db).await?;

        // Break every session query; the module deletions must still land
        // and the removed count must still come back.
        db.execute_unprepared("DROP TABLE seeding_sessions").await?;

        let removed = remove_seeded_data(&db).await?;
        assert_eq!(removed, 22);
        assert!(Sale::find().all(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_clear_all_data_empties_every_table() -> Result<()> {
        let db = setup_test_db().await?;
        seed_database(&db).await?;
        create_test_cashflow(&db, "2025-03-01", "inflow", "manual", 10_000.0).await?;

        let cleared = clear_all_data(&db).await?;
        assert_eq!(cleared, 23);

        assert!(Sale::find().all(&db).await?.is_empty());
        assert!(Cashflow::find().all(&db).await?.is_empty());
        Ok(())
    }
}

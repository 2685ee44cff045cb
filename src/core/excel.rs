//! Spreadsheet serialization of export documents.
//!
//! Emits one workbook per export: a "Summary" sheet with the formatted
//! financial totals, then one sheet per included module whose first row is a
//! literal header row and whose remaining rows are the record values in the
//! same column order. Per-record sheets keep raw numeric values so the
//! spreadsheet stays sortable and filterable; only the Summary sheet uses
//! display-formatted currency strings. Margin percentages are rounded to two
//! decimals.

use crate::{
    core::{
        Module,
        currency::format_currency,
        export::{ExportDocument, ExportTotals},
    },
    errors::Result,
};
use chrono::{DateTime, SecondsFormat, Utc};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::Path;

/// One cell value in a module sheet.
enum Cell {
    Text(String),
    Number(f64),
}

/// Builds the timestamped export filename for a whole-dashboard export,
/// e.g. `finance-export-2025-01-15T10-30-00Z.xlsx`.
///
/// Colons are replaced so the name is valid on every filesystem.
#[must_use]
pub fn export_filename(context: &str, timestamp: DateTime<Utc>) -> String {
    format!(
        "{context}-export-{}.xlsx",
        timestamp
            .to_rfc3339_opts(SecondsFormat::Secs, true)
            .replace(':', "-")
    )
}

/// Builds the timestamped filename for a single-module export,
/// e.g. `expenses-data-2025-01-15T10-30-00Z.xlsx`.
#[must_use]
pub fn module_filename(module: Module, timestamp: DateTime<Utc>) -> String {
    format!(
        "{}-data-{}.xlsx",
        module.as_str(),
        timestamp
            .to_rfc3339_opts(SecondsFormat::Secs, true)
            .replace(':', "-")
    )
}

/// Serializes the export document to a workbook at `path`, with a Summary
/// sheet plus one sheet per module in `modules`.
pub fn write_workbook(doc: &ExportDocument, modules: &[Module], path: &Path) -> Result<()> {
    let mut workbook = build_workbook(doc, modules)?;
    workbook.save(path)?;
    Ok(())
}

/// Builds the in-memory workbook without saving it.
pub fn build_workbook(doc: &ExportDocument, modules: &[Module]) -> Result<Workbook> {
    let mut workbook = Workbook::new();

    write_summary_sheet(workbook.add_worksheet(), doc)?;

    for module in Module::ALL {
        if !modules.contains(&module) {
            continue;
        }
        let sheet = workbook.add_worksheet();
        sheet.set_name(module.title())?;
        let (headers, rows) = module_rows(doc, module);
        write_sheet(sheet, &headers, rows)?;
    }

    Ok(workbook)
}

fn write_summary_sheet(sheet: &mut Worksheet, doc: &ExportDocument) -> Result<()> {
    sheet.set_name("Summary")?;

    sheet.write_string(0, 0, "Finance Tracker Export Summary")?;
    sheet.write_string(1, 0, "Export Date")?;
    sheet.write_string(1, 1, &doc.summary.export_date)?;
    sheet.write_string(2, 0, "Currency")?;
    sheet.write_string(2, 1, &doc.summary.currency)?;
    sheet.write_string(3, 0, "Date Range")?;
    let range_label = doc.summary.date_range.as_ref().map_or_else(
        || "All Data".to_string(),
        |r| format!("{} to {}", r.start_date, r.end_date),
    );
    sheet.write_string(3, 1, range_label)?;

    sheet.write_string(5, 0, "Financial Totals")?;
    let ExportTotals {
        total_sales,
        total_expenses,
        total_liabilities: _,
        outstanding_liabilities,
        total_salaries,
        paid_salaries,
        pending_salaries,
        total_inflows,
        total_outflows,
        net_cashflow,
        total_profit,
        business_in_hand_value,
    } = doc.totals;
    let totals = [
        ("Total Sales", total_sales),
        ("Total Expenses", total_expenses),
        ("Total Profit", total_profit),
        ("Outstanding Liabilities", outstanding_liabilities),
        ("Business in Hand", business_in_hand_value),
        ("Total Salaries", total_salaries),
        ("Paid Salaries", paid_salaries),
        ("Pending Salaries", pending_salaries),
        ("Total Inflows", total_inflows),
        ("Total Outflows", total_outflows),
        ("Net Cash Flow", net_cashflow),
    ];
    for (i, (label, value)) in totals.iter().enumerate() {
        let row = 6 + i as u32;
        sheet.write_string(row, 0, *label)?;
        sheet.write_string(row, 1, format_currency(*value))?;
    }

    Ok(())
}

fn write_sheet(sheet: &mut Worksheet, headers: &[&str], rows: Vec<Vec<Cell>>) -> Result<()> {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    for (i, row) in rows.into_iter().enumerate() {
        let row_num = 1 + i as u32;
        for (col, cell) in row.into_iter().enumerate() {
            match cell {
                Cell::Text(value) => sheet.write_string(row_num, col as u16, value)?,
                Cell::Number(value) => sheet.write_number(row_num, col as u16, value)?,
            };
        }
    }
    Ok(())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The header row and record rows for one module's sheet.
fn module_rows(doc: &ExportDocument, module: Module) -> (Vec<&'static str>, Vec<Vec<Cell>>) {
    match module {
        Module::Sales => (
            vec![
                "Date",
                "Description",
                "Cost (PKR)",
                "Selling Price (PKR)",
                "Gross Profit (PKR)",
                "Gross Margin (%)",
                "Expenses (PKR)",
                "Net Profit (PKR)",
                "Net Margin (%)",
            ],
            doc.data
                .sales
                .iter()
                .map(|s| {
                    vec![
                        Cell::Text(s.date.clone()),
                        Cell::Text(s.description.clone()),
                        Cell::Number(s.cost),
                        Cell::Number(s.selling_price),
                        Cell::Number(s.gross_profit),
                        Cell::Number(round2(s.gross_profit_margin)),
                        Cell::Number(s.expenses),
                        Cell::Number(s.net_profit),
                        Cell::Number(round2(s.net_profit_margin)),
                    ]
                })
                .collect(),
        ),
        Module::Expenses => (
            vec![
                "Date",
                "Description",
                "Amount (PKR)",
                "Category",
                "Vendor",
                "Status",
            ],
            doc.data
                .expenses
                .iter()
                .map(|e| {
                    vec![
                        Cell::Text(e.date.clone()),
                        Cell::Text(e.description.clone()),
                        Cell::Number(e.amount),
                        Cell::Text(e.category.clone()),
                        Cell::Text(e.vendor.clone()),
                        Cell::Text(e.status.clone()),
                    ]
                })
                .collect(),
        ),
        Module::Liabilities => (
            vec![
                "Description",
                "Original Amount (PKR)",
                "Outstanding Balance",
                "Due Date",
                "Creditor",
                "Status",
            ],
            doc.data
                .liabilities
                .iter()
                .map(|l| {
                    vec![
                        Cell::Text(l.description.clone()),
                        Cell::Number(l.amount),
                        Cell::Number(l.outstanding_balance),
                        Cell::Text(l.due_date.clone()),
                        Cell::Text(l.creditor.clone()),
                        Cell::Text(l.status.clone()),
                    ]
                })
                .collect(),
        ),
        Module::Salaries => (
            vec![
                "Employee Name",
                "Month",
                "Basic Salary (PKR)",
                "Allowances (PKR)",
                "Deductions (PKR)",
                "Net Salary (PKR)",
                "Payment Status",
                "Payment Date",
            ],
            doc.data
                .salaries
                .iter()
                .map(|s| {
                    vec![
                        Cell::Text(s.employee_name.clone()),
                        Cell::Text(s.month.clone()),
                        Cell::Number(s.basic_salary),
                        Cell::Number(s.allowances),
                        Cell::Number(s.deductions),
                        Cell::Number(s.net_salary),
                        Cell::Text(s.payment_status.clone()),
                        Cell::Text(s.payment_date.clone()),
                    ]
                })
                .collect(),
        ),
        Module::Cashflow => (
            vec!["Date", "Type", "Category", "Description", "Amount (PKR)"],
            doc.data
                .cashflow
                .iter()
                .map(|c| {
                    vec![
                        Cell::Text(c.date.clone()),
                        Cell::Text(c.entry_type.clone()),
                        Cell::Text(c.category.clone()),
                        Cell::Text(c.description.clone()),
                        Cell::Number(c.amount),
                    ]
                })
                .collect(),
        ),
        Module::BankPdc => (
            vec![
                "Bank Name",
                "Supplier Code",
                "Amount (PKR)",
                "Status",
                "Due Date",
            ],
            doc.data
                .bank_pdc
                .iter()
                .map(|p| {
                    vec![
                        Cell::Text(p.bank_name.clone()),
                        Cell::Text(p.supplier_code.clone()),
                        Cell::Number(p.amount),
                        Cell::Text(p.status.clone()),
                        Cell::Text(p.due_date.clone()),
                    ]
                })
                .collect(),
        ),
        Module::BusinessInHand => (
            vec![
                "PO Number",
                "Supplier",
                "Description",
                "Amount (PKR)",
                "Status",
                "Expected Date",
            ],
            doc.data
                .business_in_hand
                .iter()
                .map(|b| {
                    vec![
                        Cell::Text(b.po_number.clone()),
                        Cell::Text(b.supplier.clone()),
                        Cell::Text(b.description.clone()),
                        Cell::Number(b.amount),
                        Cell::Text(b.status.clone()),
                        Cell::Text(b.expected_date.clone()),
                    ]
                })
                .collect(),
        ),
        Module::FutureNeeds => (
            vec![
                "Description",
                "Category",
                "Month",
                "Total Amount (PKR)",
                "Type",
            ],
            doc.data
                .future_needs
                .iter()
                .map(|n| {
                    vec![
                        Cell::Text(n.description.clone()),
                        Cell::Text(n.category.clone()),
                        Cell::Text(n.month.clone()),
                        Cell::Number(n.amount),
                        Cell::Text(n.need_type.clone()),
                    ]
                })
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::export::export_data;
    use crate::test_utils::*;
    use chrono::TimeZone;

    #[test]
    fn test_export_filename_replaces_colons() {
        let timestamp = Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap();
        let name = export_filename("finance", timestamp);
        assert_eq!(name, "finance-export-2025-01-15T10-30-00Z.xlsx");
        assert!(!name.contains(':'));
    }

    #[test]
    fn test_module_filename() {
        let timestamp = Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(
            module_filename(Module::BankPdc, timestamp),
            "bankPdc-data-2025-01-15T10-30-00Z.xlsx"
        );
    }

    #[tokio::test]
    async fn test_write_workbook_produces_file() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_sale(&db, "2025-01-15", 4_500_000.0).await?;
        create_test_expense(&db, "2025-01-08", "MacBook Pro", 280_000.0, "paid").await?;
        create_test_liability(&db, "First National Bank", 5_000_000.0).await?;

        let doc = export_data(&db, None, None).await?;
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("finance-export-test.xlsx");

        write_workbook(&doc, &Module::ALL, &path)?;

        let metadata = std::fs::metadata(&path)?;
        assert!(metadata.len() > 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_build_workbook_single_module() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_expense(&db, "2025-01-08", "MacBook Pro", 280_000.0, "paid").await?;

        let doc = export_data(&db, None, Some(vec![Module::Expenses])).await?;
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("expenses-data-test.xlsx");

        write_workbook(&doc, &[Module::Expenses], &path)?;

        assert!(path.exists());
        Ok(())
    }
}

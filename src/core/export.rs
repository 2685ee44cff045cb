//! Cross-module export aggregation.
//!
//! Joins all eight module stores into a single export document: a summary
//! block, one reshaped record array per included module, and a totals block
//! with the cross-module financial aggregates. Pure read-and-transform; if
//! any store read fails the whole call fails with no partial result.
//!
//! Date-range filtering is applied only to sales, expenses, salaries (keyed
//! by `month`), and cashflow. Liabilities, bank PDCs, business in hand, and
//! future needs represent outstanding/point-in-time state and are always
//! exported in full, range or not. That asymmetry is the documented
//! contract, not an oversight.

use crate::{
    core::{
        Module, bank_pdc, business_in_hand, cashflow, currency, expense, future_need, liability,
        salary, sale,
    },
    errors::Result,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

/// Inclusive date range, compared lexicographically on ISO strings.
///
/// An empty string on either side leaves that side unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// Inclusive lower bound (`YYYY-MM-DD`)
    pub start_date: String,
    /// Inclusive upper bound (`YYYY-MM-DD`)
    pub end_date: String,
}

/// Export metadata block.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    /// Day the export was produced (`YYYY-MM-DD`)
    pub export_date: String,
    /// Echo of the requested date range, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    /// Fixed currency code (`"PKR"`)
    pub currency: String,
}

/// A sale reshaped for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRow {
    /// Sale date
    pub date: String,
    /// What was sold
    pub description: String,
    /// Cost of goods sold
    pub cost: f64,
    /// Closing price
    pub selling_price: f64,
    /// Stored gross profit
    pub gross_profit: f64,
    /// Gross margin percentage
    pub gross_profit_margin: f64,
    /// Attributable expenses
    pub expenses: f64,
    /// Stored net profit
    pub net_profit: f64,
    /// Net margin percentage
    pub net_profit_margin: f64,
}

/// An expense reshaped for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRow {
    /// Expense date
    pub date: String,
    /// What the expense was for
    pub description: String,
    /// Amount
    pub amount: f64,
    /// Category
    pub category: String,
    /// Vendor
    pub vendor: String,
    /// Payment status
    pub status: String,
}

/// A liability reshaped for export.
///
/// `description` falls back to the lender name when absent, and `status` is
/// always `"active"` because no status lifecycle is persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiabilityRow {
    /// Description or lender name
    pub description: String,
    /// Original amount borrowed
    pub amount: f64,
    /// Amount still owed
    pub outstanding_balance: f64,
    /// Due date
    pub due_date: String,
    /// Lender/creditor name
    pub creditor: String,
    /// Always `"active"`
    pub status: String,
}

/// A salary reshaped for export.
///
/// Basic/allowances/deductions are not stored separately, so the export
/// reports the net figure as basic with zero allowances and deductions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRow {
    /// Employee name
    pub employee_name: String,
    /// Pay month
    pub month: String,
    /// Placeholder: equal to `net_salary`
    pub basic_salary: f64,
    /// Placeholder: always 0
    pub allowances: f64,
    /// Placeholder: always 0
    pub deductions: f64,
    /// Net salary
    pub net_salary: f64,
    /// Payment status
    pub payment_status: String,
    /// Payment date, empty string when unset
    pub payment_date: String,
}

/// A cashflow entry reshaped for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowRow {
    /// Movement date
    pub date: String,
    /// Direction: inflow or outflow
    #[serde(rename = "type")]
    pub entry_type: String,
    /// Source category
    pub category: String,
    /// Description
    pub description: String,
    /// Amount
    pub amount: f64,
}

/// A post-dated cheque reshaped for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankPdcRow {
    /// Issuing bank
    pub bank_name: String,
    /// Internal tracking code
    pub supplier_code: String,
    /// Cheque amount
    pub amount: f64,
    /// Cheque status
    pub status: String,
    /// Cheque date, exported as the due date
    pub due_date: String,
}

/// A business-in-hand record reshaped for export.
///
/// `po_number` and `supplier` are populated from the description only when
/// the record type matches, and are empty strings otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessInHandRow {
    /// Description when `type == "po_in_hand"`, else empty
    pub po_number: String,
    /// Description when `type == "pending_invoice"`, else empty
    pub supplier: String,
    /// Description
    pub description: String,
    /// Expected amount
    pub amount: f64,
    /// Progress status
    pub status: String,
    /// Expected date
    pub expected_date: String,
}

/// A future need reshaped for export.
///
/// The exported amount is the projected total (`unit amount * quantity`),
/// and the stored recurrence status is repurposed as the exported type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FutureNeedRow {
    /// What is needed
    pub description: String,
    /// Not stored; always empty
    pub category: String,
    /// Target month
    pub month: String,
    /// Projected total (`amount * quantity`)
    pub amount: f64,
    /// Recurrence (`"recurring"` or `"one-time"`)
    #[serde(rename = "type")]
    pub need_type: String,
}

/// One reshaped record array per module. Excluded modules export empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    /// Sales rows
    pub sales: Vec<SaleRow>,
    /// Expense rows
    pub expenses: Vec<ExpenseRow>,
    /// Liability rows
    pub liabilities: Vec<LiabilityRow>,
    /// Salary rows
    pub salaries: Vec<SalaryRow>,
    /// Cashflow rows
    pub cashflow: Vec<CashflowRow>,
    /// PDC rows
    pub bank_pdc: Vec<BankPdcRow>,
    /// Business-in-hand rows
    pub business_in_hand: Vec<BusinessInHandRow>,
    /// Future need rows
    pub future_needs: Vec<FutureNeedRow>,
}

/// Cross-module financial totals.
///
/// All are linear, order-independent aggregates over the (possibly
/// filtered) record arrays; excluded modules contribute 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportTotals {
    /// Σ selling price over filtered sales
    pub total_sales: f64,
    /// Σ amount over filtered expenses
    pub total_expenses: f64,
    /// Σ original amount over all liabilities
    pub total_liabilities: f64,
    /// Σ outstanding balance over all liabilities
    pub outstanding_liabilities: f64,
    /// Σ net salary over filtered salaries
    pub total_salaries: f64,
    /// Σ net salary where status is `"paid"`
    pub paid_salaries: f64,
    /// `total_salaries - paid_salaries`
    pub pending_salaries: f64,
    /// Σ amount over filtered inflow entries
    pub total_inflows: f64,
    /// Σ amount over filtered outflow entries
    pub total_outflows: f64,
    /// `total_inflows - total_outflows`
    pub net_cashflow: f64,
    /// Σ net profit over filtered sales
    pub total_profit: f64,
    /// Σ amount over business in hand not yet received
    pub business_in_hand_value: f64,
}

/// The complete export document.
#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument {
    /// Export metadata
    pub summary: ExportSummary,
    /// Reshaped records per module
    pub data: ExportData,
    /// Cross-module totals
    pub totals: ExportTotals,
}

/// Whether an ISO date/month string falls inside the (optional) range.
///
/// Lexicographic comparison, inclusive on both ends; an empty bound is
/// treated as unbounded.
fn in_range(value: &str, range: Option<&DateRange>) -> bool {
    let Some(range) = range else {
        return true;
    };
    if !range.start_date.is_empty() && value < range.start_date.as_str() {
        return false;
    }
    if !range.end_date.is_empty() && value > range.end_date.as_str() {
        return false;
    }
    true
}

/// Builds the export document for the requested modules and date range.
///
/// `modules` defaults to all eight. The salaries filter keys on `month`
/// rather than a day-level date; every other filtered module keys on `date`.
pub async fn export_data(
    db: &DatabaseConnection,
    date_range: Option<DateRange>,
    modules: Option<Vec<Module>>,
) -> Result<ExportDocument> {
    let modules = modules.unwrap_or_else(|| Module::ALL.to_vec());
    let include = |module: Module| modules.contains(&module);
    let range = date_range.as_ref();

    let sales = if include(Module::Sales) {
        sale::get_all_sales(db).await?
    } else {
        Vec::new()
    };
    let expenses = if include(Module::Expenses) {
        expense::get_all_expenses(db).await?
    } else {
        Vec::new()
    };
    let liabilities = if include(Module::Liabilities) {
        liability::get_all_liabilities(db).await?
    } else {
        Vec::new()
    };
    let salaries = if include(Module::Salaries) {
        salary::get_all_salaries(db).await?
    } else {
        Vec::new()
    };
    let cashflows = if include(Module::Cashflow) {
        cashflow::get_all_cashflow(db).await?
    } else {
        Vec::new()
    };
    let bank_pdcs = if include(Module::BankPdc) {
        bank_pdc::get_all_bank_pdc(db).await?
    } else {
        Vec::new()
    };
    let business_in_hand = if include(Module::BusinessInHand) {
        business_in_hand::get_all_business_in_hand(db).await?
    } else {
        Vec::new()
    };
    let future_needs = if include(Module::FutureNeeds) {
        future_need::get_all_future_needs(db).await?
    } else {
        Vec::new()
    };

    // Date filtering applies to the four transactional modules only
    let filtered_sales: Vec<_> = sales
        .into_iter()
        .filter(|s| in_range(&s.date, range))
        .collect();
    let filtered_expenses: Vec<_> = expenses
        .into_iter()
        .filter(|e| in_range(&e.date, range))
        .collect();
    let filtered_salaries: Vec<_> = salaries
        .into_iter()
        .filter(|s| in_range(&s.month, range))
        .collect();
    let filtered_cashflows: Vec<_> = cashflows
        .into_iter()
        .filter(|c| in_range(&c.date, range))
        .collect();

    let total_sales: f64 = filtered_sales.iter().map(|s| s.selling_price).sum();
    let total_profit: f64 = filtered_sales.iter().map(|s| s.net_profit).sum();
    let total_expenses: f64 = filtered_expenses.iter().map(|e| e.amount).sum();
    let total_liabilities: f64 = liabilities.iter().map(|l| l.original_amount).sum();
    let outstanding_liabilities: f64 = liabilities.iter().map(|l| l.outstanding_balance).sum();

    let total_salaries: f64 = filtered_salaries.iter().map(|s| s.net_salary).sum();
    let paid_salaries: f64 = filtered_salaries
        .iter()
        .filter(|s| s.payment_status == "paid")
        .map(|s| s.net_salary)
        .sum();
    // Derived by subtraction: any status other than "paid" counts as pending
    let pending_salaries = total_salaries - paid_salaries;

    let total_inflows: f64 = filtered_cashflows
        .iter()
        .filter(|c| c.entry_type == "inflow")
        .map(|c| c.amount)
        .sum();
    let total_outflows: f64 = filtered_cashflows
        .iter()
        .filter(|c| c.entry_type == "outflow")
        .map(|c| c.amount)
        .sum();

    let business_in_hand_value: f64 = business_in_hand
        .iter()
        .filter(|b| b.status != "received")
        .map(|b| b.amount)
        .sum();

    let data = ExportData {
        sales: filtered_sales
            .into_iter()
            .map(|s| SaleRow {
                date: s.date,
                description: s.description,
                cost: s.cost,
                selling_price: s.selling_price,
                gross_profit: s.gross_profit,
                gross_profit_margin: s.gross_profit_margin,
                expenses: s.expenses,
                net_profit: s.net_profit,
                net_profit_margin: s.net_profit_margin,
            })
            .collect(),
        expenses: filtered_expenses
            .into_iter()
            .map(|e| ExpenseRow {
                date: e.date,
                description: e.description,
                amount: e.amount,
                category: e.category,
                vendor: e.vendor,
                status: e.status,
            })
            .collect(),
        liabilities: liabilities
            .into_iter()
            .map(|l| LiabilityRow {
                description: l
                    .description
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| l.lender_party.clone()),
                amount: l.original_amount,
                outstanding_balance: l.outstanding_balance,
                due_date: l.due_date,
                creditor: l.lender_party,
                // No status lifecycle is persisted for liabilities
                status: "active".to_string(),
            })
            .collect(),
        salaries: filtered_salaries
            .into_iter()
            .map(|s| SalaryRow {
                employee_name: s.employee_name,
                month: s.month,
                basic_salary: s.net_salary,
                allowances: 0.0,
                deductions: 0.0,
                net_salary: s.net_salary,
                payment_status: s.payment_status,
                payment_date: s.payment_date.unwrap_or_default(),
            })
            .collect(),
        cashflow: filtered_cashflows
            .into_iter()
            .map(|c| CashflowRow {
                date: c.date,
                entry_type: c.entry_type,
                category: c.category,
                description: c.description,
                amount: c.amount,
            })
            .collect(),
        bank_pdc: bank_pdcs
            .into_iter()
            .map(|p| BankPdcRow {
                bank_name: p.bank,
                supplier_code: p.code,
                amount: p.amount,
                status: p.status,
                due_date: p.date,
            })
            .collect(),
        business_in_hand: business_in_hand
            .into_iter()
            .map(|b| BusinessInHandRow {
                po_number: if b.record_type == "po_in_hand" {
                    b.description.clone()
                } else {
                    String::new()
                },
                supplier: if b.record_type == "pending_invoice" {
                    b.description.clone()
                } else {
                    String::new()
                },
                description: b.description,
                amount: b.amount,
                status: b.status,
                expected_date: b.expected_date,
            })
            .collect(),
        future_needs: future_needs
            .into_iter()
            .map(|n| FutureNeedRow {
                description: n.description,
                category: String::new(),
                month: n.month,
                amount: n.amount * f64::from(n.quantity),
                need_type: n.status,
            })
            .collect(),
    };

    Ok(ExportDocument {
        summary: ExportSummary {
            export_date: chrono::Utc::now().format("%Y-%m-%d").to_string(),
            date_range,
            currency: currency::CURRENCY_CODE.to_string(),
        },
        data,
        totals: ExportTotals {
            total_sales,
            total_expenses,
            total_liabilities,
            outstanding_liabilities,
            total_salaries,
            paid_salaries,
            pending_salaries,
            total_inflows,
            total_outflows,
            net_cashflow: total_inflows - total_outflows,
            total_profit,
            business_in_hand_value,
        },
    })
}

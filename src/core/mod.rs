//! Core business logic - framework-agnostic CRUD, aggregation, export, and
//! admin operations over the eight financial modules.

use crate::errors::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Bank post-dated cheque operations
pub mod bank_pdc;
/// Business-in-hand (future revenue pipeline) operations
pub mod business_in_hand;
/// Cashflow entry operations
pub mod cashflow;
/// PKR currency formatting
pub mod currency;
/// Spreadsheet (xlsx) serialization of export documents
pub mod excel;
/// Expense operations
pub mod expense;
/// Cross-module export aggregation
pub mod export;
/// Future needs (planned spend) operations
pub mod future_need;
/// Liability operations
pub mod liability;
/// Salary operations
pub mod salary;
/// Sales operations
pub mod sale;
/// Seeding/reset admin utility
pub mod seed;

/// Identifies one of the eight financial modules.
///
/// This is the single module descriptor used for export selection, sheet
/// naming, and the CLI's `--modules` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    /// Sales records
    Sales,
    /// Expense records
    Expenses,
    /// Liability records
    Liabilities,
    /// Salary records
    Salaries,
    /// Cashflow entries
    Cashflow,
    /// Bank post-dated cheques
    BankPdc,
    /// Business-in-hand records
    BusinessInHand,
    /// Future needs
    FutureNeeds,
}

impl Module {
    /// All eight modules, in canonical export order.
    pub const ALL: [Self; 8] = [
        Self::Sales,
        Self::Expenses,
        Self::Liabilities,
        Self::Salaries,
        Self::Cashflow,
        Self::BankPdc,
        Self::BusinessInHand,
        Self::FutureNeeds,
    ];

    /// The module identifier used on the wire and on the CLI.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Expenses => "expenses",
            Self::Liabilities => "liabilities",
            Self::Salaries => "salaries",
            Self::Cashflow => "cashflow",
            Self::BankPdc => "bankPdc",
            Self::BusinessInHand => "businessInHand",
            Self::FutureNeeds => "futureNeeds",
        }
    }

    /// Human-readable sheet/page title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Sales => "Sales",
            Self::Expenses => "Expenses",
            Self::Liabilities => "Liabilities",
            Self::Salaries => "Salaries",
            Self::Cashflow => "Cash Flow",
            Self::BankPdc => "Bank PDC",
            Self::BusinessInHand => "Business In Hand",
            Self::FutureNeeds => "Future Needs",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sales" => Ok(Self::Sales),
            "expenses" => Ok(Self::Expenses),
            "liabilities" => Ok(Self::Liabilities),
            "salaries" => Ok(Self::Salaries),
            "cashflow" => Ok(Self::Cashflow),
            "bankPdc" => Ok(Self::BankPdc),
            "businessInHand" => Ok(Self::BusinessInHand),
            "futureNeeds" => Ok(Self::FutureNeeds),
            other => Err(Error::validation(format!("Unknown module: {other}"))),
        }
    }
}

/// Validates that a monetary amount is finite and non-negative.
pub(crate) fn ensure_amount(value: f64, field: &str) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::validation(format!(
            "{field} must be a non-negative amount, got {value}"
        )));
    }
    Ok(())
}

/// Validates that a status-like field holds one of the allowed values.
pub(crate) fn ensure_status(value: &str, allowed: &[&str], field: &str) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(Error::validation(format!(
        "{field} must be one of [{}], got \"{value}\"",
        allowed.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_roundtrip() {
        for module in Module::ALL {
            assert_eq!(module.as_str().parse::<Module>().ok(), Some(module));
        }
    }

    #[test]
    fn test_module_unknown_identifier() {
        assert!("payroll".parse::<Module>().is_err());
    }

    #[test]
    fn test_ensure_status_rejects_unknown() {
        assert!(ensure_status("paid", &["paid", "unpaid"], "status").is_ok());
        assert!(ensure_status("overdue", &["paid", "unpaid"], "status").is_err());
    }

    #[test]
    fn test_ensure_amount_rejects_nan_and_negative() {
        assert!(ensure_amount(10.0, "amount").is_ok());
        assert!(ensure_amount(0.0, "amount").is_ok());
        assert!(ensure_amount(-1.0, "amount").is_err());
        assert!(ensure_amount(f64::NAN, "amount").is_err());
    }
}

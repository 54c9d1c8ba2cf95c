//! CSV loader for batch scenario input.
//!
//! ## CSV Format
//!
//! Headers are matched by name; column order does **not** matter. Header
//! names are case-sensitive. Empty optional cells mean 0 (or false), matching
//! the blank-field coercion of the interactive flags.
//!
//! | Column | Required | Type | Notes |
//! |----------------------------|----------|---------|-----------------------------------|
//! | `income` | yes | decimal | Gross annual income |
//! | `filing_status` | yes | string | `single` or `married` |
//! | `loan_amount` | no | decimal | |
//! | `interest_rate` | no | decimal | Annual rate in percent |
//! | `property_tax` | no | decimal | |
//! | `home_repairs` | no | decimal | |
//! | `retirement_contributions` | no | decimal | |
//! | `other_deductions` | no | decimal | |
//! | `state_taxes` | no | decimal | Capped at the SALT limit |
//! | `is_rental` | no | bool | `true` enables the rental columns |
//! | `rental_income` | no | decimal | Ignored unless `is_rental` |
//! | `rental_expenses` | no | decimal | Ignored unless `is_rental` |
//! | `dependents` | no | integer | |
//!
//! ### Minimal example
//!
//! ```csv
//! income,filing_status
//! 75000.00,single
//! ```
//!
//! ### Full example
//!
//! ```csv
//! income,filing_status,loan_amount,interest_rate,property_tax,home_repairs,retirement_contributions,other_deductions,state_taxes,is_rental,rental_income,rental_expenses,dependents
//! 100000,single,300000,4,3000,2000,6000,1000,5000,,,,
//! 180000,married,400000,5,6000,3000,10000,2000,12000,true,30000,8000,2
//! ```

use anyhow::Context;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

use proptax_core::FilingStatus;
use proptax_core::calculations::{PropertyScenario, RentalProperty};

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    income: Decimal,
    filing_status: String,
    loan_amount: Option<Decimal>,
    interest_rate: Option<Decimal>,
    property_tax: Option<Decimal>,
    home_repairs: Option<Decimal>,
    retirement_contributions: Option<Decimal>,
    other_deductions: Option<Decimal>,
    state_taxes: Option<Decimal>,
    is_rental: Option<bool>,
    rental_income: Option<Decimal>,
    rental_expenses: Option<Decimal>,
    dependents: Option<u32>,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting scenario CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A `filing_status` cell contained a value that is not `single` or
    /// `married`. The `usize` is the 1-based data row number.
    #[error("unrecognised filing status '{status}' on row {row}")]
    InvalidFilingStatus { status: String, row: usize },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

/// Convert a single CSV row into a PropertyScenario.
///
/// row_number is 1-based (for error messages).
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<PropertyScenario, CsvLoadError> {
    let filing_status = FilingStatus::parse(&row.filing_status).ok_or_else(|| {
        CsvLoadError::InvalidFilingStatus {
            status: row.filing_status,
            row: row_number,
        }
    })?;

    let is_rental = row.is_rental.unwrap_or(false);
    if !is_rental && (row.rental_income.is_some() || row.rental_expenses.is_some()) {
        warn!(
            row = row_number,
            "rental amounts ignored because is_rental is not set"
        );
    }
    let rental = is_rental.then(|| RentalProperty {
        rental_income: row.rental_income.unwrap_or(Decimal::ZERO),
        rental_expenses: row.rental_expenses.unwrap_or(Decimal::ZERO),
    });

    Ok(PropertyScenario {
        income: row.income,
        filing_status,
        loan_amount: row.loan_amount.unwrap_or(Decimal::ZERO),
        interest_rate: row.interest_rate.unwrap_or(Decimal::ZERO),
        property_tax: row.property_tax.unwrap_or(Decimal::ZERO),
        home_repairs: row.home_repairs.unwrap_or(Decimal::ZERO),
        retirement_contributions: row.retirement_contributions.unwrap_or(Decimal::ZERO),
        other_deductions: row.other_deductions.unwrap_or(Decimal::ZERO),
        state_taxes: row.state_taxes.unwrap_or(Decimal::ZERO),
        rental,
        dependents: row.dependents.unwrap_or(0),
    })
}

/// Parse CSV text (the full file contents as a &str) and return a vector of
/// PropertyScenario. Rows are returned in file order.
///
/// # Errors
///
/// * [CsvLoadError::Parse] – if the CSV is structurally invalid or a
///   required field cannot be deserialised.
/// * [CsvLoadError::InvalidFilingStatus] – if any row contains an
///   unrecognised filing-status code.
pub fn load_from_str(input: &str) -> Result<Vec<PropertyScenario>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All) // tolerate whitespace around values
        .flexible(false) // strict column count
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            let row_number = idx + 1; // 1-based for user-facing messages
            convert_row(row, row_number)
        })
        .collect()
}

/// Convenience wrapper: read a file from disk and delegate to [load_from_str].
pub fn load_from_file(path: &std::path::Path) -> anyhow::Result<Vec<PropertyScenario>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read scenario file '{}'", path.display()))?;
    let scenarios = load_from_str(&contents)
        .with_context(|| format!("invalid scenario file '{}'", path.display()))?;
    Ok(scenarios)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

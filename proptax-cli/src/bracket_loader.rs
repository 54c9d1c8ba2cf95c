//! Loader for bracket-table overrides.
//!
//! The built-in tables cover tax year 2023; a CSV file can replace the
//! bracket schedule for either filing status without rebuilding. The CSV
//! should have the following columns:
//!
//! - `filing_status`: `single` or `married`
//! - `min_income`: the lower bound of the bracket (exclusive)
//! - `max_income`: the upper bound (inclusive; empty for unlimited)
//! - `base_tax`: cumulative tax owed at `min_income`
//! - `rate`: the marginal rate as a decimal (e.g. `0.10`)
//!
//! Rows replace the whole schedule for each filing status they mention;
//! statuses not mentioned keep the built-in schedule.

use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use proptax_core::{FilingStatus, TaxBracket, TaxYearTables};

/// Errors that can occur when loading bracket data.
#[derive(Debug, Error)]
pub enum BracketLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("unrecognised filing status '{0}'")]
    InvalidFilingStatus(String),
}

impl From<csv::Error> for BracketLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the bracket CSV file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub filing_status: String,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub base_tax: Decimal,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Parse bracket records from a CSV reader.
///
/// Returns records in file order. The reader can be any type that implements
/// `Read`, such as a file or a string slice.
pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketLoaderError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let record: BracketRecord = result?;
        records.push(record);
    }

    Ok(records)
}

/// Apply bracket records onto the year tables.
///
/// For each filing status present in the records, the existing schedule is
/// replaced wholesale by that status's rows, sorted by `min_income`. Returns
/// the number of schedules replaced. A replacement schedule with no
/// open-ended bracket is accepted but logged, since incomes above its top
/// threshold will fail to match at calculation time.
pub fn apply(
    records: &[BracketRecord],
    tables: &mut TaxYearTables,
) -> Result<usize, BracketLoaderError> {
    let mut single = Vec::new();
    let mut married = Vec::new();

    for record in records {
        let status = FilingStatus::parse(&record.filing_status).ok_or_else(|| {
            BracketLoaderError::InvalidFilingStatus(record.filing_status.clone())
        })?;
        let bracket = TaxBracket {
            min_income: record.min_income,
            max_income: record.max_income,
            tax_rate: record.rate,
            base_tax: record.base_tax,
        };
        match status {
            FilingStatus::Single => single.push(bracket),
            FilingStatus::MarriedFilingJointly => married.push(bracket),
        }
    }

    let mut replaced = 0;
    if !single.is_empty() {
        tables.single_brackets = finalize_schedule(single, FilingStatus::Single);
        replaced += 1;
    }
    if !married.is_empty() {
        tables.married_brackets = finalize_schedule(married, FilingStatus::MarriedFilingJointly);
        replaced += 1;
    }

    Ok(replaced)
}

fn finalize_schedule(
    mut brackets: Vec<TaxBracket>,
    status: FilingStatus,
) -> Vec<TaxBracket> {
    brackets.sort_by(|a, b| a.min_income.cmp(&b.min_income));
    if brackets.iter().all(|b| b.max_income.is_some()) {
        warn!(
            filing_status = status.as_str(),
            "replacement schedule has no open-ended bracket"
        );
    }
    brackets
}

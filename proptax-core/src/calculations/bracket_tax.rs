//! Progressive bracket tax schedule.
//!
//! Tax is piecewise linear over a list of [`TaxBracket`]s: for the bracket
//! covering the taxable income, tax owed is
//! `base_tax + (income - min_income) * tax_rate`. The schedule returns exact
//! decimals; rounding to display precision is a presentation concern.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use proptax_core::FilingStatus;
//! use proptax_core::TaxYearTables;
//! use proptax_core::calculations::BracketSchedule;
//!
//! let tables = TaxYearTables::year_2023();
//! let schedule = BracketSchedule::new(tables.brackets(FilingStatus::Single));
//!
//! // 5147 + (50000 - 44725) * 0.22
//! assert_eq!(schedule.tax_for(dec!(50000)), Ok(dec!(6307.50)));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use crate::TaxBracket;

/// Errors that can occur when evaluating a bracket schedule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTaxError {
    /// The schedule contains no brackets.
    #[error("no tax brackets provided")]
    NoBrackets,

    /// No bracket covers the given taxable income.
    #[error("no tax bracket found for taxable income {0}")]
    NoMatchingBracket(Decimal),
}

/// A progressive tax schedule over a slice of brackets.
///
/// Brackets must be sorted by `min_income` ascending and cover all income
/// ranges; the last bracket should have `max_income` of `None`.
#[derive(Debug, Clone)]
pub struct BracketSchedule<'a> {
    brackets: &'a [TaxBracket],
}

impl<'a> BracketSchedule<'a> {
    pub fn new(brackets: &'a [TaxBracket]) -> Self {
        Self { brackets }
    }

    /// Computes the tax owed on `taxable_income`.
    ///
    /// Zero or negative income owes zero tax.
    ///
    /// # Errors
    ///
    /// Returns [`BracketTaxError`] if the schedule is empty or has a gap at
    /// the given income.
    pub fn tax_for(
        &self,
        taxable_income: Decimal,
    ) -> Result<Decimal, BracketTaxError> {
        if self.brackets.is_empty() {
            return Err(BracketTaxError::NoBrackets);
        }
        if taxable_income <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        let bracket = self
            .brackets
            .iter()
            .find(|b| {
                taxable_income > b.min_income
                    && (b.max_income.is_none()
                        || taxable_income <= b.max_income.unwrap_or(Decimal::MAX))
            })
            .ok_or(BracketTaxError::NoMatchingBracket(taxable_income))?;

        let marginal_income = taxable_income - bracket.min_income;
        Ok(bracket.base_tax + marginal_income * bracket.tax_rate)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{FilingStatus, TaxYearTables};

    fn single_schedule(tables: &TaxYearTables) -> BracketSchedule<'_> {
        BracketSchedule::new(tables.brackets(FilingStatus::Single))
    }

    fn married_schedule(tables: &TaxYearTables) -> BracketSchedule<'_> {
        BracketSchedule::new(tables.brackets(FilingStatus::MarriedFilingJointly))
    }

    // =========================================================================
    // Zero and negative income
    // =========================================================================

    #[test]
    fn zero_income_owes_zero_for_both_statuses() {
        let tables = TaxYearTables::year_2023();

        assert_eq!(single_schedule(&tables).tax_for(dec!(0)), Ok(dec!(0)));
        assert_eq!(married_schedule(&tables).tax_for(dec!(0)), Ok(dec!(0)));
    }

    #[test]
    fn negative_income_owes_zero() {
        let tables = TaxYearTables::year_2023();

        assert_eq!(single_schedule(&tables).tax_for(dec!(-500)), Ok(dec!(0)));
    }

    // =========================================================================
    // Known points
    // =========================================================================

    #[test]
    fn first_bracket_is_flat_ten_percent() {
        let tables = TaxYearTables::year_2023();

        assert_eq!(
            single_schedule(&tables).tax_for(dec!(10000)),
            Ok(dec!(1000.00))
        );
    }

    #[test]
    fn single_fifty_thousand() {
        let tables = TaxYearTables::year_2023();

        // 5147 + (50000 - 44725) * 0.22 = 6307.50
        assert_eq!(
            single_schedule(&tables).tax_for(dec!(50000)),
            Ok(dec!(6307.50))
        );
    }

    #[test]
    fn married_one_hundred_thousand() {
        let tables = TaxYearTables::year_2023();

        // 10294 + (100000 - 89450) * 0.22 = 12615.00
        assert_eq!(
            married_schedule(&tables).tax_for(dec!(100000)),
            Ok(dec!(12615.00))
        );
    }

    #[test]
    fn top_bracket_applies_unboundedly() {
        let tables = TaxYearTables::year_2023();

        // 174238.25 + (1000000 - 578125) * 0.37 = 330332.00
        assert_eq!(
            single_schedule(&tables).tax_for(dec!(1000000)),
            Ok(dec!(330332.00))
        );
    }

    // =========================================================================
    // Structural properties
    // =========================================================================

    #[test]
    fn continuous_at_every_threshold() {
        let tables = TaxYearTables::year_2023();

        for status in [FilingStatus::Single, FilingStatus::MarriedFilingJointly] {
            let brackets = tables.brackets(status);
            let schedule = BracketSchedule::new(brackets);

            for pair in brackets.windows(2) {
                let threshold = pair[0].max_income.unwrap();
                assert_eq!(
                    schedule.tax_for(threshold),
                    Ok(pair[1].base_tax),
                    "discontinuity at {threshold} for {}",
                    status.as_str()
                );
            }
        }
    }

    #[test]
    fn monotonically_non_decreasing() {
        let tables = TaxYearTables::year_2023();
        let schedule = single_schedule(&tables);

        let mut previous = dec!(0);
        let mut income = dec!(0);
        while income <= dec!(700000) {
            let tax = schedule.tax_for(income).unwrap();
            assert!(tax >= previous, "tax decreased at income {income}");
            previous = tax;
            income += dec!(2500);
        }
    }

    // =========================================================================
    // Errors
    // =========================================================================

    #[test]
    fn empty_schedule_is_an_error() {
        let schedule = BracketSchedule::new(&[]);

        assert_eq!(schedule.tax_for(dec!(100)), Err(BracketTaxError::NoBrackets));
    }

    #[test]
    fn gap_in_schedule_reports_no_matching_bracket() {
        let brackets = vec![TaxBracket {
            min_income: dec!(1000),
            max_income: Some(dec!(2000)),
            tax_rate: dec!(0.10),
            base_tax: dec!(100),
        }];
        let schedule = BracketSchedule::new(&brackets);

        assert_eq!(
            schedule.tax_for(dec!(500)),
            Err(BracketTaxError::NoMatchingBracket(dec!(500)))
        );
    }
}

//! Standard-vs-itemized deduction comparison worksheet.
//!
//! Given one property-owner scenario, the worksheet computes taxable income
//! and tax liability twice — once under the standard deduction and once under
//! itemized deductions — and reports the signed savings from itemizing.
//!
//! # Worksheet Structure
//!
//! | Line | Description |
//! |------|-------------|
//! | 1    | Mortgage interest: loan amount × interest rate / 100 |
//! | 2    | Standard deduction for the filing status |
//! | 3    | Net rental income: rental income − expenses − home repairs |
//! | 4    | Itemized deduction: mortgage interest + property tax + capped SALT + other deductions (+ home repairs unless the property is a rental) |
//! | 5    | Adjusted income: income − retirement contributions + net rental income |
//! | 6    | Taxable income under each deduction, floored at 0 |
//! | 7    | Tax liability under each deduction from the bracket schedule |
//! | 8    | Dependent credits: dependents × per-dependent credit |
//! | 9    | Itemized liability after credits, floored at 0 |
//! | 10   | Tax savings: standard liability − itemized liability |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use proptax_core::{FilingStatus, TaxYearTables};
//! use proptax_core::calculations::{
//!     DeductionComparisonWorksheet, PropertyScenario, Recommendation,
//! };
//!
//! let tables = TaxYearTables::year_2023();
//! let worksheet = DeductionComparisonWorksheet::new(&tables);
//!
//! let scenario = PropertyScenario {
//!     income: dec!(100000),
//!     filing_status: FilingStatus::Single,
//!     loan_amount: dec!(300000),
//!     interest_rate: dec!(4),
//!     property_tax: dec!(3000),
//!     home_repairs: dec!(2000),
//!     retirement_contributions: dec!(6000),
//!     other_deductions: dec!(1000),
//!     state_taxes: dec!(5000),
//!     rental: None,
//!     dependents: 0,
//! };
//!
//! let result = worksheet.calculate(&scenario).unwrap();
//!
//! assert_eq!(result.mortgage_interest, dec!(12000));
//! assert_eq!(result.itemized_deduction, dec!(23000));
//! assert_eq!(result.tax_standard, dec!(12940.50));
//! assert_eq!(result.tax_itemized, dec!(10927.50));
//! assert_eq!(result.tax_savings, dec!(2013.00));
//! assert_eq!(result.recommendation, Recommendation::Itemize);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::bracket_tax::{BracketSchedule, BracketTaxError};
use crate::calculations::common::max;
use crate::{FilingStatus, TaxYearTables};

/// Income and expenses of a rental property.
///
/// Present only when the scenario's property is rented out; home repairs then
/// count against rental income instead of the itemized deduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalProperty {
    pub rental_income: Decimal,
    pub rental_expenses: Decimal,
}

/// Input values for the deduction comparison.
///
/// Blank form fields coerce to zero before reaching this struct; there is no
/// further validation, and economically nonsensical values (negative income,
/// rates above 100%) are computed through as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyScenario {
    /// Gross annual income.
    pub income: Decimal,

    pub filing_status: FilingStatus,

    /// Outstanding mortgage principal.
    pub loan_amount: Decimal,

    /// Annual mortgage interest rate, in percent.
    pub interest_rate: Decimal,

    /// Annual property tax.
    pub property_tax: Decimal,

    /// Home repairs and improvements. Itemized for an owner-occupied
    /// property; netted against rental income for a rental.
    pub home_repairs: Decimal,

    /// 401(k) / traditional IRA contributions.
    pub retirement_contributions: Decimal,

    /// Other itemizable deductions.
    pub other_deductions: Decimal,

    /// State and local taxes, before the SALT cap.
    pub state_taxes: Decimal,

    /// Rental income and expenses, when the property is a rental.
    pub rental: Option<RentalProperty>,

    /// Number of dependents eligible for the per-dependent credit.
    pub dependents: u32,
}

/// Which deduction path yields the lower tax liability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    /// Itemizing saves money.
    Itemize,
    /// The standard deduction saves money.
    Standard,
    /// Both paths produce the same liability.
    Tie,
}

/// Result of the deduction comparison.
///
/// All values are exact decimals; display rounding is a presentation concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionComparison {
    /// Annual mortgage interest derived from the loan terms.
    pub mortgage_interest: Decimal,

    /// Standard deduction for the filing status.
    pub standard_deduction: Decimal,

    /// Sum of itemizable deductions, with state taxes capped.
    pub itemized_deduction: Decimal,

    /// Rental income net of expenses and repairs; zero without a rental.
    pub net_rental_income: Decimal,

    /// Income after retirement contributions and rental netting.
    pub adjusted_income: Decimal,

    pub taxable_income_standard: Decimal,
    pub taxable_income_itemized: Decimal,

    /// Liability under the standard deduction.
    pub tax_standard: Decimal,

    /// Liability under itemized deductions, before dependent credits.
    pub tax_itemized_before_credits: Decimal,

    /// Total dependent credits applied to the itemized path.
    pub dependent_credits: Decimal,

    /// Liability under itemized deductions after credits, floored at zero.
    pub tax_itemized: Decimal,

    /// Signed savings from itemizing: `tax_standard - tax_itemized`.
    pub tax_savings: Decimal,

    pub recommendation: Recommendation,
}

/// Calculator for the deduction comparison worksheet.
///
/// Borrows the year's reference tables; each call to [`calculate`] is a pure
/// function of the scenario with no state carried between calls.
///
/// [`calculate`]: DeductionComparisonWorksheet::calculate
#[derive(Debug, Clone)]
pub struct DeductionComparisonWorksheet<'a> {
    tables: &'a TaxYearTables,
}

impl<'a> DeductionComparisonWorksheet<'a> {
    pub fn new(tables: &'a TaxYearTables) -> Self {
        Self { tables }
    }

    /// Computes both deduction paths for the scenario.
    ///
    /// # Errors
    ///
    /// Returns [`BracketTaxError`] if the tables hold no brackets for the
    /// scenario's filing status, or the schedule has a gap.
    pub fn calculate(
        &self,
        scenario: &PropertyScenario,
    ) -> Result<DeductionComparison, BracketTaxError> {
        let schedule = BracketSchedule::new(self.tables.brackets(scenario.filing_status));

        // Line 1: mortgage interest from the loan terms
        let mortgage_interest = self.mortgage_interest(scenario.loan_amount, scenario.interest_rate);

        // Line 2: standard deduction for the filing status
        let standard_deduction = self.tables.standard_deduction(scenario.filing_status);

        // Line 3: rental netting (repairs count against the rental here)
        let net_rental_income = self.net_rental_income(scenario);

        // Line 4: itemized deduction
        let itemized_deduction = self.itemized_deduction(scenario, mortgage_interest);

        // Line 5: adjusted income
        let adjusted_income = self.adjusted_income(scenario, net_rental_income);

        // Line 6: taxable income under each path
        let taxable_income_standard = self.taxable_income(adjusted_income, standard_deduction);
        let taxable_income_itemized = self.taxable_income(adjusted_income, itemized_deduction);

        // Line 7: liability under each path
        let tax_standard = schedule.tax_for(taxable_income_standard)?;
        let tax_itemized_before_credits = schedule.tax_for(taxable_income_itemized)?;

        // Lines 8-9: dependent credits offset the itemized liability
        let dependent_credits = self.dependent_credits(scenario.dependents);
        let tax_itemized = max(tax_itemized_before_credits - dependent_credits, Decimal::ZERO);

        // Line 10: signed savings from itemizing
        let tax_savings = tax_standard - tax_itemized;
        let recommendation = self.recommendation(tax_savings);

        Ok(DeductionComparison {
            mortgage_interest,
            standard_deduction,
            itemized_deduction,
            net_rental_income,
            adjusted_income,
            taxable_income_standard,
            taxable_income_itemized,
            tax_standard,
            tax_itemized_before_credits,
            dependent_credits,
            tax_itemized,
            tax_savings,
            recommendation,
        })
    }

    /// Annual mortgage interest: loan amount × rate / 100.
    fn mortgage_interest(
        &self,
        loan_amount: Decimal,
        interest_rate: Decimal,
    ) -> Decimal {
        loan_amount * interest_rate / Decimal::ONE_HUNDRED
    }

    /// Rental income net of expenses and home repairs; zero without a rental.
    fn net_rental_income(
        &self,
        scenario: &PropertyScenario,
    ) -> Decimal {
        let Some(rental) = &scenario.rental else {
            return Decimal::ZERO;
        };

        let net = rental.rental_income - rental.rental_expenses - scenario.home_repairs;
        if net < Decimal::ZERO {
            warn!(
                rental_income = %rental.rental_income,
                rental_expenses = %rental.rental_expenses,
                home_repairs = %scenario.home_repairs,
                net = %net,
                "rental property operates at a loss"
            );
        }
        net
    }

    /// Itemized deduction: mortgage interest + property tax + capped SALT
    /// + other deductions, plus home repairs for an owner-occupied property.
    fn itemized_deduction(
        &self,
        scenario: &PropertyScenario,
        mortgage_interest: Decimal,
    ) -> Decimal {
        let capped_salt = scenario.state_taxes.min(self.tables.salt_cap);
        let mut total =
            mortgage_interest + scenario.property_tax + capped_salt + scenario.other_deductions;
        if scenario.rental.is_none() {
            total += scenario.home_repairs;
        }
        total
    }

    /// Adjusted income: income − retirement contributions + net rental income.
    fn adjusted_income(
        &self,
        scenario: &PropertyScenario,
        net_rental_income: Decimal,
    ) -> Decimal {
        scenario.income - scenario.retirement_contributions + net_rental_income
    }

    /// Taxable income after a deduction, floored at zero.
    fn taxable_income(
        &self,
        adjusted_income: Decimal,
        deduction: Decimal,
    ) -> Decimal {
        max(adjusted_income - deduction, Decimal::ZERO)
    }

    /// Total dependent credits.
    fn dependent_credits(
        &self,
        dependents: u32,
    ) -> Decimal {
        Decimal::from(dependents) * self.tables.dependent_credit
    }

    fn recommendation(
        &self,
        tax_savings: Decimal,
    ) -> Recommendation {
        if tax_savings > Decimal::ZERO {
            Recommendation::Itemize
        } else if tax_savings < Decimal::ZERO {
            Recommendation::Standard
        } else {
            Recommendation::Tie
        }
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{FilingStatus, TaxBracket};

/// Reference data for one tax year: bracket schedules and standard
/// deductions per filing status, the SALT deduction cap, and the
/// per-dependent credit amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearTables {
    pub tax_year: i32,
    pub single_brackets: Vec<TaxBracket>,
    pub married_brackets: Vec<TaxBracket>,
    pub single_standard_deduction: Decimal,
    pub married_standard_deduction: Decimal,
    pub salt_cap: Decimal,
    pub dependent_credit: Decimal,
}

fn bracket(
    min_income: Decimal,
    max_income: Option<Decimal>,
    tax_rate: Decimal,
    base_tax: Decimal,
) -> TaxBracket {
    TaxBracket {
        min_income,
        max_income,
        tax_rate,
        base_tax,
    }
}

impl TaxYearTables {
    /// 2023 federal tables (simplified: Single and Married Filing Jointly).
    pub fn year_2023() -> Self {
        let d = |dollars: i64| Decimal::new(dollars, 0);
        let c = |cents: i64| Decimal::new(cents, 2);
        let pct = |hundredths: i64| Decimal::new(hundredths, 2);

        let single_brackets = vec![
            bracket(d(0), Some(d(11000)), pct(10), d(0)),
            bracket(d(11000), Some(d(44725)), pct(12), d(1100)),
            bracket(d(44725), Some(d(95375)), pct(22), d(5147)),
            bracket(d(95375), Some(d(182100)), pct(24), d(16290)),
            bracket(d(182100), Some(d(231250)), pct(32), d(37104)),
            bracket(d(231250), Some(d(578125)), pct(35), d(52832)),
            bracket(d(578125), None, pct(37), c(17423825)),
        ];

        let married_brackets = vec![
            bracket(d(0), Some(d(22000)), pct(10), d(0)),
            bracket(d(22000), Some(d(89450)), pct(12), d(2200)),
            bracket(d(89450), Some(d(190750)), pct(22), d(10294)),
            bracket(d(190750), Some(d(364200)), pct(24), d(32580)),
            bracket(d(364200), Some(d(462500)), pct(32), d(74208)),
            bracket(d(462500), Some(d(693750)), pct(35), d(105664)),
            bracket(d(693750), None, pct(37), c(18660150)),
        ];

        Self {
            tax_year: 2023,
            single_brackets,
            married_brackets,
            single_standard_deduction: d(13850),
            married_standard_deduction: d(27700),
            salt_cap: d(10000),
            dependent_credit: d(2000),
        }
    }

    pub fn brackets(
        &self,
        status: FilingStatus,
    ) -> &[TaxBracket] {
        match status {
            FilingStatus::Single => &self.single_brackets,
            FilingStatus::MarriedFilingJointly => &self.married_brackets,
        }
    }

    pub fn standard_deduction(
        &self,
        status: FilingStatus,
    ) -> Decimal {
        match status {
            FilingStatus::Single => self.single_standard_deduction,
            FilingStatus::MarriedFilingJointly => self.married_standard_deduction,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn year_2023_standard_deductions() {
        let tables = TaxYearTables::year_2023();

        assert_eq!(
            tables.standard_deduction(FilingStatus::Single),
            dec!(13850)
        );
        assert_eq!(
            tables.standard_deduction(FilingStatus::MarriedFilingJointly),
            dec!(27700)
        );
    }

    #[test]
    fn year_2023_salt_cap_and_dependent_credit() {
        let tables = TaxYearTables::year_2023();

        assert_eq!(tables.salt_cap, dec!(10000));
        assert_eq!(tables.dependent_credit, dec!(2000));
    }

    #[test]
    fn year_2023_has_seven_brackets_per_status() {
        let tables = TaxYearTables::year_2023();

        assert_eq!(tables.brackets(FilingStatus::Single).len(), 7);
        assert_eq!(tables.brackets(FilingStatus::MarriedFilingJointly).len(), 7);
    }

    #[test]
    fn year_2023_top_brackets_are_unbounded() {
        let tables = TaxYearTables::year_2023();

        let single_top = tables.brackets(FilingStatus::Single).last().unwrap();
        assert_eq!(single_top.max_income, None);
        assert_eq!(single_top.base_tax, dec!(174238.25));

        let married_top = tables
            .brackets(FilingStatus::MarriedFilingJointly)
            .last()
            .unwrap();
        assert_eq!(married_top.max_income, None);
        assert_eq!(married_top.base_tax, dec!(186601.50));
    }

    #[test]
    fn year_2023_brackets_are_contiguous() {
        let tables = TaxYearTables::year_2023();

        for status in [FilingStatus::Single, FilingStatus::MarriedFilingJointly] {
            for pair in tables.brackets(status).windows(2) {
                assert_eq!(
                    pair[0].max_income,
                    Some(pair[1].min_income),
                    "gap between brackets for {}",
                    status.as_str()
                );
            }
        }
    }
}

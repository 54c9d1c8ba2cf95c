//! Plain-text rendering of a deduction comparison.

use proptax_core::calculations::{DeductionComparison, PropertyScenario, Recommendation};

use crate::utils::format_currency;

fn recommendation_sentence(recommendation: Recommendation) -> &'static str {
    match recommendation {
        Recommendation::Itemize => "You save money by itemizing deductions.",
        Recommendation::Standard => "You save more by taking the standard deduction.",
        Recommendation::Tie => "Both deduction paths produce the same tax liability.",
    }
}

/// Renders the results block for one scenario.
///
/// Mirrors the input scenario: the net-rental line appears only for rental
/// scenarios and the credits line only when dependents are claimed.
pub fn render(
    scenario: &PropertyScenario,
    comparison: &DeductionComparison,
) -> String {
    let mut lines = Vec::new();
    let money = |label: &str, value| format!("{label:<28}{}", format_currency(value));

    lines.push(format!(
        "{:<28}{}",
        "Filing status:",
        scenario.filing_status.as_str()
    ));
    lines.push(money("Annual mortgage interest:", comparison.mortgage_interest));
    lines.push(money("Standard deduction:", comparison.standard_deduction));
    lines.push(money("Itemized deduction:", comparison.itemized_deduction));
    if scenario.rental.is_some() {
        lines.push(money("Net rental income:", comparison.net_rental_income));
    }
    lines.push(money("Adjusted income:", comparison.adjusted_income));
    lines.push(money(
        "Taxable income (standard):",
        comparison.taxable_income_standard,
    ));
    lines.push(money(
        "Taxable income (itemized):",
        comparison.taxable_income_itemized,
    ));
    lines.push(money("Tax liability (standard):", comparison.tax_standard));
    lines.push(money("Tax liability (itemized):", comparison.tax_itemized));
    if scenario.dependents > 0 {
        lines.push(money("Dependent credits:", comparison.dependent_credits));
    }
    lines.push(money("Tax savings:", comparison.tax_savings));
    lines.push(recommendation_sentence(comparison.recommendation).to_string());

    lines.join("\n")
}

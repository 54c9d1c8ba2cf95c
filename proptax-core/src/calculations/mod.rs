//! Tax calculation modules.
//!
//! `bracket_tax` implements the progressive bracket schedule shared by both
//! deduction paths; `comparison` is the standard-vs-itemized worksheet that
//! drives the estimator.

pub mod bracket_tax;
pub mod common;
pub mod comparison;

pub use bracket_tax::{BracketSchedule, BracketTaxError};
pub use comparison::{
    DeductionComparison, DeductionComparisonWorksheet, PropertyScenario, Recommendation,
    RentalProperty,
};

mod filing_status;
mod tax_bracket;
mod year_tables;

pub use filing_status::FilingStatus;
pub use tax_bracket::TaxBracket;
pub use year_tables::TaxYearTables;

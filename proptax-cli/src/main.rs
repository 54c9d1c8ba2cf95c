use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use proptax_cli::{bracket_loader, csv_loader, report, utils};
use proptax_core::calculations::{DeductionComparisonWorksheet, PropertyScenario, RentalProperty};
use proptax_core::{FilingStatus, TaxYearTables};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Estimate federal income tax under the standard and itemized deduction
/// paths and report which one saves money.
///
/// Provide a single scenario through the flags, or a batch of scenarios
/// through `--scenarios`. Blank amounts mean zero; amounts may use commas as
/// thousands separators.
#[derive(Debug, Parser)]
#[command(name = "proptax")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Gross annual income
    #[arg(long, default_value = "0", value_parser = parse_money)]
    income: Decimal,

    /// Filing status: single or married
    #[arg(long, default_value = "single", value_parser = parse_status)]
    filing_status: FilingStatus,

    /// Outstanding mortgage principal
    #[arg(long, default_value = "0", value_parser = parse_money)]
    loan_amount: Decimal,

    /// Annual mortgage interest rate, in percent
    #[arg(long, default_value = "0", value_parser = parse_money)]
    interest_rate: Decimal,

    /// Annual property tax
    #[arg(long, default_value = "0", value_parser = parse_money)]
    property_tax: Decimal,

    /// Home repairs and improvements
    #[arg(long, default_value = "0", value_parser = parse_money)]
    home_repairs: Decimal,

    /// 401(k) / traditional IRA contributions
    #[arg(long, default_value = "0", value_parser = parse_money)]
    retirement_contributions: Decimal,

    /// Other itemizable deductions
    #[arg(long, default_value = "0", value_parser = parse_money)]
    other_deductions: Decimal,

    /// State and local taxes, before the SALT cap
    #[arg(long, default_value = "0", value_parser = parse_money)]
    state_taxes: Decimal,

    /// Treat the property as a rental
    #[arg(long, default_value_t = false)]
    rental: bool,

    /// Annual rental income (with --rental)
    #[arg(long, default_value = "0", value_parser = parse_money)]
    rental_income: Decimal,

    /// Annual rental expenses (with --rental)
    #[arg(long, default_value = "0", value_parser = parse_money)]
    rental_expenses: Decimal,

    /// Number of dependents
    #[arg(long, default_value_t = 0)]
    dependents: u32,

    /// Read scenarios from a CSV file instead of the scenario flags
    #[arg(long)]
    scenarios: Option<PathBuf>,

    /// Replace the built-in bracket tables from a CSV file
    #[arg(long)]
    brackets: Option<PathBuf>,
}

impl Cli {
    fn scenario(&self) -> PropertyScenario {
        let rental = self.rental.then(|| RentalProperty {
            rental_income: self.rental_income,
            rental_expenses: self.rental_expenses,
        });

        PropertyScenario {
            income: self.income,
            filing_status: self.filing_status,
            loan_amount: self.loan_amount,
            interest_rate: self.interest_rate,
            property_tax: self.property_tax,
            home_repairs: self.home_repairs,
            retirement_contributions: self.retirement_contributions,
            other_deductions: self.other_deductions,
            state_taxes: self.state_taxes,
            rental,
            dependents: self.dependents,
        }
    }
}

fn parse_money(s: &str) -> Result<Decimal, String> {
    utils::parse_decimal(s).map_err(|e| e.to_string())
}

fn parse_status(s: &str) -> Result<FilingStatus, String> {
    FilingStatus::parse(s).ok_or_else(|| format!("expected 'single' or 'married', got '{s}'"))
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let mut tables = TaxYearTables::year_2023();
    if let Some(path) = &cli.brackets {
        let file =
            File::open(path).with_context(|| format!("cannot open '{}'", path.display()))?;
        let records = bracket_loader::parse(file)
            .with_context(|| format!("invalid bracket file '{}'", path.display()))?;
        let replaced = bracket_loader::apply(&records, &mut tables)
            .with_context(|| format!("cannot apply bracket file '{}'", path.display()))?;
        info!(
            "replaced {} bracket schedule(s) from {}",
            replaced,
            path.display()
        );
    }

    let scenarios = match &cli.scenarios {
        Some(path) => csv_loader::load_from_file(path)?,
        None => vec![cli.scenario()],
    };
    debug!(count = scenarios.len(), "calculating scenarios");

    let worksheet = DeductionComparisonWorksheet::new(&tables);
    for (idx, scenario) in scenarios.iter().enumerate() {
        let comparison = worksheet
            .calculate(scenario)
            .with_context(|| format!("scenario {} failed to calculate", idx + 1))?;

        if scenarios.len() > 1 {
            println!("── scenario {} ──", idx + 1);
        }
        println!("{}", report::render(scenario, &comparison));
        if scenarios.len() > 1 {
            println!();
        }
    }

    Ok(())
}

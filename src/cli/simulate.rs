use std::{io, path::PathBuf};

use clap::Parser;
use comfy_table::Color;

use crate::{
    cli::{
        battery::{BatteryArgs, TaxArgs},
        prices::PricesArgs,
    },
    core::{scheduler::DifferentialBasis, simulation::Simulation},
    prelude::*,
    report::Report,
    tables::{build_activity_table, build_monthly_table, build_summary_table},
};

#[derive(Parser)]
pub struct SimulateArgs {
    /// Calendar year to simulate.
    #[clap(long, env = "YEAR")]
    pub year: i32,

    /// What the sale prices get compared against in the price differential series.
    #[clap(long, value_enum, default_value_t, env = "PRICE_DIFFERENTIAL")]
    pub price_differential: DifferentialBasis,

    /// Print the JSON report instead of the tables.
    #[clap(long)]
    pub json: bool,

    /// Also save the JSON report to the file.
    #[clap(long)]
    pub output: Option<PathBuf>,

    #[clap(flatten)]
    pub prices: PricesArgs,

    #[clap(flatten)]
    pub battery: BatteryArgs,

    #[clap(flatten)]
    pub tax: TaxArgs,
}

#[instrument(skip_all, fields(year = args.year))]
pub fn simulate(args: &SimulateArgs) -> Result {
    let battery = args.battery.parameters()?;
    let tax = args.tax.tax()?;
    let prices = args.prices.load()?;

    let result = Simulation::builder()
        .prices(&prices)
        .year(args.year)
        .battery(&battery)
        .maybe_tax(tax)
        .differential_basis(args.price_differential)
        .initial_residual_energy(args.battery.initial_residual_energy)
        .run();
    if result.days.is_empty() {
        warn!("no prices for the year");
    }

    let report = Report::from(&result);
    if let Some(path) = &args.output {
        report.save(path)?;
    }
    if args.json {
        report.write_to(io::stdout().lock())?;
        println!();
    } else {
        println!("{}", build_monthly_table(&result));
        if !result.charges.is_empty() {
            println!("Charges:\n{}", build_activity_table(&result.charges, Color::Green));
        }
        if !result.discharges.is_empty() {
            println!("Discharges:\n{}", build_activity_table(&result.discharges, Color::Blue));
        }
        println!("{}", build_summary_table(&result));
    }
    Ok(())
}

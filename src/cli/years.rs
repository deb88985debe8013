use clap::Parser;

use crate::{cli::prices::PricesArgs, prelude::*, statistics, tables::build_years_table};

#[derive(Parser)]
pub struct YearsArgs {
    #[clap(flatten)]
    pub prices: PricesArgs,
}

#[instrument(skip_all)]
pub fn years(args: &YearsArgs) -> Result {
    let prices = args.prices.load()?;
    let statistics = statistics::by_year(&prices);
    ensure!(!statistics.is_empty(), "the price dataset is empty");
    println!("{}", build_years_table(&statistics));
    Ok(())
}

pub mod battery;
pub mod prices;
pub mod simulate;
pub mod years;

use clap::{Parser, Subcommand};

use crate::cli::{simulate::SimulateArgs, years::YearsArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Backtest the greedy daily schedule over one year of historical prices.
    #[clap(name = "simulate")]
    Simulate(Box<SimulateArgs>),

    /// List the years covered by the price dataset.
    #[clap(name = "years")]
    Years(YearsArgs),
}

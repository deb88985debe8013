use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::Parser;

use crate::{
    core::series::Series,
    prelude::*,
    prices::Format,
    quantity::rate::KilowattHourRate,
};

#[must_use]
#[derive(Parser)]
pub struct PricesArgs {
    /// Historical price dataset in CSV.
    #[clap(long = "prices", default_value = "data/energieprijzen.csv", env = "PRICES_PATH")]
    pub path: PathBuf,

    #[clap(long, default_value = "datumtijd", env = "PRICES_TIMESTAMP_COLUMN")]
    pub timestamp_column: String,

    #[clap(long, default_value = "Inkoop prijs per kWh", env = "PRICES_PRICE_COLUMN")]
    pub price_column: String,

    #[clap(long = "prices-delimiter", default_value = ",", env = "PRICES_DELIMITER")]
    pub delimiter: char,
}

impl PricesArgs {
    pub fn format(&self) -> Result<Format<'_>> {
        let delimiter = u8::try_from(self.delimiter)
            .with_context(|| format!("`{}` is not a single-byte delimiter", self.delimiter))?;
        Ok(Format {
            delimiter,
            timestamp_column: &self.timestamp_column,
            price_column: &self.price_column,
        })
    }

    pub fn load(&self) -> Result<Series<NaiveDateTime, KilowattHourRate>> {
        self.format()?
            .load(&self.path)
            .with_context(|| format!("failed to load `{}`", self.path.display()))
    }
}

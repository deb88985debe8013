//! Historical purchase price dataset.
//!
//! The dataset is a CSV file with a timestamp column and a price column. Prices may use the
//! Dutch decimal comma (`0,2345`).

use std::{fs::File, io, path::Path};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::{
    core::series::{PriceObservation, Series},
    prelude::*,
    quantity::rate::KilowattHourRate,
};

const TIMESTAMP_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
];

#[derive(Debug, thiserror::Error)]
pub enum DataFormatError {
    #[error("failed to read the price dataset")]
    Csv(#[from] csv::Error),

    #[error("column `{0}` is missing from the header")]
    MissingColumn(String),

    #[error("line {line}: `{column}` is empty")]
    MissingValue { line: u64, column: String },

    #[error("line {line}: `{value}` is not a recognized timestamp")]
    InvalidTimestamp { line: u64, value: String },

    #[error("line {line}: `{value}` is not a valid price")]
    InvalidPrice { line: u64, value: String },
}

/// CSV layout of the dataset.
#[must_use]
#[derive(Clone, Debug)]
pub struct Format<'a> {
    pub delimiter: u8,
    pub timestamp_column: &'a str,
    pub price_column: &'a str,
}

impl Default for Format<'_> {
    fn default() -> Self {
        Self {
            delimiter: b',',
            timestamp_column: "datumtijd",
            price_column: "Inkoop prijs per kWh",
        }
    }
}

impl Format<'_> {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(
        &self,
        path: &Path,
    ) -> Result<Series<NaiveDateTime, KilowattHourRate>, DataFormatError> {
        info!("loading the prices…");
        let file = File::open(path).map_err(csv::Error::from)?;
        let series = self.read_from(file)?;
        info!(n_observations = series.len(), "loaded");
        Ok(series)
    }

    /// Read the observations sorted by their timestamps.
    pub fn read_from<R: io::Read>(
        &self,
        reader: R,
    ) -> Result<Series<NaiveDateTime, KilowattHourRate>, DataFormatError> {
        self.read(self.reader_builder().from_reader(reader))
    }

    fn reader_builder(&self) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder.delimiter(self.delimiter).has_headers(true).trim(Trim::All);
        builder
    }

    fn read<R: io::Read>(
        &self,
        mut reader: csv::Reader<R>,
    ) -> Result<Series<NaiveDateTime, KilowattHourRate>, DataFormatError> {
        let headers = reader.headers()?.clone();
        let timestamp_index = Self::column_index(&headers, self.timestamp_column)?;
        let price_index = Self::column_index(&headers, self.price_column)?;

        let mut series = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, csv::Position::line);
            let timestamp = Self::field(&record, timestamp_index, self.timestamp_column, line)?;
            let price = Self::field(&record, price_index, self.price_column, line)?;
            series.push(parse_observation(timestamp, price, line)?);
        }
        series.sort_by_key(|(timestamp, _)| *timestamp);
        Ok(series)
    }

    fn column_index(headers: &StringRecord, column: &str) -> Result<usize, DataFormatError> {
        headers
            .iter()
            .position(|header| header == column)
            .ok_or_else(|| DataFormatError::MissingColumn(column.to_string()))
    }

    fn field<'r>(
        record: &'r StringRecord,
        index: usize,
        column: &str,
        line: u64,
    ) -> Result<&'r str, DataFormatError> {
        match record.get(index) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(DataFormatError::MissingValue { line, column: column.to_string() }),
        }
    }
}

fn parse_observation(
    timestamp: &str,
    price: &str,
    line: u64,
) -> Result<PriceObservation, DataFormatError> {
    let timestamp = parse_timestamp(timestamp)
        .ok_or_else(|| DataFormatError::InvalidTimestamp { line, value: timestamp.to_string() })?;
    let price = parse_price(price)
        .ok_or_else(|| DataFormatError::InvalidPrice { line, value: price.to_string() })?;
    Ok((timestamp, price))
}

/// Parse the timestamp as the local wall-clock time.
fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|time| time.naive_local()))
        .or_else(|| {
            let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
            date.and_hms_opt(0, 0, 0)
        })
}

fn parse_price(value: &str) -> Option<KilowattHourRate> {
    let rate = value.replace(',', ".").parse::<KilowattHourRate>().ok()?;
    rate.is_finite().then_some(rate)
}

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};

use crate::{core::series::PriceObservation, quantity::rate::KilowattHourRate};

/// Price dataset coverage of a single calendar year.
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct YearStatistics {
    pub n_days: usize,
    pub n_observations: usize,
    pub min_rate: KilowattHourRate,
    pub mean_rate: KilowattHourRate,
    pub max_rate: KilowattHourRate,
}

#[derive(Default)]
struct Accumulator {
    dates: BTreeSet<NaiveDate>,
    n_observations: usize,
    total: KilowattHourRate,
    min: Option<KilowattHourRate>,
    max: Option<KilowattHourRate>,
}

impl Accumulator {
    fn add(&mut self, (timestamp, rate): PriceObservation) {
        self.dates.insert(timestamp.date());
        self.n_observations += 1;
        self.total += rate;
        self.min = Some(self.min.map_or(rate, |min| min.min(rate)));
        self.max = Some(self.max.map_or(rate, |max| max.max(rate)));
    }

    #[expect(clippy::cast_precision_loss)]
    fn finish(self) -> Option<YearStatistics> {
        Some(YearStatistics {
            n_days: self.dates.len(),
            n_observations: self.n_observations,
            min_rate: self.min?,
            mean_rate: self.total / self.n_observations as f64,
            max_rate: self.max?,
        })
    }
}

/// Summarize the observations per calendar year, in the ascending order of years.
pub fn by_year(prices: &[PriceObservation]) -> BTreeMap<i32, YearStatistics> {
    let mut accumulators = BTreeMap::<i32, Accumulator>::new();
    for &observation in prices {
        accumulators.entry(observation.0.year()).or_default().add(observation);
    }
    accumulators
        .into_iter()
        .filter_map(|(year, accumulator)| Some((year, accumulator.finish()?)))
        .collect()
}

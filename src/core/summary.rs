use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::{
    core::{
        histogram::Histogram,
        scheduler::DayResult,
        series::{Point, Series},
    },
    quantity::{cost::Cost, energy::KilowattHours, rate::KilowattHourRate},
};

#[must_use]
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    derive_more::Add,
    derive_more::AddAssign,
)]
pub struct DailyTotals {
    pub profit: Cost,
    pub n_discharges: usize,
}

/// Aggregated outcome of a simulated year.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct YearResult {
    pub year: i32,
    pub total_profit: Cost,
    pub total_discharges: usize,

    /// Simulated days in the chronological order.
    pub days: Series<NaiveDate, DailyTotals>,

    pub charges: Histogram,
    pub discharges: Histogram,

    /// One sample per discharge, in the order they happened.
    pub price_differentials: Vec<KilowattHourRate>,

    /// Residual energy left after the last simulated day.
    pub final_residual_energy: KilowattHours,
}

impl YearResult {
    pub fn new(year: i32, initial_residual_energy: KilowattHours) -> Self {
        Self { year, final_residual_energy: initial_residual_energy, ..Self::default() }
    }

    /// Fold the day into the aggregates.
    pub fn push(&mut self, date: NaiveDate, day: DayResult, residual_energy: KilowattHours) {
        let totals = DailyTotals { profit: day.profit, n_discharges: day.n_discharges() };
        self.total_profit += totals.profit;
        self.total_discharges += totals.n_discharges;
        self.days.push((date, totals));
        self.charges.extend(day.charges.iter().map(|event| event.slot));
        self.discharges.extend(day.discharges.iter().map(|event| event.slot));
        self.price_differentials
            .extend(day.discharges.iter().map(|event| event.price_differential));
        self.final_residual_energy = residual_energy;
    }

    pub fn daily_profits(&self) -> impl Iterator<Item = Cost> + '_ {
        self.days.iter().map(|(_, totals)| totals.profit)
    }

    pub fn daily_discharges(&self) -> impl Iterator<Item = usize> + '_ {
        self.days.iter().map(|(_, totals)| totals.n_discharges)
    }

    /// Totals per calendar month, keyed by the month number.
    pub fn monthly(&self) -> BTreeMap<u32, DailyTotals> {
        let mut months = BTreeMap::<u32, DailyTotals>::new();
        for (date, totals) in &self.days {
            *months.entry(date.month()).or_default() += *totals;
        }
        months
    }

    /// The most and the least profitable days.
    pub fn extremes(&self) -> Option<(Point<NaiveDate, Cost>, Point<NaiveDate, Cost>)> {
        let best = self.days.iter().max_by_key(|(_, totals)| totals.profit)?;
        let worst = self.days.iter().min_by_key(|(_, totals)| totals.profit)?;
        Some(((best.0, best.1.profit), (worst.0, worst.1.profit)))
    }
}

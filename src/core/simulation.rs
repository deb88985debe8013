use std::collections::BTreeMap;

use bon::Builder;
use chrono::{Datelike, NaiveDate};

use crate::{
    core::{
        battery::BatteryParameters,
        scheduler::{DailyScheduler, DifferentialBasis},
        series::PriceObservation,
        summary::YearResult,
        tax::Tax,
    },
    prelude::*,
    quantity::energy::KilowattHours,
};

/// Year-long backtest of the greedy daily schedule.
///
/// The residual energy is carried over from one day to the next, so the days are simulated in the
/// chronological order.
#[derive(Builder)]
#[builder(finish_fn(vis = ""))]
pub struct Simulation<'a> {
    prices: &'a [PriceObservation],
    year: i32,
    battery: &'a BatteryParameters,
    tax: Option<Tax>,

    #[builder(default)]
    differential_basis: DifferentialBasis,

    #[builder(default)]
    initial_residual_energy: KilowattHours,
}

impl<S: simulation_builder::IsComplete> SimulationBuilder<'_, S> {
    pub fn run(self) -> YearResult {
        self.build().run()
    }
}

impl Simulation<'_> {
    #[instrument(skip_all, name = "simulating…", fields(year = self.year))]
    fn run(self) -> YearResult {
        let scheduler = DailyScheduler {
            battery: self.battery,
            tax: self.tax,
            differential_basis: self.differential_basis,
        };
        let days = self.days();
        info!(n_days = days.len(), "grouped the prices");

        let mut residual_energy = self.initial_residual_energy;
        let mut result = YearResult::new(self.year, residual_energy);
        for (date, observations) in days {
            let (day, next_residual_energy) = scheduler.schedule(&observations, residual_energy);
            debug!(
                %date,
                profit = ?day.profit,
                n_charges = day.charges.len(),
                n_discharges = day.n_discharges(),
                residual_energy = ?next_residual_energy,
            );
            residual_energy = next_residual_energy;
            result.push(date, day, residual_energy);
        }

        info!(
            total_profit = %result.total_profit,
            n_charges = result.charges.total(),
            total_discharges = result.total_discharges,
            "done"
        );
        result
    }

    /// Observations of the target year grouped by date, preserving their order within a day.
    fn days(&self) -> BTreeMap<NaiveDate, Vec<PriceObservation>> {
        let mut days = BTreeMap::<NaiveDate, Vec<PriceObservation>>::new();
        for &(timestamp, rate) in self.prices {
            if timestamp.year() == self.year {
                days.entry(timestamp.date()).or_default().push((timestamp, rate));
            }
        }
        days
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{NaiveDateTime, Weekday};
    use itertools::Itertools;

    use super::*;
    use crate::{
        core::{battery::tests::parameters, time_slot::TimeSlot},
        quantity::{cost::Cost, rate::KilowattHourRate},
    };

    fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    /// Two hourly prices per day from 2022-12-30 to 2024-01-02, listed in reverse.
    fn prices() -> Vec<PriceObservation> {
        let mut prices = Vec::new();
        let mut date = NaiveDate::from_ymd_opt(2022, 12, 30).unwrap();
        let mut index = 0_u32;
        while date <= NaiveDate::from_ymd_opt(2024, 1, 2).unwrap() {
            let cheap = f64::from(index % 7) / 100.0;
            let expensive = 0.2 + f64::from(index % 5) / 10.0;
            prices.push((date.and_hms_opt(3, 0, 0).unwrap(), KilowattHourRate::from(cheap)));
            prices.push((date.and_hms_opt(18, 0, 0).unwrap(), KilowattHourRate::from(expensive)));
            date = date.succ_opt().unwrap();
            index += 1;
        }
        prices.reverse();
        prices
    }

    #[test]
    fn test_empty_year() {
        let battery = parameters();
        let prices = prices();
        let result = Simulation::builder().prices(&prices).year(2019).battery(&battery).run();
        assert_eq!(result, YearResult::new(2019, KilowattHours::ZERO));
        assert_eq!(result.total_profit, Cost::ZERO);
        assert!(result.days.is_empty());
        assert!(result.charges.is_empty());
    }

    #[test]
    fn test_single_day_scenario() {
        let battery = parameters();
        let prices = vec![
            (at(2021, 6, 1, 10), KilowattHourRate::from(0.30)),
            (at(2021, 6, 1, 2), KilowattHourRate::from(0.10)),
        ];
        let result = Simulation::builder().prices(&prices).year(2021).battery(&battery).run();
        assert_eq!(result.days.len(), 1);
        assert_eq!(result.total_discharges, 2);
        assert_abs_diff_eq!(result.total_profit.0.0, -0.156, epsilon = 1e-9);
        assert_eq!(result.price_differentials, [KilowattHourRate::ZERO; 2]);
        assert_eq!(result.charges.get(TimeSlot::new(Weekday::Tue, 2)), 1);
        assert_eq!(result.discharges.get(TimeSlot::new(Weekday::Tue, 10)), 1);
    }

    #[test]
    fn test_filters_year_and_orders_days() {
        let battery = parameters();
        let prices = prices();
        let result = Simulation::builder().prices(&prices).year(2023).battery(&battery).run();

        assert_eq!(result.days.len(), 365);
        assert_eq!(result.days[0].0, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(result.days[364].0, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert!(result.days.iter().tuple_windows().all(|(lhs, rhs)| lhs.0 < rhs.0));
    }

    #[test]
    fn test_totals_match_daily_series() {
        let battery = BatteryParameters { max_discharges_per_day: 1, ..parameters() };
        let prices = prices();
        let result = Simulation::builder()
            .prices(&prices)
            .year(2023)
            .battery(&battery)
            .tax(Tax::default())
            .run();

        assert_eq!(result.total_profit, result.daily_profits().sum::<Cost>());
        assert_eq!(result.total_discharges, result.daily_discharges().sum::<usize>());
        assert!(result.daily_discharges().all(|n| n <= 1));
        assert_eq!(result.discharges.total(), result.total_discharges);
        assert_eq!(result.price_differentials.len(), result.total_discharges);
    }

    #[test]
    fn test_residual_energy_is_carried_over() {
        let battery = parameters();
        let prices = vec![
            (at(2021, 6, 1, 2), KilowattHourRate::from(0.10)),
            (at(2021, 6, 1, 10), KilowattHourRate::from(0.30)),
            (at(2021, 6, 2, 10), KilowattHourRate::from(0.50)),
        ];
        let result = Simulation::builder().prices(&prices).year(2021).battery(&battery).run();

        // The first day leaves 4.18 − 2 × 1.789… kWh, the second day charges another 2.09 kWh
        // at 0.50 and then sells 1.789… kWh at the same price.
        let carried_over = 4.18 - 2.0 * 1.7 / 0.95;
        let charged = 2.09;
        let second_day = -charged * 0.50 + 1.7 * 0.50;
        assert_abs_diff_eq!(result.days[1].1.profit.0.0, second_day, epsilon = 1e-9);
        assert_abs_diff_eq!(
            result.final_residual_energy.0.0,
            carried_over + charged - 1.7 / 0.95,
            epsilon = 1e-9,
        );
    }

    #[test]
    fn test_initial_residual_energy() {
        let battery = parameters();
        let prices = vec![(at(2021, 6, 1, 10), KilowattHourRate::from(0.30))];
        let result = Simulation::builder()
            .prices(&prices)
            .year(2021)
            .battery(&battery)
            .initial_residual_energy(battery.capacity)
            .run();
        // Full battery: no charging, one sale.
        assert!(result.charges.is_empty());
        assert_abs_diff_eq!(result.total_profit.0.0, 1.7 * 0.30, epsilon = 1e-9);
    }

    #[test]
    fn test_idempotent() {
        let battery = parameters();
        let prices = prices();
        let run = || {
            Simulation::builder()
                .prices(&prices)
                .year(2023)
                .battery(&battery)
                .differential_basis(DifferentialBasis::CheapestCharge)
                .run()
        };
        assert_eq!(run(), run());
    }
}

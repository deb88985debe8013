use std::cmp::Reverse;

use itertools::Itertools;

use crate::{
    core::{battery::BatteryParameters, series::PriceObservation, tax::Tax, time_slot::TimeSlot},
    quantity::{cost::Cost, energy::KilowattHours, rate::KilowattHourRate},
};

/// What a sale price gets compared against in the price differential series.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum DifferentialBasis {
    /// The sale price minus itself, which is always zero. This is the historical definition.
    #[default]
    SameSlot,

    /// The sale price minus the cheapest price the battery was charged at on the same day.
    CheapestCharge,
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChargeEvent {
    pub slot: TimeSlot,
    pub rate: KilowattHourRate,

    /// Energy added to the storage.
    pub amount: KilowattHours,
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DischargeEvent {
    pub slot: TimeSlot,
    pub rate: KilowattHourRate,

    /// Energy drawn from the storage.
    pub amount: KilowattHours,

    pub price_differential: KilowattHourRate,
}

/// Outcome of a single simulated day.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DayResult {
    pub profit: Cost,
    pub charges: Vec<ChargeEvent>,
    pub discharges: Vec<DischargeEvent>,
}

impl DayResult {
    pub fn n_discharges(&self) -> usize {
        self.discharges.len()
    }
}

/// Greedy single-day scheduler: buy at the cheapest slots, then sell at the most expensive ones.
///
/// Each price observation is one discrete opportunity: it can be used at most once per pass,
/// with the rated power applied for one hour regardless of the actual slot duration.
#[must_use]
#[derive(Copy, Clone)]
pub struct DailyScheduler<'a> {
    pub battery: &'a BatteryParameters,
    pub tax: Option<Tax>,
    pub differential_basis: DifferentialBasis,
}

impl DailyScheduler<'_> {
    /// Schedule the day and return its result together with the outgoing residual energy.
    ///
    /// The observations must belong to one calendar date. Their order only matters for equal
    /// prices.
    pub fn schedule(
        &self,
        observations: &[PriceObservation],
        mut residual_energy: KilowattHours,
    ) -> (DayResult, KilowattHours) {
        let mut result = DayResult::default();
        let slots = self.effective_rates(observations);

        // Charging, the cheapest slots go first:
        let charge_step = self.battery.charge_step();
        for &(slot, rate) in slots.iter().sorted_by_key(|(_, rate)| *rate) {
            if residual_energy >= self.battery.capacity {
                break;
            }
            let headroom = self.battery.capacity - residual_energy;
            let amount = charge_step.min(headroom);
            residual_energy = if amount == headroom {
                self.battery.capacity
            } else {
                (residual_energy + amount).min(self.battery.capacity)
            };
            result.profit -= amount * rate;
            result.charges.push(ChargeEvent { slot, rate, amount });
        }
        let cheapest_charge = result.charges.first().map(|event| event.rate);

        // Discharging, the most expensive slots go first:
        let discharge_step = self.battery.discharge_step();
        for &(slot, rate) in slots.iter().sorted_by_key(|(_, rate)| Reverse(*rate)) {
            if result.n_discharges() >= self.battery.max_discharges_per_day
                || residual_energy <= KilowattHours::ZERO
            {
                break;
            }
            let amount = discharge_step.min(residual_energy);
            residual_energy = if amount == residual_energy {
                KilowattHours::ZERO
            } else {
                residual_energy - amount
            };
            // Only the efficiency-scaled part of the drawn energy is actually sold:
            result.profit += amount * rate * self.battery.discharging_efficiency;
            result.discharges.push(DischargeEvent {
                slot,
                rate,
                amount,
                price_differential: self.price_differential(rate, cheapest_charge),
            });
        }

        (result, residual_energy)
    }

    /// Apply the tax, if any, into a fresh per-day view.
    fn effective_rates(
        &self,
        observations: &[PriceObservation],
    ) -> Vec<(TimeSlot, KilowattHourRate)> {
        observations
            .iter()
            .map(|&(timestamp, rate)| {
                (TimeSlot::from(timestamp), self.tax.map_or(rate, |tax| tax.apply(rate)))
            })
            .collect()
    }

    fn price_differential(
        &self,
        sale_rate: KilowattHourRate,
        cheapest_charge: Option<KilowattHourRate>,
    ) -> KilowattHourRate {
        match self.differential_basis {
            DifferentialBasis::SameSlot => sale_rate - sale_rate,
            DifferentialBasis::CheapestCharge => cheapest_charge
                .map_or(KilowattHourRate::ZERO, |charge_rate| sale_rate - charge_rate),
        }
    }
}

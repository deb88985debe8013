//! Battery and tax CLI arguments.

use clap::Parser;

use crate::{
    core::{
        battery::{BatteryParameters, ConfigurationError},
        tax::Tax,
    },
    quantity::{energy::KilowattHours, power::Kilowatts, rate::KilowattHourRate},
};

#[must_use]
#[derive(Copy, Clone, Parser)]
pub struct BatteryArgs {
    /// Charging power in kilowatts.
    #[clap(
        long = "charging-power-kilowatts",
        default_value = "2.2",
        env = "CHARGING_POWER_KILOWATTS"
    )]
    pub charging_power: Kilowatts,

    /// Discharging power in kilowatts.
    #[clap(
        long = "discharging-power-kilowatts",
        default_value = "1.7",
        env = "DISCHARGING_POWER_KILOWATTS"
    )]
    pub discharging_power: Kilowatts,

    /// Usable battery capacity in kilowatt-hours.
    #[clap(long = "battery-capacity-kwh", default_value = "5", env = "BATTERY_CAPACITY_KWH")]
    pub capacity: KilowattHours,

    #[clap(long, default_value = "95", env = "CHARGING_EFFICIENCY_PERCENT")]
    pub charging_efficiency_percent: f64,

    #[clap(long, default_value = "95", env = "DISCHARGING_EFFICIENCY_PERCENT")]
    pub discharging_efficiency_percent: f64,

    #[clap(long, default_value = "5", env = "MAX_DISCHARGES_PER_DAY")]
    pub max_discharges_per_day: usize,

    /// Residual energy at the start of the year.
    #[clap(
        long = "initial-residual-energy-kwh",
        default_value = "0",
        env = "INITIAL_RESIDUAL_ENERGY_KWH"
    )]
    pub initial_residual_energy: KilowattHours,
}

impl BatteryArgs {
    pub fn parameters(&self) -> Result<BatteryParameters, ConfigurationError> {
        let parameters = BatteryParameters::builder()
            .charging_power(self.charging_power)
            .discharging_power(self.discharging_power)
            .capacity(self.capacity)
            .charging_efficiency(self.charging_efficiency_percent / 100.0)
            .discharging_efficiency(self.discharging_efficiency_percent / 100.0)
            .max_discharges_per_day(self.max_discharges_per_day)
            .build();
        parameters.validate()?;
        parameters.validate_residual_energy(self.initial_residual_energy)?;
        Ok(parameters)
    }
}

#[must_use]
#[derive(Copy, Clone, Parser)]
pub struct TaxArgs {
    /// Add the energy tax and VAT to the bare purchase prices.
    #[clap(long, env = "INCLUDE_TAX")]
    pub include_tax: bool,

    /// Energy tax («energiebelasting») in euros per kilowatt-hour, before VAT.
    #[clap(long = "energy-tax-per-kwh", default_value = "0.13", env = "ENERGY_TAX_PER_KWH")]
    pub energy_tax: KilowattHourRate,

    #[clap(long, default_value = "21", env = "VAT_PERCENT")]
    pub vat_percent: f64,
}

impl TaxArgs {
    pub fn tax(&self) -> Result<Option<Tax>, ConfigurationError> {
        if !self.include_tax {
            return Ok(None);
        }
        let tax = Tax::builder()
            .energy_tax(self.energy_tax)
            .vat_multiplier(1.0 + self.vat_percent / 100.0)
            .build();
        tax.validate()?;
        Ok(Some(tax))
    }
}

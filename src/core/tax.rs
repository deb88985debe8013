use ordered_float::OrderedFloat;

use crate::{
    core::battery::ConfigurationError,
    quantity::{Quantity, rate::KilowattHourRate},
};

/// Dutch energy tax («energiebelasting») on top of the bare purchase price.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, bon::Builder)]
pub struct Tax {
    /// Fixed per-kilowatt-hour addend.
    #[builder(default = Tax::DEFAULT_ENERGY_TAX)]
    pub energy_tax: KilowattHourRate,

    /// Proportional levy applied after the addend, `1.21` for 21% VAT.
    #[builder(default = Tax::DEFAULT_VAT_MULTIPLIER)]
    pub vat_multiplier: f64,
}

impl Default for Tax {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Tax {
    pub const DEFAULT_ENERGY_TAX: KilowattHourRate = Quantity(OrderedFloat(0.13));
    pub const DEFAULT_VAT_MULTIPLIER: f64 = 1.21;

    pub fn apply(self, rate: KilowattHourRate) -> KilowattHourRate {
        (rate + self.energy_tax) * self.vat_multiplier
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.energy_tax.is_finite() {
            return Err(ConfigurationError::InvalidTax {
                name: "energy tax",
                value: self.energy_tax.0.0,
            });
        }
        if !(self.vat_multiplier.is_finite() && self.vat_multiplier >= 0.0) {
            return Err(ConfigurationError::InvalidTax {
                name: "VAT multiplier",
                value: self.vat_multiplier,
            });
        }
        Ok(())
    }
}

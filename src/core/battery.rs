use crate::quantity::{energy::KilowattHours, power::Kilowatts, time::Hours};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigurationError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("{name} must be within (0, 1], got {value}")]
    EfficiencyOutOfRange { name: &'static str, value: f64 },

    #[error("initial residual energy {residual:?} is outside of [0, {capacity:?}]")]
    ResidualEnergyOutOfRange { residual: KilowattHours, capacity: KilowattHours },

    #[error("{name} must be a finite non-negative number, got {value}")]
    InvalidTax { name: &'static str, value: f64 },
}

/// Battery specification for the simulation.
#[must_use]
#[derive(Copy, Clone, Debug, bon::Builder)]
pub struct BatteryParameters {
    pub charging_power: Kilowatts,
    pub discharging_power: Kilowatts,
    pub capacity: KilowattHours,

    /// Fraction of the grid energy which ends up stored.
    pub charging_efficiency: f64,

    /// Fraction of the drawn energy which is actually delivered.
    pub discharging_efficiency: f64,

    pub max_discharges_per_day: usize,
}

impl BatteryParameters {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_positive("charging power", self.charging_power.0.0)?;
        check_positive("discharging power", self.discharging_power.0.0)?;
        check_positive("battery capacity", self.capacity.0.0)?;
        check_efficiency("charging efficiency", self.charging_efficiency)?;
        check_efficiency("discharging efficiency", self.discharging_efficiency)?;
        Ok(())
    }

    pub fn validate_residual_energy(
        &self,
        residual_energy: KilowattHours,
    ) -> Result<(), ConfigurationError> {
        if residual_energy.is_finite()
            && (KilowattHours::ZERO..=self.capacity).contains(&residual_energy)
        {
            Ok(())
        } else {
            Err(ConfigurationError::ResidualEnergyOutOfRange {
                residual: residual_energy,
                capacity: self.capacity,
            })
        }
    }

    /// Energy stored by a single charging slot.
    pub fn charge_step(&self) -> KilowattHours {
        self.charging_power * Hours::ONE * self.charging_efficiency
    }

    /// Energy drawn from the storage by a single discharging slot.
    pub fn discharge_step(&self) -> KilowattHours {
        self.discharging_power * Hours::ONE / self.discharging_efficiency
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    // Also rejects `NaN`:
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigurationError::NonPositive { name, value })
    }
}

fn check_efficiency(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigurationError::EfficiencyOutOfRange { name, value })
    }
}

#[cfg(test)]
pub mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    /// Default parameters of the web form.
    pub fn parameters() -> BatteryParameters {
        BatteryParameters::builder()
            .charging_power(Kilowatts::from(2.2))
            .discharging_power(Kilowatts::from(1.7))
            .capacity(KilowattHours::from(5.0))
            .charging_efficiency(0.95)
            .discharging_efficiency(0.95)
            .max_discharges_per_day(5)
            .build()
    }

    #[test]
    fn test_validate_ok() {
        assert_eq!(parameters().validate(), Ok(()));
    }

    #[test]
    fn test_validate_zero_capacity() {
        let parameters = BatteryParameters { capacity: KilowattHours::ZERO, ..parameters() };
        assert_eq!(
            parameters.validate(),
            Err(ConfigurationError::NonPositive { name: "battery capacity", value: 0.0 }),
        );
    }

    #[test]
    fn test_validate_negative_power() {
        let parameters =
            BatteryParameters { discharging_power: Kilowatts::from(-1.0), ..parameters() };
        assert!(matches!(
            parameters.validate(),
            Err(ConfigurationError::NonPositive { name: "discharging power", .. }),
        ));
    }

    #[test]
    fn test_validate_efficiency() {
        let parameters = BatteryParameters { charging_efficiency: 1.05, ..parameters() };
        assert!(matches!(
            parameters.validate(),
            Err(ConfigurationError::EfficiencyOutOfRange { name: "charging efficiency", .. }),
        ));
        let parameters = BatteryParameters { discharging_efficiency: 0.0, ..parameters };
        assert!(parameters.validate().is_err());
    }

    #[test]
    fn test_validate_nan() {
        let parameters =
            BatteryParameters { charging_power: Kilowatts::from(f64::NAN), ..parameters() };
        assert!(parameters.validate().is_err());
    }

    #[test]
    fn test_validate_residual_energy() {
        let parameters = parameters();
        assert!(parameters.validate_residual_energy(KilowattHours::ZERO).is_ok());
        assert!(parameters.validate_residual_energy(KilowattHours::from(5.0)).is_ok());
        assert!(parameters.validate_residual_energy(KilowattHours::from(5.1)).is_err());
        assert!(parameters.validate_residual_energy(KilowattHours::from(-0.1)).is_err());
    }

    #[test]
    fn test_steps() {
        let parameters = parameters();
        assert_abs_diff_eq!(parameters.charge_step().0.0, 2.09, epsilon = 1e-12);
        assert_abs_diff_eq!(parameters.discharge_step().0.0, 1.7 / 0.95, epsilon = 1e-12);
    }
}

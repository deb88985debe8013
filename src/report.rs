//! JSON response of the `simulate` command.

use std::{fs::File, io, io::Write, path::Path};

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    core::{histogram::Histogram, summary::YearResult},
    prelude::*,
    quantity::{cost::Cost, rate::KilowattHourRate},
};

#[must_use]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub year: i32,
    pub profit: Cost,
    pub total_discharges: usize,
    pub dates: Vec<NaiveDate>,
    pub daily_profits: Vec<Cost>,
    pub daily_discharges: Vec<usize>,
    pub charge_times: Vec<HistogramEntry>,
    pub discharge_times: Vec<HistogramEntry>,
    pub price_differences: Vec<KilowattHourRate>,
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HistogramEntry {
    /// Monday is `0`.
    pub weekday: u32,

    pub hour: u32,
    pub count: usize,
}

impl From<&YearResult> for Report {
    fn from(result: &YearResult) -> Self {
        Self {
            year: result.year,
            profit: result.total_profit,
            total_discharges: result.total_discharges,
            dates: result.days.iter().map(|(date, _)| *date).collect(),
            daily_profits: result.daily_profits().collect(),
            daily_discharges: result.daily_discharges().collect(),
            charge_times: entries(&result.charges),
            discharge_times: entries(&result.discharges),
            price_differences: result.price_differentials.clone(),
        }
    }
}

fn entries(histogram: &Histogram) -> Vec<HistogramEntry> {
    histogram
        .iter()
        .map(|(slot, count)| HistogramEntry {
            weekday: slot.weekday_index(),
            hour: slot.hour,
            count,
        })
        .collect()
}

impl Report {
    pub fn write_to(&self, writer: impl Write) -> Result {
        serde_json::to_writer_pretty(writer, self).context("failed to serialize the report")
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn save(&self, path: &Path) -> Result {
        let file = File::create(path).context("failed to create the report file")?;
        let mut writer = io::BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        info!("saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;
    use serde_json::{Value, json};

    use super::*;
    use crate::{
        core::{
            scheduler::{DayResult, DischargeEvent},
            time_slot::TimeSlot,
        },
        quantity::energy::KilowattHours,
    };

    fn result() -> YearResult {
        let mut result = YearResult::new(2023, KilowattHours::ZERO);
        let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let day = DayResult {
            profit: Cost::from(0.5),
            charges: Vec::new(),
            discharges: vec![DischargeEvent {
                slot: TimeSlot::new(Weekday::Sun, 19),
                rate: KilowattHourRate::from(0.25),
                amount: KilowattHours::from(1.0),
                price_differential: KilowattHourRate::ZERO,
            }],
        };
        result.push(date, day, KilowattHours::ZERO);
        result
    }

    #[test]
    fn test_serialize() -> Result {
        let value = serde_json::to_value(Report::from(&result()))?;
        assert_eq!(
            value,
            json!({
                "year": 2023,
                "profit": 0.5,
                "totalDischarges": 1,
                "dates": ["2023-01-01"],
                "dailyProfits": [0.5],
                "dailyDischarges": [1],
                "chargeTimes": [],
                "dischargeTimes": [{"weekday": 6, "hour": 19, "count": 1}],
                "priceDifferences": [0.0],
            }),
        );
        Ok(())
    }

    #[test]
    fn test_write_is_deterministic() -> Result {
        let mut lhs = Vec::new();
        let mut rhs = Vec::new();
        Report::from(&result()).write_to(&mut lhs)?;
        Report::from(&result()).write_to(&mut rhs)?;
        assert_eq!(lhs, rhs);
        assert!(serde_json::from_slice::<Value>(&lhs)?.is_object());
        Ok(())
    }
}

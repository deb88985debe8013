use std::collections::BTreeMap;

use chrono::{NaiveDate, Weekday};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{histogram::Histogram, summary::YearResult, time_slot::TimeSlot},
    quantity::cost::Cost,
    statistics::YearStatistics,
};

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn profit_color(profit: Cost) -> Color {
    if profit >= Cost::ONE_CENT {
        Color::Green
    } else if profit <= -Cost::ONE_CENT {
        Color::Red
    } else {
        Color::Reset
    }
}

fn profit_cell(profit: Cost) -> Cell {
    Cell::new(profit).set_alignment(CellAlignment::Right).fg(profit_color(profit))
}

pub fn build_summary_table(result: &YearResult) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Year", "Days", "Profit", "Discharges", "Best day", "Worst day", "Left"]);
    let (best, worst) = result.extremes().map_or_else(
        || (Cell::new("-"), Cell::new("-")),
        |((best_date, best_profit), (worst_date, worst_profit))| {
            (
                Cell::new(format!("{best_date} {best_profit}")).fg(profit_color(best_profit)),
                Cell::new(format!("{worst_date} {worst_profit}")).fg(profit_color(worst_profit)),
            )
        },
    );
    table.add_row(vec![
        Cell::new(result.year),
        Cell::new(result.days.len()).set_alignment(CellAlignment::Right),
        profit_cell(result.total_profit).add_attribute(Attribute::Bold),
        Cell::new(result.total_discharges).set_alignment(CellAlignment::Right),
        best,
        worst,
        Cell::new(result.final_residual_energy)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Dim),
    ]);
    table
}

pub fn build_monthly_table(result: &YearResult) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Month", "Profit", "Discharges"]);
    for (month, totals) in result.monthly() {
        let name = NaiveDate::from_ymd_opt(result.year, month, 1)
            .map_or_else(|| month.to_string(), |date| date.format("%B").to_string());
        table.add_row(vec![
            Cell::new(name),
            profit_cell(totals.profit),
            Cell::new(totals.n_discharges).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Hour-by-weekday grid of the event counts.
pub fn build_activity_table(histogram: &Histogram, color: Color) -> Table {
    let mut table = new_table();
    let mut header = vec![Cell::new("Hour").set_alignment(CellAlignment::Right)];
    header.extend(WEEKDAYS.map(|weekday| Cell::new(weekday).set_alignment(CellAlignment::Right)));
    table.set_header(header);
    for hour in 0..24 {
        let mut row = vec![Cell::new(format!("{hour:02}:00")).add_attribute(Attribute::Dim)];
        row.extend(WEEKDAYS.map(|weekday| {
            let count = histogram.get(TimeSlot::new(weekday, hour));
            let cell = Cell::new(count).set_alignment(CellAlignment::Right);
            if count == 0 { cell.add_attribute(Attribute::Dim) } else { cell.fg(color) }
        }));
        table.add_row(row);
    }
    table
}

pub fn build_years_table(statistics: &BTreeMap<i32, YearStatistics>) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Year", "Days", "Observations", "Min", "Mean", "Max"]);
    for (year, statistics) in statistics {
        table.add_row(vec![
            Cell::new(year),
            Cell::new(statistics.n_days).set_alignment(CellAlignment::Right),
            Cell::new(statistics.n_observations).set_alignment(CellAlignment::Right),
            Cell::new(statistics.min_rate).fg(Color::Green),
            Cell::new(statistics.mean_rate),
            Cell::new(statistics.max_rate).fg(Color::Red),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::energy::KilowattHours;

    #[test]
    fn test_activity_table_has_all_hours() {
        let histogram: Histogram = [TimeSlot::new(Weekday::Fri, 18)].into_iter().collect();
        let table = build_activity_table(&histogram, Color::Blue);
        assert_eq!(table.row_count(), 24);
    }

    #[test]
    fn test_summary_table_of_empty_year() {
        let table = build_summary_table(&YearResult::new(2020, KilowattHours::ZERO));
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_profit_color() {
        assert_eq!(profit_color(Cost::from(0.02)), Color::Green);
        assert_eq!(profit_color(Cost::from(-0.02)), Color::Red);
        assert_eq!(profit_color(Cost::from(0.001)), Color::Reset);
    }
}

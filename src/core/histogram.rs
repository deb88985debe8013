use std::collections::BTreeMap;

use crate::core::time_slot::TimeSlot;

/// Event counts per weekly time slot.
#[must_use]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Histogram(BTreeMap<TimeSlot, usize>);

impl Histogram {
    pub fn add(&mut self, slot: TimeSlot) {
        *self.0.entry(slot).or_default() += 1;
    }

    pub fn get(&self, slot: TimeSlot) -> usize {
        self.0.get(&slot).copied().unwrap_or_default()
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Non-zero counts in the weekly order.
    pub fn iter(&self) -> impl Iterator<Item = (TimeSlot, usize)> + '_ {
        self.0.iter().map(|(slot, count)| (*slot, *count))
    }
}

impl Extend<TimeSlot> for Histogram {
    fn extend<T: IntoIterator<Item = TimeSlot>>(&mut self, slots: T) {
        for slot in slots {
            self.add(slot);
        }
    }
}

impl FromIterator<TimeSlot> for Histogram {
    fn from_iter<T: IntoIterator<Item = TimeSlot>>(slots: T) -> Self {
        let mut histogram = Self::default();
        histogram.extend(slots);
        histogram
    }
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;
    use itertools::Itertools;

    use super::*;

    #[test]
    fn test_counts() {
        let histogram: Histogram = [
            TimeSlot::new(Weekday::Tue, 3),
            TimeSlot::new(Weekday::Mon, 3),
            TimeSlot::new(Weekday::Tue, 3),
        ]
        .into_iter()
        .collect();
        assert_eq!(histogram.get(TimeSlot::new(Weekday::Tue, 3)), 2);
        assert_eq!(histogram.get(TimeSlot::new(Weekday::Mon, 3)), 1);
        assert_eq!(histogram.get(TimeSlot::new(Weekday::Sun, 0)), 0);
        assert_eq!(histogram.total(), 3);
    }

    #[test]
    fn test_iter_is_ordered() {
        let histogram: Histogram =
            [TimeSlot::new(Weekday::Sun, 0), TimeSlot::new(Weekday::Mon, 12)].into_iter().collect();
        assert_eq!(
            histogram.iter().collect_vec(),
            vec![(TimeSlot::new(Weekday::Mon, 12), 1), (TimeSlot::new(Weekday::Sun, 0), 1)],
        );
    }
}

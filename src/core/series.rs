use chrono::NaiveDateTime;

use crate::quantity::rate::KilowattHourRate;

pub type Point<K, V> = (K, V);
pub type Series<K, V> = Vec<Point<K, V>>;

/// Single row of the price dataset: interval start and the purchase price.
pub type PriceObservation = Point<NaiveDateTime, KilowattHourRate>;

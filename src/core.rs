pub mod battery;
pub mod histogram;
pub mod scheduler;
pub mod series;
pub mod simulation;
pub mod summary;
pub mod tax;
pub mod time_slot;

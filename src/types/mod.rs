//! Shared data structures for CNC defect diagnosis
//!
//! - Static tables: [`SensorStats`], [`SensorGroup`], [`CorrelationRule`]
//! - Per-request outputs: [`AbnormalReading`], [`AbnormalReadings`], [`Diagnosis`]

mod diagnosis;
mod tables;

pub use diagnosis::*;
pub use tables::*;

//! Small numeric helpers shared by calibration and scoring.

pub mod stats;

pub use stats::*;

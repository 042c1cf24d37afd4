//! Signal Correlate statistics utilities.

pub mod stats;

pub use stats::descriptive::*;
pub use stats::rank::*;

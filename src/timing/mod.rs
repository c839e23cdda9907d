pub mod grid;
pub mod rational;

pub use grid::{calculate_sample_rates, RateError, SampleGrid, DEFAULT_CLOCK_RESOLUTION};
pub use rational::Rational;

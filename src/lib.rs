pub mod table; // EOD/LOOP sample table streaming
pub mod timing; // Exact-rational sample grids
pub mod waveform; // Pulse and sine evaluation

pub use table::{generate_table, TableError};
pub use timing::{calculate_sample_rates, RateError, Rational, SampleGrid, DEFAULT_CLOCK_RESOLUTION};
pub use waveform::{pulse_value, sine_value, WaveformConfig, WaveformKind};

use std::fmt;
use std::io::{self, Write};

use crate::timing::grid::{calculate_sample_rates, RateError, SampleGrid, DEFAULT_CLOCK_RESOLUTION};
use crate::timing::rational::Rational;
use crate::waveform::{WaveformConfig, WaveformKind};

/// Token closing every sample row
pub const ROW_TERMINATOR: &str = "EOD";
/// Token closing the table; playback wraps back to the first row
pub const TABLE_TERMINATOR: &str = "LOOP";

/// Errors that can occur while generating a table
#[derive(Debug)]
pub enum TableError {
    /// Waveform kinds and frequencies are zipped by position, so the lists
    /// must be the same length
    LengthMismatch { kinds: usize, frequencies: usize },
    /// The sampling grid could not be computed
    Rate(RateError),
    /// The output sink failed
    Io(io::Error),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::LengthMismatch { kinds, frequencies } => {
                write!(
                    f,
                    "got {} waveform kinds for {} frequencies; lists must match",
                    kinds, frequencies
                )
            }
            TableError::Rate(err) => write!(f, "sampling grid: {}", err),
            TableError::Io(err) => write!(f, "table output: {}", err),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TableError::LengthMismatch { .. } => None,
            TableError::Rate(err) => Some(err),
            TableError::Io(err) => Some(err),
        }
    }
}

impl From<RateError> for TableError {
    fn from(err: RateError) -> Self {
        TableError::Rate(err)
    }
}

impl From<io::Error> for TableError {
    fn from(err: io::Error) -> Self {
        TableError::Io(err)
    }
}

/// Stream a waveform sample table to `out`.
///
/// Computes the sampling grid for `frequencies` at `points_per_period`
/// samples per period on a microsecond timer, then writes one row per
/// sample: each `(kind, frequency)` pair evaluated at that sample's time
/// offset with default gain/tolerance/phase, formatted to one decimal place
/// and comma-terminated, with the literal `EOD` closing the row. A final
/// `LOOP` line closes the table.
///
/// Rows are written as they are produced; no buffering beyond the sink's
/// own. Returns the grid so callers can size the device buffer.
///
/// ```
/// use wavegen::{generate_table, Rational, WaveformKind};
///
/// let mut out = Vec::new();
/// let grid = generate_table(&[WaveformKind::Pulse], &[Rational::integer(1)], 2, &mut out).unwrap();
/// assert_eq!(grid.sample_count, 2);
/// assert_eq!(String::from_utf8(out).unwrap(), "1.0,EOD\n0.0,EOD\nLOOP\n");
/// ```
pub fn generate_table<W: Write>(
    kinds: &[WaveformKind],
    frequencies: &[Rational],
    points_per_period: u32,
    out: &mut W,
) -> Result<SampleGrid, TableError> {
    if kinds.len() != frequencies.len() {
        return Err(TableError::LengthMismatch {
            kinds: kinds.len(),
            frequencies: frequencies.len(),
        });
    }

    let grid = calculate_sample_rates(frequencies, points_per_period, DEFAULT_CLOCK_RESOLUTION)?;
    let configs: Vec<WaveformConfig> = frequencies
        .iter()
        .map(|f| WaveformConfig::new(f.to_f64()))
        .collect();

    for sample_index in 0..grid.sample_count {
        // Microsecond ticks to seconds
        let t = sample_index as f64 * grid.timer_increment as f64 * 1e-6;
        for (kind, cfg) in kinds.iter().zip(&configs) {
            write!(out, "{:.1},", kind.value(t, cfg))?;
        }
        writeln!(out, "{ROW_TERMINATOR}")?;
    }
    writeln!(out, "{TABLE_TERMINATOR}")?;

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(
        kinds: &[WaveformKind],
        frequencies: &[Rational],
        points_per_period: u32,
    ) -> (SampleGrid, String) {
        let mut out = Vec::new();
        let grid = generate_table(kinds, frequencies, points_per_period, &mut out).unwrap();
        (grid, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_single_pulse_table_shape() {
        let (grid, text) = render(&[WaveformKind::Pulse], &[Rational::integer(40)], 2);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len() as u64, grid.sample_count + 1);
        assert_eq!(*lines.last().unwrap(), TABLE_TERMINATOR);

        for row in &lines[..lines.len() - 1] {
            let mut fields = row.split(',');
            let value = fields.next().unwrap();
            assert!(value == "0.0" || value == "1.0", "unexpected value {value}");
            assert_eq!(fields.next(), Some(ROW_TERMINATOR));
            assert_eq!(fields.next(), None);
        }
    }

    #[test]
    fn test_one_hertz_pulse_golden() {
        // 1 Hz at 2 points per period: samples at t = 0.0s and t = 0.5s,
        // a rising edge and a falling edge
        let (grid, text) = render(&[WaveformKind::Pulse], &[Rational::integer(1)], 2);

        assert_eq!(grid.timer_increment, 500_000);
        assert_eq!(text, "1.0,EOD\n0.0,EOD\nLOOP\n");
    }

    #[test]
    fn test_mixed_kinds_zip_by_position() {
        let (_, text) = render(
            &[WaveformKind::Pulse, WaveformKind::Sine],
            &[Rational::integer(1), Rational::integer(1)],
            2,
        );

        assert_eq!(text, "1.0,0.0,EOD\n0.0,0.0,EOD\nLOOP\n");
    }

    #[test]
    fn test_triad_row_count() {
        let kinds = [WaveformKind::Pulse; 3];
        let freqs = [
            Rational::integer(40),
            Rational::integer(44),
            Rational::integer(48),
        ];
        let (grid, text) = render(&kinds, &freqs, 2);

        assert_eq!(grid.sample_count, 1320);
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 1321);
        assert!(rows[..1320].iter().all(|r| r.ends_with(ROW_TERMINATOR)));
        // Three values per row
        assert!(rows[..1320].iter().all(|r| r.split(',').count() == 4));
    }

    #[test]
    fn test_length_mismatch() {
        let mut out = Vec::new();
        let err = generate_table(
            &[WaveformKind::Pulse],
            &[Rational::integer(40), Rational::integer(44)],
            2,
            &mut out,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            TableError::LengthMismatch {
                kinds: 1,
                frequencies: 2
            }
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_rate_error_propagates() {
        let mut out = Vec::new();
        let err = generate_table(&[], &[], 2, &mut out).unwrap_err();
        assert!(matches!(
            err,
            TableError::Rate(RateError::EmptyFrequencies)
        ));
    }

    #[test]
    fn test_deterministic() {
        let kinds = [WaveformKind::Pulse, WaveformKind::Sine];
        let freqs = [Rational::integer(40), Rational::integer(48)];
        let (grid_a, text_a) = render(&kinds, &freqs, 2);
        let (grid_b, text_b) = render(&kinds, &freqs, 2);
        assert_eq!(grid_a, grid_b);
        assert_eq!(text_a, text_b);
    }
}

//! wavegen - waveform table printer
//!
//! Streams the classic three-pulse 40/44/48 Hz table to stdout in the
//! EOD/LOOP format; pipe it to the playback process feeding the DAC.
//!
//! Run with: cargo run

use std::io::{self, Write};

use wavegen::{generate_table, Rational, WaveformKind};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let kinds = [WaveformKind::Pulse; 3];
    let frequencies = [
        Rational::integer(40),
        Rational::integer(44),
        Rational::integer(48),
    ];

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let grid = generate_table(&kinds, &frequencies, 2, &mut out)?;
    out.flush()?;

    eprintln!(
        "{} samples, {}us per tick, device buffer >= {} entries",
        grid.sample_count, grid.timer_increment, grid.min_buffer_size
    );
    Ok(())
}

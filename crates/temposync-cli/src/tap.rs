//! Interactive tap-tempo over stdin.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use temposync_core::{format_bpm, Calculator};

pub const TAP_HELP: &str =
    "Press Enter on each beat. 'a' uses the tapped BPM, 'r' resets, 'q' quits.";

/// Reads commands line by line until `q` or end of input. `clock` returns the
/// monotonic time in milliseconds at which each line arrived.
pub fn run_tap_session<R, W, C>(
    calc: &mut Calculator,
    input: R,
    mut output: W,
    mut clock: C,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    C: FnMut() -> f64,
{
    writeln!(output, "{TAP_HELP}")?;
    for line in input.lines() {
        let line = line.context("failed to read from stdin")?;
        let now = clock();
        match line.trim() {
            "" => match calc.tap(now) {
                Some(bpm) => writeln!(output, "Tap result: {} BPM", format_bpm(bpm))?,
                None => writeln!(output, "Tap 2+ times to detect")?,
            },
            "a" => match calc.apply_tap() {
                Some(bpm) => writeln!(output, "Using {} BPM", format_bpm(bpm))?,
                None => writeln!(output, "No tapped tempo yet")?,
            },
            "r" => {
                calc.reset_taps();
                writeln!(output, "Taps cleared")?;
            }
            "q" => break,
            other => writeln!(output, "Unknown command '{other}'. {TAP_HELP}")?,
        }
    }
    output.flush()?;
    Ok(())
}

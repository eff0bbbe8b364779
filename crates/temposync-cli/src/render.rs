//! Plain-text tables for terminal output.

use serde::Serialize;
use temposync_core::format::{format_hz, format_ms};
use temposync_core::{CalculatorMode, DelayRow, ReverbRow, SignatureSource};

/// Everything printed for one table command, also used for `--json`.
#[derive(Debug, Serialize)]
pub struct TableReport {
    pub bpm: f64,
    pub mode: CalculatorMode,
    pub mode_name: &'static str,
    pub description: &'static str,
    pub formula_base: String,
    pub signature: String,
    pub signature_source: SignatureSource,
    pub delay: Vec<DelayRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverb: Option<Vec<ReverbRow>>,
}

/// Rates of zero mean "no rate" and are shown as such.
fn hz_cell(hz: f64) -> String {
    if hz > 0.0 {
        format_hz(hz)
    } else {
        "n/a".to_string()
    }
}

fn render_rows(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|cell| cell.len()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let line = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(index, (cell, &width))| {
                if index == 0 {
                    format!("{cell:<width$}")
                } else {
                    format!("{cell:>width$}")
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(header.iter().map(|cell| cell.to_string()).collect()));
    out.push('\n');
    let rule = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    out.push_str(&"-".repeat(rule));
    out.push('\n');
    for row in rows {
        out.push_str(&line(row.clone()));
        out.push('\n');
    }
    out
}

pub fn delay_table(rows: &[DelayRow]) -> String {
    let header = [
        "Note Value",
        "Normal",
        "Hz",
        "Dotted",
        "Hz",
        "Triplet",
        "Hz",
    ];
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.note_label.clone(),
                format_ms(row.notes_ms),
                hz_cell(row.notes_hz),
                format_ms(row.dotted_ms),
                hz_cell(row.dotted_hz),
                format_ms(row.triplet_ms),
                hz_cell(row.triplet_hz),
            ]
        })
        .collect();
    render_rows(&header, &cells)
}

pub fn reverb_table(rows: &[ReverbRow]) -> String {
    let header = ["Reverb Size", "Total", "Pre-Delay", "Decay"];
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.name.to_string(),
                format!("{} ({})", format_ms(row.total_ms), row.total_label),
                format_ms(row.pre_delay_ms),
                format_ms(row.decay_ms),
            ]
        })
        .collect();
    render_rows(&header, &cells)
}

pub fn report_text(report: &TableReport) -> String {
    let mut out = format!(
        "{} @ {:.1} BPM ({})\n{}\n\n",
        report.mode_name, report.bpm, report.formula_base, report.description
    );
    if report.reverb.is_some() {
        out.push_str("Delay lengths by note value\n");
    }
    out.push_str(&delay_table(&report.delay));
    if let Some(reverb) = &report.reverb {
        let note = match report.signature_source {
            SignatureSource::Fallback => " (custom signature invalid, using preset)",
            SignatureSource::Preset | SignatureSource::Custom => "",
        };
        out.push_str(&format!(
            "\nReverb Size presets · {}{note}\n",
            report.signature
        ));
        out.push_str(&reverb_table(reverb));
    }
    out
}

use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use temposync_cli::clipboard::SystemClipboard;
use temposync_cli::commands::{self, CopyTarget, ReverbPart, TempoOptions, VariantArg};
use temposync_cli::render::report_text;
use temposync_cli::tap;
use temposync_core::{Calculator, CalculatorMode, BPM_PRESETS, SIGNATURE_PRESETS};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
        .ok();

    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref());
    let mut calc = Calculator::with_config(&config);

    match cli.command {
        Commands::Delay(args) => execute_table(&mut calc, CalculatorMode::Delay, args, cli.json),
        Commands::Lfo(args) => execute_table(&mut calc, CalculatorMode::Lfo, args, cli.json),
        Commands::Reverb(args) => execute_table(&mut calc, CalculatorMode::Reverb, args, cli.json),
        Commands::Tap => execute_tap(&mut calc),
        Commands::Copy(args) => execute_copy(&mut calc, args),
        Commands::Presets => execute_presets(cli.json),
    }
}

#[derive(Parser)]
#[command(author, version, about = "Tempo-synced delay, reverb and LFO calculator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Print machine-readable JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,
    /// Optional JSON file with tap and status thresholds. Falls back to defaults when unusable.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Delay times for every note value.
    Delay(TableArgs),
    /// Delay times with matching LFO rates.
    Lfo(TableArgs),
    /// Delay times plus reverb pre-delay and decay presets.
    Reverb(TableArgs),
    /// Detect a tempo by tapping Enter.
    Tap,
    /// Copy one value to the system clipboard.
    Copy(CopyArgs),
    /// List modes, time signatures and BPM presets.
    Presets,
}

#[derive(Args)]
struct TempoArgs {
    /// Tempo in BPM (1 to 999).
    #[arg(long, default_value = "120")]
    bpm: String,
    /// Preset (2/4, 3/4, 4/4, 6/8) or any N/D such as 7/8. Invalid text falls back to 4/4.
    #[arg(long, default_value = "4/4")]
    signature: String,
}

impl From<&TempoArgs> for TempoOptions {
    fn from(args: &TempoArgs) -> Self {
        Self {
            bpm: args.bpm.clone(),
            signature: args.signature.clone(),
        }
    }
}

#[derive(Args)]
struct TableArgs {
    #[command(flatten)]
    tempo: TempoArgs,
}

#[derive(Args)]
struct CopyArgs {
    #[command(flatten)]
    tempo: TempoArgs,
    /// Note value to copy, e.g. 1/8.
    #[arg(conflicts_with = "reverb", required_unless_present = "reverb")]
    note: Option<String>,
    /// Which flavour of the note value.
    #[arg(long, value_enum, default_value_t = VariantArg::Normal)]
    variant: VariantArg,
    /// Copy the rate in Hz instead of the duration.
    #[arg(long)]
    hz: bool,
    /// Reverb preset to copy from instead of a note, e.g. Hall.
    #[arg(long)]
    reverb: Option<String>,
    /// Which reverb value to copy.
    #[arg(long, value_enum, default_value_t = ReverbPart::Decay)]
    part: ReverbPart,
}

impl CopyArgs {
    fn target(&self) -> Result<CopyTarget> {
        match (&self.note, &self.reverb) {
            (Some(note), _) => Ok(CopyTarget::Note {
                id: note.clone(),
                variant: self.variant,
                hz: self.hz,
            }),
            (None, Some(name)) => Ok(CopyTarget::Reverb {
                name: name.clone(),
                part: self.part,
            }),
            (None, None) => anyhow::bail!("either a note value or --reverb is required"),
        }
    }
}

fn execute_table(
    calc: &mut Calculator,
    mode: CalculatorMode,
    args: TableArgs,
    json: bool,
) -> Result<()> {
    let report = commands::table_report(calc, mode, &TempoOptions::from(&args.tempo))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report_text(&report));
    }
    Ok(())
}

fn execute_tap(calc: &mut Calculator) -> Result<()> {
    let start = Instant::now();
    let stdin = io::stdin();
    tap::run_tap_session(calc, stdin.lock(), io::stdout(), || {
        start.elapsed().as_secs_f64() * 1000.0
    })?;
    if calc.is_valid_bpm() {
        println!("Tempo: {} BPM", calc.bpm_text());
    }
    Ok(())
}

fn execute_copy(calc: &mut Calculator, args: CopyArgs) -> Result<()> {
    commands::apply_tempo(calc, &TempoOptions::from(&args.tempo))?;
    let copy = commands::resolve_copy(calc, &args.target()?)?;

    let mut clipboard = SystemClipboard::new();
    if SystemClipboard::WAITS_FOR_PASTE {
        println!(
            "Holding {} until it is pasted (Ctrl+C to give up)",
            copy.unit.format(copy.value)
        );
    }
    let line = commands::copy_value(calc, &mut clipboard, &copy)?;
    println!("{line}");
    Ok(())
}

fn execute_presets(json: bool) -> Result<()> {
    if json {
        let presets = serde_json::json!({
            "modes": CalculatorMode::ALL
                .iter()
                .map(|mode| serde_json::json!({
                    "id": mode.id(),
                    "name": mode.name(),
                    "description": mode.description(),
                }))
                .collect::<Vec<_>>(),
            "signatures": SIGNATURE_PRESETS,
            "bpm": BPM_PRESETS,
        });
        println!("{}", serde_json::to_string_pretty(&presets)?);
        return Ok(());
    }

    println!("Modes:");
    for mode in CalculatorMode::ALL {
        println!("  - {} ({}): {}", mode.name(), mode.id(), mode.description());
    }
    println!("Time signatures:");
    for preset in SIGNATURE_PRESETS {
        println!("  - {} ({} beats per bar)", preset.label, preset.beats_per_bar);
    }
    let bpm: Vec<_> = BPM_PRESETS.iter().map(|bpm| bpm.to_string()).collect();
    println!("BPM presets: {}", bpm.join(", "));
    Ok(())
}

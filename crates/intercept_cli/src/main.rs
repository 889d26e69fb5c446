//! Interceptor guidance CLI
//!
//! Headless driver for training, candidate inspection and simulation runs.
//! Set `RUST_LOG=debug` (or `trace` for per-tick frames) to see the library's logs.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use intercept_core::config::{GuidanceMode, SimConfig};
use intercept_core::geometry::Position;
use intercept_core::sensor::AngularSensor;
use intercept_core::sim::{Engagement, RoundOutcome};
use intercept_core::training::{desired_correction, Trainer, TrainingOutcome};

#[derive(Parser)]
#[command(name = "intercept")]
#[command(about = "Train and fly the heat-seeking interceptor", long_about = None)]
#[command(version = intercept_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the guidance network and print the accuracy table
    Train {
        /// Simulation config JSON (defaults when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Weight initialisation seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the deduplicated training candidates as JSON
    Candidates {
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Run engagement rounds and report hits/misses
    Simulate {
        #[arg(long)]
        config: Option<PathBuf>,

        /// Guidance strategy: learned | lookup
        #[arg(long)]
        mode: Option<GuidanceMode>,

        #[arg(long, default_value_t = 10)]
        rounds: u32,

        /// Ticks before a round is scored as timed out
        #[arg(long, default_value_t = 5_000)]
        tick_limit: u64,

        /// Seed for spawns and wind
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        wind_strength: Option<f64>,

        /// Blow at full strength every tick
        #[arg(long)]
        constant_wind: bool,

        /// Largest wind direction change per tick (degrees)
        #[arg(long)]
        max_deviation: Option<f64>,

        /// Write every in-flight telemetry frame as JSON lines
        #[arg(long)]
        frames: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
struct CandidateRow {
    position: Position,
    active_cell: Option<usize>,
    desired: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train { config, seed } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(seed) = seed {
                config.training.seed = seed;
            }
            run_train(&config)
        }

        Commands::Candidates { config } => {
            let config = load_config(config.as_deref())?;
            let rows = candidate_rows(&config);
            println!("{}", serde_json::to_string_pretty(&rows).context("failed to serialize candidates")?);
            Ok(())
        }

        Commands::Simulate {
            config,
            mode,
            rounds,
            tick_limit,
            seed,
            wind_strength,
            constant_wind,
            max_deviation,
            frames,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(mode) = mode {
                config.guidance = mode;
            }
            if let Some(seed) = seed {
                config.seed = seed;
            }
            if let Some(strength) = wind_strength {
                config.wind.strength = strength;
            }
            if constant_wind {
                config.wind.constant = true;
            }
            if let Some(deviation) = max_deviation {
                config.wind.max_deviation_deg = deviation;
            }
            config.validate().context("invalid simulation settings")?;
            run_simulate(&config, rounds, tick_limit, frames.as_deref())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    match path {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("failed to load config: {}", path.display())),
        None => Ok(SimConfig::default()),
    }
}

fn run_train(config: &SimConfig) -> Result<()> {
    let trainer = Trainer::new(AngularSensor::new(config.sensor.clone()), config.training.clone());
    let mut network = trainer.new_network()?;
    let mut candidates = trainer.candidate_set();

    println!("Training guidance network...");
    let outcome = trainer.train(&mut network, &mut candidates)?;
    print_accuracy(&outcome);

    // Non-converged runs exit with an error.
    outcome.into_trained(network)?;
    info!(
        epochs = outcome.report.epochs,
        samples = outcome.samples,
        max_deviation = outcome.accuracy.max_deviation(),
        "train run finished"
    );
    println!("\nTraining converged after {} epochs.", outcome.report.epochs);
    Ok(())
}

fn print_accuracy(outcome: &TrainingOutcome) {
    println!("\n  {:>4}  {:>20}  {:>9}  {:>9}  {:>9}", "cell", "target", "desired", "learned", "dev");
    for row in &outcome.accuracy.rows {
        let cell = row.reading.active_cell().map_or_else(|| "-".to_string(), |c| c.to_string());
        println!(
            "  {:>4}  {:>20}  {:>9.4}  {:>9.4}  {:>9.5}",
            cell,
            row.target.to_string(),
            row.desired,
            row.learned,
            row.deviation()
        );
    }
    println!("\n  Samples:       {}", outcome.samples);
    println!("  Epochs:        {}", outcome.report.epochs);
    println!("  Max deviation: {:.5}", outcome.accuracy.max_deviation());
}

fn candidate_rows(config: &SimConfig) -> Vec<CandidateRow> {
    let sensor = AngularSensor::new(config.sensor.clone());
    let trainer = Trainer::new(sensor.clone(), config.training.clone());
    let observer = config.training.observer;
    let candidates = trainer.candidate_set();

    candidates
        .generate()
        .iter()
        .map(|&position| CandidateRow {
            position,
            active_cell: sensor.read(config.training.heading_deg, observer, position).active_cell(),
            desired: desired_correction(observer, position),
        })
        .collect()
}

fn run_simulate(config: &SimConfig, rounds: u32, tick_limit: u64, frames: Option<&Path>) -> Result<()> {
    let mut engagement = Engagement::new(config).context("failed to build engagement")?;

    let mut writer = match frames {
        Some(path) => Some(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => None,
    };

    let mut write_error: Option<anyhow::Error> = None;
    let results = engagement.run_rounds_with(rounds, tick_limit, |frame| {
        let Some(out) = writer.as_mut() else { return };
        if write_error.is_some() {
            return;
        }
        let line = serde_json::to_string(frame).map_err(anyhow::Error::from);
        if let Err(err) = line.and_then(|l| writeln!(out, "{l}").map_err(anyhow::Error::from)) {
            write_error = Some(err);
        }
    });

    if let Some(err) = write_error {
        return Err(err.context("failed to write telemetry frames"));
    }
    if let Some(mut out) = writer {
        out.flush().context("failed to flush telemetry frames")?;
    }

    println!("Rounds ({} guidance):", guidance_label(config.guidance));
    for r in &results {
        let label = match r.outcome {
            RoundOutcome::Intercepted => "HIT",
            RoundOutcome::InterceptorLost => "miss (interceptor lost)",
            RoundOutcome::GroundImpact => "miss (ground impact)",
            RoundOutcome::TimedOut => "miss (timed out)",
        };
        println!("  #{:<4} {:>5} ticks  {}", r.round, r.ticks, label);
    }

    let score = engagement.scoreboard();
    info!(rounds = results.len(), hits = score.hits, misses = score.misses, "simulate run finished");
    println!("\n  Hits:     {}", score.hits);
    println!("  Misses:   {}", score.misses);
    println!("  Hit rate: {:.1}%", score.hit_rate() * 100.0);
    Ok(())
}

fn guidance_label(mode: GuidanceMode) -> &'static str {
    match mode {
        GuidanceMode::Learned => "learned",
        GuidanceMode::Lookup => "lookup",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simulate_flags() {
        let cli = Cli::try_parse_from([
            "intercept",
            "simulate",
            "--mode",
            "lookup",
            "--rounds",
            "3",
            "--wind-strength",
            "0.5",
            "--constant-wind",
        ])
        .unwrap();

        match cli.command {
            Commands::Simulate { mode, rounds, wind_strength, constant_wind, .. } => {
                assert_eq!(mode, Some(GuidanceMode::Lookup));
                assert_eq!(rounds, 3);
                assert_eq!(wind_strength, Some(0.5));
                assert!(constant_wind);
            }
            _ => panic!("expected simulate"),
        }
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["intercept", "simulate", "--mode", "autopilot"]).is_err());
    }

    #[test]
    fn test_candidate_rows_cover_every_cell() {
        let rows = candidate_rows(&SimConfig::default());
        assert_eq!(rows.len(), 17);
        assert_eq!(rows.iter().filter(|r| r.active_cell.is_none()).count(), 1);
        assert_eq!(rows[0].active_cell, Some(16));
    }

    #[test]
    fn test_simulate_writes_frames() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frames.jsonl");
        let config = SimConfig { guidance: GuidanceMode::Lookup, ..SimConfig::default() };

        run_simulate(&config, 2, 1_000, Some(path.as_path())).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let first = text.lines().next().unwrap();
        let value: serde_json::Value = serde_json::from_str(first).unwrap();
        assert_eq!(value["round"], 1);
    }

    /// Log sink shared between the subscriber and the assertion
    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_simulate_logs_summary() {
        let logs = CapturedLogs::default();
        let sink = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || sink.clone())
            .with_ansi(false)
            .finish();
        let config = SimConfig { guidance: GuidanceMode::Lookup, ..SimConfig::default() };

        tracing::subscriber::with_default(subscriber, || run_simulate(&config, 1, 1_000, None)).unwrap();

        let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(text.contains("simulate run finished"), "{text}");
        assert!(text.contains("rounds=1"));
    }

    #[test]
    fn test_missing_config_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(dir.path().join("nope.json").as_path())).unwrap_err();
        assert!(err.to_string().contains("failed to load config"));
    }
}

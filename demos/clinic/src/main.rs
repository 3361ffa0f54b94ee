//! clinic — a single-server appointment queue played over several rounds.
//!
//! Arrivals come either from a CSV file (`round,participant_id,arrival_time`)
//! or from a seeded synthetic population drawing uniformly from a window.
//! Each round's schedule is printed as it is produced and all results are
//! written to `round_results.csv` / `final_stats.csv` in the output directory.
//!
//! ```text
//! clinic --participants 6 --seed 7 --output output/clinic
//! clinic --config queue.json --arrivals arrivals.csv --verbose
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use aq_core::{ClockTime, QueueConfig, RoundNumber};
use aq_output::{CsvWriter, OutputWriter, SessionOutputObserver, NO_APPOINTMENT};
use aq_schedule::{load_arrivals_csv, RoundBatch, RoundSchedule};
use aq_sim::{FinalStats, Population, SessionBuilder, SessionObserver, UniformWindow};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "clinic")]
#[command(about = "Simulate a first-come-first-served appointment queue")]
struct Cli {
    /// JSON file with queue settings; missing fields use the defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// CSV of submitted arrivals, one row per participant per round
    #[arg(long, conflicts_with = "participants")]
    arrivals: Option<PathBuf>,

    /// Number of synthetic participants (used when no arrivals file is given)
    #[arg(long, default_value = "5")]
    participants: u32,

    /// Seed for synthetic arrivals
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Earliest synthetic arrival
    #[arg(long, default_value = "09:30")]
    earliest: ClockTime,

    /// Latest synthetic arrival
    #[arg(long, default_value = "11:00")]
    latest: ClockTime,

    /// Directory for the CSV output files
    #[arg(short, long, default_value = "output/clinic")]
    output: PathBuf,

    /// Enable debug logging (one line per assigned slot)
    #[arg(short, long)]
    verbose: bool,
}

// ── Observer wrapper that prints each round ──────────────────────────────────

struct PrintingObserver<W: OutputWriter> {
    inner: SessionOutputObserver<W>,
}

impl<W: OutputWriter> SessionObserver for PrintingObserver<W> {
    fn on_round_start(&mut self, round: RoundNumber) {
        self.inner.on_round_start(round);
    }

    fn on_round_scheduled(&mut self, round: RoundNumber, schedule: &RoundSchedule) {
        println!(
            "Round {} (opens {}, closes {}, {} of {} served)",
            round.0,
            schedule.opening_time,
            schedule.closing_time,
            schedule.served_count(),
            schedule.len(),
        );
        println!(
            "  {:<4} {:<12} {:<8} {:<16} {:>5} {:>6}",
            "Pos", "Participant", "Arrival", "Appointment", "Wait", "Prize"
        );
        for entry in schedule.roster() {
            let appointment = entry.appointment_time().unwrap_or_else(|| NO_APPOINTMENT.to_owned());
            println!(
                "  {:<4} {:<12} {:<8} {:<16} {:>5} {:>6}",
                entry.queue_position,
                entry.participant_id.to_string(),
                entry.arrival_time,
                appointment,
                entry.waiting_time,
                entry.prize,
            );
        }
        println!();
        self.inner.on_round_scheduled(round, schedule);
    }

    fn on_session_end(&mut self, stats: &[FinalStats]) {
        println!("{:<12} {:>12} {:>10} {:>10}", "Participant", "Total prize", "Avg wait", "Success %");
        println!("{}", "-".repeat(47));
        for s in stats {
            let rounded = s.stats.rounded();
            println!(
                "{:<12} {:>12} {:>10.1} {:>10.1}",
                s.participant_id.to_string(),
                rounded.total_prize,
                rounded.avg_waiting_time,
                rounded.success_rate,
            );
        }
        self.inner.on_session_end(stats);
    }
}

// ── Inputs ────────────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<QueueConfig> {
    let Some(path) = path else {
        return Ok(QueueConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: QueueConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

fn synthetic_batches(cli: &Cli, rounds: u32) -> Result<Vec<RoundBatch>> {
    let window = UniformWindow::new(cli.earliest, cli.latest)?;
    let mut population = Population::new(window, cli.participants, cli.seed);
    let mut batches = Vec::with_capacity(rounds as usize);
    let mut round = RoundNumber::FIRST;
    for _ in 0..rounds {
        batches.push(population.submit(round)?);
        round = round.next();
    }
    Ok(batches)
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Level used when `RUST_LOG` is unset: per-round `info` lines, or per-slot
/// `debug` lines with `--verbose`.
fn default_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new(default_level(true));
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level(false)))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_env_filter(log_filter(cli.verbose)).init();

    let config = load_config(cli.config.as_deref())?;
    config.validate()?;

    let batches = match &cli.arrivals {
        Some(path) => load_arrivals_csv(path)
            .with_context(|| format!("loading arrivals {}", path.display()))?,
        None => synthetic_batches(&cli, config.num_rounds)?,
    };
    if batches.len() > config.num_rounds as usize {
        bail!(
            "arrivals cover {} rounds but the session has only {}",
            batches.len(),
            config.num_rounds
        );
    }
    let Some(first) = batches.first() else {
        bail!("no arrivals to schedule");
    };

    println!("=== clinic — appointment queue ===");
    println!(
        "Participants: {}  |  Rounds: {}  |  Slot: {} min  |  Opens: {}",
        first.len(),
        config.num_rounds,
        config.appointment_duration,
        config.opening_time,
    );
    println!();

    let mut session = SessionBuilder::new(config)
        .participants(first.participant_ids())
        .build()?;

    std::fs::create_dir_all(&cli.output)?;
    let writer = CsvWriter::new(&cli.output)?;
    let mut obs = PrintingObserver { inner: SessionOutputObserver::new(writer) };

    let played = session.play(&batches, &mut obs);
    if !session.is_complete() {
        warn!(
            played = session.rounds_played(),
            configured = session.config().num_rounds,
            "session ended early; no final statistics"
        );
        obs.inner.finish();
    }
    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }
    played?;

    info!(output = %cli.output.display(), "results written");
    println!();
    println!("Results written to {}", cli.output.display());
    Ok(())
}

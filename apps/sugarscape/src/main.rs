//! sugarscape — run the ethical Sugarscape from a JSON configuration.
//!
//! ```text
//! sugarscape --conf config.json --ticks 500 --seed 7 --out output/run1 --log output/run1/log.json
//! ```
//!
//! Writes `tick_summaries.csv` and `agent_snapshots.csv` to `--out`, plus
//! the JSON statistics log when `--log` or the configuration's `logfile`
//! names one.  Set `RUST_LOG=debug` for per-tick tracing.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ss_agent::AgentStore;
use ss_core::Tick;
use ss_grid::Grid;
use ss_output::{CsvWriter, JsonLogWriter, SimOutputObserver};
use ss_sim::setup::build_sim;
use ss_sim::{RuntimeStats, SimObserver, SugarscapeConfig, TickSummary};

#[derive(Parser)]
#[command(name = "sugarscape")]
#[command(version)]
#[command(about = "Agent-based Sugarscape with egoistic and utilitarian movement rules")]
struct Cli {
    /// Configuration file (JSON); defaults apply to every missing key
    #[arg(short, long)]
    conf: Option<PathBuf>,

    /// Number of ticks to simulate (overrides `timesteps`)
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Random seed for reproducibility (overrides `seed`)
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory for the CSV files
    #[arg(short, long, default_value = "output")]
    out: PathBuf,

    /// JSON statistics log (overrides `logfile`)
    #[arg(short, long)]
    log: Option<PathBuf>,

    /// Snapshot agents every N ticks; 0 disables snapshots (overrides `outputInterval`)
    #[arg(long)]
    interval: Option<u64>,
}

// ── Progress observer ─────────────────────────────────────────────────────────

/// Wraps another observer and reports progress every `every` ticks.
struct Progress<O: SimObserver> {
    inner: O,
    every: u64,
    kills: usize,
}

impl<O: SimObserver> SimObserver for Progress<O> {
    fn on_sim_start(&mut self, stats: &RuntimeStats) {
        info!(agents = stats.agents, wealth = stats.total_wealth, "starting");
        self.inner.on_sim_start(stats);
    }

    fn on_tick_start(&mut self, tick: Tick) {
        self.inner.on_tick_start(tick);
    }

    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary, stats: &RuntimeStats) {
        self.kills += summary.kills;
        if self.every > 0 && tick.0.is_multiple_of(self.every) {
            info!(
                tick = tick.0,
                agents = stats.agents,
                mean_wealth = stats.mean_wealth,
                gini = stats.gini_coefficient,
                "progress"
            );
        }
        self.inner.on_tick_end(tick, summary, stats);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore, grid: &Grid) {
        self.inner.on_snapshot(tick, agents, grid);
    }

    fn on_sim_end(&mut self, final_tick: Tick, stats: &RuntimeStats) {
        self.inner.on_sim_end(final_tick, stats);
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    // 1. Configuration.
    let mut config = match &cli.conf {
        Some(path) => SugarscapeConfig::from_json_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SugarscapeConfig::default(),
    };
    if let Some(ticks) = cli.ticks {
        config.timesteps = ticks;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(interval) = cli.interval {
        config.output_interval = interval;
    }
    if cli.log.is_some() {
        config.logfile = cli.log.clone();
    }

    // 2. World.
    let mut sim = build_sim(&config)?;

    // 3. Output.
    let csv = CsvWriter::new(&cli.out)
        .with_context(|| format!("creating output directory {}", cli.out.display()))?;
    let log = match &config.logfile {
        Some(path) => Some(
            JsonLogWriter::create(path).with_context(|| format!("creating log {}", path.display()))?,
        ),
        None => None,
    };
    let mut obs = Progress {
        inner: SimOutputObserver::new((csv, log)),
        every: (config.timesteps / 10).max(1),
        kills: 0,
    };

    // 4. Run.
    let t0 = Instant::now();
    let end = sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    let stats = sim.stats();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  ticks run        : {}", end.0);
    println!("  agents alive     : {}", stats.agents);
    println!("  combat kills     : {}", obs.kills);
    println!("  mean wealth      : {:.3}", stats.mean_wealth);
    println!("  gini coefficient : {:.3}", stats.gini_coefficient);
    println!("  output           : {}", cli.out.display());

    Ok(())
}

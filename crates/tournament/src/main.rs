//! Pod scheduling CLI
//!
//! Plan rounds for a multiplayer tournament and report how fast the field
//! gets to meet each other.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pod_core::{
    count_configurations, plan_pod_sizes, ConfigurationCache, PodError, TournamentRunner,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tournament::{
    config_path, create_default_config, generate_run_report, load_config, save_run, PodsConfig,
    RunOverrides, SweepResults,
};

#[derive(Parser)]
#[command(name = "pods", version, about = "Schedule pods of 3-4 players so everybody meets everybody")]
struct Cli {
    /// Log more (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Schedule one tournament until the target coverage is reached
    Run(RunArgs),
    /// Schedule every player count in a range and compare the rounds needed
    Sweep(SweepArgs),
    /// Show the pod plan and candidate count for a player count
    Plan {
        #[arg(long)]
        players: usize,
    },
    /// Create a default config file at ~/.config/pods/config.toml
    Init,
}

#[derive(Args)]
struct RunArgs {
    /// Number of players (at least 6)
    #[arg(long)]
    players: usize,

    #[command(flatten)]
    schedule: ScheduleArgs,

    /// Output JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Save the run report as JSON
    #[arg(long)]
    save: Option<PathBuf>,
}

#[derive(Args)]
struct SweepArgs {
    /// Smallest player count
    #[arg(long, default_value_t = 6)]
    from: usize,

    /// Largest player count
    #[arg(long)]
    to: usize,

    #[command(flatten)]
    schedule: ScheduleArgs,

    /// Save the sweep results as JSON
    #[arg(long)]
    save: Option<PathBuf>,
}

#[derive(Args)]
struct ScheduleArgs {
    /// Target average coverage: fraction (0.9) or percentage (90)
    #[arg(long)]
    target: Option<f64>,

    /// Take the first round that beats the current grade by --increase
    #[arg(long)]
    good_enough: bool,

    /// Grade multiplier for --good-enough (default 1.3)
    #[arg(long)]
    increase: Option<f64>,

    /// Give up after this many rounds
    #[arg(long)]
    max_rounds: Option<u32>,

    /// Refuse player counts with more candidate rounds than this
    #[arg(long)]
    max_configurations: Option<u64>,

    /// Path to config file (default: ~/.config/pods/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl ScheduleArgs {
    fn overrides(&self) -> RunOverrides {
        RunOverrides {
            target: self.target,
            good_enough: self.good_enough,
            increase: self.increase,
            max_rounds: self.max_rounds,
            max_configurations: self.max_configurations,
        }
    }

    fn load_config(&self) -> Result<PodsConfig> {
        let path = match &self.config {
            Some(path) => path.clone(),
            None => config_path()?,
        };
        load_config(&path)
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: RunArgs) -> Result<()> {
    let config = args.schedule.load_config()?;
    let overrides = args.schedule.overrides();
    let target = config.target_grade(&overrides)?;
    let runner_config = config.runner_config(&overrides)?;

    let mut runner = TournamentRunner::new(args.players, runner_config)?;
    let report = runner.run_until(target)?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize run report")?
        );
    } else {
        println!("{}", generate_run_report(&report));
    }

    if let Some(path) = args.save {
        save_run(&report, &path)?;
        eprintln!("Saved run report to {}", path.display());
    }
    Ok(())
}

fn sweep(args: SweepArgs) -> Result<()> {
    anyhow::ensure!(
        args.from <= args.to,
        "--from ({}) must not exceed --to ({})",
        args.from,
        args.to
    );

    let config = args.schedule.load_config()?;
    let overrides = args.schedule.overrides();
    let target = config.target_grade(&overrides)?;
    let runner_config = config.runner_config(&overrides)?;

    let mut cache = ConfigurationCache::new();
    let mut results = SweepResults::new(
        &format!("{} to {} players", args.from, args.to),
        target,
        runner_config.mode,
    );

    for players in args.from..=args.to {
        info!(players, "scheduling");
        let mut runner = TournamentRunner::with_cache(players, runner_config.clone(), &mut cache)
            .with_context(|| format!("Failed to prepare {} players", players))?;
        let report = runner.run_until(target)?;
        println!(
            "{:>3} players: {:.1}% after {} rounds",
            players,
            report.final_grade * 100.0,
            report.round_count()
        );
        results.add_run(&report);
    }

    println!();
    results.print_report();

    if let Some(path) = args.save {
        results.save(&path)?;
        eprintln!("Saved sweep results to {}", path.display());
    }
    Ok(())
}

fn show_plan(players: usize) -> Result<()> {
    let plan = plan_pod_sizes(players)?;
    println!("{} players: pods {:?}", players, plan);
    match count_configurations(players, &plan) {
        Some(count) => println!("Candidate rounds: {}", count),
        None => println!("Candidate rounds: more than {}", u128::MAX),
    }
    Ok(())
}

fn init() -> Result<()> {
    let path = config_path()?;
    create_default_config(&path)?;
    println!("Created config at {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = match cli.command {
        Commands::Run(args) => run(args),
        Commands::Sweep(args) => sweep(args),
        Commands::Plan { players } => show_plan(players),
        Commands::Init => init(),
    };

    // A sweep that hits a runaway player count is worth a hint
    if let Some(PodError::EnumerationTooLarge { .. }) =
        outcome.as_ref().err().and_then(|e| e.downcast_ref::<PodError>())
    {
        warn!("raise --max-configurations to enumerate anyway (needs a lot of memory)");
    }
    outcome
}

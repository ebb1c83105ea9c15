//! Workforce Simulator CLI
//!
//! Run Monte Carlo attrition simulations and sensitivity sweeps.
//!
//! # Example
//!
//! ```bash
//! # Reference run: 1000 employees, 24 months, 50 trials, seed 42
//! workforce-sim run
//!
//! # Override parameters, run trials on all cores, emit JSON
//! workforce-sim run --employees 500 --trials 200 --seed 7 --parallel --json
//!
//! # Load a JSON config, then override the horizon
//! workforce-sim run --config scenario.json --months 36
//!
//! # Lead-time sweep from -2 to +3 months around the configured values
//! workforce-sim sweep lead-time
//!
//! # Closed-form turnover x premium grid
//! workforce-sim sweep grid --json
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;
use workforce_simulator_core_rs::sensitivity::{
    analytic_cash_out_grid, lead_time_sweep, premium_sweep, spillover_sweep, AnalyticGridConfig,
    CashOutGrid, SweepPoint, DEFAULT_LEAD_TIME_DELTAS, DEFAULT_MARKUP_FACTORS, DEFAULT_SPILLOVER_RATES,
};
use workforce_simulator_core_rs::{AggregateResult, MonteCarloRunner, SimulationConfig};

type CliResult<T> = Result<T, Box<dyn Error>>;

/// Workforce Attrition Simulator
///
/// Models resignations, replacement hiring, overtime spillover and turnover
/// costs over a monthly horizon, aggregated across Monte Carlo trials.
#[derive(Parser, Debug)]
#[command(name = "workforce-sim")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the Monte Carlo simulation and print the median series
    Run(SimArgs),
    /// Re-run the simulation across parameter variants
    Sweep {
        #[arg(value_enum)]
        kind: SweepKind,

        /// Lead-time offsets in months (lead-time sweep)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        deltas: Option<Vec<i64>>,

        /// Spillover rates (spillover sweep) or markup factors (premium sweep)
        #[arg(long, value_delimiter = ',')]
        values: Option<Vec<f64>>,

        #[command(flatten)]
        sim: SimArgs,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SweepKind {
    LeadTime,
    Spillover,
    Premium,
    Grid,
}

#[derive(Args, Debug)]
struct SimArgs {
    /// JSON configuration file; command-line flags override it
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Workforce size
    #[arg(short = 'e', long)]
    employees: Option<usize>,

    /// Number of Monte Carlo trials
    #[arg(short = 't', long)]
    trials: Option<usize>,

    /// Horizon in months
    #[arg(short = 'm', long)]
    months: Option<usize>,

    /// Master seed, overriding the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Run trials in parallel (results are identical to sequential)
    #[arg(long)]
    parallel: bool,

    /// Print machine-readable JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl SimArgs {
    fn load_config(&self) -> CliResult<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_json_str(&std::fs::read_to_string(path)?)?,
            None => SimulationConfig::default(),
        };
        if let Some(employees) = self.employees {
            config.num_employees = employees;
        }
        if let Some(trials) = self.trials {
            config.num_trials = trials;
        }
        if let Some(months) = self.months {
            config.num_months = months;
        }
        if self.seed.is_some() {
            config.rng_seed = self.seed;
        }
        config.parallel |= self.parallel;
        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,workforce_simulator_core_rs=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Command::Run(args) => run(&args),
        Command::Sweep {
            kind,
            deltas,
            values,
            sim,
        } => sweep(kind, deltas, values, &sim),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &SimArgs) -> CliResult<()> {
    let config = args.load_config()?;
    let result = MonteCarloRunner::new(config)?.run()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_aggregate(&result);
    }
    Ok(())
}

fn sweep(
    kind: SweepKind,
    deltas: Option<Vec<i64>>,
    values: Option<Vec<f64>>,
    args: &SimArgs,
) -> CliResult<()> {
    let config = args.load_config()?;
    info!(?kind, "starting sweep");

    match kind {
        SweepKind::LeadTime => {
            let deltas = deltas.unwrap_or_else(|| DEFAULT_LEAD_TIME_DELTAS.to_vec());
            let sweeps = lead_time_sweep(&config, &deltas)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&sweeps)?);
            } else {
                for sweep in &sweeps {
                    println!("\n{} (base lead time {} months)", sweep.branch, sweep.base_lead_time);
                    print_points(&sweep.points);
                }
            }
        }
        SweepKind::Spillover | SweepKind::Premium => {
            let points = if let SweepKind::Spillover = kind {
                let rates = values.unwrap_or_else(|| DEFAULT_SPILLOVER_RATES.to_vec());
                spillover_sweep(&config, &rates)?
            } else {
                let factors = values.unwrap_or_else(|| DEFAULT_MARKUP_FACTORS.to_vec());
                premium_sweep(&config, &factors)?
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&points)?);
            } else {
                print_points(&points);
            }
        }
        SweepKind::Grid => {
            let grid = analytic_cash_out_grid(&AnalyticGridConfig {
                headcount: config.num_employees as f64,
                years: config.num_months as f64 / 12.0,
                hiring_cost_rate: config.financial.hiring_cost_rate,
                ..Default::default()
            })?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&grid)?);
            } else {
                print_grid(&grid);
            }
        }
    }
    Ok(())
}

fn print_aggregate(result: &AggregateResult) {
    println!(
        "run {}  seed {}  trials {}  config {}",
        result.run_id,
        result.master_seed,
        result.num_trials,
        &result.config_hash[..12.min(result.config_hash.len())]
    );
    println!(
        "{:>5} {:>12} {:>12} {:>10} {:>8} {:>8}",
        "month", "cash_out", "opp_loss", "hp_ot", "urban", "rural"
    );
    for row in result.rows() {
        println!(
            "{:>5} {:>12.2} {:>12.2} {:>10.2} {:>8.1} {:>8.1}",
            row.month + 1,
            row.cash_out,
            row.opportunity_loss,
            row.hp_overtime,
            row.urban_headcount,
            row.rural_headcount
        );
    }
    println!(
        "\nretention: urban {:.1}%  rural {:.1}%",
        result.retention_pct.urban, result.retention_pct.rural
    );
    println!(
        "final loss: cash-out {:.2} + opportunity {:.2} = {:.2}",
        result.final_summary.cash_out,
        result.final_summary.opportunity_loss,
        result.final_summary.total
    );
}

fn print_grid(grid: &CashOutGrid) {
    print!("{:>10}", "turnover");
    for premium in &grid.premiums {
        print!("{:>12}", format!("+{:.0}%", premium * 100.0));
    }
    println!();
    for (rate, row) in grid.turnover_rates.iter().zip(&grid.cells) {
        print!("{:>9.0}%", rate * 100.0);
        for cell in row {
            print!("{cell:>12.1}");
        }
        println!();
    }
}

fn print_points(points: &[SweepPoint]) {
    println!(
        "{:>16} {:>10} {:>12} {:>12} {:>12} {:>8} {:>8}",
        "variant", "value", "cash_out", "opp_loss", "total", "urban%", "rural%"
    );
    for point in points {
        println!(
            "{:>16} {:>10.2} {:>12.2} {:>12.2} {:>12.2} {:>8.1} {:>8.1}",
            point.label,
            point.value,
            point.summary.cash_out,
            point.summary.opportunity_loss,
            point.summary.total,
            point.urban_retention_pct,
            point.rural_retention_pct
        );
    }
}

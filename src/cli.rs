//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::adapters::csv_adapter::CsvMatchAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::comparison::ComparisonReport;
use crate::domain::error::StockError;
use crate::domain::price_series::PriceSeries;
use crate::domain::simulation::{SimulationConfig, build_price_series, run_simulation};
use crate::domain::strategy::TeamSelection;
use crate::ports::match_port::MatchDataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "teamstock", about = "Football team stock-market simulator")]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run every configured strategy over a season
    Simulate {
        #[arg(short, long)]
        config: PathBuf,
        /// Match CSV, overrides `[simulation] matches`
        #[arg(short, long)]
        matches: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print team prices
    Prices {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        matches: Option<PathBuf>,
        /// Only this week; all weeks when omitted
        #[arg(short, long)]
        week: Option<u32>,
    },
    /// Validate a simulation configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    init_logging(&cli.log_level);
    match cli.command {
        Command::Simulate {
            config,
            matches,
            output,
            seed,
        } => run_simulate(&config, matches.as_ref(), output.as_ref(), seed),
        Command::Prices {
            config,
            matches,
            week,
        } => run_prices(&config, matches.as_ref(), week),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

/// Install the stderr fmt subscriber. A second call keeps the first one.
pub fn init_logging(level: &str) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = StockError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        fail(&err)
    })
}

fn fail(err: &StockError) -> ExitCode {
    eprintln!("error: {err}");
    err.into()
}

/// Load, validate and build the simulation config.
fn prepare(config_path: &PathBuf) -> Result<SimulationConfig, ExitCode> {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = load_config(config_path)?;
    SimulationConfig::from_config(&adapter).map_err(|e| fail(&e))
}

/// `--matches` wins; a config path is taken relative to the config file.
pub fn resolve_matches_path(
    override_path: Option<&PathBuf>,
    config_path: &Path,
    config: &SimulationConfig,
) -> Result<PathBuf, StockError> {
    if let Some(path) = override_path {
        return Ok(path.clone());
    }
    let path = config
        .matches_path
        .as_ref()
        .ok_or_else(|| StockError::ConfigMissing {
            section: "simulation".into(),
            key: "matches".into(),
        })?;
    if path.is_absolute() {
        return Ok(path.clone());
    }
    Ok(config_path
        .parent()
        .map(|dir| dir.join(path))
        .unwrap_or_else(|| path.clone()))
}

fn load_matches(
    override_path: Option<&PathBuf>,
    config_path: &Path,
    config: &SimulationConfig,
) -> Result<Vec<crate::domain::match_record::MatchRecord>, StockError> {
    let path = resolve_matches_path(override_path, config_path, config)?;
    eprintln!("Loading matches from {}", path.display());
    CsvMatchAdapter::new(path).fetch_matches()
}

fn run_simulate(
    config_path: &PathBuf,
    matches_path: Option<&PathBuf>,
    output_path: Option<&PathBuf>,
    seed: Option<u64>,
) -> ExitCode {
    let mut config = match prepare(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }

    let matches = match load_matches(matches_path, config_path, &config) {
        Ok(m) => m,
        Err(e) => return fail(&e),
    };

    eprintln!(
        "Running {} strategies over {} weeks (seed {})",
        config.strategies.len(),
        config.horizon,
        config.seed
    );
    let output = match run_simulation(&matches, &config) {
        Ok(o) => o,
        Err(e) => return fail(&e),
    };

    print_summary(&output.report);

    let output_file = output_path
        .cloned()
        .unwrap_or_else(|| PathBuf::from("report.csv"));
    match CsvReportAdapter::new().write(&output.report, &output_file) {
        Ok(()) => {
            eprintln!("\nReport written to: {}", output_file.display());
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn print_summary(report: &ComparisonReport) {
    eprintln!("\n=== Average Weekly Return ===");
    for summary in report.ranked() {
        eprintln!(
            "  {:<16} {:>8.3}%",
            summary.name, summary.average_weekly_return
        );
    }

    eprintln!("\n=== Final Results ===");
    for summary in &report.summaries {
        let sign = if summary.percent_return >= 0.0 { "+" } else { "" };
        eprintln!(
            "  {:<16} {:>10.2}  {}{:.2}%  max drawdown -{:.1}%",
            summary.name,
            summary.final_value,
            sign,
            summary.percent_return,
            summary.max_drawdown * 100.0,
        );
    }

    if let Some(best) = report.best() {
        eprintln!("\nBest strategy: {} ({})", best.name, best.teams.join(", "));
    }
}

fn run_prices(config_path: &PathBuf, matches_path: Option<&PathBuf>, week: Option<u32>) -> ExitCode {
    let config = match prepare(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let matches = match load_matches(matches_path, config_path, &config) {
        Ok(m) => m,
        Err(e) => return fail(&e),
    };
    let series = match build_price_series(&matches, &config.initial_prices) {
        Ok((_, series)) => series,
        Err(e) => return fail(&e),
    };

    match week {
        Some(week) => match series.prices_at(week) {
            Ok(prices) => {
                for (team, price) in prices {
                    println!("{},{:.2}", team, price);
                }
                ExitCode::SUCCESS
            }
            Err(e) => fail(&e),
        },
        None => {
            print_price_table(&series);
            ExitCode::SUCCESS
        }
    }
}

fn print_price_table(series: &PriceSeries) {
    let teams: Vec<&str> = series.teams().collect();
    println!("week,{}", teams.join(","));
    for week in 0..=series.max_week() {
        let row: Vec<String> = teams
            .iter()
            .map(|team| {
                series
                    .price(team, week)
                    .map(|p| format!("{:.2}", p))
                    .unwrap_or_default()
            })
            .collect();
        println!("{},{}", week, row.join(","));
    }
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let config = match prepare(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    eprintln!("\nSimulation:");
    eprintln!("  starting cash: {:.2}", config.starting_cash);
    eprintln!("  horizon:       {} weeks", config.horizon);
    eprintln!("  seed:          {}", config.seed);
    eprintln!("  teams priced:  {}", config.initial_prices.len());

    eprintln!("\nStrategies:");
    for strategy in &config.strategies {
        let detail = match &strategy.selection {
            TeamSelection::Fixed(teams) => teams.join(", "),
            TeamSelection::Random { count } => format!("{} random teams", count),
            TeamSelection::All => "all teams".to_string(),
        };
        eprintln!("  {}: {}", strategy.name, detail);

        if let TeamSelection::Fixed(teams) = &strategy.selection {
            if let Some(unknown) = teams.iter().find(|t| !config.initial_prices.contains_key(*t)) {
                let err = StockError::configuration(format!(
                    "strategy {} names unpriced team {}",
                    strategy.name, unknown
                ));
                return fail(&err);
            }
        }
    }

    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}

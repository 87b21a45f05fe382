//! Simulation configuration and the end-to-end pipeline.
//!
//! matches -> weekly aggregates -> price series -> one portfolio per
//! strategy -> comparison report.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::domain::comparison::ComparisonReport;
use crate::domain::config_validation::{
    PRICES, SIMULATION, STRATEGIES, parse_optional, validate_simulation_config,
};
use crate::domain::error::StockError;
use crate::domain::match_record::MatchRecord;
use crate::domain::price_series::PriceSeries;
use crate::domain::strategy::{RunSettings, Strategy, TeamSelection, run_all};
use crate::domain::team_week::{TeamWeekAggregate, normalize};
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_STARTING_CASH: f64 = 1000.0;
pub const DEFAULT_HORIZON: u32 = 42;
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub matches_path: Option<PathBuf>,
    pub starting_cash: f64,
    pub horizon: u32,
    pub seed: u64,
    pub initial_prices: BTreeMap<String, f64>,
    pub strategies: Vec<Strategy>,
}

impl SimulationConfig {
    /// Validate and build from a config source. Strategies fall back to
    /// [`Strategy::reference_set`] when `[strategies]` is empty.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, StockError> {
        validate_simulation_config(config)?;
        let starting_cash =
            parse_optional(config, SIMULATION, "starting_cash")?.unwrap_or(DEFAULT_STARTING_CASH);
        let horizon = parse_optional(config, SIMULATION, "horizon")?.unwrap_or(DEFAULT_HORIZON);
        let seed = parse_optional(config, SIMULATION, "seed")?.unwrap_or(DEFAULT_SEED);
        let matches_path = config
            .get_string(SIMULATION, "matches")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let mut initial_prices = BTreeMap::new();
        for (team, raw) in config.section_entries(PRICES) {
            let price: f64 = raw.trim().parse().map_err(|_| StockError::ConfigInvalid {
                section: PRICES.to_string(),
                key: team.clone(),
                reason: format!("cannot parse {raw:?}"),
            })?;
            initial_prices.insert(team, price);
        }

        let mut strategies = Vec::new();
        for (name, raw) in config.section_entries(STRATEGIES) {
            let selection = TeamSelection::parse(&raw).map_err(|e| StockError::ConfigInvalid {
                section: STRATEGIES.to_string(),
                key: name.clone(),
                reason: e.to_string(),
            })?;
            strategies.push(Strategy { name, selection });
        }
        if strategies.is_empty() {
            if !config.has_section(STRATEGIES) {
                tracing::info!("no [strategies] section, using the reference set");
            }
            strategies = Strategy::reference_set();
        }

        Ok(SimulationConfig {
            matches_path,
            starting_cash,
            horizon,
            seed,
            initial_prices,
            strategies,
        })
    }

    pub fn run_settings(&self) -> RunSettings {
        RunSettings {
            starting_cash: self.starting_cash,
            horizon: self.horizon,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulationOutput {
    pub aggregates: Vec<TeamWeekAggregate>,
    pub series: PriceSeries,
    pub report: ComparisonReport,
}

/// Normalize matches and build the price series.
pub fn build_price_series(
    matches: &[MatchRecord],
    initial_prices: &BTreeMap<String, f64>,
) -> Result<(Vec<TeamWeekAggregate>, PriceSeries), StockError> {
    let aggregates = normalize(matches);
    let series = PriceSeries::build(&aggregates, initial_prices)?;
    tracing::info!(
        matches = matches.len(),
        rows = aggregates.len(),
        teams = series.team_count(),
        max_week = series.max_week(),
        "built price series"
    );
    Ok((aggregates, series))
}

pub fn run_simulation(
    matches: &[MatchRecord],
    config: &SimulationConfig,
) -> Result<SimulationOutput, StockError> {
    let (aggregates, series) = build_price_series(matches, &config.initial_prices)?;
    let results = run_all(
        &config.strategies,
        &series,
        config.run_settings(),
        config.seed,
    )?;
    Ok(SimulationOutput {
        aggregates,
        series,
        report: ComparisonReport::new(results),
    })
}

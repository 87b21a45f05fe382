//! Fixed-allocation strategies and the runner that values them week by week.
//!
//! Every strategy splits the starting cash equally across its teams at
//! week 0 and then holds; only the team selection differs.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;

use crate::domain::error::StockError;
use crate::domain::portfolio::{Portfolio, Transaction};
use crate::domain::price_series::PriceSeries;

pub const DEFAULT_RANDOM_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamSelection {
    /// An explicit list of teams.
    Fixed(Vec<String>),
    /// `count` teams drawn with replacement from every team in the series.
    Random { count: usize },
    /// Every team in the series.
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("empty team selection")]
    Empty,

    #[error("empty token in team list")]
    EmptyToken,

    #[error("duplicate team: {0}")]
    DuplicateTeam(String),

    #[error("invalid random count: {0}")]
    InvalidCount(String),
}

impl TeamSelection {
    /// Parse `all`, `random(N)` or a comma-separated team list.
    pub fn parse(input: &str) -> Result<Self, SelectionError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SelectionError::Empty);
        }
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(TeamSelection::All);
        }
        if let Some(inner) = trimmed
            .strip_prefix("random(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let count: usize = inner
                .trim()
                .parse()
                .map_err(|_| SelectionError::InvalidCount(inner.trim().to_string()))?;
            if count == 0 {
                return Err(SelectionError::InvalidCount(inner.trim().to_string()));
            }
            return Ok(TeamSelection::Random { count });
        }

        let mut teams = Vec::new();
        let mut seen = HashSet::new();
        for token in trimmed.split(',') {
            let team = token.trim();
            if team.is_empty() {
                return Err(SelectionError::EmptyToken);
            }
            if !seen.insert(team) {
                return Err(SelectionError::DuplicateTeam(team.to_string()));
            }
            teams.push(team.to_string());
        }
        Ok(TeamSelection::Fixed(teams))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Strategy {
    pub name: String,
    pub selection: TeamSelection,
}

impl Strategy {
    pub fn fixed(name: &str, teams: &[&str]) -> Self {
        Strategy {
            name: name.to_string(),
            selection: TeamSelection::Fixed(teams.iter().map(|t| t.to_string()).collect()),
        }
    }

    /// The four portfolios compared for the 2023/24 Premier League season.
    pub fn reference_set() -> Vec<Strategy> {
        vec![
            Strategy::fixed(
                "core_six",
                &[
                    "Arsenal",
                    "Chelsea",
                    "Liverpool",
                    "Man City",
                    "Man United",
                    "Tottenham",
                ],
            ),
            Strategy::fixed(
                "underdogs",
                &["Sheffield United", "Burnley", "Luton", "Fulham"],
            ),
            Strategy {
                name: "random_five".to_string(),
                selection: TeamSelection::Random {
                    count: DEFAULT_RANDOM_COUNT,
                },
            },
            Strategy {
                name: "benchmark_all".to_string(),
                selection: TeamSelection::All,
            },
        ]
    }

    /// Teams to buy, in purchase order. Random draws keep duplicates.
    pub fn resolve_teams<R: Rng + ?Sized>(
        &self,
        series: &PriceSeries,
        rng: &mut R,
    ) -> Result<Vec<String>, StockError> {
        let teams: Vec<String> = match &self.selection {
            TeamSelection::Fixed(teams) => {
                if let Some(unknown) = teams.iter().find(|t| !series.contains_team(t)) {
                    return Err(StockError::configuration(format!(
                        "strategy {} references unknown team {unknown}",
                        self.name
                    )));
                }
                teams.clone()
            }
            TeamSelection::Random { count } => {
                let all: Vec<&str> = series.teams().collect();
                if all.is_empty() {
                    Vec::new()
                } else {
                    (0..*count)
                        .map(|_| all[rng.gen_range(0..all.len())].to_string())
                        .collect()
                }
            }
            TeamSelection::All => series.teams().map(str::to_string).collect(),
        };

        if teams.is_empty() {
            return Err(StockError::configuration(format!(
                "strategy {} selects no teams",
                self.name
            )));
        }
        Ok(teams)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValuePoint {
    pub week: u32,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyResult {
    pub name: String,
    pub teams: Vec<String>,
    pub values: Vec<ValuePoint>,
    pub ledger: Vec<Transaction>,
}

impl StrategyResult {
    pub fn first_value(&self) -> Option<f64> {
        self.values.first().map(|p| p.value)
    }

    pub fn last_value(&self) -> Option<f64> {
        self.values.last().map(|p| p.value)
    }
}

/// Parameters shared by every strategy run in one simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSettings {
    pub starting_cash: f64,
    /// Number of weeks valued, starting at week 0.
    pub horizon: u32,
}

/// Buy the strategy's teams at week 0 and value the portfolio for every
/// week in `0..horizon`.
pub fn run_strategy<R: Rng + ?Sized>(
    strategy: &Strategy,
    series: &PriceSeries,
    settings: RunSettings,
    rng: &mut R,
) -> Result<StrategyResult, StockError> {
    let teams = strategy.resolve_teams(series, rng)?;
    let split = settings.starting_cash / teams.len() as f64;

    tracing::info!(
        strategy = %strategy.name,
        teams = teams.len(),
        split,
        "allocating"
    );

    let mut portfolio = Portfolio::new(settings.starting_cash);
    for team in &teams {
        portfolio.buy(series, team, 0, split)?;
    }

    let values = (0..settings.horizon)
        .map(|week| {
            portfolio
                .value(series, week)
                .map(|value| ValuePoint { week, value })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(StrategyResult {
        name: strategy.name.clone(),
        teams,
        values,
        ledger: portfolio.ledger().to_vec(),
    })
}

/// Run every strategy against the same series. Random selections draw from
/// a single generator seeded with `seed`, in strategy order.
pub fn run_all(
    strategies: &[Strategy],
    series: &PriceSeries,
    settings: RunSettings,
    seed: u64,
) -> Result<Vec<StrategyResult>, StockError> {
    let mut rng = StdRng::seed_from_u64(seed);
    strategies
        .iter()
        .map(|strategy| run_strategy(strategy, series, settings, &mut rng))
        .collect()
}

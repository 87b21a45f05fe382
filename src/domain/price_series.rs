//! Synthetic weekly share prices derived from team results.
//!
//! Each played week moves a team's price by a linear score of its results:
//! +5% per win, -5% per loss, +/-0.5% per goal scored/conceded. Prices
//! compound from a configured initial price at week 0, and weeks without a
//! match carry the last known price forward so every (team, week) cell in
//! `0..=max_week` is defined.

use crate::domain::error::StockError;
use crate::domain::team_week::TeamWeekAggregate;
use std::collections::BTreeMap;

pub const WIN_CHANGE: f64 = 0.05;
pub const DRAW_CHANGE: f64 = 0.0;
pub const LOSS_CHANGE: f64 = -0.05;
pub const GOAL_CHANGE: f64 = 0.005;

/// Fractional price change for one (team, week) row.
pub fn weekly_change(row: &TeamWeekAggregate) -> f64 {
    row.wins as f64 * WIN_CHANGE
        + row.draws as f64 * DRAW_CHANGE
        + row.losses as f64 * LOSS_CHANGE
        + row.goals_scored as f64 * GOAL_CHANGE
        - row.goals_conceded as f64 * GOAL_CHANGE
}

pub fn weekly_multiplier(row: &TeamWeekAggregate) -> f64 {
    1.0 + weekly_change(row)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    prices: BTreeMap<String, Vec<f64>>,
    max_week: u32,
}

impl PriceSeries {
    /// Build a dense series for every team in `initial_prices`.
    ///
    /// Every team in `rows` must have an initial price and every priced team
    /// must appear in `rows`.
    pub fn build(
        rows: &[TeamWeekAggregate],
        initial_prices: &BTreeMap<String, f64>,
    ) -> Result<Self, StockError> {
        for (team, &price) in initial_prices {
            if !price.is_finite() || price <= 0.0 {
                return Err(StockError::configuration(format!(
                    "initial price for {team} must be positive, got {price}"
                )));
            }
        }

        let mut by_team: BTreeMap<&str, Vec<&TeamWeekAggregate>> = BTreeMap::new();
        for row in rows {
            by_team.entry(row.team.as_str()).or_default().push(row);
        }

        if let Some(team) = by_team.keys().find(|t| !initial_prices.contains_key(**t)) {
            return Err(StockError::configuration(format!(
                "no initial price configured for {team}"
            )));
        }
        if let Some(team) = initial_prices
            .keys()
            .find(|t| !by_team.contains_key(t.as_str()))
        {
            return Err(StockError::configuration(format!(
                "initial price configured for unknown team {team}"
            )));
        }

        let max_week = rows.iter().map(|r| r.week).max().unwrap_or(0);
        let mut prices = BTreeMap::new();

        for (team, mut team_rows) in by_team {
            let initial = initial_prices[team];
            team_rows.sort_by_key(|r| r.week);

            let mut played: BTreeMap<u32, f64> = BTreeMap::new();
            let mut cumulative = 1.0;
            for row in team_rows {
                cumulative *= weekly_multiplier(row);
                let price = initial * cumulative;
                if !price.is_finite() || price <= 0.0 {
                    return Err(StockError::InvalidPrice {
                        team: team.to_string(),
                        week: row.week,
                        price,
                    });
                }
                played.insert(row.week, price);
            }

            prices.insert(team.to_string(), fill_weeks(initial, &played, max_week));
        }

        Ok(PriceSeries { prices, max_week })
    }

    pub fn max_week(&self) -> u32 {
        self.max_week
    }

    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.prices.keys().map(String::as_str)
    }

    pub fn team_count(&self) -> usize {
        self.prices.len()
    }

    pub fn contains_team(&self, team: &str) -> bool {
        self.prices.contains_key(team)
    }

    pub fn price(&self, team: &str, week: u32) -> Result<f64, StockError> {
        self.prices
            .get(team)
            .and_then(|series| series.get(week as usize))
            .copied()
            .ok_or_else(|| StockError::DataGap {
                team: team.to_string(),
                week,
            })
    }

    /// Prices for weeks `0..=max_week`, indexed by week.
    pub fn series(&self, team: &str) -> Option<&[f64]> {
        self.prices.get(team).map(Vec::as_slice)
    }

    /// Every team's price in `week`, ordered by team.
    pub fn prices_at(&self, week: u32) -> Result<Vec<(&str, f64)>, StockError> {
        self.teams()
            .map(|team| self.price(team, week).map(|p| (team, p)))
            .collect()
    }
}

/// Week 0 is the initial price; later weeks take the played price or the
/// last known one.
fn fill_weeks(initial: f64, played: &BTreeMap<u32, f64>, max_week: u32) -> Vec<f64> {
    let mut last = initial;
    let mut dense = Vec::with_capacity(max_week as usize + 1);
    dense.push(initial);
    for week in 1..=max_week {
        if let Some(&price) = played.get(&week) {
            last = price;
        }
        dense.push(last);
    }
    dense
}

//! Per-team weekly aggregation of match results.
//!
//! Every match is split into a home and an away row, bucketed into 7-day
//! weeks anchored at the earliest match date (week 1), then summed per
//! (team, week). Teams with no match in a week get no row for it.

use crate::domain::match_record::{MatchRecord, MatchResult};
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamWeekAggregate {
    pub team: String,
    pub week: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_scored: u32,
    pub goals_conceded: u32,
}

impl TeamWeekAggregate {
    pub fn matches_played(&self) -> u32 {
        self.wins + self.draws + self.losses
    }

    fn record(&mut self, result: MatchResult, scored: u32, conceded: u32) {
        match result {
            MatchResult::Win => self.wins += 1,
            MatchResult::Draw => self.draws += 1,
            MatchResult::Loss => self.losses += 1,
        }
        self.goals_scored = self.goals_scored.saturating_add(scored);
        self.goals_conceded = self.goals_conceded.saturating_add(conceded);
    }
}

/// Week number of `date` relative to `season_start` (which is week 1).
pub fn week_number(season_start: NaiveDate, date: NaiveDate) -> u32 {
    let days = (date - season_start).num_days().max(0);
    (days / 7) as u32 + 1
}

/// Aggregate matches into one row per (team, week), ordered by week then team.
pub fn normalize(matches: &[MatchRecord]) -> Vec<TeamWeekAggregate> {
    let Some(season_start) = matches.iter().map(|m| m.date).min() else {
        return Vec::new();
    };

    let mut rows: BTreeMap<(u32, &str), TeamWeekAggregate> = BTreeMap::new();

    for m in matches {
        let week = week_number(season_start, m.date);
        let sides = [
            (&m.home_team, m.home_result(), m.home_goals, m.away_goals),
            (&m.away_team, m.away_result(), m.away_goals, m.home_goals),
        ];
        for (team, result, scored, conceded) in sides {
            rows.entry((week, team.as_str()))
                .or_insert_with(|| TeamWeekAggregate {
                    team: team.clone(),
                    week,
                    ..Default::default()
                })
                .record(result, scored, conceded);
        }
    }

    rows.into_values().collect()
}

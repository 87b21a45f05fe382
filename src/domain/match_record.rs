//! Match record representation.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u32,
    pub away_goals: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchResult {
    Win,
    Draw,
    Loss,
}

impl MatchResult {
    /// Result for the side that scored `scored` against `conceded`.
    pub fn from_goals(scored: u32, conceded: u32) -> Self {
        match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => MatchResult::Win,
            std::cmp::Ordering::Less => MatchResult::Loss,
            std::cmp::Ordering::Equal => MatchResult::Draw,
        }
    }
}

impl MatchRecord {
    pub fn home_result(&self) -> MatchResult {
        MatchResult::from_goals(self.home_goals, self.away_goals)
    }

    pub fn away_result(&self) -> MatchResult {
        MatchResult::from_goals(self.away_goals, self.home_goals)
    }
}

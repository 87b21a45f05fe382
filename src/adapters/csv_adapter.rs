//! CSV match file adapter.
//!
//! Reads results files in the football-data.co.uk layout: columns are found
//! by header name (`Date`, `HomeTeam`, `AwayTeam`, `FTHG`, `FTAG`) and any
//! other columns are ignored.

use crate::domain::error::StockError;
use crate::domain::match_record::MatchRecord;
use crate::ports::match_port::MatchDataPort;
use chrono::NaiveDate;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

const DATE: &str = "Date";
const HOME_TEAM: &str = "HomeTeam";
const AWAY_TEAM: &str = "AwayTeam";
const HOME_GOALS: &str = "FTHG";
const AWAY_GOALS: &str = "FTAG";
/// Highest score accepted for one side of a fixture.
const MAX_GOALS: u32 = 99;

pub struct CsvMatchAdapter {
    path: PathBuf,
}

impl CsvMatchAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Parse match rows from any reader. Rows without a final score are
    /// skipped.
    pub fn parse_reader<R: Read>(reader: R) -> Result<Vec<MatchRecord>, StockError> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers().map_err(|e| StockError::MatchData {
            reason: format!("CSV header error: {}", e),
        })?;
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}') == name)
                .ok_or_else(|| StockError::MatchData {
                    reason: format!("missing {} column", name),
                })
        };
        let date_col = column(DATE)?;
        let home_col = column(HOME_TEAM)?;
        let away_col = column(AWAY_TEAM)?;
        let home_goals_col = column(HOME_GOALS)?;
        let away_goals_col = column(AWAY_GOALS)?;

        let mut matches = Vec::new();

        for (line, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| StockError::MatchData {
                reason: format!("CSV parse error: {}", e),
            })?;
            let field = |idx: usize| record.get(idx).unwrap_or("");

            if field(date_col).is_empty() {
                continue;
            }
            if field(home_goals_col).is_empty() || field(away_goals_col).is_empty() {
                tracing::warn!(
                    row = line + 2,
                    home = field(home_col),
                    away = field(away_col),
                    "skipping fixture without a final score"
                );
                continue;
            }

            let date = parse_match_date(field(date_col))?;
            let home_goals = parse_goals(field(home_goals_col), HOME_GOALS)?;
            let away_goals = parse_goals(field(away_goals_col), AWAY_GOALS)?;

            let home_team = field(home_col);
            let away_team = field(away_col);
            if home_team.is_empty() || away_team.is_empty() {
                return Err(StockError::MatchData {
                    reason: format!("missing team name on row {}", line + 2),
                });
            }

            matches.push(MatchRecord {
                date,
                home_team: home_team.to_string(),
                away_team: away_team.to_string(),
                home_goals,
                away_goals,
            });
        }

        Ok(matches)
    }
}

impl MatchDataPort for CsvMatchAdapter {
    fn fetch_matches(&self) -> Result<Vec<MatchRecord>, StockError> {
        let file = File::open(&self.path).map_err(|e| StockError::MatchData {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        let matches = Self::parse_reader(file)?;
        if matches.is_empty() {
            return Err(StockError::NoMatches {
                source_name: self.source_name(),
            });
        }
        tracing::info!(path = %self.path.display(), matches = matches.len(), "loaded matches");
        Ok(matches)
    }

    fn source_name(&self) -> String {
        self.path.display().to_string()
    }
}

/// `dd/mm/yyyy`, `dd/mm/yy` (older seasons) or ISO `yyyy-mm-dd`.
pub fn parse_match_date(value: &str) -> Result<NaiveDate, StockError> {
    let format = match value.rsplit_once('/') {
        Some((_, year)) if year.len() == 2 => "%d/%m/%y",
        Some(_) => "%d/%m/%Y",
        None => "%Y-%m-%d",
    };
    NaiveDate::parse_from_str(value, format).map_err(|e| StockError::MatchData {
        reason: format!("invalid date {:?}: {}", value, e),
    })
}

fn parse_goals(value: &str, column: &str) -> Result<u32, StockError> {
    // Some exports write goals as floats ("2.0").
    let goals = value
        .parse::<u32>()
        .ok()
        .or_else(|| {
            value
                .parse::<f64>()
                .ok()
                .filter(|g| *g >= 0.0 && g.fract() == 0.0)
                .map(|g| g as u32)
        })
        .filter(|g| *g <= MAX_GOALS)
        .ok_or_else(|| StockError::MatchData {
            reason: format!("invalid {} value {:?}", column, value),
        })?;
    Ok(goals)
}

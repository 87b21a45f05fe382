#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::io::Write;
use teamstock::domain::error::StockError;
pub use teamstock::domain::match_record::MatchRecord;
use teamstock::domain::price_series::PriceSeries;
use teamstock::domain::team_week::normalize;
use teamstock::ports::match_port::MatchDataPort;

pub struct MockMatchPort {
    pub matches: Vec<MatchRecord>,
    pub error: Option<String>,
}

impl MockMatchPort {
    pub fn new() -> Self {
        Self {
            matches: Vec::new(),
            error: None,
        }
    }

    pub fn with_match(mut self, record: MatchRecord) -> Self {
        self.matches.push(record);
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl MatchDataPort for MockMatchPort {
    fn fetch_matches(&self) -> Result<Vec<MatchRecord>, StockError> {
        if let Some(reason) = &self.error {
            return Err(StockError::MatchData {
                reason: reason.clone(),
            });
        }
        if self.matches.is_empty() {
            return Err(StockError::NoMatches {
                source_name: self.source_name(),
            });
        }
        Ok(self.matches.clone())
    }

    fn source_name(&self) -> String {
        "mock".to_string()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Fixture played `week - 1` weeks after 2023-08-11.
pub fn fixture(week: u32, home: &str, away: &str, home_goals: u32, away_goals: u32) -> MatchRecord {
    MatchRecord {
        date: date(2023, 8, 11) + chrono::Duration::days(7 * (week as i64 - 1)),
        home_team: home.to_string(),
        away_team: away.to_string(),
        home_goals,
        away_goals,
    }
}

pub fn prices(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(team, price)| (team.to_string(), *price))
        .collect()
}

pub fn series_from(matches: &[MatchRecord], initial: &[(&str, f64)]) -> PriceSeries {
    PriceSeries::build(&normalize(matches), &prices(initial)).unwrap()
}

/// A beats B 3-0 in week 1, B and A draw 1-1 in week 2.
pub fn two_team_season() -> Vec<MatchRecord> {
    vec![fixture(1, "A", "B", 3, 0), fixture(2, "B", "A", 1, 1)]
}

pub fn write_temp_file(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub const SEASON_CSV: &str = "Div,Date,Time,HomeTeam,AwayTeam,FTHG,FTAG,FTR\n\
E0,11/08/2023,20:00,Burnley,Man City,0,3,A\n\
E0,12/08/2023,12:30,Arsenal,Nott'm Forest,2,1,H\n\
E0,12/08/2023,15:00,Luton,Chelsea,1,1,D\n\
E0,19/08/2023,15:00,Man City,Arsenal,1,0,H\n\
E0,19/08/2023,15:00,Nott'm Forest,Burnley,2,2,D\n\
E0,20/08/2023,16:30,Chelsea,Luton,4,0,H\n\
E0,26/08/2023,15:00,Arsenal,Burnley,3,1,H\n\
E0,27/08/2023,14:00,Luton,Man City,0,2,A\n";

pub const SEASON_INI: &str = r#"
[simulation]
starting_cash = 1000
horizon = 4
seed = 7

[prices]
Arsenal = 150
Burnley = 70
Chelsea = 120
Luton = 60
Man City = 150
Nott'm Forest = 100

[strategies]
big = Arsenal, Chelsea, Man City
small = Burnley, Luton
mixed = random(3)
everyone = all
"#;

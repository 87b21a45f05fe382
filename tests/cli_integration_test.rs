//! CLI integration tests for command orchestration.
//!
//! Tests cover:
//! - Matches path resolution (override, relative to config, missing)
//! - Validate with real INI files on disk
//! - Simulate end to end writing the CSV report
//! - Prices for a single week and the full table
//! - Exit codes for config, match data and data-gap failures

mod common;

use common::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use teamstock::adapters::file_config_adapter::FileConfigAdapter;
use teamstock::cli::{self, Cli, Command};
use teamstock::domain::error::StockError;
use teamstock::domain::simulation::SimulationConfig;

fn same_code(actual: ExitCode, expected: ExitCode) -> bool {
    format!("{actual:?}") == format!("{expected:?}")
}

fn run(command: Command) -> ExitCode {
    cli::run(Cli {
        log_level: "error".to_string(),
        command,
    })
}

/// Config and season CSV side by side in a temp dir, config naming the CSV
/// by relative path.
fn season_dir(ini: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(dir.path().join("season.csv"), SEASON_CSV).unwrap();
    let config_path = dir.path().join("sim.ini");
    fs::write(&config_path, ini.replace("[simulation]", "[simulation]\nmatches = season.csv")).unwrap();
    (dir, config_path)
}

mod matches_path {
    use super::*;

    fn config(ini: &str) -> SimulationConfig {
        SimulationConfig::from_config(&FileConfigAdapter::from_string(ini).unwrap()).unwrap()
    }

    #[test]
    fn override_takes_precedence() {
        let config = config("[simulation]\nmatches = season.csv\n[prices]\nA = 1\n");
        let path = PathBuf::from("/data/other.csv");
        let resolved =
            cli::resolve_matches_path(Some(&path), Path::new("/cfg/sim.ini"), &config).unwrap();
        assert_eq!(resolved, path);
    }

    #[test]
    fn relative_path_is_next_to_config() {
        let config = config("[simulation]\nmatches = data/season.csv\n[prices]\nA = 1\n");
        let resolved = cli::resolve_matches_path(None, Path::new("/cfg/sim.ini"), &config).unwrap();
        assert_eq!(resolved, PathBuf::from("/cfg/data/season.csv"));
    }

    #[test]
    fn absolute_path_is_kept() {
        let config = config("[simulation]\nmatches = /srv/season.csv\n[prices]\nA = 1\n");
        let resolved = cli::resolve_matches_path(None, Path::new("/cfg/sim.ini"), &config).unwrap();
        assert_eq!(resolved, PathBuf::from("/srv/season.csv"));
    }

    #[test]
    fn missing_matches_is_config_error() {
        let config = config("[prices]\nA = 1\n");
        let err = cli::resolve_matches_path(None, Path::new("/cfg/sim.ini"), &config).unwrap_err();
        assert!(matches!(err, StockError::ConfigMissing { key, .. } if key == "matches"));
    }
}

mod validate {
    use super::*;

    #[test]
    fn valid_config_succeeds() {
        let file = write_temp_file(SEASON_INI, ".ini");
        let code = run(Command::Validate {
            config: file.path().to_path_buf(),
        });
        assert!(same_code(code, ExitCode::SUCCESS));
    }

    #[test]
    fn missing_file_is_config_error() {
        let code = run(Command::Validate {
            config: PathBuf::from("/nonexistent/sim.ini"),
        });
        assert!(same_code(code, ExitCode::from(2)));
    }

    #[test]
    fn strategy_with_unpriced_team_fails() {
        let ini = "[prices]\nArsenal = 150\n[strategies]\npair = Arsenal, Luton\n";
        let file = write_temp_file(ini, ".ini");
        let code = run(Command::Validate {
            config: file.path().to_path_buf(),
        });
        assert!(same_code(code, ExitCode::from(2)));
    }

    #[test]
    fn bad_horizon_fails() {
        let ini = "[simulation]\nhorizon = soon\n[prices]\nArsenal = 150\n";
        let file = write_temp_file(ini, ".ini");
        let code = run(Command::Validate {
            config: file.path().to_path_buf(),
        });
        assert!(same_code(code, ExitCode::from(2)));
    }
}

mod simulate {
    use super::*;

    #[test]
    fn writes_value_and_summary_reports() {
        let (dir, config_path) = season_dir(SEASON_INI);
        let output = dir.path().join("values.csv");

        let code = run(Command::Simulate {
            config: config_path,
            matches: None,
            output: Some(output.clone()),
            seed: None,
        });
        assert!(same_code(code, ExitCode::SUCCESS));

        let values = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = values.lines().collect();
        assert_eq!(lines[0], "week,big,everyone,mixed,small");
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("0,"));

        let summary = fs::read_to_string(dir.path().join("values_summary.csv")).unwrap();
        assert_eq!(summary.lines().count(), 5);
        assert!(summary.contains("small,Burnley;Luton,"));
    }

    #[test]
    fn seed_override_is_reproducible() {
        let (dir, config_path) = season_dir(SEASON_INI);
        let first = dir.path().join("first.csv");
        let second = dir.path().join("second.csv");

        for output in [&first, &second] {
            let code = run(Command::Simulate {
                config: config_path.clone(),
                matches: None,
                output: Some(output.clone()),
                seed: Some(1234),
            });
            assert!(same_code(code, ExitCode::SUCCESS));
        }

        assert_eq!(
            fs::read_to_string(&first).unwrap(),
            fs::read_to_string(&second).unwrap()
        );
    }

    #[test]
    fn matches_override_is_used() {
        let dir = tempfile::TempDir::new().unwrap();
        let matches = dir.path().join("elsewhere.csv");
        fs::write(&matches, SEASON_CSV).unwrap();
        let config = write_temp_file(SEASON_INI, ".ini");
        let output = dir.path().join("values.csv");

        let code = run(Command::Simulate {
            config: config.path().to_path_buf(),
            matches: Some(matches),
            output: Some(output.clone()),
            seed: None,
        });
        assert!(same_code(code, ExitCode::SUCCESS));
        assert!(output.exists());
    }

    #[test]
    fn missing_match_file_is_match_data_error() {
        let config = write_temp_file(SEASON_INI, ".ini");
        let dir = tempfile::TempDir::new().unwrap();

        let code = run(Command::Simulate {
            config: config.path().to_path_buf(),
            matches: Some(dir.path().join("absent.csv")),
            output: Some(dir.path().join("values.csv")),
            seed: None,
        });
        assert!(same_code(code, ExitCode::from(3)));
    }

    #[test]
    fn horizon_past_season_is_data_gap() {
        let ini = SEASON_INI.replace("horizon = 4", "horizon = 10");
        let (dir, config_path) = season_dir(&ini);

        let code = run(Command::Simulate {
            config: config_path,
            matches: None,
            output: Some(dir.path().join("values.csv")),
            seed: None,
        });
        assert!(same_code(code, ExitCode::from(4)));
    }

    #[test]
    fn unpriced_team_in_matches_is_config_error() {
        let ini = SEASON_INI.replace("Luton = 60\n", "");
        let (dir, config_path) = season_dir(&ini);

        let code = run(Command::Simulate {
            config: config_path,
            matches: None,
            output: Some(dir.path().join("values.csv")),
            seed: None,
        });
        assert!(same_code(code, ExitCode::from(2)));
    }
}

mod prices {
    use super::*;

    #[test]
    fn single_week_succeeds() {
        let (_dir, config_path) = season_dir(SEASON_INI);
        let code = run(Command::Prices {
            config: config_path,
            matches: None,
            week: Some(2),
        });
        assert!(same_code(code, ExitCode::SUCCESS));
    }

    #[test]
    fn full_table_succeeds() {
        let (_dir, config_path) = season_dir(SEASON_INI);
        let code = run(Command::Prices {
            config: config_path,
            matches: None,
            week: None,
        });
        assert!(same_code(code, ExitCode::SUCCESS));
    }

    #[test]
    fn week_out_of_range_is_data_gap() {
        let (_dir, config_path) = season_dir(SEASON_INI);
        let code = run(Command::Prices {
            config: config_path,
            matches: None,
            week: Some(40),
        });
        assert!(same_code(code, ExitCode::from(4)));
    }
}

mod logging {
    use super::*;
    use tracing::Level;

    #[test]
    fn parse_level_maps_names() {
        assert_eq!(cli::parse_level("debug"), Level::DEBUG);
        assert_eq!(cli::parse_level("INFO"), Level::INFO);
        assert_eq!(cli::parse_level("bogus"), Level::WARN);
    }

    #[test]
    fn init_logging_twice_is_harmless() {
        cli::init_logging("info");
        cli::init_logging("debug");
    }
}

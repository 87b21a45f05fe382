//! Configuration validation.
//!
//! Validates every simulation config field before any data is loaded.

use crate::domain::error::StockError;
use crate::domain::strategy::TeamSelection;
use crate::ports::config_port::ConfigPort;
use std::str::FromStr;

pub const SIMULATION: &str = "simulation";
pub const PRICES: &str = "prices";
pub const STRATEGIES: &str = "strategies";

pub fn validate_simulation_config(config: &dyn ConfigPort) -> Result<(), StockError> {
    validate_starting_cash(config)?;
    validate_horizon(config)?;
    validate_seed(config)?;
    validate_prices(config)?;
    validate_strategies(config)?;
    Ok(())
}

/// Parse an optional `[section] key` value, rejecting values that are
/// present but malformed.
pub(crate) fn parse_optional<T: FromStr>(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<T>, StockError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| StockError::ConfigInvalid {
                section: section.to_string(),
                key: key.to_string(),
                reason: format!("cannot parse {raw:?}"),
            }),
    }
}

fn validate_starting_cash(config: &dyn ConfigPort) -> Result<(), StockError> {
    if let Some(value) = parse_optional::<f64>(config, SIMULATION, "starting_cash")? {
        if !value.is_finite() || value <= 0.0 {
            return Err(StockError::ConfigInvalid {
                section: SIMULATION.to_string(),
                key: "starting_cash".to_string(),
                reason: "starting_cash must be positive".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_horizon(config: &dyn ConfigPort) -> Result<(), StockError> {
    if let Some(value) = parse_optional::<u32>(config, SIMULATION, "horizon")? {
        if value == 0 {
            return Err(StockError::ConfigInvalid {
                section: SIMULATION.to_string(),
                key: "horizon".to_string(),
                reason: "horizon must be at least 1 week".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_seed(config: &dyn ConfigPort) -> Result<(), StockError> {
    parse_optional::<u64>(config, SIMULATION, "seed")?;
    Ok(())
}

fn validate_prices(config: &dyn ConfigPort) -> Result<(), StockError> {
    let entries = config.section_entries(PRICES);
    if entries.is_empty() {
        return Err(StockError::ConfigMissing {
            section: PRICES.to_string(),
            key: "<team>".to_string(),
        });
    }
    for (team, raw) in entries {
        let valid = raw
            .trim()
            .parse::<f64>()
            .map(|p| p.is_finite() && p > 0.0)
            .unwrap_or(false);
        if !valid {
            return Err(StockError::ConfigInvalid {
                section: PRICES.to_string(),
                key: team,
                reason: format!("initial price must be a positive number, got {raw:?}"),
            });
        }
    }
    Ok(())
}

fn validate_strategies(config: &dyn ConfigPort) -> Result<(), StockError> {
    for (name, raw) in config.section_entries(STRATEGIES) {
        TeamSelection::parse(&raw).map_err(|e| StockError::ConfigInvalid {
            section: STRATEGIES.to_string(),
            key: name,
            reason: e.to_string(),
        })?;
    }
    Ok(())
}

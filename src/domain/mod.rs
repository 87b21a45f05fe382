//! Core domain types and logic.

pub mod match_record;
pub mod team_week;
pub mod price_series;
pub mod portfolio;
pub mod strategy;
pub mod comparison;
pub mod config_validation;
pub mod simulation;
pub mod error;

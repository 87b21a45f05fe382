//! teamstock: synthetic team share prices from match results, and
//! fixed-allocation portfolio strategies simulated against them.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;

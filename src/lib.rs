//! Meteor Entry - Atmospheric Entry and Ablation Simulator
//!
//! A library crate simulating a small body's fall through a planetary
//! atmosphere: trajectory, mass loss, breakup and ground impact.

pub mod atmosphere;
pub mod config;
pub mod impact;
pub mod outcome;
pub mod physics;
pub mod plugin;
pub mod scenarios;
pub mod simulation;
pub mod types;

#[cfg(test)]
pub mod test_utils;

pub use config::{ConfigError, SimulationConfig};
pub use outcome::{Outcome, OutcomeRecord};
pub use simulation::{FlightPhase, RunSummary, Simulation, run};

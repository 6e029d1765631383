//! Discrete-event simulation of a single-server, finite-capacity (M/M/1/K)
//! queue, with the closed-form loss probability for comparison.

pub mod config;
pub mod distribution;
pub mod error;
pub mod helpers;
pub mod queues;
pub mod simulation;
pub mod stats;
pub mod sweep;
pub mod theory;

pub use crate::config::SimulationConfig;
pub use crate::error::{Result, SimError};
pub use crate::simulation::{run_simulation, start_simulation, Simulation, SimulationReport};
pub use crate::stats::{ExperimentResult, JobRecord, StatisticsCollector};
pub use crate::sweep::{run_sweep, SweepConfig, SweepRow};

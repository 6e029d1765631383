//! Sweeps arrival rate and capacity, pairing each simulated rejection rate
//! with its closed-form value.

use std::path::Path;

use log::{debug, info};
use serde::Serialize;

use crate::config::{SimulationConfig, POPULATION, RAND_NUM, TRACE};
use crate::error::{Result, SimError};
use crate::simulation::run_simulation;
use crate::theory;

#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    /// μ, shared by every point.
    pub service_rate: f64,
    pub arrival_rates: Vec<f64>,
    pub capacities: Vec<usize>,
    pub job_count: usize,
    pub seed: u64,
    pub trace: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            service_rate: 100.,
            arrival_rates: (1..20).map(|n| 5. * n as f64).collect(),
            capacities: vec![10, 25, 50],
            job_count: POPULATION,
            seed: RAND_NUM,
            trace: TRACE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRow {
    pub capacity: usize,
    pub arrival_rate: f64,
    pub service_rate: f64,
    pub utilization: f64,
    pub theoretical_rejection: f64,
    /// P_K / Σ_{j<K} P_j, the ratio older reports printed as the theoretical rate.
    pub legacy_rejection_ratio: f64,
    pub simulated_rejection: f64,
    pub theoretical_mean_wait_time: f64,
    pub mean_wait_time: f64,
}

/// Runs one independent simulation per (capacity, arrival rate) pair, capacities outermost.
pub fn run_sweep(config: &SweepConfig) -> Result<Vec<SweepRow>> {
    if config.arrival_rates.is_empty() || config.capacities.is_empty() {
        return Err(SimError::InvalidConfig("sweep needs at least one arrival rate and one capacity".to_string()));
    }

    let mut rows = Vec::with_capacity(config.arrival_rates.len() * config.capacities.len());
    for &k in &config.capacities {
        for &lambda in &config.arrival_rates {
            let sim_config = SimulationConfig::from_rates(lambda, config.service_rate, k, config.job_count, config.seed)
                .with_trace(config.trace);
            let rho = lambda / config.service_rate;
            let result = run_simulation(&sim_config)?;
            let row = SweepRow {
                capacity: k,
                arrival_rate: lambda,
                service_rate: config.service_rate,
                utilization: rho,
                theoretical_rejection: theory::rejection_probability(rho, k),
                legacy_rejection_ratio: theory::admitted_to_rejected_ratio(rho, k),
                simulated_rejection: result.loss_probability(),
                theoretical_mean_wait_time: theory::mean_wait_time(lambda, config.service_rate, k),
                mean_wait_time: result.mean_wait_time,
            };
            debug!("Sweep point: {:?}", row);
            rows.push(row);
        }
    }
    Ok(rows)
}

/// Writes the sweep as CSV, one row per point, with a header line.
pub fn write_csv<P: AsRef<Path>>(path: P, rows: &[SweepRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    info!("Exported {} rows to '{}'", rows.len(), path.as_ref().display());
    Ok(())
}

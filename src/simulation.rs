//! Entry point of the simulation core: one call, one independent run.

use log::debug;

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::queues::poisson_generator::PoissonGenerator;
use crate::queues::scheduler::{RunSummary, Scheduler};
use crate::queues::QueueSystem;
use crate::stats::{ExperimentResult, StatisticsCollector};

/// Everything a finished run leaves behind.
pub struct SimulationReport {
    pub result: ExperimentResult,
    pub summary: RunSummary,
    pub stats: StatisticsCollector,
}

pub struct Simulation {
    config: SimulationConfig,
    scheduler: Scheduler<QueueSystem>,
    system: QueueSystem,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let system = QueueSystem::new(config.capacity, config.seed, config.trace);
        let mut scheduler = Scheduler::new();
        scheduler.spawn(Box::new(PoissonGenerator::new(
            config.mean_interarrival_time,
            config.mean_service_time,
            config.job_count as u64,
        )))?;
        Ok(Simulation { config, scheduler, system })
    }

    pub fn run(mut self) -> Result<SimulationReport> {
        debug!("Starting run: {:?}", self.config);
        let summary = self.scheduler.run(&mut self.system)?;
        let stats = self.system.stats;
        let result = ExperimentResult {
            mean_wait_time: stats.mean_wait_time(),
            loss_count: stats.loss_count(),
            served_count: stats.served_count(),
            job_count: self.config.job_count,
            end_time: summary.end_time,
        };
        debug!("Run done after {} events: {:?}", summary.events_processed, result);
        Ok(SimulationReport { result, summary, stats })
    }
}

/// Runs one M/M/1/K simulation described by `config`.
pub fn run_simulation(config: &SimulationConfig) -> Result<ExperimentResult> {
    Ok(Simulation::new(config.clone())?.run()?.result)
}

/// Returns `(mean waiting time, loss count)`; the mean is NaN if every arrival was lost.
pub fn start_simulation(mean_ia_time: f64, mean_svc_time: f64, k_capacity: usize, num_packets: usize, random_seed: u64) -> Result<(f64, usize)> {
    let config = SimulationConfig::new(mean_ia_time, mean_svc_time, k_capacity, num_packets, random_seed);
    let result = run_simulation(&config)?;
    Ok((result.mean_wait_time, result.loss_count))
}

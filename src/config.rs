use crate::error::{Result, SimError};

pub const MEAN_INTERARRIVAL_TIME: f64 = 0.0105;
pub const MEAN_SERVICE_TIME: f64 = 0.01;
pub const POPULATION: usize = 1000;
pub const RAND_NUM: u64 = 1234;
pub const SYSTEM_CAPACITY: usize = 10;
pub const TRACE: bool = true;

/// Parameters of one M/M/1/K run. Times are in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub mean_interarrival_time: f64,
    pub mean_service_time: f64,
    pub job_count: usize,
    pub seed: u64,
    /// Maximum number of customers in the system, the one in service included.
    pub capacity: usize,
    /// Keep per-job timelines and occupancy samples.
    pub trace: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            mean_interarrival_time: MEAN_INTERARRIVAL_TIME,
            mean_service_time: MEAN_SERVICE_TIME,
            job_count: POPULATION,
            seed: RAND_NUM,
            capacity: SYSTEM_CAPACITY,
            trace: TRACE,
        }
    }
}

impl SimulationConfig {
    pub fn new(mean_interarrival_time: f64, mean_service_time: f64, capacity: usize, job_count: usize, seed: u64) -> Self {
        SimulationConfig {
            mean_interarrival_time,
            mean_service_time,
            job_count,
            seed,
            capacity,
            ..Default::default()
        }
    }

    /// Builds a config from an arrival rate λ and a service rate μ.
    pub fn from_rates(arrival_rate: f64, service_rate: f64, capacity: usize, job_count: usize, seed: u64) -> Self {
        SimulationConfig::new(1. / arrival_rate, 1. / service_rate, capacity, job_count, seed)
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn utilization(&self) -> f64 {
        self.mean_service_time / self.mean_interarrival_time
    }

    pub fn validate(&self) -> Result<()> {
        check_positive("mean interarrival time", self.mean_interarrival_time)?;
        check_positive("mean service time", self.mean_service_time)?;
        if self.capacity == 0 {
            return Err(SimError::InvalidConfig("capacity must be at least 1".to_string()));
        }
        if self.job_count == 0 {
            return Err(SimError::InvalidConfig("job count must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn check_positive(what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0. {
        Ok(())
    }
    else {
        Err(SimError::InvalidConfig(format!("{} must be a positive finite number, got {}", what, value)))
    }
}

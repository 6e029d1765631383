pub mod request;
pub mod scheduler;
pub mod server;
pub mod job;
pub mod poisson_generator;

use crate::distribution::VariateSource;
use crate::stats::StatisticsCollector;

use self::server::ServerResource;

/// Shared state of one M/M/1/K run. Only the running task touches it.
pub struct QueueSystem {
    pub server: ServerResource,
    pub variates: VariateSource,
    pub stats: StatisticsCollector,
    /// Customers waiting or in service.
    pub occupancy: usize,
    pub capacity: usize,
}

impl QueueSystem {
    pub fn new(capacity: usize, seed: u64, trace: bool) -> Self {
        QueueSystem {
            server: ServerResource::new(),
            variates: VariateSource::new(seed),
            stats: StatisticsCollector::new(trace),
            occupancy: 0,
            capacity,
        }
    }

    pub fn is_full(&self) -> bool {
        self.occupancy >= self.capacity
    }
}

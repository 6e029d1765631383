use std::collections::BTreeMap;
use std::f64::NAN;

/// Timeline of one customer, kept only when tracing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JobRecord {
    pub id: u64,
    pub arrival_time: f64,
    pub grant_time: Option<f64>,
    pub departure_time: Option<f64>,
    pub rejected: bool,
}

/// Per-run waiting-time and loss bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct StatisticsCollector {
    trace: bool,
    wait_times: Vec<f64>,
    losses: Vec<f64>,
    departures: usize,
    peak_occupancy: usize,
    records: BTreeMap<u64, JobRecord>,
    occupancy_samples: Vec<(f64, usize)>,
}

impl StatisticsCollector {
    pub fn new(trace: bool) -> Self {
        StatisticsCollector {
            trace,
            ..Default::default()
        }
    }

    pub fn record_admission(&mut self, id: u64, now: f64, occupancy: usize) {
        self.peak_occupancy = self.peak_occupancy.max(occupancy);
        if self.trace {
            self.records.insert(id, JobRecord {
                id,
                arrival_time: now,
                grant_time: None,
                departure_time: None,
                rejected: false,
            });
            self.occupancy_samples.push((now, occupancy));
        }
    }

    pub fn record_loss(&mut self, id: u64, now: f64) {
        self.losses.push(now);
        if self.trace {
            self.records.insert(id, JobRecord {
                id,
                arrival_time: now,
                grant_time: None,
                departure_time: None,
                rejected: true,
            });
        }
    }

    pub fn record_wait(&mut self, id: u64, now: f64, wait: f64) {
        self.wait_times.push(wait);
        if let Some(record) = self.records.get_mut(&id) {
            record.grant_time = Some(now);
        }
    }

    pub fn record_departure(&mut self, id: u64, now: f64, occupancy: usize) {
        self.departures += 1;
        if let Some(record) = self.records.get_mut(&id) {
            record.departure_time = Some(now);
        }
        if self.trace {
            self.occupancy_samples.push((now, occupancy));
        }
    }

    /// Arithmetic mean of the recorded waits; NaN when no job was admitted.
    pub fn mean_wait_time(&self) -> f64 {
        if self.wait_times.is_empty() {
            NAN
        }
        else {
            statistical::mean(&self.wait_times)
        }
    }

    /// Sample standard deviation of the waits; NaN below two samples.
    pub fn wait_time_std_dev(&self) -> f64 {
        if self.wait_times.len() < 2 {
            NAN
        }
        else {
            statistical::standard_deviation(&self.wait_times, None)
        }
    }

    pub fn max_wait_time(&self) -> Option<f64> {
        self.wait_times.iter().cloned().fold(None, |acc, w| match acc {
            None => Some(w),
            Some(m) => Some(m.max(w)),
        })
    }

    pub fn loss_count(&self) -> usize {
        self.losses.len()
    }

    /// Jobs that reached the server.
    pub fn served_count(&self) -> usize {
        self.wait_times.len()
    }

    pub fn departure_count(&self) -> usize {
        self.departures
    }

    pub fn peak_occupancy(&self) -> usize {
        self.peak_occupancy
    }

    pub fn wait_times(&self) -> &[f64] {
        &self.wait_times
    }

    pub fn job_records(&self) -> impl Iterator<Item = &JobRecord> {
        self.records.values()
    }

    /// `(time, occupancy)` after every admission and departure.
    pub fn occupancy_samples(&self) -> &[(f64, usize)] {
        &self.occupancy_samples
    }
}

/// Outcome of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperimentResult {
    pub mean_wait_time: f64,
    pub loss_count: usize,
    pub served_count: usize,
    pub job_count: usize,
    pub end_time: f64,
}

impl ExperimentResult {
    pub fn loss_probability(&self) -> f64 {
        self.loss_count as f64 / self.job_count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_wait_is_nan_without_admissions() {
        let mut stats = StatisticsCollector::new(true);
        stats.record_loss(0, 1.0);
        assert!(stats.mean_wait_time().is_nan());
        assert!(stats.wait_time_std_dev().is_nan());
        assert_eq!(stats.max_wait_time(), None);
        assert_eq!(stats.loss_count(), 1);
    }

    #[test]
    fn aggregates_waits() {
        let mut stats = StatisticsCollector::new(false);
        stats.record_admission(0, 0.0, 1);
        stats.record_wait(0, 0.0, 0.0);
        stats.record_admission(1, 0.5, 2);
        stats.record_wait(1, 1.5, 1.0);
        stats.record_admission(2, 0.7, 3);
        stats.record_wait(2, 2.7, 2.0);

        assert!((stats.mean_wait_time() - 1.0).abs() < 1e-12);
        assert!((stats.wait_time_std_dev() - 1.0).abs() < 1e-12);
        assert_eq!(stats.max_wait_time(), Some(2.0));
        assert_eq!(stats.served_count(), 3);
        assert_eq!(stats.peak_occupancy(), 3);
        assert_eq!(stats.job_records().count(), 0);
    }

    #[test]
    fn tracing_keeps_job_timelines() {
        let mut stats = StatisticsCollector::new(true);
        stats.record_admission(0, 1.0, 1);
        stats.record_wait(0, 1.0, 0.0);
        stats.record_loss(1, 1.2);
        stats.record_departure(0, 2.0, 0);

        let records: Vec<&JobRecord> = stats.job_records().collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].grant_time, Some(1.0));
        assert_eq!(records[0].departure_time, Some(2.0));
        assert!(records[1].rejected);
        assert_eq!(stats.occupancy_samples(), &[(1.0, 1), (2.0, 0)]);
    }

    #[test]
    fn loss_probability_is_fraction_of_jobs() {
        let result = ExperimentResult {
            mean_wait_time: 0.1,
            loss_count: 25,
            served_count: 75,
            job_count: 100,
            end_time: 10.,
        };
        assert!((result.loss_probability() - 0.25).abs() < 1e-12);
    }
}

use log::trace;

use crate::error::Result;
use crate::queues::job::Job;
use crate::queues::request::Request;
use crate::queues::scheduler::{Context, Process, Yield};
use crate::queues::QueueSystem;

/// Poisson arrival process: waits an exponential gap, then spawns one job with
/// a freshly drawn service time, until `number` jobs exist.
pub struct PoissonGenerator {
    mean_ia_time: f64,
    mean_svc_time: f64,
    number: u64,
    spawned: u64,
    gap_elapsed: bool,
}

impl PoissonGenerator {
    pub fn new (mean_ia_time: f64, mean_svc_time: f64, number: u64) -> Self {
        PoissonGenerator {
            mean_ia_time,
            mean_svc_time,
            number,
            spawned: 0,
            gap_elapsed: false,
        }
    }
}

impl Process<QueueSystem> for PoissonGenerator {
    fn resume(&mut self, ctx: &mut Context<QueueSystem>) -> Result<Yield> {
        if self.gap_elapsed {
            let svc_time = ctx.state.variates.next_exponential(self.mean_svc_time);
            let req = Request::new(self.spawned, ctx.now(), svc_time);
            trace!("t={:.6} arrival of packet-{} (service {:.6})", ctx.now(), self.spawned, svc_time);
            ctx.spawn(Box::new(Job::new(req)))?;
            self.spawned += 1;
        }

        if self.spawned >= self.number {
            return Ok(Yield::Done);
        }

        let ia_time = ctx.state.variates.next_exponential(self.mean_ia_time);
        self.gap_elapsed = true;
        Ok(Yield::Timeout(ia_time))
    }

    fn name(&self) -> String {
        "job-generator".to_string()
    }
}

use log::trace;

use crate::error::Result;
use crate::queues::request::Request;
use crate::queues::scheduler::{Context, Process, Yield};
use crate::queues::server::Grant;
use crate::queues::QueueSystem;

#[derive(Debug, Clone, Copy, PartialEq)]
enum JobState {
    Arriving,
    Waiting,
    InService,
}

/// One customer going through admission, the server line and service.
pub struct Job {
    req: Request,
    state: JobState,
}

impl Job {
    pub fn new(req: Request) -> Self {
        Job {
            req,
            state: JobState::Arriving,
        }
    }

    fn arrive(&mut self, ctx: &mut Context<QueueSystem>) -> Result<Yield> {
        let now = ctx.now();
        let id = self.req.get_id();

        // K counts the customer in service too.
        if ctx.state.is_full() {
            trace!("t={:.6} packet-{} rejected (occupancy {})", now, id, ctx.state.occupancy);
            ctx.state.stats.record_loss(id, now);
            return Ok(Yield::Done);
        }

        ctx.state.occupancy += 1;
        let occupancy = ctx.state.occupancy;
        ctx.state.stats.record_admission(id, now, occupancy);

        let me = ctx.me();
        match ctx.state.server.request(me) {
            Grant::Immediate => ctx.wake(me)?,
            Grant::Queued { ahead } => {
                trace!("t={:.6} packet-{} queued behind {}", now, id, ahead);
            }
        }
        self.state = JobState::Waiting;
        Ok(Yield::Passivate)
    }

    fn start_service(&mut self, ctx: &mut Context<QueueSystem>) -> Result<Yield> {
        let now = ctx.now();
        let wait = now - self.req.get_arrival_time();
        trace!("t={:.6} packet-{} granted after {:.6}", now, self.req.get_id(), wait);
        ctx.state.stats.record_wait(self.req.get_id(), now, wait);
        self.state = JobState::InService;
        Ok(Yield::Timeout(self.req.get_service_time()))
    }

    fn depart(&mut self, ctx: &mut Context<QueueSystem>) -> Result<Yield> {
        let me = ctx.me();
        if let Some(next) = ctx.state.server.release(me)? {
            ctx.wake(next)?;
        }
        ctx.state.occupancy -= 1;

        let now = ctx.now();
        let occupancy = ctx.state.occupancy;
        trace!("t={:.6} packet-{} departs", now, self.req.get_id());
        ctx.state.stats.record_departure(self.req.get_id(), now, occupancy);
        Ok(Yield::Done)
    }
}

impl Process<QueueSystem> for Job {
    fn resume(&mut self, ctx: &mut Context<QueueSystem>) -> Result<Yield> {
        match self.state {
            JobState::Arriving => self.arrive(ctx),
            JobState::Waiting => self.start_service(ctx),
            JobState::InService => self.depart(ctx),
        }
    }

    fn name(&self) -> String {
        format!("Packet-{}", self.req.get_id())
    }
}

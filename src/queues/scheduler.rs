//! Logical clock and event loop.
//!
//! Every task is an explicit state machine implementing [`Process`]. The
//! scheduler owns the tasks and a time-ordered heap of wake-ups; `run` pops the
//! earliest wake-up, advances the clock and resumes exactly one task. A task
//! tells the scheduler how it suspends through the [`Yield`] it returns.

use log::trace;

use crate::error::{Result, SimError};
use crate::helpers::float_binaryheap::FloatBinaryHeap;

pub type TaskId = usize;

/// How a task gives control back to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Yield {
    /// Resume after the given simulated duration.
    Timeout(f64),
    /// Stay suspended until another task wakes this one up.
    Passivate,
    /// The task has finished and is dropped.
    Done,
}

pub trait Process<S> {
    fn resume(&mut self, ctx: &mut Context<S>) -> Result<Yield>;
    fn name(&self) -> String;
}

/// What a running task can see and do: the clock, the shared model state and
/// the scheduler's wake-up queue.
pub struct Context<'a, S> {
    scheduler: &'a mut Scheduler<S>,
    pub state: &'a mut S,
    me: TaskId,
}

impl<'a, S> Context<'a, S> {
    pub fn now(&self) -> f64 {
        self.scheduler.time
    }

    pub fn me(&self) -> TaskId {
        self.me
    }

    /// Registers a new task; it first runs in a follow-up event at the current time.
    pub fn spawn(&mut self, process: Box<dyn Process<S>>) -> Result<TaskId> {
        self.scheduler.spawn(process)
    }

    /// Schedules a suspended task to resume at the current time.
    pub fn wake(&mut self, task: TaskId) -> Result<()> {
        if task != self.me && !self.scheduler.is_live(task) {
            return Err(SimError::UnknownTask(task));
        }
        let now = self.scheduler.time;
        self.scheduler.schedule_at(task, now)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub end_time: f64,
    pub events_processed: u64,
    pub tasks_spawned: usize,
}

pub struct Scheduler<S> {
    time: f64,
    events: FloatBinaryHeap<TaskId>,
    tasks: Vec<Option<Box<dyn Process<S>>>>,
    live: usize,
    events_processed: u64,
}

impl<S> Default for Scheduler<S> {
    fn default() -> Self {
        Scheduler::new()
    }
}

impl<S> Scheduler<S> {
    pub fn new() -> Self {
        Scheduler {
            time: 0.,
            events: FloatBinaryHeap::new(),
            tasks: Vec::new(),
            live: 0,
            events_processed: 0,
        }
    }

    pub fn now(&self) -> f64 {
        self.time
    }

    pub fn live_tasks(&self) -> usize {
        self.live
    }

    pub fn spawn(&mut self, process: Box<dyn Process<S>>) -> Result<TaskId> {
        let id = self.tasks.len();
        trace!("t={:.6} spawn {} as task {}", self.time, process.name(), id);
        self.tasks.push(Some(process));
        self.live += 1;
        let now = self.time;
        self.schedule_at(id, now)?;
        Ok(id)
    }

    /// Suspends `task` until `now + duration`.
    pub fn schedule_timeout(&mut self, task: TaskId, duration: f64) -> Result<()> {
        if !(duration >= 0.) || !duration.is_finite() {
            return Err(SimError::InvalidEventTime { now: self.time, time: self.time + duration });
        }
        let at = self.time + duration;
        self.schedule_at(task, at)
    }

    fn schedule_at(&mut self, task: TaskId, time: f64) -> Result<()> {
        if time < self.time {
            return Err(SimError::InvalidEventTime { now: self.time, time });
        }
        let now = self.time;
        self.events.push(time, task).map_err(|_| SimError::InvalidEventTime { now, time })
    }

    fn is_live(&self, task: TaskId) -> bool {
        self.tasks.get(task).map_or(false, |slot| slot.is_some())
    }

    /// Pops and executes the earliest event. Returns `Ok(false)` once no event
    /// is left.
    pub fn step(&mut self, state: &mut S) -> Result<bool> {
        let (time, id) = match self.events.pop() {
            Some(event) => event,
            None => return Ok(false),
        };
        if time < self.time {
            return Err(SimError::InvalidEventTime { now: self.time, time });
        }
        self.time = time;
        self.events_processed += 1;

        let mut process = self.tasks.get_mut(id)
            .and_then(|slot| slot.take())
            .ok_or(SimError::UnknownTask(id))?;

        let outcome = {
            let mut ctx = Context { scheduler: &mut *self, state, me: id };
            process.resume(&mut ctx)?
        };

        match outcome {
            Yield::Timeout(duration) => {
                self.tasks[id] = Some(process);
                self.schedule_timeout(id, duration)?;
            }
            Yield::Passivate => {
                self.tasks[id] = Some(process);
            }
            Yield::Done => {
                trace!("t={:.6} task {} ({}) finished", self.time, id, process.name());
                self.live -= 1;
            }
        }
        Ok(true)
    }

    /// Runs until every task has finished. Suspended tasks with nothing left
    /// to wake them are reported as [`SimError::Stalled`].
    pub fn run(&mut self, state: &mut S) -> Result<RunSummary> {
        while self.step(state)? {}

        if self.live > 0 {
            return Err(SimError::Stalled { suspended: self.live });
        }
        Ok(RunSummary {
            end_time: self.time,
            events_processed: self.events_processed,
            tasks_spawned: self.tasks.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Log = Vec<(f64, String)>;

    struct Sleeper {
        label: &'static str,
        delays: Vec<f64>,
    }

    impl Process<Log> for Sleeper {
        fn resume(&mut self, ctx: &mut Context<Log>) -> Result<Yield> {
            ctx.state.push((ctx.now(), self.label.to_string()));
            match self.delays.pop() {
                Some(d) => Ok(Yield::Timeout(d)),
                None => Ok(Yield::Done),
            }
        }

        fn name(&self) -> String {
            self.label.to_string()
        }
    }

    struct Sleeping;

    impl Process<Log> for Sleeping {
        fn resume(&mut self, _ctx: &mut Context<Log>) -> Result<Yield> {
            Ok(Yield::Passivate)
        }

        fn name(&self) -> String {
            "sleeping".to_string()
        }
    }

    #[test]
    fn events_run_in_time_order() {
        let mut scheduler: Scheduler<Log> = Scheduler::new();
        let mut log = Log::new();
        scheduler.spawn(Box::new(Sleeper { label: "a", delays: vec![1.0, 2.0] })).unwrap();
        scheduler.spawn(Box::new(Sleeper { label: "b", delays: vec![0.5] })).unwrap();

        let summary = scheduler.run(&mut log).unwrap();

        let times: Vec<f64> = log.iter().map(|(t, _)| *t).collect();
        assert_eq!(times, vec![0., 0., 0.5, 2.0, 3.0]);
        assert_eq!(log[2].1, "b");
        assert_eq!(summary.end_time, 3.0);
        assert_eq!(summary.tasks_spawned, 2);
        assert_eq!(scheduler.live_tasks(), 0);
    }

    #[test]
    fn simultaneous_events_keep_scheduling_order() {
        let mut scheduler: Scheduler<Log> = Scheduler::new();
        let mut log = Log::new();
        for label in &["first", "second", "third"] {
            scheduler.spawn(Box::new(Sleeper { label: *label, delays: vec![1.0] })).unwrap();
        }

        scheduler.run(&mut log).unwrap();

        let at_one: Vec<&str> = log.iter().filter(|(t, _)| *t == 1.0).map(|(_, l)| l.as_str()).collect();
        assert_eq!(at_one, vec!["first", "second", "third"]);
    }

    #[test]
    fn negative_timeout_is_an_error() {
        let mut scheduler: Scheduler<Log> = Scheduler::new();
        let mut log = Log::new();
        scheduler.spawn(Box::new(Sleeper { label: "bad", delays: vec![-1.0] })).unwrap();

        match scheduler.run(&mut log) {
            Err(SimError::InvalidEventTime { .. }) => {}
            other => panic!("unexpected result: {:?}", other.map(|s| s.end_time)),
        }
    }

    #[test]
    fn passive_task_without_waker_stalls() {
        let mut scheduler: Scheduler<Log> = Scheduler::new();
        let mut log = Log::new();
        scheduler.spawn(Box::new(Sleeping)).unwrap();

        match scheduler.run(&mut log) {
            Err(SimError::Stalled { suspended }) => assert_eq!(suspended, 1),
            other => panic!("unexpected result: {:?}", other.map(|s| s.end_time)),
        }
    }
}

//! Error types for the simulator.

use thiserror::Error;

use crate::queues::scheduler::TaskId;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid event time {time} (now = {now})")]
    InvalidEventTime { now: f64, time: f64 },

    #[error("No live task with id {0}")]
    UnknownTask(TaskId),

    #[error("Task {task} released the server without holding it")]
    NotHolder { task: TaskId },

    #[error("Event queue drained with {suspended} task(s) still suspended")]
    Stalled { suspended: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;

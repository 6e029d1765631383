use std::collections::VecDeque;

use crate::error::{Result, SimError};
use crate::queues::scheduler::TaskId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    /// The server was idle: the caller holds it now.
    Immediate,
    /// The caller waits behind `ahead` other requests.
    Queued { ahead: usize },
}

/// Single server with a FIFO waiting line. At most one task holds it; on
/// release the head of the line becomes the holder.
#[derive(Debug, Default)]
pub struct ServerResource {
    holder: Option<TaskId>,
    queue: VecDeque<TaskId>,
}

impl ServerResource {
    pub fn new() -> Self {
        ServerResource {
            holder: None,
            queue: VecDeque::new(),
        }
    }

    pub fn request(&mut self, task: TaskId) -> Grant {
        if self.holder.is_none() && self.queue.is_empty() {
            self.holder = Some(task);
            Grant::Immediate
        }
        else {
            self.queue.push_back(task);
            Grant::Queued { ahead: self.queue.len() - 1 }
        }
    }

    /// Frees the server and hands it to the next waiting task, which the
    /// caller must wake up.
    pub fn release(&mut self, task: TaskId) -> Result<Option<TaskId>> {
        if self.holder != Some(task) {
            return Err(SimError::NotHolder { task });
        }
        self.holder = self.queue.pop_front();
        Ok(self.holder)
    }

    pub fn holder(&self) -> Option<TaskId> {
        self.holder
    }

    pub fn is_busy(&self) -> bool {
        self.holder.is_some()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_server_grants_immediately() {
        let mut server = ServerResource::new();
        assert_eq!(server.request(7), Grant::Immediate);
        assert_eq!(server.holder(), Some(7));
        assert!(server.is_busy());
    }

    #[test]
    fn waiting_tasks_are_served_in_request_order() {
        let mut server = ServerResource::new();
        server.request(1);
        assert_eq!(server.request(2), Grant::Queued { ahead: 0 });
        assert_eq!(server.request(3), Grant::Queued { ahead: 1 });
        assert_eq!(server.queue_len(), 2);

        assert_eq!(server.release(1).unwrap(), Some(2));
        assert_eq!(server.release(2).unwrap(), Some(3));
        assert_eq!(server.release(3).unwrap(), None);
        assert!(!server.is_busy());
        assert_eq!(server.queue_len(), 0);
    }

    #[test]
    fn release_by_non_holder_fails() {
        let mut server = ServerResource::new();
        server.request(1);
        server.request(2);
        match server.release(2) {
            Err(SimError::NotHolder { task }) => assert_eq!(task, 2),
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(server.holder(), Some(1));
    }
}

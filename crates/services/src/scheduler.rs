//! Deferred work for animated transitions.
//!
//! The flow never sleeps. It hands `DeferredTask`s to a `Scheduler`, and whoever
//! owns the timer delivers them back through `QuizFlow::fire`.

use std::cell::RefCell;
use std::time::Duration;

use crate::flow::QuizFlow;
use crate::lead_capture::MountTicket;

/// What to do when a deferred task comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Install the pending step once the exit animation has finished.
    Commit,
    /// End the entering animation and re-enable input.
    Settle,
    /// Close the lead-capture modal opened under `ticket`.
    CloseLeadCapture { ticket: MountTicket },
}

/// A deferred task bound to the flow epoch it was scheduled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredTask {
    pub(crate) epoch: u64,
    pub(crate) kind: Deferred,
}

impl DeferredTask {
    #[must_use]
    pub fn kind(&self) -> Deferred {
        self.kind
    }
}

pub trait Scheduler {
    /// Arrange for `task` to be handed to `QuizFlow::fire` after `delay`.
    fn schedule(&self, delay: Duration, task: DeferredTask);
}

#[derive(Debug)]
struct Scheduled {
    due: Duration,
    seq: u64,
    task: DeferredTask,
}

#[derive(Debug, Default)]
struct ManualQueue {
    now: Duration,
    seq: u64,
    tasks: Vec<Scheduled>,
}

impl ManualQueue {
    fn pop_due(&mut self, limit: Option<Duration>) -> Option<Scheduled> {
        let index = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, scheduled)| limit.is_none_or(|limit| scheduled.due <= limit))
            .min_by_key(|(_, scheduled)| (scheduled.due, scheduled.seq))
            .map(|(index, _)| index)?;
        let scheduled = self.tasks.swap_remove(index);
        self.now = self.now.max(scheduled.due);
        Some(scheduled)
    }
}

/// Deterministic virtual-time scheduler.
///
/// Nothing runs until `advance` or `run_until_idle` is called. Tasks fire in
/// due order, ties in scheduling order.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    queue: RefCell<ManualQueue>,
}

const RUN_LIMIT: usize = 10_000;

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.queue.borrow().now
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().tasks.len()
    }

    /// Move virtual time forward by `by`, firing every task that comes due.
    ///
    /// Returns the number of tasks fired.
    pub fn advance(&self, flow: &mut QuizFlow, by: Duration) -> usize {
        let target = self.now().saturating_add(by);
        let mut fired = 0;
        loop {
            let next = self.queue.borrow_mut().pop_due(Some(target));
            let Some(scheduled) = next else { break };
            flow.fire(scheduled.task, self);
            fired += 1;
        }
        self.queue.borrow_mut().now = target;
        fired
    }

    /// Fire tasks in order until the queue is empty.
    pub fn run_until_idle(&self, flow: &mut QuizFlow) -> usize {
        let mut fired = 0;
        while fired < RUN_LIMIT {
            let next = self.queue.borrow_mut().pop_due(None);
            let Some(scheduled) = next else { break };
            flow.fire(scheduled.task, self);
            fired += 1;
        }
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: DeferredTask) {
        let mut queue = self.queue.borrow_mut();
        let due = queue.now.saturating_add(delay);
        let seq = queue.seq;
        queue.seq += 1;
        queue.tasks.push(Scheduled { due, seq, task });
    }
}

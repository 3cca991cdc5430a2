use std::time::Duration;

/// A task waiting on the scheduler's virtual clock.
#[derive(Debug, Clone)]
struct ScheduledTask<T> {
    due: Duration,
    seq: u64,
    task: T,
}

/// Ordered list of (due time, task) pairs driven by an explicit clock.
///
/// Nothing here sleeps or spawns: the owner decides when time moves, either
/// from wall-clock elapsed time (the GUI host) or manually (tests). Tasks due
/// at the same instant come out in the order they were scheduled.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: Duration,
    next_seq: u64,
    queue: Vec<ScheduledTask<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            queue: Vec::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Queues `task` to fire `delay` after the current clock reading.
    pub fn schedule(&mut self, delay: Duration, task: T) {
        let due = self.now + delay;
        let seq = self.next_seq;
        self.next_seq += 1;

        let index = self
            .queue
            .partition_point(|queued| (queued.due, queued.seq) <= (due, seq));
        self.queue.insert(index, ScheduledTask { due, seq, task });
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn pending_tasks(&self) -> impl Iterator<Item = &T> {
        self.queue.iter().map(|queued| &queued.task)
    }

    /// Time of the earliest queued task, if any.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.first().map(|queued| queued.due)
    }

    /// Removes the earliest task due at or before `until`, moving the clock
    /// to its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        match self.queue.first() {
            Some(first) if first.due <= until => {
                let queued = self.queue.remove(0);
                if queued.due > self.now {
                    self.now = queued.due;
                }
                Some(queued.task)
            }
            _ => None,
        }
    }

    /// Moves the clock forward to `until` without running anything. The clock
    /// never goes backwards.
    pub fn settle(&mut self, until: Duration) {
        if until > self.now {
            self.now = until;
        }
    }
}

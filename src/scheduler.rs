use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

struct Job<E> {
    due: Duration,
    seq: u64,
    event: E,
}

impl<E> PartialEq for Job<E> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<E> Eq for Job<E> {}

impl<E> PartialOrd for Job<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Job<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// One-shot delayed events on a single-threaded clock.
///
/// The host advances time between frames; nothing fires on its own.
pub struct Scheduler<E> {
    now: Duration,
    next_seq: u64,
    queue: BinaryHeap<Reverse<Job<E>>>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Scheduler {
            now: Duration::ZERO,
            next_seq: 0,
            queue: BinaryHeap::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Fire `event` once at least `delay` has elapsed
    pub fn schedule(&mut self, delay: Duration, event: E) {
        let job = Job {
            due: self.now + delay,
            seq: self.next_seq,
            event,
        };
        self.next_seq += 1;
        self.queue.push(Reverse(job));
    }

    /// Move the clock to `now` and return every event that has come due,
    /// earliest first (ties in scheduling order). Time never runs backward.
    pub fn advance_to(&mut self, now: Duration) -> Vec<E> {
        self.now = self.now.max(now);
        let mut due = Vec::new();
        while let Some(Reverse(job)) = self.queue.peek() {
            if job.due > self.now {
                break;
            }
            if let Some(Reverse(job)) = self.queue.pop() {
                due.push(job.event);
            }
        }
        due
    }
}

//! Fire-once deferred tasks with cancellation.
//!
//! The scheduler has no timer of its own: the host advances its clock with
//! [`Scheduler::advance`] and runs whatever payloads come back. Tearing down a
//! screen calls [`Scheduler::cancel_all`], so nothing fires on a disposed screen.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

#[derive(Debug)]
struct Entry<T> {
    due_at: u64,
    id: TaskId,
    payload: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    now: u64,
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Scheduler { now: 0, next_id: 0, entries: Vec::new() }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds elapsed on this scheduler's clock.
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn schedule(&mut self, delay_ms: u64, payload: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { due_at: self.now + delay_ms, id, payload });
        id
    }

    /// Returns false if the task already fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Move the clock forward and return the payloads that became due, earliest
    /// first. Tasks due at the same instant fire in scheduling order.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<T> {
        self.now += elapsed_ms;
        let now = self.now;

        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|e| e.due_at <= now);
        self.entries = waiting;

        due.sort_by_key(|e| (e.due_at, e.id));
        due.into_iter().map(|e| e.payload).collect()
    }
}

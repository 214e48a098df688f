//! One-shot timer queue for delayed continuations
//!
//! Animation state machines schedule their next transition here instead of
//! holding their own timers, so a view change can drop every pending
//! continuation in one call.

/// A pending timer
#[derive(Debug, Clone)]
struct Pending<T> {
    due_ms: f64,
    seq: u64,
    payload: T,
}

/// Single-threaded timer queue driven by the owner's clock
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    pending: Vec<Pending<T>>,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }

    /// Fire `payload` once `delay_ms` has elapsed after `now_ms`
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64, payload: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            due_ms: now_ms + delay_ms.max(0.0),
            seq,
            payload,
        });
    }

    /// Remove and return every timer due at `now_ms`, earliest first.
    /// Timers due at the same instant keep their scheduling order.
    pub fn take_due(&mut self, now_ms: f64) -> Vec<T> {
        let (mut due, waiting): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|timer| timer.due_ms <= now_ms);
        self.pending = waiting;
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|timer| timer.payload).collect()
    }

    /// Drop every pending timer
    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            log::debug!("Cancelling {} pending timers", self.pending.len());
        }
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

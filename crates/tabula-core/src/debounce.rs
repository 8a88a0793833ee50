//! Trailing-edge call debouncing driven by an injected clock.
//!
//! The host passes the current time in milliseconds to [`Debouncer::call`]
//! and [`Debouncer::poll`], typically from its event loop or a timer
//! callback. Rapid calls collapse into one invocation carrying the most
//! recent arguments.
//!
//! # Examples
//!
//! ```
//! use tabula_core::Debouncer;
//! use std::sync::{Arc, Mutex};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! let mut debounced = Debouncer::new(300, move |text: String| sink.lock().unwrap().push(text));
//!
//! debounced.call("a".to_string(), 0);
//! debounced.call("ab".to_string(), 100);
//! assert!(!debounced.poll(399));
//! assert!(debounced.poll(400));
//! assert_eq!(*seen.lock().unwrap(), vec!["ab".to_string()]);
//! ```

use std::fmt;

struct Pending<A> {
    args: A,
    deadline_ms: u64,
}

/// Collapses bursts of calls into a single trailing invocation.
pub struct Debouncer<A> {
    delay_ms: u64,
    callback: Box<dyn FnMut(A) + Send>,
    pending: Option<Pending<A>>,
    fired: u64,
}

impl<A> Debouncer<A> {
    /// Wrap `callback` so it runs `delay_ms` after the last call.
    pub fn new(delay_ms: u64, callback: impl FnMut(A) + Send + 'static) -> Self {
        Self {
            delay_ms,
            callback: Box::new(callback),
            pending: None,
            fired: 0,
        }
    }

    /// Quiet period in milliseconds.
    #[must_use]
    pub const fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Schedule an invocation with `args`, replacing any pending one.
    ///
    /// A pending invocation whose deadline has already passed at `now_ms`
    /// fires before the new one is scheduled.
    pub fn call(&mut self, args: A, now_ms: u64) {
        self.poll(now_ms);
        if self.pending.is_some() {
            tracing::trace!(now_ms, "debounce: replacing pending call");
        }
        self.pending = Some(Pending {
            args,
            deadline_ms: now_ms.saturating_add(self.delay_ms),
        });
    }

    /// Fire the pending invocation if its deadline is due.
    ///
    /// Returns whether the callback ran.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match &self.pending {
            Some(pending) if pending.deadline_ms <= now_ms => self.flush(),
            _ => false,
        }
    }

    /// Fire the pending invocation immediately.
    pub fn flush(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        tracing::trace!(deadline_ms = pending.deadline_ms, "debounce: firing");
        self.fired += 1;
        (self.callback)(pending.args);
        true
    }

    /// Drop the pending invocation without running it.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.pending.take().is_some();
        if cancelled {
            tracing::trace!("debounce: cancelled");
        }
        cancelled
    }

    /// Whether an invocation is scheduled.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending invocation is due.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.deadline_ms)
    }

    /// Number of times the callback has run.
    #[must_use]
    pub const fn fire_count(&self) -> u64 {
        self.fired
    }
}

impl<A> fmt::Debug for Debouncer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay_ms", &self.delay_ms)
            .field("deadline", &self.deadline())
            .field("fired", &self.fired)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::{Arc, Mutex};

    fn recording(delay: u64) -> (Debouncer<u32>, Arc<Mutex<Vec<u32>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let debouncer = Debouncer::new(delay, move |v| sink.lock().unwrap().push(v));
        (debouncer, calls)
    }

    #[test]
    fn test_debounce_collapses_burst() {
        let (mut d, calls) = recording(100);
        d.call(1, 0);
        d.call(2, 10);
        d.call(3, 50);
        assert!(!d.poll(149));
        assert!(d.poll(150));
        assert_eq!(*calls.lock().unwrap(), vec![3]);
        assert!(!d.is_pending());
    }

    #[test]
    fn test_debounce_no_calls_never_fires() {
        let (mut d, calls) = recording(100);
        assert!(!d.poll(10_000));
        assert!(!d.flush());
        assert!(calls.lock().unwrap().is_empty());
        assert_eq!(d.fire_count(), 0);
    }

    #[test]
    fn test_debounce_spaced_calls_each_fire() {
        let (mut d, calls) = recording(100);
        d.call(1, 0);
        d.call(2, 100);
        d.call(3, 250);
        d.poll(1_000);
        assert_eq!(*calls.lock().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_debounce_cancel() {
        let (mut d, calls) = recording(100);
        d.call(1, 0);
        assert_eq!(d.deadline(), Some(100));
        assert!(d.cancel());
        assert!(!d.cancel());
        assert!(!d.poll(500));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_debounce_flush() {
        let (mut d, calls) = recording(100);
        d.call(9, 0);
        assert!(d.flush());
        assert_eq!(*calls.lock().unwrap(), vec![9]);
        assert_eq!(d.fire_count(), 1);
    }

    proptest! {
        #[test]
        fn prop_burst_within_window_fires_once_with_last(
            offsets in prop::collection::vec(0u64..99, 1..20),
        ) {
            let (mut d, calls) = recording(100);
            let mut sorted = offsets.clone();
            sorted.sort_unstable();
            for (i, t) in sorted.iter().enumerate() {
                d.call(i as u32, *t);
            }
            let last = sorted.len() as u32 - 1;
            d.poll(sorted[sorted.len() - 1] + 100);
            prop_assert_eq!(calls.lock().unwrap().clone(), vec![last]);
        }

        #[test]
        fn prop_spaced_calls_fire_each(n in 1usize..15, gap in 100u64..500) {
            let (mut d, calls) = recording(100);
            for i in 0..n {
                d.call(i as u32, i as u64 * gap);
            }
            d.flush();
            prop_assert_eq!(calls.lock().unwrap().len(), n);
        }
    }
}

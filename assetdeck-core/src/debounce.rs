//! Debounce timer and request sequencing for server-side search.
//!
//! The render loop ticks every 100 ms; the debouncer turns a stream of
//! keystrokes into at most one settled query per quiet period, and the
//! sequencer makes superseded responses detectable so a slow earlier
//! response can never overwrite a faster later one.

use std::time::{Duration, Instant};

/// The quiet period the search views wait for before issuing a request.
pub const SEARCH_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Turns keystroke events into settled queries.
///
/// Every call to [`Debouncer::record`] restarts the quiet period. Once the
/// period elapses with no further input, the next [`Debouncer::poll`]
/// returns the final query exactly once.
#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
    pending: Option<String>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
            pending: None,
        }
    }

    /// Record a keystroke: remember the current query and push the
    /// deadline out by the quiet period.
    pub fn record(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some(query.into());
        self.deadline = Some(now + self.quiet);
    }

    /// Return the settled query if the quiet period has elapsed.
    ///
    /// Consumes the pending query, so a settled query is emitted exactly
    /// once per burst of keystrokes.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }

    /// Drop any pending query without emitting it.
    pub fn cancel(&mut self) {
        self.deadline = None;
        self.pending = None;
    }

    /// True while a query is waiting for its quiet period to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SEARCH_QUIET_PERIOD)
    }
}

/// Monotonically increasing sequence numbers for in-flight requests.
///
/// Issue a number per request, tag the response with it, and apply the
/// response only if no newer request has been issued since. In-flight
/// requests are never aborted; stale results are simply discarded on
/// arrival.
#[derive(Debug, Default)]
pub struct RequestSeq {
    issued: u64,
}

impl RequestSeq {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next sequence number for an outgoing request.
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// True when `seq` belongs to the most recently issued request.
    pub fn try_apply(&self, seq: u64) -> bool {
        seq == self.issued
    }

    /// The most recently issued sequence number.
    pub fn latest(&self) -> u64 {
        self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settles_once_after_quiet_period() {
        let quiet = Duration::from_millis(300);
        let mut debouncer = Debouncer::new(quiet);
        let t0 = Instant::now();

        debouncer.record("d", t0);
        debouncer.record("de", t0 + Duration::from_millis(100));
        debouncer.record("dell", t0 + Duration::from_millis(200));

        // Quiet period restarts on every keystroke.
        assert_eq!(debouncer.poll(t0 + Duration::from_millis(450)), None);

        // One settled query carrying the final input, emitted exactly once.
        assert_eq!(
            debouncer.poll(t0 + Duration::from_millis(500)),
            Some("dell".to_string())
        );
        assert_eq!(debouncer.poll(t0 + Duration::from_millis(600)), None);
    }

    #[test]
    fn cancel_drops_pending_query() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        let t0 = Instant::now();
        debouncer.record("dell", t0);
        debouncer.cancel();
        assert_eq!(debouncer.poll(t0 + Duration::from_secs(1)), None);
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut seq = RequestSeq::new();
        let first = seq.issue();
        let second = seq.issue();

        // The slow first response arrives after the second was issued.
        assert!(!seq.try_apply(first));
        assert!(seq.try_apply(second));
    }

    #[test]
    fn latest_response_wins_regardless_of_arrival_order() {
        let mut seq = RequestSeq::new();
        let a = seq.issue();
        let b = seq.issue();
        let c = seq.issue();

        assert!(seq.try_apply(c));
        assert!(!seq.try_apply(a));
        assert!(!seq.try_apply(b));
    }
}

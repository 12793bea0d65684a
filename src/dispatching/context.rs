//! Dispatch-time state passed to policies.

/// A ready process as seen by a policy at a decision point.
///
/// Borrowed view of the driver's runtime state; policies never mutate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// Process identifier.
    pub id: &'a str,
    /// Arrival tick.
    pub arrival_time: i64,
    /// Original CPU demand.
    pub burst_time: i64,
    /// CPU ticks still required (`0 < remaining <= burst`).
    pub remaining_time: i64,
    /// Per-process Round-Robin quantum.
    pub quantum: Option<i64>,
}

/// Simulation clock and lookahead at a decision point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchContext {
    /// Current simulation time.
    pub now: i64,
    /// Earliest arrival strictly after `now` among processes not yet admitted.
    pub next_arrival: Option<i64>,
}

impl DispatchContext {
    /// Creates a context at the given time.
    pub fn at_time(now: i64) -> Self {
        Self {
            now,
            next_arrival: None,
        }
    }

    /// Sets the next arrival event.
    pub fn with_next_arrival(mut self, next_arrival: Option<i64>) -> Self {
        self.next_arrival = next_arrival;
        self
    }

    /// Ticks until the next arrival, if one is pending in the future.
    pub fn until_next_arrival(&self) -> Option<i64> {
        self.next_arrival
            .filter(|&t| t > self.now)
            .map(|t| t - self.now)
    }
}

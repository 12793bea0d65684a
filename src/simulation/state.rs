//! Per-run mutable process state.

use crate::dispatching::Candidate;
use crate::models::Process;

/// Runtime bookkeeping for one process during one run.
///
/// Invariant: `0 <= remaining_time <= burst_time`; `completion_time` is set
/// once, when `remaining_time` reaches zero, and the state is read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProcessState {
    pub remaining_time: i64,
    pub completion_time: Option<i64>,
    pub first_run: Option<i64>,
}

impl ProcessState {
    pub fn new(process: &Process) -> Self {
        Self {
            remaining_time: process.burst_time(),
            completion_time: None,
            first_run: None,
        }
    }

    pub fn candidate<'a>(&self, process: &'a Process) -> Candidate<'a> {
        Candidate {
            id: process.id(),
            arrival_time: process.arrival_time(),
            burst_time: process.burst_time(),
            remaining_time: self.remaining_time,
            quantum: process.quantum(),
        }
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.completion_time.is_some()
    }

    /// Consumes `ticks` of CPU starting at `start`.
    ///
    /// Returns `false` without touching the state if the run is empty,
    /// exceeds the remaining demand, or the process already finished.
    pub fn run(&mut self, start: i64, ticks: i64) -> bool {
        if self.is_complete() || ticks <= 0 || ticks > self.remaining_time {
            return false;
        }
        self.first_run.get_or_insert(start);
        self.remaining_time -= ticks;
        if self.remaining_time == 0 {
            self.completion_time = Some(start + ticks);
        }
        true
    }
}

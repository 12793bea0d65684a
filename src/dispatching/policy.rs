//! Scheduling policies.
//!
//! Each policy answers one question at every decision point: which ready
//! process runs next, and for how many ticks.
//!
//! Selection policies (FCFS, SJF, SRTF) compare candidates with a chain of
//! keys applied in sequence, falling through to the next key only on a tie.
//! The final key is always the process ID, so every choice is deterministic.
//! Round-Robin ignores the keys and takes the queue front.

use std::cmp::Ordering;

use super::{Candidate, DispatchContext};
use crate::models::Algorithm;
use crate::validation::{ValidationError, ValidationErrorKind};

/// A dispatch decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    /// Position of the chosen process in the ready queue.
    pub position: usize,
    /// Ticks to run before the next decision.
    pub duration: i64,
}

/// A configured scheduling policy.
///
/// # Example
/// ```
/// use u_cpusched::dispatching::{Candidate, DispatchContext, Policy};
/// use u_cpusched::models::Algorithm;
///
/// let policy = Policy::new(Algorithm::Sjf, None).unwrap();
/// let ready = [
///     Candidate { id: "P1", arrival_time: 0, burst_time: 6, remaining_time: 6, quantum: None },
///     Candidate { id: "P2", arrival_time: 1, burst_time: 2, remaining_time: 2, quantum: None },
/// ];
/// let d = policy.dispatch(&ready, &DispatchContext::at_time(1)).unwrap();
/// assert_eq!(d.position, 1);
/// assert_eq!(d.duration, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Earliest arrival first, runs to completion.
    Fcfs,
    /// Shortest burst first, runs to completion.
    Sjf,
    /// Shortest remaining time first, preempted at arrivals.
    Srtf,
    /// FIFO with a time quantum.
    RoundRobin {
        /// Default quantum (per-process overrides take precedence).
        quantum: i64,
    },
}

impl Policy {
    /// Builds the policy for an algorithm.
    ///
    /// `quantum` is required (and must be positive) for Round-Robin and
    /// ignored otherwise.
    pub fn new(algorithm: Algorithm, quantum: Option<i64>) -> Result<Self, ValidationError> {
        match algorithm {
            Algorithm::Fcfs => Ok(Self::Fcfs),
            Algorithm::Sjf => Ok(Self::Sjf),
            Algorithm::Srtf => Ok(Self::Srtf),
            Algorithm::RoundRobin => match quantum {
                Some(q) if q > 0 => Ok(Self::RoundRobin { quantum: q }),
                Some(q) => Err(ValidationError::new(
                    ValidationErrorKind::InvalidQuantum,
                    "quantum",
                    format!("Quantum must be > 0 for Round Robin, got {q}"),
                )),
                None => Err(ValidationError::new(
                    ValidationErrorKind::InvalidQuantum,
                    "quantum",
                    "Round Robin requires a quantum",
                )),
            },
        }
    }

    /// Creates a Round-Robin policy.
    pub fn round_robin(quantum: i64) -> Result<Self, ValidationError> {
        Self::new(Algorithm::RoundRobin, Some(quantum))
    }

    /// The algorithm this policy implements.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Fcfs => Algorithm::Fcfs,
            Self::Sjf => Algorithm::Sjf,
            Self::Srtf => Algorithm::Srtf,
            Self::RoundRobin { .. } => Algorithm::RoundRobin,
        }
    }

    /// Orders two candidates: `Less` means `a` is preferred.
    pub fn compare(&self, a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
        let keys = match self {
            Self::Fcfs | Self::RoundRobin { .. } => a.arrival_time.cmp(&b.arrival_time),
            Self::Sjf => a
                .burst_time
                .cmp(&b.burst_time)
                .then(a.arrival_time.cmp(&b.arrival_time)),
            Self::Srtf => a
                .remaining_time
                .cmp(&b.remaining_time)
                .then(a.arrival_time.cmp(&b.arrival_time)),
        };
        keys.then_with(|| a.id.cmp(b.id))
    }

    /// Picks a position in the ready queue. `None` when the queue is empty.
    pub fn select(&self, ready: &[Candidate<'_>]) -> Option<usize> {
        match self {
            Self::RoundRobin { .. } => (!ready.is_empty()).then_some(0),
            _ => ready
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| self.compare(a, b))
                .map(|(i, _)| i),
        }
    }

    /// Ticks the chosen candidate may run before the next decision.
    pub fn time_slice(&self, chosen: &Candidate<'_>, context: &DispatchContext) -> i64 {
        let remaining = chosen.remaining_time;
        match self {
            Self::Fcfs | Self::Sjf => remaining,
            Self::Srtf => context
                .until_next_arrival()
                .map_or(remaining, |gap| gap.min(remaining)),
            Self::RoundRobin { quantum } => chosen.quantum.unwrap_or(*quantum).min(remaining),
        }
    }

    /// Selects a candidate and its run length.
    pub fn dispatch(&self, ready: &[Candidate<'_>], context: &DispatchContext) -> Option<Dispatch> {
        let position = self.select(ready)?;
        Some(Dispatch {
            position,
            duration: self.time_slice(&ready[position], context),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(id: &str, arrival: i64, burst: i64, remaining: i64) -> Candidate<'_> {
        Candidate {
            id,
            arrival_time: arrival,
            burst_time: burst,
            remaining_time: remaining,
            quantum: None,
        }
    }

    #[test]
    fn test_new_requires_quantum_for_rr() {
        let err = Policy::new(Algorithm::RoundRobin, None).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidQuantum);
        let err = Policy::new(Algorithm::RoundRobin, Some(0)).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidQuantum);
        assert!(Policy::round_robin(-3).is_err());
        assert_eq!(
            Policy::new(Algorithm::RoundRobin, Some(2)).unwrap(),
            Policy::RoundRobin { quantum: 2 }
        );
    }

    #[test]
    fn test_new_ignores_quantum_for_others() {
        assert_eq!(Policy::new(Algorithm::Fcfs, Some(-1)).unwrap(), Policy::Fcfs);
        assert_eq!(Policy::new(Algorithm::Srtf, None).unwrap(), Policy::Srtf);
    }

    #[test]
    fn test_algorithm_roundtrip() {
        for alg in Algorithm::ALL {
            let policy = Policy::new(alg, Some(1)).unwrap();
            assert_eq!(policy.algorithm(), alg);
        }
    }

    #[test]
    fn test_fcfs_tie_break_by_id() {
        let ready = [cand("B", 0, 3, 3), cand("A", 0, 5, 5)];
        assert_eq!(Policy::Fcfs.select(&ready), Some(1));
    }

    #[test]
    fn test_fcfs_prefers_earlier_arrival() {
        let ready = [cand("A", 2, 1, 1), cand("B", 1, 9, 9)];
        assert_eq!(Policy::Fcfs.select(&ready), Some(1));
    }

    #[test]
    fn test_sjf_ordering() {
        // Same burst → earlier arrival → then id
        let ready = [
            cand("C", 1, 4, 4),
            cand("B", 0, 4, 4),
            cand("A", 0, 4, 4),
            cand("D", 3, 9, 9),
        ];
        assert_eq!(Policy::Sjf.select(&ready), Some(2));
    }

    #[test]
    fn test_sjf_uses_burst_not_remaining() {
        let ready = [cand("A", 0, 10, 1), cand("B", 0, 5, 5)];
        assert_eq!(Policy::Sjf.select(&ready), Some(1));
        assert_eq!(Policy::Srtf.select(&ready), Some(0));
    }

    #[test]
    fn test_srtf_slice_bounded_by_next_arrival() {
        let c = cand("P1", 0, 8, 8);
        let ctx = DispatchContext::at_time(0).with_next_arrival(Some(1));
        assert_eq!(Policy::Srtf.time_slice(&c, &ctx), 1);

        let ctx = DispatchContext::at_time(0).with_next_arrival(Some(20));
        assert_eq!(Policy::Srtf.time_slice(&c, &ctx), 8);

        let ctx = DispatchContext::at_time(5);
        assert_eq!(Policy::Srtf.time_slice(&c, &ctx), 8);
    }

    #[test]
    fn test_non_preemptive_ignores_arrivals() {
        let c = cand("P1", 0, 8, 8);
        let ctx = DispatchContext::at_time(0).with_next_arrival(Some(1));
        assert_eq!(Policy::Fcfs.time_slice(&c, &ctx), 8);
        assert_eq!(Policy::Sjf.time_slice(&c, &ctx), 8);
    }

    #[test]
    fn test_rr_takes_front() {
        let policy = Policy::RoundRobin { quantum: 4 };
        let ready = [cand("Z", 5, 9, 9), cand("A", 0, 1, 1)];
        let d = policy.dispatch(&ready, &DispatchContext::at_time(5)).unwrap();
        assert_eq!(d, Dispatch { position: 0, duration: 4 });
    }

    #[test]
    fn test_rr_slice() {
        let policy = Policy::RoundRobin { quantum: 4 };
        let ctx = DispatchContext::at_time(0);
        assert_eq!(policy.time_slice(&cand("A", 0, 3, 3), &ctx), 3);
        let mut c = cand("A", 0, 10, 10);
        assert_eq!(policy.time_slice(&c, &ctx), 4);
        c.quantum = Some(2);
        assert_eq!(policy.time_slice(&c, &ctx), 2);
    }

    #[test]
    fn test_empty_ready_queue() {
        let ctx = DispatchContext::at_time(0);
        for policy in [
            Policy::Fcfs,
            Policy::Sjf,
            Policy::Srtf,
            Policy::RoundRobin { quantum: 1 },
        ] {
            assert!(policy.dispatch(&[], &ctx).is_none());
        }
    }

    #[test]
    fn test_until_next_arrival() {
        let ctx = DispatchContext::at_time(3).with_next_arrival(Some(7));
        assert_eq!(ctx.until_next_arrival(), Some(4));
        let ctx = DispatchContext::at_time(3).with_next_arrival(Some(3));
        assert_eq!(ctx.until_next_arrival(), None);
        assert_eq!(DispatchContext::at_time(3).until_next_arrival(), None);
    }
}

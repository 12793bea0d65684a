//! Discrete-event simulation driver.
//!
//! # Algorithm
//!
//! 1. Start the clock at t=0 with an empty ready queue.
//! 2. Admit every process whose arrival time has been reached, in
//!    (arrival, id) order.
//! 3. If nothing is ready, emit an idle segment up to the next arrival.
//! 4. Otherwise let the policy pick a process and a run length, emit the
//!    segment, and advance the clock.
//! 5. Admit arrivals up to the new clock, then re-enqueue the process at
//!    the back unless it finished.
//!
//! Decisions happen only at arrivals, completions, and slice expiry, so the
//! loop runs O(n) times for non-preemptive policies and
//! O(n + Σ burst / quantum) times for Round-Robin.

use std::collections::VecDeque;

use super::state::ProcessState;
use super::{SimulationError, SimulationReport};
use crate::dispatching::{Candidate, DispatchContext, Policy};
use crate::metrics::MetricsReport;
use crate::models::{Process, ProcessSet, Timeline};

/// Single-CPU scheduling simulator.
///
/// Holds only the policy; all run state lives on the stack of [`run`],
/// so one simulator can serve any number of independent (and concurrent)
/// runs.
///
/// [`run`]: Simulator::run
///
/// # Example
///
/// ```
/// use u_cpusched::dispatching::Policy;
/// use u_cpusched::models::{ProcessSet, ProcessSpec};
/// use u_cpusched::simulation::Simulator;
///
/// let processes = ProcessSet::new(vec![
///     ProcessSpec::new("P1", 0, 8),
///     ProcessSpec::new("P2", 1, 4),
/// ]).unwrap();
///
/// let timeline = Simulator::new(Policy::Srtf).run(&processes).unwrap();
/// let bars: Vec<(Option<&str>, i64, i64)> = timeline
///     .iter()
///     .map(|s| (s.process_id.as_deref(), s.start, s.end))
///     .collect();
/// assert_eq!(bars, vec![
///     (Some("P1"), 0, 1),
///     (Some("P2"), 1, 5),
///     (Some("P1"), 5, 12),
/// ]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Simulator {
    policy: Policy,
}

impl Simulator {
    /// Creates a simulator for the given policy.
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    /// The configured policy.
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Runs the simulation and returns the timeline.
    ///
    /// Fails only with [`SimulationError::Stalled`], which indicates a
    /// broken internal invariant.
    pub fn run(&self, processes: &ProcessSet) -> Result<Timeline, SimulationError> {
        let procs = processes.processes();
        let mut states: Vec<ProcessState> = procs.iter().map(ProcessState::new).collect();
        let arrivals = arrival_order(procs);

        let mut next_arrival = 0;
        let mut ready: VecDeque<usize> = VecDeque::with_capacity(procs.len());
        let mut timeline = Timeline::new();
        let mut clock: i64 = 0;
        let mut completed = 0;

        while completed < procs.len() {
            admit(procs, &arrivals, &mut next_arrival, clock, &mut ready);

            if ready.is_empty() {
                let Some(&idx) = arrivals.get(next_arrival) else {
                    return Err(SimulationError::stalled(
                        clock,
                        "ready queue empty with no pending arrivals",
                    ));
                };
                let arrival = procs[idx].arrival_time();
                timeline
                    .push_idle(clock, arrival)
                    .map_err(|e| SimulationError::stalled(clock, e.to_string()))?;
                clock = arrival;
                continue;
            }

            let candidates: Vec<Candidate<'_>> = ready
                .iter()
                .map(|&i| states[i].candidate(&procs[i]))
                .collect();
            let upcoming = arrivals.get(next_arrival).map(|&i| procs[i].arrival_time());
            let context = DispatchContext::at_time(clock).with_next_arrival(upcoming);

            let dispatch = self
                .policy
                .dispatch(&candidates, &context)
                .ok_or_else(|| SimulationError::stalled(clock, "policy selected no process"))?;
            let idx = ready.remove(dispatch.position).ok_or_else(|| {
                SimulationError::stalled(clock, "policy selected a position outside the queue")
            })?;

            let end = clock + dispatch.duration;
            if !states[idx].run(clock, dispatch.duration) {
                return Err(SimulationError::stalled(
                    clock,
                    format!(
                        "invalid run of {} ticks for process '{}'",
                        dispatch.duration,
                        procs[idx].id()
                    ),
                ));
            }
            timeline
                .push_run(procs[idx].id(), clock, end)
                .map_err(|e| SimulationError::stalled(clock, e.to_string()))?;
            clock = end;

            // Arrivals during the slice queue ahead of the preempted process
            admit(procs, &arrivals, &mut next_arrival, clock, &mut ready);

            if states[idx].is_complete() {
                completed += 1;
            } else {
                ready.push_back(idx);
            }
        }

        debug_assert!(states.iter().all(ProcessState::is_complete));
        Ok(timeline)
    }

    /// Runs the simulation and computes metrics.
    pub fn simulate(&self, processes: &ProcessSet) -> Result<SimulationReport, SimulationError> {
        let timeline = self.run(processes)?;
        let metrics = MetricsReport::calculate(&timeline, processes);
        Ok(SimulationReport {
            algorithm: self.policy.algorithm(),
            timeline,
            metrics,
        })
    }
}

/// Process indices sorted by (arrival, id).
fn arrival_order(procs: &[Process]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..procs.len()).collect();
    order.sort_by(|&a, &b| {
        procs[a]
            .arrival_time()
            .cmp(&procs[b].arrival_time())
            .then_with(|| procs[a].id().cmp(procs[b].id()))
    });
    order
}

/// Moves every process with `arrival_time <= clock` into the ready queue.
fn admit(
    procs: &[Process],
    arrivals: &[usize],
    next_arrival: &mut usize,
    clock: i64,
    ready: &mut VecDeque<usize>,
) {
    while let Some(&idx) = arrivals.get(*next_arrival) {
        if procs[idx].arrival_time() > clock {
            break;
        }
        ready.push_back(idx);
        *next_arrival += 1;
    }
}

//! Request/response contract for hosting the simulator behind a transport.
//!
//! [`ScheduleRequest`] mirrors the JSON a client submits; [`schedule`]
//! validates every field up front, runs the simulation, and shapes the
//! result as a [`ScheduleResponse`] ready for a Gantt chart and a metrics
//! table.
//!
//! # Wire format
//!
//! ```json
//! { "algorithm": "RR",
//!   "processes": [ { "pid": "P1", "arrival_time": 0, "burst_time": 5 } ],
//!   "quantum": 2 }
//! ```
//!
//! Idle gaps appear in `gantt_data` with pid `"IDLE"` and no color.
//! Averages are rounded to two decimals.

use std::collections::BTreeSet;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::dispatching::Policy;
use crate::models::{Algorithm, ProcessSet, ProcessSpec, Timeline, IDLE_PID};
use crate::simulation::{SimulationError, SimulationReport, Simulator};
use crate::validation::ValidationError;

/// Gantt bar colors, assigned to processes in sorted-ID order.
pub const COLOR_PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// A scheduling request as received from a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Algorithm selector: `"FCFS"`, `"SJF"`, `"SRTF"` or `"RR"`.
    pub algorithm: String,
    /// Processes to schedule.
    #[serde(default)]
    pub processes: Vec<ProcessSpec>,
    /// Round-Robin quantum. Required iff `algorithm == "RR"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum: Option<i64>,
}

impl ScheduleRequest {
    /// Creates a request.
    pub fn new(algorithm: impl Into<String>, processes: Vec<ProcessSpec>) -> Self {
        Self {
            algorithm: algorithm.into(),
            processes,
            quantum: None,
        }
    }

    /// Sets the Round-Robin quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = Some(quantum);
        self
    }

    /// Validates every field and returns the ready-to-run policy and
    /// process set, or all problems found.
    pub fn validate(&self) -> Result<(Policy, ProcessSet), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let policy = match self.algorithm.parse::<Algorithm>() {
            Ok(algorithm) => Policy::new(algorithm, self.quantum)
                .map_err(|e| errors.push(e))
                .ok(),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        let processes = ProcessSet::new(self.processes.clone())
            .map_err(|mut errs| errors.append(&mut errs))
            .ok();

        match (policy, processes) {
            (Some(policy), Some(processes)) if errors.is_empty() => Ok((policy, processes)),
            _ => Err(errors),
        }
    }
}

/// One Gantt bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttEntry {
    /// Process ID, or `"IDLE"`.
    pub pid: String,
    /// Start tick.
    pub start: i64,
    /// End tick.
    pub end: i64,
    /// Bar color (absent for idle bars).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// One metrics table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricEntry {
    /// Process ID.
    pub pid: String,
    /// Arrival tick.
    pub arrival_time: i64,
    /// Required CPU ticks.
    pub burst_time: i64,
    /// Tick at which the process finished.
    pub completion_time: i64,
    /// Completion minus arrival.
    pub turnaround_time: i64,
    /// Turnaround minus burst.
    pub waiting_time: i64,
    /// First dispatch minus arrival.
    pub response_time: i64,
}

/// Rounded run averages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Averages {
    /// Average turnaround time.
    pub att: f64,
    /// Average waiting time.
    pub awt: f64,
    /// Average response time.
    pub art: f64,
    /// CPU utilization in percent.
    pub cpu_utilization: f64,
}

/// A successful scheduling response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    /// Gantt bars in time order, idle gaps included.
    pub gantt_data: Vec<GanttEntry>,
    /// Per-process rows, sorted by ID.
    pub metrics: Vec<MetricEntry>,
    /// Rounded averages and utilization.
    pub averages: Averages,
}

/// An error response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    /// Summary message.
    pub error: String,
    /// Every offending field (empty for internal failures).
    pub details: Vec<ValidationError>,
}

impl From<&SimulationError> for ErrorResponse {
    fn from(err: &SimulationError) -> Self {
        Self {
            error: err.to_string(),
            details: err.validation_errors().to_vec(),
        }
    }
}

impl From<&SimulationReport> for ScheduleResponse {
    fn from(report: &SimulationReport) -> Self {
        let agg = &report.metrics.aggregates;
        Self {
            gantt_data: gantt_entries(&report.timeline),
            metrics: report
                .metrics
                .processes()
                .iter()
                .map(|m| MetricEntry {
                    pid: m.id.clone(),
                    arrival_time: m.arrival_time,
                    burst_time: m.burst_time,
                    completion_time: m.completion_time,
                    turnaround_time: m.turnaround_time,
                    waiting_time: m.waiting_time,
                    response_time: m.response_time,
                })
                .collect(),
            averages: Averages {
                att: round2(agg.average_turnaround_time),
                awt: round2(agg.average_waiting_time),
                art: round2(agg.average_response_time),
                cpu_utilization: round2(agg.cpu_utilization),
            },
        }
    }
}

/// Validates and runs a request.
///
/// # Example
/// ```
/// use u_cpusched::api::{schedule, ScheduleRequest};
/// use u_cpusched::models::ProcessSpec;
///
/// let request = ScheduleRequest::new("FCFS", vec![
///     ProcessSpec::new("A", 0, 5),
///     ProcessSpec::new("B", 0, 3),
/// ]);
/// let response = schedule(&request).unwrap();
/// assert_eq!(response.gantt_data[0].pid, "A");
/// assert_eq!(response.gantt_data[1].start, 5);
/// assert_eq!(response.averages.awt, 2.5);
/// ```
pub fn schedule(request: &ScheduleRequest) -> Result<ScheduleResponse, SimulationError> {
    let (policy, processes) = match request.validate() {
        Ok(valid) => valid,
        Err(errors) => {
            warn!(
                "rejected {} request: {} validation error(s)",
                request.algorithm,
                errors.len()
            );
            return Err(SimulationError::Invalid(errors));
        }
    };

    let simulator = Simulator::new(policy);
    debug!(
        "simulating {} processes with {:?}",
        processes.len(),
        simulator.policy()
    );
    let report = simulator.simulate(&processes)?;
    debug!(
        "simulation finished: {} segments, makespan {}",
        report.timeline.len(),
        report.metrics.aggregates.makespan
    );

    Ok(ScheduleResponse::from(&report))
}

/// Converts a timeline into Gantt bars with palette colors.
pub fn gantt_entries(timeline: &Timeline) -> Vec<GanttEntry> {
    let ids: BTreeSet<&str> = timeline
        .iter()
        .filter_map(|s| s.process_id.as_deref())
        .collect();
    let color_of = |pid: &str| {
        ids.iter()
            .position(|&id| id == pid)
            .map(|i| COLOR_PALETTE[i % COLOR_PALETTE.len()].to_string())
    };

    timeline
        .iter()
        .map(|s| match s.process_id.as_deref() {
            Some(pid) => GanttEntry {
                pid: pid.to_string(),
                start: s.start,
                end: s.end,
                color: color_of(pid),
            },
            None => GanttEntry {
                pid: IDLE_PID.to_string(),
                start: s.start,
                end: s.end,
                color: None,
            },
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

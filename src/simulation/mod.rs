//! Simulation driver and run entry points.
//!
//! [`Simulator`] advances a single simulated CPU through a validated
//! [`ProcessSet`] under one [`Policy`], producing a [`Timeline`].
//! [`simulate`] is the one-call entry point: it validates raw input,
//! runs the simulator, and computes metrics.
//!
//! # Errors
//!
//! All input problems are collected before the run starts and returned
//! together as [`SimulationError::Invalid`]. Once a run starts it can only
//! fail with [`SimulationError::Stalled`], which signals an engine defect.

mod driver;
mod state;

pub use driver::Simulator;

use std::fmt;

use serde::Serialize;

use crate::dispatching::Policy;
use crate::metrics::MetricsReport;
use crate::models::{Algorithm, ProcessSet, ProcessSpec, Timeline};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Errors returned by a simulation request.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// One or more input fields are invalid. Lists every offending field.
    Invalid(Vec<ValidationError>),
    /// The driver made no progress (internal invariant breach).
    Stalled {
        /// Simulation clock when the stall was detected.
        time: i64,
        /// What went wrong.
        reason: String,
    },
}

impl SimulationError {
    pub(crate) fn stalled(time: i64, reason: impl Into<String>) -> Self {
        Self::Stalled {
            time,
            reason: reason.into(),
        }
    }

    /// Validation errors, empty for a stall.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Invalid(errors) => errors,
            Self::Stalled { .. } => &[],
        }
    }

    /// Whether any validation error has the given kind.
    pub fn has_kind(&self, kind: ValidationErrorKind) -> bool {
        self.validation_errors().iter().any(|e| e.kind == kind)
    }
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(errors) => {
                write!(f, "invalid simulation input ({} error(s))", errors.len())?;
                for e in errors {
                    write!(f, "; {e}")?;
                }
                Ok(())
            }
            Self::Stalled { time, reason } => {
                write!(f, "simulation stalled at t={time}: {reason}")
            }
        }
    }
}

impl std::error::Error for SimulationError {}

impl From<Vec<ValidationError>> for SimulationError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Invalid(errors)
    }
}

impl From<ValidationError> for SimulationError {
    fn from(error: ValidationError) -> Self {
        Self::Invalid(vec![error])
    }
}

/// Result of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    /// Algorithm that produced the run.
    pub algorithm: Algorithm,
    /// Execution timeline, one segment per dispatch.
    pub timeline: Timeline,
    /// Per-process metrics and aggregates.
    pub metrics: MetricsReport,
}

/// Validates the input, runs the simulation, and computes metrics.
///
/// Quantum and process errors are reported together.
///
/// # Example
///
/// ```
/// use u_cpusched::models::{Algorithm, ProcessSpec};
/// use u_cpusched::simulation::simulate;
///
/// let report = simulate(
///     Algorithm::RoundRobin,
///     Some(4),
///     vec![
///         ProcessSpec::new("P1", 0, 5),
///         ProcessSpec::new("P2", 1, 3),
///         ProcessSpec::new("P3", 2, 8),
///     ],
/// ).unwrap();
///
/// assert_eq!(report.timeline.len(), 5);
/// assert_eq!(report.metrics.get("P3").unwrap().completion_time, 16);
/// ```
pub fn simulate(
    algorithm: Algorithm,
    quantum: Option<i64>,
    processes: Vec<ProcessSpec>,
) -> Result<SimulationReport, SimulationError> {
    let policy = Policy::new(algorithm, quantum);
    let processes = ProcessSet::new(processes);

    match (policy, processes) {
        (Ok(policy), Ok(processes)) => Simulator::new(policy).simulate(&processes),
        (policy, processes) => {
            let mut errors = Vec::new();
            if let Err(e) = policy {
                errors.push(e);
            }
            if let Err(mut errs) = processes {
                errors.append(&mut errs);
            }
            Err(SimulationError::Invalid(errors))
        }
    }
}

//! Input validation for simulation requests.
//!
//! Checks structural integrity of the process set and the scheduler
//! configuration before any simulation starts. Detects:
//! - Empty, reserved, or duplicate process IDs
//! - Negative arrival times and non-positive burst times
//! - Non-positive quantum overrides
//! - Missing or non-positive Round-Robin quantum
//! - Process sets whose schedule horizon overflows the clock
//! - Unknown algorithm selectors
//!
//! Every offending field is reported, not just the first one found.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::models::{ProcessSpec, IDLE_PID};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending field path (e.g. `processes[2].burst_time`).
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValidationErrorKind {
    /// A process definition is malformed or duplicates another.
    InvalidProcess,
    /// Round-Robin quantum is missing or not positive.
    InvalidQuantum,
    /// The algorithm selector is not one of the supported algorithms.
    UnsupportedAlgorithm,
}

impl ValidationError {
    pub(crate) fn new(
        kind: ValidationErrorKind,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            field: field.into(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_process(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::InvalidProcess, field, message)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidProcess => "invalid process",
            Self::InvalidQuantum => "invalid quantum",
            Self::UnsupportedAlgorithm => "unsupported algorithm",
        };
        f.write_str(name)
    }
}

/// Validates a single process definition.
///
/// `field_prefix` is prepended to every reported field
/// (e.g. `processes[3]`).
pub fn validate_process(spec: &ProcessSpec, field_prefix: &str) -> ValidationResult {
    let mut errors = Vec::new();

    if spec.id.trim().is_empty() {
        errors.push(ValidationError::invalid_process(
            format!("{field_prefix}.id"),
            "Process ID must not be empty",
        ));
    } else if spec.id == IDLE_PID {
        errors.push(ValidationError::invalid_process(
            format!("{field_prefix}.id"),
            format!("Process ID '{IDLE_PID}' is reserved for idle segments"),
        ));
    }

    if spec.arrival_time < 0 {
        errors.push(ValidationError::invalid_process(
            format!("{field_prefix}.arrival_time"),
            format!(
                "Process '{}' has negative arrival time {}",
                spec.id, spec.arrival_time
            ),
        ));
    }

    if spec.burst_time <= 0 {
        errors.push(ValidationError::invalid_process(
            format!("{field_prefix}.burst_time"),
            format!(
                "Process '{}' must have a positive burst time, got {}",
                spec.id, spec.burst_time
            ),
        ));
    }

    if let Some(q) = spec.quantum {
        if q <= 0 {
            errors.push(ValidationError::invalid_process(
                format!("{field_prefix}.quantum"),
                format!("Process '{}' has non-positive quantum override {q}", spec.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a whole process list.
///
/// Checks:
/// 1. Every process passes [`validate_process`]
/// 2. No duplicate process IDs
/// 3. The horizon `max(arrival) + Σ burst` fits in `i64`, which bounds
///    every tick the simulator can reach
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_processes(specs: &[ProcessSpec]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (i, spec) in specs.iter().enumerate() {
        let prefix = format!("processes[{i}]");
        if let Err(mut errs) = validate_process(spec, &prefix) {
            errors.append(&mut errs);
        }
        if !spec.id.is_empty() && !seen.insert(spec.id.as_str()) {
            errors.push(ValidationError::invalid_process(
                format!("{prefix}.id"),
                format!("Duplicate process ID: {}", spec.id),
            ));
        }
    }

    if errors.is_empty() && schedule_horizon(specs).is_none() {
        errors.push(ValidationError::invalid_process(
            "processes",
            "Latest arrival plus total burst time exceeds the representable time range",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Latest arrival plus total burst, `None` on overflow.
fn schedule_horizon(specs: &[ProcessSpec]) -> Option<i64> {
    let latest = specs.iter().map(|s| s.arrival_time).max().unwrap_or(0);
    specs
        .iter()
        .try_fold(0i64, |total, s| total.checked_add(s.burst_time))
        .and_then(|total| latest.checked_add(total))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_specs() -> Vec<ProcessSpec> {
        vec![
            ProcessSpec::new("P1", 0, 5),
            ProcessSpec::new("P2", 1, 3).with_priority(2),
            ProcessSpec::new("P3", 2, 8).with_quantum(2),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_processes(&sample_specs()).is_ok());
    }

    #[test]
    fn test_empty_input_is_valid() {
        assert!(validate_processes(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_id() {
        let specs = vec![ProcessSpec::new("P1", 0, 5), ProcessSpec::new("P1", 2, 3)];
        let errors = validate_processes(&specs).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidProcess);
        assert_eq!(errors[0].field, "processes[1].id");
        assert!(errors[0].message.contains("Duplicate"));
    }

    #[test]
    fn test_empty_id() {
        let errors = validate_processes(&[ProcessSpec::new("  ", 0, 1)]).unwrap_err();
        assert_eq!(errors[0].field, "processes[0].id");
    }

    #[test]
    fn test_reserved_idle_id() {
        let errors = validate_processes(&[ProcessSpec::new("IDLE", 0, 1)]).unwrap_err();
        assert!(errors[0].message.contains("reserved"));
    }

    #[test]
    fn test_negative_arrival() {
        let errors = validate_processes(&[ProcessSpec::new("P1", -1, 4)]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "processes[0].arrival_time");
    }

    #[test]
    fn test_non_positive_burst() {
        let specs = vec![ProcessSpec::new("P1", 0, 0), ProcessSpec::new("P2", 0, -3)];
        let errors = validate_processes(&specs).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.field.ends_with(".burst_time")));
    }

    #[test]
    fn test_bad_quantum_override() {
        let errors =
            validate_processes(&[ProcessSpec::new("P1", 0, 4).with_quantum(0)]).unwrap_err();
        assert_eq!(errors[0].field, "processes[0].quantum");
    }

    #[test]
    fn test_multiple_errors_reported() {
        // Every bad field of every process is listed
        let specs = vec![
            ProcessSpec::new("", -2, 0),
            ProcessSpec::new("P2", 0, 3),
            ProcessSpec::new("P2", 5, -1),
        ];
        let errors = validate_processes(&specs).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "processes[0].id",
                "processes[0].arrival_time",
                "processes[0].burst_time",
                "processes[2].burst_time",
                "processes[2].id",
            ]
        );
    }

    #[test]
    fn test_horizon_overflow() {
        let specs = vec![ProcessSpec::new("P1", i64::MAX - 1, 5)];
        let errors = validate_processes(&specs).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidProcess);
        assert_eq!(errors[0].field, "processes");

        // Total burst alone can overflow too
        let specs = vec![
            ProcessSpec::new("P1", 0, i64::MAX / 2 + 1),
            ProcessSpec::new("P2", 0, i64::MAX / 2 + 1),
        ];
        assert_eq!(validate_processes(&specs).unwrap_err()[0].field, "processes");

        // Largest horizon that still fits
        let specs = vec![
            ProcessSpec::new("P1", i64::MAX - 5, 2),
            ProcessSpec::new("P2", 0, 3),
        ];
        assert!(validate_processes(&specs).is_ok());
    }

    #[test]
    fn test_display() {
        let e = ValidationError::invalid_process("processes[0].id", "Process ID must not be empty");
        assert_eq!(e.to_string(), "processes[0].id: Process ID must not be empty");
        assert_eq!(ValidationErrorKind::InvalidQuantum.to_string(), "invalid quantum");
    }
}

//! Process model.
//!
//! A process is a single schedulable unit of CPU work: it becomes ready at
//! its arrival time and needs `burst_time` ticks of CPU to complete.
//!
//! [`ProcessSpec`] is the raw, unvalidated description (as received from a
//! caller). [`Process`] and [`ProcessSet`] are only obtainable through
//! validation, so the simulator never sees malformed input.

use serde::{Deserialize, Deserializer, Serialize};

use crate::validation::{validate_process, validate_processes, ValidationError};

/// Reserved identifier used for idle timeline segments on the wire.
pub const IDLE_PID: &str = "IDLE";

/// Unvalidated process definition.
///
/// # Time Representation
/// All times are in abstract ticks relative to the simulation epoch (t=0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Unique process identifier.
    #[serde(alias = "pid")]
    pub id: String,
    /// Tick at which the process becomes ready.
    #[serde(default)]
    pub arrival_time: i64,
    /// Total CPU ticks required.
    pub burst_time: i64,
    /// Scheduling priority. Carried through but not consulted by any policy.
    #[serde(default)]
    pub priority: i32,
    /// Per-process Round-Robin quantum. `None` = use the global quantum.
    ///
    /// On the wire, `0` means "no override" and deserializes to `None`.
    #[serde(
        default,
        alias = "time_quantum",
        deserialize_with = "deserialize_quantum",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantum: Option<i64>,
}

fn deserialize_quantum<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.filter(|&q| q != 0))
}

impl ProcessSpec {
    /// Creates a process definition with the given arrival and burst times.
    pub fn new(id: impl Into<String>, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            id: id.into(),
            arrival_time,
            burst_time,
            priority: 0,
            quantum: None,
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets a per-process Round-Robin quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = Some(quantum);
        self
    }
}

/// A validated process.
///
/// Invariants: non-empty id, `arrival_time >= 0`, `burst_time > 0`,
/// quantum override (if any) `> 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Process {
    id: String,
    arrival_time: i64,
    burst_time: i64,
    priority: i32,
    quantum: Option<i64>,
}

impl Process {
    /// Validates a single definition.
    ///
    /// Does not check ID uniqueness; use [`ProcessSet::new`] for that.
    pub fn new(spec: ProcessSpec) -> Result<Self, Vec<ValidationError>> {
        validate_process(&spec, "process")?;
        Ok(Self::from_spec_unchecked(spec))
    }

    fn from_spec_unchecked(spec: ProcessSpec) -> Self {
        Self {
            id: spec.id,
            arrival_time: spec.arrival_time,
            burst_time: spec.burst_time,
            priority: spec.priority,
            quantum: spec.quantum,
        }
    }

    /// Process identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Arrival tick.
    #[inline]
    pub fn arrival_time(&self) -> i64 {
        self.arrival_time
    }

    /// Required CPU ticks.
    #[inline]
    pub fn burst_time(&self) -> i64 {
        self.burst_time
    }

    /// Priority (inert).
    #[inline]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Per-process quantum override.
    #[inline]
    pub fn quantum(&self) -> Option<i64> {
        self.quantum
    }
}

/// A validated set of processes with unique IDs.
///
/// Keeps the caller's input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessSet {
    processes: Vec<Process>,
}

impl ProcessSet {
    /// Validates all definitions and builds the set.
    ///
    /// # Returns
    /// `Err(errors)` listing every offending field of every process.
    ///
    /// # Example
    /// ```
    /// use u_cpusched::models::{ProcessSet, ProcessSpec};
    ///
    /// let set = ProcessSet::new(vec![
    ///     ProcessSpec::new("P1", 0, 5),
    ///     ProcessSpec::new("P2", 1, 3),
    /// ]).unwrap();
    /// assert_eq!(set.len(), 2);
    /// assert_eq!(set.total_burst(), 8);
    ///
    /// let errors = ProcessSet::new(vec![
    ///     ProcessSpec::new("P1", 0, 5),
    ///     ProcessSpec::new("P1", -1, 0),
    /// ]).unwrap_err();
    /// assert_eq!(errors.len(), 3);
    /// ```
    pub fn new(specs: Vec<ProcessSpec>) -> Result<Self, Vec<ValidationError>> {
        validate_processes(&specs)?;
        Ok(Self {
            processes: specs.into_iter().map(Process::from_spec_unchecked).collect(),
        })
    }

    /// Processes in input order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Iterates processes in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, Process> {
        self.processes.iter()
    }

    /// Finds a process by ID.
    pub fn get(&self, id: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.id == id)
    }

    /// Number of processes.
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Sum of all burst times.
    pub fn total_burst(&self) -> i64 {
        self.processes.iter().map(|p| p.burst_time).sum()
    }

    /// Earliest arrival time, `None` when empty.
    pub fn earliest_arrival(&self) -> Option<i64> {
        self.processes.iter().map(|p| p.arrival_time).min()
    }
}

impl<'a> IntoIterator for &'a ProcessSet {
    type Item = &'a Process;
    type IntoIter = std::slice::Iter<'a, Process>;

    fn into_iter(self) -> Self::IntoIter {
        self.processes.iter()
    }
}

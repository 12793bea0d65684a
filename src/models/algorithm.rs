//! Scheduling algorithm selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, ValidationErrorKind};

/// The supported CPU scheduling algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// First-Come, First-Served (non-preemptive).
    #[serde(rename = "FCFS")]
    Fcfs,
    /// Shortest Job First (non-preemptive).
    #[serde(rename = "SJF")]
    Sjf,
    /// Shortest Remaining Time First (preemptive SJF).
    #[serde(rename = "SRTF")]
    Srtf,
    /// Round-Robin with a time quantum.
    #[serde(rename = "RR")]
    RoundRobin,
}

impl Algorithm {
    /// All algorithms, in selector order.
    pub const ALL: [Algorithm; 4] = [Self::Fcfs, Self::Sjf, Self::Srtf, Self::RoundRobin];

    /// Wire selector (`"FCFS"`, `"SJF"`, `"SRTF"`, `"RR"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Sjf => "SJF",
            Self::Srtf => "SRTF",
            Self::RoundRobin => "RR",
        }
    }

    /// Long name.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Fcfs => "First-Come, First-Served",
            Self::Sjf => "Shortest Job First",
            Self::Srtf => "Shortest Remaining Time First",
            Self::RoundRobin => "Round-Robin",
        }
    }

    /// Whether a running process can lose the CPU before it finishes.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Self::Srtf | Self::RoundRobin)
    }

    /// Whether the algorithm needs a time quantum.
    pub fn requires_quantum(&self) -> bool {
        matches!(self, Self::RoundRobin)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = ValidationError;

    /// Parses a selector. Matching is exact (case-sensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| {
                let supported: Vec<&str> = Self::ALL.iter().map(|a| a.as_str()).collect();
                ValidationError::new(
                    ValidationErrorKind::UnsupportedAlgorithm,
                    "algorithm",
                    format!(
                        "Unsupported algorithm '{s}'. Supported algorithms: {}",
                        supported.join(", ")
                    ),
                )
            })
    }
}

//! Random workload generation.
//!
//! Produces reproducible process sets for demos, benchmarks, and
//! property checks. The same seed always yields the same workload.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::models::ProcessSpec;

/// Configurable generator of random process sets.
///
/// Processes are named `P1..Pn`. Arrival times are uniform in
/// `0..=max_arrival`, burst times uniform in `min_burst..=max_burst`.
///
/// # Example
/// ```
/// use u_cpusched::workload::WorkloadGenerator;
///
/// let specs = WorkloadGenerator::new(5).with_seed(7).generate();
/// assert_eq!(specs.len(), 5);
/// assert_eq!(specs[0].id, "P1");
/// assert_eq!(specs, WorkloadGenerator::new(5).with_seed(7).generate());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadGenerator {
    count: usize,
    max_arrival: i64,
    min_burst: i64,
    max_burst: i64,
    seed: u64,
}

impl WorkloadGenerator {
    /// Creates a generator for `count` processes with default ranges
    /// (arrival 0..=10, burst 1..=10, seed 42).
    pub fn new(count: usize) -> Self {
        Self {
            count,
            max_arrival: 10,
            min_burst: 1,
            max_burst: 10,
            seed: 42,
        }
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the latest possible arrival time (clamped to >= 0).
    pub fn with_max_arrival(mut self, max_arrival: i64) -> Self {
        self.max_arrival = max_arrival.max(0);
        self
    }

    /// Sets the burst range (clamped so that `1 <= min <= max`).
    pub fn with_burst_range(mut self, min_burst: i64, max_burst: i64) -> Self {
        self.min_burst = min_burst.max(1);
        self.max_burst = max_burst.max(self.min_burst);
        self
    }

    /// Generates the process set.
    pub fn generate(&self) -> Vec<ProcessSpec> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        (1..=self.count)
            .map(|i| {
                let arrival = rng.random_range(0..=self.max_arrival);
                let burst = rng.random_range(self.min_burst..=self.max_burst);
                ProcessSpec::new(format!("P{i}"), arrival, burst)
            })
            .collect()
    }
}

//! Per-process and aggregate scheduling metrics.
//!
//! Computes standard CPU scheduling performance indicators from a finished
//! timeline and its input processes. Pure: inputs are never mutated.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Completion | End of the process's last segment |
//! | Turnaround | completion − arrival |
//! | Waiting | turnaround − burst |
//! | Response | first dispatch − arrival |
//! | CPU Utilization | busy / last segment end × 100 |
//!
//! # Reference
//! Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5.2

use serde::Serialize;

use crate::models::{ProcessSet, Timeline};

/// Metrics for one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessMetrics {
    /// Process identifier.
    pub id: String,
    /// Arrival tick.
    pub arrival_time: i64,
    /// CPU demand.
    pub burst_time: i64,
    /// Tick at which the last burst tick finished.
    pub completion_time: i64,
    /// completion − arrival.
    pub turnaround_time: i64,
    /// turnaround − burst. Never negative for a correct run.
    pub waiting_time: i64,
    /// first dispatch − arrival.
    pub response_time: i64,
}

/// Run-level statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregates {
    /// Mean turnaround time (0 for an empty run).
    pub average_turnaround_time: f64,
    /// Mean waiting time (0 for an empty run).
    pub average_waiting_time: f64,
    /// Mean response time (0 for an empty run).
    pub average_response_time: f64,
    /// Busy share of the timeline, in percent.
    pub cpu_utilization: f64,
    /// End of the last segment.
    pub makespan: i64,
    /// Total non-idle ticks.
    pub busy_time: i64,
    /// Total idle ticks.
    pub idle_time: i64,
    /// Switches between two different processes.
    pub context_switches: usize,
}

/// Metrics for a complete run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsReport {
    processes: Vec<ProcessMetrics>,
    /// Averages and utilization.
    pub aggregates: Aggregates,
}

impl MetricsReport {
    /// Computes metrics from a timeline and its input processes.
    ///
    /// Processes that never appear in the timeline are skipped.
    /// Per-process metrics are sorted by process ID.
    pub fn calculate(timeline: &Timeline, processes: &ProcessSet) -> Self {
        let mut rows: Vec<ProcessMetrics> = processes
            .iter()
            .filter_map(|p| {
                let completion = timeline.completion_time(p.id())?;
                let first_start = timeline.first_start(p.id())?;
                let turnaround = completion - p.arrival_time();
                Some(ProcessMetrics {
                    id: p.id().to_string(),
                    arrival_time: p.arrival_time(),
                    burst_time: p.burst_time(),
                    completion_time: completion,
                    turnaround_time: turnaround,
                    waiting_time: turnaround - p.burst_time(),
                    response_time: first_start - p.arrival_time(),
                })
            })
            .collect();
        rows.sort_by(|a, b| a.id.cmp(&b.id));

        let aggregates = Aggregates {
            average_turnaround_time: mean(rows.iter().map(|m| m.turnaround_time)),
            average_waiting_time: mean(rows.iter().map(|m| m.waiting_time)),
            average_response_time: mean(rows.iter().map(|m| m.response_time)),
            cpu_utilization: timeline.utilization(),
            makespan: timeline.end(),
            busy_time: timeline.busy_time(),
            idle_time: timeline.idle_time(),
            context_switches: timeline.context_switches(),
        };

        Self {
            processes: rows,
            aggregates,
        }
    }

    /// Per-process metrics, sorted by ID.
    pub fn processes(&self) -> &[ProcessMetrics] {
        &self.processes
    }

    /// Metrics for a given process.
    pub fn get(&self, id: &str) -> Option<&ProcessMetrics> {
        self.processes.iter().find(|m| m.id == id)
    }

    /// Whether every process has non-negative waiting time.
    pub fn is_consistent(&self) -> bool {
        self.processes
            .iter()
            .all(|m| m.waiting_time >= 0 && m.response_time >= 0)
    }
}

fn mean(values: impl Iterator<Item = i64>) -> f64 {
    let (sum, count) = values.fold((0i128, 0usize), |(s, c), v| (s + i128::from(v), c + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProcessSpec;

    fn rr_example() -> (Timeline, ProcessSet) {
        let processes = ProcessSet::new(vec![
            ProcessSpec::new("P1", 0, 5),
            ProcessSpec::new("P2", 1, 3),
            ProcessSpec::new("P3", 2, 8),
        ])
        .unwrap();
        let mut t = Timeline::new();
        t.push_run("P1", 0, 4).unwrap();
        t.push_run("P2", 4, 7).unwrap();
        t.push_run("P3", 7, 11).unwrap();
        t.push_run("P1", 11, 12).unwrap();
        t.push_run("P3", 12, 16).unwrap();
        (t, processes)
    }

    #[test]
    fn test_per_process_metrics() {
        let (t, processes) = rr_example();
        let report = MetricsReport::calculate(&t, &processes);

        let p1 = report.get("P1").unwrap();
        assert_eq!(p1.completion_time, 12);
        assert_eq!(p1.turnaround_time, 12);
        assert_eq!(p1.waiting_time, 7);
        assert_eq!(p1.response_time, 0);

        let p2 = report.get("P2").unwrap();
        assert_eq!(p2.completion_time, 7);
        assert_eq!(p2.turnaround_time, 6);
        assert_eq!(p2.waiting_time, 3);
        assert_eq!(p2.response_time, 3);

        let p3 = report.get("P3").unwrap();
        assert_eq!(p3.completion_time, 16);
        assert_eq!(p3.turnaround_time, 14);
        assert_eq!(p3.waiting_time, 6);
        assert_eq!(p3.response_time, 5);
        assert!(report.is_consistent());
    }

    #[test]
    fn test_aggregates() {
        let (t, processes) = rr_example();
        let agg = MetricsReport::calculate(&t, &processes).aggregates;
        // (12 + 6 + 14) / 3
        assert!((agg.average_turnaround_time - 32.0 / 3.0).abs() < 1e-10);
        // (7 + 3 + 6) / 3
        assert!((agg.average_waiting_time - 16.0 / 3.0).abs() < 1e-10);
        assert!((agg.average_response_time - 8.0 / 3.0).abs() < 1e-10);
        assert!((agg.cpu_utilization - 100.0).abs() < 1e-10);
        assert_eq!(agg.makespan, 16);
        assert_eq!(agg.busy_time, 16);
        assert_eq!(agg.idle_time, 0);
        assert_eq!(agg.context_switches, 4);
    }

    #[test]
    fn test_sorted_by_id() {
        let processes = ProcessSet::new(vec![
            ProcessSpec::new("b", 0, 1),
            ProcessSpec::new("a", 0, 1),
        ])
        .unwrap();
        let mut t = Timeline::new();
        t.push_run("a", 0, 1).unwrap();
        t.push_run("b", 1, 2).unwrap();
        let report = MetricsReport::calculate(&t, &processes);
        let ids: Vec<&str> = report.processes().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_utilization_with_idle() {
        let processes = ProcessSet::new(vec![ProcessSpec::new("P1", 3, 2)]).unwrap();
        let mut t = Timeline::new();
        t.push_idle(0, 3).unwrap();
        t.push_run("P1", 3, 5).unwrap();
        let report = MetricsReport::calculate(&t, &processes);
        assert!((report.aggregates.cpu_utilization - 40.0).abs() < 1e-10);
        assert_eq!(report.aggregates.idle_time, 3);
        let p1 = report.get("P1").unwrap();
        assert_eq!(p1.waiting_time, 0);
        assert_eq!(p1.turnaround_time, 2);
    }

    #[test]
    fn test_empty() {
        let report = MetricsReport::calculate(&Timeline::new(), &ProcessSet::default());
        assert!(report.processes().is_empty());
        assert_eq!(report.aggregates, Aggregates::default());
    }

    #[test]
    fn test_missing_process_skipped() {
        let processes = ProcessSet::new(vec![
            ProcessSpec::new("P1", 0, 2),
            ProcessSpec::new("P2", 0, 2),
        ])
        .unwrap();
        let mut t = Timeline::new();
        t.push_run("P1", 0, 2).unwrap();
        let report = MetricsReport::calculate(&t, &processes);
        assert_eq!(report.processes().len(), 1);
        assert!(report.get("P2").is_none());
        assert!((report.aggregates.average_turnaround_time - 2.0).abs() < 1e-10);
    }
}

//! Timeline (Gantt) model.
//!
//! A timeline is the ordered list of CPU-allocation segments produced by one
//! simulation run. Gaps where no process is ready are represented by explicit
//! idle segments, so the segments always tile `[0, end)` without holes.

use serde::{Deserialize, Serialize};

/// One contiguous CPU allocation `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Running process ID. `None` = CPU idle.
    pub process_id: Option<String>,
    /// Start tick (inclusive).
    pub start: i64,
    /// End tick (exclusive).
    pub end: i64,
}

impl Segment {
    /// Creates a segment for a running process.
    pub fn run(process_id: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            process_id: Some(process_id.into()),
            start,
            end,
        }
    }

    /// Creates an idle segment.
    pub fn idle(start: i64, end: i64) -> Self {
        Self {
            process_id: None,
            start,
            end,
        }
    }

    /// Whether the CPU is idle during this segment.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.process_id.is_none()
    }

    /// Whether this segment belongs to the given process.
    #[inline]
    pub fn is_for(&self, process_id: &str) -> bool {
        self.process_id.as_deref() == Some(process_id)
    }

    /// Duration (end - start) in ticks.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// Error returned when a segment would break timeline ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentOrderError {
    /// Where the timeline currently ends.
    pub expected_start: i64,
    /// Rejected segment bounds.
    pub start: i64,
    /// Rejected segment end.
    pub end: i64,
}

impl std::fmt::Display for SegmentOrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "segment [{}, {}) does not continue timeline ending at {}",
            self.start, self.end, self.expected_start
        )
    }
}

impl std::error::Error for SegmentOrderError {}

/// An ordered, gap-free sequence of segments starting at t=0.
///
/// Adjacent segments for the same process are kept separate: every
/// dispatch is its own segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    segments: Vec<Segment>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a segment.
    ///
    /// Fails unless `start` equals the current end and `start < end`.
    pub fn push(&mut self, segment: Segment) -> Result<(), SegmentOrderError> {
        let expected_start = self.end();
        if segment.start != expected_start || segment.start >= segment.end {
            return Err(SegmentOrderError {
                expected_start,
                start: segment.start,
                end: segment.end,
            });
        }
        self.segments.push(segment);
        Ok(())
    }

    /// Appends a run segment for a process.
    pub fn push_run(
        &mut self,
        process_id: impl Into<String>,
        start: i64,
        end: i64,
    ) -> Result<(), SegmentOrderError> {
        self.push(Segment::run(process_id, start, end))
    }

    /// Appends an idle segment.
    pub fn push_idle(&mut self, start: i64, end: i64) -> Result<(), SegmentOrderError> {
        self.push(Segment::idle(start, end))
    }

    /// All segments in time order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Iterates segments in time order.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// End of the last segment (0 when empty).
    pub fn end(&self) -> i64 {
        self.segments.last().map(|s| s.end).unwrap_or(0)
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the timeline has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sum of non-idle segment durations.
    pub fn busy_time(&self) -> i64 {
        self.segments
            .iter()
            .filter(|s| !s.is_idle())
            .map(Segment::duration)
            .sum()
    }

    /// Sum of idle segment durations.
    pub fn idle_time(&self) -> i64 {
        self.segments
            .iter()
            .filter(|s| s.is_idle())
            .map(Segment::duration)
            .sum()
    }

    /// CPU utilization in percent: busy / end × 100. Returns 0 when empty.
    pub fn utilization(&self) -> f64 {
        let end = self.end();
        if end <= 0 {
            return 0.0;
        }
        self.busy_time() as f64 / end as f64 * 100.0
    }

    /// Returns all segments for a given process.
    pub fn segments_for(&self, process_id: &str) -> Vec<&Segment> {
        self.segments
            .iter()
            .filter(|s| s.is_for(process_id))
            .collect()
    }

    /// Completion time for a process (end of its last segment).
    pub fn completion_time(&self, process_id: &str) -> Option<i64> {
        self.segments
            .iter()
            .rev()
            .find(|s| s.is_for(process_id))
            .map(|s| s.end)
    }

    /// First dispatch time for a process (start of its first segment).
    pub fn first_start(&self, process_id: &str) -> Option<i64> {
        self.segments
            .iter()
            .find(|s| s.is_for(process_id))
            .map(|s| s.start)
    }

    /// Number of times the CPU switches from one process to a different one.
    ///
    /// Idle gaps are skipped: `A, IDLE, B` counts one switch, `A, IDLE, A` none.
    pub fn context_switches(&self) -> usize {
        let mut switches = 0;
        let mut last: Option<&str> = None;
        for seg in &self.segments {
            if let Some(pid) = seg.process_id.as_deref() {
                if last.is_some_and(|prev| prev != pid) {
                    switches += 1;
                }
                last = Some(pid);
            }
        }
        switches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_timeline() -> Timeline {
        let mut t = Timeline::new();
        t.push_idle(0, 2).unwrap();
        t.push_run("P1", 2, 5).unwrap();
        t.push_run("P2", 5, 6).unwrap();
        t.push_run("P1", 6, 8).unwrap();
        t
    }

    #[test]
    fn test_segment_basics() {
        let s = Segment::run("P1", 3, 7);
        assert_eq!(s.duration(), 4);
        assert!(!s.is_idle());
        assert!(s.is_for("P1"));
        assert!(!s.is_for("P2"));
        assert!(Segment::idle(0, 1).is_idle());
    }

    #[test]
    fn test_push_rejects_gap() {
        let mut t = sample_timeline();
        let err = t.push_run("P3", 9, 10).unwrap_err();
        assert_eq!(err.expected_start, 8);
        assert_eq!(t.len(), 4);
    }

    #[test]
    fn test_push_rejects_empty_segment() {
        let mut t = Timeline::new();
        assert!(t.push_run("P1", 0, 0).is_err());
        assert!(t.is_empty());
    }

    #[test]
    fn test_push_must_start_at_zero() {
        let mut t = Timeline::new();
        assert!(t.push_run("P1", 1, 3).is_err());
    }

    #[test]
    fn test_busy_idle_utilization() {
        let t = sample_timeline();
        assert_eq!(t.end(), 8);
        assert_eq!(t.busy_time(), 6);
        assert_eq!(t.idle_time(), 2);
        assert!((t.utilization() - 75.0).abs() < 1e-10);
    }

    #[test]
    fn test_per_process_queries() {
        let t = sample_timeline();
        assert_eq!(t.segments_for("P1").len(), 2);
        assert_eq!(t.completion_time("P1"), Some(8));
        assert_eq!(t.completion_time("P2"), Some(6));
        assert_eq!(t.first_start("P1"), Some(2));
        assert_eq!(t.completion_time("P9"), None);
    }

    #[test]
    fn test_context_switches() {
        let t = sample_timeline();
        assert_eq!(t.context_switches(), 2);

        let mut t2 = Timeline::new();
        t2.push_run("A", 0, 1).unwrap();
        t2.push_idle(1, 2).unwrap();
        t2.push_run("A", 2, 3).unwrap();
        t2.push_run("A", 3, 4).unwrap();
        assert_eq!(t2.context_switches(), 0);
    }

    #[test]
    fn test_empty_timeline() {
        let t = Timeline::new();
        assert_eq!(t.end(), 0);
        assert_eq!(t.busy_time(), 0);
        assert!((t.utilization() - 0.0).abs() < 1e-10);
        assert_eq!(t.context_switches(), 0);
    }
}

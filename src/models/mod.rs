//! CPU scheduling domain models.
//!
//! Provides the core data types for describing a simulation input
//! (processes, algorithm selection) and its primary output (the timeline).
//!
//! # Domain Mappings
//!
//! | u-cpusched | OS textbook | Gantt chart |
//! |------------|-------------|-------------|
//! | Process | Job / PCB | Row label |
//! | Segment | Dispatch | Bar |
//! | Timeline | Execution trace | Chart |

mod algorithm;
mod process;
mod timeline;

pub use algorithm::Algorithm;
pub use process::{Process, ProcessSet, ProcessSpec, IDLE_PID};
pub use timeline::{Segment, SegmentOrderError, Timeline};

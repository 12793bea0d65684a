//! Deterministic single-CPU scheduling simulator.
//!
//! Given a set of processes with static arrival and burst times and a
//! scheduling algorithm, computes the exact execution timeline (Gantt
//! segments, including idle gaps) and per-process metrics: completion,
//! turnaround, waiting, and response times, plus averages and CPU
//! utilization.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ProcessSpec`, `Process`, `ProcessSet`,
//!   `Algorithm`, `Segment`, `Timeline`
//! - **`validation`**: Input integrity checks (IDs, times, quantum)
//! - **`dispatching`**: The four policies (FCFS, SJF, SRTF, RR) and their
//!   tie-breaking rules
//! - **`simulation`**: The discrete-event driver and `simulate` entry point
//! - **`metrics`**: Per-process metrics and run aggregates
//! - **`api`**: Serializable request/response contract for transports
//! - **`workload`**: Seeded random process sets
//!
//! # Determinism
//!
//! Runs are pure functions of their input. The engine keeps no global
//! state and never logs; independent runs may execute in parallel.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod api;
pub mod dispatching;
pub mod metrics;
pub mod models;
pub mod simulation;
pub mod validation;
pub mod workload;

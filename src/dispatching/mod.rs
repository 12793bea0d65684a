//! Scheduling policies for the simulation driver.
//!
//! The four supported algorithms form a closed set: [`Policy`] is an enum,
//! not a trait object, and every decision is a pure function of the ready
//! queue and the [`DispatchContext`].
//!
//! # Tie-breaking
//!
//! | Policy | Keys (in order) | Run length |
//! |--------|-----------------|------------|
//! | FCFS | arrival, id | remaining |
//! | SJF | burst, arrival, id | remaining |
//! | SRTF | remaining, arrival, id | min(remaining, next arrival − now) |
//! | RR | queue order | min(quantum, remaining) |
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod context;
mod policy;

pub use context::{Candidate, DispatchContext};
pub use policy::{Dispatch, Policy};

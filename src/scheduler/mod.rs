//! Schedule construction and evaluation.
//!
//! Provides the randomized active-schedule generator, the stand-alone
//! re-timing pass, and schedule quality metrics.
//!
//! # Algorithm
//!
//! [`ActiveScheduleGenerator`] performs one randomized
//! Giffler–Thompson construction pass: it is not a general-purpose
//! optimizer (no restarts, no local search), but every schedule it emits
//! is active, and sampling with different seeds explores the active
//! schedule space. [`retime`] derives the earliest start times for any
//! fixed per-machine ordering, whether produced by the generator or by a
//! permutation-based construction.
//!
//! # References
//!
//! - Giffler & Thompson (1960), "Algorithms for Solving Production
//!   Scheduling Problems"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

mod active;
mod kpi;
mod retiming;

pub use active::ActiveScheduleGenerator;
pub use kpi::ScheduleKpi;
pub use retiming::retime;

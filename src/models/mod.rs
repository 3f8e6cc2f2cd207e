//! Job-shop domain models.
//!
//! Provides the core data types: the immutable instance description
//! ([`Problem`], [`Operation`]) and the incrementally-built solution
//! ([`Schedule`], [`ScheduledOperation`]).
//!
//! # Terminology
//!
//! | u-jobshop | Manufacturing | Literature |
//! |-----------|---------------|------------|
//! | Job | Order | Job |
//! | Operation | Processing step | Operation / Activity |
//! | Machine | Machine / Work center | Machine |
//! | Schedule | Production plan | Semi-active / active schedule |

mod operation;
mod problem;
mod schedule;

pub use operation::Operation;
pub use problem::Problem;
pub use schedule::{Schedule, ScheduledOperation};

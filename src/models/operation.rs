//! Operation model.
//!
//! An operation is the smallest schedulable unit of work: it belongs to
//! one job, occupies one machine exclusively, and runs for a fixed
//! duration. Operations are created once when the instance is built and
//! never mutated.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1

use serde::{Deserialize, Serialize};

/// A single operation of a job.
///
/// Operation ids are dense and 0-based across the whole instance, so they
/// double as indices into per-operation arrays (the schedule's reverse
/// index, the re-timing pass's in-degree counters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Unique operation id, dense over `[0, operation_count)`.
    pub id: usize,
    /// Owning job id.
    pub job: usize,
    /// 0-based position within the job's fixed sequence.
    pub position: usize,
    /// Machine this operation occupies.
    pub machine: usize,
    /// Processing duration (positive).
    pub duration: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_fields() {
        let op = Operation {
            id: 3,
            job: 1,
            position: 0,
            machine: 2,
            duration: 7,
        };
        assert_eq!(op.id, 3);
        assert_eq!(op.job, 1);
        assert_eq!(op.position, 0);
        assert_eq!(op.machine, 2);
        assert_eq!(op.duration, 7);
    }

    #[test]
    fn test_operation_serde_shape() {
        let op = Operation {
            id: 0,
            job: 0,
            position: 0,
            machine: 1,
            duration: 5,
        };
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["id"], 0);
        assert_eq!(json["machine"], 1);
        assert_eq!(json["duration"], 5);
    }
}

//! Problem (instance) model.
//!
//! An immutable description of a job-shop instance: machine count, per-job
//! ordered operation sequences, and the dense operation list. The operation
//! at position `i` of a job must complete before the operation at position
//! `i + 1` of the same job begins.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1

use serde::{Deserialize, Serialize};

use super::Operation;

/// An immutable job-shop instance.
///
/// Operation ids partition bijectively onto `(job, position)` pairs:
/// every operation belongs to exactly one job and appears exactly once in
/// that job's sequence. Ids are assigned densely, row-major over jobs, by
/// [`Problem::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    machine_count: usize,
    /// Per job, the operation ids in execution order.
    job_sequences: Vec<Vec<usize>>,
    /// All operations, indexed by id.
    operations: Vec<Operation>,
}

impl Problem {
    /// Builds an instance from per-job `(machine, duration)` rows.
    ///
    /// Operation ids are assigned densely in row order: job 0's operations
    /// get ids `0..job_len(0)`, job 1's the next block, and so on.
    pub fn new(machine_count: usize, jobs: Vec<Vec<(usize, u64)>>) -> Self {
        let mut job_sequences = Vec::with_capacity(jobs.len());
        let mut operations = Vec::new();

        for (job, row) in jobs.into_iter().enumerate() {
            let mut sequence = Vec::with_capacity(row.len());
            for (position, (machine, duration)) in row.into_iter().enumerate() {
                let id = operations.len();
                sequence.push(id);
                operations.push(Operation {
                    id,
                    job,
                    position,
                    machine,
                    duration,
                });
            }
            job_sequences.push(sequence);
        }

        Self {
            machine_count,
            job_sequences,
            operations,
        }
    }

    /// Number of machines.
    pub fn machine_count(&self) -> usize {
        self.machine_count
    }

    /// Number of jobs.
    pub fn job_count(&self) -> usize {
        self.job_sequences.len()
    }

    /// Total number of operations.
    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    /// Number of operations in a job.
    pub fn job_len(&self, job: usize) -> usize {
        self.job_sequences[job].len()
    }

    /// The operation ids of a job, in execution order.
    pub fn job_sequence(&self, job: usize) -> &[usize] {
        &self.job_sequences[job]
    }

    /// Looks up an operation by id.
    pub fn operation(&self, id: usize) -> &Operation {
        &self.operations[id]
    }

    /// Looks up an operation by `(job, position)`.
    pub fn job_operation(&self, job: usize, position: usize) -> &Operation {
        &self.operations[self.job_sequences[job][position]]
    }

    /// All operations, in id order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }
}

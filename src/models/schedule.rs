//! Schedule (solution) model.
//!
//! A schedule is built incrementally: per machine, an append-only ordered
//! sequence of `(operation, start)` entries, plus a reverse index mapping
//! each operation id to its slot within its machine's sequence. Start
//! times are assigned on append and only ever altered by the explicit
//! re-timing pass in [`crate::scheduler::retime`].
//!
//! # Invariants
//!
//! After every append:
//! - each operation appears in at most one machine sequence, at most once
//! - consecutive entries on a machine satisfy
//!   `start[i] + duration[i] <= start[i+1]`
//! - consecutive operations of a job satisfy
//!   `start[k] + duration[k] <= start[k+1]`
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

use serde::{Deserialize, Serialize};

use super::Problem;

/// One committed entry on a machine's sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledOperation {
    /// Operation id.
    pub operation: usize,
    /// Assigned start time.
    pub start: u64,
}

/// An incrementally-built job-shop schedule.
///
/// The per-machine sequences record the committed processing order; the
/// reverse index is the arena-style back-reference from operation id to
/// its slot, valid only once the operation has been appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Per machine, the committed `(operation, start)` entries in order.
    machine_sequences: Vec<Vec<ScheduledOperation>>,
    /// Operation id → slot within its machine's sequence.
    slot_in_machine: Vec<Option<usize>>,
}

impl Schedule {
    /// Creates an empty schedule for an instance.
    pub fn new(problem: &Problem) -> Self {
        Self {
            machine_sequences: vec![Vec::new(); problem.machine_count()],
            slot_in_machine: vec![None; problem.operation_count()],
        }
    }

    /// Builds a schedule from fixed per-machine orderings, all start times
    /// zero.
    ///
    /// This is the bridge from a permutation per machine to a timed
    /// schedule: follow with [`crate::scheduler::retime`] to derive the
    /// earliest start times consistent with the given orderings. Until
    /// then the timing invariants do not hold.
    ///
    /// # Panics
    /// Panics unless exactly one ordering is supplied per machine.
    pub fn from_machine_orders(problem: &Problem, orders: Vec<Vec<usize>>) -> Self {
        assert_eq!(
            orders.len(),
            problem.machine_count(),
            "one ordering per machine"
        );
        let mut slot_in_machine = vec![None; problem.operation_count()];
        let mut machine_sequences = Vec::with_capacity(orders.len());
        for order in orders {
            let mut sequence = Vec::with_capacity(order.len());
            for (slot, operation) in order.into_iter().enumerate() {
                slot_in_machine[operation] = Some(slot);
                sequence.push(ScheduledOperation { operation, start: 0 });
            }
            machine_sequences.push(sequence);
        }

        Self {
            machine_sequences,
            slot_in_machine,
        }
    }

    /// Earliest time `operation` could legally start if appended next to
    /// its machine's sequence, given the schedule as committed so far.
    ///
    /// `max(machine_ready, job_ready)`: the completion time of the last
    /// entry on the operation's machine, and the completion time of the
    /// operation's job predecessor. Side-effect free; may be called
    /// speculatively for operations not yet committed.
    ///
    /// # Panics
    /// Panics if the operation's job predecessor has not been committed
    /// yet — the generator only ever commits a job's operations in
    /// position order, which guarantees the predecessor lookup.
    pub fn fastest_start_time(&self, problem: &Problem, operation: usize) -> u64 {
        let op = problem.operation(operation);

        let machine_ready = self.machine_sequences[op.machine]
            .last()
            .map(|entry| entry.start + problem.operation(entry.operation).duration)
            .unwrap_or(0);

        let job_ready = if op.position > 0 {
            let prev = problem.job_operation(op.job, op.position - 1);
            let slot = self.slot_in_machine[prev.id]
                .expect("job predecessor must be committed before its successor is queried");
            self.machine_sequences[prev.machine][slot].start + prev.duration
        } else {
            0
        };

        machine_ready.max(job_ready)
    }

    /// Appends `operation` to the tail of its machine's sequence at
    /// [`fastest_start_time`](Self::fastest_start_time), and records its
    /// slot in the reverse index.
    ///
    /// This is the only mutator of committed state. The precondition of
    /// `fastest_start_time` applies: the operation's job predecessor, if
    /// any, must already be committed.
    pub fn push_back_operation(&mut self, problem: &Problem, operation: usize) {
        let start = self.fastest_start_time(problem, operation);
        let machine = problem.operation(operation).machine;
        self.slot_in_machine[operation] = Some(self.machine_sequences[machine].len());
        self.machine_sequences[machine].push(ScheduledOperation { operation, start });
    }

    /// The committed entries on a machine, in processing order.
    pub fn machine_sequence(&self, machine: usize) -> &[ScheduledOperation] {
        &self.machine_sequences[machine]
    }

    /// Slot of an operation within its machine's sequence, if committed.
    pub fn slot_of(&self, operation: usize) -> Option<usize> {
        self.slot_in_machine[operation]
    }

    /// Start time of a committed operation.
    ///
    /// `None` when the operation is uncommitted, or when the reverse
    /// index does not resolve to an entry for this operation on its own
    /// machine (a malformed schedule that verification will report).
    pub fn start_time(&self, problem: &Problem, operation: usize) -> Option<u64> {
        let machine = problem.operation(operation).machine;
        self.slot_in_machine[operation]
            .and_then(|slot| self.machine_sequences[machine].get(slot))
            .filter(|entry| entry.operation == operation)
            .map(|entry| entry.start)
    }

    /// Completion time of a committed operation.
    pub fn completion_time(&self, problem: &Problem, operation: usize) -> Option<u64> {
        self.start_time(problem, operation)
            .map(|start| start + problem.operation(operation).duration)
    }

    /// Makespan: latest completion time across all machines (0 when empty).
    pub fn makespan(&self, problem: &Problem) -> u64 {
        self.machine_sequences
            .iter()
            .flatten()
            .map(|entry| entry.start + problem.operation(entry.operation).duration)
            .max()
            .unwrap_or(0)
    }

    /// Number of committed operations.
    pub fn scheduled_count(&self) -> usize {
        self.slot_in_machine.iter().filter(|s| s.is_some()).count()
    }

    /// Whether every operation of the instance has been committed.
    pub fn is_complete(&self, problem: &Problem) -> bool {
        self.scheduled_count() == problem.operation_count()
    }

    /// Resets every committed start time to zero (re-timing prologue).
    pub(crate) fn reset_starts(&mut self) {
        for sequence in &mut self.machine_sequences {
            for entry in sequence {
                entry.start = 0;
            }
        }
    }

    /// Raises a committed operation's start time to `proposed` if larger.
    pub(crate) fn relax_start(&mut self, problem: &Problem, operation: usize, proposed: u64) {
        let machine = problem.operation(operation).machine;
        let slot = self.slot_in_machine[operation]
            .expect("re-timing requires every operation to be committed");
        let entry = &mut self.machine_sequences[machine][slot];
        entry.start = entry.start.max(proposed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_job_problem() -> Problem {
        // Job 0: (m0, 3), (m1, 2); Job 1: (m1, 2), (m0, 4)
        Problem::new(2, vec![vec![(0, 3), (1, 2)], vec![(1, 2), (0, 4)]])
    }

    #[test]
    fn test_empty_schedule() {
        let p = two_job_problem();
        let s = Schedule::new(&p);
        assert_eq!(s.makespan(&p), 0);
        assert_eq!(s.scheduled_count(), 0);
        assert!(!s.is_complete(&p));
        assert_eq!(s.fastest_start_time(&p, 0), 0);
    }

    #[test]
    fn test_machine_ready_term() {
        let p = two_job_problem();
        let mut s = Schedule::new(&p);
        // op 0 (J0 first, m0, d3) then op 3's machine term on m0.
        s.push_back_operation(&p, 0);
        assert_eq!(s.start_time(&p, 0), Some(0));
        // J1's first op on m1 is unconstrained.
        assert_eq!(s.fastest_start_time(&p, 2), 0);
        s.push_back_operation(&p, 2);
        // op 3 (J1 second, m0): machine ready 3, job ready 2.
        assert_eq!(s.fastest_start_time(&p, 3), 3);
    }

    #[test]
    fn test_job_ready_dominates_machine_ready() {
        let p = two_job_problem();
        let mut s = Schedule::new(&p);
        s.push_back_operation(&p, 2); // J1 op0 on m1: [0, 2)
        s.push_back_operation(&p, 0); // J0 op0 on m0: [0, 3)
        // J0 op1 on m1: machine free at 2, but job predecessor ends at 3.
        assert_eq!(s.fastest_start_time(&p, 1), 3);
        s.push_back_operation(&p, 1);
        assert_eq!(s.start_time(&p, 1), Some(3));
    }

    #[test]
    fn test_speculative_query_has_no_side_effects() {
        let p = two_job_problem();
        let mut s = Schedule::new(&p);
        s.push_back_operation(&p, 0);
        let before = s.clone();
        assert_eq!(s.fastest_start_time(&p, 3), s.fastest_start_time(&p, 3));
        assert_eq!(s, before);
    }

    #[test]
    fn test_reverse_index_tracks_slots() {
        let p = two_job_problem();
        let mut s = Schedule::new(&p);
        assert_eq!(s.slot_of(0), None);
        s.push_back_operation(&p, 0);
        s.push_back_operation(&p, 2);
        s.push_back_operation(&p, 3);
        assert_eq!(s.slot_of(0), Some(0));
        assert_eq!(s.slot_of(2), Some(0));
        assert_eq!(s.slot_of(3), Some(1)); // second on m0
    }

    #[test]
    fn test_complete_schedule_example() {
        let p = two_job_problem();
        let mut s = Schedule::new(&p);
        // The dispatch order behind the makespan-7 active schedule.
        s.push_back_operation(&p, 2); // m1: [0, 2)
        s.push_back_operation(&p, 0); // m0: [0, 3)
        s.push_back_operation(&p, 1); // m1: [3, 5), held up by job predecessor
        s.push_back_operation(&p, 3); // m0: [3, 7)
        assert!(s.is_complete(&p));
        assert_eq!(s.makespan(&p), 7);
        assert_eq!(s.start_time(&p, 1), Some(3));
        assert_eq!(s.completion_time(&p, 3), Some(7));
    }

    #[test]
    fn test_from_machine_orders() {
        let p = two_job_problem();
        let s = Schedule::from_machine_orders(&p, vec![vec![0, 3], vec![2, 1]]);
        assert!(s.is_complete(&p));
        assert_eq!(s.start_time(&p, 3), Some(0));
        assert_eq!(s.slot_of(3), Some(1));
        assert_eq!(s.machine_sequence(1).len(), 2);
    }

    #[test]
    fn test_schedule_serde_shape() {
        let p = two_job_problem();
        let mut s = Schedule::new(&p);
        s.push_back_operation(&p, 0);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["machine_sequences"][0][0]["operation"], 0);
        assert_eq!(json["machine_sequences"][0][0]["start"], 0);
    }
}

//! Critical-path start-time recomputation.
//!
//! Given a schedule whose per-machine orderings are fixed, [`retime`]
//! recomputes every start time as the length of the longest precedence
//! chain ending at the operation — the earliest schedule consistent with
//! both job precedence and the committed machine orderings. The pass does
//! not care how the orderings were produced, so it also times schedules
//! built by [`Schedule::from_machine_orders`] from raw permutations.
//!
//! # Algorithm
//!
//! Longest path on a DAG. Edges: consecutive operations within each job,
//! and consecutive entries within each machine sequence. The graph is
//! acyclic for any legal schedule — job edges strictly increase position,
//! machine edges strictly increase slot. Nodes are processed with a FIFO
//! worklist over in-degree-zero operations, relaxing each successor to
//! `max(current, start + duration)`.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 24.2
//! (single-source paths in DAGs)

use std::collections::VecDeque;

use crate::models::{Problem, Schedule};

/// Recomputes all start times from the schedule's fixed orderings.
///
/// Precondition: every operation of the instance is committed (the
/// orderings are complete). The resulting start times are pointwise
/// minimal for the given orderings; applying `retime` again is a no-op.
pub fn retime(problem: &Problem, schedule: &mut Schedule) {
    let n = problem.operation_count();
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut in_degree = vec![0usize; n];

    // Job precedence edges.
    for job in 0..problem.job_count() {
        for pair in problem.job_sequence(job).windows(2) {
            successors[pair[0]].push(pair[1]);
            in_degree[pair[1]] += 1;
        }
    }

    // Machine order edges.
    for machine in 0..problem.machine_count() {
        let sequence = schedule.machine_sequence(machine);
        for slot in 1..sequence.len() {
            let cur = sequence[slot - 1].operation;
            let next = sequence[slot].operation;
            successors[cur].push(next);
            in_degree[next] += 1;
        }
    }

    schedule.reset_starts();

    let mut worklist: VecDeque<usize> = (0..n).filter(|&op| in_degree[op] == 0).collect();

    while let Some(operation) = worklist.pop_front() {
        let finish = schedule
            .start_time(problem, operation)
            .expect("re-timing requires a complete schedule")
            + problem.operation(operation).duration;

        for &next in &successors[operation] {
            schedule.relax_start(problem, next, finish);
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                worklist.push_back(next);
            }
        }
    }
}

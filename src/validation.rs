//! Instance validation and schedule verification.
//!
//! Two concerns, same error shape:
//!
//! - [`validate_problem`] checks the structural integrity an external
//!   loader must deliver: dense contiguous operation ids, machine ids in
//!   range, positive durations, a bijective (job, position) mapping.
//! - [`verify_schedule`] checks a constructed schedule: every operation
//!   committed exactly once on its own machine, reverse index consistent,
//!   job precedence and machine exclusivity respected. A failure here
//!   indicates a defect in the generator/schedule contract, not malformed
//!   input, and callers should treat it as fatal.

use crate::models::{Problem, Schedule};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Instance has no jobs or no machines.
    EmptyInstance,
    /// A job has no operations.
    EmptyJob,
    /// A job sequence references an operation id more than once.
    DuplicateReference,
    /// A job sequence references an out-of-range operation id.
    InvalidReference,
    /// An operation's recorded (job, position) disagrees with the job
    /// table, or the table's size disagrees with the operation list.
    SequenceMismatch,
    /// An operation's machine id is outside `[0, machine_count)`.
    MachineOutOfRange,
    /// An operation has zero duration.
    ZeroDuration,
    /// An operation never committed to any machine sequence.
    UnscheduledOperation,
    /// An operation committed more than once.
    DuplicateOperation,
    /// An operation committed to a machine other than its own.
    WrongMachine,
    /// The reverse index disagrees with the machine sequences.
    IndexMismatch,
    /// A job's operations are not timed in precedence order.
    PrecedenceViolation,
    /// Consecutive entries on a machine overlap in time.
    MachineOverlap,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the structural integrity of an instance.
///
/// Checks:
/// 1. Positive job and machine counts
/// 2. Every job has at least one operation
/// 3. Job sequences reference valid operation ids, each exactly once
/// 4. Every operation's recorded (job, position) matches its place
/// 5. Machine ids are in range, durations are positive
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_problem(problem: &Problem) -> ValidationResult {
    let mut errors = Vec::new();
    let n = problem.operation_count();

    if problem.job_count() == 0 || problem.machine_count() == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyInstance,
            format!(
                "instance has {} jobs and {} machines",
                problem.job_count(),
                problem.machine_count()
            ),
        ));
    }

    let referenced: usize = (0..problem.job_count()).map(|j| problem.job_len(j)).sum();
    if referenced != n {
        errors.push(ValidationError::new(
            ValidationErrorKind::SequenceMismatch,
            format!("job sequences reference {referenced} operations, instance defines {n}"),
        ));
    }

    let mut seen = vec![false; n];
    for job in 0..problem.job_count() {
        if problem.job_len(job) == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyJob,
                format!("job {job} has no operations"),
            ));
        }
        for (position, &id) in problem.job_sequence(job).iter().enumerate() {
            if id >= n {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidReference,
                    format!("job {job} references unknown operation {id}"),
                ));
                continue;
            }
            if seen[id] {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateReference,
                    format!("operation {id} is referenced more than once"),
                ));
                continue;
            }
            seen[id] = true;
            let op = problem.operation(id);
            if op.id != id || op.job != job || op.position != position {
                errors.push(ValidationError::new(
                    ValidationErrorKind::SequenceMismatch,
                    format!(
                        "operation {id} records (job {}, position {}) but sits at (job {job}, position {position})",
                        op.job, op.position
                    ),
                ));
            }
        }
    }

    for op in problem.operations() {
        if op.machine >= problem.machine_count() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MachineOutOfRange,
                format!(
                    "operation {} uses machine {} of {}",
                    op.id,
                    op.machine,
                    problem.machine_count()
                ),
            ));
        }
        if op.duration == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroDuration,
                format!("operation {} has zero duration", op.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Verifies a constructed schedule against its instance.
///
/// Checks:
/// 1. Coverage: every operation id in `[0, operation_count)` appears in
///    exactly one machine sequence exactly once
/// 2. Every entry sits on its operation's own machine
/// 3. The reverse index agrees with the sequences
/// 4. Job precedence: consecutive operations of a job satisfy
///    `start[k] + duration[k] <= start[k+1]`
/// 5. Machine exclusivity: consecutive entries on a machine satisfy
///    `start[i] + duration[i] <= start[i+1]`
///
/// Timing checks are only applied between committed operations, so the
/// coverage errors of a partial schedule are reported without cascading.
pub fn verify_schedule(problem: &Problem, schedule: &Schedule) -> ValidationResult {
    let mut errors = Vec::new();
    let n = problem.operation_count();

    let mut occurrences = vec![0usize; n];
    for machine in 0..problem.machine_count() {
        for (slot, entry) in schedule.machine_sequence(machine).iter().enumerate() {
            if entry.operation >= n {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidReference,
                    format!(
                        "machine {machine} references unknown operation {}",
                        entry.operation
                    ),
                ));
                continue;
            }
            occurrences[entry.operation] += 1;
            let op = problem.operation(entry.operation);
            if op.machine != machine {
                errors.push(ValidationError::new(
                    ValidationErrorKind::WrongMachine,
                    format!(
                        "operation {} committed to machine {machine}, requires machine {}",
                        op.id, op.machine
                    ),
                ));
            } else if schedule.slot_of(entry.operation) != Some(slot) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::IndexMismatch,
                    format!(
                        "operation {} sits at slot {slot} but the reverse index says {:?}",
                        entry.operation,
                        schedule.slot_of(entry.operation)
                    ),
                ));
            }
        }
    }

    for (id, &count) in occurrences.iter().enumerate() {
        match count {
            0 => errors.push(ValidationError::new(
                ValidationErrorKind::UnscheduledOperation,
                format!("operation {id} was never scheduled"),
            )),
            1 => {}
            _ => errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateOperation,
                format!("operation {id} scheduled {count} times"),
            )),
        }
    }

    // Job precedence.
    for job in 0..problem.job_count() {
        for pair in problem.job_sequence(job).windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            if let (Some(prev_end), Some(next_start)) = (
                schedule.completion_time(problem, prev),
                schedule.start_time(problem, next),
            ) {
                if prev_end > next_start {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::PrecedenceViolation,
                        format!(
                            "job {job}: operation {next} starts at {next_start} before operation {prev} completes at {prev_end}"
                        ),
                    ));
                }
            }
        }
    }

    // Machine exclusivity.
    for machine in 0..problem.machine_count() {
        let sequence = schedule.machine_sequence(machine);
        for slot in 1..sequence.len() {
            let prev = &sequence[slot - 1];
            let next = &sequence[slot];
            let prev_end = prev.start + problem.operation(prev.operation).duration;
            if prev_end > next.start {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MachineOverlap,
                    format!(
                        "machine {machine}: operation {} starts at {} before operation {} completes at {prev_end}",
                        next.operation, next.start, prev.operation
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{retime, ActiveScheduleGenerator};
    use serde_json::json;

    fn two_job_problem() -> Problem {
        // Job 0: (m0, 3), (m1, 2); Job 1: (m1, 2), (m0, 4)
        Problem::new(2, vec![vec![(0, 3), (1, 2)], vec![(1, 2), (0, 4)]])
    }

    fn operation_json(id: usize, job: usize, position: usize, machine: usize, duration: u64) -> serde_json::Value {
        json!({"id": id, "job": job, "position": position, "machine": machine, "duration": duration})
    }

    #[test]
    fn test_valid_problem() {
        assert!(validate_problem(&two_job_problem()).is_ok());
    }

    #[test]
    fn test_generated_problem_is_valid() {
        let p = Problem::new(3, vec![vec![(2, 1), (0, 2)], vec![(1, 3)], vec![(0, 1), (1, 1), (2, 1)]]);
        assert!(validate_problem(&p).is_ok());
    }

    #[test]
    fn test_empty_instance() {
        let p = Problem::new(0, vec![]);
        let errors = validate_problem(&p).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyInstance));
    }

    #[test]
    fn test_empty_job() {
        let p = Problem::new(2, vec![vec![(0, 1)], vec![]]);
        let errors = validate_problem(&p).unwrap_err();
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::EmptyJob));
    }

    #[test]
    fn test_zero_duration() {
        let p = Problem::new(2, vec![vec![(0, 1), (1, 0)]]);
        let errors = validate_problem(&p).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::ZeroDuration));
    }

    #[test]
    fn test_machine_out_of_range() {
        let p = Problem::new(1, vec![vec![(1, 5)]]);
        let errors = validate_problem(&p).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MachineOutOfRange));
    }

    #[test]
    fn test_duplicate_reference() {
        // Hand-built broken instance: job 0 lists operation 0 twice.
        let p: Problem = serde_json::from_value(json!({
            "machine_count": 1,
            "job_sequences": [[0, 0]],
            "operations": [operation_json(0, 0, 0, 0, 1), operation_json(1, 0, 1, 0, 1)]
        }))
        .unwrap();
        let errors = validate_problem(&p).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateReference));
    }

    #[test]
    fn test_invalid_reference() {
        let p: Problem = serde_json::from_value(json!({
            "machine_count": 1,
            "job_sequences": [[0, 7]],
            "operations": [operation_json(0, 0, 0, 0, 1), operation_json(1, 0, 1, 0, 1)]
        }))
        .unwrap();
        let errors = validate_problem(&p).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidReference));
    }

    #[test]
    fn test_sequence_mismatch() {
        // Operation 1 claims position 0 while sitting at position 1.
        let p: Problem = serde_json::from_value(json!({
            "machine_count": 1,
            "job_sequences": [[0, 1]],
            "operations": [operation_json(0, 0, 0, 0, 1), operation_json(1, 0, 0, 0, 1)]
        }))
        .unwrap();
        let errors = validate_problem(&p).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::SequenceMismatch));
    }

    #[test]
    fn test_verify_generated_schedule() {
        let p = two_job_problem();
        let mut generator = ActiveScheduleGenerator::with_seed(1);
        let s = generator.generate(&p);
        assert!(verify_schedule(&p, &s).is_ok());
    }

    #[test]
    fn test_unscheduled_operation() {
        let p = two_job_problem();
        let mut s = Schedule::new(&p);
        s.push_back_operation(&p, 0);
        let errors = verify_schedule(&p, &s).unwrap_err();
        let unscheduled = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::UnscheduledOperation)
            .count();
        assert_eq!(unscheduled, 3);
    }

    #[test]
    fn test_duplicate_operation() {
        let p = two_job_problem();
        let mut s = Schedule::from_machine_orders(&p, vec![vec![0, 3, 0], vec![2, 1]]);
        retime(&p, &mut s);
        let errors = verify_schedule(&p, &s).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateOperation));
    }

    #[test]
    fn test_wrong_machine() {
        // Operation 2 needs machine 1 but is placed on machine 0.
        let p = two_job_problem();
        let s = Schedule::from_machine_orders(&p, vec![vec![0, 2, 3], vec![1]]);
        let errors = verify_schedule(&p, &s).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::WrongMachine));
    }

    #[test]
    fn test_untimed_orders_violate_timing() {
        // from_machine_orders leaves every start at 0; precedence and
        // exclusivity only hold after re-timing.
        let p = two_job_problem();
        let s = Schedule::from_machine_orders(&p, vec![vec![0, 3], vec![2, 1]]);
        let errors = verify_schedule(&p, &s).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::PrecedenceViolation));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MachineOverlap));

        let mut timed = s;
        retime(&p, &mut timed);
        assert!(verify_schedule(&p, &timed).is_ok());
    }

    #[test]
    fn test_index_mismatch() {
        // Hand-built schedule whose reverse index points at the wrong slot.
        let p = Problem::new(1, vec![vec![(0, 2)], vec![(0, 3)]]);
        let s: Schedule = serde_json::from_value(json!({
            "machine_sequences": [[
                {"operation": 0, "start": 0},
                {"operation": 1, "start": 2}
            ]],
            "slot_in_machine": [1, 0]
        }))
        .unwrap();
        let errors = verify_schedule(&p, &s).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::IndexMismatch));
    }
}

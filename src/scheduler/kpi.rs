//! Schedule quality metrics (KPIs).
//!
//! Computes standard performance indicators from a completed schedule.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan (C_max) | Latest completion time |
//! | Avg Utilization | Mean machine busyness over the makespan |
//! | Avg Flow Time | Mean job completion time (release = 0) |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use crate::models::{Problem, Schedule};

/// Schedule performance indicators.
#[derive(Debug, Clone)]
pub struct ScheduleKpi {
    /// Makespan: latest completion time.
    pub makespan: u64,
    /// Per-machine utilization (busy time / makespan), indexed by machine.
    pub utilization_by_machine: Vec<f64>,
    /// Average machine utilization (0.0..1.0).
    pub avg_utilization: f64,
    /// Average flow time: mean job completion time. In the classical
    /// job-shop model every job is released at t=0.
    pub avg_flow_time: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule and its instance.
    ///
    /// Jobs without any committed operation are excluded from the flow
    /// time average; a machine with no committed work has utilization 0.
    pub fn calculate(problem: &Problem, schedule: &Schedule) -> Self {
        let makespan = schedule.makespan(problem);

        let utilization_by_machine: Vec<f64> = (0..problem.machine_count())
            .map(|machine| {
                if makespan == 0 {
                    return 0.0;
                }
                let busy: u64 = schedule
                    .machine_sequence(machine)
                    .iter()
                    .map(|entry| problem.operation(entry.operation).duration)
                    .sum();
                busy as f64 / makespan as f64
            })
            .collect();

        let avg_utilization = if utilization_by_machine.is_empty() {
            0.0
        } else {
            utilization_by_machine.iter().sum::<f64>() / utilization_by_machine.len() as f64
        };

        let mut total_flow_time = 0.0;
        let mut counted_jobs = 0usize;
        for job in 0..problem.job_count() {
            let completion = problem
                .job_sequence(job)
                .iter()
                .filter_map(|&op| schedule.completion_time(problem, op))
                .max();
            if let Some(completion) = completion {
                total_flow_time += completion as f64;
                counted_jobs += 1;
            }
        }
        let avg_flow_time = if counted_jobs == 0 {
            0.0
        } else {
            total_flow_time / counted_jobs as f64
        };

        Self {
            makespan,
            utilization_by_machine,
            avg_utilization,
            avg_flow_time,
        }
    }
}

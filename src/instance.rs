//! Taillard benchmark instance parsing.
//!
//! Parses the standard Taillard job-shop format: a header line, a line of
//! `jobs machines time_seed machine_seed upper_bound lower_bound`, a
//! `Times` section with one row of processing durations per job, and a
//! `Machines` section listing each operation's machine. Machine ids are
//! 1-based in the files and converted to 0-based ids in
//! `[0, machine_count)` here; nothing downstream ever sees a reserved
//! machine slot.
//!
//! Parsing is structural: semantic checks (positive durations, the
//! (job, position) bijection) belong to
//! [`crate::validation::validate_problem`], which together with
//! [`parse_instance`] forms the loader pipeline. The scheduling core
//! assumes a validated [`Problem`].
//!
//! # Reference
//! Taillard (1993), "Benchmarks for basic scheduling problems"

use std::fmt;

use crate::models::Problem;

/// A parse error.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// Error category.
    pub kind: ParseErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input ended before a required line or section.
    UnexpectedEof,
    /// A section marker (`Times`, `Machines`) is missing or misplaced.
    MissingSection,
    /// A token could not be parsed as a number.
    InvalidNumber,
    /// A machine id is outside `[1, machine_count]` (file numbering).
    MachineOutOfRange,
    /// The `Machines` section's token count disagrees with the `Times`
    /// rows.
    ShapeMismatch,
}

impl ParseError {
    fn new(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Parses a Taillard-format instance.
pub fn parse_instance(input: &str) -> Result<Problem, ParseError> {
    let mut lines = input.lines();

    // Header line (column names), then the counts line.
    lines.next().ok_or_else(|| {
        ParseError::new(ParseErrorKind::UnexpectedEof, "empty input, expected header line")
    })?;
    let counts = next_content_line(&mut lines).ok_or_else(|| {
        ParseError::new(ParseErrorKind::UnexpectedEof, "missing job/machine counts line")
    })?;
    let mut tokens = counts.split_whitespace();
    let job_count: usize = parse_token(tokens.next(), "job count")?;
    let machine_count: usize = parse_token(tokens.next(), "machine count")?;
    // Time seed, machine seed, and bounds are reproduction metadata.

    expect_marker(&mut lines, "Times")?;
    let mut duration_rows: Vec<Vec<u64>> = Vec::with_capacity(job_count);
    for job in 0..job_count {
        let line = next_content_line(&mut lines).ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::UnexpectedEof,
                format!("missing duration row for job {job}"),
            )
        })?;
        let row = line
            .split_whitespace()
            .map(|token| parse_token(Some(token), "duration"))
            .collect::<Result<Vec<u64>, _>>()?;
        duration_rows.push(row);
    }

    expect_marker(&mut lines, "Machines")?;
    let machine_ids = lines
        .flat_map(str::split_whitespace)
        .map(|token| parse_token(Some(token), "machine id"))
        .collect::<Result<Vec<usize>, _>>()?;

    let operation_count: usize = duration_rows.iter().map(Vec::len).sum();
    if machine_ids.len() != operation_count {
        return Err(ParseError::new(
            ParseErrorKind::ShapeMismatch,
            format!(
                "Times rows define {operation_count} operations but Machines lists {}",
                machine_ids.len()
            ),
        ));
    }

    // Pair rows with the flat machine list, converting to 0-based ids.
    let mut machine_ids = machine_ids.into_iter();
    let mut jobs = Vec::with_capacity(job_count);
    for row in duration_rows {
        let mut operations = Vec::with_capacity(row.len());
        for duration in row {
            let file_id = machine_ids
                .next()
                .expect("machine list length matches operation count");
            if file_id == 0 || file_id > machine_count {
                return Err(ParseError::new(
                    ParseErrorKind::MachineOutOfRange,
                    format!("machine id {file_id} outside 1..={machine_count}"),
                ));
            }
            operations.push((file_id - 1, duration));
        }
        jobs.push(operations);
    }

    Ok(Problem::new(machine_count, jobs))
}

fn next_content_line<'a>(lines: &mut impl Iterator<Item = &'a str>) -> Option<&'a str> {
    lines.find(|line| !line.trim().is_empty())
}

fn expect_marker<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
    marker: &str,
) -> Result<(), ParseError> {
    match next_content_line(lines) {
        Some(line) if line.trim().eq_ignore_ascii_case(marker) => Ok(()),
        Some(line) => Err(ParseError::new(
            ParseErrorKind::MissingSection,
            format!("expected '{marker}' section, found '{}'", line.trim()),
        )),
        None => Err(ParseError::new(
            ParseErrorKind::UnexpectedEof,
            format!("input ended before '{marker}' section"),
        )),
    }
}

fn parse_token<T: std::str::FromStr>(
    token: Option<&str>,
    what: &str,
) -> Result<T, ParseError> {
    let token = token.ok_or_else(|| {
        ParseError::new(ParseErrorKind::UnexpectedEof, format!("missing {what}"))
    })?;
    token.parse().map_err(|_| {
        ParseError::new(
            ParseErrorKind::InvalidNumber,
            format!("invalid {what}: '{token}'"),
        )
    })
}

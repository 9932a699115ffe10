#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Reading and writing the DIMACS CNF format.
//!
//! Input: comment lines start with `c`, the problem line with `p`; both are
//! skipped (variable and clause counts are derived from the clauses
//! actually found). Every other line is a clause of space-separated signed
//! integers terminated by `0`. A `%` line ends the data, as in competition
//! files.
//!
//! Besides the formula, parsing captures the variable universe: every
//! variable seen, in first-appearance order. The solver needs it to
//! totalize its answer, since simplification may eliminate a variable from
//! every remaining clause before its value is committed.
//!
//! Output follows the solution-line conventions: `s SATISFIABLE` or
//! `s UNSATISFIABLE`, a `v ... 0` model line when satisfiable, and `c`
//! comment lines for diagnostics.

use crate::sat::assignment::Assignment;
use crate::sat::clause::{Clause, ClauseId};
use crate::sat::formula::Formula;
use crate::sat::literal::{Literal, Variable};
use itertools::Itertools;
use rustc_hash::FxHashSet;
use std::io::{self, BufRead, Write};

/// Parses DIMACS data from any `BufRead` source.
///
/// Returns the variable universe in first-appearance order together with
/// the formula. Clause ids are assigned sequentially as clauses are read.
/// A bare `0` line is kept as an empty clause, which makes the formula
/// unsatisfiable.
///
/// # Panics
///
/// On I/O failure while reading lines, or when a clause token does not
/// parse as an `i32` (a malformed file).
pub fn parse_dimacs<R: BufRead, L: Literal>(reader: R) -> (Vec<Variable>, Formula<L>) {
    let lines = reader
        .lines()
        .map(|line| line.unwrap_or_else(|e| panic!("Failed to read line: {e}")));

    let mut variables = Vec::new();
    let mut seen = FxHashSet::default();
    let mut clauses = Vec::new();
    let mut next_id: ClauseId = 0;

    for line in lines {
        let mut parts = line.split_whitespace().peekable();

        match parts.peek() {
            Some(&"%") => break,
            None | Some(&"c" | &"p") => {}
            Some(_) => {
                let literals: Vec<i32> = parts
                    .map(|token| {
                        token.parse::<i32>().unwrap_or_else(|e| {
                            panic!("Failed to parse literal '{token}' as i32: {e}")
                        })
                    })
                    .filter(|&value| value != 0)
                    .collect_vec();

                for &value in &literals {
                    let var = value.unsigned_abs();
                    if seen.insert(var) {
                        variables.push(var);
                    }
                }

                clauses.push(Clause::from_dimacs(next_id, &literals));
                next_id += 1;
            }
        }
    }

    (variables, Formula::new(clauses))
}

/// Parses a DIMACS CNF file from a path.
///
/// # Errors
///
/// Returns `Err` when the file cannot be opened. Malformed content panics,
/// as in [`parse_dimacs`].
pub fn parse_file<L: Literal>(path: &str) -> io::Result<(Vec<Variable>, Formula<L>)> {
    let file = std::fs::File::open(path)?;
    let reader = io::BufReader::new(file);
    Ok(parse_dimacs(reader))
}

/// Writes the solution lines for `assignment`: the `s` status line, and a
/// `v` model line (variables in ascending order) when satisfiable.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_solution<W: Write>(out: &mut W, assignment: Option<&Assignment>) -> io::Result<()> {
    match assignment {
        None => writeln!(out, "s UNSATISFIABLE"),
        Some(assignment) => {
            writeln!(out, "s SATISFIABLE")?;

            let model = assignment
                .iter()
                .sorted_by_key(|&(var, _)| var)
                .map(|(var, value)| {
                    if value {
                        format!("{var}")
                    } else {
                        format!("-{var}")
                    }
                })
                .join(" ");
            writeln!(out, "v {model} 0")
        }
    }
}

/// Prints `text` as a DIMACS `c` comment line on standard output.
pub fn comment(text: &str) {
    println!("c {text}");
}

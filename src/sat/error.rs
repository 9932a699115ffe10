#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Error types used in the library.
//!
//! Both variants are contract violations rather than expected runtime
//! conditions. Unsatisfiability is never an error: it is reported as the
//! absence of an assignment.

use crate::sat::literal::Variable;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverError {
    /// A clause was evaluated against an assignment that does not cover one
    /// of its variables. Raised by evaluation (used for verification); the
    /// solver never evaluates against a partial assignment internally.
    MissingAssignment(Variable),

    /// The branching-variable picker was invoked although every variable in
    /// the formula already has a value. Unreachable given the termination
    /// checks in the search; indicates a logic defect if it fires.
    NoUnassignedVariable,
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAssignment(var) => {
                write!(f, "no assignment for clause literal {var}")
            }
            Self::NoUnassignedVariable => {
                write!(f, "could not find an unassigned variable in the formula")
            }
        }
    }
}

impl Error for SolverError {}

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The solver interface.

use crate::sat::assignment::Assignment;
use crate::sat::formula::Formula;
use crate::sat::literal::{Literal, Variable};

/// A complete satisfiability decision procedure.
pub trait Solver<L: Literal> {
    /// Creates a solver for `formula`. `variables` is the variable universe
    /// captured at parse time; it does not shrink as the formula is
    /// simplified, and every returned assignment covers all of it.
    fn new(formula: Formula<L>, variables: Vec<Variable>) -> Self;

    /// Decides satisfiability. Returns a total satisfying assignment, or
    /// `None` when the formula is unsatisfiable.
    fn solve(&mut self) -> Option<Assignment>;

    /// Counters describing the search that `solve` performed.
    fn stats(&self) -> SolutionStats;
}

/// Counters collected during a solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolutionStats {
    /// Branching decisions made.
    pub decisions: usize,
    /// Values fixed by unit elimination.
    pub propagations: usize,
    /// Values fixed by pure-literal elimination.
    pub pure_literals: usize,
    /// Deepest point of the search stack.
    pub max_depth: usize,
}

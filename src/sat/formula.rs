#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! CNF formulas and the pure transforms over them.
//!
//! A formula is an ordered collection of clauses. Every transform returns a
//! new formula rather than mutating shared clauses, so each search branch
//! can hold its own snapshot and retry the opposite polarity against the
//! pre-branch state without any bookkeeping.

use crate::sat::assignment::Assignment;
use crate::sat::clause::{Clause, ClauseId};
use crate::sat::error::SolverError;
use crate::sat::literal::{Literal, PackedLiteral, Variable};
use itertools::Itertools;
use rustc_hash::FxHashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Formula<L: Literal = PackedLiteral> {
    pub clauses: Vec<Clause<L>>,
}

impl<L: Literal> Formula<L> {
    #[must_use]
    pub const fn new(clauses: Vec<Clause<L>>) -> Self {
        Self { clauses }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// An empty formula is vacuously satisfied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Whether any clause has run out of literals. An empty clause is
    /// always false, so the whole formula is unsatisfiable.
    #[must_use]
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause<L>> {
        self.clauses.iter()
    }

    /// The clauses with exactly one literal, in formula order.
    pub fn unit_clauses(&self) -> impl Iterator<Item = &Clause<L>> {
        self.clauses.iter().filter(|clause| clause.is_unit())
    }

    /// Every variable appearing in the formula, in first-appearance order.
    #[must_use]
    pub fn variables(&self) -> Vec<Variable> {
        let mut seen = FxHashSet::default();
        self.clauses
            .iter()
            .flat_map(Clause::iter)
            .map(|lit| lit.variable())
            .filter(|&var| seen.insert(var))
            .collect()
    }

    /// Removes `lit` from every clause. Clauses are never dropped here, only
    /// shrunk (possibly to empty): a clause that can no longer be satisfied
    /// *through* `lit` may still be satisfied by its other literals.
    #[must_use]
    pub fn purge_literal(&self, lit: L) -> Self {
        Self::new(
            self.clauses
                .iter()
                .map(|clause| clause.without(lit))
                .collect(),
        )
    }

    /// Drops every clause containing `lit`. Used when `lit` is known true:
    /// any clause containing it is already satisfied.
    #[must_use]
    pub fn purge_clauses_with(&self, lit: L) -> Self {
        Self::new(
            self.clauses
                .iter()
                .filter(|clause| !clause.contains(lit))
                .cloned()
                .collect(),
        )
    }

    /// Drops only the *non-unit* clauses containing `lit`. Unit elimination
    /// uses this instead of [`Self::purge_clauses_with`] so that repeated or
    /// contradictory unit clauses over the same variable stay visible to
    /// the rest of the sweep.
    #[must_use]
    pub fn purge_non_unit_clauses_with(&self, lit: L) -> Self {
        Self::new(
            self.clauses
                .iter()
                .filter(|clause| clause.is_unit() || !clause.contains(lit))
                .cloned()
                .collect(),
        )
    }

    /// Commits `lit = true`: drops the clauses it satisfies, then strikes
    /// its negation from the survivors. This is the simplification applied
    /// when branching; the elimination passes have their own variants.
    #[must_use]
    pub fn propagate_literal(&self, lit: L) -> Self {
        self.purge_clauses_with(lit).purge_literal(lit.negated())
    }

    /// Evaluates every clause under `assignment`: true iff all are
    /// satisfied. Used to re-check a produced model against the original,
    /// unsimplified formula.
    ///
    /// # Errors
    ///
    /// `MissingAssignment` if `assignment` does not cover some variable of
    /// the formula.
    pub fn verify(&self, assignment: &Assignment) -> Result<bool, SolverError> {
        for clause in &self.clauses {
            if !clause.eval(assignment)? {
                return Ok(false);
            }
        }

        Ok(true)
    }
}

impl<L: Literal> From<Vec<Vec<i32>>> for Formula<L> {
    /// Builds a formula from DIMACS-encoded clauses, assigning sequential
    /// clause ids.
    #[allow(clippy::cast_possible_truncation)]
    fn from(clauses: Vec<Vec<i32>>) -> Self {
        Self::new(
            clauses
                .into_iter()
                .enumerate()
                .map(|(id, lits)| Clause::from_dimacs(id as ClauseId, &lits))
                .collect(),
        )
    }
}

impl<L: Literal> fmt::Display for Formula<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.clauses.iter().join("\n"))
    }
}

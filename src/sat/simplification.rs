#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The two polynomial-time simplification passes applied at every search
//! node: unit elimination and pure-literal elimination.
//!
//! Each pass takes a formula and returns a simplified formula together with
//! the variable values it fixed. Neither pass iterates to a fixpoint on its
//! own; the search re-invokes both once per node, which is where repeated
//! convergence comes from.

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::formula::Formula;
use crate::sat::literal::{Literal, Variable};

/// A simplification pass over a formula.
pub trait Simplification<L: Literal> {
    /// Simplifies `formula`, returning the new formula and the values the
    /// pass committed to.
    fn simplify(&self, formula: &Formula<L>) -> (Formula<L>, Assignment);
}

/// For every unit clause, fixes its literal's value, drops the non-unit
/// clauses that literal satisfies, and strikes its negation from all
/// surviving clauses.
///
/// The sweep runs over the unit clauses present at call time, each processed
/// against the progressively updated formula. Striking a negation may empty
/// another unit clause, which is how a direct contradiction between two unit
/// clauses surfaces; the recorded value for such a variable is the last unit
/// seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitElimination;

impl<L: Literal> Simplification<L> for UnitElimination {
    fn simplify(&self, formula: &Formula<L>) -> (Formula<L>, Assignment) {
        let units: Vec<L> = formula
            .unit_clauses()
            .filter_map(Clause::unit_literal)
            .collect();

        let mut fixed = Assignment::new();
        let mut working = formula.clone();

        for lit in units {
            log::trace!("unit literal {} fixed", lit.to_dimacs());

            working = working
                .purge_non_unit_clauses_with(lit)
                .purge_literal(lit.negated());

            fixed.set(lit.variable(), lit.polarity());
        }

        (working, fixed)
    }
}

/// Determines whether `var` occurs with a single polarity across the whole
/// formula. Returns that polarity, or `None` when the variable is absent or
/// occurs both ways anywhere. Purity is global, not per-clause.
#[must_use]
pub fn variable_purity<L: Literal>(var: Variable, formula: &Formula<L>) -> Option<bool> {
    let mut polarity = None;

    for clause in formula.iter() {
        for lit in clause.iter() {
            if lit.variable() != var {
                continue;
            }
            match polarity {
                None => polarity = Some(lit.polarity()),
                Some(seen) if seen != lit.polarity() => return None,
                Some(_) => {}
            }
        }
    }

    polarity
}

/// For every variable occurring with a single polarity, fixes it to that
/// polarity and drops all clauses it satisfies.
///
/// Purity is computed once against the pre-pass formula: purging only ever
/// removes clauses, and purity cannot change when clauses are removed. A
/// variable left with no clause by an earlier purge is still reported if it
/// was pure going in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PureLiteralElimination;

impl<L: Literal> Simplification<L> for PureLiteralElimination {
    fn simplify(&self, formula: &Formula<L>) -> (Formula<L>, Assignment) {
        let mut fixed = Assignment::new();
        let mut working = formula.clone();

        for var in formula.variables() {
            if let Some(polarity) = variable_purity(var, formula) {
                log::trace!("pure variable {var} fixed to {polarity}");

                working = working.purge_clauses_with(L::new(var, polarity));
                fixed.set(var, polarity);
            }
        }

        (working, fixed)
    }
}

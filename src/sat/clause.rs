#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Clauses: identified, ordered disjunctions of literals.
//!
//! A clause's id is assigned once at construction (sequentially, at parse
//! time) and is an opaque key for "the same physical clause". Comparisons of
//! clause *contents* always go literal by literal: derived equality compares
//! both the id and the literal sequence, and the formula transforms match on
//! literal values only. Literals are kept exactly as given; duplicates and
//! opposite polarities of one variable are representable and no
//! canonicalization is performed.

use crate::sat::assignment::Assignment;
use crate::sat::error::SolverError;
use crate::sat::literal::{Literal, PackedLiteral};
use core::ops::Index;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt;

/// Identifies a clause within the formula it was constructed for.
pub type ClauseId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Clause<L: Literal = PackedLiteral> {
    pub id: ClauseId,
    pub literals: SmallVec<[L; 8]>,
}

impl<L: Literal> Clause<L> {
    pub fn new(id: ClauseId, literals: impl IntoIterator<Item = L>) -> Self {
        Self {
            id,
            literals: literals.into_iter().collect(),
        }
    }

    /// Builds a clause from DIMACS signed-integer literals.
    #[must_use]
    pub fn from_dimacs(id: ClauseId, literals: &[i32]) -> Self {
        Self::new(id, literals.iter().map(|&lit| L::from_dimacs(lit)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// An empty clause has no literals left and is always false.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// A unit clause forces the value of its sole literal.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    /// The sole literal of a unit clause, `None` otherwise.
    #[must_use]
    pub fn unit_literal(&self) -> Option<L> {
        if self.is_unit() {
            Some(self.literals[0])
        } else {
            None
        }
    }

    #[must_use]
    pub fn contains(&self, lit: L) -> bool {
        self.literals.contains(&lit)
    }

    pub fn iter(&self) -> impl Iterator<Item = &L> {
        self.literals.iter()
    }

    /// Returns this clause with every value-equal occurrence of `lit`
    /// removed. No error when `lit` is absent. The id is kept: fewer
    /// literals, same clause.
    #[must_use]
    pub fn without(&self, lit: L) -> Self {
        Self {
            id: self.id,
            literals: self
                .literals
                .iter()
                .filter(|&&other| other != lit)
                .copied()
                .collect(),
        }
    }

    /// Evaluates this clause under `assignment`: true iff any literal
    /// evaluates to true.
    ///
    /// # Errors
    ///
    /// `MissingAssignment` if any literal's variable is not covered by
    /// `assignment`. Evaluation is a total-assignment contract; the caller
    /// is violating it.
    pub fn eval(&self, assignment: &Assignment) -> Result<bool, SolverError> {
        let mut result = false;

        for &lit in &self.literals {
            let value = assignment
                .literal_value(lit)
                .ok_or(SolverError::MissingAssignment(lit.variable()))?;
            result = result || value;
        }

        Ok(result)
    }
}

impl<L: Literal> Index<usize> for Clause<L> {
    type Output = L;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl<L: Literal> fmt::Display for Clause<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} 0",
            self.literals.iter().map(|lit| lit.to_dimacs()).join(" ")
        )
    }
}

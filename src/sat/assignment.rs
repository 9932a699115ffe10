#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Partial and total variable assignments.
//!
//! During search the solver works with partial assignments: maps from
//! variable to boolean that may omit variables. The externally meaningful
//! result of solving is a total assignment covering the whole variable
//! universe, produced by [`create_total_assignment`].

use crate::sat::literal::{Literal, Variable};
use rustc_hash::FxHashMap;

/// A mapping from variables to boolean values. Partial unless totalized.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment(FxHashMap<Variable, bool>);

impl Assignment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, var: Variable, value: bool) {
        self.0.insert(var, value);
    }

    #[must_use]
    pub fn get(&self, var: Variable) -> Option<bool> {
        self.0.get(&var).copied()
    }

    #[must_use]
    pub fn contains(&self, var: Variable) -> bool {
        self.0.contains_key(&var)
    }

    /// The value of `lit` under this assignment, or `None` if its variable
    /// is unassigned.
    #[must_use]
    pub fn literal_value<L: Literal>(&self, lit: L) -> Option<bool> {
        let value = self.get(lit.variable())?;
        Some(!(lit.polarity() ^ value))
    }

    /// Layers every entry of `other` over this assignment. Entries already
    /// present are overwritten, matching last-seen-wins bookkeeping.
    pub fn merge(&mut self, other: &Self) {
        self.0.extend(other.0.iter().map(|(&var, &value)| (var, value)));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.0.iter().map(|(&var, &value)| (var, value))
    }
}

impl FromIterator<(Variable, bool)> for Assignment {
    fn from_iter<T: IntoIterator<Item = (Variable, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Extends a partial assignment to a total one over `variables`, defaulting
/// every unassigned variable to `true`. Unconstrained variables are don't
/// cares, so any consistent policy works; defaulting to `true` keeps the
/// output reproducible.
///
/// `None` (UNSAT) passes through unchanged: an absent assignment cannot be
/// totalized.
#[must_use]
pub fn create_total_assignment(
    variables: &[Variable],
    partial: Option<Assignment>,
) -> Option<Assignment> {
    let mut assignment = partial?;

    for &var in variables {
        if !assignment.contains(var) {
            assignment.set(var, true);
        }
    }

    Some(assignment)
}

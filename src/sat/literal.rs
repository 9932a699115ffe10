#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Literal representations.
//!
//! A literal is a variable paired with a polarity: `polarity == true` is the
//! positive occurrence of the variable, `false` its negation. Literals are
//! plain values, equal iff both fields match, and hashable by value.
//!
//! The `Literal` trait abstracts over the in-memory encoding so the rest of
//! the solver can be generic over it. `PackedLiteral` stores both fields in a
//! single `u32`; `StructLiteral` keeps them as separate fields.

use core::ops::{Neg, Not};
use std::fmt::Debug;
use std::hash::Hash;

/// A variable identifier. Variable `0` is never produced by DIMACS input.
pub type Variable = u32;

/// A boolean literal: a variable together with a polarity.
pub trait Literal: Copy + Debug + Eq + Hash + Default {
    /// Creates a literal for `var` with the given `polarity`.
    fn new(var: Variable, polarity: bool) -> Self;

    /// The variable this literal refers to.
    fn variable(self) -> Variable;

    /// `true` for a positive occurrence, `false` for a negated one.
    fn polarity(self) -> bool;

    /// The same variable with the opposite polarity.
    #[must_use]
    fn negated(self) -> Self;

    fn is_negated(self) -> bool {
        !self.polarity()
    }

    fn is_positive(self) -> bool {
        self.polarity()
    }

    /// Builds a literal from the DIMACS signed-integer encoding
    /// (`3` is `x3`, `-3` is `¬x3`).
    #[must_use]
    fn from_dimacs(value: i32) -> Self {
        let polarity = value.is_positive();
        let var = value.unsigned_abs();
        Self::new(var, polarity)
    }

    /// The DIMACS signed-integer encoding of this literal.
    #[allow(clippy::cast_possible_wrap)]
    fn to_dimacs(self) -> i32 {
        let var = self.variable() as i32;
        if self.polarity() { var } else { -var }
    }
}

const POLARITY_BIT: u32 = 1 << 31;

/// A literal packed into a single `u32`: the polarity lives in the top bit,
/// the variable in the remaining 31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PackedLiteral(u32);

impl Literal for PackedLiteral {
    fn new(var: Variable, polarity: bool) -> Self {
        Self(var & !POLARITY_BIT | (u32::from(polarity) << 31))
    }

    fn variable(self) -> Variable {
        self.0 & !POLARITY_BIT
    }

    fn polarity(self) -> bool {
        self.0 & POLARITY_BIT != 0
    }

    fn negated(self) -> Self {
        Self(self.0 ^ POLARITY_BIT)
    }
}

impl Neg for PackedLiteral {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for PackedLiteral {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

/// A literal stored as plain fields. Slower than `PackedLiteral` but easier
/// to read in debug output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct StructLiteral {
    variable: Variable,
    polarity: bool,
}

impl Literal for StructLiteral {
    fn new(var: Variable, polarity: bool) -> Self {
        Self {
            variable: var,
            polarity,
        }
    }

    fn variable(self) -> Variable {
        self.variable
    }

    fn polarity(self) -> bool {
        self.polarity
    }

    fn negated(self) -> Self {
        Self {
            variable: self.variable,
            polarity: !self.polarity,
        }
    }
}

impl Neg for StructLiteral {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for StructLiteral {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

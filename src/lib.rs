//! This crate implements a classical DPLL solver for the Boolean
//! satisfiability problem.

/// The `sat` module holds the clause and formula model, the simplification
/// passes, and the DPLL search engine.
pub mod sat;

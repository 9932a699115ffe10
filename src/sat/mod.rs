#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
pub mod assignment;
pub mod clause;
pub mod dimacs;
pub mod dpll;
pub mod error;
pub mod formula;
pub mod literal;
pub mod simplification;
pub mod solver;

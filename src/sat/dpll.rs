#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The DPLL (Davis-Putnam-Logemann-Loveland) search engine.
//!
//! At every search node the engine applies unit elimination and then
//! pure-literal elimination, merges the values both passes fixed, and checks
//! the two termination conditions: an empty clause means the branch is in
//! conflict, an empty formula means the accumulated values satisfy it.
//! Otherwise it branches on the first unassigned variable in formula order,
//! trying `true` before `false`. Backtracking is strictly chronological.
//!
//! Branching is run on an explicit stack of search frames rather than
//! call-stack recursion, so the search depth is bounded by memory and not by
//! the thread's stack. Each frame owns its formula snapshot; sibling
//! branches never observe each other's simplifications.

use crate::sat::assignment::{Assignment, create_total_assignment};
use crate::sat::clause::Clause;
use crate::sat::error::SolverError;
use crate::sat::formula::Formula;
use crate::sat::literal::{Literal, PackedLiteral, Variable};
use crate::sat::simplification::{PureLiteralElimination, Simplification, UnitElimination};
use crate::sat::solver::{SolutionStats, Solver};

/// Picks the branching variable: the first variable, in formula, clause and
/// literal iteration order, without a value in `values`. Deterministic by
/// construction, not a search heuristic.
///
/// # Errors
///
/// `NoUnassignedVariable` if every variable of `formula` already has a
/// value. Unreachable from the search, which only branches on formulas with
/// clauses left after simplification.
pub fn pick_variable<L: Literal>(
    values: &Assignment,
    formula: &Formula<L>,
) -> Result<Variable, SolverError> {
    formula
        .iter()
        .flat_map(Clause::iter)
        .map(|lit| lit.variable())
        .find(|&var| !values.contains(var))
        .ok_or(SolverError::NoUnassignedVariable)
}

/// Polarities a frame has not tried yet. `true` is always tried first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Branch {
    TryTrue,
    TryFalse,
    Exhausted,
}

/// One node of the search: the simplified formula, the values accumulated
/// on the way to it, and the branching state.
#[derive(Debug, Clone)]
struct Frame<L: Literal> {
    formula: Formula<L>,
    values: Assignment,
    var: Variable,
    branch: Branch,
}

impl<L: Literal> Frame<L> {
    fn next_polarity(&mut self) -> Option<bool> {
        match self.branch {
            Branch::TryTrue => {
                self.branch = Branch::TryFalse;
                Some(true)
            }
            Branch::TryFalse => {
                self.branch = Branch::Exhausted;
                Some(false)
            }
            Branch::Exhausted => None,
        }
    }
}

/// Outcome of simplifying one search node.
enum Node<L: Literal> {
    Conflict,
    Satisfied(Assignment),
    Branching(Frame<L>),
}

/// A classical, non-learning DPLL solver.
#[derive(Debug, Clone)]
pub struct Dpll<L: Literal = PackedLiteral> {
    formula: Formula<L>,
    variables: Vec<Variable>,
    stats: SolutionStats,
}

impl<L: Literal> Solver<L> for Dpll<L> {
    fn new(formula: Formula<L>, variables: Vec<Variable>) -> Self {
        Self {
            formula,
            variables,
            stats: SolutionStats::default(),
        }
    }

    fn solve(&mut self) -> Option<Assignment> {
        log::debug!(
            "solving {} clauses over {} variables",
            self.formula.len(),
            self.variables.len()
        );

        let partial = self.partial_solve();
        create_total_assignment(&self.variables, partial)
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }
}

impl<L: Literal> Dpll<L> {
    /// Creates a solver whose variable universe is exactly the variables of
    /// `formula`.
    #[must_use]
    pub fn from_formula(formula: Formula<L>) -> Self {
        let variables = formula.variables();
        Self::new(formula, variables)
    }

    /// Runs the search and returns a satisfying partial assignment, or
    /// `None` when no branch survives.
    fn partial_solve(&mut self) -> Option<Assignment> {
        let mut stack: Vec<Frame<L>> = Vec::new();
        let mut pending = Some((Assignment::new(), self.formula.clone()));

        loop {
            if let Some((values, formula)) = pending.take() {
                match self.simplify_node(values, &formula) {
                    Node::Satisfied(values) => return Some(values),
                    Node::Conflict => {}
                    Node::Branching(frame) => {
                        stack.push(frame);
                        self.stats.max_depth = self.stats.max_depth.max(stack.len());
                    }
                }
            }

            // Descend into the deepest frame with an untried polarity,
            // popping exhausted frames on the way.
            loop {
                let Some(frame) = stack.last_mut() else {
                    return None;
                };

                if let Some(polarity) = frame.next_polarity() {
                    self.stats.decisions += 1;
                    log::trace!("branching on variable {} = {polarity}", frame.var);

                    let lit = L::new(frame.var, polarity);
                    let mut values = frame.values.clone();
                    values.set(frame.var, polarity);

                    pending = Some((values, frame.formula.propagate_literal(lit)));
                    break;
                }

                log::trace!("backtracking past variable {}", frame.var);
                stack.pop();
            }
        }
    }

    /// Applies both elimination passes to one node and classifies the
    /// result: conflict, satisfied, or in need of a branching decision.
    fn simplify_node(&mut self, values: Assignment, formula: &Formula<L>) -> Node<L> {
        let (formula, unit_values) = UnitElimination.simplify(formula);
        let (formula, pure_values) = PureLiteralElimination.simplify(&formula);

        self.stats.propagations += unit_values.len();
        self.stats.pure_literals += pure_values.len();

        let mut values = values;
        values.merge(&unit_values);
        values.merge(&pure_values);

        if formula.has_empty_clause() {
            log::trace!("conflict: empty clause after simplification");
            return Node::Conflict;
        }

        if formula.is_empty() {
            return Node::Satisfied(values);
        }

        // A formula with clauses but no unassigned variable would be a
        // solver defect; treat it as fatal rather than a recoverable error.
        let var = pick_variable(&values, &formula)
            .unwrap_or_else(|err| panic!("branching failed: {err}"));

        Node::Branching(Frame {
            formula,
            values,
            var,
            branch: Branch::TryTrue,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestFormula = Formula<PackedLiteral>;
    type TestSolver = Dpll<PackedLiteral>;

    #[test]
    fn test_pick_variable_in_formula_order() {
        let formula = TestFormula::from(vec![vec![2, 3], vec![1]]);

        let empty = Assignment::new();
        assert_eq!(pick_variable(&empty, &formula), Ok(2));

        let two_known: Assignment = [(2, true), (3, false)].into_iter().collect();
        assert_eq!(pick_variable(&two_known, &formula), Ok(1));
    }

    #[test]
    fn test_pick_variable_exhausted() {
        let formula = TestFormula::from(vec![vec![1]]);
        let known: Assignment = [(1, true)].into_iter().collect();

        assert_eq!(
            pick_variable(&known, &formula),
            Err(SolverError::NoUnassignedVariable)
        );
    }

    #[test]
    fn test_solve_empty_formula_is_sat() {
        let mut solver = TestSolver::from_formula(TestFormula::default());
        assert_eq!(solver.solve(), Some(Assignment::new()));
    }

    #[test]
    fn test_solve_by_elimination_alone() {
        // (x1) ∧ (x1 ∨ x2): simplification decides everything
        let mut solver = TestSolver::from_formula(TestFormula::from(vec![vec![1], vec![1, 2]]));

        let expected: Assignment = [(1, true), (2, true)].into_iter().collect();
        assert_eq!(solver.solve(), Some(expected));
        assert_eq!(solver.stats().decisions, 0);
    }

    #[test]
    fn test_solve_unit_contradiction_is_unsat() {
        let mut solver = TestSolver::from_formula(TestFormula::from(vec![vec![1], vec![-1]]));
        assert_eq!(solver.solve(), None);
    }

    #[test]
    fn test_solve_requires_branching() {
        // (x1 ∨ x2) ∧ (¬x1 ∨ ¬x2) ∧ (x1 ∨ ¬x2): no unit, nothing pure.
        // Several models exist, so check soundness rather than fixed values.
        let formula = TestFormula::from(vec![vec![1, 2], vec![-1, -2], vec![1, -2]]);
        let mut solver = TestSolver::from_formula(formula.clone());

        let model = solver.solve().expect("formula is satisfiable");
        assert_eq!(formula.verify(&model), Ok(true));
        assert!(solver.stats().decisions > 0);
    }

    #[test]
    fn test_solve_unsat_exhausts_both_polarities() {
        // All four clauses over two variables
        let formula = TestFormula::from(vec![
            vec![1, 2],
            vec![1, -2],
            vec![-1, 2],
            vec![-1, -2],
        ]);
        let mut solver = TestSolver::from_formula(formula);

        assert_eq!(solver.solve(), None);
    }

    #[test]
    fn test_solve_defaults_unconstrained_variables_to_true() {
        // Universe {1, 2} but only x1 is constrained
        let formula = TestFormula::from(vec![vec![1]]);
        let mut solver = TestSolver::new(formula, vec![1, 2]);

        let expected: Assignment = [(1, true), (2, true)].into_iter().collect();
        assert_eq!(solver.solve(), Some(expected));
    }

    #[test]
    fn test_solve_empty_clause_is_unsat() {
        let formula = TestFormula::from(vec![vec![1, 2], vec![]]);
        let mut solver = TestSolver::from_formula(formula);

        assert_eq!(solver.solve(), None);
    }

    #[test]
    fn test_branch_variable_assigned_in_model() {
        // Forces at least one decision and checks the decided variable's
        // value survives into the returned model.
        let formula = TestFormula::from(vec![vec![1, 2], vec![-1, 2], vec![1, -2]]);
        let mut solver = TestSolver::from_formula(formula.clone());

        let model = solver.solve().expect("formula is satisfiable");
        assert!(model.contains(1));
        assert!(model.contains(2));
        assert_eq!(formula.verify(&model), Ok(true));
    }
}

//! End-to-end tests for the DPLL solver: the DIMACS pipeline, soundness of
//! produced models against the original formula, and cross-checking the
//! SAT/UNSAT verdict against brute-force enumeration on small instances.

use dpll_sat::sat::assignment::Assignment;
use dpll_sat::sat::dimacs::{parse_dimacs, write_solution};
use dpll_sat::sat::dpll::Dpll;
use dpll_sat::sat::formula::Formula;
use dpll_sat::sat::literal::{PackedLiteral, Variable};
use dpll_sat::sat::solver::Solver;
use std::io::Cursor;

type TestFormula = Formula<PackedLiteral>;

fn solve(formula: &TestFormula) -> Option<Assignment> {
    Dpll::from_formula(formula.clone()).solve()
}

/// Exhaustively checks whether any total assignment satisfies `formula`.
/// Only usable for small variable counts.
fn brute_force_satisfiable(formula: &TestFormula) -> bool {
    let variables = formula.variables();
    assert!(variables.len() <= 12, "brute force only works on small instances");

    (0..1_u32 << variables.len()).any(|mask| {
        let assignment: Assignment = variables
            .iter()
            .enumerate()
            .map(|(bit, &var)| (var, mask & (1 << bit) != 0))
            .collect();
        formula.verify(&assignment) == Ok(true)
    })
}

/// Checks the solver against brute force: same verdict, and any produced
/// model must satisfy the original formula.
fn check(clauses: Vec<Vec<i32>>) {
    let formula = TestFormula::from(clauses);

    match solve(&formula) {
        Some(model) => {
            assert_eq!(formula.verify(&model), Ok(true), "unsound model for {formula}");
        }
        None => {
            assert!(
                !brute_force_satisfiable(&formula),
                "solver reported UNSAT for a satisfiable formula: {formula}"
            );
        }
    }
}

/// The pigeonhole principle encoded in CNF: `pigeons` pigeons into `holes`
/// holes, no hole shared. Unsatisfiable whenever `pigeons > holes`.
#[allow(clippy::cast_possible_wrap)]
fn pigeonhole(pigeons: i32, holes: i32) -> Vec<Vec<i32>> {
    let var = |pigeon: i32, hole: i32| (pigeon - 1) * holes + hole;
    let mut clauses = Vec::new();

    for pigeon in 1..=pigeons {
        clauses.push((1..=holes).map(|hole| var(pigeon, hole)).collect());
    }

    for hole in 1..=holes {
        for first in 1..=pigeons {
            for second in (first + 1)..=pigeons {
                clauses.push(vec![-var(first, hole), -var(second, hole)]);
            }
        }
    }

    clauses
}

#[test]
fn solver_agrees_with_brute_force() {
    let instances = vec![
        vec![vec![1]],
        vec![vec![1], vec![-1]],
        vec![vec![1, 2], vec![-1, -2], vec![1, -2]],
        vec![vec![1, 2], vec![1, -2], vec![-1, 2], vec![-1, -2]],
        vec![vec![1, 2, 3], vec![-1, -2], vec![-2, -3], vec![-1, -3]],
        vec![vec![1, -2, 3], vec![2, 4], vec![-3, -4], vec![-1, 2]],
        vec![vec![-1, -2, -3], vec![1], vec![2], vec![3]],
        vec![vec![1, 1, -2], vec![2, -1]],
        vec![vec![1, -1], vec![2, 3]],
        vec![
            vec![1, 2, -3],
            vec![-1, 3, 4],
            vec![2, -4, 5],
            vec![-2, -5, 6],
            vec![-1, -6, 3],
            vec![4, 5, -6],
        ],
    ];

    for clauses in instances {
        check(clauses);
    }
}

#[test]
fn pigeonhole_instances() {
    // One hole short: unsatisfiable
    let unsat = TestFormula::from(pigeonhole(4, 3));
    assert_eq!(solve(&unsat), None);

    // Exact fit: satisfiable
    let sat = TestFormula::from(pigeonhole(3, 3));
    let model = solve(&sat).expect("3 pigeons fit 3 holes");
    assert_eq!(sat.verify(&model), Ok(true));
}

#[test]
fn branching_scenario_is_sound() {
    // (x1 ∨ x2) ∧ (¬x1 ∨ ¬x2) ∧ (x1 ∨ ¬x2): no unit or pure literal applies
    // at the root, so this exercises branching and propagation together.
    let formula = TestFormula::from(vec![vec![1, 2], vec![-1, -2], vec![1, -2]]);

    let model = solve(&formula).expect("formula is satisfiable");
    assert_eq!(formula.verify(&model), Ok(true));
}

#[test]
fn elimination_scenario_fixes_both_variables() {
    // (x1) ∧ (x1 ∨ x2): elimination alone decides the formula
    let formula = TestFormula::from(vec![vec![1], vec![1, 2]]);

    let expected: Assignment = [(1, true), (2, true)].into_iter().collect();
    assert_eq!(solve(&formula), Some(expected));
}

#[test]
fn unconstrained_universe_variable_defaults_to_true() {
    // Universe {x1, x2} with only x1 constrained
    let mut solver: Dpll<PackedLiteral> =
        Dpll::new(TestFormula::from(vec![vec![1]]), vec![1, 2]);

    let expected: Assignment = [(1, true), (2, true)].into_iter().collect();
    assert_eq!(solver.solve(), Some(expected));
}

#[test]
fn model_covers_the_whole_universe() {
    let (variables, formula) = parse_dimacs::<_, PackedLiteral>(Cursor::new(
        "p cnf 5 3\n1 -2 0\n-3 4 0\n5 0\n",
    ));

    let mut solver = Dpll::new(formula, variables.clone());
    let model = solver.solve().expect("formula is satisfiable");

    for var in variables {
        assert!(model.contains(var), "variable {var} missing from model");
    }
}

#[test]
fn dimacs_pipeline_end_to_end() {
    let (variables, formula) =
        parse_dimacs::<_, PackedLiteral>(Cursor::new("c sample\np cnf 2 2\n1 0\n1 2 0\n"));

    let mut solver = Dpll::new(formula, variables);
    let solution = solver.solve();

    let mut out = Vec::new();
    write_solution(&mut out, solution.as_ref()).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "s SATISFIABLE\nv 1 2 0\n");
}

#[test]
fn dimacs_pipeline_unsat() {
    let (variables, formula) =
        parse_dimacs::<_, PackedLiteral>(Cursor::new("1 0\n-1 0\n"));

    let mut solver = Dpll::new(formula, variables);
    let solution = solver.solve();

    assert_eq!(solution, None);

    let mut out = Vec::new();
    write_solution(&mut out, solution.as_ref()).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "s UNSATISFIABLE\n");
}

#[test]
fn variable_identifiers_need_not_be_contiguous() {
    let formula = TestFormula::from(vec![vec![10, -20], vec![20, 30], vec![-10]]);

    let model = solve(&formula).expect("formula is satisfiable");
    assert_eq!(formula.verify(&model), Ok(true));

    let mut universe: Vec<Variable> = formula.variables();
    universe.sort_unstable();
    assert_eq!(universe, vec![10, 20, 30]);
}

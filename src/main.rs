//! # dpll-sat
//!
//! A command-line SAT solver for the DIMACS CNF format, built on the
//! classical DPLL procedure: unit propagation, pure-literal elimination and
//! chronological backtracking.
//!
//! ## Usage
//!
//! ```sh
//! # Solve a DIMACS file
//! dpll-sat problem.cnf
//!
//! # Equivalent, with explicit subcommand
//! dpll-sat file --path problem.cnf
//!
//! # Solve a CNF formula given inline
//! dpll-sat text --input "1 -2 0\n2 3 0"
//! ```
//!
//! Common options: `-d/--debug` prints the parsed formula, `--verify`
//! re-evaluates the model against the original formula (default on),
//! `--stats` prints the statistics table (default on), and
//! `-p/--print-solution` prints the `v` model line.
//!
//! Output follows the DIMACS solution conventions: `c` comment lines for
//! diagnostics, one `s SATISFIABLE`/`s UNSATISFIABLE` status line, and an
//! optional `v ... 0` model line.

use clap::{Args, Parser, Subcommand};
use dpll_sat::sat::assignment::Assignment;
use dpll_sat::sat::dimacs::{self, parse_dimacs, parse_file};
use dpll_sat::sat::dpll::Dpll;
use dpll_sat::sat::formula::Formula;
use dpll_sat::sat::literal::{PackedLiteral, Variable};
use dpll_sat::sat::solver::{SolutionStats, Solver};
use std::io::Cursor;
use std::time::Duration;
use tikv_jemalloc_ctl::{epoch, stats};

type Lit = PackedLiteral;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Command-line interface definition.
#[derive(Parser, Debug)]
#[command(name = "dpll-sat", version, about = "A classical DPLL SAT solver")]
struct Cli {
    /// Path to a DIMACS .cnf file; shorthand for the `file` subcommand.
    #[arg(global = true)]
    path: Option<String>,

    #[clap(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    common: CommonOptions,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve a CNF file in DIMACS format.
    File {
        /// Path to the DIMACS .cnf file.
        #[arg(long)]
        path: String,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a CNF formula provided as plain text.
    Text {
        /// CNF input as a string, one clause per line, each terminated by 0
        /// (e.g. "1 -2 0\n2 3 0").
        #[arg(short, long)]
        input: String,

        #[command(flatten)]
        common: CommonOptions,
    },
}

/// Options shared by all subcommands.
#[derive(Args, Debug, Default)]
struct CommonOptions {
    /// Print the parsed formula and other debug output.
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Re-evaluate the model against the original formula.
    #[arg(long, default_value_t = true)]
    verify: bool,

    /// Print the statistics table after solving.
    #[arg(long, default_value_t = true)]
    stats: bool,

    /// Print the satisfying assignment as a DIMACS `v` line.
    #[arg(short, long, default_value_t = false)]
    print_solution: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            let time = std::time::Instant::now();
            let (variables, formula) = parse_file::<Lit>(&path)
                .unwrap_or_else(|e| panic!("Failed to parse file {path}: {e}"));
            let elapsed = time.elapsed();

            solve_and_report(variables, formula, &cli.common, Some(&path), elapsed);
            return;
        }
    }

    match cli.command {
        Some(Commands::File { path, common }) => {
            let time = std::time::Instant::now();
            let (variables, formula) = parse_file::<Lit>(&path)
                .unwrap_or_else(|e| panic!("Failed to parse file {path}: {e}"));
            let elapsed = time.elapsed();

            solve_and_report(variables, formula, &common, Some(&path), elapsed);
        }

        Some(Commands::Text { input, common }) => {
            let time = std::time::Instant::now();
            let (variables, formula) = parse_dimacs::<_, Lit>(Cursor::new(input));
            let elapsed = time.elapsed();

            solve_and_report(variables, formula, &common, None, elapsed);
        }

        None => {
            if cli.path.is_none() {
                eprintln!("No command provided. Use --help for more information.");
                std::process::exit(1);
            }
        }
    }
}

/// Solves a parsed problem and reports the result: status and model lines,
/// optional verification, and the statistics table.
fn solve_and_report(
    variables: Vec<Variable>,
    formula: Formula<Lit>,
    common: &CommonOptions,
    label: Option<&str>,
    parse_time: Duration,
) {
    if let Some(name) = label {
        dimacs::comment(&format!("solving {name}"));
    }

    if common.debug {
        println!("{formula}");
        dimacs::comment(&format!("variables: {}", variables.len()));
        dimacs::comment(&format!("clauses: {}", formula.len()));
    }

    epoch::advance().unwrap();

    let time = std::time::Instant::now();

    let mut solver = Dpll::new(formula.clone(), variables);
    let solution = solver.solve();

    let elapsed = time.elapsed();

    epoch::advance().unwrap();
    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if common.verify {
        verify_solution(&formula, solution.as_ref());
    }

    if common.print_solution {
        let mut out = std::io::stdout().lock();
        dimacs::write_solution(&mut out, solution.as_ref())
            .unwrap_or_else(|e| panic!("Failed to write solution: {e}"));
    } else if solution.is_some() {
        println!("s SATISFIABLE");
    } else {
        println!("s UNSATISFIABLE");
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            &formula,
            solver.stats(),
            allocated_mib,
            resident_mib,
        );
    }
}

/// Re-evaluates the model against the original, unsimplified formula and
/// panics if any clause is falsified. Prints a comment for UNSAT results,
/// which have nothing to verify.
fn verify_solution(formula: &Formula<Lit>, solution: Option<&Assignment>) {
    if let Some(assignment) = solution {
        let ok = formula
            .verify(assignment)
            .unwrap_or_else(|e| panic!("Verification failed: {e}"));
        dimacs::comment(&format!("verified: {ok}"));
        if !ok {
            panic!("Solution failed verification!");
        }
    } else {
        dimacs::comment("unsatisfiable, nothing to verify");
    }
}

fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("c |  {label:<24} {value:>18}  |");
}

fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("c |  {label:<16} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints the problem and search statistics as DIMACS comment lines.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    formula: &Formula<Lit>,
    s: SolutionStats,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("c ==================[ Problem Statistics ]==================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Variables", formula.variables().len());
    stat_line("Clauses", formula.len());

    println!("c ==================[ Search Statistics ]===================");
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Propagations", s.propagations, elapsed_secs);
    stat_line_with_rate("Pure literals", s.pure_literals, elapsed_secs);
    stat_line("Max search depth", s.max_depth);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("c ==========================================================");
}

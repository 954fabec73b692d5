//! Dense tableau Simplex for standard-form linear programs:
//! maximize `c·x` subject to `A·x <= b`, `x >= 0`.
//!
//! ```
//! use tableau_simplex::simplex::solve;
//!
//! let solution = solve(&[3., 2.], &[[2., 1.], [1., 3.]], &[18., 15.], 1e-6).unwrap();
//! assert_eq!(solution.objective_value, 28.2);
//! assert_eq!(solution.variables.as_slice(), &[7.8, 2.4]);
//! ```
//!
//! The starting basis is made of the slack variables, so every `b[i]` has to be
//! non-negative. Pivoting follows the most negative reduced cost and the
//! minimum ratio test, first index on ties, without anti-cycling rules.

mod helpers;
pub mod simplex;

pub use simplex::{solve, Problem, Solution, SolveError, SolveResult, SolverOptions};

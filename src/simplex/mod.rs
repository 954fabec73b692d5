mod options;
mod problem;
mod solution;
mod table;

pub use options::*;
pub use problem::*;
pub use solution::Solution;
pub use table::{SimplexTable, Step};

use derive_more::{Display, Error, IsVariant};

#[derive(Debug, Clone, PartialEq, Display, Error, IsVariant)]
pub enum SolveError {
    /// No constraint row bounds the entering column.
    #[display(fmt = "Objective is unbounded along column {}", column)]
    Unbounded { column: usize },
    /// The all-slack starting basis is infeasible.
    #[display(
        fmt = "Right-hand side b[{}] = {} is negative, the method is not applicable",
        row,
        value
    )]
    NegativeRhs { row: usize, value: f64 },
    #[display(fmt = "{} has length {}, expected {}", what, found, expected)]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[display(fmt = "{} at index {} is not finite", what, index)]
    NonFinite { what: &'static str, index: usize },
    #[display(fmt = "Tolerance {} is not a positive finite number", tolerance)]
    InvalidTolerance { tolerance: f64 },
    #[display(fmt = "No optimum reached within {} pivots", limit)]
    IterationLimit { limit: usize },
}

pub type SolveResult = Result<Solution, SolveError>;

/// Maximizes `c·x` subject to `a·x <= b`, `x >= 0`.
///
/// `a` is given row by row. Pivot decisions treat values within `tolerance` of
/// zero as zero, and the result is rounded to the matching number of decimals.
pub fn solve<R: AsRef<[f64]>>(c: &[f64], a: &[R], b: &[f64], tolerance: f64) -> SolveResult {
    Problem::from_rows(c, a, b)?.solve_with(&SolverOptions::default().with_tolerance(tolerance))
}

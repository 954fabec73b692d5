use std::cmp::Ordering;

use derive_more::{Display, IsVariant};
use nalgebra::{DMatrix, DVector};
use num_traits::{One, Zero};

use crate::{dbg_display, helpers::f64_rounded};

use super::{BasisDetection, Problem, Solution, SolveError, SolverOptions};

/// Dense Simplex tableau of a problem with `n` variables and `m` constraints.
///
/// `(m + 1) x (n + m + 1)`: constraint rows first, the objective row last.
/// Columns hold the structural variables, then the slacks, then the right-hand side.
#[derive(Debug, Clone, PartialEq, Display)]
#[display(fmt = "{}", tableau)]
pub struct SimplexTable {
    n_variables: usize,
    tableau: DMatrix<f64>,
    /// Index of the basic column of every constraint row
    basis: Vec<usize>,
    /// Pivots performed so far
    iterations: usize,
}

/// Outcome of a single controller step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum Step {
    /// Pivoted on `(row, column)`; the table is still running.
    Pivot { row: usize, column: usize },
    Optimal,
    /// `column` would improve the objective but no row bounds it.
    Unbounded { column: usize },
}

fn first_min<I: Iterator<Item = (usize, f64)>>(iter: I) -> Option<(usize, f64)> {
    // `min_by` keeps the first of equal elements
    iter.min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
}

impl SimplexTable {
    /// Builds the initial tableau with the all-slack basis.
    ///
    /// Dimensions are expected to be consistent, see [`Problem::validate`].
    pub fn new(problem: &Problem) -> Self {
        let n = problem.n_variables();
        let m = problem.n_constraints();

        let mut tableau = DMatrix::<f64>::zeros(m + 1, n + m + 1);
        tableau
            .slice_mut((0, 0), (m, n))
            .copy_from(problem.constraints());
        tableau.slice_mut((0, n), (m, m)).fill_with_identity();
        tableau
            .slice_mut((0, n + m), (m, 1))
            .copy_from(problem.rhs());
        tableau
            .slice_mut((m, 0), (1, n))
            .copy_from(&problem.objective().map(|c| -c));

        Self {
            n_variables: n,
            tableau,
            basis: (n..n + m).collect(),
            iterations: 0,
        }
    }

    pub fn tableau(&self) -> &DMatrix<f64> {
        &self.tableau
    }

    pub fn n_variables(&self) -> usize {
        self.n_variables
    }

    pub fn n_constraints(&self) -> usize {
        self.tableau.nrows() - 1
    }

    pub fn basis(&self) -> &[usize] {
        &self.basis
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    fn objective_row(&self) -> usize {
        self.n_constraints()
    }

    fn rhs_column(&self) -> usize {
        self.tableau.ncols() - 1
    }

    /// Objective value of the current basic solution.
    pub fn objective_value(&self) -> f64 {
        self.tableau[(self.objective_row(), self.rhs_column())]
    }

    /// Entering column by the most negative reduced cost, first one on ties.
    ///
    /// `None` when no reduced cost is below `-tolerance`, i.e. the table is optimal.
    pub fn pivot_column(&self, tolerance: f64) -> Option<usize> {
        first_min(
            self.tableau
                .row(self.objective_row())
                .iter()
                .take(self.rhs_column())
                .copied()
                .enumerate(),
        )
        .filter(|(_, reduced_cost)| *reduced_cost < -tolerance)
        .map(|(j, _)| j)
    }

    /// Leaving row by the minimum ratio test, first one on ties.
    ///
    /// Only rows whose entry in `column` exceeds `tolerance` take part. `None`
    /// means nothing bounds the column.
    pub fn pivot_row(&self, column: usize, tolerance: f64) -> Option<usize> {
        let rhs = self.rhs_column();
        first_min(
            self.tableau
                .column(column)
                .iter()
                .take(self.n_constraints())
                .enumerate()
                .filter(|(_, pivot_col_el)| **pivot_col_el > tolerance)
                .map(|(i, pivot_col_el)| (i, self.tableau[(i, rhs)] / pivot_col_el)),
        )
        .map(|(i, _)| i)
    }

    /// Gauss-Jordan step on `(row, column)`.
    ///
    /// The pivot element must be non-zero.
    pub fn pivot(&mut self, row: usize, column: usize) {
        let pivot_el = dbg_display!(self.tableau[(row, column)]);

        // divide all elements in a row by pivot element
        self.tableau.row_mut(row).apply(|el| *el /= pivot_el);

        let pivot_row = self.tableau.row(row).into_owned();
        for i in (0..self.tableau.nrows()).filter(|i| i != &row) {
            let multiplier = self.tableau[(i, column)];
            self.tableau
                .row_mut(i)
                .zip_apply(&pivot_row, |tableau_row_el, pivot_row_el| {
                    *tableau_row_el -= pivot_row_el * multiplier
                });
        }

        self.basis[row] = column;
        self.iterations += 1;
    }

    /// Selects a pivot without applying it.
    pub fn next_step(&self, tolerance: f64) -> Step {
        let Some(column) = self.pivot_column(tolerance) else {
            return Step::Optimal;
        };
        match self.pivot_row(column, tolerance) {
            Some(row) => Step::Pivot { row, column },
            None => Step::Unbounded { column },
        }
    }

    /// Selects a pivot and applies it.
    pub fn step(&mut self, tolerance: f64) -> Step {
        let step = self.next_step(tolerance);
        if let Step::Pivot { row, column } = step {
            self.pivot(row, column);
        }
        step
    }

    /// Pivots until the table is optimal or unbounded, at most `limit` times.
    ///
    /// Returns the total number of pivots performed on this table.
    pub fn run(&mut self, tolerance: f64, limit: usize) -> Result<usize, SolveError> {
        loop {
            log::trace!("Tableau:\n{}", self.tableau);
            match self.next_step(tolerance) {
                Step::Optimal => {
                    log::info!("Optimal solution was found after {} pivots", self.iterations);
                    return Ok(self.iterations);
                }
                Step::Unbounded { column } => {
                    log::info!("Column {column} has no bounding row");
                    return Err(SolveError::Unbounded { column });
                }
                Step::Pivot { .. } if self.iterations >= limit => {
                    log::warn!("Iteration limit of {limit} reached");
                    return Err(SolveError::IterationLimit { limit });
                }
                Step::Pivot { row, column } => {
                    log::info!("Iteration: {}", self.iterations + 1);
                    log::debug!("Pivot row: {row}, pivot column: {column}");
                    self.pivot(row, column);
                }
            }
        }
    }

    /// Row in which `column` is basic, if it is.
    ///
    /// With [`BasisDetection::Tracked`] the recorded basis answers. Otherwise a
    /// basic column is a unit vector over the constraint rows and has a zero
    /// reduced cost.
    fn basic_row(&self, column: usize, detection: BasisDetection, tolerance: f64) -> Option<usize> {
        if detection.is_tracked() {
            return self.basis.iter().position(|j| *j == column);
        }
        let is_unit = |el: &f64| match detection {
            BasisDetection::Tolerant => (el - 1.).abs() <= tolerance,
            _ => el.is_one(),
        };
        let is_null = |el: &f64| match detection {
            BasisDetection::Tolerant => el.abs() <= tolerance,
            _ => el.is_zero(),
        };

        if !is_null(&self.tableau[(self.objective_row(), column)]) {
            return None;
        }

        let mut basic_row = None;
        for (i, el) in self
            .tableau
            .column(column)
            .iter()
            .take(self.n_constraints())
            .enumerate()
        {
            if is_unit(el) {
                if basic_row.replace(i).is_some() {
                    return None;
                }
            } else if !is_null(el) {
                return None;
            }
        }
        basic_row
    }

    pub fn is_optimal(&self, tolerance: f64) -> bool {
        self.pivot_column(tolerance).is_none()
    }

    /// Reads the optimum back from the table.
    ///
    /// Meant for an optimal table, see [`SimplexTable::is_optimal`]. On any
    /// other table it reads off the current basic solution.
    pub fn solution(&self, options: &SolverOptions) -> Solution {
        let rhs = self.rhs_column();
        // a row is read by one variable only, the first column that is basic in it
        let mut claimed = vec![false; self.n_constraints()];
        let mut variables = DVector::from_fn(self.n_variables, |j, _| {
            match self.basic_row(j, options.basis_detection, options.tolerance) {
                Some(i) if !claimed[i] => {
                    claimed[i] = true;
                    self.tableau[(i, rhs)]
                }
                _ => 0.,
            }
        });
        let mut objective_value = self.objective_value();

        if let Some(precision) = options.precision() {
            variables.apply(|el| *el = f64_rounded(*el, precision));
            objective_value = f64_rounded(objective_value, precision);
        }

        Solution::new(variables, objective_value, self.iterations)
    }
}

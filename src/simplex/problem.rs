use derive_more::Display;
use derive_new::new;
use nalgebra::{DMatrix, DVector, RowDVector};
use serde::{Deserialize, Serialize};

use crate::ensure_eq;

use super::{SimplexTable, SolveError, SolveResult, SolverOptions};

/// `maximize c·x` subject to `A·x <= b`, `x >= 0`.
#[derive(Debug, Clone, PartialEq, Display, Serialize, Deserialize, new)]
#[display(
    fmt = "Problem: {{\n    objective:\n{}\n    constraints:\n{}\n    rhs:\n{}\n}}",
    r#"objective.to_string().trim().lines().map(|l| format!("{}\n", l.trim())).collect::<String>()"#,
    r#"constraints.to_string().trim().lines().map(|l| format!("{}\n", l.trim())).collect::<String>()"#,
    r#"rhs.to_string().trim().lines().map(|l| format!("{}\n", l.trim())).collect::<String>()"#
)]
pub struct Problem {
    pub(crate) objective: RowDVector<f64>,
    pub(crate) constraints: DMatrix<f64>,
    pub(crate) rhs: DVector<f64>,
}

impl Problem {
    /// Builds a problem from plain rows.
    ///
    /// Every row of `constraints` must have as many entries as `objective`.
    pub fn from_rows<R: AsRef<[f64]>>(
        objective: &[f64],
        constraints: &[R],
        rhs: &[f64],
    ) -> Result<Self, SolveError> {
        let n = objective.len();
        for row in constraints {
            ensure_eq!(row.as_ref().len(), n, "constraint row");
        }

        Ok(Self::new(
            RowDVector::from_row_slice(objective),
            DMatrix::from_fn(constraints.len(), n, |i, j| constraints[i].as_ref()[j]),
            DVector::from_column_slice(rhs),
        ))
    }

    pub fn objective(&self) -> &RowDVector<f64> {
        &self.objective
    }

    pub fn constraints(&self) -> &DMatrix<f64> {
        &self.constraints
    }

    pub fn rhs(&self) -> &DVector<f64> {
        &self.rhs
    }

    pub fn n_variables(&self) -> usize {
        self.objective.len()
    }

    pub fn n_constraints(&self) -> usize {
        self.constraints.nrows()
    }

    /// Checks that the problem can be handed to the tableau method.
    pub fn validate(&self, options: &SolverOptions) -> Result<(), SolveError> {
        if !(options.tolerance.is_finite() && options.tolerance > 0.) {
            log::warn!("Rejected tolerance {}", options.tolerance);
            return Err(SolveError::InvalidTolerance {
                tolerance: options.tolerance,
            });
        }

        ensure_eq!(self.constraints.ncols(), self.n_variables(), "constraint row");
        ensure_eq!(self.rhs.len(), self.n_constraints(), "rhs");
        log::debug!("Shape assertions passed");

        let non_finite = |what, index| {
            log::warn!("Non-finite value in {what} {index}");
            Err(SolveError::NonFinite { what, index })
        };
        if let Some(index) = self.objective.iter().position(|c| !c.is_finite()) {
            return non_finite("objective", index);
        }
        if let Some(index) = self
            .constraints
            .row_iter()
            .position(|row| row.iter().any(|a| !a.is_finite()))
        {
            return non_finite("constraint row", index);
        }
        if let Some(index) = self.rhs.iter().position(|b| !b.is_finite()) {
            return non_finite("rhs", index);
        }

        // the all-slack basis is the starting point, so it has to be feasible
        if let Some((row, &value)) = self.rhs.iter().enumerate().find(|(_, b)| **b < 0.) {
            log::warn!("Negative right-hand side b[{row}] = {value}");
            return Err(SolveError::NegativeRhs { row, value });
        }

        Ok(())
    }

    /// Solves with [`SolverOptions::default`].
    pub fn solve(&self) -> SolveResult {
        self.solve_with(&SolverOptions::default())
    }

    pub fn solve_with(&self, options: &SolverOptions) -> SolveResult {
        log::debug!("Problem formed: {self}");
        log::debug!("Options: {options}");
        self.validate(options)?;

        let mut table = SimplexTable::new(self);
        let limit = options.iteration_limit(self.n_variables(), self.n_constraints());
        table.run(options.tolerance, limit)?;

        let solution = table.solution(options);
        log::info!("Solution:\n{solution}");
        Ok(solution)
    }
}

use derive_more::{Display, IsVariant};
use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::helpers::precision_from_tolerance;

pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// How the solution extractor recognizes a basic column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, IsVariant, Serialize, Deserialize)]
pub enum BasisDetection {
    /// Literal `1`/`0` pattern.
    #[default]
    #[display(fmt = "exact")]
    Exact,
    /// `1`/`0` pattern up to the solver tolerance.
    #[display(fmt = "tolerant")]
    Tolerant,
    /// Basis recorded by the pivots, no scan.
    #[display(fmt = "tracked")]
    Tracked,
}

#[derive(Debug, Clone, PartialEq, Display, Serialize, Deserialize, new)]
#[display(
    fmt = "SolverOptions {{ tolerance: {}, rounding: {}, basis_detection: {}, max_iterations: {:?} }}",
    tolerance,
    rounding,
    basis_detection,
    max_iterations
)]
pub struct SolverOptions {
    /// Values within this distance of zero are treated as zero by the pivot rules.
    pub tolerance: f64,
    /// Round the extracted solution to the precision implied by `tolerance`.
    #[new(value = "true")]
    pub rounding: bool,
    #[new(default)]
    pub basis_detection: BasisDetection,
    /// Explicit pivot cap. `None` derives one from the problem dimensions.
    #[new(default)]
    pub max_iterations: Option<usize>,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl SolverOptions {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_rounding(mut self, rounding: bool) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_basis_detection(mut self, basis_detection: BasisDetection) -> Self {
        self.basis_detection = basis_detection;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Decimal places kept when `rounding` is on.
    pub fn precision(&self) -> Option<usize> {
        self.rounding.then(|| precision_from_tolerance(self.tolerance))
    }

    /// Pivot cap for a problem with `n_variables` structural columns and
    /// `n_constraints` rows.
    pub fn iteration_limit(&self, n_variables: usize, n_constraints: usize) -> usize {
        self.max_iterations.unwrap_or_else(|| {
            (10 * (n_variables + n_constraints) * (n_constraints + 1)).max(100)
        })
    }
}

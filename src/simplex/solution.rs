use derive_more::Display;
use derive_new::new;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// Optimal point of a solved problem.
#[derive(Debug, Clone, PartialEq, Display, Serialize, Deserialize, new)]
#[display(
    fmt = "Variables:\n{}\nObjective value: {}\nPivots: {}",
    r#"variables.to_string().trim().lines().map(|l| format!("{}\n", l.trim())).collect::<String>().trim_end()"#,
    objective_value,
    iterations
)]
pub struct Solution {
    /// Values of the structural variables, slacks excluded.
    pub variables: DVector<f64>,
    pub objective_value: f64,
    /// Pivots performed to reach the optimum.
    pub iterations: usize,
}

impl Solution {
    pub fn n_variables(&self) -> usize {
        self.variables.len()
    }
}

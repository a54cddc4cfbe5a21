//! Finite difference Jacobian for model residuals.

use crate::error::SolverResult;
use nalgebra::{DMatrix, DVector};

/// Forward-difference Jacobian of `f` at `x`, reusing the already evaluated
/// residual `f_x`.
///
/// Step for column j is `epsilon * max(|x_j|, 1)`.
pub fn forward_difference_jacobian<F>(
    x: &DVector<f64>,
    f_x: &DVector<f64>,
    f: F,
    epsilon: f64,
) -> SolverResult<DMatrix<f64>>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let mut jac = DMatrix::zeros(f_x.len(), x.len());
    let mut x_perturbed = x.clone();

    for j in 0..x.len() {
        let dx = epsilon * x[j].abs().max(1.0);
        x_perturbed[j] = x[j] + dx;
        let column = (f(&x_perturbed)? - f_x) / dx;
        jac.set_column(j, &column);
        x_perturbed[j] = x[j];
    }

    Ok(jac)
}

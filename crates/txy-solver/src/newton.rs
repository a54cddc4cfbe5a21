//! Damped Newton iteration with positivity constraints.

use crate::config::SolverConfig;
use crate::error::SolverResult;
use nalgebra::{DMatrix, DVector};

/// Newton solver configuration.
#[derive(Debug, Clone)]
pub struct NewtonConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Absolute tolerance for residual norm
    pub abs_tol: f64,
    /// Smallest admissible value of any unknown
    pub min_value: f64,
    /// Line search backtracking factor
    pub line_search_beta: f64,
    /// Maximum line search iterations
    pub max_line_search_iters: usize,
    /// Relative finite-difference step
    pub fd_epsilon: f64,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            abs_tol: SolverConfig::DEFAULT_TOLERANCE,
            min_value: 1.0,
            line_search_beta: 0.5,
            max_line_search_iters: 20,
            fd_epsilon: 1e-7,
        }
    }
}

impl From<&SolverConfig> for NewtonConfig {
    fn from(config: &SolverConfig) -> Self {
        Self {
            abs_tol: config.tolerance,
            ..Self::default()
        }
    }
}

/// How the iteration ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewtonOutcome {
    Converged,
    MaxIterations,
    /// Line search could not find an admissible, decreasing step.
    Stagnated,
    /// Jacobian could not be factorized.
    Singular,
    /// Residual at the starting point was not finite.
    NonFinite,
}

/// Newton iteration result.
#[derive(Debug, Clone)]
pub struct NewtonResult {
    /// Last accepted iterate
    pub x: DVector<f64>,
    /// Residual norm at `x`
    pub residual_norm: f64,
    /// Number of iterations
    pub iterations: usize,
    pub outcome: NewtonOutcome,
}

impl NewtonResult {
    pub fn converged(&self) -> bool {
        self.outcome == NewtonOutcome::Converged
    }
}

fn admissible(x: &DVector<f64>, r: &DVector<f64>, min_value: f64) -> bool {
    x.iter().all(|v| v.is_finite() && *v >= min_value) && r.iter().all(|v| v.is_finite())
}

/// Newton solver with backtracking line search.
///
/// `Err` only comes from the residual or Jacobian callbacks; every numerical
/// failure is reported through [`NewtonOutcome`].
pub fn newton_solve<F, J>(
    x0: DVector<f64>,
    residual_fn: F,
    jacobian_fn: J,
    config: &NewtonConfig,
) -> SolverResult<NewtonResult>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
    J: Fn(&DVector<f64>, &DVector<f64>) -> SolverResult<DMatrix<f64>>,
{
    let mut x = x0;
    let mut r = residual_fn(&x)?;
    if !r.iter().all(|v| v.is_finite()) {
        return Ok(NewtonResult {
            x,
            residual_norm: f64::INFINITY,
            iterations: 0,
            outcome: NewtonOutcome::NonFinite,
        });
    }
    let mut r_norm = r.norm();

    let finish = |x: DVector<f64>,
                  residual_norm: f64,
                  iterations: usize,
                  outcome: NewtonOutcome| NewtonResult {
        x,
        residual_norm,
        iterations,
        outcome,
    };

    for iter in 0..config.max_iterations {
        // Check convergence
        if r_norm < config.abs_tol {
            return Ok(finish(x, r_norm, iter, NewtonOutcome::Converged));
        }

        let jac = jacobian_fn(&x, &r)?;

        // Solve J * dx = -r
        let Some(dx) = jac.lu().solve(&(-r.clone())) else {
            return Ok(finish(x, r_norm, iter, NewtonOutcome::Singular));
        };

        let mut alpha = 1.0;
        let mut accepted = None;
        for _ in 0..=config.max_line_search_iters {
            let x_new = &x + alpha * &dx;
            let r_new = residual_fn(&x_new)?;
            if admissible(&x_new, &r_new, config.min_value) && r_new.norm() < r_norm {
                accepted = Some((x_new, r_new));
                break;
            }
            // Backtrack
            alpha *= config.line_search_beta;
        }

        let Some((x_new, r_new)) = accepted else {
            return Ok(finish(x, r_norm, iter, NewtonOutcome::Stagnated));
        };
        x = x_new;
        r = r_new;
        r_norm = r.norm();
    }

    if r_norm < config.abs_tol {
        return Ok(finish(x, r_norm, config.max_iterations, NewtonOutcome::Converged));
    }
    Ok(finish(x, r_norm, config.max_iterations, NewtonOutcome::MaxIterations))
}

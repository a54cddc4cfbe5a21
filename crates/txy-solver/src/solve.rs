//! Solver seam and the Newton implementation.

use crate::config::SolverConfig;
use crate::error::{SolverError, SolverResult};
use crate::jacobian::forward_difference_jacobian;
use crate::newton::{NewtonConfig, NewtonOutcome, newton_solve};
use crate::status::{SolveStatus, SolverStatus, TerminationCondition};
use nalgebra::DVector;
use txy_thermo::FlashModel;

/// Synchronous `solve(model) -> status` boundary.
///
/// Implementations must leave the model holding a solution whenever the
/// returned status is optimal. `Err` means the problem itself is malformed.
pub trait Solver {
    /// Get the solver name (for debugging/logging).
    fn name(&self) -> &str;

    fn solve<M: FlashModel + ?Sized>(&self, model: &mut M) -> SolverResult<SolveStatus>;
}

/// Damped Newton on the model's residuals with a finite-difference Jacobian.
#[derive(Debug, Clone, Default)]
pub struct NewtonSolver {
    config: SolverConfig,
}

impl NewtonSolver {
    pub fn new(config: SolverConfig) -> SolverResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}

fn status_for(outcome: NewtonOutcome) -> (SolverStatus, TerminationCondition) {
    match outcome {
        NewtonOutcome::Converged => (SolverStatus::Ok, TerminationCondition::Optimal),
        NewtonOutcome::MaxIterations => (SolverStatus::Warning, TerminationCondition::MaxIterations),
        NewtonOutcome::Stagnated => (SolverStatus::Warning, TerminationCondition::Infeasible),
        NewtonOutcome::Singular | NewtonOutcome::NonFinite => {
            (SolverStatus::Error, TerminationCondition::NumericalFailure)
        }
    }
}

impl Solver for NewtonSolver {
    fn name(&self) -> &str {
        "newton"
    }

    fn solve<M: FlashModel + ?Sized>(&self, model: &mut M) -> SolverResult<SolveStatus> {
        model.check_well_posed()?;

        let x0 = DVector::from_vec(model.unknowns());
        let newton = NewtonConfig::from(&self.config);

        let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            let r = model.residuals(x.as_slice())?;
            if r.len() != x.len() {
                return Err(SolverError::ProblemSetup {
                    what: format!("{} residuals for {} unknowns", r.len(), x.len()),
                });
            }
            Ok(DVector::from_vec(r))
        };
        let jacobian = |x: &DVector<f64>, r: &DVector<f64>| {
            forward_difference_jacobian(x, r, &residual, newton.fd_epsilon)
        };

        let result = newton_solve(x0, &residual, jacobian, &newton)?;
        let (solver_status, termination) = status_for(result.outcome);
        tracing::debug!(
            model = model.name(),
            iterations = result.iterations,
            residual_norm = result.residual_norm,
            %solver_status,
            %termination,
            "newton solve finished"
        );

        // Failed iterates are dropped so the next solve warm-starts from the
        // last good solution.
        if result.converged() {
            model.set_unknowns(result.x.as_slice())?;
        }

        Ok(SolveStatus::new(
            solver_status,
            termination,
            result.iterations,
            result.residual_norm,
        ))
    }
}

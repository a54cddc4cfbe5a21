//! txy-diagram: T-x-y (temperature vs. composition) diagrams for binary
//! mixtures at fixed pressure.
//!
//! The pipeline has two stages:
//! - [`txy_data`] sweeps the composition of a pair of components across a
//!   [`FlashModel`](txy_thermo::FlashModel), solving once per point and
//!   keeping only optimal solutions.
//! - [`build_txy_diagram`] renders the resulting [`TxyData`] with `plotters`.
//!
//! [`txy_diagram`] runs both from a [`TxyRequest`].

pub mod data;
pub mod error;
pub mod plot;
pub mod request;
pub mod sweep;

pub use data::TxyData;
pub use error::{DiagramError, DiagramResult};
pub use plot::{DiagramLabels, DiagramOptions, TxyFigure, build_txy_diagram};
pub use request::{TxyRequest, load_yaml, save_yaml};
pub use sweep::{CompositionSweep, PointOutcome, SweepPoint, SweepRun, txy_data};

use txy_solver::{NewtonSolver, Solver};
use txy_thermo::{FlashModel, MixtureModel};

/// Sweep `model` with `solver` as described by `request`, then render.
pub fn txy_diagram_with<M, S>(
    request: &TxyRequest,
    model: &mut M,
    solver: &S,
) -> DiagramResult<(TxyData, TxyFigure)>
where
    M: FlashModel + ?Sized,
    S: Solver,
{
    request.validate()?;
    let (component_1, component_2) = request.pair()?;
    let data = txy_data(
        component_1,
        component_2,
        request.pressure(),
        request.num_points,
        model,
        solver,
        &request.solver,
    )?;
    let figure = build_txy_diagram(&data, &request.diagram)?;
    Ok((data, figure))
}

/// Ideal-mixture, Newton-solved diagram for `request`.
pub fn txy_diagram(request: &TxyRequest) -> DiagramResult<(TxyData, TxyFigure)> {
    let mut model = request.build_model()?;
    let solver = NewtonSolver::new(request.solver)?;
    tracing::debug!(
        model = model.name(),
        solver = solver.name(),
        "building T-x-y diagram"
    );
    txy_diagram_with(request, &mut model, &solver)
}

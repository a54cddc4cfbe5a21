//! Composition sweep over a binary pair.
//!
//! The sweep pins every other model component to a trace fraction, warms the
//! model up once, then re-solves it at each composition of component 1. Each
//! point is solved at most once; non-optimal points are skipped.

use crate::data::TxyData;
use crate::error::{DiagramError, DiagramResult};
use txy_core::numeric::linspace;
use txy_core::units::{Pressure, k, pressure_pa, temperature_k};
use txy_solver::{SolveStatus, Solver, SolverConfig};
use txy_thermo::{FlashModel, Species};

/// Fixed fraction of every trace component.
pub const TRACE_MOLE_FRACTION: f64 = 1e-5;
/// Component 1 fraction at the start of the sweep.
pub const INITIAL_MOLE_FRACTION: f64 = 0.995;
/// Temperature fixed on the state block before initialization [K].
pub const INITIAL_TEMPERATURE_K: f64 = 298.15;
/// Total flow fixed on the state block [mol/s].
pub const TOTAL_FLOW_MOL: f64 = 1.0;

/// Planned compositions of a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionSweep {
    pub component_1: Species,
    pub component_2: Species,
    pub trace_components: Vec<Species>,
    /// Sum of all trace fractions
    pub trace_total: f64,
    /// Component 1 fractions, from `INITIAL_MOLE_FRACTION` down to
    /// `1 - INITIAL_MOLE_FRACTION - trace_total`
    pub points: Vec<f64>,
}

impl CompositionSweep {
    /// Plan a sweep of `num_points` compositions over a model's component list.
    ///
    /// Components 1 and 2 are not checked against `components` here; fixing
    /// an unknown component fails when the sweep starts.
    pub fn plan(
        components: &[Species],
        component_1: Species,
        component_2: Species,
        num_points: usize,
    ) -> DiagramResult<Self> {
        if num_points == 0 {
            return Err(DiagramError::InvalidArg {
                what: "sweep needs at least one point".to_string(),
            });
        }
        if component_1 == component_2 {
            return Err(DiagramError::InvalidArg {
                what: format!("component_1 and component_2 are both {component_1}"),
            });
        }

        let trace_components: Vec<Species> = components
            .iter()
            .copied()
            .filter(|s| *s != component_1 && *s != component_2)
            .collect();
        let trace_total = TRACE_MOLE_FRACTION * trace_components.len() as f64;

        let end = 1.0 - INITIAL_MOLE_FRACTION - trace_total;
        if end <= 0.0 {
            return Err(DiagramError::InvalidArg {
                what: format!(
                    "{} trace components leave no room for component 2",
                    trace_components.len()
                ),
            });
        }

        Ok(Self {
            component_1,
            component_2,
            trace_components,
            trace_total,
            points: linspace(INITIAL_MOLE_FRACTION, end, num_points),
        })
    }

    /// Fraction of component 2 paired with `x1`.
    pub fn complement(&self, x1: f64) -> f64 {
        1.0 - x1 - self.trace_total
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Outcome of one sweep point.
#[derive(Debug, Clone, PartialEq)]
pub enum PointOutcome {
    Converged { t_bubble: f64, t_dew: f64 },
    Skipped(SolveStatus),
}

/// One attempted sweep point.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    /// 1-based case number
    pub case: usize,
    pub composition: f64,
    pub outcome: PointOutcome,
}

/// Lazy sweep: yields one solved point per `next()`.
///
/// Holds the model mutably for its whole lifetime. After a hard error the
/// iterator yields that error once and then ends.
pub struct SweepRun<'a, M: ?Sized, S> {
    model: &'a mut M,
    solver: &'a S,
    sweep: CompositionSweep,
    next_index: usize,
}

impl<'a, M, S> SweepRun<'a, M, S>
where
    M: FlashModel + ?Sized,
    S: Solver,
{
    /// Fix boundary conditions, run the model's warm start, and return the
    /// not-yet-started iterator.
    pub fn start(
        model: &'a mut M,
        solver: &'a S,
        sweep: CompositionSweep,
        pressure: Pressure,
        config: &SolverConfig,
    ) -> DiagramResult<Self> {
        config.validate()?;

        for species in &sweep.trace_components {
            model.fix_mole_frac(*species, TRACE_MOLE_FRACTION)?;
        }
        model.fix_mole_frac(sweep.component_1, INITIAL_MOLE_FRACTION)?;
        model.fix_mole_frac(sweep.component_2, sweep.complement(INITIAL_MOLE_FRACTION))?;
        model.fix_flow_mol(TOTAL_FLOW_MOL)?;
        model.fix_temperature(k(INITIAL_TEMPERATURE_K))?;
        model.fix_pressure(pressure)?;

        model.initialize(config.tolerance)?;
        tracing::debug!(
            model = model.name(),
            points = sweep.len(),
            traces = sweep.trace_components.len(),
            "sweep initialized"
        );

        Ok(Self {
            model,
            solver,
            sweep,
            next_index: 0,
        })
    }

    pub fn sweep(&self) -> &CompositionSweep {
        &self.sweep
    }

    fn solve_point(&mut self, index: usize) -> DiagramResult<SweepPoint> {
        let x1 = self.sweep.points[index];
        let component_1 = self.sweep.component_1;
        self.model.fix_mole_frac(component_1, x1)?;
        self.model
            .fix_mole_frac(self.sweep.component_2, self.sweep.complement(x1))?;

        let status = self.solver.solve(&mut *self.model)?;
        let case = index + 1;

        let outcome = if status.is_optimal() {
            tracing::info!(case, "Case: {} Optimal. {} x = {:.2}", case, component_1, x1);
            PointOutcome::Converged {
                t_bubble: temperature_k(self.model.temperature_bubble()),
                t_dew: temperature_k(self.model.temperature_dew()),
            }
        } else {
            tracing::warn!(case, %status, "Case: {} No Result {} x = {:.2}", case, component_1, x1);
            PointOutcome::Skipped(status)
        };

        Ok(SweepPoint {
            case,
            composition: x1,
            outcome,
        })
    }
}

impl<M, S> Iterator for SweepRun<'_, M, S>
where
    M: FlashModel + ?Sized,
    S: Solver,
{
    type Item = DiagramResult<SweepPoint>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next_index;
        if index >= self.sweep.len() {
            return None;
        }
        let point = self.solve_point(index);
        self.next_index = if point.is_ok() {
            index + 1
        } else {
            self.sweep.len()
        };
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.sweep.len() - self.next_index;
        (remaining, Some(remaining))
    }
}

/// Run a full sweep and collect the converged points.
///
/// `config.tolerance` is handed to the model's warm start. Hard errors
/// abort the sweep; non-optimal points are dropped.
pub fn txy_data<M, S>(
    component_1: Species,
    component_2: Species,
    pressure: Pressure,
    num_points: usize,
    model: &mut M,
    solver: &S,
    config: &SolverConfig,
) -> DiagramResult<TxyData>
where
    M: FlashModel + ?Sized,
    S: Solver,
{
    let sweep = CompositionSweep::plan(model.components(), component_1, component_2, num_points)?;
    let run = SweepRun::start(&mut *model, solver, sweep, pressure, config)?;

    let mut converged = Vec::with_capacity(num_points);
    for point in run {
        if let SweepPoint {
            composition,
            outcome: PointOutcome::Converged { t_bubble, t_dew },
            ..
        } = point?
        {
            converged.push((composition, t_bubble, t_dew));
        }
    }

    let mut data = TxyData::new(
        component_1.key(),
        component_2.key(),
        pressure_pa(model.pressure()),
        model.pressure_unit(),
        model.temperature_unit(),
    );
    for (composition, t_bubble, t_dew) in converged {
        data.push_point(composition, t_bubble, t_dew);
    }

    tracing::info!(
        attempted = num_points,
        converged = data.len(),
        "{}-{} sweep finished",
        component_1,
        component_2
    );
    Ok(data)
}

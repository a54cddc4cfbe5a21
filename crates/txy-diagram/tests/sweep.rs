use approx::assert_relative_eq;
use proptest::prelude::*;
use std::cell::Cell;
use txy_core::units::{ATMOSPHERE_PA, pa};
use txy_diagram::sweep::{INITIAL_MOLE_FRACTION, TRACE_MOLE_FRACTION};
use txy_diagram::{
    CompositionSweep, DiagramError, PointOutcome, SweepRun, TxyData, txy_data,
};
use txy_solver::{
    NewtonSolver, SolveStatus, Solver, SolverConfig, SolverError, SolverResult, SolverStatus,
    TerminationCondition,
};
use txy_thermo::{FlashModel, IdealMixture, MixtureModel, Species, ThermoError};

/// Delegates to Newton except on scripted call numbers.
struct ScriptedSolver {
    inner: NewtonSolver,
    calls: Cell<usize>,
    fail_calls: Vec<usize>,
    hard_error_call: Option<usize>,
}

impl ScriptedSolver {
    fn failing(fail_calls: Vec<usize>) -> Self {
        Self {
            inner: NewtonSolver::default(),
            calls: Cell::new(0),
            fail_calls,
            hard_error_call: None,
        }
    }

    fn erroring_at(call: usize) -> Self {
        Self {
            hard_error_call: Some(call),
            ..Self::failing(Vec::new())
        }
    }
}

impl Solver for ScriptedSolver {
    fn name(&self) -> &str {
        "scripted"
    }

    fn solve<M: FlashModel + ?Sized>(&self, model: &mut M) -> SolverResult<SolveStatus> {
        let call = self.calls.get();
        self.calls.set(call + 1);

        if self.hard_error_call == Some(call) {
            return Err(SolverError::ProblemSetup {
                what: "scripted failure".to_string(),
            });
        }
        if self.fail_calls.contains(&call) {
            return Ok(SolveStatus::new(
                SolverStatus::Warning,
                TerminationCondition::MaxIterations,
                50,
                1.0,
            ));
        }
        self.inner.solve(model)
    }
}

fn water_ethanol() -> IdealMixture {
    IdealMixture::new(vec![Species::Water, Species::Ethanol]).unwrap()
}

fn sweep_water_ethanol<S: Solver>(num_points: usize, solver: &S) -> TxyData {
    let mut model = water_ethanol();
    txy_data(
        Species::Water,
        Species::Ethanol,
        pa(ATMOSPHERE_PA),
        num_points,
        &mut model,
        solver,
        &SolverConfig::default(),
    )
    .unwrap()
}

#[test]
fn water_ethanol_five_points() {
    let data = sweep_water_ethanol(5, &NewtonSolver::default());

    assert_eq!(data.len(), 5);
    assert_eq!(data.component_1, "water");
    assert_eq!(data.component_2, "ethanol");
    assert_eq!(data.pressure, ATMOSPHERE_PA);
    assert_eq!(data.pressure_unit, "Pa");
    assert_eq!(data.temperature_unit, "K");

    let x = data.composition_sequence();
    assert_eq!(x[0], INITIAL_MOLE_FRACTION);
    assert_relative_eq!(x[4], 0.005, epsilon = 1e-12);
    assert!(x.windows(2).all(|w| w[0] > w[1]));

    for (tb, td) in data
        .bubble_temperature_sequence()
        .iter()
        .zip(data.dew_temperature_sequence())
    {
        assert!(tb <= td, "bubble {tb} above dew {td}");
        assert!(*tb > 350.0 && *td < 374.0);
    }
    // Mostly water boils near 373 K; mostly ethanol near 351 K.
    assert!(data.bubble_temperature_sequence()[0] > data.bubble_temperature_sequence()[4]);
}

#[test]
fn failed_points_are_skipped() {
    let solver = ScriptedSolver::failing(vec![1, 3]);
    let data = sweep_water_ethanol(5, &solver);

    let planned = CompositionSweep::plan(
        &[Species::Water, Species::Ethanol],
        Species::Water,
        Species::Ethanol,
        5,
    )
    .unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(
        data.composition_sequence(),
        &[planned.points[0], planned.points[2], planned.points[4]]
    );
    // One solve per point, no retries.
    assert_eq!(solver.calls.get(), 5);
}

#[test]
fn all_failing_sweep_is_empty() {
    let solver = ScriptedSolver::failing((0..4).collect());
    let data = sweep_water_ethanol(4, &solver);
    assert!(data.is_empty());
    assert!(data.validate().is_ok());
}

#[test]
fn single_point_sweep() {
    let data = sweep_water_ethanol(1, &NewtonSolver::default());
    assert_eq!(data.composition_sequence(), &[INITIAL_MOLE_FRACTION]);
}

#[test]
fn zero_points_rejected() {
    let mut model = water_ethanol();
    let err = txy_data(
        Species::Water,
        Species::Ethanol,
        pa(ATMOSPHERE_PA),
        0,
        &mut model,
        &NewtonSolver::default(),
        &SolverConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, DiagramError::InvalidArg { .. }));
}

#[test]
fn component_missing_from_model_fails_fast() {
    let mut model = water_ethanol();
    let solver = ScriptedSolver::failing(Vec::new());
    let err = txy_data(
        Species::Methanol,
        Species::Ethanol,
        pa(ATMOSPHERE_PA),
        5,
        &mut model,
        &solver,
        &SolverConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        DiagramError::Thermo(ThermoError::UnknownComponent { .. })
    ));
    assert_eq!(solver.calls.get(), 0);
}

#[test]
fn non_physical_pressure_aborts() {
    let mut model = water_ethanol();
    let err = txy_data(
        Species::Water,
        Species::Ethanol,
        pa(-5.0),
        5,
        &mut model,
        &NewtonSolver::default(),
        &SolverConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, DiagramError::Thermo(_)));
}

#[test]
fn solver_hard_error_aborts_sweep() {
    let mut model = water_ethanol();
    let solver = ScriptedSolver::erroring_at(2);
    let err = txy_data(
        Species::Water,
        Species::Ethanol,
        pa(ATMOSPHERE_PA),
        5,
        &mut model,
        &solver,
        &SolverConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, DiagramError::Solver(_)));
    assert_eq!(solver.calls.get(), 3);
}

#[test]
fn run_yields_error_once_then_ends() {
    let mut model = water_ethanol();
    let solver = ScriptedSolver::erroring_at(1);
    let sweep = CompositionSweep::plan(model.components(), Species::Water, Species::Ethanol, 4)
        .unwrap();
    let mut run = SweepRun::start(
        &mut model,
        &solver,
        sweep,
        pa(ATMOSPHERE_PA),
        &SolverConfig::default(),
    )
    .unwrap();

    let first = run.next().unwrap().unwrap();
    assert_eq!(first.case, 1);
    assert!(matches!(first.outcome, PointOutcome::Converged { .. }));
    assert!(run.next().unwrap().is_err());
    assert!(run.next().is_none());
}

#[test]
fn run_reports_every_case_in_order() {
    let mut model = water_ethanol();
    let solver = ScriptedSolver::failing(vec![0]);
    let sweep = CompositionSweep::plan(model.components(), Species::Water, Species::Ethanol, 3)
        .unwrap();
    let run = SweepRun::start(
        &mut model,
        &solver,
        sweep,
        pa(ATMOSPHERE_PA),
        &SolverConfig::default(),
    )
    .unwrap();
    assert_eq!(run.size_hint(), (3, Some(3)));

    let points: Vec<_> = run.map(Result::unwrap).collect();
    assert_eq!(points.iter().map(|p| p.case).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert!(matches!(points[0].outcome, PointOutcome::Skipped(status) if !status.is_optimal()));
    assert!(matches!(points[2].outcome, PointOutcome::Converged { .. }));
}

#[test]
fn trace_components_stay_pinned() {
    let mut model =
        IdealMixture::new(vec![Species::Water, Species::Methanol, Species::Ethanol]).unwrap();
    let data = txy_data(
        Species::Water,
        Species::Ethanol,
        pa(ATMOSPHERE_PA),
        3,
        &mut model,
        &NewtonSolver::default(),
        &SolverConfig::default(),
    )
    .unwrap();

    assert_eq!(data.len(), 3);
    assert_eq!(model.mole_frac(Species::Methanol).unwrap(), TRACE_MOLE_FRACTION);
    let last = data.composition_sequence()[2];
    assert_relative_eq!(last, 0.005 - TRACE_MOLE_FRACTION, epsilon = 1e-12);
    assert_relative_eq!(
        model.mole_frac(Species::Ethanol).unwrap(),
        1.0 - last - TRACE_MOLE_FRACTION,
        epsilon = 1e-12
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn output_is_ordered_subsequence_of_sweep(
        num_points in 1usize..16,
        fail_mask in proptest::collection::vec(any::<bool>(), 16),
    ) {
        let fail_calls: Vec<usize> = (0..num_points).filter(|i| fail_mask[*i]).collect();
        let expected_len = num_points - fail_calls.len();
        let solver = ScriptedSolver::failing(fail_calls.clone());
        let data = sweep_water_ethanol(num_points, &solver);

        prop_assert_eq!(data.len(), expected_len);
        prop_assert_eq!(data.bubble_temperature_sequence().len(), data.len());
        prop_assert_eq!(data.dew_temperature_sequence().len(), data.len());

        let planned = CompositionSweep::plan(
            &[Species::Water, Species::Ethanol],
            Species::Water,
            Species::Ethanol,
            num_points,
        )
        .unwrap();
        let kept: Vec<f64> = planned
            .points
            .iter()
            .enumerate()
            .filter(|(i, _)| !fail_calls.contains(i))
            .map(|(_, x)| *x)
            .collect();
        prop_assert_eq!(data.composition_sequence(), kept.as_slice());
    }
}

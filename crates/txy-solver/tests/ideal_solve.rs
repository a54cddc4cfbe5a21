use approx::assert_relative_eq;
use txy_core::units::{ATMOSPHERE_PA, k, pa, temperature_k};
use txy_solver::{NewtonSolver, Solver, SolverConfig, SolverError, TerminationCondition};
use txy_thermo::{EquationSystem, IdealMixture, MixtureModel, Species};

fn benzene_toluene(x_benzene: f64) -> IdealMixture {
    let mut model = IdealMixture::new(vec![Species::Benzene, Species::Toluene]).unwrap();
    model.fix_mole_frac(Species::Benzene, x_benzene).unwrap();
    model.fix_mole_frac(Species::Toluene, 1.0 - x_benzene).unwrap();
    model.fix_flow_mol(1.0).unwrap();
    model.fix_temperature(k(298.15)).unwrap();
    model.fix_pressure(pa(ATMOSPHERE_PA)).unwrap();
    model
}

#[test]
fn converges_from_initialized_state() {
    let mut model = benzene_toluene(0.4);
    model.initialize(1e-3).unwrap();

    let solver = NewtonSolver::new(SolverConfig::default()).unwrap();
    let status = solver.solve(&mut model).unwrap();

    assert!(status.is_optimal(), "{status}");
    let r = model.residuals(&model.unknowns()).unwrap();
    assert!(r.iter().all(|v| v.abs() < 1e-6));
}

#[test]
fn tracks_composition_changes_from_warm_start() {
    let mut model = benzene_toluene(0.9);
    model.initialize(1e-6).unwrap();
    let solver = NewtonSolver::default();

    let mut last_bubble = 0.0;
    for x in [0.9, 0.7, 0.5, 0.3, 0.1] {
        model.fix_mole_frac(Species::Benzene, x).unwrap();
        model.fix_mole_frac(Species::Toluene, 1.0 - x).unwrap();
        let status = solver.solve(&mut model).unwrap();
        assert!(status.is_optimal(), "x = {x}: {status}");

        let tb = temperature_k(model.temperature_bubble());
        let td = temperature_k(model.temperature_dew());
        assert!(tb <= td);
        // Less of the light component boils hotter.
        assert!(tb > last_bubble);
        last_bubble = tb;
    }
}

#[test]
fn matches_pure_component_limit() {
    let mut model = benzene_toluene(1.0);
    model.initialize(1e-6).unwrap();
    let status = NewtonSolver::default().solve(&mut model).unwrap();
    assert_eq!(status.termination_condition, TerminationCondition::Optimal);

    let tsat = Species::Benzene.antoine().tsat_k(ATMOSPHERE_PA).unwrap();
    assert_relative_eq!(temperature_k(model.temperature_bubble()), tsat, epsilon = 1e-3);
    assert_relative_eq!(temperature_k(model.temperature_dew()), tsat, epsilon = 1e-3);
}

#[test]
fn unfixed_state_is_a_hard_error() {
    let mut model = IdealMixture::new(vec![Species::Water, Species::Ethanol]).unwrap();
    let err = NewtonSolver::default().solve(&mut model).unwrap_err();
    assert!(matches!(err, SolverError::Model(_)));
}

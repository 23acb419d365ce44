//! Integration tests for scenario runs.
//!
//! Tests verify the qualitative trajectories each preset is meant to
//! produce: the meal response in the baseline liver, ketone accumulation
//! and acidosis in DKA, and hepatic fat gain in NAFLD relative to normal.

use liver_simulator_x::scenario::{
    simulated_ph, BaselineScenario, DkaScenario, NafldScenario, NormalConfig, NormalScenario,
};
use liver_simulator_x::{
    EngineParameters, HepaticEngine, Metabolite, Perturbation, RuleId, Scenario, ScenarioRegistry,
};

fn run(scenario: &dyn Scenario) -> liver_simulator_x::History {
    HepaticEngine::default()
        .run(scenario, scenario.default_ticks())
        .unwrap()
}

// ============================================================================
// Baseline
// ============================================================================

#[test]
fn test_baseline_record_per_tick() {
    let history = run(&BaselineScenario::new());
    assert_eq!(history.len(), 200);
    assert_eq!(history.records()[0].time, 0.0);
    assert_eq!(history.records()[199].time, 199.0);
}

#[test]
fn test_feeding_bump_peaks_in_window() {
    let history = run(&BaselineScenario::new());
    let (tick, _) = history.max_of("glucose").unwrap();
    assert!((50..=61).contains(&tick), "glucose peak at tick {}", tick);
}

#[test]
fn test_feeding_bump_isolated() {
    let scenario = BaselineScenario::with_perturbations(vec![Perturbation::FeedingWindow {
        start: 50,
        end: 60,
        glucose: 15.0,
        amino_acid: 5.0,
    }]);
    let history = HepaticEngine::default().run(&scenario, 120).unwrap();
    let glucose = history.series("glucose");

    let (tick, peak) = history.max_of("glucose").unwrap();
    assert!((50..=61).contains(&tick), "glucose peak at tick {}", tick);
    assert!(peak > glucose[49]);
    assert!(glucose[119] < peak);
}

#[test]
fn test_stress_raises_epinephrine() {
    let history = run(&BaselineScenario::new());
    assert_eq!(history.records()[150].get("epinephrine"), 0.1);
    assert!(history.records()[151].get("rate_glycogenolysis") > 0.0);

    // The injection is re-applied every tick after 150, so the level holds
    for record in &history.records()[151..200] {
        assert_eq!(record.get("epinephrine"), 2.0, "tick {}", record.time);
    }
}

// ============================================================================
// DKA
// ============================================================================

#[test]
fn test_dka_ketones_accumulate() {
    let history = run(&DkaScenario::new());
    assert_eq!(history.len(), 1440);

    let ketone = history.series("ketone_body");
    let first = ketone[0];
    let last = ketone[ketone.len() - 1];
    assert!(last > first, "ketone {} -> {}", first, last);

    // Nothing consumes ketone bodies, so the trend never reverses
    for pair in ketone.windows(2) {
        assert!(pair[1] >= pair[0]);
    }
}

#[test]
fn test_dka_acidosis() {
    let history = run(&DkaScenario::new());
    let ph = simulated_ph(history.final_value("ketone_body"));
    assert!(ph < 7.3, "simulated pH {}", ph);

    let diag = DkaScenario::new().diagnostics(&history);
    assert_eq!(diag.metric("simulated_ph"), Some(ph));
    assert!(diag.severity > 0.0);
    assert!(!diag.warnings.is_empty());
}

#[test]
fn test_dka_from_full_glycogen_store() {
    let history = run(&DkaScenario::new());
    // Resting store of 500, drawn on only by glucagon-driven glycogenolysis
    assert!(history.records()[0].get("glycogen") > 490.0);

    let ketone = history.series("ketone_body");
    assert!((ketone[0] - 1.0).abs() < 1e-9, "first ketone {}", ketone[0]);
    assert!((ketone[ketone.len() - 1] - 12.0).abs() < 1e-6);
    let ph = simulated_ph(ketone[ketone.len() - 1]);
    assert!((ph - 7.1).abs() < 1e-6, "simulated pH {}", ph);
}

#[test]
fn test_dka_lipolysis_and_ketogenesis_fire() {
    let history = run(&DkaScenario::new());
    assert!(history.mean(&RuleId::AdiposeLipolysis.rate_key()) > 0.0);
    assert!(history.mean(&RuleId::Ketogenesis.rate_key()) > 0.0);
}

#[test]
fn test_dka_glucose_floor_holds() {
    let history = run(&DkaScenario::new());
    // Floor is enforced before each step; one step can only remove a little
    for glucose in history.series("glucose") {
        assert!(glucose > 19.0, "glucose {}", glucose);
    }
}

#[test]
fn test_dka_time_in_hours() {
    let history = run(&DkaScenario::new());
    assert_eq!(history.records()[60].time, 1.0);
    assert!((history.final_value("time") - 1439.0 / 60.0).abs() < 1e-12);
}

// ============================================================================
// NAFLD vs normal
// ============================================================================

#[test]
fn test_nafld_accumulates_more_triglyceride_than_normal() {
    let normal = run(&NormalScenario::new());
    let nafld = run(&NafldScenario::new());
    assert_eq!(normal.len(), 2880);
    assert_eq!(nafld.len(), 2880);

    let tg_normal = normal.final_value("triglycerides");
    let tg_nafld = nafld.final_value("triglycerides");
    assert!(tg_nafld > tg_normal, "nafld {} vs normal {}", tg_nafld, tg_normal);
}

#[test]
fn test_nafld_starts_without_inflammation() {
    let history = run(&NafldScenario::new());
    for record in history.records() {
        assert_eq!(record.get("inflammation"), 0.0);
    }
}

#[test]
fn test_nafld_keeps_glucose_high() {
    let history = run(&NafldScenario::new());
    for glucose in history.series("glucose") {
        assert!(glucose > 100.0, "glucose {}", glucose);
    }
    assert!(history.mean("rate_lipidTransport") > 0.0);
}

#[test]
fn test_normal_meals_every_six_hours() {
    let history = run(&NormalScenario::new());
    let glucose = history.series("glucose");
    // A meal lands on tick 360 and lifts glucose above the previous tick
    assert!(glucose[360] > glucose[359]);
}

#[test]
fn test_fasting_24h_has_no_meals() {
    let scenario = NormalScenario::with_config(NormalConfig::fasting_24h());
    let history = run(&scenario);
    assert_eq!(history.len(), 1440);
    assert!((history.final_value("time") - 1439.0 / 60.0).abs() < 1e-12);

    // Without meals no tick gains anything close to a meal's +5 glucose
    let glucose = history.series("glucose");
    for pair in glucose.windows(2) {
        assert!(pair[1] - pair[0] < 1.0, "glucose {} -> {}", pair[0], pair[1]);
    }
    assert_eq!(history.final_value("triglycerides"), 10.0);
}

// ============================================================================
// Whole-run properties
// ============================================================================

#[test]
fn test_runs_are_deterministic() {
    for name in ScenarioRegistry::list_presets() {
        let scenario = ScenarioRegistry::create(name).unwrap();
        let a = HepaticEngine::default().run(scenario.as_ref(), 500).unwrap();
        let b = HepaticEngine::default().run(scenario.as_ref(), 500).unwrap();
        assert_eq!(a, b, "{} not reproducible", name);
    }
}

#[test]
fn test_engine_reusable_across_runs() {
    let mut engine = HepaticEngine::default();
    let a = engine.run(&DkaScenario::new(), 300).unwrap();
    let b = engine.run(&DkaScenario::new(), 300).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_metabolites_never_negative() {
    for name in ScenarioRegistry::list_presets() {
        let scenario = ScenarioRegistry::create(name).unwrap();
        let history = run(scenario.as_ref());
        for record in history.records() {
            for &m in Metabolite::ALL {
                assert!(record.get(m.name()) >= 0.0, "{}: {} negative", name, m);
            }
        }
    }
}

#[test]
fn test_closed_system_oxygen_run_down() {
    let scenario = BaselineScenario::new();
    let history = HepaticEngine::new(EngineParameters::closed_system())
        .run(&scenario, 200)
        .unwrap();
    let oxygen = history.series("oxygen");

    assert_eq!(oxygen[0], 99.0);
    assert_eq!(oxygen[79], 20.0);
    // Respiration stops at the threshold; nothing else draws oxygen down
    for &o in &oxygen[79..] {
        assert_eq!(o, 20.0);
    }
    assert_eq!(history.records()[150].get("rate_oxidativePhosphorylation"), 0.0);
}

#[test]
fn test_default_engine_is_closed_system() {
    let scenario = BaselineScenario::new();
    let default = run(&scenario);
    let closed = HepaticEngine::new(EngineParameters::closed_system())
        .run(&scenario, 200)
        .unwrap();
    assert_eq!(default, closed);
}

#[test]
fn test_perfusion_sustains_respiration() {
    let history = HepaticEngine::new(EngineParameters::perfused())
        .run(&BaselineScenario::new(), 200)
        .unwrap();
    for record in history.records() {
        assert!(record.get("oxygen") > 20.0);
        assert_eq!(record.get("rate_oxidativePhosphorylation"), 0.5);
    }
}

#[test]
fn test_every_rate_key_present() {
    let history = run(&BaselineScenario::new());
    let record = history.last().unwrap();
    for &id in RuleId::ALL {
        assert!(record.contains(&id.rate_key()), "{}", id);
    }
}

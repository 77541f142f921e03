//! Loading and validating scenario rules documents.

use std::fs;

use serde_json::Value;

use thesis_lab::domain::Scenario;
use thesis_lab::error::RulesError;
use thesis_lab::infrastructure::config::rules::ScenarioRules;
use thesis_lab::testkit::config::{rules_json, BUNDLED_RULES};

fn edited(edit: impl FnOnce(&mut Value)) -> Result<ScenarioRules, RulesError> {
    let mut doc = rules_json();
    edit(&mut doc);
    ScenarioRules::from_json_str(&doc.to_string())
}

fn invalid_field(result: Result<ScenarioRules, RulesError>) -> String {
    match result {
        Err(RulesError::InvalidValue { field, .. }) => field,
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn bundled_rules_load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scenario_rules.json");
    fs::write(&path, BUNDLED_RULES).unwrap();

    let rules = ScenarioRules::load(&path).unwrap();

    assert!((rules.weights.total() - 1.0).abs() < 1e-9);
    assert_eq!(rules.normalization.correction_target, Scenario::Base);
    assert_eq!(rules.source_label("elsewhere.json"), "config/scenario_rules.json");
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ScenarioRules::load(dir.path().join("absent.json"));

    assert!(matches!(result, Err(RulesError::ReadFile { .. })));
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(
        ScenarioRules::from_json_str("{\"weights\": "),
        Err(RulesError::Parse(_))
    ));
}

#[test]
fn missing_section_is_a_parse_error() {
    let result = edited(|doc| {
        doc.as_object_mut().unwrap().remove("volatility_buffer");
    });
    assert!(matches!(result, Err(RulesError::Parse(_))));
}

#[test]
fn optional_sections_take_defaults() {
    let rules = edited(|doc| {
        let root = doc.as_object_mut().unwrap();
        root.remove("normalization");
        root.remove("rules_source");
        doc["momentum"].as_object_mut().unwrap().remove("neutral_zone");
    })
    .unwrap();

    assert_eq!(rules.normalization.cap_total_probability, 1.0);
    assert_eq!(rules.normalization.round_digits, 4);
    assert_eq!(rules.normalization.correction_target, Scenario::Base);
    assert_eq!(rules.momentum.neutral_zone.max_shift, 0.04);
    assert_eq!(rules.momentum.neutral_zone.base_penalty_factor, 0.5);
    assert_eq!(rules.source_label("rules/custom.json"), "rules/custom.json");
}

#[test]
fn weights_must_sum_to_one() {
    let result = edited(|doc| doc["weights"]["liquidity_resilience"] = 0.31.into());
    match result {
        Err(RulesError::WeightsSum { total }) => assert!((total - 1.01).abs() < 1e-9),
        other => panic!("expected WeightsSum, got {other:?}"),
    }
}

#[test]
fn negative_allocation_is_rejected() {
    let field = invalid_field(edited(|doc| {
        doc["onchain_concentration"]["allocations"]["unknown"]["stress"] = (-0.01).into();
    }));
    assert_eq!(field, "onchain_concentration.allocations.unknown.stress");
}

#[test]
fn negative_trend_coefficient_is_rejected() {
    let field = invalid_field(edited(|doc| {
        doc["momentum"]["allocations"]["stress_trend"]["bull_penalty"] = (-0.02).into();
    }));
    assert_eq!(field, "momentum.allocations.stress_trend.bull_penalty");
}

#[test]
fn band_bounds_must_be_ordered() {
    let field = invalid_field(edited(|doc| {
        doc["liquidity"]["liq_fdv_bands"]["neutral_min"] = 0.06.into();
    }));
    assert_eq!(field, "liquidity.liq_fdv_bands.neutral_min");

    let field = invalid_field(edited(|doc| {
        doc["volatility_buffer"]["bands_abs_pct"]["low_max"] = 20.0.into();
    }));
    assert_eq!(field, "volatility_buffer.bands_abs_pct.low_max");

    let field = invalid_field(edited(|doc| {
        doc["momentum"]["stress_max_ratio"] = 1.3.into();
    }));
    assert_eq!(field, "momentum.stress_max_ratio");
}

#[test]
fn strength_denominators_must_be_positive() {
    let field = invalid_field(edited(|doc| {
        doc["momentum"]["strength_scales"]["stress_denominator"] = 0.0.into();
    }));
    assert_eq!(field, "momentum.strength_scales.stress_denominator");
}

#[test]
fn normalization_bounds_are_enforced() {
    let field = invalid_field(edited(|doc| {
        doc["normalization"]["cap_total_probability"] = 0.0.into();
    }));
    assert_eq!(field, "normalization.cap_total_probability");

    let field = invalid_field(edited(|doc| {
        doc["normalization"]["round_digits"] = 11.into();
    }));
    assert_eq!(field, "normalization.round_digits");

    assert!(edited(|doc| doc["normalization"]["round_digits"] = 10.into()).is_ok());
}

#[test]
fn unknown_correction_target_is_a_parse_error() {
    let result = edited(|doc| doc["normalization"]["correction_target"] = "Sideways".into());
    assert!(matches!(result, Err(RulesError::Parse(_))));
}

#[test]
fn trend_that_would_drain_bull_below_zero_is_rejected() {
    let result = edited(|doc| {
        for section in ["liquidity", "onchain_concentration", "volatility_buffer"] {
            if let Some(bands) = doc[section]["allocations"].as_object_mut() {
                for band in bands.values_mut() {
                    band["bull"] = 0.0.into();
                }
            }
        }
        let trend = &mut doc["momentum"]["allocations"]["stress_trend"];
        trend["bull_base"] = 0.0.into();
        trend["bull_penalty"] = 0.05.into();
    });

    assert_eq!(
        invalid_field(result),
        "momentum.allocations.stress_trend.bull_penalty"
    );
}

#[test]
fn neutral_band_without_room_for_the_shift_is_rejected() {
    let result = edited(|doc| doc["momentum"]["allocations"]["neutral"]["base"] = 0.0.into());

    assert_eq!(invalid_field(result), "momentum.allocations.neutral.base");
}

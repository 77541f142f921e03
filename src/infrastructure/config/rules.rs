//! Scenario rules document: loading and validation.
//!
//! The rules are a JSON document shared with upstream tooling. A rule set is
//! validated once at load time and then handed read-only to the scorer.

use std::path::Path;

pub use crate::domain::rules::*;
use crate::domain::Scenario;
use crate::error::RulesError;

/// Tolerance of the weights-sum check.
pub const WEIGHTS_EPSILON: f64 = 1e-9;

/// Largest accepted `normalization.round_digits`.
pub const MAX_ROUND_DIGITS: u32 = 10;

impl ScenarioRules {
    /// Parse and validate a rules document.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::Parse`] for malformed JSON or missing sections,
    /// and a validation error for inconsistent values.
    pub fn from_json_str(content: &str) -> Result<Self, RulesError> {
        let rules: Self = serde_json::from_str(content).map_err(RulesError::Parse)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Read, parse and validate the rules file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::ReadFile`] when the file cannot be read, plus
    /// every error of [`ScenarioRules::from_json_str`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RulesError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RulesError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Check every cross-field constraint the scorer relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), RulesError> {
        let total = self.weights.total();
        if !total.is_finite() || (total - 1.0).abs() > WEIGHTS_EPSILON {
            return Err(RulesError::WeightsSum { total });
        }
        for (name, weight) in self.weights.to_map() {
            non_negative(&format!("weights.{name}"), weight)?;
        }

        self.validate_allocations()?;
        self.validate_momentum_reach()?;

        let thresholds = [
            (
                "liquidity.stress_drop_24h_threshold",
                self.liquidity.stress_drop_24h_threshold,
            ),
            (
                "liquidity.liq_fdv_bands.healthy_min",
                self.liquidity.liq_fdv_bands.healthy_min,
            ),
            (
                "liquidity.liq_fdv_bands.neutral_min",
                self.liquidity.liq_fdv_bands.neutral_min,
            ),
            ("momentum.bull_min_ratio", self.momentum.bull_min_ratio),
            ("momentum.stress_max_ratio", self.momentum.stress_max_ratio),
            (
                "momentum.neutral_zone.max_shift",
                self.momentum.neutral_zone.max_shift,
            ),
            (
                "momentum.neutral_zone.base_penalty_factor",
                self.momentum.neutral_zone.base_penalty_factor,
            ),
            (
                "onchain_concentration.diamond_hands_threshold_pct",
                self.onchain_concentration.diamond_hands_threshold_pct,
            ),
            (
                "volatility_buffer.bands_abs_pct.low_max",
                self.volatility_buffer.bands_abs_pct.low_max,
            ),
            (
                "volatility_buffer.bands_abs_pct.mid_max",
                self.volatility_buffer.bands_abs_pct.mid_max,
            ),
        ];
        for (field, value) in thresholds {
            finite(field, value)?;
        }

        let bands = self.liquidity.liq_fdv_bands;
        if bands.neutral_min > bands.healthy_min {
            return Err(invalid(
                "liquidity.liq_fdv_bands.neutral_min",
                "must be <= healthy_min",
            ));
        }
        let vol = self.volatility_buffer.bands_abs_pct;
        if vol.low_max > vol.mid_max {
            return Err(invalid(
                "volatility_buffer.bands_abs_pct.low_max",
                "must be <= mid_max",
            ));
        }
        if self.momentum.stress_max_ratio > self.momentum.bull_min_ratio {
            return Err(invalid(
                "momentum.stress_max_ratio",
                "must be <= bull_min_ratio",
            ));
        }

        let scales = self.momentum.strength_scales;
        if !(scales.bull_denominator > 0.0) {
            return Err(invalid(
                "momentum.strength_scales.bull_denominator",
                "must be greater than 0",
            ));
        }
        if !(scales.stress_denominator > 0.0) {
            return Err(invalid(
                "momentum.strength_scales.stress_denominator",
                "must be greater than 0",
            ));
        }
        non_negative(
            "momentum.neutral_zone.max_shift",
            self.momentum.neutral_zone.max_shift,
        )?;
        non_negative(
            "momentum.neutral_zone.base_penalty_factor",
            self.momentum.neutral_zone.base_penalty_factor,
        )?;

        let norm = self.normalization;
        if !(norm.cap_total_probability > 0.0) || !norm.cap_total_probability.is_finite() {
            return Err(invalid(
                "normalization.cap_total_probability",
                "must be a positive number",
            ));
        }
        if norm.round_digits > MAX_ROUND_DIGITS {
            return Err(invalid(
                "normalization.round_digits",
                &format!("must be <= {MAX_ROUND_DIGITS}"),
            ));
        }

        Ok(())
    }

    fn validate_allocations(&self) -> Result<(), RulesError> {
        let liq = &self.liquidity.allocations;
        let mom = &self.momentum.allocations;
        let conc = &self.onchain_concentration.allocations;
        let vol = &self.volatility_buffer.allocations;

        let allocations = [
            ("liquidity.allocations.hard_stress_trigger", liq.hard_stress_trigger),
            ("liquidity.allocations.healthy", liq.healthy),
            ("liquidity.allocations.neutral", liq.neutral),
            ("liquidity.allocations.fragile", liq.fragile),
            ("liquidity.allocations.fallback", liq.fallback),
            ("momentum.allocations.neutral", mom.neutral),
            ("momentum.allocations.fallback", mom.fallback),
            ("onchain_concentration.allocations.diamond_hands", conc.diamond_hands),
            ("onchain_concentration.allocations.whale_exit_risk", conc.whale_exit_risk),
            ("onchain_concentration.allocations.unknown", conc.unknown),
            ("volatility_buffer.allocations.low", vol.low),
            ("volatility_buffer.allocations.mid", vol.mid),
            ("volatility_buffer.allocations.high", vol.high),
            ("volatility_buffer.allocations.fallback", vol.fallback),
        ];
        for (path, allocation) in allocations {
            for scenario in Scenario::ALL {
                let field = format!("{path}.{}", scenario.as_str().to_lowercase());
                non_negative(&field, allocation.get(scenario))?;
            }
        }

        for (name, value) in mom.bull_trend.components() {
            non_negative(&format!("momentum.allocations.bull_trend.{name}"), value)?;
        }
        for (name, value) in mom.stress_trend.components() {
            non_negative(&format!("momentum.allocations.stress_trend.{name}"), value)?;
        }
        Ok(())
    }

    /// Momentum bands move mass between scenarios; no band may push any
    /// scenario below zero anywhere in its strength or lean range.
    fn validate_momentum_reach(&self) -> Result<(), RulesError> {
        let mom = &self.momentum.allocations;
        let bull = mom.bull_trend;
        let stress = mom.stress_trend;

        let drains = [
            (
                "momentum.allocations.bull_trend.base_penalty",
                bull.base_penalty,
                "base_base",
                bull.base_base,
            ),
            (
                "momentum.allocations.bull_trend.stress_penalty",
                bull.stress_penalty,
                "stress_base",
                bull.stress_base,
            ),
            (
                "momentum.allocations.stress_trend.base_penalty",
                stress.base_penalty,
                "base_base",
                stress.base_base,
            ),
            (
                "momentum.allocations.stress_trend.bull_penalty",
                stress.bull_penalty,
                "bull_base",
                stress.bull_base,
            ),
        ];
        for (field, penalty, base_name, base) in drains {
            if penalty > base {
                return Err(invalid(field, &format!("must be <= {base_name}")));
            }
        }

        let zone = self.momentum.neutral_zone;
        let neutral = mom.neutral;
        let floors = [
            ("momentum.allocations.neutral.bull", neutral.bull, zone.max_shift),
            ("momentum.allocations.neutral.stress", neutral.stress, zone.max_shift),
            (
                "momentum.allocations.neutral.base",
                neutral.base,
                zone.max_shift * zone.base_penalty_factor,
            ),
        ];
        for (field, value, floor) in floors {
            if value < floor {
                return Err(invalid(
                    field,
                    &format!("must be >= {floor} to absorb the neutral-zone shift"),
                ));
            }
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> RulesError {
    RulesError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn finite(field: &str, value: f64) -> Result<(), RulesError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must be a finite number"))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), RulesError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(invalid(field, "must be non-negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &str = include_str!("../../../config/scenario_rules.json");

    #[test]
    fn bundled_rules_are_valid() {
        let rules = ScenarioRules::from_json_str(RULES).unwrap();
        assert!((rules.weights.total() - 1.0).abs() <= WEIGHTS_EPSILON);
        assert_eq!(rules.normalization.correction_target, Scenario::Base);
        assert_eq!(rules.momentum.neutral_zone, NeutralZone::default());
    }

    fn edit(f: impl FnOnce(&mut serde_json::Value)) -> Result<ScenarioRules, RulesError> {
        let mut doc: serde_json::Value = serde_json::from_str(RULES).unwrap();
        f(&mut doc);
        ScenarioRules::from_json_str(&doc.to_string())
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let err = edit(|d| d["weights"]["buy_sell_momentum"] = 0.3.into()).unwrap_err();
        assert!(matches!(err, RulesError::WeightsSum { .. }));
    }

    #[test]
    fn rejects_negative_allocation() {
        let err = edit(|d| d["liquidity"]["allocations"]["healthy"]["stress"] = (-0.1).into())
            .unwrap_err();
        match err {
            RulesError::InvalidValue { field, .. } => {
                assert_eq!(field, "liquidity.allocations.healthy.stress");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_inverted_bands() {
        let err = edit(|d| d["liquidity"]["liq_fdv_bands"]["neutral_min"] = 0.5.into())
            .unwrap_err();
        assert!(matches!(err, RulesError::InvalidValue { .. }));

        let err = edit(|d| d["momentum"]["stress_max_ratio"] = 3.0.into()).unwrap_err();
        assert!(matches!(err, RulesError::InvalidValue { .. }));
    }

    #[test]
    fn rejects_zero_strength_denominator() {
        let err = edit(|d| d["momentum"]["strength_scales"]["stress_denominator"] = 0.0.into())
            .unwrap_err();
        assert!(err.to_string().contains("stress_denominator"));
    }

    #[test]
    fn missing_section_is_a_parse_error() {
        let err = edit(|d| {
            d.as_object_mut().unwrap().remove("momentum");
        })
        .unwrap_err();
        assert!(matches!(err, RulesError::Parse(_)));
    }

    #[test]
    fn normalization_defaults_apply() {
        let rules = edit(|d| {
            d.as_object_mut().unwrap().remove("normalization");
        })
        .unwrap();
        assert_eq!(rules.normalization, NormalizationRules::default());
    }

    fn field_of(err: RulesError) -> String {
        match err {
            RulesError::InvalidValue { field, .. } => field,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_trend_penalty_larger_than_its_base() {
        let err = edit(|d| {
            let trend = &mut d["momentum"]["allocations"]["stress_trend"];
            trend["bull_base"] = 0.0.into();
            trend["bull_penalty"] = 0.05.into();
        })
        .unwrap_err();
        assert_eq!(field_of(err), "momentum.allocations.stress_trend.bull_penalty");

        let err = edit(|d| d["momentum"]["allocations"]["bull_trend"]["base_penalty"] = 0.2.into())
            .unwrap_err();
        assert_eq!(field_of(err), "momentum.allocations.bull_trend.base_penalty");

        let err =
            edit(|d| d["momentum"]["allocations"]["bull_trend"]["stress_penalty"] = 0.06.into())
                .unwrap_err();
        assert_eq!(field_of(err), "momentum.allocations.bull_trend.stress_penalty");

        let err =
            edit(|d| d["momentum"]["allocations"]["stress_trend"]["base_penalty"] = 0.11.into())
                .unwrap_err();
        assert_eq!(field_of(err), "momentum.allocations.stress_trend.base_penalty");
    }

    #[test]
    fn penalty_equal_to_base_is_accepted() {
        let rules = edit(|d| {
            let trend = &mut d["momentum"]["allocations"]["stress_trend"];
            trend["bull_base"] = 0.05.into();
            trend["bull_penalty"] = 0.05.into();
        })
        .unwrap();
        assert_eq!(rules.momentum.allocations.stress_trend.at(1.0).bull, 0.0);
    }

    #[test]
    fn rejects_neutral_allocation_below_the_zone_shift() {
        let err = edit(|d| d["momentum"]["allocations"]["neutral"]["base"] = 0.0.into())
            .unwrap_err();
        assert_eq!(field_of(err), "momentum.allocations.neutral.base");

        let err = edit(|d| d["momentum"]["allocations"]["neutral"]["bull"] = 0.03.into())
            .unwrap_err();
        assert_eq!(field_of(err), "momentum.allocations.neutral.bull");

        let err = edit(|d| d["momentum"]["allocations"]["neutral"]["stress"] = 0.01.into())
            .unwrap_err();
        assert_eq!(field_of(err), "momentum.allocations.neutral.stress");
    }

    #[test]
    fn narrower_zone_relaxes_the_neutral_floor() {
        let rules = edit(|d| {
            d["momentum"]["allocations"]["neutral"]["bull"] = 0.01.into();
            d["momentum"]["neutral_zone"]["max_shift"] = 0.01.into();
        })
        .unwrap();
        assert_eq!(rules.momentum.neutral_zone.max_shift, 0.01);
    }
}

//! Rule-driven scenario scorer.
//!
//! Four independent dimensions each pick a band and contribute that band's
//! `{bull, base, stress}` allocation. The contributions are summed and then
//! normalized to the configured target sum. Scoring is pure: the same inputs
//! and rules always yield bit-identical probabilities.

use crate::domain::numeric::{clamp, round_to};
use crate::domain::rules::{
    ConcentrationRules, LiquidityRules, MomentumRules, NormalizationRules, ScenarioRules,
    VolatilityRules,
};
use crate::domain::{
    Allocation, Contribution, Dimension, ScenarioInputs, ScenarioProbabilities, ScoreBreakdown,
};

/// Fixed prior used when the summed allocations carry no mass.
pub const UNIFORM_PRIOR: ScenarioProbabilities = ScenarioProbabilities {
    bull: 0.33,
    base: 0.34,
    stress: 0.33,
};

/// Scores scenario inputs against a validated rule set.
#[derive(Debug, Clone)]
pub struct ScenarioScorer {
    rules: ScenarioRules,
}

impl ScenarioScorer {
    /// Create a scorer. The rules are expected to be validated already.
    #[must_use]
    pub const fn new(rules: ScenarioRules) -> Self {
        Self { rules }
    }

    #[must_use]
    pub const fn rules(&self) -> &ScenarioRules {
        &self.rules
    }

    /// Normalized scenario probabilities for `inputs`.
    #[must_use]
    pub fn score(&self, inputs: &ScenarioInputs) -> ScenarioProbabilities {
        self.breakdown(inputs).probabilities
    }

    /// Score `inputs`, keeping every dimension's contribution.
    #[must_use]
    pub fn breakdown(&self, inputs: &ScenarioInputs) -> ScoreBreakdown {
        let finite = |v: Option<f64>| v.filter(|x| x.is_finite());

        let contributions = vec![
            liquidity(
                &self.rules.liquidity,
                finite(inputs.liq_fdv_ratio),
                finite(inputs.liquidity_change_24h),
            ),
            momentum(&self.rules.momentum, finite(inputs.buy_sell_ratio_24h)),
            concentration(
                &self.rules.onchain_concentration,
                finite(inputs.top10_holder_pct),
            ),
            volatility(
                &self.rules.volatility_buffer,
                finite(inputs.price_change_24h_pct),
            ),
        ];

        let raw = contributions
            .iter()
            .fold(Allocation::default(), |acc, c| acc + c.allocation);
        let probabilities = normalize(raw, &self.rules.normalization);

        ScoreBreakdown {
            contributions,
            raw,
            probabilities,
        }
    }
}

fn contribution(dimension: Dimension, band: &'static str, allocation: Allocation) -> Contribution {
    Contribution {
        dimension,
        band,
        allocation,
    }
}

/// Liquidity resilience; a hard liquidity drop overrides the ratio bands.
fn liquidity(rules: &LiquidityRules, ratio: Option<f64>, change_24h: Option<f64>) -> Contribution {
    let alloc = &rules.allocations;
    let dim = Dimension::Liquidity;

    if change_24h.is_some_and(|c| c <= rules.stress_drop_24h_threshold) {
        return contribution(dim, "hard_stress_trigger", alloc.hard_stress_trigger);
    }
    match ratio {
        None => contribution(dim, "fallback", alloc.fallback),
        Some(r) if r >= rules.liq_fdv_bands.healthy_min => contribution(dim, "healthy", alloc.healthy),
        Some(r) if r >= rules.liq_fdv_bands.neutral_min => contribution(dim, "neutral", alloc.neutral),
        Some(_) => contribution(dim, "fragile", alloc.fragile),
    }
}

/// Buy/sell momentum with strength blending outside the neutral zone.
fn momentum(rules: &MomentumRules, ratio: Option<f64>) -> Contribution {
    let alloc = &rules.allocations;
    let dim = Dimension::Momentum;
    let bull_min = rules.bull_min_ratio;
    let stress_max = rules.stress_max_ratio;

    let Some(r) = ratio else {
        return contribution(dim, "fallback", alloc.fallback);
    };

    if r > bull_min {
        let strength = clamp((r - bull_min) / rules.strength_scales.bull_denominator, 0.0, 1.0);
        return contribution(dim, "bull_trend", alloc.bull_trend.at(strength));
    }
    if r < stress_max {
        let strength = clamp(
            (stress_max - r) / rules.strength_scales.stress_denominator,
            0.0,
            1.0,
        );
        return contribution(dim, "stress_trend", alloc.stress_trend.at(strength));
    }

    // Lean is -1 at stress_max, +1 at bull_min.
    let midpoint = (stress_max + bull_min) / 2.0;
    let half_range = (bull_min - stress_max) / 2.0;
    let lean = if half_range > 0.0 {
        clamp((r - midpoint) / half_range, -1.0, 1.0)
    } else {
        0.0
    };
    let zone = rules.neutral_zone;
    let shift = lean * zone.max_shift;
    let n = alloc.neutral;
    contribution(
        dim,
        "neutral",
        Allocation::new(
            n.bull + shift,
            n.base - shift.abs() * zone.base_penalty_factor,
            n.stress - shift,
        ),
    )
}

/// High concentration reads as conviction, low as whale exit risk.
fn concentration(rules: &ConcentrationRules, top10_pct: Option<f64>) -> Contribution {
    let alloc = &rules.allocations;
    let dim = Dimension::Concentration;
    match top10_pct {
        None => contribution(dim, "unknown", alloc.unknown),
        Some(p) if p > rules.diamond_hands_threshold_pct => {
            contribution(dim, "diamond_hands", alloc.diamond_hands)
        }
        Some(_) => contribution(dim, "whale_exit_risk", alloc.whale_exit_risk),
    }
}

fn volatility(rules: &VolatilityRules, price_change_pct: Option<f64>) -> Contribution {
    let alloc = &rules.allocations;
    let dim = Dimension::Volatility;
    match price_change_pct.map(f64::abs) {
        None => contribution(dim, "fallback", alloc.fallback),
        Some(v) if v <= rules.bands_abs_pct.low_max => contribution(dim, "low", alloc.low),
        Some(v) if v <= rules.bands_abs_pct.mid_max => contribution(dim, "mid", alloc.mid),
        Some(_) => contribution(dim, "high", alloc.high),
    }
}

/// Scale `raw` to the target sum, round, and move the rounding residual
/// onto the correction target.
///
/// The residual step always runs, so the output depends only on the inputs.
#[must_use]
pub fn normalize(raw: Allocation, rules: &NormalizationRules) -> ScenarioProbabilities {
    let target = rules.cap_total_probability;
    let digits = rules.round_digits;
    let total = raw.total();

    let unrounded = if total > 0.0 && total.is_finite() {
        ScenarioProbabilities::new(
            raw.bull / total * target,
            raw.base / total * target,
            raw.stress / total * target,
        )
    } else {
        ScenarioProbabilities::new(
            UNIFORM_PRIOR.bull * target,
            UNIFORM_PRIOR.base * target,
            UNIFORM_PRIOR.stress * target,
        )
    };

    let mut probs = ScenarioProbabilities::new(
        round_to(unrounded.bull, digits),
        round_to(unrounded.base, digits),
        round_to(unrounded.stress, digits),
    );
    let residual = target - round_to(probs.sum(), digits);
    let corrected = round_to(probs.get(rules.correction_target) + residual, digits);
    probs.set(rules.correction_target, corrected);
    probs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Scenario;

    fn norm(target: f64, digits: u32, correction_target: Scenario) -> NormalizationRules {
        NormalizationRules {
            cap_total_probability: target,
            round_digits: digits,
            correction_target,
        }
    }

    #[test]
    fn zero_mass_returns_uniform_prior() {
        let probs = normalize(Allocation::default(), &NormalizationRules::default());
        assert_eq!(probs, UNIFORM_PRIOR);
    }

    #[test]
    fn zero_mass_prior_scales_with_target() {
        let probs = normalize(Allocation::default(), &norm(100.0, 2, Scenario::Base));
        assert_eq!(probs, ScenarioProbabilities::new(33.0, 34.0, 33.0));
    }

    #[test]
    fn residual_goes_to_correction_target() {
        // Thirds round to 0.3333 each; the missing 0.0001 lands on Stress.
        let raw = Allocation::new(1.0, 1.0, 1.0);
        let probs = normalize(raw, &norm(1.0, 4, Scenario::Stress));
        assert_eq!(probs.bull, 0.3333);
        assert_eq!(probs.base, 0.3333);
        assert_eq!(probs.stress, 0.3334);
    }

    #[test]
    fn negative_total_uses_prior() {
        let probs = normalize(Allocation::new(-0.1, 0.0, 0.0), &NormalizationRules::default());
        assert_eq!(probs, UNIFORM_PRIOR);
    }
}

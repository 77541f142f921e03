//! Scenario rule set.
//!
//! Every band carries an [`Allocation`]; thresholds delimit the bands. The
//! rule set is plain data: the scorer reads it, loading and validation live
//! with the rest of the configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::scenario::{Allocation, Scenario};

/// Relative weight of each dimension, recorded with the model metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub liquidity_resilience: f64,
    pub buy_sell_momentum: f64,
    pub onchain_concentration: f64,
    pub narrative_volatility_buffer: f64,
}

impl Weights {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.liquidity_resilience
            + self.buy_sell_momentum
            + self.onchain_concentration
            + self.narrative_volatility_buffer
    }

    /// Weights keyed by dimension name.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        BTreeMap::from([
            ("liquidity_resilience".to_string(), self.liquidity_resilience),
            ("buy_sell_momentum".to_string(), self.buy_sell_momentum),
            ("onchain_concentration".to_string(), self.onchain_concentration),
            (
                "narrative_volatility_buffer".to_string(),
                self.narrative_volatility_buffer,
            ),
        ])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiqFdvBands {
    pub healthy_min: f64,
    pub neutral_min: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiquidityAllocations {
    pub hard_stress_trigger: Allocation,
    pub healthy: Allocation,
    pub neutral: Allocation,
    pub fragile: Allocation,
    pub fallback: Allocation,
}

/// Liquidity resilience dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiquidityRules {
    /// A 24h liquidity change at or below this fraction triggers hard stress.
    pub stress_drop_24h_threshold: f64,
    pub liq_fdv_bands: LiqFdvBands,
    pub allocations: LiquidityAllocations,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrengthScales {
    pub bull_denominator: f64,
    pub stress_denominator: f64,
}

/// Allocation that blends toward Bull as the buy pressure strengthens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BullTrend {
    #[serde(default)]
    pub bull_base: f64,
    #[serde(default)]
    pub bull_bonus: f64,
    #[serde(default)]
    pub base_base: f64,
    #[serde(default)]
    pub base_penalty: f64,
    #[serde(default)]
    pub stress_base: f64,
    #[serde(default)]
    pub stress_penalty: f64,
}

impl BullTrend {
    /// Allocation at `strength` in `[0, 1]`.
    #[must_use]
    pub fn at(&self, strength: f64) -> Allocation {
        Allocation::new(
            self.bull_base + self.bull_bonus * strength,
            self.base_base - self.base_penalty * strength,
            self.stress_base - self.stress_penalty * strength,
        )
    }

    /// Named coefficients, in document order.
    #[must_use]
    pub fn components(&self) -> [(&'static str, f64); 6] {
        [
            ("bull_base", self.bull_base),
            ("bull_bonus", self.bull_bonus),
            ("base_base", self.base_base),
            ("base_penalty", self.base_penalty),
            ("stress_base", self.stress_base),
            ("stress_penalty", self.stress_penalty),
        ]
    }
}

/// Allocation that blends toward Stress as the sell pressure strengthens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StressTrend {
    #[serde(default)]
    pub stress_base: f64,
    #[serde(default)]
    pub stress_bonus: f64,
    #[serde(default)]
    pub base_base: f64,
    #[serde(default)]
    pub base_penalty: f64,
    #[serde(default)]
    pub bull_base: f64,
    #[serde(default)]
    pub bull_penalty: f64,
}

impl StressTrend {
    /// Allocation at `strength` in `[0, 1]`.
    #[must_use]
    pub fn at(&self, strength: f64) -> Allocation {
        Allocation::new(
            self.bull_base - self.bull_penalty * strength,
            self.base_base - self.base_penalty * strength,
            self.stress_base + self.stress_bonus * strength,
        )
    }

    /// Named coefficients, in document order.
    #[must_use]
    pub fn components(&self) -> [(&'static str, f64); 6] {
        [
            ("stress_base", self.stress_base),
            ("stress_bonus", self.stress_bonus),
            ("base_base", self.base_base),
            ("base_penalty", self.base_penalty),
            ("bull_base", self.bull_base),
            ("bull_penalty", self.bull_penalty),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentumAllocations {
    pub bull_trend: BullTrend,
    pub stress_trend: StressTrend,
    pub neutral: Allocation,
    pub fallback: Allocation,
}

/// Neutral-zone interpolation coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeutralZone {
    /// Largest probability mass moved between Bull and Stress.
    #[serde(default = "default_max_shift")]
    pub max_shift: f64,
    /// Share of the absolute shift taken from Base.
    #[serde(default = "default_base_penalty_factor")]
    pub base_penalty_factor: f64,
}

const fn default_max_shift() -> f64 {
    0.04
}

const fn default_base_penalty_factor() -> f64 {
    0.5
}

impl Default for NeutralZone {
    fn default() -> Self {
        Self {
            max_shift: default_max_shift(),
            base_penalty_factor: default_base_penalty_factor(),
        }
    }
}

/// Buy/sell momentum dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentumRules {
    pub bull_min_ratio: f64,
    pub stress_max_ratio: f64,
    pub strength_scales: StrengthScales,
    pub allocations: MomentumAllocations,
    #[serde(default)]
    pub neutral_zone: NeutralZone,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationAllocations {
    pub diamond_hands: Allocation,
    pub whale_exit_risk: Allocation,
    pub unknown: Allocation,
}

/// On-chain concentration dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationRules {
    pub diamond_hands_threshold_pct: f64,
    pub allocations: ConcentrationAllocations,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityBands {
    pub low_max: f64,
    pub mid_max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityAllocations {
    pub low: Allocation,
    pub mid: Allocation,
    pub high: Allocation,
    pub fallback: Allocation,
}

/// Narrative volatility buffer dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityRules {
    pub bands_abs_pct: VolatilityBands,
    pub allocations: VolatilityAllocations,
}

/// Final normalization of the summed allocations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizationRules {
    /// Target sum of the emitted probabilities.
    #[serde(default = "default_cap_total_probability")]
    pub cap_total_probability: f64,
    #[serde(default = "default_round_digits")]
    pub round_digits: u32,
    /// Scenario absorbing the rounding residual.
    #[serde(default)]
    pub correction_target: Scenario,
}

const fn default_cap_total_probability() -> f64 {
    1.0
}

const fn default_round_digits() -> u32 {
    4
}

impl Default for NormalizationRules {
    fn default() -> Self {
        Self {
            cap_total_probability: default_cap_total_probability(),
            round_digits: default_round_digits(),
            correction_target: Scenario::Base,
        }
    }
}

/// Complete, versioned scenario rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRules {
    /// Path the rule author declares as canonical.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules_source: Option<String>,
    pub weights: Weights,
    pub liquidity: LiquidityRules,
    pub momentum: MomentumRules,
    pub onchain_concentration: ConcentrationRules,
    pub volatility_buffer: VolatilityRules,
    #[serde(default)]
    pub normalization: NormalizationRules,
}

impl ScenarioRules {
    /// Where these rules came from, as recorded in the snapshot model info.
    #[must_use]
    pub fn source_label<'a>(&'a self, loaded_from: &'a str) -> &'a str {
        self.rules_source.as_deref().unwrap_or(loaded_from)
    }
}

//! Scenario regimes, allocation triples and normalized probabilities.

use std::fmt;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// One of three mutually exclusive market regimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Scenario {
    Bull,
    #[default]
    Base,
    Stress,
}

impl Scenario {
    pub const ALL: [Self; 3] = [Self::Bull, Self::Base, Self::Stress];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bull => "Bull",
            Self::Base => "Base",
            Self::Stress => "Stress",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `{bull, base, stress}` weight triple contributed by one band.
///
/// Components are non-negative in a valid rule set but need not sum to one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    #[serde(default)]
    pub bull: f64,
    #[serde(default)]
    pub base: f64,
    #[serde(default)]
    pub stress: f64,
}

impl Allocation {
    #[must_use]
    pub const fn new(bull: f64, base: f64, stress: f64) -> Self {
        Self { bull, base, stress }
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.bull + self.base + self.stress
    }

    #[must_use]
    pub const fn get(&self, scenario: Scenario) -> f64 {
        match scenario {
            Scenario::Bull => self.bull,
            Scenario::Base => self.base,
            Scenario::Stress => self.stress,
        }
    }
}

impl Add for Allocation {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.bull + rhs.bull,
            self.base + rhs.base,
            self.stress + rhs.stress,
        )
    }
}

impl AddAssign for Allocation {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Normalized scenario probabilities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioProbabilities {
    #[serde(rename = "Bull")]
    pub bull: f64,
    #[serde(rename = "Base")]
    pub base: f64,
    #[serde(rename = "Stress")]
    pub stress: f64,
}

impl ScenarioProbabilities {
    #[must_use]
    pub const fn new(bull: f64, base: f64, stress: f64) -> Self {
        Self { bull, base, stress }
    }

    #[must_use]
    pub const fn get(&self, scenario: Scenario) -> f64 {
        match scenario {
            Scenario::Bull => self.bull,
            Scenario::Base => self.base,
            Scenario::Stress => self.stress,
        }
    }

    pub fn set(&mut self, scenario: Scenario, value: f64) {
        match scenario {
            Scenario::Bull => self.bull = value,
            Scenario::Base => self.base = value,
            Scenario::Stress => self.stress = value,
        }
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.bull + self.base + self.stress
    }

    /// Scenario with the highest probability; ties resolve toward Base.
    #[must_use]
    pub fn dominant(&self) -> Scenario {
        let mut best = Scenario::Base;
        for scenario in [Scenario::Bull, Scenario::Stress] {
            if self.get(scenario) > self.get(best) {
                best = scenario;
            }
        }
        best
    }
}

impl From<Allocation> for ScenarioProbabilities {
    fn from(a: Allocation) -> Self {
        Self::new(a.bull, a.base, a.stress)
    }
}

/// Signals consumed by the scenario scorer. Any of them may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInputs {
    pub liq_fdv_ratio: Option<f64>,
    pub liquidity_change_24h: Option<f64>,
    pub buy_sell_ratio_24h: Option<f64>,
    pub top10_holder_pct: Option<f64>,
    pub price_change_24h_pct: Option<f64>,
}

/// Signal category contributing to the scenario allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Liquidity,
    Momentum,
    Concentration,
    Volatility,
}

impl Dimension {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Liquidity => "liquidity",
            Self::Momentum => "momentum",
            Self::Concentration => "concentration",
            Self::Volatility => "volatility",
        }
    }
}

/// The band one dimension selected and what it added.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contribution {
    pub dimension: Dimension,
    pub band: &'static str,
    pub allocation: Allocation,
}

/// Per-dimension contributions together with the final probabilities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub contributions: Vec<Contribution>,
    pub raw: Allocation,
    pub probabilities: ScenarioProbabilities,
}

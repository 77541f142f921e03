//! Concentration provenance and the closed-form proxy formulas.
//!
//! A [`ConcentrationResult`] always carries the [`SourceId`] that produced
//! it. Whether the value is a proxy is derived from the source, so a result
//! can never claim to be observed while coming from a formula.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::numeric::{clamp, round_to};

/// Lower clamp shared by both proxy formulas.
pub const PROXY_FLOOR_PCT: f64 = 55.0;
/// Upper clamp of the liquidity/FDV heuristic.
pub const HEURISTIC_CAP_PCT: f64 = 99.0;
/// Upper clamp of the holder-trend enhanced proxy.
pub const ENHANCED_CAP_PCT: f64 = 98.5;
/// Holder count treated as "normal" dispersion by the enhanced proxy.
pub const HOLDER_BASELINE: f64 = 500_000.0;
const HOLDER_DISPERSION_SCALE: f64 = 200_000.0;
const HEURISTIC_LIQUIDITY_MULTIPLIER: f64 = 1.5;
const TREND_MULTIPLIER: f64 = 50.0;

/// Ranked strategy in the resolver's fallback chain, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Realtime data from a privileged local tool.
    Privileged,
    /// Exact computation from a paid holder-list API.
    Authoritative,
    /// Heuristic adjusted by aggregate holder statistics.
    TrendProxy,
    /// Pure liquidity/FDV heuristic, no holder data.
    HeuristicProxy,
}

impl Tier {
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Privileged => 0,
            Self::Authoritative => 1,
            Self::TrendProxy => 2,
            Self::HeuristicProxy => 3,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Privileged => "privileged",
            Self::Authoritative => "authoritative",
            Self::TrendProxy => "trend-proxy",
            Self::HeuristicProxy => "heuristic-proxy",
        };
        write!(f, "tier {} ({name})", self.rank())
    }
}

/// Provenance of a concentration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceId {
    BitgetWallet,
    SolscanPro,
    Birdeye,
    MoralisEnhancedProxy,
    HeuristicProxy,
}

impl SourceId {
    /// Stable identifier written into snapshots.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BitgetWallet => "bitget-wallet",
            Self::SolscanPro => "solscan-pro",
            Self::Birdeye => "birdeye",
            Self::MoralisEnhancedProxy => "moralis-enhanced-proxy",
            Self::HeuristicProxy => "heuristic-proxy",
        }
    }

    #[must_use]
    pub const fn tier(self) -> Tier {
        match self {
            Self::BitgetWallet => Tier::Privileged,
            Self::SolscanPro | Self::Birdeye => Tier::Authoritative,
            Self::MoralisEnhancedProxy => Tier::TrendProxy,
            Self::HeuristicProxy => Tier::HeuristicProxy,
        }
    }

    #[must_use]
    pub const fn is_proxy(self) -> bool {
        matches!(self, Self::MoralisEnhancedProxy | Self::HeuristicProxy)
    }

    /// Prefix for degradation flags raised while trying this source.
    #[must_use]
    pub const fn flag_prefix(self) -> &'static str {
        match self {
            Self::BitgetWallet => "bitget_wallet",
            Self::SolscanPro => "solscan_pro",
            Self::Birdeye => "birdeye",
            Self::MoralisEnhancedProxy => "moralis_stats",
            Self::HeuristicProxy => "heuristic_proxy",
        }
    }

    /// Flag announcing that a proxy source produced the final value.
    #[must_use]
    pub const fn proxy_flag(self) -> Option<&'static str> {
        match self {
            Self::MoralisEnhancedProxy => Some("using_moralis_enhanced_proxy"),
            Self::HeuristicProxy => Some("using_heuristic_proxy"),
            _ => None,
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved top-10 holder concentration with provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConcentrationResult {
    top10_pct: Option<f64>,
    source: SourceId,
    is_proxy: bool,
    flags: Vec<String>,
}

impl ConcentrationResult {
    /// Build a result; the proxy marker follows from `source`.
    #[must_use]
    pub fn new(source: SourceId, top10_pct: Option<f64>, flags: Vec<String>) -> Self {
        Self {
            top10_pct,
            source,
            is_proxy: source.is_proxy(),
            flags,
        }
    }

    #[must_use]
    pub const fn top10_pct(&self) -> Option<f64> {
        self.top10_pct
    }

    #[must_use]
    pub const fn source(&self) -> SourceId {
        self.source
    }

    #[must_use]
    pub const fn is_proxy(&self) -> bool {
        self.is_proxy
    }

    /// Degradation flags in the order they were raised.
    #[must_use]
    pub fn flags(&self) -> &[String] {
        &self.flags
    }
}

/// Liquidity/FDV heuristic: `100 - (liquidity / fdv) * 100 * 1.5`, clamped
/// to `[55, 99]`.
///
/// Absent when either input is missing or FDV is zero.
#[must_use]
pub fn heuristic_proxy(liquidity_usd: Option<f64>, fdv_usd: Option<f64>) -> Option<f64> {
    let liquidity = liquidity_usd?;
    let fdv = fdv_usd.filter(|f| *f != 0.0)?;

    let raw = 100.0 - (liquidity / fdv) * 100.0 * HEURISTIC_LIQUIDITY_MULTIPLIER;
    if !raw.is_finite() {
        return None;
    }
    Some(round_to(
        clamp(raw, PROXY_FLOOR_PCT, HEURISTIC_CAP_PCT),
        4,
    ))
}

/// Heuristic proxy perturbed by holder dispersion and the 24h holder trend,
/// clamped to `[55, 98.5]`.
///
/// Fewer holders than [`HOLDER_BASELINE`] and a shrinking holder base both
/// raise the estimate. A missing 24h change counts as zero.
#[must_use]
pub fn enhanced_proxy(base_proxy: f64, total_holders: f64, change_pct_24h: Option<f64>) -> f64 {
    let dispersion = clamp(
        (HOLDER_BASELINE - total_holders) / HOLDER_DISPERSION_SCALE,
        -2.0,
        2.0,
    );
    let trend = clamp(-change_pct_24h.unwrap_or(0.0) * TREND_MULTIPLIER, -1.0, 1.0);

    round_to(
        clamp(
            base_proxy + dispersion + trend,
            PROXY_FLOOR_PCT,
            ENHANCED_CAP_PCT,
        ),
        4,
    )
}

/// Normalize a privileged-tool reading to percent.
///
/// Values below 1.0 are read as fractions and scaled by 100. A genuine
/// sub-1% concentration is therefore misread as a fraction; the threshold is
/// kept because the tool reports fractions for all realistic tokens.
#[must_use]
pub fn normalize_privileged_pct(value: f64) -> f64 {
    let pct = if value < 1.0 { value * 100.0 } else { value };
    round_to(pct, 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_matches_worked_example() {
        assert_eq!(heuristic_proxy(Some(500_000.0), Some(10_000_000.0)), Some(92.5));
    }

    #[test]
    fn heuristic_clamps_to_floor_and_cap() {
        assert_eq!(heuristic_proxy(Some(9_000_000.0), Some(10_000_000.0)), Some(55.0));
        assert_eq!(heuristic_proxy(Some(0.0), Some(10_000_000.0)), Some(99.0));
    }

    #[test]
    fn heuristic_absent_without_inputs() {
        assert_eq!(heuristic_proxy(None, Some(1.0)), None);
        assert_eq!(heuristic_proxy(Some(1.0), None), None);
        assert_eq!(heuristic_proxy(Some(1.0), Some(0.0)), None);
    }

    #[test]
    fn enhanced_proxy_applies_bounded_adjustments() {
        // 300k holders -> +1.0 dispersion, -1% holders -> +0.5 trend.
        assert_eq!(enhanced_proxy(90.0, 300_000.0, Some(-0.01)), 91.5);
        // Adjustments saturate at +2 and +1.
        assert_eq!(enhanced_proxy(90.0, 0.0, Some(-1.0)), 93.0);
        // Broad, growing holder base lowers the estimate.
        assert_eq!(enhanced_proxy(90.0, 2_000_000.0, Some(0.5)), 87.0);
    }

    #[test]
    fn enhanced_proxy_caps_below_heuristic_cap() {
        assert_eq!(enhanced_proxy(99.0, 0.0, Some(-1.0)), ENHANCED_CAP_PCT);
        assert_eq!(enhanced_proxy(55.0, 2_000_000.0, Some(1.0)), PROXY_FLOOR_PCT);
    }

    #[test]
    fn enhanced_proxy_treats_missing_trend_as_flat() {
        assert_eq!(enhanced_proxy(90.0, HOLDER_BASELINE, None), 90.0);
    }

    #[test]
    fn privileged_fraction_is_rescaled() {
        assert_eq!(normalize_privileged_pct(0.9137), 91.37);
        assert_eq!(normalize_privileged_pct(91.37), 91.37);
        assert_eq!(normalize_privileged_pct(1.0), 1.0);
    }

    #[test]
    fn proxy_marker_follows_source() {
        let heuristic = ConcentrationResult::new(SourceId::HeuristicProxy, None, vec![]);
        assert!(heuristic.is_proxy());

        let exact = ConcentrationResult::new(SourceId::SolscanPro, Some(80.0), vec![]);
        assert!(!exact.is_proxy());
        assert_eq!(exact.source().tier(), Tier::Authoritative);
    }

    #[test]
    fn tiers_order_by_priority() {
        assert!(Tier::Privileged < Tier::Authoritative);
        assert!(Tier::Authoritative < Tier::TrendProxy);
        assert!(Tier::TrendProxy < Tier::HeuristicProxy);
    }

    #[test]
    fn source_ids_serialize_kebab_case() {
        let json = serde_json::to_string(&SourceId::MoralisEnhancedProxy).unwrap();
        assert_eq!(json, "\"moralis-enhanced-proxy\"");
        assert_eq!(SourceId::SolscanPro.to_string(), "solscan-pro");
    }
}

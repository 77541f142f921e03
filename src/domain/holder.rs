//! Top-holder records and the exact concentration computation.
//!
//! Providers return holder lists already ranked by balance. The computation
//! never re-sorts: the first [`TOP_HOLDER_COUNT`] entries are the top holders.

use serde::{Deserialize, Serialize};

use super::numeric::round_to;

/// Number of leading holders that make up the concentration metric.
pub const TOP_HOLDER_COUNT: usize = 10;

/// One ranked holder as reported by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolderRecord {
    /// Owner address, or the provider rank when no address is given.
    pub holder: String,
    /// Balance in raw (smallest-unit) token amounts.
    pub raw_amount: f64,
}

impl HolderRecord {
    pub fn new(holder: impl Into<String>, raw_amount: f64) -> Self {
        Self {
            holder: holder.into(),
            raw_amount,
        }
    }
}

/// Mint metadata needed to turn raw balances into percent-of-supply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplyMeta {
    pub decimals: Option<u32>,
    pub total_supply_raw: Option<f64>,
}

impl SupplyMeta {
    #[must_use]
    pub const fn new(decimals: Option<u32>, total_supply_raw: Option<f64>) -> Self {
        Self {
            decimals,
            total_supply_raw,
        }
    }

    /// Whether both fields are present and the supply is positive.
    #[must_use]
    pub fn is_computable(&self) -> bool {
        self.decimals.is_some() && self.total_supply_raw.is_some_and(|s| s > 0.0)
    }
}

/// Share of total supply held by the first ten holders, in percent.
///
/// Returns `None` when the supply is missing or zero, decimals are missing,
/// the scaled supply is not positive, or the result falls outside `[0, 100]`
/// (a provider reporting balances inconsistent with its own supply).
#[must_use]
pub fn compute_top10_pct(holders: &[HolderRecord], supply: &SupplyMeta) -> Option<f64> {
    let decimals = i32::try_from(supply.decimals?).ok()?;
    let total_supply = supply.total_supply_raw.filter(|s| *s != 0.0)?;

    let scale = 10f64.powi(decimals);
    let top_sum: f64 = holders
        .iter()
        .take(TOP_HOLDER_COUNT)
        .map(|h| h.raw_amount)
        .sum();

    let total_units = total_supply / scale;
    if !(total_units > 0.0) {
        return None;
    }

    let pct = round_to((top_sum / scale) / total_units * 100.0, 4);
    (0.0..=100.0).contains(&pct).then_some(pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holders(amounts: &[f64]) -> Vec<HolderRecord> {
        amounts
            .iter()
            .enumerate()
            .map(|(i, a)| HolderRecord::new(format!("rank-{}", i + 1), *a))
            .collect()
    }

    #[test]
    fn computes_share_of_supply() {
        let supply = SupplyMeta::new(Some(6), Some(1_000_000_000_000.0));
        let list = holders(&[400_000_000_000.0, 100_000_000_000.0]);

        assert_eq!(compute_top10_pct(&list, &supply), Some(50.0));
    }

    #[test]
    fn only_first_ten_holders_count() {
        let supply = SupplyMeta::new(Some(0), Some(1_000.0));
        let list = holders(&[10.0; 15]);

        assert_eq!(compute_top10_pct(&list, &supply), Some(10.0));
    }

    #[test]
    fn rounds_to_four_decimals() {
        let supply = SupplyMeta::new(Some(2), Some(300.0));
        let list = holders(&[100.0]);

        assert_eq!(compute_top10_pct(&list, &supply), Some(33.3333));
    }

    #[test]
    fn absent_without_supply_or_decimals() {
        let list = holders(&[1.0]);

        assert_eq!(compute_top10_pct(&list, &SupplyMeta::new(None, Some(10.0))), None);
        assert_eq!(compute_top10_pct(&list, &SupplyMeta::new(Some(6), None)), None);
        assert_eq!(compute_top10_pct(&list, &SupplyMeta::new(Some(6), Some(0.0))), None);
        assert_eq!(compute_top10_pct(&list, &SupplyMeta::new(Some(6), Some(-5.0))), None);
    }

    #[test]
    fn empty_holder_list_is_zero_percent() {
        let supply = SupplyMeta::new(Some(6), Some(1_000.0));
        assert_eq!(compute_top10_pct(&[], &supply), Some(0.0));
    }

    #[test]
    fn balances_exceeding_supply_are_not_computable() {
        let supply = SupplyMeta::new(Some(0), Some(100.0));
        let list = holders(&[90.0, 90.0]);

        assert_eq!(compute_top10_pct(&list, &supply), None);
    }

    #[test]
    fn supply_meta_computability() {
        assert!(SupplyMeta::new(Some(6), Some(1.0)).is_computable());
        assert!(!SupplyMeta::new(Some(6), Some(0.0)).is_computable());
        assert!(!SupplyMeta::new(None, Some(1.0)).is_computable());
        assert!(!SupplyMeta::default().is_computable());
    }
}

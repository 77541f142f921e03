//! Holder-list extraction strategies shared by the holder-list providers.
//!
//! Providers disagree on which field carries a holder's balance. Each
//! adapter declares the fields to try, in order; the first one that yields
//! a computable percentage wins.

use serde_json::Value;

use crate::adapter::outbound::json;
use crate::domain::{compute_top10_pct, HolderRecord, SupplyMeta, TOP_HOLDER_COUNT};

/// Field holding a holder's raw balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountField {
    Amount,
    Balance,
}

impl AmountField {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Balance => "balance",
        }
    }
}

/// Default strategy order for holder-list APIs.
pub const AMOUNT_THEN_BALANCE: &[AmountField] = &[AmountField::Amount, AmountField::Balance];

/// Holder list from an envelope: either `data` is the list or `data.items` is.
#[must_use]
pub fn holder_items(doc: &Value) -> &[Value] {
    match json::at(doc, &["data"]) {
        Some(Value::Array(items)) => items,
        _ => json::array_at(doc, &["data", "items"]),
    }
}

/// Records for the leading holders using `field`.
///
/// Entries without a readable amount are dropped. Returns `None` when no
/// leading entry carries the field at all, so the next strategy is tried.
#[must_use]
pub fn holder_records(items: &[Value], field: AmountField) -> Option<Vec<HolderRecord>> {
    let leading = &items[..items.len().min(TOP_HOLDER_COUNT)];
    let records: Vec<HolderRecord> = leading
        .iter()
        .enumerate()
        .filter_map(|(rank, item)| {
            let amount = item.get(field.key()).and_then(json::number)?;
            Some(HolderRecord::new(holder_label(item, rank), amount))
        })
        .collect();
    (!records.is_empty()).then_some(records)
}

fn holder_label(item: &Value, rank: usize) -> String {
    ["owner", "address", "wallet"]
        .iter()
        .find_map(|key| item.get(*key).and_then(Value::as_str))
        .map_or_else(|| format!("rank-{}", rank + 1), str::to_string)
}

/// Try each strategy in order and return the first computable percentage.
#[must_use]
pub fn first_computable(
    items: &[Value],
    supply: &SupplyMeta,
    strategies: &[AmountField],
) -> Option<f64> {
    if !supply.is_computable() {
        return None;
    }
    strategies.iter().find_map(|field| {
        let records = holder_records(items, *field)?;
        compute_top10_pct(&records, supply)
    })
}

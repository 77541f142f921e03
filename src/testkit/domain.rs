//! Builders for provider payloads and scorer inputs.
//!
//! Payloads mirror the upstream envelopes so adapter tests read like the
//! real responses.

use serde_json::{json, Value};

use crate::domain::{PoolStats, PriceQuote, ScenarioInputs};

/// Solscan holder list with the given raw `amount`s.
pub fn solscan_holders(amounts: &[f64]) -> Value {
    let items: Vec<Value> = amounts
        .iter()
        .enumerate()
        .map(|(i, a)| json!({"owner": format!("owner{i}"), "amount": a, "rank": i + 1}))
        .collect();
    json!({"success": true, "data": items})
}

/// Solscan token meta.
pub fn solscan_meta(decimals: u32, supply_raw: f64) -> Value {
    json!({"success": true, "data": {"decimals": decimals, "supply": supply_raw.to_string()}})
}

/// Birdeye holder list using `field` for balances.
pub fn birdeye_holders(field: &str, amounts: &[f64]) -> Value {
    let items: Vec<Value> = amounts
        .iter()
        .enumerate()
        .map(|(i, a)| json!({"owner": format!("owner{i}"), field: a.to_string()}))
        .collect();
    json!({"success": true, "data": {"items": items}})
}

/// Birdeye token overview; `supply_ui` is in whole tokens.
pub fn birdeye_overview(decimals: u32, supply_ui: f64) -> Value {
    json!({"success": true, "data": {"decimals": decimals, "supply": supply_ui}})
}

/// Moralis holder statistics.
pub fn moralis_stats(total_holders: f64, change_pct_24h: f64) -> Value {
    json!({
        "totalHolders": total_holders,
        "holderChange": {"24h": {"change": -10, "changePercent": change_pct_24h}}
    })
}

/// Bitget tool stdout.
pub fn bitget_output(top10: f64) -> String {
    json!({"status": 0, "data": {"top10_holder_percent": top10}}).to_string()
}

/// CoinGecko simple-price document.
pub fn coingecko_price(coin_id: &str, price: f64) -> Value {
    json!({coin_id: {"usd": price, "usd_market_cap": price * 2.0e8, "usd_24h_vol": 1.5e8}})
}

/// DexScreener token document with one pair.
pub fn dexscreener_pair(liquidity: f64, fdv: f64, buys: u64, sells: u64, change_h24: f64) -> Value {
    json!({
        "pairs": [{
            "liquidity": {"usd": liquidity},
            "fdv": fdv,
            "txns": {"h24": {"buys": buys, "sells": sells}},
            "priceChange": {"h24": change_h24}
        }]
    })
}

/// Quote with price only.
pub fn quote(price: f64) -> PriceQuote {
    PriceQuote {
        price_usd: Some(price),
        mcap_usd: Some(price * 2.0e8),
        volume_24h_usd: Some(1.5e8),
    }
}

/// Pool stats for a 500k liquidity / 10M FDV pool.
pub fn pool(buys: f64, sells: f64, change_h24: f64) -> PoolStats {
    PoolStats {
        liquidity_usd: Some(500_000.0),
        fdv_usd: Some(10_000_000.0),
        buys_24h: Some(buys),
        sells_24h: Some(sells),
        price_change_24h_pct: Some(change_h24),
    }
}

/// Scorer inputs with every signal present.
pub fn inputs(liq_fdv: f64, liq_change: f64, ratio: f64, top10: f64, price_change: f64) -> ScenarioInputs {
    ScenarioInputs {
        liq_fdv_ratio: Some(liq_fdv),
        liquidity_change_24h: Some(liq_change),
        buy_sell_ratio_24h: Some(ratio),
        top10_holder_pct: Some(top10),
        price_change_24h_pct: Some(price_change),
    }
}

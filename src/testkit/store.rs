//! In-memory [`SnapshotStore`].

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDate;

use crate::domain::{Snapshot, TimeseriesRow};
use crate::error::Result;
use crate::port::SnapshotStore;

/// Keeps written snapshots and rows in memory.
#[derive(Default)]
pub struct MemoryStore {
    previous_liquidity: Option<f64>,
    snapshots: Mutex<Vec<(NaiveDate, Snapshot)>>,
    rows: Mutex<Vec<TimeseriesRow>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend an earlier snapshot recorded `liquidity_usd`.
    pub fn with_previous_liquidity(mut self, liquidity_usd: f64) -> Self {
        self.previous_liquidity = Some(liquidity_usd);
        self
    }

    pub fn snapshots(&self) -> Vec<(NaiveDate, Snapshot)> {
        self.snapshots.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn rows(&self) -> Vec<TimeseriesRow> {
        self.rows.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl SnapshotStore for MemoryStore {
    fn previous_liquidity(&self, _today: NaiveDate) -> Result<Option<f64>> {
        Ok(self.previous_liquidity)
    }

    fn write_snapshot(&self, date: NaiveDate, snapshot: &Snapshot) -> Result<PathBuf> {
        if let Ok(mut snapshots) = self.snapshots.lock() {
            snapshots.push((date, snapshot.clone()));
        }
        Ok(PathBuf::from(format!("memory/{date}.snapshot.json")))
    }

    fn append_timeseries(&self, row: &TimeseriesRow) -> Result<PathBuf> {
        if let Ok(mut rows) = self.rows.lock() {
            rows.push(row.clone());
        }
        Ok(PathBuf::from("memory/timeseries.jsonl"))
    }
}

//! Snapshot persistence port.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::domain::{Snapshot, TimeseriesRow};
use crate::error::Result;

/// Storage for daily snapshots and the timeseries log.
pub trait SnapshotStore: Send + Sync {
    /// Liquidity recorded by the newest snapshot dated before `today`.
    ///
    /// Missing or unreadable history yields `Ok(None)`.
    fn previous_liquidity(&self, today: NaiveDate) -> Result<Option<f64>>;

    /// Persist the snapshot for `date`, replacing any earlier run that day.
    fn write_snapshot(&self, date: NaiveDate, snapshot: &Snapshot) -> Result<PathBuf>;

    /// Append one row to the timeseries.
    fn append_timeseries(&self, row: &TimeseriesRow) -> Result<PathBuf>;
}

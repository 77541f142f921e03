//! Snapshot files on the local filesystem.
//!
//! Layout: one pretty-printed `<YYYY-MM-DD>.snapshot.json` per day in the
//! snapshot directory and a JSON-lines timeseries file.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, warn};

use crate::adapter::outbound::json;
use crate::domain::{Snapshot, TimeseriesRow};
use crate::error::Result;
use crate::port::SnapshotStore;

const SNAPSHOT_SUFFIX: &str = ".snapshot.json";

/// File name of the snapshot for `date`.
#[must_use]
pub fn snapshot_file_name(date: NaiveDate) -> String {
    format!("{}{SNAPSHOT_SUFFIX}", date.format("%Y-%m-%d"))
}

pub struct FileSnapshotStore {
    snapshot_dir: PathBuf,
    timeseries: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(snapshot_dir: impl Into<PathBuf>, timeseries: impl Into<PathBuf>) -> Self {
        Self {
            snapshot_dir: snapshot_dir.into(),
            timeseries: timeseries.into(),
        }
    }

    /// Newest snapshot file other than today's, by file name.
    fn latest_before(&self, today: NaiveDate) -> Option<PathBuf> {
        let today_name = snapshot_file_name(today);
        let entries = fs::read_dir(&self.snapshot_dir).ok()?;
        entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(SNAPSHOT_SUFFIX) && n != today_name)
            })
            .max()
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

impl SnapshotStore for FileSnapshotStore {
    fn previous_liquidity(&self, today: NaiveDate) -> Result<Option<f64>> {
        let Some(path) = self.latest_before(today) else {
            debug!(dir = %self.snapshot_dir.display(), "No previous snapshot");
            return Ok(None);
        };

        let parsed = fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|content| serde_json::from_str::<Value>(&content).map_err(|e| e.to_string()));
        match parsed {
            Ok(doc) => {
                let liquidity = json::number_at(&doc, &["market", "liquidity_usd"]);
                debug!(path = %path.display(), ?liquidity, "Loaded previous snapshot");
                Ok(liquidity)
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "Ignoring unreadable previous snapshot");
                Ok(None)
            }
        }
    }

    fn write_snapshot(&self, date: NaiveDate, snapshot: &Snapshot) -> Result<PathBuf> {
        fs::create_dir_all(&self.snapshot_dir)?;
        let target = self.snapshot_dir.join(snapshot_file_name(date));
        let tmp = target.with_extension("json.tmp");

        let mut body = serde_json::to_string_pretty(snapshot)?;
        body.push('\n');

        let mut file = File::create(&tmp)?;
        let discard_tmp = |e| {
            let _ = fs::remove_file(&tmp);
            e
        };
        file.write_all(body.as_bytes()).map_err(discard_tmp)?;
        file.sync_all().map_err(discard_tmp)?;
        drop(file);

        fs::rename(&tmp, &target).map_err(discard_tmp)?;
        Ok(target)
    }

    fn append_timeseries(&self, row: &TimeseriesRow) -> Result<PathBuf> {
        ensure_parent(&self.timeseries)?;
        let mut line = serde_json::to_string(row)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.timeseries)?;
        file.write_all(line.as_bytes())?;
        Ok(self.timeseries.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn file_name_uses_iso_date() {
        assert_eq!(snapshot_file_name(date("2026-10-16")), "2026-10-16.snapshot.json");
    }

    #[test]
    fn previous_liquidity_skips_today_and_takes_newest() {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, body: &str| fs::write(dir.path().join(name), body).unwrap();
        write("2026-10-14.snapshot.json", r#"{"market":{"liquidity_usd":100.0}}"#);
        write("2026-10-15.snapshot.json", r#"{"market":{"liquidity_usd":200.0}}"#);
        write("2026-10-16.snapshot.json", r#"{"market":{"liquidity_usd":300.0}}"#);
        write("notes.json", r#"{"market":{"liquidity_usd":999.0}}"#);

        let store = FileSnapshotStore::new(dir.path(), dir.path().join("ts.jsonl"));
        assert_eq!(store.previous_liquidity(date("2026-10-16")).unwrap(), Some(200.0));
    }

    fn minimal_snapshot() -> Snapshot {
        serde_json::from_value(serde_json::json!({
            "as_of_utc": "2026-10-16T00:00:00Z",
            "asset": "TRUMP",
            "market": {},
            "onchain": { "top10_holder_pct": null, "top10_holder_source": "heuristic-proxy" },
            "derived": {},
            "model": { "name": "scenario_prob_v1", "rules_source": "rules.json" }
        }))
        .unwrap()
    }

    #[test]
    fn snapshot_is_written_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path(), dir.path().join("ts.jsonl"));

        let path = store.write_snapshot(date("2026-10-16"), &minimal_snapshot()).unwrap();

        assert_eq!(path, dir.path().join("2026-10-16.snapshot.json"));
        assert!(fs::read_to_string(&path).unwrap().ends_with("}\n"));
        assert!(!dir.path().join("2026-10-16.snapshot.json.tmp").exists());
    }

    #[test]
    fn failed_rename_removes_the_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let occupied = dir.path().join("2026-10-16.snapshot.json");
        fs::create_dir(&occupied).unwrap();
        fs::write(occupied.join("keep"), "x").unwrap();
        let store = FileSnapshotStore::new(dir.path(), dir.path().join("ts.jsonl"));

        let result = store.write_snapshot(date("2026-10-16"), &minimal_snapshot());

        assert!(result.is_err());
        assert!(!dir.path().join("2026-10-16.snapshot.json.tmp").exists());
        assert!(occupied.join("keep").exists());
    }

    #[test]
    fn missing_or_broken_history_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path().join("absent"), dir.path().join("ts.jsonl"));
        assert_eq!(store.previous_liquidity(date("2026-10-16")).unwrap(), None);

        fs::write(dir.path().join("2026-10-15.snapshot.json"), "{not json").unwrap();
        let store = FileSnapshotStore::new(dir.path(), dir.path().join("ts.jsonl"));
        assert_eq!(store.previous_liquidity(date("2026-10-16")).unwrap(), None);
    }
}

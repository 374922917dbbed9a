//! Bounded, most-recent-first scan history persisted as a JSON file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::core::{HistoryRecord, ScanResult};

pub const MAX_HISTORY: usize = 10;

pub const HISTORY_FILE_NAME: &str = "scanHistory.json";

/// Inserts `record` at the front, dropping any earlier entry for the same URL
/// and anything beyond [`MAX_HISTORY`].
pub fn push_record(mut list: Vec<HistoryRecord>, record: HistoryRecord) -> Vec<HistoryRecord> {
    list.retain(|r| r.url != record.url);
    list.insert(0, record);
    list.truncate(MAX_HISTORY);
    list
}

/// Keeps the first (most recent) record per URL. Older clients appended
/// repeats.
fn dedupe(mut list: Vec<HistoryRecord>) -> Vec<HistoryRecord> {
    let mut seen = HashSet::new();
    list.retain(|r| seen.insert(r.url.clone()));
    list.truncate(MAX_HISTORY);
    list
}

#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the persisted list. Missing, unreadable or malformed content
    /// yields an empty history.
    pub fn load(&self) -> Vec<HistoryRecord> {
        let s = match std::fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!(
                    "ignoring unreadable scan history {}: {err}",
                    self.path.display()
                );
                return Vec::new();
            }
        };
        if s.trim().is_empty() {
            return Vec::new();
        }
        match serde_json::from_str::<Vec<HistoryRecord>>(&s) {
            Ok(list) => dedupe(list),
            Err(err) => {
                warn!(
                    "ignoring malformed scan history {}: {err}",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    /// Records a successful scan of `url` and persists the updated list.
    pub fn record(&self, result: &ScanResult, url: &str) -> Result<Vec<HistoryRecord>> {
        let record = HistoryRecord::from_result(result, url, now_timestamp());
        let list = push_record(self.load(), record);
        self.save(&list)?;
        debug!("scan history now holds {} entries", list.len());
        Ok(list)
    }

    pub fn clear(&self) -> Result<()> {
        self.save(&[])
    }

    /// 1-based lookup, matching the numbering shown by `history`.
    pub fn get(&self, index: usize) -> Option<HistoryRecord> {
        if index == 0 {
            return None;
        }
        self.load().into_iter().nth(index - 1)
    }

    fn save(&self, list: &[HistoryRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create history directory: {}", parent.display())
                })?;
            }
        }

        let buf = serde_json::to_vec_pretty(list).context("failed to serialize scan history")?;
        let tmp = self.path.with_extension(format!("json.tmp-{}", std::process::id()));
        std::fs::write(&tmp, &buf)
            .with_context(|| format!("failed to write scan history: {}", tmp.display()))?;
        if let Err(err) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(err).with_context(|| {
                format!("failed to replace scan history: {}", self.path.display())
            });
        }
        Ok(())
    }
}

pub fn now_timestamp() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}

/// Date part of a stored timestamp, for compact listings.
pub fn display_date(timestamp: &str) -> String {
    match OffsetDateTime::parse(timestamp, &Rfc3339) {
        Ok(ts) => {
            let date = ts.date();
            format!(
                "{:04}-{:02}-{:02}",
                date.year(),
                u8::from(date.month()),
                date.day()
            )
        }
        Err(_) => timestamp.chars().take(10).collect(),
    }
}

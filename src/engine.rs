use anyhow::{Result, anyhow};
use log::{debug, info, warn};

use crate::api::{ApiClient, EducationFeed};
use crate::core::{HistoryRecord, ScanResult};
use crate::history::HistoryStore;
use crate::normalize::normalize_url;
use crate::render::{ResultView, render};

/// Submission flow shared by the CLI and the terminal UI.
#[derive(Clone)]
pub struct Engine {
    api: ApiClient,
    history: Option<HistoryStore>,
}

#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// The normalized URL that was sent to the backend.
    pub url: String,
    pub result: ScanResult,
    pub view: ResultView,
    /// History after recording; `None` when recording is disabled.
    pub history: Option<Vec<HistoryRecord>>,
}

impl Engine {
    pub fn new(api: ApiClient, history: Option<HistoryStore>) -> Self {
        Self { api, history }
    }

    pub fn history(&self) -> Vec<HistoryRecord> {
        self.history
            .as_ref()
            .map(HistoryStore::load)
            .unwrap_or_default()
    }

    /// Normalizes and scans `raw`. Blank input is a no-op and returns `Ok(None)`.
    /// History is only touched after a successful response.
    pub async fn submit(&self, raw: &str) -> Result<Option<ScanOutcome>> {
        let Some(url) = normalize_url(raw) else {
            debug!("ignoring blank submission");
            return Ok(None);
        };

        let result = self.analyze(&url).await?;
        let history = self.record(&result, &url);
        let view = render(&result);
        Ok(Some(ScanOutcome {
            url,
            result,
            view,
            history,
        }))
    }

    /// One prediction call for an already-normalized URL.
    pub async fn analyze(&self, url: &str) -> Result<ScanResult> {
        let result = self.api.scan(url).await?;
        info!(
            "scanned {url}: {}",
            if result.is_phishing { "phishing" } else { "safe" }
        );
        Ok(result)
    }

    /// Adds a successful scan to history. A failed write is logged and the
    /// previously stored list is returned.
    pub fn record(&self, result: &ScanResult, url: &str) -> Option<Vec<HistoryRecord>> {
        let store = self.history.as_ref()?;
        Some(store.record(result, url).unwrap_or_else(|err| {
            warn!("scan history not saved: {err:#}");
            store.load()
        }))
    }

    pub fn clear_history(&self) -> Result<()> {
        match &self.history {
            Some(store) => store.clear(),
            None => Ok(()),
        }
    }

    /// Scans the URL of the `index`-th (1-based) history entry again.
    pub async fn rescan(&self, index: usize) -> Result<ScanOutcome> {
        let record = self.record_at(index)?;
        self.submit(&record.url)
            .await?
            .ok_or_else(|| anyhow!("history entry #{index} has an empty URL"))
    }

    /// Renders the cached result of a history entry without a network call.
    pub fn replay(&self, index: usize) -> Result<ResultView> {
        let record = self.record_at(index)?;
        let result = record.full_result.unwrap_or_else(|| ScanResult {
            url: record.url.clone(),
            is_phishing: record.is_phishing,
            confidence: record.confidence,
            ..ScanResult::default()
        });
        Ok(render(&result))
    }

    pub async fn education(&self) -> EducationFeed {
        self.api.fetch_education_or_empty().await
    }

    fn record_at(&self, index: usize) -> Result<HistoryRecord> {
        let Some(store) = &self.history else {
            return Err(crate::exit::invalid_args("scan history is disabled"));
        };
        store.get(index).ok_or_else(|| {
            crate::exit::invalid_args(format!(
                "no history entry #{index} (see `phishguard history`)"
            ))
        })
    }
}

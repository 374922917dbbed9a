//! HTTP client for the prediction service.
//!
//! One POST for scanning and two GETs for the educational content. Transport
//! failures, structured `detail` errors and everything else are kept apart so
//! the caller can show the right message; nothing here retries.

use log::{debug, info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::core::{EducationCategory, MitigationContent, ScanResult};

pub const UNREACHABLE_MESSAGE: &str =
    "Could not reach the analysis backend. Make sure the backend address is correct.";
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred during analysis.";

#[derive(Error, Debug)]
pub enum ApiError {
    /// No response was received (connection refused, DNS failure, dropped connection).
    #[error("{}", UNREACHABLE_MESSAGE)]
    Unreachable { reason: String },

    /// The backend answered with an error status and a `{"detail": "..."}` body.
    #[error("{message}")]
    Detail { status: u16, message: String },

    #[error("{}", GENERIC_FAILURE_MESSAGE)]
    Failed { status: Option<u16>, reason: String },
}

impl ApiError {
    /// Diagnostic text for logs; the `Display` form is what users see.
    pub fn diagnostic(&self) -> String {
        match self {
            ApiError::Unreachable { reason } => format!("transport failure: {reason}"),
            ApiError::Detail { status, message } => format!("HTTP {status}: {message}"),
            ApiError::Failed {
                status: Some(status),
                reason,
            } => format!("HTTP {status}: {reason}"),
            ApiError::Failed {
                status: None,
                reason,
            } => reason.clone(),
        }
    }
}

/// Educational content fetched at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EducationFeed {
    pub categories: Vec<EducationCategory>,
    pub mitigations: MitigationContent,
}

#[derive(Deserialize)]
struct CategoriesEnvelope {
    #[serde(default)]
    categories: Vec<EducationCategory>,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    predict_path: String,
    phishing_info_path: String,
    mitigation_info_path: String,
    lang: String,
}

impl ApiClient {
    pub fn new(cfg: &ApiConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("phishguard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: cfg.base_url.trim().trim_end_matches('/').to_string(),
            predict_path: cfg.predict_path.clone(),
            phishing_info_path: cfg.phishing_info_path.clone(),
            mitigation_info_path: cfg.mitigation_info_path.clone(),
            lang: cfg.lang.clone(),
        })
    }

    pub fn predict_url(&self) -> String {
        join_path(&self.base_url, &self.predict_path)
    }

    /// Submits one URL for analysis.
    pub async fn scan(&self, url: &str) -> Result<ScanResult, ApiError> {
        let endpoint = self.predict_url();
        info!("POST {endpoint} url={url}");

        let resp = self
            .client
            .post(&endpoint)
            .json(&serde_json::json!({ "url": url }))
            .send()
            .await
            .map_err(transport_error)?;

        let result: ScanResult = read_json(resp).await?;
        debug!(
            "verdict for {}: is_phishing={} confidence={}",
            result.url, result.is_phishing, result.confidence
        );
        Ok(result)
    }

    pub async fn fetch_categories(&self) -> Result<Vec<EducationCategory>, ApiError> {
        let endpoint = self.info_url(&self.phishing_info_path)?;
        debug!("GET {endpoint}");
        let resp = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(transport_error)?;
        let envelope: CategoriesEnvelope = read_json(resp).await?;
        Ok(envelope.categories)
    }

    pub async fn fetch_mitigations(&self) -> Result<MitigationContent, ApiError> {
        let endpoint = self.info_url(&self.mitigation_info_path)?;
        debug!("GET {endpoint}");
        let resp = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(transport_error)?;
        read_json(resp).await
    }

    /// Fetches categories and mitigations concurrently; fails if either fails.
    pub async fn fetch_education(&self) -> Result<EducationFeed, ApiError> {
        let (categories, mitigations) =
            tokio::try_join!(self.fetch_categories(), self.fetch_mitigations())?;
        Ok(EducationFeed {
            categories,
            mitigations,
        })
    }

    /// Like [`ApiClient::fetch_education`], but degrades to empty content on failure.
    pub async fn fetch_education_or_empty(&self) -> EducationFeed {
        match self.fetch_education().await {
            Ok(feed) => feed,
            Err(err) => {
                warn!("educational content unavailable: {}", err.diagnostic());
                EducationFeed::default()
            }
        }
    }

    fn info_url(&self, path: &str) -> Result<url::Url, ApiError> {
        let raw = join_path(&self.base_url, path);
        url::Url::parse_with_params(&raw, &[("lang", self.lang.as_str())]).map_err(|e| {
            ApiError::Failed {
                status: None,
                reason: format!("invalid endpoint {raw}: {e}"),
            }
        })
    }
}

fn join_path(base: &str, path: &str) -> String {
    let path = path.trim();
    if path.is_empty() {
        return base.to_string();
    }
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_builder() {
        return ApiError::Failed {
            status: None,
            reason: format!("could not build request: {err}"),
        };
    }
    ApiError::Unreachable {
        reason: error_chain(&err),
    }
}

fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

async fn read_json<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let status = resp.status();
    let body = resp.text().await.map_err(|e| ApiError::Unreachable {
        reason: format!("response body interrupted: {}", error_chain(&e)),
    })?;

    if !status.is_success() {
        return Err(status_error(status.as_u16(), &body));
    }

    serde_json::from_str(&body).map_err(|e| ApiError::Failed {
        status: Some(status.as_u16()),
        reason: format!("unexpected response body: {e}"),
    })
}

fn status_error(status: u16, body: &str) -> ApiError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .and_then(|d| match d {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        });
    match detail {
        Some(message) => ApiError::Detail { status, message },
        None => ApiError::Failed {
            status: Some(status),
            reason: truncate(body.trim(), 200),
        },
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str, predict_path: &str) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: base_url.to_string(),
            predict_path: predict_path.to_string(),
            ..ApiConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn predict_url_joins_paths() {
        assert_eq!(
            client("http://127.0.0.1:8000/", "/api/v1/predict").predict_url(),
            "http://127.0.0.1:8000/api/v1/predict"
        );
        assert_eq!(
            client("http://127.0.0.1:8000", "predict").predict_url(),
            "http://127.0.0.1:8000/predict"
        );
    }

    #[test]
    fn info_url_carries_language() {
        let c = client("http://127.0.0.1:8000", "/predict");
        let url = c.info_url("/api/v1/info/phishing").unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8000/api/v1/info/phishing?lang=id"
        );
    }

    #[test]
    fn status_error_prefers_string_detail() {
        match status_error(400, r#"{"detail":"URL tidak valid"}"#) {
            ApiError::Detail { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "URL tidak valid");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn status_error_without_string_detail_is_generic() {
        let validation = r#"{"detail":[{"loc":["body","url"],"msg":"field required"}]}"#;
        for body in ["", "Internal Server Error", validation, r#"{"detail":""}"#] {
            let err = status_error(500, body);
            assert!(matches!(err, ApiError::Failed { .. }), "body={body}");
            assert_eq!(err.to_string(), GENERIC_FAILURE_MESSAGE);
        }
    }

    #[test]
    fn user_facing_messages() {
        let err = ApiError::Unreachable {
            reason: "tcp connect error".to_string(),
        };
        assert_eq!(err.to_string(), UNREACHABLE_MESSAGE);
        assert!(err.diagnostic().contains("tcp connect error"));
    }
}

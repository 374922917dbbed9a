use serde::{Deserialize, Serialize};

use crate::core::ScanResult;
use crate::core::lenient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub url: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_phishing: bool,
    #[serde(
        default,
        alias = "confidence_score",
        deserialize_with = "lenient::number_or_zero"
    )]
    pub confidence: f64,
    #[serde(default)]
    pub timestamp: String,
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub full_result: Option<ScanResult>,
}

impl HistoryRecord {
    pub fn from_result(result: &ScanResult, url: &str, timestamp: String) -> Self {
        Self {
            url: url.to_string(),
            is_phishing: result.is_phishing,
            confidence: result.confidence,
            timestamp,
            full_result: Some(result.clone()),
        }
    }
}

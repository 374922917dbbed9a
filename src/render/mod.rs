//! Pure mapping from a verdict payload to what gets displayed.
//!
//! Both the plain-text printer and the terminal UI draw from [`ResultView`],
//! so every fallback decision lives here and nowhere else.

use serde::Serialize;
use serde_json::Value;

use crate::core::{RiskLevel, ScanResult, is_truthy};

/// Half-width, in degrees, of the map viewport around a geolocated host.
pub const MAP_PADDING_DEG: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Phishing,
    Safe,
}

impl Verdict {
    pub fn from_flag(is_phishing: bool) -> Self {
        if is_phishing {
            Verdict::Phishing
        } else {
            Verdict::Safe
        }
    }

    pub const fn headline(self) -> &'static str {
        match self {
            Verdict::Phishing => "PHISHING DETECTED",
            Verdict::Safe => "SAFE URL",
        }
    }

    pub const fn badge(self) -> &'static str {
        match self {
            Verdict::Phishing => "PHISHING",
            Verdict::Safe => "SAFE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Good,
    Bad,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub url: String,
    pub verdict: Verdict,
    pub headline: &'static str,
    pub risk_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    pub confidence: String,
    pub analysis_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impersonation: Option<ImpersonationView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_indicators: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geolocation: Option<GeolocationView>,
    pub features: Vec<FeatureCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpersonationView {
    pub brand: String,
    pub similarity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeolocationView {
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    pub viewport: MapViewport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapViewport {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
    pub embed_url: String,
}

impl MapViewport {
    pub fn around(lat: f64, lon: f64) -> Self {
        let min_lon = round6(lon - MAP_PADDING_DEG);
        let min_lat = round6(lat - MAP_PADDING_DEG);
        let max_lon = round6(lon + MAP_PADDING_DEG);
        let max_lat = round6(lat + MAP_PADDING_DEG);
        let embed_url = format!(
            "https://www.openstreetmap.org/export/embed.html?bbox={min_lon}%2C{min_lat}%2C{max_lon}%2C{max_lat}&layer=mapnik&marker={lat}%2C{lon}"
        );
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
            embed_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCell {
    pub label: &'static str,
    pub value: String,
    pub tone: Tone,
    /// False when every candidate was absent and the default was used.
    pub observed: bool,
}

/// Where a feature-grid value may come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Feature(&'static str),
    IpAddress,
    Isp,
    Country,
    RedirectCount,
    HostLength,
    HostTld,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Truthy flag rendered as `HTTPS`, default `HTTP`.
    Protocol,
    Count,
    Percent,
    Text,
}

#[derive(Debug, Clone, Copy)]
pub struct FeatureSpec {
    pub label: &'static str,
    pub sources: &'static [Source],
    pub format: Format,
    pub default: &'static str,
}

pub const FEATURE_GRID: &[FeatureSpec] = &[
    FeatureSpec {
        label: "Security",
        sources: &[Source::Feature("is_https"), Source::Feature("IsHTTPS")],
        format: Format::Protocol,
        default: "HTTP",
    },
    FeatureSpec {
        label: "Domain Len",
        sources: &[
            Source::Feature("domain_length"),
            Source::Feature("DomainLength"),
            Source::HostLength,
        ],
        format: Format::Count,
        default: "0",
    },
    FeatureSpec {
        label: "Similarity",
        sources: &[
            Source::Feature("url_similarity_index"),
            Source::Feature("URLSimilarityIndex"),
        ],
        format: Format::Percent,
        default: "0%",
    },
    FeatureSpec {
        label: "Special Chars",
        sources: &[
            Source::Feature("no_of_other_special_chars_in_url"),
            Source::Feature("NoOfOtherSpecialCharsInURL"),
        ],
        format: Format::Count,
        default: "0",
    },
    FeatureSpec {
        label: "Subdomains",
        sources: &[
            Source::Feature("no_of_subdomain"),
            Source::Feature("NoOfSubDomain"),
        ],
        format: Format::Count,
        default: "0",
    },
    FeatureSpec {
        label: "TLD",
        sources: &[Source::Feature("tld"), Source::Feature("TLD"), Source::HostTld],
        format: Format::Text,
        default: "com",
    },
    FeatureSpec {
        label: "IP Address",
        sources: &[Source::IpAddress],
        format: Format::Text,
        default: "N/A",
    },
    FeatureSpec {
        label: "ISP",
        sources: &[Source::Isp],
        format: Format::Text,
        default: "N/A",
    },
    FeatureSpec {
        label: "Country",
        sources: &[Source::Country],
        format: Format::Text,
        default: "N/A",
    },
    FeatureSpec {
        label: "Redirects",
        sources: &[Source::Feature("no_of_url_redirect"), Source::RedirectCount],
        format: Format::Count,
        default: "0",
    },
];

pub fn render(result: &ScanResult) -> ResultView {
    let verdict = Verdict::from_flag(result.is_phishing);

    let impersonation = result.impersonation.as_ref().map(|imp| ImpersonationView {
        brand: if imp.brand.trim().is_empty() {
            "Unknown brand".to_string()
        } else {
            imp.brand.clone()
        },
        similarity: percent(imp.similarity),
    });

    let risk_indicators = if result.risk_indicators.is_empty() {
        None
    } else {
        Some(result.risk_indicators.clone())
    };

    ResultView {
        url: result.url.clone(),
        verdict,
        headline: verdict.headline(),
        risk_label: result.risk_level.map(RiskLevel::label).unwrap_or("UNKNOWN"),
        risk_level: result.risk_level,
        confidence: percent(result.confidence),
        analysis_time: result
            .analysis_time_ms
            .map(format_millis)
            .unwrap_or_else(|| "N/A".to_string()),
        impersonation,
        risk_indicators,
        geolocation: geolocation(result),
        features: feature_grid(result),
    }
}

pub fn feature_grid(result: &ScanResult) -> Vec<FeatureCell> {
    FEATURE_GRID
        .iter()
        .map(|spec| evaluate(spec, result))
        .collect()
}

/// Walks the candidate chain and formats the first truthy value that fits the format.
pub fn evaluate(spec: &FeatureSpec, result: &ScanResult) -> FeatureCell {
    let found = spec
        .sources
        .iter()
        .filter_map(|source| resolve(*source, result))
        .filter(is_truthy)
        .find_map(|value| format_value(spec.format, &value));

    let observed = found.is_some();
    let value = found.unwrap_or_else(|| spec.default.to_string());
    let tone = match spec.format {
        Format::Protocol if observed => Tone::Good,
        Format::Protocol => Tone::Bad,
        _ => Tone::Neutral,
    };

    FeatureCell {
        label: spec.label,
        value,
        tone,
        observed,
    }
}

fn resolve(source: Source, result: &ScanResult) -> Option<Value> {
    match source {
        Source::Feature(name) => result.feature(name).cloned(),
        Source::IpAddress => result
            .network_info
            .as_ref()?
            .ip_address
            .clone()
            .map(Value::String),
        Source::Isp => result.location()?.isp.clone().map(Value::String),
        Source::Country => result.location()?.country.clone().map(Value::String),
        Source::RedirectCount => {
            let n = result.network_info.as_ref()?.redirect_chain.len();
            Some(Value::from(n as u64))
        }
        Source::HostLength => host(&result.url).map(|h| Value::from(h.len() as u64)),
        Source::HostTld => {
            let h = host(&result.url)?;
            let (_, tld) = h.rsplit_once('.')?;
            if tld.is_empty() {
                None
            } else {
                Some(Value::String(tld.to_string()))
            }
        }
    }
}

fn host(raw: &str) -> Option<String> {
    let parsed = url::Url::parse(raw).ok()?;
    match parsed.host()? {
        url::Host::Domain(d) => Some(d.to_string()),
        url::Host::Ipv4(ip) => Some(ip.to_string()),
        url::Host::Ipv6(ip) => Some(ip.to_string()),
    }
}

fn format_value(format: Format, value: &Value) -> Option<String> {
    match format {
        Format::Protocol => Some("HTTPS".to_string()),
        Format::Count => number(value).map(|n| format!("{}", n.round() as i64)),
        Format::Percent => number(value).map(|n| format!("{n:.1}%")),
        Format::Text => match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        },
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(true) => Some(1.0),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

fn geolocation(result: &ScanResult) -> Option<GeolocationView> {
    let location = result.location()?;
    let lat = location.lat?;
    let lon = location.lon.unwrap_or(0.0);
    Some(GeolocationView {
        lat,
        lon,
        city: location.city.clone(),
        country: location.country.clone(),
        isp: location.isp.clone(),
        ip_address: result
            .network_info
            .as_ref()
            .and_then(|n| n.ip_address.clone()),
        viewport: MapViewport::around(lat, lon),
    })
}

/// Fraction in [0,1] as a rounded whole percentage.
pub fn percent(fraction: f64) -> String {
    if !fraction.is_finite() {
        return "0%".to_string();
    }
    format!("{}%", (fraction * 100.0).round() as i64)
}

fn format_millis(ms: f64) -> String {
    if ms.fract() == 0.0 {
        format!("{} ms", ms as i64)
    } else {
        format!("{ms:.1} ms")
    }
}

fn round6(x: f64) -> f64 {
    (x * 1_000_000.0).round() / 1_000_000.0
}

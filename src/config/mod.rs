use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveConfig {
    pub api: ApiConfig,
    pub history: HistoryConfig,
    pub ui: UiConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub predict_path: String,
    pub phishing_info_path: String,
    pub mitigation_info_path: String,
    pub lang: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryConfig {
    pub enabled: bool,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UiConfig {
    pub color: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            predict_path: "/api/v1/predict".to_string(),
            phishing_info_path: "/api/v1/info/phishing".to_string(),
            mitigation_info_path: "/api/v1/info/mitigation".to_string(),
            lang: "id".to_string(),
        }
    }
}

impl EffectiveConfig {
    pub fn defaults(home_dir: &Path) -> Self {
        Self {
            api: ApiConfig::default(),
            history: HistoryConfig {
                enabled: true,
                path: default_history_path(home_dir).display().to_string(),
            },
            ui: UiConfig { color: true },
            config_path: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    api: Option<RawApiConfig>,
    history: Option<RawHistoryConfig>,
    ui: Option<RawUiConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawApiConfig {
    base_url: Option<String>,
    predict_path: Option<String>,
    phishing_info_path: Option<String>,
    mitigation_info_path: Option<String>,
    lang: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawHistoryConfig {
    enabled: Option<bool>,
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawUiConfig {
    color: Option<bool>,
}

pub fn home_dir() -> Result<PathBuf> {
    std::env::var_os("HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| anyhow::anyhow!("HOME is not set"))
}

pub fn config_dir(home_dir: &Path) -> PathBuf {
    home_dir.join(".config/phishguard")
}

pub fn default_config_path(home_dir: &Path) -> PathBuf {
    config_dir(home_dir).join("config.toml")
}

pub fn default_history_path(home_dir: &Path) -> PathBuf {
    config_dir(home_dir).join(crate::history::HISTORY_FILE_NAME)
}

pub fn load(config_path: Option<&Path>, home_dir: &Path) -> Result<EffectiveConfig> {
    let mut cfg = EffectiveConfig::defaults(home_dir);

    let explicit = config_path.is_some();
    let path = config_path
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| default_config_path(home_dir));

    if path.exists() {
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let raw: RawConfig = toml::from_str(&s)
            .with_context(|| format!("failed to parse config file (TOML): {}", path.display()))?;
        apply_raw_config(&mut cfg, raw, home_dir);
        cfg.config_path = Some(path.display().to_string());
    } else if explicit {
        return Err(anyhow::anyhow!(
            "config file not found: {}",
            path.display()
        ));
    }

    apply_env_overrides(&mut cfg, home_dir)?;

    Ok(cfg)
}

fn apply_raw_config(cfg: &mut EffectiveConfig, raw: RawConfig, home_dir: &Path) {
    if let Some(api) = raw.api {
        if let Some(base_url) = api.base_url {
            cfg.api.base_url = base_url;
        }
        if let Some(predict_path) = api.predict_path {
            cfg.api.predict_path = predict_path;
        }
        if let Some(phishing_info_path) = api.phishing_info_path {
            cfg.api.phishing_info_path = phishing_info_path;
        }
        if let Some(mitigation_info_path) = api.mitigation_info_path {
            cfg.api.mitigation_info_path = mitigation_info_path;
        }
        if let Some(lang) = api.lang {
            cfg.api.lang = lang;
        }
    }

    if let Some(history) = raw.history {
        if let Some(enabled) = history.enabled {
            cfg.history.enabled = enabled;
        }
        if let Some(path) = history.path {
            cfg.history.path = expand_home(&path, home_dir);
        }
    }

    if let Some(ui) = raw.ui {
        if let Some(color) = ui.color {
            cfg.ui.color = color;
        }
    }
}

fn apply_env_overrides(cfg: &mut EffectiveConfig, home_dir: &Path) -> Result<()> {
    if let Some(v) = non_empty_env("PHISHGUARD_API_BASE_URL") {
        cfg.api.base_url = v;
    }
    if let Some(v) = non_empty_env("PHISHGUARD_API_PREDICT_PATH") {
        cfg.api.predict_path = v;
    }
    if let Some(v) = non_empty_env("PHISHGUARD_API_LANG") {
        cfg.api.lang = v;
    }
    if let Some(v) = non_empty_env("PHISHGUARD_HISTORY_PATH") {
        cfg.history.path = expand_home(&v, home_dir);
    }
    if let Ok(v) = std::env::var("PHISHGUARD_HISTORY_ENABLED") {
        cfg.history.enabled = parse_bool(&v).with_context(|| "PHISHGUARD_HISTORY_ENABLED")?;
    }
    if let Ok(v) = std::env::var("PHISHGUARD_UI_COLOR") {
        cfg.ui.color = parse_bool(&v).with_context(|| "PHISHGUARD_UI_COLOR")?;
    }

    Ok(())
}

fn non_empty_env(key: &str) -> Option<String> {
    let v = std::env::var(key).ok()?;
    let v = v.trim();
    if v.is_empty() {
        None
    } else {
        Some(v.to_string())
    }
}

fn expand_home(path: &str, home_dir: &Path) -> String {
    match path.strip_prefix("~/") {
        Some(rest) => home_dir.join(rest).display().to_string(),
        None => path.to_string(),
    }
}

fn parse_bool(s: &str) -> Result<bool> {
    let s = s.trim().to_ascii_lowercase();
    match s.as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow::anyhow!(
            "invalid boolean: {s} (expected true|false|1|0|yes|no|on|off)"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_config_overrides_only_present_keys() {
        let home = Path::new("/home/tester");
        let mut cfg = EffectiveConfig::defaults(home);
        let raw: RawConfig = toml::from_str(
            r#"
[api]
base_url = "http://scanner.internal:9000"
predict_path = "/predict"

[history]
path = "~/data/history.json"
"#,
        )
        .unwrap();
        apply_raw_config(&mut cfg, raw, home);

        assert_eq!(cfg.api.base_url, "http://scanner.internal:9000");
        assert_eq!(cfg.api.predict_path, "/predict");
        assert_eq!(cfg.api.lang, "id");
        assert_eq!(cfg.history.path, "/home/tester/data/history.json");
        assert!(cfg.history.enabled);
        assert!(cfg.ui.color);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let parsed: std::result::Result<RawConfig, _> = toml::from_str("[api]\nbase = \"x\"\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn parse_bool_variants() {
        assert!(parse_bool(" Yes ").unwrap());
        assert!(!parse_bool("off").unwrap());
        assert!(parse_bool("maybe").is_err());
    }
}

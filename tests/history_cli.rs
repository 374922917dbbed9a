use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::atomic::{AtomicU64, Ordering};

fn phishguard_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_phishguard"));
    cmd.env("HOME", home);
    cmd.env_remove("PHISHGUARD_CONFIG");
    cmd.env_remove("PHISHGUARD_API_BASE_URL");
    cmd.env_remove("PHISHGUARD_API_PREDICT_PATH");
    cmd.env_remove("PHISHGUARD_API_LANG");
    cmd.env_remove("PHISHGUARD_HISTORY_PATH");
    cmd.env_remove("PHISHGUARD_HISTORY_ENABLED");
    cmd.env_remove("PHISHGUARD_UI_COLOR");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn run(home: &Path, args: &[&str]) -> Output {
    phishguard_cmd(home).args(args).output().expect("run phishguard")
}

fn make_temp_home() -> PathBuf {
    static HOME_SEQ: AtomicU64 = AtomicU64::new(0);
    let seq = HOME_SEQ.fetch_add(1, Ordering::Relaxed);
    let home = std::env::temp_dir().join(format!(
        "phishguard-history-cli-test-{}-{seq}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&home);
    std::fs::create_dir_all(&home).expect("create home");
    home
}

fn write_history(home: &Path, content: &str) -> PathBuf {
    let path = home.join(".config/phishguard/scanHistory.json");
    std::fs::create_dir_all(path.parent().unwrap()).expect("mkdirs");
    std::fs::write(&path, content).expect("write history");
    path
}

const TWO_ENTRIES: &str = r#"[
  {
    "url": "https://paypa1-login.test",
    "is_phishing": 1,
    "confidence": 0.97,
    "timestamp": "2025-05-01T09:30:00Z",
    "full_result": {
      "url": "https://paypa1-login.test",
      "is_phishing": true,
      "confidence": 0.97,
      "risk_level": "high",
      "impersonation": {"brand": "PayPal", "similarity": 0.9},
      "risk_indicators": ["Brand name in subdomain"]
    }
  },
  {
    "url": "https://example.com",
    "is_phishing": false,
    "confidence_score": 0.12,
    "timestamp": "2025-04-30T09:30:00Z"
  }
]"#;

#[test]
fn malformed_history_lists_as_empty() {
    let home = make_temp_home();
    write_history(&home, "{ this is not json");

    let out = run(&home, &["history"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "No scans yet.\n");

    let out = run(&home, &["history", "--json"]);
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("parse json");
    assert_eq!(v, serde_json::json!([]));

    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn history_lists_most_recent_first() {
    let home = make_temp_home();
    write_history(&home, TWO_ENTRIES);

    let out = run(&home, &["history"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines[2].contains("PHISHING") && lines[2].contains("paypa1-login.test"));
    assert!(lines[3].contains("SAFE") && lines[3].contains("12%"));

    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn show_replays_cached_result_offline() {
    let home = make_temp_home();
    write_history(&home, TWO_ENTRIES);

    let out = run(
        &home,
        &["history", "show", "1", "--api-url", "http://127.0.0.1:9"],
    );
    assert!(
        out.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("PHISHING DETECTED  https://paypa1-login.test"));
    assert!(stdout.contains("risk: HIGH"));
    assert!(stdout.contains("impersonation: PayPal (90% similar)"));
    assert!(stdout.contains("  - Brand name in subdomain"));

    // Legacy entry without a cached result still renders from the summary.
    let out = run(&home, &["history", "show", "2", "--json"]);
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("parse json");
    assert_eq!(v["verdict"], "safe");
    assert_eq!(v["confidence"], "12%");

    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn clear_empties_the_file() {
    let home = make_temp_home();
    let path = write_history(&home, TWO_ENTRIES);

    let out = run(&home, &["history", "clear"]);
    assert!(out.status.success());
    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("parse");
    assert_eq!(v, serde_json::json!([]));

    let out = run(&home, &["history"]);
    assert_eq!(String::from_utf8_lossy(&out.stdout), "No scans yet.\n");

    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn disabled_history_is_an_argument_error() {
    let home = make_temp_home();
    let out = phishguard_cmd(&home)
        .env("PHISHGUARD_HISTORY_ENABLED", "false")
        .arg("history")
        .output()
        .expect("run");
    assert_eq!(out.status.code(), Some(2));
    let _ = std::fs::remove_dir_all(&home);
}

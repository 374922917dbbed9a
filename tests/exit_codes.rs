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
    let home =
        std::env::temp_dir().join(format!("phishguard-exit-test-{}-{seq}", std::process::id()));
    let _ = std::fs::remove_dir_all(&home);
    std::fs::create_dir_all(&home).expect("create home");
    home
}

fn history_file(home: &Path) -> PathBuf {
    home.join(".config/phishguard/scanHistory.json")
}

#[test]
fn completion_unknown_shell_exits_2() {
    let home = make_temp_home();
    let out = run(&home, &["completion", "nope"]);
    assert_eq!(out.status.code(), Some(2));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn completion_bash_succeeds() {
    let home = make_temp_home();
    let out = run(&home, &["completion", "bash"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("phishguard"));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn ui_requires_tty_exits_2() {
    let home = make_temp_home();
    let out = run(&home, &["ui"]);
    assert_eq!(out.status.code(), Some(2));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn blank_url_exits_2_without_network() {
    let home = make_temp_home();
    let out = run(&home, &["scan", "   "]);
    assert_eq!(out.status.code(), Some(2));
    assert!(!history_file(&home).exists());
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn unreachable_backend_exits_20_and_records_nothing() {
    let home = make_temp_home();
    let out = run(
        &home,
        &["scan", "example.com", "--api-url", "http://127.0.0.1:9"],
    );
    assert_eq!(out.status.code(), Some(20));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("Could not reach the analysis backend"),
        "stderr={stderr}"
    );
    assert!(!history_file(&home).exists());
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn unknown_history_index_exits_2() {
    let home = make_temp_home();
    let out = run(&home, &["history", "show", "3"]);
    assert_eq!(out.status.code(), Some(2));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn missing_explicit_config_exits_2() {
    let home = make_temp_home();
    let missing = home.join("nope.toml");
    let out = run(&home, &["--config", missing.to_str().unwrap(), "config", "--show"]);
    assert_eq!(out.status.code(), Some(2));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn invalid_env_bool_exits_2() {
    let home = make_temp_home();
    let out = phishguard_cmd(&home)
        .env("PHISHGUARD_UI_COLOR", "maybe")
        .args(["config", "--show"])
        .output()
        .expect("run phishguard");
    assert_eq!(out.status.code(), Some(2));
    let _ = std::fs::remove_dir_all(&home);
}

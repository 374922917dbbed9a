use std::io;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use log::debug;
use serde::Serialize;

use crate::api::ApiClient;
use crate::core::ScanResult;
use crate::education::{Audience, Lesson};
use crate::engine::Engine;
use crate::history::HistoryStore;
use crate::logging::Verbosity;
use crate::render::ResultView;
use crate::ui::UiConfig;

#[derive(Debug, Parser)]
#[command(
    name = "phishguard",
    version,
    about = "Check whether a URL is a phishing link using a remote prediction service"
)]
pub struct Cli {
    #[arg(long, global = true)]
    pub json: bool,
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
    #[arg(long, global = true)]
    pub verbose: bool,
    #[arg(long, global = true)]
    pub quiet: bool,
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Base URL of the prediction service (overrides config and environment).
    #[arg(long = "api-url", global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze one URL.
    Scan(ScanArgs),
    /// List, replay, re-scan or clear recent scans.
    History(HistoryArgs),
    /// Show phishing awareness content.
    Learn(LearnArgs),
    /// Interactive terminal UI.
    Ui(UiArgs),
    Completion(CompletionArgs),
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    pub url: String,
    /// Do not record this scan in history.
    #[arg(long)]
    pub no_history: bool,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: Option<HistoryCommand>,
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    Clear,
    /// Scan entry N again (1 = most recent).
    Rescan { index: usize },
    /// Show the stored result of entry N without contacting the backend.
    Show { index: usize },
}

#[derive(Debug, Args)]
pub struct LearnArgs {
    #[arg(long, value_enum, default_value_t = Audience::Individual)]
    pub audience: Audience,
}

#[derive(Debug, Args)]
pub struct UiArgs {}

#[derive(Debug, Args)]
pub struct CompletionArgs {
    pub shell: String,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[arg(long)]
    pub show: bool,
}

#[derive(Serialize)]
struct ScanJson<'a> {
    url: &'a str,
    result: &'a ScanResult,
    view: &'a ResultView,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let stdin_is_tty = io::stdin().is_terminal();
    let stdout_is_tty = io::stdout().is_terminal();
    let stderr_is_tty = io::stderr().is_terminal();

    let is_ui_mode = matches!(&cli.command, Commands::Ui(_));
    crate::logging::init(if is_ui_mode {
        Verbosity::Off
    } else {
        Verbosity::from_flags(cli.quiet, cli.verbose)
    });

    let home_dir = crate::config::home_dir()?;

    let env_config_path = std::env::var_os("PHISHGUARD_CONFIG").map(PathBuf::from);
    let mut cfg = crate::config::load(
        cli.config.as_deref().or(env_config_path.as_deref()),
        &home_dir,
    )
    .map_err(crate::exit::invalid_args_err)?;
    if let Some(api_url) = &cli.api_url {
        cfg.api.base_url = api_url.trim().to_string();
    }
    debug!("effective api base url: {}", cfg.api.base_url);

    let color = stdout_is_tty && cfg.ui.color && !cli.no_color;

    let ui_cfg = UiConfig {
        color,
        stdin_is_tty,
        stdout_is_tty,
        stderr_is_tty,
        quiet: cli.quiet,
    };

    let show_progress = ui_cfg.stderr_is_tty && !cli.quiet && !cli.json && !is_ui_mode;

    let engine = || -> Result<Engine> {
        let api = ApiClient::new(&cfg.api).map_err(crate::exit::invalid_args_err)?;
        let history = cfg
            .history
            .enabled
            .then(|| HistoryStore::new(&cfg.history.path));
        Ok(Engine::new(api, history))
    };

    match cli.command {
        Commands::Scan(args) => {
            if crate::normalize::normalize_url(&args.url).is_none() {
                return Err(crate::exit::invalid_args("URL is empty"));
            }
            let engine = if args.no_history {
                let api = ApiClient::new(&cfg.api).map_err(crate::exit::invalid_args_err)?;
                Engine::new(api, None)
            } else {
                engine()?
            };
            let rt = runtime()?;
            let outcome = with_spinner(show_progress, "Analyzing URL...", || {
                rt.block_on(engine.submit(&args.url))
            })?
            .ok_or_else(|| crate::exit::invalid_args("URL is empty"))?;

            if cli.json {
                write_json(&ScanJson {
                    url: &outcome.url,
                    result: &outcome.result,
                    view: &outcome.view,
                })?;
            } else {
                crate::ui::print_result(&outcome.view, &ui_cfg);
            }
        }
        Commands::History(args) => {
            if !cfg.history.enabled {
                return Err(crate::exit::invalid_args(
                    "scan history is disabled (history.enabled = false)",
                ));
            }
            let engine = engine()?;
            match args.command {
                None => {
                    let records = engine.history();
                    if cli.json {
                        write_json(&records)?;
                    } else {
                        crate::ui::print_history(&records, &ui_cfg);
                    }
                }
                Some(HistoryCommand::Clear) => {
                    engine.clear_history()?;
                    if cli.json {
                        write_json(&serde_json::json!({ "cleared": true }))?;
                    } else if !ui_cfg.quiet {
                        println!("Scan history cleared.");
                    }
                }
                Some(HistoryCommand::Rescan { index }) => {
                    let rt = runtime()?;
                    let outcome = with_spinner(show_progress, "Analyzing URL...", || {
                        rt.block_on(engine.rescan(index))
                    })?;
                    if cli.json {
                        write_json(&ScanJson {
                            url: &outcome.url,
                            result: &outcome.result,
                            view: &outcome.view,
                        })?;
                    } else {
                        crate::ui::print_result(&outcome.view, &ui_cfg);
                    }
                }
                Some(HistoryCommand::Show { index }) => {
                    let view = engine.replay(index)?;
                    if cli.json {
                        write_json(&view)?;
                    } else {
                        crate::ui::print_result(&view, &ui_cfg);
                    }
                }
            }
        }
        Commands::Learn(args) => {
            let engine = engine()?;
            let rt = runtime()?;
            let feed = with_spinner(show_progress, "Loading educational content...", || {
                rt.block_on(engine.education())
            });
            let lesson = Lesson::from_feed(feed);
            if cli.json {
                write_json(&lesson)?;
            } else {
                crate::ui::print_lesson(&lesson, args.audience, &ui_cfg);
            }
        }
        Commands::Ui(_args) => {
            if cli.json {
                return Err(crate::exit::invalid_args("ui cannot be combined with --json"));
            }
            if !(ui_cfg.stdin_is_tty && ui_cfg.stdout_is_tty) {
                return Err(crate::exit::invalid_args(
                    "ui needs a terminal on both stdin and stdout",
                ));
            }
            crate::tui::run(engine()?, ui_cfg.color)?;
        }
        Commands::Completion(args) => {
            let shell = parse_shell(&args.shell)?;
            let mut cmd = Cli::command();
            let mut out = std::io::stdout().lock();
            clap_complete::generate(shell, &mut cmd, "phishguard", &mut out);
        }
        Commands::Config(args) => {
            if args.show {
                if cli.json {
                    write_json(&cfg)?;
                } else {
                    println!("{}", toml::to_string_pretty(&cfg)?);
                }
            } else if !ui_cfg.quiet {
                eprintln!("config: use `phishguard config --show`");
            }
        }
    }

    Ok(())
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")
}

fn with_spinner<T>(enabled: bool, message: &'static str, f: impl FnOnce() -> T) -> T {
    let pb = if enabled {
        let pb = indicatif::ProgressBar::new_spinner();
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(120));
        Some(pb)
    } else {
        None
    };
    let out = f();
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    out
}

fn write_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    use std::io::Write;

    let buf = serde_json::to_vec_pretty(value)?;

    let mut stdout = std::io::stdout().lock();
    match stdout.write_all(&buf) {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => return Ok(()),
        Err(err) => return Err(err.into()),
    }
    match stdout.write_all(b"\n") {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn parse_shell(s: &str) -> Result<clap_complete::Shell> {
    let s = s.trim().to_ascii_lowercase();
    match s.as_str() {
        "bash" => Ok(clap_complete::Shell::Bash),
        "zsh" => Ok(clap_complete::Shell::Zsh),
        "fish" => Ok(clap_complete::Shell::Fish),
        other => Err(crate::exit::invalid_args(format!(
            "unsupported shell: {other} (use bash, zsh or fish)"
        ))),
    }
}

pub mod state;

use std::io;
use std::panic;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap};
use tokio::runtime::Handle;

use crate::api::EducationFeed;
use crate::core::ScanResult;
use crate::education::Lesson;
use crate::engine::Engine;
use crate::history::display_date;
use crate::normalize::normalize_url;
use crate::render::{ResultView, Tone, Verdict, render};

use state::{Accordion, AudienceTab, HistoryDropdown, NavbarState, ScanFormState};

const EDUCATION_TIMEOUT: Duration = Duration::from_secs(120);

pub fn run(engine: Engine, color: bool) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter the alternate screen")?;

    let mut tui = Tui {
        terminal: Terminal::new(CrosstermBackend::new(stdout))
            .context("failed to initialize the terminal")?,
    };
    tui.terminal.clear().ok();

    let handle = runtime.handle().clone();
    let res = panic::catch_unwind(panic::AssertUnwindSafe(|| {
        run_app(&mut tui.terminal, engine, &handle, color)
    }));

    let _ = tui.terminal.show_cursor();
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);

    runtime.shutdown_timeout(Duration::from_millis(200));

    match res {
        Ok(res) => res,
        Err(_) => Err(anyhow::anyhow!(
            "the terminal UI panicked (the terminal state should have been restored)"
        )),
    }
}

struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Landing,
    Scanner,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Input,
    History,
}

struct PendingScan {
    url: String,
    rx: mpsc::Receiver<Result<ScanResult>>,
}

struct PendingEducation {
    rx: mpsc::Receiver<EducationFeed>,
    started_at: Instant,
}

struct App {
    color: bool,
    screen: Screen,
    help_return_to: Screen,

    lesson: Lesson,
    audience: AudienceTab,
    accordion: Accordion,
    mitigation_cursor: usize,
    navbar: NavbarState,
    landing_scroll: u16,

    form: ScanFormState,
    focus: Focus,
    dropdown: HistoryDropdown,
    result: Option<ResultView>,
    result_scroll: u16,

    banner: Option<String>,
    pending_scan: Option<PendingScan>,
    pending_education: Option<PendingEducation>,

    tick: u64,
}

impl App {
    fn new(color: bool, engine: &Engine) -> Self {
        Self {
            color,
            screen: Screen::Landing,
            help_return_to: Screen::Landing,
            lesson: Lesson::built_in(),
            audience: AudienceTab::default(),
            accordion: Accordion::default(),
            mitigation_cursor: 0,
            navbar: NavbarState::default(),
            landing_scroll: 0,
            form: ScanFormState::default(),
            focus: Focus::Input,
            dropdown: HistoryDropdown::new(engine.history()),
            result: None,
            result_scroll: 0,
            banner: None,
            pending_scan: None,
            pending_education: None,
            tick: 0,
        }
    }

    fn mitigation_count(&self) -> usize {
        self.lesson.mitigations(self.audience).len()
    }

    fn switch_audience(&mut self) {
        self.audience = self.audience.toggle();
        self.accordion.reset();
        self.mitigation_cursor = 0;
    }

    fn scroll_landing(&mut self, rows: i32) {
        let next = (i32::from(self.landing_scroll) + rows).clamp(0, i32::from(u16::MAX));
        self.landing_scroll = u16::try_from(next).unwrap_or(0);
        self.navbar.on_scroll_rows(self.landing_scroll);
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    engine: Engine,
    handle: &Handle,
    color: bool,
) -> Result<()> {
    let mut app = App::new(color, &engine);
    start_education(&mut app, &engine, handle);

    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| draw(f, &mut app)).context("failed to draw")?;

        poll_education(&mut app);
        poll_scan(&mut app, &engine);

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout).context("failed to poll terminal events")? {
            if let Event::Key(key) = event::read().context("failed to read terminal event")? {
                if key.kind == KeyEventKind::Press && handle_key(&mut app, &engine, handle, key)? {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick = app.tick.wrapping_add(1);
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn start_education(app: &mut App, engine: &Engine, handle: &Handle) {
    let (tx, rx) = mpsc::channel::<EducationFeed>();
    let engine = engine.clone();
    handle.spawn(async move {
        let _ = tx.send(engine.education().await);
    });
    app.pending_education = Some(PendingEducation {
        rx,
        started_at: Instant::now(),
    });
}

fn poll_education(app: &mut App) {
    let Some(pending) = app.pending_education.take() else {
        return;
    };
    match pending.rx.try_recv() {
        Ok(feed) => {
            app.lesson = Lesson::from_feed(feed);
            app.accordion.reset();
            app.mitigation_cursor = 0;
        }
        Err(mpsc::TryRecvError::Empty) => {
            if pending.started_at.elapsed() <= EDUCATION_TIMEOUT {
                app.pending_education = Some(pending);
            }
        }
        Err(mpsc::TryRecvError::Disconnected) => {}
    }
}

fn start_scan(app: &mut App, engine: &Engine, handle: &Handle) {
    let Some(raw) = app.form.begin_submit() else {
        return;
    };
    let Some(url) = normalize_url(&raw) else {
        app.form.finish();
        return;
    };

    let (tx, rx) = mpsc::channel::<Result<ScanResult>>();
    let worker = engine.clone();
    let target = url.clone();
    handle.spawn(async move {
        let _ = tx.send(worker.analyze(&target).await);
    });

    app.pending_scan = Some(PendingScan { url, rx });
    app.banner = None;
    app.result = None;
    app.result_scroll = 0;
    app.dropdown.close();
    app.focus = Focus::Input;
}

fn poll_scan(app: &mut App, engine: &Engine) {
    let Some(pending) = app.pending_scan.take() else {
        return;
    };
    match pending.rx.try_recv() {
        Ok(Ok(result)) => {
            if let Some(list) = engine.record(&result, &pending.url) {
                app.dropdown.set_entries(list);
            }
            app.result = Some(render(&result));
            app.form.finish();
        }
        Ok(Err(err)) => {
            app.banner = Some(err.to_string());
            app.form.finish();
        }
        // No deadline: the request ends when the transport does.
        Err(mpsc::TryRecvError::Empty) => app.pending_scan = Some(pending),
        Err(mpsc::TryRecvError::Disconnected) => {
            app.banner = Some("Lost contact with the background scan task.".to_string());
            app.form.finish();
        }
    }
}

fn open_help(app: &mut App) {
    app.help_return_to = app.screen;
    app.screen = Screen::Help;
}

fn handle_key(app: &mut App, engine: &Engine, handle: &Handle, key: KeyEvent) -> Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.screen {
        Screen::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')) {
                app.screen = app.help_return_to;
            }
        }
        Screen::Landing => match key.code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Char('?') => open_help(app),
            KeyCode::Char('s') => app.screen = Screen::Scanner,
            KeyCode::Down | KeyCode::Char('j') => app.scroll_landing(1),
            KeyCode::Up | KeyCode::Char('k') => app.scroll_landing(-1),
            KeyCode::PageDown => app.scroll_landing(10),
            KeyCode::PageUp => app.scroll_landing(-10),
            KeyCode::Home | KeyCode::Char('g') => app.scroll_landing(-i32::from(u16::MAX)),
            KeyCode::Tab | KeyCode::BackTab => app.switch_audience(),
            KeyCode::Char(']') => {
                let n = app.mitigation_count();
                if n > 0 {
                    app.mitigation_cursor = (app.mitigation_cursor + 1) % n;
                }
            }
            KeyCode::Char('[') => {
                let n = app.mitigation_count();
                if n > 0 {
                    app.mitigation_cursor = (app.mitigation_cursor + n - 1) % n;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if app.mitigation_cursor < app.mitigation_count() {
                    app.accordion.toggle(app.mitigation_cursor);
                }
            }
            _ => {}
        },
        Screen::Scanner => match app.focus {
            Focus::Input => match key.code {
                KeyCode::Esc => app.screen = Screen::Landing,
                KeyCode::Enter => start_scan(app, engine, handle),
                KeyCode::Tab => {
                    app.dropdown.toggle();
                    if app.dropdown.is_open() {
                        app.focus = Focus::History;
                    }
                }
                KeyCode::Backspace => app.form.backspace(),
                KeyCode::PageDown => app.result_scroll = app.result_scroll.saturating_add(5),
                KeyCode::PageUp => app.result_scroll = app.result_scroll.saturating_sub(5),
                KeyCode::F(1) => open_help(app),
                KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.form.clear_input();
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.form.push(c);
                }
                _ => {}
            },
            Focus::History => match key.code {
                KeyCode::Esc | KeyCode::Tab => {
                    app.dropdown.close();
                    app.focus = Focus::Input;
                }
                KeyCode::Down | KeyCode::Char('j') => app.dropdown.next(),
                KeyCode::Up | KeyCode::Char('k') => app.dropdown.prev(),
                KeyCode::Enter => {
                    if let Some(url) = app.dropdown.selected_url().map(str::to_string) {
                        app.form.set_input(url);
                        start_scan(app, engine, handle);
                    }
                }
                KeyCode::Char('x') | KeyCode::Delete => {
                    match engine.clear_history() {
                        Ok(()) => app.dropdown.set_entries(Vec::new()),
                        Err(err) => app.banner = Some(format!("{err:#}")),
                    }
                    app.focus = Focus::Input;
                }
                _ => {}
            },
        },
    }

    Ok(false)
}

fn draw(f: &mut ratatui::Frame, app: &mut App) {
    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(size);

    draw_header(f, chunks[0], app);
    draw_footer(f, chunks[2], app);

    match app.screen {
        Screen::Landing => draw_landing(f, chunks[1], app),
        Screen::Scanner => draw_scanner(f, chunks[1], app),
        Screen::Help => {
            match app.help_return_to {
                Screen::Scanner => draw_scanner(f, chunks[1], app),
                _ => draw_landing(f, chunks[1], app),
            }
            draw_help(f, chunks[1]);
        }
    }
}

fn draw_header(f: &mut ratatui::Frame, area: Rect, app: &App) {
    let title = match app.screen {
        Screen::Landing => "PhishGuard - What is phishing?",
        Screen::Scanner => "PhishGuard - URL scanner",
        Screen::Help => "PhishGuard - Help",
    };
    let right = format!("v{}", env!("CARGO_PKG_VERSION"));

    let mut spans = vec![
        Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(right, Style::default().fg(Color::DarkGray)),
    ];
    if app.screen == Screen::Landing && app.navbar.visible() {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            "[s] Check a URL now",
            accent(Style::default().fg(Color::Green), app.color),
        ));
    }

    let w = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(w, area);
}

fn draw_footer(f: &mut ratatui::Frame, area: Rect, app: &App) {
    let keys = match (app.screen, app.focus) {
        (Screen::Landing, _) => {
            "j/k: scroll  Tab: audience  [/]: select  Enter: expand  s: scanner  ?: help  q: quit"
        }
        (Screen::Scanner, Focus::Input) => {
            "Enter: scan  Tab: history  PgUp/PgDn: scroll result  Ctrl-U: clear  Esc: back  F1: help"
        }
        (Screen::Scanner, Focus::History) => {
            "j/k: select  Enter: scan again  x: clear history  Esc: close"
        }
        (Screen::Help, _) => "Esc: close",
    };
    let mut lines = vec![Line::from(Span::styled(
        keys,
        Style::default().fg(Color::DarkGray),
    ))];
    if app.pending_education.is_some() {
        lines.push(Line::from(Span::styled(
            "loading educational content...",
            Style::default().fg(Color::DarkGray),
        )));
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_landing(f: &mut ratatui::Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let tabs = Tabs::new(vec![
        AudienceTab::Individual.title(),
        AudienceTab::Organization.title(),
    ])
    .select(match app.audience {
        AudienceTab::Individual => 0,
        AudienceTab::Organization => 1,
    })
    .highlight_style(accent(
        Style::default().add_modifier(Modifier::BOLD),
        app.color,
    ))
    .block(Block::default().borders(Borders::ALL).title("Mitigation"));
    f.render_widget(tabs, chunks[0]);

    let lines = landing_lines(app);
    let max_scroll = u16::try_from(lines.len().saturating_sub(1)).unwrap_or(u16::MAX);
    if app.landing_scroll > max_scroll {
        app.landing_scroll = max_scroll;
        app.navbar.on_scroll_rows(app.landing_scroll);
    }

    let w = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false })
        .scroll((app.landing_scroll, 0));
    f.render_widget(w, chunks[1]);
}

fn landing_lines(app: &App) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::new();

    for section in app.lesson.sections {
        lines.push(Line::from(Span::styled(section.title, bold)));
        if !section.body.is_empty() {
            lines.push(Line::from(section.body));
        }
        for card in section.cards {
            lines.push(Line::from(vec![
                Span::styled("  * ", accent(Style::default().fg(Color::Yellow), app.color)),
                Span::styled(card.title, bold),
            ]));
            lines.push(Line::from(format!("    {}", card.body)));
        }
        lines.push(Line::from(""));
    }

    if !app.lesson.categories.is_empty() {
        lines.push(Line::from(Span::styled("Types of phishing", bold)));
        for category in &app.lesson.categories {
            lines.push(Line::from(format!("- {}", category.category_type)));
            if !category.description.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {}", category.description),
                    dim,
                )));
            }
            for indicator in &category.indicators {
                lines.push(Line::from(format!("  ! {indicator}")));
            }
        }
        lines.push(Line::from(""));
    }

    let items = app.lesson.mitigations(app.audience);
    lines.push(Line::from(Span::styled(app.audience.title(), bold)));
    if items.is_empty() {
        lines.push(Line::from(Span::styled(
            "No mitigation guidance available.",
            dim,
        )));
    }
    for (i, item) in items.iter().enumerate() {
        let open = app.accordion.is_open(i);
        let marker = if open { "v" } else { ">" };
        let mut style = Style::default();
        if i == app.mitigation_cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        lines.push(Line::from(Span::styled(
            format!("{marker} {}", item.title),
            style,
        )));
        if open {
            if !item.description.is_empty() {
                lines.push(Line::from(format!("    {}", item.description)));
            }
            for (n, step) in item.steps.iter().enumerate() {
                lines.push(Line::from(format!("    {}. {step}", n + 1)));
            }
        }
    }

    lines
}

fn draw_scanner(f: &mut ratatui::Frame, area: Rect, app: &mut App) {
    let banner_h = if app.banner.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_h),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

    if let Some(msg) = &app.banner {
        let w = Paragraph::new(msg.clone())
            .style(accent(Style::default().fg(Color::Red), app.color))
            .block(Block::default().borders(Borders::ALL).title("Error"))
            .wrap(Wrap { trim: false });
        f.render_widget(w, chunks[0]);
    }

    let input_title = if app.form.in_flight() {
        "URL (scanning...)"
    } else {
        "URL"
    };
    let input = Paragraph::new(app.form.input().to_string())
        .block(Block::default().borders(Borders::ALL).title(input_title));
    f.render_widget(input, chunks[1]);
    if app.focus == Focus::Input && !app.form.in_flight() {
        let width = unicode_width::UnicodeWidthStr::width(app.form.input());
        let x = chunks[1]
            .x
            .saturating_add(1)
            .saturating_add(u16::try_from(width).unwrap_or(u16::MAX))
            .min(chunks[1].right().saturating_sub(2));
        f.set_cursor(x, chunks[1].y + 1);
    }

    if app.form.in_flight() {
        draw_running(f, chunks[2], app);
    } else if let Some(view) = &app.result {
        let w = Paragraph::new(Text::from(result_lines(view, app.color)))
            .block(Block::default().borders(Borders::ALL).title("Result"))
            .wrap(Wrap { trim: false })
            .scroll((app.result_scroll, 0));
        f.render_widget(w, chunks[2]);
    } else {
        let hint = Paragraph::new("Type or paste a suspicious link and press Enter.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Result"));
        f.render_widget(hint, chunks[2]);
    }

    if app.dropdown.is_open() {
        draw_history_dropdown(f, chunks[2], app);
    }
}

fn draw_running(f: &mut ratatui::Frame, area: Rect, app: &App) {
    let spinner = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    let idx = (app.tick as usize) % spinner.len();
    let s = spinner[idx];
    let target = app
        .pending_scan
        .as_ref()
        .map(|p| p.url.as_str())
        .unwrap_or("");

    let w = Paragraph::new(Line::from(vec![
        Span::styled(s, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" Analyzing "),
        Span::raw(target.to_string()),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .wrap(Wrap { trim: false });
    f.render_widget(w, centered_rect(70, 30, area));
}

fn draw_history_dropdown(f: &mut ratatui::Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .dropdown
        .entries()
        .iter()
        .map(|r| {
            let verdict = Verdict::from_flag(r.is_phishing);
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<8}", verdict.badge()),
                    verdict_style(verdict, app.color),
                ),
                Span::raw(" "),
                Span::styled(
                    display_date(&r.timestamp),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(" "),
                Span::raw(r.url.clone()),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.dropdown.selected()));

    let popup = Rect {
        height: area
            .height
            .min(u16::try_from(items.len()).unwrap_or(u16::MAX).saturating_add(2)),
        ..area
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Recent scans"))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    f.render_widget(Clear, popup);
    f.render_stateful_widget(list, popup, &mut state);
}

fn result_lines(view: &ResultView, color: bool) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(Span::styled(
            view.headline,
            verdict_style(view.verdict, color).add_modifier(Modifier::BOLD),
        )),
        Line::from(view.url.clone()),
        Line::from(vec![
            Span::styled("risk ", dim),
            Span::raw(view.risk_label),
            Span::styled("  confidence ", dim),
            Span::raw(view.confidence.clone()),
            Span::styled("  analysis time ", dim),
            Span::raw(view.analysis_time.clone()),
        ]),
    ];

    if let Some(imp) = &view.impersonation {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Impersonating ", bold),
            Span::raw(format!("{} ({} similar)", imp.brand, imp.similarity)),
        ]));
    }

    if let Some(indicators) = &view.risk_indicators {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Risk indicators", bold)));
        for indicator in indicators {
            lines.push(Line::from(format!("  - {indicator}")));
        }
    }

    if let Some(geo) = &view.geolocation {
        let place: Vec<&str> = [geo.city.as_deref(), geo.country.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Server location", bold)));
        lines.push(Line::from(format!(
            "  {} ({}, {})",
            if place.is_empty() {
                "unknown".to_string()
            } else {
                place.join(", ")
            },
            geo.lat,
            geo.lon
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", geo.viewport.embed_url),
            dim,
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Technical details", bold)));
    for cell in &view.features {
        let style = match cell.tone {
            Tone::Good => accent(Style::default().fg(Color::Green), color),
            Tone::Bad => accent(Style::default().fg(Color::Red), color),
            Tone::Neutral => Style::default(),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<14}", cell.label), dim),
            Span::styled(cell.value.clone(), style),
        ]));
    }

    lines
}

fn draw_help(f: &mut ratatui::Frame, area: Rect) {
    let text = Text::from(vec![
        Line::from(Span::styled(
            "PhishGuard",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Landing:"),
        Line::from("  j/k, Up/Down, PgUp/PgDn : scroll"),
        Line::from("  Tab                     : switch audience"),
        Line::from("  [ / ]                   : select a mitigation entry"),
        Line::from("  Enter / Space           : expand or collapse the entry"),
        Line::from("  s                       : open the scanner"),
        Line::from("  q                       : quit"),
        Line::from(""),
        Line::from("Scanner:"),
        Line::from("  Enter     : analyze the typed URL"),
        Line::from("  Tab       : recent scans (Enter scans again, x clears)"),
        Line::from("  PgUp/PgDn : scroll the result"),
        Line::from("  Ctrl-U    : clear the input"),
        Line::from("  Esc       : back to the landing page"),
        Line::from(""),
        Line::from("  Ctrl-C    : quit from anywhere"),
    ]);

    let popup = centered_rect(70, 70, area);
    let w = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .wrap(Wrap { trim: false });
    f.render_widget(Clear, popup);
    f.render_widget(w, popup);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn verdict_style(verdict: Verdict, enabled: bool) -> Style {
    match verdict {
        Verdict::Phishing => accent(Style::default().fg(Color::Red), enabled),
        Verdict::Safe => accent(Style::default().fg(Color::Green), enabled),
    }
}

fn accent(style: Style, enabled: bool) -> Style {
    if enabled { style } else { Style::default() }
}

use anyhow::Error;
use std::io::{self, Write};
use unicode_width::UnicodeWidthChar;

use crate::core::{HistoryRecord, RiskLevel};
use crate::education::{Audience, Lesson};
use crate::history::display_date;
use crate::render::{FeatureCell, ResultView, Tone, Verdict, percent};

#[derive(Debug, Clone)]
pub struct UiConfig {
    pub color: bool,
    pub stdin_is_tty: bool,
    pub stdout_is_tty: bool,
    pub stderr_is_tty: bool,
    pub quiet: bool,
}

pub fn eprintln_error(err: &Error) {
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "error:");
    let _ = writeln!(stderr, "  {err}");

    let mut causes = err.chain().skip(1).peekable();
    if causes.peek().is_some() {
        let _ = writeln!(stderr, "caused by:");
        for cause in causes {
            let _ = writeln!(stderr, "  - {cause}");
        }
    }

    let _ = writeln!(stderr, "next:");
    let _ = writeln!(stderr, "  - re-run with `--verbose` for details");
    let _ = writeln!(
        stderr,
        "  - see `phishguard --help` for available commands and options"
    );
}

pub fn print_result(view: &ResultView, cfg: &UiConfig) {
    if cfg.quiet {
        return;
    }
    let mut out = io::stdout().lock();
    write_result(&mut out, view, cfg.color);
}

pub fn write_result(out: &mut dyn Write, view: &ResultView, color: bool) {
    let _ = writeln!(
        out,
        "{}  {}",
        paint_verdict(view.headline, view.verdict, color),
        view.url
    );
    let _ = writeln!(
        out,
        "risk: {}  confidence: {}  analysis time: {}",
        format_risk(view.risk_level, view.risk_label, color),
        view.confidence,
        view.analysis_time
    );

    if let Some(imp) = &view.impersonation {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "impersonation: {} ({} similar)",
            imp.brand, imp.similarity
        );
    }

    if let Some(indicators) = &view.risk_indicators {
        let _ = writeln!(out);
        let _ = writeln!(out, "risk indicators:");
        for indicator in indicators {
            let _ = writeln!(out, "  - {indicator}");
        }
    }

    if let Some(geo) = &view.geolocation {
        let place: Vec<&str> = [geo.city.as_deref(), geo.country.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        let _ = writeln!(out);
        if place.is_empty() {
            let _ = writeln!(out, "location: {}, {}", geo.lat, geo.lon);
        } else {
            let _ = writeln!(
                out,
                "location: {} ({}, {})",
                place.join(", "),
                geo.lat,
                geo.lon
            );
        }
        let _ = writeln!(out, "map: {}", geo.viewport.embed_url);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "features:");
    write_feature_grid(out, &view.features, color);
}

fn write_feature_grid(out: &mut dyn Write, cells: &[FeatureCell], color: bool) {
    let label_w = cells
        .iter()
        .map(|c| visible_width_ansi(c.label))
        .max()
        .unwrap_or(0);
    for cell in cells {
        let _ = writeln!(
            out,
            "  {}  {}",
            pad_end_display(cell.label, label_w),
            paint_tone(&cell.value, cell.tone, color)
        );
    }
}

pub fn print_history(records: &[HistoryRecord], cfg: &UiConfig) {
    if cfg.quiet {
        return;
    }
    let mut out = io::stdout().lock();
    write_history(&mut out, records, cfg.color);
}

pub fn write_history(out: &mut dyn Write, records: &[HistoryRecord], color: bool) {
    if records.is_empty() {
        let _ = writeln!(out, "No scans yet.");
        return;
    }

    let label_no = "#";
    let label_verdict = "verdict";
    let label_conf = "conf";
    let label_date = "date";
    let label_url = "url";

    let no_w = records.len().to_string().len().max(label_no.len());
    let verdict_w = Verdict::Phishing.badge().len().max(label_verdict.len());
    let conf_w = "100%".len().max(label_conf.len());
    let date_w = records
        .iter()
        .map(|r| visible_width_ansi(&display_date(&r.timestamp)))
        .max()
        .unwrap_or(0)
        .max(label_date.len());

    let _ = writeln!(
        out,
        "{}  {}  {}  {}  {}",
        pad_start_display(label_no, no_w),
        pad_end_display(label_verdict, verdict_w),
        pad_start_display(label_conf, conf_w),
        pad_end_display(label_date, date_w),
        label_url
    );
    let _ = writeln!(
        out,
        "{}  {}  {}  {}  {}",
        "-".repeat(no_w),
        "-".repeat(verdict_w),
        "-".repeat(conf_w),
        "-".repeat(date_w),
        "-".repeat(label_url.len())
    );

    for (i, record) in records.iter().enumerate() {
        let verdict = Verdict::from_flag(record.is_phishing);
        let badge = pad_end_ansi(&paint_verdict(verdict.badge(), verdict, color), verdict_w);
        let _ = writeln!(
            out,
            "{}  {badge}  {}  {}  {}",
            pad_start_display(&(i + 1).to_string(), no_w),
            pad_start_display(&percent(record.confidence), conf_w),
            pad_end_display(&display_date(&record.timestamp), date_w),
            truncate_middle(&record.url, 80)
        );
    }
}

pub fn print_lesson(lesson: &Lesson, audience: Audience, cfg: &UiConfig) {
    if cfg.quiet {
        return;
    }
    let mut out = io::stdout().lock();
    write_lesson(&mut out, lesson, audience, cfg.color);
}

pub fn write_lesson(out: &mut dyn Write, lesson: &Lesson, audience: Audience, color: bool) {
    for section in lesson.sections {
        let _ = writeln!(out, "{}", bold(section.title, color));
        if !section.body.is_empty() {
            let _ = writeln!(out, "  {}", section.body);
        }
        for (i, card) in section.cards.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, card.title);
            let _ = writeln!(out, "     {}", card.body);
        }
        let _ = writeln!(out);
    }

    if !lesson.categories.is_empty() {
        let _ = writeln!(out, "{}", bold("Types of phishing", color));
        for category in &lesson.categories {
            let _ = writeln!(out, "- {}", category.category_type);
            if !category.description.is_empty() {
                let _ = writeln!(out, "  {}", category.description);
            }
            for indicator in &category.indicators {
                let _ = writeln!(out, "  ! {indicator}");
            }
            for example in &category.examples {
                let _ = writeln!(out, "  e.g. {example}");
            }
        }
        let _ = writeln!(out);
    }

    let items = lesson.mitigations(audience);
    if !items.is_empty() {
        let _ = writeln!(out, "{}", bold(audience.title(), color));
        for item in items {
            let _ = writeln!(out, "- {}", item.title);
            if !item.description.is_empty() {
                let _ = writeln!(out, "  {}", item.description);
            }
            for (i, step) in item.steps.iter().enumerate() {
                let _ = writeln!(out, "  {}. {step}", i + 1);
            }
        }
    }
}

fn paint_verdict(s: &str, verdict: Verdict, color: bool) -> String {
    let tone = match verdict {
        Verdict::Phishing => Tone::Bad,
        Verdict::Safe => Tone::Good,
    };
    paint_tone(s, tone, color)
}

fn paint_tone(s: &str, tone: Tone, color: bool) -> String {
    if !color {
        return s.to_string();
    }
    match tone {
        Tone::Good => format!("\x1b[32m{s}\x1b[0m"),
        Tone::Bad => format!("\x1b[31m{s}\x1b[0m"),
        Tone::Neutral => s.to_string(),
    }
}

fn format_risk(risk: Option<RiskLevel>, label: &str, color: bool) -> String {
    if !color {
        return label.to_string();
    }
    let code = match risk {
        None => "90",
        Some(RiskLevel::Low) => "32",
        Some(RiskLevel::Medium) => "33",
        Some(RiskLevel::High) => "31",
    };
    format!("\x1b[{code}m{label}\x1b[0m")
}

fn bold(s: &str, color: bool) -> String {
    if color {
        format!("\x1b[1m{s}\x1b[0m")
    } else {
        s.to_string()
    }
}

fn truncate_middle(s: &str, max_chars: usize) -> String {
    let len = s.chars().count();
    if len <= max_chars {
        return s.to_string();
    }

    let keep = max_chars.saturating_sub(3);
    let left = keep / 2;
    let right = keep.saturating_sub(left);

    let prefix: String = s.chars().take(left).collect();
    let suffix: String = s.chars().skip(len - right).collect();

    format!("{prefix}...{suffix}")
}

fn pad_end_ansi(s: &str, width: usize) -> String {
    let w = visible_width_ansi(s);
    if w >= width {
        return s.to_string();
    }
    format!("{s}{}", " ".repeat(width - w))
}

fn pad_end_display(s: &str, width: usize) -> String {
    pad_end_ansi(s, width)
}

fn pad_start_display(s: &str, width: usize) -> String {
    let w = visible_width_ansi(s);
    if w >= width {
        return s.to_string();
    }
    format!("{}{}", " ".repeat(width - w), s)
}

fn visible_width_ansi(s: &str) -> usize {
    let mut width: usize = 0;
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            let _ = chars.next();
            for ch2 in chars.by_ref() {
                if ch2 == 'm' {
                    break;
                }
            }
            continue;
        }
        width = width.saturating_add(UnicodeWidthChar::width(ch).unwrap_or(0));
    }
    width
}

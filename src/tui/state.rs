//! Local view state for the landing and scanner screens.
//!
//! Nothing here touches the terminal, so every transition is unit-testable.

use crate::core::HistoryRecord;

pub use crate::education::Audience as AudienceTab;

/// Scroll offset, in virtual pixels, past which the navbar is shown.
pub const NAVBAR_REVEAL_OFFSET: u32 = 100;

/// Virtual pixels per terminal row when converting a row scroll to an offset.
pub const ROW_HEIGHT_PX: u32 = 20;

/// Single-open accordion. Opening one entry closes any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accordion {
    open: Option<usize>,
}

impl Accordion {
    pub fn toggle(&mut self, index: usize) {
        self.open = if self.open == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open
    }

    pub fn reset(&mut self) {
        self.open = None;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavbarState {
    visible: bool,
}

impl NavbarState {
    /// No hysteresis: visibility flips exactly at the threshold, both ways.
    pub fn on_scroll(&mut self, offset: u32) {
        self.visible = offset > NAVBAR_REVEAL_OFFSET;
    }

    pub fn on_scroll_rows(&mut self, rows: u16) {
        self.on_scroll(u32::from(rows) * ROW_HEIGHT_PX);
    }

    pub fn visible(&self) -> bool {
        self.visible
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanFormState {
    input: String,
    in_flight: bool,
}

impl ScanFormState {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, s: impl Into<String>) {
        self.input = s.into();
    }

    pub fn push(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn can_submit(&self) -> bool {
        !self.in_flight && !self.input.trim().is_empty()
    }

    /// Marks a request as outstanding and returns the text to submit, or
    /// `None` when submitting is not allowed right now.
    pub fn begin_submit(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        self.in_flight = true;
        Some(self.input.clone())
    }

    pub fn finish(&mut self) {
        self.in_flight = false;
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryDropdown {
    entries: Vec<HistoryRecord>,
    selected: usize,
    open: bool,
}

impl HistoryDropdown {
    pub fn new(entries: Vec<HistoryRecord>) -> Self {
        Self {
            entries,
            selected: 0,
            open: false,
        }
    }

    pub fn entries(&self) -> &[HistoryRecord] {
        &self.entries
    }

    pub fn set_entries(&mut self, entries: Vec<HistoryRecord>) {
        self.entries = entries;
        if self.entries.is_empty() {
            self.open = false;
        }
        self.selected = self.selected.min(self.entries.len().saturating_sub(1));
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Opening an empty dropdown is a no-op.
    pub fn toggle(&mut self) {
        self.open = !self.open && !self.entries.is_empty();
        if self.open {
            self.selected = 0;
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn next(&mut self) {
        if !self.entries.is_empty() {
            self.selected = (self.selected + 1) % self.entries.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.entries.is_empty() {
            self.selected = (self.selected + self.entries.len() - 1) % self.entries.len();
        }
    }

    pub fn selected_url(&self) -> Option<&str> {
        if !self.open {
            return None;
        }
        self.entries.get(self.selected).map(|r| r.url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str) -> HistoryRecord {
        HistoryRecord {
            url: url.to_string(),
            is_phishing: false,
            confidence: 0.1,
            timestamp: "2025-01-01T00:00:00Z".to_string(),
            full_result: None,
        }
    }

    #[test]
    fn accordion_is_single_open_and_toggles_closed() {
        let mut acc = Accordion::default();
        acc.toggle(1);
        assert!(acc.is_open(1));
        acc.toggle(2);
        assert!(!acc.is_open(1));
        assert!(acc.is_open(2));
        acc.toggle(2);
        assert_eq!(acc.open_index(), None);
    }

    #[test]
    fn navbar_flips_at_threshold_without_hysteresis() {
        let mut nav = NavbarState::default();
        nav.on_scroll(100);
        assert!(!nav.visible());
        nav.on_scroll(101);
        assert!(nav.visible());
        nav.on_scroll(100);
        assert!(!nav.visible());
        nav.on_scroll_rows(6);
        assert!(nav.visible());
        nav.on_scroll_rows(5);
        assert!(!nav.visible());
    }

    #[test]
    fn form_blocks_blank_and_concurrent_submits() {
        let mut form = ScanFormState::default();
        form.set_input("   ");
        assert!(!form.can_submit());
        assert_eq!(form.begin_submit(), None);

        form.set_input("example.com");
        assert_eq!(form.begin_submit().as_deref(), Some("example.com"));
        assert!(form.in_flight());
        assert_eq!(form.begin_submit(), None);

        form.finish();
        assert!(form.can_submit());
    }

    #[test]
    fn dropdown_wraps_and_ignores_empty() {
        let mut dd = HistoryDropdown::default();
        dd.toggle();
        assert!(!dd.is_open());

        dd.set_entries(vec![record("https://a.test"), record("https://b.test")]);
        assert_eq!(dd.selected_url(), None);
        dd.toggle();
        assert_eq!(dd.selected_url(), Some("https://a.test"));
        dd.prev();
        assert_eq!(dd.selected_url(), Some("https://b.test"));
        dd.next();
        assert_eq!(dd.selected_url(), Some("https://a.test"));

        dd.set_entries(Vec::new());
        assert!(!dd.is_open());
    }

    #[test]
    fn audience_tab_toggles() {
        assert_eq!(AudienceTab::default(), AudienceTab::Individual);
        assert_eq!(AudienceTab::Individual.toggle(), AudienceTab::Organization);
    }
}

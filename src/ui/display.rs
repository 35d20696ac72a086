// Fri Oct 16 2026 - Alex

use crate::memory::{OffsetSet, ViewWidth};
use crate::tracker::SearchStatus;
use colored::*;

pub struct StatusRenderer {
    use_color: bool,
    max_items: usize,
}

impl StatusRenderer {
    pub fn new() -> Self {
        Self {
            use_color: true,
            max_items: 8,
        }
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn with_max_items(mut self, max: usize) -> Self {
        self.max_items = max;
        self
    }

    fn paint(&self, text: String, color: Color) -> String {
        if self.use_color {
            text.color(color).bold().to_string()
        } else {
            text
        }
    }

    pub fn format_offset(&self, offset: usize, width: ViewWidth) -> String {
        format!("[{}] byte 0x{:x}", offset, offset * width.size())
    }

    pub fn render_status(&self, id: &str, status: SearchStatus, width: ViewWidth) -> String {
        let (text, color) = match status {
            SearchStatus::Pending => return format!("{}: pending, no observations yet", id),
            SearchStatus::Narrowing { candidate_count } => (
                format!("{}: {} candidates remain, keep observing", id, candidate_count),
                Color::Yellow,
            ),
            SearchStatus::Converged { offset } => (
                format!("{}: found at {}", id, self.format_offset(offset, width)),
                Color::Green,
            ),
            SearchStatus::NoMatch => (format!("{}: no offset holds that value", id), Color::Red),
            SearchStatus::Ambiguous => (
                format!("{}: observations disagree on every offset", id),
                Color::Red,
            ),
        };

        if status.is_dead_end() {
            self.paint(format!("{}, start a new session", text), color)
        } else {
            self.paint(text, color)
        }
    }

    pub fn render_candidates(&self, candidates: &OffsetSet, width: ViewWidth) -> Vec<String> {
        let mut lines: Vec<String> = candidates
            .iter()
            .take(self.max_items)
            .map(|offset| format!("  {}", self.format_offset(offset, width)))
            .collect();

        if candidates.len() > self.max_items {
            lines.push(format!("  ... {} more", candidates.len() - self.max_items));
        }
        lines
    }
}

impl Default for StatusRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_status_plain() {
        let renderer = StatusRenderer::new().with_color(false);
        assert_eq!(
            renderer.render_status("hp", SearchStatus::Converged { offset: 4 }, ViewWidth::W16),
            "hp: found at [4] byte 0x8"
        );
        assert_eq!(
            renderer.render_status("hp", SearchStatus::Narrowing { candidate_count: 3 }, ViewWidth::W16),
            "hp: 3 candidates remain, keep observing"
        );
    }

    #[test]
    fn test_render_dead_ends_suggest_restart() {
        let renderer = StatusRenderer::new().with_color(false);
        for status in [SearchStatus::NoMatch, SearchStatus::Ambiguous] {
            let line = renderer.render_status("hp", status, ViewWidth::W16);
            assert!(line.ends_with(", start a new session"), "{}", line);
        }
        assert_eq!(
            renderer.render_status("hp", SearchStatus::NoMatch, ViewWidth::W16),
            "hp: no offset holds that value, start a new session"
        );
        assert!(!renderer
            .render_status("hp", SearchStatus::Narrowing { candidate_count: 2 }, ViewWidth::W16)
            .contains("start a new session"));
    }

    #[test]
    fn test_render_candidates_truncates() {
        let renderer = StatusRenderer::new().with_color(false).with_max_items(2);
        let candidates: OffsetSet = [1, 5, 9, 13].into_iter().collect();
        let lines = renderer.render_candidates(&candidates, ViewWidth::W32);
        assert_eq!(lines, vec!["  [1] byte 0x4", "  [5] byte 0x14", "  ... 2 more"]);
    }
}

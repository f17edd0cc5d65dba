use ratatui::layout::{Constraint, Direction, Layout, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Layout utilities for popups
pub mod layout {
    use super::*;

    /// Centered rectangle with a fixed size, clamped to `area`
    pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
        let width = width.min(area.width);
        let height = height.min(area.height);
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length((area.height - height) / 2),
                Constraint::Length(height),
                Constraint::Min(0),
            ])
            .split(area);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length((area.width - width) / 2),
                Constraint::Length(width),
                Constraint::Min(0),
            ])
            .split(popup_layout[1])[1]
    }

    /// Left-hand panel taking `percent` of the width
    pub fn left_panel(percent: u16, area: Rect) -> Rect {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(percent), Constraint::Min(0)])
            .split(area)[0]
    }

    pub fn contains(area: Rect, column: u16, row: u16) -> bool {
        column >= area.x
            && column < area.x.saturating_add(area.width)
            && row >= area.y
            && row < area.y.saturating_add(area.height)
    }
}

/// Cut `text` to at most `max_width` terminal columns, ending with `…` when
/// something was dropped
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Notes", 10), "Notes");
        assert_eq!(truncate("Calendar", 5), "Cale…");
        assert_eq!(truncate("日本語", 4), "日…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(0, 0, 20, 10);
        let popup = layout::centered_rect(40, 4, area);
        assert_eq!(popup.width, 20);
        assert_eq!(popup.height, 4);
        assert_eq!(popup.y, 3);
        assert!(layout::contains(popup, 0, 3));
        assert!(!layout::contains(popup, 0, 7));
    }
}

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::input::keymap::HELP_LINE;
use crate::ui_theme::UiTheme;

/// Inline banner above the records view.
pub fn render_error_banner(frame: &mut Frame, area: Rect, message: &str, palette: &UiTheme) {
    let style = Style::default().fg(palette.error_fg).bg(palette.error_bg);
    let line = Line::from(vec![
        Span::styled(format!(" Error loading records: {message}"), style),
        Span::styled("  (r to retry)", style),
    ]);
    frame.render_widget(Paragraph::new(line).style(style), area);
}

pub fn render_help_line(frame: &mut Frame, area: Rect, notice: Option<&str>, palette: &UiTheme) {
    let line = match notice {
        Some(notice) => Line::styled(format!(" {notice}"), Style::default().fg(palette.error_fg)),
        None => Line::styled(format!(" {HELP_LINE}"), palette.muted()),
    };
    frame.render_widget(Paragraph::new(line), area);
}

pub fn render_prompt(frame: &mut Frame, area: Rect, input: &str, palette: &UiTheme) {
    let line = Line::from(vec![
        Span::styled(":", palette.accent()),
        Span::raw(input.to_string()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
    let x = area
        .x
        .saturating_add(1)
        .saturating_add(input.chars().count() as u16)
        .min(area.right().saturating_sub(1));
    frame.set_cursor_position(Position::new(x, area.y));
}

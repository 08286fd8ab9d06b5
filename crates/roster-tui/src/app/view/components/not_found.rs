use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};

use crate::ui_theme::UiTheme;

pub fn render_not_found(frame: &mut Frame, area: Rect, path: &str, palette: &UiTheme) {
    let text = vec![
        Line::default(),
        Line::styled("404 · Page not found", palette.accent()),
        Line::default(),
        Line::styled(format!("Nothing lives at {path}"), palette.muted()),
        Line::styled("Press esc to go back or : to enter a path", palette.muted()),
    ];
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

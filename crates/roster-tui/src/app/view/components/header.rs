use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use roster_core::ThemeMode;

use crate::app::types::ViewMode;
use crate::ui_theme::UiTheme;

pub struct HeaderModel {
    pub view_mode: ViewMode,
    pub theme_mode: ThemeMode,
    pub path: String,
}

pub fn render_header(frame: &mut Frame, area: Rect, model: &HeaderModel, palette: &UiTheme) {
    let bar = Style::default().fg(palette.header_fg).bg(palette.header_bg);
    let active = bar.add_modifier(Modifier::BOLD | Modifier::REVERSED);

    let toggle = |mode: ViewMode| {
        let style = if model.view_mode == mode { active } else { bar };
        Span::styled(format!(" {} ", mode.label()), style)
    };

    let left = Line::from(vec![
        Span::styled(" roster ", bar.add_modifier(Modifier::BOLD)),
        Span::styled(format!(" {} ", model.path), bar),
    ]);
    let right = Line::from(vec![
        toggle(ViewMode::List),
        toggle(ViewMode::Grid),
        Span::styled(format!("  theme: {} ", model.theme_mode), bar),
    ])
    .alignment(Alignment::Right);

    frame.render_widget(Paragraph::new(left).style(bar), area);
    frame.render_widget(Paragraph::new(right), area);
}

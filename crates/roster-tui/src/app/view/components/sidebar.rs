use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::router::Route;
use crate::ui_theme::UiTheme;

/// Navigation entries: label and whether the route belongs to it.
const ENTRIES: [(&str, fn(&Route) -> bool); 1] = [("Records", Route::in_records)];

pub fn render_sidebar(frame: &mut Frame, area: Rect, route: &Route, palette: &UiTheme) {
    let items: Vec<ListItem> = ENTRIES
        .iter()
        .map(|(label, _)| ListItem::new(Line::from(format!(" {label}"))))
        .collect();
    let selected = ENTRIES.iter().position(|(_, matches)| matches(route));

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::RIGHT)
                .border_style(palette.border()),
        )
        .style(palette.base())
        .highlight_style(palette.selected().patch(palette.accent()));
    let mut state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, area, &mut state);
}

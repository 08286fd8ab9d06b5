use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use roster_core::PageWindow;

use crate::columns::Projection;
use crate::pager::Accumulator;
use crate::pagination::{page_count, placeholder_rows, range_label};
use crate::ui_theme::UiTheme;

const PLACEHOLDER: &str = "░░░░░░░░░░";

pub struct TableProps<'a> {
    pub acc: &'a Accumulator,
    /// Requested window; sizes the placeholder rows.
    pub window: PageWindow,
    /// Window the current rows belong to.
    pub shown: PageWindow,
    pub projection: &'a Projection,
    pub selected: usize,
}

pub fn render_table(frame: &mut Frame, area: Rect, props: &TableProps<'_>, palette: &UiTheme) {
    let [table_area, footer_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .areas(area);

    let columns = &props.projection.columns;
    let widths: Vec<Constraint> = columns.iter().map(|c| c.width).collect();
    let header = Row::new(
        columns
            .iter()
            .map(|c| Cell::from(Span::styled(c.header, palette.accent()))),
    )
    .bottom_margin(1);

    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(palette.border());

    let acc = props.acc;
    let placeholders = placeholder_rows(props.window, acc);
    let skeleton = Style::default().fg(palette.skeleton_fg);

    if placeholders == 0 && acc.is_empty() {
        let empty = Paragraph::new(vec![
            Line::default(),
            Line::styled("No records found", palette.muted()),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, table_area);
    } else {
        let rows: Vec<Row> = if placeholders > 0 {
            (0..placeholders)
                .map(|_| {
                    Row::new(
                        columns
                            .iter()
                            .map(|_| Cell::from(Span::styled(PLACEHOLDER, skeleton))),
                    )
                })
                .collect()
        } else {
            acc.items()
                .iter()
                .map(|user| {
                    Row::new(
                        columns
                            .iter()
                            .map(|c| Cell::from(props.projection.cell(c, user))),
                    )
                })
                .collect()
        };

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(2)
            .row_highlight_style(palette.selected().add_modifier(Modifier::BOLD))
            .highlight_symbol("▌ ");
        let mut state = TableState::default();
        if placeholders == 0 {
            state.select(Some(props.selected.min(acc.items().len().saturating_sub(1))));
        }
        frame.render_stateful_widget(table, table_area, &mut state);
    }

    frame.render_widget(Paragraph::new(footer_line(props, palette)), footer_area);
}

/// `Rows per page: N   a–b of total   Page i of n`
pub fn footer_line(props: &TableProps<'_>, palette: &UiTheme) -> Line<'static> {
    let window = props.shown;
    let pages = page_count(props.acc.total(), window.page_size()).max(1);
    Line::from(vec![
        Span::styled(" Rows per page: ", palette.muted()),
        Span::styled(window.page_size().to_string(), palette.accent()),
        Span::raw("   "),
        Span::raw(range_label(window, props.acc)),
        Span::raw("   "),
        Span::styled(
            format!("Page {} of {}", window.page_index() + 1, pages),
            palette.muted(),
        ),
    ])
    .alignment(Alignment::Right)
}

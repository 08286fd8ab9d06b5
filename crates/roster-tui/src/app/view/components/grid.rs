use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use roster_core::User;

use crate::columns::Projection;
use crate::pager::Accumulator;
use crate::ui_theme::UiTheme;
use crate::virtual_grid::{SKELETON_CARDS, VirtualGrid};

pub struct GridProps<'a> {
    pub acc: &'a Accumulator,
    pub grid: &'a VirtualGrid,
    pub scroll_top: usize,
    pub projection: &'a Projection,
    pub selected: usize,
}

/// Draws the realized rows and returns the viewport height in lines.
pub fn render_grid(frame: &mut Frame, area: Rect, props: &GridProps<'_>, palette: &UiTheme) -> usize {
    let [body, footer] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .areas(area);
    let viewport = usize::from(body.height);
    let acc = props.acc;
    let grid = props.grid;
    let slots = column_slots(body, grid.columns());

    if acc.is_empty() && acc.is_pending() {
        render_skeletons(frame, body, &slots, grid, palette);
    } else if acc.is_empty() {
        let empty = Paragraph::new(vec![
            Line::default(),
            Line::styled("No records found", palette.muted()),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(empty, body);
    } else {
        let items = acc.items();
        for row in grid.realize(items.len(), props.scroll_top, viewport) {
            let y_rel = row.top as i64 - props.scroll_top as i64;
            for (slot, index) in slots.iter().zip(row.items.clone()) {
                let card = CardPlacement {
                    x: slot.x,
                    width: slot.width,
                    y_rel,
                    height: grid.config().card_height,
                };
                render_card(
                    frame,
                    body,
                    card,
                    card_lines(&items[index], props.projection),
                    index == props.selected,
                    palette,
                );
            }
        }

        if acc.is_pending() {
            if let Some(line) = grid.loader_line(items.len(), props.scroll_top, viewport) {
                let loader = Rect {
                    y: body.y + line as u16,
                    height: 1,
                    ..body
                };
                frame.render_widget(
                    Paragraph::new(Line::styled("Loading more records…", palette.accent()))
                        .alignment(Alignment::Center),
                    loader,
                );
            }
        }
    }

    let mut status = vec![Span::styled(
        format!(" Showing {} of {} records", acc.items().len(), acc.total()),
        palette.muted(),
    )];
    if acc.is_pending() {
        status.push(Span::styled("  loading…", palette.accent()));
    }
    frame.render_widget(Paragraph::new(Line::from(status)), footer);

    viewport
}

fn column_slots(body: Rect, columns: usize) -> Vec<Rect> {
    let constraints = vec![Constraint::Fill(1); columns];
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .spacing(1)
        .split(body)
        .to_vec()
}

fn card_lines(user: &User, projection: &Projection) -> Vec<Line<'static>> {
    projection
        .columns
        .iter()
        .map(|column| projection.cell(column, user))
        .collect()
}

fn render_skeletons(
    frame: &mut Frame,
    body: Rect,
    slots: &[Rect],
    grid: &VirtualGrid,
    palette: &UiTheme,
) {
    let bar = Line::styled("░░░░░░░░░░░░", Style::default().fg(palette.skeleton_fg));
    for i in 0..SKELETON_CARDS {
        let Some(slot) = slots.get(i % slots.len().max(1)) else {
            continue;
        };
        let card = CardPlacement {
            x: slot.x,
            width: slot.width,
            y_rel: (grid.row_of(i) * grid.row_size()) as i64,
            height: grid.config().card_height,
        };
        render_card(frame, body, card, vec![bar.clone(); 3], false, palette);
    }
}

#[derive(Debug, Clone, Copy)]
struct CardPlacement {
    x: u16,
    width: u16,
    /// Top of the card relative to the top of the viewport; negative when scrolled past.
    y_rel: i64,
    height: u16,
}

/// Draws the visible part of a card, clipping at the viewport edges.
fn render_card(
    frame: &mut Frame,
    body: Rect,
    card: CardPlacement,
    lines: Vec<Line<'static>>,
    selected: bool,
    palette: &UiTheme,
) {
    let viewport = i64::from(body.height);
    let top = card.y_rel.max(0);
    let bottom = (card.y_rel + i64::from(card.height)).min(viewport);
    if bottom <= top {
        return;
    }

    let mut borders = Borders::LEFT | Borders::RIGHT;
    if card.y_rel >= 0 {
        borders |= Borders::TOP;
    }
    if card.y_rel + i64::from(card.height) <= viewport {
        borders |= Borders::BOTTOM;
    }
    let hidden_content = if card.y_rel < 0 {
        (-card.y_rel - 1).max(0) as u16
    } else {
        0
    };

    let (border_style, fill) = if selected {
        (palette.accent(), palette.selected())
    } else {
        (palette.border(), Style::default())
    };
    let rect = Rect {
        x: card.x,
        y: body.y + top as u16,
        width: card.width,
        height: (bottom - top) as u16,
    };
    let paragraph = Paragraph::new(lines)
        .style(fill)
        .scroll((hidden_content, 0))
        .block(
            Block::default()
                .borders(borders)
                .border_style(border_style),
        );
    frame.render_widget(paragraph, rect);
}

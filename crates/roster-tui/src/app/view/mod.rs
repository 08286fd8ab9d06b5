//! Frame layout. Components are free functions over borrowed state.

pub mod components;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Block;

use super::App;
use super::types::{Mode, ViewMode};
use crate::router::Route;
use components::{detail, grid, header, not_found, sidebar, status, table};

pub const SIDEBAR_WIDTH: u16 = 18;

pub(crate) fn render(app: &mut App, frame: &mut Frame) {
    let palette = app.palette.clone();
    frame.render_widget(Block::default().style(palette.base()), frame.area());

    let [header_area, body_area, status_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    header::render_header(
        frame,
        header_area,
        &header::HeaderModel {
            view_mode: app.view_mode,
            theme_mode: palette.mode,
            path: app.router.current().path(),
        },
        &palette,
    );

    let content_area = if app.sidebar_open {
        let [side, content] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
            .areas(body_area);
        sidebar::render_sidebar(frame, side, app.router.current(), &palette);
        content
    } else {
        body_area
    };

    match app.router.current().clone() {
        Route::Records => render_records(app, frame, content_area),
        Route::RecordDetail(_) => {
            detail::render_detail(frame, content_area, app.detail.status(), &palette)
        }
        Route::NotFound(path) => not_found::render_not_found(frame, content_area, &path, &palette),
    }

    match app.mode {
        Mode::Command => status::render_prompt(frame, status_area, &app.prompt, &palette),
        Mode::Normal => {
            status::render_help_line(frame, status_area, app.notice.as_deref(), &palette)
        }
    }
}

fn render_records(app: &mut App, frame: &mut Frame, area: Rect) {
    let palette = app.palette.clone();
    let projection = app.columns.get(&palette);
    let acc = app.pager.accumulator();

    let body = match acc.error() {
        Some(message) => {
            let [banner, rest] = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(1)])
                .areas(area);
            status::render_error_banner(frame, banner, message, &palette);
            rest
        }
        None => area,
    };

    match app.view_mode {
        ViewMode::List => table::render_table(
            frame,
            body,
            &table::TableProps {
                acc,
                window: app.pager.window(),
                shown: app.pager.applied_window(),
                projection: &projection,
                selected: app.selected,
            },
            &palette,
        ),
        ViewMode::Grid => {
            let viewport = grid::render_grid(
                frame,
                body,
                &grid::GridProps {
                    acc,
                    grid: &app.grid,
                    scroll_top: app.grid_scroll,
                    projection: &projection,
                    selected: app.selected,
                },
                &palette,
            );
            app.grid_viewport = viewport;
        }
    }
}

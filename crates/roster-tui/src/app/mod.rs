pub mod events;
pub mod input;
pub mod types;
pub mod view;

use std::sync::Arc;

use color_eyre::Result;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind, MouseEventKind,
};
use crossterm::execute;
use futures::{FutureExt, StreamExt};
use ratatui::{DefaultTerminal, Frame};
use roster_client::RecordSource;
use roster_core::ThemeMode;
use roster_error::{ResultExt, TracingPolicy};
use tokio::sync::{mpsc, watch};

use crate::columns::ColumnCache;
use crate::detail::DetailController;
use crate::pager::{FetchDriver, Pager, Ticket};
use crate::pagination;
use crate::router::{RECORDS_PATH, Route, Router};
use crate::theme::ThemeStore;
use crate::ui_theme::UiTheme;
use crate::user_config::UserConfig;
use crate::virtual_grid::VirtualGrid;
use events::{AppEvent, handle_event};
use input::keymap::{Action, to_action};
use types::{Mode, ViewMode};

/// Lines moved per mouse wheel notch in the grid.
const WHEEL_STEP: usize = 3;

/// Everything the app needs from startup.
pub struct AppSetup {
    pub source: Arc<dyn RecordSource>,
    pub theme: Arc<ThemeStore>,
    pub config: UserConfig,
}

#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    mode: Mode,
    /// Path typed after `:`.
    prompt: String,
    router: Router,
    view_mode: ViewMode,
    pager: Pager,
    /// Whether the collection has been requested since startup.
    records_started: bool,
    driver: FetchDriver,
    detail: DetailController,
    theme: Arc<ThemeStore>,
    theme_rx: watch::Receiver<ThemeMode>,
    palette: UiTheme,
    columns: ColumnCache,
    grid: VirtualGrid,
    grid_scroll: usize,
    /// Height of the grid body at the last draw.
    grid_viewport: usize,
    /// Index into the accumulated items (table row or grid card).
    selected: usize,
    page_size_options: Vec<usize>,
    sidebar_open: bool,
    /// One-shot status message replacing the help line.
    notice: Option<String>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    needs_redraw: bool,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(setup: AppSetup) -> Self {
        let AppSetup {
            source,
            theme,
            config,
        } = setup;
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let view_mode = config.view;
        let theme_rx = theme.subscribe();
        let palette = UiTheme::for_mode(*theme_rx.borrow());
        Self {
            running: false, // Set by start()
            mode: Mode::default(),
            prompt: String::new(),
            router: Router::new(config.start_route()),
            view_mode,
            pager: Pager::new(view_mode.merge_mode(), config.paging.page_size()),
            records_started: false,
            driver: FetchDriver::new(source, event_tx),
            detail: DetailController::default(),
            theme,
            theme_rx,
            palette,
            columns: ColumnCache::default(),
            grid: VirtualGrid::new(config.grid),
            grid_scroll: 0,
            grid_viewport: 0,
            selected: 0,
            page_size_options: config.paging.options(),
            sidebar_open: true,
            notice: None,
            event_rx,
            needs_redraw: true,
        }
    }

    /// Act on the initial route: fetch the first page or the requested record.
    pub fn start(&mut self) {
        self.running = true;
        self.enter_route();
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        self.start();
        let mut crossterm_events = crossterm::event::EventStream::new();
        if let Err(e) = execute!(std::io::stdout(), EnableMouseCapture) {
            tracing::warn!("Failed to enable mouse capture: {}", e);
        }

        while self.running {
            if self.needs_redraw {
                terminal.draw(|frame| self.draw(frame))?;
                self.needs_redraw = false;
            }

            tokio::select! {
                // Prioritize Ui responsiveness
                biased;

                maybe_event = crossterm_events.next().fuse() => {
                    match maybe_event {
                        Some(Ok(event)) => self.on_terminal_event(event),
                        Some(Err(e)) => {
                            tracing::error!("terminal event stream failed: {}", e);
                            self.quit();
                        }
                        None => self.quit(),
                    }
                }

                Some(app_event) = self.event_rx.recv() => {
                    handle_event(&mut self, app_event);
                }

                Ok(()) = self.theme_rx.changed() => self.on_theme_changed(),
            }
        }

        if let Err(e) = execute!(std::io::stdout(), DisableMouseCapture) {
            tracing::warn!("Failed to disable mouse capture: {}", e);
        }
        Ok(())
    }

    /// Wait for one fetch completion and apply it. `false` once every sender is gone.
    pub async fn process_next_event(&mut self) -> bool {
        match self.event_rx.recv().await {
            Some(event) => {
                handle_event(self, event);
                true
            }
            None => false,
        }
    }

    /// Renders the user interface.
    pub fn draw(&mut self, frame: &mut Frame) {
        view::render(self, frame);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn route(&self) -> &Route {
        self.router.current()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn detail(&self) -> &DetailController {
        &self.detail
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn grid_scroll(&self) -> usize {
        self.grid_scroll
    }

    pub fn palette(&self) -> &UiTheme {
        &self.palette
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Rebuild the palette from the latest mode published by the theme store.
    pub fn on_theme_changed(&mut self) {
        let mode = *self.theme_rx.borrow_and_update();
        self.palette = UiTheme::for_mode(mode);
        self.needs_redraw = true;
    }

    fn on_terminal_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => self.scroll_grid_by(WHEEL_STEP as i64),
                MouseEventKind::ScrollUp => self.scroll_grid_by(-(WHEEL_STEP as i64)),
                _ => {}
            },
            Event::Resize(_, _) => {}
            _ => return,
        }
        self.needs_redraw = true;
    }

    pub fn on_key_event(&mut self, key: KeyEvent) {
        let Some(action) = to_action(self.mode, key) else {
            return;
        };
        self.notice = None;
        self.handle_action(action);
        self.needs_redraw = true;
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.quit(),

            Action::OpenPrompt => {
                self.mode = Mode::Command;
                self.prompt.clear();
            }
            Action::InsertChar(c) => self.prompt.push(c),
            Action::DeleteChar => {
                self.prompt.pop();
            }
            Action::SubmitPrompt => {
                self.mode = Mode::Normal;
                let path = std::mem::take(&mut self.prompt);
                if !path.trim().is_empty() {
                    self.navigate(&path);
                }
            }
            Action::CancelPrompt => {
                self.mode = Mode::Normal;
                self.prompt.clear();
            }

            Action::ToggleSidebar => self.sidebar_open = !self.sidebar_open,
            Action::ToggleView => self.toggle_view(),
            Action::ToggleTheme => self.toggle_theme(),
            Action::Back => self.back(),

            Action::Retry => self.retry(),
            Action::MoveUp => self.move_selection(Step::Up),
            Action::MoveDown => self.move_selection(Step::Down),
            Action::MoveLeft => match self.view_mode {
                ViewMode::List => self.prev_page(),
                ViewMode::Grid => self.move_selection(Step::Left),
            },
            Action::MoveRight => match self.view_mode {
                ViewMode::List => self.next_page(),
                ViewMode::Grid => self.move_selection(Step::Right),
            },
            Action::ScrollPageUp => match self.view_mode {
                ViewMode::List => self.prev_page(),
                ViewMode::Grid => self.scroll_grid_by(-(self.grid_viewport.max(1) as i64)),
            },
            Action::ScrollPageDown => match self.view_mode {
                ViewMode::List => self.next_page(),
                ViewMode::Grid => self.scroll_grid_by(self.grid_viewport.max(1) as i64),
            },
            Action::PrevPage => self.prev_page(),
            Action::NextPage => self.next_page(),
            Action::CyclePageSize => self.cycle_page_size(),
            Action::Activate => self.activate(),
        }
    }

    pub fn navigate(&mut self, path: &str) {
        self.router.navigate(path);
        self.enter_route();
    }

    fn back(&mut self) {
        if self.router.back() {
            self.enter_route();
        } else if self.router.current() != &Route::Records {
            self.navigate(RECORDS_PATH);
        }
    }

    fn enter_route(&mut self) {
        match self.router.current().clone() {
            Route::Records => {
                self.detail.close();
                if !self.records_started {
                    self.records_started = true;
                    let ticket = self.pager.set_page_window(self.pager.window().with_index(0));
                    self.dispatch(ticket);
                }
            }
            Route::RecordDetail(id) => {
                self.detail.open(id);
                self.driver.dispatch_record(id);
            }
            Route::NotFound(path) => {
                tracing::info!(%path, "no route");
                self.detail.close();
            }
        }
    }

    fn on_records(&self) -> bool {
        self.router.current() == &Route::Records
    }

    fn dispatch(&mut self, ticket: Ticket) {
        self.driver.dispatch_page(ticket);
        self.driver.prune(&self.pager);
    }

    fn toggle_view(&mut self) {
        self.view_mode = self.view_mode.toggled();
        self.selected = 0;
        self.grid_scroll = 0;
        tracing::debug!(view = ?self.view_mode, "view toggled");
        let ticket = self.pager.set_mode(self.view_mode.merge_mode());
        self.records_started = true;
        self.dispatch(ticket);
    }

    fn toggle_theme(&mut self) {
        let result = self.theme.toggle().emit_error(&TracingPolicy);
        if let Err(e) = result {
            self.notice = Some(format!("Theme not saved: {e}"));
        }
        // Also marks the new mode as seen by `theme_rx`.
        self.on_theme_changed();
    }

    fn retry(&mut self) {
        if !self.on_records() {
            return;
        }
        if let Some(ticket) = self.pager.retry() {
            self.dispatch(ticket);
        }
    }

    fn prev_page(&mut self) {
        if !self.on_records() || self.view_mode != ViewMode::List {
            return;
        }
        if let Some(ticket) = pagination::prev_page(&mut self.pager) {
            self.selected = 0;
            self.dispatch(ticket);
        }
    }

    fn next_page(&mut self) {
        if !self.on_records() || self.view_mode != ViewMode::List {
            return;
        }
        if let Some(ticket) = pagination::next_page(&mut self.pager) {
            self.selected = 0;
            self.dispatch(ticket);
        }
    }

    fn cycle_page_size(&mut self) {
        if !self.on_records() {
            return;
        }
        let current = self.pager.window().page_size();
        let Some(next) = pagination::cycle_page_size(current, &self.page_size_options) else {
            return;
        };
        match pagination::change_page_size(&mut self.pager, next) {
            Ok(ticket) => {
                self.selected = 0;
                self.grid_scroll = 0;
                self.dispatch(ticket);
            }
            Err(e) => tracing::warn!(%e, "page size rejected"),
        }
    }

    fn move_selection(&mut self, step: Step) {
        if !self.on_records() {
            return;
        }
        let len = self.pager.accumulator().items().len();
        if len == 0 {
            return;
        }
        let stride = match (self.view_mode, step) {
            (ViewMode::Grid, Step::Up | Step::Down) => self.grid.columns(),
            _ => 1,
        };
        self.selected = match step {
            Step::Up | Step::Left => self.selected.saturating_sub(stride),
            Step::Down | Step::Right => self.selected.saturating_add(stride).min(len - 1),
        };
        if self.view_mode == ViewMode::Grid {
            let scroll = self
                .grid
                .scroll_to_item(self.selected, self.grid_scroll, self.grid_viewport);
            self.set_grid_scroll(scroll);
        }
    }

    fn scroll_grid_by(&mut self, delta: i64) {
        if !self.on_records() || self.view_mode != ViewMode::Grid {
            return;
        }
        let target = (self.grid_scroll as i64).saturating_add(delta).max(0) as usize;
        self.set_grid_scroll(target);
    }

    /// Every grid scroll input ends here, moved or not.
    fn set_grid_scroll(&mut self, target: usize) {
        let len = self.pager.accumulator().items().len();
        self.grid_scroll = self.grid.clamp_scroll(len, target, self.grid_viewport);

        let acc = self.pager.accumulator();
        if self.grid.should_load_more(
            self.grid.total_height(len),
            self.grid_scroll,
            self.grid_viewport,
            acc.has_more(),
            acc.is_pending(),
        ) {
            if let Some(ticket) = self.pager.load_more() {
                tracing::debug!(page = ticket.window().page_index(), "infinite scroll");
                self.dispatch(ticket);
            }
        }
    }

    fn activate(&mut self) {
        if !self.on_records() {
            return;
        }
        let acc = self.pager.accumulator();
        if acc.is_pending() && self.view_mode == ViewMode::List {
            return;
        }
        if let Some(user) = acc.items().get(self.selected) {
            let path = Route::RecordDetail(user.id).path();
            self.navigate(&path);
        }
    }

    pub(crate) fn clamp_selection(&mut self) {
        let len = self.pager.accumulator().items().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Up,
    Down,
    Left,
    Right,
}

//! TUI demo shell.
//!
//! Drives the windowed manager against the simulated loader inside a
//! ratatui event loop: input feeds scroll offsets in, polled completions
//! and retry timers feed load events back, and the gallery/stats widgets
//! render whatever the observer callbacks recorded. The shell is a plain
//! consumer of the manager - all windowing decisions stay on the library
//! side.

pub mod gallery;
pub mod stats;

pub use gallery::{GalleryView, TileArt, TileVisual};
pub use stats::StatsPanel;

use crate::config::ResolvedConfig;
use crate::manager::{
    ResourceDisposer, ResourceLoader, RetryPolicy, RetryScheduler, SlotObserver,
    WindowedResourceManager,
};
use crate::model::{AppError, ItemIndex, ItemPosition, ListLayout, LoadOutcome, RequestToken, ScrollState};
use crate::sim::{RetryTimers, SimulatedLoader};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Terminal;
use std::collections::HashMap;
use std::io;
use std::time::{Duration, Instant};
use tracing::info;

/// Target frame interval for the event loop.
const TICK: Duration = Duration::from_millis(33);

/// Width of the stats pane, in columns.
const STATS_WIDTH: u16 = 26;

/// The manager's environment in the demo: simulated loader, retry timer
/// queue, a disposal counter and the per-tile presentation state.
///
/// Implements all four collaborator seams, so a `&mut ShellHooks` is the
/// context threaded through every manager call.
#[derive(Debug)]
pub struct ShellHooks {
    /// Fake network producing completions on poll.
    pub loader: SimulatedLoader,
    /// Due-time queue for scheduled retries.
    pub timers: RetryTimers,
    /// Presentation state per tracked slot.
    pub visuals: HashMap<ItemIndex, TileVisual>,
    /// Resources released so far (the demo has nothing real to free, so
    /// disposal is just counted for the stats panel).
    pub disposed: usize,
}

impl ShellHooks {
    /// Build the shell environment from resolved config.
    pub fn new(config: &ResolvedConfig) -> Self {
        Self {
            loader: SimulatedLoader::new(
                config.seed,
                Duration::from_millis(config.delay_min_ms),
                Duration::from_millis(config.delay_max_ms),
                config.fail_rate,
            ),
            timers: RetryTimers::new(),
            visuals: HashMap::new(),
            disposed: 0,
        }
    }
}

impl ResourceLoader for ShellHooks {
    fn begin_load(&mut self, index: ItemIndex, token: RequestToken) {
        self.loader.begin(index, token, Instant::now());
    }
}

impl ResourceDisposer<TileArt> for ShellHooks {
    fn dispose(&mut self, _resource: TileArt) {
        self.disposed += 1;
    }
}

impl SlotObserver<TileArt> for ShellHooks {
    fn slot_created(&mut self, index: ItemIndex, _position: ItemPosition) {
        self.visuals
            .insert(index, TileVisual::Loading { fraction: 0.0 });
    }

    fn slot_progress(&mut self, index: ItemIndex, fraction: f64) {
        if let Some(visual) = self.visuals.get_mut(&index) {
            if matches!(visual, TileVisual::Loading { .. }) {
                *visual = TileVisual::Loading { fraction };
            }
        }
    }

    fn slot_loaded(&mut self, index: ItemIndex, resource: &TileArt, _position: ItemPosition) {
        self.visuals.insert(index, TileVisual::Ready(*resource));
    }

    fn slot_failed(&mut self, index: ItemIndex) {
        self.visuals.insert(index, TileVisual::Failed);
    }

    fn slot_removed(&mut self, index: ItemIndex) {
        self.visuals.remove(&index);
    }
}

impl RetryScheduler for ShellHooks {
    fn schedule_retry(&mut self, index: ItemIndex, token: RequestToken, delay: Duration) {
        self.timers.schedule(index, token, Instant::now() + delay);
    }
}

/// Split the terminal area into stats and gallery panes.
fn panes(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(STATS_WIDTH), Constraint::Min(10)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Run the demo until the user quits.
///
/// # Errors
///
/// Returns [`AppError`] for invalid gallery geometry or terminal I/O
/// failures. The terminal is restored on the way out either way.
pub fn run(config: &ResolvedConfig) -> Result<(), AppError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_loop(&mut terminal, config);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &ResolvedConfig,
) -> Result<(), AppError> {
    let size = terminal.size()?;
    let (_, gallery_pane) = panes(Rect::new(0, 0, size.width, size.height));

    let layout = ListLayout::new(
        config.items,
        config.item_height,
        config.padding,
        gallery_pane.height as f64,
        config.buffer_rows,
        config.columns,
    )?;
    let retry = RetryPolicy {
        max_retries: config.max_retries,
        delay: Duration::from_millis(config.retry_delay_ms),
    };

    let mut manager: WindowedResourceManager<TileArt> = WindowedResourceManager::new(layout, retry);
    let mut shell = ShellHooks::new(config);
    let mut scroll = ScrollState::new();

    info!(
        items = config.items,
        buffer_rows = config.buffer_rows,
        columns = config.columns,
        "gallery started"
    );
    manager.set_scroll(0.0, &mut shell);

    loop {
        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let step = manager.layout().row_height() / 2.0;
                    let viewport = manager.layout().viewport_height();
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => {
                            manager.clear(&mut shell);
                            return Ok(());
                        }
                        KeyCode::Up | KeyCode::Char('k') => {
                            scroll.scroll_by(step, manager.layout());
                        }
                        KeyCode::Down | KeyCode::Char('j') => {
                            scroll.scroll_by(-step, manager.layout());
                        }
                        KeyCode::PageUp => scroll.scroll_by(viewport, manager.layout()),
                        KeyCode::PageDown => scroll.scroll_by(-viewport, manager.layout()),
                        KeyCode::Home => scroll.scroll_to(0.0, manager.layout()),
                        KeyCode::End => {
                            let bottom = -manager.layout().max_scroll();
                            scroll.scroll_to(bottom, manager.layout());
                        }
                        _ => {}
                    }
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => {
                        scroll.scroll_by(4.0, manager.layout());
                    }
                    MouseEventKind::ScrollDown => {
                        scroll.scroll_by(-4.0, manager.layout());
                    }
                    _ => {}
                },
                Event::Resize(width, height) => {
                    let (_, gallery_pane) = panes(Rect::new(0, 0, width, height));
                    manager.set_viewport_height(gallery_pane.height as f64, &mut shell)?;
                    scroll.scroll_to(scroll.offset, manager.layout());
                }
                _ => {}
            }
        }

        scroll.tick(manager.layout());
        manager.set_scroll(scroll.offset, &mut shell);

        let now = Instant::now();
        for (index, token, fraction) in shell.loader.progress(now) {
            manager.on_load_progress(index, token, fraction, &mut shell);
        }
        for completion in shell.loader.poll(now) {
            let outcome = if completion.failed {
                LoadOutcome::Failure
            } else {
                LoadOutcome::Success(TileArt::procedural(completion.index))
            };
            manager.on_load_result(completion.index, completion.token, outcome, &mut shell);
        }
        for (index, token) in shell.timers.poll(now) {
            manager.retry(index, token, &mut shell);
        }

        terminal.draw(|frame| {
            let (stats_pane, gallery_pane) = panes(frame.area());
            frame.render_widget(
                StatsPanel::new(manager.stats(), shell.loader.in_flight_len(), shell.disposed),
                stats_pane,
            );
            frame.render_widget(
                GalleryView::new(manager.layout(), manager.offset(), &shell.visuals),
                gallery_pane,
            );
            gallery::render_scrollbar(
                frame.buffer_mut(),
                gallery_pane,
                manager.offset(),
                manager.layout(),
            );
        })?;
    }
}
